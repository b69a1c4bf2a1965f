// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Converts an accepted raw prediction into the API detection shape

use super::types::{BoundingBox, Detection, RawPrediction};
use crate::taxonomy;

/// Build the final [`Detection`] for a prediction that already passed the
/// stage filter. `class_name` must be canonical and `class_id` its taxonomy
/// index; the filter guarantees both.
///
/// The center-based box is converted to corner coordinates, truncated toward
/// zero and clamped to `[0, width] x [0, height]`. Confidence is rounded to
/// 3 decimals.
pub fn assemble(
    raw: &RawPrediction,
    class_name: &str,
    class_id: usize,
    image_width: f64,
    image_height: f64,
    model: u8,
) -> Detection {
    let bbox = BoundingBox {
        x1: clamp_axis(raw.x - raw.width / 2.0, image_width),
        y1: clamp_axis(raw.y - raw.height / 2.0, image_height),
        x2: clamp_axis(raw.x + raw.width / 2.0, image_width),
        y2: clamp_axis(raw.y + raw.height / 2.0, image_height),
    };

    Detection {
        class_id,
        class_name: class_name.to_string(),
        class_label: taxonomy::label_for(class_name).to_string(),
        confidence: round3(raw.confidence),
        bbox,
        color: taxonomy::color_for(class_name).to_string(),
        model,
    }
}

/// Truncate toward zero, then clamp to `[0, limit]`.
fn clamp_axis(value: f64, limit: f64) -> u32 {
    (value as i64).clamp(0, limit as i64) as u32
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
