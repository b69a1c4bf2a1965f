// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire and output types for the detection cascade

use serde::{Deserialize, Serialize};

/// One raw prediction as reported by an upstream model.
///
/// The bounding box is center-based in source image pixel space.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPrediction {
    pub class: String,
    pub confidence: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Image dimensions as reported by the upstream model, when present.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PredictorImage {
    pub width: f64,
    pub height: f64,
}

/// Full upstream model response.
///
/// Predictions keep the order the model returned them in; the cascade scans
/// them in that order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictorResponse {
    #[serde(default)]
    pub predictions: Vec<RawPrediction>,
    #[serde(default)]
    pub image: Option<PredictorImage>,
}

/// Corner-based bounding box, clamped to the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

/// The single normalized detection returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Position of the class in the canonical taxonomy.
    pub class_id: usize,
    /// Canonical class name, e.g. `security_torx`.
    pub class_name: String,
    /// Display label for the UI.
    pub class_label: String,
    /// Model confidence, rounded to 3 decimals.
    pub confidence: f64,
    pub bbox: BoundingBox,
    /// Display color (hex) for the UI.
    pub color: String,
    /// Which cascade stage produced this detection (1 or 2).
    pub model: u8,
}
