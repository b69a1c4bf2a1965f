// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection response types

use serde::{Deserialize, Serialize};

use crate::detection::Detection;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Body of a successful /detect or /detect/base64 call. At most one
/// detection is ever present; "nothing found" is a success with an empty
/// list, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    pub success: bool,
    pub image_size: ImageSize,
    pub detections_count: usize,
    pub detections: Vec<Detection>,
}

impl DetectResponse {
    pub fn new(width: u32, height: u32, detection: Option<Detection>) -> Self {
        let detections: Vec<Detection> = detection.into_iter().collect();
        Self {
            success: true,
            image_size: ImageSize { width, height },
            detections_count: detections.len(),
            detections,
        }
    }
}
