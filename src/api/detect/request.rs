// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Body of POST /detect/base64.
///
/// `confidence` is accepted for backward compatibility with older UI builds
/// but ignored: the stage thresholds are fixed server-side policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectBase64Request {
    /// Base64-encoded image, optionally with a `data:...;base64,` prefix.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl DetectBase64Request {
    pub fn validate(&self) -> Result<(), ApiError> {
        match self.image.as_deref() {
            None | Some("") => Err(ApiError::ValidationError {
                field: "image".to_string(),
                message: "Goruntu verisi gerekli".to_string(),
            }),
            Some(_) => Ok(()),
        }
    }
}
