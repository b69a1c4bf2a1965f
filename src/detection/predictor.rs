// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for Roboflow-style remote detection models
//!
//! Roboflow serverless deployments accept the image either as a JSON body
//! (`{"image": <base64>}`) or as the raw base64 string with a text/plain
//! content type, depending on deployment age. The client tries the JSON
//! variant first and retries as plain text when that fails; the plain-text
//! error is the one propagated if both variants fail.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::types::PredictorResponse;
use crate::vision::strip_data_url_prefix;

/// Upstream calls are bounded by a hard timeout; no retries beyond the
/// plain-text fallback.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from a single model call. Every variant is non-fatal to the
/// request: the cascade logs it and treats the stage as having returned
/// zero predictions.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("Invalid model endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model returned HTTP {status}")]
    Status { status: StatusCode },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

/// Remote object-detection model boundary.
///
/// The cascade only depends on this trait, which keeps stage logic testable
/// without network access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Send one base64-encoded image, return the raw prediction list.
    async fn predict(&self, image_base64: &str) -> Result<PredictorResponse, PredictorError>;
}

/// [`Predictor`] backed by a Roboflow-style HTTP endpoint.
#[derive(Debug)]
pub struct RemotePredictor {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RemotePredictor {
    /// Create a client for one model endpoint. The API key is passed as a
    /// query parameter on every call, matching the Roboflow serverless API.
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, PredictorError> {
        Url::parse(endpoint).map_err(|e| PredictorError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PredictorError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// The configured endpoint (without credentials).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_url(&self) -> String {
        format!("{}?api_key={}", self.endpoint, self.api_key)
    }

    /// Variant A: JSON body `{"image": <base64>}`.
    async fn send_json(
        &self,
        url: &str,
        image_base64: &str,
    ) -> Result<PredictorResponse, PredictorError> {
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "image": image_base64 }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictorError::Status { status });
        }

        response
            .json()
            .await
            .map_err(|e| PredictorError::MalformedResponse(e.to_string()))
    }

    /// Variant B: raw base64 text with `Content-Type: text/plain`.
    async fn send_plain_text(
        &self,
        url: &str,
        image_base64: &str,
    ) -> Result<PredictorResponse, PredictorError> {
        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(image_base64.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictorError::Status { status });
        }

        response
            .json()
            .await
            .map_err(|e| PredictorError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl Predictor for RemotePredictor {
    async fn predict(&self, image_base64: &str) -> Result<PredictorResponse, PredictorError> {
        let image_base64 = strip_data_url_prefix(image_base64);
        let url = self.request_url();

        match self.send_json(&url, image_base64).await {
            Ok(response) => Ok(response),
            Err(e) => {
                debug!(
                    "JSON request variant failed for {} ({}), retrying as plain text",
                    self.endpoint, e
                );
                self.send_plain_text(&url, image_base64).await
            }
        }
    }
}
