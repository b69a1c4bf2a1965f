// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection endpoint handlers
//!
//! Both endpoints decode the upload, run the cascade and wrap the outcome.
//! Upstream model failures are handled inside the cascade; the only errors
//! surfaced here are bad input (400) and internal failures (500).

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use image::DynamicImage;
use tracing::{debug, warn};

use super::request::DetectBase64Request;
use super::response::DetectResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::{decode_base64_image, decode_image_bytes, strip_data_url_prefix, ImageInfo};

/// POST /detect - multipart image upload
///
/// Expects a `file` field with an `image/*` content type. The file type
/// guard runs before any decoding, matching the UI's error expectations.
pub async fn detect_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DetectResponse>, ApiError> {
    let mut file_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Gecersiz form verisi: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let is_image = field
            .content_type()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Err(ApiError::InvalidRequest(
                "Gecersiz dosya tipi. Sadece goruntu dosyalari kabul edilir.".to_string(),
            ));
        }

        file_bytes = Some(field.bytes().await.map_err(|e| {
            ApiError::InvalidRequest(format!("Dosya okunamadi: {}", e))
        })?);
        break;
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::ValidationError {
        field: "file".to_string(),
        message: "Goruntu dosyasi gerekli".to_string(),
    })?;

    let (image, info) = decode_image_bytes(&bytes).map_err(|e| {
        warn!("Failed to decode uploaded image: {}", e);
        ApiError::InvalidRequest(format!("Goruntu okunamadi: {}", e))
    })?;

    run_detection(&state, image, info).await
}

/// POST /detect/base64 - JSON body `{image, confidence?}`
pub async fn detect_base64_handler(
    State(state): State<AppState>,
    Json(request): Json<DetectBase64Request>,
) -> Result<Json<DetectResponse>, ApiError> {
    request.validate()?;

    if let Some(confidence) = request.confidence {
        // stage thresholds are fixed server-side configuration
        debug!("Ignoring client-supplied confidence {}", confidence);
    }

    let image_data = request.image.as_deref().unwrap_or_default();
    let image_data = strip_data_url_prefix(image_data);

    let (image, info) = decode_base64_image(image_data).map_err(|e| {
        warn!("Failed to decode base64 image: {}", e);
        ApiError::InvalidRequest(format!("Goruntu decode edilemedi: {}", e))
    })?;

    run_detection(&state, image, info).await
}

async fn run_detection(
    state: &AppState,
    image: DynamicImage,
    info: ImageInfo,
) -> Result<Json<DetectResponse>, ApiError> {
    debug!(
        "Running cascade on {}x{} image ({} bytes)",
        info.width, info.height, info.size_bytes
    );

    let detection = state.cascade.detect(&image).await.map_err(|e| {
        warn!("Detection failed: {}", e);
        ApiError::InternalError(format!("Tespit hatasi: {}", e))
    })?;

    Ok(Json(DetectResponse::new(info.width, info.height, detection)))
}
