// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Two-stage detection cascade
//!
//! Stage 1 is a high-precision filter for the two most common screw head
//! classes; stage 2 is a recall-oriented fallback over the full taxonomy at
//! a lower confidence bar. Stages run strictly in order and the first
//! qualifying prediction ends the cascade, so stage 2 is only ever queried
//! when stage 1 produced nothing usable.

use image::DynamicImage;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::assembler::assemble;
use super::predictor::{Predictor, PredictorError, RemotePredictor};
use super::types::{Detection, PredictorResponse};
use crate::config::{AppConfig, StagePolicy};
use crate::taxonomy;
use crate::vision::{encode_jpeg_base64, ImageError};

/// One cascade position: a policy and the model it applies to.
pub struct CascadeStage {
    pub policy: StagePolicy,
    pub predictor: Arc<dyn Predictor>,
}

/// Runs the stages in order and returns at most one detection per image.
pub struct DetectionCascade {
    stages: Vec<CascadeStage>,
}

impl DetectionCascade {
    pub fn new(stages: Vec<CascadeStage>) -> Self {
        Self { stages }
    }

    /// Wire both configured stages to remote predictors.
    pub fn from_config(config: &AppConfig) -> Result<Self, PredictorError> {
        let mut stages = Vec::new();
        for policy in [&config.stage1, &config.stage2] {
            let predictor = RemotePredictor::new(&policy.endpoint, &policy.api_key)?;
            stages.push(CascadeStage {
                policy: policy.clone(),
                predictor: Arc::new(predictor),
            });
        }
        Ok(Self::new(stages))
    }

    /// Run the cascade over one decoded image.
    ///
    /// The image is JPEG/base64 encoded once and the same payload is sent to
    /// every stage that runs. A failed model call is logged and treated as
    /// zero predictions for that stage; only an encoding failure aborts.
    pub async fn detect(&self, image: &DynamicImage) -> Result<Option<Detection>, ImageError> {
        let payload = encode_jpeg_base64(image)?;
        let width = image.width() as f64;
        let height = image.height() as f64;

        for stage in &self.stages {
            let response = match stage.predictor.predict(&payload).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        "Model {} call failed, treating as no predictions: {}",
                        stage.policy.model, e
                    );
                    continue;
                }
            };

            debug!(
                "Model {} returned {} raw predictions",
                stage.policy.model,
                response.predictions.len()
            );

            if let Some(detection) = first_qualifying(&response, &stage.policy, width, height) {
                info!(
                    "Model {} matched '{}' at confidence {:.3}",
                    stage.policy.model, detection.class_name, detection.confidence
                );
                return Ok(Some(detection));
            }
        }

        Ok(None)
    }
}

/// Scan predictions in model order and assemble the first one that passes
/// the stage policy: confidence at or above the threshold, raw label on the
/// allow-list, and a normalization result inside the canonical taxonomy.
fn first_qualifying(
    response: &PredictorResponse,
    policy: &StagePolicy,
    fallback_width: f64,
    fallback_height: f64,
) -> Option<Detection> {
    let (width, height) = match &response.image {
        Some(dims) => (dims.width, dims.height),
        None => (fallback_width, fallback_height),
    };

    for raw in &response.predictions {
        if raw.confidence < policy.confidence_threshold {
            continue;
        }
        if !policy.allows(&raw.class) {
            continue;
        }

        let class_name = taxonomy::normalize(&raw.class, policy.rules);
        let class_id = match taxonomy::index_for(&class_name) {
            Some(id) => id,
            None => {
                debug!(
                    "Label '{}' normalized to '{}', outside the taxonomy; skipping",
                    raw.class, class_name
                );
                continue;
            }
        };

        return Some(assemble(raw, &class_name, class_id, width, height, policy.model));
    }

    None
}
