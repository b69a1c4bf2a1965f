// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod detection;
pub mod taxonomy;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{create_app, start_server, ApiError, AppState, DetectResponse};
pub use config::{AppConfig, StagePolicy};
pub use detection::{
    CascadeStage, Detection, DetectionCascade, Predictor, PredictorError, PredictorResponse,
    RawPrediction, RemotePredictor,
};
pub use vision::ImageError;
