// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Info, health and class listing handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::http_server::AppState;
use crate::config::StagePolicy;
use crate::taxonomy;
use crate::version;

/// GET / - liveness and version info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub runtime: String,
}

/// Per-stage block in the health payload. Credentials are never echoed,
/// only whether they are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageInfo {
    pub model: u8,
    pub url: String,
    pub api_key_configured: bool,
    pub allowed_classes: Vec<String>,
    pub confidence_threshold: f64,
}

impl StageInfo {
    fn from_policy(policy: &StagePolicy) -> Self {
        Self {
            model: policy.model,
            url: policy.endpoint.clone(),
            api_key_configured: !policy.api_key.is_empty(),
            allowed_classes: policy.allowed_labels.clone(),
            confidence_threshold: policy.confidence_threshold,
        }
    }
}

/// GET /health - configuration report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_configured: bool,
    pub api_type: String,
    pub stages: Vec<StageInfo>,
    pub classes: Vec<String>,
}

/// One canonical class as listed by GET /classes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassEntry {
    pub id: usize,
    pub name: String,
    pub label: String,
    pub color: String,
}

/// GET /classes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassesResponse {
    pub classes: Vec<ClassEntry>,
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        status: "active".to_string(),
        message: "ScrewTrue cascade API calisiyor".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        runtime: "Roboflow API".to_string(),
    })
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        api_configured: state.config.api_configured(),
        api_type: "Roboflow".to_string(),
        stages: vec![
            StageInfo::from_policy(&state.config.stage1),
            StageInfo::from_policy(&state.config.stage2),
        ],
        classes: taxonomy::CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
    })
}

pub async fn classes_handler() -> Json<ClassesResponse> {
    let classes = taxonomy::CLASS_NAMES
        .iter()
        .enumerate()
        .map(|(id, name)| ClassEntry {
            id,
            name: name.to_string(),
            label: taxonomy::label_for(name).to_string(),
            color: taxonomy::color_for(name).to_string(),
        })
        .collect();

    Json(ClassesResponse { classes })
}
