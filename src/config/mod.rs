// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-wide configuration
//!
//! Built once at startup from environment variables and shared read-only
//! behind an `Arc`. Stage allow-lists and thresholds are fixed server-side
//! policy, not tunable per request.

use std::env;

use crate::taxonomy::RuleSet;

/// Stage 1: high-precision filter for the two most common classes.
pub const STAGE1_CONFIDENCE_THRESHOLD: f64 = 0.65;
/// Stage 2: recall-oriented fallback over the full taxonomy.
pub const STAGE2_CONFIDENCE_THRESHOLD: f64 = 0.55;

/// Raw labels stage 1 accepts (compared case-insensitively, trimmed).
const STAGE1_ALLOWED_LABELS: &[&str] = &["phillips", "pozidriv"];

/// Raw labels stage 2 accepts. These are the fallback model's human-readable
/// class names; normalization maps them into the canonical taxonomy.
const STAGE2_ALLOWED_LABELS: &[&str] = &[
    "phillips",
    "pozidriv",
    "torx",
    "hex allen",
    "slotted",
    "security torx",
    "pentalobe",
    "tri wing",
    "spanner",
    "triangle",
];

const DEFAULT_MODEL1_URL: &str = "https://serverless.roboflow.com/dataminingproject-avr2o/2";
const DEFAULT_MODEL2_URL: &str = "https://serverless.roboflow.com/dataminingproject-avr2o/3";

/// Everything the cascade needs to know about one stage: where the model
/// lives, what it is allowed to accept, and how its labels normalize.
#[derive(Debug, Clone)]
pub struct StagePolicy {
    /// Cascade position, reported back to callers as `model`.
    pub model: u8,
    pub endpoint: String,
    pub api_key: String,
    /// Accepted raw labels, stored lower-cased.
    pub allowed_labels: Vec<String>,
    pub confidence_threshold: f64,
    pub rules: RuleSet,
}

impl StagePolicy {
    /// Stage 1 policy: Phillips/Pozidriv only, threshold 0.65.
    pub fn stage1(endpoint: String, api_key: String) -> Self {
        Self {
            model: 1,
            endpoint,
            api_key,
            allowed_labels: STAGE1_ALLOWED_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            confidence_threshold: STAGE1_CONFIDENCE_THRESHOLD,
            rules: RuleSet::Primary,
        }
    }

    /// Stage 2 policy: full taxonomy, threshold 0.55.
    pub fn stage2(endpoint: String, api_key: String) -> Self {
        Self {
            model: 2,
            endpoint,
            api_key,
            allowed_labels: STAGE2_ALLOWED_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            confidence_threshold: STAGE2_CONFIDENCE_THRESHOLD,
            rules: RuleSet::Full,
        }
    }

    /// Case-insensitive exact match of a raw label against the allow-list.
    pub fn allows(&self, raw_label: &str) -> bool {
        let needle = raw_label.trim().to_lowercase();
        self.allowed_labels.iter().any(|allowed| *allowed == needle)
    }
}

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: String,
    pub stage1: StagePolicy,
    pub stage2: StagePolicy,
}

impl AppConfig {
    /// Read configuration from the environment, with the production
    /// Roboflow deployments as endpoint defaults. `ROBOFLOW_API_KEY` is the
    /// shared fallback when a stage has no dedicated key.
    pub fn from_env() -> Self {
        let port = env::var("API_PORT").unwrap_or_else(|_| "8000".to_string());
        let shared_key = env::var("ROBOFLOW_API_KEY").unwrap_or_default();

        let model1_url = env::var("MODEL1_URL").unwrap_or_else(|_| DEFAULT_MODEL1_URL.to_string());
        let model1_key = env::var("MODEL1_API_KEY").unwrap_or_else(|_| shared_key.clone());
        let model2_url = env::var("MODEL2_URL").unwrap_or_else(|_| DEFAULT_MODEL2_URL.to_string());
        let model2_key = env::var("MODEL2_API_KEY").unwrap_or_else(|_| shared_key.clone());

        Self {
            listen_addr: format!("0.0.0.0:{}", port),
            stage1: StagePolicy::stage1(model1_url, model1_key),
            stage2: StagePolicy::stage2(model2_url, model2_key),
        }
    }

    /// Whether both stages have credentials.
    pub fn api_configured(&self) -> bool {
        !self.stage1.api_key.is_empty() && !self.stage2.api_key.is_empty()
    }
}
