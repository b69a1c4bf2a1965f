// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use screwtrue_api::{api::start_server, config::AppConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting ScrewTrue detection API...\n");
    println!("📦 BUILD VERSION: {}", screwtrue_api::version::VERSION);
    println!("📅 Build Date: {}", screwtrue_api::version::BUILD_DATE);
    println!();

    let config = AppConfig::from_env();

    tracing::info!("Model 1 endpoint: {}", config.stage1.endpoint);
    tracing::info!("Model 2 endpoint: {}", config.stage2.endpoint);
    if !config.api_configured() {
        tracing::warn!("Model API keys are not fully configured; upstream calls will fail");
    }

    start_server(config).await
}
