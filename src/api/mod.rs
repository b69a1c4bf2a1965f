// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod detect;
pub mod errors;
pub mod handlers;
pub mod http_server;

pub use detect::{detect_base64_handler, detect_handler, DetectBase64Request, DetectResponse};
pub use errors::{ApiError, ErrorResponse};
pub use handlers::{
    classes_handler, health_handler, root_handler, ClassEntry, ClassesResponse, HealthResponse,
    RootResponse, StageInfo,
};
pub use http_server::{create_app, start_server, AppState};
