// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image handling for the detection endpoints
//!
//! Decodes uploaded images (raw bytes or base64) and re-encodes them as the
//! shared JPEG/base64 payload sent to the upstream models.

pub mod image_utils;

pub use image_utils::{
    decode_base64_image, decode_image_bytes, encode_jpeg_base64, strip_data_url_prefix, ImageError,
    ImageInfo,
};
