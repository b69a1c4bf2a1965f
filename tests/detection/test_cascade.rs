// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end cascade tests against stub predictors
//!
//! Covers the reference scenarios the UI was validated against: a stage 1
//! match, a stage 2 fallback, and the empty outcome, plus the ordering
//! guarantee that stage 2 is queried if and only if stage 1 produced no
//! qualifying prediction.

use async_trait::async_trait;
use image::DynamicImage;
use screwtrue_api::detection::{
    CascadeStage, DetectionCascade, Predictor, PredictorError, PredictorImage, PredictorResponse,
    RawPrediction,
};
use screwtrue_api::StagePolicy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Always returns the same canned response, counting calls.
struct FixedPredictor {
    response: PredictorResponse,
    calls: Arc<AtomicUsize>,
}

impl FixedPredictor {
    fn new(response: PredictorResponse) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                response,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl Predictor for FixedPredictor {
    async fn predict(&self, _image_base64: &str) -> Result<PredictorResponse, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Always fails, the way a timed-out or misconfigured model would.
struct FailingPredictor;

#[async_trait]
impl Predictor for FailingPredictor {
    async fn predict(&self, _image_base64: &str) -> Result<PredictorResponse, PredictorError> {
        Err(PredictorError::MalformedResponse(
            "unexpected end of input".to_string(),
        ))
    }
}

fn prediction(class: &str, confidence: f64, x: f64, y: f64, w: f64, h: f64) -> RawPrediction {
    RawPrediction {
        class: class.to_string(),
        confidence,
        x,
        y,
        width: w,
        height: h,
    }
}

fn response(predictions: Vec<RawPrediction>, dims: Option<(f64, f64)>) -> PredictorResponse {
    PredictorResponse {
        predictions,
        image: dims.map(|(width, height)| PredictorImage { width, height }),
    }
}

fn stage1(predictor: impl Predictor + 'static) -> CascadeStage {
    CascadeStage {
        policy: StagePolicy::stage1("https://example.com/m1".to_string(), "k".to_string()),
        predictor: Arc::new(predictor),
    }
}

fn stage2(predictor: impl Predictor + 'static) -> CascadeStage {
    CascadeStage {
        policy: StagePolicy::stage2("https://example.com/m2".to_string(), "k".to_string()),
        predictor: Arc::new(predictor),
    }
}

#[tokio::test]
async fn test_scenario_stage1_match() {
    // 640x480 image, Phillips at 0.80 -> model 1 detection, stage 2 untouched
    let (model1, _) = FixedPredictor::new(response(
        vec![prediction("Phillips", 0.80, 100.0, 100.0, 40.0, 40.0)],
        Some((640.0, 480.0)),
    ));
    let (model2, model2_calls) = FixedPredictor::new(response(vec![], None));

    let cascade = DetectionCascade::new(vec![stage1(model1), stage2(model2)]);
    let detection = cascade
        .detect(&DynamicImage::new_rgb8(640, 480))
        .await
        .unwrap()
        .expect("stage 1 should match");

    assert_eq!(detection.class_name, "phillips");
    assert_eq!(detection.class_label, "Phillips");
    assert_eq!(detection.confidence, 0.8);
    assert_eq!(detection.model, 1);
    assert_eq!(
        (detection.bbox.x1, detection.bbox.y1, detection.bbox.x2, detection.bbox.y2),
        (80, 80, 120, 120)
    );
    assert_eq!(model2_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_scenario_stage2_fallback() {
    // Stage 1 sees nothing over its threshold; stage 2 finds a Security Torx
    let (model1, model1_calls) = FixedPredictor::new(response(
        vec![prediction("Phillips", 0.40, 100.0, 100.0, 40.0, 40.0)],
        Some((200.0, 200.0)),
    ));
    let (model2, model2_calls) = FixedPredictor::new(response(
        vec![prediction("Security Torx", 0.60, 50.0, 50.0, 20.0, 20.0)],
        Some((200.0, 200.0)),
    ));

    let cascade = DetectionCascade::new(vec![stage1(model1), stage2(model2)]);
    let detection = cascade
        .detect(&DynamicImage::new_rgb8(200, 200))
        .await
        .unwrap()
        .expect("stage 2 should match");

    assert_eq!(detection.class_name, "security_torx");
    assert_eq!(detection.model, 2);
    assert_eq!(detection.confidence, 0.6);
    assert_eq!(
        (detection.bbox.x1, detection.bbox.y1, detection.bbox.x2, detection.bbox.y2),
        (40, 40, 60, 60)
    );
    assert_eq!(model1_calls.load(Ordering::SeqCst), 1);
    assert_eq!(model2_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_scenario_no_detection() {
    let (model1, _) = FixedPredictor::new(response(vec![], None));
    let (model2, model2_calls) = FixedPredictor::new(response(
        vec![prediction("Torx", 0.50, 50.0, 50.0, 20.0, 20.0)], // below 0.55
        None,
    ));

    let cascade = DetectionCascade::new(vec![stage1(model1), stage2(model2)]);
    let outcome = cascade
        .detect(&DynamicImage::new_rgb8(200, 200))
        .await
        .unwrap();

    assert!(outcome.is_none());
    assert_eq!(model2_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stage1_failure_is_absorbed() {
    let (model2, model2_calls) = FixedPredictor::new(response(
        vec![prediction("Slotted", 0.70, 50.0, 50.0, 20.0, 20.0)],
        Some((200.0, 200.0)),
    ));

    let cascade = DetectionCascade::new(vec![stage1(FailingPredictor), stage2(model2)]);
    let detection = cascade
        .detect(&DynamicImage::new_rgb8(200, 200))
        .await
        .unwrap()
        .expect("stage 2 should still run");

    assert_eq!(detection.class_name, "slotted");
    assert_eq!(detection.model, 2);
    assert_eq!(model2_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_both_stages_failing_yields_empty_not_error() {
    let cascade =
        DetectionCascade::new(vec![stage1(FailingPredictor), stage2(FailingPredictor)]);
    let outcome = cascade
        .detect(&DynamicImage::new_rgb8(64, 64))
        .await
        .unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn test_clamped_box_never_leaves_image_bounds() {
    // x_center=5, width=40 -> x1 would be -15 without clamping
    let (model1, _) = FixedPredictor::new(response(
        vec![prediction("Pozidriv", 0.90, 5.0, 5.0, 40.0, 40.0)],
        Some((100.0, 100.0)),
    ));

    let cascade = DetectionCascade::new(vec![stage1(model1)]);
    let detection = cascade
        .detect(&DynamicImage::new_rgb8(100, 100))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detection.bbox.x1, 0);
    assert_eq!(detection.bbox.y1, 0);
    assert!(detection.bbox.x2 <= 100);
    assert!(detection.bbox.y2 <= 100);
}
