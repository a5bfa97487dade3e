//! Integration tests for filtering, cleaning and multi-source fusion
//!
//! Exercises the components the way the ingest layer chains them:
//! - per-source Kalman smoothing under intermittent outages
//! - outlier cleaning ahead of fusion
//! - per-stream ownership through the registry

mod common;

use std::{collections::BTreeMap, sync::Arc, thread};

use aerisense_core::{
    filters::{presets, AdaptiveConfig, AdaptiveKalmanFilter},
    fusion::{fuse_pair, FusionConfig, FusionQuality, MultiSourceFusion, PairProfile, PairSource},
    Measurement, ScalarKalmanConfig, ScalarKalmanFilter, SignalCleaner, StreamKey, StreamRegistry,
};
use common::{spiky_channel, temperature_feed, TestRng};
use proptest::prelude::*;

#[test]
fn fusion_tracks_truth_through_outages() {
    let mut fusion = MultiSourceFusion::default();
    let feed = temperature_feed(26.0, 200, 42);

    let mut last = None;
    for tick in &feed {
        let result = fusion.fuse(
            "temperature",
            [("esp32", tick.esp32), ("openweather", tick.openweather), ("openaq", tick.openaq)],
        );
        assert!(result.is_available());
        last = Some(result);
    }

    let last = last.unwrap();
    assert!((last.value.unwrap() - 26.0).abs() < 0.5);
    assert_eq!(last.quality, FusionQuality::High);
    assert_eq!(fusion.filter_count(), 3);
}

#[test]
fn outage_tick_reweights_remaining_sources() {
    let mut fusion = MultiSourceFusion::default();
    for _ in 0..10 {
        fusion.fuse("pm25", [("esp32", Some(30.0)), ("openaq", Some(32.0))]);
    }
    let degraded = fusion.fuse("pm25", [("esp32", None), ("openaq", Some(32.0))]);
    assert_eq!(degraded.weights.len(), 1);
    assert!((degraded.weights["openaq"] - 100.0).abs() < 1e-3);
}

#[test]
fn cleaner_shields_fusion_from_spikes() {
    let raw = spiky_channel(400.0, 120, 17, 7);

    let mut cleaner = presets::gas_cleaner();
    let mut fusion = MultiSourceFusion::new(FusionConfig::default().with_source("mq135", 0.8));

    let mut flagged = 0;
    let mut fused = 0.0;
    for value in raw {
        let cleaned = cleaner.clean(value);
        if cleaned.is_outlier {
            flagged += 1;
        }
        fused = fusion
            .fuse("gas", [("mq135", Some(cleaned.cleaned))])
            .value
            .unwrap();
    }

    assert!(flagged >= 5, "only {flagged} spikes flagged");
    assert!((fused - 400.0).abs() < 2.0);
}

#[test]
fn batch_of_measurements() {
    let mut fusion = MultiSourceFusion::default();
    let batch = vec![
        Measurement::new("esp32", "temperature", Some(27.0), 1_700_000_000_000),
        Measurement::new("openweather", "temperature", Some(28.0), 1_700_000_000_000),
        Measurement::new("esp32", "humidity", Some(61.0), 1_700_000_000_000),
        Measurement::new("openweather", "humidity", None, 1_700_000_000_000),
    ];

    let results = fusion.fuse_measurements(&batch);
    assert_eq!(results.len(), 2);
    assert!((results["temperature"].value.unwrap() - 27.5).abs() < 1e-4);
    assert_eq!(results["humidity"].weights.len(), 1);
}

#[test]
fn fusion_result_serializes_for_the_dashboard() {
    let mut fusion = MultiSourceFusion::default();
    let result = fusion.fuse("temperature", [("esp32", Some(24.0)), ("openweather", Some(25.0))]);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["quality"], "MEDIUM");
    assert!(json["weights"]["esp32"].is_number());
}

#[test]
fn pair_fusion_profiles() {
    let t = fuse_pair(Some(31.0), Some(29.0), PairProfile::TEMPERATURE);
    assert_eq!(t.source, PairSource::Fused);
    let fused = t.fused.unwrap();
    assert!(fused > 29.0 && fused < 31.0);

    let h = fuse_pair(None, Some(70.0), PairProfile::HUMIDITY);
    assert_eq!((h.fused, h.source), (Some(70.0), PairSource::SingleSource));
}

#[test]
fn adaptive_filter_follows_a_step() {
    let mut kf = AdaptiveKalmanFilter::new(AdaptiveConfig::default().with_initial_value(20.0));
    let mut rng = TestRng::new(3);
    for _ in 0..30 {
        kf.update(20.0 + rng.gen_range(-0.2, 0.2));
    }
    for _ in 0..40 {
        kf.update(35.0 + rng.gen_range(-0.2, 0.2));
    }
    assert!((kf.value() - 35.0).abs() < 1.5);

    let before = (kf.value(), kf.velocity());
    let forecast = kf.predict_future(5);
    assert_eq!(forecast.len(), 5);
    assert_eq!((kf.value(), kf.velocity()), before);
}

#[test]
fn registry_keeps_streams_apart_across_threads() {
    let registry: Arc<StreamRegistry<ScalarKalmanFilter>> = Arc::new(StreamRegistry::new());

    let workers: Vec<_> = ["lab-01", "roof-02", "yard-03"]
        .into_iter()
        .enumerate()
        .map(|(i, device)| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let level = 20.0 + i as f32 * 5.0;
                for _ in 0..50 {
                    registry.with_stream(
                        StreamKey::new(device, "temperature"),
                        presets::temperature_filter,
                        |kf| kf.update(level),
                    );
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    assert_eq!(registry.len(), 3);
    let roof = registry.with_stream(
        StreamKey::new("roof-02", "temperature"),
        presets::temperature_filter,
        |kf| kf.estimate(),
    );
    assert!((roof - 25.0).abs() < 1e-3);
}

#[test]
fn cleaner_reports_every_stage() {
    let mut cleaner: SignalCleaner = SignalCleaner::default();
    let mut stages = BTreeMap::new();
    for (i, v) in [10.0, 10.5, 9.5, 10.0, 10.5, 80.0].into_iter().enumerate() {
        stages.insert(i, cleaner.clean(v));
    }
    let spike = stages[&5];
    assert!(spike.is_outlier);
    assert_eq!(spike.raw, 80.0);
    assert!(spike.cleaned < 11.0);
}

proptest! {
    #[test]
    fn constant_input_converges_with_shrinking_covariance(
        value in -50.0f32..150.0,
        q in 0.001f32..0.5,
        r in 0.05f32..2.0,
    ) {
        let mut kf = ScalarKalmanFilter::new(ScalarKalmanConfig::new(q, r));
        kf.update(value + 10.0);
        let mut last_p = kf.variance();
        for _ in 0..500 {
            kf.update(value);
            prop_assert!(kf.variance() <= last_p + 1e-6);
            last_p = kf.variance();
        }
        prop_assert!((kf.estimate() - value).abs() < 0.05);
    }

    #[test]
    fn weights_always_sum_to_one_hundred(
        readings in proptest::collection::vec(proptest::option::of(-40.0f32..60.0), 1..6),
        rounds in 1usize..10,
    ) {
        let names = ["a", "b", "c", "d", "e"];
        let mut fusion = MultiSourceFusion::default();
        for _ in 0..rounds {
            let input = names.iter().copied().zip(readings.iter().copied());
            let result = fusion.fuse("x", input);
            if readings.iter().any(Option::is_some) {
                let total: f32 = result.weights.values().sum();
                prop_assert!((total - 100.0).abs() < 1e-2);
                prop_assert!((0.0..=1.0).contains(&result.confidence));
            } else {
                prop_assert_eq!(result.quality, FusionQuality::Unavailable);
            }
        }
    }

    #[test]
    fn equal_variance_pair_is_the_midpoint(a in -100.0f32..100.0, b in -100.0f32..100.0) {
        let mut fusion = MultiSourceFusion::new(FusionConfig::uniform(0.01, 0.5));
        let result = fusion.fuse("t", [("left", Some(a)), ("right", Some(b))]);
        prop_assert!((result.value.unwrap() - (a + b) / 2.0).abs() < 1e-3);
        prop_assert!((result.weights["left"] - 50.0).abs() < 1e-3);
    }
}
