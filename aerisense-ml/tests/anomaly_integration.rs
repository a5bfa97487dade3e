//! Integration tests for the anomaly engine
//!
//! Drives the engine the way the ingest loop does: one composed reading per
//! tick, rules and model evaluated together.

mod common;

use aerisense_ml::{
    AnomalyEngine, AnomalyVerdict, FeatureVector, ForestConfig, MlError, ModelStatus, ThresholdConfig,
    MIN_TRAINING_SAMPLES,
};
use common::{normal_readings, FAULT, NOMINAL};
use proptest::prelude::*;

#[test]
fn first_readings_are_never_judged() {
    let mut engine = AnomalyEngine::new();
    let readings = normal_readings(MIN_TRAINING_SAMPLES - 1, 1);

    for reading in &readings {
        assert_eq!(engine.update_and_predict(reading), AnomalyVerdict { is_anomaly: false, score: 0.0 });
    }
    assert_eq!(
        engine.status(),
        ModelStatus::Collecting { buffered: 49, required: MIN_TRAINING_SAMPLES }
    );
}

#[test]
fn trained_model_flags_a_multi_sensor_fault() {
    let mut engine = AnomalyEngine::new();
    for reading in normal_readings(MIN_TRAINING_SAMPLES, 7) {
        engine.update_and_predict(&reading);
    }
    assert!(engine.forest().is_some());

    let calm = engine.update_and_predict(&NOMINAL);
    assert!(!calm.is_anomaly, "nominal reading flagged: {calm:?}");
    assert!(calm.score >= 0.0);

    let fault = engine.update_and_predict(&FAULT);
    assert!(fault.is_anomaly);
    assert!(fault.score < 0.0);
}

#[test]
fn contamination_bounds_flags_on_training_data() {
    let readings = normal_readings(MIN_TRAINING_SAMPLES, 21);
    let mut engine = AnomalyEngine::new();
    for reading in &readings {
        engine.update_and_predict(reading);
    }

    let flagged = readings
        .iter()
        .filter(|r| engine.update_and_predict(r).is_anomaly)
        .count();
    assert!((1..=5).contains(&flagged), "{flagged} of 50 training readings flagged");
}

#[test]
fn same_stream_same_model() {
    let run = || {
        let mut engine = AnomalyEngine::new()
            .with_forest_config(ForestConfig::default().with_num_trees(30))
            .unwrap();
        normal_readings(60, 3)
            .iter()
            .map(|r| engine.update_and_predict(r))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn rules_and_model_report_together() {
    let mut engine = AnomalyEngine::new();
    for reading in normal_readings(MIN_TRAINING_SAMPLES, 11) {
        engine.evaluate(&reading);
    }

    let report = engine.evaluate(&FAULT);
    assert!(report.verdict.is_anomaly);
    assert_eq!(
        report.alerts,
        vec![
            "Temperature High (> 80.0°C)",
            "Vibration Critical (> 5.0)",
            "High Wind (> 50.0km/h)",
            "Extreme UV (> 10.0)",
            "Hazardous Air Quality (PM2.5 > 150.0)",
            "High NO2 Levels (> 100.0ppb)",
        ]
    );
    assert_eq!(report.precautions.len(), 12);
    assert_eq!(report.status, ModelStatus::Trained { trained_on: MIN_TRAINING_SAMPLES });
}

#[test]
fn overrides_change_what_fires() {
    let mut engine = AnomalyEngine::new();
    let warm = FeatureVector { temperature: 45.0, ..NOMINAL };
    assert!(engine.check_thresholds(&warm).is_empty());

    engine.update_config([("TEMP_MAX", 40.0)]).unwrap();
    assert_eq!(engine.check_thresholds(&warm).alerts, vec!["Temperature High (> 40.0°C)"]);

    assert_eq!(engine.update_config([("TEMP_MAX", 30.0), ("HUMIDITY_MAX", 1.0)]), Err(MlError::UnknownThreshold));
    assert_eq!(engine.thresholds().temp_max, 40.0);
}

#[test]
fn positional_input_is_length_checked() {
    let values = NOMINAL.as_array();
    assert_eq!(FeatureVector::from_slice(&values), Ok(NOMINAL));
    assert_eq!(
        FeatureVector::from_slice(&values[..10]),
        Err(MlError::FeatureLength { expected: 11, actual: 10 })
    );
}

#[test]
fn report_serializes_for_the_dashboard() {
    let mut engine = AnomalyEngine::new();
    let report = engine.evaluate(&FeatureVector { pm25: 180.0, ..NOMINAL });
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["alerts"][0], "Hazardous Air Quality (PM2.5 > 150.0)");
    assert_eq!(json["verdict"]["is_anomaly"], false);
    assert_eq!(json["status"]["state"], "collecting");
    assert_eq!(json["status"]["buffered"], 1);

    let limits = serde_json::to_value(ThresholdConfig::default()).unwrap();
    assert_eq!(limits["PM25_MAX"], 150.0);
    assert_eq!(limits["TEMP_MIN"], -10.0);
}

proptest! {
    #[test]
    fn cold_engine_is_neutral_for_any_reading(
        values in proptest::collection::vec(-1000.0f32..2000.0, 11),
        count in 1usize..MIN_TRAINING_SAMPLES,
    ) {
        let reading = FeatureVector::from_slice(&values).unwrap();
        let mut engine = AnomalyEngine::new();
        for _ in 0..count {
            prop_assert_eq!(engine.update_and_predict(&reading), AnomalyVerdict::default());
        }
    }

    #[test]
    fn every_alert_has_a_precaution(
        temperature in -40.0f32..120.0,
        vibration in 0.0f32..15.0,
        pressure in 850.0f32..1050.0,
        pm25 in 0.0f32..400.0,
        no2 in 0.0f32..250.0,
    ) {
        let reading = FeatureVector { temperature, vibration, pressure, pm25, no2, ..NOMINAL };
        let alerts = ThresholdConfig::default().check(&reading);
        prop_assert!(alerts.precautions.len() >= alerts.alerts.len());
        prop_assert_eq!(alerts.alerts.is_empty(), alerts.precautions.is_empty());
    }
}
