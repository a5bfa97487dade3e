//! Anomaly Detection Example
//!
//! Safety rules and the learned model complement each other:
//! - rules catch readings past a hard limit from the very first tick
//! - the isolation forest learns what the site looks like and flags readings
//!   that are unusual as a whole, even when no single limit is crossed
//!
//! ## Scenario: Rooftop Weather and Air-Quality Station
//!
//! The station warms up over 50 ticks, the model trains, then a few special
//! readings are injected: a heat spike, a dusty afternoon and a multi-sensor
//! fault.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 03_anomaly_engine
//! ```

use aerisense_ml::{AnomalyEngine, FeatureVector, ModelStatus};
use rand::{rngs::StdRng, Rng, SeedableRng};

const NOMINAL: FeatureVector = FeatureVector {
    temperature: 24.0,
    pressure: 1012.0,
    vibration: 0.6,
    wind_speed: 12.0,
    uv_index: 4.0,
    soil_temperature: 18.0,
    soil_moisture: 0.32,
    pm25: 14.0,
    pm10: 24.0,
    no2: 20.0,
    solar_radiation: 450.0,
};

fn jitter(rng: &mut StdRng) -> FeatureVector {
    FeatureVector {
        temperature: NOMINAL.temperature + rng.gen_range(-2.0..2.0),
        pressure: NOMINAL.pressure + rng.gen_range(-4.0..4.0),
        vibration: NOMINAL.vibration + rng.gen_range(-0.3..0.3),
        wind_speed: NOMINAL.wind_speed + rng.gen_range(-4.0..4.0),
        pm25: NOMINAL.pm25 + rng.gen_range(-4.0..4.0),
        solar_radiation: NOMINAL.solar_radiation + rng.gen_range(-120.0..120.0),
        ..NOMINAL
    }
}

fn main() {
    println!("AeriSense Anomaly Engine Example");
    println!("================================\n");

    let mut engine = AnomalyEngine::new();
    let mut rng = StdRng::seed_from_u64(2024);

    for tick in 0..60 {
        let verdict = engine.update_and_predict(&jitter(&mut rng));
        if tick % 10 == 9 {
            match engine.status() {
                ModelStatus::Collecting { buffered, required } => {
                    println!("tick {:>2}: collecting {buffered}/{required}", tick + 1)
                }
                ModelStatus::Trained { trained_on } => println!(
                    "tick {:>2}: trained on {trained_on}, score {:+.3}",
                    tick + 1,
                    verdict.score
                ),
                ModelStatus::Failed => println!("tick {:>2}: model unavailable, rules only", tick + 1),
            }
        }
    }

    if let Some(forest) = engine.forest() {
        let stats = forest.stats();
        println!(
            "\nforest: {} trees, {} nodes, depth {}, threshold {:.3}\n",
            stats.num_trees, stats.total_nodes, stats.max_depth, stats.threshold
        );
    }

    let probes = [
        ("calm", NOMINAL),
        ("heat spike", FeatureVector { temperature: 84.0, ..NOMINAL }),
        ("dusty afternoon", FeatureVector { pm25: 95.0, pm10: 180.0, wind_speed: 38.0, ..NOMINAL }),
        (
            "multi-sensor fault",
            FeatureVector {
                temperature: 92.0,
                pressure: 960.0,
                vibration: 9.0,
                wind_speed: 65.0,
                uv_index: 12.0,
                pm25: 240.0,
                no2: 140.0,
                solar_radiation: 1300.0,
                ..NOMINAL
            },
        ),
    ];

    for (label, reading) in probes {
        let report = engine.evaluate(&reading);
        println!(
            "{label:<20} model: {:<8} ({:+.3})",
            if report.verdict.is_anomaly { "ANOMALY" } else { "normal" },
            report.verdict.score
        );
        for alert in &report.alerts {
            println!("    alert: {alert}");
        }
        for precaution in &report.precautions {
            println!("      - {precaution}");
        }
    }

    // Tighter limits for an indoor deployment
    match engine.update_config([("TEMP_MAX", 35.0), ("PM25_MAX", 55.0)]) {
        Ok(()) => println!("\nindoor limits applied: {:?}", engine.thresholds()),
        Err(e) => println!("\nrejected: {e}"),
    }
    let alerts = engine.check_thresholds(&FeatureVector { pm25: 60.0, ..NOMINAL });
    println!("pm2.5 at 60 now raises: {:?}", alerts.alerts);
}
