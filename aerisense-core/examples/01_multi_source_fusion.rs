//! Multi-Source Fusion Example
//!
//! Fuses a noisy on-site ESP32 temperature with the OpenWeather and OpenAQ
//! feeds, including ticks where a source is offline, then shows the
//! stateless local-vs-regional pair blend.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_multi_source_fusion
//! ```

use aerisense_core::{
    filters::presets,
    fusion::{fuse_pair, MultiSourceFusion, PairProfile},
};

fn main() {
    println!("AeriSense Multi-Source Fusion Example");
    println!("=====================================\n");

    let mut fusion = MultiSourceFusion::default();

    // (esp32, openweather, openaq); None = source offline this tick
    let ticks = [
        (Some(27.9), Some(26.4), Some(26.8)),
        (Some(28.6), Some(26.5), None),
        (None, Some(26.5), Some(26.9)),
        (Some(27.2), Some(26.6), Some(26.7)),
        (None, None, None),
        (Some(27.5), Some(26.6), Some(26.8)),
    ];

    println!("{:>4} {:>8} {:>8} {:>10}  weights", "tick", "value", "conf", "quality");
    for (i, (esp32, openweather, openaq)) in ticks.into_iter().enumerate() {
        let result = fusion.fuse(
            "temperature",
            [("esp32", esp32), ("openweather", openweather), ("openaq", openaq)],
        );

        let value = result
            .value
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".into());
        let weights: Vec<String> = result
            .weights
            .iter()
            .map(|(source, w)| format!("{source}={w:.1}%"))
            .collect();

        println!(
            "{:>4} {:>8} {:>8.3} {:>10}  {}",
            i,
            value,
            result.confidence,
            result.quality.as_str(),
            weights.join(" ")
        );
    }

    println!("\nLocal vs regional");
    println!("-----------------");
    let temp = fuse_pair(Some(29.4), Some(27.0), PairProfile::TEMPERATURE);
    let pm25 = fuse_pair(Some(48.0), Some(22.0), PairProfile::PM25);
    let humidity = fuse_pair(None, Some(64.0), PairProfile::HUMIDITY);
    for (name, pair) in [("temperature", temp), ("pm25", pm25), ("humidity", humidity)] {
        println!("{name:<12} local={:?} external={:?} fused={:?} ({:?})", pair.local, pair.external, pair.fused, pair.source);
    }

    println!("\nMQ-135 gas channel cleaning");
    println!("---------------------------");
    let mut gas = presets::gas_cleaner();
    for raw in [412.0, 409.0, 415.0, 411.0, 410.0, 980.0, 413.0] {
        let out = gas.clean(raw);
        println!(
            "raw={:>6.1} cleaned={:>6.1} smoothed={:>6.1} outlier={} z={:.1}",
            out.raw, out.cleaned, out.smoothed, out.is_outlier, out.z_score
        );
    }
}
