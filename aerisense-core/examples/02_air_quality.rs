//! Air Quality Index Example
//!
//! Computes the EPA AQI for a few collector snapshots and prints the health
//! guidance and chart breakdown the dashboard shows.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_air_quality
//! ```

use aerisense_core::aqi::{AqiEngine, PollutantConcentrations};

fn main() {
    println!("AeriSense Air Quality Example");
    println!("=============================\n");

    let engine = AqiEngine::new();

    let snapshots = [
        ("clean morning", vec![("pm25", Some(8.0)), ("pm10", Some(20.0)), ("o3", Some(30.0))]),
        ("rush hour", vec![("pm25", Some(35.0)), ("pm10", Some(10.0)), ("no2", Some(88.0))]),
        ("crop burning", vec![("pm25", Some(182.0)), ("pm10", Some(260.0)), ("co", Some(9.0))]),
        ("sensor offline", vec![("pm25", None), ("pm10", None)]),
    ];

    for (label, pairs) in snapshots {
        let report = engine.overall(&PollutantConcentrations::from_pairs(pairs));
        let advice = engine.health_recommendation(report.aqi);

        println!("{label}");
        match report.aqi {
            Some(aqi) => println!(
                "  AQI {aqi} ({}, {}), dominant {}",
                report.category.label(),
                report.color,
                report.dominant_display_name().unwrap_or("-")
            ),
            None => println!("  {}", report.description),
        }
        println!("  general:  {}", advice.general);
        println!("  mask:     {}", advice.mask_recommendation);

        let chart = engine.breakdown(&report);
        for ((name, value), color) in chart.labels.iter().zip(&chart.values).zip(&chart.colors) {
            println!("    {name:<6} {value:>3} {color}");
        }
        println!();
    }
}
