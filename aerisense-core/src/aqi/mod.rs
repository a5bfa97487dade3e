//! EPA Air Quality Index
//!
//! ## Overview
//!
//! Each pollutant concentration is mapped onto the 0–500 index scale through
//! a piecewise-linear breakpoint table; the overall index is the *worst*
//! sub-index, never an average:
//!
//! ```text
//! I = (I_hi − I_lo) / (C_hi − C_lo) · (C − C_lo) + I_lo        (rounded)
//!
//! AQI = max(I_pm25, I_pm10, I_o3, I_no2, I_so2, I_co)
//! ```
//!
//! | AQI     | Category                       | Color     |
//! |---------|--------------------------------|-----------|
//! | 0–50    | Good                           | `#00E400` |
//! | 51–100  | Moderate                       | `#FFFF00` |
//! | 101–150 | Unhealthy for Sensitive Groups | `#FF7E00` |
//! | 151–200 | Unhealthy                      | `#FF0000` |
//! | 201–300 | Very Unhealthy                 | `#8F3F97` |
//! | 301–500 | Hazardous                      | `#7E0023` |
//!
//! Concentrations above a table clamp to 500. Missing, negative or unknown
//! pollutants are left out rather than counted as zero.
//!
//! ## Example
//!
//! ```rust
//! use aerisense_core::aqi::{AqiEngine, Pollutant, PollutantConcentrations};
//!
//! let engine = AqiEngine::new();
//! let report = engine.overall(&PollutantConcentrations::new().with(Pollutant::Pm25, 35.0));
//! assert_eq!(report.aqi, Some(99));
//! let advice = engine.health_recommendation(report.aqi);
//! assert_eq!(advice.color, "yellow");
//! ```

pub mod breakdown;
pub mod breakpoints;
pub mod category;
pub mod engine;
pub mod health;
pub mod pollutant;

pub use breakdown::PollutantBreakdown;
pub use category::AqiCategory;
pub use engine::{AqiEngine, AqiReport};
pub use health::HealthRecommendation;
pub use pollutant::{Pollutant, PollutantConcentrations};
