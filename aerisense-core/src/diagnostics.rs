//! Sensor Diagnostics, Short-Term Trends and Site Safety
//!
//! ## Overview
//!
//! Three read-only checks over a channel's recent history, used by the
//! industrial dashboard next to the fused values:
//!
//! ```text
//! history ──► sensor_health   ──► Ok | Flatline | ExcessiveNoise | Fault
//!         ──► trend_forecast  ──► next value + rising/falling/stable
//! latest  ──► safety_index    ──► Safe | MediumRisk | HighRisk + reason
//! ```
//!
//! Histories are passed oldest first.
//!
//! ### Health Rules
//!
//! 1. Fewer than 5 readings: `Fault` (the channel is not reporting).
//! 2. Variance of the last 10 readings below 1e-4: `Flatline` (stuck sensor).
//! 3. Std above 1 and any step larger than 5 std: `ExcessiveNoise`.
//! 4. Otherwise `Ok`.

use alloc::{collections::BTreeMap, format, string::String};

use crate::{
    constants::{
        FLATLINE_VARIANCE, FLATLINE_WINDOW, HEALTH_MIN_SAMPLES, NOISE_SPIKE_FACTOR,
        TREND_SLOPE_THRESHOLD,
    },
    stats,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Readings a batch needs before any channel is judged
pub const BATCH_MIN_READINGS: usize = 10;

/// Steps ahead the dashboard forecasts (two sampling periods)
pub const DEFAULT_FORECAST_HORIZON: usize = 2;

/// Minimum history for a trend forecast
pub const TREND_MIN_SAMPLES: usize = 5;

/// Health of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorHealth {
    /// Not enough readings in the batch yet
    Initializing,
    /// Channel has too few readings to be alive
    Fault,
    /// Channel is stuck on one value
    Flatline,
    /// Channel jumps far more than its own spread
    ExcessiveNoise,
    /// Nothing wrong found
    Ok,
}

impl SensorHealth {
    /// Dashboard label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initializing => "INITIALIZING",
            Self::Fault => "FAULT",
            Self::Flatline => "FAULT (FLATLINE)",
            Self::ExcessiveNoise => "WARNING (EXCESSIVE NOISE)",
            Self::Ok => "OK",
        }
    }
}

/// Judge one channel's history
pub fn sensor_health(values: &[f32]) -> SensorHealth {
    if values.len() < HEALTH_MIN_SAMPLES {
        return SensorHealth::Fault;
    }

    let recent = &values[values.len().saturating_sub(FLATLINE_WINDOW)..];
    if stats::variance(recent).is_some_and(|v| v < FLATLINE_VARIANCE) {
        return SensorHealth::Flatline;
    }

    if let Some(std) = stats::std_dev(values) {
        if std > 1.0 {
            let spiky = values
                .windows(2)
                .any(|w| libm::fabsf(w[1] - w[0]) > std * NOISE_SPIKE_FACTOR);
            if spiky {
                return SensorHealth::ExcessiveNoise;
            }
        }
    }

    SensorHealth::Ok
}

/// Judge several channels sampled together
///
/// `readings` is the number of rows in the batch; below
/// [`BATCH_MIN_READINGS`] every channel reports `Initializing`.
pub fn batch_health<'a, I>(channels: I, readings: usize) -> BTreeMap<String, SensorHealth>
where
    I: IntoIterator<Item = (&'a str, &'a [f32])>,
{
    channels
        .into_iter()
        .map(|(name, values)| {
            let health = if readings < BATCH_MIN_READINGS {
                SensorHealth::Initializing
            } else {
                sensor_health(values)
            };
            if !matches!(health, SensorHealth::Ok | SensorHealth::Initializing) {
                log_info!("channel {} health: {}", name, health.label());
            }
            (String::from(name), health)
        })
        .collect()
}

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrendDirection {
    /// Slope above +0.05 per sample
    Rising,
    /// Slope below −0.05 per sample
    Falling,
    /// Anything in between
    Stable,
}

impl TrendDirection {
    /// Classify a slope
    pub fn from_slope(slope: f32) -> Self {
        if slope > TREND_SLOPE_THRESHOLD {
            Self::Rising
        } else if slope < -TREND_SLOPE_THRESHOLD {
            Self::Falling
        } else {
            Self::Stable
        }
    }
}

/// Linear extrapolation of a channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrendForecast {
    /// Extrapolated value `horizon` steps past the last reading
    pub next: f32,
    /// Fitted change per sample
    pub slope: f32,
    /// Direction of `slope`
    pub direction: TrendDirection,
}

/// Fit a line through the history and extrapolate it
///
/// The forecast is evaluated at index `len + horizon`. `None` with fewer than
/// [`TREND_MIN_SAMPLES`] readings.
pub fn trend_forecast(values: &[f32], horizon: usize) -> Option<TrendForecast> {
    if values.len() < TREND_MIN_SAMPLES {
        return None;
    }
    let fit = stats::linear_fit(values)?;
    Some(TrendForecast {
        next: fit.at((values.len() + horizon) as f32),
        slope: fit.slope,
        direction: TrendDirection::from_slope(fit.slope),
    })
}

/// Site risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RiskLevel {
    /// Normal operating parameters
    Safe,
    /// One or both readings elevated
    MediumRisk,
    /// Heat and gas critical together
    HighRisk,
}

impl RiskLevel {
    /// Dashboard label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::MediumRisk => "MEDIUM RISK",
            Self::HighRisk => "HIGH RISK",
        }
    }

    /// Badge color
    pub fn color(&self) -> &'static str {
        match self {
            Self::Safe => "emerald",
            Self::MediumRisk => "orange",
            Self::HighRisk => "red",
        }
    }
}

/// Limits of the site safety index
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafetyLimits {
    /// Temperature raising the level to medium, °C
    pub elevated_temperature: f32,
    /// Gas level raising the level to medium, ppm
    pub elevated_gas: f32,
    /// Temperature that, together with critical gas, is high risk, °C
    pub critical_temperature: f32,
    /// Gas level that, together with critical heat, is high risk, ppm
    pub critical_gas: f32,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            elevated_temperature: 28.0,
            elevated_gas: 90.0,
            critical_temperature: 30.0,
            critical_gas: 120.0,
        }
    }
}

/// Result of the site safety index
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafetyAssessment {
    /// Level reached
    pub level: RiskLevel,
    /// Why
    pub reason: String,
}

/// Rate the latest temperature and gas reading with the default limits
pub fn safety_index(temperature: f32, gas: f32) -> SafetyAssessment {
    safety_index_with(temperature, gas, &SafetyLimits::default())
}

/// Rate the latest temperature and gas reading
pub fn safety_index_with(temperature: f32, gas: f32, limits: &SafetyLimits) -> SafetyAssessment {
    let hot = temperature > limits.elevated_temperature;
    let gassy = gas > limits.elevated_gas;

    let (level, reason) = if temperature > limits.critical_temperature && gas > limits.critical_gas {
        (
            RiskLevel::HighRisk,
            format!(
                "Critical: high temperature (>{}°C) and gas levels (>{}ppm) detected simultaneously.",
                limits.critical_temperature, limits.critical_gas
            ),
        )
    } else if hot && gassy {
        (
            RiskLevel::MediumRisk,
            String::from("Warning: both temperature and gas levels are elevated."),
        )
    } else if hot {
        (
            RiskLevel::MediumRisk,
            format!("Elevated temperature ({}°C) detected above safety baseline.", temperature),
        )
    } else if gassy {
        (
            RiskLevel::MediumRisk,
            format!("Elevated gas concentration ({} ppm) detected.", gas),
        )
    } else {
        (
            RiskLevel::Safe,
            String::from("All systems reporting normal operating parameters."),
        )
    };

    if level == RiskLevel::HighRisk {
        log_warn!("site safety: {} (temp={} gas={})", level.label(), temperature, gas);
    }

    SafetyAssessment { level, reason }
}
