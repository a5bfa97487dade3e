//! Deterministic Safety-Threshold Rules
//!
//! Each limit is checked independently against the composed reading. A
//! violation appends one alert and its precautions; every violated limit is
//! reported, in the fixed order below:
//!
//! | Name            | Default | Fires when                 |
//! |-----------------|---------|----------------------------|
//! | `TEMP_MAX`      | 80      | temperature > limit        |
//! | `TEMP_MIN`      | -10     | temperature < limit        |
//! | `VIBRATION_MAX` | 5       | vibration > limit          |
//! | `PRESSURE_MIN`  | 900     | pressure < limit           |
//! | `WIND_MAX`      | 50      | wind speed > limit         |
//! | `UV_MAX`        | 10      | UV index > limit           |
//! | `PM25_MAX`      | 150     | PM2.5 > limit              |
//! | `NO2_MAX`       | 100     | NO2 > limit                |
//!
//! The configuration is a plain value. Overrides are merged into a copy and
//! either the whole copy is accepted or nothing changes.

use alloc::{format, string::String, vec::Vec};

use crate::{FeatureVector, MlError, MlResult};

/// Name of one configurable limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThresholdKey {
    /// Upper temperature limit (°C)
    TempMax,
    /// Lower temperature limit (°C)
    TempMin,
    /// Vibration limit
    VibrationMax,
    /// Lower pressure limit (hPa)
    PressureMin,
    /// Wind speed limit (km/h)
    WindMax,
    /// UV index limit
    UvMax,
    /// PM2.5 limit (µg/m³)
    Pm25Max,
    /// NO2 limit (ppb)
    No2Max,
}

impl ThresholdKey {
    /// Every limit, in rule order
    pub const ALL: [ThresholdKey; 8] = [
        ThresholdKey::TempMax,
        ThresholdKey::TempMin,
        ThresholdKey::VibrationMax,
        ThresholdKey::PressureMin,
        ThresholdKey::WindMax,
        ThresholdKey::UvMax,
        ThresholdKey::Pm25Max,
        ThresholdKey::No2Max,
    ];

    /// Name used in overrides and JSON
    pub fn name(self) -> &'static str {
        match self {
            ThresholdKey::TempMax => "TEMP_MAX",
            ThresholdKey::TempMin => "TEMP_MIN",
            ThresholdKey::VibrationMax => "VIBRATION_MAX",
            ThresholdKey::PressureMin => "PRESSURE_MIN",
            ThresholdKey::WindMax => "WIND_MAX",
            ThresholdKey::UvMax => "UV_MAX",
            ThresholdKey::Pm25Max => "PM25_MAX",
            ThresholdKey::No2Max => "NO2_MAX",
        }
    }

    /// Parse an override name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// Alerts and precautions raised by one reading
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdAlerts {
    /// One line per violated limit
    pub alerts: Vec<String>,
    /// Actions for the violated limits, in alert order
    pub precautions: Vec<String>,
}

impl ThresholdAlerts {
    /// No limit violated
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    fn raise(&mut self, alert: String, precautions: &[&str]) {
        log_warn!("threshold violated: {}", alert);
        self.alerts.push(alert);
        self.precautions.extend(precautions.iter().map(|p| String::from(*p)));
    }
}

/// Safety limits
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub struct ThresholdConfig {
    /// Upper temperature limit (°C)
    pub temp_max: f32,
    /// Lower temperature limit (°C)
    pub temp_min: f32,
    /// Vibration limit
    pub vibration_max: f32,
    /// Lower pressure limit (hPa)
    pub pressure_min: f32,
    /// Wind speed limit (km/h)
    pub wind_max: f32,
    /// UV index limit
    pub uv_max: f32,
    /// PM2.5 limit (µg/m³)
    pub pm25_max: f32,
    /// NO2 limit (ppb)
    pub no2_max: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temp_max: 80.0,
            temp_min: -10.0,
            vibration_max: 5.0,
            pressure_min: 900.0,
            wind_max: 50.0,
            uv_max: 10.0,
            pm25_max: 150.0,
            no2_max: 100.0,
        }
    }
}

impl ThresholdConfig {
    /// Current value of a limit
    pub fn get(&self, key: ThresholdKey) -> f32 {
        match key {
            ThresholdKey::TempMax => self.temp_max,
            ThresholdKey::TempMin => self.temp_min,
            ThresholdKey::VibrationMax => self.vibration_max,
            ThresholdKey::PressureMin => self.pressure_min,
            ThresholdKey::WindMax => self.wind_max,
            ThresholdKey::UvMax => self.uv_max,
            ThresholdKey::Pm25Max => self.pm25_max,
            ThresholdKey::No2Max => self.no2_max,
        }
    }

    /// Set one limit, unchecked
    pub fn with(mut self, key: ThresholdKey, value: f32) -> Self {
        let slot = match key {
            ThresholdKey::TempMax => &mut self.temp_max,
            ThresholdKey::TempMin => &mut self.temp_min,
            ThresholdKey::VibrationMax => &mut self.vibration_max,
            ThresholdKey::PressureMin => &mut self.pressure_min,
            ThresholdKey::WindMax => &mut self.wind_max,
            ThresholdKey::UvMax => &mut self.uv_max,
            ThresholdKey::Pm25Max => &mut self.pm25_max,
            ThresholdKey::No2Max => &mut self.no2_max,
        };
        *slot = value;
        self
    }

    /// Every limit finite and the temperature band non-empty
    pub fn validate(&self) -> MlResult<()> {
        for key in ThresholdKey::ALL {
            let value = self.get(key);
            if !value.is_finite() {
                return Err(MlError::InvalidThreshold { name: key.name(), value });
            }
        }
        if self.temp_min >= self.temp_max {
            return Err(MlError::InvalidThreshold {
                name: ThresholdKey::TempMin.name(),
                value: self.temp_min,
            });
        }
        Ok(())
    }

    /// Copy of `self` with named overrides applied.
    ///
    /// Any unknown name or invalid value rejects the whole set.
    pub fn merge<'a, I>(&self, overrides: I) -> MlResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        let mut merged = *self;
        for (name, value) in overrides {
            let Some(key) = ThresholdKey::from_name(name) else {
                log_warn!("unknown threshold override {}", name);
                return Err(MlError::UnknownThreshold);
            };
            merged = merged.with(key, value);
        }
        merged.validate()?;
        Ok(merged)
    }

    /// Evaluate every rule against a reading
    pub fn check(&self, reading: &FeatureVector) -> ThresholdAlerts {
        let mut out = ThresholdAlerts::default();

        if reading.temperature > self.temp_max {
            out.raise(
                format!("Temperature High (> {:.1}°C)", self.temp_max),
                &["Hydrate immediately and avoid direct sunlight.", "Check device cooling systems."],
            );
        } else if reading.temperature < self.temp_min {
            out.raise(
                format!("Temperature Low (< {:.1}°C)", self.temp_min),
                &["Ensure thermal insulation is active."],
            );
        }

        if reading.vibration > self.vibration_max {
            out.raise(
                format!("Vibration Critical (> {:.1})", self.vibration_max),
                &[
                    "Inspect mounting integrity immediately.",
                    "Possible bearing failure - schedule maintenance.",
                ],
            );
        }

        if reading.pressure < self.pressure_min {
            out.raise(
                format!("Pressure Drop (< {:.1}hPa)", self.pressure_min),
                &["Check for vacuum leaks or seal breaches."],
            );
        }

        if reading.wind_speed > self.wind_max {
            out.raise(
                format!("High Wind (> {:.1}km/h)", self.wind_max),
                &["Secure loose outdoor equipment.", "Halt crane/aerial operations."],
            );
        }

        if reading.uv_index > self.uv_max {
            out.raise(
                format!("Extreme UV (> {:.1})", self.uv_max),
                &["Wear UV-protective gear and eye protection.", "Limit exposure to < 10 minutes."],
            );
        }

        if reading.pm25 > self.pm25_max {
            out.raise(
                format!("Hazardous Air Quality (PM2.5 > {:.1})", self.pm25_max),
                &["Wear N95/N99 respirator masks.", "Activate air filtration systems immediately."],
            );
        }

        if reading.no2 > self.no2_max {
            out.raise(
                format!("High NO2 Levels (> {:.1}ppb)", self.no2_max),
                &["Ventilate enclosed spaces and shut off combustion sources.", "Limit outdoor exertion near traffic."],
            );
        }

        out
    }
}
