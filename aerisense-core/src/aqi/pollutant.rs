//! Criteria pollutants and concentration snapshots.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The six EPA criteria pollutants, in reporting order
///
/// The declaration order doubles as the tie-break order when two pollutants
/// share the highest sub-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pollutant {
    /// Fine particulate matter, µg/m³ (24 h)
    Pm25,
    /// Coarse particulate matter, µg/m³ (24 h)
    Pm10,
    /// Ozone, ppb (8 h)
    O3,
    /// Nitrogen dioxide, ppb (1 h)
    No2,
    /// Sulfur dioxide, ppb (1 h)
    So2,
    /// Carbon monoxide, ppm (8 h)
    Co,
}

impl Pollutant {
    /// Every pollutant in reporting order
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
    ];

    /// Wire key as used by the collectors
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
            Self::O3 => "o3",
            Self::No2 => "no2",
            Self::So2 => "so2",
            Self::Co => "co",
        }
    }

    /// Parse a wire key; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// Human-readable name for dashboards
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::O3 => "Ozone",
            Self::No2 => "NO₂",
            Self::So2 => "SO₂",
            Self::Co => "CO",
        }
    }

    /// Chart color of the pollutant's slice
    pub fn chart_color(&self) -> &'static str {
        match self {
            Self::Pm25 => "#e74c3c",
            Self::Pm10 => "#e67e22",
            Self::O3 => "#3498db",
            Self::No2 => "#9b59b6",
            Self::So2 => "#1abc9c",
            Self::Co => "#34495e",
        }
    }

    /// Concentration unit the breakpoint table expects
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Pm25 | Self::Pm10 => "µg/m³",
            Self::O3 | Self::No2 | Self::So2 => "ppb",
            Self::Co => "ppm",
        }
    }
}

/// Concentrations of the criteria pollutants, each possibly absent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PollutantConcentrations {
    /// PM2.5, µg/m³
    pub pm25: Option<f32>,
    /// PM10, µg/m³
    pub pm10: Option<f32>,
    /// Ozone, ppb
    pub o3: Option<f32>,
    /// NO₂, ppb
    pub no2: Option<f32>,
    /// SO₂, ppb
    pub so2: Option<f32>,
    /// CO, ppm
    pub co: Option<f32>,
}

impl PollutantConcentrations {
    /// Snapshot with every pollutant absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot from `(key, value)` pairs; unknown keys are skipped
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<f32>)>,
    {
        let mut out = Self::default();
        for (key, value) in pairs {
            match Pollutant::from_key(key) {
                Some(p) => out.set(p, value),
                None => log_debug!("ignoring unknown pollutant key {}", key),
            }
        }
        out
    }

    /// Set one pollutant
    pub fn with(mut self, pollutant: Pollutant, value: f32) -> Self {
        self.set(pollutant, Some(value));
        self
    }

    /// Concentration of one pollutant
    pub fn get(&self, pollutant: Pollutant) -> Option<f32> {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::O3 => self.o3,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
        }
    }

    /// Replace one pollutant's concentration
    pub fn set(&mut self, pollutant: Pollutant, value: Option<f32>) {
        let slot = match pollutant {
            Pollutant::Pm25 => &mut self.pm25,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::O3 => &mut self.o3,
            Pollutant::No2 => &mut self.no2,
            Pollutant::So2 => &mut self.so2,
            Pollutant::Co => &mut self.co,
        };
        *slot = value;
    }

    /// Present concentrations in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f32)> + '_ {
        Pollutant::ALL
            .iter()
            .filter_map(move |&p| self.get(p).map(|c| (p, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for p in Pollutant::ALL {
            assert_eq!(Pollutant::from_key(p.key()), Some(p));
        }
        assert_eq!(Pollutant::from_key("pm1"), None);
        assert_eq!(Pollutant::No2.display_name(), "NO₂");
        assert_eq!(Pollutant::Co.unit(), "ppm");
    }

    #[test]
    fn pairs_skip_unknown_and_absent() {
        let c = PollutantConcentrations::from_pairs([("pm25", Some(35.0)), ("voc", Some(1.0)), ("o3", None)]);
        let present: Vec<_> = c.iter().collect();
        assert_eq!(present, vec![(Pollutant::Pm25, 35.0)]);
    }
}
