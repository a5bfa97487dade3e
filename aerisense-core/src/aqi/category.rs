//! AQI bands.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// EPA category of an overall index, serialized as its [`label`](Self::label)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AqiCategory {
    /// 0–50
    Good,
    /// 51–100
    Moderate,
    /// 101–150
    #[cfg_attr(feature = "serde", serde(rename = "Unhealthy for Sensitive Groups"))]
    UnhealthyForSensitiveGroups,
    /// 151–200
    Unhealthy,
    /// 201–300
    #[cfg_attr(feature = "serde", serde(rename = "Very Unhealthy"))]
    VeryUnhealthy,
    /// 301–500
    Hazardous,
    /// No pollutant could be indexed
    Unavailable,
}

impl AqiCategory {
    /// Band of an index; anything above 300 is hazardous
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    /// Band of an optional index
    pub fn from_optional(aqi: Option<u16>) -> Self {
        aqi.map_or(Self::Unavailable, Self::from_aqi)
    }

    /// EPA label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
            Self::Unavailable => "Unavailable",
        }
    }

    /// EPA color
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "#00E400",
            Self::Moderate => "#FFFF00",
            Self::UnhealthyForSensitiveGroups => "#FF7E00",
            Self::Unhealthy => "#FF0000",
            Self::VeryUnhealthy => "#8F3F97",
            Self::Hazardous => "#7E0023",
            Self::Unavailable => "#999999",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory",
            Self::Moderate => "Acceptable for most people",
            Self::UnhealthyForSensitiveGroups => "Sensitive groups may experience health effects",
            Self::Unhealthy => "Everyone may experience health effects",
            Self::VeryUnhealthy => "Health alert: everyone may experience serious effects",
            Self::Hazardous => "Health warnings of emergency conditions",
            Self::Unavailable => "No data available",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(AqiCategory::from_aqi(50), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(51), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(150), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(AqiCategory::from_aqi(300), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::from_aqi(301), AqiCategory::Hazardous);
        assert_eq!(AqiCategory::from_aqi(900), AqiCategory::Hazardous);
        assert_eq!(AqiCategory::from_optional(None).color(), "#999999");
    }
}
