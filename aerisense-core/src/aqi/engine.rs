//! Sub-index interpolation and the overall index.

use alloc::collections::BTreeMap;

use super::{
    breakdown::PollutantBreakdown,
    breakpoints::{self, Placement, MAX_AQI},
    category::AqiCategory,
    health::HealthRecommendation,
    pollutant::{Pollutant, PollutantConcentrations},
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Overall index of a concentration snapshot
///
/// `color` and `description` are stored so the serialized report carries
/// them alongside the category label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AqiReport {
    /// Overall index, `None` when no pollutant could be indexed
    pub aqi: Option<u16>,
    /// Band of `aqi`
    pub category: AqiCategory,
    /// Band color
    pub color: &'static str,
    /// Band description
    pub description: &'static str,
    /// Pollutant with the highest sub-index
    pub dominant_pollutant: Option<Pollutant>,
    /// Sub-index of every indexed pollutant
    pub sub_indices: BTreeMap<Pollutant, u16>,
}

impl AqiReport {
    fn new(
        aqi: Option<u16>,
        dominant_pollutant: Option<Pollutant>,
        sub_indices: BTreeMap<Pollutant, u16>,
    ) -> Self {
        let category = AqiCategory::from_optional(aqi);
        Self {
            aqi,
            category,
            color: category.color(),
            description: category.description(),
            dominant_pollutant,
            sub_indices,
        }
    }

    /// Report for a snapshot with nothing to index
    pub fn unavailable() -> Self {
        Self::new(None, None, BTreeMap::new())
    }

    /// Display name of the dominant pollutant
    pub fn dominant_display_name(&self) -> Option<&'static str> {
        self.dominant_pollutant.map(|p| p.display_name())
    }
}

/// Stateless EPA AQI calculator
///
/// Every method is a pure lookup: the same input always gives the same output.
#[derive(Debug, Clone, Copy, Default)]
pub struct AqiEngine;

impl AqiEngine {
    /// Create the engine
    pub const fn new() -> Self {
        Self
    }

    /// Sub-index of one concentration
    ///
    /// - inside a band: rounded linear interpolation
    /// - above the table: clamped to 500
    /// - between two bands, negative or not a number: `None`
    pub fn sub_index(&self, pollutant: Pollutant, concentration: f32) -> Option<u16> {
        match breakpoints::locate(breakpoints::table(pollutant), concentration) {
            Placement::Band(bp) => Some(libm::roundf(bp.interpolate(concentration)) as u16),
            Placement::AboveTable => {
                log_warn!(
                    "{} concentration {} above breakpoint table, clamped to {}",
                    pollutant.key(),
                    concentration,
                    MAX_AQI
                );
                Some(MAX_AQI)
            }
            Placement::Unmapped => None,
        }
    }

    /// Sub-index by wire key; unknown keys yield `None`
    pub fn sub_index_by_key(&self, key: &str, concentration: f32) -> Option<u16> {
        Pollutant::from_key(key).and_then(|p| self.sub_index(p, concentration))
    }

    /// Overall index: the highest sub-index wins
    ///
    /// On a tie the pollutant listed first in [`Pollutant::ALL`] is dominant.
    pub fn overall(&self, concentrations: &PollutantConcentrations) -> AqiReport {
        let sub_indices: BTreeMap<Pollutant, u16> = concentrations
            .iter()
            .filter_map(|(p, c)| self.sub_index(p, c).map(|i| (p, i)))
            .collect();

        let mut dominant: Option<(Pollutant, u16)> = None;
        for (&p, &index) in &sub_indices {
            match dominant {
                Some((_, best)) if best >= index => {}
                _ => dominant = Some((p, index)),
            }
        }

        match dominant {
            Some((pollutant, aqi)) => AqiReport::new(Some(aqi), Some(pollutant), sub_indices),
            None => AqiReport::unavailable(),
        }
    }

    /// Band of an index
    pub fn category(&self, aqi: Option<u16>) -> AqiCategory {
        AqiCategory::from_optional(aqi)
    }

    /// Tiered guidance for an index
    pub fn health_recommendation(&self, aqi: Option<u16>) -> HealthRecommendation {
        HealthRecommendation::for_aqi(aqi)
    }

    /// Chart data for a report
    pub fn breakdown(&self, report: &AqiReport) -> PollutantBreakdown {
        PollutantBreakdown::from_report(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AQI: AqiEngine = AqiEngine::new();

    #[test]
    fn pm25_interpolation() {
        // (100 − 51)/(35.4 − 12.1)·(35.0 − 12.1) + 51 = 99.16
        assert_eq!(AQI.sub_index(Pollutant::Pm25, 35.0), Some(99));
        assert_eq!(AQI.sub_index(Pollutant::Pm25, 0.0), Some(0));
        assert_eq!(AQI.sub_index(Pollutant::Pm25, 12.1), Some(51));
    }

    #[test]
    fn upper_edge_stays_in_band() {
        assert_eq!(AQI.sub_index(Pollutant::Pm25, 12.0), Some(50));
        assert_eq!(AQI.sub_index(Pollutant::Pm25, 35.4), Some(100));
        assert_eq!(AQI.sub_index(Pollutant::Co, 9.4), Some(100));
        assert_eq!(AQI.sub_index(Pollutant::O3, 70.0), Some(100));
    }

    #[test]
    fn gaps_clamps_and_misses() {
        assert_eq!(AQI.sub_index(Pollutant::Pm25, 12.05), None);
        assert_eq!(AQI.sub_index(Pollutant::Pm10, 54.5), None);
        assert_eq!(AQI.sub_index(Pollutant::Co, 4.45), None);
        assert_eq!(AQI.sub_index(Pollutant::Pm25, 900.0), Some(500));
        assert_eq!(AQI.sub_index(Pollutant::O3, 250.0), Some(500));
        assert_eq!(AQI.sub_index(Pollutant::Pm25, -3.0), None);
        assert_eq!(AQI.sub_index_by_key("pm1", 10.0), None);
        assert_eq!(AQI.sub_index_by_key("no2", 53.0), Some(50));
    }

    #[test]
    fn overall_takes_the_maximum() {
        let c = PollutantConcentrations::new()
            .with(Pollutant::Pm25, 35.0)
            .with(Pollutant::Pm10, 10.0);
        let report = AQI.overall(&c);

        assert_eq!(report.aqi, Some(99));
        assert_eq!(report.dominant_pollutant, Some(Pollutant::Pm25));
        assert_eq!(report.sub_indices[&Pollutant::Pm10], 9);
        assert_eq!(report.category, AqiCategory::Moderate);
        assert_eq!(report.color, "#FFFF00");
        assert_eq!(report.description, "Acceptable for most people");
        assert_eq!(report.dominant_display_name(), Some("PM2.5"));
    }

    #[test]
    fn ties_go_to_first_pollutant() {
        // Both land on the top of the Good band
        let c = PollutantConcentrations::new()
            .with(Pollutant::Co, 4.4)
            .with(Pollutant::Pm10, 54.0);
        assert_eq!(AQI.overall(&c).dominant_pollutant, Some(Pollutant::Pm10));
    }

    #[test]
    fn nothing_indexable() {
        let report = AQI.overall(&PollutantConcentrations::new().with(Pollutant::O3, -1.0));
        assert_eq!(report, AqiReport::unavailable());
        assert_eq!(report.description, "No data available");
        assert_eq!(report.color, "#999999");
        assert_eq!(AQI.health_recommendation(report.aqi).general, "No data available");
    }

    #[test]
    fn breakdown_lists_every_sub_index() {
        let c = PollutantConcentrations::new()
            .with(Pollutant::Pm25, 20.0)
            .with(Pollutant::No2, 30.0);
        let chart = AQI.breakdown(&AQI.overall(&c));
        assert_eq!(chart.labels, vec!["PM2.5", "NO₂"]);
        assert_eq!(chart.colors, vec!["#e74c3c", "#9b59b6"]);
        assert_eq!(chart.total_pollutants(), 2);
    }
}
