//! Tiered health guidance per AQI band.

use super::category::AqiCategory;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Guidance shown next to the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HealthRecommendation {
    /// Band the guidance belongs to
    pub category: AqiCategory,
    /// Advice for the general public
    pub general: &'static str,
    /// Advice for children, the elderly and people with heart or lung disease
    pub sensitive_groups: &'static str,
    /// Outdoor activity guidance
    pub activities: &'static str,
    /// Mask guidance
    pub mask_recommendation: &'static str,
    /// Simple color name for badges
    pub color: &'static str,
}

impl HealthRecommendation {
    /// Guidance for an optional index
    pub fn for_aqi(aqi: Option<u16>) -> Self {
        Self::for_category(AqiCategory::from_optional(aqi))
    }

    /// Guidance for a band
    pub fn for_category(category: AqiCategory) -> Self {
        let (general, sensitive_groups, activities, mask_recommendation, color) = match category {
            AqiCategory::Good => (
                "Air quality is excellent. Ideal for outdoor activities.",
                "No restrictions for any group.",
                "All outdoor activities recommended.",
                "Not required",
                "green",
            ),
            AqiCategory::Moderate => (
                "Air quality is acceptable. Unusually sensitive people should consider limiting prolonged outdoor exertion.",
                "Children with asthma should limit prolonged outdoor exertion.",
                "Normal outdoor activities are acceptable.",
                "Optional for sensitive individuals",
                "yellow",
            ),
            AqiCategory::UnhealthyForSensitiveGroups => (
                "Sensitive groups should reduce prolonged or heavy outdoor exertion.",
                "Children, elderly, and people with respiratory conditions should limit outdoor activities.",
                "Reduce prolonged or heavy exercise outdoors. General public can continue normal activities.",
                "Recommended: Surgical mask or N95 for sensitive groups",
                "orange",
            ),
            AqiCategory::Unhealthy => (
                "Everyone should reduce prolonged or heavy outdoor exertion.",
                "Children, elderly, and people with heart/lung disease should avoid outdoor activities.",
                "Avoid prolonged outdoor exertion. Shorten outdoor activities.",
                "Recommended: N95/KN95 mask for everyone outdoors",
                "red",
            ),
            AqiCategory::VeryUnhealthy => (
                "Health alert! Everyone should avoid outdoor physical exertion.",
                "Remain indoors. Use air purifiers if available.",
                "Avoid all outdoor activities. Move activities indoors or reschedule.",
                "Required: N95/KN95 mask if going outdoors. Consider staying indoors.",
                "purple",
            ),
            AqiCategory::Hazardous => (
                "EMERGENCY: Remain indoors with windows/doors closed. Use air purifiers.",
                "CRITICAL: Seek immediate medical attention if experiencing symptoms.",
                "Do NOT go outdoors unless absolutely necessary.",
                "REQUIRED: N95/FFP2 mask minimum. Consider respirator with filters.",
                "maroon",
            ),
            AqiCategory::Unavailable => ("No data available", "", "", "Not applicable", "gray"),
        };

        Self {
            category,
            general,
            sensitive_groups,
            activities,
            mask_recommendation,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_bands() {
        assert_eq!(HealthRecommendation::for_aqi(Some(42)).mask_recommendation, "Not required");
        assert_eq!(HealthRecommendation::for_aqi(Some(175)).color, "red");
        assert_eq!(HealthRecommendation::for_aqi(Some(450)).category, AqiCategory::Hazardous);
        let none = HealthRecommendation::for_aqi(None);
        assert_eq!(none.general, "No data available");
        assert_eq!(none.mask_recommendation, "Not applicable");
    }
}
