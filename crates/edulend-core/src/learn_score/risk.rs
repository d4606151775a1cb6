use serde::{Deserialize, Serialize};

/// Lender-facing risk tier on the 5-band scale.
///
/// Ordered from least to most risky, so a higher score never maps to a
/// greater level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryLow => write!(f, "Very Low"),
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::VeryHigh => write!(f, "Very High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub color: String,
    pub description: String,
}

/// Risk cut points reuse the top of the grade scale (800/700/600/500) but
/// the two scales stay independent.
pub fn classify_risk_level(total: u32) -> RiskLevel {
    if total >= 800 {
        RiskLevel::VeryLow
    } else if total >= 700 {
        RiskLevel::Low
    } else if total >= 600 {
        RiskLevel::Medium
    } else if total >= 500 {
        RiskLevel::High
    } else {
        RiskLevel::VeryHigh
    }
}

pub fn classify_risk(total: u32) -> RiskAssessment {
    let level = classify_risk_level(total);
    let (color, description) = match level {
        RiskLevel::VeryLow => (
            "#10b981",
            "Excellent credit history and academic performance",
        ),
        RiskLevel::Low => ("#22c55e", "Good credit history with strong academics"),
        RiskLevel::Medium => ("#eab308", "Moderate credit history, average academics"),
        RiskLevel::High => ("#f97316", "Limited credit history or poor payment record"),
        RiskLevel::VeryHigh => ("#dc2626", "Poor credit history or defaults"),
    };

    RiskAssessment {
        level,
        color: color.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify_risk(800).level, RiskLevel::VeryLow);
        assert_eq!(classify_risk(799).level, RiskLevel::Low);
        assert_eq!(classify_risk(700).level, RiskLevel::Low);
        assert_eq!(classify_risk(699).level, RiskLevel::Medium);
        assert_eq!(classify_risk(600).level, RiskLevel::Medium);
        assert_eq!(classify_risk(500).level, RiskLevel::High);
        assert_eq!(classify_risk(499).level, RiskLevel::VeryHigh);
        assert_eq!(classify_risk(0).level, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_descriptions_and_colors() {
        let r = classify_risk(950);
        assert_eq!(r.color, "#10b981");
        assert_eq!(
            r.description,
            "Excellent credit history and academic performance"
        );

        let r = classify_risk(100);
        assert_eq!(r.color, "#dc2626");
        assert_eq!(r.description, "Poor credit history or defaults");
    }

    #[test]
    fn test_serialized_level_names() {
        let r = classify_risk(450);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["level"], "Very High");
        assert_eq!(RiskLevel::VeryLow.to_string(), "Very Low");
    }
}
