use serde::{Deserialize, Serialize};

use crate::types::Locale;

/// Qualitative bucket assigned to a metric relative to its benchmark.
///
/// Variants are declared worst-to-best so `Ord` follows quality.
/// `Unavailable` marks a metric that could not be computed and sorts below
/// every scored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unavailable,
    Critical,
    Poor,
    Average,
    Good,
    Excellent,
}

impl Status {
    /// The five scored statuses, best first.
    pub const SCORED: [Status; 5] = [
        Status::Excellent,
        Status::Good,
        Status::Average,
        Status::Poor,
        Status::Critical,
    ];

    /// Composite-score weight: excellent 5 … critical 1.
    pub fn weight(self) -> Option<u8> {
        match self {
            Self::Excellent => Some(5),
            Self::Good => Some(4),
            Self::Average => Some(3),
            Self::Poor => Some(2),
            Self::Critical => Some(1),
            Self::Unavailable => None,
        }
    }

    pub fn is_scored(self) -> bool {
        self != Self::Unavailable
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Excellent, Locale::En) => "Excellent",
            (Self::Good, Locale::En) => "Good",
            (Self::Average, Locale::En) => "Average",
            (Self::Poor, Locale::En) => "Poor",
            (Self::Critical, Locale::En) => "Critical",
            (Self::Unavailable, Locale::En) => "Unavailable",
            (Self::Excellent, Locale::Ar) => "ممتاز",
            (Self::Good, Locale::Ar) => "جيد",
            (Self::Average, Locale::Ar) => "متوسط",
            (Self::Poor, Locale::Ar) => "ضعيف",
            (Self::Critical, Locale::Ar) => "حرج",
            (Self::Unavailable, Locale::Ar) => "غير متوفر",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
            Self::Critical => "critical",
            Self::Unavailable => "unavailable",
        };
        write!(f, "{}", s)
    }
}

/// Whether higher, lower, or benchmark-proximal values are favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    #[serde(rename = "higher-is-better", alias = "higher")]
    HigherIsBetter,
    #[serde(rename = "lower-is-better", alias = "lower")]
    LowerIsBetter,
    #[serde(rename = "closer-to-benchmark-is-better", alias = "optimal")]
    Optimal,
}

impl std::str::FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "higher" | "higher-is-better" => Ok(Self::HigherIsBetter),
            "lower" | "lower-is-better" => Ok(Self::LowerIsBetter),
            "optimal" | "closer-to-benchmark-is-better" => Ok(Self::Optimal),
            other => Err(format!(
                "unknown policy '{other}' (expected higher, lower or optimal)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_follows_quality() {
        assert!(Status::Excellent > Status::Good);
        assert!(Status::Good > Status::Average);
        assert!(Status::Average > Status::Poor);
        assert!(Status::Poor > Status::Critical);
        assert!(Status::Critical > Status::Unavailable);
    }

    #[test]
    fn test_serialized_names_match_ui_contract() {
        let names: Vec<String> = Status::SCORED
            .iter()
            .map(|s| serde_json::to_value(s).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["excellent", "good", "average", "poor", "critical"]);
    }

    #[test]
    fn test_weights() {
        assert_eq!(Status::Excellent.weight(), Some(5));
        assert_eq!(Status::Critical.weight(), Some(1));
        assert_eq!(Status::Unavailable.weight(), None);
    }

    #[test]
    fn test_policy_aliases() {
        let p: Policy = serde_json::from_str("\"optimal\"").unwrap();
        assert_eq!(p, Policy::Optimal);
        assert_eq!("lower".parse::<Policy>().unwrap(), Policy::LowerIsBetter);
    }
}
