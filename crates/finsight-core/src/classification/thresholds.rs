//! Status classification against a benchmark.
//!
//! Three threshold tables are in use, one per catalog tier. They differ in
//! their band boundaries and are kept as separate named configurations
//! rather than merged:
//!
//! | Table    | Higher ≥              | Lower ≤               | Optimal abs(r−1) ≤       |
//! |----------|-----------------------|-----------------------|--------------------------|
//! | basic    | 1.0 / 0.8 / 0.7 / 0.6 | 1.0 / 1.2 / 1.3 / 1.5 | 0.10 / 0.20 / 0.35 / 0.50 |
//! | applied  | 1.2 / 1.1 / 0.9 / 0.8 | 0.8 / 0.9 / 1.1 / 1.2 | 0.10 / 0.20 / 0.30 / 0.50 |
//! | advanced | 1.2 / 1.1 / 0.9 / 0.7 | 0.8 / 0.9 / 1.1 / 1.3 | 0.10 / 0.25 / 0.40 / 0.60 |
//!
//! Boundaries are for excellent / good / average / poor; anything beyond the
//! poor boundary is critical. `r = value / benchmark`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::classification::{Policy, Status};
use crate::error::ClassificationError;

/// Band boundaries for excellent, good, average and poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bands {
    pub excellent: Decimal,
    pub good: Decimal,
    pub average: Decimal,
    pub poor: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdTable {
    pub name: &'static str,
    /// Minimum ratio for each bucket.
    pub higher: Bands,
    /// Maximum ratio for each bucket.
    pub lower: Bands,
    /// Maximum distance of the ratio from 1.0 for each bucket.
    pub optimal: Bands,
}

pub const BASIC: ThresholdTable = ThresholdTable {
    name: "basic",
    higher: Bands {
        excellent: dec!(1.0),
        good: dec!(0.8),
        average: dec!(0.7),
        poor: dec!(0.6),
    },
    lower: Bands {
        excellent: dec!(1.0),
        good: dec!(1.2),
        average: dec!(1.3),
        poor: dec!(1.5),
    },
    optimal: Bands {
        excellent: dec!(0.10),
        good: dec!(0.20),
        average: dec!(0.35),
        poor: dec!(0.50),
    },
};

pub const APPLIED: ThresholdTable = ThresholdTable {
    name: "applied",
    higher: Bands {
        excellent: dec!(1.2),
        good: dec!(1.1),
        average: dec!(0.9),
        poor: dec!(0.8),
    },
    lower: Bands {
        excellent: dec!(0.8),
        good: dec!(0.9),
        average: dec!(1.1),
        poor: dec!(1.2),
    },
    optimal: Bands {
        excellent: dec!(0.10),
        good: dec!(0.20),
        average: dec!(0.30),
        poor: dec!(0.50),
    },
};

pub const ADVANCED: ThresholdTable = ThresholdTable {
    name: "advanced",
    higher: Bands {
        excellent: dec!(1.2),
        good: dec!(1.1),
        average: dec!(0.9),
        poor: dec!(0.7),
    },
    lower: Bands {
        excellent: dec!(0.8),
        good: dec!(0.9),
        average: dec!(1.1),
        poor: dec!(1.3),
    },
    optimal: Bands {
        excellent: dec!(0.10),
        good: dec!(0.25),
        average: dec!(0.40),
        poor: dec!(0.60),
    },
};

impl ThresholdTable {
    pub fn by_name(name: &str) -> Option<&'static ThresholdTable> {
        match name {
            "basic" => Some(&BASIC),
            "applied" => Some(&APPLIED),
            "advanced" => Some(&ADVANCED),
            _ => None,
        }
    }

    /// Classify `value` against `benchmark` under `policy`.
    pub fn classify(
        &self,
        value: Decimal,
        benchmark: Decimal,
        policy: Policy,
    ) -> Result<Status, ClassificationError> {
        if benchmark <= Decimal::ZERO {
            return Err(ClassificationError::NonPositiveBenchmark { benchmark });
        }
        // Overflow only happens for absurd magnitudes; saturate in the same direction.
        let ratio = value.checked_div(benchmark).unwrap_or(if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });

        let status = match policy {
            Policy::HigherIsBetter => {
                let b = &self.higher;
                if ratio >= b.excellent {
                    Status::Excellent
                } else if ratio >= b.good {
                    Status::Good
                } else if ratio >= b.average {
                    Status::Average
                } else if ratio >= b.poor {
                    Status::Poor
                } else {
                    Status::Critical
                }
            }
            Policy::LowerIsBetter => {
                let b = &self.lower;
                if ratio <= b.excellent {
                    Status::Excellent
                } else if ratio <= b.good {
                    Status::Good
                } else if ratio <= b.average {
                    Status::Average
                } else if ratio <= b.poor {
                    Status::Poor
                } else {
                    Status::Critical
                }
            }
            Policy::Optimal => {
                let b = &self.optimal;
                let distance = ratio.saturating_sub(Decimal::ONE).abs();
                if distance <= b.excellent {
                    Status::Excellent
                } else if distance <= b.good {
                    Status::Good
                } else if distance <= b.average {
                    Status::Average
                } else if distance <= b.poor {
                    Status::Poor
                } else {
                    Status::Critical
                }
            }
        };
        Ok(status)
    }
}

/// Free-function form of [`ThresholdTable::classify`].
pub fn classify(
    value: Decimal,
    benchmark: Decimal,
    policy: Policy,
    table: &ThresholdTable,
) -> Result<Status, ClassificationError> {
    table.classify(value, benchmark, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn higher(table: &ThresholdTable, value: Decimal) -> Status {
        table
            .classify(value, dec!(100), Policy::HigherIsBetter)
            .unwrap()
    }

    fn lower(table: &ThresholdTable, value: Decimal) -> Status {
        table
            .classify(value, dec!(100), Policy::LowerIsBetter)
            .unwrap()
    }

    fn optimal(table: &ThresholdTable, value: Decimal) -> Status {
        table.classify(value, dec!(100), Policy::Optimal).unwrap()
    }

    #[test]
    fn test_basic_higher_boundaries() {
        assert_eq!(higher(&BASIC, dec!(100)), Status::Excellent);
        assert_eq!(higher(&BASIC, dec!(99.99)), Status::Good);
        assert_eq!(higher(&BASIC, dec!(80)), Status::Good);
        assert_eq!(higher(&BASIC, dec!(70)), Status::Average);
        assert_eq!(higher(&BASIC, dec!(60)), Status::Poor);
        assert_eq!(higher(&BASIC, dec!(59.99)), Status::Critical);
    }

    #[test]
    fn test_applied_higher_boundaries() {
        assert_eq!(higher(&APPLIED, dec!(120)), Status::Excellent);
        assert_eq!(higher(&APPLIED, dec!(110)), Status::Good);
        assert_eq!(higher(&APPLIED, dec!(90)), Status::Average);
        assert_eq!(higher(&APPLIED, dec!(80)), Status::Poor);
        assert_eq!(higher(&APPLIED, dec!(79)), Status::Critical);
    }

    #[test]
    fn test_advanced_poor_boundary_differs_from_applied() {
        // 0.75 of benchmark: poor under the advanced table, critical under applied.
        assert_eq!(higher(&ADVANCED, dec!(75)), Status::Poor);
        assert_eq!(higher(&APPLIED, dec!(75)), Status::Critical);
        assert_eq!(higher(&ADVANCED, dec!(70)), Status::Poor);
        assert_eq!(higher(&ADVANCED, dec!(69)), Status::Critical);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let status = BASIC.classify(Decimal::MIN, dec!(0.5), Policy::Optimal).unwrap();
        assert_eq!(status, Status::Critical);
        let status = BASIC.classify(Decimal::MAX, dec!(0.5), Policy::HigherIsBetter).unwrap();
        assert_eq!(status, Status::Excellent);
    }

    #[test]
    fn test_lower_boundaries() {
        assert_eq!(lower(&BASIC, dec!(100)), Status::Excellent);
        assert_eq!(lower(&BASIC, dec!(120)), Status::Good);
        assert_eq!(lower(&BASIC, dec!(130)), Status::Average);
        assert_eq!(lower(&BASIC, dec!(150)), Status::Poor);
        assert_eq!(lower(&BASIC, dec!(151)), Status::Critical);

        assert_eq!(lower(&APPLIED, dec!(80)), Status::Excellent);
        assert_eq!(lower(&APPLIED, dec!(90)), Status::Good);
        assert_eq!(lower(&APPLIED, dec!(110)), Status::Average);
        assert_eq!(lower(&APPLIED, dec!(120)), Status::Poor);
        assert_eq!(lower(&APPLIED, dec!(121)), Status::Critical);

        assert_eq!(lower(&ADVANCED, dec!(130)), Status::Poor);
        assert_eq!(lower(&ADVANCED, dec!(131)), Status::Critical);
    }

    #[test]
    fn test_lower_negative_value_is_best() {
        // Net cash on a net-debt metric.
        assert_eq!(lower(&APPLIED, dec!(-20)), Status::Excellent);
    }

    #[test]
    fn test_optimal_is_symmetric() {
        assert_eq!(optimal(&APPLIED, dec!(110)), Status::Excellent);
        assert_eq!(optimal(&APPLIED, dec!(90)), Status::Excellent);
        assert_eq!(optimal(&APPLIED, dec!(120)), Status::Good);
        assert_eq!(optimal(&APPLIED, dec!(80)), Status::Good);
        assert_eq!(optimal(&APPLIED, dec!(130)), Status::Average);
        assert_eq!(optimal(&APPLIED, dec!(150)), Status::Poor);
        assert_eq!(optimal(&APPLIED, dec!(151)), Status::Critical);
        assert_eq!(optimal(&BASIC, dec!(135)), Status::Average);
        assert_eq!(optimal(&ADVANCED, dec!(160)), Status::Poor);
    }

    #[test]
    fn test_zero_benchmark_is_an_error() {
        let err = BASIC
            .classify(dec!(1), Decimal::ZERO, Policy::HigherIsBetter)
            .unwrap_err();
        assert_eq!(
            err,
            ClassificationError::NonPositiveBenchmark {
                benchmark: Decimal::ZERO
            }
        );
        assert!(BASIC
            .classify(dec!(1), dec!(-2), Policy::Optimal)
            .is_err());
    }

    #[test]
    fn test_higher_is_monotonic() {
        for table in [&BASIC, &APPLIED, &ADVANCED] {
            let mut previous = Status::Unavailable;
            let mut v = Decimal::ZERO;
            while v <= dec!(200) {
                let s = higher(table, v);
                assert!(s >= previous, "{} not monotonic at {v}", table.name);
                previous = s;
                v += dec!(2.5);
            }
        }
    }

    #[test]
    fn test_scale_invariance() {
        let cases = [
            (dec!(2), dec!(2), Policy::HigherIsBetter),
            (dec!(10), dec!(15), Policy::HigherIsBetter),
            (dec!(3), dec!(2.5), Policy::LowerIsBetter),
            (dec!(45), dec!(40), Policy::Optimal),
        ];
        for table in [&BASIC, &APPLIED, &ADVANCED] {
            for (v, b, p) in cases {
                let base = table.classify(v, b, p).unwrap();
                for k in [dec!(0.5), dec!(3), dec!(1000)] {
                    assert_eq!(table.classify(v * k, b * k, p).unwrap(), base);
                }
            }
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(ThresholdTable::by_name("applied"), Some(&APPLIED));
        assert_eq!(ThresholdTable::by_name("nope"), None);
    }
}
