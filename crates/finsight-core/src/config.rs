//! Engine configuration.
//!
//! Every field has a default so a partial JSON/YAML document (or none at all)
//! yields a usable configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinsightError;
use crate::types::Locale;
use crate::FinsightResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub locale: Locale,
    /// Run calculators on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
    /// Replace a metric's static benchmark with `industry_averages[id]` when present.
    pub use_industry_averages: bool,
    pub monte_carlo: MonteCarloConfig,
    /// Relative bump applied to each input for sensitivity factors (0.10 = +10%).
    pub sensitivity_bump: Decimal,
    /// Rounding applied to reported values.
    pub decimal_places: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            parallel: false,
            use_industry_averages: true,
            monte_carlo: MonteCarloConfig::default(),
            sensitivity_bump: dec!(0.10),
            decimal_places: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub simulations: u32,
    pub seed: u64,
    /// Standard deviation of the multiplicative shock applied to every input.
    pub shock_std_dev: f64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulations: 500,
            seed: 42,
            shock_std_dev: 0.10,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> FinsightResult<()> {
        if self.sensitivity_bump <= Decimal::ZERO || self.sensitivity_bump > Decimal::ONE {
            return Err(FinsightError::InvalidInput {
                field: "sensitivity_bump".into(),
                reason: "Must be in (0, 1]".into(),
            });
        }
        if self.decimal_places > 12 {
            return Err(FinsightError::InvalidInput {
                field: "decimal_places".into(),
                reason: "Must be at most 12".into(),
            });
        }
        if self.monte_carlo.simulations < 10 {
            return Err(FinsightError::InvalidInput {
                field: "monte_carlo.simulations".into(),
                reason: "At least 10 simulations are required".into(),
            });
        }
        if !(self.monte_carlo.shock_std_dev.is_finite() && self.monte_carlo.shock_std_dev > 0.0) {
            return Err(FinsightError::InvalidInput {
                field: "monte_carlo.shock_std_dev".into(),
                reason: "Must be a positive finite number".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"locale":"ar"}"#).unwrap();
        assert_eq!(cfg.locale, Locale::Ar);
        assert_eq!(cfg.decimal_places, 4);
        assert_eq!(cfg.monte_carlo.seed, 42);
        assert!(cfg.use_industry_averages);
    }

    #[test]
    fn test_rejects_non_positive_bump() {
        let cfg = EngineConfig {
            sensitivity_bump: Decimal::ZERO,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bump_above_one() {
        let cfg = EngineConfig {
            sensitivity_bump: dec!(1.5),
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = EngineConfig {
            sensitivity_bump: Decimal::ONE,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_too_few_simulations() {
        let mut cfg = EngineConfig::default();
        cfg.monte_carlo.simulations = 3;
        assert!(cfg.validate().is_err());
    }
}
