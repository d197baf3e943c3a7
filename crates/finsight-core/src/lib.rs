pub mod catalog;
pub mod classification;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod math;
pub mod report;
pub mod types;

pub use catalog::{Category, MetricDefinition, Tier, Unit};
pub use classification::{Policy, Status};
pub use config::{EngineConfig, MonteCarloConfig};
pub use data::FinancialData;
pub use engine::{analyze_applied, analyze_basic, run_catalog, AnalysisResult};
#[cfg(feature = "advanced")]
pub use engine::{analyze_advanced, AdvancedAnalysisResult};
pub use error::{ClassificationError, DataError, FinsightError};
pub use report::{build_report, ReportData};
pub use types::*;

/// Standard result type for all finsight operations
pub type FinsightResult<T> = Result<T, FinsightError>;
