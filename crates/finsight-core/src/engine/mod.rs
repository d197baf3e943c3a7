//! Catalog execution.

#[cfg(feature = "advanced")]
pub mod advanced;
pub mod runner;

#[cfg(feature = "advanced")]
pub use advanced::{analyze_advanced, AdvancedAnalysisResult, SensitivityFactor};
pub use runner::{analyze_applied, analyze_basic, resolve_benchmark, run_catalog, AnalysisResult};
