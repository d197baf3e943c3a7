pub mod interpretation;
pub mod status;
pub mod thresholds;

pub use interpretation::{Reading, Tone};
pub use status::{Policy, Status};
pub use thresholds::{classify, Bands, ThresholdTable, ADVANCED, APPLIED, BASIC};
