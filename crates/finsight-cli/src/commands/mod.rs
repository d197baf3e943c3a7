pub mod agents;
pub mod analyze;
pub mod catalog;
pub mod classify;
pub mod report;

use finsight_core::{EngineConfig, Locale};

use crate::input;

/// Options shared by every command.
pub struct Settings {
    pub config: Option<String>,
    pub locale: Option<String>,
}

impl Settings {
    pub fn locale(&self) -> Result<Option<Locale>, Box<dyn std::error::Error>> {
        Ok(self.locale.as_deref().map(str::parse::<Locale>).transpose()?)
    }

    /// Engine configuration from `--config`, with `--locale` applied on top.
    pub fn engine_config(&self) -> Result<EngineConfig, Box<dyn std::error::Error>> {
        let mut config: EngineConfig = match &self.config {
            Some(path) => {
                tracing::debug!("Loading engine config from {}", path);
                input::file::read_document(path)?
            }
            None => EngineConfig::default(),
        };
        if let Some(locale) = self.locale()? {
            config.locale = locale;
        }
        config.validate()?;
        Ok(config)
    }
}
