//! Configuration for the triage engine.

use std::fmt;

use crate::error::{Result, TriageError};
use crate::ranges::types::Sex;

/// Configuration for the `TriageEngine`
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Run the consistency validator when a knowledge base is loaded
    pub validate_on_load: bool,
    /// Sex assumed when a case carries an unrecognized value
    pub default_sex: Sex,
    /// Log every rule and alert outcome at debug level
    pub log_evaluations: bool,
    /// Worker threads used for batch case evaluation
    pub num_threads: usize,
    /// Display a progress bar during batch case evaluation
    pub show_progress: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate_on_load: true,
            default_sex: Sex::Male,
            log_evaluations: false,
            num_threads: num_cpus::get(),
            show_progress: false,
        }
    }
}

impl EngineConfig {
    /// Create a new instance with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a configuration
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(TriageError::Config(
                "num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Configuration:")?;
        writeln!(f, "  Validate On Load: {}", self.validate_on_load)?;
        writeln!(f, "  Default Sex: {}", self.default_sex)?;
        writeln!(f, "  Log Evaluations: {}", self.log_evaluations)?;
        writeln!(f, "  Threads: {}", self.num_threads)?;
        writeln!(f, "  Show Progress: {}", self.show_progress)
    }
}

/// Builder for constructing an engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Set whether the knowledge base is validated on load
    #[must_use]
    pub const fn validate_on_load(mut self, validate: bool) -> Self {
        self.config.validate_on_load = validate;
        self
    }

    /// Set the fallback sex for unrecognized patient values
    #[must_use]
    pub const fn default_sex(mut self, sex: Sex) -> Self {
        self.config.default_sex = sex;
        self
    }

    /// Set whether rule outcomes are logged
    #[must_use]
    pub const fn log_evaluations(mut self, log: bool) -> Self {
        self.config.log_evaluations = log;
        self
    }

    /// Set the number of worker threads for batch evaluation
    #[must_use]
    pub const fn num_threads(mut self, threads: usize) -> Self {
        self.config.num_threads = threads;
        self
    }

    /// Set whether batch evaluation shows a progress bar
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Build the configuration, checking it first
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
