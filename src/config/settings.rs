//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::board::DesignRules;
use crate::error::ConfigError;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Fabrication design rules.
    #[serde(default)]
    pub rules: DesignRules,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        for (name, value) in [
            ("trace", rules.trace),
            ("space", rules.space),
            ("via", rules.via),
            ("via_hole", rules.via_hole),
            ("via_space", rules.via_space),
            ("silk", rules.silk),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("design rule '{name}' must be positive, got {value}"),
                });
            }
        }
        if rules.via_hole >= rules.via {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "via drill ({}) must be smaller than the via diameter ({})",
                    rules.via_hole, rules.via
                ),
            });
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
