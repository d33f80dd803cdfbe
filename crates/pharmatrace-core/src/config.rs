//! Dashboard configuration.
//!
//! The configuration surface is deliberately small: a single toggle
//! controlling whether the "secured by blockchain" indicator is displayed.
//! It has no effect on generated data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Core configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Whether the UI shows the "secured by blockchain" indicator.
    #[serde(default)]
    pub blockchain_badge: bool,
}

impl CoreConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_badge_disabled() {
        assert!(!CoreConfig::default().blockchain_badge);
        assert!(!CoreConfig::from_toml("").unwrap().blockchain_badge);
    }

    #[test]
    fn parses_badge_toggle() {
        let config = CoreConfig::from_toml("blockchain_badge = true").unwrap();
        assert!(config.blockchain_badge);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(CoreConfig::from_toml("blockchain_badge = ").is_err());
    }
}
