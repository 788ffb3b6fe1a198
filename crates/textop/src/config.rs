//! Document behaviour knobs.
//!
//! ```toml
//! delete_mismatch = "reject"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do with a delete whose expected text is not at its target range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMismatchPolicy {
    /// Log a warning, leave the text untouched, still record the op.
    #[default]
    Skip,
    /// Fail the apply with [`crate::DocumentError::DeleteMismatch`].
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    pub delete_mismatch: DeleteMismatchPolicy,
}

impl DocumentConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_defaults() {
        let config = DocumentConfig::from_toml_str("").unwrap();
        assert_eq!(config.delete_mismatch, DeleteMismatchPolicy::Skip);
    }

    #[test]
    fn reads_reject_policy() {
        let config = DocumentConfig::from_toml_str("delete_mismatch = \"reject\"").unwrap();
        assert_eq!(config.delete_mismatch, DeleteMismatchPolicy::Reject);
    }

    #[test]
    fn unknown_keys_are_errors() {
        let err = DocumentConfig::from_toml_str("delete_policy = \"skip\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(DocumentConfig::from_toml_str("delete_mismatch = \"fix\"").is_err());
    }
}
