//! Writer configuration.

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

/// Settings that shape how a [`SqlWriter`](crate::SqlWriter) renders statements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Target dialect.
    pub dialect: Dialect,
    /// Substitute physical table and column names from the schema map.
    ///
    /// When false, every logical name is written verbatim.
    pub resolve_names: bool,
}

impl WriterConfig {
    /// Creates a configuration for the given dialect with name resolution off.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            resolve_names: false,
        }
    }

    /// Enables or disables physical name substitution.
    #[must_use]
    pub const fn resolve_names(mut self, enabled: bool) -> Self {
        self.resolve_names = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WriterConfig::default();
        assert_eq!(config.dialect, Dialect::MySql);
        assert!(!config.resolve_names);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: WriterConfig = serde_json::from_str(r#"{"dialect": "microsoft"}"#).unwrap();
        assert_eq!(config, WriterConfig::new(Dialect::Microsoft));
    }

    #[test]
    fn test_deserialize_full() {
        let config: WriterConfig =
            serde_json::from_str(r#"{"dialect": "postgresql", "resolve_names": true}"#).unwrap();
        assert_eq!(config.dialect, Dialect::PostgreSql);
        assert!(config.resolve_names);
    }

    #[test]
    fn test_deserialize_unknown_dialect_fails() {
        let result = serde_json::from_str::<WriterConfig>(r#"{"dialect": "sybase"}"#);
        assert!(result.is_err());
    }
}
