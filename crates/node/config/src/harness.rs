//! Top-level harness configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ChainConfig, ConfigError, ExecutionConfig};

/// Complete harness configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Chain, block and transaction parameters.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Engine parameters.
    #[serde(default)]
    pub execution: ExecutionConfig,
}

impl HarnessConfig {
    /// Load configuration from a file path, auto-detecting format by extension.
    ///
    /// If the path is `None`, returns the default configuration.
    /// `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            None => Self::default(),
            Some(p) => match p.extension().and_then(|e| e.to_str()) {
                Some("json") => Self::from_json_file(p)?,
                _ => Self::from_toml_file(p)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read { path: path.into(), source: e })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read { path: path.into(), source: e })?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the engine could never accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.execution.max_stack_depth == 0 {
            return Err(ConfigError::Invalid("max_stack_depth must be non-zero".into()));
        }
        if self.chain.tx_gas_limit > self.chain.block_gas_limit {
            return Err(ConfigError::Invalid(format!(
                "tx_gas_limit {} exceeds block_gas_limit {}",
                self.chain.tx_gas_limit, self.chain.block_gas_limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};

    use super::*;
    use crate::{
        DEFAULT_CHAIN_ID, DEFAULT_MAX_STACK_DEPTH, DEFAULT_NAMESPACE, GasSchedule, NamespaceScheme,
    };

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.chain.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.execution.max_stack_depth, DEFAULT_MAX_STACK_DEPTH);
        assert_eq!(config.execution.gas_schedule, GasSchedule::Cancun);
        assert_eq!(
            config.execution.namespace,
            NamespaceScheme::Fixed { address: DEFAULT_NAMESPACE }
        );
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = HarnessConfig::default();
        config.chain.difficulty = U256::from(7);
        config.execution.namespace = NamespaceScheme::CodeHash;
        let toml_str = config.to_toml().unwrap();
        let parsed = HarnessConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = HarnessConfig::default();
        let json_str = config.to_json().unwrap();
        let parsed = HarnessConfig::from_json(&json_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = HarnessConfig::from_toml(
            r#"
            [chain]
            chain_id = 5

            [execution]
            gas_schedule = "london"
            namespace = { scheme = "fixed", address = "0x00000000000000000000000000000000000000ff" }
            "#,
        )
        .unwrap();

        assert_eq!(config.chain.chain_id, 5);
        assert_eq!(config.chain.tx_gas_limit, 0xff_ffff);
        assert_eq!(config.execution.gas_schedule, GasSchedule::London);
        assert_eq!(
            config.execution.namespace,
            NamespaceScheme::Fixed { address: Address::with_last_byte(0xff) }
        );
    }

    #[test]
    fn test_load_none_returns_default() {
        let config = HarnessConfig::load(None).unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness.toml");
        let mut expected = HarnessConfig::default();
        expected.chain.chain_id = 42;
        std::fs::write(&path, expected.to_toml().unwrap()).unwrap();

        let loaded = HarnessConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.chain.chain_id, 42);
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness.json");
        let mut expected = HarnessConfig::default();
        expected.chain.chain_id = 99;
        std::fs::write(&path, expected.to_json().unwrap()).unwrap();

        let loaded = HarnessConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.chain.chain_id, 99);
    }

    #[test]
    fn test_load_unknown_extension_defaults_to_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness.conf");
        let mut expected = HarnessConfig::default();
        expected.chain.chain_id = 77;
        std::fs::write(&path, expected.to_toml().unwrap()).unwrap();

        let loaded = HarnessConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.chain.chain_id, 77);

        std::fs::write(&path, expected.to_json().unwrap()).unwrap();
        assert!(matches!(HarnessConfig::load(Some(&path)), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.toml");
        assert!(matches!(HarnessConfig::load(Some(&path)), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_stack_depth() {
        let mut config = HarnessConfig::default();
        config.execution.max_stack_depth = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_tx_gas_above_block_gas() {
        let mut config = HarnessConfig::default();
        config.chain.tx_gas_limit = config.chain.block_gas_limit + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
