//! Client configuration with persistence.
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/lora/config.json`
//! - macOS: `~/Library/Application Support/lora/config.json`
//! - Windows: `%APPDATA%/lora/config.json`
//!
//! # Example
//!
//! ```no_run
//! use lora_client::codec::IntDecoding;
//! use lora_client::config::ClientConfig;
//!
//! let mut config = ClientConfig::load();
//! config.int_decoding = IntDecoding::Mixed;
//! config.save().expect("Failed to save config");
//! ```

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::{IndexerClient, NodeClient};
use crate::codec::IntDecoding;
use crate::domain::NetworkConfig;

// ============================================================================
// Constants
// ============================================================================

/// Application name used for configuration directory.
const APP_NAME: &str = "lora";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// ClientConfig
// ============================================================================

/// Persisted client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Network the clients connect to.
    #[serde(default)]
    pub network: NetworkConfig,
    /// Default integer decoding policy for new clients.
    #[serde(default)]
    pub int_decoding: IntDecoding,
}

impl ClientConfig {
    /// Returns the path to the configuration file, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration, falling back to defaults on any failure.
    #[must_use]
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!("Config load failed, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Attempts to load the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined, the file cannot be
    /// read, or its content is not a valid configuration.
    pub fn try_load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file cannot
    /// be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Node client for the configured network and decoding policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn node_client(&self) -> Result<NodeClient> {
        let mut client = NodeClient::for_network(&self.network).map_err(|e| e.into_report())?;
        client.set_int_decoding(self.int_decoding);
        Ok(client)
    }

    /// Indexer client for the configured network and decoding policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn indexer_client(&self) -> Result<IndexerClient> {
        let mut client = IndexerClient::for_network(&self.network).map_err(|e| e.into_report())?;
        client.set_int_decoding(self.int_decoding);
        Ok(client)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomNetwork, Network};
    use rstest::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lora-config-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.network, NetworkConfig::BuiltIn(Network::MainNet));
        assert_eq!(config.int_decoding, IntDecoding::Default);
    }

    #[test]
    fn test_json_format() {
        let config = ClientConfig {
            network: NetworkConfig::BuiltIn(Network::TestNet),
            int_decoding: IntDecoding::BigInt,
        };
        let json = serde_json::to_string(&config).unwrap();
        insta::assert_snapshot!(json, @r#"{"network":"TestNet","int_decoding":"bigint"}"#);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"int_decoding":"safe"}"#).unwrap();
        assert_eq!(config.network, NetworkConfig::default());
        assert_eq!(config.int_decoding, IntDecoding::Safe);

        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_unknown_decoding_mode_is_rejected() {
        let result: Result<ClientConfig, _> = serde_json::from_str(r#"{"int_decoding":"fast"}"#);
        assert!(result.is_err());
    }

    #[rstest]
    #[case::mainnet(Network::MainNet, IntDecoding::Default)]
    #[case::testnet(Network::TestNet, IntDecoding::Safe)]
    #[case::localnet(Network::LocalNet, IntDecoding::Mixed)]
    fn test_save_and_load(#[case] network: Network, #[case] int_decoding: IntDecoding) {
        let path = temp_path(network.as_str());
        let config = ClientConfig {
            network: NetworkConfig::BuiltIn(network),
            int_decoding,
        };

        config.save_to(&path).unwrap();
        let loaded = ClientConfig::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_custom_network_persists() {
        let path = temp_path("custom");
        let config = ClientConfig {
            network: NetworkConfig::Custom(
                CustomNetwork::new("private", "http://algod:4001", "http://indexer:8980")
                    .with_algod_token("a-token"),
            ),
            int_decoding: IntDecoding::BigInt,
        };

        config.save_to(&path).unwrap();
        let loaded = ClientConfig::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.network.algod_token(), Some("a-token"));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        assert!(ClientConfig::load_from(&temp_path("missing")).is_err());
    }

    #[test]
    fn test_clients_inherit_config() {
        let config = ClientConfig {
            network: NetworkConfig::BuiltIn(Network::TestNet),
            int_decoding: IntDecoding::Mixed,
        };

        let node = config.node_client().unwrap();
        assert_eq!(node.base_url(), "https://testnet-api.algonode.cloud");
        assert_eq!(node.int_decoding(), IntDecoding::Mixed);

        let indexer = config.indexer_client().unwrap();
        assert_eq!(indexer.base_url(), "https://testnet-idx.algonode.cloud");
        assert_eq!(indexer.int_decoding(), IntDecoding::Mixed);
    }
}
