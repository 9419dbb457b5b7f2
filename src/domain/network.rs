//! Network configuration for Algorand networks.
//!
//! This module defines the built-in Algorand networks, user-defined custom
//! networks, and the API endpoints and tokens each one resolves to.

use serde::{Deserialize, Serialize};

use crate::constants::LOCALNET_API_TOKEN;

// ============================================================================
// Built-in Networks
// ============================================================================

/// Algorand network variants.
///
/// Represents the different Algorand networks that can be connected to,
/// each with its own set of API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(clippy::enum_variant_names)]
pub enum Network {
    /// Algorand MainNet - the production network.
    #[default]
    MainNet,
    /// Algorand TestNet - the test network for development.
    TestNet,
    /// LocalNet - a local development network.
    LocalNet,
}

impl Network {
    /// Returns the human-readable name of the network.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MainNet => "MainNet",
            Self::TestNet => "TestNet",
            Self::LocalNet => "LocalNet",
        }
    }

    /// Returns the indexer API URL for this network.
    #[must_use]
    pub const fn indexer_url(&self) -> &'static str {
        match self {
            Self::MainNet => "https://mainnet-idx.algonode.cloud",
            Self::TestNet => "https://testnet-idx.algonode.cloud",
            Self::LocalNet => "http://localhost:8980",
        }
    }

    /// Returns the algod API URL for this network.
    #[must_use]
    pub const fn algod_url(&self) -> &'static str {
        match self {
            Self::MainNet => "https://mainnet-api.algonode.cloud",
            Self::TestNet => "https://testnet-api.algonode.cloud",
            Self::LocalNet => "http://localhost:4001",
        }
    }

    /// Returns the API token the network expects, if any.
    ///
    /// Public algonode endpoints are unauthenticated; LocalNet uses the
    /// well-known development token.
    #[must_use]
    pub const fn api_token(&self) -> Option<&'static str> {
        match self {
            Self::LocalNet => Some(LOCALNET_API_TOKEN),
            Self::MainNet | Self::TestNet => None,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Self::MainNet),
            "testnet" => Ok(Self::TestNet),
            "localnet" => Ok(Self::LocalNet),
            _ => Err(format!("unknown network '{s}', expected mainnet, testnet or localnet")),
        }
    }
}

// ============================================================================
// Custom Networks
// ============================================================================

/// A user-defined network with explicit endpoints and tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomNetwork {
    /// Display name.
    pub name: String,
    /// Algod base URL.
    pub algod_url: String,
    /// Indexer base URL.
    pub indexer_url: String,
    /// Token sent as `X-Algo-API-Token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algod_token: Option<String>,
    /// Token sent as `X-Indexer-API-Token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer_token: Option<String>,
}

impl CustomNetwork {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        algod_url: impl Into<String>,
        indexer_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            algod_url: algod_url.into(),
            indexer_url: indexer_url.into(),
            algod_token: None,
            indexer_token: None,
        }
    }

    #[must_use]
    pub fn with_algod_token(mut self, token: impl Into<String>) -> Self {
        self.algod_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_indexer_token(mut self, token: impl Into<String>) -> Self {
        self.indexer_token = Some(token.into());
        self
    }
}

// ============================================================================
// Network Selection
// ============================================================================

/// Either a built-in network or a custom one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkConfig {
    BuiltIn(Network),
    Custom(CustomNetwork),
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::BuiltIn(Network::default())
    }
}

impl NetworkConfig {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::BuiltIn(network) => network.as_str(),
            Self::Custom(custom) => &custom.name,
        }
    }

    #[must_use]
    pub fn algod_url(&self) -> &str {
        match self {
            Self::BuiltIn(network) => network.algod_url(),
            Self::Custom(custom) => &custom.algod_url,
        }
    }

    #[must_use]
    pub fn indexer_url(&self) -> &str {
        match self {
            Self::BuiltIn(network) => network.indexer_url(),
            Self::Custom(custom) => &custom.indexer_url,
        }
    }

    #[must_use]
    pub fn algod_token(&self) -> Option<&str> {
        match self {
            Self::BuiltIn(network) => network.api_token(),
            Self::Custom(custom) => custom.algod_token.as_deref(),
        }
    }

    #[must_use]
    pub fn indexer_token(&self) -> Option<&str> {
        match self {
            Self::BuiltIn(network) => network.api_token(),
            Self::Custom(custom) => custom.indexer_token.as_deref(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_as_str() {
        assert_eq!(Network::MainNet.as_str(), "MainNet");
        assert_eq!(Network::TestNet.as_str(), "TestNet");
        assert_eq!(Network::LocalNet.as_str(), "LocalNet");
    }

    #[test]
    fn test_network_urls() {
        assert!(Network::MainNet.indexer_url().contains("mainnet"));
        assert!(Network::TestNet.algod_url().contains("testnet"));
        assert!(Network::LocalNet.algod_url().contains("localhost"));
    }

    #[test]
    fn test_api_token() {
        assert_eq!(Network::LocalNet.api_token(), Some(LOCALNET_API_TOKEN));
        assert!(Network::MainNet.api_token().is_none());
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("TestNet".parse::<Network>(), Ok(Network::TestNet));
        assert_eq!("localnet".parse::<Network>(), Ok(Network::LocalNet));
        assert!("betanet".parse::<Network>().is_err());
    }

    #[test]
    fn test_network_config_resolves_endpoints() {
        let builtin = NetworkConfig::BuiltIn(Network::LocalNet);
        assert_eq!(builtin.name(), "LocalNet");
        assert_eq!(builtin.algod_url(), "http://localhost:4001");
        assert_eq!(builtin.indexer_token(), Some(LOCALNET_API_TOKEN));

        let custom = NetworkConfig::Custom(
            CustomNetwork::new("Private", "http://algod:8080", "http://idx:8980")
                .with_algod_token("secret"),
        );
        assert_eq!(custom.name(), "Private");
        assert_eq!(custom.algod_token(), Some("secret"));
        assert!(custom.indexer_token().is_none());
    }

    #[test]
    fn test_network_config_serialization() {
        let builtin = NetworkConfig::BuiltIn(Network::TestNet);
        let json = serde_json::to_string(&builtin).unwrap();
        assert_eq!(json, "\"TestNet\"");
        assert_eq!(serde_json::from_str::<NetworkConfig>(&json).unwrap(), builtin);

        let custom = NetworkConfig::Custom(CustomNetwork::new("C", "http://a", "http://i"));
        let json = serde_json::to_string(&custom).unwrap();
        assert_eq!(serde_json::from_str::<NetworkConfig>(&json).unwrap(), custom);
    }
}
