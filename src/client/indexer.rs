//! Algorand Indexer API client.
//!
//! The indexer provides historical data about accounts, assets, and applications.

use crate::codec::IntDecoding;
use crate::constants::INDEXER_TOKEN_HEADER;
use crate::domain::{AlgoError, Network, NetworkConfig};

use super::http::{HttpClient, ServiceEndpoint};
use super::request::JsonRequest;

// ============================================================================
// Indexer Client
// ============================================================================

/// Algorand Indexer client
#[derive(Debug, Clone)]
pub struct IndexerClient {
    service: ServiceEndpoint,
}

impl IndexerClient {
    /// Create a new indexer client
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::ClientInit` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, AlgoError> {
        Ok(Self::with_http(HttpClient::new()?, base_url, token))
    }

    /// Create an indexer client on an existing HTTP client
    #[must_use]
    pub fn with_http(http: HttpClient, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            service: ServiceEndpoint::new(http, base_url, INDEXER_TOKEN_HEADER, token),
        }
    }

    /// Create an indexer client for a configured network
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::ClientInit` if the HTTP client cannot be built.
    pub fn for_network(network: &NetworkConfig) -> Result<Self, AlgoError> {
        Self::new(network.indexer_url(), network.indexer_token().map(str::to_string))
    }

    /// Create a new indexer client for LocalNet
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::ClientInit` if the HTTP client cannot be built.
    pub fn localnet() -> Result<Self, AlgoError> {
        Self::for_network(&NetworkConfig::BuiltIn(Network::LocalNet))
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.service.base_url()
    }

    /// Default decoding policy for requests from this client
    #[must_use]
    pub const fn int_decoding(&self) -> IntDecoding {
        self.service.int_decoding()
    }

    /// Change the default decoding policy for subsequent requests
    pub fn set_int_decoding(&mut self, policy: IntDecoding) {
        self.service.set_int_decoding(policy);
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    pub fn health(&self) -> JsonRequest<'_> {
        self.service.request("/health")
    }

    pub fn lookup_account_by_id(&self, address: &str) -> JsonRequest<'_> {
        self.service.request(format!("/v2/accounts/{address}"))
    }

    pub fn lookup_applications(&self, app_id: u64) -> JsonRequest<'_> {
        self.service.request(format!("/v2/applications/{app_id}"))
    }

    pub fn lookup_asset_by_id(&self, asset_id: u64) -> JsonRequest<'_> {
        self.service.request(format!("/v2/assets/{asset_id}"))
    }

    /// Search applications; [`JsonRequest::index`] filters by application ID.
    pub fn search_for_applications(&self) -> JsonRequest<'_> {
        self.service
            .request("/v2/applications")
            .with_index_key("application-id")
    }

    /// Search assets; [`JsonRequest::index`] filters by asset ID.
    pub fn search_for_assets(&self) -> JsonRequest<'_> {
        self.service.request("/v2/assets").with_index_key("asset-id")
    }

    /// Search accounts; [`JsonRequest::index`] filters by held asset ID.
    pub fn search_accounts(&self) -> JsonRequest<'_> {
        self.service.request("/v2/accounts").with_index_key("asset-id")
    }
}

// ============================================================================
// Tests
// ============================================================================
