//! Algorand Node (algod) API client.
//!
//! The algod client provides access to the current state of the blockchain
//! including network status, account balances and the suggested parameters
//! for new transactions.

use crate::codec::IntDecoding;
use crate::constants::ALGOD_TOKEN_HEADER;
use crate::domain::{AlgoError, Network, NetworkConfig, SuggestedParams};

use super::http::{HttpClient, ServiceEndpoint};
use super::request::JsonRequest;

// ============================================================================
// Node Client
// ============================================================================

/// Algorand Node (algod) client
#[derive(Debug, Clone)]
pub struct NodeClient {
    service: ServiceEndpoint,
}

impl NodeClient {
    /// Create a new node client
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::ClientInit` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, AlgoError> {
        Ok(Self::with_http(HttpClient::new()?, base_url, token))
    }

    /// Create a node client on an existing HTTP client
    #[must_use]
    pub fn with_http(http: HttpClient, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            service: ServiceEndpoint::new(http, base_url, ALGOD_TOKEN_HEADER, token),
        }
    }

    /// Create a node client for a configured network
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::ClientInit` if the HTTP client cannot be built.
    pub fn for_network(network: &NetworkConfig) -> Result<Self, AlgoError> {
        Self::new(network.algod_url(), network.algod_token().map(str::to_string))
    }

    /// Create a new node client for LocalNet
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

    pub fn versions(&self) -> JsonRequest<'_> {
        self.service.request("/versions")
    }

    pub fn status(&self) -> JsonRequest<'_> {
        self.service.request("/v2/status")
    }

    /// Waits until the node has seen a block after `round`.
    pub fn status_after_block(&self, round: u64) -> JsonRequest<'_> {
        self.service
            .request(format!("/v2/status/wait-for-block-after/{round}"))
    }

    pub fn account_information(&self, address: &str) -> JsonRequest<'_> {
        self.service.request(format!("/v2/accounts/{address}"))
    }

    pub fn asset_by_id(&self, asset_id: u64) -> JsonRequest<'_> {
        self.service.request(format!("/v2/assets/{asset_id}"))
    }

    pub fn application_by_id(&self, app_id: u64) -> JsonRequest<'_> {
        self.service.request(format!("/v2/applications/{app_id}"))
    }

    pub fn supply(&self) -> JsonRequest<'_> {
        self.service.request("/v2/ledger/supply")
    }

    pub fn transaction_params(&self) -> JsonRequest<'_> {
        self.service.request("/v2/transactions/params")
    }

    /// Fetch `/v2/transactions/params` and convert it to [`SuggestedParams`].
    ///
    /// # Errors
    ///
    /// Returns any error from [`JsonRequest::execute`], or `AlgoError::Parse`
    /// if the body lacks a required field.
    pub async fn suggested_params(&self) -> Result<SuggestedParams, AlgoError> {
        let body = self.transaction_params().execute().await?;
        let params = SuggestedParams::from_node_response(&body)?;

        tracing::debug!(
            first_round = params.first_round,
            last_round = params.last_round,
            genesis_id = %params.genesis_id,
            "Fetched suggested params"
        );

        Ok(params)
    }
}

// ============================================================================
// Tests
// ============================================================================
