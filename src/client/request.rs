//! JSON request builder shared by the node and indexer clients.
//!
//! A [`JsonRequest`] carries the endpoint path, its query parameters and an
//! optional decoding policy. It can be turned into a [`reqwest::Request`]
//! without sending ([`JsonRequest::build`]) or sent and decoded in one step
//! ([`JsonRequest::execute`]).

use crate::codec::{DecodedValue, IntDecoding, decode};
use crate::domain::AlgoError;

use super::http::ServiceEndpoint;

/// A pending GET request against an algod or indexer endpoint.
#[derive(Debug, Clone)]
#[must_use = "requests do nothing until built or executed"]
pub struct JsonRequest<'a> {
    service: &'a ServiceEndpoint,
    path: String,
    query: Vec<(String, String)>,
    index_key: Option<&'static str>,
    int_decoding: Option<IntDecoding>,
}

impl<'a> JsonRequest<'a> {
    pub(crate) fn new(service: &'a ServiceEndpoint, path: impl Into<String>) -> Self {
        Self {
            service,
            path: path.into(),
            query: Vec::new(),
            index_key: None,
            int_decoding: None,
        }
    }

    /// Name of the query parameter written by [`JsonRequest::index`].
    pub(crate) fn with_index_key(mut self, key: &'static str) -> Self {
        self.index_key = Some(key);
        self
    }

    /// Endpoint path relative to the service base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Set a query parameter, replacing any earlier value for the key.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Restrict results to the state at `round`.
    pub fn round(self, round: u64) -> Self {
        self.query("round", round)
    }

    /// Maximum number of results.
    pub fn limit(self, limit: u64) -> Self {
        self.query("limit", limit)
    }

    /// Resume a paged search.
    pub fn next_token(self, token: impl Into<String>) -> Self {
        self.query("next", token.into())
    }

    /// Filter a search by its primary ID (application or asset).
    ///
    /// Endpoints without a primary ID filter, such as lookups and every node
    /// endpoint, leave the query unchanged.
    pub fn index(self, id: u64) -> Self {
        match self.index_key {
            Some(key) => self.query(key, id),
            None => {
                tracing::warn!(path = %self.path, id, "Endpoint has no index filter, ignoring");
                self
            }
        }
    }

    /// Filter by asset ID.
    pub fn asset_id(self, id: u64) -> Self {
        self.query("asset-id", id)
    }

    /// Filter by application ID.
    pub fn application_id(self, id: u64) -> Self {
        self.query("application-id", id)
    }

    /// Include deleted entities in the results.
    pub fn include_all(self, include: bool) -> Self {
        self.query("include-all", include)
    }

    /// Override the client's decoding policy for this request only.
    pub fn int_decoding(mut self, policy: IntDecoding) -> Self {
        self.int_decoding = Some(policy);
        self
    }

    /// Policy this request decodes with.
    #[must_use]
    pub fn policy(&self) -> IntDecoding {
        self.int_decoding.unwrap_or_else(|| self.service.int_decoding())
    }

    /// Build the HTTP request without sending it.
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::Network` if the URL or headers are malformed.
    pub fn build(&self) -> Result<reqwest::Request, AlgoError> {
        self.service
            .get(&self.path)
            .query(&self.query)
            .build()
            .map_err(AlgoError::Network)
    }

    /// Send the request and decode the body under [`JsonRequest::policy`].
    ///
    /// An empty body (algod's `/health`) decodes to `null`.
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::Network` on transport failure, `AlgoError::Status`
    /// for non-2xx responses and `AlgoError::Decode` if the body does not
    /// decode under the policy.
    pub async fn execute(&self) -> Result<DecodedValue, AlgoError> {
        let request = self.build()?;
        let policy = self.policy();

        tracing::debug!(url = %request.url(), %policy, "Dispatching request");

        let response = self.service.http().inner().execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(path = %self.path, status = status.as_u16(), "Request failed");
            return Err(AlgoError::status(status.as_u16(), body));
        }

        if body.trim().is_empty() {
            return Ok(DecodedValue::Null);
        }

        Ok(decode(&body, policy)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
