//! HTTP clients for Algorand network APIs.
//!
//! This module provides clients for interacting with:
//! - Algorand Node (algod) - current blockchain state and suggested params
//! - Algorand Indexer - historical data queries
//!
//! Every endpoint returns a [`JsonRequest`] that can be refined with query
//! parameters and a per-request [`crate::codec::IntDecoding`] before it is
//! executed.
//!
//! # Example
//!
//! ```no_run
//! use lora_client::client::{IndexerClient, NodeClient};
//! use lora_client::codec::IntDecoding;
//! use lora_client::domain::{Network, NetworkConfig};
//!
//! # async fn run() -> Result<(), lora_client::domain::AlgoError> {
//! let network = NetworkConfig::BuiltIn(Network::TestNet);
//! let node = NodeClient::for_network(&network)?;
//! let params = node.suggested_params().await?;
//!
//! let indexer = IndexerClient::for_network(&network)?;
//! let account = indexer
//!     .lookup_account_by_id("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ")
//!     .round(params.first_round)
//!     .int_decoding(IntDecoding::BigInt)
//!     .execute()
//!     .await?;
//! # let _ = account;
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod indexer;
pub mod node;
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::{HttpClient, HttpConfig, ServiceEndpoint};
pub use indexer::IndexerClient;
pub use node::NodeClient;
pub use request::JsonRequest;
