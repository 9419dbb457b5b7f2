//! Precision-safe client for Algorand's algod and indexer REST APIs.
//!
//! - [`codec`] decodes JSON under a caller-chosen [`codec::IntDecoding`]
//!   policy so 64-bit balances, fees and rounds are never silently rounded.
//! - [`domain::transaction`] resolves transaction drafts against
//!   [`domain::SuggestedParams`], validating fields and computing the fee.
//! - [`client`] builds and executes algod and indexer requests.
//! - [`config`] persists the selected network and default decoding policy.

pub mod client;
pub mod codec;
pub mod config;
pub mod constants;
pub mod domain;

#[cfg(test)]
mod test_utils;

pub use client::{IndexerClient, JsonRequest, NodeClient};
pub use codec::{DecodedValue, IntDecoding, decode, decode_with_mode};
pub use config::ClientConfig;
pub use domain::{
    AlgoError, DecodeError, SuggestedParams, TransactionDraft, TransactionResolver,
    ValidationError, resolve,
};
