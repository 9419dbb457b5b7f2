//! Domain types for the Lora Algorand client.
//!
//! # Module Organization
//!
//! - [`error`] - Decode, validation and client error types
//! - [`network`] - Network configuration (MainNet, TestNet, LocalNet, custom)
//! - [`params`] - Suggested transaction parameters
//! - [`address`] - Address encoding and validation
//! - [`transaction`] - Transaction drafts and their resolution

// ============================================================================
// Module Declarations
// ============================================================================

pub mod address;
pub mod error;
pub mod network;
pub mod params;
pub mod transaction;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::{AlgoError, DecodeError, JsonPath, PathSegment, ValidationError};

// Network types
pub use network::{CustomNetwork, Network, NetworkConfig};

// Parameters
pub use params::SuggestedParams;

// Addresses
pub use address::{AddressValidator, AlgorandAddressValidator, decode_address, encode_address};

// Transaction types
pub use transaction::{
    AppCallFields, AssetConfigFields, AssetFreezeFields, AssetTransferFields, KeyRegFields,
    OnComplete, PaymentFields, PessimisticSizeEstimator, ResolvedTransaction, SizeEstimator,
    StateSchema, TransactionDraft, TransactionKind, TransactionResolver, TxnType, ValidityWindow,
    resolve,
};
