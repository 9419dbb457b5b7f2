//! Protocol and API constants for the Lora client.
//!
//! Values here mirror the Algorand consensus parameters that transaction
//! validation depends on, plus the handful of API defaults the HTTP clients use.

// ============================================================================
// Numeric Precision
// ============================================================================

/// Largest integer magnitude an `f64` can hold without rounding (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Decimal text of [`MAX_SAFE_INTEGER`], used for exact literal comparison.
pub const MAX_SAFE_INTEGER_TEXT: &str = "9007199254740991";

// ============================================================================
// Fees and Validity
// ============================================================================

/// Protocol minimum transaction fee in microAlgos.
pub const MIN_TX_FEE: u64 = 1000;

/// Number of rounds a transaction stays valid when built from node params.
pub const DEFAULT_VALIDITY_WINDOW: u64 = 1000;

/// Bytes added to a size estimate to account for the signature envelope.
pub const SIGNATURE_OVERHEAD_BYTES: u64 = 75;

// ============================================================================
// Field Lengths
// ============================================================================

/// Length of a textual Algorand address (base32, no padding).
pub const ADDRESS_LENGTH: usize = 58;

/// Length of a raw public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of the address checksum suffix.
pub const CHECKSUM_LENGTH: usize = 4;

/// Length of the genesis hash.
pub const GENESIS_HASH_LENGTH: usize = 32;

/// Required length of a transaction lease.
pub const LEASE_LENGTH: usize = 32;

/// Required length of an asset metadata hash.
pub const METADATA_HASH_LENGTH: usize = 32;

/// Maximum note size in bytes.
pub const MAX_NOTE_LENGTH: usize = 1024;

/// Required length of vote and selection participation keys.
pub const PARTICIPATION_KEY_LENGTH: usize = 32;

/// Required length of a state proof participation key.
pub const STATE_PROOF_KEY_LENGTH: usize = 64;

// ============================================================================
// Asset Limits
// ============================================================================

/// Maximum number of decimals an asset may declare.
pub const MAX_ASSET_DECIMALS: u32 = 19;

/// Maximum asset unit name length in bytes.
pub const MAX_ASSET_UNIT_NAME_LENGTH: usize = 8;

/// Maximum asset name length in bytes.
pub const MAX_ASSET_NAME_LENGTH: usize = 32;

/// Maximum asset URL length in bytes.
pub const MAX_ASSET_URL_LENGTH: usize = 96;

// ============================================================================
// Application Limits
// ============================================================================

/// Maximum number of application arguments.
pub const MAX_APP_ARGS: usize = 16;

/// Maximum combined length of all application arguments.
pub const MAX_APP_TOTAL_ARG_LENGTH: usize = 2048;

/// Maximum number of foreign accounts on an application call.
pub const MAX_APP_ACCOUNTS: usize = 4;

/// Maximum number of accounts, apps and assets referenced together.
pub const MAX_APP_TOTAL_REFERENCES: usize = 8;

/// Maximum extra program pages an application may request.
pub const MAX_EXTRA_PROGRAM_PAGES: u32 = 3;

/// Maximum number of global state entries.
pub const MAX_GLOBAL_SCHEMA_ENTRIES: u64 = 64;

/// Maximum number of local state entries.
pub const MAX_LOCAL_SCHEMA_ENTRIES: u64 = 16;

// ============================================================================
// API Defaults
// ============================================================================

/// Default timeout for HTTP requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// LocalNet API token (used for development).
pub const LOCALNET_API_TOKEN: &str =
    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Header name for algod API token.
pub const ALGOD_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Header name for indexer API token.
pub const INDEXER_TOKEN_HEADER: &str = "X-Indexer-API-Token";
