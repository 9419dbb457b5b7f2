//! Type-specific transaction field groups.
//!
//! Each transaction type carries its own struct, so a draft can only hold
//! the fields that make sense for its type.

use crate::domain::error::ValidationError;

// ============================================================================
// Transaction Type
// ============================================================================

/// Algorand transaction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxnType {
    /// Payment transaction - transfers Algos between accounts.
    Payment,
    /// Key registration - registers participation keys.
    KeyReg,
    /// Asset configuration - creates, modifies, or destroys ASAs.
    AssetConfig,
    /// Asset transfer - transfers ASAs between accounts.
    AssetTransfer,
    /// Asset freeze - freezes or unfreezes asset holdings.
    AssetFreeze,
    /// Application call - interacts with smart contracts.
    AppCall,
}

impl TxnType {
    /// Returns the protocol type code (`pay`, `keyreg`, ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "pay",
            Self::KeyReg => "keyreg",
            Self::AssetConfig => "acfg",
            Self::AssetTransfer => "axfer",
            Self::AssetFreeze => "afrz",
            Self::AppCall => "appl",
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// On Complete Type
// ============================================================================

/// Application call on-completion type.
///
/// Specifies what action to take after the application call completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnComplete {
    /// No additional action (default).
    #[default]
    NoOp = 0,
    /// Opt the sender into the application.
    OptIn = 1,
    /// Close out the sender's local state.
    CloseOut = 2,
    /// Clear the sender's local state (cannot be rejected).
    ClearState = 3,
    /// Update the application's programs.
    UpdateApplication = 4,
    /// Delete the application.
    DeleteApplication = 5,
}

impl OnComplete {
    /// Returns the string representation of the on-complete type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoOp => "NoOp",
            Self::OptIn => "OptIn",
            Self::CloseOut => "CloseOut",
            Self::ClearState => "ClearState",
            Self::UpdateApplication => "Update",
            Self::DeleteApplication => "Delete",
        }
    }
}

impl TryFrom<u64> for OnComplete {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoOp),
            1 => Ok(Self::OptIn),
            2 => Ok(Self::CloseOut),
            3 => Ok(Self::ClearState),
            4 => Ok(Self::UpdateApplication),
            5 => Ok(Self::DeleteApplication),
            other => Err(ValidationError::new(
                "on_complete",
                format!("{other} is not a valid OnApplicationComplete value (0-5)"),
            )),
        }
    }
}

impl std::fmt::Display for OnComplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// State Schema
// ============================================================================

/// State schema for application storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateSchema {
    /// Number of uint64 values.
    pub num_uint: u64,
    /// Number of byte slice values.
    pub num_byte_slice: u64,
}

impl StateSchema {
    #[must_use]
    pub const fn new(num_uint: u64, num_byte_slice: u64) -> Self {
        Self {
            num_uint,
            num_byte_slice,
        }
    }

    /// Total number of entries, saturating on overflow.
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.num_uint.saturating_add(self.num_byte_slice)
    }
}

// ============================================================================
// Payment
// ============================================================================

/// Payment fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentFields {
    /// Address receiving the payment.
    pub receiver: String,
    /// Amount in microAlgos.
    pub amount: u64,
    /// Address to receive remaining funds when closing out.
    pub close_remainder_to: Option<String>,
}

// ============================================================================
// Key Registration
// ============================================================================

/// Key registration fields.
///
/// Leaving every participation field unset marks the account offline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyRegFields {
    /// Voting public key (32 bytes).
    pub vote_key: Option<Vec<u8>>,
    /// VRF selection public key (32 bytes).
    pub selection_key: Option<Vec<u8>>,
    /// State proof public key (64 bytes).
    pub state_proof_key: Option<Vec<u8>>,
    /// First round for which the voting key is valid.
    pub vote_first: Option<u64>,
    /// Last round for which the voting key is valid.
    pub vote_last: Option<u64>,
    /// Key dilution for the two-level participation key.
    pub vote_key_dilution: Option<u64>,
}

impl KeyRegFields {
    /// True if any online-registration field is set.
    #[must_use]
    pub fn registers_keys(&self) -> bool {
        self.vote_key.is_some()
            || self.selection_key.is_some()
            || self.state_proof_key.is_some()
            || self.vote_first.is_some()
            || self.vote_last.is_some()
            || self.vote_key_dilution.is_some()
    }
}

// ============================================================================
// Asset Config
// ============================================================================

/// Asset configuration fields for creation, reconfiguration or destruction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetConfigFields {
    /// Asset to reconfigure or destroy; `None` creates a new asset.
    pub asset_id: Option<u64>,
    /// Total number of base units.
    pub total: Option<u64>,
    /// Number of decimal places for display.
    pub decimals: u32,
    /// Whether holdings start frozen.
    pub default_frozen: bool,
    /// Asset unit name.
    pub unit_name: Option<String>,
    /// Asset name.
    pub asset_name: Option<String>,
    /// URL with asset metadata.
    pub url: Option<String>,
    /// Hash commitment to the metadata (32 bytes).
    pub metadata_hash: Option<Vec<u8>>,
    /// Manager address - can change asset config.
    pub manager: Option<String>,
    /// Reserve address - holds non-minted units.
    pub reserve: Option<String>,
    /// Freeze address - can freeze/unfreeze holdings.
    pub freeze: Option<String>,
    /// Clawback address - can revoke holdings.
    pub clawback: Option<String>,
}

impl AssetConfigFields {
    /// True when this draft creates a new asset.
    #[must_use]
    pub fn is_creation(&self) -> bool {
        matches!(self.asset_id, None | Some(0))
    }
}

// ============================================================================
// Asset Transfer
// ============================================================================

/// Asset transfer fields, including opt-in, clawback and close-out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetTransferFields {
    /// Asset being transferred.
    pub asset_id: u64,
    /// Amount in base units.
    pub amount: u64,
    /// Address receiving the asset.
    pub receiver: String,
    /// Address to receive remaining holdings when closing out.
    pub close_to: Option<String>,
    /// For clawback transactions, the address being clawed back from.
    pub revocation_target: Option<String>,
}

// ============================================================================
// Asset Freeze
// ============================================================================

/// Asset freeze fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetFreezeFields {
    /// Asset whose holding is (un)frozen.
    pub asset_id: u64,
    /// Address whose holding is (un)frozen.
    pub freeze_account: String,
    /// `true` to freeze, `false` to unfreeze.
    pub freeze_state: bool,
}

// ============================================================================
// Application Call
// ============================================================================

/// Application call fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppCallFields {
    /// Application ID (0 for creation).
    pub app_id: u64,
    /// Type of application call.
    pub on_complete: OnComplete,
    /// Local state schema, creation only.
    pub local_schema: Option<StateSchema>,
    /// Global state schema, creation only.
    pub global_schema: Option<StateSchema>,
    /// Compiled approval program.
    pub approval_program: Option<Vec<u8>>,
    /// Compiled clear state program.
    pub clear_program: Option<Vec<u8>>,
    /// Extra program pages, creation only.
    pub extra_pages: u32,
    /// Application arguments.
    pub args: Vec<Vec<u8>>,
    /// Referenced accounts.
    pub accounts: Vec<String>,
    /// Referenced applications.
    pub foreign_apps: Vec<u64>,
    /// Referenced assets.
    pub foreign_assets: Vec<u64>,
}

impl AppCallFields {
    /// True when this draft creates a new application.
    #[must_use]
    pub fn is_creation(&self) -> bool {
        self.app_id == 0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, OnComplete::NoOp)]
    #[case(1, OnComplete::OptIn)]
    #[case(2, OnComplete::CloseOut)]
    #[case(3, OnComplete::ClearState)]
    #[case(4, OnComplete::UpdateApplication)]
    #[case(5, OnComplete::DeleteApplication)]
    fn test_on_complete_from_raw(#[case] raw: u64, #[case] expected: OnComplete) {
        assert_eq!(OnComplete::try_from(raw).unwrap(), expected);
        assert_eq!(expected as u64, raw);
    }

    #[test]
    fn test_on_complete_rejects_unknown_value() {
        let err = OnComplete::try_from(6).unwrap_err();
        assert_eq!(err.field, "on_complete");
    }

    #[test]
    fn test_txn_type_codes() {
        assert_eq!(TxnType::Payment.as_str(), "pay");
        assert_eq!(TxnType::AppCall.to_string(), "appl");
        assert_eq!(TxnType::AssetFreeze.to_string(), "afrz");
    }

    #[test]
    fn test_creation_detection() {
        assert!(AssetConfigFields::default().is_creation());
        assert!(
            !AssetConfigFields {
                asset_id: Some(31566704),
                ..Default::default()
            }
            .is_creation()
        );
        assert!(AppCallFields::default().is_creation());
    }

    #[test]
    fn test_key_reg_offline_detection() {
        assert!(!KeyRegFields::default().registers_keys());
        let online = KeyRegFields {
            vote_first: Some(1),
            ..Default::default()
        };
        assert!(online.registers_keys());
    }

    #[test]
    fn test_state_schema_entries() {
        assert_eq!(StateSchema::new(3, 4).entries(), 7);
        assert_eq!(StateSchema::new(u64::MAX, 1).entries(), u64::MAX);
    }
}
