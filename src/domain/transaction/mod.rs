//! Transaction drafts and their resolution into validated parameters.
//!
//! # Module Organization
//!
//! - [`types`] - Type-specific field groups (payment, asset config, app call, ...)
//! - [`size`] - Encoded size projection used for per-byte fees
//! - [`resolve`] - Validation, defaulting and fee computation

pub mod resolve;
pub mod size;
pub mod types;

pub use resolve::{ResolvedTransaction, TransactionResolver, ValidityWindow, resolve};
pub use size::{PessimisticSizeEstimator, SizeEstimator};
pub use types::{
    AppCallFields, AssetConfigFields, AssetFreezeFields, AssetTransferFields, KeyRegFields,
    OnComplete, PaymentFields, StateSchema, TxnType,
};

// ============================================================================
// Transaction Kind
// ============================================================================

/// Type-specific part of a draft; exactly one group per transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Payment(PaymentFields),
    KeyReg(KeyRegFields),
    AssetConfig(AssetConfigFields),
    AssetTransfer(AssetTransferFields),
    AssetFreeze(AssetFreezeFields),
    AppCall(AppCallFields),
}

impl TransactionKind {
    #[must_use]
    pub const fn txn_type(&self) -> TxnType {
        match self {
            Self::Payment(_) => TxnType::Payment,
            Self::KeyReg(_) => TxnType::KeyReg,
            Self::AssetConfig(_) => TxnType::AssetConfig,
            Self::AssetTransfer(_) => TxnType::AssetTransfer,
            Self::AssetFreeze(_) => TxnType::AssetFreeze,
            Self::AppCall(_) => TxnType::AppCall,
        }
    }
}

// ============================================================================
// Transaction Draft
// ============================================================================

/// Caller-supplied description of a pending transaction.
///
/// Unset optional fields are filled from [`crate::domain::SuggestedParams`]
/// during resolution. The draft itself is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Address of the sender.
    pub sender: String,
    /// Exact fee in microAlgos, bypassing per-byte computation.
    pub flat_fee: Option<u64>,
    /// Explicit first valid round.
    pub first_round: Option<u64>,
    /// Explicit last valid round.
    pub last_round: Option<u64>,
    /// Arbitrary data, up to 1024 bytes.
    pub note: Option<Vec<u8>>,
    /// Lease (32 bytes) preventing duplicate transactions in the window.
    pub lease: Option<Vec<u8>>,
    /// Address that will authorize future transactions from the sender.
    pub rekey_to: Option<String>,
    /// Mark the account as non-participating (key registration only).
    pub non_participation: bool,
    /// Type-specific fields.
    pub kind: TransactionKind,
}

impl TransactionDraft {
    #[must_use]
    pub fn new(sender: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            sender: sender.into(),
            flat_fee: None,
            first_round: None,
            last_round: None,
            note: None,
            lease: None,
            rekey_to: None,
            non_participation: false,
            kind,
        }
    }

    #[must_use]
    pub fn payment(sender: impl Into<String>, receiver: impl Into<String>, amount: u64) -> Self {
        Self::new(
            sender,
            TransactionKind::Payment(PaymentFields {
                receiver: receiver.into(),
                amount,
                close_remainder_to: None,
            }),
        )
    }

    #[must_use]
    pub fn with_flat_fee(mut self, fee: u64) -> Self {
        self.flat_fee = Some(fee);
        self
    }

    #[must_use]
    pub fn with_validity(mut self, first_round: u64, last_round: u64) -> Self {
        self.first_round = Some(first_round);
        self.last_round = Some(last_round);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<Vec<u8>>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn with_lease(mut self, lease: impl Into<Vec<u8>>) -> Self {
        self.lease = Some(lease.into());
        self
    }

    #[must_use]
    pub fn with_rekey_to(mut self, address: impl Into<String>) -> Self {
        self.rekey_to = Some(address.into());
        self
    }

    #[must_use]
    pub fn non_participating(mut self) -> Self {
        self.non_participation = true;
        self
    }

    #[must_use]
    pub const fn txn_type(&self) -> TxnType {
        self.kind.txn_type()
    }
}
