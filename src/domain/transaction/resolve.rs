//! Resolution of a [`TransactionDraft`] into validated, fee-bearing parameters.
//!
//! Steps run in a fixed order and stop at the first violation:
//!
//! 1. Validity window: explicit override, then draft rounds, then suggested params.
//! 2. Fee: flat fee (rejected below the minimum) or per-byte fee over the
//!    projected size, floored at the minimum.
//! 3. Type-specific required fields and protocol limits.
//! 4. Address well-formedness and fixed byte lengths.

use crate::constants::{
    LEASE_LENGTH, MAX_APP_ACCOUNTS, MAX_APP_ARGS, MAX_APP_TOTAL_ARG_LENGTH, MAX_APP_TOTAL_REFERENCES,
    MAX_ASSET_DECIMALS, MAX_ASSET_NAME_LENGTH, MAX_ASSET_UNIT_NAME_LENGTH, MAX_ASSET_URL_LENGTH,
    MAX_EXTRA_PROGRAM_PAGES, MAX_GLOBAL_SCHEMA_ENTRIES, MAX_LOCAL_SCHEMA_ENTRIES, MAX_NOTE_LENGTH,
    METADATA_HASH_LENGTH, MIN_TX_FEE, PARTICIPATION_KEY_LENGTH, STATE_PROOF_KEY_LENGTH,
};
use crate::domain::address::{AddressValidator, AlgorandAddressValidator};
use crate::domain::error::ValidationError;
use crate::domain::params::SuggestedParams;

use super::size::{PessimisticSizeEstimator, SizeEstimator};
use super::types::{
    AppCallFields, AssetConfigFields, AssetFreezeFields, AssetTransferFields, KeyRegFields, OnComplete,
    PaymentFields, StateSchema,
};
use super::{TransactionDraft, TransactionKind, TxnType};

type Result<T> = std::result::Result<T, ValidationError>;

// ============================================================================
// Validity Window
// ============================================================================

/// Inclusive range of rounds in which a transaction may be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    pub first: u64,
    pub last: u64,
}

impl ValidityWindow {
    #[must_use]
    pub const fn new(first: u64, last: u64) -> Self {
        Self { first, last }
    }
}

// ============================================================================
// Resolved Transaction
// ============================================================================

/// Fully resolved transaction parameters, ready for encoding and signing.
///
/// Only [`TransactionResolver::resolve`] constructs this, so every instance
/// has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTransaction {
    sender: String,
    fee: u64,
    window: ValidityWindow,
    genesis_id: String,
    genesis_hash: [u8; 32],
    note: Option<Vec<u8>>,
    lease: Option<[u8; LEASE_LENGTH]>,
    rekey_to: Option<String>,
    non_participation: bool,
    kind: TransactionKind,
}

impl ResolvedTransaction {
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Fee in microAlgos.
    #[must_use]
    pub const fn fee(&self) -> u64 {
        self.fee
    }

    #[must_use]
    pub const fn first_round(&self) -> u64 {
        self.window.first
    }

    #[must_use]
    pub const fn last_round(&self) -> u64 {
        self.window.last
    }

    #[must_use]
    pub const fn window(&self) -> ValidityWindow {
        self.window
    }

    #[must_use]
    pub fn genesis_id(&self) -> &str {
        &self.genesis_id
    }

    #[must_use]
    pub const fn genesis_hash(&self) -> &[u8; 32] {
        &self.genesis_hash
    }

    #[must_use]
    pub fn note(&self) -> Option<&[u8]> {
        self.note.as_deref()
    }

    #[must_use]
    pub const fn lease(&self) -> Option<&[u8; LEASE_LENGTH]> {
        self.lease.as_ref()
    }

    #[must_use]
    pub fn rekey_to(&self) -> Option<&str> {
        self.rekey_to.as_deref()
    }

    #[must_use]
    pub const fn non_participation(&self) -> bool {
        self.non_participation
    }

    #[must_use]
    pub const fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    #[must_use]
    pub const fn txn_type(&self) -> TxnType {
        self.kind.txn_type()
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves drafts using an address validator and a size estimator.
#[derive(Debug, Clone, Default)]
pub struct TransactionResolver<A = AlgorandAddressValidator, S = PessimisticSizeEstimator> {
    addresses: A,
    sizes: S,
}

/// Resolve with the default collaborators.
///
/// # Errors
///
/// See [`TransactionResolver::resolve`].
pub fn resolve(
    draft: &TransactionDraft,
    suggested: &SuggestedParams,
    window: Option<ValidityWindow>,
) -> Result<ResolvedTransaction> {
    <TransactionResolver>::default().resolve(draft, suggested, window)
}

impl<A, S> TransactionResolver<A, S>
where
    A: AddressValidator,
    S: SizeEstimator,
{
    #[must_use]
    pub fn new(addresses: A, sizes: S) -> Self {
        Self { addresses, sizes }
    }

    /// Resolve `draft` against `suggested`.
    ///
    /// `window` overrides both the draft's rounds and the suggested ones.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered. Inputs are only
    /// borrowed and never modified.
    pub fn resolve(
        &self,
        draft: &TransactionDraft,
        suggested: &SuggestedParams,
        window: Option<ValidityWindow>,
    ) -> Result<ResolvedTransaction> {
        let window = resolve_window(draft, suggested, window)?;
        let fee = self.compute_fee(draft, suggested)?;

        validate_kind(draft)?;
        let lease = self.normalize(draft)?;

        Ok(ResolvedTransaction {
            sender: draft.sender.clone(),
            fee,
            window,
            genesis_id: suggested.genesis_id.clone(),
            genesis_hash: suggested.genesis_hash,
            note: draft.note.clone(),
            lease,
            rekey_to: draft.rekey_to.clone(),
            non_participation: draft.non_participation,
            kind: draft.kind.clone(),
        })
    }

    fn compute_fee(&self, draft: &TransactionDraft, suggested: &SuggestedParams) -> Result<u64> {
        let min_fee = suggested.min_fee.max(MIN_TX_FEE);

        let flat_fee = draft
            .flat_fee
            .or_else(|| suggested.flat_fee.then_some(suggested.fee));

        if let Some(fee) = flat_fee {
            if fee < min_fee {
                return Err(ValidationError::new(
                    "fee",
                    format!("flat fee {fee} is below the minimum fee {min_fee}"),
                ));
            }
            return Ok(fee);
        }

        let size = self.sizes.estimate_encoded_size(draft);
        let fee = suggested.fee.checked_mul(size).ok_or_else(|| {
            ValidationError::new(
                "fee",
                format!("{} per byte over {size} bytes overflows", suggested.fee),
            )
        })?;

        Ok(fee.max(min_fee))
    }

    /// Step 4: addresses and fixed-length byte fields. Returns the lease.
    fn normalize(&self, draft: &TransactionDraft) -> Result<Option<[u8; LEASE_LENGTH]>> {
        self.check_address("sender", &draft.sender)?;
        self.check_optional_address("rekey_to", draft.rekey_to.as_deref())?;

        if let Some(note) = &draft.note {
            check_max_len("note", note.len(), MAX_NOTE_LENGTH)?;
        }

        let lease = draft
            .lease
            .as_deref()
            .map(|lease| fixed_bytes::<LEASE_LENGTH>("lease", lease))
            .transpose()?;

        match &draft.kind {
            TransactionKind::Payment(pay) => {
                self.check_address("receiver", &pay.receiver)?;
                self.check_optional_address("close_remainder_to", pay.close_remainder_to.as_deref())?;
            }
            TransactionKind::KeyReg(keyreg) => {
                check_optional_len("vote_key", keyreg.vote_key.as_deref(), PARTICIPATION_KEY_LENGTH)?;
                check_optional_len("selection_key", keyreg.selection_key.as_deref(), PARTICIPATION_KEY_LENGTH)?;
                check_optional_len("state_proof_key", keyreg.state_proof_key.as_deref(), STATE_PROOF_KEY_LENGTH)?;
            }
            TransactionKind::AssetConfig(acfg) => {
                check_optional_len("metadata_hash", acfg.metadata_hash.as_deref(), METADATA_HASH_LENGTH)?;
                self.check_optional_address("manager", acfg.manager.as_deref())?;
                self.check_optional_address("reserve", acfg.reserve.as_deref())?;
                self.check_optional_address("freeze", acfg.freeze.as_deref())?;
                self.check_optional_address("clawback", acfg.clawback.as_deref())?;
            }
            TransactionKind::AssetTransfer(axfer) => {
                self.check_address("receiver", &axfer.receiver)?;
                self.check_optional_address("close_to", axfer.close_to.as_deref())?;
                self.check_optional_address("revocation_target", axfer.revocation_target.as_deref())?;
            }
            TransactionKind::AssetFreeze(afrz) => {
                self.check_address("freeze_account", &afrz.freeze_account)?;
            }
            TransactionKind::AppCall(appl) => {
                for account in &appl.accounts {
                    self.check_address("accounts", account)?;
                }
            }
        }

        Ok(lease)
    }

    fn check_address(&self, field: &'static str, address: &str) -> Result<()> {
        if self.addresses.is_valid_address(address) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("'{address}' is not a valid Algorand address"),
            ))
        }
    }

    fn check_optional_address(&self, field: &'static str, address: Option<&str>) -> Result<()> {
        address.map_or(Ok(()), |address| self.check_address(field, address))
    }
}

// ============================================================================
// Step 1: Validity Window
// ============================================================================

fn resolve_window(
    draft: &TransactionDraft,
    suggested: &SuggestedParams,
    window: Option<ValidityWindow>,
) -> Result<ValidityWindow> {
    let window = window.unwrap_or_else(|| ValidityWindow {
        first: draft.first_round.unwrap_or(suggested.first_round),
        last: draft.last_round.unwrap_or(suggested.last_round),
    });

    if window.first > window.last {
        return Err(ValidationError::new(
            "first_round",
            format!(
                "first round {} is after last round {}",
                window.first, window.last
            ),
        ));
    }

    Ok(window)
}

// ============================================================================
// Step 3: Type-specific Rules
// ============================================================================

fn validate_kind(draft: &TransactionDraft) -> Result<()> {
    if draft.non_participation && draft.txn_type() != TxnType::KeyReg {
        return Err(ValidationError::new(
            "non_participation",
            "only applies to key registration transactions",
        ));
    }

    match &draft.kind {
        TransactionKind::Payment(pay) => validate_payment(pay),
        TransactionKind::KeyReg(keyreg) => validate_key_reg(keyreg, draft.non_participation),
        TransactionKind::AssetConfig(acfg) => validate_asset_config(acfg),
        TransactionKind::AssetTransfer(axfer) => validate_asset_transfer(axfer),
        TransactionKind::AssetFreeze(afrz) => validate_asset_freeze(afrz),
        TransactionKind::AppCall(appl) => validate_app_call(appl),
    }
}

fn validate_payment(pay: &PaymentFields) -> Result<()> {
    if pay.receiver.is_empty() {
        return Err(ValidationError::new("receiver", "is required"));
    }
    Ok(())
}

fn validate_key_reg(keyreg: &KeyRegFields, non_participation: bool) -> Result<()> {
    if !keyreg.registers_keys() {
        return Ok(());
    }

    if non_participation {
        return Err(ValidationError::new(
            "non_participation",
            "cannot be combined with participation keys",
        ));
    }

    let required = "is required when registering participation keys";
    if keyreg.vote_key.is_none() {
        return Err(ValidationError::new("vote_key", required));
    }
    if keyreg.selection_key.is_none() {
        return Err(ValidationError::new("selection_key", required));
    }
    let vote_first = keyreg.vote_first.ok_or_else(|| ValidationError::new("vote_first", required))?;
    let vote_last = keyreg.vote_last.ok_or_else(|| ValidationError::new("vote_last", required))?;
    if keyreg.vote_key_dilution.is_none() {
        return Err(ValidationError::new("vote_key_dilution", required));
    }

    if vote_first > vote_last {
        return Err(ValidationError::new(
            "vote_last",
            format!("vote range {vote_first}..{vote_last} is empty"),
        ));
    }

    Ok(())
}

fn validate_asset_config(acfg: &AssetConfigFields) -> Result<()> {
    if acfg.is_creation() {
        match acfg.total {
            Some(total) if total > 0 => {}
            _ => {
                return Err(ValidationError::new(
                    "total",
                    "must be greater than zero when creating an asset",
                ));
            }
        }
    }

    if acfg.decimals > MAX_ASSET_DECIMALS {
        return Err(ValidationError::new(
            "decimals",
            format!("{} exceeds the maximum of {MAX_ASSET_DECIMALS}", acfg.decimals),
        ));
    }

    if let Some(name) = &acfg.unit_name {
        check_max_len("unit_name", name.len(), MAX_ASSET_UNIT_NAME_LENGTH)?;
    }
    if let Some(name) = &acfg.asset_name {
        check_max_len("asset_name", name.len(), MAX_ASSET_NAME_LENGTH)?;
    }
    if let Some(url) = &acfg.url {
        check_max_len("url", url.len(), MAX_ASSET_URL_LENGTH)?;
    }

    Ok(())
}

fn validate_asset_transfer(axfer: &AssetTransferFields) -> Result<()> {
    if axfer.asset_id == 0 {
        return Err(ValidationError::new("asset_id", "is required"));
    }
    if axfer.receiver.is_empty() {
        return Err(ValidationError::new("receiver", "is required"));
    }
    Ok(())
}

fn validate_asset_freeze(afrz: &AssetFreezeFields) -> Result<()> {
    if afrz.asset_id == 0 {
        return Err(ValidationError::new("asset_id", "is required"));
    }
    if afrz.freeze_account.is_empty() {
        return Err(ValidationError::new("freeze_account", "is required"));
    }
    Ok(())
}

fn validate_app_call(appl: &AppCallFields) -> Result<()> {
    if appl.is_creation() {
        if appl.approval_program.as_ref().is_none_or(Vec::is_empty) {
            return Err(ValidationError::new(
                "approval_program",
                "is required when creating an application",
            ));
        }
        if appl.clear_program.as_ref().is_none_or(Vec::is_empty) {
            return Err(ValidationError::new(
                "clear_program",
                "is required when creating an application",
            ));
        }
    } else {
        let has_programs = appl.approval_program.is_some() || appl.clear_program.is_some();
        if has_programs && appl.on_complete != OnComplete::UpdateApplication {
            return Err(ValidationError::new(
                "approval_program",
                "programs may only be set when creating or updating an application",
            ));
        }
        if appl.global_schema.is_some() || appl.local_schema.is_some() {
            return Err(ValidationError::new(
                "global_schema",
                "state schemas are immutable after creation",
            ));
        }
        if appl.extra_pages > 0 {
            return Err(ValidationError::new(
                "extra_pages",
                "extra program pages are immutable after creation",
            ));
        }
    }

    if appl.extra_pages > MAX_EXTRA_PROGRAM_PAGES {
        return Err(ValidationError::new(
            "extra_pages",
            format!("{} exceeds the maximum of {MAX_EXTRA_PROGRAM_PAGES}", appl.extra_pages),
        ));
    }

    check_schema("global_schema", appl.global_schema, MAX_GLOBAL_SCHEMA_ENTRIES)?;
    check_schema("local_schema", appl.local_schema, MAX_LOCAL_SCHEMA_ENTRIES)?;

    if appl.args.len() > MAX_APP_ARGS {
        return Err(ValidationError::new(
            "args",
            format!("{} arguments exceed the maximum of {MAX_APP_ARGS}", appl.args.len()),
        ));
    }
    let arg_bytes: usize = appl.args.iter().map(Vec::len).sum();
    check_max_len("args", arg_bytes, MAX_APP_TOTAL_ARG_LENGTH)?;

    if appl.accounts.len() > MAX_APP_ACCOUNTS {
        return Err(ValidationError::new(
            "accounts",
            format!("{} accounts exceed the maximum of {MAX_APP_ACCOUNTS}", appl.accounts.len()),
        ));
    }
    let references = appl.accounts.len() + appl.foreign_apps.len() + appl.foreign_assets.len();
    if references > MAX_APP_TOTAL_REFERENCES {
        return Err(ValidationError::new(
            "foreign_apps",
            format!("{references} references exceed the maximum of {MAX_APP_TOTAL_REFERENCES}"),
        ));
    }

    Ok(())
}

// ============================================================================
// Field Helpers
// ============================================================================

fn check_schema(field: &'static str, schema: Option<StateSchema>, max_entries: u64) -> Result<()> {
    match schema {
        Some(schema) if schema.entries() > max_entries => Err(ValidationError::new(
            field,
            format!("{} entries exceed the maximum of {max_entries}", schema.entries()),
        )),
        _ => Ok(()),
    }
}

fn check_max_len(field: &'static str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("{len} bytes exceed the maximum of {max}"),
        ));
    }
    Ok(())
}

fn check_optional_len(field: &'static str, bytes: Option<&[u8]>, expected: usize) -> Result<()> {
    match bytes {
        Some(bytes) if bytes.len() != expected => Err(length_mismatch(field, bytes.len(), expected)),
        _ => Ok(()),
    }
}

fn fixed_bytes<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| length_mismatch(field, bytes.len(), N))
}

fn length_mismatch(field: &'static str, actual: usize, expected: usize) -> ValidationError {
    ValidationError::new(
        field,
        format!("length mismatch: expected {expected} bytes, got {actual}"),
    )
}

// ============================================================================
// Tests
// ============================================================================
