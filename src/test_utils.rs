//! Shared test utilities and Mother pattern factories.
//!
//! Use these helpers to avoid copy-pasting setup code across tests. Every
//! address handed out here passes checksum validation.
#![allow(dead_code)]

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rstest::fixture;

use crate::domain::{
    AppCallFields, AssetConfigFields, AssetFreezeFields, AssetTransferFields, KeyRegFields,
    OnComplete, StateSchema, SuggestedParams, TransactionDraft, TransactionKind,
};

// ============================================================================
// Draft Factories
// ============================================================================

pub struct DraftMother;

impl DraftMother {
    /// Address of the all-ones public key.
    pub const SENDER: &'static str = "AEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEA5RCDXMI";
    /// Address of the public key `0, 1, ..., 31`.
    pub const RECEIVER: &'static str = "AAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYP7MUPJQE";
    /// Address of the zero public key.
    pub const ZERO: &'static str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";

    #[must_use]
    pub fn payment() -> TransactionDraft {
        TransactionDraft::payment(Self::SENDER, Self::RECEIVER, 1_000_000)
    }

    #[must_use]
    pub fn key_reg_online() -> TransactionDraft {
        TransactionDraft::new(
            Self::SENDER,
            TransactionKind::KeyReg(KeyRegFields {
                vote_key: Some(vec![1u8; 32]),
                selection_key: Some(vec![2u8; 32]),
                state_proof_key: Some(vec![3u8; 64]),
                vote_first: Some(100),
                vote_last: Some(3_000_000),
                vote_key_dilution: Some(10_000),
            }),
        )
    }

    #[must_use]
    pub fn key_reg_offline() -> TransactionDraft {
        TransactionDraft::new(Self::SENDER, TransactionKind::KeyReg(KeyRegFields::default()))
    }

    #[must_use]
    pub fn asset_create() -> TransactionDraft {
        TransactionDraft::new(
            Self::SENDER,
            TransactionKind::AssetConfig(AssetConfigFields {
                total: Some(10_000_000_000),
                decimals: 6,
                unit_name: Some("USDC".to_string()),
                asset_name: Some("USD Coin".to_string()),
                url: Some("https://www.centre.io".to_string()),
                metadata_hash: Some(vec![0xab; 32]),
                manager: Some(Self::SENDER.to_string()),
                reserve: Some(Self::SENDER.to_string()),
                freeze: Some(Self::ZERO.to_string()),
                clawback: Some(Self::ZERO.to_string()),
                ..Default::default()
            }),
        )
    }

    #[must_use]
    pub fn asset_reconfigure(asset_id: u64) -> TransactionDraft {
        TransactionDraft::new(
            Self::SENDER,
            TransactionKind::AssetConfig(AssetConfigFields {
                asset_id: Some(asset_id),
                manager: Some(Self::RECEIVER.to_string()),
                ..Default::default()
            }),
        )
    }

    #[must_use]
    pub fn asset_opt_in() -> TransactionDraft {
        TransactionDraft::new(
            Self::SENDER,
            TransactionKind::AssetTransfer(AssetTransferFields {
                asset_id: 31_566_704,
                amount: 0,
                receiver: Self::SENDER.to_string(),
                ..Default::default()
            }),
        )
    }

    #[must_use]
    pub fn asset_freeze() -> TransactionDraft {
        TransactionDraft::new(
            Self::SENDER,
            TransactionKind::AssetFreeze(AssetFreezeFields {
                asset_id: 31_566_704,
                freeze_account: Self::RECEIVER.to_string(),
                freeze_state: true,
            }),
        )
    }

    #[must_use]
    pub fn app_create() -> TransactionDraft {
        TransactionDraft::new(
            Self::SENDER,
            TransactionKind::AppCall(AppCallFields {
                approval_program: Some(vec![6, 129, 1]),
                clear_program: Some(vec![6, 129, 1]),
                global_schema: Some(StateSchema::new(2, 1)),
                local_schema: Some(StateSchema::new(1, 0)),
                ..Default::default()
            }),
        )
    }

    #[must_use]
    pub fn app_call(app_id: u64) -> TransactionDraft {
        TransactionDraft::new(
            Self::SENDER,
            TransactionKind::AppCall(AppCallFields {
                app_id,
                on_complete: OnComplete::NoOp,
                args: vec![b"hello".to_vec()],
                accounts: vec![Self::RECEIVER.to_string()],
                foreign_assets: vec![31_566_704],
                ..Default::default()
            }),
        )
    }
}

// ============================================================================
// Parameter Factories
// ============================================================================

pub struct ParamsMother;

impl ParamsMother {
    /// 10 microAlgos per byte, window `[100, 1100]`, minimum fee 1000.
    #[must_use]
    pub fn testnet() -> SuggestedParams {
        SuggestedParams::new(10, 100, 1100, "testnet-v1.0", Self::testnet_genesis_hash())
    }

    #[must_use]
    pub fn testnet_genesis_hash() -> [u8; 32] {
        let bytes = BASE64
            .decode(JsonMother::TESTNET_GENESIS_HASH)
            .expect("genesis hash fixture is valid base64");
        bytes.try_into().expect("genesis hash fixture is 32 bytes")
    }
}

// ============================================================================
// JSON Test Data Factories
// ============================================================================

pub struct JsonMother;

impl JsonMother {
    pub const TESTNET_GENESIS_HASH: &'static str = "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=";

    /// `/v2/transactions/params` body as TestNet returns it.
    #[must_use]
    pub fn transaction_params() -> String {
        Self::transaction_params_with_round("45000000")
    }

    /// Same body with `last-round` spliced in as a raw literal.
    #[must_use]
    pub fn transaction_params_with_round(last_round: &str) -> String {
        format!(
            r#"{{
  "consensus-version": "https://github.com/algorandfoundation/specs/tree/925a46433742afb0b51bb939354bd907fa88bf95",
  "fee": 0,
  "genesis-hash": "{}",
  "genesis-id": "testnet-v1.0",
  "last-round": {last_round},
  "min-fee": 1000
}}"#,
            Self::TESTNET_GENESIS_HASH
        )
    }

    /// Account lookup with a balance past the safe integer range.
    #[must_use]
    pub fn account_with_large_balance() -> String {
        r#"{"account":{"address":"AEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEA5RCDXMI","amount":18446744073709551615,"round":42}}"#
            .to_string()
    }
}

// ============================================================================
// rstest Fixtures
// ============================================================================

#[fixture]
pub fn testnet_params() -> SuggestedParams {
    ParamsMother::testnet()
}

#[fixture]
pub fn payment_draft() -> TransactionDraft {
    DraftMother::payment()
}

/// Address validator that accepts everything.
pub fn accept_all(_: &str) -> bool {
    true
}

/// Size estimator that reports the same size for every draft.
pub fn fixed_size(size: u64) -> impl Fn(&TransactionDraft) -> u64 {
    move |_: &TransactionDraft| size
}
