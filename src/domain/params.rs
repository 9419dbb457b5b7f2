//! Suggested transaction parameters.
//!
//! A [`SuggestedParams`] snapshot carries the network's fee rate and the
//! validity window new transactions should use. It is usually built from the
//! algod `/v2/transactions/params` response via [`SuggestedParams::from_node_response`].

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::codec::DecodedValue;
use crate::constants::{DEFAULT_VALIDITY_WINDOW, GENESIS_HASH_LENGTH, MIN_TX_FEE};
use crate::domain::error::AlgoError;

/// Network-wide transaction economics and validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    /// Fee in microAlgos per byte, or the exact fee when `flat_fee` is set.
    pub fee: u64,
    /// Treat `fee` as an exact per-transaction fee.
    pub flat_fee: bool,
    /// Minimum fee accepted by the network.
    pub min_fee: u64,
    /// First round on which a transaction is valid.
    pub first_round: u64,
    /// Last round on which a transaction is valid.
    pub last_round: u64,
    /// Genesis ID of the network.
    pub genesis_id: String,
    /// Hash of the genesis block.
    pub genesis_hash: [u8; GENESIS_HASH_LENGTH],
}

impl SuggestedParams {
    /// Per-byte params with the protocol minimum fee.
    #[must_use]
    pub fn new(
        fee_per_byte: u64,
        first_round: u64,
        last_round: u64,
        genesis_id: impl Into<String>,
        genesis_hash: [u8; GENESIS_HASH_LENGTH],
    ) -> Self {
        Self {
            fee: fee_per_byte,
            flat_fee: false,
            min_fee: MIN_TX_FEE,
            first_round,
            last_round,
            genesis_id: genesis_id.into(),
            genesis_hash,
        }
    }

    /// Switch to a flat per-transaction fee.
    #[must_use]
    pub fn with_flat_fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self.flat_fee = true;
        self
    }

    /// Genesis hash as base64, the form algod reports it in.
    #[must_use]
    pub fn genesis_hash_b64(&self) -> String {
        BASE64.encode(self.genesis_hash)
    }

    /// Build params from a decoded `/v2/transactions/params` body.
    ///
    /// Integer fields are accepted in whichever representation the request's
    /// decoding policy produced. The window starts at the node's `last-round`
    /// and spans [`DEFAULT_VALIDITY_WINDOW`] rounds.
    ///
    /// # Errors
    ///
    /// Returns `AlgoError::Parse` if a field is missing, not a `u64`, or the
    /// genesis hash is not 32 bytes of base64.
    pub fn from_node_response(body: &DecodedValue) -> Result<Self, AlgoError> {
        let fee = required_u64(body, "fee")?;
        let last_round = required_u64(body, "last-round")?;
        let min_fee = match body.get("min-fee") {
            None | Some(DecodedValue::Null) => MIN_TX_FEE,
            Some(_) => required_u64(body, "min-fee")?,
        };

        let genesis_id = body["genesis-id"]
            .as_str()
            .ok_or_else(|| AlgoError::parse("transaction params: 'genesis-id' must be a string"))?
            .to_string();

        let genesis_hash = body["genesis-hash"]
            .as_str()
            .ok_or_else(|| AlgoError::parse("transaction params: 'genesis-hash' must be a string"))?;
        let genesis_hash = BASE64
            .decode(genesis_hash)
            .map_err(|e| AlgoError::parse(format!("transaction params: 'genesis-hash' is not base64: {e}")))?;
        let genesis_hash: [u8; GENESIS_HASH_LENGTH] = genesis_hash.try_into().map_err(|bytes: Vec<u8>| {
            AlgoError::parse(format!(
                "transaction params: 'genesis-hash' is {} bytes, expected {GENESIS_HASH_LENGTH}",
                bytes.len()
            ))
        })?;

        let last_valid = last_round.checked_add(DEFAULT_VALIDITY_WINDOW).ok_or_else(|| {
            AlgoError::parse(format!("transaction params: 'last-round' {last_round} is too large"))
        })?;

        Ok(Self {
            fee,
            flat_fee: false,
            min_fee,
            first_round: last_round,
            last_round: last_valid,
            genesis_id,
            genesis_hash,
        })
    }
}

fn required_u64(body: &DecodedValue, key: &str) -> Result<u64, AlgoError> {
    let value = &body[key];
    value.as_u64().ok_or_else(|| {
        AlgoError::parse(format!(
            "transaction params: '{key}' must be an unsigned 64-bit integer, got {}",
            value.kind()
        ))
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{IntDecoding, decode};
    use crate::test_utils::JsonMother;
    use rstest::rstest;

    #[rstest]
    #[case::default(IntDecoding::Default)]
    #[case::safe(IntDecoding::Safe)]
    #[case::mixed(IntDecoding::Mixed)]
    #[case::bigint(IntDecoding::BigInt)]
    fn test_from_node_response_under_every_policy(#[case] policy: IntDecoding) {
        let body = decode(&JsonMother::transaction_params(), policy).unwrap();
        let params = SuggestedParams::from_node_response(&body).unwrap();

        assert_eq!(params.fee, 0);
        assert_eq!(params.min_fee, 1000);
        assert_eq!(params.first_round, 45_000_000);
        assert_eq!(params.last_round, 45_001_000);
        assert_eq!(params.genesis_id, "testnet-v1.0");
        assert!(!params.flat_fee);
        assert_eq!(params.genesis_hash_b64(), JsonMother::TESTNET_GENESIS_HASH);
    }

    #[test]
    fn test_large_round_survives_bigint_decoding() {
        let text = JsonMother::transaction_params_with_round("18446744073709550000");
        let body = decode(&text, IntDecoding::BigInt).unwrap();
        let params = SuggestedParams::from_node_response(&body).unwrap();
        assert_eq!(params.first_round, 18_446_744_073_709_550_000);

        let text = JsonMother::transaction_params_with_round("18446744073709551615");
        let body = decode(&text, IntDecoding::BigInt).unwrap();
        assert!(matches!(
            SuggestedParams::from_node_response(&body),
            Err(AlgoError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_min_fee_uses_protocol_minimum() {
        let text = r#"{"fee": 10, "last-round": 100, "genesis-id": "x",
            "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI="}"#;
        let body = decode(text, IntDecoding::Default).unwrap();
        let params = SuggestedParams::from_node_response(&body).unwrap();
        assert_eq!(params.min_fee, MIN_TX_FEE);
        assert_eq!(params.fee, 10);
    }

    #[rstest]
    #[case::missing_fee(r#"{"last-round": 1, "genesis-id": "x", "genesis-hash": "AA=="}"#)]
    #[case::negative_fee(r#"{"fee": -1, "last-round": 1, "genesis-id": "x", "genesis-hash": "AA=="}"#)]
    #[case::string_round(r#"{"fee": 0, "last-round": "1", "genesis-id": "x", "genesis-hash": "AA=="}"#)]
    #[case::short_hash(r#"{"fee": 0, "last-round": 1, "genesis-id": "x", "genesis-hash": "AA=="}"#)]
    #[case::bad_base64(r#"{"fee": 0, "last-round": 1, "genesis-id": "x", "genesis-hash": "%%"}"#)]
    #[case::missing_id(r#"{"fee": 0, "last-round": 1, "genesis-hash": "AA=="}"#)]
    fn test_malformed_responses(#[case] text: &str) {
        let body = decode(text, IntDecoding::Mixed).unwrap();
        assert!(matches!(
            SuggestedParams::from_node_response(&body),
            Err(AlgoError::Parse { .. })
        ));
    }

    #[test]
    fn test_with_flat_fee() {
        let params = SuggestedParams::new(10, 1, 2, "id", [0; 32]).with_flat_fee(2000);
        assert!(params.flat_fee);
        assert_eq!(params.fee, 2000);
    }
}
