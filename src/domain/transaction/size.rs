//! Encoded size projection for per-byte fee computation.
//!
//! The fee has to be known before the transaction is encoded, so the resolver
//! asks a [`SizeEstimator`] instead of the encoder itself.
//! [`PessimisticSizeEstimator`] projects the msgpack layout field by field and
//! always rounds towards the larger encoding, so the fee it yields is never
//! too small for the transaction that is eventually signed.

use crate::constants::{GENESIS_HASH_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_OVERHEAD_BYTES};

use super::{TransactionDraft, TransactionKind};

/// Allowance for the genesis ID, which the draft does not carry.
const GENESIS_ID_ALLOWANCE: usize = 64;

/// Largest msgpack encoding of an unsigned integer.
const UINT_SIZE: u64 = 9;

/// Upper bound on the encoded size of a transaction.
pub trait SizeEstimator {
    fn estimate_encoded_size(&self, draft: &TransactionDraft) -> u64;
}

impl<F> SizeEstimator for F
where
    F: Fn(&TransactionDraft) -> u64,
{
    fn estimate_encoded_size(&self, draft: &TransactionDraft) -> u64 {
        self(draft)
    }
}

/// Field-by-field msgpack projection plus the signature envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct PessimisticSizeEstimator;

impl SizeEstimator for PessimisticSizeEstimator {
    fn estimate_encoded_size(&self, draft: &TransactionDraft) -> u64 {
        let mut txn = MapProjection::default();

        txn.uint("fee");
        txn.uint("fv");
        txn.uint("lv");
        txn.string("gen", GENESIS_ID_ALLOWANCE);
        txn.bin("gh", GENESIS_HASH_LENGTH);
        txn.address("snd");
        txn.string("type", draft.txn_type().as_str().len());
        if let Some(note) = &draft.note {
            txn.bin("note", note.len());
        }
        if let Some(lease) = &draft.lease {
            txn.bin("lx", lease.len());
        }
        if draft.rekey_to.is_some() {
            txn.address("rekey");
        }
        if draft.non_participation {
            txn.boolean("nonpart");
        }

        project_kind(&mut txn, &draft.kind);

        txn.total() + SIGNATURE_OVERHEAD_BYTES
    }
}

fn project_kind(txn: &mut MapProjection, kind: &TransactionKind) {
    match kind {
        TransactionKind::Payment(pay) => {
            txn.address("rcv");
            txn.uint("amt");
            if pay.close_remainder_to.is_some() {
                txn.address("close");
            }
        }
        TransactionKind::KeyReg(keyreg) => {
            if let Some(key) = &keyreg.vote_key {
                txn.bin("votekey", key.len());
            }
            if let Some(key) = &keyreg.selection_key {
                txn.bin("selkey", key.len());
            }
            if let Some(key) = &keyreg.state_proof_key {
                txn.bin("sprfkey", key.len());
            }
            for (key, value) in [
                ("votefst", keyreg.vote_first),
                ("votelst", keyreg.vote_last),
                ("votekd", keyreg.vote_key_dilution),
            ] {
                if value.is_some() {
                    txn.uint(key);
                }
            }
        }
        TransactionKind::AssetConfig(acfg) => {
            if !acfg.is_creation() {
                txn.uint("caid");
            }
            let mut params = MapProjection::default();
            params.uint("t");
            params.uint("dc");
            params.boolean("df");
            for (key, value) in [("un", &acfg.unit_name), ("an", &acfg.asset_name), ("au", &acfg.url)] {
                if let Some(value) = value {
                    params.string(key, value.len());
                }
            }
            if let Some(hash) = &acfg.metadata_hash {
                params.bin("am", hash.len());
            }
            for (key, value) in [
                ("m", &acfg.manager),
                ("r", &acfg.reserve),
                ("f", &acfg.freeze),
                ("c", &acfg.clawback),
            ] {
                if value.is_some() {
                    params.address(key);
                }
            }
            txn.nested("apar", &params);
        }
        TransactionKind::AssetTransfer(axfer) => {
            txn.uint("xaid");
            txn.uint("aamt");
            txn.address("arcv");
            if axfer.close_to.is_some() {
                txn.address("aclose");
            }
            if axfer.revocation_target.is_some() {
                txn.address("asnd");
            }
        }
        TransactionKind::AssetFreeze(_) => {
            txn.uint("faid");
            txn.address("fadd");
            txn.boolean("afrz");
        }
        TransactionKind::AppCall(appl) => {
            txn.uint("apid");
            txn.uint("apan");
            if let Some(program) = &appl.approval_program {
                txn.bin("apap", program.len());
            }
            if let Some(program) = &appl.clear_program {
                txn.bin("apsu", program.len());
            }
            if !appl.args.is_empty() {
                let items = appl.args.iter().map(|arg| bin_size(arg.len())).sum();
                txn.array("apaa", appl.args.len(), items);
            }
            if !appl.accounts.is_empty() {
                let items = appl.accounts.len() as u64 * bin_size(PUBLIC_KEY_LENGTH);
                txn.array("apat", appl.accounts.len(), items);
            }
            if !appl.foreign_apps.is_empty() {
                let items = appl.foreign_apps.len() as u64 * UINT_SIZE;
                txn.array("apfa", appl.foreign_apps.len(), items);
            }
            if !appl.foreign_assets.is_empty() {
                let items = appl.foreign_assets.len() as u64 * UINT_SIZE;
                txn.array("apas", appl.foreign_assets.len(), items);
            }
            for (key, schema) in [("apgs", appl.global_schema), ("apls", appl.local_schema)] {
                if schema.is_some() {
                    let mut nested = MapProjection::default();
                    nested.uint("nui");
                    nested.uint("nbs");
                    txn.nested(key, &nested);
                }
            }
            if appl.extra_pages > 0 {
                txn.uint("apep");
            }
        }
    }
}

// ============================================================================
// Msgpack Projection
// ============================================================================

/// Running size of a msgpack map whose keys are short field names.
#[derive(Debug, Default)]
struct MapProjection {
    entries: usize,
    bytes: u64,
}

impl MapProjection {
    fn field(&mut self, key: &str, value_size: u64) {
        self.entries += 1;
        self.bytes += str_size(key.len()) + value_size;
    }

    fn uint(&mut self, key: &str) {
        self.field(key, UINT_SIZE);
    }

    fn boolean(&mut self, key: &str) {
        self.field(key, 1);
    }

    fn address(&mut self, key: &str) {
        self.field(key, bin_size(PUBLIC_KEY_LENGTH));
    }

    fn bin(&mut self, key: &str, len: usize) {
        self.field(key, bin_size(len));
    }

    fn string(&mut self, key: &str, len: usize) {
        self.field(key, str_size(len));
    }

    fn array(&mut self, key: &str, len: usize, items: u64) {
        self.field(key, collection_header(len) + items);
    }

    fn nested(&mut self, key: &str, map: &MapProjection) {
        self.field(key, map.total());
    }

    fn total(&self) -> u64 {
        collection_header(self.entries) + self.bytes
    }
}

fn collection_header(len: usize) -> u64 {
    match len {
        0..16 => 1,
        16..65_536 => 3,
        _ => 5,
    }
}

fn bin_size(len: usize) -> u64 {
    let header = match len {
        0..256 => 2,
        256..65_536 => 3,
        _ => 5,
    };
    header + len as u64
}

fn str_size(len: usize) -> u64 {
    let header = match len {
        0..32 => 1,
        32..256 => 2,
        256..65_536 => 3,
        _ => 5,
    };
    header + len as u64
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::DraftMother;

    #[test]
    fn test_note_adds_exact_projection() {
        let draft = DraftMother::payment();
        let base = PessimisticSizeEstimator.estimate_encoded_size(&draft);
        let with_note = PessimisticSizeEstimator.estimate_encoded_size(&draft.clone().with_note(vec![7u8; 100]));

        // "note" key (5) + bin8 header (2) + 100 bytes
        assert_eq!(with_note - base, 107);
    }

    #[test]
    fn test_estimate_covers_signature_envelope() {
        let draft = DraftMother::payment();
        assert!(PessimisticSizeEstimator.estimate_encoded_size(&draft) > SIGNATURE_OVERHEAD_BYTES + 200);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        for draft in [
            DraftMother::payment(),
            DraftMother::asset_create(),
            DraftMother::app_create(),
            DraftMother::key_reg_online(),
            DraftMother::asset_freeze(),
            DraftMother::asset_opt_in(),
        ] {
            assert_eq!(
                PessimisticSizeEstimator.estimate_encoded_size(&draft),
                PessimisticSizeEstimator.estimate_encoded_size(&draft)
            );
        }
    }

    #[test]
    fn test_program_size_dominates_app_create() {
        let small = DraftMother::app_create();
        let mut large = small.clone();
        if let TransactionKind::AppCall(appl) = &mut large.kind {
            appl.approval_program = Some(vec![1u8; 2048]);
        }

        let small_size = PessimisticSizeEstimator.estimate_encoded_size(&small);
        let large_size = PessimisticSizeEstimator.estimate_encoded_size(&large);
        assert!(large_size > small_size + 2000);
    }

    #[test]
    fn test_header_sizes() {
        assert_eq!(collection_header(15), 1);
        assert_eq!(collection_header(16), 3);
        assert_eq!(bin_size(255), 257);
        assert_eq!(bin_size(256), 259);
        assert_eq!(str_size(31), 32);
        assert_eq!(str_size(32), 34);
    }

    #[test]
    fn test_closure_estimator() {
        let fixed = |_: &TransactionDraft| -> u64 { 250 };
        assert_eq!(fixed.estimate_encoded_size(&DraftMother::payment()), 250);
    }
}
