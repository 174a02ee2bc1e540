//! # Signature Set Comparison
//!
//! Evidence helpers for double-sign detection. Deciding what to do about a
//! conflict is left to the caller.

use std::collections::HashMap;

use crate::domain::CommitSignatureSet;

/// Validator addresses present in both sets whose signature bytes differ.
///
/// Unsigned entries (absent votes) are skipped on either side. The result
/// follows the order of `left`.
pub fn conflicting_signers(left: &CommitSignatureSet, right: &CommitSignatureSet) -> Vec<Vec<u8>> {
    let right_by_validator: HashMap<&[u8], &[u8]> = right
        .iter()
        .filter(|sig| sig.is_signed())
        .map(|sig| (sig.validator_address.as_slice(), sig.signature.as_slice()))
        .collect();

    left.iter()
        .filter(|sig| sig.is_signed())
        .filter(|sig| {
            right_by_validator
                .get(sig.validator_address.as_slice())
                .is_some_and(|other| *other != sig.signature.as_slice())
        })
        .map(|sig| sig.validator_address.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlockIdFlag, CommitSignature};
    use proptest::prelude::*;

    fn set(entries: &[(u8, &[u8])]) -> CommitSignatureSet {
        CommitSignatureSet {
            height: Some(5),
            round: Some(0),
            signatures: entries
                .iter()
                .map(|(addr, sig)| CommitSignature {
                    block_id_flag: BlockIdFlag::Commit,
                    validator_address: vec![*addr; 20],
                    signature: sig.to_vec(),
                    timestamp: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_reports_only_differing_shared_signers() {
        let a = set(&[(1, &b"same"[..]), (2, &b"first"[..]), (3, &b"only-left"[..])]);
        let b = set(&[(2, &b"second"[..]), (1, &b"same"[..]), (4, &b"only-right"[..])]);

        assert_eq!(conflicting_signers(&a, &b), vec![vec![2u8; 20]]);
        assert_eq!(b.conflicting_signers(&a), vec![vec![2u8; 20]]);
    }

    #[test]
    fn test_identical_sets_have_no_conflicts() {
        let a = set(&[(1, &b"x"[..]), (2, &b"y"[..])]);
        assert!(conflicting_signers(&a, &a.clone()).is_empty());
    }

    #[test]
    fn test_absent_votes_are_not_conflicts() {
        let a = set(&[(1, &b""[..]), (2, &b"y"[..])]);
        let b = set(&[(1, &b"x"[..]), (2, &b""[..])]);
        assert!(conflicting_signers(&a, &b).is_empty());
    }

    proptest! {
        #[test]
        fn prop_conflicts_are_exactly_shared_and_differing(
            left in proptest::collection::btree_map(0u8..16, 1u8..4, 0..12),
            right in proptest::collection::btree_map(0u8..16, 1u8..4, 0..12),
        ) {
            let a = set(&left.iter().map(|(k, v)| (*k, std::slice::from_ref(v))).collect::<Vec<_>>());
            let b = set(&right.iter().map(|(k, v)| (*k, std::slice::from_ref(v))).collect::<Vec<_>>());

            let expected: Vec<Vec<u8>> = left
                .iter()
                .filter(|(k, v)| right.get(*k).is_some_and(|w| w != *v))
                .map(|(k, _)| vec![*k; 20])
                .collect();

            prop_assert_eq!(conflicting_signers(&a, &b), expected);
        }
    }
}
