//! Amount Commitments — deterministic hash binding of escrowed amounts
//!
//! A commitment is `SHA-256(encode(owner) || i128_be(amount) || salt)`:
//! a 32-byte digest binding an owner, an amount, and caller-supplied salt.
//! The owner field domain-separates digests, so one owner's commitment can
//! never be replayed as another's.
//!
//! # Not hiding
//!
//! This construction is tamper-evident only. Equal inputs produce equal
//! digests, and low-entropy amounts or salts can be recovered by brute-force
//! search of the preimage space. Callers MUST NOT treat a commitment as
//! concealing the committed amount. The salt length bound exists to cap
//! hashing cost under host resource metering, not for any cryptographic
//! reason.
//!
//! The construction is versioned internally so a hiding scheme (e.g.
//! Pedersen) can replace it without changing the public contract.

use sha2::{Digest, Sha256};
use types::ids::AccountId;

use crate::errors::CommitmentError;
use crate::serializer;

/// Upper bound on salt length, in bytes.
pub const MAX_SALT_LEN: usize = 256;

/// Commitment scheme version in effect. Not part of the hash input; the
/// version selects the derivation algorithm.
pub const COMMITMENT_SCHEME_VERSION: u8 = 1;

fn validate_opening(amount: i128, salt: &[u8]) -> Result<(), CommitmentError> {
    if amount < 0 {
        return Err(CommitmentError::InvalidAmount);
    }
    if salt.len() > MAX_SALT_LEN {
        return Err(CommitmentError::SaltTooLong {
            len: salt.len(),
            max: MAX_SALT_LEN,
        });
    }
    Ok(())
}

/// Derive a commitment under the given scheme version.
fn derive(version: u8, owner: &AccountId, amount: i128, salt: &[u8]) -> [u8; 32] {
    match version {
        // v1: plain SHA-256 over the canonical preimage
        1 => {
            let preimage = serializer::commitment_preimage(owner, amount, salt);
            let mut hasher = Sha256::new();
            hasher.update(&preimage);
            hasher.finalize().into()
        }
        v => unreachable!("unknown commitment scheme version {v}"),
    }
}

/// Create a commitment to `(owner, amount, salt)`.
///
/// Pure function, no state effects. Fails with `InvalidAmount` for negative
/// amounts and `SaltTooLong` past the 256-byte bound; both are caller bugs,
/// not verification outcomes.
pub fn create_amount_commitment(
    owner: &AccountId,
    amount: i128,
    salt: &[u8],
) -> Result<[u8; 32], CommitmentError> {
    validate_opening(amount, salt)?;
    Ok(derive(COMMITMENT_SCHEME_VERSION, owner, amount, salt))
}

/// Verify a claimed opening against a commitment.
///
/// Re-derives the digest and compares all 32 bytes. A mismatch returns
/// `Ok(false)` — only malformed inputs (negative amount, oversized salt)
/// produce an error.
pub fn verify_amount_commitment(
    commitment: &[u8; 32],
    owner: &AccountId,
    amount: i128,
    salt: &[u8],
) -> Result<bool, CommitmentError> {
    validate_opening(amount, salt)?;
    Ok(derive(COMMITMENT_SCHEME_VERSION, owner, amount, salt) == *commitment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> AccountId {
        AccountId::from_bytes([3u8; 16])
    }

    #[test]
    fn test_create_deterministic() {
        let c1 = create_amount_commitment(&owner(), 1000, b"salt").unwrap();
        let c2 = create_amount_commitment(&owner(), 1000, b"salt").unwrap();
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_create_verify_round_trip() {
        let c = create_amount_commitment(&owner(), 1_500_000, &[42, 13, 99]).unwrap();
        assert!(verify_amount_commitment(&c, &owner(), 1_500_000, &[42, 13, 99]).unwrap());
    }

    #[test]
    fn test_verify_wrong_amount() {
        let c = create_amount_commitment(&owner(), 1_500_000, &[42, 13, 99]).unwrap();
        assert!(!verify_amount_commitment(&c, &owner(), 1_500_001, &[42, 13, 99]).unwrap());
    }

    #[test]
    fn test_verify_wrong_owner() {
        let c = create_amount_commitment(&owner(), 1000, b"s").unwrap();
        let other = AccountId::from_bytes([4u8; 16]);
        assert!(!verify_amount_commitment(&c, &other, 1000, b"s").unwrap());
    }

    #[test]
    fn test_verify_wrong_salt() {
        let c = create_amount_commitment(&owner(), 1000, b"correct").unwrap();
        assert!(!verify_amount_commitment(&c, &owner(), 1000, b"wrong").unwrap());
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            create_amount_commitment(&owner(), -1, b"s"),
            Err(CommitmentError::InvalidAmount)
        );
        let c = [0u8; 32];
        assert_eq!(
            verify_amount_commitment(&c, &owner(), -1, b"s"),
            Err(CommitmentError::InvalidAmount)
        );
    }

    #[test]
    fn test_zero_amount_allowed() {
        let c = create_amount_commitment(&owner(), 0, b"s").unwrap();
        assert!(verify_amount_commitment(&c, &owner(), 0, b"s").unwrap());
    }

    #[test]
    fn test_salt_at_bound() {
        let salt = [0u8; MAX_SALT_LEN];
        assert!(create_amount_commitment(&owner(), 1, &salt).is_ok());
    }

    #[test]
    fn test_salt_past_bound() {
        let salt = [0u8; MAX_SALT_LEN + 1];
        assert_eq!(
            create_amount_commitment(&owner(), 1, &salt),
            Err(CommitmentError::SaltTooLong { len: 257, max: 256 })
        );
    }

    #[test]
    fn test_empty_salt_allowed() {
        let c = create_amount_commitment(&owner(), 1, &[]).unwrap();
        assert!(verify_amount_commitment(&c, &owner(), 1, &[]).unwrap());
    }

    #[test]
    fn test_matches_manual_sha256() {
        let owner = owner();
        let amount: i128 = 1_500_000;
        let salt = [42u8, 13, 99];

        let mut data = Vec::new();
        data.extend_from_slice(&owner.to_bytes());
        data.extend_from_slice(&amount.to_be_bytes());
        data.extend_from_slice(&salt);
        let expected: [u8; 32] = Sha256::digest(&data).into();

        assert_eq!(
            create_amount_commitment(&owner, amount, &salt).unwrap(),
            expected
        );
    }

    #[test]
    fn test_not_hiding_equal_inputs_equal_digests() {
        // Documented property: the scheme is binding, not hiding.
        let a = create_amount_commitment(&owner(), 5, b"x").unwrap();
        let b = create_amount_commitment(&owner(), 5, b"x").unwrap();
        assert_eq!(a, b);
    }
}
