//! Canonical Serialization — injective byte encoding of commitment inputs
//!
//! Every field that feeds the commitment hash (or a storage key) is encoded
//! at a fixed width, so concatenated fields can never be reinterpreted across
//! a boundary. The salt is the single variable-length field and is therefore
//! required to come last; nothing may ever be appended after it.

use types::ids::{AccountId, EscrowId};

/// Byte width of an encoded account identifier.
pub const ACCOUNT_ENCODING_LEN: usize = 16;

/// Byte width of an encoded amount.
pub const AMOUNT_ENCODING_LEN: usize = 16;

/// Encode an account identifier as its canonical 16-byte form.
///
/// Fixed width makes the encoding self-delimiting: any suffix appended after
/// it cannot shift bytes into or out of the account field.
pub fn encode_account(account: &AccountId) -> [u8; ACCOUNT_ENCODING_LEN] {
    account.to_bytes()
}

/// Encode a signed 128-bit amount as big-endian two's complement.
///
/// Fixed 16-byte width removes the need for a length prefix.
pub fn encode_amount(amount: i128) -> [u8; AMOUNT_ENCODING_LEN] {
    amount.to_be_bytes()
}

/// Encode an escrow handle as big-endian bytes (used for storage keys).
pub fn encode_escrow_id(id: EscrowId) -> [u8; 8] {
    id.value().to_be_bytes()
}

/// Build the commitment preimage: `account || amount || salt`.
///
/// The first two fields are fixed-width, so the encoding is injective: two
/// distinct `(account, amount, salt)` triples always produce distinct byte
/// strings. The salt carries no length prefix and MUST remain the final
/// field.
pub fn commitment_preimage(owner: &AccountId, amount: i128, salt: &[u8]) -> Vec<u8> {
    let mut preimage = Vec::with_capacity(ACCOUNT_ENCODING_LEN + AMOUNT_ENCODING_LEN + salt.len());
    preimage.extend_from_slice(&encode_account(owner));
    preimage.extend_from_slice(&encode_amount(amount));
    preimage.extend_from_slice(salt);
    preimage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_account_fixed_width() {
        let account = AccountId::new();
        assert_eq!(encode_account(&account).len(), ACCOUNT_ENCODING_LEN);
    }

    #[test]
    fn test_encode_amount_big_endian() {
        let bytes = encode_amount(1);
        assert_eq!(bytes[15], 1);
        assert!(bytes[..15].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_amount_negative_twos_complement() {
        let bytes = encode_amount(-1);
        assert!(bytes.iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_encode_amount_matches_std() {
        let amount: i128 = 1_500_000;
        assert_eq!(encode_amount(amount), amount.to_be_bytes());
    }

    #[test]
    fn test_preimage_layout() {
        let owner = AccountId::from_bytes([7u8; 16]);
        let salt = [42u8, 13, 99];
        let preimage = commitment_preimage(&owner, 5, &salt);

        assert_eq!(preimage.len(), 16 + 16 + 3);
        assert_eq!(&preimage[..16], &[7u8; 16]);
        assert_eq!(&preimage[16..32], &5i128.to_be_bytes());
        assert_eq!(&preimage[32..], &salt);
    }

    #[test]
    fn test_preimage_empty_salt() {
        let owner = AccountId::from_bytes([1u8; 16]);
        let preimage = commitment_preimage(&owner, 0, &[]);
        assert_eq!(preimage.len(), 32);
    }

    #[test]
    fn test_preimage_distinct_fields_distinct_bytes() {
        // Moving a byte between the amount tail and the salt head must change
        // the preimage — the fixed amount width prevents boundary shifting.
        let owner = AccountId::from_bytes([0u8; 16]);
        let a = commitment_preimage(&owner, 0x01, &[0x02]);
        let b = commitment_preimage(&owner, 0x0102, &[]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_encode_escrow_id() {
        assert_eq!(encode_escrow_id(EscrowId::new(258)), [0, 0, 0, 0, 0, 0, 1, 2]);
    }
}
