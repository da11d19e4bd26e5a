//! Contract-specific error types
//!
//! Comprehensive error taxonomy for commitment, privacy, escrow, vault, and
//! host operations. Input errors abort the current invocation with state
//! unchanged; they are surfaced to the caller verbatim, never coerced or
//! clamped.

use thiserror::Error;
use types::ids::EscrowId;

/// Commitment-engine errors
///
/// These mark malformed inputs (caller bugs). A commitment that simply does
/// not match is a normal `false` verification outcome, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    #[error("Commitment amount must be non-negative")]
    InvalidAmount,

    #[error("Salt too long: {len} bytes, bound is {max}")]
    SaltTooLong { len: usize, max: usize },
}

/// Privacy-registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrivacyError {
    #[error("Invalid privacy level: {level}, allowed range is 1..={max}")]
    InvalidPrivacyLevel { level: u32, max: u32 },
}

/// Vault collaborator errors
///
/// Raised by the value-transfer layer; escrow operations surface them
/// through [`EscrowError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i128, available: i128 },

    #[error("Unauthorized: account is frozen")]
    Unauthorized,

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Escrow lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EscrowError {
    #[error("Invalid escrow parameters: {reason}")]
    InvalidEscrowParameters { reason: String },

    #[error("Escrow not found: {escrow_id}")]
    EscrowNotFound { escrow_id: EscrowId },

    #[error("Escrow already finalized: status is {status}")]
    EscrowAlreadyFinalized { status: String },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i128, available: i128 },

    #[error("Unauthorized: account is frozen")]
    Unauthorized,

    #[error("Arithmetic overflow applying escrow funds")]
    BalanceOverflow,
}

impl From<VaultError> for EscrowError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::InsufficientFunds {
                required,
                available,
            } => Self::InsufficientFunds {
                required,
                available,
            },
            VaultError::Unauthorized => Self::Unauthorized,
            VaultError::Overflow => Self::BalanceOverflow,
        }
    }
}

/// Admin and pause errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("Contract already initialized")]
    AlreadyInitialized,

    #[error("Unauthorized: caller is not admin")]
    Unauthorized,

    #[error("Contract is paused")]
    ContractPaused,
}

/// Top-level contract error for host dispatch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Commitment error: {0}")]
    Commitment(#[from] CommitmentError),

    #[error("Privacy error: {0}")]
    Privacy(#[from] PrivacyError),

    #[error("Escrow error: {0}")]
    Escrow(#[from] EscrowError),

    #[error("Admin error: {0}")]
    Admin(#[from] AdminError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_error_display() {
        let err = CommitmentError::SaltTooLong { len: 257, max: 256 };
        assert_eq!(err.to_string(), "Salt too long: 257 bytes, bound is 256");
    }

    #[test]
    fn test_privacy_error_display() {
        let err = PrivacyError::InvalidPrivacyLevel { level: 9, max: 3 };
        assert!(err.to_string().contains("9"));
        assert!(err.to_string().contains("1..=3"));
    }

    #[test]
    fn test_escrow_error_display() {
        let err = EscrowError::EscrowNotFound {
            escrow_id: EscrowId::new(12),
        };
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_escrow_error_from_vault() {
        let vault_err = VaultError::InsufficientFunds {
            required: 100,
            available: 40,
        };
        let escrow_err: EscrowError = vault_err.into();
        assert_eq!(
            escrow_err,
            EscrowError::InsufficientFunds {
                required: 100,
                available: 40
            }
        );

        assert_eq!(
            EscrowError::from(VaultError::Unauthorized),
            EscrowError::Unauthorized
        );
    }

    #[test]
    fn test_contract_error_wraps_modules() {
        let err: ContractError = PrivacyError::InvalidPrivacyLevel { level: 0, max: 3 }.into();
        assert!(matches!(err, ContractError::Privacy(_)));
    }
}
