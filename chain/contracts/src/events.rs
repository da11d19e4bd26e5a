//! Contract events
//!
//! Events are immutable records appended by committed contract operations.
//! The host keeps the append-only log and only appends after an invocation
//! commits, so aborted invocations leave no event behind.

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, EscrowId};

/// Privacy level changed for an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyLevelChanged {
    pub account: AccountId,
    pub previous_level: Option<u32>,
    pub new_level: u32,
    pub changed_at: i64,
}

/// Escrow created and funds reserved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowCreated {
    pub escrow_id: EscrowId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: i128,
    pub created_at: i64,
}

/// Escrow released to its recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowReleased {
    pub escrow_id: EscrowId,
    pub to: AccountId,
    pub amount: i128,
    pub released_at: i64,
}

/// Escrow cancelled and refunded to its payer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowCancelled {
    pub escrow_id: EscrowId,
    pub from: AccountId,
    pub amount: i128,
    pub cancelled_at: i64,
}

/// Contract paused or unpaused by the admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractPaused {
    pub paused: bool,
    pub changed_at: i64,
}

/// Admin rights transferred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminChanged {
    pub old_admin: AccountId,
    pub new_admin: AccountId,
    pub changed_at: i64,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    PrivacyLevelChanged(PrivacyLevelChanged),
    EscrowCreated(EscrowCreated),
    EscrowReleased(EscrowReleased),
    EscrowCancelled(EscrowCancelled),
    ContractPaused(ContractPaused),
    AdminChanged(AdminChanged),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privacy_event_serialization() {
        let event = PrivacyLevelChanged {
            account: AccountId::new(),
            previous_level: None,
            new_level: 2,
            changed_at: 1_700_000_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: PrivacyLevelChanged = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_escrow_created_serialization() {
        let event = EscrowCreated {
            escrow_id: EscrowId::new(7),
            from: AccountId::new(),
            to: AccountId::new(),
            amount: 1_500_000,
            created_at: 1_700_000_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: EscrowCreated = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_contract_event_enum_variant() {
        let event = ContractEvent::EscrowReleased(EscrowReleased {
            escrow_id: EscrowId::new(1),
            to: AccountId::new(),
            amount: 10,
            released_at: 5,
        });
        assert!(matches!(event, ContractEvent::EscrowReleased(_)));
    }
}
