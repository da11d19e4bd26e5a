//! Escrow Lifecycle — creation, release, cancellation
//!
//! An escrow is created `Pending` after the vault collaborator reserves the
//! payer's funds, and transitions exactly once to `Released` (funds to the
//! recipient) or `Cancelled` (funds back to the payer). Terminal records are
//! retained for audit and never mutated again; a retry against a terminal
//! record fails before the collaborator is re-invoked.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use types::ids::{AccountId, EscrowId};

use crate::errors::EscrowError;
use crate::storage::{DataKey, Storage};
use crate::vault::TokenVault;

/// Status of an escrow record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowStatus {
    /// Funds held, awaiting a finalization decision
    Pending,
    /// Funds paid out to the recipient (terminal)
    Released,
    /// Funds returned to the payer (terminal)
    Cancelled,
}

impl EscrowStatus {
    /// Whether this status admits no further transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EscrowStatus::Pending)
    }
}

impl fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EscrowStatus::Pending => "Pending",
            EscrowStatus::Released => "Released",
            EscrowStatus::Cancelled => "Cancelled",
        };
        write!(f, "{s}")
    }
}

/// A single escrow record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowRecord {
    pub escrow_id: EscrowId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: i128,
    pub status: EscrowStatus,
    pub created_at: i64,
}

/// Escrow lifecycle manager over contract storage and the vault seam.
///
/// Created per invocation by the host. Fund movement happens strictly before
/// the corresponding record write, so a collaborator failure aborts with no
/// partial record.
pub struct EscrowManager<'a, V: TokenVault> {
    storage: &'a mut Storage,
    vault: &'a mut V,
}

impl<'a, V: TokenVault> EscrowManager<'a, V> {
    pub fn new(storage: &'a mut Storage, vault: &'a mut V) -> Self {
        Self { storage, vault }
    }

    /// Reserve funds and persist a new `Pending` escrow.
    ///
    /// Validates `from != to` and `amount > 0`, then invokes the vault's
    /// reserve. A reserve failure surfaces as `InsufficientFunds` or
    /// `Unauthorized` and leaves no record behind.
    pub fn create_escrow(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: i128,
        now: i64,
    ) -> Result<EscrowId, EscrowError> {
        if from == to {
            return Err(EscrowError::InvalidEscrowParameters {
                reason: "sender and recipient must differ".to_string(),
            });
        }
        if amount <= 0 {
            return Err(EscrowError::InvalidEscrowParameters {
                reason: "amount must be positive".to_string(),
            });
        }

        self.vault.reserve(from, amount)?;

        let escrow_id = self.next_escrow_id();
        let record = EscrowRecord {
            escrow_id,
            from: *from,
            to: *to,
            amount,
            status: EscrowStatus::Pending,
            created_at: now,
        };
        self.storage.set(&DataKey::Escrow(escrow_id), &record);

        debug!(%escrow_id, %from, %to, amount, "escrow created");
        Ok(escrow_id)
    }

    /// Pay a pending escrow out to its recipient.
    pub fn release_escrow(&mut self, escrow_id: EscrowId) -> Result<EscrowRecord, EscrowError> {
        let mut record = self.load_pending(escrow_id)?;

        self.vault.transfer(escrow_id, &record.to, record.amount)?;

        record.status = EscrowStatus::Released;
        self.storage.set(&DataKey::Escrow(escrow_id), &record);

        debug!(%escrow_id, to = %record.to, amount = record.amount, "escrow released");
        Ok(record)
    }

    /// Return a pending escrow's funds to its payer.
    pub fn cancel_escrow(&mut self, escrow_id: EscrowId) -> Result<EscrowRecord, EscrowError> {
        let mut record = self.load_pending(escrow_id)?;

        self.vault.refund(escrow_id, &record.from, record.amount)?;

        record.status = EscrowStatus::Cancelled;
        self.storage.set(&DataKey::Escrow(escrow_id), &record);

        debug!(%escrow_id, from = %record.from, amount = record.amount, "escrow cancelled");
        Ok(record)
    }

    /// Read an escrow record. Query surface for the gateway; no side effects.
    pub fn escrow(&self, escrow_id: EscrowId) -> Option<EscrowRecord> {
        self.storage.get(&DataKey::Escrow(escrow_id))
    }

    /// Load a record that must still be `Pending`.
    ///
    /// The terminal check runs before any collaborator call, making
    /// finalization exactly-once.
    fn load_pending(&self, escrow_id: EscrowId) -> Result<EscrowRecord, EscrowError> {
        let record: EscrowRecord = self
            .storage
            .get(&DataKey::Escrow(escrow_id))
            .ok_or(EscrowError::EscrowNotFound { escrow_id })?;

        if record.status.is_terminal() {
            return Err(EscrowError::EscrowAlreadyFinalized {
                status: record.status.to_string(),
            });
        }
        Ok(record)
    }

    /// Allocate the next escrow handle from the persisted counter.
    fn next_escrow_id(&mut self) -> EscrowId {
        let count: u64 = self.storage.get(&DataKey::EscrowCounter).unwrap_or(0);
        let next = count + 1;
        self.storage.set(&DataKey::EscrowCounter, &next);
        EscrowId::new(next)
    }
}
