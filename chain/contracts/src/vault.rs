//! Vault Collaborator — fund reservation and movement behind a trait seam
//!
//! The contract module never moves funds itself. Escrow operations consume a
//! value-transfer collaborator through the [`TokenVault`] trait: `reserve`
//! holds funds out of the payer's balance, `transfer` pays a held amount out
//! to the recipient, `refund` returns it to the payer. Calls are synchronous
//! within the host invocation; any failure aborts the whole invocation.
//!
//! [`InMemoryVault`] is the reference implementation: per-account balances
//! with a pooled held amount, checked i128 arithmetic, and per-account
//! freezes (a frozen payer cannot reserve).

use std::collections::{HashMap, HashSet};
use types::ids::{AccountId, EscrowId};

use crate::errors::VaultError;

/// Value-transfer collaborator consumed by the escrow manager.
///
/// The `escrow_id` on `transfer`/`refund` identifies the reservation being
/// settled, for the ledger's own audit trail; the amount is carried from the
/// escrow record so the collaborator stays stateless about lifecycles.
pub trait TokenVault {
    /// Hold `amount` out of `from`'s available balance.
    fn reserve(&mut self, from: &AccountId, amount: i128) -> Result<(), VaultError>;

    /// Pay a held `amount` out to `to`.
    fn transfer(&mut self, escrow_id: EscrowId, to: &AccountId, amount: i128)
        -> Result<(), VaultError>;

    /// Return a held `amount` to `from`.
    fn refund(&mut self, escrow_id: EscrowId, from: &AccountId, amount: i128)
        -> Result<(), VaultError>;
}

/// In-memory balance ledger implementing [`TokenVault`].
///
/// Held funds are pooled: a reservation debits the payer's balance into the
/// pool, and settlement pays the pool out. Balances use checked arithmetic
/// throughout.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVault {
    /// Available balance per account
    balances: HashMap<AccountId, i128>,
    /// Accounts barred from reserving funds
    frozen: HashSet<AccountId>,
    /// Total funds held for pending escrows
    held: i128,
}

impl InMemoryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to an account; `amount` must be positive.
    pub fn deposit(&mut self, account: &AccountId, amount: i128) -> Result<(), VaultError> {
        debug_assert!(amount > 0, "deposit amount must be positive");
        let balance = self.balances.entry(*account).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(VaultError::Overflow)?;
        Ok(())
    }

    /// Available balance for an account.
    pub fn balance(&self, account: &AccountId) -> i128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Total funds currently held for pending escrows.
    pub fn held(&self) -> i128 {
        self.held
    }

    /// Bar an account from reserving funds.
    pub fn freeze(&mut self, account: &AccountId) {
        self.frozen.insert(*account);
    }

    /// Lift a freeze.
    pub fn unfreeze(&mut self, account: &AccountId) {
        self.frozen.remove(account);
    }

    /// Check whether an account is frozen.
    pub fn is_frozen(&self, account: &AccountId) -> bool {
        self.frozen.contains(account)
    }

    fn debit_held(&mut self, amount: i128) -> Result<(), VaultError> {
        if self.held < amount {
            return Err(VaultError::InsufficientFunds {
                required: amount,
                available: self.held,
            });
        }
        self.held -= amount;
        Ok(())
    }
}

impl TokenVault for InMemoryVault {
    fn reserve(&mut self, from: &AccountId, amount: i128) -> Result<(), VaultError> {
        if self.frozen.contains(from) {
            return Err(VaultError::Unauthorized);
        }

        let available = self.balance(from);
        if available < amount {
            return Err(VaultError::InsufficientFunds {
                required: amount,
                available,
            });
        }

        let held = self.held.checked_add(amount).ok_or(VaultError::Overflow)?;
        self.balances.insert(*from, available - amount);
        self.held = held;
        Ok(())
    }

    fn transfer(
        &mut self,
        _escrow_id: EscrowId,
        to: &AccountId,
        amount: i128,
    ) -> Result<(), VaultError> {
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        self.debit_held(amount)?;
        self.balances.insert(*to, credited);
        Ok(())
    }

    fn refund(
        &mut self,
        _escrow_id: EscrowId,
        from: &AccountId,
        amount: i128,
    ) -> Result<(), VaultError> {
        let credited = self
            .balance(from)
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        self.debit_held(amount)?;
        self.balances.insert(*from, credited);
        Ok(())
    }
}
