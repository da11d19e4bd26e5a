//! Privacy Registry — per-account privacy levels with append-only history
//!
//! Each account carries a current privacy level (1..=3) and a log of every
//! successful change. The log records attempted transitions, not distinct
//! values: re-enabling the same level still appends an entry. Entries are
//! immutable once appended and ordered by the host's ledger sequencing.

use serde::{Deserialize, Serialize};
use tracing::debug;
use types::ids::AccountId;

use crate::errors::PrivacyError;
use crate::storage::{DataKey, Storage};

/// Highest selectable privacy level.
pub const MAX_PRIVACY_LEVEL: u32 = 3;

/// One recorded privacy transition.
///
/// `previous_level` is `None` when the account had no privacy record at the
/// time of the change (the "unset" sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyChange {
    pub previous_level: Option<u32>,
    pub new_level: u32,
    pub changed_at: i64,
}

/// Privacy state accessor over contract storage.
///
/// Created per invocation by the host; all persistence goes through the
/// storage snapshot the host commits or discards.
pub struct PrivacyRegistry<'a> {
    storage: &'a mut Storage,
}

impl<'a> PrivacyRegistry<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Set the account's privacy level and append a history entry.
    ///
    /// Fails with `InvalidPrivacyLevel` for level 0 or anything past
    /// `MAX_PRIVACY_LEVEL`; nothing is written on failure.
    pub fn enable_privacy(
        &mut self,
        account: &AccountId,
        level: u32,
        now: i64,
    ) -> Result<PrivacyChange, PrivacyError> {
        if level == 0 || level > MAX_PRIVACY_LEVEL {
            return Err(PrivacyError::InvalidPrivacyLevel {
                level,
                max: MAX_PRIVACY_LEVEL,
            });
        }

        let previous_level = self.privacy_status(account);
        let change = PrivacyChange {
            previous_level,
            new_level: level,
            changed_at: now,
        };

        self.storage.set(&DataKey::PrivacyLevel(*account), &level);

        let mut history = self.privacy_history(account);
        history.push(change);
        self.storage
            .set(&DataKey::PrivacyHistory(*account), &history);

        debug!(%account, ?previous_level, level, "privacy level changed");
        Ok(change)
    }

    /// Current privacy level, or `None` if the account has no record.
    pub fn privacy_status(&self, account: &AccountId) -> Option<u32> {
        self.storage.get(&DataKey::PrivacyLevel(*account))
    }

    /// Full change history in chronological order. Re-readable; empty for
    /// unknown accounts.
    pub fn privacy_history(&self, account: &AccountId) -> Vec<PrivacyChange> {
        self.storage
            .get(&DataKey::PrivacyHistory(*account))
            .unwrap_or_default()
    }
}
