//! Unique identifier types for platform entities
//!
//! Account identifiers use UUID v7 for time-sortable ordering. The 16-byte
//! canonical form doubles as the fixed-width wire encoding used by the
//! contract serializer, so identifiers concatenate unambiguously with other
//! fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an account
///
/// Opaque, immutable, comparable key. The contract layer only references
/// accounts; it never creates or owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a new AccountId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create from the canonical 16-byte form
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Canonical 16-byte big-endian form
    pub fn to_bytes(&self) -> [u8; 16] {
        *self.0.as_bytes()
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique handle for an escrow record
///
/// Assigned from a persisted monotonic counter at creation time and never
/// reused. Counter-derived rather than random so handles stay compact and
/// insertion-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscrowId(u64);

impl EscrowId {
    /// Wrap a raw counter value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw counter value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EscrowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
