//! Embedded Key-Value Storage — persisted contract state
//!
//! Backing store for privacy records, escrow records, and admin state:
//! - `BTreeMap` entries for deterministic iteration and serialization
//! - Typed `DataKey`s encoded as injective byte strings (tag + fixed-width id)
//! - SHA-256 state hash over the serialized map
//! - Versioned checkpoint files with integrity verification
//!
//! The host snapshots the whole store on invocation entry and restores it on
//! abort, so mutations never partially commit.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use types::ids::{AccountId, EscrowId};

use crate::serializer;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailure { expected: String, actual: String },

    #[error("Unsupported checkpoint version: {0}")]
    UnsupportedVersion(u32),
}

// ── Keys ────────────────────────────────────────────────────────────

const TAG_PRIVACY_LEVEL: u8 = 0x01;
const TAG_PRIVACY_HISTORY: u8 = 0x02;
const TAG_ESCROW: u8 = 0x03;
const TAG_ESCROW_COUNTER: u8 = 0x04;
const TAG_ADMIN: u8 = 0x05;
const TAG_PAUSED: u8 = 0x06;

/// Typed storage keys for the contract state.
///
/// Each key encodes as a tag byte followed by the fixed-width canonical form
/// of its identifier, so no two keys can collide across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKey {
    PrivacyLevel(AccountId),
    PrivacyHistory(AccountId),
    Escrow(EscrowId),
    EscrowCounter,
    Admin,
    Paused,
}

impl DataKey {
    /// Encode the key as an injective byte string.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            DataKey::PrivacyLevel(account) => {
                let mut key = vec![TAG_PRIVACY_LEVEL];
                key.extend_from_slice(&serializer::encode_account(account));
                key
            }
            DataKey::PrivacyHistory(account) => {
                let mut key = vec![TAG_PRIVACY_HISTORY];
                key.extend_from_slice(&serializer::encode_account(account));
                key
            }
            DataKey::Escrow(id) => {
                let mut key = vec![TAG_ESCROW];
                key.extend_from_slice(&serializer::encode_escrow_id(*id));
                key
            }
            DataKey::EscrowCounter => vec![TAG_ESCROW_COUNTER],
            DataKey::Admin => vec![TAG_ADMIN],
            DataKey::Paused => vec![TAG_PAUSED],
        }
    }
}

// ── Store ───────────────────────────────────────────────────────────

/// In-memory key-value store with deterministic serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl Storage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Read and decode the value under `key`, if present.
    pub fn get<T: DeserializeOwned>(&self, key: &DataKey) -> Option<T> {
        self.entries.get(&key.encode()).map(|bytes| {
            bincode::deserialize(bytes).expect("stored value should decode for its key type")
        })
    }

    /// Encode and write `value` under `key`, replacing any prior value.
    pub fn set<T: Serialize>(&mut self, key: &DataKey, value: &T) {
        let bytes = bincode::serialize(value).expect("value serialization should never fail");
        self.entries.insert(key.encode(), bytes);
    }

    /// Check whether `key` holds a value.
    pub fn has(&self, key: &DataKey) -> bool {
        self.entries.contains_key(&key.encode())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compute a deterministic SHA-256 hash of the full state.
    pub fn state_hash(&self) -> String {
        let bytes =
            bincode::serialize(&self.entries).expect("state serialization should never fail");
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        format!("{:x}", hasher.finalize())
    }
}

// ── Checkpoints ─────────────────────────────────────────────────────

/// Current checkpoint format version.
pub const CHECKPOINT_VERSION: u32 = 1;

/// On-disk checkpoint: versioned state plus an integrity hash.
#[derive(Debug, Serialize, Deserialize)]
struct Checkpoint {
    version: u32,
    state_hash: String,
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl Storage {
    /// Write a checkpoint of the full state to `path`.
    pub fn write_checkpoint(&self, path: &Path) -> Result<(), StorageError> {
        let checkpoint = Checkpoint {
            version: CHECKPOINT_VERSION,
            state_hash: self.state_hash(),
            entries: self.entries.clone(),
        };
        let bytes =
            bincode::serialize(&checkpoint).map_err(|e| StorageError::Codec(e.to_string()))?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a checkpoint from `path`, verifying version and integrity.
    pub fn read_checkpoint(path: &Path) -> Result<Self, StorageError> {
        let bytes = fs::read(path)?;
        let checkpoint: Checkpoint =
            bincode::deserialize(&bytes).map_err(|e| StorageError::Codec(e.to_string()))?;

        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(StorageError::UnsupportedVersion(checkpoint.version));
        }

        let storage = Self {
            entries: checkpoint.entries,
        };
        let actual = storage.state_hash();
        if actual != checkpoint.state_hash {
            return Err(StorageError::IntegrityFailure {
                expected: checkpoint.state_hash,
                actual,
            });
        }

        Ok(storage)
    }
}
