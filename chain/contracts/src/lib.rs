//! Contract Logic for Privacy, Escrow & Amount Commitments
//!
//! This crate implements the payment platform's contract layer: per-account
//! privacy state with an append-only change history, escrow custody with
//! exactly-once finalization, and a placeholder amount-commitment primitive.
//!
//! # Modules
//! - `errors`: Contract-specific error taxonomy
//! - `events`: Contract events appended on committed mutations
//! - `serializer`: Canonical injective byte encoding of commitment inputs
//! - `commitment`: SHA-256 amount commitments (tamper-evident, NOT hiding)
//! - `privacy`: Per-account privacy levels and change history
//! - `escrow`: Escrow lifecycle over the vault collaborator seam
//! - `vault`: Value-transfer trait and in-memory reference ledger
//! - `storage`: Embedded key-value store with checkpoints
//! - `admin`: Admin and pause governance state
//! - `host`: Atomic invocation dispatch (`apply(call) -> outcome`)
//!
//! # Version
//! v0.1.0 — Initial implementation

pub mod admin;
pub mod commitment;
pub mod errors;
pub mod escrow;
pub mod events;
pub mod host;
pub mod privacy;
pub mod serializer;
pub mod storage;
pub mod vault;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "0.1.0";
