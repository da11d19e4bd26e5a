//! Execution Host — atomic invocation dispatch over persisted state
//!
//! Models the execution environment the platform runtime supplies: every
//! public operation is a single invocation applied as
//! `apply(call) -> outcome`. The host snapshots storage on entry and, if the
//! operation fails, restores the snapshot and truncates the event log — an
//! invocation either commits whole or leaves no trace.
//!
//! Ordering between invocations is total (the host ticks a sequence number
//! per call); there is no internal concurrency and no locking. Vault
//! collaborator calls are synchronous; modules never write state after a
//! collaborator failure, so the storage rollback is the only mechanism
//! needed for all-or-nothing semantics.

use chrono::Utc;
use tracing::{debug, warn};
use types::ids::{AccountId, EscrowId};

use crate::admin;
use crate::commitment;
use crate::errors::ContractError;
use crate::escrow::{EscrowManager, EscrowRecord};
use crate::events::{
    AdminChanged, ContractEvent, ContractPaused, EscrowCancelled, EscrowCreated, EscrowReleased,
    PrivacyLevelChanged,
};
use crate::privacy::{PrivacyChange, PrivacyRegistry};
use crate::storage::Storage;
use crate::vault::TokenVault;

/// Ledger context: host-assigned time and invocation sequence.
///
/// The timestamp orders history entries and escrow records; it only moves
/// when the operator advances it, keeping invocations deterministic.
#[derive(Debug, Clone, Copy)]
pub struct Ledger {
    timestamp: i64,
    sequence: u64,
}

impl Ledger {
    /// Ledger starting at a fixed timestamp.
    pub fn at(timestamp: i64) -> Self {
        Self {
            timestamp,
            sequence: 0,
        }
    }

    /// Ledger starting at the current wall-clock time.
    pub fn system() -> Self {
        Self::at(Utc::now().timestamp())
    }

    /// Current ledger timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Number of invocations applied so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Advance the ledger clock.
    pub fn advance(&mut self, seconds: i64) {
        self.timestamp += seconds;
    }

    fn tick(&mut self) {
        self.sequence += 1;
    }
}

/// Invocation accounting exposed to the host operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Meter {
    pub invocations: u64,
    pub aborts: u64,
}

/// One public contract operation.
#[derive(Debug, Clone)]
pub enum Call {
    EnablePrivacy {
        account: AccountId,
        level: u32,
    },
    PrivacyStatus {
        account: AccountId,
    },
    PrivacyHistory {
        account: AccountId,
    },
    CreateEscrow {
        from: AccountId,
        to: AccountId,
        amount: i128,
    },
    ReleaseEscrow {
        escrow_id: EscrowId,
    },
    CancelEscrow {
        escrow_id: EscrowId,
    },
    CreateAmountCommitment {
        owner: AccountId,
        amount: i128,
        salt: Vec<u8>,
    },
    VerifyAmountCommitment {
        commitment: [u8; 32],
        owner: AccountId,
        amount: i128,
        salt: Vec<u8>,
    },
    Initialize {
        admin: AccountId,
    },
    SetPaused {
        caller: AccountId,
        paused: bool,
    },
    SetAdmin {
        caller: AccountId,
        new_admin: AccountId,
    },
}

/// Result payload of a committed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    None,
    PrivacyChanged(PrivacyChange),
    Level(Option<u32>),
    History(Vec<PrivacyChange>),
    EscrowId(EscrowId),
    Commitment([u8; 32]),
    Verified(bool),
}

/// Execution host owning storage, ledger context, the vault collaborator,
/// and the append-only event log.
pub struct Host<V: TokenVault> {
    storage: Storage,
    vault: V,
    ledger: Ledger,
    events: Vec<ContractEvent>,
    meter: Meter,
}

impl<V: TokenVault> Host<V> {
    /// Create a host over empty storage.
    pub fn new(vault: V, ledger: Ledger) -> Self {
        Self::with_storage(Storage::new(), vault, ledger)
    }

    /// Create a host over existing storage (e.g. a restored checkpoint).
    pub fn with_storage(storage: Storage, vault: V, ledger: Ledger) -> Self {
        Self {
            storage,
            vault,
            ledger,
            events: Vec::new(),
            meter: Meter::default(),
        }
    }

    /// Create a host whose ledger starts at wall-clock time.
    pub fn with_wall_clock(vault: V) -> Self {
        Self::new(vault, Ledger::system())
    }

    /// Apply one invocation atomically.
    ///
    /// On failure the storage snapshot is restored and any events appended
    /// during the invocation are discarded; the error is returned verbatim.
    pub fn apply(&mut self, call: Call) -> Result<Outcome, ContractError> {
        let snapshot = self.storage.clone();
        let committed_events = self.events.len();

        self.ledger.tick();
        self.meter.invocations += 1;
        debug!(sequence = self.ledger.sequence(), ?call, "applying invocation");

        let result = self.dispatch(call);
        if let Err(err) = &result {
            self.storage = snapshot;
            self.events.truncate(committed_events);
            self.meter.aborts += 1;
            warn!(sequence = self.ledger.sequence(), %err, "invocation aborted");
        }
        result
    }

    fn dispatch(&mut self, call: Call) -> Result<Outcome, ContractError> {
        let now = self.ledger.timestamp();
        match call {
            Call::EnablePrivacy { account, level } => {
                admin::require_not_paused(&self.storage)?;
                let change =
                    PrivacyRegistry::new(&mut self.storage).enable_privacy(&account, level, now)?;
                self.events
                    .push(ContractEvent::PrivacyLevelChanged(PrivacyLevelChanged {
                        account,
                        previous_level: change.previous_level,
                        new_level: change.new_level,
                        changed_at: change.changed_at,
                    }));
                Ok(Outcome::PrivacyChanged(change))
            }
            Call::PrivacyStatus { account } => {
                let level = PrivacyRegistry::new(&mut self.storage).privacy_status(&account);
                Ok(Outcome::Level(level))
            }
            Call::PrivacyHistory { account } => {
                let history = PrivacyRegistry::new(&mut self.storage).privacy_history(&account);
                Ok(Outcome::History(history))
            }
            Call::CreateEscrow { from, to, amount } => {
                admin::require_not_paused(&self.storage)?;
                let escrow_id = EscrowManager::new(&mut self.storage, &mut self.vault)
                    .create_escrow(&from, &to, amount, now)?;
                self.events.push(ContractEvent::EscrowCreated(EscrowCreated {
                    escrow_id,
                    from,
                    to,
                    amount,
                    created_at: now,
                }));
                Ok(Outcome::EscrowId(escrow_id))
            }
            Call::ReleaseEscrow { escrow_id } => {
                admin::require_not_paused(&self.storage)?;
                let record = EscrowManager::new(&mut self.storage, &mut self.vault)
                    .release_escrow(escrow_id)?;
                self.events
                    .push(ContractEvent::EscrowReleased(EscrowReleased {
                        escrow_id,
                        to: record.to,
                        amount: record.amount,
                        released_at: now,
                    }));
                Ok(Outcome::None)
            }
            Call::CancelEscrow { escrow_id } => {
                admin::require_not_paused(&self.storage)?;
                let record = EscrowManager::new(&mut self.storage, &mut self.vault)
                    .cancel_escrow(escrow_id)?;
                self.events
                    .push(ContractEvent::EscrowCancelled(EscrowCancelled {
                        escrow_id,
                        from: record.from,
                        amount: record.amount,
                        cancelled_at: now,
                    }));
                Ok(Outcome::None)
            }
            Call::CreateAmountCommitment {
                owner,
                amount,
                salt,
            } => {
                let digest = commitment::create_amount_commitment(&owner, amount, &salt)?;
                Ok(Outcome::Commitment(digest))
            }
            Call::VerifyAmountCommitment {
                commitment: claimed,
                owner,
                amount,
                salt,
            } => {
                let matches = commitment::verify_amount_commitment(&claimed, &owner, amount, &salt)?;
                Ok(Outcome::Verified(matches))
            }
            Call::Initialize { admin: new_admin } => {
                admin::initialize(&mut self.storage, &new_admin)?;
                Ok(Outcome::None)
            }
            Call::SetPaused { caller, paused } => {
                admin::set_paused(&mut self.storage, &caller, paused)?;
                self.events.push(ContractEvent::ContractPaused(ContractPaused {
                    paused,
                    changed_at: now,
                }));
                Ok(Outcome::None)
            }
            Call::SetAdmin { caller, new_admin } => {
                let old_admin = admin::set_admin(&mut self.storage, &caller, &new_admin)?;
                self.events.push(ContractEvent::AdminChanged(AdminChanged {
                    old_admin,
                    new_admin,
                    changed_at: now,
                }));
                Ok(Outcome::None)
            }
        }
    }

    // ───────────────────────── Read-only surface ─────────────────────────

    /// Escrow record by id. Query surface for the gateway; no side effects.
    pub fn escrow(&self, escrow_id: EscrowId) -> Option<EscrowRecord> {
        self.storage.get(&crate::storage::DataKey::Escrow(escrow_id))
    }

    /// Contract storage (read-only).
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Vault collaborator (read-only).
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Mutable vault access for operator flows like funding.
    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    /// Ledger context.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Mutable ledger access for advancing the clock.
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Invocation meter.
    pub fn meter(&self) -> Meter {
        self.meter
    }

    // ───────────────────────── Events ─────────────────────────

    /// All events committed so far.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all committed events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }
}
