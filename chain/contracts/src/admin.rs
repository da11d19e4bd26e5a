//! Admin & Pause — governance state persisted in contract storage
//!
//! A single admin account, set once at initialization, may pause the
//! contract or hand admin rights over. Pausing blocks state-mutating
//! operations; read-only queries and the pure commitment functions stay
//! available. Both flags live in the key-value store so the host's
//! snapshot semantics cover them.

use types::ids::AccountId;

use crate::errors::AdminError;
use crate::storage::{DataKey, Storage};

/// Set the admin account. Fails if already initialized.
pub fn initialize(storage: &mut Storage, admin: &AccountId) -> Result<(), AdminError> {
    if storage.has(&DataKey::Admin) {
        return Err(AdminError::AlreadyInitialized);
    }
    storage.set(&DataKey::Admin, admin);
    storage.set(&DataKey::Paused, &false);
    Ok(())
}

/// Current admin account, if initialized.
pub fn admin(storage: &Storage) -> Option<AccountId> {
    storage.get(&DataKey::Admin)
}

/// Require that `caller` is the admin.
pub fn require_admin(storage: &Storage, caller: &AccountId) -> Result<(), AdminError> {
    match admin(storage) {
        Some(current) if current == *caller => Ok(()),
        _ => Err(AdminError::Unauthorized),
    }
}

/// Transfer admin rights. Admin-only; returns the previous admin.
pub fn set_admin(
    storage: &mut Storage,
    caller: &AccountId,
    new_admin: &AccountId,
) -> Result<AccountId, AdminError> {
    let old_admin = admin(storage).ok_or(AdminError::Unauthorized)?;
    if old_admin != *caller {
        return Err(AdminError::Unauthorized);
    }
    storage.set(&DataKey::Admin, new_admin);
    Ok(old_admin)
}

/// Set the paused flag. Admin-only.
pub fn set_paused(storage: &mut Storage, caller: &AccountId, paused: bool) -> Result<(), AdminError> {
    require_admin(storage, caller)?;
    storage.set(&DataKey::Paused, &paused);
    Ok(())
}

/// Check the paused flag. An uninitialized contract is not paused.
pub fn is_paused(storage: &Storage) -> bool {
    storage.get(&DataKey::Paused).unwrap_or(false)
}

/// Require that the contract is not paused. Called at the top of every
/// state-mutating operation.
pub fn require_not_paused(storage: &Storage) -> Result<(), AdminError> {
    if is_paused(storage) {
        return Err(AdminError::ContractPaused);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_once() {
        let mut storage = Storage::new();
        let alice = AccountId::new();

        initialize(&mut storage, &alice).unwrap();
        assert_eq!(admin(&storage), Some(alice));

        let err = initialize(&mut storage, &AccountId::new()).unwrap_err();
        assert_eq!(err, AdminError::AlreadyInitialized);
        assert_eq!(admin(&storage), Some(alice));
    }

    #[test]
    fn test_require_admin() {
        let mut storage = Storage::new();
        let alice = AccountId::new();
        let eve = AccountId::new();

        // Uninitialized: nobody is admin
        assert_eq!(require_admin(&storage, &alice), Err(AdminError::Unauthorized));

        initialize(&mut storage, &alice).unwrap();
        assert!(require_admin(&storage, &alice).is_ok());
        assert_eq!(require_admin(&storage, &eve), Err(AdminError::Unauthorized));
    }

    #[test]
    fn test_set_admin_transfers_rights() {
        let mut storage = Storage::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        initialize(&mut storage, &alice).unwrap();

        let old = set_admin(&mut storage, &alice, &bob).unwrap();
        assert_eq!(old, alice);
        assert_eq!(admin(&storage), Some(bob));
        assert!(require_admin(&storage, &alice).is_err());
    }

    #[test]
    fn test_set_admin_unauthorized() {
        let mut storage = Storage::new();
        let alice = AccountId::new();
        let eve = AccountId::new();
        initialize(&mut storage, &alice).unwrap();

        assert_eq!(
            set_admin(&mut storage, &eve, &eve),
            Err(AdminError::Unauthorized)
        );
    }

    #[test]
    fn test_pause_round_trip() {
        let mut storage = Storage::new();
        let alice = AccountId::new();
        initialize(&mut storage, &alice).unwrap();

        assert!(!is_paused(&storage));
        assert!(require_not_paused(&storage).is_ok());

        set_paused(&mut storage, &alice, true).unwrap();
        assert!(is_paused(&storage));
        assert_eq!(require_not_paused(&storage), Err(AdminError::ContractPaused));

        set_paused(&mut storage, &alice, false).unwrap();
        assert!(require_not_paused(&storage).is_ok());
    }

    #[test]
    fn test_pause_unauthorized() {
        let mut storage = Storage::new();
        let alice = AccountId::new();
        initialize(&mut storage, &alice).unwrap();

        let err = set_paused(&mut storage, &AccountId::new(), true).unwrap_err();
        assert_eq!(err, AdminError::Unauthorized);
        assert!(!is_paused(&storage));
    }

    #[test]
    fn test_uninitialized_not_paused() {
        let storage = Storage::new();
        assert!(!is_paused(&storage));
    }
}
