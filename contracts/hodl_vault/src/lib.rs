//! HODL Vault Contract
//!
//! Lets any address lock a token for a window of its choosing together with
//! an early-exit penalty ratio. Each owner may hold several locks, addressed
//! by index in creation order. After the window elapses the owner redeems the
//! full amount; before that, `force_redeem` returns the amount minus the
//! penalty and routes the penalty to the configured receiver. A redeemed lock
//! can be claimed once for a receipt NFT recording its terms.
//!
//! ## Lock lifecycle
//!
//! ```text
//! Active --redeem (now >= unlock)--------------> Redeemed
//! Active --force_redeem (now >= unlock)--------> Redeemed
//! Active --force_redeem (now < unlock)---------> ForceRedeemed
//! Redeemed | ForceRedeemed --claim-------------> Claimed
//! ```
//!
//! - **Locks are never deleted**: a finished lock keeps its terminal status.
//! - **Checks-Effects-Interactions**: storage is updated before payouts.
//! - **Auth-gated mutations**: `owner.require_auth()` on every lock operation.

#![no_std]

mod events;
mod math;
mod token_integration;
mod types;
mod validation;

pub use hodl_common::VaultError;
pub use types::{Lock, LockStatus, VaultConfig};
pub use validation::{DEFAULT_MAX_LOCKS_PER_USER, DEFAULT_MAX_LOCK_WINDOW, MAX_PENALTY_RATIO};

use hodl_common::{ReceiptInfo, ReceiptMinterClient};
use soroban_sdk::{contract, contractimpl, Address, Env};
use types::DataKey;

#[cfg(test)]
mod test_helpers;


#[cfg(test)]
mod test_events;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_admin(e: &Env, caller: &Address) -> Result<(), VaultError> {
    caller.require_auth();
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(VaultError::NotInitialized)?;
    if stored != *caller {
        return Err(VaultError::NotAdmin);
    }
    Ok(())
}

fn instance_get<V>(e: &Env, key: &DataKey) -> Result<V, VaultError>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    e.storage()
        .instance()
        .get(key)
        .ok_or(VaultError::NotInitialized)
}

fn lock_count_of(e: &Env, owner: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::LockCount(owner.clone()))
        .unwrap_or(0)
}

fn load_lock(e: &Env, owner: &Address, index: u32) -> Result<Lock, VaultError> {
    e.storage()
        .persistent()
        .get(&DataKey::Lock(owner.clone(), index))
        .ok_or(VaultError::LockNotFound)
}

fn store_lock(e: &Env, owner: &Address, index: u32, lock: &Lock) {
    e.storage()
        .persistent()
        .set(&DataKey::Lock(owner.clone(), index), lock);
}

/// Pays out the full remaining amount and marks the lock `Redeemed`.
fn settle_full(e: &Env, owner: &Address, index: u32, mut lock: Lock) -> Result<Lock, VaultError> {
    lock.advance(LockStatus::Redeemed)?;
    lock.redeem_at = e.ledger().timestamp();
    // CEI: persist before transfer.
    store_lock(e, owner, index, &lock);

    token_integration::transfer_from_vault(e, owner, lock.amount)?;
    events::emit_redeemed(e, owner, index, lock.amount);
    Ok(lock)
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct HodlVault;

#[contractimpl]
impl HodlVault {
    // ── Admin setup ────────────────────────────────────────────────────────

    /// One-time initialization. Stores `admin`, the locked `token` and the
    /// `receipt` NFT contract. The admin is the initial penalty receiver.
    pub fn initialize(
        e: Env,
        admin: Address,
        token: Address,
        receipt: Address,
    ) -> Result<(), VaultError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(VaultError::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Token, &token);
        e.storage().instance().set(&DataKey::Receipt, &receipt);
        e.storage()
            .instance()
            .set(&DataKey::PenaltyReceiver, &admin);
        e.storage()
            .instance()
            .set(&DataKey::MaxLocksPerUser, &DEFAULT_MAX_LOCKS_PER_USER);
        e.storage()
            .instance()
            .set(&DataKey::MaxLockWindow, &DEFAULT_MAX_LOCK_WINDOW);
        Ok(())
    }

    /// Set the address that receives forfeited penalties.
    pub fn set_penalty_receiver(e: Env, admin: Address, receiver: Address) -> Result<(), VaultError> {
        require_admin(&e, &admin)?;
        e.storage()
            .instance()
            .set(&DataKey::PenaltyReceiver, &receiver);
        events::emit_penalty_receiver_set(&e, &receiver);
        Ok(())
    }

    /// Cap the number of locks a single owner may create. Existing locks are
    /// unaffected; only new `lock` calls are checked.
    pub fn set_max_locks_per_user(e: Env, admin: Address, max_locks: u32) -> Result<(), VaultError> {
        require_admin(&e, &admin)?;
        e.storage()
            .instance()
            .set(&DataKey::MaxLocksPerUser, &max_locks);
        events::emit_max_locks_set(&e, max_locks);
        Ok(())
    }

    /// Set the longest lock window accepted by `lock`. Must be positive.
    pub fn set_max_lock_window(e: Env, admin: Address, max_window: u64) -> Result<(), VaultError> {
        require_admin(&e, &admin)?;
        if max_window == 0 {
            return Err(VaultError::InvalidLockWindow);
        }
        e.storage()
            .instance()
            .set(&DataKey::MaxLockWindow, &max_window);
        events::emit_max_window_set(&e, max_window);
        Ok(())
    }

    // ── Lock lifecycle ─────────────────────────────────────────────────────

    /// Lock `amount` tokens for `lock_window` seconds with an early-exit
    /// `penalty` ratio. Returns the index of the new lock.
    ///
    /// Requirements:
    /// - `amount` > 0
    /// - 0 < `lock_window` <= max lock window
    /// - `penalty` <= 100
    /// - owner holds fewer than the max number of locks
    /// - owner has approved the vault to spend `amount`
    pub fn lock(
        e: Env,
        owner: Address,
        amount: i128,
        lock_window: u64,
        penalty: u32,
    ) -> Result<u32, VaultError> {
        owner.require_auth();

        let max_window: u64 = instance_get(&e, &DataKey::MaxLockWindow)?;
        let max_locks: u32 = instance_get(&e, &DataKey::MaxLocksPerUser)?;

        validation::validate_amount(amount)?;
        validation::validate_lock_window(lock_window, max_window)?;
        validation::validate_penalty(penalty)?;

        let index = lock_count_of(&e, &owner);
        if index >= max_locks {
            return Err(VaultError::LockLimitExceeded);
        }

        let lock_at = e.ledger().timestamp();
        let unlock_time = lock_at
            .checked_add(lock_window)
            .ok_or(VaultError::Overflow)?;

        // Pull tokens in first (owner must have approved).
        token_integration::transfer_into_vault(&e, &owner, amount)?;

        let lock = Lock {
            amount,
            amount_record: amount,
            lock_window,
            lock_at,
            unlock_time,
            penalty,
            redeem_at: 0,
            claim_at: 0,
            status: LockStatus::Active,
            receipt_id: None,
        };
        store_lock(&e, &owner, index, &lock);
        e.storage()
            .persistent()
            .set(&DataKey::LockCount(owner.clone()), &(index + 1));

        events::emit_lock_created(&e, &owner, index, amount, lock_window, penalty, unlock_time);

        Ok(index)
    }

    /// Withdraw the full amount of an `Active` lock whose window has elapsed.
    pub fn redeem(e: Env, owner: Address, index: u32) -> Result<Lock, VaultError> {
        owner.require_auth();

        let lock = load_lock(&e, &owner, index)?;
        if lock.status != LockStatus::Active {
            return Err(VaultError::InvalidLockStatus);
        }
        if !lock.is_unlocked(e.ledger().timestamp()) {
            return Err(VaultError::LockNotExpired);
        }

        settle_full(&e, &owner, index, lock)
    }

    /// Withdraw an `Active` lock regardless of timing.
    ///
    /// After the window this is exactly `redeem`. Before it, the owner gets
    /// `amount * (100 - penalty) / 100`, the rest goes to the penalty
    /// receiver, and the lock becomes `ForceRedeemed` with `amount` set to
    /// what was returned.
    pub fn force_redeem(e: Env, owner: Address, index: u32) -> Result<Lock, VaultError> {
        owner.require_auth();

        let mut lock = load_lock(&e, &owner, index)?;
        if lock.status != LockStatus::Active {
            return Err(VaultError::InvalidLockStatus);
        }

        let now = e.ledger().timestamp();
        if lock.is_unlocked(now) {
            return settle_full(&e, &owner, index, lock);
        }

        let (returned, forfeited) = math::penalty_split(lock.amount, lock.penalty)?;
        let receiver: Address = instance_get(&e, &DataKey::PenaltyReceiver)?;

        lock.advance(LockStatus::ForceRedeemed)?;
        lock.amount = returned;
        lock.redeem_at = now;
        // CEI: persist before transfers.
        store_lock(&e, &owner, index, &lock);

        token_integration::transfer_from_vault(&e, &owner, returned)?;
        token_integration::transfer_from_vault(&e, &receiver, forfeited)?;

        events::emit_force_redeemed(&e, &owner, index, returned, forfeited, &receiver);

        Ok(lock)
    }

    /// Exchange a `Redeemed` or `ForceRedeemed` lock for a receipt NFT.
    /// Returns the receipt token id. A lock can be claimed once.
    pub fn claim(e: Env, owner: Address, index: u32) -> Result<u64, VaultError> {
        owner.require_auth();

        let mut lock = load_lock(&e, &owner, index)?;
        if !lock.status.is_redeemed() {
            return Err(VaultError::NotRedeemed);
        }

        let token = token_integration::get_token(&e)?;
        let receipt: Address = instance_get(&e, &DataKey::Receipt)?;

        lock.advance(LockStatus::Claimed)?;
        lock.claim_at = e.ledger().timestamp();

        let info = ReceiptInfo {
            token,
            amount: lock.amount_record,
            lock_at: lock.lock_at,
            unlock_at: lock.unlock_time,
            penalty_ratio: lock.penalty,
        };
        let token_id = match ReceiptMinterClient::new(&e, &receipt).try_mint(
            &e.current_contract_address(),
            &owner,
            &info,
        ) {
            Ok(Ok(token_id)) => token_id,
            Err(Ok(err)) => return Err(err),
            // Anything the receipt contract cannot report as a vault error
            // means it refused to mint for us.
            _ => return Err(VaultError::NotMinter),
        };

        lock.receipt_id = Some(token_id);
        store_lock(&e, &owner, index, &lock);

        events::emit_claimed(&e, &owner, index, token_id);

        Ok(token_id)
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Number of locks `owner` has ever created. Valid indices are
    /// `0..lock_count`.
    pub fn lock_count(e: Env, owner: Address) -> u32 {
        lock_count_of(&e, &owner)
    }

    /// Returns the lock at `index`, or `LockNotFound`.
    pub fn get_lock(e: Env, owner: Address, index: u32) -> Result<Lock, VaultError> {
        load_lock(&e, &owner, index)
    }

    /// Returns `true` if the lock's window has elapsed.
    pub fn is_unlocked(e: Env, owner: Address, index: u32) -> Result<bool, VaultError> {
        let lock = load_lock(&e, &owner, index)?;
        Ok(lock.is_unlocked(e.ledger().timestamp()))
    }

    /// Seconds until the lock's window elapses; 0 once it has.
    pub fn time_remaining(e: Env, owner: Address, index: u32) -> Result<u64, VaultError> {
        let lock = load_lock(&e, &owner, index)?;
        Ok(lock.unlock_time.saturating_sub(e.ledger().timestamp()))
    }

    pub fn token(e: Env) -> Result<Address, VaultError> {
        token_integration::get_token(&e)
    }

    pub fn receipt(e: Env) -> Result<Address, VaultError> {
        instance_get(&e, &DataKey::Receipt)
    }

    pub fn penalty_receiver(e: Env) -> Result<Address, VaultError> {
        instance_get(&e, &DataKey::PenaltyReceiver)
    }

    pub fn max_locks_per_user(e: Env) -> Result<u32, VaultError> {
        instance_get(&e, &DataKey::MaxLocksPerUser)
    }

    pub fn max_lock_window(e: Env) -> Result<u64, VaultError> {
        instance_get(&e, &DataKey::MaxLockWindow)
    }

    /// Snapshot of every configuration value.
    pub fn get_config(e: Env) -> Result<VaultConfig, VaultError> {
        Ok(VaultConfig {
            admin: instance_get(&e, &DataKey::Admin)?,
            token: instance_get(&e, &DataKey::Token)?,
            receipt: instance_get(&e, &DataKey::Receipt)?,
            penalty_receiver: instance_get(&e, &DataKey::PenaltyReceiver)?,
            max_locks_per_user: instance_get(&e, &DataKey::MaxLocksPerUser)?,
            max_lock_window: instance_get(&e, &DataKey::MaxLockWindow)?,
        })
    }
}
