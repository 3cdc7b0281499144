//! # DiamondHand Receipt Contract
//!
//! Non-fungible receipts for finished HODL locks. Only addresses holding the
//! minter role (the vault) can mint; each receipt stores the lock terms as a
//! [`ReceiptInfo`]. Token ids are sequential from 0.

#![no_std]

pub use hodl_common::{ReceiptInfo, VaultError};

use hodl_common::ReceiptMinter;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

#[contracttype]
pub enum DataKey {
    /// Contract admin; manages the minter role.
    Admin,
    /// Minter role flag per address.
    Minter(Address),
    /// Next token id to mint.
    NextId,
    /// Current owner of a token id.
    Owner(u64),
    /// Lock terms recorded for a token id.
    Info(u64),
    /// Number of receipts held by an address.
    Balance(Address),
}

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

fn read_balance(e: &Env, owner: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone()))
        .unwrap_or(0)
}

fn set_balance(e: &Env, owner: &Address, value: u32) {
    e.storage()
        .persistent()
        .set(&DataKey::Balance(owner.clone()), &value);
}

fn load_owner(e: &Env, token_id: u64) -> Result<Address, VaultError> {
    e.storage()
        .persistent()
        .get(&DataKey::Owner(token_id))
        .ok_or(VaultError::ReceiptNotFound)
}

#[contract]
pub struct DiamondHand;

#[contractimpl]
impl DiamondHand {
    /// One-time initialization.
    pub fn initialize(e: Env, admin: Address) -> Result<(), VaultError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(VaultError::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::NextId, &0_u64);
        Ok(())
    }

    /// Grant or revoke the minter role.
    pub fn set_minter(e: Env, admin: Address, minter: Address, enabled: bool) -> Result<(), VaultError> {
        require_admin(&e, &admin)?;
        let key = DataKey::Minter(minter.clone());
        if enabled {
            e.storage().instance().set(&key, &true);
        } else {
            e.storage().instance().remove(&key);
        }
        e.events()
            .publish((Symbol::new(&e, "minter_set"), minter), enabled);
        Ok(())
    }

    pub fn is_minter(e: Env, minter: Address) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::Minter(minter))
            .unwrap_or(false)
    }

    /// Move a receipt to a new owner.
    pub fn transfer(e: Env, from: Address, to: Address, token_id: u64) -> Result<(), VaultError> {
        from.require_auth();
        let owner = load_owner(&e, token_id)?;
        if owner != from {
            return Err(VaultError::NotReceiptOwner);
        }
        if from == to {
            return Ok(());
        }

        e.storage()
            .persistent()
            .set(&DataKey::Owner(token_id), &to);
        set_balance(&e, &from, read_balance(&e, &from).saturating_sub(1));
        let to_balance = read_balance(&e, &to)
            .checked_add(1)
            .ok_or(VaultError::Overflow)?;
        set_balance(&e, &to, to_balance);

        e.events().publish(
            (Symbol::new(&e, "receipt_transferred"), from, to),
            token_id,
        );
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn balance_of(e: Env, owner: Address) -> u32 {
        read_balance(&e, &owner)
    }

    pub fn owner_of(e: Env, token_id: u64) -> Result<Address, VaultError> {
        load_owner(&e, token_id)
    }

    pub fn token_info(e: Env, token_id: u64) -> Result<ReceiptInfo, VaultError> {
        e.storage()
            .persistent()
            .get(&DataKey::Info(token_id))
            .ok_or(VaultError::ReceiptNotFound)
    }

    /// Number of receipts minted so far.
    pub fn total_supply(e: Env) -> u64 {
        e.storage().instance().get(&DataKey::NextId).unwrap_or(0)
    }
}

#[contractimpl]
impl ReceiptMinter for DiamondHand {
    /// Mint a receipt for `to` recording `info`. `minter` must hold the
    /// minter role. Returns the new token id.
    fn mint(e: Env, minter: Address, to: Address, info: ReceiptInfo) -> Result<u64, VaultError> {
        minter.require_auth();
        let allowed: bool = e
            .storage()
            .instance()
            .get(&DataKey::Minter(minter))
            .unwrap_or(false);
        if !allowed {
            return Err(VaultError::NotMinter);
        }

        let token_id: u64 = e
            .storage()
            .instance()
            .get(&DataKey::NextId)
            .ok_or(VaultError::NotInitialized)?;
        let next = token_id.checked_add(1).ok_or(VaultError::Overflow)?;
        e.storage().instance().set(&DataKey::NextId, &next);

        e.storage()
            .persistent()
            .set(&DataKey::Owner(token_id), &to);
        e.storage()
            .persistent()
            .set(&DataKey::Info(token_id), &info);
        let to_balance = read_balance(&e, &to)
            .checked_add(1)
            .ok_or(VaultError::Overflow)?;
        set_balance(&e, &to, to_balance);

        e.events().publish(
            (Symbol::new(&e, "receipt_minted"), to),
            (token_id, info.amount),
        );

        Ok(token_id)
    }
}
