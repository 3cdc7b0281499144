//! # TestCoin Faucet
//!
//! Holds the admin role of a Stellar asset contract and mints a fixed drip
//! to anyone who asks. Used to fund accounts on test networks before they
//! lock into the vault.

#![no_std]

pub use hodl_common::VaultError;

use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

#[contracttype]
pub enum DataKey {
    /// Faucet admin; may change the drip.
    Admin,
    /// Stellar asset administered by this contract.
    Token,
    /// Amount minted per `faucet` call.
    Drip,
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

#[contract]
pub struct TestCoinFaucet;

#[contractimpl]
impl TestCoinFaucet {
    /// One-time initialization. The faucet contract must already be the
    /// admin of `token`.
    pub fn initialize(e: Env, admin: Address, token: Address, drip: i128) -> Result<(), VaultError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(VaultError::AlreadyInitialized);
        }
        if drip <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Token, &token);
        e.storage().instance().set(&DataKey::Drip, &drip);
        Ok(())
    }

    /// Mint one drip to `to`. Returns the amount minted.
    pub fn faucet(e: Env, to: Address) -> Result<i128, VaultError> {
        to.require_auth();
        let token: Address = e
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(VaultError::NotInitialized)?;
        let drip: i128 = e
            .storage()
            .instance()
            .get(&DataKey::Drip)
            .ok_or(VaultError::NotInitialized)?;

        StellarAssetClient::new(&e, &token).mint(&to, &drip);

        e.events()
            .publish((Symbol::new(&e, "faucet_drip"), to), drip);
        Ok(drip)
    }

    pub fn set_drip(e: Env, admin: Address, drip: i128) -> Result<(), VaultError> {
        require_admin(&e, &admin)?;
        if drip <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        e.storage().instance().set(&DataKey::Drip, &drip);
        Ok(())
    }

    pub fn drip(e: Env) -> Result<i128, VaultError> {
        e.storage()
            .instance()
            .get(&DataKey::Drip)
            .ok_or(VaultError::NotInitialized)
    }

    pub fn token(e: Env) -> Result<Address, VaultError> {
        e.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(VaultError::NotInitialized)
    }
}
