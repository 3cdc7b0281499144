//! Token helpers for the vault.
//! Centralizes allowance checks and transfers in and out of the vault.

use hodl_common::VaultError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

use crate::types::DataKey;

fn token_client(e: &Env) -> Result<TokenClient<'_>, VaultError> {
    let token = get_token(e)?;
    Ok(TokenClient::new(e, &token))
}

/// @notice Returns the configured token address.
pub fn get_token(e: &Env) -> Result<Address, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(VaultError::NotInitialized)
}

/// @notice Checks that `owner` lets the vault spend at least `amount`.
pub fn require_allowance(e: &Env, owner: &Address, amount: i128) -> Result<(), VaultError> {
    let contract = e.current_contract_address();
    let allowance = token_client(e)?.allowance(owner, &contract);
    if allowance < amount {
        return Err(VaultError::InsufficientAllowance);
    }
    Ok(())
}

/// @notice Pulls `amount` from `owner` into the vault.
/// @dev Requires a prior `approve` with the vault as spender.
pub fn transfer_into_vault(e: &Env, owner: &Address, amount: i128) -> Result<(), VaultError> {
    if amount == 0 {
        return Ok(());
    }
    require_allowance(e, owner, amount)?;
    let contract = e.current_contract_address();
    token_client(e)?.transfer_from(&contract, owner, &contract, &amount);
    Ok(())
}

/// @notice Pays `amount` out of the vault to `recipient`.
pub fn transfer_from_vault(e: &Env, recipient: &Address, amount: i128) -> Result<(), VaultError> {
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    token_client(e)?.transfer(&contract, recipient, &amount);
    Ok(())
}
