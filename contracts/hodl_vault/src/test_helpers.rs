//! Shared test helpers for hodl_vault tests.

#![cfg(test)]

use crate::{HodlVault, HodlVaultClient};
use diamond_hand::{DiamondHand, DiamondHandClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

/// One whole token at 18 decimals.
pub const UNIT: i128 = 1_000_000_000_000_000_000;

/// Every test account starts with 100 tokens, like the TestCoin faucet.
pub const DEFAULT_MINT: i128 = 100 * UNIT;

/// Lock window used by most scenarios.
pub const WINDOW: u64 = 1_000;

/// Ledger timestamp the scenarios start at.
pub const START: u64 = 1_700_000_000;

pub struct VaultFixture<'a> {
    pub client: HodlVaultClient<'a>,
    pub receipt: DiamondHandClient<'a>,
    pub admin: Address,
    pub owner: Address,
    pub penalty_receiver: Address,
    pub token: Address,
    pub contract_id: Address,
}

impl VaultFixture<'_> {
    pub fn token(&self) -> TokenClient<'_> {
        TokenClient::new(&self.client.env, &self.token)
    }

    pub fn balance(&self, who: &Address) -> i128 {
        self.token().balance(who)
    }

    /// Mints the default amount to a fresh account and approves the vault.
    pub fn funded_user(&self) -> Address {
        let e = &self.client.env;
        let user = Address::generate(e);
        fund(e, &self.token, &user, &self.contract_id);
        user
    }
}

fn fund(e: &Env, token: &Address, user: &Address, spender: &Address) {
    StellarAssetClient::new(e, token).mint(user, &DEFAULT_MINT);
    let expiry_ledger = e.ledger().sequence().saturating_add(10_000);
    TokenClient::new(e, token).approve(user, spender, &DEFAULT_MINT, &expiry_ledger);
}

pub fn set_time(e: &Env, timestamp: u64) {
    e.ledger().with_mut(|li| li.timestamp = timestamp);
}

/// Deploys token, receipt and vault; grants the vault the minter role, sets
/// a dedicated penalty receiver and funds `owner` with an approval.
pub fn setup(e: &Env) -> VaultFixture<'_> {
    e.mock_all_auths();
    set_time(e, START);

    let admin = Address::generate(e);
    let owner = Address::generate(e);
    let penalty_receiver = Address::generate(e);

    let token = e
        .register_stellar_asset_contract_v2(admin.clone())
        .address();

    let receipt_id = e.register(DiamondHand, ());
    let receipt = DiamondHandClient::new(e, &receipt_id);
    receipt.initialize(&admin);

    let contract_id = e.register(HodlVault, ());
    let client = HodlVaultClient::new(e, &contract_id);
    client.initialize(&admin, &token, &receipt_id);
    client.set_penalty_receiver(&admin, &penalty_receiver);
    receipt.set_minter(&admin, &contract_id, &true);

    fund(e, &token, &owner, &contract_id);

    VaultFixture {
        client,
        receipt,
        admin,
        owner,
        penalty_receiver,
        token,
        contract_id,
    }
}
