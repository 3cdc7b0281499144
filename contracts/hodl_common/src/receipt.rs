use soroban_sdk::{contractclient, contracttype, Address, Env};

use crate::VaultError;

/// Terms of a finished lock, recorded on the receipt NFT minted at claim time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptInfo {
    /// Token that was locked.
    pub token: Address,
    /// Amount originally locked (before any penalty).
    pub amount: i128,
    /// Ledger timestamp the lock was created.
    pub lock_at: u64,
    /// Ledger timestamp the lock window ended.
    pub unlock_at: u64,
    /// Early-exit penalty ratio, 0-100.
    pub penalty_ratio: u32,
}

/// Interface the vault uses to mint receipts on the receipt contract.
#[contractclient(name = "ReceiptMinterClient")]
pub trait ReceiptMinter {
    fn mint(env: Env, minter: Address, to: Address, info: ReceiptInfo) -> Result<u64, VaultError>;
}
