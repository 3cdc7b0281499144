//! Capabilities the orchestrator needs from a ledger connection.
//!
//! Reads are split per contract (token, vault, receipt) so a test double
//! only has to answer what it is asked. Writes go through [`Transactor`]:
//! `submit` hands over a signed request and returns its id, `confirm`
//! resolves once the ledger has applied or refused it.

use core::fmt;

use hodl_common::ReceiptInfo;
use hodl_vault::Lock;
use soroban_sdk::Address;

use crate::error::ClientError;

/// A state-changing call, before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxRequest {
    Approve {
        owner: Address,
        spender: Address,
        amount: i128,
    },
    Lock {
        owner: Address,
        amount: i128,
        lock_window: u64,
        penalty: u32,
    },
    Redeem {
        owner: Address,
        index: u32,
    },
    ForceRedeem {
        owner: Address,
        index: u32,
    },
    Claim {
        owner: Address,
        index: u32,
    },
    Faucet {
        to: Address,
    },
}

impl TxRequest {
    /// The account whose authorization the request needs.
    pub fn signer(&self) -> &Address {
        match self {
            TxRequest::Approve { owner, .. }
            | TxRequest::Lock { owner, .. }
            | TxRequest::Redeem { owner, .. }
            | TxRequest::ForceRedeem { owner, .. }
            | TxRequest::Claim { owner, .. } => owner,
            TxRequest::Faucet { to } => to,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            TxRequest::Approve { .. } => "approve",
            TxRequest::Lock { .. } => "lock",
            TxRequest::Redeem { .. } => "redeem",
            TxRequest::ForceRedeem { .. } => "force_redeem",
            TxRequest::Claim { .. } => "claim",
            TxRequest::Faucet { .. } => "faucet",
        }
    }
}

/// A request the wallet has signed for a given network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTx {
    pub request: TxRequest,
    pub signer: Address,
    pub network: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxId(pub u64);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// What a confirmed transaction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEffect {
    Approved { amount: i128 },
    Locked { index: u32 },
    Redeemed { index: u32, lock: Lock },
    Claimed { index: u32, token_id: u64 },
    Funded { amount: i128 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub id: TxId,
    pub effect: TxEffect,
}

#[allow(async_fn_in_trait)]
pub trait TokenReader {
    async fn balance_of(&self, account: &Address) -> Result<i128, ClientError>;

    async fn decimals(&self) -> Result<u32, ClientError>;

    async fn allowance(&self, owner: &Address, spender: &Address) -> Result<i128, ClientError>;
}

#[allow(async_fn_in_trait)]
pub trait VaultReader {
    /// Address approvals are granted to.
    fn vault_address(&self) -> Address;

    async fn lock_count(&self, account: &Address) -> Result<u32, ClientError>;

    /// `Ok(None)` once `index` is past the end of the account's locks.
    async fn lock_at(&self, account: &Address, index: u32) -> Result<Option<Lock>, ClientError>;
}

#[allow(async_fn_in_trait)]
pub trait ReceiptReader {
    async fn receipt_balance(&self, account: &Address) -> Result<u32, ClientError>;

    async fn receipt_info(&self, token_id: u64) -> Result<Option<ReceiptInfo>, ClientError>;
}

#[allow(async_fn_in_trait)]
pub trait Transactor {
    async fn submit(&mut self, tx: SignedTx) -> Result<TxId, ClientError>;

    async fn confirm(&mut self, id: TxId) -> Result<TxReceipt, ClientError>;
}
