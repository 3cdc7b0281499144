//! In-process ledger and wallet.
//!
//! [`SandboxLedger`] deploys the faucet-administered test coin, the receipt
//! contract and the vault into a Soroban test environment, wires them
//! together and answers the orchestrator's reads and writes against it.
//! Submitted transactions are queued and only applied on `confirm`, so a
//! caller sees the same two-step flow a live network gives.

use std::collections::BTreeMap;

use diamond_hand::{DiamondHand, DiamondHandClient};
use hodl_common::{ReceiptInfo, VaultError};
use hodl_vault::{HodlVault, HodlVaultClient, Lock};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env, InvokeError};
use test_coin::{TestCoinFaucet, TestCoinFaucetClient};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{ClientError, EnvironmentError};
use crate::ledger::{
    ReceiptReader, SignedTx, TokenReader, Transactor, TxEffect, TxId, TxReceipt, TxRequest,
    VaultReader,
};
use crate::wallet::WalletConnector;

/// Faucet drip: 100 coins at the asset contract's 7 decimals.
pub const DEFAULT_DRIP: i128 = 1_000_000_000;

/// Addresses of everything [`SandboxLedger::deploy`] set up.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub admin: Address,
    pub penalty_receiver: Address,
    pub token: Address,
    pub faucet: Address,
    pub receipt: Address,
    pub vault: Address,
}

pub struct SandboxLedger {
    env: Env,
    deployment: Deployment,
    network: String,
    approval_ledgers: Option<u32>,
    next_tx: u64,
    pending: BTreeMap<TxId, SignedTx>,
}

/// Unwraps a generated client's `try_*` result.
fn settle<T, C, E>(outcome: Result<Result<T, C>, Result<E, InvokeError>>) -> Result<T, ClientError>
where
    C: core::fmt::Debug,
    ClientError: From<E>,
{
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(conversion)) => Err(ClientError::rejected(format!(
            "malformed result: {conversion:?}"
        ))),
        Err(Ok(err)) => Err(err.into()),
        Err(Err(invoke)) => Err(invoke.into()),
    }
}

impl SandboxLedger {
    /// Registers and initializes all contracts. Authorization is mocked;
    /// the wallet stands in for the user's consent.
    pub fn deploy(env: Env, config: &ClientConfig) -> Self {
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let penalty_receiver = Address::generate(&env);

        let faucet = env.register(TestCoinFaucet, ());
        let token = env
            .register_stellar_asset_contract_v2(faucet.clone())
            .address();
        TestCoinFaucetClient::new(&env, &faucet).initialize(&admin, &token, &DEFAULT_DRIP);

        let receipt = env.register(DiamondHand, ());
        let receipt_client = DiamondHandClient::new(&env, &receipt);
        receipt_client.initialize(&admin);

        let vault = env.register(HodlVault, ());
        let vault_client = HodlVaultClient::new(&env, &vault);
        vault_client.initialize(&admin, &token, &receipt);
        vault_client.set_penalty_receiver(&admin, &penalty_receiver);
        receipt_client.set_minter(&admin, &vault, &true);

        info!(?vault, ?token, ?receipt, network = %config.network, "sandbox deployed");

        Self {
            env,
            deployment: Deployment {
                admin,
                penalty_receiver,
                token,
                faucet,
                receipt,
                vault,
            },
            network: config.network.clone(),
            approval_ledgers: config.approval_ledgers,
            next_tx: 1,
            pending: BTreeMap::new(),
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn generate_account(&self) -> Address {
        Address::generate(&self.env)
    }

    pub fn vault(&self) -> HodlVaultClient<'_> {
        HodlVaultClient::new(&self.env, &self.deployment.vault)
    }

    pub fn token(&self) -> TokenClient<'_> {
        TokenClient::new(&self.env, &self.deployment.token)
    }

    pub fn receipt(&self) -> DiamondHandClient<'_> {
        DiamondHandClient::new(&self.env, &self.deployment.receipt)
    }

    fn faucet(&self) -> TestCoinFaucetClient<'_> {
        TestCoinFaucetClient::new(&self.env, &self.deployment.faucet)
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn set_timestamp(&self, timestamp: u64) {
        self.env.ledger().with_mut(|li| li.timestamp = timestamp);
    }

    pub fn advance_time(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| {
            li.timestamp = li.timestamp.saturating_add(seconds);
            li.sequence_number = li.sequence_number.saturating_add(1);
        });
    }

    /// Last ledger a new approval stays live for: the configured window,
    /// capped at the furthest ledger the network accepts.
    pub fn approval_live_until(&self) -> u32 {
        let info = self.env.ledger().get();
        let max_live_until = info
            .sequence_number
            .saturating_add(info.max_entry_ttl.saturating_sub(1));
        match self.approval_ledgers {
            Some(ledgers) => info
                .sequence_number
                .saturating_add(ledgers)
                .min(max_live_until),
            None => max_live_until,
        }
    }

    /// Transactions submitted but not yet confirmed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn execute(&self, tx: &SignedTx) -> Result<TxEffect, ClientError> {
        match &tx.request {
            TxRequest::Approve {
                owner,
                spender,
                amount,
            } => {
                let live_until = self.approval_live_until();
                settle(self.token().try_approve(owner, spender, amount, &live_until))?;
                Ok(TxEffect::Approved { amount: *amount })
            }
            TxRequest::Lock {
                owner,
                amount,
                lock_window,
                penalty,
            } => settle(self.vault().try_lock(owner, amount, lock_window, penalty))
                .map(|index| TxEffect::Locked { index }),
            TxRequest::Redeem { owner, index } => settle(self.vault().try_redeem(owner, index))
                .map(|lock| TxEffect::Redeemed {
                    index: *index,
                    lock,
                }),
            TxRequest::ForceRedeem { owner, index } => {
                settle(self.vault().try_force_redeem(owner, index)).map(|lock| {
                    TxEffect::Redeemed {
                        index: *index,
                        lock,
                    }
                })
            }
            TxRequest::Claim { owner, index } => settle(self.vault().try_claim(owner, index))
                .map(|token_id| TxEffect::Claimed {
                    index: *index,
                    token_id,
                }),
            TxRequest::Faucet { to } => {
                settle(self.faucet().try_faucet(to)).map(|amount| TxEffect::Funded { amount })
            }
        }
    }
}

impl TokenReader for SandboxLedger {
    async fn balance_of(&self, account: &Address) -> Result<i128, ClientError> {
        settle(self.token().try_balance(account))
    }

    async fn decimals(&self) -> Result<u32, ClientError> {
        settle(self.token().try_decimals())
    }

    async fn allowance(&self, owner: &Address, spender: &Address) -> Result<i128, ClientError> {
        settle(self.token().try_allowance(owner, spender))
    }
}

impl VaultReader for SandboxLedger {
    fn vault_address(&self) -> Address {
        self.deployment.vault.clone()
    }

    async fn lock_count(&self, account: &Address) -> Result<u32, ClientError> {
        settle(self.vault().try_lock_count(account))
    }

    async fn lock_at(&self, account: &Address, index: u32) -> Result<Option<Lock>, ClientError> {
        match self.vault().try_get_lock(account, &index) {
            Err(Ok(VaultError::LockNotFound)) => Ok(None),
            outcome => settle(outcome).map(Some),
        }
    }
}

impl ReceiptReader for SandboxLedger {
    async fn receipt_balance(&self, account: &Address) -> Result<u32, ClientError> {
        settle(self.receipt().try_balance_of(account))
    }

    async fn receipt_info(&self, token_id: u64) -> Result<Option<ReceiptInfo>, ClientError> {
        match self.receipt().try_token_info(&token_id) {
            Err(Ok(VaultError::ReceiptNotFound)) => Ok(None),
            outcome => settle(outcome).map(Some),
        }
    }
}

impl Transactor for SandboxLedger {
    async fn submit(&mut self, tx: SignedTx) -> Result<TxId, ClientError> {
        if tx.network != self.network {
            return Err(EnvironmentError::WrongNetwork {
                expected: self.network.clone(),
                actual: tx.network,
            }
            .into());
        }
        let id = TxId(self.next_tx);
        self.next_tx += 1;
        debug!(%id, action = tx.request.action(), "queued");
        self.pending.insert(id, tx);
        Ok(id)
    }

    async fn confirm(&mut self, id: TxId) -> Result<TxReceipt, ClientError> {
        let tx = self
            .pending
            .remove(&id)
            .ok_or_else(|| ClientError::rejected(format!("unknown transaction {id}")))?;
        let effect = self.execute(&tx)?;
        debug!(%id, ?effect, "applied");
        Ok(TxReceipt { id, effect })
    }
}

/// Wallet double with switches for every failure a real extension shows.
#[derive(Debug, Clone)]
pub struct SandboxWallet {
    account: Address,
    network: String,
    installed: bool,
    connected: bool,
    deny_requests: bool,
}

impl SandboxWallet {
    pub fn new(account: Address, network: impl Into<String>) -> Self {
        Self {
            account,
            network: network.into(),
            installed: true,
            connected: false,
            deny_requests: false,
        }
    }

    /// A browser with no wallet extension.
    pub fn missing(account: Address) -> Self {
        Self {
            installed: false,
            ..Self::new(account, "")
        }
    }

    /// The user refuses every connect and signing prompt while set.
    pub fn set_deny_requests(&mut self, deny: bool) {
        self.deny_requests = deny;
    }

    pub fn switch_network(&mut self, network: impl Into<String>) {
        self.network = network.into();
    }
}

impl WalletConnector for SandboxWallet {
    fn connect(&mut self) -> Result<Address, ClientError> {
        if !self.installed {
            return Err(EnvironmentError::NoWallet.into());
        }
        if self.deny_requests {
            return Err(EnvironmentError::RequestDenied.into());
        }
        self.connected = true;
        Ok(self.account.clone())
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn current_account(&self) -> Option<Address> {
        self.connected.then(|| self.account.clone())
    }

    fn network(&self) -> Option<String> {
        self.installed.then(|| self.network.clone())
    }

    fn sign(&self, request: TxRequest) -> Result<SignedTx, ClientError> {
        if !self.connected {
            return Err(EnvironmentError::NotConnected.into());
        }
        if self.deny_requests || request.signer() != &self.account {
            return Err(EnvironmentError::RequestDenied.into());
        }
        Ok(SignedTx {
            request,
            signer: self.account.clone(),
            network: self.network.clone(),
        })
    }
}
