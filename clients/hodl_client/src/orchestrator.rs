//! Lock lifecycle orchestration.
//!
//! Every write follows the same path: validate input, check preconditions
//! against the ledger, sign through the session's wallet, submit, confirm,
//! then re-read the account's locks. Each step that fails is reported to
//! the [`Notifier`] and returned; nothing is submitted after a failed
//! validation or precondition.

use hodl_common::ReceiptInfo;
use soroban_sdk::Address;
use tracing::{debug, instrument, warn};

use crate::amount::{format_units, parse_units};
use crate::config::ClientConfig;
use crate::error::{ClientError, PreconditionError, ValidationError};
use crate::ledger::{ReceiptReader, TokenReader, Transactor, TxReceipt, TxRequest, VaultReader};
use crate::lock_window::LockWindowChoice;
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::view::{LockEntry, LockView};
use crate::wallet::{Session, WalletConnector};

/// Approvals are granted for the largest representable amount, so one
/// approval covers every later lock.
pub const MAX_ALLOWANCE: i128 = i128::MAX;

const MAX_PENALTY: u32 = 100;

pub struct Orchestrator<L, N = TracingNotifier> {
    ledger: L,
    config: ClientConfig,
    notifier: N,
    locks: Vec<LockEntry>,
    decimals: Option<u32>,
}

impl<L> Orchestrator<L, TracingNotifier>
where
    L: TokenReader + VaultReader + ReceiptReader + Transactor,
{
    pub fn new(ledger: L, config: ClientConfig) -> Self {
        Self::with_notifier(ledger, config, TracingNotifier)
    }
}

impl<L, N> Orchestrator<L, N>
where
    L: TokenReader + VaultReader + ReceiptReader + Transactor,
    N: Notifier,
{
    pub fn with_notifier(ledger: L, config: ClientConfig, notifier: N) -> Self {
        Self {
            ledger,
            config,
            notifier,
            locks: Vec::new(),
            decimals: None,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Locks as of the last refresh.
    pub fn locks(&self) -> &[LockEntry] {
        &self.locks
    }

    /// Token decimals, read once and cached.
    pub async fn decimals(&mut self) -> Result<u32, ClientError> {
        if let Some(decimals) = self.decimals {
            return Ok(decimals);
        }
        let decimals = self.ledger.decimals().await?;
        self.decimals = Some(decimals);
        Ok(decimals)
    }

    /// The account's token balance, formatted for display.
    pub async fn balance(&mut self, account: &Address) -> Result<String, ClientError> {
        let decimals = self.decimals().await?;
        let balance = self.ledger.balance_of(account).await?;
        Ok(format_units(balance, decimals))
    }

    /// What the vault may currently pull from `account`.
    pub async fn vault_allowance(&self, account: &Address) -> Result<i128, ClientError> {
        let vault = self.ledger.vault_address();
        self.ledger.allowance(account, &vault).await
    }

    /// Mints the faucet drip to the session account.
    #[instrument(skip_all, fields(account = ?session.account()))]
    pub async fn claim_test_coin<W: WalletConnector>(
        &mut self,
        session: &Session<'_, W>,
    ) -> Result<TxReceipt, ClientError> {
        let request = TxRequest::Faucet {
            to: session.account().clone(),
        };
        self.execute(session, request).await
    }

    /// Grants the vault an unlimited allowance.
    #[instrument(skip_all, fields(account = ?session.account()))]
    pub async fn approve_spend<W: WalletConnector>(
        &mut self,
        session: &Session<'_, W>,
    ) -> Result<TxReceipt, ClientError> {
        let request = TxRequest::Approve {
            owner: session.account().clone(),
            spender: self.ledger.vault_address(),
            amount: MAX_ALLOWANCE,
        };
        self.execute(session, request).await
    }

    /// Locks `amount` (a decimal string in token units) for one of the
    /// offered windows. Fails without submitting if the input is invalid or
    /// the account's balance or the vault's allowance does not cover the
    /// amount.
    #[instrument(skip_all, fields(account = ?session.account(), %amount, %window, penalty))]
    pub async fn create_lock<W: WalletConnector>(
        &mut self,
        session: &Session<'_, W>,
        amount: &str,
        window: &str,
        penalty: u32,
    ) -> Result<TxReceipt, ClientError> {
        let request = match self.lock_request(session.account(), amount, window, penalty).await {
            Ok(request) => request,
            Err(err) => return Err(self.fail("lock", err)),
        };
        self.execute(session, request).await
    }

    #[instrument(skip_all, fields(account = ?session.account(), index = index))]
    pub async fn redeem<W: WalletConnector>(
        &mut self,
        session: &Session<'_, W>,
        index: u32,
    ) -> Result<TxReceipt, ClientError> {
        let request = TxRequest::Redeem {
            owner: session.account().clone(),
            index,
        };
        self.execute(session, request).await
    }

    #[instrument(skip_all, fields(account = ?session.account(), index = index))]
    pub async fn force_redeem<W: WalletConnector>(
        &mut self,
        session: &Session<'_, W>,
        index: u32,
    ) -> Result<TxReceipt, ClientError> {
        let request = TxRequest::ForceRedeem {
            owner: session.account().clone(),
            index,
        };
        self.execute(session, request).await
    }

    #[instrument(skip_all, fields(account = ?session.account(), index = index))]
    pub async fn claim<W: WalletConnector>(
        &mut self,
        session: &Session<'_, W>,
        index: u32,
    ) -> Result<TxReceipt, ClientError> {
        let request = TxRequest::Claim {
            owner: session.account().clone(),
            index,
        };
        self.execute(session, request).await
    }

    /// Re-reads every lock of `account`, indices `0, 1, 2, ...`, stopping
    /// at the first index that does not resolve.
    pub async fn refresh(&mut self, account: &Address) -> Result<&[LockEntry], ClientError> {
        let count = self.ledger.lock_count(account).await?;
        let mut entries = Vec::with_capacity(count as usize);
        for index in 0..count {
            match self.ledger.lock_at(account, index).await {
                Ok(Some(lock)) => entries.push(LockEntry { index, lock }),
                Ok(None) => {
                    debug!(index, "lock list ends early");
                    break;
                }
                Err(err) => {
                    warn!(index, %err, "lock read failed, truncating list");
                    break;
                }
            }
        }
        self.locks = entries;
        Ok(&self.locks)
    }

    /// Display rows for the cached locks.
    pub async fn lock_views(&mut self) -> Result<Vec<LockView>, ClientError> {
        let decimals = self.decimals().await?;
        Ok(self.locks.iter().map(|entry| entry.render(decimals)).collect())
    }

    pub async fn receipt_count(&self, account: &Address) -> Result<u32, ClientError> {
        self.ledger.receipt_balance(account).await
    }

    /// Receipt NFTs minted for the cached locks, by token id.
    pub async fn receipts(&self) -> Result<Vec<(u64, ReceiptInfo)>, ClientError> {
        let mut receipts = Vec::new();
        for token_id in self.locks.iter().filter_map(|entry| entry.lock.receipt_id) {
            if let Some(info) = self.ledger.receipt_info(token_id).await? {
                receipts.push((token_id, info));
            }
        }
        Ok(receipts)
    }

    async fn lock_request(
        &mut self,
        owner: &Address,
        amount: &str,
        window: &str,
        penalty: u32,
    ) -> Result<TxRequest, ClientError> {
        let decimals = self.decimals().await?;
        let amount = parse_units(amount, decimals)?;
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        let window: LockWindowChoice = window.parse()?;
        if penalty > MAX_PENALTY {
            return Err(ValidationError::PenaltyOutOfRange(penalty).into());
        }

        let available = self.ledger.balance_of(owner).await?;
        if available < amount {
            return Err(PreconditionError::InsufficientBalance {
                required: amount,
                available,
            }
            .into());
        }

        let granted = self.vault_allowance(owner).await?;
        if granted < amount {
            return Err(PreconditionError::InsufficientAllowance {
                required: amount,
                granted,
            }
            .into());
        }

        Ok(TxRequest::Lock {
            owner: owner.clone(),
            amount,
            lock_window: window.seconds(),
            penalty,
        })
    }

    async fn execute<W: WalletConnector>(
        &mut self,
        session: &Session<'_, W>,
        request: TxRequest,
    ) -> Result<TxReceipt, ClientError> {
        let action = request.action();

        let signed = match session.sign(request) {
            Ok(signed) => signed,
            Err(err) => return Err(self.fail(action, err)),
        };
        let tx = match self.ledger.submit(signed).await {
            Ok(tx) => tx,
            Err(err) => return Err(self.fail(action, err)),
        };
        self.notifier.notify(Notice::Submitted { action, tx });

        let receipt = match self.ledger.confirm(tx).await {
            Ok(receipt) => receipt,
            Err(err) => return Err(self.fail(action, err)),
        };
        self.notifier.notify(Notice::Confirmed { action, tx });

        // The write already landed; a failed re-read only leaves the cache stale.
        if let Err(err) = self.refresh(session.account()).await {
            self.fail("refresh", err);
        }
        Ok(receipt)
    }

    fn fail(&self, action: &'static str, err: ClientError) -> ClientError {
        warn!(action, %err, "action failed");
        self.notifier.notify(Notice::Failed {
            action,
            message: err.to_string(),
        });
        err
    }
}
