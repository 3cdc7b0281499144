use soroban_sdk::Address;

use crate::config::ClientConfig;
use crate::error::{ClientError, EnvironmentError};
use crate::ledger::{SignedTx, TxRequest};

/// A browser-style wallet: an extension that may be missing, an account
/// that may not be connected yet, and a user who may refuse to sign.
///
/// Signing covers what a separate signer handle would: the wallet signs as
/// whichever account it currently has selected.
pub trait WalletConnector {
    fn connect(&mut self) -> Result<Address, ClientError>;

    fn disconnect(&mut self);

    fn current_account(&self) -> Option<Address>;

    fn is_active(&self) -> bool {
        self.current_account().is_some()
    }

    /// `None` when there is no wallet extension to ask.
    fn network(&self) -> Option<String>;

    fn sign(&self, request: TxRequest) -> Result<SignedTx, ClientError>;
}

/// A connected account on the expected network.
///
/// Every orchestrator write takes a `Session`, so those checks happen once,
/// up front. The wallet stays borrowed for the session's lifetime and
/// cannot be disconnected underneath it.
#[derive(Debug)]
pub struct Session<'w, W: WalletConnector> {
    wallet: &'w W,
    account: Address,
    network: String,
}

impl<'w, W: WalletConnector> Session<'w, W> {
    pub fn establish(wallet: &'w W, config: &ClientConfig) -> Result<Self, ClientError> {
        let network = wallet.network().ok_or(EnvironmentError::NoWallet)?;
        let account = wallet
            .current_account()
            .ok_or(EnvironmentError::NotConnected)?;
        if network != config.network {
            return Err(EnvironmentError::WrongNetwork {
                expected: config.network.clone(),
                actual: network,
            }
            .into());
        }
        Ok(Self {
            wallet,
            account,
            network,
        })
    }

    pub fn account(&self) -> &Address {
        &self.account
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    /// Signs `request`, which must act for the session's account.
    pub fn sign(&self, request: TxRequest) -> Result<SignedTx, ClientError> {
        if request.signer() != &self.account {
            return Err(EnvironmentError::RequestDenied.into());
        }
        self.wallet.sign(request)
    }
}
