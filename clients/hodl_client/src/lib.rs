//! Client-side orchestration for the HODL vault.
//!
//! The [`Orchestrator`] sequences every user intent against the ledger:
//! validate input, check preconditions with read-only queries, have the
//! wallet sign, submit, wait for confirmation, then re-read the account's
//! locks. Ledger and wallet access go through the capability traits in
//! [`ledger`] and [`wallet`]; [`sandbox`] implements them over an in-process
//! Soroban environment with the HODL contracts deployed.

pub mod amount;
pub mod config;
pub mod error;
pub mod ledger;
pub mod lock_window;
pub mod notify;
pub mod orchestrator;
pub mod sandbox;
pub mod view;
pub mod wallet;

pub use config::ClientConfig;
pub use error::{ClientError, EnvironmentError, PreconditionError, ValidationError};
pub use ledger::{ReceiptReader, TokenReader, Transactor, TxEffect, TxId, TxReceipt, TxRequest, VaultReader};
pub use lock_window::LockWindowChoice;
pub use notify::{Notice, Notifier, TracingNotifier};
pub use orchestrator::Orchestrator;
pub use sandbox::{SandboxLedger, SandboxWallet};
pub use view::{LockEntry, LockView};
pub use wallet::{Session, WalletConnector};

pub use hodl_vault::{Lock, LockStatus};
