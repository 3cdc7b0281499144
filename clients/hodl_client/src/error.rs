use hodl_common::{ErrorExt, VaultError};
use soroban_sdk::InvokeError;
use thiserror::Error;

/// Malformed or out-of-range user input, caught before anything is signed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount is required")]
    EmptyAmount,

    #[error("Amount `{0}` is not a decimal number")]
    MalformedAmount(String),

    #[error("Amount `{input}` has more than {decimals} decimal places")]
    TooPrecise { input: String, decimals: u32 },

    #[error("Amount `{0}` is too large")]
    AmountOverflow(String),

    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    #[error("Unknown lock window `{0}`")]
    UnknownLockWindow(String),

    #[error("Penalty ratio {0} is outside 0..=100")]
    PenaltyOutOfRange(u32),

    #[error("Invalid value for {key}: `{value}`")]
    InvalidConfig { key: &'static str, value: String },
}

/// Ledger state that makes an action pointless to submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Balance {available} is below the lock amount {required}")]
    InsufficientBalance { required: i128, available: i128 },

    #[error("Allowance {granted} is below the lock amount {required}; approve the vault first")]
    InsufficientAllowance { required: i128, granted: i128 },
}

/// Wallet and network problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    #[error("No wallet extension found; install one to continue")]
    NoWallet,

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Wrong network: expected {expected}, wallet is on {actual}")]
    WrongNetwork { expected: String, actual: String },

    #[error("Request was denied in the wallet")]
    RequestDenied,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The ledger refused the transaction. `reason` is shown verbatim.
    #[error("Transaction rejected: {reason}")]
    Rejected { code: Option<u32>, reason: String },

    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

impl ClientError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        ClientError::Rejected {
            code: None,
            reason: reason.into(),
        }
    }

    /// Contract error code carried by a rejection, if any.
    pub fn code(&self) -> Option<u32> {
        match self {
            ClientError::Rejected { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<VaultError> for ClientError {
    fn from(err: VaultError) -> Self {
        ClientError::Rejected {
            code: Some(err as u32),
            reason: err.description().into(),
        }
    }
}

impl From<soroban_sdk::Error> for ClientError {
    fn from(err: soroban_sdk::Error) -> Self {
        ClientError::rejected(format!("{err:?}"))
    }
}

impl From<InvokeError> for ClientError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::Contract(code) => ClientError::Rejected {
                code: Some(code),
                reason: format!("contract error #{code}"),
            },
            InvokeError::Abort => ClientError::rejected("invocation aborted"),
        }
    }
}
