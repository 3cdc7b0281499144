#![no_std]

mod receipt;

pub use receipt::{ReceiptInfo, ReceiptMinter, ReceiptMinterClient};

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain so off-chain consumers can route them.
/// @dev    Switch on this value first, then on the specific `VaultError` code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Lock lifecycle errors (codes 200-299).
    Lock,
    /// Receipt NFT errors (codes 300-399).
    Receipt,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  VaultError
/// @notice Canonical error enum shared by the vault, receipt and faucet contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Lock
///   300 - 399 : Receipt
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin.
    NotAdmin = 100,

    /// Caller does not hold the receipt minter role.
    NotMinter = 101,

    /// Caller does not own the receipt being transferred.
    NotReceiptOwner = 102,

    // --- Lock (200-299) ---
    /// Lock amount must be strictly positive.
    InvalidAmount = 200,

    /// Lock window is zero or above the configured maximum.
    InvalidLockWindow = 201,

    /// Penalty ratio is above 100.
    InvalidPenalty = 202,

    /// Owner already holds the maximum number of locks.
    LockLimitExceeded = 203,

    /// No lock exists at the requested index.
    LockNotFound = 204,

    /// Lock is not in the status this operation requires.
    InvalidLockStatus = 205,

    /// Lock window has not elapsed yet.
    LockNotExpired = 206,

    /// Lock must be redeemed or force-redeemed before claiming.
    NotRedeemed = 207,

    /// Owner has not approved the vault to pull the lock amount.
    InsufficientAllowance = 208,

    // --- Receipt (300-399) ---
    /// No receipt exists for the given token id.
    ReceiptNotFound = 300,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every VaultError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for VaultError {
    fn category(&self) -> ErrorCategory {
        match self {
            VaultError::NotInitialized | VaultError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }
            VaultError::NotAdmin | VaultError::NotMinter | VaultError::NotReceiptOwner => {
                ErrorCategory::Authorization
            }
            VaultError::InvalidAmount
            | VaultError::InvalidLockWindow
            | VaultError::InvalidPenalty
            | VaultError::LockLimitExceeded
            | VaultError::LockNotFound
            | VaultError::InvalidLockStatus
            | VaultError::LockNotExpired
            | VaultError::NotRedeemed
            | VaultError::InsufficientAllowance => ErrorCategory::Lock,

            VaultError::ReceiptNotFound => ErrorCategory::Receipt,

            VaultError::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            VaultError::NotInitialized => "Contract has not been initialized",
            VaultError::AlreadyInitialized => "Contract has already been initialized",
            VaultError::NotAdmin => "Caller is not the admin",
            VaultError::NotMinter => "Caller does not hold the minter role",
            VaultError::NotReceiptOwner => "Caller does not own this receipt",
            VaultError::InvalidAmount => "Amount should be greater than 0",
            VaultError::InvalidLockWindow => {
                "Lock window should be greater than 0 and not exceed the max lock window"
            }
            VaultError::InvalidPenalty => "Penalty ratio should be in range 0..100",
            VaultError::LockLimitExceeded => "Lock number limit exceeded",
            VaultError::LockNotFound => "No lock found at this index",
            VaultError::InvalidLockStatus => "Invalid lock status",
            VaultError::LockNotExpired => "Can't redeem now: lock window has not elapsed",
            VaultError::NotRedeemed => "Lock should be in Redeemed or ForceRedeemed status",
            VaultError::InsufficientAllowance => "Insufficient token allowance for the vault",
            VaultError::ReceiptNotFound => "No receipt found for the given token id",
            VaultError::Overflow => "Integer overflow in checked arithmetic",
        }
    }
}

#[cfg(test)]
mod test_errors;
