use hodl_common::VaultError;
use soroban_sdk::{contracttype, Address};

// ─── Lock state ────────────────────────────────────────────────────────────

/// Lifecycle status of a lock. Only ever moves forward:
/// `Active -> {Redeemed | ForceRedeemed} -> Claimed`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LockStatus {
    Active = 0,
    Redeemed = 1,
    ForceRedeemed = 2,
    Claimed = 3,
}

impl LockStatus {
    /// Returns `true` if `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: LockStatus) -> bool {
        matches!(
            (self, next),
            (LockStatus::Active, LockStatus::Redeemed)
                | (LockStatus::Active, LockStatus::ForceRedeemed)
                | (LockStatus::Redeemed, LockStatus::Claimed)
                | (LockStatus::ForceRedeemed, LockStatus::Claimed)
        )
    }

    pub fn is_redeemed(self) -> bool {
        matches!(self, LockStatus::Redeemed | LockStatus::ForceRedeemed)
    }
}

/// A single time-bound deposit owned by one address, addressed by
/// `(owner, index)` with indices assigned in creation order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    /// Remaining locked quantity; post-penalty once force-redeemed.
    pub amount: i128,
    /// Quantity locked at creation. Never changes.
    pub amount_record: i128,
    /// Lock period in seconds.
    pub lock_window: u64,
    /// Ledger timestamp at creation.
    pub lock_at: u64,
    /// Pre-computed `lock_at + lock_window`.
    pub unlock_time: u64,
    /// Early-exit penalty ratio, 0-100.
    pub penalty: u32,
    /// Ledger timestamp of redemption; 0 until redeemed.
    pub redeem_at: u64,
    /// Ledger timestamp of claim; 0 until claimed.
    pub claim_at: u64,
    pub status: LockStatus,
    /// Receipt token minted at claim time.
    pub receipt_id: Option<u64>,
}

impl Lock {
    pub fn is_unlocked(&self, now: u64) -> bool {
        now >= self.unlock_time
    }

    /// Moves the lock to `next`, rejecting any edge outside the lifecycle.
    pub fn advance(&mut self, next: LockStatus) -> Result<(), VaultError> {
        if !self.status.can_advance_to(next) {
            return Err(VaultError::InvalidLockStatus);
        }
        self.status = next;
        Ok(())
    }
}

// ─── Configuration snapshot ────────────────────────────────────────────────

/// Read-only view over the vault's instance configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub admin: Address,
    pub token: Address,
    pub receipt: Address,
    pub penalty_receiver: Address,
    pub max_locks_per_user: u32,
    pub max_lock_window: u64,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    /// Contract admin address.
    Admin,
    /// Token being locked (SEP-41 / Stellar asset).
    Token,
    /// Receipt NFT contract.
    Receipt,
    /// Recipient of forfeited penalties.
    PenaltyReceiver,
    /// Per-owner cap on the number of locks.
    MaxLocksPerUser,
    /// Upper bound on `lock_window`, in seconds.
    MaxLockWindow,
    /// Number of locks ever created by an owner.
    LockCount(Address),
    /// Lock record by owner and index.
    Lock(Address, u32),
}
