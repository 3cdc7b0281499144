use chrono::{DateTime, SecondsFormat};
use hodl_vault::{Lock, LockStatus};

use crate::amount::format_units;
use crate::lock_window::LockWindowChoice;

/// A lock as last read from the vault, with its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEntry {
    pub index: u32,
    pub lock: Lock,
}

/// Display strings for one row of the lock list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockView {
    pub index: u32,
    pub amount: String,
    pub init_amount: String,
    pub lock_window: String,
    pub lock_at: String,
    pub unlock_at: String,
    pub penalty: String,
    pub status: &'static str,
}

impl LockEntry {
    pub fn can_redeem(&self, now: u64) -> bool {
        self.lock.status == LockStatus::Active && self.lock.is_unlocked(now)
    }

    pub fn can_force_redeem(&self) -> bool {
        self.lock.status == LockStatus::Active
    }

    pub fn can_claim(&self) -> bool {
        self.lock.status.is_redeemed()
    }

    pub fn render(&self, decimals: u32) -> LockView {
        LockView {
            index: self.index,
            amount: format_units(self.lock.amount, decimals),
            init_amount: format_units(self.lock.amount_record, decimals),
            lock_window: LockWindowChoice::describe(self.lock.lock_window),
            lock_at: timestamp(self.lock.lock_at),
            unlock_at: timestamp(self.lock.unlock_time),
            penalty: format!("{}%", self.lock.penalty),
            status: status_label(self.lock.status),
        }
    }
}

pub fn status_label(status: LockStatus) -> &'static str {
    match status {
        LockStatus::Active => "Active",
        LockStatus::Redeemed => "Redeemed",
        LockStatus::ForceRedeemed => "Force redeemed",
        LockStatus::Claimed => "Claimed",
    }
}

fn timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| secs.to_string())
}
