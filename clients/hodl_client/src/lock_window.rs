use core::fmt;
use core::str::FromStr;

use crate::error::ValidationError;

/// The lock windows offered to users. The vault accepts any window up to
/// its configured maximum; the client only ever proposes these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockWindowChoice {
    TenSeconds,
    OneMinute,
    OneDay,
    OneWeek,
    OneMonth,
}

impl LockWindowChoice {
    pub const ALL: [LockWindowChoice; 5] = [
        LockWindowChoice::TenSeconds,
        LockWindowChoice::OneMinute,
        LockWindowChoice::OneDay,
        LockWindowChoice::OneWeek,
        LockWindowChoice::OneMonth,
    ];

    pub fn seconds(self) -> u64 {
        match self {
            LockWindowChoice::TenSeconds => 10,
            LockWindowChoice::OneMinute => 60,
            LockWindowChoice::OneDay => 86_400,
            LockWindowChoice::OneWeek => 604_800,
            LockWindowChoice::OneMonth => 2_592_000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LockWindowChoice::TenSeconds => "10 seconds",
            LockWindowChoice::OneMinute => "1 minute",
            LockWindowChoice::OneDay => "1 day",
            LockWindowChoice::OneWeek => "1 week",
            LockWindowChoice::OneMonth => "1 month",
        }
    }

    /// Label for an arbitrary on-ledger window, falling back to seconds.
    pub fn describe(seconds: u64) -> String {
        Self::ALL
            .iter()
            .find(|choice| choice.seconds() == seconds)
            .map(|choice| choice.label().to_string())
            .unwrap_or_else(|| format!("{seconds}s"))
    }
}

impl fmt::Display for LockWindowChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LockWindowChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|choice| choice.label() == wanted)
            .ok_or_else(|| ValidationError::UnknownLockWindow(s.trim().to_string()))
    }
}
