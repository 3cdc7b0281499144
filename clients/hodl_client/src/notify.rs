use core::fmt;

use tracing::{info, warn};

use crate::ledger::TxId;

/// User-facing progress of a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Submitted { action: &'static str, tx: TxId },
    Confirmed { action: &'static str, tx: TxId },
    Failed { action: &'static str, message: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Submitted { tx, .. } => write!(f, "Transaction created: {tx}"),
            Notice::Confirmed { tx, .. } => write!(f, "Transaction confirmed: {tx}"),
            Notice::Failed { action, message } => write!(f, "{action} failed: {message}"),
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Routes notices to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match &notice {
            Notice::Failed { action, .. } => warn!(action, "{notice}"),
            Notice::Submitted { action, .. } | Notice::Confirmed { action, .. } => {
                info!(action, "{notice}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_read_like_toasts() {
        let tx = TxId(1);
        assert_eq!(
            Notice::Submitted { action: "lock", tx }.to_string(),
            "Transaction created: 0x0000000000000001"
        );
        assert_eq!(
            Notice::Confirmed { action: "lock", tx }.to_string(),
            "Transaction confirmed: 0x0000000000000001"
        );
        assert_eq!(
            Notice::Failed {
                action: "redeem",
                message: "Transaction rejected: Invalid lock status".into()
            }
            .to_string(),
            "redeem failed: Transaction rejected: Invalid lock status"
        );
    }
}
