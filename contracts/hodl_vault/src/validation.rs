//! Lock parameter validation.
//!
//! Every `lock` call passes these checks, in this order, before any token
//! moves:
//! - **Amount**: strictly positive.
//! - **Lock window**: greater than zero and at most the configured maximum.
//! - **Penalty ratio**: in `0..=100`.

use hodl_common::VaultError;

/// Default upper bound on a lock window (4 × 365 days = 126_144_000 seconds).
pub const DEFAULT_MAX_LOCK_WINDOW: u64 = 126_144_000;

/// Default number of locks a single owner may create.
pub const DEFAULT_MAX_LOCKS_PER_USER: u32 = 20;

/// Penalty ratios are percentages.
pub const MAX_PENALTY_RATIO: u32 = 100;

pub fn validate_amount(amount: i128) -> Result<(), VaultError> {
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    Ok(())
}

pub fn validate_lock_window(lock_window: u64, max_lock_window: u64) -> Result<(), VaultError> {
    if lock_window == 0 || lock_window > max_lock_window {
        return Err(VaultError::InvalidLockWindow);
    }
    Ok(())
}

pub fn validate_penalty(penalty: u32) -> Result<(), VaultError> {
    if penalty > MAX_PENALTY_RATIO {
        return Err(VaultError::InvalidPenalty);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_must_be_positive() {
        assert_eq!(validate_amount(0), Err(VaultError::InvalidAmount));
        assert_eq!(validate_amount(-5), Err(VaultError::InvalidAmount));
        assert!(validate_amount(1).is_ok());
    }

    #[test]
    fn lock_window_bounds_are_inclusive_of_max() {
        assert_eq!(
            validate_lock_window(0, DEFAULT_MAX_LOCK_WINDOW),
            Err(VaultError::InvalidLockWindow)
        );
        assert!(validate_lock_window(DEFAULT_MAX_LOCK_WINDOW, DEFAULT_MAX_LOCK_WINDOW).is_ok());
        assert_eq!(
            validate_lock_window(DEFAULT_MAX_LOCK_WINDOW + 1, DEFAULT_MAX_LOCK_WINDOW),
            Err(VaultError::InvalidLockWindow)
        );
    }

    #[test]
    fn penalty_is_a_percentage() {
        assert!(validate_penalty(0).is_ok());
        assert!(validate_penalty(100).is_ok());
        assert_eq!(validate_penalty(101), Err(VaultError::InvalidPenalty));
    }
}
