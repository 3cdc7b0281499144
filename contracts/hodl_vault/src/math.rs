//! Overflow-safe arithmetic for penalty settlement.

use hodl_common::VaultError;

use crate::validation::MAX_PENALTY_RATIO;

/// Splits `amount` into `(returned, forfeited)` for an early exit at
/// `penalty` percent: `returned = amount * (100 - penalty) / 100`, and the
/// remainder is forfeited, so rounding always favours the penalty receiver.
#[inline]
pub fn penalty_split(amount: i128, penalty: u32) -> Result<(i128, i128), VaultError> {
    let keep = MAX_PENALTY_RATIO
        .checked_sub(penalty)
        .ok_or(VaultError::InvalidPenalty)?;
    let returned = amount
        .checked_mul(keep as i128)
        .ok_or(VaultError::Overflow)?
        / (MAX_PENALTY_RATIO as i128);
    let forfeited = amount.checked_sub(returned).ok_or(VaultError::Overflow)?;
    Ok((returned, forfeited))
}
