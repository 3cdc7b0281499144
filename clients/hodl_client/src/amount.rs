//! Conversion between human-readable decimal strings and integer token
//! quantities. Integer arithmetic only; amounts never pass through floats.

use crate::error::ValidationError;

/// Parses `input` (e.g. `"10"`, `"0.25"`, `".5"`) into an integer scaled by
/// `10^decimals`.
pub fn parse_units(input: &str, decimals: u32) -> Result<i128, ValidationError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
        return Err(ValidationError::MalformedAmount(text.to_string()));
    }
    if frac.len() > decimals as usize {
        return Err(ValidationError::TooPrecise {
            input: text.to_string(),
            decimals,
        });
    }

    let overflow = || ValidationError::AmountOverflow(text.to_string());
    let scale = 10_i128.checked_pow(decimals).ok_or_else(overflow)?;
    let whole_units: i128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let frac_units: i128 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<width$}", width = decimals as usize)
            .parse()
            .map_err(|_| overflow())?
    };

    whole_units
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or_else(overflow)
}

/// Renders an integer quantity as a decimal string, always with at least
/// one fractional digit when `decimals > 0` (`10.0`, `0.25`).
pub fn format_units(value: i128, decimals: u32) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let digits = value.unsigned_abs().to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return format!("{sign}{digits}");
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let frac = frac.trim_end_matches('0');
    let frac = if frac.is_empty() { "0" } else { frac };
    format!("{sign}{whole}.{frac}")
}
