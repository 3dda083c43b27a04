//! Amount input validation.

use crate::error::{EngineError, EngineResult};
use once_cell::sync::Lazy;
use regex::Regex;

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid amount regex"));

/// Parses a user-entered amount into a positive integer.
///
/// Surrounding whitespace is ignored. Signs, decimals, separators and
/// exponents are rejected rather than truncated.
///
/// # Errors
/// - `InvalidAmount` when the text is not a plain unsigned integer or overflows.
/// - `NonPositiveAmount` when the value is zero.
pub fn parse_amount(text: &str) -> EngineResult<u64> {
    let trimmed = text.trim();
    if !AMOUNT_RE.is_match(trimmed) {
        return Err(EngineError::InvalidAmount(trimmed.to_string()));
    }
    let value = trimmed
        .parse::<u64>()
        .map_err(|_| EngineError::InvalidAmount(trimmed.to_string()))?;
    if value == 0 {
        return Err(EngineError::NonPositiveAmount);
    }
    Ok(value)
}
