//! # Next Prime — Smallest Prime Strictly Above n
//!
//! Prime gaps have no closed form, so the search walks candidates upward and
//! stops at the first one `is_prime` accepts. After 2 only odd candidates are
//! tried. Every step is `checked_add`, so a scan that would leave the `i64`
//! range reports [`OracleError::Overflow`] instead of wrapping.
//!
//! The largest prime below 2⁶³ is 9223372036854775783; any `n` at or above it
//! overflows.

use crate::error::OracleError;
use crate::primality::is_prime;

/// Smallest prime strictly greater than `n`.
///
/// Returns 2 for every `n < 2` and 3 for `n == 2`.
pub fn get_next_prime(n: i64) -> Result<i64, OracleError> {
    if n < 2 {
        return Ok(2);
    }
    // First odd number above n; n ≥ 2 so this is ≥ 3.
    let step = if n % 2 == 0 { 1 } else { 2 };
    let mut candidate = n.checked_add(step).ok_or(OracleError::Overflow { n })?;
    while !is_prime(candidate) {
        candidate = candidate
            .checked_add(2)
            .ok_or(OracleError::Overflow { n })?;
    }
    Ok(candidate)
}
