//! # Error — Failure Conditions of the Oracle
//!
//! Sub-2 inputs are never errors: `is_prime` answers `false`, the sieve returns
//! an empty list and `get_next_prime` returns 2. The only propagated failures
//! are resource exhaustion in the sieve and `i64` overflow in the next-prime
//! scan, both of which are fatal to the call that raised them.

use serde::Serialize;
use thiserror::Error;

/// Errors returned by the sieve and next-prime operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OracleError {
    /// The requested sieve bound is above the configured maximum.
    #[error("sieve limit {limit} exceeds the maximum of {max}")]
    SieveLimitExceeded { limit: i64, max: i64 },
    /// The marker bitmap for `limit` could not be allocated.
    #[error("could not allocate a sieve bitmap for limit {limit}")]
    AllocationFailed { limit: i64 },
    /// No candidate above `n` is representable as an `i64`.
    #[error("next prime after {n} overflows i64")]
    Overflow { n: i64 },
}
