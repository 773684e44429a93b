//! # Batch — Parallel Evaluation of Many Queries
//!
//! Runs all three oracle operations for each input on the global rayon pool.
//! The kernel keeps no shared state, so each query runs independently with its
//! own sieve bitmap and no coordination between workers. Output order matches
//! input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::OracleError;
use crate::{get_next_prime, is_prime, sieve};

/// Answers for a single input value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub n: i64,
    pub is_prime: bool,
    /// Smallest prime above `n`, or the overflow error.
    pub next_prime: Result<i64, OracleError>,
    /// π(n), or the resource error if `n` exceeds the sieve ceiling.
    pub primes_up_to: Result<usize, OracleError>,
}

/// Evaluate every value in parallel.
pub fn check_all(values: &[i64], max_sieve_limit: i64) -> Vec<Report> {
    values
        .par_iter()
        .map(|&n| check_one(n, max_sieve_limit))
        .collect()
}

pub fn check_one(n: i64, max_sieve_limit: i64) -> Report {
    Report {
        n,
        is_prime: is_prime(n),
        next_prime: get_next_prime(n),
        primes_up_to: sieve::prime_count_capped(n, max_sieve_limit),
    }
}
