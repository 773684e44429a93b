//! # CLI Execution Functions
//!
//! Kept out of `main.rs` so the entry point stays declarative. Each `run_*`
//! calls one library operation, logs its timing, and writes the answer to
//! `out` either as plain text or as a single JSON document. Write failures
//! (a closed pipe, a full disk) come back as errors, never panics.

use anyhow::Result;
use prime_oracle::config::OracleConfig;
use prime_oracle::{batch, get_next_prime, is_prime, sieve};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

pub fn run_is_prime(n: i64, settings: &OracleConfig, out: &mut impl Write) -> Result<()> {
    let start = Instant::now();
    let prime = is_prime(n);
    debug!(n, prime, elapsed_us = start.elapsed().as_micros() as u64, "is_prime");

    if settings.json {
        writeln!(out, "{}", serde_json::json!({ "n": n, "is_prime": prime }))?;
    } else {
        writeln!(out, "{}", prime)?;
    }
    Ok(())
}

pub fn run_primes_up_to(
    limit: i64,
    count_only: bool,
    settings: &OracleConfig,
    out: &mut impl Write,
) -> Result<()> {
    let start = Instant::now();

    if count_only {
        let count = sieve::prime_count_capped(limit, settings.max_sieve_limit)?;
        debug!(limit, count, elapsed_ms = start.elapsed().as_millis() as u64, "prime_count");
        if settings.json {
            writeln!(out, "{}", serde_json::json!({ "limit": limit, "count": count }))?;
        } else {
            writeln!(out, "{}", count)?;
        }
        return Ok(());
    }

    let primes = sieve::find_primes_up_to_capped(limit, settings.max_sieve_limit)?;
    debug!(
        limit,
        count = primes.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "find_primes_up_to"
    );

    if settings.json {
        serde_json::to_writer(
            &mut *out,
            &serde_json::json!({ "limit": limit, "primes": primes }),
        )?;
        writeln!(out)?;
    } else {
        for p in &primes {
            writeln!(out, "{}", p)?;
        }
    }
    Ok(())
}

pub fn run_next_prime(n: i64, settings: &OracleConfig, out: &mut impl Write) -> Result<()> {
    let start = Instant::now();
    let next = get_next_prime(n)?;
    debug!(n, next, elapsed_us = start.elapsed().as_micros() as u64, "get_next_prime");

    if settings.json {
        writeln!(out, "{}", serde_json::json!({ "n": n, "next_prime": next }))?;
    } else {
        writeln!(out, "{}", next)?;
    }
    Ok(())
}

/// Evaluate every value and write one report per line. Per-value errors are
/// part of the report rather than a failure of the whole command.
pub fn run_check(values: &[i64], settings: &OracleConfig, out: &mut impl Write) -> Result<()> {
    let start = Instant::now();
    let reports = batch::check_all(values, settings.max_sieve_limit);
    info!(
        values = values.len(),
        threads = rayon::current_num_threads(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Batch check complete"
    );

    if settings.json {
        serde_json::to_writer(&mut *out, &reports)?;
        writeln!(out)?;
        return Ok(());
    }
    for r in &reports {
        let next = match &r.next_prime {
            Ok(p) => p.to_string(),
            Err(e) => format!("error: {}", e),
        };
        let count = match &r.primes_up_to {
            Ok(c) => c.to_string(),
            Err(e) => format!("error: {}", e),
        };
        writeln!(
            out,
            "{}\tprime={}\tnext={}\tpi={}",
            r.n, r.is_prime, next, count
        )?;
    }
    Ok(())
}

/// Size the global rayon pool. 0 leaves rayon's default (all logical cores).
pub fn configure_rayon(threads: usize) {
    if threads == 0 {
        return;
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        warn!(error = %e, "Could not configure rayon thread pool");
    }
}
