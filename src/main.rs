//! # Main — CLI Entry Point
//!
//! Thin harness over the library: parses arguments, loads configuration,
//! installs logging and the rayon pool, then hands off to `cli`.
//!
//! ## Subcommands
//!
//! - `is-prime <N>`: primality of one value.
//! - `primes-up-to <LIMIT>`: every prime `≤ LIMIT`, or π(LIMIT) with `--count`.
//! - `next-prime <N>`: smallest prime strictly above N.
//! - `check <N>...`: all three answers per value, evaluated in parallel.
//!
//! ## Global Options
//!
//! - `--config` / `PRIME_ORACLE_CONFIG`: TOML configuration file.
//! - `--max-sieve-limit` / `PRIME_ORACLE_MAX_SIEVE_LIMIT`: sieve ceiling.
//! - `--threads` / `PRIME_ORACLE_THREADS`: rayon pool size (0 = all cores).
//! - `--json`: machine-readable output.
//!
//! Logging goes to stderr. `RUST_LOG` sets the filter, `LOG_FORMAT=json`
//! switches to JSON lines.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use prime_oracle::config::{self, OracleConfig};

#[derive(Parser)]
#[command(
    name = "prime-oracle",
    version,
    about = "Answer primality, enumeration and next-prime queries"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "PRIME_ORACLE_CONFIG")]
    config: Option<PathBuf>,

    /// Largest bound the sieve may allocate for (default: 1000000000)
    #[arg(long, env = "PRIME_ORACLE_MAX_SIEVE_LIMIT")]
    max_sieve_limit: Option<i64>,

    /// Number of rayon worker threads (0 = all logical cores)
    #[arg(long, env = "PRIME_ORACLE_THREADS")]
    threads: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test whether N is prime
    IsPrime {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },
    /// List every prime less than or equal to LIMIT
    PrimesUpTo {
        #[arg(allow_negative_numbers = true)]
        limit: i64,
        /// Print only how many primes there are
        #[arg(long)]
        count: bool,
    },
    /// Find the smallest prime strictly greater than N
    NextPrime {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },
    /// Run all three queries for each value, in parallel
    Check {
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<i64>,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => config::parse_toml_file(path)?,
        None => OracleConfig::default(),
    };
    let settings = base.with_overrides(cli.max_sieve_limit, cli.threads, cli.json);
    settings.validate()?;

    cli::configure_rayon(settings.threads);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match &cli.command {
        Commands::IsPrime { n } => cli::run_is_prime(*n, &settings, &mut out)?,
        Commands::PrimesUpTo { limit, count } => {
            cli::run_primes_up_to(*limit, *count, &settings, &mut out)?
        }
        Commands::NextPrime { n } => cli::run_next_prime(*n, &settings, &mut out)?,
        Commands::Check { values } => cli::run_check(values, &settings, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
