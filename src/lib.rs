//! # prime-oracle
//!
//! Deterministic answers to three questions about `i64` values:
//!
//! - [`is_prime`]: is `n` prime? (trial division up to ⌊√n⌋)
//! - [`find_primes_up_to`]: every prime `≤ limit`, ascending (Sieve of Eratosthenes)
//! - [`get_next_prime`]: the smallest prime strictly above `n`
//!
//! All operations are pure: no caching, no shared state, safe to call from any
//! number of threads at once. Inputs below 2 are ordinary inputs with ordinary
//! answers. The only errors are an oversized sieve bound and `i64` overflow in
//! the next-prime scan, both reported through [`OracleError`].

pub mod batch;
pub mod config;
pub mod error;
pub mod next_prime;
pub mod primality;
pub mod sieve;

pub use error::OracleError;
pub use next_prime::get_next_prime;
pub use primality::is_prime;
pub use sieve::{find_primes_up_to, find_primes_up_to_capped, prime_count};
