//! # Primality — Deterministic Trial Division
//!
//! `is_prime` answers exactly, for every `i64`, using trial division by odd
//! divisors up to ⌊√n⌋. No divisor above √n can pair with a cofactor that is
//! also above √n, so the bound is sufficient.
//!
//! The loop condition is `d <= n / d` rather than `d * d <= n`: it is the same
//! test in integer arithmetic but cannot overflow for `n` near `i64::MAX`, and
//! it never touches floating point, so there is no rounding at the bound.
//!
//! Worst case is O(√n) divisions (≈1.5·10⁹ for a prime near 2⁶³). The callers
//! in this crate only reach that regime when asked about numbers of that size.

/// Returns true iff `n` is prime.
///
/// Total over the whole `i64` domain: negatives, 0 and 1 are simply not prime.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d: i64 = 3;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
