//! # Sieve — Bounded Prime Enumeration
//!
//! Enumerates every prime up to a bound with the Sieve of Eratosthenes over a
//! packed marker bitmap. Provides:
//!
//! 1. **`BitSieve`**: one bit per integer, packed into `u64` words. A set bit
//!    means "still possibly prime".
//! 2. **`find_primes_up_to`**: the ascending list of primes `p ≤ limit`.
//! 3. **`prime_count`**: π(limit) read off the bitmap with `POPCNT`, without
//!    materialising the list.
//!
//! ## Algorithm
//!
//! Clear bits 0 and 1. For each `i` in `2..=⌊√limit⌋` whose bit is still set,
//! clear every multiple of `i` from `i²` upward (smaller multiples already
//! carry a smaller factor). Survivors are exactly the primes.
//! Complexity: O(limit · log log limit) time, O(limit / 8) bytes of space.
//!
//! ## Resource limit
//!
//! The bitmap costs `limit / 8` bytes, so the bound is capped
//! (`DEFAULT_MAX_SIEVE_LIMIT`, 10⁹ → ~125 MB). A larger bound is rejected with
//! [`OracleError::SieveLimitExceeded`]; an allocation the allocator refuses is
//! reported as [`OracleError::AllocationFailed`]. Nothing is truncated.
//!
//! ## References
//!
//! - Eratosthenes of Cyrene, ~240 BCE.
//! - OEIS A000720: π(n), the prime counting function.

use crate::error::OracleError;
use tracing::warn;

/// Default upper bound accepted by [`find_primes_up_to`].
pub const DEFAULT_MAX_SIEVE_LIMIT: i64 = 1_000_000_000;

/// Packed bit array used as the sieve's marker array.
///
/// 8× memory reduction over `Vec<bool>`. Bit `i` is stored in word `i / 64`,
/// bit position `i % 64`. Bits past `len` in the last word are always clear,
/// so `count_ones` and `iter_set_bits` never see padding.
pub struct BitSieve {
    words: Vec<u64>,
    len: usize,
}

impl BitSieve {
    /// Create a sieve of `len` bits, all set to 1. Returns `None` instead of
    /// aborting when the allocator cannot provide the words.
    pub fn try_new_all_set(len: usize) -> Option<Self> {
        let num_words = len.div_ceil(64);
        let mut words = Vec::new();
        words.try_reserve_exact(num_words).ok()?;
        words.resize(num_words, u64::MAX);
        mask_padding(&mut words, len);
        Some(BitSieve { words, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get bit `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(
            index < self.len,
            "BitSieve index out of bounds: {} >= {}",
            index,
            self.len
        );
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of all set bits in ascending order.
    pub fn iter_set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(wi, &word)| BitIter { word, base: wi * 64 })
    }
}

fn mask_padding(words: &mut [u64], len: usize) {
    let extra = words.len() * 64 - len;
    if extra > 0 {
        if let Some(last) = words.last_mut() {
            *last >>= extra;
        }
    }
}

/// Iterator over set bits within a single u64 word.
struct BitIter {
    word: u64,
    base: usize,
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let tz = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1; // clear lowest set bit
        Some(self.base + tz)
    }
}

/// All primes `p` with `2 ≤ p ≤ limit`, ascending.
///
/// Returns an empty list for `limit < 2`. Bounds above
/// [`DEFAULT_MAX_SIEVE_LIMIT`] are rejected; use [`find_primes_up_to_capped`]
/// to pick a different ceiling.
pub fn find_primes_up_to(limit: i64) -> Result<Vec<i64>, OracleError> {
    find_primes_up_to_capped(limit, DEFAULT_MAX_SIEVE_LIMIT)
}

/// [`find_primes_up_to`] with an explicit maximum bound.
pub fn find_primes_up_to_capped(limit: i64, max_limit: i64) -> Result<Vec<i64>, OracleError> {
    if limit < 2 {
        return Ok(vec![]);
    }
    let marks = sieve_marks(limit, max_limit)?;
    collect_primes(&marks, marks.count_ones(), limit)
}

/// Copy the surviving indices into a vector reserved for exactly `count`
/// entries. The list is 64× the size of the bitmap, so its allocation is
/// checked too.
fn collect_primes(marks: &BitSieve, count: usize, limit: i64) -> Result<Vec<i64>, OracleError> {
    let mut primes = Vec::new();
    primes.try_reserve_exact(count).map_err(|_| {
        warn!(limit, count, "prime list allocation failed");
        OracleError::AllocationFailed { limit }
    })?;
    primes.extend(marks.iter_set_bits().map(|i| i as i64));
    Ok(primes)
}

/// π(limit): how many primes are `≤ limit`. Zero for `limit < 2`.
pub fn prime_count(limit: i64) -> Result<usize, OracleError> {
    prime_count_capped(limit, DEFAULT_MAX_SIEVE_LIMIT)
}

/// [`prime_count`] with an explicit maximum bound.
pub fn prime_count_capped(limit: i64, max_limit: i64) -> Result<usize, OracleError> {
    if limit < 2 {
        return Ok(0);
    }
    Ok(sieve_marks(limit, max_limit)?.count_ones())
}

/// Run the sieve and return the marker bitmap for `0..=limit`. Requires `limit ≥ 2`.
fn sieve_marks(limit: i64, max_limit: i64) -> Result<BitSieve, OracleError> {
    if limit > max_limit {
        warn!(limit, max = max_limit, "sieve limit rejected");
        return Err(OracleError::SieveLimitExceeded {
            limit,
            max: max_limit,
        });
    }
    let top = usize::try_from(limit).map_err(|_| OracleError::AllocationFailed { limit })?;
    let len = top
        .checked_add(1)
        .ok_or(OracleError::AllocationFailed { limit })?;
    let mut marks = BitSieve::try_new_all_set(len).ok_or_else(|| {
        warn!(limit, "sieve bitmap allocation failed");
        OracleError::AllocationFailed { limit }
    })?;

    marks.clear(0);
    marks.clear(1);
    let mut i = 2usize;
    while i <= top / i {
        if marks.get(i) {
            for m in (i * i..=top).step_by(i) {
                marks.clear(m);
            }
        }
        i += 1;
    }
    Ok(marks)
}

#[cfg(test)]
mod tests {
    //! # Sieve Tests
    //!
    //! - **Enumeration** (`find_primes_up_to`): known short lists and π(x)
    //!   values (OEIS A000720): π(100)=25, π(1000)=168, π(10000)=1229,
    //!   π(100000)=9592. Boundaries where `limit` itself is prime or a prime
    //!   square catch off-by-one errors in the inclusive bound.
    //! - **Resource limit**: oversized bounds and refused allocations are
    //!   explicit errors.
    //! - **BitSieve**: word-boundary behaviour and padding masking.

    use super::*;

    // ── Enumeration ────────────────────────────────────────────────────

    #[test]
    fn below_two_is_empty() {
        for limit in [i64::MIN, -5, -1, 0, 1] {
            assert_eq!(find_primes_up_to(limit).unwrap(), Vec::<i64>::new());
        }
    }

    #[test]
    fn small_limits() {
        assert_eq!(find_primes_up_to(2).unwrap(), vec![2]);
        assert_eq!(find_primes_up_to(3).unwrap(), vec![2, 3]);
        assert_eq!(find_primes_up_to(10).unwrap(), vec![2, 3, 5, 7]);
        assert_eq!(
            find_primes_up_to(20).unwrap(),
            vec![2, 3, 5, 7, 11, 13, 17, 19]
        );
    }

    /// A limit that is itself prime must be included; a limit that is a prime
    /// square must not be (it has to be struck by the `i*i` start).
    #[test]
    fn inclusive_bound() {
        assert_eq!(find_primes_up_to(97).unwrap().last(), Some(&97));
        assert_eq!(find_primes_up_to(49).unwrap().last(), Some(&47));
        assert_eq!(find_primes_up_to(121).unwrap().last(), Some(&113));
    }

    #[test]
    fn known_prime_counts() {
        assert_eq!(find_primes_up_to(100).unwrap().len(), 25);
        assert_eq!(find_primes_up_to(1_000).unwrap().len(), 168);
        assert_eq!(find_primes_up_to(10_000).unwrap().len(), 1229);
        assert_eq!(find_primes_up_to(100_000).unwrap().len(), 9592);
    }

    #[test]
    fn prime_count_matches_enumeration() {
        for limit in [-3, 0, 1, 2, 63, 64, 65, 100, 1_000, 65_536] {
            let listed = find_primes_up_to(limit).unwrap().len();
            assert_eq!(prime_count(limit).unwrap(), listed);
        }
    }

    #[test]
    fn output_is_strictly_increasing() {
        let primes = find_primes_up_to(5_000).unwrap();
        assert!(primes.windows(2).all(|w| w[0] < w[1]));
    }

    // ── Resource Limit ─────────────────────────────────────────────────

    #[test]
    fn limit_above_default_max_is_rejected() {
        let err = find_primes_up_to(DEFAULT_MAX_SIEVE_LIMIT + 1).unwrap_err();
        assert_eq!(
            err,
            OracleError::SieveLimitExceeded {
                limit: DEFAULT_MAX_SIEVE_LIMIT + 1,
                max: DEFAULT_MAX_SIEVE_LIMIT,
            }
        );
        assert!(matches!(
            find_primes_up_to(i64::MAX),
            Err(OracleError::SieveLimitExceeded { .. })
        ));
    }

    #[test]
    fn capped_variant_honours_custom_max() {
        assert_eq!(find_primes_up_to_capped(30, 30).unwrap().len(), 10);
        assert_eq!(
            find_primes_up_to_capped(31, 30),
            Err(OracleError::SieveLimitExceeded { limit: 31, max: 30 })
        );
        assert_eq!(
            prime_count_capped(31, 30),
            Err(OracleError::SieveLimitExceeded { limit: 31, max: 30 })
        );
    }

    #[test]
    fn sub_two_limit_is_never_rejected() {
        // An empty answer needs no bitmap, whatever the ceiling.
        assert_eq!(find_primes_up_to_capped(1, 0).unwrap(), Vec::<i64>::new());
        assert_eq!(prime_count_capped(-10, 0).unwrap(), 0);
    }

    /// A bound that passes the ceiling can still need a bitmap too large to
    /// exist: 2^63 bits is 2^57 words, which no allocator grants.
    #[test]
    fn unallocatable_bitmap_is_reported() {
        assert_eq!(
            find_primes_up_to_capped(i64::MAX, i64::MAX),
            Err(OracleError::AllocationFailed { limit: i64::MAX })
        );
        assert_eq!(
            prime_count_capped(i64::MAX, i64::MAX),
            Err(OracleError::AllocationFailed { limit: i64::MAX })
        );
    }

    #[test]
    fn unallocatable_prime_list_is_reported() {
        let marks = sieve_marks(100, DEFAULT_MAX_SIEVE_LIMIT).unwrap();
        assert_eq!(
            collect_primes(&marks, 1usize << 57, 100),
            Err(OracleError::AllocationFailed { limit: 100 })
        );
    }

    #[test]
    fn prime_list_is_sized_exactly() {
        let primes = find_primes_up_to(10_000).unwrap();
        assert_eq!(primes.len(), 1229);
        assert_eq!(primes.capacity(), 1229);
    }

    // ── BitSieve ───────────────────────────────────────────────────────

    /// 100 bits occupy two words; the 28 padding bits of the second word must
    /// stay clear or `count_ones` would report 128.
    #[test]
    fn bitsieve_masks_padding() {
        let bs = BitSieve::try_new_all_set(100).unwrap();
        assert_eq!(bs.len(), 100);
        assert_eq!(bs.count_ones(), 100);
        assert_eq!(bs.iter_set_bits().last(), Some(99));
        assert!(BitSieve::try_new_all_set(0).unwrap().is_empty());
    }

    #[test]
    fn bitsieve_word_boundary() {
        let mut bs = BitSieve::try_new_all_set(256).unwrap();
        for &i in &[63usize, 64, 127, 128, 191, 192, 255] {
            bs.clear(i);
        }
        assert_eq!(bs.count_ones(), 249);
        for &i in &[63usize, 64, 127, 128, 191, 192, 255] {
            assert!(!bs.get(i), "bit {} should be clear", i);
        }
        assert!(bs.get(62));
        assert!(bs.get(65));
    }

    #[test]
    fn bitsieve_iter_set_bits_ascending() {
        let mut bs = BitSieve::try_new_all_set(130).unwrap();
        for i in 0..130 {
            if i % 3 != 0 {
                bs.clear(i);
            }
        }
        let got: Vec<usize> = bs.iter_set_bits().collect();
        let expected: Vec<usize> = (0..130).step_by(3).collect();
        assert_eq!(got, expected);
    }
}
