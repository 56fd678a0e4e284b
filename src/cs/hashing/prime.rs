//! # Prime Capacity Sizing
//!
//! Both table layouts keep their slot count prime. For the open addressing map this is what makes
//! quadratic probing reach at least half of the table from any starting slot; for the chained map it
//! spreads weak hash functions (e.g. sums of code points) more evenly across buckets.
//!
//! The rounding rule is deliberately simple: an even request is bumped to the next odd number and
//! then odd candidates are tested in turn by trial division.

/// Returns true if `n` is prime.
///
/// 2 and 3 are prime; 0, 1 and every other even number are not. Remaining candidates are checked
/// against odd factors up to `sqrt(n)`.
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }
    let mut factor = 3;
    // factor * factor <= n without overflowing near usize::MAX
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Rounds `n` up to a prime.
///
/// Even inputs start from `n + 1`, so the result is always odd (a request for 2 yields 3).
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Returns `n` unchanged when it is already prime, otherwise `next_prime(n)`.
///
/// Used on resize, where an explicitly requested prime such as 2 must be honoured as-is.
pub fn prime_at_least(n: usize) -> usize {
    if is_prime(n) {
        n
    } else {
        next_prime(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn odd_composites() {
        for n in [9, 15, 21, 25, 27, 49, 91, 121, 169, 7919 * 7907] {
            assert!(!is_prime(n), "{} should be composite", n);
        }
    }

    #[test]
    fn next_prime_rounding() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(3), 3);
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(20), 23);
        assert_eq!(next_prime(30), 31);
        assert_eq!(next_prime(106), 107);
        assert_eq!(next_prime(114), 127);
    }

    #[test]
    fn prime_at_least_keeps_primes() {
        assert_eq!(prime_at_least(2), 2);
        assert_eq!(prime_at_least(4), 5);
        assert_eq!(prime_at_least(53), 53);
    }
}
