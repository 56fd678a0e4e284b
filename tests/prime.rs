use prime_hashmap::cs::hashing::{is_prime, next_prime};

#[test]
fn is_prime_agrees_with_num_prime() {
    for n in 0..20_000usize {
        assert_eq!(is_prime(n), num_prime::nt_funcs::is_prime64(n as u64), "n = {}", n);
    }
}

#[test]
fn next_prime_is_smallest_odd_prime_at_or_above() {
    for n in 0..5_000usize {
        let p = next_prime(n);
        assert!(num_prime::nt_funcs::is_prime64(p as u64));
        assert!(p >= n);
        assert!(p % 2 == 1);
        let start = if n % 2 == 0 { n + 1 } else { n };
        assert!((start..p).step_by(2).all(|c| !is_prime(c)));
    }
}
