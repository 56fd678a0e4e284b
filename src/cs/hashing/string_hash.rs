//! # String Hash Functions
//!
//! The maps in this crate take their hash function as a plain value of type `Fn(&str) -> u64`
//! and reduce its output modulo the table capacity themselves. This module provides the functions
//! used by default, plus FNV-1a for callers who want a better spread.
//!
//! `hash_function_1` and `hash_function_2` are intentionally weak: they sum Unicode code points,
//! so anagrams collide under the first. They are useful for exercising collision handling.

/// Signature of a hash function accepted by the maps.
pub type HashFn = fn(&str) -> u64;

const FNV64_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV64_PRIME: u64 = 0x100000001b3;

/// Sum of the key's code points.
pub fn hash_function_1(key: &str) -> u64 {
    key.chars().map(|c| c as u64).sum()
}

/// Sum of the key's code points, each weighted by its 1-based position.
pub fn hash_function_2(key: &str) -> u64 {
    key.chars()
        .enumerate()
        .fold(0u64, |hash, (i, c)| {
            hash.wrapping_add((i as u64 + 1).wrapping_mul(c as u64))
        })
}

/// 64-bit FNV-1a over the key's UTF-8 bytes.
pub fn fnv1a(key: &str) -> u64 {
    let mut state = FNV64_OFFSET_BASIS;
    for &b in key.as_bytes() {
        state ^= b as u64;
        state = state.wrapping_mul(FNV64_PRIME);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_point_sum() {
        assert_eq!(hash_function_1(""), 0);
        assert_eq!(hash_function_1("a"), 97);
        assert_eq!(hash_function_1("key1"), 107 + 101 + 121 + 49);
        // anagrams collide
        assert_eq!(hash_function_1("abc"), hash_function_1("cba"));
    }

    #[test]
    fn weighted_sum() {
        assert_eq!(hash_function_2("a"), 97);
        assert_eq!(hash_function_2("ab"), 97 + 2 * 98);
        assert_ne!(hash_function_2("abc"), hash_function_2("cba"));
    }

    #[test]
    fn fnv1a_known_values() {
        assert_eq!(fnv1a(""), FNV64_OFFSET_BASIS);
        assert_eq!(fnv1a("a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a("foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn functions_coerce_to_hash_fn() {
        let fns: [HashFn; 3] = [hash_function_1, hash_function_2, fnv1a];
        for f in fns {
            assert_eq!(f("stable"), f("stable"));
        }
    }
}
