//! # Mode (most frequent values)
//!
//! Single-pass mode finding on top of [`ChainedHashMap`]. Each item's running count lives in the map;
//! the current maximum and the items that reached it are tracked alongside, so no second pass over
//! the counts is needed.

use crate::cs::hashing::ChainedHashMap;

/// Returns the most frequent items and their frequency.
///
/// When several items tie, they are listed in the order in which each *reached* the winning
/// frequency, not in order of first appearance. An empty input yields `(vec![], 0)`.
///
/// # Examples
///
/// ```
/// use prime_hashmap::find_mode;
///
/// let (mode, frequency) = find_mode(["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(mode, vec!["apple"]);
/// assert_eq!(frequency, 2);
/// ```
pub fn find_mode<I>(values: I) -> (Vec<String>, usize)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut counts: ChainedHashMap<usize> = ChainedHashMap::default();
    let mut mode = Vec::new();
    let mut max_frequency = 0;

    for value in values {
        let value = value.as_ref();
        let frequency = counts.get(value).map_or(1, |count| count + 1);
        counts.put(value, frequency);

        if frequency > max_frequency {
            max_frequency = frequency;
            mode.clear();
            mode.push(value.to_string());
        } else if frequency == max_frequency {
            mode.push(value.to_string());
        }
    }
    (mode, max_frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_mode() {
        let (mode, frequency) = find_mode(["apple", "apple", "grape", "melon", "peach"]);
        assert_eq!(mode, vec!["apple"]);
        assert_eq!(frequency, 2);
    }

    #[test]
    fn ties_in_order_reached() {
        let input = ["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"];
        let (mode, frequency) = find_mode(input);
        assert_eq!(mode, vec!["4", "3", "2"]);
        assert_eq!(frequency, 3);
    }

    #[test]
    fn all_distinct() {
        let (mode, frequency) = find_mode(vec!["Arch".to_string(), "Manjaro".into(), "Mint".into()]);
        assert_eq!(mode, vec!["Arch", "Manjaro", "Mint"]);
        assert_eq!(frequency, 1);
    }

    #[test]
    fn empty_input() {
        let (mode, frequency) = find_mode(Vec::<&str>::new());
        assert!(mode.is_empty());
        assert_eq!(frequency, 0);
    }

    #[test]
    fn many_repeats_force_growth() {
        // more distinct keys than the default 11 buckets
        let input: Vec<String> = (0..40).map(|i| format!("v{}", i % 20)).collect();
        let (mode, frequency) = find_mode(&input);
        assert_eq!(frequency, 2);
        assert_eq!(mode.len(), 20);
        assert_eq!(mode[0], "v0");
    }
}
