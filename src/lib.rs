//! Prime-capacity string hash maps.
//!
//! Two independent maps share one contract (`put`, `get`, `contains_key`, `remove`, `resize`,
//! `clear`, iteration, load-factor-driven growth):
//!
//! - [`OpenAddressingMap`]: quadratic probing with tombstone deletion, grows at load factor 0.5.
//! - [`ChainedHashMap`]: separate chaining with linked-list buckets, grows at load factor 1.0.
//!
//! Capacities are always prime, and the hash function is injected as any `Fn(&str) -> u64`.
//!
//! ```
//! use prime_hashmap::{hash_function_2, OpenAddressingMap};
//!
//! let mut map = OpenAddressingMap::new(20, hash_function_2);
//! assert_eq!(map.capacity(), 23);
//!
//! map.put("key1", 10);
//! assert_eq!(map.get("key1"), Some(&10));
//! map.remove("key1");
//! assert!(!map.contains_key("key1"));
//! ```

pub mod cs;
pub mod error;

pub use cs::counting::find_mode;
pub use cs::hashing::{
    fnv1a, hash_function_1, hash_function_2, ChainedHashMap, ChainedHashMapBuilder, HashFn,
    OpenAddressingBuilder, OpenAddressingMap,
};
pub use error::{Error, Result};
