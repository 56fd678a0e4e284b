pub mod open_addressing;
pub mod prime;
pub mod separate;
pub mod string_hash;

/// Initial capacity used by `Default` and the builders. Prime.
pub const DEFAULT_CAPACITY: usize = 11;

pub use open_addressing::{OpenAddressingBuilder, OpenAddressingMap, SlotRef};
pub use prime::{is_prime, next_prime};
pub use separate::{ChainedHashMap, ChainedHashMapBuilder};
pub use string_hash::{fnv1a, hash_function_1, hash_function_2, HashFn};
