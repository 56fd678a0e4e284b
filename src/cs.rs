pub mod counting;
pub mod hashing;

// Re-export all modules
pub use counting::*;
pub use hashing::*;
