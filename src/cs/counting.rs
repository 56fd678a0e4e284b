pub mod mode;

pub use mode::find_mode;
