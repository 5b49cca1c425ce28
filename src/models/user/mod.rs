pub mod types;
pub mod directory;
pub mod seed;

pub use types::*;
pub use directory::{UserDirectory, assign_role};
