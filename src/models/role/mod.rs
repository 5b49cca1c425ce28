pub mod types;
pub mod store;
pub mod seed;

pub use types::*;
pub use store::RoleStore;
