pub mod csrf;
pub mod gate;
pub mod guard;
pub mod middleware;
pub mod password;
pub mod permission;
pub mod rate_limit;
pub mod session;
pub mod validate;
