pub mod latency;
pub mod nav_item;
pub mod role;
pub mod screen;
pub mod user;
