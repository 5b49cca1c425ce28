mod helpers;
mod list;
mod crud;
mod assignment;

pub use list::list;
pub use crud::{new_form, create, edit_form, update, delete};
pub use assignment::{list as users, assign};
