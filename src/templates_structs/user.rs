use askama::Template;

use crate::models::user::UserDisplay;
use super::PageContext;

pub struct RoleOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

pub struct UserRow {
    pub user: UserDisplay,
    pub options: Vec<RoleOption>,
}

#[derive(Template)]
#[template(path = "users/list.html")]
pub struct UserListTemplate {
    pub ctx: PageContext,
    pub rows: Vec<UserRow>,
    pub can_assign: bool,
}
