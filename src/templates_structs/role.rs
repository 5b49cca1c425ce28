use askama::Template;

use crate::auth::gate::GateView;
use super::PageContext;

/// One row on the roles list page.
pub struct RoleListItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub user_count: u32,
    pub grant_count: usize,
    pub edit: Option<GateView>,
    pub delete: Option<GateView>,
}

#[derive(Template)]
#[template(path = "roles/list.html")]
pub struct RoleListTemplate {
    pub ctx: PageContext,
    pub roles: Vec<RoleListItem>,
    pub new_role: Option<GateView>,
}

/// A single checkbox in the permission matrix (one screen x one action).
pub struct PermissionCell {
    pub code: String,
    pub supported: bool,
    pub checked: bool,
}

/// One row in the matrix: a screen with a cell per action.
pub struct PermissionRow {
    pub screen_label: String,
    pub cells: Vec<PermissionCell>,
}

#[derive(Template)]
#[template(path = "roles/form.html")]
pub struct RoleFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub name: String,
    pub description: String,
    pub action_labels: Vec<String>,
    pub rows: Vec<PermissionRow>,
    pub read_only: bool,
    pub errors: Vec<String>,
}
