use crate::auth::permission::Permissions;
use crate::models::screen::{Action, Screen};

pub struct NavItem {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

/// Header navigation: every screen the role may view, in registry order.
/// The entry whose path prefixes `current_path` is marked active.
pub fn find_navigation(permissions: &Permissions, current_path: &str) -> Vec<NavItem> {
    let active = crate::auth::guard::resolve_screen(current_path);
    Screen::ALL
        .into_iter()
        .filter(|s| permissions.can(*s, Action::View))
        .map(|s| NavItem {
            label: s.label().to_string(),
            url: s.path().to_string(),
            is_active: active == Some(s),
        })
        .collect()
}
