//! Permission evaluation over a role's screen table.
//!
//! `has_permission` is a pure table lookup. The elevated client-admin
//! override lives in `is_client_admin` and is applied by `can`, which is
//! what call sites use.

use crate::models::role::{CLIENT_ADMIN_ROLE, Role};
use crate::models::screen::{Action, Screen};

/// Whether the role's table grants `action` on `screen`.
/// False when the role has no entry for the screen.
pub fn has_permission(role: &Role, screen: Screen, action: Action) -> bool {
    role.permissions
        .iter()
        .find(|p| p.screen == screen)
        .is_some_and(|p| p.actions.contains(&action))
}

pub fn is_client_admin(role: &Role) -> bool {
    role.id == CLIENT_ADMIN_ROLE
}

/// Call-site check: client admins pass every screen and action, everyone
/// else goes through the table.
pub fn can(role: &Role, screen: Screen, action: Action) -> bool {
    is_client_admin(role) || has_permission(role, screen, action)
}

/// Role snapshot carried by the page context and permission checks.
#[derive(Debug, Clone)]
pub struct Permissions(pub Role);

impl Permissions {
    pub fn can(&self, screen: Screen, action: Action) -> bool {
        can(&self.0, screen, action)
    }

    pub fn role(&self) -> &Role {
        &self.0
    }
}
