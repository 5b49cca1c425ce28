use crate::models::latency::Latency;
use crate::models::role::{self, RoleStore};
use crate::models::user::{self, UserDirectory};

/// Shared application state handed to every handler via `web::Data`.
pub struct AppState {
    pub app_name: String,
    pub roles: RoleStore,
    pub users: UserDirectory,
}

impl AppState {
    /// Build state from the shipped demo roles and users. Role user counts
    /// are derived from the users' assignments.
    pub fn seeded(app_name: &str, password_hash: &str, latency: Latency) -> Self {
        let users = user::seed::default_users(password_hash);
        let mut roles = role::seed::default_roles();
        for u in &users {
            if let Some(r) = u.role_id.as_deref().and_then(|id| roles.iter_mut().find(|r| r.id == id)) {
                r.user_count += 1;
            }
        }

        Self {
            app_name: app_name.to_string(),
            roles: RoleStore::new(roles, latency),
            users: UserDirectory::new(users, latency),
        }
    }
}
