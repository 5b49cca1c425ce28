use tokio::sync::RwLock;

use crate::models::latency::Latency;
use crate::models::role::{Role, RoleStore};
use super::types::{AssignError, User, UserDisplay};

/// In-memory console user list.
pub struct UserDirectory {
    users: RwLock<Vec<User>>,
    latency: Latency,
}

impl UserDirectory {
    pub fn new(users: Vec<User>, latency: Latency) -> Self {
        Self { users: RwLock::new(users), latency }
    }

    pub async fn find_by_id(&self, id: i64) -> Option<User> {
        self.latency.simulate().await;
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.latency.simulate().await;
        self.users.read().await.iter().find(|u| u.username == username).cloned()
    }

    /// Users joined with their role names, ordered by display name.
    pub async fn find_all_display(&self, roles: &[Role]) -> Vec<UserDisplay> {
        self.latency.simulate().await;
        let mut out: Vec<UserDisplay> = self.users.read().await
            .iter()
            .map(|u| {
                let role_name = u.role_id.as_deref()
                    .and_then(|id| roles.iter().find(|r| r.id == id))
                    .map(|r| r.name.clone())
                    .unwrap_or_default();
                UserDisplay {
                    id: u.id,
                    username: u.username.clone(),
                    email: u.email.clone(),
                    display_name: u.display_name.clone(),
                    role_id: u.role_id.clone(),
                    role_name,
                }
            })
            .collect();
        out.sort_by(|a, b| a.display_name.cmp(&b.display_name).then(a.username.cmp(&b.username)));
        out
    }

    async fn replace_role(&self, user_id: i64, role_id: Option<String>) -> Result<Option<String>, AssignError> {
        self.latency.simulate().await;
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|u| u.id == user_id).ok_or(AssignError::UserNotFound)?;
        Ok(std::mem::replace(&mut user.role_id, role_id))
    }
}

/// Move a user onto `role_id` (or leave them without a role when `None`),
/// keeping both roles' user counts in step.
///
/// The new role's count is raised before the user record changes, so a
/// concurrent delete sees the role as in use and refuses. Nothing is left
/// applied when an error is returned.
pub async fn assign_role(
    users: &UserDirectory,
    roles: &RoleStore,
    user_id: i64,
    role_id: Option<&str>,
) -> Result<(), AssignError> {
    if let Some(new) = role_id {
        roles.attach_user(new).await?;
    }

    let previous = match users.replace_role(user_id, role_id.map(String::from)).await {
        Ok(previous) => previous,
        Err(e) => {
            if let Some(new) = role_id {
                roles.detach_user(new).await?;
            }
            return Err(e);
        }
    };

    if previous.as_deref() == role_id {
        if let Some(new) = role_id {
            roles.detach_user(new).await?;
        }
        return Ok(());
    }

    if let Some(old) = previous.as_deref() {
        // The old role held this user, so it could not have been deleted.
        if let Err(e) = roles.detach_user(old).await {
            log::warn!("Role {old} vanished while user {user_id} still held it: {e}");
        }
    }
    log::info!("User {user_id} role changed from {previous:?} to {role_id:?}");
    Ok(())
}
