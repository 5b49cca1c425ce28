use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::latency::Latency;
use super::types::{NewRole, Role, RoleError, RoleUpdate, normalize_permissions};

/// In-memory role collection shared by every worker.
pub struct RoleStore {
    roles: RwLock<Vec<Role>>,
    next_id: AtomicU64,
    latency: Latency,
}

impl RoleStore {
    pub fn new(roles: Vec<Role>, latency: Latency) -> Self {
        let next_id = roles.len() as u64 + 1;
        Self {
            roles: RwLock::new(roles),
            next_id: AtomicU64::new(next_id),
            latency,
        }
    }

    /// All roles, system roles first, then custom roles in creation order.
    pub async fn find_all(&self) -> Vec<Role> {
        self.latency.simulate().await;
        let roles = self.roles.read().await;
        let mut out: Vec<Role> = roles.iter().filter(|r| r.is_system).cloned().collect();
        out.extend(roles.iter().filter(|r| !r.is_system).cloned());
        out
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Role> {
        self.latency.simulate().await;
        self.roles.read().await.iter().find(|r| r.id == id).cloned()
    }

    /// Create a custom role. New roles start with no assigned users.
    pub async fn create(&self, new_role: NewRole) -> Result<Role, RoleError> {
        self.latency.simulate().await;
        let mut roles = self.roles.write().await;

        let name = new_role.name.trim().to_string();
        if name_taken(&roles, &name, None) {
            return Err(RoleError::DuplicateName);
        }

        let now = Utc::now();
        let role = Role {
            id: format!("role_{}", self.next_id.fetch_add(1, Ordering::Relaxed)),
            name,
            description: new_role.description.trim().to_string(),
            is_system: false,
            permissions: normalize_permissions(new_role.permissions),
            user_count: 0,
            created_at: now,
            updated_at: now,
        };
        roles.push(role.clone());
        log::info!("Created role '{}' ({})", role.name, role.id);
        Ok(role)
    }

    /// Replace name, description and permissions of a custom role.
    pub async fn update(&self, id: &str, update: RoleUpdate) -> Result<Role, RoleError> {
        self.latency.simulate().await;
        let mut roles = self.roles.write().await;

        let idx = roles.iter().position(|r| r.id == id).ok_or(RoleError::NotFound)?;
        if roles[idx].is_system {
            return Err(RoleError::SystemRole);
        }

        let name = update.name.trim().to_string();
        if name_taken(&roles, &name, Some(id)) {
            return Err(RoleError::DuplicateName);
        }

        let role = &mut roles[idx];

        role.name = name;
        role.description = update.description.trim().to_string();
        role.permissions = normalize_permissions(update.permissions);
        role.updated_at = Utc::now();
        log::info!("Updated role '{}' ({})", role.name, role.id);
        Ok(role.clone())
    }

    /// Delete a custom role with no assigned users.
    pub async fn delete(&self, id: &str) -> Result<Role, RoleError> {
        self.latency.simulate().await;
        let mut roles = self.roles.write().await;

        let idx = roles.iter().position(|r| r.id == id).ok_or(RoleError::NotFound)?;
        let role = &roles[idx];
        if role.is_system {
            return Err(RoleError::SystemRole);
        }
        if role.user_count > 0 {
            return Err(RoleError::InUse(role.user_count));
        }

        let removed = roles.remove(idx);
        log::info!("Deleted role '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Record one more user holding the role.
    pub async fn attach_user(&self, id: &str) -> Result<u32, RoleError> {
        self.latency.simulate().await;
        let mut roles = self.roles.write().await;
        let role = roles.iter_mut().find(|r| r.id == id).ok_or(RoleError::NotFound)?;
        role.user_count += 1;
        Ok(role.user_count)
    }

    /// Record one fewer user holding the role. Saturates at zero.
    pub async fn detach_user(&self, id: &str) -> Result<u32, RoleError> {
        self.latency.simulate().await;
        let mut roles = self.roles.write().await;
        let role = roles.iter_mut().find(|r| r.id == id).ok_or(RoleError::NotFound)?;
        role.user_count = role.user_count.saturating_sub(1);
        Ok(role.user_count)
    }
}

fn name_taken(roles: &[Role], name: &str, except_id: Option<&str>) -> bool {
    roles.iter()
        .filter(|r| Some(r.id.as_str()) != except_id)
        .any(|r| r.name.eq_ignore_ascii_case(name))
}
