use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::screen::{Action, Screen};

/// Id of the elevated role that bypasses the permission table.
pub const CLIENT_ADMIN_ROLE: &str = "client_admin";

/// Allowed actions for one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPermission {
    pub screen: Screen,
    pub actions: BTreeSet<Action>,
}

impl ScreenPermission {
    pub fn new(screen: Screen, actions: impl IntoIterator<Item = Action>) -> Self {
        Self { screen, actions: actions.into_iter().collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub permissions: Vec<ScreenPermission>,
    pub user_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Total number of granted (screen, action) pairs.
    pub fn grant_count(&self) -> usize {
        self.permissions.iter().map(|p| p.actions.len()).sum()
    }

    pub fn is_deletable(&self) -> bool {
        !self.is_system && self.user_count == 0
    }
}

/// Input for creating a custom role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRole {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<ScreenPermission>,
}

/// Replacement values for a custom role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleUpdate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<ScreenPermission>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    NotFound,
    SystemRole,
    InUse(u32),
    DuplicateName,
}

impl fmt::Display for RoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleError::NotFound => write!(f, "Role not found"),
            RoleError::SystemRole => write!(f, "System roles cannot be modified or deleted"),
            RoleError::InUse(n) => write!(f, "Cannot delete role: {n} user(s) still assigned"),
            RoleError::DuplicateName => write!(f, "A role with this name already exists"),
        }
    }
}

impl std::error::Error for RoleError {}

/// Merge duplicate screen entries and drop entries with no actions,
/// keeping the order in which screens first appear.
pub fn normalize_permissions(permissions: Vec<ScreenPermission>) -> Vec<ScreenPermission> {
    let mut merged: Vec<ScreenPermission> = Vec::with_capacity(permissions.len());
    for perm in permissions {
        match merged.iter_mut().find(|p| p.screen == perm.screen) {
            Some(existing) => existing.actions.extend(perm.actions),
            None => merged.push(perm),
        }
    }
    merged.retain(|p| !p.actions.is_empty());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_merges_duplicates_in_first_seen_order() {
        let perms = vec![
            ScreenPermission::new(Screen::Billing, [Action::View]),
            ScreenPermission::new(Screen::Agents, [Action::View]),
            ScreenPermission::new(Screen::Billing, [Action::Export]),
            ScreenPermission::new(Screen::Tasks, []),
        ];
        let merged = normalize_permissions(perms);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].screen, Screen::Billing);
        assert_eq!(merged[0].actions, BTreeSet::from([Action::View, Action::Export]));
        assert_eq!(merged[1].screen, Screen::Agents);
    }
}
