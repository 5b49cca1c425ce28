use serde::{Deserialize, Serialize};

use crate::models::role::RoleError;

/// Internal user struct for authentication. Includes the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub display_name: String,
    pub role_id: Option<String>,
}

/// Safe version for templates and the API. No password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserDisplay {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role_id: Option<String>,
    pub role_name: String,
}

/// Form data from the role assignment form. An empty `role_id` unassigns.
#[derive(Debug, Deserialize)]
pub struct AssignRoleForm {
    pub role_id: String,
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    UserNotFound,
    Role(RoleError),
}

impl std::fmt::Display for AssignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignError::UserNotFound => write!(f, "User not found"),
            AssignError::Role(e) => write!(f, "{e}"),
        }
    }
}

impl From<RoleError> for AssignError {
    fn from(e: RoleError) -> Self {
        AssignError::Role(e)
    }
}
