use actix_session::Session;

use crate::auth::permission::Permissions;
use crate::errors::AppError;
use crate::models::role::Role;
use crate::models::screen::{Action, Screen, permission_code};
use crate::state::AppState;

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>("username") {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

/// Queue a one-shot notice for the next rendered page.
pub fn push_notice(session: &Session, message: impl Into<String>) {
    let _ = session.insert("flash", message.into());
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

/// The signed-in user's current role, read fresh from the store so that
/// role edits and reassignments apply on the next request.
pub async fn current_role(session: &Session, state: &AppState) -> Option<Role> {
    let user_id = get_user_id(session)?;
    let user = state.users.find_by_id(user_id).await?;
    state.roles.find_by_id(user.role_id.as_deref()?).await
}

pub async fn get_permissions(session: &Session, state: &AppState) -> Result<Permissions, AppError> {
    current_role(session, state)
        .await
        .map(Permissions)
        .ok_or_else(|| AppError::Session("No active role for session".to_string()))
}

/// Check permission; returns Err(AppError) if denied.
pub async fn require_permission(
    session: &Session,
    state: &AppState,
    screen: Screen,
    action: Action,
) -> Result<Permissions, AppError> {
    let permissions = get_permissions(session, state).await?;
    if permissions.can(screen, action) {
        Ok(permissions)
    } else {
        Err(AppError::PermissionDenied(permission_code(screen, action)))
    }
}
