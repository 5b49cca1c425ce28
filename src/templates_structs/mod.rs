// Template context structures for Askama templates, organized by domain.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::permission::Permissions;
use crate::auth::session::{get_permissions, get_username, take_flash};
use crate::errors::AppError;
use crate::models::nav_item::{self, NavItem};
use crate::state::AppState;

mod common;
mod dashboard;
mod role;
mod user;

pub use common::*;
pub use dashboard::*;
pub use role::*;
pub use user::*;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.nav`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub role_name: String,
    pub permissions: Permissions,
    pub flash: Option<String>,
    pub nav: Vec<NavItem>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub async fn build(session: &Session, state: &AppState, current_path: &str) -> Result<Self, AppError> {
        let username = get_username(session)
            .map_err(|e| AppError::Session(format!("Failed to get username: {}", e)))?;
        let permissions = get_permissions(session, state).await?;
        let flash = take_flash(session);
        let nav = nav_item::find_navigation(&permissions, current_path);
        let csrf_token = csrf::get_or_create_token(session);
        let avatar_initial = username.chars().next().unwrap_or('?').to_uppercase().to_string();
        let role_name = permissions.role().name.clone();
        Ok(Self {
            username,
            avatar_initial,
            role_name,
            permissions,
            flash,
            nav,
            app_name: state.app_name.clone(),
            csrf_token,
        })
    }
}
