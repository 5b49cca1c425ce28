use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::require_permission;
use crate::auth::validate;
use crate::errors::AppError;
use crate::models::role::{NewRole, RoleUpdate, ScreenPermission};
use crate::models::screen::{Action, Screen};
use crate::state::AppState;

use super::ApiErrorResponse;

fn validation_errors(name: &str, description: &str, permissions: &[ScreenPermission]) -> Option<HttpResponse> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(name, "Name", 100));
    errors.extend(validate::validate_optional(description, "Description", 500));
    errors.extend(validate::validate_permissions(permissions));
    if errors.is_empty() {
        return None;
    }
    Some(HttpResponse::BadRequest().json(ApiErrorResponse {
        error: "Validation failed".to_string(),
        details: Some(errors.join("; ")),
    }))
}

/// GET /api/v1/roles - List roles, system roles first
pub async fn list(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &state, Screen::Roles, Action::View).await?;
    Ok(HttpResponse::Ok().json(state.roles.find_all().await))
}

/// GET /api/v1/roles/{id} - Get single role
pub async fn read(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &state, Screen::Roles, Action::View).await?;
    let role = state.roles.find_by_id(&path.into_inner()).await
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(role))
}

/// POST /api/v1/roles - Create custom role
pub async fn create(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<NewRole>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &state, Screen::Roles, Action::Create).await?;

    let new_role = body.into_inner();
    if let Some(resp) = validation_errors(&new_role.name, &new_role.description, &new_role.permissions) {
        return Ok(resp);
    }

    let role = state.roles.create(new_role).await?;
    Ok(HttpResponse::Created().json(role))
}

/// PUT /api/v1/roles/{id} - Replace name, description and permissions
pub async fn update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<RoleUpdate>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &state, Screen::Roles, Action::Edit).await?;

    let update = body.into_inner();
    if let Some(resp) = validation_errors(&update.name, &update.description, &update.permissions) {
        return Ok(resp);
    }

    let role = state.roles.update(&path.into_inner(), update).await?;
    Ok(HttpResponse::Ok().json(role))
}

/// DELETE /api/v1/roles/{id} - Delete an unassigned custom role
pub async fn delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_permission(&session, &state, Screen::Roles, Action::Delete).await?;
    let role = state.roles.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(role))
}
