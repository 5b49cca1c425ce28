use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate::{Activation, PermissionGate};
use crate::auth::csrf;
use crate::auth::session::{get_permissions, push_notice};
use crate::errors::{AppError, render};
use crate::models::screen::{Action, Screen};
use crate::models::user::{self, AssignError, AssignRoleForm};
use crate::state::AppState;
use crate::templates_structs::{PageContext, RoleOption, UserListTemplate, UserRow};

/// Users with their current role and, for editors, a role picker.
pub async fn list(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state, "/users").await?;
    let can_assign = ctx.permissions.can(Screen::Roles, Action::Edit);

    let roles = state.roles.find_all().await;
    let rows = state.users.find_all_display(&roles).await
        .into_iter()
        .map(|u| {
            let options = roles.iter()
                .map(|r| RoleOption {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    selected: u.role_id.as_deref() == Some(r.id.as_str()),
                })
                .collect();
            UserRow { user: u, options }
        })
        .collect();

    let tmpl = UserListTemplate { ctx, rows, can_assign };
    render(tmpl)
}

/// POST /users/{id}/role - Move a user onto another role, or unassign.
pub async fn assign(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<AssignRoleForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let user_id = path.into_inner();
    let perms = get_permissions(&session, &state).await?;
    let role_id = Some(form.role_id.trim()).filter(|s| !s.is_empty());

    let gate = PermissionGate::new(Screen::Roles, Action::Edit, "Assign role");
    let notice = match gate.activate(perms.role(), || user::assign_role(&state.users, &state.roles, user_id, role_id)) {
        Activation::Invoked(pending) => match pending.await {
            Ok(()) => "Role assignment updated".to_string(),
            Err(AssignError::UserNotFound) => return Err(AppError::NotFound),
            Err(e) => e.to_string(),
        },
        Activation::Denied { notice } => notice,
    };
    push_notice(&session, notice);
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/users"))
        .finish())
}
