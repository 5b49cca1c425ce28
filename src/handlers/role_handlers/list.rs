use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate::{GateMethod, PermissionGate};
use crate::errors::{AppError, render};
use crate::models::screen::{Action, Screen};
use crate::state::AppState;
use crate::templates_structs::{PageContext, RoleListItem, RoleListTemplate};

pub async fn list(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state, "/roles").await?;
    let viewer = ctx.permissions.role().clone();

    let new_role = PermissionGate::new(Screen::Roles, Action::Create, "New role")
        .view(&viewer, "/roles/new", GateMethod::Get);

    let roles = state.roles.find_all().await
        .into_iter()
        .map(|r| {
            // System roles open read-only, so viewing is enough to follow the link.
            let edit = if r.is_system {
                PermissionGate::new(Screen::Roles, Action::View, "View")
            } else {
                PermissionGate::new(Screen::Roles, Action::Edit, "Edit")
            }
            .view(&viewer, format!("/roles/{}/edit", r.id), GateMethod::Get);

            let delete = if r.is_deletable() {
                PermissionGate::new(Screen::Roles, Action::Delete, "Delete")
                    .hide_when_denied()
                    .view(&viewer, format!("/roles/{}/delete", r.id), GateMethod::Post)
            } else {
                None
            };

            RoleListItem {
                grant_count: r.grant_count(),
                id: r.id,
                name: r.name,
                description: r.description,
                is_system: r.is_system,
                user_count: r.user_count,
                edit,
                delete,
            }
        })
        .collect();

    let tmpl = RoleListTemplate { ctx, roles, new_role };
    render(tmpl)
}
