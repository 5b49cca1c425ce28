use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::gate::{Activation, PermissionGate, denied_action_notice};
use crate::auth::permission::can;
use crate::auth::session::{get_permissions, push_notice};
use crate::auth::{csrf, validate};
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::role::{NewRole, Role, RoleError, RoleUpdate, ScreenPermission};
use crate::models::screen::{Action, Screen};
use crate::state::AppState;
use crate::templates_structs::{PageContext, RoleFormTemplate};

use super::helpers::*;

fn redirect_to_roles() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/roles"))
        .finish()
}

/// A forged submit from a disabled control: show the notice, change nothing.
fn deny(session: &Session, action: Action) -> HttpResponse {
    push_notice(session, denied_action_notice(Screen::Roles, action));
    redirect_to_roles()
}

/// Submitted role form fields, validated.
struct RoleInput {
    name: String,
    description: String,
    permissions: Vec<ScreenPermission>,
}

fn parse_role_form(body: &str) -> (RoleInput, Vec<String>) {
    let params = parse_form_body(body);
    let name = get_field(&params, "name").trim().to_string();
    let description = get_field(&params, "description").trim().to_string();

    let mut errors: Vec<String> = vec![];
    errors.extend(validate::validate_required(&name, "Name", 100));
    errors.extend(validate::validate_optional(&description, "Description", 500));

    let permissions = match validate::parse_permission_codes(get_all(&params, "permissions")) {
        Ok(perms) => {
            errors.extend(validate::validate_permissions(&perms));
            perms
        }
        Err(errs) => {
            errors.extend(errs);
            vec![]
        }
    };

    (RoleInput { name, description, permissions }, errors)
}

/// Role whose permission matrix the form shows: the stored role, or the
/// unsaved input being re-displayed with errors.
fn draft_role(input: &RoleInput) -> Role {
    let now = chrono::Utc::now();
    Role {
        id: String::new(),
        name: input.name.clone(),
        description: input.description.clone(),
        is_system: false,
        permissions: input.permissions.clone(),
        user_count: 0,
        created_at: now,
        updated_at: now,
    }
}

async fn render_form(
    state: &AppState,
    session: &Session,
    form_action: String,
    form_title: &str,
    role: Option<&Role>,
    read_only: bool,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, state, "/roles").await?;
    let tmpl = RoleFormTemplate {
        ctx,
        form_action,
        form_title: form_title.to_string(),
        name: role.map(|r| r.name.clone()).unwrap_or_default(),
        description: role.map(|r| r.description.clone()).unwrap_or_default(),
        action_labels: action_labels(),
        rows: permission_rows(role),
        read_only,
        errors,
    };
    render(tmpl)
}

pub async fn new_form(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let perms = get_permissions(&session, &state).await?;
    if !perms.can(Screen::Roles, Action::Create) {
        return Ok(deny(&session, Action::Create));
    }
    render_form(&state, &session, "/roles".to_string(), "Create Role", None, false, vec![]).await
}

pub async fn create(
    state: web::Data<AppState>,
    session: Session,
    body: String,
) -> Result<HttpResponse, AppError> {
    let perms = get_permissions(&session, &state).await?;
    if !perms.can(Screen::Roles, Action::Create) {
        return Ok(deny(&session, Action::Create));
    }

    let params = parse_form_body(&body);
    csrf::validate_csrf(&session, get_field(&params, "csrf_token"))?;

    let (input, errors) = parse_role_form(&body);
    if !errors.is_empty() {
        let draft = draft_role(&input);
        return render_form(&state, &session, "/roles".to_string(), "Create Role", Some(&draft), false, errors).await;
    }

    let new_role = NewRole {
        name: input.name.clone(),
        description: input.description.clone(),
        permissions: input.permissions.clone(),
    };
    match state.roles.create(new_role).await {
        Ok(role) => {
            push_notice(&session, format!("Role '{}' created", role.name));
            Ok(redirect_to_roles())
        }
        Err(e) => {
            let draft = draft_role(&input);
            render_form(&state, &session, "/roles".to_string(), "Create Role", Some(&draft), false, vec![e.to_string()]).await
        }
    }
}

pub async fn edit_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let perms = get_permissions(&session, &state).await?;
    let role = state.roles.find_by_id(&id).await.ok_or(AppError::NotFound)?;

    let read_only = role.is_system || !can(perms.role(), Screen::Roles, Action::Edit);
    let title = if read_only { format!("Role: {}", role.name) } else { format!("Edit Role: {}", role.name) };
    render_form(&state, &session, format!("/roles/{id}"), &title, Some(&role), read_only, vec![]).await
}

pub async fn update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    body: String,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let perms = get_permissions(&session, &state).await?;
    if !perms.can(Screen::Roles, Action::Edit) {
        return Ok(deny(&session, Action::Edit));
    }

    let params = parse_form_body(&body);
    csrf::validate_csrf(&session, get_field(&params, "csrf_token"))?;

    let (input, errors) = parse_role_form(&body);
    let form_action = format!("/roles/{id}");
    if !errors.is_empty() {
        let draft = draft_role(&input);
        return render_form(&state, &session, form_action, "Edit Role", Some(&draft), false, errors).await;
    }

    let update = RoleUpdate {
        name: input.name.clone(),
        description: input.description.clone(),
        permissions: input.permissions.clone(),
    };
    match state.roles.update(&id, update).await {
        Ok(role) => {
            push_notice(&session, format!("Role '{}' updated", role.name));
            Ok(redirect_to_roles())
        }
        Err(RoleError::NotFound) => Err(AppError::NotFound),
        Err(RoleError::DuplicateName) => {
            let draft = draft_role(&input);
            render_form(&state, &session, form_action, "Edit Role", Some(&draft), false,
                        vec![RoleError::DuplicateName.to_string()]).await
        }
        Err(e) => {
            push_notice(&session, e.to_string());
            Ok(redirect_to_roles())
        }
    }
}

pub async fn delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let perms = get_permissions(&session, &state).await?;
    let gate = PermissionGate::new(Screen::Roles, Action::Delete, "Delete");

    let notice = match gate.activate(perms.role(), || state.roles.delete(&id)) {
        Activation::Invoked(pending) => match pending.await {
            Ok(role) => format!("Role '{}' deleted", role.name),
            Err(e) => e.to_string(),
        },
        Activation::Denied { notice } => notice,
    };
    push_notice(&session, notice);
    Ok(redirect_to_roles())
}
