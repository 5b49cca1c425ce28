//! Navigation guard: maps request paths to screens and turns away
//! navigation the active role may not view.

use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use crate::auth::permission::{can, is_client_admin};
use crate::auth::session::{current_role, push_notice};
use crate::models::role::Role;
use crate::models::screen::{Action, Screen};
use crate::state::AppState;

/// Where denied navigation lands.
pub const DEFAULT_ROUTE: &str = "/dashboard";

/// Paths reachable without any screen permission.
pub const PUBLIC_PATHS: &[&str] = &["/", "/login", "/logout", "/static"];

/// Path prefix → screen. Screen pages first, then the routes that belong
/// to a screen without living under its canonical path.
const ROUTE_TABLE: &[(&str, Screen)] = &[
    ("/dashboard", Screen::Dashboard),
    ("/agents", Screen::Agents),
    ("/tasks", Screen::Tasks),
    ("/knowledge-base", Screen::KnowledgeBase),
    ("/conversations", Screen::Conversations),
    ("/campaigns", Screen::Campaigns),
    ("/roles", Screen::Roles),
    ("/sdk-keys", Screen::SdkKeys),
    ("/integrations", Screen::Integrations),
    ("/billing", Screen::Billing),
    ("/profile", Screen::Profile),
    ("/users", Screen::Roles),
    ("/api/v1/roles", Screen::Roles),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Send the user to `location` and show `notice`.
    Redirect { location: &'static str, notice: String },
    /// Denied, and the role has no screen to fall back to.
    Forbidden { notice: String },
}

/// `prefix` matches `path` exactly or as a leading run of whole segments.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return path == "/";
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|p| matches_prefix(path, p))
}

/// Resolve a path to its screen by longest matching prefix.
pub fn resolve_screen(path: &str) -> Option<Screen> {
    ROUTE_TABLE
        .iter()
        .filter(|(prefix, _)| matches_prefix(path, prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, screen)| *screen)
}

pub fn denial_notice(screen: Screen) -> String {
    format!("You don't have permission to view {}", screen.label())
}

/// Decide whether `role` may navigate to `path`.
pub fn evaluate(path: &str, role: &Role) -> GuardDecision {
    if is_public(path) || is_client_admin(role) {
        return GuardDecision::Allow;
    }
    let Some(screen) = resolve_screen(path) else {
        return GuardDecision::Allow;
    };
    if can(role, screen, Action::View) {
        return GuardDecision::Allow;
    }

    let notice = denial_notice(screen);
    match landing_path(role) {
        Some(location) => GuardDecision::Redirect { location, notice },
        None => GuardDecision::Forbidden { notice },
    }
}

/// The default route when the role may view it, otherwise the first screen
/// it may view. `None` when the role can view nothing.
pub fn landing_path(role: &Role) -> Option<&'static str> {
    if resolve_screen(DEFAULT_ROUTE).is_some_and(|s| can(role, s, Action::View)) {
        return Some(DEFAULT_ROUTE);
    }
    Screen::ALL
        .into_iter()
        .find(|s| can(role, *s, Action::View))
        .map(Screen::path)
}

/// Middleware that applies `evaluate` to every request in its scope.
/// Must run after `require_auth`. API paths get a JSON 403 instead of a
/// redirect.
pub async fn require_screen_access(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let path = req.path().to_string();
    if is_public(&path) {
        return next.call(req).await.map(|res| res.map_into_left_body());
    }

    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        log::error!("AppState missing from app data");
        let response = HttpResponse::InternalServerError().finish();
        return Ok(req.into_response(response).map_into_right_body());
    };
    let session = req.get_session();

    let Some(role) = current_role(&session, &state).await else {
        session.purge();
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    };

    let response = match evaluate(&path, &role) {
        GuardDecision::Allow => {
            return next.call(req).await.map(|res| res.map_into_left_body());
        }
        GuardDecision::Redirect { location, notice } => {
            log::warn!("Role '{}' denied navigation to {path}", role.id);
            if path.starts_with("/api/") {
                HttpResponse::Forbidden().json(serde_json::json!({ "error": notice }))
            } else {
                push_notice(&session, notice);
                HttpResponse::SeeOther()
                    .insert_header(("Location", location))
                    .finish()
            }
        }
        GuardDecision::Forbidden { notice } => {
            log::warn!("Role '{}' denied navigation to {path}", role.id);
            if path.starts_with("/api/") {
                HttpResponse::Forbidden().json(serde_json::json!({ "error": notice }))
            } else {
                HttpResponse::Forbidden()
                    .content_type("text/html; charset=utf-8")
                    .body(format!("<p>{notice}</p>"))
            }
        }
    };
    Ok(req.into_response(response).map_into_right_body())
}
