use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::session::get_permissions;
use crate::errors::AppError;
use crate::models::screen::{Action, Screen};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub screen: String,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub screen: Screen,
    pub action: Action,
    pub allowed: bool,
}

/// GET /api/v1/permissions/check?screen=&action= - Evaluate the caller's role
pub async fn check(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<CheckQuery>,
) -> Result<HttpResponse, AppError> {
    let (screen, action) = match (query.screen.parse::<Screen>(), query.action.parse::<Action>()) {
        (Ok(s), Ok(a)) => (s, a),
        (Err(e), _) | (_, Err(e)) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": e })));
        }
    };
    let perms = get_permissions(&session, &state).await?;
    Ok(HttpResponse::Ok().json(CheckResponse { screen, action, allowed: perms.can(screen, action) }))
}

#[derive(Debug, Serialize)]
pub struct ScreenInfo {
    pub id: Screen,
    pub label: &'static str,
    pub path: &'static str,
    pub actions: &'static [Action],
}

/// GET /api/v1/screens - The screen/action registry
pub async fn screens() -> HttpResponse {
    let screens: Vec<ScreenInfo> = Screen::ALL
        .into_iter()
        .map(|s| ScreenInfo { id: s, label: s.label(), path: s.path(), actions: s.supported_actions() })
        .collect();
    HttpResponse::Ok().json(screens)
}
