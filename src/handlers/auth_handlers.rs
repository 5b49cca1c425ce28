use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::{csrf, guard, password, rate_limit::RateLimiter};
use crate::auth::session::current_role;
use crate::errors::{AppError, render};
use crate::state::AppState;
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_error(state: &AppState, session: &Session, message: &str) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::get_or_create_token(session);
    let tmpl = LoginTemplate {
        error: Some(message.to_string()),
        app_name: state.app_name.clone(),
        csrf_token,
    };
    render(tmpl)
}

/// Landing page of the signed-in user's role, if there is one to land on.
async fn signed_in_landing(state: &AppState, session: &Session) -> Option<&'static str> {
    let role = current_role(session, state).await?;
    guard::landing_path(&role)
}

/// `/`: the role's landing page, or the login form.
pub async fn home(state: web::Data<AppState>, session: Session) -> HttpResponse {
    let location = signed_in_landing(&state, &session).await.unwrap_or("/login");
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub async fn login_page(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // Already signed in with a usable role: go to its landing page
    if let Some(location) = signed_in_landing(&state, &session).await {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", location))
            .finish());
    }

    let csrf_token = csrf::get_or_create_token(&session);
    let tmpl = LoginTemplate { error: None, app_name: state.app_name.clone(), csrf_token };
    render(tmpl)
}

pub async fn login_submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check BEFORE any user lookup
    let ip = req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        return login_error(&state, &session, "Too many failed login attempts. Please try again later.");
    }

    let Some(u) = state.users.find_by_username(form.username.trim()).await else {
        limiter.record_failure(ip);
        return login_error(&state, &session, "Invalid username or password");
    };

    match password::verify_password(&form.password, &u.password) {
        Ok(true) => {}
        Ok(false) => {
            limiter.record_failure(ip);
            return login_error(&state, &session, "Invalid username or password");
        }
        Err(e) => return Err(AppError::Hash(e)),
    }

    // Successful login: clear rate limit for this IP
    limiter.clear(ip);

    let role = match u.role_id.as_deref() {
        Some(id) => state.roles.find_by_id(id).await,
        None => None,
    };
    let Some(role) = role else {
        log::warn!("User '{}' signed in without a role", u.username);
        return login_error(&state, &session, "Your account has no role assigned. Contact an administrator.");
    };
    let Some(landing) = guard::landing_path(&role) else {
        return login_error(&state, &session, "Your role does not grant access to any screen.");
    };

    session.renew();
    let _ = session.insert("user_id", u.id);
    let _ = session.insert("username", &u.username);
    log::info!("User '{}' signed in with role '{}'", u.username, role.id);
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", landing))
        .finish())
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}
