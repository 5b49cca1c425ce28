//! Shared test infrastructure.
//!
//! - `state()` - seeded demo roles and users, no simulated latency
//! - `test_app!` - the full route table behind a cookie session
//! - `login!` - sign in through the real form, yielding the session cookie

#![allow(dead_code, unused_macros)]

use std::sync::OnceLock;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;

use engage_console::auth::password;
use engage_console::models::latency::Latency;
use engage_console::state::AppState;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const PASSWORD: &str = "admin123";
pub const SESSION_COOKIE: &str = "id";

/// Argon2 is costly; hash the shared demo password once per test binary.
pub fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| password::hash_password(PASSWORD).expect("Failed to hash password"))
}

pub fn state() -> web::Data<AppState> {
    web::Data::new(AppState::seeded("Test Console", password_hash(), Latency::none()))
}

/// State whose users carry a placeholder hash, for tests that never sign in.
pub fn state_without_login() -> AppState {
    AppState::seeded("Test Console", "unused", Latency::none())
}

// ============================================================================
// HTTP HELPERS
// ============================================================================

/// The session cookie a response set, if any.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Pull the CSRF token out of a rendered form.
pub fn extract_csrf(html: &str) -> String {
    let marker = "name=\"csrf_token\" value=\"";
    let start = html.find(marker).expect("no csrf field in page") + marker.len();
    let end = html[start..].find('"').expect("unterminated csrf value");
    html[start..start + end].to_string()
}

macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::from(&[7u8; 64]),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data($state.clone())
                .app_data(actix_web::web::Data::new(
                    engage_console::auth::rate_limit::RateLimiter::new(5, std::time::Duration::from_secs(60)),
                ))
                .configure(engage_console::handlers::configure),
        )
        .await
    };
}

/// Sign in as `$username`. Evaluates to `(cookie, csrf_token, landing_location)`.
macro_rules! login {
    ($app:expr, $username:expr) => {{
        let req = actix_web::test::TestRequest::get().uri("/login").to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        let cookie = common::session_cookie(&resp).expect("login page should start a session");
        let body = actix_web::test::read_body(resp).await;
        let csrf = common::extract_csrf(std::str::from_utf8(&body).unwrap());

        let form = [("username", $username), ("password", common::PASSWORD), ("csrf_token", csrf.as_str())];
        let req = actix_web::test::TestRequest::post()
            .uri("/login")
            .cookie(cookie.clone())
            .set_form(&form)
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER, "login failed for {}", $username);
        let landing = common::location(&resp);
        (common::session_cookie(&resp).unwrap_or(cookie), csrf, landing)
    }};
}
