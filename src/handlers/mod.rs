pub mod api_v1;
pub mod auth_handlers;
pub mod dashboard;
pub mod role_handlers;
pub mod screen_handlers;

use actix_web::{middleware::from_fn, web};

use crate::auth::{guard, middleware::require_auth};
use crate::models::screen::Screen;

/// Pages for screens without dedicated handlers.
fn screen_routes(cfg: &mut web::ServiceConfig) {
    for screen in Screen::ALL {
        if matches!(screen, Screen::Dashboard | Screen::Roles) {
            continue;
        }
        cfg.route(screen.path(), web::get().to(screen_handlers::show));
    }
}

/// Register every route. Expects `AppState`, `RateLimiter` and the
/// session middleware to be set up on the `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/logout", web::post().to(auth_handlers::logout))
        .route("/", web::get().to(auth_handlers::home))
        // JSON API; guard runs inside auth (last wrap runs first)
        .service(
            web::scope("/api/v1")
                .configure(api_v1::configure)
                .wrap(from_fn(guard::require_screen_access))
                .wrap(from_fn(require_auth))
        )
        // Protected pages. /roles/new BEFORE /roles/{id}
        .service(
            web::scope("")
                .route("/dashboard", web::get().to(dashboard::index))
                .route("/roles", web::get().to(role_handlers::list))
                .route("/roles/new", web::get().to(role_handlers::new_form))
                .route("/roles", web::post().to(role_handlers::create))
                .route("/roles/{id}/edit", web::get().to(role_handlers::edit_form))
                .route("/roles/{id}", web::post().to(role_handlers::update))
                .route("/roles/{id}/delete", web::post().to(role_handlers::delete))
                .route("/users", web::get().to(role_handlers::users))
                .route("/users/{id}/role", web::post().to(role_handlers::assign))
                .configure(screen_routes)
                .wrap(from_fn(guard::require_screen_access))
                .wrap(from_fn(require_auth))
        );
}
