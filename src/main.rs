use std::time::Instant;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use engage_console::auth::{password, rate_limit::RateLimiter};
use engage_console::config::AppConfig;
use engage_console::handlers;
use engage_console::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Err(e) = dotenv {
        log::debug!("No .env loaded: {e}");
    }

    let config = AppConfig::from_env();

    let started = Instant::now();
    let password_hash = password::hash_password(&config.default_password)
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::seeded(&config.app_name, &password_hash, config.mock_latency));
    log::info!(
        "Seeded demo roles and users in {:?} (mock latency {:?})",
        started.elapsed(),
        config.mock_latency.duration()
    );

    let limiter = web::Data::new(RateLimiter::new(config.login_max_attempts, config.login_window));
    let secret_key = config.cookie_key();

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(limiter.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
