use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::models::role::RoleError;

#[derive(Debug)]
pub enum AppError {
    Template(askama::Error),
    Hash(String),
    Session(String),
    Csrf,
    PermissionDenied(String),
    Role(RoleError),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::PermissionDenied(code) => write!(f, "Permission denied: {code}"),
            AppError::Role(e) => write!(f, "{e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().body("Not Found"),
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            AppError::PermissionDenied(code) => {
                log::warn!("Permission denied: {code}");
                HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "Permission denied",
                    "permission": code,
                }))
            }
            AppError::Role(e) => {
                let body = serde_json::json!({ "error": e.to_string() });
                match e {
                    RoleError::NotFound => HttpResponse::NotFound().json(body),
                    RoleError::SystemRole => HttpResponse::Forbidden().json(body),
                    RoleError::InUse(_) | RoleError::DuplicateName => HttpResponse::Conflict().json(body),
                }
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<RoleError> for AppError {
    fn from(e: RoleError) -> Self {
        AppError::Role(e)
    }
}

/// Render an Askama template into an HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html))
}
