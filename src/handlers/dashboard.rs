use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Local, Timelike};

use crate::errors::{AppError, render};
use crate::models::screen::{Action, Screen};
use crate::state::AppState;
use crate::templates_structs::{DashboardTemplate, PageContext, ScreenTile};

fn time_greeting(username: &str) -> String {
    let hour = Local::now().hour();
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{}, {}", period, username)
}

pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &state, "/dashboard").await?;

    let greeting = time_greeting(&ctx.username);
    let roles = state.roles.find_all().await;
    let role_count = roles.len();
    let user_count = roles.iter().map(|r| r.user_count as usize).sum();

    let tiles = Screen::ALL
        .into_iter()
        .filter(|s| *s != Screen::Dashboard && ctx.permissions.can(*s, Action::View))
        .map(|s| ScreenTile {
            label: s.label().to_string(),
            url: s.path().to_string(),
            grants: s.supported_actions()
                .iter()
                .filter(|a| ctx.permissions.can(s, **a))
                .map(|a| a.label().to_string())
                .collect(),
        })
        .collect();

    let tmpl = DashboardTemplate { ctx, greeting, role_count, user_count, tiles };
    render(tmpl)
}
