use askama::Template;

use super::PageContext;

pub struct ScreenTile {
    pub label: String,
    pub url: String,
    pub grants: Vec<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub role_count: usize,
    pub user_count: usize,
    pub tiles: Vec<ScreenTile>,
}
