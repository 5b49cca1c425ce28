use askama::Template;

use crate::auth::gate::GateView;
use super::PageContext;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
}

/// Placeholder page for screens whose records are not managed here:
/// the screen's gated toolbar and nothing else.
#[derive(Template)]
#[template(path = "screen.html")]
pub struct ScreenTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub screen_id: String,
    pub actions: Vec<GateView>,
}
