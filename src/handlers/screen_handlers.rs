use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::gate::{GateMethod, PermissionGate};
use crate::auth::guard::resolve_screen;
use crate::errors::{AppError, render};
use crate::models::screen::Action;
use crate::state::AppState;
use crate::templates_structs::{PageContext, ScreenTemplate};

/// Generic page for a screen: its toolbar of gated actions. The route guard
/// has already checked `view` by the time this runs.
pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let screen = resolve_screen(req.path()).ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session, &state, screen.path()).await?;
    let viewer = ctx.permissions.role().clone();

    let actions = screen.supported_actions()
        .iter()
        .filter(|a| **a != Action::View)
        .filter_map(|a| {
            let gate = PermissionGate::new(screen, *a, a.label());
            // Destructive controls vanish for roles that cannot use them.
            let gate = if *a == Action::Delete { gate.hide_when_denied() } else { gate };
            gate.view(&viewer, format!("{}#{}", screen.path(), a.id()), GateMethod::Get)
        })
        .collect();

    let tmpl = ScreenTemplate {
        ctx,
        title: screen.label().to_string(),
        screen_id: screen.id().to_string(),
        actions,
    };
    render(tmpl)
}
