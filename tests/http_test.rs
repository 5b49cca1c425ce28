//! End-to-end tests through the real route table: sign-in, the navigation
//! guard, gated controls and the JSON API.

#[macro_use]
mod common;

use actix_web::http::{StatusCode, header::ContentType};
use actix_web::test::{self, TestRequest};

use engage_console::models::role::{NewRole, RoleUpdate, ScreenPermission};
use engage_console::models::screen::{Action, Screen};
use engage_console::models::user;

fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[actix_rt::test]
async fn test_unauthenticated_requests_are_turned_away() {
    let state = common::state();
    let app = test_app!(state);

    let resp = test::call_service(&app, TestRequest::get().uri("/roles").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&resp), "/login");

    let resp = test::call_service(&app, TestRequest::get().uri("/api/v1/roles").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_admin_lands_on_dashboard_with_full_navigation() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, _, landing) = login!(app, "admin");
    assert_eq!(landing, "/dashboard");

    let req = TestRequest::get().uri("/dashboard").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    for screen in Screen::ALL {
        let label = screen.label().replace('&', "&amp;");
        assert!(body.contains(&label), "missing nav for {screen}");
    }
}

#[actix_rt::test]
async fn test_wrong_password_is_rejected() {
    let state = common::state();
    let app = test_app!(state);

    let resp = test::call_service(&app, TestRequest::get().uri("/login").to_request()).await;
    let cookie = common::session_cookie(&resp).unwrap();
    let csrf = common::extract_csrf(&body_text(&test::read_body(resp).await));

    let req = TestRequest::post()
        .uri("/login")
        .cookie(cookie)
        .set_form([("username", "admin"), ("password", "wrong"), ("csrf_token", csrf.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(&test::read_body(resp).await).contains("Invalid username or password"));
}

#[actix_rt::test]
async fn test_user_without_role_cannot_sign_in() {
    let state = common::state();
    let app = test_app!(state);

    let resp = test::call_service(&app, TestRequest::get().uri("/login").to_request()).await;
    let cookie = common::session_cookie(&resp).unwrap();
    let csrf = common::extract_csrf(&body_text(&test::read_body(resp).await));

    let req = TestRequest::post()
        .uri("/login")
        .cookie(cookie)
        .set_form([("username", "casey"), ("password", common::PASSWORD), ("csrf_token", csrf.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(&test::read_body(resp).await).contains("no role assigned"));
}

#[actix_rt::test]
async fn test_login_requires_csrf_token() {
    let state = common::state();
    let app = test_app!(state);

    let req = TestRequest::post()
        .uri("/login")
        .set_form([("username", "admin"), ("password", common::PASSWORD), ("csrf_token", "forged")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_denied_navigation_redirects_with_one_notice() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, _, landing) = login!(app, "bea");
    // billing_viewer cannot view the dashboard, so it lands on billing
    assert_eq!(landing, "/billing");

    let req = TestRequest::get().uri("/agents").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&resp), "/billing");
    let cookie = common::session_cookie(&resp).unwrap_or(cookie);

    let req = TestRequest::get().uri("/billing").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = common::session_cookie(&resp).unwrap_or(cookie);
    let body = body_text(&test::read_body(resp).await);
    assert_eq!(body.matches("permission to view AI Agents").count(), 1);

    let req = TestRequest::get().uri("/billing").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    let body = body_text(&test::read_body(resp).await);
    assert!(!body.contains("permission to view AI Agents"));
}

#[actix_rt::test]
async fn test_screen_page_renders_gated_toolbar() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, _, _) = login!(app, "bea");

    let req = TestRequest::get().uri("/billing").cookie(cookie).to_request();
    let body = body_text(&test::read_body(test::call_service(&app, req).await).await);

    // Billing supports edit and export; the viewer holds neither.
    assert_eq!(body.matches("btn locked").count(), 2);
    assert!(body.contains("Requires Export permission on Billing"));
}

#[actix_rt::test]
async fn test_role_list_locks_and_hides_controls() {
    let state = common::state();
    let auditor = state.roles.create(NewRole {
        name: "Auditor".to_string(),
        description: String::new(),
        permissions: vec![ScreenPermission::new(Screen::Roles, [Action::View])],
    }).await.unwrap();
    let temp = state.roles.create(NewRole { name: "Temp".to_string(), ..Default::default() }).await.unwrap();
    user::assign_role(&state.users, &state.roles, 5, Some(auditor.id.as_str())).await.unwrap();

    let app = test_app!(state);
    let (cookie, csrf, landing) = login!(app, "casey");
    assert_eq!(landing, "/roles");

    let req = TestRequest::get().uri("/roles").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = common::session_cookie(&resp).unwrap_or(cookie);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Requires Create permission on Roles &amp; Permissions"));
    assert!(!body.contains(&format!("/roles/{}/delete", temp.id)));

    // A forged submit of the hidden delete control changes nothing.
    let req = TestRequest::post()
        .uri(&format!("/roles/{}/delete", temp.id))
        .cookie(cookie.clone())
        .set_form([("csrf_token", csrf.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(state.roles.find_by_id(&temp.id).await.is_some());
    let cookie = common::session_cookie(&resp).unwrap_or(cookie);

    let req = TestRequest::get().uri("/roles").cookie(cookie).to_request();
    let body = body_text(&test::read_body(test::call_service(&app, req).await).await);
    assert!(body.contains("permission to delete in Roles &amp; Permissions"));
}

#[actix_rt::test]
async fn test_admin_creates_and_deletes_role_through_forms() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, csrf, _) = login!(app, "admin");

    let payload = serde_urlencoded::to_string([
        ("csrf_token", csrf.as_str()),
        ("name", "Campaign Ops"),
        ("description", "Runs outbound campaigns"),
        ("permissions", "campaigns:view"),
        ("permissions", "campaigns:publish"),
        ("permissions", "billing:view"),
    ]).unwrap();
    let req = TestRequest::post()
        .uri("/roles")
        .cookie(cookie.clone())
        .insert_header(ContentType::form_url_encoded())
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = common::session_cookie(&resp).unwrap_or(cookie);

    let created = state.roles.find_all().await
        .into_iter()
        .find(|r| r.name == "Campaign Ops")
        .expect("role created");
    assert_eq!(created.grant_count(), 3);
    assert_eq!(created.user_count, 0);

    let req = TestRequest::post()
        .uri(&format!("/roles/{}/delete", created.id))
        .cookie(cookie)
        .set_form([("csrf_token", csrf.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(state.roles.find_by_id(&created.id).await.is_none());
}

#[actix_rt::test]
async fn test_role_form_rejects_unsupported_actions() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, csrf, _) = login!(app, "admin");

    let payload = serde_urlencoded::to_string([
        ("csrf_token", csrf.as_str()),
        ("name", "Key Publisher"),
        ("permissions", "sdk_keys:publish"),
    ]).unwrap();
    let req = TestRequest::post()
        .uri("/roles")
        .cookie(cookie)
        .insert_header(ContentType::form_url_encoded())
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("SDK Keys does not support the Publish action"));
    assert!(state.roles.find_all().await.iter().all(|r| r.name != "Key Publisher"));
}

#[actix_rt::test]
async fn test_system_role_edit_form_is_read_only() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, _, _) = login!(app, "admin");

    let req = TestRequest::get().uri("/roles/agent/edit").cookie(cookie.clone()).to_request();
    let body = body_text(&test::read_body(test::call_service(&app, req).await).await);
    assert!(body.contains("Role: Agent"));
    assert!(!body.contains(">Save</button>"));

    let req = TestRequest::get().uri("/roles/missing/edit").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_api_role_lifecycle_rules() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, csrf, _) = login!(app, "admin");

    let req = TestRequest::delete()
        .uri("/api/v1/roles/agent")
        .cookie(cookie.clone())
        .insert_header(ContentType::json())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::delete()
        .uri("/api/v1/roles/billing_viewer")
        .cookie(cookie.clone())
        .insert_header(ContentType::json())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    // Move bea off the role, then the delete goes through.
    let req = TestRequest::post()
        .uri("/users/4/role")
        .cookie(cookie.clone())
        .set_form([("role_id", ""), ("csrf_token", csrf.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = common::session_cookie(&resp).unwrap_or(cookie);

    let req = TestRequest::delete()
        .uri("/api/v1/roles/billing_viewer")
        .cookie(cookie)
        .insert_header(ContentType::json())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert!(state.roles.find_by_id("billing_viewer").await.is_none());
}

#[actix_rt::test]
async fn test_api_create_and_mutation_content_type() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, _, _) = login!(app, "admin");

    let req = TestRequest::post()
        .uri("/api/v1/roles")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({
            "name": "Api Role",
            "permissions": [{ "screen": "billing", "actions": ["view", "export"] }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["user_count"], 0);
    assert_eq!(created["is_system"], false);

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/roles/{}", created["id"].as_str().unwrap()))
        .cookie(cookie)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_api_guard_and_permission_check() {
    let state = common::state();
    let app = test_app!(state);
    let (cookie, _, _) = login!(app, "bea");

    let req = TestRequest::get().uri("/api/v1/roles").cookie(cookie.clone()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::get()
        .uri("/api/v1/permissions/check?screen=billing&action=edit")
        .cookie(cookie.clone())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["allowed"], false);

    let req = TestRequest::get()
        .uri("/api/v1/permissions/check?screen=billing&action=view")
        .cookie(cookie.clone())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["allowed"], true);

    let req = TestRequest::get()
        .uri("/api/v1/permissions/check?screen=reports&action=view")
        .cookie(cookie)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_root_and_login_send_signed_in_user_to_landing_page() {
    let state = common::state();
    let app = test_app!(state);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(common::location(&resp), "/login");

    let (cookie, _, _) = login!(app, "bea");
    for uri in ["/", "/login"] {
        let req = TestRequest::get().uri(uri).cookie(cookie.clone()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(common::location(&resp), "/billing", "{uri}");
    }

    let req = TestRequest::get().uri("/billing").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(!body.contains("class=\"toast\""), "unexpected notice: {body}");
}

#[actix_rt::test]
async fn test_role_stripped_of_every_screen_is_forbidden() {
    let state = common::state();
    let app = test_app!(state);
    let role = state.roles.create(NewRole {
        name: "Trial".to_string(),
        description: String::new(),
        permissions: vec![ScreenPermission::new(Screen::Billing, [Action::View])],
    }).await.unwrap();
    user::assign_role(&state.users, &state.roles, 5, Some(role.id.as_str())).await.unwrap();
    let (cookie, _, landing) = login!(app, "casey");
    assert_eq!(landing, "/billing");

    state.roles.update(&role.id, RoleUpdate {
        name: "Trial".to_string(),
        description: String::new(),
        permissions: vec![],
    }).await.unwrap();

    let req = TestRequest::get().uri("/api/v1/roles").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "You don't have permission to view Roles & Permissions");

    let req = TestRequest::get().uri("/billing").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("permission to view Billing"));
}
