use chrono::Utc;

use crate::models::screen::{Action, Screen};
use super::types::{CLIENT_ADMIN_ROLE, Role, ScreenPermission};

use Action::*;

fn role(id: &str, name: &str, description: &str, is_system: bool, permissions: Vec<ScreenPermission>) -> Role {
    let now = Utc::now();
    Role {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        is_system,
        permissions,
        user_count: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Roles shipped with the console. User counts start at zero and are filled
/// in as the seeded users are attached.
pub fn default_roles() -> Vec<Role> {
    let admin_permissions = Screen::ALL
        .into_iter()
        .map(|screen| ScreenPermission::new(screen, screen.supported_actions().iter().copied()))
        .collect();

    vec![
        role(
            CLIENT_ADMIN_ROLE,
            "Client Admin",
            "Full access to every screen and action",
            true,
            admin_permissions,
        ),
        role(
            "supervisor",
            "Supervisor",
            "Oversees agents, conversations and campaigns",
            true,
            vec![
                ScreenPermission::new(Screen::Dashboard, [View, Export]),
                ScreenPermission::new(Screen::Agents, [View, Edit]),
                ScreenPermission::new(Screen::Tasks, [View, Edit]),
                ScreenPermission::new(Screen::KnowledgeBase, [View, Create, Edit]),
                ScreenPermission::new(Screen::Conversations, [View, Edit, Export]),
                ScreenPermission::new(Screen::Campaigns, [View, Create, Edit, Export]),
                ScreenPermission::new(Screen::Profile, [View, Edit]),
            ],
        ),
        role(
            "agent",
            "Agent",
            "Handles live conversations",
            true,
            vec![
                ScreenPermission::new(Screen::Dashboard, [View]),
                ScreenPermission::new(Screen::Conversations, [View, Edit]),
                ScreenPermission::new(Screen::KnowledgeBase, [View]),
                ScreenPermission::new(Screen::Profile, [View, Edit]),
            ],
        ),
        role(
            "billing_viewer",
            "Billing Viewer",
            "Read-only access to invoices and usage",
            false,
            vec![
                ScreenPermission::new(Screen::Billing, [View]),
                ScreenPermission::new(Screen::Profile, [View]),
            ],
        ),
    ]
}
