use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A navigable section of the console. Permissions are granted per screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Dashboard,
    Agents,
    Tasks,
    KnowledgeBase,
    Conversations,
    Campaigns,
    Roles,
    SdkKeys,
    Integrations,
    Billing,
    Profile,
}

impl Screen {
    pub const ALL: [Screen; 11] = [
        Screen::Dashboard,
        Screen::Agents,
        Screen::Tasks,
        Screen::KnowledgeBase,
        Screen::Conversations,
        Screen::Campaigns,
        Screen::Roles,
        Screen::SdkKeys,
        Screen::Integrations,
        Screen::Billing,
        Screen::Profile,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Agents => "agents",
            Screen::Tasks => "tasks",
            Screen::KnowledgeBase => "knowledge_base",
            Screen::Conversations => "conversations",
            Screen::Campaigns => "campaigns",
            Screen::Roles => "roles",
            Screen::SdkKeys => "sdk_keys",
            Screen::Integrations => "integrations",
            Screen::Billing => "billing",
            Screen::Profile => "profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Agents => "AI Agents",
            Screen::Tasks => "Task Sequences",
            Screen::KnowledgeBase => "Knowledge Base",
            Screen::Conversations => "Live Conversations",
            Screen::Campaigns => "Calling Campaigns",
            Screen::Roles => "Roles & Permissions",
            Screen::SdkKeys => "SDK Keys",
            Screen::Integrations => "Integrations",
            Screen::Billing => "Billing",
            Screen::Profile => "Profile",
        }
    }

    /// Canonical route the screen is served at.
    pub fn path(self) -> &'static str {
        match self {
            Screen::Dashboard => "/dashboard",
            Screen::Agents => "/agents",
            Screen::Tasks => "/tasks",
            Screen::KnowledgeBase => "/knowledge-base",
            Screen::Conversations => "/conversations",
            Screen::Campaigns => "/campaigns",
            Screen::Roles => "/roles",
            Screen::SdkKeys => "/sdk-keys",
            Screen::Integrations => "/integrations",
            Screen::Billing => "/billing",
            Screen::Profile => "/profile",
        }
    }

    /// Actions that mean something on this screen. Used to build the role
    /// form and the placeholder screen toolbars.
    pub fn supported_actions(self) -> &'static [Action] {
        use Action::*;
        match self {
            Screen::Dashboard => &[View, Export],
            Screen::Agents => &[View, Create, Edit, Delete, Publish],
            Screen::Tasks => &[View, Create, Edit, Delete, Publish],
            Screen::KnowledgeBase => &[View, Create, Edit, Delete, Publish],
            Screen::Conversations => &[View, Edit, Export],
            Screen::Campaigns => &[View, Create, Edit, Delete, Export, Publish],
            Screen::Roles => &[View, Create, Edit, Delete],
            Screen::SdkKeys => &[View, Create, Delete],
            Screen::Integrations => &[View, Create, Edit, Delete],
            Screen::Billing => &[View, Edit, Export],
            Screen::Profile => &[View, Edit],
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.id() == s)
            .ok_or_else(|| format!("Unknown screen '{s}'"))
    }
}

/// A CRUD-like verb gating an operation within a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Export,
    Publish,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Export,
        Action::Publish,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Export => "export",
            Action::Publish => "publish",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::View => "View",
            Action::Create => "Create",
            Action::Edit => "Edit",
            Action::Delete => "Delete",
            Action::Export => "Export",
            Action::Publish => "Publish",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.id() == s)
            .ok_or_else(|| format!("Unknown action '{s}'"))
    }
}

/// Permission code in `screen.action` form, as shown in denial notices.
pub fn permission_code(screen: Screen, action: Action) -> String {
    format!("{}.{}", screen.id(), action.id())
}
