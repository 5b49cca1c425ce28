//! Permission-gated controls.
//!
//! A gate pairs a control with the (screen, action) it needs. Unauthorized
//! gates either disappear or render disabled with a lock and tooltip, and
//! swallow activation with a denial notice instead of running the handler.

use crate::auth::permission::can;
use crate::models::role::Role;
use crate::models::screen::{Action, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Enabled,
    Disabled { tooltip: String },
    Hidden,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Activation<T> {
    Invoked(T),
    Denied { notice: String },
}

#[derive(Debug, Clone)]
pub struct PermissionGate {
    pub screen: Screen,
    pub action: Action,
    pub label: String,
    pub hide_when_denied: bool,
}

impl PermissionGate {
    pub fn new(screen: Screen, action: Action, label: impl Into<String>) -> Self {
        Self { screen, action, label: label.into(), hide_when_denied: false }
    }

    pub fn hide_when_denied(mut self) -> Self {
        self.hide_when_denied = true;
        self
    }

    pub fn is_allowed(&self, role: &Role) -> bool {
        can(role, self.screen, self.action)
    }

    pub fn state(&self, role: &Role) -> GateState {
        if self.is_allowed(role) {
            GateState::Enabled
        } else if self.hide_when_denied {
            GateState::Hidden
        } else {
            GateState::Disabled { tooltip: missing_permission_tooltip(self.screen, self.action) }
        }
    }

    /// Run `handler` if the role holds the permission; otherwise return the
    /// notice to show and leave `handler` uncalled.
    pub fn activate<T>(&self, role: &Role, handler: impl FnOnce() -> T) -> Activation<T> {
        if self.is_allowed(role) {
            Activation::Invoked(handler())
        } else {
            log::warn!("Role '{}' blocked from {}.{}", role.id, self.screen, self.action);
            Activation::Denied { notice: denied_action_notice(self.screen, self.action) }
        }
    }

    /// Template-facing rendering of this gate for `role`. `None` when hidden.
    pub fn view(&self, role: &Role, href: impl Into<String>, method: GateMethod) -> Option<GateView> {
        let (disabled, tooltip) = match self.state(role) {
            GateState::Hidden => return None,
            GateState::Enabled => (false, String::new()),
            GateState::Disabled { tooltip } => (true, tooltip),
        };
        Some(GateView {
            label: self.label.clone(),
            href: href.into(),
            is_post: method == GateMethod::Post,
            disabled,
            tooltip,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMethod {
    Get,
    Post,
}

/// A gated control ready for a template: a link, or a POST button.
#[derive(Debug, Clone)]
pub struct GateView {
    pub label: String,
    pub href: String,
    pub is_post: bool,
    pub disabled: bool,
    pub tooltip: String,
}

pub fn missing_permission_tooltip(screen: Screen, action: Action) -> String {
    format!("Requires {} permission on {}", action.label(), screen.label())
}

pub fn denied_action_notice(screen: Screen, action: Action) -> String {
    format!("You don't have permission to {} in {}", action.id(), screen.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::ScreenPermission;
    use chrono::Utc;
    use std::cell::Cell;

    fn viewer() -> Role {
        Role {
            id: "viewer".to_string(),
            name: "Viewer".to_string(),
            description: String::new(),
            is_system: false,
            permissions: vec![ScreenPermission::new(Screen::Billing, [Action::View])],
            user_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn authorized_gate_forwards_activation() {
        let gate = PermissionGate::new(Screen::Billing, Action::View, "Open invoices");
        assert_eq!(gate.state(&viewer()), GateState::Enabled);
        assert_eq!(gate.activate(&viewer(), || 42), Activation::Invoked(42));
    }

    #[test]
    fn unauthorized_gate_is_disabled_and_swallows_activation() {
        let gate = PermissionGate::new(Screen::Billing, Action::Edit, "Change plan");
        let called = Cell::new(false);

        let result = gate.activate(&viewer(), || called.set(true));

        assert!(!called.get());
        assert_eq!(
            result,
            Activation::Denied { notice: denied_action_notice(Screen::Billing, Action::Edit) }
        );
        assert_eq!(
            gate.state(&viewer()),
            GateState::Disabled { tooltip: missing_permission_tooltip(Screen::Billing, Action::Edit) }
        );
    }

    #[test]
    fn hidden_gate_renders_nothing() {
        let gate = PermissionGate::new(Screen::Billing, Action::Edit, "Change plan").hide_when_denied();
        assert_eq!(gate.state(&viewer()), GateState::Hidden);
        assert!(gate.view(&viewer(), "/billing/plan", GateMethod::Post).is_none());
    }

    #[test]
    fn view_carries_lock_state() {
        let gate = PermissionGate::new(Screen::Billing, Action::Export, "Export");
        let view = gate.view(&viewer(), "/billing/export", GateMethod::Get).unwrap();
        assert!(view.disabled);
        assert!(!view.is_post);
        assert!(view.tooltip.contains("Export"));
    }
}
