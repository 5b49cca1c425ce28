use crate::models::role::ScreenPermission;
use crate::models::screen::{Action, Screen};

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Only actions the screen supports may be granted on it.
pub fn validate_permissions(permissions: &[ScreenPermission]) -> Vec<String> {
    permissions
        .iter()
        .flat_map(|p| {
            p.actions
                .iter()
                .filter(|a| !p.screen.supported_actions().contains(a))
                .map(|a| format!("{} does not support the {} action", p.screen.label(), a.label()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Parse checkbox values of the form `screen:action` into permissions.
/// Unknown screens or actions are reported as errors.
pub fn parse_permission_codes<'a>(
    codes: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<ScreenPermission>, Vec<String>> {
    let mut permissions: Vec<ScreenPermission> = Vec::new();
    let mut errors = Vec::new();
    for code in codes {
        let parsed = code
            .split_once(':')
            .ok_or_else(|| format!("Malformed permission '{code}'"))
            .and_then(|(s, a)| Ok((s.parse::<Screen>()?, a.parse::<Action>()?)));
        match parsed {
            Ok((screen, action)) => match permissions.iter_mut().find(|p| p.screen == screen) {
                Some(p) => {
                    p.actions.insert(action);
                }
                None => permissions.push(ScreenPermission::new(screen, [action])),
            },
            Err(e) => errors.push(e),
        }
    }
    if errors.is_empty() { Ok(permissions) } else { Err(errors) }
}
