use crate::models::role::Role;
use crate::models::screen::{Action, Screen};
use crate::templates_structs::{PermissionCell, PermissionRow};

/// Decode a URL-encoded string (form data): `+` → space, `%HH` → byte.
pub fn url_decode(s: &str) -> String {
    let b = s.as_bytes();
    let mut out = Vec::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < b.len() => {
                let hex = std::str::from_utf8(&b[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                        continue;
                    }
                    None => out.push(b'%'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Parse URL-encoded form body, supporting duplicate keys (e.g. checkboxes).
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|s| !s.is_empty())
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            Some((url_decode(k), url_decode(v)))
        })
        .collect()
}

pub fn get_field<'a>(params: &'a [(String, String)], key: &str) -> &'a str {
    params.iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

pub fn get_all<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    params.iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

/// Build the permission matrix for the role form, checking the cells the
/// role (if any) grants.
pub fn permission_rows(role: Option<&Role>) -> Vec<PermissionRow> {
    Screen::ALL
        .into_iter()
        .map(|screen| {
            let granted = role.and_then(|r| r.permissions.iter().find(|p| p.screen == screen));
            let cells = Action::ALL
                .into_iter()
                .map(|action| PermissionCell {
                    code: format!("{}:{}", screen.id(), action.id()),
                    supported: screen.supported_actions().contains(&action),
                    checked: granted.is_some_and(|p| p.actions.contains(&action)),
                })
                .collect();
            PermissionRow { screen_label: screen.label().to_string(), cells }
        })
        .collect()
}

pub fn action_labels() -> Vec<String> {
    Action::ALL.iter().map(|a| a.label().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_form_encoding() {
        assert_eq!(url_decode("Ops+Lead"), "Ops Lead");
        assert_eq!(url_decode("billing%3Aview"), "billing:view");
        assert_eq!(url_decode("100%"), "100%");
        assert_eq!(url_decode("%C3%A9"), "é");
    }

    #[test]
    fn keeps_duplicate_keys() {
        let params = parse_form_body("name=Ops&permissions=billing%3Aview&permissions=agents%3Aview");
        assert_eq!(get_field(&params, "name"), "Ops");
        assert_eq!(get_all(&params, "permissions"), vec!["billing:view", "agents:view"]);
        assert_eq!(get_field(&params, "missing"), "");
    }

    #[test]
    fn matrix_marks_unsupported_cells() {
        let rows = permission_rows(None);
        assert_eq!(rows.len(), Screen::ALL.len());
        let sdk = rows.iter().find(|r| r.screen_label == "SDK Keys").unwrap();
        assert!(sdk.cells.iter().any(|c| !c.supported));
        assert!(rows.iter().all(|r| r.cells.iter().all(|c| !c.checked)));
    }
}
