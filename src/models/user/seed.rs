use super::types::User;

/// Console users shipped with the demo data. All share `password_hash`.
/// `casey` starts without a role and cannot sign in until assigned one.
pub fn default_users(password_hash: &str) -> Vec<User> {
    [
        (1, "admin", "Admin", "admin@example.com", Some("client_admin")),
        (2, "sam", "Sam Supervisor", "sam@example.com", Some("supervisor")),
        (3, "alex", "Alex Agent", "alex@example.com", Some("agent")),
        (4, "bea", "Bea Billing", "bea@example.com", Some("billing_viewer")),
        (5, "casey", "Casey Newhire", "casey@example.com", None),
    ]
    .into_iter()
    .map(|(id, username, display_name, email, role_id)| User {
        id,
        username: username.to_string(),
        password: password_hash.to_string(),
        email: email.to_string(),
        display_name: display_name.to_string(),
        role_id: role_id.map(String::from),
    })
    .collect()
}
