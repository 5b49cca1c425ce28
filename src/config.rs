use std::time::Duration;

use actix_web::cookie::Key;

use crate::models::latency::Latency;

/// Runtime settings read from the environment. `main` loads `.env` first.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub app_name: String,
    pub session_key: Option<String>,
    pub mock_latency: Latency,
    pub default_password: String,
    pub login_max_attempts: usize,
    pub login_window: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            app_name: "Engage Console".to_string(),
            session_key: None,
            mock_latency: Latency::from_millis(150),
            default_password: "admin123".to_string(),
            login_max_attempts: 5,
            login_window: Duration::from_secs(900),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable numbers fall back to
    /// the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let parse_u64 = |key: &str| -> Option<u64> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("Ignoring {key}={raw:?}: not a number");
                    None
                }
            }
        };

        Self {
            bind_addr: lookup("APP_BIND").unwrap_or(defaults.bind_addr),
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            session_key: lookup("SESSION_KEY"),
            mock_latency: parse_u64("MOCK_LATENCY_MS")
                .map(Latency::from_millis)
                .unwrap_or(defaults.mock_latency),
            default_password: lookup("DEFAULT_PASSWORD").unwrap_or(defaults.default_password),
            login_max_attempts: parse_u64("LOGIN_MAX_ATTEMPTS")
                .map(|v| v as usize)
                .unwrap_or(defaults.login_max_attempts),
            login_window: parse_u64("LOGIN_WINDOW_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.login_window),
        }
    }

    /// Session encryption key. A SESSION_KEY of 64+ bytes keeps sessions
    /// valid across restarts; otherwise a random key is generated.
    pub fn cookie_key(&self) -> Key {
        match self.session_key.as_deref() {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+) - generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set - generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}
