//! Client configuration read from the environment.

use std::env;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_USER_ID: &str = "user123";

pub const BASE_URL_VAR: &str = "TODO_API_BASE_URL";
pub const USER_ID_VAR: &str = "TODO_DEFAULT_USER_ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root; `/todos` is appended to it.
    pub base_url: String,
    /// Owner stamped on new drafts.
    pub default_user_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read `TODO_API_BASE_URL` and `TODO_DEFAULT_USER_ID`, falling back to
    /// the defaults for unset or blank values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };
        Self {
            base_url: read(BASE_URL_VAR, defaults.base_url),
            default_user_id: read(USER_ID_VAR, defaults.default_user_id),
        }
    }
}
