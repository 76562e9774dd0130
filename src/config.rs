use std::{env, fmt::Display, str::FromStr};

use leptos::logging::{log, warn};

use crate::models::review::MAX_PAGE_SIZE;

pub const DEFAULT_DB_PATH: &str = "reviews.db";

/// Server settings that do not belong to Leptos' own configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: String,
    pub max_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: lookup("REVIEWS_DB_PATH").unwrap_or_else(|| {
                log!("[CONFIG] REVIEWS_DB_PATH not set, using default: {}", defaults.db_path);
                defaults.db_path
            }),
            max_page_size: try_load(&lookup, "REVIEWS_MAX_LIMIT", defaults.max_page_size).max(1),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("[CONFIG] Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[])), ServerConfig::default());
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("REVIEWS_DB_PATH", "/tmp/reviews.sqlite"),
            ("REVIEWS_MAX_LIMIT", "250"),
        ]));
        assert_eq!(config.db_path, "/tmp/reviews.sqlite");
        assert_eq!(config.max_page_size, 250);

        let config = ServerConfig::from_lookup(lookup(&[("REVIEWS_MAX_LIMIT", "lots")]));
        assert_eq!(config.max_page_size, MAX_PAGE_SIZE);
    }
}
