//! Environment loading helpers.
//!
//! Trimming and defaults live here so callers never repeat `or_else` ladders.

use std::env;

/// Load `.env` from the current directory once. Existing variables win.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env: {}", e),
    });
}

/// Read `key`, falling back to `default`.
pub fn env_or<F>(key: &str, default: F) -> String
where
    F: FnOnce() -> String,
{
    env_optional(key).unwrap_or_else(default)
}

/// Read `key`, trimmed. Blank values count as unset.
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

/// Parse a boolean variable: 0/false/no/off are false, anything else set is true.
pub fn env_bool(key: &str, default: bool) -> bool {
    match env_optional(key) {
        Some(s) => !matches!(
            s.to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns its variable names; the process environment is shared.

    #[test]
    fn test_env_optional_blank_is_unset() {
        env::set_var("SCRIPTPACK_TEST_BLANK", "   ");
        assert_eq!(env_optional("SCRIPTPACK_TEST_BLANK"), None);
        env::remove_var("SCRIPTPACK_TEST_BLANK");
    }

    #[test]
    fn test_env_optional_trims() {
        env::set_var("SCRIPTPACK_TEST_PADDED", " value ");
        assert_eq!(
            env_optional("SCRIPTPACK_TEST_PADDED"),
            Some("value".to_string())
        );
        env::remove_var("SCRIPTPACK_TEST_PADDED");
    }

    #[test]
    fn test_env_or_default() {
        assert_eq!(
            env_or("SCRIPTPACK_TEST_NEVER_SET", || "fallback".to_string()),
            "fallback"
        );
    }

    #[test]
    fn test_env_bool_values() {
        env::set_var("SCRIPTPACK_TEST_BOOL_OFF", "Off");
        env::set_var("SCRIPTPACK_TEST_BOOL_ON", "yes");
        assert!(!env_bool("SCRIPTPACK_TEST_BOOL_OFF", true));
        assert!(env_bool("SCRIPTPACK_TEST_BOOL_ON", false));
        assert!(env_bool("SCRIPTPACK_TEST_BOOL_MISSING", true));
        env::remove_var("SCRIPTPACK_TEST_BOOL_OFF");
        env::remove_var("SCRIPTPACK_TEST_BOOL_ON");
    }
}
