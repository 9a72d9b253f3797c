//! Configuration
//!
//! Backend connection settings for the hosted guestbook backend.
//! Defaults are baked in at compile time from environment variables and can
//! be overridden at runtime through local storage.

/// Default backend base URL (compile-time override via `ATRIUM_BACKEND_URL`)
pub const DEFAULT_BACKEND_URL: &str = "https://example.supabase.co";

/// Default public API key (compile-time override via `ATRIUM_ANON_KEY`)
pub const DEFAULT_ANON_KEY: &str = "public-anon-key";

const STORAGE_KEY_URL: &str = "atrium_backend_url";
const STORAGE_KEY_ANON: &str = "atrium_anon_key";

/// Connection settings for the hosted backend
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the backend, without a trailing slash
    pub backend_url: String,
    /// Public (anonymous) API key sent with every request
    pub anon_key: String,
}

impl Config {
    /// Build the configuration from compile-time defaults plus any
    /// local-storage overrides.
    pub fn from_env() -> Self {
        let backend_url = stored_value(STORAGE_KEY_URL)
            .unwrap_or_else(|| option_env!("ATRIUM_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL).to_string());
        let anon_key = stored_value(STORAGE_KEY_ANON)
            .unwrap_or_else(|| option_env!("ATRIUM_ANON_KEY").unwrap_or(DEFAULT_ANON_KEY).to_string());

        Self {
            backend_url: normalize_url(&backend_url),
            anon_key,
        }
    }
}

/// Read an override value from local storage
fn stored_value(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(key).ok()?
}

/// Normalize a base URL: strip whitespace and trailing slashes
pub fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize_url("https://db.example.co/"), "https://db.example.co");
        assert_eq!(normalize_url("https://db.example.co///"), "https://db.example.co");
    }

    #[test]
    fn test_normalize_keeps_plain_url() {
        assert_eq!(normalize_url("https://db.example.co"), "https://db.example.co");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_url("  https://db.example.co/ "), "https://db.example.co");
    }
}
