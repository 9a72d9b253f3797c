//! Auth Plumbing
//!
//! OAuth redirect-fragment handling, the authorize URL, the user-info
//! endpoint, and session persistence across reloads. The fragment parser and
//! URL builder are pure; only the storage and location accessors touch the
//! browser.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use super::error::ApiResult;
use crate::config::Config;
use crate::state::session::{display_name, Viewer};

/// Local-storage key for the persisted session
const SESSION_KEY: &str = "atrium_session";

/// Fallback token lifetime when the fragment omits `expires_in`
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Tokens carried in an OAuth redirect fragment
#[derive(Clone, Debug, PartialEq)]
pub struct OauthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

impl OauthTokens {
    /// Absolute expiry (unix seconds) given the current time
    pub fn expires_at(&self, now: i64) -> i64 {
        now + self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN)
    }
}

/// Parse an OAuth redirect fragment of the form
/// `#access_token=...&refresh_token=...&expires_in=...`.
///
/// Returns `None` unless an access token is present.
pub fn parse_fragment(hash: &str) -> Option<OauthTokens> {
    let fragment = hash.strip_prefix('#').unwrap_or(hash);

    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;

    for pair in fragment.split('&') {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next().unwrap_or("");
        let value = parts.next().unwrap_or("");
        let value = urlencoding::decode(value).ok()?.into_owned();

        match key {
            "access_token" if !value.is_empty() => access_token = Some(value),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value),
            "expires_in" => expires_in = value.parse().ok(),
            _ => {}
        }
    }

    Some(OauthTokens {
        access_token: access_token?,
        refresh_token,
        expires_in,
    })
}

/// Read and clear the OAuth redirect fragment from the current URL, if one
/// is present. Clearing happens before the tokens are used so a re-render
/// can never replay the exchange.
pub fn take_redirect_fragment() -> Option<OauthTokens> {
    let window = web_sys::window()?;
    let hash = window.location().hash().ok()?;
    if !hash.contains("access_token") {
        return None;
    }

    let _ = window.location().set_hash("");
    parse_fragment(&hash)
}

/// Authorize URL for the fixed OAuth provider
pub fn authorize_url(config: &Config, provider: &str, redirect_to: &str) -> String {
    format!(
        "{}/auth/v1/authorize?provider={}&redirect_to={}",
        config.backend_url,
        provider,
        urlencoding::encode(redirect_to)
    )
}

/// User record from the auth endpoint
#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Provider-supplied profile metadata
#[derive(Debug, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl AuthUser {
    pub fn into_viewer(self) -> Viewer {
        Viewer {
            id: self.id,
            name: display_name(
                self.user_metadata.user_name.as_deref(),
                self.user_metadata.preferred_username.as_deref(),
            ),
            avatar_url: self.user_metadata.avatar_url.unwrap_or_default(),
        }
    }
}

/// Exchange an access token for the user it belongs to
pub async fn fetch_user(config: &Config, access_token: &str) -> ApiResult<AuthUser> {
    let url = format!("{}/auth/v1/user", config.backend_url);
    let response = Request::get(&url)
        .header("apikey", &config.anon_key)
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await?;
    let response = super::client::check(response).await?;
    Ok(response.json().await?)
}

/// Session persisted in local storage across page loads
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub expires_at: i64,
    pub viewer: Viewer,
}

impl StoredSession {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// Load the persisted session, if any
pub fn load_session() -> Option<StoredSession> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let raw = storage.get_item(SESSION_KEY).ok()??;
    serde_json::from_str(&raw).ok()
}

/// Persist the session for future page loads
pub fn store_session(session: &StoredSession) {
    let Ok(raw) = serde_json::to_string(session) else {
        return;
    };
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(SESSION_KEY, &raw);
        }
    }
}

/// Drop the persisted session
pub fn clear_session() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_full() {
        let tokens = parse_fragment(
            "#access_token=jwt-abc&expires_in=3600&refresh_token=ref-1&token_type=bearer",
        )
        .unwrap();

        assert_eq!(tokens.access_token, "jwt-abc");
        assert_eq!(tokens.refresh_token, Some("ref-1".to_string()));
        assert_eq!(tokens.expires_in, Some(3600));
    }

    #[test]
    fn test_parse_fragment_minimal() {
        let tokens = parse_fragment("access_token=jwt-abc").unwrap();
        assert_eq!(tokens.access_token, "jwt-abc");
        assert_eq!(tokens.refresh_token, None);
        assert_eq!(tokens.expires_at(100), 100 + 3600);
    }

    #[test]
    fn test_parse_fragment_without_access_token() {
        assert_eq!(parse_fragment("#error=access_denied"), None);
        assert_eq!(parse_fragment(""), None);
    }

    #[test]
    fn test_parse_fragment_decodes_values() {
        let tokens = parse_fragment("#access_token=a%2Bb").unwrap();
        assert_eq!(tokens.access_token, "a+b");
    }

    #[test]
    fn test_authorize_url_encodes_redirect() {
        let config = Config {
            backend_url: "https://db.example.co".to_string(),
            anon_key: "anon".to_string(),
        };
        assert_eq!(
            authorize_url(&config, "github", "https://me.example/guestbook"),
            "https://db.example.co/auth/v1/authorize?provider=github&redirect_to=https%3A%2F%2Fme.example%2Fguestbook"
        );
    }

    #[test]
    fn test_stored_session_expiry() {
        let session = StoredSession {
            access_token: "jwt".to_string(),
            expires_at: 1000,
            viewer: Viewer {
                id: "u1".to_string(),
                name: "mira".to_string(),
                avatar_url: String::new(),
            },
        };

        assert!(!session.is_expired(999));
        assert!(session.is_expired(1000));
        assert!(session.is_expired(2000));
    }

    #[test]
    fn test_auth_user_into_viewer_falls_back() {
        let user = AuthUser {
            id: "u1".to_string(),
            user_metadata: UserMetadata {
                user_name: None,
                preferred_username: Some("octocat".to_string()),
                avatar_url: None,
            },
        };
        let viewer = user.into_viewer();

        assert_eq!(viewer.name, "octocat");
        assert_eq!(viewer.avatar_url, "");
    }
}
