//! HTTP Backend Client
//!
//! [`Client`] speaks the hosted backend's REST dialect: row reads and writes
//! under `/rest/v1` with `apikey`/bearer headers plus query-string filters,
//! and the auth endpoints under `/auth/v1`. It is the production
//! implementation of [`GuestbookBackend`]; the query-string builders are
//! pure functions so the wire format stays testable.

use std::cell::RefCell;
use std::collections::HashSet;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Serialize;

use super::auth;
use super::error::{ApiError, ApiResult};
use super::GuestbookBackend;
use crate::config::Config;
use crate::state::{EntryRow, NewEntryRow, SortMode, Viewer};

/// Table holding guestbook entries
const ENTRIES_TABLE: &str = "guestbook_entries";
/// Table holding the (viewer, entry) like relation
const LIKES_TABLE: &str = "guestbook_likes";
/// Fixed OAuth identity provider
const OAUTH_PROVIDER: &str = "github";

/// HTTP client for the hosted backend
pub struct Client {
    config: Config,
    access_token: RefCell<Option<String>>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            access_token: RefCell::new(None),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.backend_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.backend_url, path)
    }

    /// Bearer value for row requests: the session token when signed in,
    /// the anon key otherwise
    fn bearer(&self) -> String {
        let token = self.access_token.borrow();
        format!("Bearer {}", token.as_deref().unwrap_or(&self.config.anon_key))
    }

    fn get(&self, url: &str) -> gloo_net::http::RequestBuilder {
        Request::get(url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &self.bearer())
    }

    fn post(&self, url: &str) -> gloo_net::http::RequestBuilder {
        Request::post(url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &self.bearer())
    }
}

/// Map a non-success response to [`ApiError::Status`]
pub(crate) async fn check(response: Response) -> ApiResult<Response> {
    if response.ok() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_else(|_| String::new());
        Err(ApiError::Status {
            status: response.status(),
            message,
        })
    }
}

/// Query string for the entry listing: full rows, ordered descending
fn entries_query(sort: SortMode) -> String {
    format!("select=*&order={}.desc", sort.order_column())
}

/// Equality filter in the backend's `column=eq.value` form
fn eq_filter(column: &str, value: &str) -> String {
    format!("{}=eq.{}", column, urlencoding::encode(value))
}

/// Query string for a viewer's like set
fn likes_query(viewer_id: &str) -> String {
    format!("select=entry_id&{}", eq_filter("user_id", viewer_id))
}

#[derive(Debug, serde::Deserialize)]
struct LikeRow {
    entry_id: String,
}

#[derive(Serialize)]
struct NewLikeRow<'a> {
    user_id: &'a str,
    entry_id: &'a str,
}

#[derive(Serialize)]
struct LikeCountPatch {
    likes: i64,
}

#[async_trait(?Send)]
impl GuestbookBackend for Client {
    async fn resolve_session(&self) -> ApiResult<Option<Viewer>> {
        // One-time OAuth redirect handling takes precedence
        if let Some(tokens) = auth::take_redirect_fragment() {
            let user = auth::fetch_user(&self.config, &tokens.access_token).await?;
            let viewer = user.into_viewer();

            let session = auth::StoredSession {
                expires_at: tokens.expires_at(chrono::Utc::now().timestamp()),
                access_token: tokens.access_token,
                viewer: viewer.clone(),
            };
            auth::store_session(&session);
            self.access_token.replace(Some(session.access_token));

            return Ok(Some(viewer));
        }

        // Otherwise restore a persisted session silently
        match auth::load_session() {
            Some(session) if !session.is_expired(chrono::Utc::now().timestamp()) => {
                self.access_token.replace(Some(session.access_token));
                Ok(Some(session.viewer))
            }
            Some(_) => {
                auth::clear_session();
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn sign_in(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let origin = window.location().origin().unwrap_or_default();
        let url = auth::authorize_url(
            &self.config,
            OAUTH_PROVIDER,
            &format!("{}/guestbook", origin),
        );

        if let Err(e) = window.location().set_href(&url) {
            web_sys::console::error_1(&format!("Sign-in redirect failed: {:?}", e).into());
        }
    }

    async fn sign_out(&self) -> ApiResult<()> {
        let token = self.access_token.replace(None);
        auth::clear_session();

        let token = token.ok_or(ApiError::NoSession)?;
        let response = Request::post(&self.auth_url("logout"))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", token))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn fetch_entries(&self, sort: SortMode) -> ApiResult<Vec<EntryRow>> {
        let url = format!("{}?{}", self.rest_url(ENTRIES_TABLE), entries_query(sort));
        let response = check(self.get(&url).send().await?).await?;
        let rows: Vec<EntryRow> = response.json().await?;
        Ok(rows)
    }

    async fn fetch_liked_entry_ids(&self, viewer_id: &str) -> ApiResult<HashSet<String>> {
        let url = format!("{}?{}", self.rest_url(LIKES_TABLE), likes_query(viewer_id));
        let response = check(self.get(&url).send().await?).await?;
        let rows: Vec<LikeRow> = response.json().await?;
        Ok(rows.into_iter().map(|row| row.entry_id).collect())
    }

    async fn insert_entry(&self, row: &NewEntryRow) -> ApiResult<EntryRow> {
        let request = self
            .post(&self.rest_url(ENTRIES_TABLE))
            .header("Prefer", "return=representation")
            .json(&[row])?;
        let response = check(request.send().await?).await?;

        // The backend answers an insert with the array of stored rows
        let rows: Vec<EntryRow> = response.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::Parse("insert returned no rows".to_string()))
    }

    async fn insert_like(&self, viewer_id: &str, entry_id: &str) -> ApiResult<()> {
        let request = self
            .post(&self.rest_url(LIKES_TABLE))
            .header("Prefer", "return=minimal")
            .json(&[NewLikeRow {
                user_id: viewer_id,
                entry_id,
            }])?;
        check(request.send().await?).await?;
        Ok(())
    }

    async fn delete_like(&self, viewer_id: &str, entry_id: &str) -> ApiResult<()> {
        let url = format!(
            "{}?{}&{}",
            self.rest_url(LIKES_TABLE),
            eq_filter("user_id", viewer_id),
            eq_filter("entry_id", entry_id),
        );
        let response = Request::delete(&url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &self.bearer())
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn set_like_count(&self, entry_id: &str, likes: i64) -> ApiResult<()> {
        let url = format!("{}?{}", self.rest_url(ENTRIES_TABLE), eq_filter("id", entry_id));
        let request = Request::patch(&url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &self.bearer())
            .header("Prefer", "return=minimal")
            .json(&LikeCountPatch { likes })?;
        check(request.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            backend_url: "https://db.example.co".to_string(),
            anon_key: "anon".to_string(),
        }
    }

    #[test]
    fn test_entries_query_per_sort_mode() {
        assert_eq!(entries_query(SortMode::Newest), "select=*&order=created_at.desc");
        assert_eq!(entries_query(SortMode::MostLiked), "select=*&order=likes.desc");
    }

    #[test]
    fn test_eq_filter_encodes_value() {
        assert_eq!(eq_filter("id", "abc-123"), "id=eq.abc-123");
        assert_eq!(eq_filter("id", "a b&c"), "id=eq.a%20b%26c");
    }

    #[test]
    fn test_likes_query_filters_by_viewer() {
        assert_eq!(
            likes_query("user-9"),
            "select=entry_id&user_id=eq.user-9"
        );
    }

    #[test]
    fn test_url_builders() {
        let client = Client::new(config());
        assert_eq!(
            client.rest_url(ENTRIES_TABLE),
            "https://db.example.co/rest/v1/guestbook_entries"
        );
        assert_eq!(client.auth_url("logout"), "https://db.example.co/auth/v1/logout");
    }

    #[test]
    fn test_bearer_falls_back_to_anon_key() {
        let client = Client::new(config());
        assert_eq!(client.bearer(), "Bearer anon");

        client.access_token.replace(Some("jwt".to_string()));
        assert_eq!(client.bearer(), "Bearer jwt");
    }
}
