//! Backend API
//!
//! Client for the hosted backend: row storage over its REST surface and the
//! OAuth session endpoints. The whole collaborator surface is behind the
//! [`GuestbookBackend`] trait so the page code depends on an injected trait
//! object rather than a global client, and tests can substitute a double.

pub mod auth;
pub mod client;
pub mod error;

pub use client::Client;
pub use error::{ApiError, ApiResult};

use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;

use crate::state::{EntryRow, NewEntryRow, SortMode, Viewer};

/// Remote collaborator surface consumed by the guestbook
#[async_trait(?Send)]
pub trait GuestbookBackend {
    /// Resolve the current session: an OAuth redirect fragment is exchanged
    /// (and cleared from the URL) first, otherwise a stored session is
    /// restored silently.
    async fn resolve_session(&self) -> ApiResult<Option<Viewer>>;

    /// Start the OAuth sign-in flow; navigates the page away.
    fn sign_in(&self);

    /// Revoke the active session token. Local session state is cleared
    /// before the remote revoke is attempted.
    async fn sign_out(&self) -> ApiResult<()>;

    /// All entries, ordered descending per sort mode
    async fn fetch_entries(&self, sort: SortMode) -> ApiResult<Vec<EntryRow>>;

    /// Ids of the entries a viewer has liked
    async fn fetch_liked_entry_ids(&self, viewer_id: &str) -> ApiResult<HashSet<String>>;

    /// Insert a new entry and return the stored row
    async fn insert_entry(&self, row: &NewEntryRow) -> ApiResult<EntryRow>;

    /// Create the like relation (viewer, entry)
    async fn insert_like(&self, viewer_id: &str, entry_id: &str) -> ApiResult<()>;

    /// Delete the like relation (viewer, entry)
    async fn delete_like(&self, viewer_id: &str, entry_id: &str) -> ApiResult<()>;

    /// Write the denormalized like counter for an entry
    async fn set_like_count(&self, entry_id: &str, likes: i64) -> ApiResult<()>;
}

/// Context handle for the injected backend instance
#[derive(Clone)]
pub struct Backend(pub Rc<dyn GuestbookBackend>);
