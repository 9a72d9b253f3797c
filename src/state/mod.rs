//! State Management
//!
//! Session state and the pure entry-list transitions behind the guestbook.

pub mod entries;
pub mod session;

pub use entries::{Entry, EntryRow, NewEntryRow, SortMode};
pub use session::{SessionStore, SessionSubscription, Viewer};
