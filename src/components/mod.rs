//! UI Components
//!
//! Reusable Leptos components for the guestbook.

pub mod auth_panel;
pub mod entry_card;
pub mod entry_form;
pub mod loading;

pub use auth_panel::AuthPanel;
pub use entry_card::EntryCard;
pub use entry_form::EntryForm;
pub use loading::Loading;
