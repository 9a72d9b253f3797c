//! Pages
//!
//! Top-level page components for each route.

#[cfg(feature = "dev-routes")]
pub mod dev;
pub mod guestbook;
pub mod home;

pub use guestbook::Guestbook;
pub use home::Home;
