//! Atrium
//!
//! Personal portfolio site with a public guestbook, built with Leptos (WASM).
//!
//! # Features
//!
//! - Landing page with a link into the guestbook
//! - Guestbook with GitHub sign-in, message posting, and likes
//! - Optimistic like toggling with exact rollback on failure
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All persistence and authentication are delegated to a hosted
//! Supabase-compatible backend reached over plain HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod config;
mod pages;
mod palette;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
