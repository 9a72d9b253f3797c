//! App Root Component
//!
//! Routing shell. Builds the backend client from configuration and injects
//! it, together with the session store, into the component tree.

use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use crate::api::{Backend, Client};
use crate::config::Config;
use crate::pages::{Guestbook, Home};
use crate::state::SessionStore;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Explicitly constructed client, provided to the tree instead of a
    // global singleton
    let config = Config::from_env();
    provide_context(Backend(Rc::new(Client::new(config))));
    provide_context(SessionStore::new());

    view! {
        <Router>
            <main>
                <AppRoutes />
            </main>
        </Router>
    }
}

/// Route table: landing page, guestbook, and a catch-all that also lands on
/// the guestbook so OAuth redirect URLs always resolve.
#[cfg(not(feature = "dev-routes"))]
#[component]
fn AppRoutes() -> impl IntoView {
    view! {
        <Routes>
            <Route path="/" view=Home />
            <Route path="/guestbook" view=Guestbook />
            <Route path="/*any" view=Guestbook />
        </Routes>
    }
}

/// Route table with the development playground mounted ahead of the
/// catch-all.
#[cfg(feature = "dev-routes")]
#[component]
fn AppRoutes() -> impl IntoView {
    view! {
        <Routes>
            <Route path="/" view=Home />
            <Route path="/guestbook" view=Guestbook />
            <Route path="/dev" view=crate::pages::dev::DevPlayground />
            <Route path="/*any" view=Guestbook />
        </Routes>
    }
}
