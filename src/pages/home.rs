//! Landing Page
//!
//! Static hero pointing visitors at the guestbook.

use leptos::*;
use leptos_router::*;

/// Landing page component
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-950 text-white flex flex-col items-center justify-center p-4">
            <h1 class="text-4xl font-bold mb-4">"Welcome to My Portfolio"</h1>
            <p class="text-xl text-gray-400 mb-8 max-w-md text-center">
                "Check out my interactive guestbook where you can leave a message after \
                 signing in with GitHub."
            </p>
            <A
                href="/guestbook"
                class="px-8 py-4 bg-sky-600 hover:bg-sky-700 rounded-lg text-lg font-semibold transition-colors"
            >
                "Visit Guestbook"
            </A>
        </div>
    }
}
