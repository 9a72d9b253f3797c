//! Dev Playground
//!
//! Component previews mounted at `/dev` when the `dev-routes` feature is
//! enabled. Renders entry-card fixtures and the author color palette
//! without touching the backend.

use leptos::*;

use crate::components::EntryCard;
use crate::palette::COLOR_CLASSES;
use crate::state::entries::{Entry, EntryRow};

/// Component playground page
#[component]
pub fn DevPlayground() -> impl IntoView {
    let on_like = Callback::new(|id: String| {
        web_sys::console::log_1(&format!("like toggled: {}", id).into());
    });

    view! {
        <div class="min-h-screen bg-gray-950 text-white p-8">
            <div class="max-w-4xl mx-auto space-y-8">
                <h1 class="text-3xl font-bold">"Component Playground"</h1>

                <section>
                    <h2 class="text-xl font-semibold mb-4">"Author palette"</h2>
                    <div class="flex flex-wrap gap-3">
                        {COLOR_CLASSES
                            .iter()
                            .map(|class| view! {
                                <span class=format!("font-semibold {}", class)>{*class}</span>
                            })
                            .collect_view()}
                    </div>
                </section>

                <section>
                    <h2 class="text-xl font-semibold mb-4">"Entry cards"</h2>
                    <div class="grid gap-4 md:grid-cols-2">
                        {fixtures()
                            .into_iter()
                            .map(|entry| view! { <EntryCard entry=entry on_like=on_like /> })
                            .collect_view()}
                    </div>
                </section>
            </div>
        </div>
    }
}

fn fixtures() -> Vec<Entry> {
    let rows = [
        ("fix-1", "mira", "Loved the projects page!", 4, true),
        ("fix-2", "octocat", "Greetings from the playground.", 0, false),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (id, name, message, likes, liked))| {
            let row = EntryRow {
                id: id.to_string(),
                created_at: "2024-03-01T12:00:00+00:00".to_string(),
                user_id: format!("user-{}", i),
                user_name: name.to_string(),
                user_avatar_url: String::new(),
                message: message.to_string(),
                likes,
            };
            Entry::from_row(row, liked, COLOR_CLASSES[i % COLOR_CLASSES.len()])
        })
        .collect()
}
