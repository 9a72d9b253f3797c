//! Guestbook Page
//!
//! The only stateful component in the app. Resolves the session on mount
//! (including one-time OAuth redirect handling), keeps the entry list in
//! sync with the sort mode and the viewer, and owns message submission and
//! the optimistic like toggle.

use std::collections::HashSet;

use leptos::*;

use crate::api::{ApiResult, Backend, GuestbookBackend};
use crate::components::{AuthPanel, EntryCard, EntryForm, Loading};
use crate::palette;
use crate::state::entries::{self, Entry, LikeIntent, SortMode};
use crate::state::session::SessionStore;

/// Guestbook page component
#[component]
pub fn Guestbook() -> impl IntoView {
    let backend = use_context::<Backend>().expect("Backend not found");
    let session = use_context::<SessionStore>().expect("SessionStore not found");

    let (entries, set_entries) = create_signal(Vec::<Entry>::new());
    let (viewer, set_viewer) = create_signal(session.viewer());
    let (new_message, set_new_message) = create_signal(String::new());
    let (loading, set_loading) = create_signal(true);
    let (submitting, set_submitting) = create_signal(false);
    let (sort_by, set_sort_by) = create_signal(SortMode::Newest);

    // Mirror session changes into the page for its lifetime; the guard is
    // released on teardown
    let subscription = session.subscribe(move |v| set_viewer.set(v.cloned()));
    on_cleanup(move || drop(subscription));

    // Resolve the session once on mount; the OAuth redirect fragment, when
    // present, takes precedence over a stored session
    {
        let backend = backend.clone();
        let session = session.clone();
        spawn_local(async move {
            match backend.0.resolve_session().await {
                // Leave the absent-viewer default untouched so the initial
                // fetch is not repeated for signed-out visitors
                Ok(Some(resolved)) => session.set_viewer(Some(resolved)),
                Ok(None) => {}
                Err(e) => {
                    web_sys::console::error_1(&format!("Error resolving session: {}", e).into());
                }
            }
        });
    }

    // Re-fetch whenever the sort mode or the viewer changes
    {
        let backend = backend.clone();
        create_effect(move |_| {
            let sort = sort_by.get();
            let viewer = viewer.get();
            let backend = backend.clone();

            spawn_local(async move {
                set_loading.set(true);

                // The viewer's like set; a failure here degrades to "none liked"
                let liked_ids = match &viewer {
                    Some(v) => match backend.0.fetch_liked_entry_ids(&v.id).await {
                        Ok(ids) => ids,
                        Err(e) => {
                            web_sys::console::warn_1(&format!("Error fetching likes: {}", e).into());
                            HashSet::new()
                        }
                    },
                    None => HashSet::new(),
                };

                match backend.0.fetch_entries(sort).await {
                    Ok(rows) => {
                        set_entries.set(entries::decorate_rows(rows, &liked_ids, js_sys::Math::random));
                    }
                    Err(e) => {
                        // The previous list stays on screen
                        web_sys::console::error_1(&format!("Error fetching entries: {}", e).into());
                    }
                }

                set_loading.set(false);
            });
        });
    }

    // Submit a new entry; no-op without a viewer and a non-empty message
    let on_submit = {
        let backend = backend.clone();
        Callback::new(move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();

            let Some(payload) = entries::submission_payload(viewer.get().as_ref(), &new_message.get())
            else {
                return;
            };

            set_submitting.set(true);
            let backend = backend.clone();
            spawn_local(async move {
                match backend.0.insert_entry(&payload).await {
                    Ok(row) => {
                        let entry =
                            Entry::from_row(row, false, palette::pick_color(js_sys::Math::random()));
                        set_entries.update(|list| *list = entries::prepend_entry(&*list, entry));
                        set_new_message.set(String::new());
                    }
                    Err(e) => {
                        // Input is preserved for another attempt
                        web_sys::console::error_1(&format!("Error submitting entry: {}", e).into());
                    }
                }
                set_submitting.set(false);
            });
        })
    };

    // Toggle a like; signed-out viewers are sent into the sign-in flow
    let on_like = {
        let backend = backend.clone();
        Callback::new(move |entry_id: String| {
            let Some(v) = viewer.get() else {
                backend.0.sign_in();
                return;
            };

            // Optimistic update, applied synchronously before any network call
            let Some((next, rollback, intent)) = entries::apply_toggle(&entries.get(), &entry_id)
            else {
                return;
            };
            set_entries.set(next);

            let backend = backend.clone();
            spawn_local(async move {
                if let Err(e) = push_like(&*backend.0, &v.id, &rollback.entry_id, intent).await {
                    web_sys::console::error_1(&format!("Error toggling like: {}", e).into());
                    set_entries.update(|list| *list = entries::revert_toggle(&*list, &rollback));
                }
            });
        })
    };

    let on_sign_in = {
        let backend = backend.clone();
        Callback::new(move |_: ()| backend.0.sign_in())
    };

    let on_sign_out = {
        let backend = backend.clone();
        let session = session.clone();
        Callback::new(move |_: ()| {
            // Clear immediately; the change notification fires as well and
            // is idempotent with this
            session.set_viewer(None);

            let backend = backend.clone();
            spawn_local(async move {
                if let Err(e) = backend.0.sign_out().await {
                    web_sys::console::warn_1(&format!("Sign-out: {}", e).into());
                }
            });
        })
    };

    view! {
        <div class="min-h-screen bg-gray-950 text-white p-4 md:p-8">
            <div class="max-w-4xl mx-auto">
                <h1 class="text-4xl font-bold mb-2">"Guestbook"</h1>
                <p class="text-gray-400 mb-8">"Leave a message for future visitors!"</p>

                // Auth section
                <AuthPanel viewer=viewer on_sign_in=on_sign_in on_sign_out=on_sign_out />

                // New entry form, signed-in viewers only
                {move || {
                    viewer.get().map(|_| view! {
                        <EntryForm
                            message=new_message
                            set_message=set_new_message
                            submitting=submitting
                            on_submit=on_submit
                        />
                    })
                }}

                // Sorting options
                <div class="flex justify-between items-center mb-4">
                    <h2 class="text-2xl font-semibold">"Messages"</h2>
                    <div class="flex items-center gap-2">
                        <span class="text-sm text-gray-400">"Sort by:"</span>
                        <SortButton
                            label="Newest"
                            target=SortMode::Newest
                            current=sort_by
                            set_current=set_sort_by
                        />
                        <SortButton
                            label="Most Liked"
                            target=SortMode::MostLiked
                            current=sort_by
                            set_current=set_sort_by
                        />
                    </div>
                </div>

                // Entries list
                {move || {
                    if loading.get() {
                        view! { <Loading /> }.into_view()
                    } else if entries.with(|list| list.is_empty()) {
                        view! {
                            <div class="p-8 text-center bg-sky-900/30 border border-sky-800/50 rounded-lg">
                                <p>"No messages yet. Be the first to leave one!"</p>
                            </div>
                        }
                        .into_view()
                    } else {
                        view! {
                            <div class="grid gap-4 md:grid-cols-2">
                                {entries
                                    .get()
                                    .into_iter()
                                    .map(|entry| view! { <EntryCard entry=entry on_like=on_like /> })
                                    .collect_view()}
                            </div>
                        }
                        .into_view()
                    }
                }}
            </div>
        </div>
    }
}

/// Remote half of a like toggle: the relation change first, then the
/// denormalized counter. The two writes are not transactional; a failure
/// anywhere surfaces as one error and the caller rolls back.
async fn push_like(
    backend: &dyn GuestbookBackend,
    viewer_id: &str,
    entry_id: &str,
    intent: LikeIntent,
) -> ApiResult<()> {
    if intent.now_liked {
        backend.insert_like(viewer_id, entry_id).await?;
    } else {
        backend.delete_like(viewer_id, entry_id).await?;
    }
    backend.set_like_count(entry_id, intent.new_count).await
}

/// Sort selector button
#[component]
fn SortButton(
    label: &'static str,
    target: SortMode,
    current: ReadSignal<SortMode>,
    set_current: WriteSignal<SortMode>,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| set_current.set(target)
            class=move || {
                let base = "px-3 py-1 rounded-lg text-xs h-8 font-medium transition-colors";
                if current.get() == target {
                    format!("{} bg-sky-600 text-white", base)
                } else {
                    format!("{} border border-gray-600 text-gray-400 hover:text-white", base)
                }
            }
        >
            {label}
        </button>
    }
}
