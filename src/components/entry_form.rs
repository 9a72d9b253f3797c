//! Entry Form Component
//!
//! Message form shown to signed-in viewers.

use leptos::*;

use crate::state::entries::trimmed_message;

/// New-message form
#[component]
pub fn EntryForm(
    message: ReadSignal<String>,
    set_message: WriteSignal<String>,
    submitting: ReadSignal<bool>,
    /// Invoked with the raw submit event; validation happens in the page
    #[prop(into)]
    on_submit: Callback<web_sys::SubmitEvent>,
) -> impl IntoView {
    view! {
        <div class="mb-8 bg-sky-900/30 border border-sky-800/50 rounded-lg">
            <form on:submit=move |ev| on_submit.call(ev) class="p-4">
                <h2 class="text-xl font-semibold mb-4">"Leave a message"</h2>

                <textarea
                    placeholder="Write something nice..."
                    prop:value=move || message.get()
                    on:input=move |ev| set_message.set(event_target_value(&ev))
                    rows="3"
                    class="w-full mb-4 bg-sky-950/50 rounded-lg px-4 py-3
                           border border-sky-800/50 focus:border-sky-500 focus:outline-none
                           resize-none"
                />

                <button
                    type="submit"
                    disabled=move || submitting.get() || trimmed_message(&message.get()).is_none()
                    class="px-6 py-2 bg-sky-600 hover:bg-sky-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Posting..." } else { "Post Message" }}
                </button>
            </form>
        </div>
    }
}
