//! Entry Card Component
//!
//! Displays a single guestbook entry with its like button.

use leptos::*;

use crate::state::Entry;

/// Card for one guestbook entry
#[component]
pub fn EntryCard(
    entry: Entry,
    /// Invoked with the entry id when the heart is clicked
    #[prop(into)]
    on_like: Callback<String>,
) -> impl IntoView {
    let Entry {
        id,
        created_at,
        user_name,
        user_avatar_url,
        message,
        likes,
        color_class,
        liked_by_current_user: liked,
        ..
    } = entry;

    let like_class = if liked {
        "text-pink-500"
    } else {
        "text-gray-400 hover:text-white"
    };

    view! {
        <div class="overflow-hidden bg-sky-900/30 border border-sky-800/50 rounded-lg">
            <div class="p-4">
                <div class="flex items-start justify-between mb-3">
                    // Author
                    <div class="flex items-center gap-3">
                        <img
                            src=user_avatar_url
                            alt=user_name.clone()
                            class="h-10 w-10 rounded-full border border-sky-700 object-cover"
                        />
                        <div>
                            <p class=format!("font-semibold {}", color_class)>{user_name}</p>
                            <p class="text-xs text-gray-400">{format_date(&created_at)}</p>
                        </div>
                    </div>

                    // Like button
                    <button
                        on:click=move |_| on_like.call(id.clone())
                        class=format!(
                            "flex items-center gap-1 px-2 py-1 rounded-lg text-sm transition-colors {}",
                            like_class
                        )
                    >
                        <HeartIcon filled=liked />
                        {likes}
                    </button>
                </div>

                <p class="whitespace-pre-wrap break-words text-white">{message}</p>
            </div>
        </div>
    }
}

/// Heart icon, filled when the viewer has liked the entry
#[component]
fn HeartIcon(filled: bool) -> impl IntoView {
    let fill = if filled { "currentColor" } else { "none" };
    let stroke_width = if filled { "0" } else { "2" };

    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill=fill
            stroke="currentColor"
            stroke-width=stroke_width
            class="w-4 h-4"
        >
            <path d="M21 8.25c0-2.485-2.099-4.5-4.688-4.5-1.935 0-3.597 1.126-4.312 2.733-.715-1.607-2.377-2.733-4.313-2.733C5.1 3.75 3 5.765 3 8.25c0 7.22 9 12 9 12s9-4.78 9-12Z" />
        </svg>
    }
}

/// Human-readable creation date; falls back to the raw value when the
/// backend timestamp does not parse
fn format_date(created_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_renders_rfc3339() {
        assert_eq!(format_date("2024-03-01T12:34:56+00:00"), "Mar 01, 2024");
        assert_eq!(format_date("2024-11-09T01:02:03.123456+00:00"), "Nov 09, 2024");
    }

    #[test]
    fn test_format_date_falls_back_to_raw() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
