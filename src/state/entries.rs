//! Guestbook Entry State
//!
//! Entry data shapes and the pure state transitions behind the guestbook
//! page: liked-flag derivation, submission gating, and the optimistic
//! like-toggle with its exact rollback. Everything here is synchronous and
//! free of browser APIs so it can be unit tested natively; the page applies
//! these transitions to its signals via whole-list replacement.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::palette;
use crate::state::session::Viewer;

/// Sort order for the entry listing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    /// Creation time, newest first
    Newest,
    /// Like count, highest first
    MostLiked,
}

impl SortMode {
    /// Backend column this mode orders by (always descending)
    pub fn order_column(&self) -> &'static str {
        match self {
            SortMode::Newest => "created_at",
            SortMode::MostLiked => "likes",
        }
    }
}

/// Entry row as stored by the backend
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EntryRow {
    pub id: String,
    pub created_at: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar_url: String,
    pub message: String,
    pub likes: i64,
}

/// Insert payload for a new entry
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewEntryRow {
    pub user_id: String,
    pub user_name: String,
    pub user_avatar_url: String,
    pub message: String,
    pub likes: i64,
}

/// One guestbook entry as rendered
///
/// `color_class` and `liked_by_current_user` are client-only: the color is
/// redrawn on every fetch and the liked flag is derived from the viewer's
/// like set, never trusted from a previous render.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub id: String,
    pub created_at: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar_url: String,
    pub message: String,
    pub likes: i64,
    pub color_class: &'static str,
    pub liked_by_current_user: bool,
}

impl Entry {
    /// Build a renderable entry from a backend row
    pub fn from_row(row: EntryRow, liked: bool, color_class: &'static str) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            user_id: row.user_id,
            user_name: row.user_name,
            user_avatar_url: row.user_avatar_url,
            message: row.message,
            likes: row.likes,
            color_class,
            liked_by_current_user: liked,
        }
    }
}

/// Decorate fetched rows with the derived liked flag and a fresh color.
///
/// `liked_ids` is the set of entry ids the current viewer has liked (empty
/// when signed out). `random` supplies one sample in `[0, 1)` per entry;
/// call sites pass `js_sys::Math::random`, tests pass a fixed source.
pub fn decorate_rows(
    rows: Vec<EntryRow>,
    liked_ids: &HashSet<String>,
    mut random: impl FnMut() -> f64,
) -> Vec<Entry> {
    rows.into_iter()
        .map(|row| {
            let liked = liked_ids.contains(&row.id);
            Entry::from_row(row, liked, palette::pick_color(random()))
        })
        .collect()
}

/// Whitespace-trim a draft message, rejecting empty results
pub fn trimmed_message(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Gate a submission: a payload exists only for an authenticated viewer and
/// a non-empty trimmed message. Callers must not touch the network when this
/// returns `None`.
pub fn submission_payload(viewer: Option<&Viewer>, input: &str) -> Option<NewEntryRow> {
    let viewer = viewer?;
    let message = trimmed_message(input)?;
    Some(NewEntryRow {
        user_id: viewer.id.clone(),
        user_name: viewer.name.clone(),
        user_avatar_url: viewer.avatar_url.clone(),
        message,
        likes: 0,
    })
}

/// Exact pre-toggle snapshot used to undo a failed optimistic update
#[derive(Clone, Debug, PartialEq)]
pub struct ToggleRollback {
    pub entry_id: String,
    pub likes: i64,
    pub liked: bool,
}

/// Remote writes implied by an applied toggle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LikeIntent {
    /// Whether the viewer likes the entry after the toggle
    pub now_liked: bool,
    /// The like count the backend row should be updated to
    pub new_count: i64,
}

/// Apply an optimistic like toggle.
///
/// Returns the replaced entry list, the exact rollback snapshot, and the
/// intent for the remote writes. `None` when the entry id is unknown, in
/// which case nothing may change. The returned list is a whole-list
/// replacement; the input is never mutated in place.
pub fn apply_toggle(entries: &[Entry], entry_id: &str) -> Option<(Vec<Entry>, ToggleRollback, LikeIntent)> {
    let entry = entries.iter().find(|e| e.id == entry_id)?;

    let rollback = ToggleRollback {
        entry_id: entry.id.clone(),
        likes: entry.likes,
        liked: entry.liked_by_current_user,
    };
    let intent = LikeIntent {
        now_liked: !entry.liked_by_current_user,
        new_count: if entry.liked_by_current_user {
            entry.likes - 1
        } else {
            entry.likes + 1
        },
    };

    let next = entries
        .iter()
        .map(|e| {
            if e.id == entry_id {
                let mut updated = e.clone();
                updated.likes = intent.new_count;
                updated.liked_by_current_user = intent.now_liked;
                updated
            } else {
                e.clone()
            }
        })
        .collect();

    Some((next, rollback, intent))
}

/// Undo a failed optimistic toggle.
///
/// Restores the snapshot values exactly (count and flag), rather than
/// stepping by one relative to whatever is displayed, so a rollback can
/// never compound drift.
pub fn revert_toggle(entries: &[Entry], rollback: &ToggleRollback) -> Vec<Entry> {
    entries
        .iter()
        .map(|e| {
            if e.id == rollback.entry_id {
                let mut restored = e.clone();
                restored.likes = rollback.likes;
                restored.liked_by_current_user = rollback.liked;
                restored
            } else {
                e.clone()
            }
        })
        .collect()
}

/// Put a freshly submitted entry at the top of the list
pub fn prepend_entry(entries: &[Entry], entry: Entry) -> Vec<Entry> {
    let mut next = Vec::with_capacity(entries.len() + 1);
    next.push(entry);
    next.extend(entries.iter().cloned());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, likes: i64) -> EntryRow {
        EntryRow {
            id: id.to_string(),
            created_at: "2024-03-01T12:00:00+00:00".to_string(),
            user_id: "u1".to_string(),
            user_name: "mira".to_string(),
            user_avatar_url: "https://example.com/a.png".to_string(),
            message: "hello".to_string(),
            likes,
        }
    }

    fn entry(id: &str, likes: i64, liked: bool) -> Entry {
        Entry::from_row(row(id, likes), liked, "text-red-400")
    }

    fn viewer() -> Viewer {
        Viewer {
            id: "u1".to_string(),
            name: "mira".to_string(),
            avatar_url: "https://example.com/a.png".to_string(),
        }
    }

    #[test]
    fn test_sort_mode_order_columns() {
        assert_eq!(SortMode::Newest.order_column(), "created_at");
        assert_eq!(SortMode::MostLiked.order_column(), "likes");
    }

    #[test]
    fn test_decorate_derives_liked_flag_from_like_set() {
        let liked_ids: HashSet<String> = ["b".to_string()].into_iter().collect();
        let entries = decorate_rows(vec![row("a", 0), row("b", 3)], &liked_ids, || 0.0);

        assert!(!entries[0].liked_by_current_user);
        assert!(entries[1].liked_by_current_user);
    }

    #[test]
    fn test_decorate_without_viewer_marks_nothing_liked() {
        let entries = decorate_rows(vec![row("a", 1), row("b", 2)], &HashSet::new(), || 0.5);
        assert!(entries.iter().all(|e| !e.liked_by_current_user));
    }

    #[test]
    fn test_decorate_colors_follow_random_source() {
        let mut samples = [0.0, 0.95].into_iter();
        let entries = decorate_rows(
            vec![row("a", 0), row("b", 0)],
            &HashSet::new(),
            move || samples.next().unwrap(),
        );

        assert_eq!(entries[0].color_class, crate::palette::COLOR_CLASSES[0]);
        assert_eq!(entries[1].color_class, crate::palette::COLOR_CLASSES[9]);
    }

    #[test]
    fn test_trimmed_message_rejects_whitespace() {
        assert_eq!(trimmed_message(""), None);
        assert_eq!(trimmed_message("   \n\t "), None);
        assert_eq!(trimmed_message("  hi  "), Some("hi".to_string()));
    }

    #[test]
    fn test_submission_requires_viewer_and_message() {
        let v = viewer();

        // Whitespace-only message never yields a payload
        assert_eq!(submission_payload(Some(&v), "   "), None);
        // Unauthenticated never yields a payload
        assert_eq!(submission_payload(None, "hello"), None);

        let payload = submission_payload(Some(&v), " hello ").unwrap();
        assert_eq!(payload.message, "hello");
        assert_eq!(payload.user_id, "u1");
        assert_eq!(payload.likes, 0);
    }

    #[test]
    fn test_apply_toggle_like() {
        let entries = vec![entry("a", 3, false), entry("b", 1, true)];
        let (next, rollback, intent) = apply_toggle(&entries, "a").unwrap();

        assert_eq!(next[0].likes, 4);
        assert!(next[0].liked_by_current_user);
        // Other entries untouched
        assert_eq!(next[1], entries[1]);

        assert_eq!(rollback, ToggleRollback { entry_id: "a".to_string(), likes: 3, liked: false });
        assert_eq!(intent, LikeIntent { now_liked: true, new_count: 4 });
    }

    #[test]
    fn test_apply_toggle_unlike() {
        let entries = vec![entry("a", 3, true)];
        let (next, _, intent) = apply_toggle(&entries, "a").unwrap();

        assert_eq!(next[0].likes, 2);
        assert!(!next[0].liked_by_current_user);
        assert_eq!(intent, LikeIntent { now_liked: false, new_count: 2 });
    }

    #[test]
    fn test_apply_toggle_unknown_entry_is_noop() {
        let entries = vec![entry("a", 3, false)];
        assert!(apply_toggle(&entries, "missing").is_none());
    }

    #[test]
    fn test_double_toggle_restores_count() {
        let entries = vec![entry("a", 3, false)];
        let (after_first, _, _) = apply_toggle(&entries, "a").unwrap();
        let (after_second, _, _) = apply_toggle(&after_first, "a").unwrap();

        assert_eq!(after_second[0].likes, 3);
        assert!(!after_second[0].liked_by_current_user);
    }

    #[test]
    fn test_rollback_is_exact() {
        let entries = vec![entry("a", 3, false)];
        let (optimistic, rollback, _) = apply_toggle(&entries, "a").unwrap();
        let reverted = revert_toggle(&optimistic, &rollback);

        assert_eq!(reverted, entries);
    }

    #[test]
    fn test_rollback_restores_snapshot_not_relative_step() {
        let entries = vec![entry("a", 3, false)];
        let (mut optimistic, rollback, _) = apply_toggle(&entries, "a").unwrap();

        // Simulate the displayed count having moved since the snapshot
        optimistic[0].likes = 9;

        let reverted = revert_toggle(&optimistic, &rollback);
        assert_eq!(reverted[0].likes, 3);
        assert!(!reverted[0].liked_by_current_user);
    }

    #[test]
    fn test_prepend_entry_goes_first() {
        let entries = vec![entry("a", 3, false)];
        let fresh = entry("new", 0, false);
        let next = prepend_entry(&entries, fresh.clone());

        assert_eq!(next.len(), 2);
        assert_eq!(next[0], fresh);
        assert_eq!(next[1].id, "a");
    }
}
