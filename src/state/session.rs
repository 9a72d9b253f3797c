//! Session State
//!
//! The current viewer and a small change-notification registry. The store is
//! plain `Rc`/`RefCell` state so the session logic stays testable outside
//! the browser; the guestbook page bridges notifications into its signals.
//!
//! Subscriptions are scoped: `subscribe` hands back an RAII guard and the
//! listener is unregistered when the guard drops, so a page teardown can
//! never leak its callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// The authenticated visitor, or absent when signed out
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
}

/// Resolve a display name from provider metadata.
///
/// Falls back `user_name` -> `preferred_username` -> `"Anonymous"`; empty
/// strings count as absent.
pub fn display_name(user_name: Option<&str>, preferred_username: Option<&str>) -> String {
    user_name
        .filter(|name| !name.is_empty())
        .or(preferred_username.filter(|name| !name.is_empty()))
        .unwrap_or("Anonymous")
        .to_string()
}

type Listener = Rc<dyn Fn(Option<&Viewer>)>;

#[derive(Default)]
struct SessionInner {
    viewer: RefCell<Option<Viewer>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

/// Shared session store: current viewer plus change listeners
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current viewer, if a session is active
    pub fn viewer(&self) -> Option<Viewer> {
        self.inner.viewer.borrow().clone()
    }

    /// Replace the viewer and notify every listener.
    ///
    /// Safe to call repeatedly with the same value; clearing an already
    /// cleared session just re-notifies with `None`.
    pub fn set_viewer(&self, viewer: Option<Viewer>) {
        *self.inner.viewer.borrow_mut() = viewer.clone();

        // Snapshot the registry so a listener may subscribe or unsubscribe
        // while being notified
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(viewer.as_ref());
        }
    }

    /// Register a change listener for the lifetime of the returned guard
    pub fn subscribe(&self, listener: impl Fn(Option<&Viewer>) + 'static) -> SessionSubscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        SessionSubscription {
            id,
            inner: Rc::clone(&self.inner),
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

/// RAII guard for a session-change listener
pub struct SessionSubscription {
    id: u64,
    inner: Rc<SessionInner>,
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(id, _)| *id != self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(id: &str) -> Viewer {
        Viewer {
            id: id.to_string(),
            name: "mira".to_string(),
            avatar_url: String::new(),
        }
    }

    #[test]
    fn test_display_name_fallback_chain() {
        assert_eq!(display_name(Some("octocat"), Some("cat")), "octocat");
        assert_eq!(display_name(None, Some("cat")), "cat");
        assert_eq!(display_name(None, None), "Anonymous");
    }

    #[test]
    fn test_display_name_skips_empty_strings() {
        assert_eq!(display_name(Some(""), Some("cat")), "cat");
        assert_eq!(display_name(Some(""), Some("")), "Anonymous");
    }

    #[test]
    fn test_set_viewer_notifies_subscribers() {
        let store = SessionStore::new();
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = Rc::clone(&seen);
        let _sub = store.subscribe(move |v| {
            seen_clone.borrow_mut().push(v.map(|v| v.id.clone()));
        });

        store.set_viewer(Some(viewer("u1")));
        store.set_viewer(None);

        assert_eq!(*seen.borrow(), vec![Some("u1".to_string()), None]);
        assert_eq!(store.viewer(), None);
    }

    #[test]
    fn test_dropped_subscription_stops_notifications() {
        let store = SessionStore::new();
        let seen = Rc::new(Cell::new(0u32));

        let seen_clone = Rc::clone(&seen);
        let sub = store.subscribe(move |_| seen_clone.set(seen_clone.get() + 1));

        store.set_viewer(Some(viewer("u1")));
        assert_eq!(seen.get(), 1);

        drop(sub);
        assert_eq!(store.listener_count(), 0);

        store.set_viewer(None);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_clearing_twice_is_idempotent() {
        let store = SessionStore::new();
        store.set_viewer(Some(viewer("u1")));

        store.set_viewer(None);
        store.set_viewer(None);

        assert_eq!(store.viewer(), None);
    }

    #[test]
    fn test_subscriptions_are_independent() {
        let store = SessionStore::new();
        let first = Rc::new(Cell::new(0u32));
        let second = Rc::new(Cell::new(0u32));

        let first_clone = Rc::clone(&first);
        let sub_a = store.subscribe(move |_| first_clone.set(first_clone.get() + 1));
        let second_clone = Rc::clone(&second);
        let _sub_b = store.subscribe(move |_| second_clone.set(second_clone.get() + 1));

        store.set_viewer(Some(viewer("u1")));
        drop(sub_a);
        store.set_viewer(None);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }
}
