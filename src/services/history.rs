// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

//! Keeps the navigable URL and the search store mutually consistent.
//!
//! The one rule that prevents feedback loops: programmatic pushes never
//! notify subscribers, only back/forward navigation does. Forward syncing
//! (state to URL) therefore cannot be observed as a navigation event that
//! would re-trigger the search it came from.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::debug;

use crate::services::codec;
use crate::services::store::SearchStore;

/// One navigable location: path plus query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub pathname: String,
    pub search: String,
}

type Listener = Arc<dyn Fn(&HistoryEntry) + Send + Sync>;

/// In-memory navigation history with explicit subscriptions.
pub struct History {
    inner: Mutex<HistoryInner>,
}

struct HistoryInner {
    entries: Vec<HistoryEntry>,
    position: usize,
    listeners: HashMap<u64, Listener>,
    next_listener_id: u64,
}

impl History {
    pub fn new(initial: HistoryEntry) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(HistoryInner {
                entries: vec![initial],
                position: 0,
                listeners: HashMap::new(),
                next_listener_id: 0,
            }),
        })
    }

    pub fn current(&self) -> HistoryEntry {
        let inner = self.lock();
        inner.entries[inner.position].clone()
    }

    /// Push a new entry, discarding any forward entries. Programmatic, so
    /// subscribers are not notified.
    pub fn push(&self, entry: HistoryEntry) {
        let mut inner = self.lock();
        let position = inner.position;
        inner.entries.truncate(position + 1);
        inner.entries.push(entry);
        inner.position += 1;
    }

    /// Navigate one entry back, notifying subscribers. Returns the new
    /// current entry, or `None` at the start of the stack.
    pub fn back(&self) -> Option<HistoryEntry> {
        let (entry, listeners) = {
            let mut inner = self.lock();
            if inner.position == 0 {
                return None;
            }
            inner.position -= 1;
            (
                inner.entries[inner.position].clone(),
                inner.listeners.values().cloned().collect::<Vec<_>>(),
            )
        };
        notify(&listeners, &entry);
        Some(entry)
    }

    /// Navigate one entry forward, notifying subscribers. Returns the new
    /// current entry, or `None` at the end of the stack.
    pub fn forward(&self) -> Option<HistoryEntry> {
        let (entry, listeners) = {
            let mut inner = self.lock();
            if inner.position + 1 >= inner.entries.len() {
                return None;
            }
            inner.position += 1;
            (
                inner.entries[inner.position].clone(),
                inner.listeners.values().cloned().collect::<Vec<_>>(),
            )
        };
        notify(&listeners, &entry);
        Some(entry)
    }

    /// Subscribe to externally-originated navigation. The subscription is
    /// released when the returned guard drops, tying the listener's lifetime
    /// to the owning view.
    pub fn subscribe(
        self: &Arc<Self>,
        listener: impl Fn(&HistoryEntry) + Send + Sync + 'static,
    ) -> Subscription {
        let mut inner = self.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.insert(id, Arc::new(listener));
        Subscription {
            history: Arc::downgrade(self),
            id,
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.lock().listeners.remove(&id);
    }

    fn lock(&self) -> MutexGuard<'_, HistoryInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

// Listeners run outside the history lock so they may navigate or subscribe.
fn notify(listeners: &[Listener], entry: &HistoryEntry) {
    for listener in listeners {
        listener(entry);
    }
}

/// Guard for one history subscription; unsubscribes on drop.
pub struct Subscription {
    history: Weak<History>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(history) = self.history.upgrade() {
            history.unsubscribe(self.id);
        }
    }
}

/// Two-way synchronizer between one store and the navigation history.
pub struct HistorySynchronizer {
    history: Arc<History>,
    store: Arc<SearchStore>,
}

impl HistorySynchronizer {
    pub fn new(history: Arc<History>, store: Arc<SearchStore>) -> Self {
        Self { history, store }
    }

    /// Forward direction: push the store's current state as a new history
    /// entry. Called after a user-driven action triggered a new search.
    pub fn record(&self) {
        let state = self.store.snapshot();
        self.history.push(HistoryEntry {
            pathname: self.store.feature().path.clone(),
            search: codec::encode(&state),
        });
    }

    /// Backward direction: apply an externally-originated navigation.
    ///
    /// Entries whose normalized path does not match the feature's path are
    /// unrelated navigation and are ignored. Returns `true` when the store
    /// was reseeded and the caller should dispatch a new search.
    pub fn apply_navigation(&self, entry: &HistoryEntry) -> bool {
        let feature = self.store.feature();
        let location = codec::decode(&entry.search, &entry.pathname, feature);
        if location.normalized_path != feature.path {
            debug!(path = %entry.pathname, "ignoring navigation outside the feature path");
            return false;
        }

        self.store.cancel_search();
        self.store.seed_from_location(&location);
        true
    }
}
