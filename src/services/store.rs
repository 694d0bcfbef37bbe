// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

//! Single source of truth for one list feature's search state.
//!
//! All mutations go through the operations below; `items` is replaced
//! wholesale on every successful search and never aliased. The store enforces
//! the at-most-one-outstanding-request rule through `begin_search` and the
//! stale-response discard through `apply_result`.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use crate::error::ListingError;
use crate::models::feature::FeatureConfig;
use crate::models::search::{ListingPage, ListingRequest, SortField};
use crate::models::state::{SearchState, SearchToken};
use crate::services::codec::{self, DecodedLocation};

/// Message shown when the upstream endpoint rejects the query text.
pub const INVALID_QUERY_MESSAGE: &str = "The query is invalid.";
/// Message shown when nothing matched the query.
pub const NO_RESULTS_MESSAGE: &str = "No results found for this query.";

pub struct SearchStore {
    feature: FeatureConfig,
    state: Mutex<SearchState>,
}

impl SearchStore {
    pub fn new(feature: FeatureConfig) -> Self {
        let state = SearchState::new(&feature);
        Self {
            feature,
            state: Mutex::new(state),
        }
    }

    pub fn feature(&self) -> &FeatureConfig {
        &self.feature
    }

    /// Current state as an immutable snapshot.
    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    /// Seed the store from a decoded location, as done when the owning view
    /// mounts or an external navigation lands on the feature's path.
    ///
    /// A location that carries a `q` parameter counts as a user-driven query;
    /// one without leaves the store uninitialized so that an upstream 400 on
    /// the first unfiltered load stays silent.
    pub fn seed_from_location(&self, location: &DecodedLocation) {
        let mut state = self.lock();
        state.query = location.query.as_deref().map(codec::encode_component);
        state.sort_field = location.sort_field;
        state.sort_ascending = location.sort_ascending;
        state.page = location.page.max(1);
        state.initialized = location.query.is_some();
    }

    /// Store a new query, percent-encoded at rest. Marks the store as
    /// user-initialized; does not trigger a search.
    pub fn set_query(&self, text: &str) {
        let mut state = self.lock();
        state.query = Some(codec::encode_component(text));
        state.initialized = true;
    }

    pub fn set_sort_field(&self, field: SortField) {
        self.lock().sort_field = field;
    }

    pub fn set_sort_ascending(&self, ascending: bool) {
        self.lock().sort_ascending = ascending;
    }

    /// Set the current page, clamped to >= 1.
    pub fn set_page(&self, page: i64) {
        self.lock().page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
    }

    /// Back to page 1, for searches whose query or sort changed and therefore
    /// invalidated the previous page.
    pub fn reset_before_page_one_search(&self) {
        self.lock().page = 1;
    }

    /// Begin a new search: rotate the current token, raise `loading`, and
    /// build the request from current state.
    ///
    /// Returns `None` without side effects when a search is already in
    /// flight; callers that want to supersede it go through `cancel_search`
    /// first.
    pub fn begin_search(&self) -> Option<(SearchToken, ListingRequest)> {
        let mut state = self.lock();
        if state.loading {
            return None;
        }

        let token = SearchToken::fresh();
        state.loading = true;
        state.current_token = Some(token);

        let text = match state.query.as_deref() {
            None | Some("") => "*".to_string(),
            Some(encoded) => codec::decode_component(encoded),
        };
        let request = ListingRequest {
            text,
            sort: state.sort_field.expression(state.sort_ascending),
            page: state.page,
            per_page: state.per_page,
        };

        Some((token, request))
    }

    /// Merge a resolved search into the store.
    ///
    /// A response whose token no longer matches the current one belongs to a
    /// superseded search and is discarded without touching state.
    pub fn apply_result(
        &self,
        token: SearchToken,
        result: Result<ListingPage, ListingError>,
    ) {
        let mut state = self.lock();
        if state.current_token != Some(token) {
            debug!("discarding stale search response");
            return;
        }

        state.loading = false;
        state.current_token = None;

        match result {
            Ok(page) => {
                state.error_message.clear();
                state.total_items = page.pagination.total_items;
                state.items = page.data;
                // items.len() <= per_page, even against a misbehaving upstream
                let per_page = state.per_page as usize;
                state.items.truncate(per_page);
                state.fetched_at = Some(Utc::now());
            }
            Err(ListingError::InvalidQuery) => {
                state.items = Vec::new();
                state.total_items = 0;
                state.error_message = if state.initialized {
                    INVALID_QUERY_MESSAGE.to_string()
                } else {
                    String::new()
                };
            }
            Err(ListingError::NoResults) => {
                state.items = Vec::new();
                state.total_items = 0;
                state.error_message = NO_RESULTS_MESSAGE.to_string();
            }
            Err(ListingError::Transient(reason)) => {
                debug!(%reason, "search failed, showing empty state");
                state.items = Vec::new();
                state.total_items = 0;
                state.error_message.clear();
            }
        }
    }

    /// Stop reacting to the in-flight search without aborting it.
    ///
    /// Clearing the token makes the eventual response fail the stale check,
    /// so this is safe to call at unmount or right before a superseding
    /// search.
    pub fn cancel_search(&self) {
        let mut state = self.lock();
        state.loading = false;
        state.current_token = None;
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search::ListingPagination;
    use serde_json::json;

    fn store() -> SearchStore {
        SearchStore::new(FeatureConfig::datasets())
    }

    fn page_of(count: usize, total_items: u64) -> ListingPage {
        ListingPage {
            data: (0..count).map(|i| json!({"title": format!("item-{i}")})).collect(),
            pagination: ListingPagination {
                current_page: 1,
                total_items,
            },
        }
    }

    #[test]
    fn test_set_page_clamps_to_one() {
        let store = store();
        for page in [0, -1, -50] {
            store.set_page(page);
            assert_eq!(store.snapshot().page, 1);
        }
        store.set_page(3);
        assert_eq!(store.snapshot().page, 3);
    }

    #[test]
    fn test_reset_before_page_one_search() {
        let store = store();
        store.set_page(9);
        store.reset_before_page_one_search();
        assert_eq!(store.snapshot().page, 1);
    }

    #[test]
    fn test_begin_search_is_noop_while_loading() {
        let store = store();
        let first = store.begin_search();
        assert!(first.is_some());
        assert!(store.snapshot().loading);

        let before = store.snapshot();
        assert!(store.begin_search().is_none());
        let after = store.snapshot();
        assert_eq!(after.current_token, before.current_token);
        assert_eq!(after.page, before.page);
    }

    #[test]
    fn test_begin_search_substitutes_wildcard_for_empty_query() {
        let store = store();
        let (_, request) = store.begin_search().unwrap();
        assert_eq!(request.text, "*");
        store.cancel_search();

        store.set_query("");
        let (_, request) = store.begin_search().unwrap();
        assert_eq!(request.text, "*");
    }

    #[test]
    fn test_begin_search_decodes_stored_query_for_dispatch() {
        let store = store();
        store.set_query("ren ku & co");
        let (_, request) = store.begin_search().unwrap();
        assert_eq!(request.text, "ren ku & co");
        assert_eq!(request.sort, "projectsCount:desc");
        assert_eq!(request.per_page, 12);
    }

    #[test]
    fn test_successful_page_applies_wholesale() {
        let store = store();
        store.set_query("ren*");
        let (token, _) = store.begin_search().unwrap();
        store.apply_result(token, Ok(page_of(8, 8)));

        let state = store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.items.len(), 8);
        assert_eq!(state.total_items, 8);
        assert!(state.error_message.is_empty());
        assert!(state.fetched_at.is_some());
    }

    #[test]
    fn test_items_never_exceed_per_page() {
        let store = store();
        let (token, _) = store.begin_search().unwrap();
        store.apply_result(token, Ok(page_of(30, 30)));
        assert_eq!(store.snapshot().items.len(), 12);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let store = store();
        let (old_token, _) = store.begin_search().unwrap();

        // A superseding search invalidates the first token.
        store.cancel_search();
        let (new_token, _) = store.begin_search().unwrap();
        store.apply_result(new_token, Ok(page_of(3, 3)));

        // The older request resolves last and must lose.
        store.apply_result(old_token, Ok(page_of(12, 100)));

        let state = store.snapshot();
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.total_items, 3);
    }

    #[test]
    fn test_no_results_sets_message_and_clears_items() {
        let store = store();
        store.set_query("zzz_no_match");
        let (token, _) = store.begin_search().unwrap();
        store.apply_result(token, Err(ListingError::NoResults));

        let state = store.snapshot();
        assert!(state.items.is_empty());
        assert_eq!(state.error_message, NO_RESULTS_MESSAGE);
        assert!(!state.loading);
    }

    #[test]
    fn test_invalid_query_message_suppressed_on_initial_load() {
        let store = store();
        let feature = FeatureConfig::datasets();
        // First page load: no q parameter in the URL.
        store.seed_from_location(&codec::decode("", "/datasets", &feature));

        let (token, _) = store.begin_search().unwrap();
        store.apply_result(token, Err(ListingError::InvalidQuery));

        let state = store.snapshot();
        assert!(state.error_message.is_empty());
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_invalid_query_message_shown_after_user_query() {
        let store = store();
        store.set_query("broken(");
        let (token, _) = store.begin_search().unwrap();
        store.apply_result(token, Err(ListingError::InvalidQuery));
        assert_eq!(store.snapshot().error_message, INVALID_QUERY_MESSAGE);
    }

    #[test]
    fn test_transient_failure_leaves_generic_empty_state() {
        let store = store();
        store.set_query("flights");
        let (token, _) = store.begin_search().unwrap();
        store.apply_result(token, Ok(page_of(5, 5)));

        let (token, _) = store.begin_search().unwrap();
        store.apply_result(token, Err(ListingError::Transient("boom".to_string())));

        let state = store.snapshot();
        assert!(state.items.is_empty());
        assert!(state.error_message.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_cancel_search_suppresses_late_resolution() {
        let store = store();
        let (token, _) = store.begin_search().unwrap();
        store.cancel_search();
        assert!(!store.snapshot().loading);

        store.apply_result(token, Ok(page_of(4, 4)));
        assert!(store.snapshot().items.is_empty());
    }

    #[test]
    fn test_seed_from_location_with_query_marks_initialized() {
        let store = store();
        let feature = FeatureConfig::datasets();
        store.seed_from_location(&codec::decode(
            "?q=flights&page=2&orderBy=title&orderSearchAsc=true",
            "/datasets",
            &feature,
        ));

        let state = store.snapshot();
        assert!(state.initialized);
        assert_eq!(state.page, 2);
        assert_eq!(state.sort_field, SortField::Title);
        assert!(state.sort_ascending);
        assert_eq!(state.query.as_deref(), Some("flights"));
    }
}
