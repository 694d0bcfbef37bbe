// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

//! Dispatches searches for one store and merges their responses back in.
//!
//! Every dispatched search carries a fresh token; the store only accepts the
//! response whose token is still current, so requests resolving out of
//! dispatch order can never overwrite newer results with stale ones.

use std::sync::Arc;

use tracing::debug;

use crate::models::search::SortField;
use crate::services::store::SearchStore;
use crate::services::upstream::ListingEndpoint;

pub struct SearchExecutor {
    store: Arc<SearchStore>,
    endpoint: Arc<dyn ListingEndpoint>,
}

impl SearchExecutor {
    pub fn new(store: Arc<SearchStore>, endpoint: Arc<dyn ListingEndpoint>) -> Self {
        Self { store, endpoint }
    }

    pub fn store(&self) -> &Arc<SearchStore> {
        &self.store
    }

    /// Run one search to completion.
    ///
    /// Returns `false` without dispatching anything when a search is already
    /// in flight.
    pub async fn perform_search(&self) -> bool {
        let Some((token, request)) = self.store.begin_search() else {
            debug!("search already in flight, skipping dispatch");
            return false;
        };

        let result = self.endpoint.list(&request).await;
        self.store.apply_result(token, result);
        true
    }

    /// Submit a new query: supersedes any in-flight search and restarts from
    /// page 1, since the changed query invalidates the previous page.
    pub async fn submit_query(&self, text: &str) {
        self.store.set_query(text);
        self.store.reset_before_page_one_search();
        self.store.cancel_search();
        self.perform_search().await;
    }

    /// Change the sort order and search again from page 1.
    pub async fn change_sort(&self, field: SortField, ascending: bool) {
        self.store.set_sort_field(field);
        self.store.set_sort_ascending(ascending);
        self.store.reset_before_page_one_search();
        self.store.cancel_search();
        self.perform_search().await;
    }

    /// Jump to a page of the current query.
    pub async fn go_to_page(&self, page: i64) {
        self.store.set_page(page);
        self.store.cancel_search();
        self.perform_search().await;
    }
}
