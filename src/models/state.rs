// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::feature::FeatureConfig;
use crate::models::search::SortField;

/// Opaque identifier tagging one dispatched search.
///
/// The store only reacts to a response whose token still matches its current
/// one; anything else is a stale response from a superseded search and is
/// discarded without touching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken(Uuid);

impl SearchToken {
    pub fn fresh() -> Self {
        Self(Uuid::now_v7())
    }
}

/// Snapshot of one list feature's search state.
///
/// Owned exclusively by one `SearchStore`; created when the list view mounts,
/// seeded from the URL, and never persisted beyond the view's lifetime.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Free-text search term, percent-encoded at rest. `None` until a query
    /// parameter was seen or a query was submitted, which is distinct from an
    /// explicitly submitted empty query (`Some("")`).
    pub query: Option<String>,
    pub sort_field: SortField,
    pub sort_ascending: bool,
    /// Current page, always >= 1.
    pub page: u32,
    pub per_page: u32,
    /// Total matches reported by the last successful response.
    pub total_items: u64,
    /// Current page of results; replaced wholesale on every successful
    /// search, never mutated in place. Never longer than `per_page`.
    pub items: Vec<serde_json::Value>,
    /// True between dispatching a request and its resolution.
    pub loading: bool,
    /// Empty when there is no error to show.
    pub error_message: String,
    /// Token of the most recently dispatched search, if one is outstanding.
    pub current_token: Option<SearchToken>,
    /// False until a user-driven search; keeps the invalid-query message off
    /// the initial unfiltered load.
    pub initialized: bool,
    /// When the current `items` were fetched.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SearchState {
    pub fn new(feature: &FeatureConfig) -> Self {
        Self {
            query: None,
            sort_field: feature.default_sort,
            sort_ascending: feature.default_ascending,
            page: 1,
            per_page: feature.per_page,
            total_items: 0,
            items: Vec::new(),
            loading: false,
            error_message: String::new(),
            current_token: None,
            initialized: false,
            fetched_at: None,
        }
    }
}
