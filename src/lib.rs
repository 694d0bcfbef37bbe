// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

//! Client-side controller for paginated, sorted search listings.
//!
//! One [`services::store::SearchStore`] per list feature holds the search
//! state; a [`services::executor::SearchExecutor`] dispatches at most one
//! request at a time against an upstream listing endpoint and discards stale
//! out-of-order responses by token; the
//! [`services::history::HistorySynchronizer`] keeps the navigable URL and the
//! store consistent without feedback loops.

pub mod error;
pub mod models;
pub mod services;
