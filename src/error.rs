// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

//! Error types for the upstream listing endpoint.

use thiserror::Error;

/// Failures surfaced by the upstream listing endpoint.
///
/// Every variant is locally recoverable: the store converts it into an empty
/// result page (plus a user-visible message where one applies) and a new
/// search starts from a clean slate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// HTTP 400: the endpoint rejected the query text.
    #[error("the query was rejected by the upstream endpoint")]
    InvalidQuery,

    /// HTTP 404: nothing matched the query.
    #[error("no results matched the query")]
    NoResults,

    /// Network failure, 5xx, or a malformed response body.
    #[error("upstream request failed: {0}")]
    Transient(String),
}

pub type Result<T> = std::result::Result<T, ListingError>;
