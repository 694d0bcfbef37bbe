// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

//! The upstream listing endpoint: an HTTP GET service returning one
//! server-sorted page of results per request.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::{ListingError, Result};
use crate::models::search::{ListingPage, ListingRequest};

/// Seam for the upstream listing endpoint, so the executor can be exercised
/// against a scripted endpoint in tests.
#[async_trait]
pub trait ListingEndpoint: Send + Sync {
    async fn list(&self, request: &ListingRequest) -> Result<ListingPage>;
}

/// reqwest-backed listing endpoint.
pub struct HttpListingEndpoint {
    client: reqwest::Client,
    listing_url: Url,
}

impl HttpListingEndpoint {
    /// Point at one concrete listing URL, e.g. `http://host/api/datasets`.
    pub fn new(listing_url: impl AsRef<str>) -> anyhow::Result<Self> {
        let listing_url: Url = listing_url
            .as_ref()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid listing URL: {}", e))?;

        Ok(Self {
            client: reqwest::Client::new(),
            listing_url,
        })
    }

    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }
}

#[async_trait]
impl ListingEndpoint for HttpListingEndpoint {
    async fn list(&self, request: &ListingRequest) -> Result<ListingPage> {
        debug!(url = %self.listing_url, page = request.page, text = %request.text, "listing request");

        let response = self
            .client
            .get(self.listing_url.clone())
            .query(request)
            .send()
            .await
            .map_err(|e| ListingError::Transient(e.to_string()))?;

        match response.status() {
            StatusCode::BAD_REQUEST => Err(ListingError::InvalidQuery),
            StatusCode::NOT_FOUND => Err(ListingError::NoResults),
            status if status.is_success() => response
                .json::<ListingPage>()
                .await
                .map_err(|e| ListingError::Transient(format!("malformed listing response: {e}"))),
            status => Err(ListingError::Transient(format!(
                "upstream returned {status}"
            ))),
        }
    }
}
