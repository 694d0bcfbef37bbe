// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort keys accepted by the upstream listing endpoint.
///
/// The default differs per list feature (datasets order by project count,
/// issues and merge requests by date), but the wire names are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Date,
    ProjectsCount,
}

impl SortField {
    /// Wire name used in both the browser query string and the sort expression.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Date => "date",
            SortField::ProjectsCount => "projectsCount",
        }
    }

    /// Parse a wire name back into a sort field.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortField::Title),
            "date" => Some(SortField::Date),
            "projectsCount" => Some(SortField::ProjectsCount),
            _ => None,
        }
    }

    /// Sort expression sent to the upstream endpoint, e.g. `date:desc`.
    pub fn expression(self, ascending: bool) -> String {
        let direction = if ascending { "asc" } else { "desc" };
        format!("{}:{}", self.as_str(), direction)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for one request to the upstream listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRequest {
    /// Free-text search term; `*` when the user query is empty.
    pub text: String,
    /// Sort expression, `<field>:<asc|desc>`.
    pub sort: String,
    pub page: u32,
    pub per_page: u32,
}

/// Pagination block returned by the upstream listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPagination {
    pub current_page: u32,
    pub total_items: u64,
}

/// One page of results from the upstream listing endpoint.
///
/// Result items are feature-specific records (dataset, issue, or merge
/// request summaries) passed through unmodified; nothing here interprets
/// their fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    pub data: Vec<serde_json::Value>,
    pub pagination: ListingPagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_wire_names_round_trip() {
        for field in [SortField::Title, SortField::Date, SortField::ProjectsCount] {
            assert_eq!(SortField::parse(field.as_str()), Some(field));
        }
        assert_eq!(SortField::parse("size"), None);
    }

    #[test]
    fn test_sort_expression() {
        assert_eq!(SortField::Date.expression(false), "date:desc");
        assert_eq!(SortField::ProjectsCount.expression(true), "projectsCount:asc");
    }

    #[test]
    fn test_listing_page_deserializes_wire_shape() {
        let body = serde_json::json!({
            "data": [{"title": "flights"}, {"title": "stations"}],
            "pagination": {"currentPage": 1, "totalItems": 2}
        });

        let page: ListingPage = serde_json::from_value(body).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total_items, 2);
    }
}
