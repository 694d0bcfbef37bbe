// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

use crate::models::search::SortField;

/// Configuration of one list feature (datasets, issues, merge requests).
///
/// Each feature owns exactly one store instance; the presets below mirror the
/// three near-identical list views of the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureConfig {
    /// Path the feature's view lives under, without a trailing slash.
    pub path: String,
    pub default_sort: SortField,
    pub default_ascending: bool,
    /// Page size; constant for the lifetime of the feature.
    pub per_page: u32,
}

impl FeatureConfig {
    pub fn datasets() -> Self {
        Self {
            path: "/datasets".to_string(),
            default_sort: SortField::ProjectsCount,
            default_ascending: false,
            per_page: 12,
        }
    }

    pub fn issues() -> Self {
        Self {
            path: "/issues".to_string(),
            default_sort: SortField::Date,
            default_ascending: false,
            per_page: 10,
        }
    }

    pub fn merge_requests() -> Self {
        Self {
            path: "/merge_requests".to_string(),
            default_sort: SortField::Date,
            default_ascending: false,
            per_page: 10,
        }
    }
}
