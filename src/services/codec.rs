// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

//! Bidirectional mapping between search state and the browser query string,
//! `?q=<query>&page=<page>&orderBy=<field>&orderSearchAsc=<bool>`.
//!
//! Pure functions; everything here is side-effect free and round-trippable.

use url::form_urlencoded;

use crate::models::feature::FeatureConfig;
use crate::models::search::SortField;
use crate::models::state::SearchState;

/// Search parameters decoded from one browser location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLocation {
    /// `None` when the location carried no `q` parameter at all, as opposed
    /// to `Some("")` for an explicitly submitted empty query.
    pub query: Option<String>,
    pub sort_field: SortField,
    pub sort_ascending: bool,
    pub page: u32,
    /// Pathname with a single trailing slash removed.
    pub normalized_path: String,
}

/// Decode a location's query string into search parameters.
///
/// Missing `orderBy` or `orderSearchAsc` fall back to the feature defaults;
/// a missing or non-numeric `page` falls back to 1. Page parsing is strictly
/// base-10.
pub fn decode(location_search: &str, pathname: &str, feature: &FeatureConfig) -> DecodedLocation {
    let trimmed = location_search.strip_prefix('?').unwrap_or(location_search);

    let mut query = None;
    let mut sort_field = feature.default_sort;
    let mut sort_ascending = feature.default_ascending;
    let mut page = 1;

    for (key, value) in form_urlencoded::parse(trimmed.as_bytes()) {
        match key.as_ref() {
            "q" => query = Some(value.into_owned()),
            "orderBy" => {
                if let Some(field) = SortField::parse(&value) {
                    sort_field = field;
                }
            }
            "orderSearchAsc" => match value.as_ref() {
                "true" => sort_ascending = true,
                "false" => sort_ascending = false,
                _ => {}
            },
            "page" => page = value.parse::<u32>().ok().filter(|&p| p >= 1).unwrap_or(1),
            _ => {}
        }
    }

    DecodedLocation {
        query,
        sort_field,
        sort_ascending,
        page,
        normalized_path: normalize_path(pathname),
    }
}

/// Encode search state into a `?`-prefixed query string.
///
/// `q` is omitted entirely when no query was ever present, so decoding the
/// result restores the absent-vs-empty distinction.
pub fn encode(state: &SearchState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(encoded) = &state.query {
        serializer.append_pair("q", &decode_component(encoded));
    }
    serializer.append_pair("page", &state.page.to_string());
    serializer.append_pair("orderBy", state.sort_field.as_str());
    serializer.append_pair(
        "orderSearchAsc",
        if state.sort_ascending { "true" } else { "false" },
    );

    format!("?{}", serializer.finish())
}

/// Strip a single trailing slash from a pathname.
pub fn normalize_path(pathname: &str) -> String {
    pathname.strip_suffix('/').unwrap_or(pathname).to_string()
}

/// Percent-encode one query component for storage at rest.
pub fn encode_component(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// Percent-decode one stored query component for display or dispatch.
pub fn decode_component(encoded: &str) -> String {
    form_urlencoded::parse(format!("q={encoded}").as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feature::FeatureConfig;
    use crate::models::state::SearchState;

    fn state_with(
        query: Option<&str>,
        sort_field: SortField,
        sort_ascending: bool,
        page: u32,
    ) -> SearchState {
        let mut state = SearchState::new(&FeatureConfig::datasets());
        state.query = query.map(encode_component);
        state.sort_field = sort_field;
        state.sort_ascending = sort_ascending;
        state.page = page;
        state
    }

    #[test]
    fn test_decode_full_query_string() {
        let feature = FeatureConfig::datasets();
        let decoded = decode(
            "?q=flights&page=3&orderBy=title&orderSearchAsc=true",
            "/datasets/",
            &feature,
        );

        assert_eq!(decoded.query.as_deref(), Some("flights"));
        assert_eq!(decoded.sort_field, SortField::Title);
        assert!(decoded.sort_ascending);
        assert_eq!(decoded.page, 3);
        assert_eq!(decoded.normalized_path, "/datasets");
    }

    #[test]
    fn test_decode_defaults_for_missing_parameters() {
        let feature = FeatureConfig::datasets();
        let decoded = decode("", "/datasets", &feature);

        assert_eq!(decoded.query, None);
        assert_eq!(decoded.sort_field, feature.default_sort);
        assert_eq!(decoded.sort_ascending, feature.default_ascending);
        assert_eq!(decoded.page, 1);
    }

    #[test]
    fn test_decode_absent_q_differs_from_empty_q() {
        let feature = FeatureConfig::datasets();
        assert_eq!(decode("?page=1", "/datasets", &feature).query, None);
        assert_eq!(
            decode("?q=&page=1", "/datasets", &feature).query.as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_decode_non_numeric_page_falls_back_to_one() {
        let feature = FeatureConfig::datasets();
        assert_eq!(decode("?page=abc", "/datasets", &feature).page, 1);
        assert_eq!(decode("?page=0", "/datasets", &feature).page, 1);
        assert_eq!(decode("?page=-2", "/datasets", &feature).page, 1);
    }

    #[test]
    fn test_decode_unknown_order_by_falls_back_to_default() {
        let feature = FeatureConfig::issues();
        let decoded = decode("?orderBy=banana", "/issues", &feature);
        assert_eq!(decoded.sort_field, feature.default_sort);
    }

    #[test]
    fn test_encode_omits_q_when_query_absent() {
        let state = state_with(None, SortField::Date, false, 1);
        assert_eq!(encode(&state), "?page=1&orderBy=date&orderSearchAsc=false");
    }

    #[test]
    fn test_encode_percent_encodes_query() {
        let state = state_with(Some("ren ku&more"), SortField::Title, true, 2);
        let encoded = encode(&state);
        assert_eq!(
            encoded,
            "?q=ren+ku%26more&page=2&orderBy=title&orderSearchAsc=true"
        );
    }

    #[test]
    fn test_round_trip_over_valid_domain() {
        let feature = FeatureConfig::datasets();
        let cases = [
            (Some("flights"), SortField::Title, true, 1),
            (Some("ren*"), SortField::Date, false, 7),
            (Some(""), SortField::ProjectsCount, false, 2),
            (Some("a b&c=d?e"), SortField::Title, false, 12),
            (None, SortField::Date, true, 4),
        ];

        for (query, sort_field, sort_ascending, page) in cases {
            let state = state_with(query, sort_field, sort_ascending, page);
            let decoded = decode(&encode(&state), &feature.path, &feature);
            assert_eq!(decoded.query.as_deref(), query);
            assert_eq!(decoded.sort_field, sort_field);
            assert_eq!(decoded.sort_ascending, sort_ascending);
            assert_eq!(decoded.page, page);
        }
    }

    #[test]
    fn test_normalize_path_strips_one_trailing_slash() {
        assert_eq!(normalize_path("/datasets/"), "/datasets");
        assert_eq!(normalize_path("/datasets"), "/datasets");
        assert_eq!(normalize_path("/datasets//"), "/datasets/");
    }

    #[test]
    fn test_component_round_trip() {
        for text in ["", "plain", "with space", "ümlaut & friends", "100%"] {
            assert_eq!(decode_component(&encode_component(text)), text);
        }
    }
}
