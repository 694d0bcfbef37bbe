// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use renkulist::models::feature::FeatureConfig;
use renkulist::models::search::SortField;
use renkulist::services::executor::SearchExecutor;
use renkulist::services::logging::init_tracing;
use renkulist::services::store::SearchStore;
use renkulist::services::upstream::HttpListingEndpoint;
use serde_json::json;

// Version is extracted from Cargo.toml at compile time via build.rs
const VERSION: &str = env!("RENKULIST_VERSION");

#[derive(Parser)]
#[command(
    name = "renkulist",
    version = VERSION,
    about = "Search a RenkuLab-style listing API from the terminal"
)]
struct Cli {
    /// Base URL of the upstream API, e.g. http://localhost:8000/api
    #[arg(long, env = "RENKULIST_ENDPOINT")]
    endpoint: String,

    /// Which list feature to search
    #[arg(long, value_enum, default_value_t = Feature::Datasets)]
    feature: Feature,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Feature {
    Datasets,
    Issues,
    MergeRequests,
}

impl Feature {
    fn config(self) -> FeatureConfig {
        match self {
            Feature::Datasets => FeatureConfig::datasets(),
            Feature::Issues => FeatureConfig::issues(),
            Feature::MergeRequests => FeatureConfig::merge_requests(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run one search and print the result page as JSON
    Search {
        /// Query text; omit for an unfiltered listing
        query: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: i64,

        /// Sort field (title, date, projectsCount); defaults per feature
        #[arg(long, value_parser = parse_sort_field)]
        order_by: Option<SortField>,

        /// Sort descending regardless of the feature default
        #[arg(long)]
        descending: bool,
    },
}

fn parse_sort_field(value: &str) -> std::result::Result<SortField, String> {
    SortField::parse(value).ok_or_else(|| format!("unknown sort field: {value}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let feature = cli.feature.config();
    let listing_url = format!("{}{}", cli.endpoint.trim_end_matches('/'), feature.path);
    let endpoint = Arc::new(HttpListingEndpoint::new(listing_url)?);
    let store = Arc::new(SearchStore::new(feature));
    let executor = SearchExecutor::new(store.clone(), endpoint);

    match cli.command {
        Command::Search {
            query,
            page,
            order_by,
            descending,
        } => {
            if let Some(query) = &query {
                store.set_query(query);
            }
            if let Some(field) = order_by {
                store.set_sort_field(field);
            }
            if descending {
                store.set_sort_ascending(false);
            }
            store.set_page(page);

            executor.perform_search().await;
            let state = store.snapshot();

            if !state.error_message.is_empty() {
                eprintln!("{}", state.error_message);
            }

            let output = json!({
                "page": state.page,
                "perPage": state.per_page,
                "totalItems": state.total_items,
                "items": state.items,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
