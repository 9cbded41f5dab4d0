//! Elasticsearch Query DSL builders
//!
//! This crate assembles the JSON fragments that make up an Elasticsearch
//! search request: queries, aggregations and the request body that embeds
//! them. Nothing here talks to a cluster; every builder produces a
//! [`serde_json::Value`] that a transport layer can send as-is.
//!
//! # Building blocks
//!
//! - [`Query`] - anything that can render itself as a query clause
//! - [`Aggregation`] - anything that can render itself as an aggregation body
//! - [`SearchSource`] - the request body, embedding aggregations by name
//!
//! Supported queries:
//! - `term` / `terms` / `exists` / `ids` / `prefix` / `wildcard`
//! - `match_all` / `match` / `match_phrase` / `query_string`
//! - `range`
//! - `bool` (must, should, must_not, filter)
//!
//! Supported aggregations:
//! - `filters` (anonymous and keyed buckets)
//! - `filter`
//! - `terms`
//! - `date_histogram`
//! - `avg` / `sum` / `min` / `max` / `stats` / `value_count` / `cardinality`
//!
//! # Example
//!
//! ```
//! use esdsl::{Aggregation, FiltersAggregation, TermQuery};
//! use serde_json::json;
//!
//! let agg = FiltersAggregation::new()
//!     .filter(TermQuery::new("body", "error"))
//!     .filter(TermQuery::new("body", "warning"));
//!
//! assert_eq!(
//!     agg.source().unwrap(),
//!     json!({"filters": {"filters": [
//!         {"term": {"body": "error"}},
//!         {"term": {"body": "warning"}}
//!     ]}})
//! );
//! ```

pub mod aggregation;
pub mod definition;
pub mod error;
pub mod query;
pub mod search;

pub use aggregation::{
    Aggregation, DateHistogramAggregation, FilterAggregation, FiltersAggregation,
    KeyedFiltersAggregation, MetricAggregation, MetricKind, TermsAggregation,
};
pub use definition::{SearchDefinition, Translator};
pub use error::DslError;
pub use query::{
    BoolQuery, ExistsQuery, IdsQuery, MatchAllQuery, MatchPhraseQuery, MatchQuery, PrefixQuery,
    Query, QueryStringQuery, RangeQuery, RawQuery, TermQuery, TermsQuery, WildcardQuery,
};
pub use search::SearchSource;

/// Result type for DSL operations
pub type Result<T> = std::result::Result<T, DslError>;
