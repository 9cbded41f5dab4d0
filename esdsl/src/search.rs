//! Search request body
//!
//! [`SearchSource`] is where aggregations get their names:
//!
//! ```json
//! {
//!   "query": { ... },
//!   "size": 0,
//!   "aggregations": {
//!     "messages": { "filters": { "filters": [ ... ] } }
//!   }
//! }
//! ```

use crate::aggregation::{render_named, Aggregation};
use crate::query::Query;
use crate::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SearchSource {
    query: Option<Arc<dyn Query>>,
    from: Option<usize>,
    size: Option<usize>,
    aggregations: BTreeMap<String, Arc<dyn Aggregation>>,
}

impl SearchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query<Q: Query + 'static>(mut self, query: Q) -> Self {
        self.query = Some(Arc::new(query));
        self
    }

    pub fn from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }

    /// Number of hits to return; `0` for aggregation-only requests
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Embed `aggregation` under `name`, replacing any previous one
    pub fn aggregation<A: Aggregation + 'static>(
        mut self,
        name: impl Into<String>,
        aggregation: A,
    ) -> Self {
        self.aggregations.insert(name.into(), Arc::new(aggregation));
        self
    }

    pub fn aggregation_names(&self) -> impl Iterator<Item = &str> {
        self.aggregations.keys().map(String::as_str)
    }

    pub fn source(&self) -> Result<Value> {
        let mut body = Map::new();

        if let Some(query) = &self.query {
            body.insert("query".into(), query.source()?);
        }
        if let Some(from) = self.from {
            body.insert("from".into(), Value::from(from));
        }
        if let Some(size) = self.size {
            body.insert("size".into(), Value::from(size));
        }
        if !self.aggregations.is_empty() {
            body.insert(
                "aggregations".into(),
                Value::Object(render_named(&self.aggregations)?),
            );
        }

        debug!(
            has_query = self.query.is_some(),
            aggregations = self.aggregations.len(),
            "Rendered search body"
        );
        Ok(Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::FiltersAggregation;
    use crate::query::{MatchAllQuery, RangeQuery, TermQuery};
    use serde_json::json;

    #[test]
    fn test_empty_body() {
        assert_eq!(SearchSource::new().source().unwrap(), json!({}));
    }

    #[test]
    fn test_filters_aggregation_named_by_caller() {
        let body = SearchSource::new()
            .query(MatchAllQuery::new())
            .size(0)
            .aggregation(
                "messages",
                FiltersAggregation::new()
                    .filter(TermQuery::new("body", "error"))
                    .filter(TermQuery::new("body", "warning")),
            );

        assert_eq!(
            body.source().unwrap(),
            json!({
                "query": {"match_all": {}},
                "size": 0,
                "aggregations": {
                    "messages": {"filters": {"filters": [
                        {"term": {"body": "error"}},
                        {"term": {"body": "warning"}}
                    ]}}
                }
            })
        );
        assert_eq!(body.aggregation_names().collect::<Vec<_>>(), vec!["messages"]);
    }

    #[test]
    fn test_paging() {
        let out = SearchSource::new().from(20).size(10).source().unwrap();
        assert_eq!(out, json!({"from": 20, "size": 10}));
    }

    #[test]
    fn test_query_failure_propagates() {
        let result = SearchSource::new().query(RangeQuery::new("ts")).source();
        assert!(result.is_err());
    }
}
