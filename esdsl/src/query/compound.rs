//! Compound queries

use super::{render_all, wrap, Query};
use crate::Result;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Boolean combination of clauses (must, should, must_not, filter)
///
/// Clauses render in insertion order; empty clause lists are left out of
/// the output. A failing child clause fails the whole query.
#[derive(Debug, Clone, Default)]
pub struct BoolQuery {
    must: Vec<Arc<dyn Query>>,
    should: Vec<Arc<dyn Query>>,
    must_not: Vec<Arc<dyn Query>>,
    filter: Vec<Arc<dyn Query>>,
    minimum_should_match: Option<Value>,
    boost: Option<f64>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, query: impl Query + 'static) -> Self {
        self.must.push(Arc::new(query));
        self
    }

    pub fn should(mut self, query: impl Query + 'static) -> Self {
        self.should.push(Arc::new(query));
        self
    }

    pub fn must_not(mut self, query: impl Query + 'static) -> Self {
        self.must_not.push(Arc::new(query));
        self
    }

    pub fn filter(mut self, query: impl Query + 'static) -> Self {
        self.filter.push(Arc::new(query));
        self
    }

    /// A count (`2`) or a percentage (`"75%"`)
    pub fn minimum_should_match(mut self, value: impl Into<Value>) -> Self {
        self.minimum_should_match = Some(value.into());
        self
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Query for BoolQuery {
    fn source(&self) -> Result<Value> {
        let mut body = Map::new();

        for (occur, clauses) in [
            ("must", &self.must),
            ("should", &self.should),
            ("must_not", &self.must_not),
            ("filter", &self.filter),
        ] {
            if !clauses.is_empty() {
                body.insert(occur.into(), Value::Array(render_all(clauses)?));
            }
        }

        if let Some(msm) = &self.minimum_should_match {
            body.insert("minimum_should_match".into(), msm.clone());
        }
        if let Some(boost) = self.boost {
            body.insert("boost".into(), Value::from(boost));
        }

        Ok(wrap("bool", Value::Object(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ExistsQuery, MatchQuery, RangeQuery, TermQuery};
    use crate::DslError;
    use serde_json::json;

    #[test]
    fn test_bool_empty() {
        assert_eq!(BoolQuery::new().source().unwrap(), json!({"bool": {}}));
    }

    #[test]
    fn test_bool_all_clauses() {
        let q = BoolQuery::new()
            .must(MatchQuery::new("title", "rust"))
            .should(TermQuery::new("tag", "search"))
            .should(TermQuery::new("tag", "index"))
            .must_not(TermQuery::new("status", "deleted"))
            .filter(ExistsQuery::new("author"))
            .minimum_should_match(1);

        assert_eq!(
            q.source().unwrap(),
            json!({"bool": {
                "must": [{"match": {"title": "rust"}}],
                "should": [{"term": {"tag": "search"}}, {"term": {"tag": "index"}}],
                "must_not": [{"term": {"status": "deleted"}}],
                "filter": [{"exists": {"field": "author"}}],
                "minimum_should_match": 1
            }})
        );
    }

    #[test]
    fn test_bool_nested_failure_propagates() {
        let q = BoolQuery::new()
            .must(TermQuery::new("a", 1))
            .filter(RangeQuery::new("ts"));
        assert!(matches!(q.source(), Err(DslError::InvalidQuery(_))));
    }
}
