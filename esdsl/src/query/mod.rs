//! Query clauses
//!
//! Every query implements [`Query`], the single capability an aggregation
//! or request body needs from it: render yourself as JSON, or fail.

pub mod compound;
pub mod full_text;
pub mod range;
pub mod raw;
pub mod term_level;

pub use compound::BoolQuery;
pub use full_text::{MatchAllQuery, MatchPhraseQuery, MatchQuery, QueryStringQuery};
pub use range::RangeQuery;
pub use raw::RawQuery;
pub use term_level::{ExistsQuery, IdsQuery, PrefixQuery, TermQuery, TermsQuery, WildcardQuery};

use crate::Result;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A query clause that can render its own JSON representation
pub trait Query: std::fmt::Debug + Send + Sync {
    /// Render the clause, e.g. `{"term": {"body": "error"}}`
    fn source(&self) -> Result<Value>;
}

impl<Q: Query + ?Sized> Query for &Q {
    fn source(&self) -> Result<Value> {
        (**self).source()
    }
}

impl<Q: Query + ?Sized> Query for Box<Q> {
    fn source(&self) -> Result<Value> {
        (**self).source()
    }
}

impl<Q: Query + ?Sized> Query for Arc<Q> {
    fn source(&self) -> Result<Value> {
        (**self).source()
    }
}

/// `{kind: body}`
pub(crate) fn wrap(kind: &str, body: Value) -> Value {
    let mut object = Map::new();
    object.insert(kind.to_string(), body);
    Value::Object(object)
}

/// `{kind: {field: value}}`
pub(crate) fn field_clause(kind: &str, field: &str, value: Value) -> Value {
    wrap(kind, wrap(field, value))
}

/// Render a list of clauses in order, stopping at the first failure
pub(crate) fn render_all(queries: &[Arc<dyn Query>]) -> Result<Vec<Value>> {
    queries.iter().map(|q| q.source()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_clause_shape() {
        assert_eq!(
            field_clause("term", "status", json!("active")),
            json!({"term": {"status": "active"}})
        );
    }

    #[test]
    fn test_query_through_pointer_types() {
        let term = TermQuery::new("body", "error");
        let expected = json!({"term": {"body": "error"}});

        assert_eq!((&term).source().unwrap(), expected);
        assert_eq!(Box::new(term.clone()).source().unwrap(), expected);

        let shared: Arc<dyn Query> = Arc::new(term);
        assert_eq!(shared.source().unwrap(), expected);
    }

    #[test]
    fn test_render_all_stops_at_first_failure() {
        let queries: Vec<Arc<dyn Query>> = vec![
            Arc::new(TermQuery::new("a", 1)),
            Arc::new(RangeQuery::new("ts")),
            Arc::new(TermQuery::new("b", 2)),
        ];
        assert!(render_all(&queries).is_err());
    }
}
