use super::{to_meta, Aggregation, Nested};
use crate::query::Query;
use crate::Result;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Single-bucket aggregation over the documents matching one filter
#[derive(Debug, Clone)]
pub struct FilterAggregation {
    filter: Arc<dyn Query>,
    nested: Nested,
}

impl FilterAggregation {
    pub fn new<Q: Query + 'static>(filter: Q) -> Self {
        Self {
            filter: Arc::new(filter),
            nested: Nested::default(),
        }
    }

    pub fn sub_aggregation<A: Aggregation + 'static>(
        mut self,
        name: impl Into<String>,
        aggregation: A,
    ) -> Self {
        self.nested.set_sub_aggregation(name.into(), Arc::new(aggregation));
        self
    }

    pub fn meta<I, K, V>(mut self, meta: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.nested.set_meta(to_meta(meta));
        self
    }
}

impl Aggregation for FilterAggregation {
    fn source(&self) -> Result<Value> {
        let mut source = Map::new();
        source.insert("filter".into(), self.filter.source()?);
        self.nested.attach(&mut source)?;
        Ok(Value::Object(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::MetricAggregation;
    use crate::query::{RangeQuery, TermQuery};
    use serde_json::json;

    #[test]
    fn test_filter_with_sub_aggregation() {
        let agg = FilterAggregation::new(TermQuery::new("type", "t-shirt"))
            .sub_aggregation("avg_price", MetricAggregation::avg("price"));
        assert_eq!(
            agg.source().unwrap(),
            json!({
                "filter": {"term": {"type": "t-shirt"}},
                "aggregations": {"avg_price": {"avg": {"field": "price"}}}
            })
        );
    }

    #[test]
    fn test_filter_failure_propagates() {
        assert!(FilterAggregation::new(RangeQuery::new("price"))
            .source()
            .is_err());
    }
}
