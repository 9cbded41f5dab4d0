//! Aggregations
//!
//! An [`Aggregation`] renders the body that goes under a caller-chosen
//! name inside `"aggregations"`. It never renders that name itself; see
//! [`crate::SearchSource`] for the wrapping.

pub mod date_histogram;
pub mod filter;
pub mod filters;
pub mod metric;
pub mod terms;

pub use date_histogram::{DateHistogramAggregation, Interval};
pub use filter::FilterAggregation;
pub use filters::{FiltersAggregation, KeyedFiltersAggregation};
pub use metric::{MetricAggregation, MetricKind};
pub use terms::TermsAggregation;

use crate::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// An aggregation body that can render its own JSON representation
pub trait Aggregation: std::fmt::Debug + Send + Sync {
    /// Render the body, e.g. `{"terms": {"field": "status"}}`
    fn source(&self) -> Result<Value>;
}

impl<A: Aggregation + ?Sized> Aggregation for &A {
    fn source(&self) -> Result<Value> {
        (**self).source()
    }
}

impl<A: Aggregation + ?Sized> Aggregation for Box<A> {
    fn source(&self) -> Result<Value> {
        (**self).source()
    }
}

impl<A: Aggregation + ?Sized> Aggregation for Arc<A> {
    fn source(&self) -> Result<Value> {
        (**self).source()
    }
}

/// Sub-aggregations and meta shared by every bucket aggregation
#[derive(Debug, Clone, Default)]
pub(crate) struct Nested {
    sub_aggregations: BTreeMap<String, Arc<dyn Aggregation>>,
    meta: Map<String, Value>,
}

impl Nested {
    /// Last write for a name wins
    pub(crate) fn set_sub_aggregation(&mut self, name: String, agg: Arc<dyn Aggregation>) {
        self.sub_aggregations.insert(name, agg);
    }

    /// Replaces, never merges
    pub(crate) fn set_meta(&mut self, meta: Map<String, Value>) {
        self.meta = meta;
    }

    pub(crate) fn sub_aggregation_count(&self) -> usize {
        self.sub_aggregations.len()
    }

    /// Add `"aggregations"` and `"meta"` to `source`, skipping empty ones
    pub(crate) fn attach(&self, source: &mut Map<String, Value>) -> Result<()> {
        if !self.sub_aggregations.is_empty() {
            source.insert(
                "aggregations".into(),
                Value::Object(render_named(&self.sub_aggregations)?),
            );
        }
        if !self.meta.is_empty() {
            source.insert("meta".into(), Value::Object(self.meta.clone()));
        }
        Ok(())
    }
}

/// Render named aggregations, stopping at the first failure
pub(crate) fn render_named(
    aggs: &BTreeMap<String, Arc<dyn Aggregation>>,
) -> Result<Map<String, Value>> {
    let mut rendered = Map::new();
    for (name, agg) in aggs {
        rendered.insert(name.clone(), agg.source()?);
    }
    Ok(rendered)
}

/// Collect `(key, value)` pairs into a JSON object
pub(crate) fn to_meta<I, K, V>(meta: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    meta.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DslError;
    use serde_json::json;

    #[derive(Debug)]
    struct Broken;

    impl Aggregation for Broken {
        fn source(&self) -> Result<Value> {
            Err(DslError::Serialization("broken".into()))
        }
    }

    #[test]
    fn test_attach_skips_empty_parts() {
        let mut source = Map::new();
        Nested::default().attach(&mut source).unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn test_attach_renders_both_parts() {
        let mut nested = Nested::default();
        nested.set_sub_aggregation(
            "avg_price".into(),
            Arc::new(MetricAggregation::avg("price")),
        );
        nested.set_meta(to_meta([("color", "blue")]));

        let mut source = Map::new();
        nested.attach(&mut source).unwrap();
        assert_eq!(
            Value::Object(source),
            json!({
                "aggregations": {"avg_price": {"avg": {"field": "price"}}},
                "meta": {"color": "blue"}
            })
        );
    }

    #[test]
    fn test_render_named_fails_fast() {
        let mut aggs: BTreeMap<String, Arc<dyn Aggregation>> = BTreeMap::new();
        aggs.insert("a".into(), Arc::new(MetricAggregation::sum("x")));
        aggs.insert("b".into(), Arc::new(Broken));
        assert!(matches!(
            render_named(&aggs),
            Err(DslError::Serialization(msg)) if msg == "broken"
        ));
    }
}
