//! Single-field metric aggregations

use super::{to_meta, Aggregation};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Avg,
    Sum,
    Min,
    Max,
    Stats,
    ValueCount,
    Cardinality,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Avg => "avg",
            MetricKind::Sum => "sum",
            MetricKind::Min => "min",
            MetricKind::Max => "max",
            MetricKind::Stats => "stats",
            MetricKind::ValueCount => "value_count",
            MetricKind::Cardinality => "cardinality",
        }
    }
}

/// A metric computed over one field. Metrics take no sub-aggregations.
#[derive(Debug, Clone)]
pub struct MetricAggregation {
    kind: MetricKind,
    field: String,
    missing: Option<Value>,
    meta: Map<String, Value>,
}

impl MetricAggregation {
    pub fn new(kind: MetricKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            missing: None,
            meta: Map::new(),
        }
    }

    pub fn avg(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Avg, field)
    }

    pub fn sum(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Sum, field)
    }

    pub fn min(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Min, field)
    }

    pub fn max(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Max, field)
    }

    pub fn stats(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Stats, field)
    }

    pub fn value_count(field: impl Into<String>) -> Self {
        Self::new(MetricKind::ValueCount, field)
    }

    pub fn cardinality(field: impl Into<String>) -> Self {
        Self::new(MetricKind::Cardinality, field)
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Value used for documents missing the field
    pub fn missing(mut self, value: impl Into<Value>) -> Self {
        self.missing = Some(value.into());
        self
    }

    pub fn meta<I, K, V>(mut self, meta: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.meta = to_meta(meta);
        self
    }
}

impl Aggregation for MetricAggregation {
    fn source(&self) -> Result<Value> {
        let mut params = Map::new();
        params.insert("field".into(), Value::from(self.field.clone()));
        if let Some(missing) = &self.missing {
            params.insert("missing".into(), missing.clone());
        }

        let mut source = Map::new();
        source.insert(self.kind.as_str().into(), Value::Object(params));
        if !self.meta.is_empty() {
            source.insert("meta".into(), Value::Object(self.meta.clone()));
        }
        Ok(Value::Object(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_kinds() {
        let cases = [
            (MetricAggregation::avg("f"), "avg"),
            (MetricAggregation::sum("f"), "sum"),
            (MetricAggregation::min("f"), "min"),
            (MetricAggregation::max("f"), "max"),
            (MetricAggregation::stats("f"), "stats"),
            (MetricAggregation::value_count("f"), "value_count"),
            (MetricAggregation::cardinality("f"), "cardinality"),
        ];
        for (agg, name) in cases {
            assert_eq!(agg.kind().as_str(), name);
            assert_eq!(agg.source().unwrap(), json!({ name: {"field": "f"} }));
        }
    }

    #[test]
    fn test_metric_missing_and_meta() {
        let agg = MetricAggregation::avg("grade")
            .missing(10)
            .meta([("unit", "points")]);
        assert_eq!(
            agg.source().unwrap(),
            json!({
                "avg": {"field": "grade", "missing": 10},
                "meta": {"unit": "points"}
            })
        );
    }

    #[test]
    fn test_metric_kind_deserialize() {
        let kind: MetricKind = serde_json::from_value(json!("value_count")).unwrap();
        assert_eq!(kind, MetricKind::ValueCount);
    }
}
