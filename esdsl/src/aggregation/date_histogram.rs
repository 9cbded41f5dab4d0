//! Date histogram aggregation

use super::{to_meta, Aggregation, Nested};
use crate::Result;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Bucket width
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interval {
    /// Calendar-aware unit: `"day"`, `"1M"`, `"quarter"`, ...
    Calendar(String),
    /// Fixed span: `"30s"`, `"12h"`, ...
    Fixed(String),
}

impl Interval {
    fn key(&self) -> &'static str {
        match self {
            Interval::Calendar(_) => "calendar_interval",
            Interval::Fixed(_) => "fixed_interval",
        }
    }

    fn value(&self) -> &str {
        match self {
            Interval::Calendar(v) | Interval::Fixed(v) => v,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateHistogramAggregation {
    field: String,
    interval: Interval,
    format: Option<String>,
    time_zone: Option<String>,
    min_doc_count: Option<u64>,
    nested: Nested,
}

impl DateHistogramAggregation {
    pub fn new(field: impl Into<String>, interval: Interval) -> Self {
        Self {
            field: field.into(),
            interval,
            format: None,
            time_zone: None,
            min_doc_count: None,
            nested: Nested::default(),
        }
    }

    pub fn calendar(field: impl Into<String>, interval: impl Into<String>) -> Self {
        Self::new(field, Interval::Calendar(interval.into()))
    }

    pub fn fixed(field: impl Into<String>, interval: impl Into<String>) -> Self {
        Self::new(field, Interval::Fixed(interval.into()))
    }

    /// Format of `key_as_string` in the response
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = Some(tz.into());
        self
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.min_doc_count = Some(count);
        self
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

impl Aggregation for DateHistogramAggregation {
    fn source(&self) -> Result<Value> {
        let mut params = Map::new();
        params.insert("field".into(), Value::from(self.field.clone()));
        params.insert(
            self.interval.key().into(),
            Value::from(self.interval.value()),
        );
        if let Some(format) = &self.format {
            params.insert("format".into(), Value::from(format.clone()));
        }
        if let Some(tz) = &self.time_zone {
            params.insert("time_zone".into(), Value::from(tz.clone()));
        }
        if let Some(count) = self.min_doc_count {
            params.insert("min_doc_count".into(), Value::from(count));
        }

        let mut source = Map::new();
        source.insert("date_histogram".into(), Value::Object(params));
        self.nested.attach(&mut source)?;
        Ok(Value::Object(source))
    }
}
