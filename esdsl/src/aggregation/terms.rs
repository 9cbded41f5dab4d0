//! Terms aggregation

use super::{to_meta, Aggregation, Nested};
use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
struct TermsParams {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_doc_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Value>,
    /// `[{"_count": "desc"}, {"_key": "asc"}]`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    order: Vec<Map<String, Value>>,
}

/// One bucket per unique value of a field
#[derive(Debug, Clone)]
pub struct TermsAggregation {
    params: TermsParams,
    nested: Nested,
}

impl TermsAggregation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            params: TermsParams {
                field: field.into(),
                size: None,
                min_doc_count: None,
                missing: None,
                order: Vec::new(),
            },
            nested: Nested::default(),
        }
    }

    pub fn size(mut self, size: usize) -> Self {
        self.params.size = Some(size);
        self
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.params.min_doc_count = Some(count);
        self
    }

    /// Value to bucket documents without the field under
    pub fn missing(mut self, value: impl Into<Value>) -> Self {
        self.params.missing = Some(value.into());
        self
    }

    /// Add a sort criterion; earlier criteria take precedence
    pub fn order(mut self, key: impl Into<String>, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        let mut criterion = Map::new();
        criterion.insert(key.into(), Value::from(direction));
        self.params.order.push(criterion);
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

impl Aggregation for TermsAggregation {
    fn source(&self) -> Result<Value> {
        let mut source = Map::new();
        source.insert("terms".into(), serde_json::to_value(&self.params)?);
        self.nested.attach(&mut source)?;
        Ok(Value::Object(source))
    }
}
