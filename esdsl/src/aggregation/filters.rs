//! Filters aggregation: one bucket per filter
//!
//! ```json
//! {
//!   "filters": {
//!     "filters": [ <filter>, ... ]
//!   },
//!   "aggregations": { "<name>": <sub-aggregation>, ... },
//!   "meta": { ... }
//! }
//! ```
//!
//! `"aggregations"` and `"meta"` are left out when empty. The rendered body
//! is meant to be embedded under a name chosen by the caller; neither
//! builder here adds that name.

use super::{to_meta, Aggregation, Nested};
use crate::query::{render_all, Query};
use crate::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// `other_bucket` settings, shared by both filters builders
#[derive(Debug, Clone, Default)]
struct OtherBucket {
    enabled: Option<bool>,
    key: Option<String>,
}

impl OtherBucket {
    fn apply(&self, inner: &mut Map<String, Value>) {
        if let Some(enabled) = self.enabled {
            inner.insert("other_bucket".into(), Value::Bool(enabled));
        }
        if let Some(key) = &self.key {
            inner.insert("other_bucket_key".into(), Value::from(key.clone()));
        }
    }
}

/// Multi-bucket aggregation with anonymous, ordered filters
///
/// Buckets come back in the order the filters were added.
#[derive(Debug, Clone, Default)]
pub struct FiltersAggregation {
    filters: Vec<Arc<dyn Query>>,
    other_bucket: OtherBucket,
    nested: Nested,
}

impl FiltersAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one filter
    pub fn filter<Q: Query + 'static>(mut self, filter: Q) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Append filters, keeping their relative order. Empty input is a no-op.
    pub fn filters<I, Q>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Query + 'static,
    {
        self.filters.extend(filters.into_iter().map(|f| Arc::new(f) as Arc<dyn Query>));
        self
    }

    /// Set the sub-aggregation stored under `name`, replacing any previous one
    pub fn sub_aggregation<A: Aggregation + 'static>(
        mut self,
        name: impl Into<String>,
        aggregation: A,
    ) -> Self {
        self.nested.set_sub_aggregation(name.into(), Arc::new(aggregation));
        self
    }

    /// Replace the metadata echoed back in the response
    pub fn meta<I, K, V>(mut self, meta: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.nested.set_meta(to_meta(meta));
        self
    }

    /// Add a bucket for documents matching none of the filters
    pub fn other_bucket(mut self, enabled: bool) -> Self {
        self.other_bucket.enabled = Some(enabled);
        self
    }

    /// Key of the `other` bucket (implies `other_bucket`)
    pub fn other_bucket_key(mut self, key: impl Into<String>) -> Self {
        self.other_bucket.key = Some(key.into());
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Aggregation for FiltersAggregation {
    fn source(&self) -> Result<Value> {
        let mut inner = Map::new();
        inner.insert("filters".into(), Value::Array(render_all(&self.filters)?));
        self.other_bucket.apply(&mut inner);

        let mut source = Map::new();
        source.insert("filters".into(), Value::Object(inner));
        self.nested.attach(&mut source)?;

        debug!(
            filters = self.filters.len(),
            sub_aggregations = self.nested.sub_aggregation_count(),
            "Rendered filters aggregation"
        );
        Ok(Value::Object(source))
    }
}

/// Multi-bucket aggregation with named filters
///
/// Renders the inner `"filters"` as an object keyed by bucket name, so the
/// response buckets come back keyed the same way. Bucket names are unique;
/// adding a filter under an existing name replaces it.
#[derive(Debug, Clone, Default)]
pub struct KeyedFiltersAggregation {
    filters: BTreeMap<String, Arc<dyn Query>>,
    other_bucket: OtherBucket,
    nested: Nested,
}

impl KeyedFiltersAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter<Q: Query + 'static>(mut self, name: impl Into<String>, filter: Q) -> Self {
        self.filters.insert(name.into(), Arc::new(filter));
        self
    }

    pub fn filters<I, K, Q>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = (K, Q)>,
        K: Into<String>,
        Q: Query + 'static,
    {
        for (name, filter) in filters {
            self.filters.insert(name.into(), Arc::new(filter));
        }
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

    pub fn other_bucket(mut self, enabled: bool) -> Self {
        self.other_bucket.enabled = Some(enabled);
        self
    }

    pub fn other_bucket_key(mut self, key: impl Into<String>) -> Self {
        self.other_bucket.key = Some(key.into());
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Aggregation for KeyedFiltersAggregation {
    fn source(&self) -> Result<Value> {
        let mut buckets = Map::new();
        for (name, filter) in &self.filters {
            buckets.insert(name.clone(), filter.source()?);
        }

        let mut inner = Map::new();
        inner.insert("filters".into(), Value::Object(buckets));
        self.other_bucket.apply(&mut inner);

        let mut source = Map::new();
        source.insert("filters".into(), Value::Object(inner));
        self.nested.attach(&mut source)?;

        debug!(
            filters = self.filters.len(),
            sub_aggregations = self.nested.sub_aggregation_count(),
            "Rendered keyed filters aggregation"
        );
        Ok(Value::Object(source))
    }
}
