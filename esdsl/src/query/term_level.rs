//! Term-level queries (exact matching, not analyzed)

use super::{field_clause, wrap, Query};
use crate::Result;
use serde_json::{json, Map, Value};

/// Exact match on a single field
#[derive(Debug, Clone)]
pub struct TermQuery {
    field: String,
    value: Value,
    boost: Option<f64>,
    case_insensitive: Option<bool>,
    query_name: Option<String>,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            boost: None,
            case_insensitive: None,
            query_name: None,
        }
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// ASCII case-insensitive matching against keyword fields
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }

    /// Name reported back in `matched_queries`
    pub fn query_name(mut self, name: impl Into<String>) -> Self {
        self.query_name = Some(name.into());
        self
    }
}

impl Query for TermQuery {
    fn source(&self) -> Result<Value> {
        // Short form unless parameters force the object form
        if self.boost.is_none() && self.case_insensitive.is_none() && self.query_name.is_none() {
            return Ok(field_clause("term", &self.field, self.value.clone()));
        }

        let mut params = Map::new();
        params.insert("value".into(), self.value.clone());
        if let Some(boost) = self.boost {
            params.insert("boost".into(), Value::from(boost));
        }
        if let Some(ci) = self.case_insensitive {
            params.insert("case_insensitive".into(), Value::Bool(ci));
        }
        if let Some(name) = &self.query_name {
            params.insert("_name".into(), Value::from(name.clone()));
        }
        Ok(field_clause("term", &self.field, Value::Object(params)))
    }
}

/// Match any of several exact values
#[derive(Debug, Clone)]
pub struct TermsQuery {
    field: String,
    values: Vec<Value>,
    boost: Option<f64>,
}

impl TermsQuery {
    pub fn new<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            boost: None,
        }
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Query for TermsQuery {
    fn source(&self) -> Result<Value> {
        let mut params = Map::new();
        params.insert(self.field.clone(), Value::Array(self.values.clone()));
        if let Some(boost) = self.boost {
            params.insert("boost".into(), Value::from(boost));
        }
        Ok(wrap("terms", Value::Object(params)))
    }
}

/// Documents that have any indexed value for a field
#[derive(Debug, Clone)]
pub struct ExistsQuery {
    field: String,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Query for ExistsQuery {
    fn source(&self) -> Result<Value> {
        Ok(json!({"exists": {"field": self.field}}))
    }
}

/// Documents by `_id`
#[derive(Debug, Clone)]
pub struct IdsQuery {
    values: Vec<String>,
}

impl IdsQuery {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl Query for IdsQuery {
    fn source(&self) -> Result<Value> {
        Ok(json!({"ids": {"values": self.values}}))
    }
}

#[derive(Debug, Clone)]
pub struct PrefixQuery {
    field: String,
    value: String,
    boost: Option<f64>,
    case_insensitive: Option<bool>,
}

impl PrefixQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            boost: None,
            case_insensitive: None,
        }
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }
}

impl Query for PrefixQuery {
    fn source(&self) -> Result<Value> {
        Ok(field_clause(
            "prefix",
            &self.field,
            pattern_params(&self.value, self.boost, self.case_insensitive),
        ))
    }
}

/// Pattern match with `*` and `?`
#[derive(Debug, Clone)]
pub struct WildcardQuery {
    field: String,
    value: String,
    boost: Option<f64>,
    case_insensitive: Option<bool>,
}

impl WildcardQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            boost: None,
            case_insensitive: None,
        }
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }
}

impl Query for WildcardQuery {
    fn source(&self) -> Result<Value> {
        Ok(field_clause(
            "wildcard",
            &self.field,
            pattern_params(&self.value, self.boost, self.case_insensitive),
        ))
    }
}

fn pattern_params(value: &str, boost: Option<f64>, case_insensitive: Option<bool>) -> Value {
    if boost.is_none() && case_insensitive.is_none() {
        return Value::from(value);
    }

    let mut params = Map::new();
    params.insert("value".into(), Value::from(value));
    if let Some(boost) = boost {
        params.insert("boost".into(), Value::from(boost));
    }
    if let Some(ci) = case_insensitive {
        params.insert("case_insensitive".into(), Value::Bool(ci));
    }
    Value::Object(params)
}
