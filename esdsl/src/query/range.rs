//! Range query

use super::{field_clause, Query};
use crate::error::DslError;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize)]
struct RangeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    gt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lte: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f64>,
}

impl RangeParams {
    fn has_bounds(&self) -> bool {
        self.gt.is_some() || self.gte.is_some() || self.lt.is_some() || self.lte.is_some()
    }
}

/// Values within bounds on a single field
///
/// Bounds accept numbers or date strings (`"now-1d/d"`). Rendering fails
/// with [`DslError::InvalidQuery`] if no bound was set.
#[derive(Debug, Clone)]
pub struct RangeQuery {
    field: String,
    params: RangeParams,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            params: RangeParams::default(),
        }
    }

    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.params.gt = Some(value.into());
        self
    }

    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.params.gte = Some(value.into());
        self
    }

    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.params.lt = Some(value.into());
        self
    }

    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.params.lte = Some(value.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.params.format = Some(format.into());
        self
    }

    pub fn time_zone(mut self, tz: impl Into<String>) -> Self {
        self.params.time_zone = Some(tz.into());
        self
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.params.boost = Some(boost);
        self
    }
}

impl Query for RangeQuery {
    fn source(&self) -> Result<Value> {
        if !self.params.has_bounds() {
            return Err(DslError::InvalidQuery(format!(
                "range query on '{}' has no bounds",
                self.field
            )));
        }
        Ok(field_clause(
            "range",
            &self.field,
            serde_json::to_value(&self.params)?,
        ))
    }
}
