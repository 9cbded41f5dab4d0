use super::Query;
use crate::Result;
use serde_json::Value;

/// A query clause passed through verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery(Value);

impl RawQuery {
    pub fn new(body: Value) -> Self {
        Self(body)
    }
}

impl From<Value> for RawQuery {
    fn from(body: Value) -> Self {
        Self(body)
    }
}

impl Query for RawQuery {
    fn source(&self) -> Result<Value> {
        Ok(self.0.clone())
    }
}
