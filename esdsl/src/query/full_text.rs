//! Full-text queries (analyzed)

use super::{field_clause, wrap, Query};
use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// Match all documents
#[derive(Debug, Clone, Default)]
pub struct MatchAllQuery {
    boost: Option<f64>,
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl Query for MatchAllQuery {
    fn source(&self) -> Result<Value> {
        let mut params = Map::new();
        if let Some(boost) = self.boost {
            params.insert("boost".into(), Value::from(boost));
        }
        Ok(wrap("match_all", Value::Object(params)))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct MatchParams {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fuzziness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f64>,
}

/// Analyzed match on a single field
#[derive(Debug, Clone)]
pub struct MatchQuery {
    field: String,
    params: MatchParams,
}

impl MatchQuery {
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            params: MatchParams {
                query: query.into(),
                ..Default::default()
            },
        }
    }

    /// `"and"` or `"or"`
    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.params.operator = Some(operator.into());
        self
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<String>) -> Self {
        self.params.fuzziness = Some(fuzziness.into());
        self
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.params.boost = Some(boost);
        self
    }
}

impl Query for MatchQuery {
    fn source(&self) -> Result<Value> {
        let p = &self.params;
        let body = if p.operator.is_none() && p.fuzziness.is_none() && p.boost.is_none() {
            Value::from(p.query.clone())
        } else {
            serde_json::to_value(p)?
        };
        Ok(field_clause("match", &self.field, body))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct MatchPhraseParams {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    slop: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boost: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct MatchPhraseQuery {
    field: String,
    params: MatchPhraseParams,
}

impl MatchPhraseQuery {
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            params: MatchPhraseParams {
                query: query.into(),
                ..Default::default()
            },
        }
    }

    pub fn slop(mut self, slop: u32) -> Self {
        self.params.slop = Some(slop);
        self
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.params.boost = Some(boost);
        self
    }
}

impl Query for MatchPhraseQuery {
    fn source(&self) -> Result<Value> {
        let p = &self.params;
        let body = if p.slop.is_none() && p.boost.is_none() {
            Value::from(p.query.clone())
        } else {
            serde_json::to_value(p)?
        };
        Ok(field_clause("match_phrase", &self.field, body))
    }
}

/// Lucene query string syntax
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryStringQuery {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analyze_wildcard: Option<bool>,
}

impl QueryStringQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = Some(field.into());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_operator(mut self, operator: impl Into<String>) -> Self {
        self.default_operator = Some(operator.into());
        self
    }

    pub fn analyze_wildcard(mut self, enabled: bool) -> Self {
        self.analyze_wildcard = Some(enabled);
        self
    }
}

impl Query for QueryStringQuery {
    fn source(&self) -> Result<Value> {
        Ok(wrap("query_string", serde_json::to_value(self)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_all() {
        assert_eq!(
            MatchAllQuery::new().source().unwrap(),
            json!({"match_all": {}})
        );
    }

    #[test]
    fn test_match_all_with_boost() {
        assert_eq!(
            MatchAllQuery::new().boost(1.5).source().unwrap(),
            json!({"match_all": {"boost": 1.5}})
        );
    }

    #[test]
    fn test_match_short_form() {
        assert_eq!(
            MatchQuery::new("title", "hello world").source().unwrap(),
            json!({"match": {"title": "hello world"}})
        );
    }

    #[test]
    fn test_match_object_form() {
        let q = MatchQuery::new("title", "hello world").operator("and");
        assert_eq!(
            q.source().unwrap(),
            json!({"match": {"title": {"query": "hello world", "operator": "and"}}})
        );
    }

    #[test]
    fn test_match_phrase_with_slop() {
        let q = MatchPhraseQuery::new("msg", "quick brown fox").slop(2);
        assert_eq!(
            q.source().unwrap(),
            json!({"match_phrase": {"msg": {"query": "quick brown fox", "slop": 2}}})
        );
    }

    #[test]
    fn test_match_phrase_short_form() {
        assert_eq!(
            MatchPhraseQuery::new("msg", "quick brown fox").source().unwrap(),
            json!({"match_phrase": {"msg": "quick brown fox"}})
        );
    }

    #[test]
    fn test_query_string_skips_unset_options() {
        let q = QueryStringQuery::new("status:active AND level:error")
            .default_field("message")
            .fields(["message", "title"]);
        assert_eq!(
            q.source().unwrap(),
            json!({"query_string": {
                "query": "status:active AND level:error",
                "default_field": "message",
                "fields": ["message", "title"]
            }})
        );
    }
}
