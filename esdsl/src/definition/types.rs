//! Declarative definition types
//!
//! These mirror the subset of the Query DSL the builders support, so a
//! request can be written as YAML or JSON and turned into builders by the
//! [`Translator`](super::Translator).

use crate::error::DslError;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Root of a definition file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchDefinition {
    /// The query to execute
    #[serde(default)]
    pub query: Option<QueryDefinition>,

    /// Starting offset
    #[serde(default)]
    pub from: Option<usize>,

    /// Maximum number of hits
    #[serde(default)]
    pub size: Option<usize>,

    /// Named aggregations
    #[serde(default, alias = "aggregations")]
    pub aggs: Option<BTreeMap<String, AggregationDefinition>>,
}

impl SearchDefinition {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| DslError::ParseError(e.to_string()))
    }
}

/// Query types, externally tagged by the DSL name
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryDefinition {
    MatchAll(MatchAllDefinition),
    Match(BTreeMap<String, MatchDefinition>),
    MatchPhrase(BTreeMap<String, MatchPhraseDefinition>),
    Term(BTreeMap<String, TermValue>),
    Terms(BTreeMap<String, Vec<Value>>),
    Range(BTreeMap<String, RangeDefinition>),
    Bool(Box<BoolDefinition>),
    Exists(ExistsDefinition),
    Ids(IdsDefinition),
    Prefix(BTreeMap<String, PatternDefinition>),
    Wildcard(BTreeMap<String, PatternDefinition>),
    QueryString(QueryStringDefinition),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MatchAllDefinition {
    #[serde(default)]
    pub boost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MatchDefinition {
    Simple(String),
    Object {
        query: String,
        #[serde(default)]
        operator: Option<String>,
        #[serde(default)]
        fuzziness: Option<String>,
        #[serde(default)]
        boost: Option<f64>,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MatchPhraseDefinition {
    Simple(String),
    Object {
        query: String,
        #[serde(default)]
        slop: Option<u32>,
        #[serde(default)]
        boost: Option<f64>,
    },
}

/// `{"status": "active"}` or `{"status": {"value": "active", ...}}`
///
/// The object form is tried first, so a bare object value with a `value`
/// key is read as parameters rather than as the term itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TermValue {
    Object(TermParams),
    Simple(Value),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TermParams {
    pub value: Value,
    #[serde(default)]
    pub boost: Option<f64>,
    #[serde(default)]
    pub case_insensitive: Option<bool>,
    #[serde(default, rename = "_name")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RangeDefinition {
    #[serde(default)]
    pub gte: Option<Value>,
    #[serde(default)]
    pub gt: Option<Value>,
    #[serde(default)]
    pub lte: Option<Value>,
    #[serde(default)]
    pub lt: Option<Value>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub boost: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoolDefinition {
    #[serde(default)]
    pub must: Option<QueryList>,
    #[serde(default)]
    pub should: Option<QueryList>,
    #[serde(default)]
    pub must_not: Option<QueryList>,
    #[serde(default)]
    pub filter: Option<QueryList>,
    /// A count or a percentage string
    #[serde(default)]
    pub minimum_should_match: Option<Value>,
    #[serde(default)]
    pub boost: Option<f64>,
}

/// A clause list may be written as a single clause or an array
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum QueryList {
    Single(Box<QueryDefinition>),
    Multiple(Vec<QueryDefinition>),
}

impl QueryList {
    pub fn as_slice(&self) -> &[QueryDefinition] {
        match self {
            QueryList::Single(q) => std::slice::from_ref(q.as_ref()),
            QueryList::Multiple(v) => v,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExistsDefinition {
    pub field: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdsDefinition {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PatternDefinition {
    Simple(String),
    Object {
        value: String,
        #[serde(default)]
        boost: Option<f64>,
        #[serde(default)]
        case_insensitive: Option<bool>,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryStringDefinition {
    pub query: String,
    #[serde(default)]
    pub default_field: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    #[serde(default)]
    pub default_operator: Option<String>,
    #[serde(default)]
    pub analyze_wildcard: Option<bool>,
}

/// Aggregation definition; exactly one type field must be set
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AggregationDefinition {
    // Metric aggregations
    #[serde(default)]
    pub avg: Option<FieldDefinition>,
    #[serde(default)]
    pub sum: Option<FieldDefinition>,
    #[serde(default)]
    pub min: Option<FieldDefinition>,
    #[serde(default)]
    pub max: Option<FieldDefinition>,
    #[serde(default)]
    pub stats: Option<FieldDefinition>,
    #[serde(default)]
    pub value_count: Option<FieldDefinition>,
    #[serde(default)]
    pub cardinality: Option<FieldDefinition>,

    // Bucket aggregations
    #[serde(default)]
    pub terms: Option<TermsDefinition>,
    #[serde(default)]
    pub date_histogram: Option<DateHistogramDefinition>,
    #[serde(default)]
    pub filter: Option<Box<QueryDefinition>>,
    #[serde(default)]
    pub filters: Option<FiltersDefinition>,

    // Nested aggregations
    #[serde(default, alias = "aggregations")]
    pub aggs: Option<BTreeMap<String, AggregationDefinition>>,

    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldDefinition {
    pub field: String,
    #[serde(default)]
    pub missing: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TermsDefinition {
    pub field: String,
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub min_doc_count: Option<u64>,
    #[serde(default)]
    pub missing: Option<Value>,
    #[serde(default)]
    pub order: Option<TermsOrder>,
}

/// One `{key: direction}` criterion or a list of them
///
/// Each criterion must hold a single key; precedence comes from list
/// position, never from key order inside one object.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TermsOrder {
    Single(BTreeMap<String, String>),
    Multiple(Vec<BTreeMap<String, String>>),
}

impl TermsOrder {
    pub fn criteria(&self) -> &[BTreeMap<String, String>] {
        match self {
            TermsOrder::Single(map) => std::slice::from_ref(map),
            TermsOrder::Multiple(list) => list,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DateHistogramDefinition {
    pub field: String,
    #[serde(default)]
    pub calendar_interval: Option<String>,
    #[serde(default)]
    pub fixed_interval: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub min_doc_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FiltersDefinition {
    pub filters: FiltersList,
    #[serde(default)]
    pub other_bucket: Option<bool>,
    #[serde(default)]
    pub other_bucket_key: Option<String>,
}

/// Anonymous filters (array) or named filters (object)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FiltersList {
    Anonymous(Vec<QueryDefinition>),
    Keyed(BTreeMap<String, QueryDefinition>),
}
