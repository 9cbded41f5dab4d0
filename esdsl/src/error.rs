//! Error types for the DSL builders

/// Errors raised while rendering or translating DSL fragments
#[derive(Debug, thiserror::Error)]
pub enum DslError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unsupported aggregation: {0}")]
    UnsupportedAggregation(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<serde_yaml::Error> for DslError {
    fn from(err: serde_yaml::Error) -> Self {
        DslError::ParseError(err.to_string())
    }
}

impl DslError {
    /// Elasticsearch exception name closest to this error
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Serialization(_) | Self::Json(_) => "serialization_exception",
            Self::InvalidQuery(_) => "query_shard_exception",
            Self::MissingField(_) | Self::UnsupportedAggregation(_) => "parsing_exception",
            Self::ParseError(_) => "parse_exception",
        }
    }
}
