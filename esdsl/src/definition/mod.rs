//! Declarative request definitions (YAML / JSON) and their translation

pub mod translator;
pub mod types;

pub use translator::Translator;
pub use types::{AggregationDefinition, QueryDefinition, SearchDefinition};
