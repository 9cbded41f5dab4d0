//! Definition files rendered end to end

use esdsl::definition::types::FiltersList;
use esdsl::{
    Aggregation, DateHistogramAggregation, DslError, FiltersAggregation, KeyedFiltersAggregation,
    MatchQuery, MetricAggregation, SearchDefinition, TermQuery, TermsAggregation, Translator,
};
use serde_json::json;

const MESSAGES_YAML: &str = include_str!("fixtures/messages.yaml");

#[test]
fn test_yaml_fixture_renders_full_body() {
    let def = SearchDefinition::from_yaml_str(MESSAGES_YAML).unwrap();
    let body = Translator::translate(&def).unwrap().source().unwrap();

    assert_eq!(
        body,
        json!({
            "query": {"bool": {"filter": [
                {"range": {"timestamp": {"gte": "now-1d/d", "lt": "now/d"}}}
            ]}},
            "size": 0,
            "aggregations": {
                "levels": {"filters": {"filters": {
                    "errors": {"match": {"level": "error"}},
                    "warnings": {"match": {"level": "warn"}}
                }}},
                "messages": {
                    "filters": {
                        "filters": [
                            {"term": {"body": "error"}},
                            {"term": {"body": "warning"}}
                        ],
                        "other_bucket_key": "other"
                    },
                    "aggregations": {
                        "hosts": {"terms": {"field": "host", "size": 5, "order": [{"_count": "desc"}]}}
                    },
                    "meta": {"dashboard": "ops"}
                },
                "per_day": {
                    "date_histogram": {"field": "timestamp", "calendar_interval": "day"},
                    "aggregations": {"avg_latency": {"avg": {"field": "latency_ms"}}}
                }
            }
        })
    );
}

#[test]
fn test_definition_matches_hand_built_builders() {
    let def = SearchDefinition::from_yaml_str(MESSAGES_YAML).unwrap();
    let aggs = Translator::translate_aggregations(def.aggs.as_ref().unwrap()).unwrap();
    let rendered: Vec<_> = aggs
        .iter()
        .map(|(name, agg)| (name.as_str(), agg.source().unwrap()))
        .collect();

    let messages = FiltersAggregation::new()
        .filter(TermQuery::new("body", "error"))
        .filter(TermQuery::new("body", "warning"))
        .other_bucket_key("other")
        .sub_aggregation(
            "hosts",
            TermsAggregation::new("host").size(5).order("_count", false),
        )
        .meta([("dashboard", "ops")]);
    let levels = KeyedFiltersAggregation::new()
        .filter("errors", MatchQuery::new("level", "error"))
        .filter("warnings", MatchQuery::new("level", "warn"));
    let per_day = DateHistogramAggregation::calendar("timestamp", "day")
        .sub_aggregation("avg_latency", MetricAggregation::avg("latency_ms"));

    assert_eq!(
        rendered,
        vec![
            ("levels", levels.source().unwrap()),
            ("messages", messages.source().unwrap()),
            ("per_day", per_day.source().unwrap()),
        ]
    );
}

#[test]
fn test_keyed_filters_parse_as_keyed() {
    let def = SearchDefinition::from_yaml_str(MESSAGES_YAML).unwrap();
    let aggs = def.aggs.unwrap();
    let levels = aggs["levels"].filters.as_ref().unwrap();
    assert!(matches!(&levels.filters, FiltersList::Keyed(m) if m.len() == 2));
}

#[test]
fn test_json_definition() {
    let def = SearchDefinition::from_json_str(
        r#"{"aggregations": {"status": {"terms": {"field": "status", "size": 3}}}}"#,
    )
    .unwrap();
    let body = Translator::translate(&def).unwrap().source().unwrap();
    assert_eq!(
        body,
        json!({"aggregations": {"status": {"terms": {"field": "status", "size": 3}}}})
    );
}

#[test]
fn test_unknown_query_type_is_parse_error() {
    let err = SearchDefinition::from_yaml_str("query:\n  telepathy: {field: mind}\n").unwrap_err();
    assert!(matches!(err, DslError::ParseError(_)));
}

#[test]
fn test_bad_filter_fails_translation() {
    let def = SearchDefinition::from_yaml_str(
        r#"
aggs:
  messages:
    filters:
      filters:
        - term: { body: error }
        - term: { body: warning, level: high }
"#,
    )
    .unwrap();
    let err = Translator::translate(&def).unwrap_err();
    assert!(matches!(err, DslError::InvalidQuery(_)));
}
