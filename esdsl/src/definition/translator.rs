//! Definition → builder translator

use super::types::*;
use crate::aggregation::{
    Aggregation, DateHistogramAggregation, FilterAggregation, FiltersAggregation,
    KeyedFiltersAggregation, MetricAggregation, MetricKind, TermsAggregation,
};
use crate::error::DslError;
use crate::query::{
    BoolQuery, ExistsQuery, IdsQuery, MatchAllQuery, MatchPhraseQuery, MatchQuery, PrefixQuery,
    Query, QueryStringQuery, RangeQuery, TermQuery, TermsQuery, WildcardQuery,
};
use crate::search::SearchSource;
use crate::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Turns definitions into builders
pub struct Translator;

impl Translator {
    /// Translate a whole definition into a request body builder
    pub fn translate(def: &SearchDefinition) -> Result<SearchSource> {
        let mut source = SearchSource::new();

        if let Some(query) = &def.query {
            source = source.query(Self::translate_query(query)?);
        }
        if let Some(from) = def.from {
            source = source.from(from);
        }
        if let Some(size) = def.size {
            source = source.size(size);
        }
        if let Some(aggs) = &def.aggs {
            for (name, agg) in Self::translate_aggregations(aggs)? {
                source = source.aggregation(name, agg);
            }
        }

        Ok(source)
    }

    pub fn translate_query(query: &QueryDefinition) -> Result<Arc<dyn Query>> {
        let translated: Arc<dyn Query> = match query {
            QueryDefinition::MatchAll(m) => {
                let mut q = MatchAllQuery::new();
                if let Some(boost) = m.boost {
                    q = q.boost(boost);
                }
                Arc::new(q)
            }

            QueryDefinition::Match(fields) => {
                let (field, params) = single_field("match", fields)?;
                Arc::new(match params {
                    MatchDefinition::Simple(text) => MatchQuery::new(field, text.as_str()),
                    MatchDefinition::Object {
                        query,
                        operator,
                        fuzziness,
                        boost,
                    } => {
                        let mut q = MatchQuery::new(field, query.as_str());
                        if let Some(op) = operator {
                            q = q.operator(op.as_str());
                        }
                        if let Some(f) = fuzziness {
                            q = q.fuzziness(f.as_str());
                        }
                        if let Some(b) = boost {
                            q = q.boost(*b);
                        }
                        q
                    }
                })
            }

            QueryDefinition::MatchPhrase(fields) => {
                let (field, params) = single_field("match_phrase", fields)?;
                Arc::new(match params {
                    MatchPhraseDefinition::Simple(text) => {
                        MatchPhraseQuery::new(field, text.as_str())
                    }
                    MatchPhraseDefinition::Object { query, slop, boost } => {
                        let mut q = MatchPhraseQuery::new(field, query.as_str());
                        if let Some(s) = slop {
                            q = q.slop(*s);
                        }
                        if let Some(b) = boost {
                            q = q.boost(*b);
                        }
                        q
                    }
                })
            }

            QueryDefinition::Term(fields) => {
                let (field, value) = single_field("term", fields)?;
                Arc::new(match value {
                    TermValue::Simple(v) => TermQuery::new(field, v.clone()),
                    TermValue::Object(params) => {
                        let mut q = TermQuery::new(field, params.value.clone());
                        if let Some(b) = params.boost {
                            q = q.boost(b);
                        }
                        if let Some(ci) = params.case_insensitive {
                            q = q.case_insensitive(ci);
                        }
                        if let Some(n) = &params.name {
                            q = q.query_name(n.as_str());
                        }
                        q
                    }
                })
            }

            QueryDefinition::Terms(fields) => {
                let (field, values) = single_field("terms", fields)?;
                Arc::new(TermsQuery::new(field, values.iter().cloned()))
            }

            QueryDefinition::Range(fields) => {
                let (field, params) = single_field("range", fields)?;
                Arc::new(Self::translate_range(field, params))
            }

            QueryDefinition::Bool(bool_def) => Arc::new(Self::translate_bool(bool_def)?),

            QueryDefinition::Exists(e) => Arc::new(ExistsQuery::new(e.field.as_str())),

            QueryDefinition::Ids(ids) => Arc::new(IdsQuery::new(ids.values.iter().cloned())),

            QueryDefinition::Prefix(fields) => {
                let (field, pattern) = single_field("prefix", fields)?;
                Arc::new(match pattern {
                    PatternDefinition::Simple(v) => PrefixQuery::new(field, v.as_str()),
                    PatternDefinition::Object {
                        value,
                        boost,
                        case_insensitive,
                    } => {
                        let mut q = PrefixQuery::new(field, value.as_str());
                        if let Some(b) = boost {
                            q = q.boost(*b);
                        }
                        if let Some(ci) = case_insensitive {
                            q = q.case_insensitive(*ci);
                        }
                        q
                    }
                })
            }

            QueryDefinition::Wildcard(fields) => {
                let (field, pattern) = single_field("wildcard", fields)?;
                Arc::new(match pattern {
                    PatternDefinition::Simple(v) => WildcardQuery::new(field, v.as_str()),
                    PatternDefinition::Object {
                        value,
                        boost,
                        case_insensitive,
                    } => {
                        let mut q = WildcardQuery::new(field, value.as_str());
                        if let Some(b) = boost {
                            q = q.boost(*b);
                        }
                        if let Some(ci) = case_insensitive {
                            q = q.case_insensitive(*ci);
                        }
                        q
                    }
                })
            }

            QueryDefinition::QueryString(qs) => {
                let mut q = QueryStringQuery::new(qs.query.as_str());
                if let Some(df) = &qs.default_field {
                    q = q.default_field(df.as_str());
                }
                if let Some(fields) = &qs.fields {
                    q = q.fields(fields.iter().cloned());
                }
                if let Some(op) = &qs.default_operator {
                    q = q.default_operator(op.as_str());
                }
                if let Some(aw) = qs.analyze_wildcard {
                    q = q.analyze_wildcard(aw);
                }
                Arc::new(q)
            }
        };

        trace!(query = ?translated, "Translated query");
        Ok(translated)
    }

    fn translate_range(field: &str, params: &RangeDefinition) -> RangeQuery {
        let mut q = RangeQuery::new(field);
        if let Some(v) = &params.gt {
            q = q.gt(v.clone());
        }
        if let Some(v) = &params.gte {
            q = q.gte(v.clone());
        }
        if let Some(v) = &params.lt {
            q = q.lt(v.clone());
        }
        if let Some(v) = &params.lte {
            q = q.lte(v.clone());
        }
        if let Some(f) = &params.format {
            q = q.format(f.as_str());
        }
        if let Some(tz) = &params.time_zone {
            q = q.time_zone(tz.as_str());
        }
        if let Some(b) = params.boost {
            q = q.boost(b);
        }
        // Missing bounds are reported when the query renders
        q
    }

    fn translate_bool(def: &BoolDefinition) -> Result<BoolQuery> {
        let mut q = BoolQuery::new();

        for clause in def.must.iter().flat_map(QueryList::as_slice) {
            q = q.must(Self::translate_query(clause)?);
        }
        for clause in def.should.iter().flat_map(QueryList::as_slice) {
            q = q.should(Self::translate_query(clause)?);
        }
        for clause in def.must_not.iter().flat_map(QueryList::as_slice) {
            q = q.must_not(Self::translate_query(clause)?);
        }
        for clause in def.filter.iter().flat_map(QueryList::as_slice) {
            q = q.filter(Self::translate_query(clause)?);
        }

        if let Some(msm) = &def.minimum_should_match {
            q = q.minimum_should_match(msm.clone());
        }
        if let Some(boost) = def.boost {
            q = q.boost(boost);
        }
        Ok(q)
    }

    /// Translate named aggregations, keeping name order
    pub fn translate_aggregations(
        aggs: &BTreeMap<String, AggregationDefinition>,
    ) -> Result<Vec<(String, Arc<dyn Aggregation>)>> {
        let mut translated = Vec::with_capacity(aggs.len());
        for (name, agg) in aggs {
            translated.push((name.clone(), Self::translate_aggregation(name, agg)?));
        }
        Ok(translated)
    }

    pub fn translate_aggregation(
        name: &str,
        agg: &AggregationDefinition,
    ) -> Result<Arc<dyn Aggregation>> {
        let declared = declared_types(agg);
        match declared.as_slice() {
            [] => {
                return Err(DslError::UnsupportedAggregation(format!(
                    "Aggregation '{}' has no recognized type",
                    name
                )))
            }
            [_] => {}
            many => {
                return Err(DslError::UnsupportedAggregation(format!(
                    "Aggregation '{}' declares more than one type: {}",
                    name,
                    many.join(", ")
                )))
            }
        }

        // Translate sub-aggregations first
        let sub_aggs = agg
            .aggs
            .as_ref()
            .map(Self::translate_aggregations)
            .transpose()?
            .unwrap_or_default();
        let meta = agg.meta.clone().unwrap_or_default();

        // Metric aggregations
        if let Some((kind, field)) = metric_of(agg) {
            if !sub_aggs.is_empty() {
                return Err(DslError::UnsupportedAggregation(format!(
                    "Metric aggregation '{}' ({}) cannot have sub-aggregations",
                    name,
                    kind.as_str()
                )));
            }
            let mut metric = MetricAggregation::new(kind, field.field.as_str()).meta(meta);
            if let Some(missing) = &field.missing {
                metric = metric.missing(missing.clone());
            }
            return Ok(Arc::new(metric));
        }

        // Bucket aggregations
        if let Some(terms) = &agg.terms {
            let mut t = TermsAggregation::new(terms.field.as_str());
            if let Some(size) = terms.size {
                t = t.size(size);
            }
            if let Some(count) = terms.min_doc_count {
                t = t.min_doc_count(count);
            }
            if let Some(missing) = &terms.missing {
                t = t.missing(missing.clone());
            }
            if let Some(order) = &terms.order {
                for (key, ascending) in order_criteria(name, order)? {
                    t = t.order(key, ascending);
                }
            }
            for (sub_name, sub) in sub_aggs {
                t = t.sub_aggregation(sub_name, sub);
            }
            return Ok(Arc::new(t.meta(meta)));
        }

        if let Some(dh) = &agg.date_histogram {
            let mut h = match (&dh.calendar_interval, &dh.fixed_interval) {
                (Some(interval), _) => {
                    DateHistogramAggregation::calendar(dh.field.as_str(), interval.as_str())
                }
                (None, Some(interval)) => {
                    DateHistogramAggregation::fixed(dh.field.as_str(), interval.as_str())
                }
                (None, None) => {
                    return Err(DslError::MissingField(format!(
                        "{}.date_histogram.calendar_interval",
                        name
                    )))
                }
            };
            if let Some(format) = &dh.format {
                h = h.format(format.as_str());
            }
            if let Some(tz) = &dh.time_zone {
                h = h.time_zone(tz.as_str());
            }
            if let Some(count) = dh.min_doc_count {
                h = h.min_doc_count(count);
            }
            for (sub_name, sub) in sub_aggs {
                h = h.sub_aggregation(sub_name, sub);
            }
            return Ok(Arc::new(h.meta(meta)));
        }

        if let Some(filter_query) = &agg.filter {
            let mut f = FilterAggregation::new(Self::translate_query(filter_query)?);
            for (sub_name, sub) in sub_aggs {
                f = f.sub_aggregation(sub_name, sub);
            }
            return Ok(Arc::new(f.meta(meta)));
        }

        if let Some(filters) = &agg.filters {
            return Self::translate_filters(filters, sub_aggs, meta);
        }

        Err(DslError::UnsupportedAggregation(format!(
            "Aggregation '{}' has no recognized type",
            name
        )))
    }

    fn translate_filters(
        def: &FiltersDefinition,
        sub_aggs: Vec<(String, Arc<dyn Aggregation>)>,
        meta: Map<String, Value>,
    ) -> Result<Arc<dyn Aggregation>> {
        match &def.filters {
            FiltersList::Anonymous(queries) => {
                let translated = queries
                    .iter()
                    .map(Self::translate_query)
                    .collect::<Result<Vec<_>>>()?;
                let mut agg = FiltersAggregation::new().filters(translated);
                if let Some(enabled) = def.other_bucket {
                    agg = agg.other_bucket(enabled);
                }
                if let Some(key) = &def.other_bucket_key {
                    agg = agg.other_bucket_key(key.as_str());
                }
                for (sub_name, sub) in sub_aggs {
                    agg = agg.sub_aggregation(sub_name, sub);
                }
                Ok(Arc::new(agg.meta(meta)))
            }
            FiltersList::Keyed(queries) => {
                let mut agg = KeyedFiltersAggregation::new();
                for (bucket, query) in queries {
                    agg = agg.filter(bucket.as_str(), Self::translate_query(query)?);
                }
                if let Some(enabled) = def.other_bucket {
                    agg = agg.other_bucket(enabled);
                }
                if let Some(key) = &def.other_bucket_key {
                    agg = agg.other_bucket_key(key.as_str());
                }
                for (sub_name, sub) in sub_aggs {
                    agg = agg.sub_aggregation(sub_name, sub);
                }
                Ok(Arc::new(agg.meta(meta)))
            }
        }
    }
}

/// Field-keyed queries must name exactly one field
fn single_field<'a, T>(kind: &str, fields: &'a BTreeMap<String, T>) -> Result<(&'a str, &'a T)> {
    let mut iter = fields.iter();
    match (iter.next(), iter.next()) {
        (Some((field, params)), None) => Ok((field.as_str(), params)),
        _ => Err(DslError::InvalidQuery(format!(
            "{} query must name exactly one field, got {}",
            kind,
            fields.len()
        ))),
    }
}

fn declared_types(agg: &AggregationDefinition) -> Vec<&'static str> {
    let candidates = [
        ("avg", agg.avg.is_some()),
        ("sum", agg.sum.is_some()),
        ("min", agg.min.is_some()),
        ("max", agg.max.is_some()),
        ("stats", agg.stats.is_some()),
        ("value_count", agg.value_count.is_some()),
        ("cardinality", agg.cardinality.is_some()),
        ("terms", agg.terms.is_some()),
        ("date_histogram", agg.date_histogram.is_some()),
        ("filter", agg.filter.is_some()),
        ("filters", agg.filters.is_some()),
    ];
    candidates
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| name)
        .collect()
}

fn metric_of(agg: &AggregationDefinition) -> Option<(MetricKind, &FieldDefinition)> {
    [
        (MetricKind::Avg, &agg.avg),
        (MetricKind::Sum, &agg.sum),
        (MetricKind::Min, &agg.min),
        (MetricKind::Max, &agg.max),
        (MetricKind::Stats, &agg.stats),
        (MetricKind::ValueCount, &agg.value_count),
        (MetricKind::Cardinality, &agg.cardinality),
    ]
    .into_iter()
    .find_map(|(kind, field)| field.as_ref().map(|f| (kind, f)))
}

/// Sort criteria as `(key, ascending)`, in precedence order
fn order_criteria<'a>(name: &str, order: &'a TermsOrder) -> Result<Vec<(&'a str, bool)>> {
    order
        .criteria()
        .iter()
        .map(|criterion| {
            let mut entries = criterion.iter();
            let (key, direction) = match (entries.next(), entries.next()) {
                (Some(entry), None) => entry,
                _ => {
                    return Err(DslError::InvalidQuery(format!(
                        "terms aggregation '{}': each order criterion must have exactly one key, \
                         use a list for multiple criteria",
                        name
                    )))
                }
            };
            let ascending = if direction.eq_ignore_ascii_case("asc") {
                true
            } else if direction.eq_ignore_ascii_case("desc") {
                false
            } else {
                return Err(DslError::InvalidQuery(format!(
                    "terms aggregation '{}': order direction for '{}' must be 'asc' or 'desc', \
                     got '{}'",
                    name, key, direction
                )));
            };
            Ok((key.as_str(), ascending))
        })
        .collect()
}
