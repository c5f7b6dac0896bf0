//! Elasticsearch request bodies for the gazetteer index.

use serde_json::{Value, json};

use crate::constants::{BOOSTED_FEATURE_CLASSES, COUNTRY_ADMIN1_CODE, QueryWeights};

/// Builds the candidate relevance query.
///
/// Fuzzy name match, plus an exact-name/alternate-name boost, scaled by
/// `log1p(population)` with additive boosts for country records and
/// populated places / administrative areas. `query` must already be
/// normalized.
pub fn candidate_query(query: &str, limit: usize, weights: &QueryWeights) -> Value {
    json!({
        "size": limit,
        "query": {
            "function_score": {
                "query": {
                    "bool": {
                        "should": [
                            { "match": { "name": { "query": query, "fuzziness": "AUTO" } } },
                            { "term": { "name.raw": { "value": query, "boost": weights.exact_match } } },
                            { "term": { "alternatenames.raw": { "value": query, "boost": weights.exact_match } } }
                        ],
                        "minimum_should_match": 1
                    }
                },
                "functions": [
                    {
                        "field_value_factor": {
                            "field": "population",
                            "modifier": "log1p",
                            "missing": 0
                        }
                    },
                    {
                        "filter": { "term": { "admin1_code": COUNTRY_ADMIN1_CODE } },
                        "weight": weights.country
                    },
                    {
                        "filter": { "terms": { "feature_class": BOOSTED_FEATURE_CLASSES } },
                        "weight": weights.feature_class
                    }
                ],
                "score_mode": "sum",
                "boost_mode": "multiply"
            }
        }
    })
}

/// Index settings and mappings used at ingestion time.
///
/// The `raw` keyword sub-fields use a lowercase normalizer so the exact-match
/// terms in [`candidate_query`] are case-insensitive.
pub fn index_definition() -> Value {
    let keyword = json!({ "type": "keyword" });
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 0,
            "analysis": {
                "normalizer": {
                    "lowercase": { "type": "custom", "filter": ["lowercase"] }
                }
            }
        },
        "mappings": {
            "properties": {
                "geonameid": keyword,
                "name": {
                    "type": "text",
                    "fields": { "raw": { "type": "keyword", "normalizer": "lowercase" } }
                },
                "asciiname": { "type": "text" },
                "alternatenames": {
                    "type": "text",
                    "fields": { "raw": { "type": "keyword", "normalizer": "lowercase" } }
                },
                "latitude": { "type": "float" },
                "longitude": { "type": "float" },
                "location": { "type": "geo_point" },
                "feature_class": keyword,
                "feature_code": keyword,
                "country_code": keyword,
                "cc2": keyword,
                "admin1_code": keyword,
                "admin2_code": keyword,
                "admin3_code": keyword,
                "admin4_code": keyword,
                "population": { "type": "long" },
                "elevation": { "type": "integer" },
                "dem": { "type": "integer" },
                "timezone": keyword,
                "modification_date": { "type": "date", "format": "yyyy-MM-dd" }
            }
        }
    })
}
