use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::COUNTRY_ADMIN1_CODE;

/// One GeoNames row as stored in the gazetteer index.
///
/// Field names follow the dump's column names so documents written by
/// [`bulk_index`](super::ElasticsearchIndex::bulk_index) round-trip through `_source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerRecord {
    #[serde(rename = "geonameid")]
    pub id: u64,
    pub name: String,
    #[serde(rename = "asciiname", default)]
    pub ascii_name: String,
    #[serde(rename = "alternatenames", default)]
    pub alternate_names: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub feature_class: String,
    #[serde(default)]
    pub feature_code: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub country_code: Option<String>,
    #[serde(rename = "cc2", default)]
    pub secondary_country_codes: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub admin1_code: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub admin2_code: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub admin3_code: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub admin4_code: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub elevation: Option<i32>,
    #[serde(default)]
    pub dem: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub modification_date: Option<String>,
}

/// Treats `""` the same as a missing value.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// A gazetteer row interpreted as a possible referent for one entity.
///
/// Built once by the candidate generator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub id: u64,
    pub name: String,
    pub ascii_name: String,
    pub alternate_names: BTreeSet<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub feature_class: String,
    pub feature_code: String,
    pub country_code: Option<String>,
    pub admin1_code: Option<String>,
    pub admin2_code: Option<String>,
    pub admin3_code: Option<String>,
    pub admin4_code: Option<String>,
    pub population: u64,
    pub elevation: Option<i32>,
    pub timezone: Option<String>,
    /// Query equals the primary name (case-insensitive).
    pub name_match: bool,
    /// Query equals one of the alternate names (case-insensitive).
    pub alternate_name_match: bool,
    /// `name_match || alternate_name_match`.
    pub exact_match: bool,
    pub relevance_score: f32,
}

impl LocationCandidate {
    /// Materializes a candidate, computing the match flags against `query`
    /// rather than trusting the index.
    pub fn from_record(record: GazetteerRecord, query: &str, relevance_score: f32) -> Self {
        let query = normalize_query(query);
        let name_match = !query.is_empty() && record.name.to_lowercase() == query;
        let alternate_name_match = !query.is_empty()
            && record
                .alternate_names
                .iter()
                .any(|alt| alt.to_lowercase() == query);

        Self {
            id: record.id,
            name: record.name,
            ascii_name: record.ascii_name,
            alternate_names: record.alternate_names.into_iter().collect(),
            latitude: record.latitude,
            longitude: record.longitude,
            feature_class: record.feature_class,
            feature_code: record.feature_code,
            country_code: record.country_code,
            admin1_code: record.admin1_code,
            admin2_code: record.admin2_code,
            admin3_code: record.admin3_code,
            admin4_code: record.admin4_code,
            population: record.population.unwrap_or(0),
            elevation: record.elevation,
            timezone: record.timezone,
            name_match,
            alternate_name_match,
            exact_match: name_match || alternate_name_match,
            relevance_score,
        }
    }

    pub fn is_populated(&self) -> bool {
        self.population > 0
    }

    pub fn is_city(&self) -> bool {
        self.is_populated() && self.feature_class == "P"
    }

    pub fn is_country(&self) -> bool {
        self.is_populated() && self.admin1_code.as_deref() == Some(COUNTRY_ADMIN1_CODE)
    }

    pub fn is_admin1(&self) -> bool {
        self.feature_code == "ADM1"
    }

    pub fn is_admin_region(&self) -> bool {
        self.is_populated() && self.feature_class == "A"
    }

    /// Continents, regions and other supranational areas.
    pub fn is_large_area(&self) -> bool {
        self.feature_class == "L"
    }

    /// Mountains, peninsulas, subcontinents.
    pub fn is_large_territory(&self) -> bool {
        self.feature_class == "T"
    }

    /// The record's own name equals its admin1 code.
    pub fn exact_match_to_admin1_code(&self) -> bool {
        self.admin1_code
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case(&self.name))
    }

    pub fn in_country(&self, country_code: &str) -> bool {
        self.country_code.as_deref() == Some(country_code)
    }
}

/// Trims and lower-cases entity text the way every index query sees it.
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One scored row returned by a gazetteer search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub record: GazetteerRecord,
    pub score: f32,
}
