use std::collections::BTreeMap;
use std::sync::RwLock;

use strsim::jaro_winkler;

use crate::constants::{BOOSTED_FEATURE_CLASSES, COUNTRY_ADMIN1_CODE, QueryWeights};
use crate::gazetteer::{
    BulkOutcome, GazetteerError, GazetteerIndex, GazetteerRecord, GazetteerResult,
    GazetteerWriter, SearchHit, normalize_query,
};

/// Similarity below which a non-exact name is not a hit.
pub const MOCK_FUZZY_THRESHOLD: f64 = 0.85;

const MOCK_INDEX_NAME: &str = "mock_geonames";

/// In-memory gazetteer that ranks with the same weights as the real query.
#[derive(Default)]
pub struct MockGazetteerIndex {
    records: RwLock<BTreeMap<u64, GazetteerRecord>>,
    outage: RwLock<Option<String>>,
    weights: QueryWeights,
}

impl MockGazetteerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = GazetteerRecord>) -> Self {
        let index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    pub fn insert(&self, record: GazetteerRecord) {
        self.records
            .write()
            .expect("lock poisoned")
            .insert(record.id, record);
    }

    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes every subsequent call fail with `ConnectionFailed`.
    pub fn set_unavailable(&self, message: &str) {
        *self.outage.write().expect("lock poisoned") = Some(message.to_string());
    }

    pub fn set_available(&self) {
        *self.outage.write().expect("lock poisoned") = None;
    }

    fn check_available(&self) -> GazetteerResult<()> {
        match self.outage.read().expect("lock poisoned").as_ref() {
            Some(message) => Err(GazetteerError::ConnectionFailed {
                url: format!("mock://{}", MOCK_INDEX_NAME),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn score(&self, record: &GazetteerRecord, query: &str) -> Option<f32> {
        let name = record.name.to_lowercase();
        let mut exact = name == query;
        let mut fuzzy = jaro_winkler(query, &name);

        for alt in &record.alternate_names {
            let alt = alt.to_lowercase();
            exact |= alt == query;
            fuzzy = fuzzy.max(jaro_winkler(query, &alt));
        }

        if !exact && fuzzy < MOCK_FUZZY_THRESHOLD {
            return None;
        }

        let text_score = fuzzy as f32 + if exact { self.weights.exact_match } else { 0.0 };

        let mut function_score = QueryWeights::population_factor(record.population.unwrap_or(0));
        if record.admin1_code.as_deref() == Some(COUNTRY_ADMIN1_CODE) {
            function_score += self.weights.country;
        }
        if BOOSTED_FEATURE_CLASSES.contains(&record.feature_class.as_str()) {
            function_score += self.weights.feature_class;
        }

        Some(text_score * function_score)
    }
}

impl GazetteerIndex for MockGazetteerIndex {
    async fn search(&self, query: &str, limit: usize) -> GazetteerResult<Vec<SearchHit>> {
        self.check_available()?;
        let query = normalize_query(query);

        let records = self.records.read().map_err(|_| GazetteerError::QueryFailed {
            index: MOCK_INDEX_NAME.to_string(),
            status: 500,
            message: "lock poisoned".to_string(),
        })?;

        let mut hits: Vec<SearchHit> = records
            .values()
            .filter_map(|record| {
                self.score(record, &query).map(|score| SearchHit {
                    record: record.clone(),
                    score,
                })
            })
            .collect();

        // BTreeMap iteration is id-ordered, so a stable sort keeps ties deterministic.
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);
        Ok(hits)
    }

    async fn by_id(&self, id: u64) -> GazetteerResult<Option<GazetteerRecord>> {
        self.check_available()?;
        Ok(self.records.read().expect("lock poisoned").get(&id).cloned())
    }
}

impl GazetteerWriter for MockGazetteerIndex {
    async fn bulk_index(&self, records: &[GazetteerRecord]) -> GazetteerResult<BulkOutcome> {
        self.check_available()?;
        for record in records {
            self.insert(record.clone());
        }
        Ok(BulkOutcome {
            indexed: records.len(),
            failed: 0,
        })
    }
}
