use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::error::{GazetteerError, GazetteerResult};
use super::model::{GazetteerRecord, SearchHit};
use super::query::{candidate_query, index_definition};
use crate::config::Config;
use crate::constants::QueryWeights;

#[derive(Clone)]
/// Gazetteer index backed by an Elasticsearch cluster.
pub struct ElasticsearchIndex {
    client: reqwest::Client,
    base_url: String,
    index_name: String,
    weights: QueryWeights,
}

impl std::fmt::Debug for ElasticsearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchIndex")
            .field("base_url", &self.base_url)
            .field("index_name", &self.index_name)
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_score")]
    score: Option<f32>,
    #[serde(rename = "_source")]
    source: GazetteerRecord,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    found: bool,
    #[serde(rename = "_source")]
    source: Option<GazetteerRecord>,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    errors: bool,
    items: Vec<BulkItem>,
}

#[derive(Debug, Deserialize)]
struct BulkItem {
    index: BulkItemStatus,
}

#[derive(Debug, Deserialize)]
struct BulkItemStatus {
    status: u16,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Per-request `_bulk` result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub indexed: usize,
    pub failed: usize,
}

impl ElasticsearchIndex {
    /// Creates a client for `base_url` / `index_name`.
    pub fn new(base_url: &str, index_name: &str, timeout: Duration) -> GazetteerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GazetteerError::ConnectionFailed {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            index_name: index_name.to_string(),
            weights: QueryWeights::default(),
        })
    }

    pub fn from_config(config: &Config) -> GazetteerResult<Self> {
        Self::new(&config.es_url, &config.index_name, config.request_timeout)
    }

    /// Overrides the relevance weights. Weights that break the ranking invariants are rejected.
    pub fn with_weights(mut self, weights: QueryWeights) -> GazetteerResult<Self> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    pub fn weights(&self) -> &QueryWeights {
        &self.weights
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index_name)
    }

    fn connection_error(&self, e: reqwest::Error) -> GazetteerError {
        GazetteerError::ConnectionFailed {
            url: self.base_url.clone(),
            message: e.to_string(),
        }
    }

    fn decode_error(&self, e: impl std::fmt::Display) -> GazetteerError {
        GazetteerError::InvalidResponse {
            index: self.index_name.clone(),
            message: e.to_string(),
        }
    }

    async fn query_failed(&self, response: reqwest::Response) -> GazetteerError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        GazetteerError::QueryFailed {
            index: self.index_name.clone(),
            status,
            message,
        }
    }

    /// Performs a basic cluster ping.
    pub async fn health_check(&self) -> GazetteerResult<()> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !response.status().is_success() {
            return Err(self.query_failed(response).await);
        }
        Ok(())
    }

    /// Deletes the index if present, then recreates it with the gazetteer mapping.
    #[instrument(skip(self), fields(index = %self.index_name))]
    pub async fn create_index(&self) -> GazetteerResult<()> {
        let url = self.index_url();
        let create_failed = |message: String| GazetteerError::CreateIndexFailed {
            index: self.index_name.clone(),
            message,
        };

        let exists = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if exists.status().is_success() {
            debug!("Deleting existing index");
            let deleted = self
                .client
                .delete(&url)
                .send()
                .await
                .map_err(|e| self.connection_error(e))?;
            if !deleted.status().is_success() {
                return Err(create_failed(deleted.text().await.unwrap_or_default()));
            }
        }

        let created = self
            .client
            .put(&url)
            .json(&index_definition())
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !created.status().is_success() {
            return Err(create_failed(created.text().await.unwrap_or_default()));
        }

        debug!("Index created");
        Ok(())
    }

    /// Runs the relevance query; hits come back ordered by combined score.
    #[instrument(skip(self), fields(index = %self.index_name))]
    pub async fn search(&self, query: &str, limit: usize) -> GazetteerResult<Vec<SearchHit>> {
        let body = candidate_query(query, limit, &self.weights);

        let response = self
            .client
            .post(format!("{}/_search", self.index_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !response.status().is_success() {
            return Err(self.query_failed(response).await);
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| self.decode_error(e))?;

        let hits: Vec<SearchHit> = parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| SearchHit {
                record: hit.source,
                score: hit.score.unwrap_or(0.0),
            })
            .collect();

        debug!(hits = hits.len(), "Gazetteer search complete");
        Ok(hits)
    }

    /// Fetches one record by GeoNames id; a 404 is `Ok(None)`.
    pub async fn by_id(&self, id: u64) -> GazetteerResult<Option<GazetteerRecord>> {
        let response = self
            .client
            .get(format!("{}/_doc/{}", self.index_url(), id))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.query_failed(response).await);
        }

        let parsed: GetResponse = response.json().await.map_err(|e| self.decode_error(e))?;
        Ok(parsed.found.then_some(parsed.source).flatten())
    }

    /// Sends one `_bulk` request for `records`.
    pub async fn bulk_index(&self, records: &[GazetteerRecord]) -> GazetteerResult<BulkOutcome> {
        if records.is_empty() {
            return Ok(BulkOutcome::default());
        }

        let mut body = String::new();
        for record in records {
            let action = json!({ "index": { "_index": self.index_name, "_id": record.id.to_string() } });
            let mut doc = serde_json::to_value(record).map_err(|e| self.decode_error(e))?;
            if let Some(map) = doc.as_object_mut() {
                map.insert("location".to_string(), json!([record.longitude, record.latitude]));
            }
            body.push_str(&action.to_string());
            body.push('\n');
            body.push_str(&doc.to_string());
            body.push('\n');
        }

        let response = self
            .client
            .post(format!("{}/_bulk", self.base_url))
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GazetteerError::BulkFailed {
                index: self.index_name.clone(),
                message,
            });
        }

        let parsed: BulkResponse = response.json().await.map_err(|e| self.decode_error(e))?;

        let failed = parsed
            .items
            .iter()
            .filter(|item| item.index.status >= 300)
            .inspect(|item| {
                warn!(status = item.index.status, error = ?item.index.error, "Bulk item rejected");
            })
            .count();

        if parsed.errors && failed == 0 {
            warn!("Bulk response flagged errors without failed items");
        }

        Ok(BulkOutcome {
            indexed: parsed.items.len() - failed,
            failed,
        })
    }
}

/// Read side of the gazetteer, as consumed by the candidate generator.
pub trait GazetteerIndex: Send + Sync {
    /// Returns up to `limit` hits for the normalized `query`, best first.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = GazetteerResult<Vec<SearchHit>>> + Send;

    /// Looks up a single record by id.
    fn by_id(
        &self,
        id: u64,
    ) -> impl std::future::Future<Output = GazetteerResult<Option<GazetteerRecord>>> + Send;
}

/// Write side used by ingestion.
pub trait GazetteerWriter: Send + Sync {
    fn bulk_index(
        &self,
        records: &[GazetteerRecord],
    ) -> impl std::future::Future<Output = GazetteerResult<BulkOutcome>> + Send;
}

impl GazetteerIndex for ElasticsearchIndex {
    async fn search(&self, query: &str, limit: usize) -> GazetteerResult<Vec<SearchHit>> {
        self.search(query, limit).await
    }

    async fn by_id(&self, id: u64) -> GazetteerResult<Option<GazetteerRecord>> {
        self.by_id(id).await
    }
}

impl GazetteerWriter for ElasticsearchIndex {
    async fn bulk_index(&self, records: &[GazetteerRecord]) -> GazetteerResult<BulkOutcome> {
        self.bulk_index(records).await
    }
}
