use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use super::error::{EntityError, EntityResult};
use super::types::{Language, NamedEntity};

/// NER provider boundary.
pub trait EntityExtractor: Send + Sync {
    /// Returns every typed span found in `text`.
    fn extract(
        &self,
        text: &str,
        language: Language,
    ) -> impl std::future::Future<Output = EntityResult<Vec<NamedEntity>>> + Send;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NerResponse {
    Bare(Vec<NamedEntity>),
    Wrapped { results: Vec<NamedEntity> },
}

impl NerResponse {
    fn into_entities(self) -> Vec<NamedEntity> {
        match self {
            NerResponse::Bare(entities) | NerResponse::Wrapped { results: entities } => entities,
        }
    }
}

/// Client for an NER service exposing `POST /entities/from-content`.
#[derive(Debug, Clone)]
pub struct HttpEntityExtractor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEntityExtractor {
    pub fn new(base_url: &str, timeout: Duration) -> EntityResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EntityError::ConnectionFailed {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    pub async fn extract(&self, text: &str, language: Language) -> EntityResult<Vec<NamedEntity>> {
        let url = format!("{}/entities/from-content", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("text", text), ("language", language.code())])
            .send()
            .await
            .map_err(|e| EntityError::ConnectionFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(EntityError::ProviderFailed {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: NerResponse =
            response
                .json()
                .await
                .map_err(|e| EntityError::InvalidResponse {
                    message: e.to_string(),
                })?;

        let entities = parsed.into_entities();
        debug!(entities = entities.len(), "NER complete");
        Ok(entities)
    }
}

impl EntityExtractor for HttpEntityExtractor {
    async fn extract(&self, text: &str, language: Language) -> EntityResult<Vec<NamedEntity>> {
        self.extract(text, language).await
    }
}

/// Dictionary-driven extractor: tags every occurrence of a known term.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default, Clone)]
pub struct MockEntityExtractor {
    terms: Vec<(String, String)>,
    languages: Option<Vec<Language>>,
}

#[cfg(any(test, feature = "mock"))]
impl MockEntityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `(surface form, label)` pairs.
    pub fn with_terms<'a>(mut self, terms: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.terms
            .extend(terms.into_iter().map(|(t, l)| (t.to_string(), l.to_string())));
        self
    }

    /// Restricts the languages the mock accepts.
    pub fn with_languages(mut self, languages: &[Language]) -> Self {
        self.languages = Some(languages.to_vec());
        self
    }
}

#[cfg(any(test, feature = "mock"))]
impl EntityExtractor for MockEntityExtractor {
    async fn extract(&self, text: &str, language: Language) -> EntityResult<Vec<NamedEntity>> {
        if let Some(languages) = &self.languages
            && !languages.contains(&language)
        {
            return Err(EntityError::UnknownLanguage {
                code: language.code().to_string(),
            });
        }

        let mut found: Vec<NamedEntity> = self
            .terms
            .iter()
            .flat_map(|(term, label)| {
                text.match_indices(term.as_str()).map(move |(byte_start, matched)| {
                    let start_char = text[..byte_start].chars().count();
                    NamedEntity {
                        text: matched.to_string(),
                        label: label.clone(),
                        start_char,
                        end_char: start_char + matched.chars().count(),
                    }
                })
            })
            .collect();

        found.sort_by_key(|e| (e.start_char, std::cmp::Reverse(e.end_char)));
        Ok(found)
    }
}
