use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::{ContentError, ContentResult};
use crate::constants::MIN_CONTENT_LENGTH;

/// Boilerplate-stripped article as returned by the content extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub url: String,
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
}

impl ArticleContent {
    /// Fails with [`ContentError::TooShort`] unless the text is long enough to be an article.
    pub fn ensure_substantial(self) -> ContentResult<Self> {
        let length = self.text.chars().count();
        if length <= MIN_CONTENT_LENGTH {
            return Err(ContentError::TooShort {
                url: self.url,
                length,
                minimum: MIN_CONTENT_LENGTH,
            });
        }
        Ok(self)
    }
}

/// Content extraction boundary.
pub trait ContentExtractor: Send + Sync {
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = ContentResult<ArticleContent>> + Send;
}

/// Client for a service exposing `POST /content/from-url`.
#[derive(Debug, Clone)]
pub struct HttpContentExtractor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentExtractor {
    pub fn new(base_url: &str, timeout: Duration) -> ContentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ContentError::ConnectionFailed {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> ContentResult<ArticleContent> {
        let endpoint = format!("{}/content/from-url", self.base_url);

        let response = self
            .client
            .post(&endpoint)
            .form(&[("url", url)])
            .send()
            .await
            .map_err(|e| ContentError::ConnectionFailed {
                url: endpoint.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ContentError::ExtractionFailed {
                url: url.to_string(),
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let content: ArticleContent =
            response
                .json()
                .await
                .map_err(|e| ContentError::InvalidResponse {
                    message: e.to_string(),
                })?;

        debug!(text_len = content.text.len(), "Content extracted");
        content.ensure_substantial()
    }
}

impl ContentExtractor for HttpContentExtractor {
    async fn fetch(&self, url: &str) -> ContentResult<ArticleContent> {
        self.fetch(url).await
    }
}

/// Serves canned articles keyed by URL.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MockContentExtractor {
    articles: std::collections::HashMap<String, ArticleContent>,
}

#[cfg(any(test, feature = "mock"))]
impl MockContentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_article(mut self, url: &str, text: &str) -> Self {
        self.articles.insert(
            url.to_string(),
            ArticleContent {
                url: url.to_string(),
                text: text.to_string(),
                title: None,
                publish_date: None,
                authors: None,
            },
        );
        self
    }
}

#[cfg(any(test, feature = "mock"))]
impl ContentExtractor for MockContentExtractor {
    async fn fetch(&self, url: &str) -> ContentResult<ArticleContent> {
        match self.articles.get(url) {
            Some(article) => article.clone().ensure_substantial(),
            None => Err(ContentError::ExtractionFailed {
                url: url.to_string(),
                status: 404,
                message: "not found".to_string(),
            }),
        }
    }
}
