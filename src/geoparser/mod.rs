//! Text and URL in, resolved locations out.
//!
//! [`Geoparser`] wires the content extractor, the NER provider and the
//! [`Resolver`](crate::resolution::Resolver) together. The language code is
//! parsed before any network call, so an unsupported code fails fast with
//! [`EntityError::UnknownLanguage`](crate::entity::EntityError::UnknownLanguage).

pub mod error;

#[cfg(test)]
mod tests;

use serde::Serialize;
use tracing::{info, instrument};

use crate::content::{ArticleContent, ContentExtractor};
use crate::entity::{EntityExtractor, GeoEntity, Language, geo_entities};
use crate::gazetteer::GazetteerIndex;
use crate::resolution::{ResolvedLocation, Resolver};

pub use error::{GeoparseError, GeoparseResult};

/// Entities found in a text and the locations they resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLocations {
    pub language: Language,
    pub entities: Vec<GeoEntity>,
    pub locations: Vec<ResolvedLocation>,
}

/// [`TextLocations`] for a fetched article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlLocations {
    pub article: ArticleContent,
    #[serde(flatten)]
    pub result: TextLocations,
}

pub struct Geoparser<G: GazetteerIndex, E: EntityExtractor, C: ContentExtractor> {
    resolver: Resolver<G>,
    entities: E,
    content: C,
}

impl<G, E, C> std::fmt::Debug for Geoparser<G, E, C>
where
    G: GazetteerIndex,
    E: EntityExtractor,
    C: ContentExtractor,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geoparser")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl<G, E, C> Geoparser<G, E, C>
where
    G: GazetteerIndex,
    E: EntityExtractor,
    C: ContentExtractor,
{
    pub fn new(resolver: Resolver<G>, entities: E, content: C) -> Self {
        Self {
            resolver,
            entities,
            content,
        }
    }

    pub fn resolver(&self) -> &Resolver<G> {
        &self.resolver
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn locations_from_text(
        &self,
        text: &str,
        language: &str,
    ) -> GeoparseResult<TextLocations> {
        let language: Language = language.parse()?;

        let named = self.entities.extract(text, language).await?;
        let entities = geo_entities(&named);
        let locations = self.resolver.resolve(entities.clone()).await?;

        info!(
            named = named.len(),
            geographic = entities.len(),
            locations = locations.len(),
            "Text geoparsed"
        );
        Ok(TextLocations {
            language,
            entities,
            locations,
        })
    }

    #[instrument(skip(self))]
    pub async fn locations_from_url(&self, url: &str, language: &str) -> GeoparseResult<UrlLocations> {
        // Fail on the language before fetching anything.
        language.parse::<Language>()?;

        let article = self.content.fetch(url).await?;
        let result = self.locations_from_text(&article.text, language).await?;
        Ok(UrlLocations { article, result })
    }
}
