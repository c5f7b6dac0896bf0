use std::collections::HashMap;
use std::sync::Arc;

use super::*;
use crate::alias::AliasTable;
use crate::candidates::CandidateGenerator;
use crate::content::{ContentError, MockContentExtractor};
use crate::entity::{EntityError, EntityType, MockEntityExtractor};
use crate::gazetteer::{GazetteerRecord, MockGazetteerIndex};

const ARTICLE_URL: &str = "https://news.example.org/france";

fn record(id: u64, name: &str, class: &str, country: &str, admin1: &str, population: u64) -> GazetteerRecord {
    GazetteerRecord {
        id,
        name: name.to_string(),
        ascii_name: name.to_string(),
        alternate_names: vec![],
        latitude: 0.0,
        longitude: 0.0,
        feature_class: class.to_string(),
        feature_code: String::new(),
        country_code: Some(country.to_string()),
        secondary_country_codes: vec![],
        admin1_code: Some(admin1.to_string()),
        admin2_code: None,
        admin3_code: None,
        admin4_code: None,
        population: Some(population),
        elevation: None,
        dem: None,
        timezone: None,
        modification_date: None,
    }
}

fn article_text() -> String {
    let mut text = String::from("The French delegation arrived in Paris on Monday. ");
    while text.chars().count() <= 200 {
        text.push_str("Talks continued late into the evening. ");
    }
    text
}

fn geoparser() -> Geoparser<MockGazetteerIndex, MockEntityExtractor, MockContentExtractor> {
    let index = MockGazetteerIndex::with_records([
        record(3017382, "France", "A", "FR", "00", 66_987_244),
        record(2988507, "Paris", "P", "FR", "11", 2_138_551),
        record(4717560, "Paris", "P", "US", "TX", 24_171),
    ]);
    let aliases = AliasTable::from_maps(
        HashMap::new(),
        HashMap::from([("french".to_string(), "France".to_string())]),
    );
    let resolver = Resolver::new(CandidateGenerator::new(index), Arc::new(aliases));

    let entities = MockEntityExtractor::new()
        .with_terms([("French", "NORP"), ("Paris", "GPE"), ("Monday", "DATE")])
        .with_languages(&[Language::English]);
    let content = MockContentExtractor::new()
        .with_article(ARTICLE_URL, &article_text())
        .with_article("https://news.example.org/stub", "Too short.");

    Geoparser::new(resolver, entities, content)
}

#[tokio::test]
async fn test_locations_from_text() {
    let result = geoparser()
        .locations_from_text(&article_text(), "en")
        .await
        .unwrap();

    assert_eq!(result.language, Language::English);
    assert_eq!(
        result.entities.iter().map(|e| (e.text.as_str(), e.entity_type)).collect::<Vec<_>>(),
        vec![("French", EntityType::NationalityOrGroup), ("Paris", EntityType::CountryOrRegion)]
    );
    assert_eq!(
        result.locations.iter().map(|l| l.id()).collect::<Vec<_>>(),
        vec![3017382, 2988507]
    );
}

#[tokio::test]
async fn test_locations_from_text_unknown_language() {
    let err = geoparser().locations_from_text("Hola", "xx").await.unwrap_err();

    assert!(matches!(err, GeoparseError::Entity(EntityError::UnknownLanguage { .. })));
}

#[tokio::test]
async fn test_locations_from_url() {
    let result = geoparser().locations_from_url(ARTICLE_URL, "en").await.unwrap();

    assert_eq!(result.article.url, ARTICLE_URL);
    assert_eq!(result.result.locations.len(), 2);
}

#[tokio::test]
async fn test_locations_from_url_too_short() {
    let err = geoparser()
        .locations_from_url("https://news.example.org/stub", "en")
        .await
        .unwrap_err();

    assert!(matches!(err, GeoparseError::Content(ContentError::TooShort { .. })));
}

#[tokio::test]
async fn test_locations_from_url_checks_language_first() {
    let err = geoparser()
        .locations_from_url("https://news.example.org/missing", "de")
        .await
        .unwrap_err();

    assert!(matches!(err, GeoparseError::Entity(EntityError::UnknownLanguage { .. })));
}
