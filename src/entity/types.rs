use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EntityError;

/// Geographic entity categories passed into resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    CountryOrRegion,
    NationalityOrGroup,
    Location,
}

impl EntityType {
    /// Maps an NER label to a geographic type; other labels are not geographic.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "GPE" => Some(Self::CountryOrRegion),
            "NORP" => Some(Self::NationalityOrGroup),
            "LOC" => Some(Self::Location),
            _ => None,
        }
    }
}

/// A typed span as returned by the NER provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub label: String,
    pub start_char: usize,
    pub end_char: usize,
}

/// A place-name mention to be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoEntity {
    /// Search text; replaced by the canonical form on alias substitution.
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub start_char: usize,
    pub end_char: usize,
    /// The text as extracted, present only after substitution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl GeoEntity {
    pub fn new(text: &str, entity_type: EntityType, start_char: usize, end_char: usize) -> Self {
        Self {
            text: text.to_string(),
            entity_type,
            start_char,
            end_char,
            original_text: None,
        }
    }

    /// Returns `None` for non-geographic labels.
    pub fn from_named(entity: &NamedEntity) -> Option<Self> {
        EntityType::from_label(&entity.label).map(|entity_type| {
            Self::new(&entity.text, entity_type, entity.start_char, entity.end_char)
        })
    }

    /// Replaces the search text, keeping the first original.
    pub fn substitute(&mut self, canonical: &str) {
        if self.original_text.is_none() {
            self.original_text = Some(std::mem::take(&mut self.text));
        }
        self.text = canonical.to_string();
    }

    pub fn is_substituted(&self) -> bool {
        self.original_text.is_some()
    }
}

/// Languages the NER provider supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }
}

impl FromStr for Language {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::English),
            "es" => Ok(Self::Spanish),
            _ => Err(EntityError::UnknownLanguage {
                code: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
