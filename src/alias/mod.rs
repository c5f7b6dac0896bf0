//! Alias normalization: maps colloquial names and demonyms to canonical gazetteer names.
//!
//! Two tables feed one map. Demonyms (`Russian` → `Russian Federation`) come from a
//! country/adjective/demonym list; curated substitutions (`UK` → `United Kingdom of Great
//! Britain and Northern Ireland`) are hand-maintained and win on key collision.

pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::config::Config;
use crate::entity::GeoEntity;

pub use error::{AliasError, AliasResult};
pub use loader::{load_demonyms, load_substitutions, normalize_key, read_demonyms, read_substitutions};

static GLOBAL: OnceCell<Arc<AliasTable>> = OnceCell::new();

/// Case-insensitive lookup from alias to canonical name. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Merges both maps; keys are normalized and `substitutions` take precedence.
    pub fn from_maps(
        substitutions: HashMap<String, String>,
        demonyms: HashMap<String, String>,
    ) -> Self {
        let mut entries: HashMap<String, String> = demonyms
            .into_iter()
            .map(|(k, v)| (normalize_key(&k), v))
            .collect();

        for (key, canonical) in substitutions {
            entries.insert(normalize_key(&key), canonical);
        }

        Self { entries }
    }

    pub fn load(substitutions_path: &Path, demonyms_path: &Path) -> AliasResult<Self> {
        let substitutions = load_substitutions(substitutions_path)?;
        let demonyms = load_demonyms(demonyms_path)?;
        let table = Self::from_maps(substitutions, demonyms);

        info!(
            entries = table.len(),
            substitutions = %substitutions_path.display(),
            demonyms = %demonyms_path.display(),
            "Alias table loaded"
        );
        Ok(table)
    }

    pub fn from_config(config: &Config) -> AliasResult<Self> {
        Self::load(&config.substitutions_path, &config.demonyms_path)
    }

    /// Process-wide table, loaded once on first use. Later calls ignore `config`.
    pub fn global(config: &Config) -> AliasResult<Arc<AliasTable>> {
        GLOBAL
            .get_or_try_init(|| Self::from_config(config).map(Arc::new))
            .cloned()
    }

    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.entries.get(&normalize_key(text)).map(String::as_str)
    }

    /// Rewrites the entity's search text if it has an alias. Returns whether it did.
    pub fn apply(&self, entity: &mut GeoEntity) -> bool {
        match self.lookup(&entity.text) {
            Some(canonical) => {
                debug!(from = %entity.text, to = canonical, "Alias substituted");
                entity.substitute(canonical);
                true
            }
            None => false,
        }
    }

    /// Returns the number of substitutions made.
    pub fn apply_all(&self, entities: &mut [GeoEntity]) -> usize {
        entities
            .iter_mut()
            .map(|e| self.apply(e))
            .filter(|&applied| applied)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
