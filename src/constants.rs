//! Cross-cutting, shared constants.
//!
//! The relevance weights are shared by the Elasticsearch query builder and the
//! in-memory mock index so both rank candidates the same way.
//!
//! # Ranking Invariants
//!
//! The exact-name boost must dominate pure fuzzy similarity, and the population
//! factor must break ties between identically-named places. Use
//! [`QueryWeights::validate`] when overriding the defaults.

/// Default number of candidates fetched per entity.
pub const DEFAULT_RESULT_LIMIT: usize = 25;

/// Upper bound on the per-entity candidate cap.
pub const MAX_RESULT_LIMIT: usize = 100;

pub const EXACT_MATCH_BOOST: f32 = 10.0;
pub const COUNTRY_BOOST: f32 = 3.0;
pub const FEATURE_CLASS_BOOST: f32 = 1.5;

/// Feature classes that receive [`FEATURE_CLASS_BOOST`].
pub const BOOSTED_FEATURE_CLASSES: [&str; 2] = ["P", "A"];

/// Admin1 code GeoNames uses for country-level records.
pub const COUNTRY_ADMIN1_CODE: &str = "00";

/// Number of leading candidates the fuzzy country pass inspects.
pub const FUZZY_COUNTRY_TOP_N: usize = 3;

/// Population a colocated city needs before its admin1 match is preferred.
/// Keeps tiny towns from beating big ones that share a name.
pub const KINDA_POPULATED: u64 = 10_000;

/// Minimum article text length (chars) for a content extraction to count.
pub const MIN_CONTENT_LENGTH: usize = 200;

/// Number of tab-delimited columns in a GeoNames dump row.
pub const GEONAMES_COLUMN_COUNT: usize = 19;

/// Documents per `_bulk` request during ingestion.
pub const DEFAULT_BULK_CHUNK_SIZE: usize = 1000;

/// Relevance weights for candidate generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryWeights {
    /// Multiplier applied when the query equals the name or an alternate name.
    pub exact_match: f32,
    /// Additive boost for country-level records.
    pub country: f32,
    /// Additive boost for populated places and administrative areas.
    pub feature_class: f32,
}

impl Default for QueryWeights {
    fn default() -> Self {
        Self {
            exact_match: EXACT_MATCH_BOOST,
            country: COUNTRY_BOOST,
            feature_class: FEATURE_CLASS_BOOST,
        }
    }
}

impl QueryWeights {
    /// Returns an error if the weights break the ranking invariants.
    pub fn validate(&self) -> Result<(), WeightsValidationError> {
        for (name, value) in [
            ("exact_match", self.exact_match),
            ("country", self.country),
            ("feature_class", self.feature_class),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsValidationError::Negative { name, value });
            }
        }
        if self.exact_match <= 1.0 {
            return Err(WeightsValidationError::ExactBoostTooSmall {
                value: self.exact_match,
            });
        }
        Ok(())
    }

    /// Population factor: `log(1 + population)`.
    pub fn population_factor(population: u64) -> f32 {
        (population as f64).ln_1p() as f32
    }
}

/// Error returned when [`QueryWeights`] validation fails.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightsValidationError {
    /// A weight was negative or not finite.
    Negative { name: &'static str, value: f32 },
    /// The exact-match boost would not dominate fuzzy similarity.
    ExactBoostTooSmall { value: f32 },
}

impl std::fmt::Display for WeightsValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative { name, value } => {
                write!(f, "weight '{}' must be a finite, non-negative number (got {})", name, value)
            }
            Self::ExactBoostTooSmall { value } => {
                write!(f, "exact-match boost must be greater than 1.0 (got {})", value)
            }
        }
    }
}

impl std::error::Error for WeightsValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_validate() {
        assert!(QueryWeights::default().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = QueryWeights {
            country: -1.0,
            ..Default::default()
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsValidationError::Negative {
                name: "country",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_small_exact_boost_rejected() {
        let weights = QueryWeights {
            exact_match: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(WeightsValidationError::ExactBoostTooSmall { .. })
        ));
    }

    #[test]
    fn test_population_factor_monotonic() {
        assert_eq!(QueryWeights::population_factor(0), 0.0);
        assert!(QueryWeights::population_factor(2_000_000) > QueryWeights::population_factor(25_000));
    }

    #[test]
    fn test_error_display() {
        let err = WeightsValidationError::ExactBoostTooSmall { value: 0.5 };
        assert!(err.to_string().contains("0.5"));
    }
}
