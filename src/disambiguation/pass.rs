use serde::{Deserialize, Serialize};

use super::predicates::{
    choose_city_over_admin, first_admin_by_population, first_city_by_population,
    has_exact_populated_city, resolved_countries, shares_country_and_admin1,
};
use crate::candidates::CandidateSet;
use crate::constants::FUZZY_COUNTRY_TOP_N;
use crate::gazetteer::LocationCandidate;
use crate::resolution::ResolvedLocation;

/// The disambiguation heuristics, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Exact, country-less continents and regions.
    LargeArea,
    /// First country among the top candidates.
    FuzzyCountry,
    /// Admin1 regions, unless an exact city exists.
    ExactAdmin1,
    /// Exact cities in a country already resolved.
    ExactColocation,
    /// Any place or area in a country already resolved.
    TopColocation,
    /// Most populated city against most populated admin region.
    TopAdminCity,
    /// Catch-all; picks something for every remaining entity.
    TopPreferringColocated,
}

impl Pass {
    pub const ALL: [Pass; 7] = [
        Pass::LargeArea,
        Pass::FuzzyCountry,
        Pass::ExactAdmin1,
        Pass::ExactColocation,
        Pass::TopColocation,
        Pass::TopAdminCity,
        Pass::TopPreferringColocated,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pass::LargeArea => "large_area",
            Pass::FuzzyCountry => "fuzzy_country",
            Pass::ExactAdmin1 => "exact_admin1",
            Pass::ExactColocation => "exact_colocation",
            Pass::TopColocation => "top_colocation",
            Pass::TopAdminCity => "top_admin_city",
            Pass::TopPreferringColocated => "top_preferring_colocated",
        }
    }

    /// Picks a candidate for `set` given what is resolved so far, or `None` to
    /// leave the entity for a later pass.
    pub fn select<'a>(
        &self,
        set: &'a CandidateSet,
        resolved: &[ResolvedLocation],
    ) -> Option<&'a LocationCandidate> {
        let candidates = &set.candidates;
        match self {
            Pass::LargeArea => candidates
                .iter()
                .find(|c| c.exact_match && c.country_code.is_none() && c.is_large_area()),

            Pass::FuzzyCountry => candidates
                .iter()
                .take(FUZZY_COUNTRY_TOP_N)
                .filter(|c| !c.is_large_territory())
                .find(|c| c.is_country()),

            Pass::ExactAdmin1 => {
                if has_exact_populated_city(candidates) {
                    return None;
                }
                candidates
                    .iter()
                    .find(|c| c.exact_match || c.exact_match_to_admin1_code())
                    .filter(|c| c.is_populated() && c.is_admin1())
            }

            Pass::ExactColocation => {
                if resolved.is_empty() {
                    return None;
                }
                let countries = resolved_countries(resolved);
                let colocated: Vec<&LocationCandidate> = candidates
                    .iter()
                    .filter(|c| c.exact_match && c.is_city())
                    .filter(|c| c.country_code.as_deref().is_some_and(|cc| countries.contains(cc)))
                    .collect();

                match colocated.as_slice() {
                    [] => None,
                    [only] => Some(*only),
                    [first, ..] => colocated
                        .iter()
                        .copied()
                        .find(|c| shares_country_and_admin1(c, resolved))
                        .or(Some(*first)),
                }
            }

            Pass::TopColocation => {
                let countries = resolved_countries(resolved);
                candidates.iter().find(|c| {
                    matches!(c.feature_class.as_str(), "P" | "A")
                        && c.country_code.as_deref().is_some_and(|cc| countries.contains(cc))
                })
            }

            Pass::TopAdminCity => {
                let city = first_city_by_population(candidates);
                let admin = first_admin_by_population(candidates);
                if choose_city_over_admin(city, admin) {
                    city
                } else {
                    admin
                }
            }

            Pass::TopPreferringColocated => {
                let countries = resolved_countries(resolved);
                candidates
                    .iter()
                    .find(|c| c.country_code.as_deref().is_some_and(|cc| countries.contains(cc)))
                    .or_else(|| candidates.iter().find(|c| c.is_city()))
                    .or_else(|| candidates.first())
            }
        }
    }
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
