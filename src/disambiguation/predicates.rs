//! Shared helpers for the passes. All pure over candidates and resolved locations.

use std::collections::HashSet;

use crate::constants::KINDA_POPULATED;
use crate::gazetteer::LocationCandidate;
use crate::resolution::ResolvedLocation;

/// Country codes of everything resolved so far.
pub fn resolved_countries(resolved: &[ResolvedLocation]) -> HashSet<&str> {
    resolved.iter().filter_map(|r| r.country_code()).collect()
}

pub fn has_exact_populated_city(candidates: &[LocationCandidate]) -> bool {
    candidates.iter().any(|c| c.exact_match && c.is_city())
}

/// Same country and admin1 as some resolved location, and big enough to trust.
pub fn shares_country_and_admin1(candidate: &LocationCandidate, resolved: &[ResolvedLocation]) -> bool {
    candidate.population > KINDA_POPULATED
        && resolved.iter().any(|r| {
            r.country_code().is_some()
                && r.country_code() == candidate.country_code.as_deref()
                && r.admin1_code() == candidate.admin1_code.as_deref()
        })
}

/// Highest population wins; the earlier candidate wins ties.
pub fn most_populated<'a>(
    candidates: impl Iterator<Item = &'a LocationCandidate>,
) -> Option<&'a LocationCandidate> {
    candidates.reduce(|best, c| if c.population > best.population { c } else { best })
}

// Preferring exact matches here would not change the pick: the most populated
// city overall is chosen either way.
pub fn first_city_by_population(candidates: &[LocationCandidate]) -> Option<&LocationCandidate> {
    most_populated(candidates.iter().filter(|c| c.is_city()))
}

pub fn first_admin_by_population(candidates: &[LocationCandidate]) -> Option<&LocationCandidate> {
    most_populated(candidates.iter().filter(|c| c.is_admin_region()))
}

/// City wins if it is bigger or in the same country as the admin region.
pub fn choose_city_over_admin(
    city: Option<&LocationCandidate>,
    admin: Option<&LocationCandidate>,
) -> bool {
    match (city, admin) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(city), Some(admin)) => {
            city.population > admin.population || city.country_code == admin.country_code
        }
    }
}
