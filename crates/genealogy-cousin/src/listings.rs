//! Enriching cousin matrix entries into presentation-ready listings.

use chrono::{Datelike, Utc};
use genealogy_relationship::BranchPath;
use genealogy_relationship::RelationshipSummary;
use genealogy_types::PersonId;

use crate::cache::CousinMatrixCache;
use crate::matrix::build_cousin_matrix;
use crate::types::{CousinComputationSettings, CousinListing, CousinMatrixEntry, PersonTemporalData};

/// Resolves the spouses of a person, for enriching cousin listings. A
/// caller with no spouse data can skip supplying one; listings then
/// carry empty `spouses_a`/`spouses_b`.
pub trait SpouseLookup {
    /// Return every recorded spouse of `person_id`, in any order
    /// (duplicates are removed by the caller).
    fn spouses_of(&self, person_id: PersonId) -> Vec<PersonId>;
}

impl<F: Fn(PersonId) -> Vec<PersonId>> SpouseLookup for F {
    fn spouses_of(&self, person_id: PersonId) -> Vec<PersonId> {
        self(person_id)
    }
}

/// Resolves birth/death temporal data for a person, for the
/// birth/death year-range aggregation in cousin listings.
pub trait TemporalLookup {
    /// Return `person_id`'s recorded temporal data, if any.
    fn temporal_data_of(&self, person_id: PersonId) -> Option<PersonTemporalData>;
}

impl<F: Fn(PersonId) -> Option<PersonTemporalData>> TemporalLookup for F {
    fn temporal_data_of(&self, person_id: PersonId) -> Option<PersonTemporalData> {
        self(person_id)
    }
}

/// Produce enriched cousin listings for every entry of the matrix built
/// from `summary`, ordered by `(generations_a, generations_b)` ascending
/// then by matrix-insertion order within a bucket.
#[must_use]
pub fn build_cousin_listings(
    summary: &RelationshipSummary,
    spouse_lookup: Option<&dyn SpouseLookup>,
    temporal_lookup: Option<&dyn TemporalLookup>,
    max_depth_a: Option<i64>,
    max_depth_b: Option<i64>,
    use_cache: bool,
    cache: &CousinMatrixCache,
    settings: &CousinComputationSettings,
) -> Vec<CousinListing> {
    let matrix = build_cousin_matrix(summary, max_depth_a, max_depth_b, use_cache, cache, settings);

    let mut listings = Vec::new();
    for (_depth_a, depth_bucket) in &matrix {
        for (_depth_b, entries) in depth_bucket {
            for entry in entries {
                let descendants_a = descendant_chain(&entry.path_to_a);
                let descendants_b = descendant_chain(&entry.path_to_b);

                let spouses_a = resolve_spouses(&descendants_a, spouse_lookup);
                let spouses_b = resolve_spouses(&descendants_b, spouse_lookup);

                let (birth_year_range, death_year_range) = aggregate_temporal_ranges(entry, temporal_lookup);

                listings.push(CousinListing {
                    ancestor: entry.ancestor,
                    degree: entry.degree,
                    path_to_a: entry.path_to_a.clone(),
                    path_to_b: entry.path_to_b.clone(),
                    descendants_a,
                    descendants_b,
                    spouses_a,
                    spouses_b,
                    birth_year_range,
                    death_year_range,
                });
            }
        }
    }
    listings
}

fn descendant_chain(path: &BranchPath) -> Vec<PersonId> {
    path.path.iter().copied().skip(1).collect()
}

fn resolve_spouses(descendants: &[PersonId], lookup: Option<&dyn SpouseLookup>) -> Vec<PersonId> {
    let (Some(lookup), Some(&terminal)) = (lookup, descendants.last()) else {
        return Vec::new();
    };
    let mut seen = std::collections::BTreeSet::new();
    lookup.spouses_of(terminal).into_iter().filter(|id| seen.insert(*id)).collect()
}

fn aggregate_temporal_ranges(
    entry: &CousinMatrixEntry,
    lookup: Option<&dyn TemporalLookup>,
) -> (Option<(i32, i32)>, Option<(i32, i32)>) {
    let Some(lookup) = lookup else {
        return (None, None);
    };

    let mut birth_years = std::collections::BTreeSet::new();
    let mut death_years = std::collections::BTreeSet::new();
    let today_year = Utc::now().year();

    let mut seen = std::collections::BTreeSet::new();
    for &person_id in entry.path_to_a.path.iter().chain(entry.path_to_b.path.iter()) {
        if !seen.insert(person_id) {
            continue;
        }
        let Some(info) = lookup.temporal_data_of(person_id) else {
            continue;
        };

        let birth_exact = info.birth_precision.is_none_or(crate::types::DatePrecision::is_exact);
        let death_exact = info.death_precision.is_none_or(crate::types::DatePrecision::is_exact);
        let is_alive = info.is_alive.unwrap_or(info.death_year.is_none());

        if let Some(birth_year) = info.birth_year {
            if birth_exact {
                birth_years.insert(birth_year);
            }
        }
        if let Some(death_year) = info.death_year {
            if death_exact {
                death_years.insert(death_year);
            }
        }
        if is_alive && info.death_year.is_none() {
            death_years.insert(today_year);
        }
        if info.birth_year.is_some() && birth_exact && (info.death_year.is_none() || !death_exact) && is_alive {
            death_years.insert(today_year);
        }
    }

    let birth_range = match (birth_years.first(), birth_years.last()) {
        (Some(&min), Some(&max)) => Some((min, max)),
        _ => None,
    };
    let death_range = match (death_years.first(), death_years.last()) {
        (Some(&min), Some(&max)) => Some((min, max)),
        _ => None,
    };
    (birth_range, death_range)
}
