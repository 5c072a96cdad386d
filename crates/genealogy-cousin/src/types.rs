//! Value types shared across classification, matrix construction, and
//! listing enrichment.

use std::collections::BTreeMap;
use std::path::PathBuf;

use genealogy_relationship::BranchPath;
use genealogy_types::PersonId;
use serde::{Deserialize, Serialize};

/// How two people relate to each other, as classified from a
/// [`genealogy_relationship::RelationshipSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// The two queried persons are the same individual.
    SamePerson,
    /// One person is a direct ancestor of the other.
    DirectAncestor,
    /// The two persons share a parent.
    Sibling,
    /// The two persons are cousins at some degree and removal.
    Cousin,
    /// No qualifying shared ancestor was found.
    Unrelated,
}

/// A classified cousin relationship, produced by
/// [`crate::infer_cousin_degree`]/[`crate::infer_all_cousin_degrees`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CousinDegree {
    /// The broad kind of relationship.
    pub kind: RelationshipKind,
    /// Cousin degree (`min(generations_a, generations_b) - 1`), only set
    /// for [`RelationshipKind::Cousin`].
    pub degree: Option<i64>,
    /// Removal (`|generations_a - generations_b|`), only set for
    /// [`RelationshipKind::Cousin`].
    pub removal: Option<i64>,
    /// Generations from the common ancestor down to person A.
    pub generations_a: Option<i64>,
    /// Generations from the common ancestor down to person B.
    pub generations_b: Option<i64>,
    /// The shared ancestor this classification was derived from.
    pub ancestor: Option<PersonId>,
}

impl CousinDegree {
    /// Return the equivalent degree with person A and person B swapped:
    /// `kind`, `degree`, and `removal` are symmetric and unchanged,
    /// `generations_a`/`generations_b` trade places.
    #[must_use]
    pub const fn swap(&self) -> Self {
        if self.generations_a.is_none() || self.generations_b.is_none() {
            return *self;
        }
        Self {
            kind: self.kind,
            degree: self.degree,
            removal: self.removal,
            generations_a: self.generations_b,
            generations_b: self.generations_a,
            ancestor: self.ancestor,
        }
    }
}

/// One dedicated `(ancestor, path_to_a, path_to_b)` entry in a cousin
/// matrix, bucketed by `(generations_a, generations_b)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CousinMatrixEntry {
    /// The shared ancestor this path pair descends from.
    pub ancestor: PersonId,
    /// Path from the ancestor down to person A.
    pub path_to_a: BranchPath,
    /// Path from the ancestor down to person B.
    pub path_to_b: BranchPath,
    /// The classification for this specific path pair.
    pub degree: CousinDegree,
}

/// Bucketed cousin matrix: `generations_a -> generations_b -> entries`.
pub type BucketedMatrix = BTreeMap<i64, BTreeMap<i64, Vec<CousinMatrixEntry>>>;

/// An enriched, presentation-ready cousin listing built from one matrix
/// entry.
#[derive(Debug, Clone)]
pub struct CousinListing {
    /// The shared ancestor.
    pub ancestor: PersonId,
    /// The classification for this entry.
    pub degree: CousinDegree,
    /// Path from the ancestor down to person A.
    pub path_to_a: BranchPath,
    /// Path from the ancestor down to person B.
    pub path_to_b: BranchPath,
    /// Every person on the path from the ancestor to A, excluding the
    /// ancestor itself.
    pub descendants_a: Vec<PersonId>,
    /// Every person on the path from the ancestor to B, excluding the
    /// ancestor itself.
    pub descendants_b: Vec<PersonId>,
    /// Spouses of the terminal descendant on the A side, if a spouse
    /// lookup was supplied.
    pub spouses_a: Vec<PersonId>,
    /// Spouses of the terminal descendant on the B side, if a spouse
    /// lookup was supplied.
    pub spouses_b: Vec<PersonId>,
    /// Earliest/latest birth year across the two paths, if a temporal
    /// lookup was supplied and any exact birth years were found.
    pub birth_year_range: Option<(i32, i32)>,
    /// Earliest/latest death year across the two paths (a still-living
    /// person without a recorded death year contributes the current
    /// year), if a temporal lookup was supplied.
    pub death_year_range: Option<(i32, i32)>,
}

/// How precisely a recorded date is known, mirroring `GeneWeb's` date
/// precision tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePrecision {
    /// The date is known exactly.
    Sure,
    /// Approximate ("about 1850").
    About,
    /// Uncertain ("maybe 1850").
    Maybe,
    /// An upper bound only ("before 1850").
    Before,
    /// A lower bound only ("after 1850").
    After,
    /// One of two recorded years.
    OrYear,
    /// A year-only estimate with no day/month.
    YearInt,
}

impl DatePrecision {
    /// Whether this precision tag counts as exact for temporal-range
    /// aggregation. Every fuzzy tag (`About`, `Maybe`, `Before`, `After`,
    /// `OrYear`, `YearInt`) is excluded; only `Sure` counts.
    #[must_use]
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Sure)
    }
}

/// A person's birth/death years and liveness, as supplied by an
/// injected temporal lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersonTemporalData {
    /// Birth year, if recorded.
    pub birth_year: Option<i32>,
    /// Precision of `birth_year`. `None` is treated as exact.
    pub birth_precision: Option<DatePrecision>,
    /// Death year, if recorded.
    pub death_year: Option<i32>,
    /// Precision of `death_year`. `None` is treated as exact.
    pub death_precision: Option<DatePrecision>,
    /// Whether the person is still alive. `None` defaults to "alive iff
    /// no death year is recorded".
    pub is_alive: Option<bool>,
}

/// Tunable knobs for cousin matrix/listing construction and caching,
/// mirroring `GeneWeb's` cousin defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CousinComputationSettings {
    /// Prune matrix entries whose path to A is longer than this.
    #[serde(default = "default_max_depth")]
    pub max_depth_a: Option<i64>,
    /// Prune matrix entries whose path to B is longer than this.
    #[serde(default = "default_max_depth")]
    pub max_depth_b: Option<i64>,
    /// Stop enumerating once this many entries have been produced.
    #[serde(default = "default_max_results")]
    pub max_results: Option<usize>,
    /// Directory on-disk cache files live under.
    #[serde(default)]
    pub cache_directory: Option<PathBuf>,
    /// Whether to consult/populate the on-disk cache.
    #[serde(default)]
    pub cache_enabled: bool,
    /// Filename prefix used for on-disk cache entries.
    #[serde(default = "default_cache_prefix")]
    pub cache_prefix: String,
    /// Bumped to invalidate every existing cache entry.
    #[serde(default = "default_cache_version")]
    pub cache_version: u32,
}

impl Default for CousinComputationSettings {
    fn default() -> Self {
        Self {
            max_depth_a: default_max_depth(),
            max_depth_b: default_max_depth(),
            max_results: default_max_results(),
            cache_directory: None,
            cache_enabled: false,
            cache_prefix: default_cache_prefix(),
            cache_version: default_cache_version(),
        }
    }
}

impl CousinComputationSettings {
    /// The portion of these settings that distinguishes otherwise-equal
    /// cache keys: a `cache_version` bump invalidates every prior entry
    /// even if the summary and depth caps are unchanged.
    #[must_use]
    pub const fn cache_key_fragment(&self) -> (Option<i64>, Option<i64>, Option<usize>, u32) {
        (self.max_depth_a, self.max_depth_b, self.max_results, self.cache_version)
    }
}

const fn default_max_depth() -> Option<i64> {
    Some(12)
}

const fn default_max_results() -> Option<usize> {
    Some(2000)
}

fn default_cache_prefix() -> String {
    "cousin_cache".to_owned()
}

const fn default_cache_version() -> u32 {
    1
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_geneweb_defaults() {
        let settings = CousinComputationSettings::default();
        assert_eq!(settings.max_depth_a, Some(12));
        assert_eq!(settings.max_results, Some(2000));
        assert!(!settings.cache_enabled);
    }

    #[test]
    fn swap_trades_generation_counts() {
        let degree = CousinDegree {
            kind: RelationshipKind::Cousin,
            degree: Some(1),
            removal: Some(1),
            generations_a: Some(2),
            generations_b: Some(3),
            ancestor: Some(PersonId::new(1)),
        };
        let swapped = degree.swap();
        assert_eq!(swapped.generations_a, Some(3));
        assert_eq!(swapped.generations_b, Some(2));
        assert_eq!(swapped.kind, RelationshipKind::Cousin);
        assert_eq!(swapped.degree, Some(1));
    }

    #[test]
    fn swap_is_noop_without_generation_counts() {
        let degree = CousinDegree {
            kind: RelationshipKind::Unrelated,
            degree: None,
            removal: None,
            generations_a: None,
            generations_b: None,
            ancestor: None,
        };
        assert_eq!(degree.swap(), degree);
    }

    #[test]
    fn is_exact_precision_excludes_fuzzy_tags() {
        assert!(DatePrecision::Sure.is_exact());
        assert!(!DatePrecision::About.is_exact());
        assert!(!DatePrecision::YearInt.is_exact());
    }
}
