//! The [`Engine`] facade: one value wiring C1-C7 together so a caller
//! doesn't have to assemble `genealogy-kinship`, `genealogy-relationship`,
//! `genealogy-sosa`, and `genealogy-cousin` by hand.
//!
//! `Engine` owns exactly the state that would otherwise need to live in a
//! process-global: the cousin-degree computation defaults and the
//! in-memory cousin matrix cache. Everything else -- `RelationshipInfo`,
//! `SosaCacheManager`, `KinshipCalculator` -- borrows the pedigree for the
//! duration of one call and is handed back to the caller or dropped, since
//! those types carry a lifetime tied to a specific `&Pedigree` and cannot
//! be stored in a struct with no lifetime of its own.

use std::collections::BTreeMap;

use genealogy_cousin::{
    BucketedMatrix, CousinComputationSettings, CousinDegree, CousinError, CousinListing, CousinMatrixCache,
    SpouseLookup, TemporalLookup,
};
use genealogy_graph::Pedigree;
use genealogy_kinship::{ConsanguinityError, KinshipCalculator};
use genealogy_relationship::{RelationshipError, RelationshipInfo, RelationshipResult, RelationshipSummary};
use genealogy_sosa::{SosaCacheManager, SosaCacheState, SosaError, SosaNumber};
use genealogy_types::PersonId;

/// Facade over the pedigree/kinship/relationship/Sosa/cousin crates.
///
/// Construct one `Engine` per logical session (e.g. one per served
/// pedigree); it carries the cousin cache and settings that queries
/// against that pedigree should share.
#[derive(Default)]
pub struct Engine {
    cousin_settings: CousinComputationSettings,
    cousin_cache: CousinMatrixCache,
}

impl Engine {
    /// Build an engine with default cousin-computation settings
    /// (disk caching disabled, depth caps and result cap at the
    /// `GeneWeb`-compatible defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine with caller-supplied cousin-computation settings.
    #[must_use]
    pub fn with_cousin_settings(settings: CousinComputationSettings) -> Self {
        Self { cousin_settings: settings, cousin_cache: CousinMatrixCache::new() }
    }

    /// The cousin-computation settings this engine was built with.
    #[must_use]
    pub const fn cousin_settings(&self) -> &CousinComputationSettings {
        &self.cousin_settings
    }

    // -- C4: consanguinity -----------------------------------------------

    /// Resolve every person's consanguinity coefficient, writing the
    /// result back into `pedigree`.
    ///
    /// # Errors
    ///
    /// See [`genealogy_kinship::compute_consanguinity`].
    pub fn compute_consanguinity(
        &self,
        pedigree: &mut Pedigree,
        from_scratch: bool,
    ) -> Result<BTreeMap<PersonId, f64>, ConsanguinityError> {
        genealogy_kinship::compute_consanguinity(pedigree, from_scratch)
    }

    // -- C3: kinship -------------------------------------------------------

    /// Build a [`KinshipCalculator`] over `pedigree`, seeded from each
    /// person's currently-stored consanguinity value.
    ///
    /// Call [`Self::compute_consanguinity`] first if the pedigree's
    /// consanguinity values may be stale.
    #[must_use]
    pub fn kinship_calculator<'p>(&self, pedigree: &'p Pedigree) -> KinshipCalculator<'p> {
        let consanguinity = pedigree.persons().map(|(&id, node)| (id, node.consanguinity)).collect();
        KinshipCalculator::new(pedigree, consanguinity)
    }

    /// Kinship coefficient between `first` and `second`, building a
    /// fresh one-shot [`KinshipCalculator`]. Prefer
    /// [`Self::kinship_calculator`] directly for repeated queries, since
    /// that reuses its memoization cache across calls.
    #[must_use]
    pub fn kinship(&self, pedigree: &Pedigree, first: Option<PersonId>, second: Option<PersonId>) -> f64 {
        self.kinship_calculator(pedigree).kinship(first, second)
    }

    // -- C5: relationship sweep -------------------------------------------

    /// Build a [`RelationshipInfo`] over `pedigree` for repeated
    /// relationship queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the ancestry graph contains a cycle.
    pub fn relationship_info<'p>(&self, pedigree: &'p Pedigree) -> Result<RelationshipInfo<'p>, RelationshipError> {
        RelationshipInfo::new(pedigree)
    }

    /// One-shot coefficient-of-relationship query between two people.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipError::UnknownPerson`] if either person is
    /// absent, or propagates ancestor-rank/consanguinity failures.
    pub fn relationship_and_links(
        &self,
        pedigree: &Pedigree,
        person_a: PersonId,
        person_b: PersonId,
        include_branches: bool,
    ) -> Result<RelationshipResult, RelationshipError> {
        self.relationship_info(pedigree)?.relationship_and_links(person_a, person_b, include_branches)
    }

    /// One-shot full [`RelationshipSummary`] between two people, including
    /// every branch path from each common ancestor.
    ///
    /// # Errors
    ///
    /// See [`Self::relationship_and_links`].
    pub fn summarize_relationship(
        &self,
        pedigree: &Pedigree,
        person_a: PersonId,
        person_b: PersonId,
    ) -> Result<RelationshipSummary, RelationshipError> {
        self.relationship_info(pedigree)?.summarize(person_a, person_b)
    }

    // -- C6: Sosa numbering -------------------------------------------------

    /// Build a [`SosaCacheManager`] over `pedigree` for repeated Sosa
    /// queries across possibly multiple roots.
    #[must_use]
    pub fn sosa_cache_manager<'p>(&self, pedigree: &'p Pedigree) -> SosaCacheManager<'p> {
        SosaCacheManager::new(pedigree)
    }

    /// One-shot Sosa numbering of every ancestor of `root_id`.
    ///
    /// # Errors
    ///
    /// See [`genealogy_sosa::build_sosa_cache`].
    pub fn build_sosa_cache(&self, pedigree: &Pedigree, root_id: PersonId) -> Result<SosaCacheState, SosaError> {
        genealogy_sosa::build_sosa_cache(pedigree, root_id)
    }

    /// The next assigned Sosa number after `number`, if any.
    #[must_use]
    pub fn next_sosa(&self, cache: &SosaCacheState, number: i64) -> Option<SosaNumber> {
        genealogy_sosa::next_sosa(cache, number)
    }

    /// The previous assigned Sosa number before `number`, if any.
    #[must_use]
    pub fn previous_sosa(&self, cache: &SosaCacheState, number: i64) -> Option<SosaNumber> {
        genealogy_sosa::previous_sosa(cache, number)
    }

    /// Reconstruct the lineage Sosa number `number` encodes, without
    /// requiring a precomputed cache.
    ///
    /// # Errors
    ///
    /// See [`genealogy_sosa::branch_of_sosa`].
    pub fn branch_of_sosa(
        &self,
        pedigree: &Pedigree,
        root_id: PersonId,
        number: i64,
    ) -> Result<Option<Vec<PersonId>>, SosaError> {
        genealogy_sosa::branch_of_sosa(pedigree, root_id, number)
    }

    /// The person Sosa number `number` would resolve to, without a
    /// precomputed cache.
    ///
    /// # Errors
    ///
    /// See [`genealogy_sosa::p_of_sosa`].
    pub fn p_of_sosa(&self, pedigree: &Pedigree, root_id: PersonId, number: i64) -> Result<Option<PersonId>, SosaError> {
        genealogy_sosa::p_of_sosa(pedigree, root_id, number)
    }

    // -- C7: cousin classification / matrix / listings / cache -------------

    /// Classify every qualifying cousin-degree candidate between the two
    /// people `summary` was built for, most preferred first.
    #[must_use]
    pub fn infer_all_cousin_degrees(&self, summary: &RelationshipSummary) -> Vec<CousinDegree> {
        genealogy_cousin::infer_all_cousin_degrees(summary)
    }

    /// Classify the single best cousin-degree relationship between the
    /// two people `summary` was built for.
    #[must_use]
    pub fn infer_cousin_degree(&self, summary: &RelationshipSummary) -> CousinDegree {
        genealogy_cousin::infer_cousin_degree(summary)
    }

    /// Build the bucketed cousin matrix for `summary`, using this
    /// engine's cousin settings and cache.
    #[must_use]
    pub fn build_cousin_matrix(
        &self,
        summary: &RelationshipSummary,
        max_depth_a: Option<i64>,
        max_depth_b: Option<i64>,
        use_cache: bool,
    ) -> BucketedMatrix {
        genealogy_cousin::build_cousin_matrix(
            summary,
            max_depth_a,
            max_depth_b,
            use_cache,
            &self.cousin_cache,
            &self.cousin_settings,
        )
    }

    /// Build enriched cousin listings for `summary`, using this engine's
    /// cousin settings and cache.
    #[must_use]
    pub fn build_cousin_listings(
        &self,
        summary: &RelationshipSummary,
        spouse_lookup: Option<&dyn SpouseLookup>,
        temporal_lookup: Option<&dyn TemporalLookup>,
        max_depth_a: Option<i64>,
        max_depth_b: Option<i64>,
        use_cache: bool,
    ) -> Vec<CousinListing> {
        genealogy_cousin::build_cousin_listings(
            summary,
            spouse_lookup,
            temporal_lookup,
            max_depth_a,
            max_depth_b,
            use_cache,
            &self.cousin_cache,
            &self.cousin_settings,
        )
    }

    /// Reset this engine's in-memory cousin matrix cache, and optionally
    /// delete its on-disk cache files.
    ///
    /// # Errors
    ///
    /// See [`genealogy_cousin::clear_cousin_degree_cache`].
    pub fn clear_cousin_degree_cache(&self, include_disk: bool) -> Result<(), CousinError> {
        genealogy_cousin::clear_cousin_degree_cache(&self.cousin_cache, include_disk, &self.cousin_settings)
    }
}
