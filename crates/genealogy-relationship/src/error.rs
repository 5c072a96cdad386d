//! Error types for the `genealogy-relationship` crate.

use genealogy_types::PersonId;

/// Errors that can occur while computing a relationship sweep.
#[derive(Debug, thiserror::Error)]
pub enum RelationshipError {
    /// The ancestry graph contains a directed cycle (surfaced while
    /// building ancestor rank).
    #[error(transparent)]
    AncestralLoop(#[from] genealogy_graph::PedigreeError),

    /// Consanguinity could not be resolved for the pedigree ahead of the
    /// sweep.
    #[error(transparent)]
    Consanguinity(#[from] genealogy_kinship::ConsanguinityError),

    /// One of the two queried individuals is not present in the pedigree.
    #[error("unknown person {0}")]
    UnknownPerson(PersonId),
}
