//! Error types for the `genealogy-kinship` crate.

use genealogy_types::{PersonId, UnionId};

/// Errors that can occur while computing consanguinity.
#[derive(Debug, thiserror::Error)]
pub enum ConsanguinityError {
    /// The ancestry graph contains a directed cycle.
    #[error(transparent)]
    AncestralLoop(#[from] genealogy_graph::PedigreeError),

    /// A person's parent union id does not resolve to a union in the
    /// pedigree.
    #[error("missing union {union_id} referenced as parent union of person {person_id}")]
    MissingUnion {
        /// The person whose parent union could not be found.
        person_id: PersonId,
        /// The dangling union id.
        union_id: UnionId,
    },

    /// The fixed-point sweep made no progress over a full pass, leaving one
    /// or more persons unresolved.
    #[error("unable to compute consanguinity for persons: {0:?}")]
    Unresolved(Vec<PersonId>),

    /// A union lists the same person as both father and mother.
    #[error("union {union_id} lists person {parent_id} as both parents")]
    SelfMarriage {
        /// The union with the duplicated parent.
        union_id: UnionId,
        /// The person listed as both parents.
        parent_id: PersonId,
    },
}
