//! Error types for the `genealogy-graph` crate.

use genealogy_types::PersonId;

/// Errors that can occur during pedigree-graph operations.
#[derive(Debug, thiserror::Error)]
pub enum PedigreeError {
    /// The ancestry graph contains a directed cycle.
    #[error("ancestral loop detected involving person {person_id}: {cycle:?}")]
    AncestralLoop {
        /// The person at which the cycle was detected.
        person_id: PersonId,
        /// The offending stack suffix, oldest ancestor first, cycle-closing
        /// person repeated at the end.
        cycle: Vec<PersonId>,
    },
}
