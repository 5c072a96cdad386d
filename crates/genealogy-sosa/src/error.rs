//! Error types for the `genealogy-sosa` crate.

use genealogy_types::PersonId;

/// Errors that can occur while computing or navigating Sosa numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SosaError {
    /// The requested root person is absent from the pedigree.
    #[error("root person {0} is not available")]
    MissingRoot(PersonId),

    /// Two incompatible Sosa number assignments were attempted.
    #[error("{}", inconsistency_message(person_id, attempted_value, existing_value, conflicting_person_id))]
    InconsistentSosaNumber {
        /// The person whose assignment conflicted.
        person_id: PersonId,
        /// The value that was about to be assigned.
        attempted_value: i64,
        /// The value already on record.
        existing_value: i64,
        /// The other person already holding `attempted_value`, if that was
        /// the source of the conflict.
        conflicting_person_id: Option<PersonId>,
    },

    /// A requested Sosa number was not a positive integer.
    #[error("Sosa number must be positive, got {0}")]
    InvalidNumber(i64),
}

fn inconsistency_message(
    person_id: &PersonId,
    attempted_value: &i64,
    existing_value: &i64,
    conflicting_person_id: &Option<PersonId>,
) -> String {
    if let Some(conflicting) = conflicting_person_id {
        format!(
            "Sosa number {attempted_value} already reserved for person {conflicting}; cannot assign it to person {person_id}"
        )
    } else {
        format!("person {person_id} already mapped to Sosa {existing_value}; cannot reassign to {attempted_value}")
    }
}
