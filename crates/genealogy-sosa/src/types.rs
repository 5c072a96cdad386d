//! Sosa cache storage.

use std::collections::BTreeMap;

use genealogy_types::PersonId;

use crate::error::SosaError;

/// Pairs a person with their Sosa-Stradonitz number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SosaNumber {
    /// The person holding this Sosa number.
    pub person_id: PersonId,
    /// The Sosa-Stradonitz number: root is `1`, father of `n` is `2n`,
    /// mother of `n` is `2n + 1`.
    pub value: i64,
}

/// Computed Sosa numbers for one root, plus the order numbers were
/// assigned in (breadth-first from the root).
#[derive(Debug, Clone)]
pub struct SosaCacheState {
    /// The individual this numbering is rooted at (Sosa number `1`).
    pub root_id: PersonId,
    numbers_by_person: BTreeMap<PersonId, i64>,
    persons_by_number: BTreeMap<i64, PersonId>,
    traversal_order: Vec<PersonId>,
}

impl SosaCacheState {
    /// Create an empty cache rooted at `root_id`.
    pub fn new(root_id: PersonId) -> Self {
        Self {
            root_id,
            numbers_by_person: BTreeMap::new(),
            persons_by_number: BTreeMap::new(),
            traversal_order: Vec::new(),
        }
    }

    /// Record a Sosa number assignment.
    ///
    /// Returns `true` when the assignment is new, `false` when it exactly
    /// matches an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`SosaError::InconsistentSosaNumber`] if `person_id` is
    /// already mapped to a different number, or if `value` is already
    /// claimed by a different person.
    pub fn register(&mut self, person_id: PersonId, value: i64) -> Result<bool, SosaError> {
        if let Some(&existing) = self.numbers_by_person.get(&person_id) {
            if existing != value {
                return Err(SosaError::InconsistentSosaNumber {
                    person_id,
                    attempted_value: value,
                    existing_value: existing,
                    conflicting_person_id: None,
                });
            }
            return Ok(false);
        }

        if let Some(&conflicting) = self.persons_by_number.get(&value) {
            if conflicting != person_id {
                return Err(SosaError::InconsistentSosaNumber {
                    person_id,
                    attempted_value: value,
                    existing_value: value,
                    conflicting_person_id: Some(conflicting),
                });
            }
        }

        self.numbers_by_person.insert(person_id, value);
        self.persons_by_number.insert(value, person_id);
        self.traversal_order.push(person_id);
        Ok(true)
    }

    /// Return the Sosa number assigned to `person_id`, if any.
    pub fn get_number(&self, person_id: PersonId) -> Option<i64> {
        self.numbers_by_person.get(&person_id).copied()
    }

    /// Return the person assigned Sosa number `value`, if any.
    pub fn get_person(&self, value: i64) -> Option<PersonId> {
        self.persons_by_number.get(&value).copied()
    }

    /// Iterate every assignment in the order it was first registered
    /// (breadth-first from the root).
    pub fn iter_numbers(&self) -> impl Iterator<Item = SosaNumber> + '_ {
        self.traversal_order.iter().map(|&person_id| SosaNumber {
            person_id,
            value: self.numbers_by_person.get(&person_id).copied().unwrap_or(0),
        })
    }

    /// The breadth-first assignment order.
    pub fn traversal_order(&self) -> &[PersonId] {
        &self.traversal_order
    }

    /// Bulk-register precomputed numbers, e.g. when replaying a disk cache.
    ///
    /// # Errors
    ///
    /// Returns [`SosaError::InconsistentSosaNumber`] at the first entry that
    /// conflicts with one already present.
    pub fn extend<I: IntoIterator<Item = SosaNumber>>(&mut self, entries: I) -> Result<(), SosaError> {
        for entry in entries {
            self.register(entry.person_id, entry.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn register_reports_new_vs_existing() {
        let mut cache = SosaCacheState::new(PersonId::new(1));
        assert_eq!(cache.register(PersonId::new(1), 1), Ok(true));
        assert_eq!(cache.register(PersonId::new(1), 1), Ok(false));
    }

    #[test]
    fn register_rejects_conflicting_value_for_same_person() {
        let mut cache = SosaCacheState::new(PersonId::new(1));
        cache.register(PersonId::new(1), 1).unwrap();
        assert!(matches!(
            cache.register(PersonId::new(1), 2),
            Err(SosaError::InconsistentSosaNumber { .. })
        ));
    }

    #[test]
    fn register_rejects_value_claimed_by_another_person() {
        let mut cache = SosaCacheState::new(PersonId::new(1));
        cache.register(PersonId::new(1), 1).unwrap();
        assert!(matches!(
            cache.register(PersonId::new(2), 1),
            Err(SosaError::InconsistentSosaNumber { .. })
        ));
    }
}
