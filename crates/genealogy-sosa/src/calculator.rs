//! Breadth-first computation of Sosa-Stradonitz numbers.

use std::collections::VecDeque;

use genealogy_graph::Pedigree;
use genealogy_types::PersonId;

use crate::error::SosaError;
use crate::types::SosaCacheState;

/// Compute Sosa numbers for every known ancestor of `root_id`.
///
/// Missing parents and unions are skipped gracefully, mirroring GeneWeb's
/// lazy cache: an ancestor chain simply stops where the data runs out.
///
/// # Errors
///
/// Returns [`SosaError::MissingRoot`] if `root_id` is absent from the
/// pedigree, and [`SosaError::InconsistentSosaNumber`] if the ancestry
/// graph introduces a cycle or a conflicting assignment.
pub fn build_sosa_cache(pedigree: &Pedigree, root_id: PersonId) -> Result<SosaCacheState, SosaError> {
    if pedigree.person(root_id).is_none() {
        return Err(SosaError::MissingRoot(root_id));
    }

    let mut cache = SosaCacheState::new(root_id);
    let mut pending: VecDeque<(PersonId, i64)> = VecDeque::from([(root_id, 1)]);

    while let Some((person_id, value)) = pending.pop_front() {
        if pedigree.person(person_id).is_none() {
            continue;
        }

        let is_new = cache.register(person_id, value)?;
        if !is_new {
            continue;
        }

        let (father_id, mother_id) = pedigree.parents(person_id);
        if let Some(father_id) = father_id {
            pending.push_back((father_id, value * 2));
        }
        if let Some(mother_id) = mother_id {
            pending.push_back((mother_id, value * 2 + 1));
        }
    }

    tracing::debug!(root = %root_id, assigned = cache.traversal_order().len(), "sosa cache built");
    Ok(cache)
}

/// Resolve the Sosa number of a single `person_id` relative to `root_id`,
/// reusing `cache` if supplied or building a fresh one otherwise.
///
/// Returns the resolved number (or `None` if `person_id` is not a known
/// ancestor of `root_id`) together with the cache used, so a caller can
/// keep reusing it for further lookups.
///
/// # Errors
///
/// See [`build_sosa_cache`].
pub fn compute_single_sosa(
    pedigree: &Pedigree,
    root_id: PersonId,
    person_id: PersonId,
    cache: Option<SosaCacheState>,
) -> Result<(Option<i64>, SosaCacheState), SosaError> {
    let cache = match cache {
        Some(cache) => cache,
        None => build_sosa_cache(pedigree, root_id)?,
    };
    let number = cache.get_number(person_id);
    Ok((number, cache))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap as Map;

    use genealogy_types::{PersonNode, UnionId, UnionNode};

    use super::*;

    fn simple_tree() -> Pedigree {
        let mut persons = Map::new();
        persons.insert(PersonId::new(1), PersonNode::new(PersonId::new(1), Some(UnionId::new(1))));
        persons.insert(PersonId::new(2), PersonNode::new(PersonId::new(2), Some(UnionId::new(2))));
        persons.insert(PersonId::new(3), PersonNode::new(PersonId::new(3), Some(UnionId::new(3))));
        persons.insert(PersonId::new(4), PersonNode::new(PersonId::new(4), None));
        persons.insert(PersonId::new(5), PersonNode::new(PersonId::new(5), None));
        persons.insert(PersonId::new(6), PersonNode::new(PersonId::new(6), None));
        persons.insert(PersonId::new(7), PersonNode::new(PersonId::new(7), None));

        let mut unions = Map::new();
        unions.insert(
            UnionId::new(1),
            UnionNode::new(UnionId::new(1), Some(PersonId::new(2)), Some(PersonId::new(3)), vec![PersonId::new(1)]),
        );
        unions.insert(
            UnionId::new(2),
            UnionNode::new(UnionId::new(2), Some(PersonId::new(4)), Some(PersonId::new(5)), vec![PersonId::new(2)]),
        );
        unions.insert(
            UnionId::new(3),
            UnionNode::new(UnionId::new(3), Some(PersonId::new(6)), Some(PersonId::new(7)), vec![PersonId::new(3)]),
        );
        Pedigree::new(persons, unions)
    }

    #[test]
    fn assigns_numbers_and_preserves_traversal_order() {
        let pedigree = simple_tree();
        let cache = build_sosa_cache(&pedigree, PersonId::new(1)).unwrap();
        for id in 1..=7 {
            assert_eq!(cache.get_number(PersonId::new(id)), Some(id));
        }
        let order: Vec<PersonId> = cache.iter_numbers().map(|n| n.person_id).collect();
        assert_eq!(order, (1..=7).map(PersonId::new).collect::<Vec<_>>());
    }

    #[test]
    fn missing_parents_are_skipped_gracefully() {
        let mut persons = Map::new();
        persons.insert(PersonId::new(1), PersonNode::new(PersonId::new(1), Some(UnionId::new(1))));
        persons.insert(PersonId::new(2), PersonNode::new(PersonId::new(2), None));
        let mut unions = Map::new();
        unions.insert(
            UnionId::new(1),
            UnionNode::new(UnionId::new(1), Some(PersonId::new(2)), None, vec![PersonId::new(1)]),
        );
        let pedigree = Pedigree::new(persons, unions);

        let cache = build_sosa_cache(&pedigree, PersonId::new(1)).unwrap();
        assert_eq!(cache.get_number(PersonId::new(1)), Some(1));
        assert_eq!(cache.get_number(PersonId::new(2)), Some(2));
        assert_eq!(cache.get_person(3), None);
    }

    #[test]
    fn self_marriage_is_reported_as_inconsistent() {
        let mut persons = Map::new();
        persons.insert(PersonId::new(1), PersonNode::new(PersonId::new(1), Some(UnionId::new(1))));
        let mut unions = Map::new();
        unions.insert(
            UnionId::new(1),
            UnionNode::new(UnionId::new(1), Some(PersonId::new(1)), None, vec![PersonId::new(1)]),
        );
        let pedigree = Pedigree::new(persons, unions);

        let result = build_sosa_cache(&pedigree, PersonId::new(1));
        assert!(matches!(result, Err(SosaError::InconsistentSosaNumber { .. })));
    }

    #[test]
    fn missing_root_is_reported() {
        let pedigree = Pedigree::new(Map::new(), Map::new());
        let result = build_sosa_cache(&pedigree, PersonId::new(1));
        assert!(matches!(result, Err(SosaError::MissingRoot(id)) if id == PersonId::new(1)));
    }

    #[test]
    fn compute_single_sosa_reuses_supplied_cache() {
        let pedigree = simple_tree();
        let cache = build_sosa_cache(&pedigree, PersonId::new(1)).unwrap();
        let (number, _cache) = compute_single_sosa(&pedigree, PersonId::new(1), PersonId::new(4), Some(cache)).unwrap();
        assert_eq!(number, Some(4));
    }

    #[test]
    fn compute_single_sosa_builds_cache_when_missing() {
        let pedigree = simple_tree();
        let (number, cache) = compute_single_sosa(&pedigree, PersonId::new(1), PersonId::new(3), None).unwrap();
        assert_eq!(number, Some(3));
        assert_eq!(cache.get_number(PersonId::new(3)), Some(3));
    }

    #[test]
    fn compute_single_sosa_returns_none_for_non_ancestor() {
        let pedigree = simple_tree();
        let (number, _cache) = compute_single_sosa(&pedigree, PersonId::new(1), PersonId::new(42), None).unwrap();
        assert_eq!(number, None);
    }
}
