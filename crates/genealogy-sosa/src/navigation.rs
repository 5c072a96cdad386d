//! Stepping forward and backward through a computed Sosa cache.

use genealogy_types::PersonId;

use crate::types::{SosaCacheState, SosaNumber};

/// Return the Sosa number assigned to `person_id`, if any.
pub fn get_sosa_number(cache: &SosaCacheState, person_id: PersonId) -> Option<i64> {
    cache.get_number(person_id)
}

/// Return the entry immediately after `number` in the cache's
/// breadth-first traversal order, or `None` if `number` is unknown or
/// last.
pub fn next_sosa(cache: &SosaCacheState, number: i64) -> Option<SosaNumber> {
    step(cache, number, 1)
}

/// Return the entry immediately before `number` in the cache's
/// breadth-first traversal order, or `None` if `number` is unknown or
/// first.
pub fn previous_sosa(cache: &SosaCacheState, number: i64) -> Option<SosaNumber> {
    step(cache, number, -1)
}

fn step(cache: &SosaCacheState, number: i64, delta: isize) -> Option<SosaNumber> {
    let person_id = cache.get_person(number)?;
    let order = cache.traversal_order();
    let position = order.iter().position(|&id| id == person_id)?;
    let next_position = position.checked_add_signed(delta)?;
    let &next_person = order.get(next_position)?;
    Some(SosaNumber {
        person_id: next_person,
        value: cache.get_number(next_person)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap as Map;

    use genealogy_graph::Pedigree;
    use genealogy_types::{PersonNode, UnionId, UnionNode};

    use super::*;
    use crate::calculator::build_sosa_cache;

    fn simple_tree_cache() -> SosaCacheState {
        let mut persons = Map::new();
        for id in 1..=7 {
            persons.insert(PersonId::new(id), PersonNode::new(PersonId::new(id), None));
        }
        if let Some(node) = persons.get_mut(&PersonId::new(1)) {
            node.parent_union_id = Some(UnionId::new(1));
        }
        if let Some(node) = persons.get_mut(&PersonId::new(2)) {
            node.parent_union_id = Some(UnionId::new(2));
        }
        if let Some(node) = persons.get_mut(&PersonId::new(3)) {
            node.parent_union_id = Some(UnionId::new(3));
        }

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

        let pedigree = Pedigree::new(persons, unions);
        build_sosa_cache(&pedigree, PersonId::new(1)).unwrap()
    }

    #[test]
    fn next_sosa_steps_forward_in_traversal_order() {
        let cache = simple_tree_cache();
        assert_eq!(next_sosa(&cache, 1), Some(SosaNumber { person_id: PersonId::new(2), value: 2 }));
        assert_eq!(next_sosa(&cache, 6), Some(SosaNumber { person_id: PersonId::new(7), value: 7 }));
        assert_eq!(next_sosa(&cache, 7), None);
    }

    #[test]
    fn previous_sosa_steps_backward_in_traversal_order() {
        let cache = simple_tree_cache();
        assert_eq!(previous_sosa(&cache, 3), Some(SosaNumber { person_id: PersonId::new(2), value: 2 }));
        assert_eq!(previous_sosa(&cache, 4), Some(SosaNumber { person_id: PersonId::new(3), value: 3 }));
        assert_eq!(previous_sosa(&cache, 1), None);
    }

    #[test]
    fn navigation_handles_missing_reference() {
        let cache = simple_tree_cache();
        assert_eq!(next_sosa(&cache, 50), None);
        assert_eq!(previous_sosa(&cache, 0), None);
    }
}
