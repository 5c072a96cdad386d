//! The pedigree graph: persons, unions, and parent-of-child lookup.

use std::collections::BTreeMap;

use genealogy_types::{PersonId, PersonNode, UnionId, UnionNode};

/// An immutable view over a pedigree's persons and unions.
///
/// `Pedigree` is the engine's only window onto the imported data. Every
/// higher-level component (topological ordering, kinship, relationship
/// sweep, Sosa numbering) reads through this type and never the raw maps
/// directly, so the backing storage can change (array, hash table, mmap)
/// without touching callers. `BTreeMap` is used here so iteration order is
/// deterministic -- several algorithms downstream (topological DFS, BFS
/// Sosa assignment) depend on a stable visitation order to be reproducible
/// across runs on the same input.
#[derive(Debug, Clone, Default)]
pub struct Pedigree {
    persons: BTreeMap<PersonId, PersonNode>,
    unions: BTreeMap<UnionId, UnionNode>,
}

impl Pedigree {
    /// Build a pedigree from its person and union maps.
    pub const fn new(persons: BTreeMap<PersonId, PersonNode>, unions: BTreeMap<UnionId, UnionNode>) -> Self {
        Self { persons, unions }
    }

    /// Look up a person by id.
    pub fn person(&self, id: PersonId) -> Option<&PersonNode> {
        self.persons.get(&id)
    }

    /// Look up a person by id, mutably. Only `genealogy-kinship`'s
    /// consanguinity orchestrator is expected to use this.
    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut PersonNode> {
        self.persons.get_mut(&id)
    }

    /// Look up a union by id.
    pub fn union(&self, id: UnionId) -> Option<&UnionNode> {
        self.unions.get(&id)
    }

    /// Iterate over every person, in ascending id order.
    pub fn persons(&self) -> impl Iterator<Item = (&PersonId, &PersonNode)> {
        self.persons.iter()
    }

    /// Iterate over every union, in ascending id order.
    pub fn unions(&self) -> impl Iterator<Item = (&UnionId, &UnionNode)> {
        self.unions.iter()
    }

    /// Return the number of persons in the pedigree.
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Return the number of unions in the pedigree.
    pub fn union_count(&self) -> usize {
        self.unions.len()
    }

    /// Return the `(father, mother)` of `person`'s parent union, or
    /// `(None, None)` if `person` has no parent union or the union is
    /// missing from the pedigree.
    pub fn parents(&self, person: PersonId) -> (Option<PersonId>, Option<PersonId>) {
        let Some(node) = self.persons.get(&person) else {
            return (None, None);
        };
        let Some(union_id) = node.parent_union_id else {
            return (None, None);
        };
        let Some(union) = self.unions.get(&union_id) else {
            return (None, None);
        };
        union.parents()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn simple_pedigree() -> Pedigree {
        // 1, 2 are founders; union 1 has them as parents of 3.
        let mut persons = BTreeMap::new();
        persons.insert(PersonId::new(1), PersonNode::new(PersonId::new(1), None));
        persons.insert(PersonId::new(2), PersonNode::new(PersonId::new(2), None));
        persons.insert(
            PersonId::new(3),
            PersonNode::new(PersonId::new(3), Some(UnionId::new(1))),
        );

        let mut unions = BTreeMap::new();
        unions.insert(
            UnionId::new(1),
            UnionNode::new(
                UnionId::new(1),
                Some(PersonId::new(1)),
                Some(PersonId::new(2)),
                vec![PersonId::new(3)],
            ),
        );

        Pedigree::new(persons, unions)
    }

    #[test]
    fn parents_of_founder_are_absent() {
        let pedigree = simple_pedigree();
        assert_eq!(pedigree.parents(PersonId::new(1)), (None, None));
    }

    #[test]
    fn parents_of_child_resolve_through_union() {
        let pedigree = simple_pedigree();
        assert_eq!(
            pedigree.parents(PersonId::new(3)),
            (Some(PersonId::new(1)), Some(PersonId::new(2)))
        );
    }

    #[test]
    fn parents_of_unknown_person_are_absent() {
        let pedigree = simple_pedigree();
        assert_eq!(pedigree.parents(PersonId::new(99)), (None, None));
    }

    #[test]
    fn dangling_parent_union_yields_absent_parents() {
        let mut persons = BTreeMap::new();
        persons.insert(
            PersonId::new(1),
            PersonNode::new(PersonId::new(1), Some(UnionId::new(404))),
        );
        let pedigree = Pedigree::new(persons, BTreeMap::new());
        assert_eq!(pedigree.parents(PersonId::new(1)), (None, None));
    }
}
