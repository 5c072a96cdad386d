//! Topological ordering of a pedigree's ancestry graph.
//!
//! Produces an order in which every person appears after both of their
//! parents (when present), using an explicit-stack, three-state
//! (unvisited / on-stack / finished) depth-first search. An explicit stack
//! is used instead of recursion so traversal depth is not bounded by the
//! host's call stack -- pedigrees with deep ancestor chains are the whole
//! point of this engine.

use std::collections::BTreeMap;

use genealogy_types::PersonId;

use crate::error::PedigreeError;
use crate::pedigree::Pedigree;

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack,
    Finished,
}

struct Frame {
    person: PersonId,
    parents: Vec<PersonId>,
    next: usize,
}

fn parent_candidates(pedigree: &Pedigree, person: PersonId) -> Vec<PersonId> {
    let (father, mother) = pedigree.parents(person);
    [father, mother]
        .into_iter()
        .flatten()
        .filter(|candidate| pedigree.person(*candidate).is_some())
        .collect()
}

/// Compute an ancestors-before-descendants order over every person in
/// `pedigree`.
///
/// # Errors
///
/// Returns [`PedigreeError::AncestralLoop`] if the ancestry graph contains a
/// directed cycle.
pub fn topological_order(pedigree: &Pedigree) -> Result<Vec<PersonId>, PedigreeError> {
    let mut order: Vec<PersonId> = Vec::with_capacity(pedigree.person_count());
    let mut state: BTreeMap<PersonId, VisitState> = BTreeMap::new();
    let mut path: Vec<PersonId> = Vec::new();

    let all_ids: Vec<PersonId> = pedigree.persons().map(|(id, _)| *id).collect();

    for start in all_ids {
        if matches!(state.get(&start), Some(VisitState::Finished) | Some(VisitState::OnStack)) {
            continue;
        }

        state.insert(start, VisitState::OnStack);
        path.push(start);
        let mut frames: Vec<Frame> = vec![Frame {
            person: start,
            parents: parent_candidates(pedigree, start),
            next: 0,
        }];

        loop {
            let Some(frame) = frames.last_mut() else {
                break;
            };

            let Some(&parent) = frame.parents.get(frame.next) else {
                if let Some(finished) = frames.pop() {
                    state.insert(finished.person, VisitState::Finished);
                    order.push(finished.person);
                    path.pop();
                }
                continue;
            };
            frame.next += 1;

            match state.get(&parent).copied().unwrap_or(VisitState::Unvisited) {
                VisitState::Unvisited => {
                    state.insert(parent, VisitState::OnStack);
                    path.push(parent);
                    frames.push(Frame {
                        person: parent,
                        parents: parent_candidates(pedigree, parent),
                        next: 0,
                    });
                }
                VisitState::OnStack => {
                    let cycle_start = path.iter().position(|candidate| *candidate == parent);
                    let mut cycle: Vec<PersonId> = match cycle_start {
                        Some(index) => path.get(index..).map(<[PersonId]>::to_vec).unwrap_or_default(),
                        None => Vec::new(),
                    };
                    cycle.push(parent);
                    tracing::warn!(person_id = %parent, "ancestral loop detected");
                    return Err(PedigreeError::AncestralLoop {
                        person_id: parent,
                        cycle,
                    });
                }
                VisitState::Finished => {}
            }
        }
    }

    Ok(order)
}

/// Compute the "ancestor rank" of every person: the reversed topological
/// order, so that `rank[ancestor] > rank[descendant]` for every ancestor /
/// descendant pair and founders receive the largest ranks.
///
/// # Errors
///
/// Returns [`PedigreeError::AncestralLoop`] if the ancestry graph contains a
/// directed cycle.
pub fn ancestor_rank(pedigree: &Pedigree) -> Result<BTreeMap<PersonId, usize>, PedigreeError> {
    let order = topological_order(pedigree)?;
    Ok(order
        .into_iter()
        .rev()
        .enumerate()
        .map(|(rank, person)| (person, rank))
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap as Map;

    use genealogy_types::{PersonNode, UnionId, UnionNode};

    use super::*;
    use crate::pedigree::Pedigree;

    fn person(id: i64, parent_union: Option<i64>) -> (PersonId, PersonNode) {
        let pid = PersonId::new(id);
        (
            pid,
            PersonNode::new(pid, parent_union.map(UnionId::new)),
        )
    }

    fn union(id: i64, father: Option<i64>, mother: Option<i64>, children: &[i64]) -> (UnionId, UnionNode) {
        let uid = UnionId::new(id);
        (
            uid,
            UnionNode::new(
                uid,
                father.map(PersonId::new),
                mother.map(PersonId::new),
                children.iter().map(|&c| PersonId::new(c)).collect(),
            ),
        )
    }

    #[test]
    fn founders_precede_children_in_order() {
        let persons: Map<_, _> = [person(1, None), person(2, None), person(3, Some(1))]
            .into_iter()
            .collect();
        let unions: Map<_, _> = [union(1, Some(1), Some(2), &[3])].into_iter().collect();
        let pedigree = Pedigree::new(persons, unions);

        let order = topological_order(&pedigree).unwrap_or_default();
        let pos = |id: i64| order.iter().position(|p| *p == PersonId::new(id));
        assert!(pos(1) < pos(3));
        assert!(pos(2) < pos(3));
    }

    #[test]
    fn rank_of_ancestor_exceeds_rank_of_descendant() {
        let persons: Map<_, _> = [person(1, None), person(2, None), person(3, Some(1))]
            .into_iter()
            .collect();
        let unions: Map<_, _> = [union(1, Some(1), Some(2), &[3])].into_iter().collect();
        let pedigree = Pedigree::new(persons, unions);

        let rank = ancestor_rank(&pedigree).unwrap_or_default();
        let r = |id: i64| rank.get(&PersonId::new(id)).copied().unwrap_or(0);
        assert!(r(1) > r(3));
        assert!(r(2) > r(3));
    }

    #[test]
    fn self_marriage_is_detected_as_a_loop() {
        let persons: Map<_, _> = [person(1, Some(1))].into_iter().collect();
        let unions: Map<_, _> = [union(1, Some(1), None, &[1])].into_iter().collect();
        let pedigree = Pedigree::new(persons, unions);

        let result = topological_order(&pedigree);
        assert!(matches!(result, Err(PedigreeError::AncestralLoop { .. })));
    }

    #[test]
    fn dangling_parent_reference_is_skipped() {
        let persons: Map<_, _> = [person(1, Some(1))].into_iter().collect();
        // Union references a father id (99) that has no PersonNode.
        let unions: Map<_, _> = [union(1, Some(99), None, &[1])].into_iter().collect();
        let pedigree = Pedigree::new(persons, unions);

        let order = topological_order(&pedigree).unwrap_or_default();
        assert_eq!(order, vec![PersonId::new(1)]);
    }

    #[test]
    fn empty_pedigree_has_empty_order() {
        let pedigree = Pedigree::new(Map::new(), Map::new());
        assert_eq!(topological_order(&pedigree).unwrap_or_default(), Vec::new());
    }
}
