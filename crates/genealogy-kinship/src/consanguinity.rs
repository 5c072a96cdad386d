//! Fixed-point orchestrator that resolves consanguinity for every person in
//! a pedigree.

use std::collections::BTreeMap;

use genealogy_graph::{topological_order, Pedigree};
use genealogy_types::{PersonId, UnionId};

use crate::error::ConsanguinityError;
use crate::kinship::KinshipCalculator;

/// Compute the consanguinity coefficient of every person in `pedigree`.
///
/// Consanguinity of a person is the kinship coefficient between their two
/// parents; it is needed before kinship between *other* pairs can be
/// resolved, because `phi(x, x) = 0.5 * (1 + consanguinity(x))` feeds the
/// recursion's base case. The sweep processes persons in ancestor-rank
/// order (topological, ancestors first) so a family's consanguinity is
/// available by the time any of its children are resolved, but tolerates a
/// partially pre-computed pedigree: a person whose `needs_update` flag is
/// already `false` contributes its cached value to `family_consanguinity`
/// without being recomputed.
///
/// With `from_scratch`, every person is treated as needing a fresh
/// computation regardless of its stored `needs_update` flag.
///
/// The final values are written back into `pedigree`'s person nodes (`
/// consanguinity` and `needs_update = false`) in addition to being
/// returned.
///
/// # Errors
///
/// Returns [`ConsanguinityError::AncestralLoop`] if the ancestry graph
/// contains a cycle, [`ConsanguinityError::MissingUnion`] if a person's
/// parent union id does not resolve, [`ConsanguinityError::SelfMarriage`]
/// if a union lists the same person as both parents, and
/// [`ConsanguinityError::Unresolved`] if a full pass over the ordering made
/// no progress while persons remain pending (a structural inconsistency,
/// since a DAG topological order always admits a solution).
pub fn compute_consanguinity(
    pedigree: &mut Pedigree,
    from_scratch: bool,
) -> Result<BTreeMap<PersonId, f64>, ConsanguinityError> {
    if pedigree.person_count() == 0 {
        return Ok(BTreeMap::new());
    }

    let mut needs_update: BTreeMap<PersonId, bool> = BTreeMap::new();
    let mut consanguinity: BTreeMap<PersonId, f64> = BTreeMap::new();
    for (&person_id, node) in pedigree.persons() {
        if from_scratch {
            needs_update.insert(person_id, true);
            consanguinity.insert(person_id, 0.0);
        } else {
            needs_update.insert(person_id, node.needs_update);
            consanguinity.insert(person_id, node.consanguinity);
        }
    }

    for (&union_id, union) in pedigree.unions() {
        let (father_id, mother_id) = union.parents();
        if let (Some(father_id), Some(mother_id)) = (father_id, mother_id) {
            if father_id == mother_id {
                return Err(ConsanguinityError::SelfMarriage { union_id, parent_id: father_id });
            }
        }
    }

    let mut family_consanguinity: BTreeMap<UnionId, Option<f64>> =
        pedigree.unions().map(|(&union_id, _)| (union_id, None)).collect();

    if !from_scratch {
        for (&person_id, node) in pedigree.persons() {
            if needs_update.get(&person_id).copied().unwrap_or(true) {
                continue;
            }
            if let Some(union_id) = node.parent_union_id {
                let already_cached = family_consanguinity.get(&union_id).copied().flatten().is_some();
                if !already_cached {
                    let value = consanguinity.get(&person_id).copied().unwrap_or(0.0);
                    family_consanguinity.insert(union_id, Some(value));
                }
            }
        }
    }

    let ordering = topological_order(pedigree)?;
    let mut kinship = KinshipCalculator::new(pedigree, consanguinity.clone());

    let mut remaining = needs_update.values().filter(|pending| **pending).count();

    while remaining > 0 {
        let mut progress = false;

        for &person_id in &ordering {
            if !needs_update.get(&person_id).copied().unwrap_or(false) {
                continue;
            }
            let Some(node) = pedigree.person(person_id) else {
                continue;
            };

            let consang_value = match node.parent_union_id {
                None => 0.0,
                Some(union_id) => {
                    if let Some(cached) = family_consanguinity.get(&union_id).copied().flatten() {
                        cached
                    } else {
                        let union = pedigree
                            .union(union_id)
                            .ok_or(ConsanguinityError::MissingUnion { person_id, union_id })?;
                        let (father_id, mother_id) = union.parents();

                        let parent_ready = |parent: Option<PersonId>| {
                            parent.is_none_or(|id| !needs_update.get(&id).copied().unwrap_or(false))
                        };
                        if !(parent_ready(father_id) && parent_ready(mother_id)) {
                            continue;
                        }

                        let value = kinship.kinship(father_id, mother_id);
                        family_consanguinity.insert(union_id, Some(value));
                        value
                    }
                }
            };

            needs_update.insert(person_id, false);
            consanguinity.insert(person_id, consang_value);
            kinship.set_consanguinity(person_id, consang_value);
            remaining -= 1;
            progress = true;
        }

        if !progress {
            let unresolved: Vec<PersonId> = needs_update
                .iter()
                .filter(|(_, pending)| **pending)
                .map(|(&id, _)| id)
                .collect();
            tracing::warn!(count = unresolved.len(), "consanguinity sweep stalled");
            return Err(ConsanguinityError::Unresolved(unresolved));
        }
    }

    for (&person_id, &value) in &consanguinity {
        if let Some(node) = pedigree.person_mut(person_id) {
            node.consanguinity = value;
            node.needs_update = false;
        }
    }

    Ok(consanguinity)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap as Map;

    use genealogy_types::{PersonNode, UnionId, UnionNode};

    use super::*;

    #[test]
    fn empty_pedigree_yields_empty_consanguinity() {
        let mut pedigree = Pedigree::new(Map::new(), Map::new());
        let result = compute_consanguinity(&mut pedigree, false).unwrap_or_default();
        assert!(result.is_empty());
    }

    #[test]
    fn founders_have_zero_consanguinity() {
        let mut persons = Map::new();
        persons.insert(PersonId::new(1), PersonNode::new(PersonId::new(1), None));
        persons.insert(PersonId::new(2), PersonNode::new(PersonId::new(2), None));
        let mut pedigree = Pedigree::new(persons, Map::new());

        let result = compute_consanguinity(&mut pedigree, false).unwrap_or_default();
        assert_eq!(result.get(&PersonId::new(1)), Some(&0.0));
        assert_eq!(result.get(&PersonId::new(2)), Some(&0.0));
    }

    #[test]
    fn uncle_niece_union_produces_nonzero_consanguinity() {
        // 1, 2 found a union producing 3 (uncle) and 4. 4 unions with 5 (an
        // unrelated founder) producing 6. 3 unions with 6 producing 7: 7's
        // consanguinity is the kinship between 3 and 6, i.e. uncle-niece.
        let mut persons = Map::new();
        persons.insert(PersonId::new(1), PersonNode::new(PersonId::new(1), None));
        persons.insert(PersonId::new(2), PersonNode::new(PersonId::new(2), None));
        persons.insert(PersonId::new(5), PersonNode::new(PersonId::new(5), None));
        persons.insert(
            PersonId::new(3),
            PersonNode::new(PersonId::new(3), Some(UnionId::new(1))),
        );
        persons.insert(
            PersonId::new(4),
            PersonNode::new(PersonId::new(4), Some(UnionId::new(1))),
        );
        persons.insert(
            PersonId::new(6),
            PersonNode::new(PersonId::new(6), Some(UnionId::new(2))),
        );
        persons.insert(
            PersonId::new(7),
            PersonNode::new(PersonId::new(7), Some(UnionId::new(3))),
        );

        let mut unions = Map::new();
        unions.insert(
            UnionId::new(1),
            UnionNode::new(
                UnionId::new(1),
                Some(PersonId::new(1)),
                Some(PersonId::new(2)),
                vec![PersonId::new(3), PersonId::new(4)],
            ),
        );
        unions.insert(
            UnionId::new(2),
            UnionNode::new(
                UnionId::new(2),
                Some(PersonId::new(4)),
                Some(PersonId::new(5)),
                vec![PersonId::new(6)],
            ),
        );
        unions.insert(
            UnionId::new(3),
            UnionNode::new(
                UnionId::new(3),
                Some(PersonId::new(3)),
                Some(PersonId::new(6)),
                vec![PersonId::new(7)],
            ),
        );

        let mut pedigree = Pedigree::new(persons, unions);
        let result = compute_consanguinity(&mut pedigree, false).unwrap_or_default();
        let consang_7 = result.get(&PersonId::new(7)).copied().unwrap_or(0.0);
        assert!(consang_7 > 0.0, "uncle-niece pairing must produce nonzero consanguinity");
        assert!((consang_7 - 0.125).abs() < 1e-9);
    }

    #[test]
    fn self_marriage_is_reported() {
        let mut persons = Map::new();
        persons.insert(PersonId::new(1), PersonNode::new(PersonId::new(1), None));
        persons.insert(
            PersonId::new(2),
            PersonNode::new(PersonId::new(2), Some(UnionId::new(1))),
        );
        let mut unions = Map::new();
        unions.insert(
            UnionId::new(1),
            UnionNode::new(
                UnionId::new(1),
                Some(PersonId::new(1)),
                Some(PersonId::new(1)),
                vec![PersonId::new(2)],
            ),
        );
        let mut pedigree = Pedigree::new(persons, unions);
        let result = compute_consanguinity(&mut pedigree, true);
        assert!(matches!(
            result,
            Err(ConsanguinityError::SelfMarriage { parent_id, .. }) if parent_id == PersonId::new(1)
        ));
    }

    #[test]
    fn dangling_parent_union_is_reported() {
        let mut persons = Map::new();
        persons.insert(
            PersonId::new(1),
            PersonNode::new(PersonId::new(1), Some(UnionId::new(404))),
        );
        let mut pedigree = Pedigree::new(persons, Map::new());
        let result = compute_consanguinity(&mut pedigree, false);
        assert!(matches!(result, Err(ConsanguinityError::MissingUnion { .. })));
    }
}
