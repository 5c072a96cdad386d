//! The relationship sweep: a ranked-queue ancestor walk that computes the
//! coefficient of relationship between two individuals and, optionally,
//! every branch path that connects them through a shared ancestor.

use std::collections::BTreeMap;

use genealogy_graph::{ancestor_rank, Pedigree};
use genealogy_types::PersonId;

use crate::error::RelationshipError;
use crate::state::{extend_branches, AncestorStatus, BranchRecord, RelationshipState};

/// Coefficient and top ancestors returned by a bare
/// [`RelationshipInfo::relationship_and_links`] call.
#[derive(Debug, Clone)]
pub struct RelationshipResult {
    /// The coefficient of relationship between the two queried persons.
    pub coefficient: f64,
    /// The most recent common ancestors whose contribution was folded into
    /// `coefficient`. Populated only when branch tracking was requested.
    pub top_ancestors: Vec<PersonId>,
}

/// A path from a shared ancestor down to one of the two queried persons.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BranchPath {
    /// Number of generations between the ancestor and the query target.
    pub length: i64,
    /// Number of distinct paths of this length, or `-1` if no longer exact.
    pub multiplicity: i64,
    /// Full path from the ancestor to the query target, inclusive.
    pub path: Vec<PersonId>,
}

/// Full relationship summary between two individuals: coefficient, the
/// common ancestors it was built from, and every branch path from each
/// ancestor down to each of the two individuals.
#[derive(Debug, Clone)]
pub struct RelationshipSummary {
    /// First queried person.
    pub person_a: PersonId,
    /// Second queried person.
    pub person_b: PersonId,
    /// Coefficient of relationship.
    pub coefficient: f64,
    /// Shared ancestors that contributed to `coefficient`.
    pub ancestors: Vec<PersonId>,
    /// Branch paths from each ancestor to `person_a`.
    pub paths_to_a: BTreeMap<PersonId, Vec<BranchPath>>,
    /// Branch paths from each ancestor to `person_b`.
    pub paths_to_b: BTreeMap<PersonId, Vec<BranchPath>>,
}

/// Ensure the pedigree's consanguinity values are up to date before running
/// a relationship sweep. The sweep reads `PersonNode::consanguinity`
/// directly and does not recompute it.
///
/// # Errors
///
/// Propagates any error raised by [`genealogy_kinship::compute_consanguinity`].
pub fn prepare(pedigree: &mut Pedigree) -> Result<(), RelationshipError> {
    genealogy_kinship::compute_consanguinity(pedigree, false)?;
    Ok(())
}

/// State container for repeated relationship queries over one pedigree,
/// mirroring GeneWeb's `Consang.relationship_info`.
///
/// Ancestor rank is computed once at construction; every subsequent
/// [`relationship_and_links`](Self::relationship_and_links) call reuses it
/// and only resets the per-node state actually touched by that query.
pub struct RelationshipInfo<'a> {
    pedigree: &'a Pedigree,
    rank: BTreeMap<PersonId, usize>,
    states: BTreeMap<PersonId, RelationshipState>,
    queue: Vec<Vec<PersonId>>,
    mark: u64,
}

impl<'a> RelationshipInfo<'a> {
    /// Build a `RelationshipInfo` over every person in `pedigree`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ancestry graph contains a cycle.
    pub fn new(pedigree: &'a Pedigree) -> Result<Self, RelationshipError> {
        let rank = ancestor_rank(pedigree)?;
        let states = pedigree.persons().map(|(&id, _)| (id, RelationshipState::default())).collect();
        let max_rank = rank.values().copied().max();
        let queue_len = max_rank.map_or(0, |r| r + 1);
        Ok(Self {
            pedigree,
            rank,
            states,
            queue: vec![Vec::new(); queue_len],
            mark: 0,
        })
    }

    fn next_mark(&mut self) -> u64 {
        self.mark += 1;
        self.mark
    }

    fn ensure_queue_size(&mut self, level: usize) {
        if level >= self.queue.len() {
            self.queue.resize_with(level + 1, Vec::new);
        }
    }

    fn reset_state(&mut self, pid: PersonId, mark: u64) {
        if let Some(state) = self.states.get_mut(&pid) {
            *state = RelationshipState {
                inserted_mark: mark,
                ..RelationshipState::default()
            };
        }
    }

    fn insert(&mut self, pid: PersonId, qi: usize, qmax: &mut Option<usize>, mark: u64) {
        let Some(&rank) = self.rank.get(&pid) else {
            return;
        };
        self.ensure_queue_size(rank);
        self.reset_state(pid, mark);

        match *qmax {
            None => {
                for level in qi..rank {
                    if let Some(slot) = self.queue.get_mut(level) {
                        slot.clear();
                    }
                }
                *qmax = Some(rank);
                if let Some(slot) = self.queue.get_mut(rank) {
                    *slot = vec![pid];
                }
            }
            Some(previous_max) => {
                if rank > previous_max {
                    for level in (previous_max + 1)..=rank {
                        if let Some(slot) = self.queue.get_mut(level) {
                            slot.clear();
                        }
                    }
                    *qmax = Some(rank);
                }
                if let Some(slot) = self.queue.get_mut(rank) {
                    slot.insert(0, pid);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn treat_parent(
        &mut self,
        src_id: PersonId,
        src_state: &RelationshipState,
        parent_id: Option<PersonId>,
        qi: usize,
        qmax: &mut Option<usize>,
        mark: u64,
        nb_anc1: &mut i64,
        nb_anc2: &mut i64,
        include_branches: bool,
    ) {
        let Some(parent_id) = parent_id else {
            return;
        };
        if !self.states.contains_key(&parent_id) {
            return;
        }

        let inserted_mark = self.states.get(&parent_id).map_or(0, |state| state.inserted_mark);
        if inserted_mark != mark {
            self.insert(parent_id, qi, qmax, mark);
        }

        let weight1_contribution = 0.5 * src_state.weight1;
        let weight2_contribution = 0.5 * src_state.weight2;

        let Some(parent_state) = self.states.get_mut(&parent_id) else {
            return;
        };

        if src_state.anc_stat1 == AncestorStatus::Is && parent_state.anc_stat1 != AncestorStatus::Is {
            parent_state.anc_stat1 = AncestorStatus::Is;
            *nb_anc1 += 1;
        }
        if src_state.anc_stat2 == AncestorStatus::Is && parent_state.anc_stat2 != AncestorStatus::Is {
            parent_state.anc_stat2 = AncestorStatus::Is;
            *nb_anc2 += 1;
        }

        parent_state.weight1 += weight1_contribution;
        parent_state.weight2 += weight2_contribution;
        parent_state.relationship += weight1_contribution * weight2_contribution;

        if src_state.eliminate {
            parent_state.eliminate = true;
        }

        if include_branches && !parent_state.eliminate {
            let lens1 = std::mem::take(&mut parent_state.lens1);
            parent_state.lens1 = extend_branches(src_id, lens1, &src_state.lens1);
            let lens2 = std::mem::take(&mut parent_state.lens2);
            parent_state.lens2 = extend_branches(src_id, lens2, &src_state.lens2);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn treat_ancestor(
        &mut self,
        pid: PersonId,
        relationship: &mut f64,
        nb_anc1: &mut i64,
        nb_anc2: &mut i64,
        tops: &mut Vec<PersonId>,
        qi: usize,
        qmax: &mut Option<usize>,
        mark: u64,
        include_branches: bool,
    ) {
        let Some(mut state) = self.states.get(&pid).cloned() else {
            return;
        };
        let consanguinity = self.pedigree.person(pid).map_or(0.0, |node| node.consanguinity);
        let contribution = (state.weight1 * state.weight2) - (state.relationship * (1.0 + consanguinity));

        if state.anc_stat1 == AncestorStatus::Is {
            *nb_anc1 -= 1;
        }
        if state.anc_stat2 == AncestorStatus::Is {
            *nb_anc2 -= 1;
        }
        *relationship += contribution;

        if include_branches && contribution != 0.0 && !state.eliminate {
            tops.push(pid);
            state.eliminate = true;
            if let Some(target) = self.states.get_mut(&pid) {
                target.eliminate = true;
            }
        }

        let Some(node) = self.pedigree.person(pid) else {
            return;
        };
        let Some(union_id) = node.parent_union_id else {
            return;
        };
        let Some(union) = self.pedigree.union(union_id) else {
            return;
        };
        let (father_id, mother_id) = union.parents();

        self.treat_parent(pid, &state, father_id, qi, qmax, mark, nb_anc1, nb_anc2, include_branches);
        self.treat_parent(pid, &state, mother_id, qi, qmax, mark, nb_anc1, nb_anc2, include_branches);
    }

    /// Compute the coefficient of relationship between `person_a` and
    /// `person_b`. When `include_branches` is set, branch records are
    /// accumulated so the common ancestors can later be reconstructed with
    /// [`summarize`](Self::summarize).
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipError::UnknownPerson`] if either person is
    /// absent from the pedigree.
    pub fn relationship_and_links(
        &mut self,
        person_a: PersonId,
        person_b: PersonId,
        include_branches: bool,
    ) -> Result<RelationshipResult, RelationshipError> {
        if person_a == person_b {
            return Ok(RelationshipResult {
                coefficient: 1.0,
                top_ancestors: Vec::new(),
            });
        }

        let rank_a = self.rank.get(&person_a).copied();
        let rank_b = self.rank.get(&person_b).copied();
        let (Some(rank_a), Some(rank_b)) = (rank_a, rank_b) else {
            let missing = if rank_a.is_none() { person_a } else { person_b };
            return Err(RelationshipError::UnknownPerson(missing));
        };

        let mark = self.next_mark();
        let mut qi = rank_a.min(rank_b);
        let mut qmax: Option<usize> = None;

        self.insert(person_a, qi, &mut qmax, mark);
        self.insert(person_b, qi, &mut qmax, mark);

        if let Some(state_a) = self.states.get_mut(&person_a) {
            state_a.weight1 = 1.0;
            state_a.lens1 = vec![BranchRecord { length: 0, count: 1, nodes: Vec::new() }];
            state_a.anc_stat1 = AncestorStatus::Is;
        }
        if let Some(state_b) = self.states.get_mut(&person_b) {
            state_b.weight2 = 1.0;
            state_b.lens2 = vec![BranchRecord { length: 0, count: 1, nodes: Vec::new() }];
            state_b.anc_stat2 = AncestorStatus::Is;
        }

        let mut relationship = 0.0;
        let mut nb_anc1: i64 = 1;
        let mut nb_anc2: i64 = 1;
        let mut tops: Vec<PersonId> = Vec::new();

        while nb_anc1 > 0 && nb_anc2 > 0 && qmax.is_some_and(|max| qi <= max) {
            let current_level = self.queue.get_mut(qi).map(std::mem::take).unwrap_or_default();
            for node_id in current_level {
                self.treat_ancestor(
                    node_id,
                    &mut relationship,
                    &mut nb_anc1,
                    &mut nb_anc2,
                    &mut tops,
                    qi,
                    &mut qmax,
                    mark,
                    include_branches,
                );
            }
            qi += 1;
        }

        tracing::debug!(%person_a, %person_b, coefficient = 0.5 * relationship, "relationship sweep complete");

        Ok(RelationshipResult {
            coefficient: 0.5 * relationship,
            top_ancestors: tops,
        })
    }

    /// Compute the full [`RelationshipSummary`] between two individuals,
    /// including every branch path from each common ancestor.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipError::UnknownPerson`] if either person is
    /// absent from the pedigree.
    pub fn summarize(&mut self, person_a: PersonId, person_b: PersonId) -> Result<RelationshipSummary, RelationshipError> {
        let result = self.relationship_and_links(person_a, person_b, true)?;

        let mut paths_to_a = BTreeMap::new();
        let mut paths_to_b = BTreeMap::new();

        for &ancestor_id in &result.top_ancestors {
            let Some(state) = self.states.get(&ancestor_id) else {
                continue;
            };

            let branches_to_a = state
                .lens1
                .iter()
                .map(|branch| BranchPath {
                    length: branch.length,
                    multiplicity: branch.count,
                    path: std::iter::once(ancestor_id)
                        .chain(branch.nodes.iter().copied())
                        .chain(std::iter::once(person_a))
                        .collect(),
                })
                .collect();
            let branches_to_b = state
                .lens2
                .iter()
                .map(|branch| BranchPath {
                    length: branch.length,
                    multiplicity: branch.count,
                    path: std::iter::once(ancestor_id)
                        .chain(branch.nodes.iter().copied())
                        .chain(std::iter::once(person_b))
                        .collect(),
                })
                .collect();

            paths_to_a.insert(ancestor_id, branches_to_a);
            paths_to_b.insert(ancestor_id, branches_to_b);
        }

        Ok(RelationshipSummary {
            person_a,
            person_b,
            coefficient: result.coefficient,
            ancestors: result.top_ancestors,
            paths_to_a,
            paths_to_b,
        })
    }
}
