//! Per-node bookkeeping carried during a single relationship sweep.

use genealogy_types::PersonId;

/// Whether a node is known to sit on an ancestor path of one of the two
/// queried individuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AncestorStatus {
    /// Not yet confirmed to be an ancestor.
    #[default]
    Maybe,
    /// Confirmed ancestor: at least one of its children carries the same
    /// status.
    Is,
}

/// One length/multiplicity bucket of ancestor-to-target paths, accumulated
/// while walking back down from an ancestor to a query target.
///
/// `nodes` holds the intermediate persons on the path, nearest-ancestor
/// first; `count` saturates to `-1` once two branches of differing origin
/// would otherwise need to be merged into a multiplicity count that can no
/// longer be trusted as exact.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchRecord {
    /// Number of generations between the ancestor and the query target.
    pub length: i64,
    /// How many distinct paths of this length exist, or `-1` if that count
    /// is no longer meaningful.
    pub count: i64,
    /// Persons strictly between the ancestor and the query target,
    /// nearest-ancestor first.
    pub nodes: Vec<PersonId>,
}

/// Per-person working state for one `relationship_and_links` call.
#[derive(Debug, Clone, Default)]
pub struct RelationshipState {
    /// Accumulated probability weight of being an ancestor of person A.
    pub weight1: f64,
    /// Accumulated probability weight of being an ancestor of person B.
    pub weight2: f64,
    /// Accumulated `weight1 * weight2` contribution pending subtraction of
    /// double-counted shared ancestry.
    pub relationship: f64,
    /// Branch records toward person A, bucketed by branch length.
    pub lens1: Vec<BranchRecord>,
    /// Branch records toward person B, bucketed by branch length.
    pub lens2: Vec<BranchRecord>,
    /// Sweep generation this state was last reset for; distinguishes stale
    /// state left over from a previous query.
    pub inserted_mark: u64,
    /// Once set, this node's contribution has already been folded into the
    /// running total and must not contribute branch information again.
    pub eliminate: bool,
    /// Ancestor status with respect to person A.
    pub anc_stat1: AncestorStatus,
    /// Ancestor status with respect to person B.
    pub anc_stat2: AncestorStatus,
}

pub(crate) fn combine_counts(left: i64, right: i64) -> i64 {
    if left < 0 || right < 0 {
        return -1;
    }
    left.checked_add(right).filter(|value| *value >= 0).unwrap_or(-1)
}

pub(crate) fn insert_branch(parent_id: PersonId, lens: &[BranchRecord], branch: &BranchRecord) -> Vec<BranchRecord> {
    let new_length = branch.length + 1;
    let new_count = branch.count;

    let Some((head, tail)) = lens.split_first() else {
        return vec![BranchRecord {
            length: new_length,
            count: new_count,
            nodes: vec![parent_id],
        }];
    };

    if head.length == new_length {
        let combined = combine_counts(new_count, head.count);
        let mut nodes = vec![parent_id];
        nodes.extend(head.nodes.iter().copied());
        let mut result = vec![BranchRecord {
            length: new_length,
            count: combined,
            nodes,
        }];
        result.extend(tail.iter().cloned());
        result
    } else {
        let mut result = vec![head.clone()];
        result.extend(insert_branch(parent_id, tail, branch));
        result
    }
}

pub(crate) fn extend_branches(parent_id: PersonId, target: Vec<BranchRecord>, branches: &[BranchRecord]) -> Vec<BranchRecord> {
    let mut result = target;
    for branch in branches {
        result = insert_branch(parent_id, &result, branch);
    }
    result
}
