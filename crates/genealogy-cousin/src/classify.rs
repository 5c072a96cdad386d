//! Turning a [`RelationshipSummary`] into structured [`CousinDegree`]
//! classifications.

use genealogy_relationship::{BranchPath, RelationshipSummary};
use genealogy_types::PersonId;

use crate::types::{CousinDegree, RelationshipKind};

/// One candidate common ancestor with its minimum path lengths to each
/// queried person, ordered the way `GeneWeb` prefers the closest shared
/// ancestor.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    ancestor: PersonId,
    generations_a: i64,
    generations_b: i64,
}

impl Candidate {
    /// Sort key: minimize the deeper branch first, then the combined
    /// path length, then each branch individually. Lexicographically
    /// smallest wins.
    const fn ordering(self) -> (i64, i64, i64, i64) {
        let deeper = if self.generations_a > self.generations_b { self.generations_a } else { self.generations_b };
        let total = self.generations_a + self.generations_b;
        (deeper, total, self.generations_a, self.generations_b)
    }
}

/// Return every qualifying cousin-degree candidate, most preferred
/// first.
#[must_use]
pub fn infer_all_cousin_degrees(summary: &RelationshipSummary) -> Vec<CousinDegree> {
    if summary.person_a == summary.person_b {
        return vec![CousinDegree {
            kind: RelationshipKind::SamePerson,
            degree: None,
            removal: None,
            generations_a: Some(0),
            generations_b: Some(0),
            ancestor: Some(summary.person_a),
        }];
    }

    let mut candidates = collect_candidates(summary);
    candidates.sort_by_key(|candidate| candidate.ordering());

    candidates.into_iter().filter_map(|candidate| candidate_to_degree(candidate)).collect()
}

/// Infer the single best cousin-degree classification for a relationship
/// summary, or [`RelationshipKind::Unrelated`] if no shared ancestor
/// qualifies.
#[must_use]
pub fn infer_cousin_degree(summary: &RelationshipSummary) -> CousinDegree {
    infer_all_cousin_degrees(summary).into_iter().next().unwrap_or(CousinDegree {
        kind: RelationshipKind::Unrelated,
        degree: None,
        removal: None,
        generations_a: None,
        generations_b: None,
        ancestor: None,
    })
}

fn collect_candidates(summary: &RelationshipSummary) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for &ancestor in &summary.ancestors {
        let paths_a = summary.paths_to_a.get(&ancestor).map(Vec::as_slice).unwrap_or(&[]);
        let paths_b = summary.paths_to_b.get(&ancestor).map(Vec::as_slice).unwrap_or(&[]);
        let (Some(min_a), Some(min_b)) = (min_generations(paths_a), min_generations(paths_b)) else {
            continue;
        };
        candidates.push(Candidate { ancestor, generations_a: min_a, generations_b: min_b });
    }
    candidates.sort_by_key(|candidate| candidate.ordering());
    candidates
}

fn min_generations(paths: &[BranchPath]) -> Option<i64> {
    paths.iter().map(|path| path.length).min()
}

/// Classify a single `(ancestor, generations_a, generations_b)` triple
/// directly, bypassing candidate collection/ordering. Used when the two
/// path lengths are already known, e.g. one cousin-matrix entry.
pub(crate) fn infer_cousin_degree_for_generations(
    ancestor: PersonId,
    generations_a: i64,
    generations_b: i64,
) -> Option<CousinDegree> {
    candidate_to_degree(Candidate { ancestor, generations_a, generations_b })
}

fn candidate_to_degree(candidate: Candidate) -> Option<CousinDegree> {
    let ga = candidate.generations_a;
    let gb = candidate.generations_b;

    if ga == 0 && gb == 0 {
        return Some(CousinDegree {
            kind: RelationshipKind::SamePerson,
            degree: None,
            removal: None,
            generations_a: Some(0),
            generations_b: Some(0),
            ancestor: Some(candidate.ancestor),
        });
    }

    if ga == 0 || gb == 0 {
        return Some(CousinDegree {
            kind: RelationshipKind::DirectAncestor,
            degree: None,
            removal: None,
            generations_a: Some(ga),
            generations_b: Some(gb),
            ancestor: Some(candidate.ancestor),
        });
    }

    if ga == 1 && gb == 1 {
        return Some(CousinDegree {
            kind: RelationshipKind::Sibling,
            degree: None,
            removal: None,
            generations_a: Some(ga),
            generations_b: Some(gb),
            ancestor: Some(candidate.ancestor),
        });
    }

    let degree = ga.min(gb) - 1;
    if degree <= 0 {
        return None;
    }

    Some(CousinDegree {
        kind: RelationshipKind::Cousin,
        degree: Some(degree),
        removal: Some((ga - gb).abs()),
        generations_a: Some(ga),
        generations_b: Some(gb),
        ancestor: Some(candidate.ancestor),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap as Map;

    use super::*;

    fn summary_with(ancestor: PersonId, len_a: i64, len_b: i64) -> RelationshipSummary {
        let mut paths_to_a = Map::new();
        let mut paths_to_b = Map::new();
        paths_to_a.insert(ancestor, vec![BranchPath { length: len_a, multiplicity: 1, path: Vec::new() }]);
        paths_to_b.insert(ancestor, vec![BranchPath { length: len_b, multiplicity: 1, path: Vec::new() }]);
        RelationshipSummary {
            person_a: PersonId::new(100),
            person_b: PersonId::new(200),
            coefficient: 0.0,
            ancestors: vec![ancestor],
            paths_to_a,
            paths_to_b,
        }
    }

    #[test]
    fn self_relationship_is_same_person() {
        let mut summary = summary_with(PersonId::new(1), 0, 0);
        summary.person_a = PersonId::new(1);
        summary.person_b = PersonId::new(1);
        let degree = infer_cousin_degree(&summary);
        assert_eq!(degree.kind, RelationshipKind::SamePerson);
    }

    #[test]
    fn siblings_classify_as_sibling() {
        let summary = summary_with(PersonId::new(1), 1, 1);
        let degree = infer_cousin_degree(&summary);
        assert_eq!(degree.kind, RelationshipKind::Sibling);
    }

    #[test]
    fn direct_ancestor_has_zero_generations_on_one_side() {
        let summary = summary_with(PersonId::new(1), 0, 3);
        let degree = infer_cousin_degree(&summary);
        assert_eq!(degree.kind, RelationshipKind::DirectAncestor);
        assert_eq!(degree.generations_a, Some(0));
        assert_eq!(degree.generations_b, Some(3));
    }

    #[test]
    fn first_cousins_once_removed() {
        let summary = summary_with(PersonId::new(1), 2, 3);
        let degree = infer_cousin_degree(&summary);
        assert_eq!(degree.kind, RelationshipKind::Cousin);
        assert_eq!(degree.degree, Some(1));
        assert_eq!(degree.removal, Some(1));
    }

    #[test]
    fn no_ancestors_is_unrelated() {
        let summary = RelationshipSummary {
            person_a: PersonId::new(1),
            person_b: PersonId::new(2),
            coefficient: 0.0,
            ancestors: Vec::new(),
            paths_to_a: Map::new(),
            paths_to_b: Map::new(),
        };
        let degree = infer_cousin_degree(&summary);
        assert_eq!(degree.kind, RelationshipKind::Unrelated);
    }

    #[test]
    fn all_cousin_degrees_are_sorted_by_closeness() {
        let mut paths_to_a = Map::new();
        let mut paths_to_b = Map::new();
        let near = PersonId::new(1);
        let far = PersonId::new(2);
        paths_to_a.insert(near, vec![BranchPath { length: 2, multiplicity: 1, path: Vec::new() }]);
        paths_to_b.insert(near, vec![BranchPath { length: 2, multiplicity: 1, path: Vec::new() }]);
        paths_to_a.insert(far, vec![BranchPath { length: 4, multiplicity: 1, path: Vec::new() }]);
        paths_to_b.insert(far, vec![BranchPath { length: 4, multiplicity: 1, path: Vec::new() }]);
        let summary = RelationshipSummary {
            person_a: PersonId::new(100),
            person_b: PersonId::new(200),
            coefficient: 0.0,
            ancestors: vec![far, near],
            paths_to_a,
            paths_to_b,
        };
        let degrees = infer_all_cousin_degrees(&summary);
        assert_eq!(degrees.len(), 2);
        assert_eq!(degrees[0].ancestor, Some(near));
        assert_eq!(degrees[1].ancestor, Some(far));
    }
}
