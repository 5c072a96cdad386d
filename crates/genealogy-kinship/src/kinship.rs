//! Kinship (coancestry) coefficient calculator.

use std::collections::BTreeMap;

use genealogy_graph::Pedigree;
use genealogy_types::PersonId;

/// Computes kinship coefficients between pairs of individuals, memoizing
/// every pair it resolves.
///
/// The kinship coefficient `phi(x, y)` is the probability that a random
/// allele drawn from `x` and a random allele drawn from `y` at the same
/// locus are identical by descent. It is the building block both for an
/// individual's own consanguinity (`phi` of their two parents) and for the
/// cousin-degree classification in `genealogy-cousin`.
pub struct KinshipCalculator<'a> {
    pedigree: &'a Pedigree,
    consanguinity: BTreeMap<PersonId, f64>,
    cache: BTreeMap<(PersonId, PersonId), f64>,
}

impl<'a> KinshipCalculator<'a> {
    /// Build a calculator over `pedigree`, using `consanguinity` as the
    /// per-person self-consanguinity table (`phi(x, x) = 0.5 * (1 +
    /// consanguinity[x])`). The table is owned so a caller resolving
    /// consanguinity values one person at a time (see
    /// `genealogy-kinship::consanguinity`) can feed newly computed values
    /// back in as it goes, exactly as later `kinship` calls need them.
    pub fn new(pedigree: &'a Pedigree, consanguinity: BTreeMap<PersonId, f64>) -> Self {
        Self {
            pedigree,
            consanguinity,
            cache: BTreeMap::new(),
        }
    }

    /// Record (or overwrite) the self-consanguinity of `person_id`.
    pub fn set_consanguinity(&mut self, person_id: PersonId, value: f64) {
        self.consanguinity.insert(person_id, value);
    }

    /// Consume the calculator, returning the underlying consanguinity table.
    pub fn into_consanguinity(self) -> BTreeMap<PersonId, f64> {
        self.consanguinity
    }

    /// Kinship coefficient between `first` and `second`. Either (or both)
    /// may be absent, in which case the result is `0.0`.
    pub fn kinship(&mut self, first: Option<PersonId>, second: Option<PersonId>) -> f64 {
        let (Some(first), Some(second)) = (first, second) else {
            return 0.0;
        };

        let key = if first <= second { (first, second) } else { (second, first) };
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }

        let value = if first == second {
            let own_consanguinity = self.consanguinity.get(&first).copied().unwrap_or(0.0);
            0.5 * (1.0 + own_consanguinity)
        } else {
            let (father1, mother1) = self.pedigree.parents(first);
            let (father2, mother2) = self.pedigree.parents(second);
            0.25 * (self.kinship(father1, father2)
                + self.kinship(father1, mother2)
                + self.kinship(mother1, father2)
                + self.kinship(mother1, mother2))
        };

        self.cache.insert(key, value);
        value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap as Map;

    use genealogy_types::{PersonNode, UnionId, UnionNode};

    use super::*;

    fn pedigree_with_siblings() -> Pedigree {
        let mut persons = Map::new();
        persons.insert(PersonId::new(1), PersonNode::new(PersonId::new(1), None));
        persons.insert(PersonId::new(2), PersonNode::new(PersonId::new(2), None));
        persons.insert(
            PersonId::new(3),
            PersonNode::new(PersonId::new(3), Some(UnionId::new(1))),
        );
        persons.insert(
            PersonId::new(4),
            PersonNode::new(PersonId::new(4), Some(UnionId::new(1))),
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

        Pedigree::new(persons, unions)
    }

    #[test]
    fn self_kinship_without_consanguinity_is_one_half() {
        let pedigree = pedigree_with_siblings();
        let mut calculator = KinshipCalculator::new(&pedigree, Map::new());
        assert_eq!(calculator.kinship(Some(PersonId::new(1)), Some(PersonId::new(1))), 0.5);
    }

    #[test]
    fn full_siblings_share_one_quarter_kinship() {
        let pedigree = pedigree_with_siblings();
        let mut calculator = KinshipCalculator::new(&pedigree, Map::new());
        let phi = calculator.kinship(Some(PersonId::new(3)), Some(PersonId::new(4)));
        assert!((phi - 0.25).abs() < 1e-9);
    }

    #[test]
    fn kinship_with_absent_person_is_zero() {
        let pedigree = pedigree_with_siblings();
        let mut calculator = KinshipCalculator::new(&pedigree, Map::new());
        assert_eq!(calculator.kinship(None, Some(PersonId::new(1))), 0.0);
    }
}
