//! The per-family-union node of a pedigree.

use serde::{Deserialize, Serialize};

use crate::ids::{PersonId, UnionId};

/// One family union: up to two parents and an ordered list of children.
///
/// The children order is observable (it round-trips from the importer) but
/// not semantically required by any computation in this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionNode {
    /// This union's identifier.
    pub union_id: UnionId,
    /// The father in this union, if known.
    pub father_id: Option<PersonId>,
    /// The mother in this union, if known.
    pub mother_id: Option<PersonId>,
    /// Children of this union, in importer-supplied order.
    pub children: Vec<PersonId>,
}

impl UnionNode {
    /// Create a union from its parents and children.
    pub const fn new(
        union_id: UnionId,
        father_id: Option<PersonId>,
        mother_id: Option<PersonId>,
        children: Vec<PersonId>,
    ) -> Self {
        Self {
            union_id,
            father_id,
            mother_id,
            children,
        }
    }

    /// Return the `(father, mother)` pair for this union.
    pub const fn parents(&self) -> (Option<PersonId>, Option<PersonId>) {
        (self.father_id, self.mother_id)
    }
}
