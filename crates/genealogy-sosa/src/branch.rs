//! Reconstructing the actual lineage a Sosa number encodes, without needing
//! a precomputed cache.

use genealogy_graph::Pedigree;
use genealogy_types::PersonId;

use crate::error::SosaError;

/// Walk from `root_id` to the individual holding Sosa number `number`,
/// returning every person visited, root first.
fn descend(pedigree: &Pedigree, root_id: PersonId, number: i64) -> Option<Vec<PersonId>> {
    if number == 1 {
        return Some(vec![root_id]);
    }
    let parent_number = number / 2;
    let mut chain = descend(pedigree, root_id, parent_number)?;
    let &holder = chain.last()?;
    let (father_id, mother_id) = pedigree.parents(holder);
    let next = if number % 2 == 0 { father_id } else { mother_id }?;
    chain.push(next);
    Some(chain)
}

/// Return the lineage from the individual holding Sosa number `number`
/// down to `root_id`, ancestor first, or `None` if any link on that path
/// is missing from the pedigree.
///
/// # Errors
///
/// Returns [`SosaError::InvalidNumber`] if `number` is not positive, and
/// [`SosaError::MissingRoot`] if `root_id` is absent from the pedigree.
pub fn branch_of_sosa(pedigree: &Pedigree, root_id: PersonId, number: i64) -> Result<Option<Vec<PersonId>>, SosaError> {
    if number < 1 {
        return Err(SosaError::InvalidNumber(number));
    }
    if pedigree.person(root_id).is_none() {
        return Err(SosaError::MissingRoot(root_id));
    }

    Ok(descend(pedigree, root_id, number).map(|mut chain| {
        chain.reverse();
        chain
    }))
}

/// Return just the individual holding Sosa number `number`, i.e. the first
/// element of [`branch_of_sosa`].
///
/// # Errors
///
/// See [`branch_of_sosa`].
pub fn p_of_sosa(pedigree: &Pedigree, root_id: PersonId, number: i64) -> Result<Option<PersonId>, SosaError> {
    Ok(branch_of_sosa(pedigree, root_id, number)?.and_then(|path| path.first().copied()))
}
