//! Lazily building and reusing Sosa caches across repeated queries.

use std::collections::BTreeMap;

use genealogy_graph::Pedigree;
use genealogy_types::PersonId;

use crate::calculator::build_sosa_cache;
use crate::error::SosaError;
use crate::types::SosaCacheState;

/// Caches one [`SosaCacheState`] per root person queried so far, rebuilding
/// only when the underlying pedigree changes.
pub struct SosaCacheManager<'a> {
    pedigree: &'a Pedigree,
    caches: BTreeMap<PersonId, SosaCacheState>,
}

impl<'a> SosaCacheManager<'a> {
    /// Build a manager over `pedigree` with no caches populated yet.
    pub fn new(pedigree: &'a Pedigree) -> Self {
        Self {
            pedigree,
            caches: BTreeMap::new(),
        }
    }

    /// Return the cache for `root_id`, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if `root_id` is absent or the ancestry graph is
    /// inconsistent; see [`build_sosa_cache`].
    pub fn get_cache(&mut self, root_id: PersonId) -> Result<&SosaCacheState, SosaError> {
        if !self.caches.contains_key(&root_id) {
            let cache = build_sosa_cache(self.pedigree, root_id)?;
            self.caches.insert(root_id, cache);
        }
        self.caches.get(&root_id).ok_or(SosaError::MissingRoot(root_id))
    }

    /// Forget the cached state for `root_id`, or every cache when `None`.
    pub fn drop_cache(&mut self, root_id: Option<PersonId>) {
        match root_id {
            Some(id) => {
                self.caches.remove(&id);
            }
            None => self.caches.clear(),
        }
    }

    /// Point the manager at a new pedigree, clearing every cached result
    /// (a cache built against the old data would silently go stale
    /// otherwise).
    pub fn update_data(&mut self, pedigree: &'a Pedigree) {
        self.pedigree = pedigree;
        self.caches.clear();
    }
}
