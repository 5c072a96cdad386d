//! In-memory and on-disk caching of computed cousin matrices.
//!
//! The in-memory cache is a plain `Mutex`-guarded map, owned by whoever
//! builds a [`CousinMatrixCache`] (typically the facade in
//! `genealogy-engine`) rather than a process-global singleton, so two
//! engines over two different pedigrees never share state by accident.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use genealogy_relationship::RelationshipSummary;
use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::error::CousinError;
use crate::types::{BucketedMatrix, CousinComputationSettings};

/// Holds every cousin matrix computed so far, keyed by a digest of the
/// summary and the settings that produced it.
#[derive(Default)]
pub struct CousinMatrixCache {
    memory: Mutex<BTreeMap<String, BucketedMatrix>>,
}

impl CousinMatrixCache {
    /// Build an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, key: &str) -> Option<BucketedMatrix> {
        self.memory.lock().map_or(None, |guard| guard.get(key).cloned())
    }

    pub(crate) fn insert(&self, key: String, matrix: BucketedMatrix) {
        if let Ok(mut guard) = self.memory.lock() {
            guard.insert(key, matrix);
        }
    }

    /// Drop every in-memory entry. On-disk entries are untouched; use
    /// [`clear_cousin_degree_cache`] to remove both.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.memory.lock() {
            guard.clear();
        }
    }
}

/// Compute the stable digest identifying a `(summary, depth caps,
/// settings fragment)` combination, used both as the in-memory map key
/// and as the on-disk cache file's name.
#[must_use]
pub fn cache_key_digest(
    summary: &RelationshipSummary,
    max_depth_a: Option<i64>,
    max_depth_b: Option<i64>,
    settings_fragment: (Option<i64>, Option<i64>, Option<usize>, u32),
) -> String {
    #[derive(Serialize)]
    struct EncodedSummary<'a> {
        person_a: genealogy_types::PersonId,
        person_b: genealogy_types::PersonId,
        ancestors: Vec<(genealogy_types::PersonId, Vec<(i64, i64, &'a [genealogy_types::PersonId])>, Vec<(i64, i64, &'a [genealogy_types::PersonId])>)>,
    }

    let mut ancestors: Vec<_> = summary.ancestors.clone();
    ancestors.sort_unstable();
    ancestors.dedup();

    let encoded = EncodedSummary {
        person_a: summary.person_a,
        person_b: summary.person_b,
        ancestors: ancestors
            .into_iter()
            .map(|ancestor| {
                let mut paths_a: Vec<_> = summary
                    .paths_to_a
                    .get(&ancestor)
                    .map(|paths| paths.iter().map(|p| (p.length, p.multiplicity, p.path.as_slice())).collect())
                    .unwrap_or_default();
                paths_a.sort_unstable_by_key(|&(len, mult, path)| (len, mult, path.to_vec()));
                let mut paths_b: Vec<_> = summary
                    .paths_to_b
                    .get(&ancestor)
                    .map(|paths| paths.iter().map(|p| (p.length, p.multiplicity, p.path.as_slice())).collect())
                    .unwrap_or_default();
                paths_b.sort_unstable_by_key(|&(len, mult, path)| (len, mult, path.to_vec()));
                (ancestor, paths_a, paths_b)
            })
            .collect(),
    };

    let mut hasher = Sha1::new();
    if let Ok(bytes) = bincode::serialize(&encoded) {
        hasher.update(&bytes);
    }
    hasher.update(max_depth_a.map(i64::to_le_bytes).unwrap_or_default());
    hasher.update(max_depth_b.map(i64::to_le_bytes).unwrap_or_default());
    hasher.update(settings_fragment.0.map(i64::to_le_bytes).unwrap_or_default());
    hasher.update(settings_fragment.1.map(i64::to_le_bytes).unwrap_or_default());
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    hasher.update(settings_fragment.2.map(|v| (v as i64).to_le_bytes()).unwrap_or_default());
    hasher.update(settings_fragment.3.to_le_bytes());

    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[derive(Serialize, serde::Deserialize)]
struct DiskEnvelope {
    cache_version: u32,
    matrix: BucketedMatrix,
}

fn cache_file_path(digest: &str, settings: &CousinComputationSettings) -> Option<std::path::PathBuf> {
    if !settings.cache_enabled {
        return None;
    }
    let dir = settings.cache_directory.as_ref()?;
    Some(dir.join(format!("{}-{digest}.bin", settings.cache_prefix)))
}

pub(crate) fn load_disk_cache(digest: &str, settings: &CousinComputationSettings) -> Option<BucketedMatrix> {
    let path = cache_file_path(digest, settings)?;
    let bytes = std::fs::read(&path).ok()?;
    let envelope: DiskEnvelope = bincode::deserialize(&bytes)
        .inspect_err(|error| tracing::debug!(?path, %error, "discarding unreadable cousin cache file"))
        .ok()?;
    if envelope.cache_version != settings.cache_version {
        tracing::debug!(?path, "discarding stale cousin cache file (version mismatch)");
        return None;
    }
    Some(envelope.matrix)
}

pub(crate) fn store_disk_cache(digest: &str, matrix: &BucketedMatrix, settings: &CousinComputationSettings) {
    let Some(path) = cache_file_path(digest, settings) else {
        return;
    };
    let envelope = DiskEnvelope { cache_version: settings.cache_version, matrix: matrix.clone() };
    let Ok(bytes) = bincode::serialize(&envelope) else {
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(error) = std::fs::create_dir_all(parent) {
            tracing::warn!(?parent, %error, "failed to create cousin cache directory");
            return;
        }
    }
    if let Err(error) = std::fs::write(&path, bytes) {
        tracing::warn!(?path, %error, "failed to write cousin cache file");
    }
}

/// Reset the in-memory cache, and optionally delete every on-disk cache
/// file matching `settings.cache_prefix`.
///
/// # Errors
///
/// Returns [`CousinError::CacheDirectory`] if `include_disk` is set and
/// the cache directory cannot be enumerated.
pub fn clear_cousin_degree_cache(
    cache: &CousinMatrixCache,
    include_disk: bool,
    settings: &CousinComputationSettings,
) -> Result<(), CousinError> {
    cache.clear();
    if !include_disk {
        return Ok(());
    }
    let Some(dir) = &settings.cache_directory else {
        return Ok(());
    };
    if !dir.exists() {
        return Ok(());
    }
    let entries = std::fs::read_dir(dir).map_err(|source| CousinError::CacheDirectory { source })?;
    let prefix = format!("{}-", settings.cache_prefix);
    for entry in entries {
        let entry = entry.map_err(|source| CousinError::CacheDirectory { source })?;
        let name = entry.file_name();
        let matches = name.to_str().is_some_and(|name| name.starts_with(&prefix) && name.ends_with(".bin"));
        if matches {
            let _ = std::fs::remove_file(entry.path());
        }
    }
    Ok(())
}
