//! Building the bucketed cousin matrix from a relationship summary.

use std::collections::BTreeSet;

use genealogy_relationship::RelationshipSummary;
use genealogy_types::PersonId;

use crate::cache::{cache_key_digest, load_disk_cache, store_disk_cache, CousinMatrixCache};
use crate::classify::infer_cousin_degree_for_generations;
use crate::types::{BucketedMatrix, CousinComputationSettings, CousinMatrixEntry};

/// Construct an `l1 x l2` matrix of cousin information for every
/// qualifying `(ancestor, path_to_a, path_to_b)` triple in `summary`,
/// similar to `GeneWeb's` own cousin-matrix output.
///
/// Iteration stops as soon as `settings.max_results` entries have been
/// produced, in ancestor-then-path insertion order (not per-bucket), per
/// `original_source`'s `build_cousin_matrix`.
#[must_use]
pub fn build_cousin_matrix(
    summary: &RelationshipSummary,
    max_depth_a: Option<i64>,
    max_depth_b: Option<i64>,
    use_cache: bool,
    cache: &CousinMatrixCache,
    settings: &CousinComputationSettings,
) -> BucketedMatrix {
    let depth_a_limit = max_depth_a.or(settings.max_depth_a);
    let depth_b_limit = max_depth_b.or(settings.max_depth_b);
    let settings_fragment = settings.cache_key_fragment();
    let digest = cache_key_digest(summary, depth_a_limit, depth_b_limit, settings_fragment);

    if use_cache {
        if let Some(cached) = cache.get(&digest) {
            tracing::debug!(%digest, "cousin matrix cache hit (memory)");
            return cached;
        }
        if let Some(cached) = load_disk_cache(&digest, settings) {
            tracing::debug!(%digest, "cousin matrix cache hit (disk)");
            cache.insert(digest, cached.clone());
            return cached;
        }
        tracing::debug!(%digest, "cousin matrix cache miss");
    }

    let mut matrix = BucketedMatrix::new();
    if summary.ancestors.is_empty() {
        if use_cache {
            cache.insert(digest.clone(), matrix.clone());
            store_disk_cache(&digest, &matrix, settings);
        }
        return matrix;
    }

    let mut seen_paths: BTreeSet<(PersonId, Vec<PersonId>, Vec<PersonId>)> = BTreeSet::new();
    let mut total_entries: usize = 0;
    let max_results = settings.max_results;

    'outer: for &ancestor in &summary.ancestors {
        let empty = Vec::new();
        let paths_a = summary.paths_to_a.get(&ancestor).unwrap_or(&empty);
        let paths_b = summary.paths_to_b.get(&ancestor).unwrap_or(&empty);
        if paths_a.is_empty() || paths_b.is_empty() {
            continue;
        }

        for path_a in paths_a {
            if depth_a_limit.is_some_and(|limit| path_a.length > limit) {
                continue;
            }
            for path_b in paths_b {
                if depth_b_limit.is_some_and(|limit| path_b.length > limit) {
                    continue;
                }

                let signature = (ancestor, path_a.path.clone(), path_b.path.clone());
                if !seen_paths.insert(signature) {
                    continue;
                }

                let Some(degree) = infer_cousin_degree_for_generations(ancestor, path_a.length, path_b.length) else {
                    continue;
                };

                matrix
                    .entry(path_a.length)
                    .or_default()
                    .entry(path_b.length)
                    .or_default()
                    .push(CousinMatrixEntry { ancestor, path_to_a: path_a.clone(), path_to_b: path_b.clone(), degree });

                total_entries += 1;
                if max_results.is_some_and(|cap| total_entries >= cap) {
                    break 'outer;
                }
            }
        }
    }

    if use_cache {
        cache.insert(digest.clone(), matrix.clone());
        store_disk_cache(&digest, &matrix, settings);
    }

    matrix
}
