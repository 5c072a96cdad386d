//! Loading [`CousinComputationSettings`] from YAML files and from
//! `GeneWeb-style` environment mappings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::CousinError;
use crate::types::CousinComputationSettings;

impl CousinComputationSettings {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CousinError::SettingsIo`] if the file cannot be read, or
    /// [`CousinError::SettingsYaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, CousinError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CousinError::SettingsIo { source })?;
        Self::parse(&contents)
    }

    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`CousinError::SettingsYaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, CousinError> {
        serde_yml::from_str(yaml).map_err(|source| CousinError::SettingsYaml { source })
    }
}

/// Translate a `GeneWeb-esque` environment mapping into computation
/// settings, layering on top of `defaults` (or
/// [`CousinComputationSettings::default`] if none is given).
///
/// Recognized keys: `max_anc_level`, `max_desc_level`,
/// `max_cousins_level`, `max_cousins`, `cache_cousins_tool`. Numeric
/// keys tighten the corresponding depth/result caps (never loosen them);
/// `cache_cousins_tool` enables the disk cache when its value is
/// (case-insensitively) `yes`, `true`, or `1`, in which case
/// `base_path` becomes the cache directory unless `defaults` already
/// names one.
#[must_use]
pub fn load_cousin_settings(
    env: &BTreeMap<String, String>,
    base_path: Option<&Path>,
    defaults: Option<CousinComputationSettings>,
) -> CousinComputationSettings {
    let settings = defaults.unwrap_or_default();

    let parse_int = |name: &str| -> Option<i64> { env.get(name).and_then(|raw| raw.parse().ok()) };

    let max_anc = parse_int("max_anc_level");
    let max_desc = parse_int("max_desc_level");
    let max_cousins_level = parse_int("max_cousins_level");
    let max_cousins = env.get("max_cousins").and_then(|raw| raw.parse::<usize>().ok());

    let mut max_depth_a = settings.max_depth_a;
    let mut max_depth_b = settings.max_depth_b;

    if let Some(max_anc) = max_anc {
        max_depth_a = Some(max_depth_a.map_or(max_anc, |current| current.min(max_anc)));
    }
    if let Some(max_desc) = max_desc {
        max_depth_b = Some(max_depth_b.map_or(max_desc, |current| current.min(max_desc)));
    }
    if let Some(limit) = max_cousins_level {
        max_depth_a = Some(max_depth_a.map_or(limit, |current| current.min(limit)));
        max_depth_b = Some(max_depth_b.map_or(limit, |current| current.min(limit)));
    }

    let mut max_results = settings.max_results;
    if let Some(max_cousins) = max_cousins {
        max_results = Some(max_results.map_or(max_cousins, |current| current.min(max_cousins)));
    }

    let cache_enabled = env
        .get("cache_cousins_tool")
        .is_some_and(|raw| matches!(raw.to_lowercase().as_str(), "yes" | "true" | "1"));
    let cache_directory: Option<PathBuf> = match settings.cache_directory {
        Some(dir) => Some(dir),
        None if cache_enabled => base_path.map(Path::to_path_buf),
        None => None,
    };

    CousinComputationSettings {
        max_depth_a,
        max_depth_b,
        max_results,
        cache_directory,
        cache_enabled,
        cache_prefix: settings.cache_prefix,
        cache_version: settings.cache_version,
    }
}
