//! Error types for cousin classification, matrix construction, and cache
//! maintenance.

/// Errors surfaced by the cousin crate.
///
/// Disk-cache read/write failures during [`crate::build_cousin_matrix`]
/// are never reported through this type: they are logged and treated as a
/// cache miss (matching `GeneWeb's` "a stale or unreadable cache file is
/// just a miss" behavior). This enum only covers failures a caller must
/// act on: removing cache files explicitly, or parsing a settings file.
#[derive(Debug, thiserror::Error)]
pub enum CousinError {
    /// [`crate::clear_cousin_degree_cache`] could not enumerate or remove
    /// on-disk cache files.
    #[error("failed to clear on-disk cousin cache: {source}")]
    CacheDirectory {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A settings file failed to parse as YAML.
    #[error("failed to parse cousin settings YAML: {source}")]
    SettingsYaml {
        /// The underlying YAML parse error.
        #[source]
        source: serde_yml::Error,
    },

    /// A settings file could not be read from disk.
    #[error("failed to read cousin settings file: {source}")]
    SettingsIo {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
