//! Error types for board records and configuration

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`BoardConfig`](crate::BoardConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Check if the error came from the filesystem
    #[inline]
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Snapshot decoding errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Snapshot JSON is malformed
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
}
