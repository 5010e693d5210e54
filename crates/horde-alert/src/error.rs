use std::path::PathBuf;

use thiserror::Error;

/// File-level configuration failures.
///
/// Per-key problems (unknown mob names, out-of-range numbers) are not errors:
/// they are logged and replaced by defaults while loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config syntax error: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
