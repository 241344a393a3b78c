use std::path::PathBuf;

/// Faults that stop a command before or instead of a batch run.
///
/// Per-file problems never end up here; they are collected in
/// [`crate::result::ToggleResult::failures`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid mode '{0}': expected 'enable' or 'disable'")]
    InvalidMode(String),

    #[error("worker stopped without reporting a result: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, Error>;
