use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error
    },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path} has no Tournament block")]
    MissingTournament { path: PathBuf },

    #[error("{path} has an unparseable date '{value}'")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Could not determine the season of {path}")]
    MissingSeason { path: PathBuf },

    #[error("Team {number} ({school}) in tournament data is missing state code")]
    MissingStateCode { number: i64, school: String },

    #[error("Unknown configuration key '{0}'")]
    UnknownConfigKey(String),

    #[error("Invalid value '{value}' for configuration key '{key}'")]
    InvalidConfigValue { key: String, value: String }
}

impl ProcessorError {
    /// A team without a state code cannot be placed in any output shard, so the
    /// whole run is aborted. Everything else only costs the offending file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessorError::MissingStateCode { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
