use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CnfError {
    #[error("Unable to find cnf file {candidate}")]
    NotFound { candidate: PathBuf },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to decode {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Flag redefined: {0}")]
    DuplicateFlag(String),

    #[error("Shorthand '{shorthand}' for flag '{key}' is more than one character")]
    InvalidShorthand { key: String, shorthand: String },

    #[error("Unknown args {}", .args.join(" "))]
    UnknownArgs { args: Vec<String>, usage: String },

    #[error(transparent)]
    Cli(#[from] clap::Error),
}

impl CnfError {
    /// True when no config file was found anywhere in the search chain.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CnfError::NotFound { .. })
    }
}
