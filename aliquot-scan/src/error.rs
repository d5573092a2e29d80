use aliquot::utils::error::AliquotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read configuration file '{file}': {source}")]
    ConfigReadError {
        source: std::io::Error,
        file: String,
    },

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    /// Nothing to classify once 0 and 1 are skipped; `start` is the effective start.
    #[error("Invalid scan range: [{start}, {end}) holds no number to classify (0 and 1 are skipped)")]
    EmptyRange { start: u64, end: u64 },

    #[error(transparent)]
    Aliquot(#[from] AliquotError),
}

pub type ScanResult<T> = Result<T, ScanError>;
