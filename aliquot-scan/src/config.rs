use std::path::Path;

use aliquot::{divisor::DivisorSumMethod, sequence::Pruning};
use serde::Deserialize;

use crate::error::{ScanError, ScanResult};

/// Term cap applied to descent-pruned scans that do not set `max_terms`.
///
/// Descent leaves rising sequences unbounded (966 climbs past `10^30`); every
/// sequence it resolves below 1000 records at most 32 terms.
pub const DESCENT_MAX_TERMS: usize = 64;

/// Settings of a scan, read from a TOML file.
///
/// Every field is optional in the file and falls back to [`ScanConfig::default`].
///
/// ```toml
/// start = 1
/// end = 20000
/// method = "factorized"
/// pruning = { period = 28 }
/// report_perfect = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// First number to classify (0 and 1 are always skipped).
    pub start: u64,
    /// Upper bound of the scan, exclusive.
    pub end: u64,
    pub method: DivisorSumMethod,
    pub pruning: Pruning,
    /// Maximum number of terms a single aliquot sequence may record. Descent-pruned
    /// scans fall back to [`DESCENT_MAX_TERMS`].
    pub max_terms: Option<usize>,
    /// Also print perfect numbers.
    pub report_perfect: bool,
    /// Print the cumulative time spent in each core operation after the scan.
    pub timings: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start: 1,
            end: 200_000_000,
            method: DivisorSumMethod::Factorized,
            pruning: Pruning::cycle_search(),
            max_terms: None,
            report_perfect: false,
            timings: false,
        }
    }
}

impl ScanConfig {
    /// Parses a configuration; `file` is only used in error messages.
    pub fn from_toml_str(source: &str, file: &str) -> ScanResult<Self> {
        toml::from_str(source).map_err(|source| ScanError::ConfigParseError {
            source,
            file: file.to_string(),
        })
    }

    pub fn load(path: &Path) -> ScanResult<Self> {
        let file = path.display().to_string();
        let source =
            std::fs::read_to_string(path).map_err(|source| ScanError::ConfigReadError {
                source,
                file: file.clone(),
            })?;
        Self::from_toml_str(&source, &file)
    }

    /// First number actually classified.
    pub fn effective_start(&self) -> u64 {
        self.start.max(2)
    }

    /// Term cap actually handed to the classifier.
    pub fn effective_max_terms(&self) -> Option<usize> {
        match (self.max_terms, self.pruning) {
            (None, Pruning::Descent) => Some(DESCENT_MAX_TERMS),
            (max_terms, _) => max_terms,
        }
    }
}
