use std::io::Write;

use aliquot::{
    classify::{Classification, ClassificationResult, Classifier},
    natural::{Natural, nat},
    observer::TimingReport,
    utils::error::AliquotError,
};
use log::{info, trace, warn};

use crate::{
    config::ScanConfig,
    error::{ScanError, ScanResult},
};

/// Counters collected over a scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub scanned: u64,
    pub perfect: u64,
    pub amicable: u64,
    pub sociable: u64,
    /// Numbers whose sequence hit the configured term cap.
    pub unresolved: u64,
}

impl ScanSummary {
    fn count(&mut self, kind: Classification) {
        match kind {
            Classification::NotCandidate => {}
            Classification::Perfect => self.perfect += 1,
            Classification::Amicable => self.amicable += 1,
            Classification::Sociable => self.sociable += 1,
        }
    }
}

/// Builds the classifier described by `config`, without instrumentation.
pub fn classifier_for(config: &ScanConfig) -> Classifier<'static> {
    Classifier::new()
        .with_method(config.method)
        .with_pruning(config.pruning)
        .with_max_terms(config.effective_max_terms())
}

/// Classifies every number of the configured range and writes one line per cycle
/// member found to `out`.
pub fn scan<W: Write>(
    config: &ScanConfig,
    classifier: &Classifier<'_>,
    out: &mut W,
) -> ScanResult<ScanSummary> {
    let start = config.effective_start();
    if start >= config.end {
        return Err(ScanError::EmptyRange {
            start,
            end: config.end,
        });
    }

    info!(
        "scanning [{}, {}) with the {} divisor sum, {:?} pruning and a term cap of {:?}",
        start,
        config.end,
        classifier.method(),
        classifier.pruning(),
        classifier.max_terms()
    );

    let mut summary = ScanSummary::default();
    for value in start..config.end {
        trace!(">> {}", value);
        summary.scanned += 1;

        let result = match classifier.classify(&nat(value)) {
            Ok(result) => result,
            Err(AliquotError::TermLimitExceeded { limit, .. }) => {
                warn!("{} left unresolved: more than {} terms", value, limit);
                summary.unresolved += 1;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        summary.count(result.kind);
        render(value, &result, config.report_perfect, out)?;
    }

    info!(
        "scanned {} numbers: {} perfect, {} amicable, {} sociable, {} unresolved",
        summary.scanned, summary.perfect, summary.amicable, summary.sociable, summary.unresolved
    );
    Ok(summary)
}

/// Writes the line describing `result`, if any.
pub fn render<W: Write>(
    value: u64,
    result: &ClassificationResult,
    report_perfect: bool,
    out: &mut W,
) -> std::io::Result<()> {
    match result.kind {
        Classification::NotCandidate => Ok(()),
        Classification::Perfect if report_perfect => {
            writeln!(out, "{} is a perfect number.", value)
        }
        Classification::Perfect => Ok(()),
        Classification::Amicable => writeln!(
            out,
            "{} is an amicable number. {}",
            value,
            format_cycle(&result.cycle)
        ),
        Classification::Sociable => writeln!(
            out,
            "{} is a sociable number. {}",
            value,
            format_cycle(&result.cycle)
        ),
    }
}

/// Writes the per-operation timings collected during a scan.
pub fn render_timings<W: Write>(report: &TimingReport, out: &mut W) -> std::io::Result<()> {
    writeln!(out, " Execution time of each function:")?;
    writeln!(out, "{}", report)
}

fn format_cycle(cycle: &[Natural]) -> String {
    let terms = cycle
        .iter()
        .map(|term| term.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", terms)
}
