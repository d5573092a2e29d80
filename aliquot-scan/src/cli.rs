use std::path::PathBuf;

use aliquot::{
    divisor::DivisorSumMethod,
    sequence::{LONGEST_KNOWN_CYCLE, Pruning},
};
use clap::{ArgAction, Parser as ClapParser, ValueEnum};
use log::LevelFilter;

use crate::config::ScanConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PruningArg {
    /// Abandon a sequence at its first descent (historical heuristic)
    Descent,
    /// Follow every sequence for up to `--max-period` terms
    Period,
}

#[derive(Debug, ClapParser)]
#[command(name = "aliquot-scan", about = "Search a range for perfect, amicable and sociable numbers")]
pub struct Arguments {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First number to classify
    #[arg(long)]
    pub start: Option<u64>,

    /// Upper bound of the scan (exclusive)
    #[arg(long)]
    pub end: Option<u64>,

    /// Divisor-sum strategy: `factorized` or `naive`
    #[arg(long)]
    pub method: Option<DivisorSumMethod>,

    /// Rule used to abandon sequences that do not return to their seed
    #[arg(long, value_enum)]
    pub pruning: Option<PruningArg>,

    /// Longest cycle searched for with `--pruning period`
    #[arg(long)]
    pub max_period: Option<usize>,

    /// Maximum number of terms a single sequence may record
    #[arg(long)]
    pub max_terms: Option<usize>,

    /// Also print perfect numbers
    #[arg(long)]
    pub report_perfect: bool,

    /// Print the time spent in each core operation after the scan
    #[arg(long)]
    pub timings: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Arguments {
    /// Overrides the fields of `config` given on the command line.
    pub fn apply(&self, mut config: ScanConfig) -> ScanConfig {
        if let Some(start) = self.start {
            config.start = start;
        }
        if let Some(end) = self.end {
            config.end = end;
        }
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(max_terms) = self.max_terms {
            config.max_terms = Some(max_terms);
        }
        config.pruning = self.pruning(config.pruning);
        config.report_perfect |= self.report_perfect;
        config.timings |= self.timings;
        config
    }

    fn pruning(&self, current: Pruning) -> Pruning {
        let period = self.max_period.unwrap_or(match current {
            Pruning::Period(max) => max,
            Pruning::Descent => LONGEST_KNOWN_CYCLE,
        });

        match (self.pruning, self.max_period) {
            (Some(PruningArg::Descent), _) => Pruning::Descent,
            (Some(PruningArg::Period), _) | (None, Some(_)) => Pruning::Period(period),
            (None, None) => current,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
