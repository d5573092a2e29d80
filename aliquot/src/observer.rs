use std::{
    fmt,
    time::{Duration, Instant},
};

use enum_map::{Enum, EnumMap};
use parking_lot::Mutex;
use strum::{Display, IntoStaticStr};

/// Core operations that can be instrumented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    ModPow,
    IsPrime,
    Factorize,
    ProperDivisorSum,
    BuildSequence,
    Classify,
}

/// Receives the elapsed time of instrumented core calls.
///
/// Observers are pass-through: recording a measurement never alters the value
/// returned by the observed call. Implementations must be thread-safe so that a
/// single observer can be shared by independent classifications.
pub trait Observer: Send + Sync {
    /// Whether measurements should be taken at all. When `false`, [`timed`] skips
    /// reading the clock.
    fn enabled(&self) -> bool {
        true
    }

    fn record(&self, op: Operation, elapsed: Duration);
}

/// Observer that discards every measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    #[inline]
    fn enabled(&self) -> bool {
        false
    }

    #[inline]
    fn record(&self, _op: Operation, _elapsed: Duration) {}
}

/// Runs `f` and reports its elapsed time to `observer` under `op`.
#[inline]
pub fn timed<T>(observer: &dyn Observer, op: Operation, f: impl FnOnce() -> T) -> T {
    if !observer.enabled() {
        return f();
    }

    let start = Instant::now();
    let result = f();
    observer.record(op, start.elapsed());
    result
}

/// Accumulated statistics of a single operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OperationStats {
    pub calls: u64,
    pub total: Duration,
}

/// Observer accumulating per-operation call counts and cumulative time.
///
/// Nested operations are measured independently, so the time of
/// [`Operation::Classify`] includes the time of the calls it makes.
#[derive(Debug, Default)]
pub struct TimingObserver {
    stats: Mutex<EnumMap<Operation, OperationStats>>,
}

impl TimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the statistics collected so far.
    pub fn report(&self) -> TimingReport {
        TimingReport {
            stats: *self.stats.lock(),
        }
    }

    /// Clears every accumulated statistic.
    pub fn reset(&self) {
        self.stats.lock().clear();
    }
}

impl Observer for TimingObserver {
    fn record(&self, op: Operation, elapsed: Duration) {
        let mut stats = self.stats.lock();
        let entry = &mut stats[op];
        entry.calls += 1;
        entry.total += elapsed;
    }
}

/// Immutable snapshot of a [`TimingObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingReport {
    stats: EnumMap<Operation, OperationStats>,
}

impl TimingReport {
    pub fn get(&self, op: Operation) -> OperationStats {
        self.stats[op]
    }

    /// Iterates over the operations that were called at least once.
    pub fn iter(&self) -> impl Iterator<Item = (Operation, OperationStats)> + '_ {
        self.stats
            .iter()
            .filter(|(_, stats)| stats.calls > 0)
            .map(|(op, stats)| (op, *stats))
    }
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (op, stats) in self.iter() {
            let name: &'static str = op.into();
            writeln!(
                f,
                "     {}: {} ({} calls)",
                name,
                format_interval(stats.total),
                stats.calls
            )?;
        }
        Ok(())
    }
}

/// Formats a duration with the most readable unit among µs, ms and s.
pub fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs_f64();
    if secs < 0.001 {
        format!("{:10.3} µs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:10.3} ms", secs * 1e3)
    } else {
        format!("{:10.3} s", secs)
    }
}
