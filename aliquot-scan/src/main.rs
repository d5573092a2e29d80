use std::io::Write;

use aliquot::observer::TimingObserver;
use aliquot_scan::{
    cli::Arguments,
    config::ScanConfig,
    error::ScanResult,
    scan::{classifier_for, render_timings, scan},
};
use clap::Parser as ClapParser;

fn run(args: &Arguments) -> ScanResult<()> {
    let config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    let config = args.apply(config);

    let observer = TimingObserver::new();
    let classifier = classifier_for(&config);
    let classifier = if config.timings {
        classifier.with_observer(&observer)
    } else {
        classifier
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    scan(&config, &classifier, &mut out)?;

    if config.timings {
        render_timings(&observer.report(), &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args = Arguments::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    if let Err(error) = run(&args) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
