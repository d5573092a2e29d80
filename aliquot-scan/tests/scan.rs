use aliquot::{observer::TimingObserver, observer::Operation, sequence::Pruning};
use aliquot_scan::{
    config::{DESCENT_MAX_TERMS, ScanConfig},
    error::ScanError,
    scan::{ScanSummary, classifier_for, render_timings, scan},
};

fn run(config: &ScanConfig) -> (ScanSummary, String) {
    let mut out = Vec::new();
    let summary = scan(config, &classifier_for(config), &mut out).expect("scan should succeed");
    (summary, String::from_utf8(out).expect("output is utf-8"))
}

fn range(start: u64, end: u64) -> ScanConfig {
    ScanConfig {
        start,
        end,
        ..ScanConfig::default()
    }
}

#[test]
fn finds_the_first_amicable_pair() {
    let (summary, output) = run(&range(1, 300));

    assert_eq!(
        output,
        "220 is an amicable number. [220, 284]\n284 is an amicable number. [284, 220]\n"
    );
    assert_eq!(
        summary,
        ScanSummary {
            scanned: 298,
            perfect: 2,
            amicable: 2,
            sociable: 0,
            unresolved: 0,
        }
    );
}

#[test]
fn reports_perfect_numbers_on_request() {
    let config = ScanConfig {
        report_perfect: true,
        ..range(2, 30)
    };
    let (_, output) = run(&config);
    assert_eq!(output, "6 is a perfect number.\n28 is a perfect number.\n");
}

#[test]
fn finds_the_sociable_cycle() {
    let (summary, output) = run(&range(12496, 12497));
    assert_eq!(
        output,
        "12496 is a sociable number. [12496, 14288, 15472, 14536, 14264]\n"
    );
    assert_eq!(summary.sociable, 1);
}

#[test]
fn descent_pruning_reproduces_the_historical_search() {
    let config = ScanConfig {
        pruning: Pruning::Descent,
        ..range(1, 300)
    };
    let (summary, output) = run(&config);
    assert_eq!(output, "220 is an amicable number. [220, 284]\n");
    assert_eq!(summary.amicable, 1);
}

#[test]
fn descent_scan_gives_up_on_rising_sequences() {
    // 966 keeps rising under descent pruning long past 10^13
    let config = ScanConfig {
        pruning: Pruning::Descent,
        ..range(960, 1000)
    };
    assert_eq!(config.effective_max_terms(), Some(DESCENT_MAX_TERMS));

    let (summary, output) = run(&config);
    assert!(output.is_empty());
    assert_eq!(summary.scanned, 40);
    assert_eq!(summary.unresolved, 1);
}

#[test]
fn term_cap_leaves_numbers_unresolved() {
    let config = ScanConfig {
        max_terms: Some(2),
        ..range(12496, 12497)
    };
    let (summary, output) = run(&config);
    assert!(output.is_empty());
    assert_eq!(summary.unresolved, 1);
    assert_eq!(summary.sociable, 0);
}

#[test]
fn empty_range_is_an_error() {
    let mut out = Vec::new();
    let config = range(1, 2);
    let err = scan(&config, &classifier_for(&config), &mut out).unwrap_err();
    // reported with the effective start, 0 and 1 being skipped
    assert!(matches!(err, ScanError::EmptyRange { start: 2, end: 2 }));
    assert!(err.to_string().contains("[2, 2)"));
}

#[test]
fn timings_are_collected_through_the_observer() {
    let config = range(200, 230);
    let observer = TimingObserver::new();
    let classifier = classifier_for(&config).with_observer(&observer);

    let mut out = Vec::new();
    let summary = scan(&config, &classifier, &mut out).unwrap();

    let report = observer.report();
    assert_eq!(report.get(Operation::Classify).calls, summary.scanned);
    assert!(report.get(Operation::Factorize).calls > 0);
    assert!(report.to_string().contains("classify:"));
}

#[test]
fn timings_render_after_the_header() {
    let config = range(200, 230);
    let observer = TimingObserver::new();
    let classifier = classifier_for(&config).with_observer(&observer);
    scan(&config, &classifier, &mut Vec::new()).unwrap();

    let mut out = Vec::new();
    render_timings(&observer.report(), &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some(" Execution time of each function:"));
    let body: Vec<&str> = lines.filter(|line| !line.is_empty()).collect();
    assert!(body.iter().any(|line| line.starts_with("     classify:")));
    assert!(body.iter().any(|line| line.starts_with("     mod_pow:")));
    assert!(body.iter().all(|line| line.ends_with(" calls)")));
}
