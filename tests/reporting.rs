//! Report text and rendered summaries.

use tightloop::output::{format_summary, to_json, to_json_pretty};
use tightloop::{Bench, BenchSummary, Config};

fn report(bench: &mut Bench, prefix: &str) -> Vec<String> {
    let mut out = Vec::new();
    bench.report_to(&mut out, prefix).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

fn value(line: &str) -> f64 {
    line.rsplit(" = ").next().unwrap().parse().unwrap()
}

#[test]
fn report_without_prefix() {
    let mut bench = Bench::with_config(Config::quick());
    bench.run("plain", || 7u32);
    let lines = report(&mut bench, "");

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "[benchmark | plain]");
    assert!(lines[1].starts_with("  stats/total = "));
    assert!(lines[2].starts_with("  stats/average = "));
    assert!(lines[3].starts_with("  stats/stddev = "));
    assert_eq!(lines[4], "");

    let total: f64 = bench.samples().iter().sum();
    assert!((value(&lines[1]) - total).abs() <= total * 1e-12);
    assert_eq!(value(&lines[2]), bench.average());
}

#[test]
fn report_with_prefix_and_offset() {
    let mut bench = Bench::with_config(Config::quick());
    bench.offset(0.5).run("shifted", || 7u32);
    let lines = report(&mut bench, "parse");

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "[benchmark | shifted]");
    assert!(lines[1].starts_with("  stats/parse/total = "));
    assert!(lines[2].starts_with("  stats/parse/average = "));
    assert!(lines[3].starts_with("  stats/parse/stddev = "));
    assert_eq!(lines[4], "  stats/parse/offset = 0.5");
    assert_eq!(lines[5], "");
}

#[test]
fn summary_renders() {
    colored::control::set_override(false);
    let mut bench = Bench::with_config(Config::quick());
    bench.run("render", || 1u8);
    let summary = bench.summary().unwrap();
    assert_eq!(summary.name, "render");
    assert_eq!(summary.stats.len(), 11);

    let text = format_summary(&summary);
    assert!(text.starts_with("render\n"));
    assert!(text.contains("Trials: 11 x 1000 calls"));

    let json = to_json(&summary).unwrap();
    let parsed: BenchSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.name, "render");
    assert_eq!(parsed.config, summary.config);
    assert_eq!(parsed.usage, summary.usage);

    let pretty = to_json_pretty(&summary).unwrap();
    assert!(pretty.contains("\"inner_loops\": 1000"));
}

#[test]
fn summary_without_run_is_error() {
    assert!(Bench::new().summary().is_err());
}
