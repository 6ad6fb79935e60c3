//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::measurement::humanize_ns;
use crate::result::BenchSummary;

/// Format a BenchSummary for human-readable terminal output.
///
/// Shows the per-invocation distribution (min, quartiles, max), the mean
/// with its standard deviation, and the page faults incurred during the run.
pub fn format_summary(summary: &BenchSummary) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);
    let stats = &summary.stats;

    output.push_str(&format!("{}\n", summary.name.bold()));
    output.push_str(&sep);
    output.push('\n');

    output.push_str(&format!(
        "  Trials: {} x {} calls\n",
        stats.len(),
        summary.config.inner_loops
    ));
    if summary.config.offset != 0.0 {
        output.push_str(&format!(
            "  Offset: {} per call\n",
            format_ns(summary.config.offset)
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "    mean    {} \u{00B1} {}\n",
        format_ns(summary.mean_ns()).green().bold(),
        format_ns(stats.stddev())
    ));
    output.push_str(&format!("    min     {}\n", format_ns(stats.min())));
    output.push_str(&format!("    q1      {}\n", format_ns(stats.q1())));
    output.push_str(&format!("    median  {}\n", format_ns(stats.median()).bold()));
    output.push_str(&format!("    q3      {}\n", format_ns(stats.q3())));
    output.push_str(&format!("    max     {}\n", format_ns(stats.max())));
    output.push_str(&format!(
        "    iqr     {}\n",
        format_ns(summary.interquartile_range())
    ));
    output.push('\n');

    let minor = summary.usage.minor_faults_delta();
    let major = summary.usage.major_faults_delta();
    let faults = format!("  Page faults: {} minor, {} major", minor, major);
    if major > 0 {
        output.push_str(&format!("{}\n", faults.yellow()));
    } else {
        output.push_str(&format!("{}\n", faults));
    }

    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format a nanosecond figure with a human-scaled unit.
fn format_ns(ns: f64) -> String {
    if !ns.is_finite() {
        return format!("{ns} ns");
    }
    let (value, unit) = humanize_ns(ns.abs());
    let sign = if ns < 0.0 { "-" } else { "" };
    format!("{sign}{value:.3} {unit}")
}
