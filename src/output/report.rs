//! Crawl and extraction reports

use std::fmt::Write;
use std::time::Duration;

use crate::crawler::FetchOutcome;
use crate::extract::ExtractOutcome;

const BANNER: &str = "=== Crawl Statistics ===";
const EXTRACT_BANNER: &str = "=== Extraction Statistics ===";

/// Summary of a frontier build and download run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Desired final article count
    pub article_target: usize,

    /// Identifiers in the frontier that was downloaded
    pub frontier_size: usize,

    /// Pages expanded while building the frontier, if it was built in this run
    pub parsed: Option<usize>,

    /// Time spent building the frontier, if it was built in this run
    pub frontier_time: Option<Duration>,

    /// Download totals
    pub fetch: FetchOutcome,

    /// Time spent downloading
    pub fetch_time: Duration,

    /// Download workers used
    pub workers: usize,

    /// Stored filenames removed to meet the article target
    pub pruned: Vec<String>,
}

/// Summary of an extraction run
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// Totals and failures
    pub outcome: ExtractOutcome,

    /// Extraction workers used
    pub workers: usize,

    /// Time spent extracting
    pub elapsed: Duration,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn minutes(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() / 60.0
}

fn write_enumerated(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", heading);
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {:3} - {}", i + 1, item);
    }
    let _ = writeln!(out);
}

/// Formats a crawl report
///
/// # Arguments
///
/// * `report` - The crawl totals to display
///
/// # Returns
///
/// The report text, failures enumerated before the totals
pub fn format_crawl_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    write_enumerated(
        &mut out,
        "Failed to download the following articles:",
        &report.fetch.fetch_failures,
    );
    write_enumerated(
        &mut out,
        "Failed to write the following documents:",
        &report.fetch.write_failures,
    );

    let _ = writeln!(out, "{}\n", BANNER);

    if let (Some(parsed), Some(elapsed)) = (report.parsed, report.frontier_time) {
        let _ = writeln!(
            out,
            "Extracted {} article identifiers from {} articles in {:.2} minutes",
            report.frontier_size,
            parsed,
            minutes(elapsed)
        );
    }

    let _ = writeln!(
        out,
        "Downloaded {}/{} articles in {:.2} minutes using {} workers",
        report.fetch.stored,
        report.frontier_size,
        minutes(report.fetch_time),
        report.workers
    );

    let fetch_failures = report.fetch.fetch_failures.len();
    if fetch_failures > 0 {
        let _ = writeln!(
            out,
            "Failed to download {} articles [{:.4}%]",
            fetch_failures,
            percentage(fetch_failures, report.frontier_size)
        );
    }

    let write_failures = report.fetch.write_failures.len();
    if write_failures > 0 {
        let _ = writeln!(
            out,
            "Failed to write {} documents [{:.4}%]",
            write_failures,
            percentage(write_failures, report.frontier_size)
        );
    }

    if !report.pruned.is_empty() {
        let _ = writeln!(
            out,
            "Removed {}/{} articles to drop article count to {}",
            report.pruned.len(),
            report.fetch.stored,
            report.article_target
        );
    }

    out
}

/// Formats an extraction report
pub fn format_extract_report(report: &ExtractReport) -> String {
    let mut out = String::new();
    let outcome = &report.outcome;

    write_enumerated(
        &mut out,
        "Failed to extract text from the following documents:",
        &outcome.parse_failures,
    );
    write_enumerated(
        &mut out,
        "Failed to write the following records:",
        &outcome.write_failures,
    );

    let _ = writeln!(out, "{}\n", EXTRACT_BANNER);
    let _ = writeln!(
        out,
        "Extracted text from {} documents in {:.3} minutes using {} workers",
        outcome.processed,
        minutes(report.elapsed),
        report.workers
    );

    let parse_failures = outcome.parse_failures.len();
    if parse_failures > 0 {
        let _ = writeln!(
            out,
            "Failed to parse {} documents [{:.2}%]",
            parse_failures,
            percentage(parse_failures, outcome.processed)
        );
    }

    let write_failures = outcome.write_failures.len();
    if write_failures > 0 {
        let _ = writeln!(
            out,
            "Failed to write {} records [{:.2}%]",
            write_failures,
            percentage(write_failures, outcome.processed)
        );
    }

    let _ = writeln!(
        out,
        "Success Rate: {:.2}% ({} / {} documents extracted)",
        percentage(outcome.succeeded(), outcome.processed),
        outcome.succeeded(),
        outcome.processed
    );

    out
}

/// Prints a crawl report to stdout
pub fn print_crawl_report(report: &CrawlReport) {
    println!("{}", format_crawl_report(report));
}

/// Prints an extraction report to stdout
pub fn print_extract_report(report: &ExtractReport) {
    println!("{}", format_extract_report(report));
}
