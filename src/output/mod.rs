//! Output module for end-of-run reports
//!
//! This module handles:
//! - Summarizing a crawl: frontier size, downloads, failures, pruning
//! - Summarizing an extraction run: processed documents and failures
//!
//! Reports are formatted into strings so they can be tested, then printed
//! to stdout by the binary.

mod report;

pub use report::{
    format_crawl_report, format_extract_report, print_crawl_report, print_extract_report,
    CrawlReport, ExtractReport,
};
