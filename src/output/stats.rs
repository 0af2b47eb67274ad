//! Human-readable crawl statistics

use crate::crawler::CrawlStats;

/// Prints crawl statistics to stderr
///
/// Standard output is reserved for URLs, so the summary never mixes with them.
pub fn print_statistics(stats: &CrawlStats) {
    eprintln!("{}", format_statistics(stats));
}

/// Renders crawl statistics as a small text report
pub fn format_statistics(stats: &CrawlStats) -> String {
    let mut report = String::from("=== Crawl Statistics ===\n");

    let rows = [
        ("Visited", stats.visited),
        ("Parsed", stats.parsed),
        ("Not HTML", stats.not_html),
        ("Failed", stats.failed),
        ("Duplicates", stats.duplicates),
        ("Forbidden by robots.txt", stats.forbidden),
        ("Emitted", stats.emitted),
    ];

    for (label, value) in rows {
        report.push_str(&format!("  {:<24} {}\n", format!("{}:", label), value));
    }

    report.push_str(&format!("  {:<24} {:.2?}", "Elapsed:", stats.elapsed));
    report
}
