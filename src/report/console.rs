//! Colored console output for scan results.

use crate::types::{Finding, ScanResult};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Console output handler with colors and formatting.
pub struct ConsoleReporter {
    verbose: bool,
    json_mode: bool,
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter.
    pub fn new(verbose: bool, json_mode: bool, quiet: bool) -> Self {
        Self {
            verbose,
            json_mode,
            quiet,
        }
    }

    /// Print scan start message.
    pub fn print_scan_start(&self, domain: &str) {
        if self.json_mode || self.quiet {
            return;
        }

        println!("{} Scanning: {}", "[*]".bright_blue(), domain.bright_white());
    }

    /// Print scan progress (only in verbose mode).
    pub fn print_progress(&self, message: &str) {
        if self.json_mode || !self.verbose {
            return;
        }

        println!("{} {}", "[.]".dimmed(), message.dimmed());
    }

    /// Print info message.
    pub fn print_info(&self, message: &str) {
        if self.json_mode || self.quiet {
            return;
        }

        println!("{} {}", "[*]".bright_blue(), message);
    }

    /// Print a finding.
    pub fn print_finding(&self, finding: &Finding) {
        if self.json_mode {
            return;
        }

        println!();
        println!(
            "{} {} [{}]",
            "===".bright_cyan(),
            finding.label().bright_white().bold(),
            severity_color(finding.severity())
        );
        println!("    |-- Match:  {}", finding.matched());
        println!("    +-- Source: {}", finding.source().dimmed());
    }

    /// Print scan summary.
    pub fn print_summary(&self, result: &ScanResult) {
        if self.json_mode {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
            return;
        }

        // In quiet mode, only print if something was found.
        if self.quiet && result.findings.is_empty() {
            return;
        }

        println!();
        println!("{}", "=== Scan Summary ===".bright_cyan());
        println!("  Target:      {}", result.domain);
        println!("  Duration:    {:.2}s", result.duration_secs);
        println!("  Subdomains:  {}", result.subdomains);
        println!("  Script URLs: {}", result.script_urls);
        println!("  JS fetched:  {}", result.scripts_fetched);

        if result.findings.is_empty() {
            println!("  {}", "Nothing found.".green());
        } else {
            let secrets = result
                .findings
                .iter()
                .filter(|f| matches!(f, Finding::Secret { .. }))
                .count();
            let endpoints = result.findings.len() - secrets;
            println!(
                "  {}",
                format!("FINDINGS: {} secrets, {} endpoints", secrets, endpoints)
                    .red()
                    .bold()
            );
        }

        println!();
    }

    /// Create a progress bar.
    pub fn create_progress_bar(&self, total: u64, message: &str) -> Option<ProgressBar> {
        if self.json_mode || self.quiet {
            return None;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Format a severity string with color.
fn severity_color(severity: &str) -> colored::ColoredString {
    match severity.to_ascii_lowercase().as_str() {
        "critical" => severity.to_uppercase().on_red().white().bold(),
        "high" => severity.to_uppercase().red().bold(),
        "medium" | "med" => severity.to_uppercase().yellow().bold(),
        "low" => severity.to_uppercase().blue(),
        _ => severity.to_uppercase().dimmed(),
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_reporter_creation() {
        let reporter = ConsoleReporter::new(true, false, false);
        assert!(reporter.verbose);
        assert!(!reporter.json_mode);
    }

    #[test]
    fn test_severity_color_passes_unknown_values_through() {
        // Unknown severities render dimmed rather than panicking.
        severity_color("critical");
        severity_color("weird-custom-level");
        severity_color("");
    }

    #[test]
    fn test_progress_bar_suppressed_in_json_mode() {
        let reporter = ConsoleReporter::new(false, true, false);
        assert!(reporter.create_progress_bar(10, "fetch").is_none());
    }
}
