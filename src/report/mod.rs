//! Reporting module for scan output.
//!
//! This module handles:
//! - Colored console output and progress display
//! - JSON report serialization

pub mod console;
pub mod json;

pub use console::ConsoleReporter;
pub use json::write_report;
