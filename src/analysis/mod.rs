//! Script body analysis module.
//!
//! This module handles extracting signals from fetched script bodies:
//! - Rule-based secret matching (configurable YAML rule set)
//! - AST-based API endpoint extraction
//!
//! The two passes are independent and share no state; each script body is
//! analyzed on its own.

pub mod endpoints;
pub mod rules;
pub mod secrets;

pub use endpoints::EndpointAnalyzer;
pub use rules::{load_rules, load_rules_strict, CompiledRule, Rule};
pub use secrets::SecretScanner;
