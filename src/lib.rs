//! jshound - Asynchronous JS recon engine.
//!
//! This library reconnoiters a target domain for client-side JavaScript and
//! extracts security-relevant signals from it:
//! - Resolving candidate hosts via certificate-transparency logs
//! - Fetching pages and script assets under a bounded concurrency gate
//! - Matching script bodies against a configurable secret rule set
//! - Walking the JS AST for API endpoint references
//!
//! # Example
//!
//! ```no_run
//! use jshound::config::ScanConfig;
//! use jshound::engine::Engine;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig {
//!         domain: "example.com".to_string(),
//!         ..Default::default()
//!     };
//!     let engine = Engine::new(config).unwrap();
//!     let result = engine.run().await.unwrap();
//!     println!("Found {} findings", result.findings.len());
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod recon;
pub mod report;
pub mod types;

pub use config::{Commands, Config, RulesConfig, ScanConfig};
pub use engine::Engine;
pub use types::{Finding, HoundError, Result, ScanResult};
