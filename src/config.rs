//! Configuration handling for the recon engine.

use crate::types::HttpConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Asynchronous JS recon engine.
#[derive(Parser, Debug, Clone)]
#[command(name = "jshound")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan a domain for JS assets, hard-coded secrets, and API endpoints
    Scan(ScanConfig),
    /// Validate a rule file and list the rules it loads
    Rules(RulesConfig),
}

/// Configuration for the rules command.
#[derive(Parser, Debug, Clone)]
pub struct RulesConfig {
    /// Path to the YAML rule file
    #[arg(short, long, default_value = "rules/secrets.yml")]
    pub rules: PathBuf,
}

/// Configuration for the scan command.
#[derive(Parser, Debug, Clone)]
pub struct ScanConfig {
    /// Target domain (e.g. example.com)
    pub domain: String,

    /// Verbose output; set from the global flag, not a scan-level arg.
    #[arg(skip)]
    pub verbose: bool,

    /// Maximum number of in-flight requests
    #[arg(short, long, default_value = "20")]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "15")]
    pub timeout: u64,

    /// Path to the YAML rule file
    #[arg(short, long, default_value = "rules/secrets.yml")]
    pub rules: PathBuf,

    /// Write the JSON report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output results as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Custom User-Agent string
    #[arg(long, env = "JSHOUND_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Quiet mode: only show output when findings exist
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            verbose: false,
            concurrency: 20,
            timeout: 15,
            rules: PathBuf::from("rules/secrets.yml"),
            output: None,
            json: false,
            user_agent: None,
            quiet: false,
        }
    }
}

impl ScanConfig {
    /// Get HTTP configuration from scan config.
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout_secs: self.timeout,
            user_agent: self.user_agent.clone().unwrap_or_else(|| {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
            }),
        }
    }

    /// Normalized lowercase target domain.
    pub fn normalized_domain(&self) -> String {
        self.domain
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_lowercase()
    }
}
