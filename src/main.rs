//! jshound - Asynchronous JS recon engine.
//!
//! CLI entry point.

use clap::Parser;
use jshound::analysis::load_rules_strict;
use jshound::report::write_report;
use jshound::{Commands, Config, Engine, RulesConfig, ScanConfig};
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("jshound=debug,info")
    } else {
        EnvFilter::new("jshound=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match config.command.clone() {
        Commands::Scan(mut scan_config) => {
            scan_config.verbose = config.verbose;
            if let Err(code) = run_scan(scan_config).await {
                return code;
            }
        }
        Commands::Rules(rules_config) => {
            if let Err(code) = run_rules(rules_config) {
                return code;
            }
        }
    }

    ExitCode::SUCCESS
}

async fn run_scan(scan_config: ScanConfig) -> Result<(), ExitCode> {
    if scan_config.normalized_domain().is_empty() {
        error!("No target domain specified.");
        return Err(ExitCode::FAILURE);
    }

    if scan_config.concurrency == 0 {
        error!("Concurrency bound must be a positive integer.");
        return Err(ExitCode::FAILURE);
    }

    let engine = match Engine::new(scan_config.clone()) {
        Ok(e) => e,
        Err(e) => {
            error!("Failed to create engine: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    // Ctrl-C suppresses newly scheduled requests; in-flight requests are
    // left to finish on their own.
    let abort = engine.abort_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nAbort requested, finishing current tasks...");
            abort.store(true, Ordering::SeqCst);
        }
    });

    if !scan_config.json {
        print_banner();
    }

    let result = match engine.run().await {
        Ok(r) => r,
        Err(e) => {
            error!("Scan failed: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    if let Some(ref output_path) = scan_config.output {
        if let Err(e) = write_report(&result, output_path) {
            error!("Failed to write report file: {}", e);
            return Err(ExitCode::FAILURE);
        }
    }

    Ok(())
}

fn run_rules(rules_config: RulesConfig) -> Result<(), ExitCode> {
    // Validation is the whole point here, so a broken file is an error
    // rather than the scan path's silent empty set.
    let rules = match load_rules_strict(&rules_config.rules) {
        Ok(r) => r,
        Err(e) => {
            error!("Rule file {} is unusable: {}", rules_config.rules.display(), e);
            return Err(ExitCode::FAILURE);
        }
    };

    if rules.is_empty() {
        println!("No usable rules in {}", rules_config.rules.display());
        return Ok(());
    }

    println!("{} usable rules:", rules.len());
    for compiled in &rules {
        println!(
            "  {:<24} {:<32} [{}]",
            compiled.rule.id, compiled.rule.name, compiled.rule.severity
        );
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!("\x1b[36m╔══════════════════════════════════════════════════════════════╗\x1b[0m");
    println!("\x1b[36m║                     JSHOUND v0.1.0                           ║\x1b[0m");
    println!("\x1b[36m║            JS Recon & Secret Extraction                      ║\x1b[0m");
    println!("\x1b[36m╚══════════════════════════════════════════════════════════════╝\x1b[0m");
    println!();
}
