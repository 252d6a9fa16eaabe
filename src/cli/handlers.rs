//! Command handlers; each returns the process exit code

use super::commands::{ResolveArgs, RulesArgs, ServeArgs};
use super::output::OutputFormatter;
use crate::config::EnvzeroConfig;
use crate::resolver::{detect_stack, RuleSet};
use crate::service;
use anyhow::{Context, Result};
use std::fs;
use tracing::{debug, error, info};

/// Applies `serve` flags on top of the loaded configuration
pub fn apply_serve_overrides(mut config: EnvzeroConfig, args: &ServeArgs) -> EnvzeroConfig {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(max_concurrent) = args.max_concurrent {
        config.max_concurrent_resolutions = max_concurrent;
    }
    config
}

pub async fn handle_serve(config: &EnvzeroConfig) -> i32 {
    info!(address = %config.bind_address(), "Starting EnvZero orchestrator");

    match service::serve(config).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Server error: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_resolve(args: &ResolveArgs) -> i32 {
    match run_resolve(args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let manifest = detect_stack(&args.prompt)?;
    debug!(stack = %manifest.stack, "Prompt resolved");

    let formatted = OutputFormatter::new(args.format.into()).format_manifest(&manifest)?;
    write_output(&formatted, args.output.as_deref())
}

pub fn handle_rules(args: &RulesArgs) -> i32 {
    let result = OutputFormatter::new(args.format.into())
        .format_rules(RuleSet::builtin())
        .and_then(|formatted| write_output(&formatted, None));

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn write_output(formatted: &str, path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, formatted)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        None => print!("{}", formatted),
    }
    Ok(())
}
