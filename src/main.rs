use envzero::cli::commands::{CliArgs, Commands};
use envzero::cli::handlers::{apply_serve_overrides, handle_resolve, handle_rules, handle_serve};
use envzero::util::{init_logging, LoggingConfig};
use envzero::{EnvzeroConfig, VERSION};

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();

    let config = match EnvzeroConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    init_logging(LoggingConfig::from_cli(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
        &config.log_level,
    ));

    debug!("envzero v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Serve(serve_args) => run_serve(apply_serve_overrides(config, serve_args)),
        Commands::Resolve(resolve_args) => handle_resolve(resolve_args),
        Commands::Rules(rules_args) => handle_rules(rules_args),
    };

    std::process::exit(exit_code);
}

/// Runs the server on a runtime whose blocking pool matches the worker bound
fn run_serve(config: EnvzeroConfig) -> i32 {
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return 2;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(config.max_concurrent_resolutions)
        .build();

    match runtime {
        Ok(runtime) => runtime.block_on(handle_serve(&config)),
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            1
        }
    }
}
