use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Resolve development environment descriptions into installation manifests
#[derive(Parser, Debug)]
#[command(
    name = "envzero",
    about = "Resolve development environment descriptions into installation manifests",
    version,
    long_about = "envzero turns a free-text description such as \"FastAPI with React and \
                  Postgres\" into a manifest of OS packages and application dependencies. \
                  It can run as an HTTP service or resolve a single prompt locally."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the resolution HTTP service",
        long_about = "Starts the HTTP service exposing GET / and POST /api/resolve.\n\n\
                      Examples:\n  \
                      envzero serve\n  \
                      envzero serve --host 127.0.0.1 --port 8080"
    )]
    Serve(ServeArgs),

    #[command(
        about = "Resolve a prompt into a manifest",
        long_about = "Runs the resolver locally and prints the manifest.\n\n\
                      Examples:\n  \
                      envzero resolve \"FastAPI with React\"\n  \
                      envzero resolve \"django and postgres\" --format json"
    )]
    Resolve(ResolveArgs),

    #[command(about = "Print the built-in rule table")]
    Rules(RulesArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, value_name = "HOST", help = "Bind host (overrides ENVZERO_HOST)")]
    pub host: Option<String>,

    #[arg(
        short = 'p',
        long,
        value_name = "PORT",
        help = "Bind port (overrides ENVZERO_PORT)"
    )]
    pub port: Option<u16>,

    #[arg(
        long,
        value_name = "N",
        help = "Maximum resolutions running at once (overrides ENVZERO_MAX_CONCURRENT_RESOLUTIONS)"
    )]
    pub max_concurrent: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    #[arg(value_name = "PROMPT", help = "Description of the environment")]
    pub prompt: String,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let args = CliArgs::try_parse_from(["envzero", "resolve", "flask app", "-f", "json"]).unwrap();
        match args.command {
            Commands::Resolve(resolve) => {
                assert_eq!(resolve.prompt, "flask app");
                assert_eq!(resolve.format, OutputFormatArg::Json);
                assert!(resolve.output.is_none());
            }
            other => panic!("Expected resolve command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let args = CliArgs::try_parse_from([
            "envzero",
            "serve",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--max-concurrent",
            "4",
            "-v",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Commands::Serve(serve) => {
                assert_eq!(serve.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(serve.port, Some(9000));
                assert_eq!(serve.max_concurrent, Some(4));
            }
            other => panic!("Expected serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["envzero", "rules", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_resolve_requires_prompt() {
        assert!(CliArgs::try_parse_from(["envzero", "resolve"]).is_err());
    }
}
