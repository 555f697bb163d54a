//! CLI entry point for the promoted-method finder.
//!
//! `promoted find <PACKAGE> <TYPE>...` discovers the package and everything it
//! embeds from, then prints the exported pointer-receiver methods reachable
//! from each requested type.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use promoted::io::{ExitCode, JsonResponse, OutputFormat, ResponseMeta, render_text};
use promoted::{FindError, MethodFinder, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Find Go methods promoted through struct embedding
#[derive(Parser)]
#[command(
    name = "promoted",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find Go methods promoted through struct embedding",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log discovery progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the methods of one or more types, including promoted ones
    #[command(
        after_help = "Examples:\n  promoted find ./server Handler\n  promoted find $GOPATH/src/example.com/app Client Server --json\n  promoted find . Conn -l 0"
    )]
    Find {
        /// Directory of the package declaring the types
        package: PathBuf,

        /// Type names declared in the package
        #[arg(required = true)]
        types: Vec<String>,

        /// Maximum number of concurrent discovery tasks (0 = sequential)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Stop discovering new packages after the first failure
        #[arg(long)]
        fail_fast: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Disable memoization of resolved method sets
        #[arg(long)]
        no_memo: bool,
    },

    /// Display effective settings
    Config,
}

fn main() {
    let cli = Cli::parse();

    let mut config = if let Some(config_path) = &cli.config {
        Settings::load_from(config_path).unwrap_or_else(|e| {
            eprintln!(
                "Configuration error loading from {}: {e}",
                config_path.display()
            );
            std::process::exit(ExitCode::ConfigError.into());
        })
    } else {
        Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        })
    };

    let level = if cli.verbose || config.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let code = match cli.command {
        Commands::Config => match toml::to_string_pretty(&config) {
            Ok(toml_str) => {
                println!("{toml_str}");
                ExitCode::Success
            }
            Err(e) => {
                eprintln!("Error displaying config: {e}");
                ExitCode::ConfigError
            }
        },

        Commands::Find {
            package,
            types,
            limit,
            fail_fast,
            json,
            no_memo,
        } => {
            // CLI flags override config
            if let Some(limit) = limit {
                config.discovery.concurrency_limit = limit;
            }
            if fail_fast {
                config.discovery.fail_fast = true;
            }
            if no_memo {
                config.resolution.memoize = false;
            }

            run_find(
                Arc::new(config),
                &package,
                &types,
                OutputFormat::from_json_flag(json),
            )
        }
    };

    std::process::exit(code.into());
}

fn run_find(
    settings: Arc<Settings>,
    package: &std::path::Path,
    types: &[String],
    format: OutputFormat,
) -> ExitCode {
    let start = Instant::now();
    let finder = MethodFinder::new(settings);

    match finder.find(package, types) {
        Ok(report) => {
            if format.is_json() {
                let elapsed = start.elapsed().as_millis() as u64;
                let response = JsonResponse::success(&report).with_meta(ResponseMeta::now(elapsed));
                print_json(&response);
            } else {
                print!("{}", render_text(&report));
            }
            ExitCode::Success
        }
        Err(error) => {
            let code = ExitCode::from_find_error(&error);
            if format.is_json() {
                print_json(&JsonResponse::from_error(&error));
            } else {
                report_error(&error);
            }
            code
        }
    }
}

fn report_error(error: &FindError) {
    eprintln!("Error: {error}");
    match error {
        FindError::Discovery(failures) => {
            for failure in failures {
                eprintln!("  [{}] {failure}", failure.status_code());
                for suggestion in failure.recovery_suggestions() {
                    eprintln!("    - {suggestion}");
                }
            }
        }
        FindError::InvalidRoot { .. } => {}
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing output: {e}"),
    }
}
