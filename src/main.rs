use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use simcontent::cli::validate::ValidateArgs;
use simcontent::services::import_service::DEFAULT_IMPORT_DIR;
use simcontent::{Result, StoreConfig};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simcontent")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate, import and prune challenge/quiz content", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase diagnostic log verbosity (default info, -v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a YAML content file against its schema and graph rules
    Validate {
        /// Path to the YAML file
        file: PathBuf,

        /// Directory containing challenge_schema.json and quiz_schema.json
        /// [default: ./schemas next to the binary or in the working directory]
        #[arg(long)]
        schemas_dir: Option<PathBuf>,

        /// Also check for duplicate node ids and an end node reachable from start
        #[arg(long)]
        strict: bool,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Import every YAML file in a directory into the database
    Import {
        /// Directory to scan for *.yaml / *.yml files
        #[arg(default_value = DEFAULT_IMPORT_DIR)]
        dir: PathBuf,

        /// Parse and report without writing to the database
        #[arg(long)]
        dry_run: bool,
    },

    /// Drop the challenges, quizzes and simulations collections
    Drop,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", format!("Error: failed to create tokio runtime: {}", e).red());
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate {
            file,
            schemas_dir,
            strict,
            json,
        } => {
            let args = ValidateArgs {
                schemas_dir,
                strict,
                json,
            };
            simcontent::cli::validate::run(&file, &args)?;
        }

        Commands::Import { dir, dry_run } => {
            let config = if dry_run {
                None
            } else {
                Some(StoreConfig::from_env()?)
            };
            simcontent::cli::import::run(&dir, config.as_ref(), dry_run).await?;
        }

        Commands::Drop => {
            let config = StoreConfig::from_env()?;
            simcontent::cli::drop::run(&config).await?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "simcontent", &mut io::stdout());
        }
    }

    Ok(())
}

/// Default log filter for a `-v` count; `RUST_LOG` overrides it
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "simcontent=info",
        1 => "simcontent=debug",
        _ => "simcontent=trace",
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(0), "simcontent=info");
        assert_eq!(log_filter(1), "simcontent=debug");
        assert_eq!(log_filter(2), "simcontent=trace");
        assert_eq!(log_filter(5), "simcontent=trace");
    }

    #[test]
    fn test_verbose_flag_counts() {
        let cli = Cli::parse_from(["simcontent", "-vv", "drop"]);
        assert_eq!(cli.verbose, 2);

        let cli = Cli::parse_from(["simcontent", "validate", "a.yaml", "-v"]);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
