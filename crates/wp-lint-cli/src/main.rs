use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wp_lint_core::{
    LintError, LintOptions, LintPolicy, Linter, ProcessRunner, Reporter, SearchContext,
    WpCliConfig,
};

/// Overrides the global wp-cli config file location.
const GLOBAL_CONFIG_ENV: &str = "WP_CLI_CONFIG_PATH";

#[derive(Parser, Debug)]
#[command(
    name = "wp-lint",
    author,
    version,
    about = "Run PHP_CodeSniffer against a WordPress project"
)]
struct Cli {
    /// WordPress installation root used as a base for phpcs and ruleset lookup
    #[arg(long, value_name = "DIR", global = true)]
    path: Option<PathBuf>,

    /// YAML file with a `lint:` section; replaces wp-cli.yml discovery
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Ruleset names, config keys and missing-path behaviour to use
    #[arg(long, value_enum, default_value_t = Profile::Classic, global = true)]
    profile: Profile,

    /// Print the phpcs command before running it and enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check PHP files under a path against the resolved coding standard
    Lint {
        /// File or directory to check
        paths: Vec<PathBuf>,
        /// Coding standard name or ruleset path (lint.standard in config wins)
        #[arg(long)]
        standard: Option<String>,
    },
    /// Show which phpcs binary and standard would be used
    Which {
        #[arg(long)]
        standard: Option<String>,
        /// Emit the resolution as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Profile {
    /// `.phpcs.ruleset.xml` first, `lint.bin`, a path argument is required
    Classic,
    /// `phpcs.xml` first, `lint.phpcs`, no path means the current directory
    Modern,
}

impl From<Profile> for LintPolicy {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Classic => LintPolicy::classic(),
            Profile::Modern => LintPolicy::modern(),
        }
    }
}

/// Prints checker output and the final verdict to the terminal.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&mut self, line: &str) {
        println!("{line}");
    }

    fn success(&mut self, message: &str) {
        println!("{} {}", "Success:".green().bold(), message);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match execute(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast_ref::<LintError>() {
            Some(lint) => {
                report_error(lint);
                Ok(ExitCode::FAILURE)
            }
            None => Err(err),
        },
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let mut context = SearchContext::from_env(cwd.clone());
    let config = load_config(cli.config.as_deref(), &context)?;
    context.root = install_root(cli.path, &config, cwd)?;
    debug!(root = %context.root.display(), "installation root");

    let runner = ProcessRunner::new();
    let linter = Linter::new(&config, &runner, cli.profile.into(), context);

    match cli.command {
        Commands::Lint { paths, standard } => {
            let options = LintOptions {
                standard,
                debug: cli.debug,
            };
            linter.run(&paths, &options, &mut ConsoleReporter).await?;
            Ok(())
        }
        Commands::Which { standard, json } => which(&linter, standard, json),
    }
}

fn load_config(explicit: Option<&Path>, context: &SearchContext) -> Result<WpCliConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        return Ok(WpCliConfig::new(vec![path.to_path_buf()]));
    }
    let cwd = match &context.cwd {
        Some(cwd) => cwd.clone(),
        None => context.root.clone(),
    };
    let global = std::env::var_os(GLOBAL_CONFIG_ENV).map(PathBuf::from);
    let config = WpCliConfig::discover(&cwd, context.home.as_deref(), global);
    debug!(files = ?config.files(), "lint config candidates");
    Ok(config)
}

/// `--path`, else the `path:` declared in wp-cli.yml, else the working directory.
fn install_root(
    explicit: Option<PathBuf>,
    config: &WpCliConfig,
    cwd: PathBuf,
) -> Result<PathBuf, LintError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    Ok(config.install_path()?.unwrap_or(cwd))
}

fn which(linter: &Linter<'_>, standard: Option<String>, json: bool) -> Result<()> {
    let options = LintOptions {
        standard,
        debug: false,
    };
    let plan = linter.plan(&options)?;
    if json {
        let value = serde_json::json!({
            "binary": plan.binary,
            "standard": plan.standard,
            "extensions": linter.policy().extensions,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{label:<9} {value} ({source})",
        label = "phpcs:",
        value = plan.binary.value,
        source = plan.binary.source
    );
    println!(
        "{label:<9} {value} ({source})",
        label = "standard:",
        value = plan.standard.value,
        source = plan.standard.source
    );
    Ok(())
}

fn report_error(err: &LintError) {
    for message in err.messages() {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
