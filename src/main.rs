mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use moodlog_analytics::{daily_stats, render_daily, render_recent, with_rolling};
use moodlog_core::config::AppConfig;
use moodlog_core::question::{self, Question};
use moodlog_core::store::EntryStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "moodlog",
    about = "A personal mood-journaling CLI",
    version,
    author
)]
struct Cli {
    /// Path to config file (default: ~/.config/moodlog/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the configured questions and save a new entry (default)
    Ask,

    /// Print the most recent entries, newest first
    Show {
        /// Number of recent entries to print
        #[arg(long)]
        last: Option<usize>,
    },

    /// Print daily mood statistics with a rolling average
    Analyze {
        /// Rolling window in days
        #[arg(long)]
        window: Option<usize>,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize default configuration file
    Init,
    /// Print config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "moodlog=info,warn".into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load config and question definitions up front; either failing is
    // fatal before any interaction begins.
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let questions = load_questions(&config)?;

    tracing::debug!(
        questions = questions.len(),
        store = %config.store_path().display(),
        "loaded configuration"
    );

    match cli.command {
        Some(Commands::Show { last }) => {
            show(&config, last.unwrap_or(config.analysis.show_last))?;
        }
        Some(Commands::Analyze { window }) => {
            analyze(&config, window)?;
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, &config)?;
        }
        Some(Commands::Ask) | None => {
            prompt::ask(&config, &questions)?;
        }
    }

    Ok(())
}

fn load_questions(config: &AppConfig) -> Result<Vec<Question>> {
    match config.questions_path() {
        Some(path) => Ok(question::load_questions(&path)?),
        None => Ok(question::builtin_questions()),
    }
}

fn show(config: &AppConfig, last: usize) -> Result<()> {
    let store = EntryStore::new(config);
    let table = store.load_all()?;
    if table.is_empty() {
        println!("No entries yet. Run `moodlog ask` first.");
        return Ok(());
    }
    print!("{}", render_recent(&table, last)?);
    Ok(())
}

fn analyze(config: &AppConfig, window: Option<usize>) -> Result<()> {
    let window = window.unwrap_or(config.analysis.window);
    if window < 1 {
        anyhow::bail!("--window must be at least 1");
    }
    let store = EntryStore::new(config);
    let table = store.load_all()?;
    if table.is_empty() {
        println!("No entries yet. Run `moodlog ask` first.");
        return Ok(());
    }
    let stats = with_rolling(daily_stats(&table)?, window);
    print!("{}", render_daily(&stats, window));
    Ok(())
}

fn handle_config_command(action: Option<ConfigAction>, config: &AppConfig) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
        }
        Some(ConfigAction::Init) => {
            let path = AppConfig::default_path();
            if path.exists() {
                println!("Config already exists at: {}", path.display());
            } else {
                config.save()?;
                println!("Created default config at: {}", path.display());
            }
        }
        Some(ConfigAction::Path) => {
            println!("{}", AppConfig::default_path().display());
        }
    }
    Ok(())
}
