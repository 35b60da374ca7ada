use anyhow::Result;
use clap::{Parser, Subcommand};
use lazyworktree::config::Config;
use lazyworktree::icons::IconTheme;
use lazyworktree::logger::{self, Logger};
use lazyworktree::security::{TrustStatus, TrustStore};
use lazyworktree::ui;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lazyworktree")]
#[command(about = "A terminal dashboard for managing git worktrees")]
#[command(version)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Theme name, overriding the configuration
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Icon set: ascii or nerd-font
    #[arg(long, value_name = "SET")]
    icons: Option<String>,

    /// Write a default configuration file and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Record a file's current contents as trusted
    Trust { file: PathBuf },
    /// Report whether a file is trusted
    CheckTrust { file: PathBuf },
    /// List built-in and custom theme names
    Themes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.generate_config {
        return Config::generate_default_config(path);
    }

    let mut config = Config::load_with_override(cli.config.as_deref())?;
    if let Some(theme) = cli.theme {
        config.ui.theme = theme;
    }
    if let Some(icons) = cli.icons {
        if IconTheme::from_name(&icons).is_none() {
            anyhow::bail!("Invalid icons '{}': expected \"ascii\" or \"nerd-font\"", icons);
        }
        config.ui.icons = icons;
    }

    let log_buffer = Logger::new();
    logger::init(&config.logging, &log_buffer)?;

    let trust = TrustStore::new();
    match cli.command {
        Some(Command::Trust { file }) => {
            trust.trust_file(&file)?;
            println!("Trusted {}", file.display());
        }
        Some(Command::CheckTrust { file }) => {
            let status = trust.check_trust(&file);
            let label = match status {
                TrustStatus::Trusted => "trusted",
                TrustStatus::Untrusted => "untrusted",
                TrustStatus::NotFound => "not found",
            };
            println!("{}: {}", file.display(), label);
            if status != TrustStatus::Trusted {
                std::process::exit(1);
            }
        }
        Some(Command::Themes) => {
            for name in config.available_themes() {
                println!("{}", name);
            }
        }
        None => ui::run_app(config, trust, log_buffer).await?,
    }

    Ok(())
}
