use anyhow::{Context, Result};
use clap::Parser;
use repo_status::config::Config;
use repo_status::git::{self, Repository};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Show which files in a working copy are modified, staged or untracked
#[derive(Debug, Parser)]
#[command(name = "repo-status", version)]
struct Cli {
    /// Any path inside the repository (defaults to the current directory)
    path: Option<PathBuf>,

    /// Status backend: `process` or `library`
    #[arg(long)]
    strategy: Option<String>,

    /// Print the full `git status` report instead of short codes
    #[arg(long)]
    plain: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a default configuration file if none exists, print its path and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::init_default()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if let Some(strategy) = &cli.strategy {
        config.status.strategy = strategy.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(&cli, &config).await
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let repo = match &cli.path {
        Some(path) => Repository::discover_from(path),
        None => Repository::discover(),
    }
    .context("Failed to open repository")?;

    let resolver = config.resolver()?;

    if cli.plain {
        return match resolver.plain_status(&repo) {
            Ok(text) => {
                print!("{}", text);
                Ok(())
            }
            Err(e) => {
                if let Some(text) = e.captured_output() {
                    print!("{}", text);
                }
                Err(e.into())
            }
        };
    }

    let entries = git::load_status(&resolver, &repo).await?;
    for entry in &entries {
        println!("{} {}", entry.short_code(), entry.name);
    }

    Ok(())
}
