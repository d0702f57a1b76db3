use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod citation;
mod cli;
mod config;
mod generate;
mod identity;
mod output;
mod pipeline;
mod prompt;
mod reddit;

use cli::Cli;
use config::{Config, LogLevel};
use generate::HuggingFaceGenerator;
use pipeline::{Outcome, PersonaBuilder};
use reddit::{RedditClient, RedditCredentials};

fn setup_logging(log_level: &LogLevel) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reddit-persona")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("reddit-persona.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.as_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run(profile: &str, config: &Config) -> Result<()> {
    let credentials = RedditCredentials::from_env()?;
    let fetcher = RedditClient::connect(&credentials, &config.reddit).context("Failed to initialize Reddit client")?;
    let generator = HuggingFaceGenerator::from_env(&config.generation);

    match PersonaBuilder::new(fetcher, generator, config).run(profile)? {
        Outcome::NoData { username } => info!("No persona written for u/{}", username),
        Outcome::Saved { username, path } => info!("Persona for u/{} saved to {}", username, path.display()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(profile) = cli.profile else {
        println!("{}", Cli::usage());
        return Ok(());
    };

    // Existing environment variables win over .env entries
    dotenvy::dotenv().ok();

    let config = Config::load().context("Failed to load configuration")?;

    setup_logging(&config.log_level).context("Failed to setup logging")?;

    info!("Starting reddit-persona for input: {}", profile);

    run(&profile, &config).context("Persona run failed")?;

    Ok(())
}
