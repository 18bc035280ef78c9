//! Senti - Sentiment Analysis Client
//!
//! Sends text to a remote sentiment API and shows the overall mood along
//! with the words that drove it.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use senti::{
    history::{HistoryEntry, HistoryManager},
    render, AnalysisReport, Analyzer, ApiClient, Config, HighlightMode,
};

mod cli;

use cli::{Cli, Commands, ConfigUpdate, InputSource};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Some(Commands::Analyze { text, file, clipboard, model, mode, json, server }) => {
            let config = load_config(server)?;
            let input = InputSource::select(text, file, clipboard).read(std::io::stdin())?;
            analyze(&config, &input, model, mode, json).await?
        }
        Some(Commands::Models { server }) => list_models(&load_config(server)?).await?,
        Some(Commands::History { clear }) => show_history(&Config::load()?, clear)?,
        Some(Commands::Config { show: true, .. }) => print_config(&Config::load()?)?,
        Some(Commands::Config { update, .. }) => configure(update)?,
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Load the saved config, with an optional server URL for this run only
fn load_config(server: Option<String>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(server) = server {
        config.server_url = server;
    }
    Ok(config)
}

/// Run one analysis and print the result
async fn analyze(
    config: &Config,
    input: &str,
    model: Option<String>,
    mode: Option<HighlightMode>,
    json: bool,
) -> Result<()> {
    let mut analyzer = Analyzer::connect(config)
        .await
        .context("Failed to load available models")?;
    if let Some(mode) = mode {
        analyzer.set_mode(mode);
    }

    let model_name = model.or_else(|| config.default_model.clone());
    let model = analyzer.select_model(model_name.as_deref())?.clone();
    debug!("Using model {} at {}", model.name, model.url);

    let report = analyzer.analyze(&model, input).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, config.color && std::io::stdout().is_terminal());
    }

    if config.keep_history {
        record_history(config, &report);
    }

    Ok(())
}

fn print_report(report: &AnalysisReport, color: bool) {
    println!("{}", render::highlight_text(&report.text, &report.highlights, color));
    println!();
    println!("Model:     {}", report.model.name);
    println!("Tokens:    {}", report.tokens.len());
    println!("Sentiment: {}", render::gauge(&report.overall, color));
}

fn record_history(config: &Config, report: &AnalysisReport) {
    let result = HistoryManager::new(config.max_history_size)
        .and_then(|mut history| history.add(HistoryEntry::from(report)));
    if let Err(e) = result {
        warn!("Failed to record history: {:#}", e);
    }
}

/// List the models offered by the server
async fn list_models(config: &Config) -> Result<()> {
    let client = ApiClient::new(config)?;
    let models = client.fetch_models().await?;

    if models.is_empty() {
        println!("(no models available at {})", client.server_url());
        return Ok(());
    }

    println!("Models at {}:\n", client.server_url());
    let default_index = config
        .default_model
        .as_deref()
        .and_then(|name| models.iter().position(|m| m.name.eq_ignore_ascii_case(name)))
        .unwrap_or(0);

    for (i, model) in models.iter().enumerate() {
        let default = if i == default_index { " [default]" } else { "" };
        println!("  {}{}", model.name, default);
        println!("    {}", model.url);
    }

    Ok(())
}

/// Show or clear the analysis history
fn show_history(config: &Config, clear: bool) -> Result<()> {
    let mut history = HistoryManager::new(config.max_history_size)?;

    if clear {
        history.clear()?;
        println!("History cleared.");
        return Ok(());
    }

    let entries = history.get_all();
    if entries.is_empty() {
        println!("(no analyses recorded)");
        return Ok(());
    }

    for entry in entries {
        let preview: String = entry.text.chars().take(60).collect();
        let ellipsis = if entry.text.chars().count() > 60 { "..." } else { "" };
        println!(
            "{}  {:>4} {:<8} {:<12} {}{}",
            entry.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
            entry.score,
            entry.bucket.label(),
            entry.model,
            preview.replace('\n', " "),
            ellipsis
        );
    }

    Ok(())
}

/// Update and print the saved configuration
fn configure(update: ConfigUpdate) -> Result<()> {
    let changed = !update.is_empty();
    let config = update.apply_to(&Config::path()?)?;

    if changed {
        println!("Configuration saved.\n");
    }

    print_config(&config)
}

fn print_config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
