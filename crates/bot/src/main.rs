// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relay-bot - event-driven GitHub review bot

use anyhow::{Context, Result};
use clap::Parser;
use relay_bot::github::STATS_TICK;
use relay_bot::simulate::simulate;
use relay_bot::{
    BotConfig, CommandPromptAdapter, Delivery, GitHubBot, NoOpPromptAdapter, PromptAdapter,
};
use relay_core::{EventBus, EventData, EventSource, TimerSource};
use relay_storage::{FileStateBackend, StateManager};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser)]
#[command(
    name = "relay-bot",
    version,
    about = "Event-driven GitHub review bot"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// State storage directory (overrides the config file)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Replay canned GitHub events instead of reading deliveries from stdin
    #[arg(short, long)]
    simulate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };
    if let Some(state_dir) = cli.state_dir {
        config.state_dir = state_dir;
    }

    let _guard = setup_logging(&config)?;

    let backend = FileStateBackend::open(&config.state_dir).with_context(|| {
        format!(
            "failed to open state directory {}",
            config.state_dir.display()
        )
    })?;
    let bus = EventBus::with_config(&config.bus);
    let bot = GitHubBot::new(bus.clone(), StateManager::new(backend), prompt_adapter(&config));

    let timer = TimerSource::new(bus.clone());
    if let Some(interval) = config.stats_interval {
        timer.schedule(STATS_TICK, interval, EventData::new());
    }
    timer.start().await;

    let result = if cli.simulate {
        simulate(&bus).await.map_err(anyhow::Error::from)
    } else {
        read_deliveries(&bot).await
    };

    timer.stop().await;
    result?;

    print_summary(&bot).await
}

fn prompt_adapter(config: &BotConfig) -> Arc<dyn PromptAdapter> {
    match &config.prompt.command {
        Some(command) => Arc::new(CommandPromptAdapter::new(
            command.clone(),
            config.prompt.args.clone(),
        )),
        None => {
            tracing::warn!("no prompt command configured, reviews will be empty");
            Arc::new(NoOpPromptAdapter::new())
        }
    }
}

/// Handle `{"event": ..., "payload": ...}` lines from stdin until EOF
async fn read_deliveries(bot: &GitHubBot) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let delivery: Delivery = match serde_json::from_str(line) {
            Ok(delivery) => delivery,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed delivery");
                continue;
            }
        };
        let kind = delivery.event.clone();
        if !bot.handle_delivery(delivery).await? {
            tracing::debug!(kind = %kind, "delivery ignored");
        }
    }
    Ok(())
}

async fn print_summary(bot: &GitHubBot) -> Result<()> {
    println!("Final state:");
    for (key, status) in bot.pr_statuses().await? {
        println!("  {}: {}", key, status);
    }
    for key in bot.state().list("issue:").await? {
        println!("  {}: analyzed", key);
    }
    Ok(())
}

fn setup_logging(config: &BotConfig) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_path) = &config.log_path else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let file_name = log_path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", log_path.display()))?;

    let file_appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(Some(guard))
}
