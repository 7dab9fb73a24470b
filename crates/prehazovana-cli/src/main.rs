//! Terminal entry point for Přehazovaná.
mod config;
mod console;
mod provider;

use std::io;

use anyhow::{Context, Result};
use config::CliConfig;
use console::{ConsoleObserver, StdinSelector};
use prehazovana_core::{FixedSelector, MatchSimulator};
use provider::DirectoryRosterProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    setup_logging()?;

    let config = CliConfig::from_env();
    tracing::debug!(?config, "configuration loaded");

    println!("Welcome to Přehazovaná!");

    let provider = DirectoryRosterProvider::new(&config.roster_dir);
    provider
        .ensure_layout(&config.game.teams)
        .with_context(|| format!("failed to prepare {}", provider.root().display()))?;

    let mut sim = MatchSimulator::seeded(config.game.clone());
    let mut observer = ConsoleObserver::new(io::stdout());

    sim.load_roster(&provider, &mut observer)
        .with_context(|| format!("failed to load roster from {}", provider.root().display()))?;

    println!("Available Characters:");
    for (idx, character) in sim.roster().iter().enumerate() {
        println!("{}. {character}", idx + 1);
    }

    let summary = match config.auto_throw {
        Some(throw) => sim.run(&mut FixedSelector(throw), &mut observer),
        None => {
            let stop = sim.stop_signal();
            let mut selector = StdinSelector::new(io::stdin().lock(), io::stdout(), stop);
            sim.run(&mut selector, &mut observer)
        }
    }
    .context("match ended with an error")?;

    println!("Final score: {}", sim.score());
    tracing::info!(
        phase = %summary.phase,
        rounds = summary.rounds,
        seed = ?summary.seed,
        "match over"
    );

    Ok(())
}

/// Log to stderr, keeping stdout for the game text.
fn setup_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
