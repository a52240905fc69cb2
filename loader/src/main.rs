//! `quake` - print the latest earthquakes from the USGS feed.

#![deny(unsafe_code)]

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use quake_core::{FetchOutcome, ViewState};

use quake_loader::cli::Cli;
use quake_loader::render::{render_json, render_text};
use quake_loader::{init_logging, Config, FeedLoader, FeedPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");

    let loader = FeedLoader::new(FeedPipeline::from_config(&config));
    let state = ViewState::default().apply(FetchOutcome::Loading);

    let Some(outcome) = loader.load(config.query()).await else {
        // Only a later load or cancel() discards a load; neither happens here.
        anyhow::bail!("feed load was discarded before it finished");
    };
    let failed = outcome.failure_kind().is_some();
    let state = state.apply(outcome);

    let mut stdout = std::io::stdout().lock();
    if cli.json && !failed {
        writeln!(stdout, "{}", render_json(&state, &Local)?)?;
    } else if failed {
        eprint!("{}", render_text(&state, &Local));
    } else {
        write!(stdout, "{}", render_text(&state, &Local))?;
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
