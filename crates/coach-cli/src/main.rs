//! Coach CLI Application
//!
//! Terminal front end for the Coach AI workout planner.

mod args;
mod cli;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use coach_core::{
    AnalysisProvider, CoachBuilder, ConnectivityFlag, GeminiConfig, GeminiProvider,
};
use log::{info, warn};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        offline,
        api_key,
        language,
        model,
        command,
    } = Args::parse();

    let store = CoachBuilder::new()
        .with_database_path(database_file)
        .build_store()
        .await
        .context("Failed to initialize plan cache")?;

    let provider: Option<Arc<dyn AnalysisProvider>> = match api_key.filter(|key| !key.is_empty()) {
        Some(key) => {
            let config = GeminiConfig::new(key)
                .with_text_model(model)
                .with_language(language);
            Some(Arc::new(
                GeminiProvider::new(config).context("Failed to create Gemini client")?,
            ))
        }
        None => {
            warn!("No Gemini API key configured; only cached data is available");
            None
        }
    };

    let connectivity = ConnectivityFlag::new(!offline);
    let cli = Cli::new(store, provider, connectivity, TerminalRenderer::new(!no_color));

    info!("Coach started");

    match command {
        Some(Show(args)) => cli.show(args),
        Some(Goals) => {
            cli.goals();
            Ok(())
        }
        Some(Plan(args)) => cli.plan(args).await,
        Some(Exercise(args)) => cli.exercise(args).await,
        Some(Reset) => cli.reset(),
        Some(Cached) => cli.cached(),
        None => cli.show(Default::default()),
    }
}
