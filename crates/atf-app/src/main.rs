use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use atf_config::{Config, TeamsFile};
use atf_core::{MenuNavigator, NavigationContext, Roster, run_plan};
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod emitter;
pub mod handler;
pub mod replay;

use self::cli::Args;
use self::emitter::TracingEmitter;
use self::handler::LoggingHandler;
use self::replay::{Transcript, TranscriptFrames, TranscriptMonitor, TranscriptText};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.json);

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(args, shutdown).await
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

pub async fn run(args: Args, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    tokio::select! {
        _ = shutdown => {
            tracing::info!("Script interrupted by user");
            Ok(())
        }
        result = select_all(&args) => {
            match &result {
                Ok(visited) => tracing::info!("Script finished, {visited} teams visited"),
                Err(e) => tracing::error!("Script stopped: {e:#}"),
            }
            result.map(|_| ())
        }
    }
}

/// Walk every selectable team of the list against the recorded transcript
pub(crate) async fn select_all(args: &Args) -> anyhow::Result<usize> {
    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let regions = config.regions(&args.game_version)?.clone();

    let teams = TeamsFile::load(&args.list)
        .with_context(|| format!("failed to load teams list {}", args.list.display()))?;
    let roster = Roster::from_teams_file(&teams)?;
    tracing::info!(
        "Loaded {} leagues, {} planned",
        roster.leagues().len(),
        roster.plan().len()
    );

    let transcript = Arc::new(Transcript::load(&args.transcript)?);
    tracing::debug!("Transcript holds {} samples", transcript.len());

    let monitor = TranscriptMonitor::new(transcript.clone());
    let navigator = MenuNavigator::from_config(
        TranscriptFrames::new(transcript.clone(), args.frame_width, args.frame_height),
        TranscriptText::new(transcript, regions),
        TracingEmitter::new(config.input.clone()),
        &config,
    );
    let mut ctx = NavigationContext::from_config(&config, roster);

    if ctx.matcher.table().is_empty() {
        tracing::warn!("No OCR character equivalences configured");
    }
    tracing::info!(
        "Sampling every {:?}, match threshold {:.2}",
        navigator.settings().sample_interval,
        ctx.matcher.threshold()
    );

    let visited = run_plan(&navigator, &mut ctx, &LoggingHandler, &monitor).await?;
    Ok(visited)
}

#[cfg(test)]
mod tests;
