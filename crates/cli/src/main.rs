use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use autocontent_cli::{Cli, Commands, TrackArgs, VoicesArgs};
use autocontent_client::{ServiceConfig, ServiceMode};
use autocontent_orchestrator::{
    CatalogClient, Completion, JobError, Orchestrator, OrchestratorSettings, VoiceFallback,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    autocontent_observability::init_with(cli.log_format);

    let settings = OrchestratorSettings::default();
    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    match &cli.command {
        Commands::Voices(args) => list_voices(args, &settings).await,
        Commands::Avatars => {
            let catalog = CatalogClient::connect(&online_mode()?, settings.catalog_backoff)?;
            let avatars = catalog.list_avatars().await.context("listing avatars")?;
            print_json(&avatars)
        }
        Commands::Track(args) => {
            let orchestrator = Orchestrator::connect(&online_mode()?, settings)?;
            let outcome = track(&orchestrator, args, cancel).await;
            report(outcome)
        }
        command => {
            let request = command
                .job_request()
                .context("command does not submit a job")?;
            let orchestrator = Orchestrator::connect(&online_mode()?, settings)?;
            report(orchestrator.run(request, cancel).await)
        }
    }
}

fn online_mode() -> anyhow::Result<ServiceMode> {
    let config = ServiceConfig::from_env().context("reading service configuration")?;
    Ok(ServiceMode::Online(config))
}

async fn list_voices(args: &VoicesArgs, settings: &OrchestratorSettings) -> anyhow::Result<()> {
    let mode = if args.offline {
        ServiceMode::OfflineFallback
    } else {
        ServiceMode::from_env().context("reading service configuration")?
    };
    if mode.is_offline() {
        tracing::info!("no content service configured; serving built-in voices");
    }
    let catalog = CatalogClient::connect(&mode, settings.catalog_backoff)?;
    let catalog = if args.fallback {
        catalog.with_fallback(VoiceFallback::DefaultVoices)
    } else {
        catalog
    };
    let voices = catalog.list_voices().await.context("listing voices")?;
    print_json(&voices)
}

async fn track(
    orchestrator: &Orchestrator,
    args: &TrackArgs,
    cancel: CancellationToken,
) -> Result<Completion, JobError> {
    let timeout = orchestrator.settings().schedule(args.kind).timeout;
    orchestrator.track(args.job(timeout), cancel).await
}

/// Print a completion, or a still-processing notice for a timed-out job.
/// Every other failure is returned as an error.
fn report(outcome: Result<Completion, JobError>) -> anyhow::Result<()> {
    match outcome {
        Ok(completion) => print_json(&completion),
        Err(err) if err.is_still_processing() => {
            tracing::warn!(error = %err, "job did not finish before its deadline");
            print_json(&json!({
                "status": "still_processing",
                "job_id": err.job_id().map(|id| id.as_str()),
                "message": err.to_string(),
            }))
        }
        Err(err) => {
            let retryable = err.is_retryable();
            tracing::error!(
                error = %err,
                http_status = err.http_status(),
                job_id = err.job_id().map(|id| id.as_str()),
                "job did not complete"
            );
            Err(anyhow::Error::new(err).context(if retryable {
                "job did not complete; resubmitting may succeed"
            } else {
                "job did not complete"
            }))
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("rendering output")?;
    println!("{rendered}");
    Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("interrupt received; cancelling");
            cancel.cancel();
        }
        Err(error) => tracing::warn!(%error, "failed to capture Ctrl+C signal"),
    }
}
