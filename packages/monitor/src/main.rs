// Entry point for the Volo session monitor. One invocation = one
// discovery run; scheduling is the caller's job (cron, systemd timer).

mod config;

use std::process::ExitCode;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use discovery::{
    Fetcher, GraphqlFetcher, JsonFileStore, Notifier, NtfyNotifier, PageDataFetcher, Pipeline,
    RunOutcome, Severity,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

/// Which fetch strategy to use for this run.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Direct GraphQL search query
    Api,
    /// Embedded page-data extraction from the discovery page
    Page,
}

#[derive(Parser, Debug)]
#[command(name = "volo-monitor", about = "Watch for newly-opened Volo sessions")]
struct Args {
    /// Fetch strategy
    #[arg(long, value_enum, default_value = "api")]
    fetcher: Strategy,

    /// Override the seen-set file path (defaults to $SEEN_FILE)
    #[arg(long)]
    seen_file: Option<String>,

    /// Log notifications instead of pushing them
    #[arg(long)]
    dry_run: bool,
}

/// Notifier used for dry runs: logs the message, delivers nothing.
struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str, severity: Severity) -> discovery::error::NotifyResult<()> {
        tracing::info!(?severity, "dry-run notification:\n{}", message);
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,discovery=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(seen_file) = args.seen_file {
        config.seen_file = seen_file;
    }

    tracing::info!(
        city = %config.city,
        sport = %config.sport,
        seen_file = %config.seen_file,
        strategy = ?args.fetcher,
        dry_run = args.dry_run,
        "starting monitor run"
    );

    let outcome = match args.fetcher {
        Strategy::Api => {
            let fetcher = GraphqlFetcher::new(
                &config.graphql_url,
                &config.city,
                &config.sport,
                config.fetch_limit,
            )
            .context("Failed to build GraphQL fetcher")?;
            run(fetcher, &config, args.dry_run).await?
        }
        Strategy::Page => {
            let fetcher = PageDataFetcher::new(&config.discover_url, &config.sport)
                .context("Failed to build page-data fetcher")?;
            run(fetcher, &config, args.dry_run).await?
        }
    };

    // Blocked and errored runs must be distinguishable from clean ones
    // for the external scheduler.
    let code = match outcome {
        RunOutcome::NoNewListings => {
            tracing::info!("no new sessions");
            ExitCode::SUCCESS
        }
        RunOutcome::Notified(count) => {
            tracing::info!(count, "notified new sessions");
            ExitCode::SUCCESS
        }
        RunOutcome::Errored { detail } => {
            tracing::error!(detail = %detail, "run errored");
            ExitCode::from(1)
        }
        RunOutcome::Blocked { status } => {
            tracing::warn!(status, "run blocked by upstream");
            ExitCode::from(2)
        }
    };
    Ok(code)
}

async fn run<F: Fetcher>(fetcher: F, config: &Config, dry_run: bool) -> Result<RunOutcome> {
    let store = JsonFileStore::new(&config.seen_file);

    let outcome = if dry_run {
        Pipeline::new(fetcher, LogNotifier, store)
            .run()
            .await
            .context("Pipeline run failed")?
    } else {
        let notifier =
            NtfyNotifier::new(&config.ntfy_topic).context("Failed to build ntfy notifier")?;
        Pipeline::new(fetcher, notifier, store)
            .run()
            .await
            .context("Pipeline run failed")?
    };

    Ok(outcome)
}
