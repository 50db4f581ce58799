use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use riskdesk_client::{
    config::{DEFAULT_API_URL, DEFAULT_REFRESH_INTERVAL, DEFAULT_REQUEST_TIMEOUT},
    render::{render_execution, render_summary},
    ApplyOutcome, ClientConfig, RiskDesk,
};
use riskdesk_core::{now_ms, RunMode, WorkflowTriggerRequest};
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "riskdesk", version, about = "Aggregating client for the finance risk API")]
struct Cli {
    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Seconds between scheduled refresh cycles.
    #[arg(long, global = true, default_value_t = DEFAULT_REFRESH_INTERVAL.as_secs())]
    refresh_interval_seconds: u64,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    request_timeout_seconds: u64,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Refresh periodically and log each applied cycle until Ctrl-C.
    Watch,
    /// Run a single refresh cycle and print the result.
    Snapshot {
        /// Print the view-state as JSON instead of a text summary.
        #[arg(long)]
        json: bool,
    },
    /// Trigger an AI analysis run on the workflow engine.
    Analyze {
        #[arg(long, value_enum, default_value_t = RunModeArg::Full)]
        run_mode: RunModeArg,
        /// Global risk threshold (0-100) for raising alerts.
        #[arg(long, default_value_t = 70)]
        risk_threshold: u32,
        #[arg(long)]
        no_notifications: bool,
    },
    /// Print backend health.
    Health,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RunModeArg {
    Full,
    TreasuryOnly,
    PortfolioOnly,
    ComplianceOnly,
}

impl From<RunModeArg> for RunMode {
    fn from(m: RunModeArg) -> Self {
        match m {
            RunModeArg::Full => RunMode::Full,
            RunModeArg::TreasuryOnly => RunMode::TreasuryOnly,
            RunModeArg::PortfolioOnly => RunMode::PortfolioOnly,
            RunModeArg::ComplianceOnly => RunMode::ComplianceOnly,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ClientConfig {
        api_url: cli.api_url.clone(),
        refresh_interval: Duration::from_secs(cli.refresh_interval_seconds.max(1)),
        request_timeout: Duration::from_secs(cli.request_timeout_seconds.max(1)),
        ..ClientConfig::default()
    };
    info!("riskdesk starting; api={}", config.api_url);

    let desk = RiskDesk::connect(config).context("building http client")?;

    match cli.cmd {
        Cmd::Watch => watch(&desk).await?,
        Cmd::Snapshot { json } => {
            let outcome = desk.refresh().await;
            let state = desk.state();
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                print!("{}", render_summary(&state, desk.policy(), now_ms()));
            }
            if let ApplyOutcome::Failed { reason, .. } = outcome {
                anyhow::bail!("refresh failed: {reason}");
            }
        }
        Cmd::Analyze {
            run_mode,
            risk_threshold,
            no_notifications,
        } => {
            let req = WorkflowTriggerRequest {
                run_mode: run_mode.into(),
                risk_threshold,
                send_notifications: !no_notifications,
            };
            let exec = desk
                .run_analysis(Some(req))
                .await
                .context("Failed to trigger AI workflow. Please check if backend is running")?;
            if let Some(exec) = exec {
                print!("{}", render_execution(&exec));
            }
        }
        Cmd::Health => {
            let health = desk.health().await.context("health check")?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}

async fn watch(desk: &RiskDesk) -> Result<()> {
    let mut rx = desk.subscribe();
    desk.start();

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if state.is_loading {
                    continue;
                }
                if let Some(err) = &state.last_error {
                    warn!("refresh failed: {err}");
                }
                print!("{}", render_summary(&state, desk.policy(), now_ms()));
            }
            _ = signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
        }
    }

    desk.shutdown();
    Ok(())
}
