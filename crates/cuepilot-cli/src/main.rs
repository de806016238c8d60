use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use cuepilot_core::{Clock, CuepilotConfig, SystemClock};
use cuepilot_engine::{Dispatcher, FailureSink, Orchestrator, OscSender, RetryPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "cuepilot",
    version,
    about = "Time-triggered OSC cue dispatch for show-control receivers"
)]
struct Args {
    /// Config file (default: ./cuepilot.toml, or CUEPILOT_CONFIG).
    #[arg(long)]
    config: Option<String>,

    /// Cue sheet path. Skips directory discovery.
    #[arg(long)]
    schedule: Option<String>,

    /// Force a source backend: table, keyvalue, timelist, or calendar.
    #[arg(long)]
    source: Option<String>,

    /// Receiver host.
    #[arg(long)]
    host: Option<String>,

    /// Receiver OSC port.
    #[arg(long)]
    port: Option<u16>,

    /// Identity this machine answers to in calendar event summaries.
    #[arg(long)]
    identity: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cuepilot=info".into()),
        )
        .init();

    let args = Args::parse();

    // load config: explicit path > CUEPILOT_CONFIG env > ./cuepilot.toml
    let mut config = CuepilotConfig::load(args.config.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        CuepilotConfig::default()
    });
    if let Some(schedule) = args.schedule {
        config.schedule.path = Some(schedule);
    }
    if let Some(source) = args.source {
        config.schedule.kind = Some(source);
    }
    if let Some(host) = args.host {
        config.osc.host = host;
    }
    if let Some(port) = args.port {
        config.osc.port = port;
    }
    if let Some(identity) = args.identity {
        config.schedule.identity = Some(identity);
    }

    // No usable source is fatal: bail out before anything is scheduled.
    let source = cuepilot_source::resolve_source(&config.schedule)?;

    let clock = SystemClock;
    let entries = cuepilot_source::load_runnable(source.as_ref(), clock.now())?;
    info!(count = entries.len(), "runnable cue list ready");
    for entry in &entries {
        println!("  {}", entry);
    }

    let endpoint = config.endpoint();
    let target: SocketAddr = endpoint
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| anyhow::anyhow!("cannot resolve OSC endpoint {endpoint}"))?;
    let sender = OscSender::bind(target).await?;
    info!(target = %sender.target(), "OSC transport ready");

    let dispatcher = Dispatcher::new(
        sender,
        RetryPolicy::new(
            config.retry.max_attempts,
            Duration::from_secs(config.retry.delay_secs),
        ),
    );
    let sink = FailureSink::new(config.failure_log.path.clone());

    // Ctrl-C feeds the shutdown watch; the wait loop observes it at its
    // one-second suspension point.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let orchestrator = Orchestrator::new(dispatcher, sink, Box::new(clock));
    let summary = orchestrator.run(&entries, shutdown_rx).await;
    info!(
        dispatched = summary.dispatched,
        failed = summary.failed,
        interrupted = summary.interrupted,
        "cuepilot exiting"
    );
    Ok(())
}
