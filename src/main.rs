use std::path::Path;
use std::sync::Arc;

use latency_workshop_api::AppState;
use latency_workshop_latency::{LatencyManager, TracingObserver};
use latency_workshop_service::UserService;
use latency_workshop_store::MemoryUserStore;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod demo;

use config::{parse_command, parse_flag_string, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = parse_command(&args).unwrap_or("serve");

    let config_path = parse_flag_string(&args, "--config");
    let mut settings = Settings::load(config_path.as_deref().map(Path::new))?;
    settings.apply_cli(&args)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cmd {
        "serve" => serve(settings).await?,
        "demo" => demo::run_demo().await?,
        _ => {
            eprintln!("Usage: latency-workshop [serve|demo] [--config <file.toml>]");
            eprintln!("       [--host <addr>] [--port <port>] [--latency <MODE>]");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    info!(name = %settings.app_name, version = %settings.app_version, "starting");

    let store = Arc::new(MemoryUserStore::new());
    store.seed_if_empty().await?;

    let latency = LatencyManager::with_observers(
        settings.default_latency_mode,
        vec![Arc::new(TracingObserver)],
    );
    let profile = latency.get_active_profile();
    info!(
        mode = %latency.get_active_mode(),
        read_ms = profile.read_delay.as_millis() as u64,
        write_ms = profile.write_delay.as_millis() as u64,
        "latency configured"
    );

    let users = UserService::new(store, latency);
    let app = latency_workshop_api::router(AppState::new(users, settings.api_info()));

    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("server ready at http://{addr}");

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
        }
        trigger.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}
