use anyhow::Result;
use sidelink_dashboard::*;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        "{} {} polling {}",
        version::NAME,
        version::VERSION,
        app_config.upstream.base_url
    );

    let board = Arc::new(board::Board::new(app_config.publishing.broadcast_capacity));
    let client = poller::build_client(app_config.upstream.request_timeout_ms)?;
    let deps = poller::PollerDeps::new(client, &app_config.upstream.base_url, board.clone());
    let stats = deps.stats.clone();
    let ws_board_connections = Arc::new(AtomicUsize::new(0));

    let poller_handle = poller::spawn(deps, &app_config.polling);
    tracing::info!(feeds = poller_handle.feed_count(), "Poller started");
    let stats_handle = poller::spawn_stats_logger(
        stats,
        ws_board_connections.clone(),
        std::time::Duration::from_secs(app_config.monitoring.stats_log_interval_secs),
    );

    let app = routes::app(board, ws_board_connections);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    stats_handle.abort();
    poller_handle.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
