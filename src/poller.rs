// Background poller: one fixed-rate timer per feed.
// Each tick spawns its own fetch-and-render cycle, so a slow upstream never delays a timer
// and overlapping cycles of one feed may commit out of order.

use crate::board::Board;
use crate::config::PollingConfig;
use crate::error::FeedUnavailable;
use crate::feeds::{
    Cadence, EventsFeed, Feed, LinkStatusFeed, MessageFlowFeed, NearbyFeed, SignalFeed,
    SpectrumFeed, SyncRefFeed, ThroughputFeed,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Duration, interval};
use tracing::Instrument;

/// Cycle outcome counters, reported by the stats logger.
#[derive(Debug, Default)]
pub struct PollerStats {
    pub cycles_ok: AtomicU64,
    pub cycles_failed: AtomicU64,
}

/// Upstream client, render surface and counters shared by every feed task.
#[derive(Clone)]
pub struct PollerDeps {
    pub client: reqwest::Client,
    /// Upstream base URL without trailing slash.
    pub base_url: String,
    pub board: Arc<Board>,
    pub stats: Arc<PollerStats>,
}

impl PollerDeps {
    pub fn new(client: reqwest::Client, base_url: &str, board: Arc<Board>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            board,
            stats: Arc::new(PollerStats::default()),
        }
    }
}

/// Builds the shared HTTP client for the upstream API.
pub fn build_client(request_timeout_ms: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(request_timeout_ms))
        .build()
}

/// Handles of the running feed timers.
pub struct PollerHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn feed_count(&self) -> usize {
        self.tasks.len()
    }

    /// Cancels every timer and the cycles still in flight, then waits for them to wind down.
    pub async fn stop(self) {
        for task in &self.tasks {
            task.abort();
        }
        for task in self.tasks {
            let _ = task.await;
        }
        tracing::debug!("Poller stopped");
    }
}

/// Starts the eight dashboard feeds.
pub fn spawn(deps: PollerDeps, polling: &PollingConfig) -> PollerHandle {
    let mut tasks = Vec::with_capacity(8);
    tasks.push(spawn_feed(deps.clone(), SyncRefFeed, polling));
    tasks.push(spawn_feed(deps.clone(), NearbyFeed, polling));
    tasks.push(spawn_feed(deps.clone(), LinkStatusFeed, polling));
    tasks.push(spawn_feed(deps.clone(), EventsFeed, polling));
    tasks.push(spawn_feed(
        deps.clone(),
        ThroughputFeed::new(polling.history_window),
        polling,
    ));
    tasks.push(spawn_feed(
        deps.clone(),
        SignalFeed::new(polling.history_window),
        polling,
    ));
    tasks.push(spawn_feed(deps.clone(), SpectrumFeed::default(), polling));
    tasks.push(spawn_feed(deps, MessageFlowFeed::default(), polling));
    PollerHandle { tasks }
}

/// Spawns the timer task for one feed. The first tick fires immediately.
pub fn spawn_feed<F: Feed>(deps: PollerDeps, feed: F, polling: &PollingConfig) -> JoinHandle<()> {
    let period = match feed.cadence() {
        Cadence::Fast => polling.fast_interval(),
        Cadence::Slow => polling.slow_interval(),
    };
    let feed = Arc::new(feed);
    let feed_span = tracing::span!(
        tracing::Level::DEBUG,
        "feed",
        feed = feed.name(),
        period_ms = period.as_millis() as u64
    );

    tokio::spawn(async move {
        let mut tick = interval(period);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // Dropped with the timer task, which aborts any cycle still running.
        let mut in_flight: JoinSet<()> = JoinSet::new();

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let deps = deps.clone();
                    let feed = feed.clone();
                    let cycle_span = tracing::Span::current();
                    in_flight.spawn(async move {
                        match run_cycle(&deps, feed.as_ref()).await {
                            Ok(()) => {
                                deps.stats.cycles_ok.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(e) => {
                                deps.stats.cycles_failed.fetch_add(1, Ordering::Relaxed);
                                tracing::warn!(
                                    feed = feed.name(),
                                    endpoint = feed.endpoint(),
                                    error = %e,
                                    "feed unavailable; keeping previous render"
                                );
                            }
                        }
                    }.instrument(cycle_span));
                }
                Some(result) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = result
                        && e.is_panic()
                    {
                        tracing::error!(feed = feed.name(), error = %e, "feed cycle panicked");
                    }
                }
            }
        }
    }.instrument(feed_span))
}

/// One fetch-decode-render-commit cycle. Nothing is written to the board unless
/// every step before rendering succeeded.
pub async fn run_cycle<F: Feed>(deps: &PollerDeps, feed: &F) -> Result<(), FeedUnavailable> {
    let url = format!("{}{}", deps.base_url, feed.endpoint());
    let response = deps.client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FeedUnavailable::Status(status));
    }
    let body = response.bytes().await?;
    let snapshot: F::Snapshot = serde_json::from_slice(&body)?;
    feed.check(&snapshot)?;

    let patches = feed.render(&snapshot);
    let targets = patches.len();
    deps.board.commit(feed.name(), patches).await;
    tracing::debug!(feed = feed.name(), targets, "feed rendered");
    Ok(())
}

/// Periodic INFO line with connection and cycle counts.
pub fn spawn_stats_logger(
    stats: Arc<PollerStats>,
    ws_board_connections: Arc<AtomicUsize>,
    log_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = interval(log_interval);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // First tick is immediate; nothing to report yet.
        tick.tick().await;
        loop {
            tick.tick().await;
            tracing::info!(
                ws_board_clients = ws_board_connections.load(Ordering::Relaxed),
                cycles_ok = stats.cycles_ok.load(Ordering::Relaxed),
                cycles_failed = stats.cycles_failed.load(Ordering::Relaxed),
                "app stats"
            );
        }
    })
}
