// Shared test helpers: upstream fixtures and a local stub of the link API

#![allow(dead_code)]

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use sidelink_dashboard::board::Board;
use sidelink_dashboard::config::PollingConfig;
use sidelink_dashboard::poller::{PollerDeps, build_client};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::time::Duration;

pub fn syncref_json() -> Value {
    json!({
        "ue_type": "syncref",
        "role": "Primary Sync Source",
        "status": "running",
        "frame": 512,
        "slot": 3,
        "frame_slot": "512:3",
        "carrier": "2.6 GHz",
        "bandwidth": "106 RBs",
        "mcs": 9,
        "tx_power": "23 dBm",
        "psbch": { "tx": 120, "rx_ok": 0, "rx_not_ok": 0 },
        "pscch": { "tx": 80, "rx_ok": 0, "rx_not_ok": 0 },
        "pssch": { "tx": 100, "rx_ok": 94, "rx_not_ok": 6 },
        "psfch": { "tx": 10, "rx_ok": 0, "rx_not_ok": 0 },
        "quality": { "quality_level": 80, "rsrp": -45, "sinr": 25, "cqi": 15 },
        "terminal_output": [
            "[NR_PHY] SL-SSB transmitted",
            "<script>alert(1)</script>"
        ],
        "timestamp": "2026-10-17T10:00:00"
    })
}

pub fn nearby_json() -> Value {
    json!({
        "ue_type": "nearby",
        "role": "Synchronized Receiver",
        "status": "running",
        "frame_slot": "512:4",
        "carrier": "2.6 GHz",
        "bandwidth": "106 RBs",
        "mcs": 9,
        "rx_gain": "Auto",
        "synchronized": true,
        "psbch": { "tx": 0, "rx_ok": 42, "rx_not_ok": 0 },
        "pscch": { "tx": 0, "rx_ok": 70, "rx_not_ok": 1 },
        "pssch": { "tx": 0, "rx_ok": 886, "rx_not_ok": 14 },
        "psfch": { "tx": 5, "rx_ok": 0, "rx_not_ok": 0 },
        "quality": { "rsrp": -47.5, "sinr": 22, "cqi": 14 },
        "terminal_output": ["[NR_PHY] PSBCH decoded"]
    })
}

pub fn link_status_json() -> Value {
    json!({
        "link_established": true,
        "overall_quality": 89.9,
        "syncref_running": true,
        "nearby_running": true,
        "pssch_total_tx": 1000,
        "pssch_total_rx_ok": 980,
        "pssch_total_errors": 20,
        "psbch_sync_count": 42,
        "gnb_status": "offline",
        "core_status": "offline"
    })
}

pub fn events_json() -> Value {
    json!({
        "events": [
            { "time": "10:00:01", "type": "success", "message": "Tactical comms link: OPERATIONAL" },
            { "time": "10:00:02", "type": "info", "message": "<img src=x onerror=alert(1)>" }
        ]
    })
}

pub fn throughput_json(points: usize) -> Value {
    let series: Vec<Value> = (0..points)
        .map(|i| json!({ "timestamp": format!("t{}", i), "tx_mbps": i as f64, "rx_mbps": 1.5 }))
        .collect();
    json!({ "syncref": series.clone(), "nearby": series })
}

pub fn signal_json(points: usize) -> Value {
    let series: Vec<Value> = (0..points)
        .map(|i| json!({ "timestamp": format!("t{}", i), "rsrp": -45, "sinr": 25, "cqi": 15 }))
        .collect();
    json!({ "syncref": series })
}

pub fn spectrum_json() -> Value {
    json!({
        "frequency": [2590.0, 2595.0, 2600.0],
        "channel_response": [-60.0, -58.0, -61.0],
        "noise_floor": [-95.0, -95.5, -94.0]
    })
}

pub fn message_flow_json() -> Value {
    json!({
        "flow": [
            { "from": "SyncRef", "to": "Nearby", "message": "S-SSB", "description": "Sync broadcast" },
            { "from": "Nearby", "to": "SyncRef", "message": "PSFCH", "description": "HARQ feedback" }
        ]
    })
}

/// How the stub answers one path.
#[derive(Clone)]
pub enum StubReply {
    Json(Value),
    Status(u16),
    Garbage,
    Delayed(Duration, Value),
}

#[derive(Default)]
pub struct StubUpstream {
    replies: Mutex<HashMap<String, StubReply>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl StubUpstream {
    /// Every endpoint answering with its healthy fixture.
    pub fn healthy() -> Arc<Self> {
        let stub = Arc::new(Self::default());
        stub.set("/api/syncref", StubReply::Json(syncref_json()));
        stub.set("/api/nearby", StubReply::Json(nearby_json()));
        stub.set("/api/link_status", StubReply::Json(link_status_json()));
        stub.set("/api/events", StubReply::Json(events_json()));
        stub.set("/api/throughput_history", StubReply::Json(throughput_json(100)));
        stub.set("/api/signal_history", StubReply::Json(signal_json(100)));
        stub.set("/api/spectrum_data", StubReply::Json(spectrum_json()));
        stub.set("/api/message_flow", StubReply::Json(message_flow_json()));
        stub
    }

    pub fn set(&self, path: &str, reply: StubReply) {
        self.replies.lock().unwrap().insert(path.to_string(), reply);
    }

    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

async fn stub_reply(State(stub): State<Arc<StubUpstream>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    *stub.hits.lock().unwrap().entry(path.clone()).or_default() += 1;
    let reply = stub.replies.lock().unwrap().get(&path).cloned();
    match reply {
        Some(StubReply::Json(v)) => axum::Json(v).into_response(),
        Some(StubReply::Status(code)) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Some(StubReply::Garbage) => "{\"events\": [ not json".into_response(),
        Some(StubReply::Delayed(delay, v)) => {
            tokio::time::sleep(delay).await;
            axum::Json(v).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serves `stub` on an ephemeral local port; returns its base URL.
pub async fn serve_stub(stub: Arc<StubUpstream>) -> String {
    let app = Router::new().fallback(stub_reply).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}

pub fn test_deps(base_url: &str) -> (PollerDeps, Arc<Board>) {
    let board = Arc::new(Board::new(64));
    let client = build_client(2000).unwrap();
    (PollerDeps::new(client, base_url, board.clone()), board)
}

pub fn fast_polling(interval_ms: u64) -> PollingConfig {
    PollingConfig {
        fast_interval_ms: interval_ms,
        slow_interval_ms: interval_ms,
        history_window: 60,
    }
}

/// Polls `check` until it holds or `deadline` passes.
pub async fn eventually<F, Fut>(deadline: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let until = tokio::time::Instant::now() + deadline;
    loop {
        if check().await {
            return true;
        }
        if tokio::time::Instant::now() >= until {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
