// Rendering surface: latest content of every display target

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::{RwLock, broadcast};

use crate::render::{Patch, Series};

/// Current content of one target. `text` and `html` are mutually exclusive,
/// like `textContent` and `innerHTML` on the same element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Series>,
}

impl TargetState {
    fn apply(&mut self, patch: Patch) {
        match patch {
            Patch::Text { text, .. } => {
                self.text = Some(text);
                self.html = None;
            }
            Patch::Markup { html, .. } => {
                self.html = Some(html);
                self.text = None;
            }
            Patch::Class { class, .. } => self.class = Some(class),
            Patch::Width { percent, .. } => self.width_percent = Some(percent),
            Patch::Series { series, .. } => self.series = Some(series),
        }
    }
}

/// Everything one feed cycle wrote, pushed to /ws/board subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpdate {
    pub feed: String,
    /// Unix millis at commit time.
    pub rendered_at: i64,
    pub patches: Vec<Patch>,
}

/// Messages on /ws/board: the full board once, then updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardMessage {
    Board {
        targets: BTreeMap<String, TargetState>,
    },
    Update(BoardUpdate),
}

pub struct Board {
    targets: RwLock<BTreeMap<String, TargetState>>,
    updates_tx: broadcast::Sender<BoardUpdate>,
}

impl Board {
    pub fn new(broadcast_capacity: usize) -> Self {
        let (updates_tx, _) = broadcast::channel(broadcast_capacity);
        Self {
            targets: RwLock::new(BTreeMap::new()),
            updates_tx,
        }
    }

    /// Applies all of a feed's patches under one write lock, then broadcasts them.
    pub async fn commit(&self, feed: &str, patches: Vec<Patch>) {
        {
            let mut targets = self.targets.write().await;
            for patch in patches.iter().cloned() {
                targets
                    .entry(patch.target().to_string())
                    .or_default()
                    .apply(patch);
            }
        }
        let update = BoardUpdate {
            feed: feed.to_string(),
            rendered_at: chrono::Utc::now().timestamp_millis(),
            patches,
        };
        // No subscribers is the normal state when no browser is connected.
        let _ = self.updates_tx.send(update);
    }

    pub async fn target(&self, id: &str) -> Option<TargetState> {
        self.targets.read().await.get(id).cloned()
    }

    pub async fn snapshot(&self) -> BTreeMap<String, TargetState> {
        self.targets.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardUpdate> {
        self.updates_tx.subscribe()
    }
}
