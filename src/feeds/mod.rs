// Polled feeds: endpoint, cadence, snapshot type and render function per feed

mod chart;
mod events;
mod link_status;
mod node;

use serde::de::DeserializeOwned;

use crate::error::FeedUnavailable;
use crate::render::Patch;

pub use chart::{MessageFlowFeed, SignalFeed, SpectrumFeed, ThroughputFeed};
pub use events::{EVENT_LOG, EventsFeed};
pub use link_status::{
    LinkStatusFeed, PACKET_ERROR_RATE, PLACEHOLDER_QUALITY, PSBCH_DECODE, PSSCH_DECODE,
    QUALITY_BAR, TOPOLOGY_STATUS,
};
pub use node::{NearbyFeed, SyncRefFeed};

/// Which configured polling period a feed runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Fast,
    Slow,
}

/// One polled endpoint and the targets it owns.
///
/// Rendering is infallible: everything that can go wrong happens while
/// fetching, decoding or in [`Feed::check`], before any target is touched.
pub trait Feed: Send + Sync + 'static {
    type Snapshot: DeserializeOwned + Send + 'static;

    fn name(&self) -> &'static str;

    /// Path on the upstream API, e.g. `/api/syncref`.
    fn endpoint(&self) -> &'static str;

    fn cadence(&self) -> Cadence;

    /// Rejects snapshots that decode but cannot be rendered consistently.
    fn check(&self, _snapshot: &Self::Snapshot) -> Result<(), FeedUnavailable> {
        Ok(())
    }

    /// Every target this feed owns, overwritten unconditionally.
    fn render(&self, snapshot: &Self::Snapshot) -> Vec<Patch>;
}
