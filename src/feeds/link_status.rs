// Topology banner, quality bar and aggregate decode stats

use rand::seq::IndexedRandom;

use super::{Cadence, Feed};
use crate::metrics::{QualityBand, decode_ratio, packet_error_rate};
use crate::models::LinkStatusSnapshot;
use crate::render::Patch;

pub const TOPOLOGY_STATUS: &str = "topology-status";
pub const QUALITY_BAR: &str = "quality-bar-fill";
pub const PSSCH_DECODE: &str = "pssch-decode";
pub const PSBCH_DECODE: &str = "psbch-decode";
pub const PACKET_ERROR_RATE: &str = "packet-error-rate";

/// Values the quality bar cycles through while the link is down (demo animation).
pub const PLACEHOLDER_QUALITY: [f64; 7] = [20.0, 40.0, 50.0, 60.0, 80.0, 75.0, 100.0];

pub struct LinkStatusFeed;

impl LinkStatusFeed {
    /// Real score once the link is up, a random placeholder otherwise.
    fn displayed_quality(&self, snapshot: &LinkStatusSnapshot) -> f64 {
        if snapshot.link_established {
            return snapshot.overall_quality;
        }
        PLACEHOLDER_QUALITY
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(0.0)
    }
}

impl Feed for LinkStatusFeed {
    type Snapshot = LinkStatusSnapshot;

    fn name(&self) -> &'static str {
        "link_status"
    }

    fn endpoint(&self) -> &'static str {
        "/api/link_status"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Fast
    }

    fn render(&self, s: &LinkStatusSnapshot) -> Vec<Patch> {
        let banner = if s.link_established {
            "✅ TACTICAL LINK ESTABLISHED"
        } else {
            "❌ LINK DOWN"
        };

        let quality = self.displayed_quality(s);
        let band = QualityBand::from_score(quality);

        vec![
            Patch::text(TOPOLOGY_STATUS, format!("STATUS: {}", banner)),
            Patch::Width {
                target: QUALITY_BAR.to_string(),
                percent: quality,
            },
            Patch::text(
                QUALITY_BAR,
                format!("{}% {}", quality.round() as i64, band.label()),
            ),
            Patch::text(
                PSSCH_DECODE,
                format!(
                    "{}/{} ({:.1}%)",
                    s.pssch_total_rx_ok,
                    s.pssch_total_tx,
                    decode_ratio(s.pssch_total_rx_ok, s.pssch_total_tx)
                ),
            ),
            // Every PSBCH counted here was decoded, so the ratio is always full.
            Patch::text(
                PSBCH_DECODE,
                format!("{}/{} (100.0%)", s.psbch_sync_count, s.psbch_sync_count),
            ),
            Patch::text(
                PACKET_ERROR_RATE,
                format!(
                    "{:.2}%",
                    packet_error_rate(s.pssch_total_rx_ok, s.pssch_total_errors)
                ),
            ),
        ]
    }
}
