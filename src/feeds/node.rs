// SyncRef and Nearby UE panels

use super::{Cadence, Feed};
use crate::metrics::{success_class, success_rate};
use crate::models::{LinkSnapshot, NearbySnapshot, SyncRefSnapshot};
use crate::render::{FieldBinding, Patch, Rendered, line_block, render_fields};

type LinkField = FieldBinding<LinkSnapshot>;
type SyncRefField = FieldBinding<SyncRefSnapshot>;
type NearbyField = FieldBinding<NearbySnapshot>;

/// Targets both panels share, bound under the node's prefix.
const LINK_FIELDS: &[LinkField] = &[
    LinkField::new("status", |s| {
        let (text, state) = if s.status.is_running() {
            ("✅ OPERATIONAL", "operational")
        } else {
            ("🔴 OFFLINE", "offline")
        };
        Rendered::Styled {
            text: text.into(),
            class: format!("status-badge {}", state),
        }
    }),
    LinkField::new("frame-slot", |s| Rendered::Text(s.frame_slot.clone())),
    LinkField::new("carrier", |s| Rendered::Text(s.carrier.clone())),
    LinkField::new("bandwidth", |s| Rendered::Text(s.bandwidth.clone())),
    LinkField::new("mcs", |s| Rendered::Text(s.mcs.to_string())),
    LinkField::new("success-rate", |s| {
        let rate = success_rate(s.pssch.tx, s.pssch.rx_ok, s.pssch.rx_not_ok);
        Rendered::Styled {
            text: format!("{:.1}%", rate),
            class: format!("metric-value {}", success_class(rate)),
        }
    }),
    LinkField::new("rsrp", |s| Rendered::Text(format!("{} dBm", s.quality.rsrp))),
    LinkField::new("sinr", |s| Rendered::Text(format!("{} dB", s.quality.sinr))),
    LinkField::new("cqi", |s| Rendered::Text(s.quality.cqi.to_string())),
    LinkField::new("errors", |s| {
        Rendered::Text(format!("{}/{}", s.pssch.rx_not_ok, s.pssch.tx))
    }),
    LinkField::new("terminal", |s| {
        Rendered::Markup(line_block(
            "terminal-line",
            s.terminal_output.iter().map(String::as_str),
        ))
    }),
];

const SYNCREF_FIELDS: &[SyncRefField] = &[
    SyncRefField::new("tx-power", |s| Rendered::Text(s.tx_power.clone())),
    SyncRefField::new("psbch-tx", |s| Rendered::Text(s.link.psbch.tx.to_string())),
    SyncRefField::new("pscch-tx", |s| Rendered::Text(s.link.pscch.tx.to_string())),
    SyncRefField::new("pssch-tx", |s| Rendered::Text(s.link.pssch.tx.to_string())),
    SyncRefField::new("psfch-tx", |s| Rendered::Text(s.link.psfch.tx.to_string())),
];

const NEARBY_FIELDS: &[NearbyField] = &[
    NearbyField::new("synced", |s| {
        Rendered::Text(if s.synchronized { "✅ Yes" } else { "❌ No" }.into())
    }),
    NearbyField::new("rx-gain", |s| Rendered::Text(s.rx_gain.clone())),
    NearbyField::new("psbch-rx", |s| Rendered::Text(s.link.psbch.rx_ok.to_string())),
    NearbyField::new("pscch-rx", |s| Rendered::Text(s.link.pscch.rx_ok.to_string())),
    NearbyField::new("pssch-rx", |s| Rendered::Text(s.link.pssch.rx_ok.to_string())),
    NearbyField::new("psfch-tx", |s| Rendered::Text(s.link.psfch.tx.to_string())),
];

pub struct SyncRefFeed;

impl Feed for SyncRefFeed {
    type Snapshot = SyncRefSnapshot;

    fn name(&self) -> &'static str {
        "syncref"
    }

    fn endpoint(&self) -> &'static str {
        "/api/syncref"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Fast
    }

    fn render(&self, snapshot: &SyncRefSnapshot) -> Vec<Patch> {
        let mut patches = render_fields("syncref", &snapshot.link, LINK_FIELDS);
        patches.extend(render_fields("syncref", snapshot, SYNCREF_FIELDS));
        patches
    }
}

pub struct NearbyFeed;

impl Feed for NearbyFeed {
    type Snapshot = NearbySnapshot;

    fn name(&self) -> &'static str {
        "nearby"
    }

    fn endpoint(&self) -> &'static str {
        "/api/nearby"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Fast
    }

    fn render(&self, snapshot: &NearbySnapshot) -> Vec<Patch> {
        let mut patches = render_fields("nearby", &snapshot.link, LINK_FIELDS);
        patches.extend(render_fields("nearby", snapshot, NEARBY_FIELDS));
        patches
    }
}
