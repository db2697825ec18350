// Per-node link snapshots (/api/syncref, /api/nearby)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Running,
    Stopped,
    /// Anything else the node reports (`unknown`, `error`, ...). Shown as offline.
    #[serde(other)]
    Unknown,
}

impl NodeStatus {
    pub fn is_running(self) -> bool {
        self == NodeStatus::Running
    }
}

/// Transport block counters for one sidelink physical channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCounters {
    pub tx: u64,
    pub rx_ok: u64,
    pub rx_not_ok: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkQuality {
    pub rsrp: f64,
    pub sinr: f64,
    pub cqi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_level: Option<f64>,
}

/// Fields shared by both UE panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub status: NodeStatus,
    pub frame_slot: String,
    pub carrier: String,
    pub bandwidth: String,
    pub mcs: u32,
    pub psbch: ChannelCounters,
    pub pscch: ChannelCounters,
    pub pssch: ChannelCounters,
    pub psfch: ChannelCounters,
    pub quality: LinkQuality,
    /// Most recent log lines, oldest first.
    pub terminal_output: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Primary sync source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRefSnapshot {
    #[serde(flatten)]
    pub link: LinkSnapshot,
    pub tx_power: String,
}

/// Synchronized receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySnapshot {
    #[serde(flatten)]
    pub link: LinkSnapshot,
    pub rx_gain: String,
    pub synchronized: bool,
}
