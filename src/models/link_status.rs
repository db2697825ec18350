// Aggregate link status (/api/link_status)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStatusSnapshot {
    pub link_established: bool,
    /// 0-100 score averaged over both nodes.
    pub overall_quality: f64,
    pub pssch_total_tx: u64,
    pub pssch_total_rx_ok: u64,
    pub pssch_total_errors: u64,
    pub psbch_sync_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syncref_running: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_running: Option<bool>,
}
