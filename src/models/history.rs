// Chart feeds: throughput/signal history and spectrum

use serde::{Deserialize, Serialize};

use crate::render::XValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputPoint {
    /// Epoch number or preformatted label, plotted as given.
    pub timestamp: XValue,
    pub tx_mbps: f64,
    pub rx_mbps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputHistory {
    pub syncref: Vec<ThroughputPoint>,
    pub nearby: Vec<ThroughputPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub timestamp: XValue,
    pub rsrp: f64,
    pub sinr: f64,
    pub cqi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalHistory {
    pub syncref: Vec<SignalPoint>,
}

/// Channel response and noise floor sampled over the same frequency bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSnapshot {
    pub frequency: Vec<f64>,
    pub channel_response: Vec<f64>,
    pub noise_floor: Vec<f64>,
}

impl SpectrumSnapshot {
    /// The three sequences must be index-aligned.
    pub fn check_aligned(&self) -> Result<(), String> {
        let n = self.frequency.len();
        if self.channel_response.len() != n || self.noise_floor.len() != n {
            return Err(format!(
                "spectrum arrays differ in length: frequency={}, channel_response={}, noise_floor={}",
                n,
                self.channel_response.len(),
                self.noise_floor.len()
            ));
        }
        Ok(())
    }
}
