// Derived values shown next to the raw counters

/// Success rates at or above this are styled `success`, below it `error`.
pub const SUCCESS_THRESHOLD: f64 = 95.0;

/// Decode success rate of a channel in percent.
///
/// With nothing received yet, a node that has transmitted counts as fully
/// successful and an idle one as 0%.
pub fn success_rate(tx: u64, rx_ok: u64, rx_not_ok: u64) -> f64 {
    let total = rx_ok as f64 + rx_not_ok as f64;
    if total == 0.0 {
        return if tx > 0 { 100.0 } else { 0.0 };
    }
    rx_ok as f64 / total * 100.0
}

pub fn success_class(rate: f64) -> &'static str {
    if rate >= SUCCESS_THRESHOLD {
        "success"
    } else {
        "error"
    }
}

/// Packet error rate in percent; 0 when nothing has been received.
pub fn packet_error_rate(rx_ok: u64, errors: u64) -> f64 {
    let total = rx_ok as f64 + errors as f64;
    if total == 0.0 {
        return 0.0;
    }
    errors as f64 / total * 100.0
}

/// Share of transmitted blocks decoded, in percent; 0 before anything was sent.
pub fn decode_ratio(rx_ok: u64, tx: u64) -> f64 {
    if tx == 0 {
        return 0.0;
    }
    rx_ok as f64 / tx as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityBand {
    /// Band for a 0-100 link quality score. Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            QualityBand::Excellent
        } else if score >= 70.0 {
            QualityBand::Good
        } else if score >= 50.0 {
            QualityBand::Fair
        } else {
            QualityBand::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityBand::Excellent => "✅ EXCELLENT",
            QualityBand::Good => "✅ GOOD",
            QualityBand::Fair => "⚠️ FAIR",
            QualityBand::Poor => "❌ POOR",
        }
    }
}
