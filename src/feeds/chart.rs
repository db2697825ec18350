// Chart-backed feeds; each owns the renderer it was built with

use super::{Cadence, Feed};
use crate::charts::{MessageFlowDiagram, SignalChart, SpectrumChart, ThroughputChart};
use crate::error::FeedUnavailable;
use crate::models::{MessageFlowSnapshot, SignalHistory, SpectrumSnapshot, ThroughputHistory};
use crate::render::Patch;

pub struct ThroughputFeed {
    chart: ThroughputChart,
}

impl ThroughputFeed {
    pub fn new(history_window: usize) -> Self {
        Self {
            chart: ThroughputChart::new(history_window),
        }
    }
}

impl Feed for ThroughputFeed {
    type Snapshot = ThroughputHistory;

    fn name(&self) -> &'static str {
        "throughput_history"
    }

    fn endpoint(&self) -> &'static str {
        "/api/throughput_history"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Fast
    }

    fn render(&self, snapshot: &ThroughputHistory) -> Vec<Patch> {
        vec![self.chart.update(snapshot)]
    }
}

pub struct SignalFeed {
    chart: SignalChart,
}

impl SignalFeed {
    pub fn new(history_window: usize) -> Self {
        Self {
            chart: SignalChart::new(history_window),
        }
    }
}

impl Feed for SignalFeed {
    type Snapshot = SignalHistory;

    fn name(&self) -> &'static str {
        "signal_history"
    }

    fn endpoint(&self) -> &'static str {
        "/api/signal_history"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Fast
    }

    fn render(&self, snapshot: &SignalHistory) -> Vec<Patch> {
        vec![self.chart.update(snapshot)]
    }
}

#[derive(Default)]
pub struct SpectrumFeed {
    chart: SpectrumChart,
}

impl Feed for SpectrumFeed {
    type Snapshot = SpectrumSnapshot;

    fn name(&self) -> &'static str {
        "spectrum_data"
    }

    fn endpoint(&self) -> &'static str {
        "/api/spectrum_data"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Fast
    }

    fn check(&self, snapshot: &SpectrumSnapshot) -> Result<(), FeedUnavailable> {
        snapshot.check_aligned().map_err(FeedUnavailable::Inconsistent)
    }

    fn render(&self, snapshot: &SpectrumSnapshot) -> Vec<Patch> {
        vec![self.chart.update(snapshot)]
    }
}

#[derive(Default)]
pub struct MessageFlowFeed {
    diagram: MessageFlowDiagram,
}

impl Feed for MessageFlowFeed {
    type Snapshot = MessageFlowSnapshot;

    fn name(&self) -> &'static str {
        "message_flow"
    }

    fn endpoint(&self) -> &'static str {
        "/api/message_flow"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Slow
    }

    fn render(&self, snapshot: &MessageFlowSnapshot) -> Vec<Patch> {
        vec![self.diagram.update(snapshot)]
    }
}
