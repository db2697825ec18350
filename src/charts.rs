// Chart and diagram renderers. Each owns its target and is built once per feed.

use crate::models::{
    MessageFlowSnapshot, SignalHistory, SpectrumSnapshot, ThroughputHistory, ThroughputPoint,
};
use crate::render::{Dataset, Patch, Point, Series, XValue};

pub const THROUGHPUT_CHART: &str = "throughput-chart";
pub const SIGNAL_CHART: &str = "signal-chart";
pub const SPECTRUM_CHART: &str = "spectrum-chart";
pub const MESSAGE_FLOW_DIAGRAM: &str = "message-flow-diagram";

/// The last `window` items of `items`, original order kept.
pub fn sliding_window<T>(items: &[T], window: usize) -> &[T] {
    &items[items.len().saturating_sub(window)..]
}

fn labelled<T>(label: &str, items: &[T], y: impl Fn(&T) -> f64, x: impl Fn(&T) -> XValue) -> Dataset {
    Dataset {
        label: label.to_string(),
        points: items.iter().map(|i| Point { x: x(i), y: y(i) }).collect(),
    }
}

fn at_timestamp(p: &ThroughputPoint) -> XValue {
    p.timestamp.clone()
}

pub struct ThroughputChart {
    window: usize,
}

impl ThroughputChart {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn update(&self, history: &ThroughputHistory) -> Patch {
        let syncref = sliding_window(&history.syncref, self.window);
        let nearby = sliding_window(&history.nearby, self.window);
        Patch::Series {
            target: THROUGHPUT_CHART.to_string(),
            series: Series {
                datasets: vec![
                    labelled("SyncRef TX", syncref, |p| p.tx_mbps, at_timestamp),
                    labelled("SyncRef RX", syncref, |p| p.rx_mbps, at_timestamp),
                    labelled("Nearby TX", nearby, |p| p.tx_mbps, at_timestamp),
                    labelled("Nearby RX", nearby, |p| p.rx_mbps, at_timestamp),
                ],
            },
        }
    }
}

pub struct SignalChart {
    window: usize,
}

impl SignalChart {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn update(&self, history: &SignalHistory) -> Patch {
        let points = sliding_window(&history.syncref, self.window);
        let ts = |p: &crate::models::SignalPoint| p.timestamp.clone();
        Patch::Series {
            target: SIGNAL_CHART.to_string(),
            series: Series {
                datasets: vec![
                    labelled("RSRP (dBm)", points, |p| p.rsrp, ts),
                    labelled("SINR (dB)", points, |p| p.sinr, ts),
                    labelled("CQI", points, |p| p.cqi, ts),
                ],
            },
        }
    }
}

/// Spectrum is a full sweep every cycle, so nothing is windowed.
#[derive(Default)]
pub struct SpectrumChart;

impl SpectrumChart {
    pub fn update(&self, spectrum: &SpectrumSnapshot) -> Patch {
        let trace = |label: &str, values: &[f64]| Dataset {
            label: label.to_string(),
            points: spectrum
                .frequency
                .iter()
                .zip(values)
                .map(|(f, v)| Point {
                    x: XValue::Value(*f),
                    y: *v,
                })
                .collect(),
        };
        Patch::Series {
            target: SPECTRUM_CHART.to_string(),
            series: Series {
                datasets: vec![
                    trace("Channel Response", &spectrum.channel_response),
                    trace("Noise Floor", &spectrum.noise_floor),
                ],
            },
        }
    }
}

/// Renders the flow as Mermaid `sequenceDiagram` source.
///
/// Participants get stable aliases (`P0`, `P1`, ...) in order of first
/// appearance. Upstream names and labels only appear entity-encoded.
#[derive(Default)]
pub struct MessageFlowDiagram;

impl MessageFlowDiagram {
    pub fn update(&self, snapshot: &MessageFlowSnapshot) -> Patch {
        let mut participants: Vec<&str> = Vec::new();
        for step in &snapshot.flow {
            for name in [step.from.as_str(), step.to.as_str()] {
                if !participants.contains(&name) {
                    participants.push(name);
                }
            }
        }
        let alias = |name: &str| {
            let idx = participants.iter().position(|p| *p == name).unwrap_or(0);
            format!("P{}", idx)
        };

        let mut source = String::from("sequenceDiagram\n");
        for (idx, name) in participants.iter().enumerate() {
            source.push_str(&format!("    participant P{} as {}\n", idx, diagram_label(name)));
        }
        for step in &snapshot.flow {
            let (from, to) = (alias(&step.from), alias(&step.to));
            source.push_str(&format!(
                "    {}->>{}: {}\n",
                from,
                to,
                diagram_label(&step.message)
            ));
            if !step.description.is_empty() {
                source.push_str(&format!(
                    "    Note over {},{}: {}\n",
                    from,
                    to,
                    diagram_label(&step.description)
                ));
            }
        }

        Patch::Text {
            target: MESSAGE_FLOW_DIAGRAM.to_string(),
            text: source,
        }
    }
}

/// Single-line label with every markup and statement character replaced by
/// its Mermaid entity code.
fn diagram_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("#lt;"),
            '>' => out.push_str("#gt;"),
            '&' => out.push_str("#amp;"),
            '"' => out.push_str("#quot;"),
            '\'' => out.push_str("#39;"),
            '#' => out.push_str("#35;"),
            ';' => out.push_str("#59;"),
            '\r' | '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
