// Event log (/api/events) and message flow (/api/message_flow)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Success,
    #[default]
    Info,
    Warning,
    Error,
    #[serde(other)]
    Other,
}

impl EventKind {
    pub fn css_class(self) -> &'static str {
        match self {
            EventKind::Success => "success",
            EventKind::Info | EventKind::Other => "info",
            EventKind::Warning => "warning",
            EventKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub time: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogSnapshot {
    pub events: Vec<EventEntry>,
}

/// One arrow in the message sequence diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStep {
    pub from: String,
    pub to: String,
    pub message: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageFlowSnapshot {
    pub flow: Vec<FlowStep>,
}
