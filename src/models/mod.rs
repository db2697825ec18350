// Snapshot models, one per upstream endpoint family

mod events;
mod history;
mod link;
mod link_status;

pub use events::{EventEntry, EventKind, EventLogSnapshot, FlowStep, MessageFlowSnapshot};
pub use history::{
    SignalHistory, SignalPoint, SpectrumSnapshot, ThroughputHistory, ThroughputPoint,
};
pub use link::{
    ChannelCounters, LinkQuality, LinkSnapshot, NearbySnapshot, NodeStatus, SyncRefSnapshot,
};
pub use link_status::LinkStatusSnapshot;
