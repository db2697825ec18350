// Event log panel

use super::{Cadence, Feed};
use crate::models::EventLogSnapshot;
use crate::render::{Patch, escape_html};

pub const EVENT_LOG: &str = "event-log";

pub struct EventsFeed;

impl Feed for EventsFeed {
    type Snapshot = EventLogSnapshot;

    fn name(&self) -> &'static str {
        "events"
    }

    fn endpoint(&self) -> &'static str {
        "/api/events"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Slow
    }

    fn render(&self, snapshot: &EventLogSnapshot) -> Vec<Patch> {
        let html = snapshot
            .events
            .iter()
            .map(|event| {
                format!(
                    "<div class=\"event-item {}\"><span class=\"event-time\">{}</span> {}</div>",
                    event.kind.css_class(),
                    escape_html(&event.time),
                    escape_html(&event.message)
                )
            })
            .collect();
        vec![Patch::Markup {
            target: EVENT_LOG.to_string(),
            html,
        }]
    }
}
