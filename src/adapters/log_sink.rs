//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).  A display or radio adapter
//! would implement the same trait.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={} | T={:.1}\u{00b0}C | fridge={} | danger={:.0}s live / {:.0}s total | days_left={}",
                    t.state,
                    t.temperature_c,
                    t.time_in_fridge_secs
                        .map_or_else(|| "-".into(), |s| format!("{s:.0}s")),
                    t.danger_elapsed_secs.unwrap_or(0.0),
                    t.danger_total_secs,
                    t.days_remaining
                        .map_or_else(|| "-".into(), |d| format!("{d}")),
                );
                // Machine-readable mirror for log-capture tooling.
                if let Ok(json) = serde_json::to_string(t) {
                    debug!("TELEM.json | {json}");
                }
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::DiscardTriggered(reason) => {
                warn!("DISCARD | {reason}");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
        }
    }
}
