//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them — log to serial, drive a
//! buzzer, update a display.

use serde::Serialize;

use crate::fsm::context::DiscardReason;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The machine transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The item was condemned; carries the reason.
    DiscardTriggered(DiscardReason),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry record suitable for logging or capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryData {
    pub state: &'static str,
    pub temperature_c: f32,
    pub time_in_fridge_secs: Option<f64>,
    pub danger_elapsed_secs: Option<f64>,
    pub danger_total_secs: f64,
    pub days_remaining: Option<i32>,
}
