//! Application service — the hexagonal core.
//!
//! [`MonitorService`] owns the state machine and its context.  It exposes
//! the monitor's single public operation — feed a `(temperature, now)`
//! sample, get a [`StateSnapshot`] back — plus the port-driven tick the
//! control loop calls.  All I/O flows through port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     MonitorService      │
//!                 │  FSM · timers · events  │ ──▶ StateSnapshot
//!                 └────────────────────────┘
//! ```

use log::warn;

use crate::config::MonitorConfig;
use crate::fsm::context::MonitorContext;
use crate::fsm::snapshot::StateSnapshot;
use crate::fsm::states::build_state_table;
use crate::fsm::{Monitor, StateId};

use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct MonitorService {
    monitor: Monitor,
    ctx: MonitorContext,
    tick_count: u64,
}

impl MonitorService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the machine — call [`Self::start`] next.
    pub fn new(config: MonitorConfig) -> Self {
        let ctx = MonitorContext::new(config);
        let monitor = Monitor::new(build_state_table(), StateId::Initial);

        Self {
            monitor,
            ctx,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the machine in its initial state and announce it.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.monitor.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.monitor.current_state()));
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read the sensor, advance the machine,
    /// emit events, return the snapshot for presentation.
    ///
    /// A failed sensor read falls back to the last known temperature so
    /// the storage and danger clocks keep running.
    pub fn tick(
        &mut self,
        hw: &mut impl SensorPort,
        now_secs: f64,
        sink: &mut impl EventSink,
    ) -> StateSnapshot {
        let temperature_c = match hw.read_temperature() {
            Ok(reading) => reading.celsius,
            Err(e) => {
                warn!("sensor read failed ({e}), reusing last temperature");
                self.ctx.temperature_c
            }
        };
        self.update(temperature_c, now_secs, sink)
    }

    /// Feed one `(temperature, now)` sample directly.
    ///
    /// This is the monitor's whole contract: total, infallible, at most one
    /// transition per call.  `now_secs` must be non-decreasing across calls.
    pub fn update(
        &mut self,
        temperature_c: f32,
        now_secs: f64,
        sink: &mut impl EventSink,
    ) -> StateSnapshot {
        self.tick_count += 1;
        let prev_state = self.monitor.current_state();

        let snapshot = self.monitor.update(temperature_c, now_secs, &mut self.ctx);

        if snapshot.state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: snapshot.state,
            });
            if let (StateId::Discard, Some(reason)) = (snapshot.state, snapshot.discard_reason) {
                sink.emit(&AppEvent::DiscardTriggered(reason));
            }
        }

        snapshot
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry record from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        let state = self.monitor.current_state();
        TelemetryData {
            state: state.name(),
            temperature_c: self.ctx.temperature_c,
            time_in_fridge_secs: self.ctx.time_in_fridge(),
            danger_elapsed_secs: if state == StateId::Warning {
                self.ctx.danger_elapsed()
            } else {
                None
            },
            danger_total_secs: self.ctx.total_danger_secs,
            days_remaining: self.ctx.days_remaining(),
        }
    }

    /// Current machine state.
    pub fn state(&self) -> StateId {
        self.monitor.current_state()
    }

    /// Total samples processed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> MonitorConfig {
        self.ctx.config.clone()
    }
}
