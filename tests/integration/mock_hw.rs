//! Mock hardware adapter for integration tests.
//!
//! Provides a scriptable temperature source and an event sink that records
//! every emitted event, so tests can assert on the full event history
//! without touching real ADC registers.

use coldwatch::app::events::AppEvent;
use coldwatch::app::ports::{EventSink, SensorPort};
use coldwatch::error::SensorError;
use coldwatch::sensors::temperature::TemperatureReading;

// ── MockSensor ────────────────────────────────────────────────

/// Scriptable temperature source.  Set `celsius` before each tick; arm
/// `fail_next` to simulate a flaky read.
pub struct MockSensor {
    pub celsius: f32,
    pub fail_next: bool,
    pub reads: u32,
}

impl MockSensor {
    pub fn new(celsius: f32) -> Self {
        Self {
            celsius,
            fail_next: false,
            reads: 0,
        }
    }
}

impl SensorPort for MockSensor {
    fn read_temperature(&mut self) -> Result<TemperatureReading, SensorError> {
        self.reads += 1;
        if self.fail_next {
            self.fail_next = false;
            return Err(SensorError::AdcReadFailed);
        }
        Ok(TemperatureReading {
            raw: 0,
            celsius: self.celsius,
        })
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that records every emitted event.
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All `StateChanged` transitions, in emission order.
    pub fn transitions(&self) -> Vec<(&'static str, &'static str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((from.name(), to.name())),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&AppEvent> {
        self.events.last()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
