//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (the sensor hub, the log sink) implement these traits.
//! The [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::error::SensorError;
use crate::sensors::temperature::TemperatureReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain the calibrated
/// temperature sample for the current tick.
pub trait SensorPort {
    /// Read the temperature sensor.
    ///
    /// Errors are soft: the service logs them and reuses the last known
    /// temperature, so a flaky sensor cannot stall the safety clocks.
    fn read_temperature(&mut self) -> Result<TemperatureReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// a display or radio adapter would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
