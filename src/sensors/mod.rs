//! Sensor subsystem — drivers and the aggregating [`SensorHub`].
//!
//! The hub owns the sensor drivers and produces the calibrated temperature
//! sample the control loop feeds into the monitor each tick.  Humidity and
//! pressure live on the same board but never enter the safety logic, so no
//! driver for them exists here.

pub mod temperature;

use crate::error::SensorError;
use temperature::{TemperatureReading, TemperatureSensor};

/// Aggregates the sensor drivers behind one read call.
pub struct SensorHub {
    pub temperature: TemperatureSensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(temperature: TemperatureSensor) -> Self {
        Self { temperature }
    }

    /// Read the temperature sensor.
    ///
    /// Read failures are surfaced to the caller, which logs them and keeps
    /// the previous good value — a flaky sensor must not stall the safety
    /// clocks.
    pub fn read_temperature(&mut self) -> Result<TemperatureReading, SensorError> {
        self.temperature.read()
    }
}
