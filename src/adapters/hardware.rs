//! Hardware adapter — binds the sensor hub and status LED to the port
//! boundary.
//!
//! The domain core reads temperature through [`SensorPort`]; the control
//! loop pushes LED colours straight to the driver (indicator mapping is a
//! pure function of the snapshot, so no actuator port is needed).

use crate::app::ports::SensorPort;
use crate::drivers::led_patterns::Rgb;
use crate::drivers::status_led::StatusLed;
use crate::error::SensorError;
use crate::sensors::temperature::TemperatureReading;
use crate::sensors::SensorHub;

pub struct HardwareAdapter {
    sensors: SensorHub,
    led: StatusLed,
}

impl HardwareAdapter {
    pub fn new(sensors: SensorHub, led: StatusLed) -> Self {
        Self { sensors, led }
    }

    /// Drive the status LED.
    pub fn set_led(&mut self, rgb: Rgb) {
        self.led.show(rgb);
    }

    /// LED off (shutdown path).
    pub fn led_off(&mut self) {
        self.led.off();
    }
}

impl SensorPort for HardwareAdapter {
    fn read_temperature(&mut self) -> Result<TemperatureReading, SensorError> {
        self.sensors.read_temperature()
    }
}
