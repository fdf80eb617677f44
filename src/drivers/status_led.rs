//! RGB status LED driver.
//!
//! Three LEDC PWM channels (CH0-2) drive discrete R/G/B LEDs (or a
//! common-cathode RGB LED).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three LEDC PWM channels via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::drivers::led_patterns::Rgb;

pub struct StatusLed {
    current: Rgb,
}

impl StatusLed {
    pub fn new() -> Self {
        Self { current: (0, 0, 0) }
    }

    /// Drive the LED to the given colour.
    pub fn show(&mut self, rgb: Rgb) {
        let (r, g, b) = rgb;
        hw_init::ledc_set(hw_init::LEDC_CH_LED_R, r);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_G, g);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_B, b);
        self.current = rgb;
    }

    pub fn off(&mut self) {
        self.show((0, 0, 0));
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}
