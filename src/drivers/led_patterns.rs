//! LED pattern engine and the snapshot → pattern mapping.
//!
//! Generates time-varying RGB values for the status LED.  The control loop
//! maps the latest [`StateSnapshot`] to a pattern request each tick, and
//! the engine turns that request into the RGB tuple fed into
//! [`StatusLed::show`](super::status_led::StatusLed::show).
//!
//! ## Pattern types
//!
//! | Pattern    | Description                | Rate   |
//! |------------|----------------------------|--------|
//! | Solid      | Constant colour            | —      |
//! | FastBlink  | On/off square wave         | 4 Hz   |
//! | Breathing  | Smooth ramp up/down        | 0.5 Hz |
//! | Off        | LED dark                   | —      |

use crate::fsm::snapshot::StateSnapshot;
use crate::fsm::StateId;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Pattern identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternId {
    Solid,
    FastBlink,
    Breathing,
    Off,
}

/// LED pattern engine.  Stack-allocated, no heap.
pub struct LedPatternEngine {
    phase_ms: u32,
    active: Option<(Rgb, PatternId)>,
}

impl LedPatternEngine {
    pub fn new() -> Self {
        Self {
            phase_ms: 0,
            active: None,
        }
    }

    /// Set the pattern to render.  Changing the pattern type resets the
    /// phase so a fresh blink cycle starts in its "on" half.
    pub fn set_pattern(&mut self, colour: Rgb, pattern: PatternId) {
        let reset_phase = match self.active {
            Some((_, prev)) => prev != pattern,
            None => true,
        };
        if reset_phase {
            self.phase_ms = 0;
        }
        self.active = Some((colour, pattern));
    }

    /// Clear the pattern — LED will be off.
    pub fn clear(&mut self) {
        self.active = None;
        self.phase_ms = 0;
    }

    /// Advance the pattern phase and return the current RGB output.
    /// `delta_ms` is the time since the last call (the sample interval).
    pub fn tick(&mut self, delta_ms: u32) -> Rgb {
        self.phase_ms = self.phase_ms.wrapping_add(delta_ms);

        match self.active {
            Some((colour, pattern)) => self.generate(colour, pattern),
            None => (0, 0, 0),
        }
    }

    fn generate(&self, colour: Rgb, pattern: PatternId) -> Rgb {
        let (r, g, b) = colour;
        match pattern {
            PatternId::Solid => colour,
            PatternId::Off => (0, 0, 0),
            PatternId::FastBlink => {
                let on = (self.phase_ms % 250) < 125;
                if on { colour } else { (0, 0, 0) }
            }
            PatternId::Breathing => {
                let brightness = Self::ramp_brightness(self.phase_ms, 2000);
                Self::scale(r, g, b, brightness)
            }
        }
    }

    /// Triangular brightness approximation: ramps 0→255→0 over `period_ms`.
    fn ramp_brightness(phase_ms: u32, period_ms: u32) -> u8 {
        let pos = u64::from(phase_ms % period_ms);
        let half = u64::from(period_ms) / 2;
        if pos < half {
            ((pos * 255) / half) as u8
        } else {
            (((u64::from(period_ms) - pos) * 255) / half) as u8
        }
    }

    fn scale(r: u8, g: u8, b: u8, brightness: u8) -> Rgb {
        let br = u16::from(brightness);
        (
            ((u16::from(r) * br) / 255) as u8,
            ((u16::from(g) * br) / 255) as u8,
            ((u16::from(b) * br) / 255) as u8,
        )
    }
}

// ── Snapshot → pattern mapping ────────────────────────────────

/// Danger-zone budget remaining below which the warning light blinks.
const TIME_CRITICAL_SECS: f64 = 600.0;

/// Pure mapping from a state snapshot to the LED pattern request.
/// `danger_limit_secs` comes from configuration.
pub fn pattern_for(snap: &StateSnapshot, danger_limit_secs: u32) -> (Rgb, PatternId) {
    match snap.state {
        StateId::Initial => (COLOUR_READY, PatternId::Solid),
        StateId::Safe => (COLOUR_SAFE, PatternId::Solid),
        StateId::Warning => {
            let critical = snap
                .danger_remaining_secs(danger_limit_secs)
                .is_some_and(|left| left < TIME_CRITICAL_SECS);
            if critical {
                (COLOUR_WARNING, PatternId::FastBlink)
            } else {
                (COLOUR_WARNING, PatternId::Solid)
            }
        }
        StateId::Discard => (COLOUR_DISCARD, PatternId::Solid),
        StateId::Charge => (COLOUR_CHARGE, PatternId::Breathing),
    }
}

// ── Well-known colour constants (safety zones) ────────────────

pub const COLOUR_READY: Rgb = (255, 255, 255); // White
pub const COLOUR_SAFE: Rgb = (0, 255, 0); // Green
pub const COLOUR_WARNING: Rgb = (255, 255, 0); // Yellow
pub const COLOUR_DISCARD: Rgb = (255, 0, 0); // Red
pub const COLOUR_CHARGE: Rgb = (0, 0, 255); // Blue
