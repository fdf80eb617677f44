//! Screen view-model — a pure function of the latest [`StateSnapshot`].
//!
//! The monitor core never draws anything; it emits a snapshot, and this
//! module turns that snapshot into a hardware-independent description of
//! what a renderer should put on the panel: background colour, a big
//! status word, and a handful of detail lines.  An actual display driver
//! (out of scope here) walks the [`ScreenModel`] and draws it; tests walk
//! it and assert on it.

pub mod format;

use core::fmt::Write;

use heapless::{String, Vec};

use crate::drivers::led_patterns::Rgb;
use crate::fsm::context::DiscardReason;
use crate::fsm::snapshot::StateSnapshot;
use crate::fsm::StateId;
use format::{format_days_hours, format_duration};

/// Background colours for the safety zones.
pub const BG_READY: Rgb = (255, 255, 255);
pub const BG_SAFE: Rgb = (0, 255, 0);
pub const BG_WARNING: Rgb = (255, 255, 0);
pub const BG_DISCARD: Rgb = (255, 0, 0);
pub const BG_CHARGE: Rgb = (0, 0, 255);

/// Danger-zone budget remaining below which the limit line flips to the
/// time-critical warning.
const TIME_CRITICAL_SECS: f64 = 600.0;

/// One line of detail text, sized for the panel's character budget.
pub type Line = String<24>;

/// Hardware-independent description of one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenModel {
    pub background: Rgb,
    pub title: &'static str,
    /// Big status word: READY / SAFE / WARNING / DISCARD / CHARGE ME.
    pub status: &'static str,
    pub lines: Vec<Line, 6>,
}

impl ScreenModel {
    fn new(background: Rgb, status: &'static str) -> Self {
        Self {
            background,
            title: "FOOD SAFETY",
            status,
            lines: Vec::new(),
        }
    }

    fn push_line(&mut self, line: Line) {
        // Capacity 6 covers the densest screen; overflow drops the tail.
        let _ = self.lines.push(line);
    }

    fn push_str(&mut self, text: &str) {
        let mut line = Line::new();
        let _ = line.push_str(text);
        self.push_line(line);
    }

    fn push_temp(&mut self, celsius: f32) {
        let mut line = Line::new();
        let _ = write!(line, "Temp: {celsius:.1}\u{00b0}C");
        self.push_line(line);
    }
}

/// Build the screen for the given snapshot.
pub fn build_screen(snap: &StateSnapshot, danger_limit_secs: u32) -> ScreenModel {
    match snap.state {
        StateId::Initial => initial_screen(snap),
        StateId::Safe => safe_screen(snap),
        StateId::Warning => warning_screen(snap, danger_limit_secs),
        StateId::Discard => discard_screen(snap),
        StateId::Charge => charge_screen(snap),
    }
}

fn initial_screen(snap: &StateSnapshot) -> ScreenModel {
    let mut screen = ScreenModel::new(BG_READY, "READY");
    screen.push_temp(snap.temperature_c);
    screen.push_str("Place in fridge");
    screen.push_str("Monitoring starts");
    screen.push_str("at 4\u{00b0}C");
    screen
}

fn safe_screen(snap: &StateSnapshot) -> ScreenModel {
    let mut screen = ScreenModel::new(BG_SAFE, "SAFE");
    screen.push_temp(snap.temperature_c);

    if let Some(in_fridge) = snap.time_in_fridge_secs {
        screen.push_str("In Fridge:");
        screen.push_line(widen(format_days_hours(in_fridge)));

        match snap.days_remaining {
            Some(left) if left >= 0 => {
                let mut line = Line::new();
                let _ = write!(line, "Safe for: {left}d");
                screen.push_line(line);
            }
            _ => screen.push_str("OVER 4 DAYS!"),
        }
    }
    screen
}

fn warning_screen(snap: &StateSnapshot, danger_limit_secs: u32) -> ScreenModel {
    let mut screen = ScreenModel::new(BG_WARNING, "WARNING");
    screen.push_temp(snap.temperature_c);

    screen.push_str("Above 4\u{00b0}C:");
    let danger = snap.danger_elapsed_secs.unwrap_or(snap.danger_total_secs);
    screen.push_line(widen(format_duration(danger)));

    let critical = snap
        .danger_remaining_secs(danger_limit_secs)
        .is_some_and(|left| left < TIME_CRITICAL_SECS);
    if critical {
        screen.push_str("TIME CRITICAL!");
    } else {
        screen.push_str("Limit: 2 hours");
    }
    screen.push_str("Return to fridge");
    screen
}

fn discard_screen(snap: &StateSnapshot) -> ScreenModel {
    let mut screen = ScreenModel::new(BG_DISCARD, "DISCARD");
    screen.push_temp(snap.temperature_c);

    match snap.discard_reason {
        Some(DiscardReason::StoredTooLong) => screen.push_str("Stored > 4 days"),
        Some(DiscardReason::DangerZoneExceeded) => screen.push_str("Above 4\u{00b0}C > 2hrs"),
        None => screen.push_str("UNSAFE"),
    }
    screen.push_str("NOT SAFE TO EAT");
    screen.push_str("DISPOSE OF FOOD");
    screen
}

fn charge_screen(snap: &StateSnapshot) -> ScreenModel {
    let mut screen = ScreenModel::new(BG_CHARGE, "CHARGE ME");
    screen.push_temp(snap.temperature_c);
    screen.push_str("(Room Temperature)");
    screen.push_str("Ready to reset");
    screen.push_str("Connect USB to charge");
    screen
}

/// Copy a short formatted value into a full-width line.
fn widen(short: String<16>) -> Line {
    let mut line = Line::new();
    let _ = line.push_str(short.as_str());
    line
}
