//! Human-readable duration formatting for the screen.

use core::fmt::Write;
use heapless::String;

/// Short form: `42s`, `12m 5s`, `3h 41m`.
pub fn format_duration(secs: f64) -> String<16> {
    let total = secs.max(0.0) as u64;
    let mut out = String::new();
    if total < 60 {
        let _ = write!(out, "{total}s");
    } else if total < 3600 {
        let _ = write!(out, "{}m {}s", total / 60, total % 60);
    } else {
        let _ = write!(out, "{}h {}m", total / 3600, (total % 3600) / 60);
    }
    out
}

/// Day-scale form: `2d 5h`, or `7h` under a day.
pub fn format_days_hours(secs: f64) -> String<16> {
    let total = secs.max(0.0) as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let mut out = String::new();
    if days > 0 {
        let _ = write!(out, "{days}d {hours}h");
    } else {
        let _ = write!(out, "{hours}h");
    }
    out
}
