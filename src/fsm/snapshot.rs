//! Immutable per-tick output of the monitor.
//!
//! A `StateSnapshot` is everything presentation needs: the post-transition
//! state plus the derived timer fields.  It is a plain value — the renderer
//! and LED mapping consume copies, never the live context.

use super::context::{DiscardReason, MonitorContext};
use super::StateId;

/// Derived, render-ready view of the monitor after one `update` call.
///
/// Optional fields are `Some` only when the state makes them meaningful:
/// `danger_elapsed_secs` exists only in `Warning`; `time_in_fridge_secs`
/// and `days_remaining` exist whenever a storage cycle is running (they
/// carry residual values through `Discard`/`Charge` until the full reset).
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub state: StateId,
    /// Last known calibrated temperature (°C).
    pub temperature_c: f32,
    /// Seconds spent in the current state.
    pub time_in_state_secs: f64,
    /// Seconds since fridge entry.
    pub time_in_fridge_secs: Option<f64>,
    /// Cumulative danger-zone seconds including the live excursion.
    pub danger_elapsed_secs: Option<f64>,
    /// Sum of completed danger-zone intervals this cycle.
    pub danger_total_secs: f64,
    /// Storage days left; negative once over the limit.
    pub days_remaining: Option<i32>,
    /// Why the item was condemned (only in `Discard`).
    pub discard_reason: Option<DiscardReason>,
}

impl StateSnapshot {
    /// Capture the derived view of `ctx` for the given post-transition state.
    pub(crate) fn capture(state: StateId, time_in_state_secs: f64, ctx: &MonitorContext) -> Self {
        Self {
            state,
            temperature_c: ctx.temperature_c,
            time_in_state_secs,
            time_in_fridge_secs: ctx.time_in_fridge(),
            danger_elapsed_secs: if state == StateId::Warning {
                ctx.danger_elapsed()
            } else {
                None
            },
            danger_total_secs: ctx.total_danger_secs,
            days_remaining: ctx.days_remaining(),
            discard_reason: if state == StateId::Discard {
                ctx.discard_reason
            } else {
                None
            },
        }
    }

    /// Seconds of danger-zone budget left, while in `Warning`.
    pub fn danger_remaining_secs(&self, limit_secs: u32) -> Option<f64> {
        self.danger_elapsed_secs
            .map(|elapsed| f64::from(limit_secs) - elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;

    #[test]
    fn warning_snapshot_carries_danger_elapsed() {
        let mut ctx = MonitorContext::new(MonitorConfig::default());
        ctx.fridge_entry_time = Some(0.0);
        ctx.danger_zone_start = Some(100.0);
        ctx.now_secs = 700.0;
        let snap = StateSnapshot::capture(StateId::Warning, 600.0, &ctx);
        assert_eq!(snap.danger_elapsed_secs, Some(600.0));
        assert_eq!(snap.time_in_fridge_secs, Some(700.0));
        assert_eq!(snap.danger_remaining_secs(7200), Some(6600.0));
    }

    #[test]
    fn safe_snapshot_has_no_danger_elapsed() {
        let mut ctx = MonitorContext::new(MonitorConfig::default());
        ctx.fridge_entry_time = Some(0.0);
        ctx.total_danger_secs = 50.0;
        ctx.now_secs = 10.0;
        let snap = StateSnapshot::capture(StateId::Safe, 10.0, &ctx);
        assert_eq!(snap.danger_elapsed_secs, None);
        assert_eq!(snap.danger_total_secs, 50.0);
        assert_eq!(snap.days_remaining, Some(4));
    }

    #[test]
    fn initial_snapshot_is_bare() {
        let ctx = MonitorContext::new(MonitorConfig::default());
        let snap = StateSnapshot::capture(StateId::Initial, 0.0, &ctx);
        assert_eq!(snap.time_in_fridge_secs, None);
        assert_eq!(snap.days_remaining, None);
        assert_eq!(snap.discard_reason, None);
    }
}
