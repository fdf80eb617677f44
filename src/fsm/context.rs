//! Shared mutable context threaded through every state handler.
//!
//! `MonitorContext` is the single struct that state handlers read from and
//! write to.  It holds the latest calibrated temperature sample, the clock
//! reading for the current tick, the storage-cycle timers, and the
//! configuration.  There is exactly one instance, owned by the
//! [`MonitorService`](crate::app::service::MonitorService); nothing else
//! mutates it.

use crate::config::MonitorConfig;

/// Why an item was condemned.  Latched when `Discard` is entered and kept
/// until the full `Charge → Initial` reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// Continuous storage exceeded the maximum number of days.
    StoredTooLong,
    /// Cumulative time above the safe temperature exceeded the limit.
    DangerZoneExceeded,
}

impl core::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StoredTooLong => write!(f, "stored too long"),
            Self::DangerZoneExceeded => write!(f, "danger zone exceeded"),
        }
    }
}

/// The shared context passed to every state handler function.
pub struct MonitorContext {
    // -- Current sample --
    /// Most recent calibrated temperature (°C).  Retained between ticks so
    /// presentation always has a value, even if a sensor read fails.
    pub temperature_c: f32,
    /// Monotonic clock reading for the current tick (seconds).
    pub now_secs: f64,

    // -- Storage-cycle timers --
    /// When the item entered the fridge (start of the safe cycle).
    /// Set on `Initial → Safe`, cleared only by the full reset.
    pub fridge_entry_time: Option<f64>,
    /// When the current danger-zone excursion began.  Set on entering
    /// `Warning`, folded into `total_danger_secs` on leaving it.
    pub danger_zone_start: Option<f64>,
    /// Sum of all completed danger-zone intervals this storage cycle.
    /// Never decreases; reset to zero only by the full reset.
    pub total_danger_secs: f64,

    /// Why the item was condemned, while `Discard` is latched.
    pub discard_reason: Option<DiscardReason>,

    // -- Configuration --
    /// Thresholds and timing (read-only to state handlers).
    pub config: MonitorConfig,
}

impl MonitorContext {
    /// Create a new context with the given configuration.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            temperature_c: 0.0,
            now_secs: 0.0,
            fridge_entry_time: None,
            danger_zone_start: None,
            total_danger_secs: 0.0,
            discard_reason: None,
            config,
        }
    }

    /// Seconds since fridge entry, if a storage cycle is running.
    pub fn time_in_fridge(&self) -> Option<f64> {
        self.fridge_entry_time.map(|entry| self.now_secs - entry)
    }

    /// Cumulative danger-zone seconds including the live excursion.
    /// `Some` only while `danger_zone_start` is set (i.e. in `Warning`).
    pub fn danger_elapsed(&self) -> Option<f64> {
        self.danger_zone_start
            .map(|start| (self.now_secs - start) + self.total_danger_secs)
    }

    /// Storage days left before the maximum: `max_storage_days - floor(days
    /// in fridge)`.  Negative once the limit is blown.
    pub fn days_remaining(&self) -> Option<i32> {
        self.time_in_fridge().map(|secs| {
            let days_elapsed = (secs / 86_400.0).floor() as i32;
            i32::from(self.config.max_storage_days) - days_elapsed
        })
    }

    /// Start a fresh storage cycle: stamp the fridge entry and zero the
    /// danger accounting.  Called by the `Initial → Safe` transition.
    pub fn begin_cycle(&mut self) {
        self.fridge_entry_time = Some(self.now_secs);
        self.danger_zone_start = None;
        self.total_danger_secs = 0.0;
    }

    /// Fold the live danger excursion into the running total.  Called on
    /// every transition out of `Warning` so `total_danger_secs` is always
    /// the sum of completed intervals.
    pub fn fold_danger_time(&mut self) {
        if let Some(start) = self.danger_zone_start.take() {
            self.total_danger_secs += self.now_secs - start;
        }
    }

    /// Record why the item is being condemned.
    pub fn latch_discard(&mut self, reason: DiscardReason) {
        self.discard_reason = Some(reason);
    }

    /// Full reset back to the pristine state.  Called by the
    /// `Charge → Initial` transition; keeps the last temperature sample.
    pub fn reset_cycle(&mut self) {
        self.fridge_entry_time = None;
        self.danger_zone_start = None;
        self.total_danger_secs = 0.0;
        self.discard_reason = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ctx() -> MonitorContext {
        MonitorContext::new(MonitorConfig::default())
    }

    #[test]
    fn begin_cycle_stamps_entry_and_zeroes_danger() {
        let mut ctx = make_ctx();
        ctx.now_secs = 42.0;
        ctx.total_danger_secs = 100.0;
        ctx.begin_cycle();
        assert_eq!(ctx.fridge_entry_time, Some(42.0));
        assert_eq!(ctx.danger_zone_start, None);
        assert_eq!(ctx.total_danger_secs, 0.0);
    }

    #[test]
    fn danger_elapsed_includes_prior_total() {
        let mut ctx = make_ctx();
        ctx.total_danger_secs = 600.0;
        ctx.danger_zone_start = Some(1000.0);
        ctx.now_secs = 1300.0;
        assert_eq!(ctx.danger_elapsed(), Some(900.0));
    }

    #[test]
    fn fold_danger_time_accumulates_and_clears_start() {
        let mut ctx = make_ctx();
        ctx.danger_zone_start = Some(100.0);
        ctx.now_secs = 400.0;
        ctx.fold_danger_time();
        assert_eq!(ctx.total_danger_secs, 300.0);
        assert_eq!(ctx.danger_zone_start, None);

        // A second fold with no live excursion is a no-op.
        ctx.fold_danger_time();
        assert_eq!(ctx.total_danger_secs, 300.0);
    }

    #[test]
    fn days_remaining_goes_negative_past_limit() {
        let mut ctx = make_ctx();
        ctx.fridge_entry_time = Some(0.0);
        ctx.now_secs = 86_400.0 * 5.5; // 5.5 days, limit is 4
        assert_eq!(ctx.days_remaining(), Some(-1));
    }

    #[test]
    fn reset_cycle_clears_everything() {
        let mut ctx = make_ctx();
        ctx.fridge_entry_time = Some(1.0);
        ctx.danger_zone_start = Some(2.0);
        ctx.total_danger_secs = 3.0;
        ctx.discard_reason = Some(DiscardReason::StoredTooLong);
        ctx.reset_cycle();
        assert_eq!(ctx.fridge_entry_time, None);
        assert_eq!(ctx.danger_zone_start, None);
        assert_eq!(ctx.total_danger_secs, 0.0);
        assert_eq!(ctx.discard_reason, None);
    }
}
