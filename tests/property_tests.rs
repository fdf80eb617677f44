//! Property tests for robustness of the food-safety state machine.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use coldwatch::app::events::AppEvent;
use coldwatch::app::ports::EventSink;
use coldwatch::app::service::MonitorService;
use coldwatch::config::MonitorConfig;
use coldwatch::display::build_screen;
use coldwatch::drivers::led_patterns::pattern_for;
use coldwatch::fsm::StateId;
use proptest::prelude::*;

struct NullSink;
impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

/// One tick: a temperature across the whole operating envelope and a
/// non-negative time step up to ~1.5 hours.
fn arb_tick() -> impl Strategy<Value = (f32, f64)> {
    (-20.0f32..40.0, 0.0f64..5400.0)
}

proptest! {
    /// Every sample is accepted and yields a snapshot whose state matches
    /// the service — the machine is total over its input space.
    #[test]
    fn update_is_total(ticks in proptest::collection::vec(arb_tick(), 1..300)) {
        let mut app = MonitorService::new(MonitorConfig::default());
        let mut sink = NullSink;
        app.start(&mut sink);

        let mut now = 0.0;
        for (temp, dt) in ticks {
            now += dt;
            let snap = app.update(temp, now, &mut sink);
            prop_assert_eq!(snap.state, app.state());
        }
    }

    /// The danger total is the sum of completed Warning intervals: it
    /// never decreases except through the full Charge → Initial reset.
    #[test]
    fn danger_total_monotone_between_resets(
        ticks in proptest::collection::vec(arb_tick(), 1..300),
    ) {
        let mut app = MonitorService::new(MonitorConfig::default());
        let mut sink = NullSink;
        app.start(&mut sink);

        let mut now = 0.0;
        let mut prev_total = 0.0;
        for (temp, dt) in ticks {
            now += dt;
            let snap = app.update(temp, now, &mut sink);
            if snap.state == StateId::Initial {
                prop_assert_eq!(snap.danger_total_secs, 0.0);
                prev_total = 0.0;
            } else {
                prop_assert!(snap.danger_total_secs >= prev_total - 1e-9);
                prev_total = snap.danger_total_secs;
            }
        }
    }

    /// Once condemned, an item never returns to Safe without passing
    /// through the Charge → Initial reset.
    #[test]
    fn discard_never_silently_rescued(
        ticks in proptest::collection::vec(arb_tick(), 1..300),
    ) {
        let mut app = MonitorService::new(MonitorConfig::default());
        let mut sink = NullSink;
        app.start(&mut sink);

        let mut now = 0.0;
        let mut prev = app.state();
        for (temp, dt) in ticks {
            now += dt;
            let snap = app.update(temp, now, &mut sink);
            if prev == StateId::Discard {
                prop_assert!(
                    matches!(snap.state, StateId::Discard | StateId::Charge),
                    "Discard left to {:?}", snap.state
                );
            }
            prev = snap.state;
        }
    }

    /// Presentation is total too: every reachable snapshot renders to a
    /// screen with a status word and maps to an LED pattern.
    #[test]
    fn every_snapshot_presents(ticks in proptest::collection::vec(arb_tick(), 1..100)) {
        let config = MonitorConfig::default();
        let limit = config.danger_zone_limit_secs;
        let mut app = MonitorService::new(config);
        let mut sink = NullSink;
        app.start(&mut sink);

        let mut now = 0.0;
        for (temp, dt) in ticks {
            now += dt;
            let snap = app.update(temp, now, &mut sink);
            let screen = build_screen(&snap, limit);
            prop_assert!(!screen.status.is_empty());
            prop_assert!(!screen.lines.is_empty());
            let (_colour, _pattern) = pattern_for(&snap, limit);
        }
    }
}
