//! Integration tests for the MonitorService → FSM → presentation pipeline.
//!
//! These run on the host (x86_64) and drive the full service through the
//! port boundary exactly as the control loop does, with no real hardware.

use crate::mock_hw::{MockSensor, RecordingSink};

use coldwatch::app::events::AppEvent;
use coldwatch::app::service::MonitorService;
use coldwatch::config::MonitorConfig;
use coldwatch::display::build_screen;
use coldwatch::drivers::led_patterns::{pattern_for, PatternId, COLOUR_DISCARD, COLOUR_SAFE};
use coldwatch::fsm::context::DiscardReason;
use coldwatch::fsm::StateId;

fn make_app() -> (MonitorService, MockSensor, RecordingSink) {
    let config = MonitorConfig::default();
    let mut app = MonitorService::new(config);
    let hw = MockSensor::new(21.0);
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, hw, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_in_initial_and_announces_it() {
    let (app, _hw, sink) = make_app();
    assert_eq!(app.state(), StateId::Initial);
    assert_eq!(sink.events, vec![AppEvent::Started(StateId::Initial)]);
}

// ── The reference walkthrough ─────────────────────────────────

#[test]
fn reference_scenario_through_the_port_boundary() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.celsius = 21.0;
    assert_eq!(app.tick(&mut hw, 0.0, &mut sink).state, StateId::Initial);

    hw.celsius = 3.0;
    let snap = app.tick(&mut hw, 0.0, &mut sink);
    assert_eq!(snap.state, StateId::Safe);
    assert_eq!(snap.time_in_fridge_secs, Some(0.0));

    hw.celsius = 5.0;
    let snap = app.tick(&mut hw, 100.0, &mut sink);
    assert_eq!(snap.state, StateId::Warning);
    assert_eq!(snap.danger_elapsed_secs, Some(0.0));

    let snap = app.tick(&mut hw, 7300.0, &mut sink);
    assert_eq!(snap.state, StateId::Discard);
    assert_eq!(snap.discard_reason, Some(DiscardReason::DangerZoneExceeded));

    hw.celsius = 21.0;
    assert_eq!(app.tick(&mut hw, 8000.0, &mut sink).state, StateId::Charge);

    hw.celsius = 3.0;
    let snap = app.tick(&mut hw, 8001.0, &mut sink);
    assert_eq!(snap.state, StateId::Initial);
    assert_eq!(snap.danger_total_secs, 0.0);
    assert_eq!(snap.time_in_fridge_secs, None);

    assert_eq!(
        sink.transitions(),
        vec![
            ("Initial", "Safe"),
            ("Safe", "Warning"),
            ("Warning", "Discard"),
            ("Discard", "Charge"),
            ("Charge", "Initial"),
        ]
    );
}

// ── Danger accumulation across oscillation ────────────────────

#[test]
fn oscillation_sums_warning_intervals() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.celsius = 3.0;
    app.tick(&mut hw, 0.0, &mut sink);

    // Two door-open excursions: 1200 s and 1800 s.
    let mut t = 0.0;
    for excursion in [1200.0, 1800.0] {
        t += 60.0;
        hw.celsius = 6.5;
        app.tick(&mut hw, t, &mut sink);
        t += excursion;
        hw.celsius = 3.0;
        let snap = app.tick(&mut hw, t, &mut sink);
        assert_eq!(snap.state, StateId::Safe);
    }
    assert_eq!(app.build_telemetry().danger_total_secs, 3000.0);

    // Third excursion: 4200 s more hits the 7200 s budget exactly.
    t += 60.0;
    hw.celsius = 6.5;
    app.tick(&mut hw, t, &mut sink);
    let snap = app.tick(&mut hw, t + 4200.0, &mut sink);
    assert_eq!(snap.state, StateId::Discard);
    assert_eq!(snap.discard_reason, Some(DiscardReason::DangerZoneExceeded));
}

// ── Storage-limit discard timing ──────────────────────────────

#[test]
fn storage_limit_fires_at_the_crossing_tick_never_earlier() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.celsius = 2.0;
    app.tick(&mut hw, 0.0, &mut sink);

    // Sample every 6 hours while cold the whole time.  The last in-loop
    // sample lands exactly on the limit, which is not yet over (strict >).
    let mut t = 0.0;
    let limit = 4.0 * 86_400.0;
    while t < limit {
        t += 6.0 * 3600.0;
        let snap = app.tick(&mut hw, t, &mut sink);
        assert_eq!(snap.state, StateId::Safe, "too early at t={t}");
    }
    // One tick past the limit condemns.
    let snap = app.tick(&mut hw, limit + 1.0, &mut sink);
    assert_eq!(snap.state, StateId::Discard);
    assert_eq!(snap.discard_reason, Some(DiscardReason::StoredTooLong));
}

// ── Sensor failure resilience ─────────────────────────────────

#[test]
fn failed_read_reuses_last_temperature() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.celsius = 3.0;
    app.tick(&mut hw, 0.0, &mut sink);
    assert_eq!(app.state(), StateId::Safe);

    // A dropped ADC read must not disturb the state or the clocks.
    hw.fail_next = true;
    let snap = app.tick(&mut hw, 2.0, &mut sink);
    assert_eq!(snap.state, StateId::Safe);
    assert_eq!(snap.temperature_c, 3.0);
    assert_eq!(snap.time_in_fridge_secs, Some(2.0));
    assert_eq!(hw.reads, 2, "service polls the sensor every tick");
}

// ── Discard event carries the reason ──────────────────────────

#[test]
fn discard_event_is_emitted_once_with_reason() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.celsius = 3.0;
    app.tick(&mut hw, 0.0, &mut sink);
    hw.celsius = 8.0;
    app.tick(&mut hw, 10.0, &mut sink);
    app.tick(&mut hw, 10.0 + 7200.0, &mut sink);
    // Staying in Discard must not re-emit.
    app.tick(&mut hw, 10.0 + 7300.0, &mut sink);

    let discards: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::DiscardTriggered(_)))
        .collect();
    assert_eq!(
        discards,
        vec![&AppEvent::DiscardTriggered(DiscardReason::DangerZoneExceeded)]
    );
}

// ── Snapshot → presentation plumbing ──────────────────────────

#[test]
fn snapshot_drives_screen_and_led_consistently() {
    let (mut app, mut hw, mut sink) = make_app();
    let limit = MonitorConfig::default().danger_zone_limit_secs;

    hw.celsius = 3.0;
    let snap = app.tick(&mut hw, 0.0, &mut sink);

    let screen = build_screen(&snap, limit);
    assert_eq!(screen.status, "SAFE");
    assert_eq!(pattern_for(&snap, limit), (COLOUR_SAFE, PatternId::Solid));

    hw.celsius = 8.0;
    app.tick(&mut hw, 10.0, &mut sink);
    let snap = app.tick(&mut hw, 10.0 + 7200.0, &mut sink);

    let screen = build_screen(&snap, limit);
    assert_eq!(screen.status, "DISCARD");
    assert!(screen
        .lines
        .iter()
        .any(|l| l.as_str() == "Above 4\u{00b0}C > 2hrs"));
    assert_eq!(pattern_for(&snap, limit), (COLOUR_DISCARD, PatternId::Solid));
}

// ── Repeated identical ticks ──────────────────────────────────

#[test]
fn identical_ticks_produce_identical_snapshots() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.celsius = 4.0;
    app.tick(&mut hw, 0.0, &mut sink); // Initial → Safe (4.0 is safe)
    let first = app.tick(&mut hw, 50.0, &mut sink);
    let second = app.tick(&mut hw, 50.0, &mut sink);
    assert_eq!(first, second);
    assert_eq!(first.state, StateId::Safe);
    assert_eq!(first.danger_total_secs, 0.0);
}
