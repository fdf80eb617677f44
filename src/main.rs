//! ColdWatch Firmware — Main Entry Point
//!
//! Hexagonal architecture around one synchronous control loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter    LogEventSink     MonotonicClock      │
//! │  (SensorPort+LED)   (EventSink)      (time source)       │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          MonitorService (pure logic)           │      │
//! │  │  food-safety FSM · timers · snapshots          │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  Presentation: ScreenModel builder · LED pattern engine  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop is strictly serialized: one sample per tick, one `update()`
//! call, then presentation consumes the immutable snapshot.  Nothing else
//! touches the monitor state.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod app;
pub mod config;
pub mod display;
pub mod fsm;

mod adapters;
pub mod drivers;
pub mod error;
mod pins;
pub mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{debug, info};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::MonotonicClock;
use app::events::AppEvent;
use app::ports::EventSink;
use app::service::MonitorService;
use config::MonitorConfig;
use drivers::led_patterns::{pattern_for, LedPatternEngine};
use drivers::status_led::StatusLed;
use fsm::StateId;
use sensors::temperature::TemperatureSensor;
use sensors::SensorHub;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("╔══════════════════════════════════════╗");
    info!("║  ColdWatch v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {e} — halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Configuration ──────────────────────────────────────
    let config = MonitorConfig::default();
    info!(
        "thresholds: safe<= {:.1}C, room>= {:.1}C, danger limit {}s, max storage {}d",
        config.food_safe_temp_c,
        config.room_temp_c,
        config.danger_zone_limit_secs,
        config.max_storage_days
    );

    // ── 4. Construct adapters ─────────────────────────────────
    let clock = MonotonicClock::new();
    let hub = SensorHub::new(TemperatureSensor::new(
        pins::TEMP_ADC_GPIO,
        config.temp_offset_c,
    ));
    let mut hw = HardwareAdapter::new(hub, StatusLed::new());
    let mut sink = LogEventSink::new();

    // ── 5. Construct the application service ──────────────────
    let mut service = MonitorService::new(config.clone());
    service.start(&mut sink);

    let mut led_engine = LedPatternEngine::new();

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let telemetry_every =
        u64::from(config.telemetry_interval_secs) * 1000 / u64::from(config.sample_interval_ms);
    let mut prev_state = StateId::Initial;

    loop {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.sample_interval_ms,
        )));

        // Sample → state machine → snapshot.
        let now = clock.now_secs();
        let snapshot = service.tick(&mut hw, now, &mut sink);

        // Status LED from the snapshot (pure mapping, then pattern engine).
        let (colour, pattern) = pattern_for(&snapshot, config.danger_zone_limit_secs);
        led_engine.set_pattern(colour, pattern);
        let rgb = led_engine.tick(config.sample_interval_ms);
        hw.set_led(rgb);

        // Screen view-model on every state change.  The panel driver is an
        // external collaborator; the serial console gets the same content.
        if snapshot.state != prev_state {
            let screen = display::build_screen(&snapshot, config.danger_zone_limit_secs);
            debug!("SCREEN | {}", screen.status);
            for line in &screen.lines {
                debug!("SCREEN |   {line}");
            }
            prev_state = snapshot.state;
        }

        // Periodic telemetry.
        if telemetry_every > 0 && service.tick_count() % telemetry_every == 0 {
            sink.emit(&AppEvent::Telemetry(service.build_telemetry()));
        }
    }
}
