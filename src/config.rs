//! System configuration parameters
//!
//! All tunable parameters for the ColdWatch monitor.  Defaults are the
//! FDA-derived reference thresholds; values can be overridden at build time
//! or via the serial console (JSON import/export).

use serde::{Deserialize, Serialize};

/// Core monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Safety thresholds ---
    /// At or below this temperature (°C) the item is in the safe zone.
    pub food_safe_temp_c: f32,
    /// At or above this temperature (°C) the item has reached ambient.
    pub room_temp_c: f32,
    /// Maximum cumulative seconds above the safe threshold before
    /// mandatory discard (2 hours).
    pub danger_zone_limit_secs: u32,
    /// Maximum days of continuous refrigerated storage.
    pub max_storage_days: u16,

    // --- Sensing ---
    /// Fixed calibration offset applied to raw temperature readings (°C).
    pub temp_offset_c: f32,

    // --- Timing ---
    /// Sampling / control loop interval (milliseconds).
    pub sample_interval_ms: u32,
    /// Telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Safety thresholds
            food_safe_temp_c: 4.0,
            room_temp_c: 21.0,
            danger_zone_limit_secs: 7200, // 2 hours
            max_storage_days: 4,

            // Sensing
            temp_offset_c: -3.5,

            // Timing
            sample_interval_ms: 2000,    // 0.5 Hz
            telemetry_interval_secs: 60, // 1/min
        }
    }
}
