//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.  This is the classic embedded C FSM pattern expressed
//! in safe Rust.
//!
//! ```text
//!  INITIAL ──[temp ≤ 4°C]──▶ SAFE ◀──[temp ≤ 4°C]── WARNING
//!     ▲                       │  ──[temp > 4°C]──▶    │
//!     │                       │                       │
//!     │          [stored > 4 days]      [danger ≥ 2 hrs]
//!     │                       ▼                       ▼
//!     │                     DISCARD ◀─────────────────┘
//!     │                       │
//!     │              [temp ≥ 21°C]
//!     │                       ▼
//!     └───[temp ≤ 4°C]──── CHARGE ◀──[temp ≥ 21°C]── (Safe, Warning)
//! ```
//!
//! Guard ordering is safety-first: the storage-duration and danger-zone
//! checks run **before** the room-temperature check, so an item that is both
//! over budget and warm latches `Discard` instead of slipping into `Charge`.

use super::context::{DiscardReason, MonitorContext};
use super::{StateDescriptor, StateId};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Initial
        StateDescriptor {
            id: StateId::Initial,
            name: "Initial",
            on_enter: Some(initial_enter),
            on_exit: None,
            on_update: initial_update,
        },
        // Index 1 — Safe
        StateDescriptor {
            id: StateId::Safe,
            name: "Safe",
            on_enter: Some(safe_enter),
            on_exit: None,
            on_update: safe_update,
        },
        // Index 2 — Warning
        StateDescriptor {
            id: StateId::Warning,
            name: "Warning",
            on_enter: Some(warning_enter),
            on_exit: None,
            on_update: warning_update,
        },
        // Index 3 — Discard
        StateDescriptor {
            id: StateId::Discard,
            name: "Discard",
            on_enter: Some(discard_enter),
            on_exit: None,
            on_update: discard_update,
        },
        // Index 4 — Charge
        StateDescriptor {
            id: StateId::Charge,
            name: "Charge",
            on_enter: Some(charge_enter),
            on_exit: None,
            on_update: charge_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  INITIAL state — at room temperature, waiting to enter the fridge
// ═══════════════════════════════════════════════════════════════════════════

fn initial_enter(_ctx: &mut MonitorContext) {
    info!("READY: waiting for fridge entry");
}

fn initial_update(ctx: &mut MonitorContext) -> Option<StateId> {
    // The cycle starts the moment the item cools to the safe threshold.
    if ctx.temperature_c <= ctx.config.food_safe_temp_c {
        ctx.begin_cycle();
        return Some(StateId::Safe);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SAFE state — at or below the safe threshold, storage clock running
// ═══════════════════════════════════════════════════════════════════════════

fn safe_enter(ctx: &mut MonitorContext) {
    info!(
        "SAFE: in fridge, danger total {:.0}s, {} day(s) remaining",
        ctx.total_danger_secs,
        ctx.days_remaining().unwrap_or(0)
    );
}

fn safe_update(ctx: &mut MonitorContext) -> Option<StateId> {
    // Storage duration first: stored-too-long condemns the item even if it
    // is simultaneously warming towards room temperature.
    let max_storage_secs = f64::from(ctx.config.max_storage_days) * 86_400.0;
    if ctx.time_in_fridge().is_some_and(|t| t > max_storage_secs) {
        ctx.latch_discard(DiscardReason::StoredTooLong);
        return Some(StateId::Discard);
    }

    // Above the safe threshold: start (or resume) danger accounting.
    if ctx.temperature_c > ctx.config.food_safe_temp_c {
        ctx.danger_zone_start = Some(ctx.now_secs);
        return Some(StateId::Warning);
    }

    // Back at ambient: the device has been taken out for recharging.
    if ctx.temperature_c >= ctx.config.room_temp_c {
        return Some(StateId::Charge);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  WARNING state — above the safe threshold, danger clock running
// ═══════════════════════════════════════════════════════════════════════════

fn warning_enter(ctx: &mut MonitorContext) {
    info!(
        "WARNING: {:.1}\u{00b0}C above safe threshold, danger total {:.0}s",
        ctx.temperature_c, ctx.total_danger_secs
    );
}

fn warning_update(ctx: &mut MonitorContext) -> Option<StateId> {
    let danger = ctx.danger_elapsed().unwrap_or(ctx.total_danger_secs);

    // Danger budget first, so an item that blew the limit while warming to
    // ambient is condemned rather than recycled through Charge.
    if danger >= f64::from(ctx.config.danger_zone_limit_secs) {
        ctx.fold_danger_time();
        ctx.latch_discard(DiscardReason::DangerZoneExceeded);
        return Some(StateId::Discard);
    }

    // Cooled back down: bank the excursion and resume the safe cycle.
    if ctx.temperature_c <= ctx.config.food_safe_temp_c {
        ctx.fold_danger_time();
        return Some(StateId::Safe);
    }

    // Reached ambient: out of the fridge for good this cycle.
    if ctx.temperature_c >= ctx.config.room_temp_c {
        ctx.fold_danger_time();
        return Some(StateId::Charge);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  DISCARD state — condemned; latched until the device warms to ambient
// ═══════════════════════════════════════════════════════════════════════════

fn discard_enter(ctx: &mut MonitorContext) {
    match ctx.discard_reason {
        Some(reason) => warn!("DISCARD: {reason} — not safe to eat"),
        None => warn!("DISCARD: not safe to eat"),
    }
}

fn discard_update(ctx: &mut MonitorContext) -> Option<StateId> {
    if ctx.temperature_c >= ctx.config.room_temp_c {
        return Some(StateId::Charge);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  CHARGE state — back at room temperature, waiting for the next cycle
// ═══════════════════════════════════════════════════════════════════════════

fn charge_enter(ctx: &mut MonitorContext) {
    info!("CHARGE: at room temperature ({:.1}\u{00b0}C), ready to reset", ctx.temperature_c);
}

fn charge_update(ctx: &mut MonitorContext) -> Option<StateId> {
    // Cooling back below the safe threshold re-arms the monitor.
    if ctx.temperature_c <= ctx.config.food_safe_temp_c {
        ctx.reset_cycle();
        return Some(StateId::Initial);
    }
    None
}
