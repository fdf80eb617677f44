//! Function-pointer finite state machine for food-safety tracking.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Initial │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Safe    │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Warning │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Discard │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Charge  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  └─────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each call to [`Monitor::update`] stamps the sample into the shared
//! [`context::MonitorContext`], runs `on_update` for the **current** state,
//! and — if it returns `Some(next_id)` — executes at most one transition
//! (`on_exit` → pointer update → `on_enter`).  All timer accounting is
//! computed from absolute clock readings, never incremented per call, so
//! repeated samples with the same timestamp cannot double-count.

pub mod context;
pub mod snapshot;
pub mod states;

use context::MonitorContext;
use log::info;
use snapshot::StateSnapshot;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of the five safety states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// At room temperature, ready to start a storage cycle.
    Initial = 0,
    /// At or below the safe threshold, storage clock running.
    Safe = 1,
    /// Above the safe threshold, danger clock running.
    Warning = 2,
    /// Condemned — stored too long or danger budget exceeded.
    Discard = 3,
    /// Back at room temperature, waiting to be reset.
    Charge = 4,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 5;

    /// Human-readable name, as shown on screen and in telemetry.
    pub fn name(self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Safe => "Safe",
            Self::Warning => "Warning",
            Self::Discard => "Discard",
            Self::Charge => "Charge",
        }
    }

    /// Convert a `u8` index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `Discard` in release (the conservative state).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Initial,
            1 => Self::Safe,
            2 => Self::Warning,
            3 => Self::Discard,
            4 => Self::Charge,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Discard
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once per state transition and carry logging only;
/// timer mutations happen in the update handlers at the decision point.
pub type StateActionFn = fn(&mut MonitorContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut MonitorContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// Monitor engine
// ---------------------------------------------------------------------------

/// The food-safety state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and tracks which
/// state is active and when it was entered.  The mutable
/// [`MonitorContext`] is threaded through every handler call.
pub struct Monitor {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Clock reading at which the current state was entered.
    /// `None` until the first `update` call stamps it.
    state_entered_at: Option<f64>,
}

impl Monitor {
    /// Construct a new monitor with the given state table, starting in
    /// `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            state_entered_at: None,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `update()`.
    pub fn start(&mut self, ctx: &mut MonitorContext) {
        info!("monitor starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the machine by one sample.
    ///
    /// 1. Stamp `(temperature_c, now_secs)` into the context.
    /// 2. Call `on_update` for the current state.
    /// 3. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    /// 4. Capture and return the post-transition [`StateSnapshot`].
    ///
    /// `now_secs` must be monotonically non-decreasing across calls — the
    /// caller's clock guarantees this; the monitor assumes it.
    pub fn update(
        &mut self,
        temperature_c: f32,
        now_secs: f64,
        ctx: &mut MonitorContext,
    ) -> StateSnapshot {
        ctx.temperature_c = temperature_c;
        ctx.now_secs = now_secs;

        // First call stamps the entry time of the starting state.
        let _ = self.state_entered_at.get_or_insert(now_secs);

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }

        StateSnapshot::capture(self.current_state(), self.time_in_state(now_secs), ctx)
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// Seconds the machine has been in the current state, as of `now_secs`.
    pub fn time_in_state(&self, now_secs: f64) -> f64 {
        match self.state_entered_at {
            Some(at) => now_secs - at,
            None => 0.0,
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut MonitorContext) {
        let next_idx = next_id as usize;

        info!(
            "transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current state
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        // Update pointer and timing
        self.current = next_idx;
        self.state_entered_at = Some(ctx.now_secs);

        // Enter new state
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
