//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌──────────────────────┬──────────┬─────────┬─────────────┐ │
//! │  │ StateId              │ on_enter │ on_exit │ on_update   │ │
//! │  ├──────────────────────┼──────────┼─────────┼─────────────┤ │
//! │  │ Idle                 │    —     │    —    │ fn(ctx)->?  │ │
//! │  │ AwaitOuterApproach   │ fn(ctx)  │    —    │ fn(ctx)->?  │ │
//! │  │ AwaitAuthorisation   │ fn(ctx)  │    —    │ fn(ctx)->?  │ │
//! │  │ OuterDoorOpening     │ fn(ctx)  │ fn(ctx) │ fn(ctx)->?  │ │
//! │  │ TransitChamber       │    —     │ fn(ctx) │ fn(ctx)->?  │ │
//! │  │ AwaitPhaseSwitch     │    —     │ fn(ctx) │ fn(ctx)->?  │ │
//! │  │ InnerDoorOpening     │ fn(ctx)  │    —    │ fn(ctx)->?  │ │
//! │  │ InnerChamberOccupied │    —     │ fn(ctx) │ fn(ctx)->?  │ │
//! │  └──────────────────────┴──────────┴─────────┴─────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the
//! current pointer.  At most one transition happens per tick.  All
//! functions receive `&mut FsmContext`.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all airlock sequence states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    AwaitOuterApproach = 1,
    AwaitAuthorisation = 2,
    OuterDoorOpening = 3,
    TransitChamber = 4,
    AwaitPhaseSwitch = 5,
    InnerDoorOpening = 6,
    InnerChamberOccupied = 7,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 8;

    /// Convert an index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `AwaitOuterApproach` (lock engaged) in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::AwaitOuterApproach,
            2 => Self::AwaitAuthorisation,
            3 => Self::OuterDoorOpening,
            4 => Self::TransitChamber,
            5 => Self::AwaitPhaseSwitch,
            6 => Self::InnerDoorOpening,
            7 => Self::InnerChamberOccupied,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::AwaitOuterApproach
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]); the mutable
/// [`FsmContext`] is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// Human-readable name of the current state.
    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;
        debug_assert_eq!(self.table[next_idx].id, next_id, "state table out of order");

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
