//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers: no closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!  IDLE ──[SystemStart]──▶ AWAIT_OUTER ──[button]──▶ AWAIT_AUTH
//!                              ▲                          │
//!                              │                    [Authorised]
//!                              │                          ▼
//!                  INNER_OCCUPIED                   OUTER_OPENING
//!                              ▲                          │
//!              [door shut, no motion]              [door opened]
//!                              │                          ▼
//!                     INNER_OPENING                    TRANSIT
//!                              ▲                          │
//!                          [button]            [motion, door shut]
//!                              │                          ▼
//!                              └────────────────── PHASE_SWITCH
//! ```
//!
//! Entry actions are idempotent: each resident state re-applies its
//! outputs on every update so anything cleared behind its back (the alarm
//! branch clears the red/yellow lamps) comes back on the next step.
//! One-shot effects live only in `on_enter` / `on_exit`.

use super::context::{FsmContext, Light};
use super::{StateDescriptor, StateId};
use crate::link::token::{HostCommand, Notice};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — AwaitOuterApproach
        StateDescriptor {
            id: StateId::AwaitOuterApproach,
            name: "AwaitOuterApproach",
            on_enter: Some(await_outer_enter),
            on_exit: None,
            on_update: await_outer_update,
        },
        // Index 2 — AwaitAuthorisation
        StateDescriptor {
            id: StateId::AwaitAuthorisation,
            name: "AwaitAuthorisation",
            on_enter: Some(await_auth_enter),
            on_exit: None,
            on_update: await_auth_update,
        },
        // Index 3 — OuterDoorOpening
        StateDescriptor {
            id: StateId::OuterDoorOpening,
            name: "OuterDoorOpening",
            on_enter: Some(outer_opening_enter),
            on_exit: Some(outer_opening_exit),
            on_update: outer_opening_update,
        },
        // Index 4 — TransitChamber
        StateDescriptor {
            id: StateId::TransitChamber,
            name: "TransitChamber",
            on_enter: None,
            on_exit: Some(transit_exit),
            on_update: transit_update,
        },
        // Index 5 — AwaitPhaseSwitch
        StateDescriptor {
            id: StateId::AwaitPhaseSwitch,
            name: "AwaitPhaseSwitch",
            on_enter: None,
            on_exit: Some(phase_switch_exit),
            on_update: phase_switch_update,
        },
        // Index 6 — InnerDoorOpening
        StateDescriptor {
            id: StateId::InnerDoorOpening,
            name: "InnerDoorOpening",
            on_enter: Some(inner_opening_enter),
            on_exit: None,
            on_update: inner_opening_update,
        },
        // Index 7 — InnerChamberOccupied
        StateDescriptor {
            id: StateId::InnerChamberOccupied,
            name: "InnerChamberOccupied",
            on_enter: None,
            on_exit: Some(inner_occupied_exit),
            on_update: inner_occupied_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE — disarmed until the host starts the system
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.take_command(HostCommand::SystemStart) {
        info!("IDLE: host started the system");
        return Some(StateId::AwaitOuterApproach);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  AWAIT OUTER APPROACH — both doors red, lock engaged
// ═══════════════════════════════════════════════════════════════════════════

fn await_outer_apply(ctx: &mut FsmContext) {
    ctx.commands.set(Light::OuterRed, true);
    ctx.commands.set(Light::InnerRed, true);
    ctx.commands.lock_engaged = true;
    ctx.intent.door_closed = true;
    ctx.intent.room_occupied = false;
}

fn await_outer_enter(ctx: &mut FsmContext) {
    ctx.inner_phase = false;
    await_outer_apply(ctx);
    info!("AWAIT_OUTER: armed, waiting for the override button");
}

fn await_outer_update(ctx: &mut FsmContext) -> Option<StateId> {
    await_outer_apply(ctx);
    if ctx.sensors.button_pressed {
        return Some(StateId::AwaitAuthorisation);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  AWAIT AUTHORISATION — host is verifying identity
// ═══════════════════════════════════════════════════════════════════════════

fn await_auth_apply(ctx: &mut FsmContext) {
    ctx.commands.set(Light::OuterRed, false);
    ctx.commands.set(Light::OuterYellow, true);
}

fn await_auth_enter(ctx: &mut FsmContext) {
    await_auth_apply(ctx);
    ctx.notify(Notice::FacialRecognition);
    info!("AWAIT_AUTH: identity check requested");
}

fn await_auth_update(ctx: &mut FsmContext) -> Option<StateId> {
    await_auth_apply(ctx);
    if ctx.take_command(HostCommand::Authorised) {
        return Some(StateId::OuterDoorOpening);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  OUTER DOOR OPENING — lock released, waiting for the door to swing
// ═══════════════════════════════════════════════════════════════════════════

fn outer_opening_apply(ctx: &mut FsmContext) {
    ctx.commands.lock_engaged = false;
    ctx.commands.set(Light::OuterYellow, false);
    ctx.commands.set(Light::OuterGreen, true);
    ctx.intent.door_closed = false;
    ctx.intent.room_occupied = true;
}

fn outer_opening_enter(ctx: &mut FsmContext) {
    outer_opening_apply(ctx);
    info!("OUTER_OPENING: authorised, outer door released");
}

fn outer_opening_update(ctx: &mut FsmContext) -> Option<StateId> {
    outer_opening_apply(ctx);
    if !ctx.sensors.door_closed {
        return Some(StateId::TransitChamber);
    }
    None
}

fn outer_opening_exit(ctx: &mut FsmContext) {
    ctx.commands.set(Light::InnerRed, false);
    ctx.commands.set(Light::InnerYellow, true);
}

// ═══════════════════════════════════════════════════════════════════════════
//  TRANSIT CHAMBER — person walking in, outer door still open
// ═══════════════════════════════════════════════════════════════════════════

fn transit_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.sensors.motion && ctx.sensors.door_closed {
        info!("TRANSIT: occupant inside, outer door shut");
        return Some(StateId::AwaitPhaseSwitch);
    }
    None
}

fn transit_exit(ctx: &mut FsmContext) {
    ctx.commands.lock_engaged = true;
    ctx.intent.door_closed = true;
    ctx.commands.set(Light::OuterGreen, false);
    ctx.commands.set(Light::OuterRed, true);
}

// ═══════════════════════════════════════════════════════════════════════════
//  AWAIT PHASE SWITCH — human-gated hand-off to the inner door
// ═══════════════════════════════════════════════════════════════════════════

fn phase_switch_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.sensors.button_pressed {
        return Some(StateId::InnerDoorOpening);
    }
    None
}

fn phase_switch_exit(ctx: &mut FsmContext) {
    ctx.commands.chirp = true;
    ctx.commands.lock_engaged = false;
    ctx.inner_phase = true;
    info!("PHASE_SWITCH: lock handed to the inner door");
}

// ═══════════════════════════════════════════════════════════════════════════
//  INNER DOOR OPENING
// ═══════════════════════════════════════════════════════════════════════════

fn inner_opening_apply(ctx: &mut FsmContext) {
    ctx.commands.set(Light::InnerYellow, false);
    ctx.commands.set(Light::InnerGreen, true);
    ctx.intent.door_closed = false;
}

fn inner_opening_enter(ctx: &mut FsmContext) {
    inner_opening_apply(ctx);
}

fn inner_opening_update(ctx: &mut FsmContext) -> Option<StateId> {
    inner_opening_apply(ctx);
    if !ctx.sensors.door_closed {
        return Some(StateId::InnerChamberOccupied);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  INNER CHAMBER OCCUPIED — wait for the chamber to empty
// ═══════════════════════════════════════════════════════════════════════════

fn inner_occupied_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.sensors.door_closed && !ctx.sensors.motion {
        info!("INNER_OCCUPIED: chamber clear, re-arming");
        return Some(StateId::AwaitOuterApproach);
    }
    None
}

fn inner_occupied_exit(ctx: &mut FsmContext) {
    ctx.commands.set(Light::InnerGreen, false);
    ctx.commands.set(Light::InnerRed, true);
    ctx.commands.lock_engaged = true;
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
