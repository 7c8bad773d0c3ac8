//! Breach detection, the alarm branch and the host's abort round-trip.

use crate::mock_hw::{ActuatorCall, Rig};

use airlock::app::events::AppEvent;
use airlock::drivers::sounder::SounderMode;
use airlock::error::Breach;
use airlock::fsm::StateId;
use airlock::fsm::context::Light;

fn alarm_tokens(rig: &Rig) -> usize {
    rig.sent_tokens().iter().filter(|t| *t == "AlarmActive").count()
}

fn breaches(rig: &Rig) -> Vec<Breach> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::BreachDetected(b) => Some(*b),
            _ => None,
        })
        .collect()
}

#[test]
fn forced_door_latches_within_one_cycle() {
    let mut rig = Rig::new();
    rig.step();
    rig.sensors.door_closed.set(false);
    rig.step();
    assert!(rig.ctl.is_emergency());
    assert_eq!(alarm_tokens(&rig), 1);
    assert_eq!(breaches(&rig), vec![Breach::ForcedDoor]);
}

#[test]
fn breach_round_trip() {
    let mut rig = Rig::new();
    rig.step();
    rig.sensors.door_closed.set(false);
    rig.step();
    assert!(rig.ctl.is_emergency());

    // Alarm branch: blinking lamps, breach tone, no sequencing
    rig.press();
    rig.steps(20);
    assert_eq!(rig.ctl.state(), StateId::AwaitOuterApproach);
    assert_eq!(rig.ctl.hw().sounder(), SounderMode::Breach);
    assert_eq!(alarm_tokens(&rig), 1, "AlarmActive is sent exactly once");

    // Host aborts once the door is shut again
    rig.sensors.door_closed.set(true);
    rig.host_says("Abort");
    rig.step();
    assert!(!rig.ctl.is_emergency());
    assert_eq!(rig.ctl.hw().sounder(), SounderMode::Silent);
    for light in Light::ALARM {
        assert!(!rig.light(light), "{light:?} left on after abort");
    }
    assert!(rig.sink.events.contains(&AppEvent::AlarmCleared));

    // Normal stepping resumes and restores the state's lamps
    rig.step();
    assert!(rig.light(Light::OuterRed));
    assert!(rig.light(Light::InnerRed));
    assert!(!rig.ctl.is_emergency());
}

#[test]
fn abort_behind_a_burst_of_lines_still_clears() {
    let mut rig = Rig::new();
    rig.step();
    rig.sensors.door_closed.set(false);
    rig.step();
    assert!(rig.ctl.is_emergency());

    // Whole burst lands in one transport read
    for _ in 0..4 {
        rig.host_says("x");
    }
    rig.host_says("Abort");
    rig.sensors.door_closed.set(true);
    rig.steps(10);
    assert!(!rig.ctl.is_emergency(), "Abort lost behind earlier lines");
    assert!(rig.sink.events.contains(&AppEvent::AlarmCleared));
}

#[test]
fn alarm_lamps_blink() {
    let mut rig = Rig::new();
    rig.step();
    rig.sensors.door_closed.set(false);
    rig.step();

    let mut levels = Vec::new();
    for _ in 0..4 {
        rig.step();
        levels.push(rig.light(Light::OuterYellow));
    }
    assert_eq!(levels, vec![true, false, true, false]);
    let toggles = rig
        .ctl
        .hw()
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::Light { light: Light::InnerYellow, .. }))
        .count();
    assert!(toggles >= 4);
}

#[test]
fn alarm_ignores_other_tokens() {
    let mut rig = Rig::new();
    rig.step();
    rig.sensors.door_closed.set(false);
    rig.step();
    rig.sensors.door_closed.set(true);
    rig.host_says("Authorised");
    rig.host_says("SystemStart");
    rig.steps(3);
    assert!(rig.ctl.is_emergency());
}

#[test]
fn abort_with_door_still_open_relatches() {
    let mut rig = Rig::new();
    rig.step();
    rig.sensors.door_closed.set(false);
    rig.step();
    rig.host_says("Abort");
    rig.step();
    assert!(!rig.ctl.is_emergency());
    rig.step();
    assert!(rig.ctl.is_emergency());
    assert_eq!(alarm_tokens(&rig), 2);
}

#[test]
fn open_door_during_transit_is_not_a_breach() {
    let mut rig = Rig::new();
    rig.press();
    rig.host_says("Authorised");
    rig.step();
    rig.sensors.door_closed.set(false);
    rig.steps(5);
    assert_eq!(rig.ctl.state(), StateId::TransitChamber);
    assert!(!rig.ctl.is_emergency());
}

#[test]
fn unexplained_motion_times_out() {
    let mut rig = Rig::new();
    rig.step();
    rig.sensors.motion.set(true);
    rig.step();
    let origin = rig.now_ms;
    assert_eq!(rig.ctl.supervisor().motion_origin_ms(), origin);

    while rig.now_ms < origin + 19_900 {
        rig.step();
        assert!(!rig.ctl.is_emergency(), "latched early at {}", rig.now_ms);
    }
    rig.step();
    assert_eq!(rig.now_ms, origin + 20_000);
    assert!(rig.ctl.is_emergency());
    assert_eq!(breaches(&rig), vec![Breach::UnexplainedMotion]);
    assert_eq!(alarm_tokens(&rig), 1);
}

#[test]
fn motion_is_expected_while_occupied() {
    let mut rig = Rig::new();
    rig.press();
    rig.host_says("Authorised");
    rig.step();
    rig.sensors.door_closed.set(false);
    rig.step();
    rig.sensors.door_closed.set(true);
    rig.sensors.motion.set(true);
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::AwaitPhaseSwitch);

    // 30 s of continuous motion while somebody is in the chamber
    rig.steps(300);
    assert!(!rig.ctl.is_emergency());
}

#[test]
fn abort_restarts_motion_timer() {
    let mut rig = Rig::new();
    rig.step();
    rig.sensors.motion.set(true);
    rig.steps(201);
    assert!(rig.ctl.is_emergency());

    rig.host_says("Abort");
    rig.step();
    let cleared_at = rig.now_ms;
    assert!(!rig.ctl.is_emergency());
    assert_eq!(rig.ctl.supervisor().motion_origin_ms(), cleared_at);

    // Motion is still held; the timeout is measured from the abort
    rig.steps(199);
    assert!(!rig.ctl.is_emergency());
    rig.step();
    assert!(rig.ctl.is_emergency());
}
