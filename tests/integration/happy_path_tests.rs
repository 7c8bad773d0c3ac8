//! Full walk-through of the airlock and the host handshake around it.

use crate::mock_hw::{ActuatorCall, Rig};

use airlock::app::events::AppEvent;
use airlock::config::AirlockConfig;
use airlock::fsm::StateId;
use airlock::fsm::context::Light;

fn transitions(rig: &Rig) -> Vec<(StateId, StateId)> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn initialize_drives_safe_state_then_arms() {
    let rig = Rig::new();
    let calls = &rig.ctl.hw().calls;
    assert_eq!(calls.first(), Some(&ActuatorCall::SafeState));
    assert_eq!(rig.ctl.state(), StateId::AwaitOuterApproach);
    assert!(rig.lock_engaged());
    assert!(rig.light(Light::OuterRed));
    assert!(rig.light(Light::InnerRed));
    assert!(!rig.ctl.is_emergency());
    assert_eq!(
        rig.sink.events.first(),
        Some(&AppEvent::Started(StateId::AwaitOuterApproach))
    );
}

#[test]
fn full_pass_through_returns_to_start() {
    let mut rig = Rig::new();
    rig.step();

    // 1 → 2: button press asks the host for an identity check
    rig.press();
    assert_eq!(rig.ctl.state(), StateId::AwaitAuthorisation);
    assert_eq!(rig.sent_tokens(), vec!["FacialRecognition"]);
    assert!(rig.lock_engaged());
    assert!(rig.light(Light::OuterYellow));
    assert!(!rig.light(Light::OuterRed));

    // 2 → 3: host authorises
    rig.host_says("Authorised");
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::OuterDoorOpening);
    assert!(!rig.lock_engaged());
    assert!(rig.light(Light::OuterGreen));

    // 3 → 4: outer door swings open
    rig.sensors.door_closed.set(false);
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::TransitChamber);
    assert!(rig.light(Light::InnerYellow));
    assert!(!rig.light(Light::InnerRed));

    // 4 → 5: occupant inside, outer door shut behind them
    rig.sensors.door_closed.set(true);
    rig.sensors.motion.set(true);
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::AwaitPhaseSwitch);
    assert!(rig.lock_engaged());
    assert!(rig.light(Light::OuterRed));
    assert!(!rig.light(Light::OuterGreen));

    // Waiting here does not advance without a second press
    rig.steps(10);
    assert_eq!(rig.ctl.state(), StateId::AwaitPhaseSwitch);

    // 5 → 6: second press hands the lock to the inner door
    rig.press();
    assert_eq!(rig.ctl.state(), StateId::InnerDoorOpening);
    assert!(!rig.lock_engaged());
    assert!(rig.light(Light::InnerGreen));
    assert!(!rig.light(Light::InnerYellow));
    assert_eq!(rig.ctl.hw().chirps(), 1);

    // 6 → 7: inner door opens
    rig.sensors.door_closed.set(false);
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::InnerChamberOccupied);

    // 7 → 1: inner door shut, chamber empty
    rig.sensors.door_closed.set(true);
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::InnerChamberOccupied);
    rig.sensors.motion.set(false);
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::AwaitOuterApproach);
    assert!(rig.lock_engaged());
    assert!(rig.light(Light::InnerRed));
    assert!(!rig.light(Light::InnerGreen));

    assert_eq!(
        transitions(&rig),
        vec![
            (StateId::AwaitOuterApproach, StateId::AwaitAuthorisation),
            (StateId::AwaitAuthorisation, StateId::OuterDoorOpening),
            (StateId::OuterDoorOpening, StateId::TransitChamber),
            (StateId::TransitChamber, StateId::AwaitPhaseSwitch),
            (StateId::AwaitPhaseSwitch, StateId::InnerDoorOpening),
            (StateId::InnerDoorOpening, StateId::InnerChamberOccupied),
            (StateId::InnerChamberOccupied, StateId::AwaitOuterApproach),
        ]
    );
    assert!(!rig.ctl.is_emergency());
    assert_eq!(rig.sent_tokens(), vec!["FacialRecognition"]);
}

#[test]
fn held_button_triggers_only_once() {
    let mut rig = Rig::new();
    rig.sensors.button.set(true);
    rig.steps(5);
    assert_eq!(rig.ctl.state(), StateId::AwaitAuthorisation);
    assert_eq!(rig.sent_tokens(), vec!["FacialRecognition"]);
}

#[test]
fn early_authorisation_is_discarded() {
    let mut rig = Rig::new();
    rig.host_says("Authorised");
    rig.step();
    rig.press();
    assert_eq!(rig.ctl.state(), StateId::AwaitAuthorisation);
    rig.steps(3);
    assert_eq!(rig.ctl.state(), StateId::AwaitAuthorisation);
}

#[test]
fn unrecognised_tokens_are_ignored() {
    let mut rig = Rig::new();
    rig.press();
    rig.host_says("Authorized");
    rig.host_says("   ");
    rig.host_says("authorised");
    rig.steps(3);
    assert_eq!(rig.ctl.state(), StateId::AwaitAuthorisation);

    rig.host_says("  Authorised\r");
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::OuterDoorOpening);
}

#[test]
fn idle_waits_for_system_start() {
    let mut rig = Rig::with_config(AirlockConfig {
        await_system_start: true,
        ..AirlockConfig::default()
    });
    assert_eq!(rig.ctl.state(), StateId::Idle);
    assert!(rig.lock_engaged());
    assert!(Light::ALL.iter().all(|l| !rig.light(*l)));

    rig.press();
    rig.host_says("Authorised");
    rig.steps(2);
    assert_eq!(rig.ctl.state(), StateId::Idle);

    rig.host_says("SystemStart");
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::AwaitOuterApproach);
    assert!(rig.light(Light::OuterRed));
}

#[test]
fn one_token_consumed_per_cycle() {
    let mut rig = Rig::with_config(AirlockConfig {
        await_system_start: true,
        ..AirlockConfig::default()
    });
    rig.host_says("SystemStart");
    rig.host_says("Authorised");
    rig.step();
    assert_eq!(rig.ctl.state(), StateId::AwaitOuterApproach);
    // The queued `Authorised` arrives in state 1 and is dropped.
    rig.step();
    rig.press();
    rig.steps(2);
    assert_eq!(rig.ctl.state(), StateId::AwaitAuthorisation);
}
