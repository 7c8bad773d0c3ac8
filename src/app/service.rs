//! Sequence controller — the hexagonal core.
//!
//! [`SequenceController`] owns the FSM, the alarm supervisor, the shared
//! context, the hardware context and the host link.  It is constructed
//! once at startup and driven by a fixed-rate loop calling
//! [`step`](SequenceController::step).
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │    SequenceController    │
//! ActuatorPort ◀──│  FSM · Alarm · Telemetry │ ◀─▶ HostLink
//!                 └──────────────────────────┘
//! ```
//!
//! ## Cycle order
//!
//! Normal step: sensors → host token → FSM → actuators → notices →
//! telemetry → alarm check.
//!
//! Alarm step (emergency latched): blink → breach tone → host token.
//! Nothing else runs until the host sends `Abort`.

use log::{debug, info, trace};

use crate::config::AirlockConfig;
use crate::drivers::blink::AlarmBlink;
use crate::drivers::sounder::SounderMode;
use crate::error::{Breach, LinkError};
use crate::fsm::context::{FsmContext, Intent, Light};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::link::HostLink;
use crate::link::telemetry::{StateVector, TelemetryTracker};
use crate::link::token::{HostCommand, Notice};
use crate::link::transport::Transport;
use crate::safety::AlarmSupervisor;

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// SequenceController
// ───────────────────────────────────────────────────────────────

pub struct SequenceController<H, T> {
    config: AirlockConfig,
    fsm: Fsm,
    ctx: FsmContext,
    supervisor: AlarmSupervisor,
    telemetry: TelemetryTracker,
    blink: AlarmBlink,
    hw: H,
    link: HostLink<T>,
}

impl<H, T> SequenceController<H, T>
where
    H: SensorPort + ActuatorPort,
    T: Transport,
    LinkError: From<T::Error>,
{
    /// Construct the controller.
    ///
    /// Does **not** touch the hardware; call [`initialize`](Self::initialize) next.
    pub fn new(config: AirlockConfig, hw: H, transport: T) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), initial_state(&config)),
            ctx: FsmContext::new(),
            supervisor: AlarmSupervisor::new(&config),
            telemetry: TelemetryTracker::new(),
            blink: AlarmBlink::new(config.alarm_blink_half_period_ms),
            config,
            hw,
            link: HostLink::new(transport),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output to the safe state and enter the initial state.
    pub fn initialize(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        self.hw.safe_state();

        let initial = initial_state(&self.config);
        self.ctx = FsmContext::new();
        self.telemetry = TelemetryTracker::new();
        self.blink.reset();
        self.fsm = Fsm::new(build_state_table(), initial);
        self.fsm.start(&mut self.ctx);
        self.supervisor.reset(now_ms);

        self.apply_actuators();
        self.flush_outbox();

        sink.emit(&AppEvent::Started(initial));
        info!("SequenceController started in {:?}", initial);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle.  `now_ms` comes from a monotonic clock.
    pub fn step(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        if self.supervisor.is_emergency() {
            self.alarm_step(now_ms, sink);
            return;
        }

        let prev_state = self.fsm.current_state();

        // 1. Sample sensors (edge latches consumed here, once)
        let snapshot = self.hw.read_all();
        self.ctx.sensors = snapshot;

        // 2. One host token per cycle
        self.ctx.inbound = self.poll_command();

        // 3. FSM tick (pure state logic)
        self.fsm.tick(&mut self.ctx);
        if let Some(cmd) = self.ctx.inbound.take() {
            debug!("{} ignored in {}", cmd.as_str(), self.fsm.current_name());
        }

        // 4. Apply actuator commands and send queued notices
        self.apply_actuators();
        self.flush_outbox();

        // 5. Emit state change if the FSM moved
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        // 6. Report observable changes
        let vector = self.observe();
        if let Some(v) = self.telemetry.observe(vector) {
            trace!("TELEM {v}");
            self.link.write_line(&v.encode());
            sink.emit(&AppEvent::Telemetry(v));
        }

        // 7. Alarm supervision, every normal cycle regardless of state
        if let Some(breach) = self.supervisor.check(&self.ctx.intent, &snapshot, now_ms) {
            self.raise_alarm(breach, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn state_name(&self) -> &'static str {
        self.fsm.current_name()
    }

    pub fn is_emergency(&self) -> bool {
        self.supervisor.is_emergency()
    }

    pub fn intent(&self) -> &Intent {
        &self.ctx.intent
    }

    pub fn context(&self) -> &FsmContext {
        &self.ctx
    }

    pub fn supervisor(&self) -> &AlarmSupervisor {
        &self.supervisor
    }

    pub fn config(&self) -> &AirlockConfig {
        &self.config
    }

    /// The vector the next telemetry comparison would see.
    pub fn observe(&self) -> StateVector {
        let mut lights = [false; Light::COUNT];
        for light in Light::ALL {
            lights[light.index()] = self.hw.is_light_on(light);
        }
        StateVector {
            inner_phase: self.ctx.inner_phase,
            lights,
            motion: self.ctx.sensors.motion,
            lock_engaged: self.hw.is_lock_engaged(),
            door_closed: self.ctx.sensors.door_closed,
        }
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn link(&self) -> &HostLink<T> {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut HostLink<T> {
        &mut self.link
    }

    // ── Internal ──────────────────────────────────────────────

    fn alarm_step(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        let on = self.blink.level(now_ms);
        for light in Light::ALARM {
            self.hw.set_light(light, on);
        }
        self.hw.sound(SounderMode::Breach);

        match self.poll_command() {
            Some(HostCommand::Abort) => self.clear_alarm(now_ms, sink),
            Some(other) => debug!("{} ignored during alarm", other.as_str()),
            None => {}
        }
    }

    fn raise_alarm(&mut self, breach: Breach, sink: &mut impl EventSink) {
        self.link.write_token(Notice::AlarmActive.as_str());
        self.blink.reset();
        sink.emit(&AppEvent::BreachDetected(breach));
    }

    fn clear_alarm(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        for light in Light::ALARM {
            self.hw.set_light(light, false);
            self.ctx.commands.set(light, false);
        }
        self.hw.sound(SounderMode::Silent);
        self.supervisor.clear(now_ms);
        sink.emit(&AppEvent::AlarmCleared);
    }

    fn poll_command(&mut self) -> Option<HostCommand> {
        let token = self.link.try_read_token()?;
        let cmd = HostCommand::parse(&token);
        if cmd.is_none() {
            debug!("unrecognised token {:?} dropped", token.as_str());
        }
        cmd
    }

    fn apply_actuators(&mut self) {
        let cmds = &mut self.ctx.commands;
        for light in Light::ALL {
            self.hw.set_light(light, cmds.is_on(light));
        }
        self.hw.set_lock(cmds.lock_engaged);
        if cmds.chirp {
            cmds.chirp = false;
            self.hw.sound(SounderMode::Chirp);
        }
    }

    fn flush_outbox(&mut self) {
        let outbox = core::mem::take(&mut self.ctx.outbox);
        for notice in outbox {
            info!("-> host: {}", notice.as_str());
            self.link.write_token(notice.as_str());
        }
    }
}

fn initial_state(config: &AirlockConfig) -> StateId {
    if config.await_system_start {
        StateId::Idle
    } else {
        StateId::AwaitOuterApproach
    }
}
