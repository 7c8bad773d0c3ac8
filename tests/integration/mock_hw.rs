//! Mock hardware, transport and event sink for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history, and exposes the sensor lines so tests can drive them between
//! cycles without touching real GPIO.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use airlock::app::events::AppEvent;
use airlock::app::ports::{ActuatorPort, DigitalInput, EventSink, SensorPort};
use airlock::app::service::SequenceController;
use airlock::config::AirlockConfig;
use airlock::drivers::edge::EdgeLatch;
use airlock::drivers::sounder::SounderMode;
use airlock::fsm::context::{Light, SensorSnapshot};
use airlock::link::transport::Transport;

// ── Sensor line ───────────────────────────────────────────────

/// Shared boolean level standing in for a sensor pin.
#[derive(Clone, Default)]
pub struct Line(Rc<Cell<bool>>);

#[allow(dead_code)]
impl Line {
    pub fn set(&self, level: bool) {
        self.0.set(level);
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }
}

impl DigitalInput for Line {
    fn read(&mut self) -> bool {
        self.0.get()
    }
}

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Light { light: Light, on: bool },
    Lock(bool),
    Sound(SounderMode),
    SafeState,
}

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    pub calls: Vec<ActuatorCall>,
    lights: [bool; Light::COUNT],
    lock: bool,
    sounder: SounderMode,
    door: Line,
    motion: EdgeLatch<Line>,
    button: EdgeLatch<Line>,
}

/// Test-side handles on the mock sensor lines.
#[derive(Clone)]
pub struct Sensors {
    pub door_closed: Line,
    pub motion: Line,
    pub button: Line,
}

#[allow(dead_code)]
impl MockPanel {
    /// Door shut, no motion, button released.
    pub fn new() -> (Self, Sensors) {
        let sensors = Sensors {
            door_closed: Line::default(),
            motion: Line::default(),
            button: Line::default(),
        };
        sensors.door_closed.set(true);
        let panel = Self {
            calls: Vec::new(),
            lights: [false; Light::COUNT],
            lock: false,
            sounder: SounderMode::Silent,
            door: sensors.door_closed.clone(),
            motion: EdgeLatch::new(sensors.motion.clone()),
            button: EdgeLatch::new(sensors.button.clone()),
        };
        (panel, sensors)
    }

    pub fn sounder(&self) -> SounderMode {
        self.sounder
    }

    pub fn chirps(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == ActuatorCall::Sound(SounderMode::Chirp))
            .count()
    }
}

impl SensorPort for MockPanel {
    fn read_all(&mut self) -> SensorSnapshot {
        let button_pressed = self.button.poll_rising_edge();
        let motion_rising = self.motion.poll_rising_edge();
        SensorSnapshot {
            button_pressed,
            motion: self.motion.level(),
            motion_rising,
            door_closed: self.door.read(),
        }
    }
}

impl ActuatorPort for MockPanel {
    fn set_light(&mut self, light: Light, on: bool) {
        if self.lights[light.index()] != on {
            self.calls.push(ActuatorCall::Light { light, on });
        }
        self.lights[light.index()] = on;
    }

    fn is_light_on(&self, light: Light) -> bool {
        self.lights[light.index()]
    }

    fn set_lock(&mut self, engaged: bool) {
        if self.lock != engaged {
            self.calls.push(ActuatorCall::Lock(engaged));
        }
        self.lock = engaged;
    }

    fn is_lock_engaged(&self) -> bool {
        self.lock
    }

    fn sound(&mut self, mode: SounderMode) {
        self.calls.push(ActuatorCall::Sound(mode));
        self.sounder = match mode {
            SounderMode::Chirp => self.sounder,
            other => other,
        };
    }

    fn safe_state(&mut self) {
        self.calls.push(ActuatorCall::SafeState);
        self.lights = [false; Light::COUNT];
        self.lock = true;
        self.sounder = SounderMode::Silent;
    }
}

// ── MockTransport ─────────────────────────────────────────────

/// In-memory host link: tests inject inbound lines and read back
/// everything the controller wrote.
#[derive(Default)]
pub struct MockTransport {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn inject(&mut self, line: &str) {
        self.rx.extend(line.as_bytes());
        self.rx.push_back(b'\n');
    }

    pub fn inject_raw(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Every complete line written so far.
    pub fn sent_lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.tx)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    pub fn clear_sent(&mut self) {
        self.tx.clear();
    }
}

impl Transport for MockTransport {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig: controller + mocks + simulated clock ─────────────────

pub struct Rig {
    pub ctl: SequenceController<MockPanel, MockTransport>,
    pub sensors: Sensors,
    pub sink: RecordingSink,
    pub now_ms: u64,
    pub tick_ms: u64,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(AirlockConfig::default())
    }

    pub fn with_config(config: AirlockConfig) -> Self {
        let tick_ms = u64::from(config.tick_interval_ms);
        let (panel, sensors) = MockPanel::new();
        let mut ctl = SequenceController::new(config, panel, MockTransport::default());
        let mut sink = RecordingSink::default();
        ctl.initialize(0, &mut sink);
        Self {
            ctl,
            sensors,
            sink,
            now_ms: 0,
            tick_ms,
        }
    }

    /// Advance the clock one tick and run one cycle.
    pub fn step(&mut self) {
        self.now_ms += self.tick_ms;
        self.ctl.step(self.now_ms, &mut self.sink);
    }

    pub fn steps(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Press the override button for one cycle, then release it.
    pub fn press(&mut self) {
        self.sensors.button.set(true);
        self.step();
        self.sensors.button.set(false);
        self.step();
    }

    pub fn host_says(&mut self, line: &str) {
        self.ctl.link_mut().transport_mut().inject(line);
    }

    pub fn sent(&self) -> Vec<String> {
        self.ctl.link().transport().sent_lines()
    }

    /// Outbound protocol tokens, excluding telemetry lines.
    pub fn sent_tokens(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|l| !is_telemetry(l))
            .collect()
    }

    pub fn telemetry(&self) -> Vec<String> {
        self.sent().into_iter().filter(|l| is_telemetry(l)).collect()
    }

    pub fn lock_engaged(&self) -> bool {
        self.ctl.hw().is_lock_engaged()
    }

    pub fn light(&self, light: Light) -> bool {
        self.ctl.hw().is_light_on(light)
    }
}

fn is_telemetry(line: &str) -> bool {
    line.len() == 10 && line.bytes().all(|b| b == b'0' || b == b'1')
}
