//! Airlock bench emulator — Main Entry Point
//!
//! Runs the sequence controller against simulated panel pins while the
//! host link goes over a real serial port, so the identity-verification
//! host can be exercised without the door hardware.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  SimPanel            LogEventSink   SerialTransport  Clock   │
//! │  (Sensor+Actuator)   (EventSink)    (Transport)              │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ────────────────       │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │        SequenceController (pure logic)               │    │
//! │  │  FSM · AlarmSupervisor · Telemetry                   │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! │                                                              │
//! │  stdin thread ──▶ bench commands ──▶ simulated sensor lines  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use airlock::adapters::log_sink::LogEventSink;
use airlock::adapters::serial::SerialTransport;
use airlock::adapters::sim::{SimSensors, sim_panel};
use airlock::adapters::time::MonotonicClock;
use airlock::app::service::SequenceController;
use airlock::config::AirlockConfig;

// ── CLI ───────────────────────────────────────────────────────

/// Two-door airlock sequencer running on simulated panel hardware.
#[derive(Debug, Parser)]
#[command(name = "airlock", version, about)]
struct Cli {
    /// Serial device connected to the host (e.g. /dev/ttyUSB0, COM3).
    #[arg(long)]
    port: String,

    /// Serial baud rate.
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Control loop interval in milliseconds (1..=100).
    #[arg(long)]
    tick_ms: Option<u32>,

    /// Start disarmed and wait for the host's `SystemStart`.
    #[arg(long)]
    await_start: bool,
}

// ── Bench commands ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BenchCommand {
    /// Press and release the override button.
    Press,
    Door { closed: bool },
    Motion { active: bool },
    Status,
    Quit,
}

impl BenchCommand {
    fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let cmd = match (words.next()?, words.next()) {
            ("press", None) => Self::Press,
            ("door", Some("open")) => Self::Door { closed: false },
            ("door", Some("close")) => Self::Door { closed: true },
            ("motion", Some("on")) => Self::Motion { active: true },
            ("motion", Some("off")) => Self::Motion { active: false },
            ("status", None) => Self::Status,
            ("quit" | "exit", None) => Self::Quit,
            _ => return None,
        };
        words.next().is_none().then_some(cmd)
    }
}

/// Forward stdin lines as bench commands until EOF.
fn spawn_stdin_reader(tx: mpsc::Sender<BenchCommand>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match BenchCommand::parse(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => warn!(
                    "unknown command {:?} (press | door open|close | motion on|off | status | quit)",
                    line.trim()
                ),
            }
        }
    });
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── 1. Logging (log records are bridged into tracing) ─────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("airlock bench v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let mut config = AirlockConfig::default();
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    config.await_system_start = cli.await_start;
    config.validate().context("invalid configuration")?;
    match serde_json::to_string(&config) {
        Ok(json) => info!("config: {json}"),
        Err(e) => warn!("config not serialisable: {e}"),
    }

    // ── 3. Host link ──────────────────────────────────────────
    let port = serialport::new(&cli.port, cli.baud)
        .timeout(Duration::from_millis(1))
        .open()
        .with_context(|| format!("failed to open serial port {}", cli.port))?;
    let transport = SerialTransport::new(port);
    info!("host link on {} @ {} baud", cli.port, cli.baud);

    // ── 4. Panel + controller ─────────────────────────────────
    let (panel, sensors) = sim_panel(&config);
    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));
    let mut controller = SequenceController::new(config, panel, transport);
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx);

    controller.initialize(clock.now_ms(), &mut sink);
    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    let mut release_button = false;
    loop {
        if release_button {
            sensors.set_button_held(false);
            release_button = false;
        }

        while let Ok(cmd) = rx.try_recv() {
            match cmd {
                BenchCommand::Quit => {
                    info!("bench shutting down");
                    return Ok(());
                }
                BenchCommand::Status => info!(
                    "state={} emergency={} vector={}",
                    controller.state_name(),
                    controller.is_emergency(),
                    controller.observe()
                ),
                other => release_button |= apply(other, &sensors),
            }
        }

        controller.step(clock.now_ms(), &mut sink);
        thread::sleep(tick);
    }
}

/// Drive the simulated sensor lines.  Returns `true` if the button must
/// be released on the next cycle.
fn apply(cmd: BenchCommand, sensors: &SimSensors) -> bool {
    match cmd {
        BenchCommand::Press => {
            sensors.set_button_held(true);
            return true;
        }
        BenchCommand::Door { closed } => sensors.set_door_closed(closed),
        BenchCommand::Motion { active } => sensors.set_motion(active),
        BenchCommand::Status | BenchCommand::Quit => {}
    }
    false
}
