//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  The bench binary routes these to stderr through
//! `tracing-subscriber`.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Telemetry(v) => {
                info!(
                    "TELEM | {} | lock={} door={} motion={}",
                    v,
                    if v.lock_engaged { "ENGAGED" } else { "RELEASED" },
                    if v.door_closed { "SHUT" } else { "OPEN" },
                    if v.motion { "YES" } else { "NO" },
                );
            }
            AppEvent::BreachDetected(breach) => {
                error!("BREACH | {breach}");
            }
            AppEvent::AlarmCleared => {
                warn!("ALARM | cleared by host");
            }
        }
    }
}
