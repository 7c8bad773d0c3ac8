//! Sounder mode tracking on top of an [`AlarmSounder`].
//!
//! The continuous modes (`Breach`, `Silent`) are only forwarded when they
//! change, so the alarm branch can request the breach tone every cycle
//! without restarting the tone generator.  `Chirp` is a one-shot and is
//! always forwarded; afterwards the driver reports `Silent`.

use crate::app::ports::AlarmSounder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SounderMode {
    Silent,
    Breach,
    Chirp,
}

pub struct SounderDriver<S> {
    sounder: S,
    mode: SounderMode,
}

impl<S: AlarmSounder> SounderDriver<S> {
    /// Wrap `sounder` and silence it.
    pub fn new(mut sounder: S) -> Self {
        sounder.silence();
        Self {
            sounder,
            mode: SounderMode::Silent,
        }
    }

    pub fn set_mode(&mut self, mode: SounderMode) {
        match mode {
            SounderMode::Chirp => {
                self.sounder.play_chirp();
                self.mode = SounderMode::Silent;
            }
            SounderMode::Breach if self.mode != SounderMode::Breach => {
                self.sounder.play_breach();
                self.mode = SounderMode::Breach;
            }
            SounderMode::Silent if self.mode != SounderMode::Silent => {
                self.sounder.silence();
                self.mode = SounderMode::Silent;
            }
            _ => {}
        }
    }

    /// Silence unconditionally, even if already silent.
    pub fn force_silence(&mut self) {
        self.sounder.silence();
        self.mode = SounderMode::Silent;
    }

    pub fn mode(&self) -> SounderMode {
        self.mode
    }

    pub fn sounder(&self) -> &S {
        &self.sounder
    }
}
