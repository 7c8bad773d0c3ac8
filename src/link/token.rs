//! Protocol tokens exchanged with the host.
//!
//! Every token is one line of plain ASCII.  Matching is exact and
//! case-sensitive after whitespace trimming; anything else is ignored.

/// Longest accepted line, excluding the terminator.
pub const MAX_TOKEN_LEN: usize = 64;

/// A trimmed inbound line.
pub type Token = heapless::String<MAX_TOKEN_LEN>;

/// Tokens the host sends to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Arm the sequence from Idle.
    SystemStart,
    /// Identity check passed.
    Authorised,
    /// Clear an active alarm.
    Abort,
}

impl HostCommand {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "SystemStart" => Some(Self::SystemStart),
            "Authorised" => Some(Self::Authorised),
            "Abort" => Some(Self::Abort),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SystemStart => "SystemStart",
            Self::Authorised => "Authorised",
            Self::Abort => "Abort",
        }
    }
}

/// Tokens the controller sends to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Ask the host to run an identity check.
    FacialRecognition,
    /// An alarm has latched.
    AlarmActive,
}

impl Notice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FacialRecognition => "FacialRecognition",
            Self::AlarmActive => "AlarmActive",
        }
    }
}
