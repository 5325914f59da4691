use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change in the engine produces an Event.
/// Collaborators subscribe to these; the CLI prints them as JSON lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Started {
        mode: Mode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    Paused {
        mode: Mode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    Reset {
        mode: Mode,
        seconds_total: u64,
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: Mode,
        seconds_total: u64,
        at: DateTime<Utc>,
    },
    DurationAdjusted {
        mode: Mode,
        minutes: u32,
        at: DateTime<Utc>,
    },
    ConfigReplaced {
        at: DateTime<Utc>,
    },
    /// One second elapsed on the active countdown. A collaborator watching
    /// these can derive threshold cues by observation, e.g. the countdown
    /// chime at `seconds_remaining == 12` while sound is enabled.
    Tick {
        mode: Mode,
        seconds_remaining: u64,
        seconds_total: u64,
        sound_enabled: bool,
        at: DateTime<Utc>,
    },
    /// A focus session ran to zero. Fired exactly once per zero-crossing;
    /// the engine has already switched to `next_mode`, stopped.
    FocusCompleted {
        completed_pomodoros: u64,
        current_streak: u32,
        next_mode: Mode,
        at: DateTime<Utc>,
    },
    /// A break ran to zero; the engine is back on a stopped focus countdown.
    BreakCompleted {
        from: Mode,
        at: DateTime<Utc>,
    },
}
