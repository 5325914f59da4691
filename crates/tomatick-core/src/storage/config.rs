//! Timer durations and the sound-enabled flag.
//!
//! Persisted as the `config` record in the key-value store; field names
//! match the original localStorage layout (`focus`, `shortBreak`,
//! `longBreak`, `soundEnabled`). The engine trusts whatever it is handed
//! here -- bounds are only enforced where the engine itself derives new
//! values from adjustment deltas.

use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Lower bound for an adjusted duration, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Upper bound for an adjusted duration, in minutes.
pub const MAX_MINUTES: u32 = 60;

/// User-facing timer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    /// Focus duration in minutes.
    #[serde(default = "default_focus")]
    pub focus: u32,
    /// Short break duration in minutes.
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    /// Long break duration in minutes.
    #[serde(default = "default_long_break")]
    pub long_break: u32,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

fn default_focus() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus: default_focus(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            sound_enabled: default_true(),
        }
    }
}

impl TimerConfig {
    /// Configured duration for `mode`, in minutes.
    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    /// Configured duration for `mode`, in seconds.
    pub fn seconds_for(&self, mode: Mode) -> u64 {
        u64::from(self.minutes_for(mode)) * 60
    }

    pub fn set_minutes(&mut self, mode: Mode, minutes: u32) {
        match mode {
            Mode::Focus => self.focus = minutes,
            Mode::ShortBreak => self.short_break = minutes,
            Mode::LongBreak => self.long_break = minutes,
        }
    }
}
