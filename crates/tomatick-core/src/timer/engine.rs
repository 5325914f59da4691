//! Timer state machine.
//!
//! The engine is caller-driven: no internal threads, one `tick()` call per
//! elapsed second. [`TimerService`](super::TimerService) owns the real
//! one-second ticker; tests drive `tick()` directly.
//!
//! ## State transitions
//!
//! ```text
//! (Focus, paused) -> start -> (Focus, running) -> tick*n -> completion
//!       ^                                                       |
//!       +--------- auto-switch to the next mode, stopped -------+
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::stats::TimerStats;
use crate::storage::{TimerConfig, MAX_MINUTES, MIN_MINUTES};

/// Focus sessions per cycle; completing the last one earns a long break.
const POMODOROS_PER_CYCLE: u64 = 4;

/// Which configured duration the countdown runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

/// Live countdown state.
///
/// Never persisted: a new process starts a fresh focus countdown while
/// statistics carry over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub mode: Mode,
    pub running: bool,
    pub seconds_remaining: u64,
    pub seconds_total: u64,
    /// Counts focus-and-break intervals, starting at 1. Bumped only when a
    /// focus completion transitions to a break, never on break completion.
    pub session_index: u32,
}

/// Where the current session sits within the 4-pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePosition {
    pub cycle: u32,
    pub position: u32,
}

/// Full read surface for a UI collaborator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub run: RunState,
    pub config: TimerConfig,
    pub stats: TimerStats,
    pub progress: f64,
    pub display_time: String,
    pub session_label: String,
    pub total_focus_display: String,
}

/// Core timer state machine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    run: RunState,
    stats: TimerStats,
}

impl TimerEngine {
    /// Create an engine holding the given configuration and (already
    /// day-reconciled) statistics, on a stopped focus countdown.
    pub fn new(config: TimerConfig, stats: TimerStats) -> Self {
        let seconds = config.seconds_for(Mode::Focus);
        Self {
            config,
            run: RunState {
                mode: Mode::Focus,
                running: false,
                seconds_remaining: seconds,
                seconds_total: seconds,
                session_index: 1,
            },
            stats,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn stats(&self) -> &TimerStats {
        &self.stats
    }

    pub fn is_running(&self) -> bool {
        self.run.running
    }

    /// 0.0 .. 1.0 progress through the current countdown.
    pub fn progress(&self) -> f64 {
        if self.run.seconds_total == 0 {
            return 0.0;
        }
        let elapsed = self.run.seconds_total - self.run.seconds_remaining;
        (elapsed as f64 / self.run.seconds_total as f64).clamp(0.0, 1.0)
    }

    /// Zero-padded `mm:ss` for the current countdown.
    pub fn display_time(&self) -> String {
        let mins = self.run.seconds_remaining / 60;
        let secs = self.run.seconds_remaining % 60;
        format!("{mins:02}:{secs:02}")
    }

    /// Cycle/position derivation consumed by the session header.
    pub fn cycle_position(&self) -> CyclePosition {
        let completed_pairs = (self.run.session_index - 1) / 2;
        CyclePosition {
            cycle: completed_pairs / 4 + 1,
            position: completed_pairs % 4 + 1,
        }
    }

    /// Header label the view renders above the countdown.
    pub fn session_label(&self) -> String {
        let pos = self.cycle_position();
        match self.run.mode {
            Mode::Focus => format!("Pomodoro {} - Cycle {}", pos.position, pos.cycle),
            Mode::ShortBreak => format!("Short Break - Cycle {}", pos.cycle),
            Mode::LongBreak => format!("Long Break - Cycle {}", pos.cycle),
        }
    }

    /// Build the full state snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            run: self.run.clone(),
            config: self.config.clone(),
            stats: self.stats.clone(),
            progress: self.progress(),
            display_time: self.display_time(),
            session_label: self.session_label(),
            total_focus_display: self.stats.focus_time_display(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the countdown. A no-op when already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.run.running {
            return None;
        }
        self.run.running = true;
        Some(Event::Started {
            mode: self.run.mode,
            seconds_remaining: self.run.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Stop the countdown in place. Idempotent when already paused.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.run.running {
            return None;
        }
        self.run.running = false;
        Some(Event::Paused {
            mode: self.run.mode,
            seconds_remaining: self.run.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Stop and reload the current mode's full duration. `session_index`
    /// and statistics are untouched.
    pub fn reset(&mut self) -> Event {
        self.run.running = false;
        self.load_duration(self.run.mode);
        Event::Reset {
            mode: self.run.mode,
            seconds_total: self.run.seconds_total,
            at: Utc::now(),
        }
    }

    /// Stop and move to `target` with a freshly loaded countdown. Allowed
    /// at any time, including mid-run.
    pub fn switch_mode(&mut self, target: Mode) -> Event {
        self.run.running = false;
        self.run.mode = target;
        self.load_duration(target);
        Event::ModeChanged {
            mode: target,
            seconds_total: self.run.seconds_total,
            at: Utc::now(),
        }
    }

    /// Nudge the configured duration for `mode` by `delta_minutes`,
    /// clamped to `[MIN_MINUTES, MAX_MINUTES]`. A no-op while running.
    /// When `mode` is the selected mode the live countdown resizes too.
    pub fn adjust_duration(&mut self, mode: Mode, delta_minutes: i32) -> Option<Event> {
        if self.run.running {
            return None;
        }
        let current = self.config.minutes_for(mode) as i32;
        let minutes =
            (current + delta_minutes).clamp(MIN_MINUTES as i32, MAX_MINUTES as i32) as u32;
        self.config.set_minutes(mode, minutes);
        if mode == self.run.mode {
            self.load_duration(mode);
        }
        Some(Event::DurationAdjusted {
            mode,
            minutes,
            at: Utc::now(),
        })
    }

    /// Full configuration overwrite from the settings panel. The live
    /// countdown is not resized; new durations apply from the next
    /// reset/switch/completion.
    pub fn replace_config(&mut self, config: TimerConfig) -> Event {
        self.config = config;
        Event::ConfigReplaced { at: Utc::now() }
    }

    /// Advance the countdown by one second. A no-op unless running.
    ///
    /// Returns the completion event when this tick crossed zero; by then
    /// the auto-switch has already happened and the engine sits stopped on
    /// the next mode's freshly loaded countdown.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.run.running {
            return None;
        }
        self.run.seconds_remaining = self.run.seconds_remaining.saturating_sub(1);
        if self.run.seconds_remaining > 0 {
            return None;
        }
        Some(self.complete())
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Fires exactly once per zero-crossing; `tick` guarantees the engine
    /// was running when it got here.
    fn complete(&mut self) -> Event {
        self.run.running = false;
        if self.run.mode == Mode::Focus {
            let focus_seconds = self.config.seconds_for(Mode::Focus);
            self.stats
                .record_focus_completion(focus_seconds, chrono::Local::now().date_naive());
            self.run.session_index += 1;
            let next = if self.stats.completed_pomodoros % POMODOROS_PER_CYCLE == 0 {
                Mode::LongBreak
            } else {
                Mode::ShortBreak
            };
            let event = Event::FocusCompleted {
                completed_pomodoros: self.stats.completed_pomodoros,
                current_streak: self.stats.current_streak,
                next_mode: next,
                at: Utc::now(),
            };
            self.switch_mode(next);
            event
        } else {
            let from = self.run.mode;
            self.switch_mode(Mode::Focus);
            Event::BreakCompleted {
                from,
                at: Utc::now(),
            }
        }
    }

    fn load_duration(&mut self, mode: Mode) {
        let seconds = self.config.seconds_for(mode);
        self.run.seconds_total = seconds;
        self.run.seconds_remaining = seconds;
    }
}
