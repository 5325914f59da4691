//! Cumulative usage statistics and the daily-streak rollover policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// All-time usage counters.
///
/// Persisted as the `stats` record; field names match the original
/// localStorage layout (`completedPomodoros`, `totalFocusTime`,
/// `currentStreak`, `lastUsed`). Everything except `current_streak` is
/// monotonically non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStats {
    #[serde(default)]
    pub completed_pomodoros: u64,
    /// Accumulated focus time in seconds.
    #[serde(default)]
    pub total_focus_time: u64,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default = "today")]
    pub last_used: NaiveDate,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl Default for TimerStats {
    fn default() -> Self {
        Self {
            completed_pomodoros: 0,
            total_focus_time: 0,
            current_streak: 0,
            last_used: today(),
        }
    }
}

impl TimerStats {
    /// Apply the day-rollover policy, once, at load time.
    ///
    /// The streak breaks only when a full calendar day was skipped. A fresh
    /// day by itself neither increments nor resets it; only a completed
    /// focus session moves it. A session spanning midnight is not
    /// re-checked until the next load.
    pub fn reconcile_day(&mut self, today: NaiveDate) {
        let days_since = (today - self.last_used).num_days();
        if days_since > 1 {
            self.current_streak = 0;
            self.last_used = today;
        } else if days_since == 1 {
            self.last_used = today;
        }
    }

    /// Record one completed focus session of `focus_seconds`.
    pub fn record_focus_completion(&mut self, focus_seconds: u64, today: NaiveDate) {
        self.completed_pomodoros += 1;
        self.total_focus_time += focus_seconds;
        self.current_streak += 1;
        self.last_used = today;
    }

    /// Total focus time as `"Xh Ym"`, the way the stats panel renders it.
    pub fn focus_time_display(&self) -> String {
        let hours = self.total_focus_time / 3600;
        let minutes = (self.total_focus_time % 3600) / 60;
        format!("{hours}h {minutes}m")
    }
}
