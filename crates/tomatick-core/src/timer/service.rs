//! Ticker ownership and the async boundary around the engine.
//!
//! [`TimerService`] holds the single cancelable ticker task. Every
//! state-changing operation aborts a pending tick before mutating, so a
//! countdown the caller believes is stopped can never keep decrementing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::events::Event;
use crate::storage::{Store, TimerConfig};
use crate::timer::{Mode, Snapshot, TimerEngine};

const TICK: Duration = Duration::from_secs(1);
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Async wrapper owning the engine, the ticker handle, persistence, and
/// the event channel collaborators subscribe to.
#[derive(Clone)]
pub struct TimerService {
    engine: Arc<Mutex<TimerEngine>>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    store: Store,
    events: broadcast::Sender<Event>,
}

impl TimerService {
    /// Load configuration and statistics from the store (defaults when
    /// missing or malformed), apply the day-rollover policy, and build a
    /// fresh engine on a stopped focus countdown.
    pub fn new(store: Store) -> Self {
        let config = store.load_config();
        let mut stats = store.load_stats();
        stats.reconcile_day(chrono::Local::now().date_naive());
        if let Err(err) = store.save_stats(&stats) {
            tracing::warn!("failed to persist stats: {err}");
        }
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            engine: Arc::new(Mutex::new(TimerEngine::new(config, stats))),
            ticker: Arc::new(Mutex::new(None)),
            store,
            events,
        }
    }

    /// Subscribe to engine events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.engine.lock().await.snapshot()
    }

    /// Begin the countdown and the one-second ticker. A no-op when already
    /// running; at most one ticker task exists at any time.
    pub async fn start(&self) {
        let event = self.engine.lock().await.start();
        let Some(event) = event else { return };
        self.spawn_ticker().await;
        self.emit(event);
    }

    /// Cancel the pending tick and stop in place.
    pub async fn pause(&self) {
        self.cancel_ticker().await;
        if let Some(event) = self.engine.lock().await.pause() {
            self.emit(event);
        }
    }

    /// Cancel the pending tick and reload the current mode's duration.
    pub async fn reset(&self) {
        self.cancel_ticker().await;
        let event = self.engine.lock().await.reset();
        self.emit(event);
    }

    /// Cancel the pending tick and move to `target`.
    pub async fn switch_mode(&self, target: Mode) {
        self.cancel_ticker().await;
        let event = self.engine.lock().await.switch_mode(target);
        self.emit(event);
    }

    /// Nudge a configured duration; rewrites the config record on effect.
    pub async fn adjust_duration(&self, mode: Mode, delta_minutes: i32) {
        let (event, config) = {
            let mut engine = self.engine.lock().await;
            let event = engine.adjust_duration(mode, delta_minutes);
            (event, engine.config().clone())
        };
        let Some(event) = event else { return };
        self.persist_config(&config);
        self.emit(event);
    }

    /// Full configuration overwrite; rewrites the config record.
    pub async fn replace_config(&self, config: TimerConfig) {
        let event = self.engine.lock().await.replace_config(config.clone());
        self.persist_config(&config);
        self.emit(event);
    }

    /// Cancel any pending tick. Called on process teardown.
    pub async fn shutdown(&self) {
        self.cancel_ticker().await;
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn spawn_ticker(&self) {
        let mut guard = self.ticker.lock().await;
        // Cancel-before-replace: a stale ticker must never outlive a new one.
        if let Some(handle) = guard.take() {
            handle.abort();
        }

        let engine = Arc::clone(&self.engine);
        let store = self.store.clone();
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;
                let (completion, tick_event, stats) = {
                    let mut engine = engine.lock().await;
                    if !engine.is_running() {
                        break;
                    }
                    let completion = engine.tick();
                    let run = engine.run_state();
                    let tick_event = Event::Tick {
                        mode: run.mode,
                        seconds_remaining: run.seconds_remaining,
                        seconds_total: run.seconds_total,
                        sound_enabled: engine.config().sound_enabled,
                        at: chrono::Utc::now(),
                    };
                    (completion, tick_event, engine.stats().clone())
                };
                match completion {
                    Some(event) => {
                        if matches!(event, Event::FocusCompleted { .. }) {
                            if let Err(err) = store.save_stats(&stats) {
                                tracing::warn!("failed to persist stats: {err}");
                            }
                        }
                        let _ = events.send(event);
                        break;
                    }
                    None => {
                        let _ = events.send(tick_event);
                    }
                }
            }
            tracing::debug!("ticker stopped");
        });

        *guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }

    fn persist_config(&self, config: &TimerConfig) {
        if let Err(err) = self.store.save_config(config) {
            tracing::warn!("failed to persist config: {err}");
        }
    }

    fn emit(&self, event: Event) {
        let _ = self.events.send(event);
    }
}
