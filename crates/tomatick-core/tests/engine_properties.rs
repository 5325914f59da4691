//! End-to-end properties of the countdown state machine.

use proptest::prelude::*;

use tomatick_core::stats::TimerStats;
use tomatick_core::storage::TimerConfig;
use tomatick_core::timer::{Mode, TimerEngine};
use tomatick_core::Event;

const MODES: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

fn engine() -> TimerEngine {
    TimerEngine::new(TimerConfig::default(), TimerStats::default())
}

#[test]
fn switch_and_reset_load_configured_durations() {
    let mut engine = engine();
    for mode in MODES {
        engine.switch_mode(mode);
        let expected = u64::from(engine.config().minutes_for(mode)) * 60;
        assert_eq!(engine.run_state().seconds_total, expected);
        assert_eq!(engine.run_state().seconds_remaining, expected);

        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(engine.run_state().seconds_remaining, expected);
    }
}

#[test]
fn a_full_focus_run_takes_exactly_1500_ticks() {
    let mut engine = engine();
    engine.start();
    for _ in 0..1499 {
        assert!(engine.tick().is_none());
    }
    let completion = engine.tick();
    assert!(matches!(completion, Some(Event::FocusCompleted { .. })));

    let stats = engine.stats();
    assert_eq!(stats.completed_pomodoros, 1);
    assert_eq!(stats.total_focus_time, 1500);
    assert_eq!(stats.current_streak, 1);

    let run = engine.run_state();
    assert_eq!(run.mode, Mode::ShortBreak);
    assert!(!run.running);
}

#[test]
fn the_fourth_completion_earns_a_long_break() {
    let mut engine = engine();
    for n in 1..=4u64 {
        engine.switch_mode(Mode::Focus);
        engine.start();
        while engine.tick().is_none() {}
        let expected = if n % 4 == 0 {
            Mode::LongBreak
        } else {
            Mode::ShortBreak
        };
        assert_eq!(engine.run_state().mode, expected, "after completion {n}");
    }
    assert_eq!(engine.stats().completed_pomodoros, 4);
    assert_eq!(engine.run_state().session_index, 5);
}

#[test]
fn adjust_duration_only_applies_while_stopped() {
    let mut engine = engine();
    engine.start();
    assert!(engine.adjust_duration(Mode::Focus, 5).is_none());
    assert_eq!(engine.config().focus, 25);
    assert_eq!(engine.run_state().seconds_total, 1500);

    engine.pause();
    assert!(engine.adjust_duration(Mode::Focus, 5).is_some());
    assert_eq!(engine.config().focus, 30);
    assert_eq!(engine.run_state().seconds_total, 1800);
    assert_eq!(engine.run_state().seconds_remaining, 1800);
}

#[test]
fn progress_is_monotone_while_running() {
    let mut engine = engine();
    assert_eq!(engine.progress(), 0.0);
    engine.start();
    let mut last = engine.progress();
    loop {
        let completion = engine.tick();
        if completion.is_some() {
            break;
        }
        let progress = engine.progress();
        assert!(progress >= last);
        assert!((0.0..=1.0).contains(&progress));
        last = progress;
    }
    // The final running read before the auto-switch was the full bar.
    assert!((last - (1499.0 / 1500.0)).abs() < 1e-9);
}

#[test]
fn switch_and_reset_leave_the_engine_stopped() {
    let mut engine = engine();

    engine.start();
    engine.switch_mode(Mode::ShortBreak);
    assert!(!engine.run_state().running);
    // A tick scheduled the instant before must land on a stopped engine.
    assert!(engine.tick().is_none());
    assert_eq!(engine.run_state().seconds_remaining, 300);

    engine.start();
    engine.reset();
    assert!(!engine.run_state().running);
    assert!(engine.tick().is_none());
    assert_eq!(engine.run_state().seconds_remaining, 300);
}

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Reset,
    Switch(Mode),
    Adjust(Mode, i32),
    Tick(u16),
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Focus),
        Just(Mode::ShortBreak),
        Just(Mode::LongBreak),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        Just(Op::Pause),
        Just(Op::Reset),
        mode_strategy().prop_map(Op::Switch),
        (mode_strategy(), -90i32..90).prop_map(|(mode, delta)| Op::Adjust(mode, delta)),
        (0u16..2000).prop_map(Op::Tick),
    ]
}

proptest! {
    /// Any operation sequence keeps the countdown inside its bounds.
    #[test]
    fn countdown_never_escapes_its_bounds(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut engine = engine();
        for op in ops {
            match op {
                Op::Start => {
                    engine.start();
                }
                Op::Pause => {
                    engine.pause();
                }
                Op::Reset => {
                    engine.reset();
                }
                Op::Switch(mode) => {
                    engine.switch_mode(mode);
                }
                Op::Adjust(mode, delta) => {
                    engine.adjust_duration(mode, delta);
                }
                Op::Tick(n) => {
                    for _ in 0..n {
                        engine.tick();
                    }
                }
            }
            let run = engine.run_state();
            prop_assert!(run.seconds_remaining <= run.seconds_total);
            prop_assert!(run.seconds_total > 0);
            prop_assert!(run.session_index >= 1);
            let progress = engine.progress();
            prop_assert!((0.0..=1.0).contains(&progress));
        }
    }
}
