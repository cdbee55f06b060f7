//! Timer engine for the pomo daemon.
//!
//! This module wraps the countdown clock with mode control:
//! - Fixed mode transitions on expiry (no auto-start of the next countdown)
//! - Wholesale settings replacement with conditional clock reset
//! - A tick generation guard that drops stale periodic ticks
//! - Event firing for notifications and sounds

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::types::{Countdown, Mode, Tick, TimerConfig};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for notifications and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown started (or resumed)
    Started {
        /// Mode the countdown belongs to
        mode: Mode,
        /// Remaining seconds at start
        remaining_seconds: u32,
    },
    /// The countdown was paused
    Paused {
        /// Mode the countdown belongs to
        mode: Mode,
        /// Remaining seconds at pause
        remaining_seconds: u32,
    },
    /// The clock was replaced (manual reset, mode change, or settings save)
    Reset {
        /// Mode the fresh countdown belongs to
        mode: Mode,
        /// Remaining seconds after the reset
        remaining_seconds: u32,
    },
    /// A countdown expired and the next mode was entered
    CycleCompleted {
        /// The mode whose countdown completed
        previous: Mode,
        /// The mode that was entered
        next: Mode,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the current mode, the duration settings, and the
/// countdown clock.
///
/// The engine is synchronous; the daemon's ticker task delivers one
/// [`TimerEngine::tick`] per second with the generation it observed when the
/// period began. Every clock replacement bumps the generation, so a tick
/// scheduled against a superseded clock is dropped instead of decrementing
/// the wrong mode's countdown.
pub struct TimerEngine {
    /// Current mode
    mode: Mode,
    /// Per-mode duration settings
    config: TimerConfig,
    /// The countdown clock for the current mode
    clock: Countdown,
    /// Incremented whenever the clock is replaced
    generation: u64,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new TimerEngine in focus mode with a stopped clock.
    pub fn new(config: TimerConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        let config = config.clamped();
        let mode = Mode::default();
        let clock = Countdown::new(config.duration_for(mode));
        Self {
            mode,
            config,
            clock,
            generation: 0,
            event_tx,
        }
    }

    /// Starts (or resumes) the current countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the countdown is already running.
    pub fn start(&mut self) -> Result<()> {
        if self.clock.is_running() {
            anyhow::bail!("Timer is already running");
        }

        self.clock.start();

        self.event_tx
            .send(TimerEvent::Started {
                mode: self.mode,
                remaining_seconds: self.clock.remaining,
            })
            .context("Failed to send started event")?;

        Ok(())
    }

    /// Pauses the current countdown. Idempotent: pausing a clock that is
    /// not running succeeds without emitting an event.
    pub fn pause(&mut self) -> Result<()> {
        if !self.clock.is_running() {
            return Ok(());
        }

        self.clock.pause();

        self.event_tx
            .send(TimerEvent::Paused {
                mode: self.mode,
                remaining_seconds: self.clock.remaining,
            })
            .context("Failed to send paused event")?;

        Ok(())
    }

    /// Resets the countdown to the current mode's configured duration.
    pub fn reset(&mut self) -> Result<()> {
        self.replace_clock(self.config.duration_for(self.mode));
        self.send_reset_event()
    }

    /// Switches to another mode with a fresh, stopped countdown.
    ///
    /// Selecting the mode that is already current leaves the clock
    /// untouched, so a running countdown is not lost to a redundant click.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if mode == self.mode {
            return Ok(());
        }

        self.mode = mode;
        self.replace_clock(self.config.duration_for(mode));
        self.send_reset_event()
    }

    /// Replaces the duration settings wholesale.
    ///
    /// Values are clamped to their per-mode bounds. The clock is reset only
    /// when the current mode's duration actually changed; otherwise a
    /// running countdown keeps going and other modes pick up their new
    /// durations on next entry.
    pub fn save_config(&mut self, config: TimerConfig) -> Result<()> {
        let config = config.clamped();
        let changed = config.duration_for(self.mode) != self.config.duration_for(self.mode);
        self.config = config;

        if changed {
            self.replace_clock(self.config.duration_for(self.mode));
            self.send_reset_event()?;
        }

        Ok(())
    }

    /// Advances the clock by one second.
    ///
    /// A tick whose generation does not match the current clock is stale
    /// (its period began before a reset or mode change) and is silently
    /// dropped. When the countdown expires, the engine enters the next mode
    /// and emits a cycle-completed event; the new countdown is not started.
    pub fn tick(&mut self, generation: u64) -> Result<()> {
        if generation != self.generation {
            tracing::trace!(
                stale = generation,
                current = self.generation,
                "Dropping stale tick"
            );
            return Ok(());
        }

        match self.clock.tick() {
            Tick::Idle | Tick::Counting => Ok(()),
            Tick::Expired => self.complete_cycle(),
        }
    }

    /// Handles countdown expiry: applies the fixed mode transition and
    /// notifies observers. The user starts the next countdown manually.
    fn complete_cycle(&mut self) -> Result<()> {
        let previous = self.mode;
        let next = previous.next();

        self.mode = next;
        self.replace_clock(self.config.duration_for(next));

        self.event_tx
            .send(TimerEvent::CycleCompleted { previous, next })
            .context("Failed to send cycle completed event")?;

        Ok(())
    }

    /// Installs a fresh, stopped clock and invalidates in-flight ticks.
    fn replace_clock(&mut self, remaining: u32) {
        self.clock.reset(remaining);
        self.generation += 1;
    }

    fn send_reset_event(&mut self) -> Result<()> {
        self.event_tx
            .send(TimerEvent::Reset {
                mode: self.mode,
                remaining_seconds: self.clock.remaining,
            })
            .context("Failed to send reset event")?;
        Ok(())
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the current duration settings.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns a reference to the countdown clock.
    pub fn clock(&self) -> &Countdown {
        &self.clock
    }

    /// Returns the current clock generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns a mutable reference to the clock (for testing).
    #[cfg(test)]
    pub fn clock_mut(&mut self) -> &mut Countdown {
        &mut self.clock
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_engine() -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>) {
        create_engine_with_config(TimerConfig::default())
    }

    fn create_engine_with_config(
        config: TimerConfig,
    ) -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = TimerEngine::new(config, tx);
        (engine, rx)
    }

    fn collect_events(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Drives the engine with current-generation ticks, the way the daemon's
    /// ticker does when nothing intervenes.
    fn run_ticks(engine: &mut TimerEngine, count: u32) {
        for _ in 0..count {
            let generation = engine.generation();
            engine.tick(generation).unwrap();
        }
    }

    // ------------------------------------------------------------------------
    // TimerEvent Tests
    // ------------------------------------------------------------------------

    mod timer_event_tests {
        use super::*;

        #[test]
        fn test_started_event() {
            let event = TimerEvent::Started {
                mode: Mode::Focus,
                remaining_seconds: 1500,
            };
            assert_eq!(
                event,
                TimerEvent::Started {
                    mode: Mode::Focus,
                    remaining_seconds: 1500
                }
            );
        }

        #[test]
        fn test_cycle_completed_event() {
            let event = TimerEvent::CycleCompleted {
                previous: Mode::Focus,
                next: Mode::ShortBreak,
            };
            assert_eq!(
                event,
                TimerEvent::CycleCompleted {
                    previous: Mode::Focus,
                    next: Mode::ShortBreak
                }
            );
        }

        #[test]
        fn test_event_clone() {
            let event = TimerEvent::Reset {
                mode: Mode::LongBreak,
                remaining_seconds: 900,
            };
            let cloned = event.clone();
            assert_eq!(event, cloned);
        }

        #[test]
        fn test_event_debug() {
            let event = TimerEvent::Paused {
                mode: Mode::Focus,
                remaining_seconds: 10,
            };
            let debug_str = format!("{:?}", event);
            assert!(debug_str.contains("Paused"));
        }
    }

    // ------------------------------------------------------------------------
    // TimerEngine Tests
    // ------------------------------------------------------------------------

    mod timer_engine_tests {
        use super::*;

        #[test]
        fn test_new_engine() {
            let (engine, _rx) = create_engine();

            assert_eq!(engine.mode(), Mode::Focus);
            assert_eq!(engine.clock().remaining, 1500);
            assert!(!engine.clock().is_running());
            assert_eq!(engine.generation(), 0);
        }

        #[test]
        fn test_new_engine_clamps_config() {
            let config = TimerConfig::default().with_focus_seconds(7200);
            let (engine, _rx) = create_engine_with_config(config);

            assert_eq!(engine.config().focus_seconds, 3600);
            assert_eq!(engine.clock().remaining, 3600);
        }

        #[test]
        fn test_start() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();

            assert!(engine.clock().is_running());
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Started {
                    mode: Mode::Focus,
                    remaining_seconds: 1500
                }
            );
        }

        #[test]
        fn test_start_already_running() {
            let (mut engine, _rx) = create_engine();

            engine.start().unwrap();
            let result = engine.start();

            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("already running"));
        }

        #[test]
        fn test_start_resumes_partial_countdown() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            run_ticks(&mut engine, 100);
            engine.pause().unwrap();
            let _ = collect_events(&mut rx);

            engine.start().unwrap();

            assert!(engine.clock().is_running());
            assert_eq!(engine.clock().remaining, 1400);
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Started {
                    mode: Mode::Focus,
                    remaining_seconds: 1400
                }
            );
        }

        #[test]
        fn test_pause() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            let _ = rx.try_recv(); // consume Started

            engine.pause().unwrap();

            assert!(!engine.clock().is_running());
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Paused {
                    mode: Mode::Focus,
                    remaining_seconds: 1500
                }
            );
        }

        #[test]
        fn test_pause_when_not_running_is_noop() {
            let (mut engine, mut rx) = create_engine();

            engine.pause().unwrap();

            assert!(!engine.clock().is_running());
            assert_eq!(engine.clock().remaining, 1500);
            assert!(rx.try_recv().is_err(), "no event for a redundant pause");
        }

        #[test]
        fn test_pause_twice_is_equivalent_to_once() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            let _ = rx.try_recv();

            engine.pause().unwrap();
            engine.pause().unwrap();

            let events = collect_events(&mut rx);
            assert_eq!(
                events,
                vec![TimerEvent::Paused {
                    mode: Mode::Focus,
                    remaining_seconds: 1500
                }]
            );
        }

        #[test]
        fn test_pause_preserves_remaining_time() {
            let (mut engine, _rx) = create_engine();

            engine.start().unwrap();
            run_ticks(&mut engine, 500);
            engine.pause().unwrap();

            assert_eq!(engine.clock().remaining, 1000);
        }

        #[test]
        fn test_reset_restores_configured_duration() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            run_ticks(&mut engine, 42);
            let _ = collect_events(&mut rx);

            engine.reset().unwrap();

            assert_eq!(engine.clock().remaining, 1500);
            assert!(!engine.clock().is_running());
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Reset {
                    mode: Mode::Focus,
                    remaining_seconds: 1500
                }
            );
        }

        #[test]
        fn test_reset_bumps_generation() {
            let (mut engine, _rx) = create_engine();

            let before = engine.generation();
            engine.reset().unwrap();

            assert_eq!(engine.generation(), before + 1);
        }

        #[test]
        fn test_set_mode_switches_and_resets() {
            let (mut engine, mut rx) = create_engine();

            engine.set_mode(Mode::ShortBreak).unwrap();

            assert_eq!(engine.mode(), Mode::ShortBreak);
            assert_eq!(engine.clock().remaining, 300);
            assert!(!engine.clock().is_running());
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Reset {
                    mode: Mode::ShortBreak,
                    remaining_seconds: 300
                }
            );
        }

        #[test]
        fn test_set_mode_same_mode_is_noop() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            run_ticks(&mut engine, 5);
            let _ = collect_events(&mut rx);
            let generation = engine.generation();

            engine.set_mode(Mode::Focus).unwrap();

            assert!(engine.clock().is_running());
            assert_eq!(engine.clock().remaining, 1495);
            assert_eq!(engine.generation(), generation);
            assert!(rx.try_recv().is_err());
        }

        #[test]
        fn test_set_mode_before_expiry_fires_no_cycle_event() {
            let (mut engine, mut rx) = create_engine();

            engine.set_mode(Mode::ShortBreak).unwrap();
            engine.clock_mut().remaining = 10;
            engine.start().unwrap();
            let _ = collect_events(&mut rx);

            engine.set_mode(Mode::Focus).unwrap();

            assert_eq!(engine.mode(), Mode::Focus);
            assert_eq!(engine.clock().remaining, 1500);
            assert!(!engine.clock().is_running());

            let events = collect_events(&mut rx);
            assert!(events
                .iter()
                .all(|e| !matches!(e, TimerEvent::CycleCompleted { .. })));
        }

        #[test]
        fn test_save_config_changed_current_mode_resets() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            run_ticks(&mut engine, 10);
            let _ = collect_events(&mut rx);

            let config = TimerConfig::default().with_focus_seconds(1800);
            engine.save_config(config).unwrap();

            assert_eq!(engine.clock().remaining, 1800);
            assert!(!engine.clock().is_running());
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Reset {
                    mode: Mode::Focus,
                    remaining_seconds: 1800
                }
            );
        }

        #[test]
        fn test_save_config_unchanged_current_mode_keeps_clock_running() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            run_ticks(&mut engine, 3);
            let _ = collect_events(&mut rx);

            let config = TimerConfig::default().with_short_break_seconds(600);
            engine.save_config(config).unwrap();

            assert!(engine.clock().is_running());
            assert_eq!(engine.clock().remaining, 1497);
            assert_eq!(engine.config().short_break_seconds, 600);
            assert!(rx.try_recv().is_err(), "no reset when duration unchanged");
        }

        #[test]
        fn test_save_config_is_wholesale() {
            let (mut engine, _rx) = create_engine();

            let config = TimerConfig {
                focus_seconds: 100,
                short_break_seconds: 20,
                long_break_seconds: 50,
            };
            engine.save_config(config).unwrap();

            assert_eq!(*engine.config(), config);
        }

        #[test]
        fn test_save_config_clamps_out_of_range() {
            let (mut engine, _rx) = create_engine();

            let config = TimerConfig {
                focus_seconds: 7200,
                short_break_seconds: 3600,
                long_break_seconds: 7200,
            };
            engine.save_config(config).unwrap();

            assert_eq!(engine.config().focus_seconds, 3600);
            assert_eq!(engine.config().short_break_seconds, 1800);
            assert_eq!(engine.config().long_break_seconds, 3600);
            assert_eq!(engine.clock().remaining, 3600);
        }

        #[test]
        fn test_save_config_other_mode_takes_effect_on_entry() {
            let (mut engine, _rx) = create_engine();

            let config = TimerConfig::default().with_short_break_seconds(600);
            engine.save_config(config).unwrap();
            engine.set_mode(Mode::ShortBreak).unwrap();

            assert_eq!(engine.clock().remaining, 600);
        }

        #[test]
        fn test_tick_decrements_while_running() {
            let (mut engine, _rx) = create_engine();

            engine.start().unwrap();
            run_ticks(&mut engine, 1);

            assert_eq!(engine.clock().remaining, 1499);
        }

        #[test]
        fn test_tick_while_stopped_is_noop() {
            let (mut engine, mut rx) = create_engine();

            run_ticks(&mut engine, 10);

            assert_eq!(engine.clock().remaining, 1500);
            assert!(collect_events(&mut rx).is_empty());
        }

        #[test]
        fn test_tick_with_stale_generation_is_dropped() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            let stale = engine.generation();
            engine.set_mode(Mode::ShortBreak).unwrap();
            let _ = collect_events(&mut rx);

            engine.tick(stale).unwrap();

            assert_eq!(engine.clock().remaining, 300);
            assert!(collect_events(&mut rx).is_empty());
        }

        #[test]
        fn test_stale_tick_after_reset_is_dropped() {
            let (mut engine, _rx) = create_engine();

            engine.start().unwrap();
            let stale = engine.generation();
            engine.reset().unwrap();
            engine.start().unwrap();

            engine.tick(stale).unwrap();

            assert_eq!(engine.clock().remaining, 1500);
        }
    }

    // ------------------------------------------------------------------------
    // Cycle Transition Tests
    // ------------------------------------------------------------------------

    mod cycle_tests {
        use super::*;

        /// Short configuration so cycles complete in a handful of ticks.
        fn fast_config() -> TimerConfig {
            TimerConfig {
                focus_seconds: 3,
                short_break_seconds: 2,
                long_break_seconds: 4,
            }
        }

        #[test]
        fn test_focus_expiry_enters_short_break() {
            let (mut engine, mut rx) = create_engine_with_config(fast_config());

            engine.start().unwrap();
            let _ = collect_events(&mut rx);
            run_ticks(&mut engine, 3);

            assert_eq!(engine.mode(), Mode::ShortBreak);
            assert_eq!(engine.clock().remaining, 2);
            assert!(!engine.clock().is_running());
            assert_eq!(
                collect_events(&mut rx),
                vec![TimerEvent::CycleCompleted {
                    previous: Mode::Focus,
                    next: Mode::ShortBreak
                }]
            );
        }

        #[test]
        fn test_short_break_expiry_enters_focus() {
            let (mut engine, mut rx) = create_engine_with_config(fast_config());

            engine.set_mode(Mode::ShortBreak).unwrap();
            engine.start().unwrap();
            let _ = collect_events(&mut rx);
            run_ticks(&mut engine, 2);

            assert_eq!(engine.mode(), Mode::Focus);
            assert_eq!(engine.clock().remaining, 3);
            assert_eq!(
                collect_events(&mut rx),
                vec![TimerEvent::CycleCompleted {
                    previous: Mode::ShortBreak,
                    next: Mode::Focus
                }]
            );
        }

        #[test]
        fn test_long_break_expiry_enters_focus_never_short_break() {
            let (mut engine, mut rx) = create_engine_with_config(fast_config());

            engine.set_mode(Mode::LongBreak).unwrap();
            engine.start().unwrap();
            let _ = collect_events(&mut rx);
            run_ticks(&mut engine, 4);

            assert_eq!(engine.mode(), Mode::Focus);
            assert_eq!(
                collect_events(&mut rx),
                vec![TimerEvent::CycleCompleted {
                    previous: Mode::LongBreak,
                    next: Mode::Focus
                }]
            );
        }

        #[test]
        fn test_cycle_does_not_auto_start_next_countdown() {
            let (mut engine, _rx) = create_engine_with_config(fast_config());

            engine.start().unwrap();
            run_ticks(&mut engine, 3);

            assert!(!engine.clock().is_running());

            // Ticks after the transition leave the fresh countdown alone.
            run_ticks(&mut engine, 5);
            assert_eq!(engine.clock().remaining, 2);
        }

        #[test]
        fn test_expiry_emits_exactly_one_cycle_event() {
            let (mut engine, mut rx) = create_engine_with_config(fast_config());

            engine.start().unwrap();
            let _ = collect_events(&mut rx);
            run_ticks(&mut engine, 10);

            let cycle_events = collect_events(&mut rx)
                .into_iter()
                .filter(|e| matches!(e, TimerEvent::CycleCompleted { .. }))
                .count();
            assert_eq!(cycle_events, 1);
        }

        #[test]
        fn test_repeated_expiries_alternate_focus_and_short_break() {
            let (mut engine, mut rx) = create_engine_with_config(fast_config());

            let mut transitions = Vec::new();
            for _ in 0..4 {
                engine.start().unwrap();
                let remaining = engine.clock().remaining;
                run_ticks(&mut engine, remaining);
                for event in collect_events(&mut rx) {
                    if let TimerEvent::CycleCompleted { previous, next } = event {
                        transitions.push((previous, next));
                    }
                }
            }

            assert_eq!(
                transitions,
                vec![
                    (Mode::Focus, Mode::ShortBreak),
                    (Mode::ShortBreak, Mode::Focus),
                    (Mode::Focus, Mode::ShortBreak),
                    (Mode::ShortBreak, Mode::Focus),
                ]
            );
        }

        #[test]
        fn test_zero_duration_expires_on_first_tick() {
            let (mut engine, mut rx) = create_engine();

            engine
                .save_config(TimerConfig::default().with_focus_seconds(0))
                .unwrap();
            engine.start().unwrap();
            let _ = collect_events(&mut rx);

            run_ticks(&mut engine, 1);

            assert_eq!(engine.mode(), Mode::ShortBreak);
            assert_eq!(
                collect_events(&mut rx),
                vec![TimerEvent::CycleCompleted {
                    previous: Mode::Focus,
                    next: Mode::ShortBreak
                }]
            );
        }

        #[test]
        fn test_full_default_focus_session() {
            let (mut engine, mut rx) = create_engine();

            engine.start().unwrap();
            let _ = collect_events(&mut rx);

            run_ticks(&mut engine, 1500);

            assert_eq!(engine.mode(), Mode::ShortBreak);
            assert_eq!(engine.clock().remaining, 300);
            assert!(!engine.clock().is_running());
            assert_eq!(
                collect_events(&mut rx),
                vec![TimerEvent::CycleCompleted {
                    previous: Mode::Focus,
                    next: Mode::ShortBreak
                }]
            );
        }
    }
}
