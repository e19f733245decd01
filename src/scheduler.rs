//! Timed key-press event scheduler
//!
//! Produces the fixed-count schedule of simulated presses at the
//! configured cadence. The injected press and its recorded timestamp are
//! kept back-to-back on the same thread; any work between them would show
//! up as systematic skew in the lag results.

use std::thread;

use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::injector::KeyInjector;
use crate::schedule::{epoch_millis, EventRecord, Schedule};

/// Generates a key-press schedule against a configured injector
pub struct EventScheduler<'a, I: KeyInjector> {
    config: &'a SessionConfig,
    injector: I,
}

impl<'a, I: KeyInjector> EventScheduler<'a, I> {
    /// Create a scheduler for one run
    pub fn new(config: &'a SessionConfig, injector: I) -> Self {
        Self { config, injector }
    }

    /// Run the schedule: record the start sentinel, wait the warm-up
    /// delay, then inject `press_count` presses at the configured
    /// interval, timestamping each one.
    ///
    /// Injection failures are logged and the event's timestamp is
    /// recorded anyway; the schedule always runs to completion. Skipping
    /// the record instead would shift every later index and silently
    /// corrupt the correlation downstream.
    pub fn generate(mut self) -> Schedule {
        let count = self.config.press_count;
        let symbol = &self.config.key_symbol;
        let mut records = Vec::with_capacity(count + 1);
        let mut running_state = String::with_capacity(symbol.len() * count);

        records.push(EventRecord {
            index: 0,
            issued_at_ms: epoch_millis(),
            input_state: String::new(),
        });

        thread::sleep(self.config.warmup);

        for i in 1..=count {
            let inject_result = self.injector.inject(symbol);
            let issued_at_ms = epoch_millis();

            if let Err(e) = inject_result {
                warn!(index = i, error = %e, "key injection failed, recording timestamp anyway");
            }

            running_state.push_str(symbol);
            records.push(EventRecord {
                index: i,
                issued_at_ms,
                input_state: running_state.clone(),
            });
            debug!(index = i, issued_at_ms, "key press issued");

            if i < count {
                thread::sleep(self.config.inter_event_interval);
            }
        }

        Schedule::from_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injector::{InjectError, NullInjector};
    use std::time::Duration;

    fn fast_config(press_count: usize) -> SessionConfig {
        SessionConfig {
            press_count,
            warmup: Duration::ZERO,
            inter_event_interval: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Injector that records calls and fails on selected indices
    struct RecordingInjector {
        calls: Vec<String>,
        fail_on: Vec<usize>,
    }

    impl KeyInjector for RecordingInjector {
        fn inject(&mut self, symbol: &str) -> Result<(), InjectError> {
            self.calls.push(symbol.to_string());
            if self.fail_on.contains(&self.calls.len()) {
                return Err(InjectError::Spawn {
                    command: "mock".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock"),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_schedule_has_count_plus_one_records() {
        let config = fast_config(5);
        let schedule = EventScheduler::new(&config, NullInjector).generate();
        assert_eq!(schedule.len(), 6);
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let config = fast_config(8);
        let schedule = EventScheduler::new(&config, NullInjector).generate();
        let timestamps = schedule.timestamps();
        for pair in timestamps.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_cumulative_state_lengths() {
        let config = fast_config(4);
        let schedule = EventScheduler::new(&config, NullInjector).generate();
        for (i, record) in schedule.records().iter().enumerate() {
            assert_eq!(record.index, i);
            assert_eq!(record.input_state.len(), i);
            assert_eq!(record.input_state, "m".repeat(i));
        }
    }

    #[test]
    fn test_injector_called_once_per_press() {
        let config = fast_config(3);
        let injector = RecordingInjector {
            calls: vec![],
            fail_on: vec![],
        };
        let scheduler = EventScheduler::new(&config, injector);
        let schedule = scheduler.generate();
        assert_eq!(schedule.len(), 4);
    }

    #[test]
    fn test_injection_failure_still_records_timestamp() {
        let config = fast_config(3);
        let injector = RecordingInjector {
            calls: vec![],
            fail_on: vec![2],
        };
        let schedule = EventScheduler::new(&config, injector).generate();
        // Failure on the second press must not shorten the schedule or
        // disturb the cumulative state
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.records()[2].input_state, "mm");
        let timestamps = schedule.timestamps();
        for pair in timestamps.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_custom_symbol_repeated() {
        let config = SessionConfig {
            key_symbol: "x".to_string(),
            ..fast_config(2)
        };
        let schedule = EventScheduler::new(&config, NullInjector).generate();
        assert_eq!(schedule.records()[2].input_state, "xx");
    }
}
