//! Measurement session configuration
//!
//! Every knob that was a process-wide constant in earlier revisions (key
//! symbol, press count, warm-up, cadence) lives here so tests can run
//! multiple configurations without recompilation.

use std::time::Duration;
use thiserror::Error;

/// Default key symbol typed on each event
pub const DEFAULT_KEY_SYMBOL: &str = "m";

/// Default number of key presses per session
pub const DEFAULT_PRESS_COUNT: usize = 10;

/// Default warm-up before the first press, giving the device time to reach
/// a steady capture state after the start signal
pub const DEFAULT_WARMUP: Duration = Duration::from_secs(1);

/// Default interval between consecutive presses
pub const DEFAULT_INTER_EVENT_INTERVAL: Duration = Duration::from_millis(100);

/// Default camera startup delay compensation in milliseconds
pub const DEFAULT_CAMERA_STARTUP_DELAY_MS: i64 = 50;

/// Default bound on each blocking session read
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors raised when a configuration is rejected
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("key symbol must not be empty")]
    EmptyKeySymbol,

    #[error("press count must be at least 1, got {0}")]
    ZeroPressCount(usize),

    #[error("injector command must not be empty")]
    EmptyInjectorCommand,
}

/// Configuration for a single measurement session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Key symbol injected on each event (typically a single character)
    pub key_symbol: String,
    /// Number of key presses to simulate
    pub press_count: usize,
    /// Delay between recording the schedule start and the first press
    pub warmup: Duration,
    /// Fixed sleep between consecutive presses
    pub inter_event_interval: Duration,
    /// Fixed offset between the logical test start and the device's
    /// internal capture clock baseline, in milliseconds
    pub camera_startup_delay_ms: i64,
    /// Bound on each blocking read during the sync session.
    /// `None` waits forever, matching the original unbounded design.
    pub read_timeout: Option<Duration>,
    /// Command prefix used to inject a key at the OS level; the key
    /// symbol is appended as the final argument
    pub injector_command: Vec<String>,
    /// Path to the device bridge binary
    pub adb_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_symbol: DEFAULT_KEY_SYMBOL.to_string(),
            press_count: DEFAULT_PRESS_COUNT,
            warmup: DEFAULT_WARMUP,
            inter_event_interval: DEFAULT_INTER_EVENT_INTERVAL,
            camera_startup_delay_ms: DEFAULT_CAMERA_STARTUP_DELAY_MS,
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            injector_command: vec!["xdotool".to_string(), "type".to_string()],
            adb_path: "adb".to_string(),
        }
    }
}

impl SessionConfig {
    /// Validate the configuration, rejecting values the scheduler or
    /// session cannot act on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_symbol.is_empty() {
            return Err(ConfigError::EmptyKeySymbol);
        }
        if self.press_count == 0 {
            return Err(ConfigError::ZeroPressCount(self.press_count));
        }
        if self.injector_command.is_empty() {
            return Err(ConfigError::EmptyInjectorCommand);
        }
        Ok(())
    }
}
