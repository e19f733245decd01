//! CLI argument parsing for shutterlag

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::SessionConfig;

/// Output format for lag reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "shutterlag")]
#[command(version)]
#[command(about = "Measure shutter-to-display latency of a remote camera app", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: CommandKind,
}

#[derive(Subcommand, Debug)]
pub enum CommandKind {
    /// Run a measurement session against a connected device
    Measure(MeasureArgs),
    /// Compute lag offline from a stored fixture
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Key symbol typed on each event
    #[arg(short = 'k', long = "key", default_value = "m")]
    pub key_symbol: String,

    /// Number of key presses to simulate
    #[arg(short = 'n', long = "presses", default_value_t = 10)]
    pub press_count: usize,

    /// Warm-up delay before the first press, in milliseconds
    #[arg(long = "warmup-ms", value_name = "MS", default_value_t = 1000)]
    pub warmup_ms: u64,

    /// Interval between consecutive presses, in milliseconds
    #[arg(long = "interval-ms", value_name = "MS", default_value_t = 100)]
    pub interval_ms: u64,

    /// Camera startup delay compensation, in milliseconds
    #[arg(long = "startup-delay-ms", value_name = "MS", default_value_t = 50)]
    pub camera_startup_delay_ms: i64,

    /// Bound on each blocking session read, in seconds (0 waits forever)
    #[arg(long = "read-timeout", value_name = "SECS", default_value_t = 120)]
    pub read_timeout_secs: u64,

    /// Command used to inject keys at the OS level (symbol appended)
    #[arg(long = "injector", value_name = "CMD", default_value = "xdotool type")]
    pub injector: String,

    /// Device bridge binary for app launch and port forwarding
    #[arg(long = "adb", value_name = "PATH", default_value = "adb")]
    pub adb_path: String,

    /// Skip launching the app and forwarding the port over adb
    #[arg(long = "no-device")]
    pub no_device: bool,

    /// Run the schedule without actually typing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// OCR samples JSON to correlate once the session completes
    #[arg(long = "ocr", value_name = "FILE")]
    pub ocr: Option<PathBuf>,

    /// Output format for the lag report
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl MeasureArgs {
    /// Translate CLI flags into a validated-ready session configuration
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            key_symbol: self.key_symbol.clone(),
            press_count: self.press_count,
            warmup: Duration::from_millis(self.warmup_ms),
            inter_event_interval: Duration::from_millis(self.interval_ms),
            camera_startup_delay_ms: self.camera_startup_delay_ms,
            read_timeout: match self.read_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            injector_command: self.injector.split_whitespace().map(String::from).collect(),
            adb_path: self.adb_path.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Lag fixture JSON (ocrData, testStartTimestamp, cameraStartupDelay,
    /// keyPressTimestamp, expectedLag)
    #[arg(long = "fixture", value_name = "FILE")]
    pub fixture: PathBuf,

    /// Verify the fixture's expectedLag and fail on mismatch
    #[arg(long = "check")]
    pub check: bool,

    /// Output format for the lag report
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}
