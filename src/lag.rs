//! Lag calculation from OCR-recovered screen text
//!
//! Correlates the on-screen text recovered from the captured video
//! against the host's key-press timeline. For each press the calculator
//! finds the earliest unconsumed frame whose text first reflects that
//! press's cumulative input state and reports the difference between the
//! frame time and the press time, normalized for the camera's fixed
//! startup delay.
//!
//! Matching is deterministic and monotone: a cursor advances through the
//! samples in order and a frame consumed for press i is never reused for
//! press i+1. A press with no matching frame is reported as unresolved
//! (`None`) rather than failing the run; partial results are the point of
//! a measurement tool.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What was visible on screen at a given capture time.
///
/// Frame timestamps are video-relative milliseconds; the test start
/// timestamp anchors them to the host clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrSample {
    /// Milliseconds from capture start to this frame
    pub frame_timestamp_millis: i64,
    /// Text recognized in the frame, possibly noisy
    pub recognized_text: String,
}

/// Stored input/expectation record for the lag algorithm, the shape used
/// by fixture-based tests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LagFixture {
    /// OCR samples in frame order
    pub ocr_data: Vec<OcrSample>,
    /// Host epoch milliseconds at the logical test start
    pub test_start_timestamp: i64,
    /// Fixed capture-pipeline offset in milliseconds
    pub camera_startup_delay: i64,
    /// Host epoch milliseconds of each key press, in order
    pub key_press_timestamp: Vec<i64>,
    /// Expected lag per press; `null` marks unresolved entries
    pub expected_lag: Vec<Option<i64>>,
    /// Key symbol whose repetitions form the expected screen text
    #[serde(default = "default_key_symbol")]
    pub key_symbol: String,
}

fn default_key_symbol() -> String {
    "m".to_string()
}

impl LagFixture {
    /// Load a fixture from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lag fixture: {}", path.display()))?;
        let fixture: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse lag fixture: {}", path.display()))?;
        Ok(fixture)
    }
}

/// Computes per-press lag for a configured key symbol
#[derive(Debug, Clone)]
pub struct LagCalculator {
    key_symbol: String,
}

impl LagCalculator {
    /// Create a calculator expecting repetitions of `key_symbol` on screen
    pub fn new(key_symbol: impl Into<String>) -> Self {
        Self {
            key_symbol: key_symbol.into(),
        }
    }

    /// Compute the lag of each key press relative to its first visible
    /// on-screen effect.
    ///
    /// For press i (1-based), the expected screen state is the key symbol
    /// repeated i times. Samples are scanned in order from a cursor that
    /// only moves forward; the first sample at or past the cursor whose
    /// whitespace-stripped text starts with the expected state is
    /// consumed, and
    /// `lag = (test_start_timestamp + frame_ts) - key_press - camera_startup_delay`.
    ///
    /// An unmatched press yields `None` and leaves the cursor in place.
    /// Negative lag is passed through unclamped; it indicates clock skew
    /// between host and device, which is a diagnostic signal of its own.
    /// Output length always equals `key_press_timestamps.len()`.
    pub fn compute_lag(
        &self,
        ocr_samples: &[OcrSample],
        test_start_timestamp: i64,
        key_press_timestamps: &[i64],
        camera_startup_delay: i64,
    ) -> Vec<Option<i64>> {
        let mut results = Vec::with_capacity(key_press_timestamps.len());
        let mut cursor = 0usize;
        let mut expected = String::new();

        for &key_press_ts in key_press_timestamps {
            expected.push_str(&self.key_symbol);

            let matched = ocr_samples[cursor..]
                .iter()
                .position(|sample| Self::text_reflects_state(&sample.recognized_text, &expected))
                .map(|offset| cursor + offset);

            match matched {
                Some(k) => {
                    let frame_abs = test_start_timestamp + ocr_samples[k].frame_timestamp_millis;
                    results.push(Some(frame_abs - key_press_ts - camera_startup_delay));
                    cursor = k + 1;
                }
                None => results.push(None),
            }
        }

        results
    }

    /// Whether a recognized text corresponds to a cumulative input state.
    /// OCR output is whitespace-stripped before the prefix test so that
    /// spurious spacing between characters does not break the match.
    fn text_reflects_state(recognized: &str, expected_state: &str) -> bool {
        let stripped: String = recognized.chars().filter(|c| !c.is_whitespace()).collect();
        stripped.starts_with(expected_state)
    }
}
