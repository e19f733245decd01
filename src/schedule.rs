//! Key-press schedule data model
//!
//! A [`Schedule`] is the ordered record of one simulated key-press run:
//! index 0 is a sentinel marking the schedule start (empty input state),
//! indices 1..=N record each injected press. Timestamps are epoch
//! milliseconds and non-decreasing across indices.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as integer epoch milliseconds
pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// A single entry in a key-press schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the schedule; 0 is the pre-event sentinel
    pub index: usize,
    /// Epoch milliseconds at which the event was issued (for index 0,
    /// the schedule start)
    pub issued_at_ms: i64,
    /// Concatenation of all key symbols issued so far, inclusive
    pub input_state: String,
}

/// Ordered, fixed-length sequence of event records for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    records: Vec<EventRecord>,
}

impl Schedule {
    /// Build a schedule from records produced in index order.
    /// The scheduler is the only intended producer.
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        debug_assert!(records
            .windows(2)
            .all(|w| w[0].issued_at_ms <= w[1].issued_at_ms));
        Self { records }
    }

    /// Number of records, including the index-0 sentinel
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the schedule holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in index order
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// All timestamps in index order, sentinel included
    pub fn timestamps(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.issued_at_ms).collect()
    }

    /// Timestamps of the actual key presses (indices 1..), in order
    pub fn key_press_timestamps(&self) -> Vec<i64> {
        self.records
            .iter()
            .skip(1)
            .map(|r| r.issued_at_ms)
            .collect()
    }

    /// The schedule start timestamp (index-0 sentinel), if any records exist
    pub fn start_timestamp(&self) -> Option<i64> {
        self.records.first().map(|r| r.issued_at_ms)
    }
}
