//! Fixture-based verification of the lag algorithm
//!
//! The stored fixture encodes ten presses whose effects become visible
//! exactly 120 ms later under a 50 ms camera startup delay, so every
//! computed lag must be 70 ms.

use std::path::PathBuf;

use shutterlag::lag::{LagCalculator, LagFixture};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/calculate_lag_test_data.json")
}

#[test]
fn test_fixture_reproduces_expected_lag() {
    let fixture = LagFixture::load(&fixture_path()).expect("fixture must load");
    let calculator = LagCalculator::new(fixture.key_symbol.as_str());

    let lag = calculator.compute_lag(
        &fixture.ocr_data,
        fixture.test_start_timestamp,
        &fixture.key_press_timestamp,
        fixture.camera_startup_delay,
    );

    assert_eq!(lag.len(), fixture.key_press_timestamp.len());
    assert_eq!(lag, fixture.expected_lag);
}

#[test]
fn test_fixture_recomputation_is_idempotent() {
    let fixture = LagFixture::load(&fixture_path()).expect("fixture must load");
    let calculator = LagCalculator::new(fixture.key_symbol.as_str());

    let first = calculator.compute_lag(
        &fixture.ocr_data,
        fixture.test_start_timestamp,
        &fixture.key_press_timestamp,
        fixture.camera_startup_delay,
    );
    let second = calculator.compute_lag(
        &fixture.ocr_data,
        fixture.test_start_timestamp,
        &fixture.key_press_timestamp,
        fixture.camera_startup_delay,
    );
    assert_eq!(first, second);
}

#[test]
fn test_fixture_all_entries_resolve_to_seventy() {
    let fixture = LagFixture::load(&fixture_path()).expect("fixture must load");
    let calculator = LagCalculator::new(fixture.key_symbol.as_str());
    let lag = calculator.compute_lag(
        &fixture.ocr_data,
        fixture.test_start_timestamp,
        &fixture.key_press_timestamp,
        fixture.camera_startup_delay,
    );
    for entry in &lag {
        assert_eq!(*entry, Some(70));
    }
}
