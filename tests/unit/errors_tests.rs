/*!
 * Tests for error types
 */

use lecturecast::errors::{AppError, TimingError};

/// Test timing error messages
#[test]
fn test_timing_error_display_shouldDescribeProblem() {
    let mismatch = TimingError::LengthMismatch { texts: 3, durations: 2 };
    assert_eq!(mismatch.to_string(), "Length mismatch: 3 section texts but 2 durations");

    let invalid = TimingError::InvalidDuration { index: 1, value: -2.5 };
    assert_eq!(invalid.to_string(), "Invalid duration for section 1: -2.5");
}

/// Test conversions into the application error
#[test]
fn test_app_error_from_shouldWrapSourceErrors() {
    let timing: AppError = TimingError::LengthMismatch { texts: 1, durations: 0 }.into();
    assert!(matches!(timing, AppError::Timing(_)));
    assert!(timing.to_string().starts_with("Timing error:"));

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(io, AppError::File(_)));

    let other: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(other.to_string(), "Unknown error: boom");
}

/// Test timing errors travel through anyhow
#[test]
fn test_timing_error_intoAnyhow_shouldDowncast() {
    let err: anyhow::Error = TimingError::InvalidDuration { index: 0, value: f64::NAN }.into();

    assert!(err.downcast_ref::<TimingError>().is_some());
}
