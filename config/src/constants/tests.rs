//! Tests for the centralized configuration constants.

use super::*;

/// Ensures default constants are sane and positive.
#[test]
fn default_constants_are_valid() {
    let cfg = KernelConfig::default();
    assert!(cfg.tolerance > 0.0);
    assert!(cfg.normal_epsilon > 0.0);
    assert_eq!(cfg.tolerance, EPSILON_TOLERANCE);
}

/// Validates the constructor rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        KernelConfig::new(0.0, 1.0e-12).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert_eq!(
        KernelConfig::new(1.0e-9, -1.0).unwrap_err(),
        ConfigError::InvalidNormalEpsilon(-1.0)
    );
    assert!(KernelConfig::new(f64::NAN, 1.0e-12).is_err());
    assert!(KernelConfig::new(f64::INFINITY, 1.0e-12).is_err());
}

#[test]
fn error_display_mentions_field() {
    let err = KernelConfig::new(-2.0, 1.0).unwrap_err();
    assert!(err.to_string().contains("tolerance"));
}
