//! Centralized configuration values shared across the DCEL kernel crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// HANDLE CONSTANTS
// =============================================================================

/// Handle value permanently reserved for the unbounded exterior face.
///
/// # Examples
/// ```
/// use config::constants::UNBOUNDED_FACE_ID;
/// assert_eq!(UNBOUNDED_FACE_ID, 1);
/// ```
pub const UNBOUNDED_FACE_ID: u32 = 1;

/// First handle value issued for every entity kind.
///
/// Handle counters start at zero and allocation returns `highest + 1`.
///
/// # Examples
/// ```
/// use config::constants::FIRST_HANDLE_ID;
/// assert_eq!(FIRST_HANDLE_ID, 1);
/// ```
pub const FIRST_HANDLE_ID: u32 = 1;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Angular margin, in radians, when deciding which corner of a repeated
/// boundary vertex a new diagonal passes through.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Length below which an accumulated face normal is considered degenerate.
///
/// # Examples
/// ```
/// use config::constants::NORMAL_EPSILON;
/// assert!(NORMAL_EPSILON > 0.0);
/// ```
pub const NORMAL_EPSILON: f64 = 1.0e-12;

/// Interpolation parameter locating the probe point on a candidate diagonal.
///
/// # Examples
/// ```
/// use config::constants::DIAGONAL_MIDPOINT_T;
/// assert_eq!(DIAGONAL_MIDPOINT_T, 0.5);
/// ```
pub const DIAGONAL_MIDPOINT_T: f64 = 0.5;

// =============================================================================
// KERNEL CONFIG
// =============================================================================

/// Immutable snapshot of the numeric settings a geometry kernel runs with.
///
/// # Examples
/// ```
/// use config::constants::KernelConfig;
/// let config = KernelConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Angular margin for the corner test of a repeated boundary vertex.
    pub tolerance: f64,
    /// Minimum length of a non-degenerate face normal.
    pub normal_epsilon: f64,
}

impl KernelConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::KernelConfig;
    /// let cfg = KernelConfig::new(1.0e-6, 1.0e-10).expect("valid config");
    /// assert_eq!(cfg.tolerance, 1.0e-6);
    /// ```
    pub fn new(tolerance: f64, normal_epsilon: f64) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) || !tolerance.is_finite() {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !(normal_epsilon > 0.0) || !normal_epsilon.is_finite() {
            return Err(ConfigError::InvalidNormalEpsilon(normal_epsilon));
        }
        Ok(Self {
            tolerance,
            normal_epsilon,
        })
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON_TOLERANCE,
            normal_epsilon: NORMAL_EPSILON,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the containment tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the normal epsilon is zero, negative or not finite.
    InvalidNormalEpsilon(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidNormalEpsilon(value) => {
                write!(f, "normal_epsilon must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
