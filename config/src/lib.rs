//! # Config Crate
//!
//! Centralized configuration constants for the DCEL geometry kernel.
//! Reserved handle values and numeric tolerances are defined here so the
//! kernel crates never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON_TOLERANCE, UNBOUNDED_FACE_ID};
//!
//! let value: f64 = 1e-12;
//! assert!(value.abs() < EPSILON_TOLERANCE);
//! assert_eq!(UNBOUNDED_FACE_ID, 1);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Compile-time**: No environment variables or files are read
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
