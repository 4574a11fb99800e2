//! # DCEL Errors
//!
//! Error types for kernel queries and mutations.
//!
//! ## Error Policy
//!
//! - Lookups never fabricate placeholder records
//! - Mutations validate every precondition before the first write
//! - Errors carry the handles needed to locate the problem

use std::fmt;

use thiserror::Error;

/// The three kinds of entity stored in a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A vertex record.
    Vertex,
    /// A half-edge record.
    HalfEdge,
    /// A face record.
    Face,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vertex => write!(f, "vertex"),
            EntityKind::HalfEdge => write!(f, "half-edge"),
            EntityKind::Face => write!(f, "face"),
        }
    }
}

/// Errors that can occur while querying or mutating a geometry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DcelError {
    /// A handle is absent from its store.
    #[error("{kind} with id {id} not found")]
    NotFound {
        /// Store that was searched.
        kind: EntityKind,
        /// Raw handle value that was requested.
        id: u32,
    },

    /// No face qualifies for a diagonal between the two vertices.
    #[error("vertex {p} and vertex {q} have no common face")]
    NoCommonFace {
        /// First diagonal endpoint.
        p: u32,
        /// Second diagonal endpoint.
        q: u32,
    },

    /// The requested operation violates a structural precondition.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of the violated precondition.
        message: String,
    },

    /// A rotation step reached a half-edge that has no twin.
    #[error("half-edge {half_edge} has no twin")]
    UnsetTwin {
        /// Raw handle of the half-edge missing its twin.
        half_edge: u32,
    },

    /// A stored link breaks one of the structural invariants.
    #[error("Inconsistent topology: {message}")]
    InconsistentTopology {
        /// Description of the broken invariant.
        message: String,
    },

    /// The outer boundary of a face encloses no area.
    #[error("face {face} is degenerate and has no normal")]
    DegenerateFace {
        /// Raw handle of the degenerate face.
        face: u32,
    },
}

impl DcelError {
    /// Creates a not-found error for the given store.
    pub fn not_found(kind: EntityKind, id: u32) -> Self {
        Self::NotFound { kind, id }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates an inconsistent topology error.
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::InconsistentTopology {
            message: message.into(),
        }
    }

    /// Returns true for the lookup-failure family (`NotFound`, `NoCommonFace`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoCommonFace { .. })
    }
}

/// Result type alias for kernel operations.
pub type DcelResult<T> = Result<T, DcelError>;

// =============================================================================
// TESTS
// =============================================================================
