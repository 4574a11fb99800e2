//! # Topology Operations
//!
//! Structural mutations of a geometry.
//!
//! Each operation runs in two phases. Planning reads the geometry, resolves
//! every handle and checks every precondition, producing a plan value.
//! Committing only writes. A failed precondition therefore leaves the
//! geometry untouched.
//!
//! - **Diagonal insertion**: joins two vertices of a shared face, splitting
//!   the face or merging a hole into a boundary
//! - **Vertex insertion**: splits an edge with a new vertex

pub mod diagonal;
pub mod vertex;

pub use diagonal::DiagonalOutcome;
