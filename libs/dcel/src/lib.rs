//! # DCEL
//!
//! Doubly-connected edge list kernel for planar faces with holes.
//!
//! ## Architecture
//!
//! ```text
//! outline builder (external) → Geometry → circulators / insertions → tessellation
//! ```
//!
//! ## Components
//!
//! - **Handles**: typed identifiers and a monotonic allocator
//! - **Geometry**: vertex, half-edge and face stores with lookup and upsert
//! - **Circulators**: lazy traversal around vertices and face boundaries
//! - **Projection**: plane math and the per-face 2D position cache
//! - **Ops**: diagonal insertion and vertex insertion
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dcel::Geometry;
//!
//! let mut geometry: Geometry = build_from_outlines(&outlines);
//! geometry.insert_diagonal(a, c)?;
//! for vertex in geometry.face_outer_vertices(face) {
//!     println!("{:?}", vertex?.position);
//! }
//! ```

pub mod circulators;
pub mod error;
pub mod geometry;
pub mod handles;
pub mod ops;
pub mod projection;

// Lets the shared test builder name this crate as `dcel`.
#[cfg(test)]
extern crate self as dcel;

#[cfg(test)]
mod fixtures;

pub use circulators::{FaceBoundaryWalk, HalfEdgeWalk, Rotation};
pub use error::{DcelError, DcelResult, EntityKind};
pub use geometry::{Face, Geometry, HalfEdge, Vertex};
pub use handles::{FaceId, HalfEdgeId, HandleAllocator, VertexId};
pub use ops::DiagonalOutcome;
pub use projection::ProjectionCache;
