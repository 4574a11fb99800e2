//! # Handles
//!
//! Typed identifiers for vertices, half-edges and faces, plus the allocator
//! that issues them.
//!
//! Handles are never reused: each kind keeps a running "highest issued"
//! counter and allocation returns `highest + 1`. Optional links are modelled
//! with `Option<Id>` rather than a reserved zero value.

use std::fmt;

use config::constants::{FIRST_HANDLE_ID, UNBOUNDED_FACE_ID};
use serde::{Deserialize, Serialize};

/// Identifier of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Identifier of a half-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HalfEdgeId(pub u32);

/// Identifier of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(pub u32);

impl FaceId {
    /// The unbounded exterior face.
    pub const UNBOUNDED: FaceId = FaceId(UNBOUNDED_FACE_ID);

    /// Returns true for the reserved exterior face.
    #[inline]
    pub fn is_unbounded(self) -> bool {
        self == Self::UNBOUNDED
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for HalfEdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "he{}", self.0)
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

// =============================================================================
// ALLOCATOR
// =============================================================================

/// Counter value before any handle of a kind has been issued.
const UNISSUED: u32 = FIRST_HANDLE_ID - 1;

/// Per-kind monotonic handle counters.
///
/// # Example
///
/// ```rust
/// use dcel::handles::{FaceId, HandleAllocator};
///
/// let mut alloc = HandleAllocator::new();
/// // The first real face skips the reserved unbounded face.
/// assert_eq!(alloc.next_face(), FaceId(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleAllocator {
    highest_vertex: u32,
    highest_half_edge: u32,
    highest_face: u32,
}

impl HandleAllocator {
    /// Creates an allocator that has issued nothing yet.
    pub fn new() -> Self {
        Self {
            highest_vertex: UNISSUED,
            highest_half_edge: UNISSUED,
            highest_face: UNISSUED,
        }
    }

    /// Issues the next vertex handle.
    pub fn next_vertex(&mut self) -> VertexId {
        self.highest_vertex += 1;
        VertexId(self.highest_vertex)
    }

    /// Issues the next half-edge handle.
    pub fn next_half_edge(&mut self) -> HalfEdgeId {
        self.highest_half_edge += 1;
        HalfEdgeId(self.highest_half_edge)
    }

    /// Issues the next face handle.
    ///
    /// The very first call reserves [`FaceId::UNBOUNDED`] before issuing,
    /// so the first real face is always `FaceId(2)`.
    pub fn next_face(&mut self) -> FaceId {
        if self.highest_face < UNBOUNDED_FACE_ID {
            self.highest_face = UNBOUNDED_FACE_ID;
        }
        self.highest_face += 1;
        FaceId(self.highest_face)
    }

    /// Highest vertex handle issued so far (0 when none).
    pub fn highest_vertex(&self) -> u32 {
        self.highest_vertex
    }

    /// Highest half-edge handle issued so far (0 when none).
    pub fn highest_half_edge(&self) -> u32 {
        self.highest_half_edge
    }

    /// Highest face handle issued so far (0 when none).
    pub fn highest_face(&self) -> u32 {
        self.highest_face
    }

    /// Resets every counter from the maximum handle present in each store.
    ///
    /// An empty store resets its counter to zero, so the next allocation
    /// issues [`FIRST_HANDLE_ID`] again.
    pub fn recompute(
        &mut self,
        max_vertex: Option<VertexId>,
        max_half_edge: Option<HalfEdgeId>,
        max_face: Option<FaceId>,
    ) {
        self.highest_vertex = max_vertex.map_or(UNISSUED, |id| id.0);
        self.highest_half_edge = max_half_edge.map_or(UNISSUED, |id| id.0);
        self.highest_face = max_face.map_or(UNISSUED, |id| id.0);
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}
