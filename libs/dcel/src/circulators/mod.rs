//! # Circulators
//!
//! Lazy, finite, restartable traversals of the half-edge graph.
//!
//! Every circulator borrows the geometry and yields `DcelResult` items: a
//! dangling handle or a missing link surfaces as an error item, after which
//! the circulator is exhausted. Each call builds a fresh iterator, so a
//! traversal can be restarted simply by calling the method again.
//!
//! ## Rotations
//!
//! - **Vertex rings** step with `next(twin(e))`, visiting the outgoing
//!   half-edges of a vertex in counter-clockwise order.
//! - **Boundary loops** step with `next` (or `prev` in reverse) around a face.
//!
//! ## Example
//!
//! ```rust,ignore
//! let neighbours = geometry
//!     .vertex_adjacent_vertices(v)
//!     .map(|v| v.map(|v| v.id))
//!     .collect::<DcelResult<Vec<_>>>()?;
//! ```

use std::vec;

use crate::error::{DcelError, DcelResult};
use crate::geometry::{Face, Geometry, HalfEdge, Vertex};
use crate::handles::{FaceId, HalfEdgeId, VertexId};

/// How a walk advances from one half-edge to the following one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// `next(twin(e))`: the next outgoing half-edge around the origin.
    TwinNext,
    /// `next(e)`: forward around the incident face.
    Next,
    /// `prev(e)`: backward around the incident face.
    Prev,
}

impl Rotation {
    fn step(self, geometry: &Geometry, id: HalfEdgeId) -> DcelResult<HalfEdgeId> {
        match self {
            Rotation::TwinNext => geometry.twin_next(id),
            Rotation::Next => geometry.next_of(id),
            Rotation::Prev => geometry.prev_of(id),
        }
    }
}

// =============================================================================
// HALF-EDGE WALK
// =============================================================================

/// Cyclic walk over half-edges, stopping when the rotation returns to the
/// starting half-edge.
///
/// The walk is bounded by the number of half-edges in the geometry; a cycle
/// that never closes yields an `InconsistentTopology` error instead of
/// looping forever.
#[derive(Debug)]
pub struct HalfEdgeWalk<'a> {
    geometry: &'a Geometry,
    rotation: Rotation,
    start: Option<HalfEdgeId>,
    cursor: Option<HalfEdgeId>,
    pending: Option<DcelError>,
    steps: usize,
}

impl<'a> HalfEdgeWalk<'a> {
    /// Starts a walk at `start`.
    pub fn new(geometry: &'a Geometry, start: HalfEdgeId, rotation: Rotation) -> Self {
        Self {
            geometry,
            rotation,
            start: Some(start),
            cursor: Some(start),
            pending: None,
            steps: 0,
        }
    }

    fn empty(geometry: &'a Geometry, rotation: Rotation) -> Self {
        Self {
            geometry,
            rotation,
            start: None,
            cursor: None,
            pending: None,
            steps: 0,
        }
    }

    fn failed(geometry: &'a Geometry, rotation: Rotation, error: DcelError) -> Self {
        Self {
            pending: Some(error),
            ..Self::empty(geometry, rotation)
        }
    }

    /// Ring of outgoing half-edges around a vertex; empty for an isolated vertex.
    fn around_vertex(geometry: &'a Geometry, vertex: VertexId) -> Self {
        match geometry.vertex(vertex) {
            Ok(record) => match record.incident_half_edge {
                Some(start) => Self::new(geometry, start, Rotation::TwinNext),
                None => Self::empty(geometry, Rotation::TwinNext),
            },
            Err(error) => Self::failed(geometry, Rotation::TwinNext, error),
        }
    }
}

impl<'a> Iterator for HalfEdgeWalk<'a> {
    type Item = DcelResult<&'a HalfEdge>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending.take() {
            self.cursor = None;
            return Some(Err(error));
        }
        let current = self.cursor.take()?;
        let record = match self.geometry.half_edge(current) {
            Ok(record) => record,
            Err(error) => return Some(Err(error)),
        };

        match self.rotation.step(self.geometry, current) {
            Ok(following) if Some(following) == self.start => {}
            Ok(following) => {
                self.steps += 1;
                if self.steps >= self.geometry.half_edge_count() {
                    self.pending = Some(DcelError::inconsistent(format!(
                        "walk from {current} does not return to its start"
                    )));
                } else {
                    self.cursor = Some(following);
                }
            }
            Err(error) => self.pending = Some(error),
        }
        Some(Ok(record))
    }
}

// =============================================================================
// FACE BOUNDARY WALK
// =============================================================================

/// Walks the outer boundary of a face followed by each hole boundary.
#[derive(Debug)]
pub struct FaceBoundaryWalk<'a> {
    geometry: &'a Geometry,
    loops: vec::IntoIter<HalfEdgeId>,
    current: Option<HalfEdgeWalk<'a>>,
    pending: Option<DcelError>,
}

impl<'a> FaceBoundaryWalk<'a> {
    fn new(geometry: &'a Geometry, face: FaceId, include_holes: bool) -> Self {
        let (starts, pending) = match geometry.face(face) {
            Ok(record) => {
                let mut starts: Vec<HalfEdgeId> = record.outer_half_edge.into_iter().collect();
                if include_holes {
                    starts.extend_from_slice(&record.inner_half_edges);
                }
                (starts, None)
            }
            Err(error) => (Vec::new(), Some(error)),
        };
        Self {
            geometry,
            loops: starts.into_iter(),
            current: None,
            pending,
        }
    }
}

impl<'a> Iterator for FaceBoundaryWalk<'a> {
    type Item = DcelResult<&'a HalfEdge>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending.take() {
            return Some(Err(error));
        }
        loop {
            if let Some(walk) = self.current.as_mut() {
                match walk.next() {
                    Some(Err(error)) => {
                        self.current = None;
                        self.loops = Vec::new().into_iter();
                        return Some(Err(error));
                    }
                    Some(item) => return Some(item),
                    None => self.current = None,
                }
            }
            let start = self.loops.next()?;
            self.current = Some(HalfEdgeWalk::new(self.geometry, start, Rotation::Next));
        }
    }
}

// =============================================================================
// CIRCULATORS
// =============================================================================

impl Geometry {
    /// Half-edges of the loop starting at `start`, following `next`.
    pub fn half_edge_loop(&self, start: HalfEdgeId) -> HalfEdgeWalk<'_> {
        HalfEdgeWalk::new(self, start, Rotation::Next)
    }

    /// Half-edges of the loop starting at `start`, following `prev`.
    pub fn half_edge_loop_reverse(&self, start: HalfEdgeId) -> HalfEdgeWalk<'_> {
        HalfEdgeWalk::new(self, start, Rotation::Prev)
    }

    /// Half-edges starting at `vertex`, in rotation order from its
    /// incident half-edge.
    pub fn vertex_starting_half_edges(&self, vertex: VertexId) -> HalfEdgeWalk<'_> {
        HalfEdgeWalk::around_vertex(self, vertex)
    }

    /// Half-edges ending at `vertex` (the twin of each starting half-edge).
    pub fn vertex_targeting_half_edges(
        &self,
        vertex: VertexId,
    ) -> impl Iterator<Item = DcelResult<&HalfEdge>> + '_ {
        self.vertex_starting_half_edges(vertex)
            .map(move |he| he.and_then(|he| self.half_edge(self.twin_of(he.id)?)))
    }

    /// Every half-edge touching `vertex`: each starting half-edge followed
    /// by its twin.
    pub fn vertex_incident_half_edges(
        &self,
        vertex: VertexId,
    ) -> impl Iterator<Item = DcelResult<&HalfEdge>> + '_ {
        self.vertex_starting_half_edges(vertex).flat_map(move |he| {
            let pair = match he {
                Ok(he) => vec![Ok(he), self.twin_of(he.id).and_then(|t| self.half_edge(t))],
                Err(error) => vec![Err(error)],
            };
            pair.into_iter()
        })
    }

    /// Vertices joined to `vertex` by an edge.
    pub fn vertex_adjacent_vertices(
        &self,
        vertex: VertexId,
    ) -> impl Iterator<Item = DcelResult<&Vertex>> + '_ {
        self.vertex_starting_half_edges(vertex)
            .map(move |he| he.and_then(|he| self.vertex(self.target_of(he.id)?)))
    }

    /// Faces incident to the half-edges starting at `vertex`.
    pub fn vertex_adjacent_faces(
        &self,
        vertex: VertexId,
    ) -> impl Iterator<Item = DcelResult<&Face>> + '_ {
        self.vertex_starting_half_edges(vertex)
            .map(move |he| he.and_then(|he| self.face(self.face_of(he.id)?)))
    }

    /// Half-edges of the outer boundary of `face`, then of each hole.
    pub fn face_half_edges(&self, face: FaceId) -> FaceBoundaryWalk<'_> {
        FaceBoundaryWalk::new(self, face, true)
    }

    /// Half-edges of the outer boundary of `face` only.
    pub fn face_outer_half_edges(&self, face: FaceId) -> FaceBoundaryWalk<'_> {
        FaceBoundaryWalk::new(self, face, false)
    }

    /// Origins of the outer boundary of `face`, then of each hole.
    pub fn face_vertices(&self, face: FaceId) -> impl Iterator<Item = DcelResult<&Vertex>> + '_ {
        self.face_half_edges(face)
            .map(move |he| he.and_then(|he| self.vertex(he.origin)))
    }

    /// Origins of the outer boundary of `face` in loop order.
    pub fn face_outer_vertices(
        &self,
        face: FaceId,
    ) -> impl Iterator<Item = DcelResult<&Vertex>> + '_ {
        self.face_outer_half_edges(face)
            .map(move |he| he.and_then(|he| self.vertex(he.origin)))
    }

    /// Faces across each boundary half-edge of `face` (outer, then holes).
    pub fn face_adjacent_faces(
        &self,
        face: FaceId,
    ) -> impl Iterator<Item = DcelResult<&Face>> + '_ {
        self.face_half_edges(face)
            .map(move |he| he.and_then(|he| self.face(self.face_of(self.twin_of(he.id)?)?)))
    }

    /// Returns true if `p` and `q` are joined by an edge.
    pub fn is_vertex_adjacent_to_vertex(&self, p: VertexId, q: VertexId) -> DcelResult<bool> {
        self.vertex(q)?;
        self.find_half_edge_between(p, q).map(|he| he.is_some())
    }

    /// The half-edge directed from `p` to `q`, if the two are adjacent.
    pub fn find_half_edge_between(
        &self,
        p: VertexId,
        q: VertexId,
    ) -> DcelResult<Option<HalfEdgeId>> {
        for he in self.vertex_starting_half_edges(p) {
            let he = he?;
            if self.target_of(he.id)? == q {
                return Ok(Some(he.id));
            }
        }
        Ok(None)
    }
}
