//! # Geometry
//!
//! The handle-indexed stores of a doubly-connected edge list.
//!
//! ## Structure
//!
//! - **Vertex**: 3D position with one outgoing half-edge
//! - **HalfEdge**: origin vertex, twin, next, prev and incident face
//! - **Face**: one outer boundary, any number of hole boundaries, cached normal
//!
//! Records reference each other through handles only. Every store is an
//! ordered map keyed by handle, so enumeration order is ascending handle
//! order and stays stable between calls that do not mutate the geometry.
//!
//! ## Example
//!
//! ```rust
//! use dcel::geometry::{Geometry, Vertex};
//! use glam::DVec3;
//!
//! let mut geometry = Geometry::new();
//! let id = geometry.create_vertex_id();
//! geometry.replace_vertex(Vertex::new(id, DVec3::new(1.0, 2.0, 0.0)));
//! assert_eq!(geometry.vertex(id).unwrap().position.x, 1.0);
//! ```

mod normal;
mod validate;

use std::collections::BTreeMap;

use config::constants::KernelConfig;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{DcelError, DcelResult, EntityKind};
use crate::handles::{FaceId, HalfEdgeId, HandleAllocator, VertexId};
use crate::projection::ProjectionCache;

// =============================================================================
// RECORDS
// =============================================================================

/// A vertex record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Handle of this vertex.
    pub id: VertexId,
    /// Position in 3D space.
    pub position: DVec3,
    /// One half-edge originating at this vertex.
    pub incident_half_edge: Option<HalfEdgeId>,
}

impl Vertex {
    /// Creates an isolated vertex.
    pub fn new(id: VertexId, position: DVec3) -> Self {
        Self {
            id,
            position,
            incident_half_edge: None,
        }
    }
}

/// A half-edge record.
///
/// Link fields are `None` until the builder wires them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalfEdge {
    /// Handle of this half-edge.
    pub id: HalfEdgeId,
    /// Vertex this half-edge starts at.
    pub origin: VertexId,
    /// Oppositely directed half-edge of the same edge.
    pub twin: Option<HalfEdgeId>,
    /// Next half-edge around the incident face.
    pub next: Option<HalfEdgeId>,
    /// Previous half-edge around the incident face.
    pub prev: Option<HalfEdgeId>,
    /// Face on the left of this half-edge.
    pub incident_face: Option<FaceId>,
}

impl HalfEdge {
    /// Creates an unlinked half-edge starting at `origin`.
    pub fn new(id: HalfEdgeId, origin: VertexId) -> Self {
        Self {
            id,
            origin,
            twin: None,
            next: None,
            prev: None,
            incident_face: None,
        }
    }
}

/// A face record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Handle of this face.
    pub id: FaceId,
    /// First half-edge of the outer boundary (`None` for the unbounded face).
    pub outer_half_edge: Option<HalfEdgeId>,
    /// First half-edge of each hole boundary.
    pub inner_half_edges: Vec<HalfEdgeId>,
    /// Plane normal, cached from the outer boundary.
    pub normal: Option<DVec3>,
}

impl Face {
    /// Creates a face with the given outer boundary and no holes.
    pub fn new(id: FaceId, outer_half_edge: Option<HalfEdgeId>) -> Self {
        Self {
            id,
            outer_half_edge,
            inner_half_edges: Vec::new(),
            normal: None,
        }
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// A doubly-connected edge list.
///
/// Owns the three entity stores, the handle counters and the per-face
/// projection cache. The type performs no locking: callers must not mutate
/// it while a circulator borrowed from it is still alive, which the borrow
/// checker already enforces.
#[derive(Debug)]
pub struct Geometry {
    pub(crate) vertices: BTreeMap<VertexId, Vertex>,
    pub(crate) half_edges: BTreeMap<HalfEdgeId, HalfEdge>,
    pub(crate) faces: BTreeMap<FaceId, Face>,
    pub(crate) handles: HandleAllocator,
    pub(crate) projections: ProjectionCache,
    pub(crate) config: KernelConfig,
}

impl Geometry {
    /// Creates an empty geometry with default tolerances.
    pub fn new() -> Self {
        Self::with_config(KernelConfig::default())
    }

    /// Creates an empty geometry with the given tolerances.
    pub fn with_config(config: KernelConfig) -> Self {
        Self {
            vertices: BTreeMap::new(),
            half_edges: BTreeMap::new(),
            faces: BTreeMap::new(),
            handles: HandleAllocator::new(),
            projections: ProjectionCache::new(),
            config,
        }
    }

    /// Tolerances this geometry runs with.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Current handle counters.
    pub fn handles(&self) -> &HandleAllocator {
        &self.handles
    }

    // -------------------------------------------------------------------------
    // Handle creation
    // -------------------------------------------------------------------------

    /// Issues a fresh vertex handle.
    pub fn create_vertex_id(&mut self) -> VertexId {
        self.handles.next_vertex()
    }

    /// Issues a fresh half-edge handle.
    pub fn create_half_edge_id(&mut self) -> HalfEdgeId {
        self.handles.next_half_edge()
    }

    /// Issues a fresh face handle, reserving the unbounded face on first use.
    pub fn create_face_id(&mut self) -> FaceId {
        self.handles.next_face()
    }

    /// Recomputes the handle counters from the largest handle in each store.
    ///
    /// Empty stores reset their counter to zero.
    pub fn recompute_highest_handles(&mut self) {
        let max_vertex = self.vertices.keys().next_back().copied();
        let max_half_edge = self.half_edges.keys().next_back().copied();
        let max_face = self.faces.keys().next_back().copied();
        self.handles.recompute(max_vertex, max_half_edge, max_face);
        tracing::debug!(
            vertex = self.handles.highest_vertex(),
            half_edge = self.handles.highest_half_edge(),
            face = self.handles.highest_face(),
            "recomputed highest handles"
        );
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Gets a vertex by handle.
    pub fn vertex(&self, id: VertexId) -> DcelResult<&Vertex> {
        self.vertices
            .get(&id)
            .ok_or(DcelError::not_found(EntityKind::Vertex, id.0))
    }

    /// Gets a half-edge by handle.
    pub fn half_edge(&self, id: HalfEdgeId) -> DcelResult<&HalfEdge> {
        self.half_edges
            .get(&id)
            .ok_or(DcelError::not_found(EntityKind::HalfEdge, id.0))
    }

    /// Gets a face by handle.
    pub fn face(&self, id: FaceId) -> DcelResult<&Face> {
        self.faces
            .get(&id)
            .ok_or(DcelError::not_found(EntityKind::Face, id.0))
    }

    pub(crate) fn half_edge_mut(&mut self, id: HalfEdgeId) -> DcelResult<&mut HalfEdge> {
        self.half_edges
            .get_mut(&id)
            .ok_or(DcelError::not_found(EntityKind::HalfEdge, id.0))
    }

    pub(crate) fn face_mut(&mut self, id: FaceId) -> DcelResult<&mut Face> {
        self.faces
            .get_mut(&id)
            .ok_or(DcelError::not_found(EntityKind::Face, id.0))
    }

    /// Returns true if the vertex store holds `id`.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Returns true if the half-edge store holds `id`.
    pub fn contains_half_edge(&self, id: HalfEdgeId) -> bool {
        self.half_edges.contains_key(&id)
    }

    /// Returns true if the face store holds `id`.
    pub fn contains_face(&self, id: FaceId) -> bool {
        self.faces.contains_key(&id)
    }

    // -------------------------------------------------------------------------
    // Links
    // -------------------------------------------------------------------------

    /// Twin of a half-edge; a missing twin is an error.
    pub fn twin_of(&self, id: HalfEdgeId) -> DcelResult<HalfEdgeId> {
        self.half_edge(id)?
            .twin
            .ok_or(DcelError::UnsetTwin { half_edge: id.0 })
    }

    /// Successor of a half-edge around its face.
    pub fn next_of(&self, id: HalfEdgeId) -> DcelResult<HalfEdgeId> {
        self.half_edge(id)?
            .next
            .ok_or_else(|| DcelError::inconsistent(format!("half-edge {id} has no next")))
    }

    /// Predecessor of a half-edge around its face.
    pub fn prev_of(&self, id: HalfEdgeId) -> DcelResult<HalfEdgeId> {
        self.half_edge(id)?
            .prev
            .ok_or_else(|| DcelError::inconsistent(format!("half-edge {id} has no prev")))
    }

    /// Incident face of a half-edge.
    pub fn face_of(&self, id: HalfEdgeId) -> DcelResult<FaceId> {
        self.half_edge(id)?
            .incident_face
            .ok_or_else(|| DcelError::inconsistent(format!("half-edge {id} has no face")))
    }

    /// Destination vertex of a half-edge (the origin of its twin).
    pub fn target_of(&self, id: HalfEdgeId) -> DcelResult<VertexId> {
        let twin = self.twin_of(id)?;
        Ok(self.half_edge(twin)?.origin)
    }

    /// One rotation step around the origin of `id`: `next(twin(id))`.
    pub fn twin_next(&self, id: HalfEdgeId) -> DcelResult<HalfEdgeId> {
        let twin = self.twin_of(id)?;
        self.next_of(twin)
    }

    // -------------------------------------------------------------------------
    // Replace (upsert)
    // -------------------------------------------------------------------------

    /// Inserts or overwrites a vertex record keyed by its handle.
    ///
    /// Cached projections of this vertex are dropped.
    pub fn replace_vertex(&mut self, vertex: Vertex) {
        self.projections.invalidate_vertex(vertex.id);
        self.vertices.insert(vertex.id, vertex);
    }

    /// Inserts or overwrites a half-edge record keyed by its handle.
    pub fn replace_half_edge(&mut self, half_edge: HalfEdge) {
        self.half_edges.insert(half_edge.id, half_edge);
    }

    /// Inserts or overwrites a face record keyed by its handle.
    ///
    /// Cached projections for this face are dropped.
    pub fn replace_face(&mut self, face: Face) {
        self.projections.invalidate_face(face.id);
        self.faces.insert(face.id, face);
    }

    // -------------------------------------------------------------------------
    // Enumeration
    // -------------------------------------------------------------------------

    /// All vertices in ascending handle order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// All half-edges in ascending handle order.
    pub fn half_edges(&self) -> impl Iterator<Item = &HalfEdge> + '_ {
        self.half_edges.values()
    }

    /// All faces in ascending handle order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.faces.values()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of half-edges.
    #[inline]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Number of faces, including the unbounded face when present.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Field-for-field equality of the three stores.
    ///
    /// Handle counters, tolerances and cached projections are ignored.
    pub fn same_structure(&self, other: &Geometry) -> bool {
        self.vertices == other.vertices
            && self.half_edges == other.half_edges
            && self.faces == other.faces
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Geometry {
    /// Deep-copies the stores; counters are recomputed from the copy and the
    /// projection cache starts empty.
    fn clone(&self) -> Self {
        let faces = self
            .faces
            .values()
            .map(|face| {
                let mut copy = Face::new(face.id, face.outer_half_edge);
                copy.inner_half_edges.extend_from_slice(&face.inner_half_edges);
                copy.normal = face.normal;
                (copy.id, copy)
            })
            .collect();

        let mut clone = Self {
            vertices: self.vertices.clone(),
            half_edges: self.half_edges.clone(),
            faces,
            handles: HandleAllocator::new(),
            projections: ProjectionCache::new(),
            config: self.config,
        };
        clone.recompute_highest_handles();
        clone
    }
}
