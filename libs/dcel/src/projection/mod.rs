//! # Plane Projection
//!
//! Planar math used by the kernel and the per-face cache of vertex
//! positions reduced to 2D.
//!
//! ## Cache policy
//!
//! Entries are filled lazily, one `(face, vertex)` pair at a time, and are
//! invalidated on write: replacing a vertex drops that vertex from every
//! face, and replacing a face or setting its normal drops the whole face.

use std::collections::HashMap;

use glam::{DQuat, DVec2, DVec3};

use crate::error::{DcelError, DcelResult};
use crate::geometry::Geometry;
use crate::handles::{FaceId, HalfEdgeId, VertexId};

// =============================================================================
// PLANE MATH
// =============================================================================

/// Normal of a closed polygon as the normalized sum of `p[i] × p[i + 1]`.
///
/// Returns `None` when the polygon encloses (numerically) no area.
///
/// # Example
///
/// ```rust
/// use dcel::projection::newell_normal;
/// use glam::DVec3;
///
/// let square = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(1.0, 1.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
/// ];
/// assert_eq!(newell_normal(&square, 1e-12), Some(DVec3::Z));
/// ```
pub fn newell_normal(points: &[DVec3], epsilon: f64) -> Option<DVec3> {
    if points.len() < 3 {
        return None;
    }
    let sum = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .fold(DVec3::ZERO, |acc, (a, b)| acc + a.cross(*b));

    if sum.length() < epsilon {
        return None;
    }
    Some(sum.normalize())
}

/// Rotates `point` so that `normal` maps onto +Z and drops the Z component.
///
/// A polygon wound counter-clockwise around `normal` stays counter-clockwise
/// in the returned 2D coordinates.
pub fn reduce_to_plane(point: DVec3, normal: DVec3) -> DVec2 {
    let rotation = DQuat::from_rotation_arc(normal.normalize(), DVec3::Z);
    (rotation * point).truncate()
}

/// Winding-number test for point-in-polygon (2D).
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2]) -> bool {
    let mut winding = 0i32;
    let n = polygon.len();

    for i in 0..n {
        let v0 = polygon[i];
        let v1 = polygon[(i + 1) % n];

        if v0.y <= point.y {
            if v1.y > point.y && (v1 - v0).perp_dot(point - v0) > 0.0 {
                // Upward crossing
                winding += 1;
            }
        } else if v1.y <= point.y && (v1 - v0).perp_dot(point - v0) < 0.0 {
            // Downward crossing
            winding -= 1;
        }
    }

    winding != 0
}

// =============================================================================
// CACHE
// =============================================================================

/// Per-face map from vertex handle to projected 2D position.
#[derive(Debug, Clone, Default)]
pub struct ProjectionCache {
    faces: HashMap<FaceId, HashMap<VertexId, DVec2>>,
}

impl ProjectionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached position of `vertex` on the plane of `face`, if present.
    pub fn get(&self, face: FaceId, vertex: VertexId) -> Option<DVec2> {
        self.faces.get(&face)?.get(&vertex).copied()
    }

    /// Stores a projected position.
    pub fn insert(&mut self, face: FaceId, vertex: VertexId, position: DVec2) {
        self.faces.entry(face).or_default().insert(vertex, position);
    }

    /// Drops every entry of `face`.
    pub fn invalidate_face(&mut self, face: FaceId) {
        self.faces.remove(&face);
    }

    /// Drops `vertex` from every face.
    pub fn invalidate_vertex(&mut self, vertex: VertexId) {
        for entries in self.faces.values_mut() {
            entries.remove(&vertex);
        }
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.faces.clear();
    }

    /// Total number of cached `(face, vertex)` pairs.
    pub fn len(&self) -> usize {
        self.faces.values().map(HashMap::len).sum()
    }

    /// Returns true when no position is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// GEOMETRY INTEGRATION
// =============================================================================

impl Geometry {
    /// Read access to the projection cache.
    pub fn projection_cache(&self) -> &ProjectionCache {
        &self.projections
    }

    /// Drops every cached projection.
    pub fn clear_projection_cache(&mut self) {
        self.projections.clear();
    }

    /// Cached normal of a face; a face without one cannot be projected onto.
    pub fn face_plane_normal(&self, face: FaceId) -> DcelResult<DVec3> {
        self.face(face)?.normal.ok_or_else(|| {
            DcelError::invalid_operation(format!("{face} has no normal to project onto"))
        })
    }

    /// Position of `vertex` projected onto the plane of `face`.
    ///
    /// Computed on first request and cached afterwards.
    pub fn projected_position(&mut self, face: FaceId, vertex: VertexId) -> DcelResult<DVec2> {
        if let Some(position) = self.projections.get(face, vertex) {
            return Ok(position);
        }
        let normal = self.face_plane_normal(face)?;
        let position = reduce_to_plane(self.vertex(vertex)?.position, normal);
        tracing::trace!(%face, %vertex, "projection cache miss");
        self.projections.insert(face, vertex, position);
        Ok(position)
    }

    /// Projects a sequence of vertices onto the plane of `face`.
    pub(crate) fn projected_polygon(
        &mut self,
        face: FaceId,
        vertices: &[VertexId],
    ) -> DcelResult<Vec<DVec2>> {
        vertices
            .iter()
            .map(|&vertex| self.projected_position(face, vertex))
            .collect()
    }

    /// Origins of the half-edges in the loop starting at `start`.
    pub(crate) fn loop_origins(&self, start: HalfEdgeId) -> DcelResult<Vec<VertexId>> {
        self.half_edge_loop(start)
            .map(|he| he.map(|he| he.origin))
            .collect()
    }

    /// Tests a 2D point (already on the face's plane) against a face:
    /// inside the outer boundary and outside every hole.
    pub fn is_point_in_face(&mut self, face: FaceId, point: DVec2) -> DcelResult<bool> {
        let record = self.face(face)?;
        let Some(outer) = record.outer_half_edge else {
            return Ok(false);
        };
        let holes = record.inner_half_edges.clone();

        let outer = self.loop_origins(outer)?;
        let polygon = self.projected_polygon(face, &outer)?;
        if !point_in_polygon(point, &polygon) {
            return Ok(false);
        }

        for hole in holes {
            let ring = self.loop_origins(hole)?;
            let polygon = self.projected_polygon(face, &ring)?;
            if point_in_polygon(point, &polygon) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Projects a 3D point onto the plane of `face` and tests containment.
    pub fn contains_point(&mut self, face: FaceId, point: DVec3) -> DcelResult<bool> {
        let normal = self.face_plane_normal(face)?;
        self.is_point_in_face(face, reduce_to_plane(point, normal))
    }
}
