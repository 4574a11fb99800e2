//! # Diagonal Insertion
//!
//! Adds an edge between two non-adjacent vertices of a shared face.
//!
//! ## Cases
//!
//! - **Split**: both endpoints lie on the outer boundary. The loop starting
//!   at the new `q → p` half-edge becomes a new face with the same normal,
//!   and any hole lying inside it moves along.
//! - **Hole connect**: the endpoints lie on different boundaries of the
//!   face (outer and hole, or two holes). The loops merge, the hole entry is
//!   removed from the face, and no face is created.
//!
//! ## Example
//!
//! ```rust,ignore
//! // Square a-b-c-d split along a-c into two triangles.
//! let outcome = geometry.insert_diagonal(a, c)?;
//! assert!(outcome.new_face.is_some());
//! ```

use std::f64::consts::TAU;
use std::iter;

use config::constants::DIAGONAL_MIDPOINT_T;
use glam::{DVec2, DVec3};

use crate::error::{DcelError, DcelResult};
use crate::geometry::{Face, Geometry, HalfEdge};
use crate::handles::{FaceId, HalfEdgeId, VertexId};
use crate::projection::point_in_polygon;

/// Handles produced by a successful diagonal insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalOutcome {
    /// The new half-edge directed `p → q`.
    pub from_p: HalfEdgeId,
    /// The new half-edge directed `q → p`.
    pub from_q: HalfEdgeId,
    /// Face the diagonal was inserted into; keeps the `p → q` side.
    pub face: FaceId,
    /// Face split off on the `q → p` side, `None` when a hole was connected.
    pub new_face: Option<FaceId>,
}

/// Which boundary loop of a face a half-edge lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Outer,
    Hole(HalfEdgeId),
}

#[derive(Debug)]
enum Splice {
    Split {
        /// Existing half-edges that move to the new face, `p_start ..= q_prev`.
        new_loop: Vec<HalfEdgeId>,
        /// Hole entries that move to the new face.
        moved_holes: Vec<HalfEdgeId>,
        /// Every half-edge on the moved holes.
        moved_hole_edges: Vec<HalfEdgeId>,
    },
    ConnectHole {
        hole: HalfEdgeId,
    },
}

#[derive(Debug)]
struct DiagonalPlan {
    face: FaceId,
    p: VertexId,
    q: VertexId,
    p_start: HalfEdgeId,
    q_start: HalfEdgeId,
    p_prev: HalfEdgeId,
    q_prev: HalfEdgeId,
    normal: Option<DVec3>,
    splice: Splice,
}

impl Geometry {
    /// Inserts a diagonal between `p` and `q`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if either vertex is missing
    /// - `NoCommonFace` if no bounded face contains both vertices, or if the
    ///   only candidates leave the midpoint of `p`–`q` outside
    /// - `InvalidOperation` if `p == q`, if they are already adjacent, or if
    ///   both lie on the same hole boundary
    ///
    /// On error the geometry is unchanged.
    pub fn insert_diagonal(&mut self, p: VertexId, q: VertexId) -> DcelResult<DiagonalOutcome> {
        let plan = self.plan_diagonal(p, q)?;
        self.commit_diagonal(plan)
    }

    // -------------------------------------------------------------------------
    // Planning
    // -------------------------------------------------------------------------

    fn plan_diagonal(&mut self, p: VertexId, q: VertexId) -> DcelResult<DiagonalPlan> {
        if p == q {
            return Err(DcelError::invalid_operation(format!(
                "a diagonal can't join {p} to itself"
            )));
        }
        let p_pos = self.vertex(p)?.position;
        let q_pos = self.vertex(q)?.position;

        if self.is_vertex_adjacent_to_vertex(p, q)? {
            return Err(DcelError::invalid_operation(format!(
                "a diagonal can't be inserted between adjacent vertices {p} and {q}"
            )));
        }

        let from_p = self.starting_with_faces(p)?;
        let from_q = self.starting_with_faces(q)?;
        let midpoint = p_pos.lerp(q_pos, DIAGONAL_MIDPOINT_T);
        let face = self.locate_diagonal_face(p, q, midpoint, &from_p, &from_q)?;

        let p_start = self.pick_start(face, p, q, &from_p)?;
        let q_start = self.pick_start(face, q, p, &from_q)?;
        let p_prev = self.prev_of(p_start)?;
        let q_prev = self.prev_of(q_start)?;

        let record = self.face(face)?;
        let outer = record.outer_half_edge;
        let holes = record.inner_half_edges.clone();
        let normal = record.normal;

        let p_boundary = self.boundary_containing(face, outer, &holes, p_start)?;
        let q_boundary = self.boundary_containing(face, outer, &holes, q_start)?;

        let splice = match (p_boundary, q_boundary) {
            (Boundary::Outer, Boundary::Outer) => {
                self.plan_split(face, q, p_start, q_start, &holes)?
            }
            (Boundary::Hole(a), Boundary::Hole(b)) if a == b => {
                return Err(DcelError::invalid_operation(format!(
                    "{p} and {q} lie on the same hole boundary of {face}"
                )));
            }
            (_, Boundary::Hole(hole)) | (Boundary::Hole(hole), Boundary::Outer) => {
                Splice::ConnectHole { hole }
            }
        };

        Ok(DiagonalPlan {
            face,
            p,
            q,
            p_start,
            q_start,
            p_prev,
            q_prev,
            normal,
            splice,
        })
    }

    /// Starting half-edges of `vertex` paired with their incident faces.
    fn starting_with_faces(&self, vertex: VertexId) -> DcelResult<Vec<(HalfEdgeId, FaceId)>> {
        self.vertex_starting_half_edges(vertex)
            .map(|he| {
                let he = he?;
                Ok((he.id, self.face_of(he.id)?))
            })
            .collect()
    }

    /// Finds the bounded face a `p`–`q` diagonal runs through.
    ///
    /// A single shared face is taken as is. Otherwise the unbounded face is
    /// skipped and the first bounded face holding the midpoint wins, so a
    /// chord running outside a concave face is rejected.
    fn locate_diagonal_face(
        &mut self,
        p: VertexId,
        q: VertexId,
        midpoint: DVec3,
        from_p: &[(HalfEdgeId, FaceId)],
        from_q: &[(HalfEdgeId, FaceId)],
    ) -> DcelResult<FaceId> {
        let mut shared: Vec<FaceId> = Vec::new();
        for &(_, face) in from_p {
            if shared.contains(&face) {
                continue;
            }
            if from_q.iter().any(|&(_, other)| other == face) {
                shared.push(face);
            }
        }

        if let [face] = shared.as_slice() {
            if !face.is_unbounded() {
                return Ok(*face);
            }
        }
        for face in shared {
            if face.is_unbounded() {
                continue;
            }
            if self.contains_point(face, midpoint)? {
                return Ok(face);
            }
        }
        Err(DcelError::NoCommonFace { p: p.0, q: q.0 })
    }

    /// Chooses the half-edge leaving `vertex` in `face` whose corner the
    /// diagonal towards `other` passes through.
    ///
    /// A vertex appears more than once on a face boundary after a hole was
    /// connected through it; the corner is then chosen by angle.
    fn pick_start(
        &mut self,
        face: FaceId,
        vertex: VertexId,
        other: VertexId,
        candidates: &[(HalfEdgeId, FaceId)],
    ) -> DcelResult<HalfEdgeId> {
        let in_face: Vec<HalfEdgeId> = candidates
            .iter()
            .filter(|&&(_, f)| f == face)
            .map(|&(he, _)| he)
            .collect();

        match in_face.as_slice() {
            [] => Err(DcelError::inconsistent(format!(
                "{vertex} has no half-edge bordering {face}"
            ))),
            [only] => Ok(*only),
            [_, ..] => {
                let origin = self.projected_position(face, vertex)?;
                let direction = self.projected_position(face, other)? - origin;
                for &he in &in_face {
                    let ahead = self.projected_position(face, self.target_of(he)?)? - origin;
                    let prev = self.prev_of(he)?;
                    let behind = self.projected_position(face, self.half_edge(prev)?.origin)? - origin;
                    if self.corner_contains(ahead, behind, direction) {
                        return Ok(he);
                    }
                }
                Err(DcelError::inconsistent(format!(
                    "no corner of {vertex} in {face} faces {other}"
                )))
            }
        }
    }

    /// Tests whether `direction` points into the corner swept counter-clockwise
    /// from `ahead` to `behind` (the face interior lies left of its boundary).
    fn corner_contains(&self, ahead: DVec2, behind: DVec2, direction: DVec2) -> bool {
        let tolerance = self.config.tolerance;
        let mut corner = ccw_angle(ahead, behind);
        if corner <= tolerance {
            corner = TAU;
        }
        let turn = ccw_angle(ahead, direction);
        turn > tolerance && turn < corner - tolerance
    }

    fn boundary_containing(
        &self,
        face: FaceId,
        outer: Option<HalfEdgeId>,
        holes: &[HalfEdgeId],
        target: HalfEdgeId,
    ) -> DcelResult<Boundary> {
        if let Some(outer) = outer {
            if self.loop_contains(outer, target)? {
                return Ok(Boundary::Outer);
            }
        }
        for &hole in holes {
            if self.loop_contains(hole, target)? {
                return Ok(Boundary::Hole(hole));
            }
        }
        Err(DcelError::inconsistent(format!(
            "{target} is not on any boundary of {face}"
        )))
    }

    fn loop_contains(&self, start: HalfEdgeId, target: HalfEdgeId) -> DcelResult<bool> {
        for he in self.half_edge_loop(start) {
            if he?.id == target {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn plan_split(
        &mut self,
        face: FaceId,
        q: VertexId,
        p_start: HalfEdgeId,
        q_start: HalfEdgeId,
        holes: &[HalfEdgeId],
    ) -> DcelResult<Splice> {
        let mut new_loop = Vec::new();
        for he in self.half_edge_loop(p_start) {
            let he = he?;
            if he.id == q_start {
                break;
            }
            new_loop.push(he.id);
        }

        let mut moved_holes = Vec::new();
        let mut moved_hole_edges = Vec::new();
        if !holes.is_empty() {
            let mut ring = vec![q];
            for &he in &new_loop {
                ring.push(self.half_edge(he)?.origin);
            }
            let polygon = self.projected_polygon(face, &ring)?;

            for &hole in holes {
                let origin = self.half_edge(hole)?.origin;
                let probe = self.projected_position(face, origin)?;
                if point_in_polygon(probe, &polygon) {
                    moved_holes.push(hole);
                    for he in self.half_edge_loop(hole) {
                        moved_hole_edges.push(he?.id);
                    }
                }
            }
        }

        Ok(Splice::Split {
            new_loop,
            moved_holes,
            moved_hole_edges,
        })
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    fn commit_diagonal(&mut self, plan: DiagonalPlan) -> DcelResult<DiagonalOutcome> {
        let from_p = self.create_half_edge_id();
        let from_q = self.create_half_edge_id();

        self.replace_half_edge(HalfEdge {
            id: from_p,
            origin: plan.p,
            twin: Some(from_q),
            next: Some(plan.q_start),
            prev: Some(plan.p_prev),
            incident_face: Some(plan.face),
        });
        self.replace_half_edge(HalfEdge {
            id: from_q,
            origin: plan.q,
            twin: Some(from_p),
            next: Some(plan.p_start),
            prev: Some(plan.q_prev),
            incident_face: Some(plan.face),
        });

        self.half_edge_mut(plan.p_prev)?.next = Some(from_p);
        self.half_edge_mut(plan.q_start)?.prev = Some(from_p);
        self.half_edge_mut(plan.q_prev)?.next = Some(from_q);
        self.half_edge_mut(plan.p_start)?.prev = Some(from_q);

        let new_face = match plan.splice {
            Splice::ConnectHole { hole } => {
                self.face_mut(plan.face)?
                    .inner_half_edges
                    .retain(|&entry| entry != hole);
                tracing::debug!(
                    p = %plan.p,
                    q = %plan.q,
                    face = %plan.face,
                    %hole,
                    "diagonal connected hole"
                );
                None
            }
            Splice::Split {
                new_loop,
                moved_holes,
                moved_hole_edges,
            } => {
                let new_face = self.create_face_id();
                let mut record = Face::new(new_face, Some(from_q));
                record.normal = plan.normal;
                record.inner_half_edges = moved_holes.clone();
                self.replace_face(record);

                let relinked = iter::once(from_q)
                    .chain(new_loop)
                    .chain(moved_hole_edges);
                for he in relinked {
                    self.half_edge_mut(he)?.incident_face = Some(new_face);
                }

                let original = self.face_mut(plan.face)?;
                original.outer_half_edge = Some(from_p);
                original
                    .inner_half_edges
                    .retain(|entry| !moved_holes.contains(entry));

                tracing::debug!(
                    p = %plan.p,
                    q = %plan.q,
                    face = %plan.face,
                    %new_face,
                    moved_holes = moved_holes.len(),
                    "diagonal split face"
                );
                Some(new_face)
            }
        };

        Ok(DiagonalOutcome {
            from_p,
            from_q,
            face: plan.face,
            new_face,
        })
    }
}

/// Counter-clockwise angle from `from` to `to`, in `[0, TAU)`.
fn ccw_angle(from: DVec2, to: DVec2) -> f64 {
    let angle = from.perp_dot(to).atan2(from.dot(to));
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}
