//! # Vertex Insertion
//!
//! Splits the edge between two adjacent vertices with a new vertex.
//!
//! ```text
//!   before:  p ──he1──▶ q        after:  p ──he1──▶ v ──n2──▶ q
//!            p ◀──he2── q                p ◀──n1─── v ◀──he2── q
//! ```
//!
//! `he1` and `he2` keep their handles and origins; the two new half-edges
//! start at the new vertex and inherit the face of the half-edge they
//! continue.

use glam::DVec3;

use crate::error::{DcelError, DcelResult};
use crate::geometry::{Geometry, HalfEdge, Vertex};
use crate::handles::{HalfEdgeId, VertexId};

#[derive(Debug)]
struct VertexPlan {
    /// `p → q`.
    he1: HalfEdgeId,
    /// `q → p`.
    he2: HalfEdgeId,
    /// Successor of `he1` before the split.
    next1: HalfEdgeId,
    /// Successor of `he2` before the split.
    next2: HalfEdgeId,
}

impl Geometry {
    /// Inserts a vertex at `position` on the edge joining `p` and `q`.
    ///
    /// Returns the handle of the new vertex.
    ///
    /// # Errors
    ///
    /// - `NotFound` if either vertex is missing
    /// - `InvalidOperation` if `p` and `q` are not adjacent
    ///
    /// On error the geometry is unchanged.
    pub fn insert_vertex(
        &mut self,
        p: VertexId,
        q: VertexId,
        position: DVec3,
    ) -> DcelResult<VertexId> {
        let plan = self.plan_vertex(p, q)?;
        self.commit_vertex(plan, position)
    }

    fn plan_vertex(&self, p: VertexId, q: VertexId) -> DcelResult<VertexPlan> {
        self.vertex(q)?;
        let Some(he1) = self.find_half_edge_between(p, q)? else {
            return Err(DcelError::invalid_operation(format!(
                "vertices {p} and {q} are not adjacent"
            )));
        };
        let he2 = self.twin_of(he1)?;
        Ok(VertexPlan {
            he1,
            he2,
            next1: self.next_of(he1)?,
            next2: self.next_of(he2)?,
        })
    }

    fn commit_vertex(&mut self, plan: VertexPlan, position: DVec3) -> DcelResult<VertexId> {
        let VertexPlan {
            he1,
            he2,
            next1,
            next2,
        } = plan;
        let face1 = self.half_edge(he1)?.incident_face;
        let face2 = self.half_edge(he2)?.incident_face;

        let vertex = self.create_vertex_id();
        let n1 = self.create_half_edge_id();
        let n2 = self.create_half_edge_id();

        // n1 runs v → p alongside he2, n2 runs v → q alongside he1.
        self.replace_half_edge(HalfEdge {
            id: n1,
            origin: vertex,
            twin: Some(he1),
            next: Some(next2),
            prev: Some(he2),
            incident_face: face2,
        });
        self.replace_half_edge(HalfEdge {
            id: n2,
            origin: vertex,
            twin: Some(he2),
            next: Some(next1),
            prev: Some(he1),
            incident_face: face1,
        });

        {
            let he = self.half_edge_mut(he1)?;
            he.twin = Some(n1);
            he.next = Some(n2);
        }
        {
            let he = self.half_edge_mut(he2)?;
            he.twin = Some(n2);
            he.next = Some(n1);
        }
        self.half_edge_mut(next1)?.prev = Some(n2);
        self.half_edge_mut(next2)?.prev = Some(n1);

        let mut record = Vertex::new(vertex, position);
        record.incident_half_edge = Some(n2);
        self.replace_vertex(record);

        tracing::debug!(%vertex, %he1, %he2, "vertex inserted on edge");
        Ok(vertex)
    }
}
