//! Structural invariant checks.

use std::collections::BTreeSet;

use super::Geometry;
use crate::error::{DcelError, DcelResult};
use crate::handles::{FaceId, HalfEdgeId};

impl Geometry {
    /// Validates the topological invariants of the geometry.
    ///
    /// Checks that every reference resolves, that twins and next/prev links
    /// are symmetric, that every boundary loop closes with a single incident
    /// face, and that each vertex's incident half-edge starts at it.
    pub fn validate(&self) -> DcelResult<()> {
        for vertex in self.vertices() {
            if let Some(he) = vertex.incident_half_edge {
                let origin = self.half_edge(he)?.origin;
                if origin != vertex.id {
                    return Err(DcelError::inconsistent(format!(
                        "incident half-edge {he} of {} starts at {origin}",
                        vertex.id
                    )));
                }
            }
        }

        for he in self.half_edges() {
            self.vertex(he.origin)?;

            let twin = self.twin_of(he.id)?;
            if twin == he.id || self.twin_of(twin)? != he.id {
                return Err(DcelError::inconsistent(format!(
                    "twin of {} is not symmetric",
                    he.id
                )));
            }

            let next = self.next_of(he.id)?;
            let prev = self.prev_of(he.id)?;
            if self.prev_of(next)? != he.id || self.next_of(prev)? != he.id {
                return Err(DcelError::inconsistent(format!(
                    "next/prev links around {} are not symmetric",
                    he.id
                )));
            }

            let face = self.face_of(he.id)?;
            self.face(face)?;
            if self.face_of(next)? != face {
                return Err(DcelError::inconsistent(format!(
                    "{} and its successor {next} border different faces",
                    he.id
                )));
            }
        }

        for face in self.faces() {
            let starts = face
                .outer_half_edge
                .iter()
                .chain(face.inner_half_edges.iter());
            for &start in starts {
                self.expect_loop_face(start, face.id)?;
            }
        }

        let mut visited = BTreeSet::new();
        for &id in self.half_edges.keys() {
            if visited.contains(&id) {
                continue;
            }
            for he in self.half_edge_loop(id) {
                visited.insert(he?.id);
            }
        }

        Ok(())
    }

    fn expect_loop_face(&self, start: HalfEdgeId, face: FaceId) -> DcelResult<()> {
        for he in self.half_edge_loop(start) {
            let he = he?;
            if he.incident_face != Some(face) {
                return Err(DcelError::inconsistent(format!(
                    "boundary of {face} contains {} which borders {:?}",
                    he.id, he.incident_face
                )));
            }
        }
        Ok(())
    }
}
