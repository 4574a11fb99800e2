//! Face plane normals.

use glam::DVec3;

use super::Geometry;
use crate::error::{DcelError, DcelResult};
use crate::handles::FaceId;
use crate::projection::newell_normal;

impl Geometry {
    /// Computes the plane normal of a face from its outer boundary.
    ///
    /// The unbounded face has no plane and is rejected.
    pub fn compute_face_normal(&self, face: FaceId) -> DcelResult<DVec3> {
        if face.is_unbounded() {
            return Err(DcelError::invalid_operation(
                "the unbounded face has no normal",
            ));
        }
        let points = self
            .face_outer_vertices(face)
            .map(|vertex| vertex.map(|v| v.position))
            .collect::<DcelResult<Vec<_>>>()?;

        newell_normal(&points, self.config.normal_epsilon)
            .ok_or(DcelError::DegenerateFace { face: face.0 })
    }

    /// Computes a face's normal and stores it on the face record,
    /// replacing any previous value.
    ///
    /// Projections cached for the face are dropped.
    pub fn set_face_normal(&mut self, face: FaceId) -> DcelResult<DVec3> {
        let normal = self.compute_face_normal(face)?;
        self.face_mut(face)?.normal = Some(normal);
        self.projections.invalidate_face(face);
        tracing::debug!(%face, ?normal, "face normal set");
        Ok(normal)
    }
}
