//! Shared outline builder for integration and unit tests.
//!
//! Builds a single bounded face from counter-clockwise outlines using only
//! the public allocate/replace API, the same way an external builder would.
//! The crate's own unit tests include this file through `src/fixtures.rs`.

#![allow(dead_code)]

use dcel::{Face, FaceId, Geometry, HalfEdge, HalfEdgeId, VertexId};
use glam::DVec3;

/// Result of [`build_face`].
pub struct BuiltFace {
    pub geometry: Geometry,
    pub face: FaceId,
    /// Vertex handles of each outline, in input order.
    pub rings: Vec<Vec<VertexId>>,
}

/// Builds one face: the first outline is the outer shell, the rest are holes.
pub fn build_face(outlines: &[Vec<DVec3>]) -> BuiltFace {
    let mut geometry = Geometry::new();
    let face = geometry.create_face_id();
    let mut bounded = Face::new(face, None);
    let mut unbounded = Face::new(FaceId::UNBOUNDED, None);
    let mut rings = Vec::new();

    for (index, outline) in outlines.iter().enumerate() {
        let ids: Vec<VertexId> = outline
            .iter()
            .map(|&position| {
                let id = geometry.create_vertex_id();
                geometry.replace_vertex(dcel::Vertex::new(id, position));
                id
            })
            .collect();

        // The bounded face must lie left of its half-edges, so holes run clockwise.
        let mut order = ids.clone();
        if index > 0 {
            order.reverse();
        }

        let n = order.len();
        let inside: Vec<HalfEdgeId> = (0..n).map(|_| geometry.create_half_edge_id()).collect();
        let outside: Vec<HalfEdgeId> = (0..n).map(|_| geometry.create_half_edge_id()).collect();
        for i in 0..n {
            let next = (i + 1) % n;
            let prev = (i + n - 1) % n;
            geometry.replace_half_edge(HalfEdge {
                id: inside[i],
                origin: order[i],
                twin: Some(outside[i]),
                next: Some(inside[next]),
                prev: Some(inside[prev]),
                incident_face: Some(face),
            });
            geometry.replace_half_edge(HalfEdge {
                id: outside[i],
                origin: order[next],
                twin: Some(inside[i]),
                next: Some(outside[prev]),
                prev: Some(outside[next]),
                incident_face: Some(FaceId::UNBOUNDED),
            });
            let mut vertex = geometry.vertex(order[i]).unwrap().clone();
            vertex.incident_half_edge = Some(inside[i]);
            geometry.replace_vertex(vertex);
        }

        if index == 0 {
            bounded.outer_half_edge = Some(inside[0]);
        } else {
            bounded.inner_half_edges.push(inside[0]);
        }
        unbounded.inner_half_edges.push(outside[0]);
        rings.push(ids);
    }

    geometry.replace_face(unbounded);
    geometry.replace_face(bounded);
    geometry.set_face_normal(face).unwrap();

    BuiltFace {
        geometry,
        face,
        rings,
    }
}

/// Axis-aligned square in the XY plane, counter-clockwise.
pub fn square(min: f64, max: f64) -> Vec<DVec3> {
    vec![
        DVec3::new(min, min, 0.0),
        DVec3::new(max, min, 0.0),
        DVec3::new(max, max, 0.0),
        DVec3::new(min, max, 0.0),
    ]
}

/// Regular `n`-gon of the given radius, counter-clockwise.
pub fn regular_polygon(n: usize, radius: f64) -> Vec<DVec3> {
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect()
}

/// Asserts twin, next/prev and face consistency on every half-edge.
pub fn assert_links_symmetric(geometry: &Geometry) {
    for he in geometry.half_edges() {
        let twin = geometry.twin_of(he.id).unwrap();
        assert_ne!(twin, he.id);
        assert_eq!(geometry.twin_of(twin).unwrap(), he.id);
        assert_eq!(geometry.prev_of(geometry.next_of(he.id).unwrap()).unwrap(), he.id);
        assert_eq!(geometry.next_of(geometry.prev_of(he.id).unwrap()).unwrap(), he.id);
        assert_eq!(
            geometry.face_of(geometry.next_of(he.id).unwrap()).unwrap(),
            geometry.face_of(he.id).unwrap()
        );
    }
    geometry.validate().unwrap();
}
