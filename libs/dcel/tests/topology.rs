//! Topological properties of built and edited geometries.

mod common;

use common::{assert_links_symmetric, build_face, square};
use dcel::{DcelError, FaceId, HalfEdgeId, VertexId};
use glam::DVec3;

#[test]
fn square_outline_keeps_cyclic_order() {
    let built = build_face(&[square(0.0, 1.0)]);
    let outer: Vec<VertexId> = built
        .geometry
        .face_outer_vertices(built.face)
        .map(|v| v.unwrap().id)
        .collect();

    assert_eq!(outer.len(), 4);
    // Same cyclic order up to rotation.
    let offset = outer.iter().position(|&v| v == built.rings[0][0]).unwrap();
    for (i, &v) in built.rings[0].iter().enumerate() {
        assert_eq!(outer[(offset + i) % 4], v);
    }
}

#[test]
fn every_loop_closes_after_its_length() {
    let built = build_face(&[square(0.0, 4.0), square(1.0, 2.0)]);
    let g = &built.geometry;
    for he in g.half_edges() {
        let expected = g.half_edge_loop(he.id).count();
        let mut cursor = he.id;
        for _ in 0..expected {
            cursor = g.next_of(cursor).unwrap();
        }
        assert_eq!(cursor, he.id);
        assert_eq!(expected, 4);
    }
}

#[test]
fn clone_matches_source_record_for_record() {
    let built = build_face(&[square(0.0, 4.0), square(1.0, 2.0)]);
    let copy = built.geometry.clone();

    assert!(copy.same_structure(&built.geometry));
    assert!(copy.vertices().eq(built.geometry.vertices()));
    assert!(copy.half_edges().eq(built.geometry.half_edges()));
    assert!(copy.faces().eq(built.geometry.faces()));
}

#[test]
fn quad_diagonal_gives_two_adjacent_triangles() {
    let mut built = build_face(&[square(0.0, 1.0)]);
    let [a, _, c, _] = built.rings[0][..] else {
        unreachable!()
    };
    let g = &mut built.geometry;

    let outcome = g.insert_diagonal(a, c).unwrap();
    let first = outcome.face;
    let second = outcome.new_face.unwrap();

    let bounded: Vec<FaceId> = g
        .faces()
        .map(|f| f.id)
        .filter(|f| !f.is_unbounded())
        .collect();
    assert_eq!(bounded, vec![first, second]);

    for (face, other) in [(first, second), (second, first)] {
        assert_eq!(g.face_outer_half_edges(face).count(), 3);
        assert!(g.face_adjacent_faces(face).any(|f| f.unwrap().id == other));
    }
    assert_links_symmetric(g);
}

#[test]
fn adjacent_diagonal_fails_and_keeps_counts() {
    let mut built = build_face(&[square(0.0, 1.0)]);
    let [a, b, ..] = built.rings[0][..] else {
        unreachable!()
    };
    let g = &mut built.geometry;
    let counts = (g.vertex_count(), g.half_edge_count(), g.face_count());

    assert!(matches!(
        g.insert_diagonal(a, b),
        Err(DcelError::InvalidOperation { .. })
    ));
    assert_eq!(counts, (g.vertex_count(), g.half_edge_count(), g.face_count()));
}

#[test]
fn concave_outline_only_accepts_interior_chords() {
    // L-shape missing the top-right quadrant; the reflex corner is v3.
    let outline = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(2.0, 1.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(1.0, 2.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
    ];
    let mut built = build_face(&[outline]);
    let v = built.rings[0].clone();
    let g = &mut built.geometry;

    // v2-v4 cuts across the missing quadrant.
    assert_eq!(
        g.insert_diagonal(v[2], v[4]).unwrap_err(),
        DcelError::NoCommonFace { p: v[2].0, q: v[4].0 }
    );
    assert_eq!(g.face_count(), 2);

    // v0-v3 splits the L into two quads.
    let outcome = g.insert_diagonal(v[0], v[3]).unwrap();
    let new_face = outcome.new_face.unwrap();
    assert_eq!(g.face_outer_half_edges(built.face).count(), 4);
    assert_eq!(g.face_outer_half_edges(new_face).count(), 4);
    assert_links_symmetric(g);
}

#[test]
fn vertex_insertion_counts_and_faces() {
    let mut built = build_face(&[square(0.0, 1.0)]);
    let [_, b, c, _] = built.rings[0][..] else {
        unreachable!()
    };
    let g = &mut built.geometry;

    let b_to_c = g.find_half_edge_between(b, c).unwrap().unwrap();
    let c_to_b = g.twin_of(b_to_c).unwrap();
    let faces = (g.face_of(b_to_c).unwrap(), g.face_of(c_to_b).unwrap());
    let (vertices, half_edges) = (g.vertex_count(), g.half_edge_count());

    let v = g.insert_vertex(b, c, DVec3::new(1.0, 0.5, 0.0)).unwrap();
    assert_eq!(g.vertex_count(), vertices + 1);
    assert_eq!(g.half_edge_count(), half_edges + 2);

    let v_to_c = g.find_half_edge_between(v, c).unwrap().unwrap();
    let v_to_b = g.find_half_edge_between(v, b).unwrap().unwrap();
    assert_eq!(g.face_of(v_to_c).unwrap(), faces.0);
    assert_eq!(g.face_of(v_to_b).unwrap(), faces.1);
    assert_links_symmetric(g);
}

#[test]
fn hole_connection_then_triangulation_stays_consistent() {
    let mut built = build_face(&[square(0.0, 4.0), square(1.0, 2.0)]);
    let outer = built.rings[0].clone();
    let hole = built.rings[1].clone();
    let g = &mut built.geometry;

    g.insert_diagonal(outer[0], hole[0]).unwrap();
    assert!(g.face(built.face).unwrap().inner_half_edges.is_empty());
    g.insert_diagonal(hole[0], outer[1]).unwrap();
    g.insert_diagonal(hole[1], outer[1]).unwrap();
    g.insert_diagonal(hole[1], outer[2]).unwrap();

    assert_eq!(g.face_count(), 5);
    assert_links_symmetric(g);
}

#[test]
fn dangling_handles_are_reported_not_invented() {
    let built = build_face(&[square(0.0, 1.0)]);
    let g = &built.geometry;

    assert!(g.vertex(VertexId(100)).unwrap_err().is_not_found());
    assert!(g.half_edge(HalfEdgeId(100)).unwrap_err().is_not_found());
    assert!(g.face(FaceId(100)).unwrap_err().is_not_found());
    assert!(g.face_vertices(FaceId(100)).next().unwrap().is_err());
}
