//! Unit-test geometries, shared with the integration tests' outline builder.

#[path = "../tests/common/mod.rs"]
mod common;

pub(crate) use common::{build_face as build, square, BuiltFace};

/// Unit square face `a, b, c, d`.
pub(crate) fn unit_square() -> BuiltFace {
    build(&[square(0.0, 1.0)])
}

/// 4x4 square with a 1x1 hole at `[1, 2] x [1, 2]`.
pub(crate) fn square_with_hole() -> BuiltFace {
    build(&[square(0.0, 4.0), square(1.0, 2.0)])
}
