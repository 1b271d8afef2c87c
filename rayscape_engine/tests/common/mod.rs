#![allow(dead_code)] // not every test binary uses every helper

use rand::Rng;
use rayscape_engine::core::types::{Number, Point3, Vector3};
use rayscape_engine::shared::ray::Ray;
use rayscape_engine::surface::axis_box::AxisBoxBuilder;
use rayscape_engine::surface::cylinder::CylinderSurface;
use rayscape_engine::surface::sphere::SphereBuilder;
use rayscape_engine::surface::triangle::TriangleSurface;
use rayscape_engine::surface::SurfaceInstance;

/// Tolerance used when comparing intersection results between acceleration structures
pub const EPSILON: Number = 1e-4;

pub fn sphere(pos: impl Into<Point3>, radius: Number) -> SurfaceInstance {
    SphereBuilder {
        pos: pos.into(),
        radius,
    }
    .into()
}

pub fn random_point(rng: &mut impl Rng, extent: Number) -> Point3 {
    Point3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

/// A randomly placed and sized surface, drawing from all four primitive kinds
pub fn random_surface(rng: &mut impl Rng) -> SurfaceInstance { random_surface_within(rng, 20.) }

/// [random_surface], but with the surface centre placed within `±extent` of the origin
pub fn random_surface_within(rng: &mut impl Rng, extent: Number) -> SurfaceInstance {
    let centre = random_point(rng, extent);
    match rng.gen_range(0..4_u32) {
        0 => SphereBuilder {
            pos: centre,
            radius: rng.gen_range(0.1..2.5),
        }
        .into(),
        1 => TriangleSurface::new([
            centre,
            centre + random_point(rng, 3.).to_vector(),
            centre + random_point(rng, 3.).to_vector(),
        ])
        .into(),
        2 => AxisBoxBuilder::new_centred(
            centre,
            Vector3::new(
                rng.gen_range(0.1..4.),
                rng.gen_range(0.1..4.),
                rng.gen_range(0.1..4.),
            ),
        )
        .into(),
        _ => CylinderSurface::new(centre, rng.gen_range(0.1..2.), rng.gen_range(0.1..4.)).into(),
    }
}

pub fn random_scene(rng: &mut impl Rng, count: usize) -> Vec<SurfaceInstance> {
    (0..count).map(|_| random_surface(rng)).collect()
}

/// A ray from a random origin in a random (non-degenerate) direction.
///
/// Half the rays get aimed at a point near the origin (where the random scenes live) so
/// that queries exercise hits as well as misses
pub fn random_ray(rng: &mut impl Rng) -> Ray {
    let pos = random_point(rng, 30.);
    let mut dir = if rng.gen_bool(0.5) {
        random_point(rng, 10.) - pos
    } else {
        random_point(rng, 1.).to_vector()
    };
    if dir.length_squared() < 1e-6 {
        dir = Vector3::new(1., 0., 0.);
    }
    Ray::new(pos, dir)
}

#[track_caller]
pub fn assert_points_eq(a: Point3, b: Point3) {
    assert!(
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON,
        "points should be equal; got {a:?}, expected {b:?}"
    );
}
