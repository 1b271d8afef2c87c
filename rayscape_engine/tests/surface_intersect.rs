//! Direct intersection tests for each primitive kind against known geometry.
//!
//! These matter because the BVH-vs-naive equivalence tests share the primitive code
//! between both structures, so a broken primitive would cancel out there.

use approx::assert_relative_eq;
use rayscape_engine::core::types::{Number, Point3, Vector3};
use rayscape_engine::shared::interval::Interval;
use rayscape_engine::shared::ray::{Ray, RAY_EPSILON};
use rayscape_engine::surface::axis_box::AxisBoxBuilder;
use rayscape_engine::surface::cylinder::CylinderSurface;
use rayscape_engine::surface::sphere::{SphereBuilder, SphereSurface};
use rayscape_engine::surface::triangle::TriangleSurface;
use rayscape_engine::surface::{Surface, SurfaceInstance};

mod common;
use common::{assert_points_eq, EPSILON};

fn offset_ray(pos: impl Into<Point3>, dir: impl Into<Vector3>) -> (Ray, Interval<Number>) {
    (Ray::new(pos.into(), dir.into()), Interval::from(RAY_EPSILON..))
}

#[test]
fn sphere_head_on() {
    let s = SphereSurface::from(SphereBuilder {
        pos: Point3::ZERO,
        radius: 1.,
    });

    let (ray, i) = offset_ray([0., 0., -5.], [0., 0., 1.]);
    let hit = s.intersect(&ray, &i).expect("ray points straight at the sphere");
    assert_relative_eq!(hit.dist, 4., epsilon = EPSILON);
    assert_points_eq(hit.pos_w, [0., 0., -1.].into());
    assert_points_eq(hit.normal.to_point(), [0., 0., -1.].into());
    assert!(hit.front_face);

    // From inside, the closer root is behind the start; the far one gets reported
    let (ray, i) = offset_ray([0., 0., 0.], [0., 0., 1.]);
    let hit = s.intersect(&ray, &i).expect("ray starts inside the sphere");
    assert_relative_eq!(hit.dist, 1., epsilon = EPSILON);
    assert!(!hit.front_face);

    // Far bound cuts the hit off
    let (ray, _) = offset_ray([0., 0., -5.], [0., 0., 1.]);
    assert!(s.intersect(&ray, &Interval::from(RAY_EPSILON..3.)).is_none());
}

#[test]
fn sphere_miss() {
    let s = SphereSurface::from(SphereBuilder {
        pos: Point3::ZERO,
        radius: 1.,
    });

    let (ray, i) = offset_ray([0., 0., -5.], [0., 1., 0.]);
    assert!(s.intersect(&ray, &i).is_none());

    // Pointing directly away
    let (ray, i) = offset_ray([0., 0., -5.], [0., 0., -1.]);
    assert!(s.intersect(&ray, &i).is_none());
}

#[test]
fn degenerate_sphere_never_hits() {
    let s = SphereSurface::from(SphereBuilder {
        pos: Point3::ZERO,
        radius: 0.,
    });
    let (ray, i) = offset_ray([0., 0., -5.], [0., 0., 1.]);
    assert!(s.intersect(&ray, &i).is_none());
}

#[test]
fn triangle_barycentric_hit() {
    let t = TriangleSurface::new([
        Point3::new(0., 0., 0.),
        Point3::new(1., 0., 0.),
        Point3::new(0., 1., 0.),
    ]);

    let (ray, i) = offset_ray([0.25, 0.25, -1.], [0., 0., 1.]);
    let hit = t.intersect(&ray, &i).expect("ray hits inside the triangle");
    assert_relative_eq!(hit.dist, 1., epsilon = EPSILON);
    assert_points_eq(hit.pos_w, [0.25, 0.25, 0.].into());
    assert_relative_eq!(hit.uv.x, 0.25, epsilon = EPSILON);
    assert_relative_eq!(hit.uv.y, 0.25, epsilon = EPSILON);
    // Geometric normal is +z; the ray travels along +z, so this is the back face
    assert!(!hit.front_face);
    assert_points_eq(hit.ray_normal.to_point(), [0., 0., -1.].into());

    // Outside the barycentric range: past the hypotenuse
    let (ray, i) = offset_ray([0.75, 0.75, -1.], [0., 0., 1.]);
    assert!(t.intersect(&ray, &i).is_none());

    // Parallel to the triangle plane
    let (ray, i) = offset_ray([0., 0., 1.], [1., 0., 0.]);
    assert!(t.intersect(&ray, &i).is_none());
}

#[test]
fn degenerate_triangle_never_hits() {
    let t = TriangleSurface::new([Point3::ZERO, Point3::ZERO, Point3::ZERO]);
    let (ray, i) = offset_ray([0., 0., -5.], [0., 0., 1.]);
    assert!(t.intersect(&ray, &i).is_none());
}

#[test]
fn axis_box_entry_and_exit() {
    let b: SurfaceInstance = AxisBoxBuilder::new_corners(Point3::ZERO, Point3::new(2., 2., 2.)).into();

    let (ray, i) = offset_ray([-3., 1., 1.], [1., 0., 0.]);
    let hit = b.intersect(&ray, &i).expect("ray points at the box");
    assert_relative_eq!(hit.dist, 3., epsilon = EPSILON);
    assert_points_eq(hit.pos_w, [0., 1., 1.].into());
    assert_points_eq(hit.normal.to_point(), [-1., 0., 0.].into());
    assert!(hit.front_face);

    // Starting inside: the reported hit is the exit face, with the normal still outward
    let (ray, i) = offset_ray([1., 1., 1.], [1., 0., 0.]);
    let hit = b.intersect(&ray, &i).expect("ray starts inside the box");
    assert_relative_eq!(hit.dist, 1., epsilon = EPSILON);
    assert_points_eq(hit.pos_w, [2., 1., 1.].into());
    assert_points_eq(hit.normal.to_point(), [1., 0., 0.].into());
    assert_points_eq(hit.ray_normal.to_point(), [-1., 0., 0.].into());
    assert!(!hit.front_face);

    let (ray, i) = offset_ray([-3., 5., 1.], [1., 0., 0.]);
    assert!(b.intersect(&ray, &i).is_none());
}

#[test]
fn cylinder_body_hit() {
    let c = CylinderSurface::new(Point3::ZERO, 1., 2.);

    let (ray, i) = offset_ray([-5., 0., 0.], [1., 0., 0.]);
    let hit = c.intersect(&ray, &i).expect("ray points at the cylinder body");
    assert_relative_eq!(hit.dist, 4., epsilon = EPSILON);
    assert_points_eq(hit.pos_w, [-1., 0., 0.].into());
    assert_points_eq(hit.normal.to_point(), [-1., 0., 0.].into());
    assert!(hit.front_face);

    // Same ray, but shifted above the body (and parallel to the caps): miss
    let (ray, i) = offset_ray([-5., 0., 1.5], [1., 0., 0.]);
    assert!(c.intersect(&ray, &i).is_none());
}

#[test]
fn cylinder_cap_hit() {
    let c = CylinderSurface::new(Point3::ZERO, 1., 2.);

    let (ray, i) = offset_ray([0., 0., 5.], [0., 0., -1.]);
    let hit = c.intersect(&ray, &i).expect("ray points at the top cap");
    assert_relative_eq!(hit.dist, 4., epsilon = EPSILON);
    assert_points_eq(hit.pos_w, [0., 0., 1.].into());
    assert_points_eq(hit.normal.to_point(), [0., 0., 1.].into());
    assert!(hit.front_face);

    // Aimed past the cap radius
    let (ray, i) = offset_ray([2., 0., 5.], [0., 0., -1.]);
    assert!(c.intersect(&ray, &i).is_none());
}

#[test]
fn cylinder_oblique_picks_closest() {
    let c = CylinderSurface::new(Point3::ZERO, 1., 2.);

    // Horizontal ray through the upper half of the body, away from both caps
    let (ray, i) = offset_ray([-5., 0., 0.5], [1., 0., 0.]);
    let hit = c.intersect(&ray, &i).expect("body hit within the height range");
    assert_relative_eq!(hit.dist, 4., epsilon = EPSILON);
    assert_points_eq(hit.pos_w, [-1., 0., 0.5].into());
}
