use crate::core::types::{Number, Point3, Vector3};
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use approx::*;
use std::borrow::Borrow;

macro_rules! debug_assert_only {
    () => {
        if cfg!(not(debug_assertions)) {
            return;
        }
    };
}

pub const EPSILON: Number = 1e-6;
pub const RELATIVE: Number = 1e-3;

#[inline(always)]
#[track_caller]
pub fn number(val: impl Borrow<Number>) {
    debug_assert_only!();

    let val = val.borrow();
    assert!(!val.is_nan(), "should not be nan; val: {val}");
}

#[inline(always)]
#[track_caller]
pub fn vector3(v: impl Borrow<Vector3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

#[inline(always)]
#[track_caller]
pub fn normal3(n: impl Borrow<Vector3>) {
    debug_assert_only!();
    let n = n.borrow();
    vector3(n);
    assert!(
        n.is_normalized(),
        "should be normalised; vec: {n:?}, len: {:?}",
        n.length()
    );
}

#[inline(always)]
#[track_caller]
pub fn point3(v: impl Borrow<Point3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

#[inline(always)]
#[track_caller]
pub fn ray(r: impl Borrow<Ray>) {
    debug_assert_only!();
    let r = r.borrow();
    normal3(r.dir());
}

/// Asserts that an intersection was valid
#[inline(always)]
#[track_caller]
pub fn intersection(
    ray: impl Borrow<Ray>,
    intersect: impl Borrow<Intersection>,
    interval: impl Borrow<Interval<Number>>,
) {
    debug_assert_only!();

    let intersect = intersect.borrow();
    let interval = interval.borrow();
    let ray = ray.borrow();

    point3(intersect.pos_w);
    number(intersect.dist);

    // Surfaces must only ever report hits inside the interval they were given
    assert!(
        interval.contains(&intersect.dist),
        "intersect dist {} not in interval {}",
        intersect.dist,
        interval
    );

    // Hit position should match the ray evaluated at the hit distance
    let ray_pos = ray.at(intersect.dist);
    assert_relative_eq!(intersect.pos_w.x, ray_pos.x, epsilon = EPSILON, max_relative = RELATIVE);
    assert_relative_eq!(intersect.pos_w.y, ray_pos.y, epsilon = EPSILON, max_relative = RELATIVE);
    assert_relative_eq!(intersect.pos_w.z, ray_pos.z, epsilon = EPSILON, max_relative = RELATIVE);

    normal3(intersect.ray_normal);
    normal3(intersect.normal);
}
