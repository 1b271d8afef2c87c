//! # Module [crate::surface]
//!
//! This module contains the submodules for the different surface (see [Surface] and
//! [SurfaceInstance]) primitive types the engine can intersect rays against.
//!
//! # DEV: Code Structure
//!
//! Surfaces are placed into named submodules, and those submodules are publicly exported.
//! Where a surface has non-trivial derived state, it is split into a "Builder" struct (the
//! publicly accessible properties) and a built "Surface" struct (immutable, with cached
//! values such as the bounding box). Every built surface gets an entry in [SurfaceInstance]
//! for static dispatch.

use crate::core::types::{Number, Point3};
use crate::shared::aabb::{Aabb, Bounded};
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use enum_dispatch::enum_dispatch;

// noinspection ALL - Used by enum_dispatch macro
#[allow(unused_imports)]
use self::{
    axis_box::AxisBoxSurface, cylinder::CylinderSurface, sphere::SphereSurface, triangle::TriangleSurface,
};

pub mod axis_box;
pub mod cylinder;
pub mod sphere;
pub mod triangle;

// region Surface traits

#[enum_dispatch]
pub trait Surface: Bounded {
    /// Attempts to perform an intersection between the given ray and the target surface
    ///
    /// # Return Value
    /// This should return the *closest* intersection that is within the given interval, else [None].
    /// Hits with a distance outside `interval` must never be reported; acceleration structures
    /// rely on this to tighten the search range as closer hits are found.
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Intersection>;

    /// Gets the representative "average" position of the surface (e.g. the centre of a sphere,
    /// or the vertex average of a triangle).
    ///
    /// Only used to order surfaces during acceleration-structure construction; it does not
    /// affect intersection correctness
    fn centre(&self) -> Point3;
}

/// An optimised implementation of [Surface], using static dispatch over the known
/// primitive kinds instead of boxed trait objects
#[enum_dispatch(Surface, Bounded)]
#[derive(Copy, Clone, Debug)]
pub enum SurfaceInstance {
    SphereSurface,
    TriangleSurface,
    AxisBoxSurface,
    CylinderSurface,
}

// endregion Surface traits
