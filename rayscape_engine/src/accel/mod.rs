//! # Module [crate::accel]
//!
//! Acceleration structures for ray-surface intersection queries.
//!
//! Both structures are built once from the finalised surface list and are immutable
//! afterwards; swapping between them is transparent to the consumer via [AccelInstance].

use crate::core::types::Number;
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use crate::surface::SurfaceInstance;
use enum_dispatch::enum_dispatch;

// noinspection ALL - Used by enum_dispatch macro
#[allow(unused_imports)]
use self::{bvh::Bvh, naive::NaiveAccel};

pub mod bvh;
pub mod naive;

// region AccelStruct traits

#[enum_dispatch]
pub trait AccelStruct {
    /// Finds the closest intersection of `ray` with the scene, within the given distance
    /// interval
    ///
    /// # Return Value
    /// The intersection with the smallest valid parametric distance, else [None] if nothing
    /// was hit. The returned record's `surface` field is the index of the hit surface in
    /// [Self::surfaces]
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Intersection>;

    /// Checks whether `ray` intersects *any* surface within the given interval, without
    /// finding the closest one
    ///
    /// Considerably faster than [Self::intersect] for occlusion (shadow) queries, where
    /// only boolean visibility matters; which surface gets found first is unspecified
    fn intersect_any(&self, ray: &Ray, interval: &Interval<Number>) -> bool;

    /// The surfaces this structure was built over.
    ///
    /// Note that construction may have reordered them; the ordering is stable for the
    /// lifetime of the structure, and [Intersection::surface] indexes into this slice
    fn surfaces(&self) -> &[SurfaceInstance];
}

/// An optimised implementation of [AccelStruct], allowing the consumer to choose an
/// acceleration strategy without generics bleeding into the renderer
#[enum_dispatch(AccelStruct)]
#[derive(Clone, Debug)]
pub enum AccelInstance {
    Bvh,
    NaiveAccel,
}

// Built structures are queried from many render threads at once
static_assertions::assert_impl_all!(AccelInstance: Send, Sync);

// endregion AccelStruct traits
