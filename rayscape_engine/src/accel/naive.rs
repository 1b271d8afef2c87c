use crate::accel::AccelStruct;
use crate::core::types::Number;
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use crate::shared::validate;
use crate::surface::{Surface, SurfaceInstance};

/// A "fake" acceleration structure that performs a linear search over every surface,
/// with no pruning.
///
/// Mostly useful as a correctness baseline for [Bvh](crate::accel::bvh::Bvh), and for
/// scenes too small for a tree to pay for itself
#[derive(Clone, Debug)]
pub struct NaiveAccel {
    surfaces: Vec<SurfaceInstance>,
}

impl NaiveAccel {
    /// Stores the surfaces as-is; there is nothing to build
    pub fn new(surfaces: impl IntoIterator<Item = SurfaceInstance>) -> Self {
        Self {
            surfaces: surfaces.into_iter().collect(),
        }
    }
}

impl AccelStruct for NaiveAccel {
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Intersection> {
        validate::ray(ray);

        // Each surface reports its own closest valid hit; the global closest is just the
        // minimum by distance
        let best = self
            .surfaces
            .iter()
            .enumerate()
            .filter_map(|(index, surface)| {
                surface.intersect(ray, interval).map(|mut hit| {
                    hit.surface = index;
                    hit
                })
            })
            .min();

        if let Some(hit) = &best {
            validate::intersection(ray, hit, interval);
        }
        best
    }

    fn intersect_any(&self, ray: &Ray, interval: &Interval<Number>) -> bool {
        validate::ray(ray);

        self.surfaces.iter().any(|s| s.intersect(ray, interval).is_some())
    }

    fn surfaces(&self) -> &[SurfaceInstance] { &self.surfaces }
}
