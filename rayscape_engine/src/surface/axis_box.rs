use crate::core::types::{Number, Point2, Point3, Vector3};
use crate::shared::aabb::{Aabb, Bounded};
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use crate::surface::{Surface, SurfaceInstance};
use getset::CopyGetters;

/// A builder struct used to create an axis-aligned box
///
/// Call [Into::into] or [AxisBoxSurface::from] to create the actual surface
#[derive(Copy, Clone, Debug)]
pub struct AxisBoxBuilder {
    pub corner_1: Point3,
    pub corner_2: Point3,
}

impl AxisBoxBuilder {
    pub fn new_corners(corner_1: Point3, corner_2: Point3) -> Self { Self { corner_1, corner_2 } }
    pub fn new_centred(centre: Point3, size: Vector3) -> Self {
        Self {
            corner_1: centre + size / 2.,
            corner_2: centre - size / 2.,
        }
    }
}

/// Built instance of a box surface
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct AxisBoxSurface {
    /// Mean of the eight corners, which for an axis-aligned box is also its midpoint
    centre: Point3,
    /// Half-size of the box along each axis
    radius: Vector3,
    aabb: Aabb,
}

impl From<AxisBoxBuilder> for AxisBoxSurface {
    fn from(value: AxisBoxBuilder) -> Self {
        let aabb = Aabb::new(value.corner_1, value.corner_2);
        let corner_mean = aabb
            .corners()
            .iter()
            .fold(Vector3::ZERO, |acc, corner| acc + corner.to_vector())
            / 8.;
        Self {
            centre: corner_mean.to_point(),
            radius: aabb.size() / 2.,
            aabb,
        }
    }
}

impl From<AxisBoxBuilder> for SurfaceInstance {
    fn from(value: AxisBoxBuilder) -> SurfaceInstance { AxisBoxSurface::from(value).into() }
}

// region Surface Impl

impl Surface for AxisBoxSurface {
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Intersection> {
        // Slab test, keeping the per-axis entry/exit distances so the hit distance
        // (not just hit/miss, as with `Aabb::hit`) is known
        let t1 = (self.aabb.min() - ray.pos()) * ray.inv_dir();
        let t2 = (self.aabb.max() - ray.pos()) * ray.inv_dir();

        let tn = Vector3::new(
            Number::min(t1.x, t2.x),
            Number::min(t1.y, t2.y),
            Number::min(t1.z, t2.z),
        );
        let tf = Vector3::new(
            Number::max(t1.x, t2.x),
            Number::max(t1.y, t2.y),
            Number::max(t1.z, t2.z),
        );

        let t_near = tn.max_element();
        let t_far = tf.min_element();
        if t_near > t_far {
            return None;
        }

        // Entry distance if the ray starts outside the box, exit distance if it starts inside
        let dist = if interval.contains(&t_near) {
            t_near
        } else if interval.contains(&t_far) {
            t_far
        } else {
            return None;
        };

        let pos_w = ray.at(dist);
        let p_rel = pos_w - self.centre;
        // The hit face is the axis along which the hit point sits on the box boundary,
        // i.e. where `|p_rel| - radius` is largest (≈ 0)
        let d = p_rel.abs() - self.radius;

        let (outward, uv) = if d.x >= d.y && d.x >= d.z {
            (
                Vector3::new(p_rel.x.signum(), 0., 0.),
                Point2::new(face_frac(p_rel.y, self.radius.y), face_frac(p_rel.z, self.radius.z)),
            )
        } else if d.y >= d.z {
            (
                Vector3::new(0., p_rel.y.signum(), 0.),
                Point2::new(face_frac(p_rel.z, self.radius.z), face_frac(p_rel.x, self.radius.x)),
            )
        } else {
            (
                Vector3::new(0., 0., p_rel.z.signum()),
                Point2::new(face_frac(p_rel.x, self.radius.x), face_frac(p_rel.y, self.radius.y)),
            )
        };

        let front_face = Vector3::dot(ray.dir(), outward) < 0.;
        let ray_normal = if front_face { outward } else { -outward };

        Some(Intersection {
            pos_w,
            normal: outward,
            ray_normal,
            front_face,
            dist,
            uv,
            surface: 0,
        })
    }

    fn centre(&self) -> Point3 { self.centre }
}

impl Bounded for AxisBoxSurface {
    fn aabb(&self) -> Aabb { self.aabb }
}

// endregion Surface Impl

/// Remaps a face-local offset in `-half..=half` to `0..=1`; degenerate (zero-extent)
/// axes map to the face midpoint
fn face_frac(offset: Number, half: Number) -> Number {
    if half > 0. {
        ((offset / half) + 1.) / 2.
    } else {
        0.5
    }
}
