use crate::core::types::{Number, Point2, Point3, Vector3};
use crate::shared::aabb::{Aabb, Bounded};
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use crate::surface::Surface;
use getset::CopyGetters;

/// A closed cylinder, aligned to the z axis: `radius` in x/y around `centre`,
/// extending `height / 2` above and below it
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct CylinderSurface {
    centre: Point3,
    radius: Number,
    height: Number,
    half_height: Number,
    aabb: Aabb,
}

// region Constructors

impl CylinderSurface {
    pub fn new(centre: impl Into<Point3>, radius: Number, height: Number) -> Self {
        let centre = centre.into();
        let half = Vector3::new(radius, radius, height / 2.);
        Self {
            centre,
            radius,
            height,
            half_height: height / 2.,
            // The circumscribing box: ±radius in x/y, ±height/2 in z
            aabb: Aabb::new(centre - half, centre + half),
        }
    }
}

// endregion Constructors

// region Surface Impl

impl Surface for CylinderSurface {
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Intersection> {
        // Degenerate cylinders (no radius or no height) never intersect
        if self.radius <= 0. || self.height <= 0. {
            return None;
        }

        let oc = ray.pos() - self.centre;
        let rd = ray.dir();

        // The closest valid candidate so far: distance, outward normal, uv
        let mut best: Option<(Number, Vector3, Point2)> = None;
        let mut consider = |dist: Number, normal: Vector3, uv: Point2| match best {
            Some((d, ..)) if d <= dist => {}
            _ => best = Some((dist, normal, uv)),
        };

        // Body: solve the quadratic of the ray projected onto the xy plane, then clamp
        // the hits to the height range
        let a = (rd.x * rd.x) + (rd.y * rd.y);
        if a > 0. {
            let half_b = (oc.x * rd.x) + (oc.y * rd.y);
            let c = (oc.x * oc.x) + (oc.y * oc.y) - (self.radius * self.radius);
            let discriminant = (half_b * half_b) - (a * c);
            if discriminant >= 0. {
                let sqrt_d = discriminant.sqrt();
                for root in [(-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a] {
                    let z = oc.z + (root * rd.z);
                    if interval.contains(&root) && z.abs() <= self.half_height {
                        let px = oc.x + (root * rd.x);
                        let py = oc.y + (root * rd.y);
                        let normal = Vector3::new(px / self.radius, py / self.radius, 0.);
                        let u = (Number::atan2(py, px) / (2. * std::f64::consts::PI)) + 0.5;
                        let v = (z + self.half_height) / self.height;
                        consider(root, normal, Point2::new(u, v));
                    }
                }
            }
        }

        // End caps: intersect the two `z = ±height/2` planes, accept hits inside the radius
        if rd.z != 0. {
            for z_sign in [1., -1.] {
                let t = ((z_sign * self.half_height) - oc.z) / rd.z;
                if !interval.contains(&t) {
                    continue;
                }
                let px = oc.x + (t * rd.x);
                let py = oc.y + (t * rd.y);
                if (px * px) + (py * py) <= self.radius * self.radius {
                    let uv = Point2::new(
                        ((px / self.radius) + 1.) / 2.,
                        ((py / self.radius) + 1.) / 2.,
                    );
                    consider(t, Vector3::new(0., 0., z_sign), uv);
                }
            }
        }

        let (dist, outward, uv) = best?;
        let front_face = Vector3::dot(rd, outward) < 0.;
        let ray_normal = if front_face { outward } else { -outward };

        Some(Intersection {
            pos_w: ray.at(dist),
            normal: outward,
            ray_normal,
            front_face,
            dist,
            uv,
            surface: 0,
        })
    }

    /// The cylinder centre (not the corner mean of its box, although for a cylinder
    /// those coincide)
    fn centre(&self) -> Point3 { self.centre }
}

impl Bounded for CylinderSurface {
    fn aabb(&self) -> Aabb { self.aabb }
}

// endregion Surface Impl
