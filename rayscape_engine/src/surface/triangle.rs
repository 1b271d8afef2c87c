use crate::core::types::{Number, Point2, Point3, Vector3};
use crate::shared::aabb::{Aabb, Bounded};
use crate::shared::intersect::Intersection;
use crate::shared::interval::Interval;
use crate::shared::ray::Ray;
use crate::surface::Surface;
use getset::CopyGetters;

/// A single triangle, described by its three corner vertices
///
/// The bounding box is the vertex min/max, and the centre is the arithmetic mean of the
/// vertices (*not* the box centre); degenerate triangles (coincident vertices) are legal
/// and simply never intersect
#[derive(Copy, Clone, Debug, CopyGetters)]
#[get_copy = "pub"]
pub struct TriangleSurface {
    vertices: [Point3; 3],
    centre: Point3,
    aabb: Aabb,
}

// region Constructors

impl TriangleSurface {
    pub fn new(vertices: impl Into<[Point3; 3]>) -> Self {
        let vertices = vertices.into();
        let [a, b, c] = vertices;
        let centre = ((a.to_vector() + b.to_vector() + c.to_vector()) / 3.).to_point();
        Self {
            vertices,
            centre,
            aabb: Aabb::encompass_points(vertices),
        }
    }
}

// endregion Constructors

// region Surface Impl

impl Bounded for TriangleSurface {
    fn aabb(&self) -> Aabb { self.aabb }
}

impl Surface for TriangleSurface {
    fn intersect(&self, ray: &Ray, interval: &Interval<Number>) -> Option<Intersection> {
        /*
        CREDITS:

        Title: "Ray-Tracing: Rendering a Triangle (Möller-Trumbore algorithm)"
        Author: Scratchapixel
        URL: <https://www.scratchapixel.com/lessons/3d-basic-rendering/ray-tracing-rendering-a-triangle/moller-trumbore-ray-triangle-intersection.html>
        */

        let [v0, v1, v2] = self.vertices;

        let v0v1 = v1 - v0;
        let v0v2 = v2 - v0;
        let p_vec = Vector3::cross(ray.dir(), v0v2);
        let det = v0v1.dot(p_vec);

        // ray and triangle are parallel (or the triangle is degenerate)
        if det == 0. {
            return None;
        }

        let inv_det = 1. / det;

        let t_vec = ray.pos() - v0;
        let u = Vector3::dot(t_vec, p_vec) * inv_det;
        if u < 0. || u > 1. {
            return None;
        }

        let q_vec = Vector3::cross(t_vec, v0v1);
        let v = Vector3::dot(ray.dir(), q_vec) * inv_det;
        if v < 0. || u + v > 1. {
            return None;
        }
        let t = Vector3::dot(v0v2, q_vec) * inv_det;

        if !interval.contains(&t) {
            return None;
        }

        // Geometric normal; `det != 0` means the cross product is non-zero too
        let normal = Vector3::cross(v0v1, v0v2).try_normalize()?;
        let front_face = Vector3::dot(ray.dir(), normal) < 0.;
        let ray_normal = if front_face { normal } else { -normal };

        Some(Intersection {
            pos_w: ray.at(t),
            front_face,
            dist: t,
            uv: Point2::new(u, v),
            normal,
            ray_normal,
            surface: 0,
        })
    }

    fn centre(&self) -> Point3 { self.centre }
}

// endregion Surface Impl
