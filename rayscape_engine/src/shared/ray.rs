use crate::core::types::{Number, Point3, Vector3};

/// This quantity represents a "small amount" to handle comparisons in floating-point
/// computations. Rays cast from a surface should start at [RAY_EPSILON] (not zero), so that
/// numerical inaccuracies don't cause the ray to re-intersect the surface it left from.
pub const RAY_EPSILON: Number = 1e-3;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Ray {
    pos: Point3,
    dir: Vector3,
    inv_dir: Vector3,
}

impl Ray {
    pub fn new(pos: Point3, dir: Vector3) -> Self {
        let dir = dir.normalize();
        Self {
            pos,
            dir,
            inv_dir: dir.recip(),
        }
    }

    /// Creates a new ray, without normalising the direction vector
    ///
    /// # Safety
    /// Unsafe as it does not normalise the direction, assuming the caller
    /// provided a correct vector, possibly breaking the invariant of a normalised direction
    pub unsafe fn new_unchecked(pos: Point3, dir: Vector3) -> Self {
        Self {
            pos,
            dir,
            inv_dir: dir.recip(),
        }
    }

    /// World-space coordinate of the ray
    #[inline(always)]
    pub fn pos(&self) -> Point3 { self.pos }

    /// Direction vector of the ray.
    ///
    /// # Requirements
    /// Must be normalised
    #[inline(always)]
    pub fn dir(&self) -> Vector3 { self.dir }

    /// Cached component-wise reciprocal of [dir](fn@Self::dir), for slab tests
    #[inline(always)]
    pub fn inv_dir(&self) -> Vector3 { self.inv_dir }

    /// Gets the position at a given distance along the ray
    ///
    /// `pos + (t * dir)`
    pub fn at(&self, t: Number) -> Point3 { self.pos + (self.dir * t) }
}
