//! Object trait for scene primitives.

use crate::{Intersection, Ray};
use lumen_math::{Aabb, Interval};
use rand::RngCore;

/// Trait for anything that can be placed in a scene: hit by rays and,
/// when emissive, sampled as a light.
pub trait Object: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true if hit, and fills in the record.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut Intersection<'a>) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Total surface area.
    fn area(&self) -> f32;

    /// Whether the surface emits light.
    fn has_emit(&self) -> bool;

    /// Pick a point uniformly on the surface.
    ///
    /// Returns the point (with its outward normal and emission) and the
    /// density of the choice with respect to surface area.
    fn sample(&self, rng: &mut dyn RngCore) -> (Intersection<'_>, f32);

    /// Nearest hit within `ray_t`, or a miss record.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Intersection<'_> {
        let mut rec = Intersection::default();
        rec.happened = self.hit(ray, ray_t, &mut rec);
        rec
    }
}
