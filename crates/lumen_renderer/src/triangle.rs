//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::sampling::{gen_f32, uniform_triangle};
use crate::{Intersection, Material, Object, Ray};
use lumen_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// A triangle primitive.
pub struct Triangle<M: Material> {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Edges from v0, cached for intersection
    e1: Vec3,
    e2: Vec3,
    /// Geometric normal (unit length), from the winding order
    normal: Vec3,
    area: f32,
    material: M,
    bbox: Aabb,
    /// Position inside the owning mesh
    index: u32,
}

impl<M: Material> Triangle<M> {
    /// Create a new triangle from three vertices.
    ///
    /// The normal follows the right-hand rule over (v0, v1, v2).
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: M) -> Self {
        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let cross = e1.cross(e2);

        let min = v0.min(v1).min(v2);
        let max = v0.max(v1).max(v2);

        Self {
            v0,
            v1,
            v2,
            e1,
            e2,
            normal: cross.normalize_or_zero(),
            area: 0.5 * cross.length(),
            material,
            bbox: Aabb::from_points(min, max),
            index: 0,
        }
    }

    /// Set the index reported in intersections.
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }
}

impl<M: Material + 'static> Object for Triangle<M> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut Intersection<'a>) -> bool {
        let h = ray.direction().cross(self.e2);
        let a = self.e1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return false;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(self.e1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * self.e2.dot(q);
        if !ray_t.surrounds(t) {
            return false;
        }

        rec.record_hit(ray, t, self.normal, &self.material, self.index);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn area(&self) -> f32 {
        self.area
    }

    fn has_emit(&self) -> bool {
        self.material.has_emission()
    }

    fn sample(&self, rng: &mut dyn RngCore) -> (Intersection<'_>, f32) {
        let (b0, b1, b2) = uniform_triangle(gen_f32(rng), gen_f32(rng));
        let point = b0 * self.v0 + b1 * self.v1 + b2 * self.v2;
        let pdf = if self.area > 0.0 { 1.0 / self.area } else { 0.0 };
        (
            Intersection::surface_point(point, self.normal, &self.material, self.index),
            pdf,
        )
    }
}
