//! Result record of a ray-scene query.

use crate::{Color, Material, Ray};
use lumen_math::{Vec3, K_INFINITY};
use rand::RngCore;

/// Material used by `Intersection::default()`.
/// Black, non-emissive and never scatters.
struct NullMaterial;

impl Material for NullMaterial {
    fn eval(&self, _wi: Vec3, _wo: Vec3, _normal: Vec3) -> Color {
        Color::ZERO
    }

    fn sample(&self, _wo: Vec3, normal: Vec3, _rng: &mut dyn RngCore) -> Vec3 {
        normal
    }

    fn pdf(&self, _wi: Vec3, _wo: Vec3, _normal: Vec3) -> f32 {
        0.0
    }
}

static NULL_MATERIAL: NullMaterial = NullMaterial;

/// Record of a ray-object intersection.
///
/// Only `happened` is meaningful when no hit was found. The material is
/// borrowed from the object that produced the hit, so a record cannot
/// outlive the scene.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Whether anything was hit
    pub happened: bool,
    /// Point of intersection
    pub coords: Vec3,
    /// Surface normal, facing against the incoming ray for hits and
    /// outward for light samples
    pub normal: Vec3,
    /// Ray parameter of the hit
    pub distance: f32,
    /// Radiance emitted by the surface (zero for non-emitters)
    pub emit: Color,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Primitive index inside the owning object (triangle index for meshes)
    pub index: u32,
}

impl Default for Intersection<'_> {
    fn default() -> Self {
        Self {
            happened: false,
            coords: Vec3::ZERO,
            normal: Vec3::ZERO,
            distance: K_INFINITY,
            emit: Color::ZERO,
            material: &NULL_MATERIAL,
            index: 0,
        }
    }
}

impl<'a> Intersection<'a> {
    /// Store the normal so that it faces against the ray.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.normal = if ray.direction().dot(outward_normal) < 0.0 {
            outward_normal
        } else {
            -outward_normal
        };
    }

    /// Fill in the record for a hit at parameter `t` on a surface with the
    /// given material.
    pub fn record_hit(
        &mut self,
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        material: &'a dyn Material,
        index: u32,
    ) {
        self.happened = true;
        self.distance = t;
        self.coords = ray.at(t);
        self.set_face_normal(ray, outward_normal);
        self.emit = material.emission();
        self.material = material;
        self.index = index;
    }

    /// A surface point produced by light sampling rather than a ray query.
    pub fn surface_point(coords: Vec3, normal: Vec3, material: &'a dyn Material, index: u32) -> Self {
        Self {
            happened: true,
            coords,
            normal,
            distance: 0.0,
            emit: material.emission(),
            material,
            index,
        }
    }
}

impl std::fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intersection")
            .field("happened", &self.happened)
            .field("coords", &self.coords)
            .field("normal", &self.normal)
            .field("distance", &self.distance)
            .field("emit", &self.emit)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffuseLight, Lambertian};

    #[test]
    fn test_default_is_a_miss() {
        let rec = Intersection::default();

        assert!(!rec.happened);
        assert_eq!(rec.distance, K_INFINITY);
        assert!(!rec.material.has_emission());
        assert_eq!(rec.emit, Color::ZERO);
    }

    #[test]
    fn test_face_normal_faces_the_ray() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);
        let mut rec = Intersection::default();

        rec.set_face_normal(&ray, Vec3::Y);
        assert_eq!(rec.normal, Vec3::Y);

        rec.set_face_normal(&ray, -Vec3::Y);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_record_hit_copies_emission() {
        let light = DiffuseLight::new(Color::splat(4.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = Intersection::default();

        rec.record_hit(&ray, 2.0, -Vec3::Z, &light, 3);

        assert!(rec.happened);
        assert_eq!(rec.coords, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(rec.emit, Color::splat(4.0));
        assert_eq!(rec.index, 3);

        let diffuse = Lambertian::new(Color::splat(0.5));
        rec.record_hit(&ray, 1.0, -Vec3::Z, &diffuse, 0);
        assert_eq!(rec.emit, Color::ZERO);
    }
}
