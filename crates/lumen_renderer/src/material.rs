//! Material trait and the surface models used by the path tracer.

use crate::sampling::{gen_f32, to_world, uniform_hemisphere, uniform_hemisphere_pdf};
use lumen_math::Vec3;
use rand::RngCore;
use std::f32::consts::PI;

/// Color type alias (linear RGB radiance or reflectance)
pub type Color = Vec3;

/// Emission below this length is treated as none.
const EMISSION_EPSILON: f32 = 1e-5;

/// Trait for materials that describe how light interacts with surfaces.
///
/// `wo` points from the surface toward the viewer, `wi` toward the light;
/// both are unit vectors, as is `normal`.
pub trait Material: Send + Sync {
    /// Radiance emitted by the surface. Most materials return black.
    fn emission(&self) -> Color {
        Color::ZERO
    }

    fn has_emission(&self) -> bool {
        self.emission().length() > EMISSION_EPSILON
    }

    /// BRDF value for the pair of directions.
    fn eval(&self, wi: Vec3, wo: Vec3, normal: Vec3) -> Color;

    /// Draw an incident direction from the material's sampling distribution.
    fn sample(&self, wo: Vec3, normal: Vec3, rng: &mut dyn RngCore) -> Vec3;

    /// Solid-angle density of `sample` producing `wi`.
    fn pdf(&self, wi: Vec3, wo: Vec3, normal: Vec3) -> f32;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Lambertian {
    fn eval(&self, _wi: Vec3, wo: Vec3, normal: Vec3) -> Color {
        if wo.dot(normal) > 0.0 {
            self.albedo / PI
        } else {
            Color::ZERO
        }
    }

    fn sample(&self, _wo: Vec3, normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let local = uniform_hemisphere(gen_f32(rng), gen_f32(rng));
        to_world(local, normal)
    }

    fn pdf(&self, wi: Vec3, _wo: Vec3, normal: Vec3) -> f32 {
        if wi.dot(normal) > 0.0 {
            uniform_hemisphere_pdf()
        } else {
            0.0
        }
    }
}

/// Diffuse area light. Emits uniformly and reflects nothing.
#[derive(Debug, Clone)]
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn emission(&self) -> Color {
        self.emit
    }

    fn eval(&self, _wi: Vec3, _wo: Vec3, _normal: Vec3) -> Color {
        Color::ZERO
    }

    fn sample(&self, _wo: Vec3, normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        to_world(uniform_hemisphere(gen_f32(rng), gen_f32(rng)), normal)
    }

    fn pdf(&self, _wi: Vec3, _wo: Vec3, _normal: Vec3) -> f32 {
        0.0
    }
}
