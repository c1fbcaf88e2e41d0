//! Unidirectional path tracing estimator.
//!
//! Radiance leaving a surface is estimated as the sum of
//! - a direct term: one area-sampled point on an emitter, tested for
//!   visibility with a shadow ray;
//! - an indirect term: one material-sampled direction, continued
//!   recursively and terminated by Russian roulette.
//!
//! Every intermediate radiance value is clamped to finite, non-negative
//! components. Zero or negative densities yield a zero contribution.

use crate::sampling::gen_f32;
use crate::{Color, Intersection, Material, Ray, Scene};
use lumen_math::Vec3;
use rand::RngCore;

/// Zero out negative and non-finite components.
#[inline]
pub fn clamp_radiance(radiance: Color) -> Color {
    if radiance.is_finite() {
        radiance.max(Color::ZERO)
    } else {
        Color::new(
            finite_or_zero(radiance.x),
            finite_or_zero(radiance.y),
            finite_or_zero(radiance.z),
        )
    }
}

#[inline]
fn finite_or_zero(x: f32) -> f32 {
    if x.is_finite() {
        x.max(0.0)
    } else {
        0.0
    }
}

impl Scene {
    /// Radiance arriving along `ray` from a path that already has `depth`
    /// vertices. Paths deeper than `max_depth` and rays leaving the scene
    /// return black.
    pub fn cast_ray(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        if depth > self.config.max_depth {
            return Color::ZERO;
        }

        let hit = self.intersect(ray);
        if !hit.happened {
            return Color::ZERO;
        }

        // Ray directions are unit length by construction
        self.shade(&hit, -ray.direction(), depth, rng)
    }

    /// Outgoing radiance at `hit` toward `wo` (unit vector pointing away
    /// from the surface).
    pub fn shade(&self, hit: &Intersection<'_>, wo: Vec3, depth: u32, rng: &mut dyn RngCore) -> Color {
        if hit.material.has_emission() {
            return clamp_radiance(hit.material.emission());
        }

        let normal = hit.normal.normalize_or_zero();
        let direct = self.direct_light(hit.coords, normal, hit.material, wo, rng);
        let indirect = self.indirect_light(hit.coords, normal, hit.material, wo, depth, rng);

        clamp_radiance(direct + indirect)
    }

    /// Single-sample estimate of light arriving straight from emitters.
    pub(crate) fn direct_light(
        &self,
        p: Vec3,
        normal: Vec3,
        material: &dyn Material,
        wo: Vec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let Some(light) = self.sample_light(rng) else {
            return Color::ZERO;
        };
        if !(light.pdf > self.config.min_pdf) {
            return Color::ZERO;
        }

        let x = light.intersection.coords;
        let to_light = x - p;
        let dist2 = to_light.length_squared();
        if !(dist2 > 0.0) {
            return Color::ZERO;
        }
        let dist = dist2.sqrt();
        let ws = to_light / dist;

        // Occluded when something sits in front of the light point
        let blocker = self.intersect(&Ray::new(p, ws));
        if blocker.happened && dist - blocker.distance >= self.config.visibility_epsilon {
            return Color::ZERO;
        }

        let light_normal = light.intersection.normal.normalize_or_zero();
        let f_r = material.eval(ws, wo, normal);
        let cos_surface = ws.dot(normal).max(0.0);
        let cos_light = (-ws).dot(light_normal).max(0.0);

        clamp_radiance(light.intersection.emit * f_r * cos_surface * cos_light / dist2 / light.pdf)
    }

    /// Single-sample estimate of light arriving after further bounces.
    pub(crate) fn indirect_light(
        &self,
        p: Vec3,
        normal: Vec3,
        material: &dyn Material,
        wo: Vec3,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        if depth >= self.config.max_depth {
            return Color::ZERO;
        }

        let rr = self.config.russian_roulette;
        if gen_f32(rng) >= rr {
            return Color::ZERO;
        }

        let wi = material.sample(wo, normal, rng).normalize_or_zero();
        if wi == Vec3::ZERO {
            return Color::ZERO;
        }
        let pdf = material.pdf(wi, wo, normal);
        if !(pdf > self.config.min_pdf) {
            return Color::ZERO;
        }

        let next = self.intersect(&Ray::new(p, wi));
        // Emitters reached this way are already counted by the direct term
        if !next.happened || next.material.has_emission() {
            return Color::ZERO;
        }

        let f_r = material.eval(wi, wo, normal);
        let cos = wi.dot(normal).max(0.0);
        let incoming = self.shade(&next, -wi, depth + 1, rng);

        clamp_radiance(incoming * f_r * cos / pdf / rr)
    }
}
