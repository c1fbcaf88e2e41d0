//! Random sampling helpers shared by materials, primitives and the camera.

use lumen_math::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform random float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform direction on the unit sphere.
pub fn uniform_sphere(u1: f32, u2: f32) -> Vec3 {
    let z = 1.0 - 2.0 * u1;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * u2;
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniform direction on the +Z hemisphere, in local coordinates.
pub fn uniform_hemisphere(u1: f32, u2: f32) -> Vec3 {
    let z = u1;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * u2;
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Density of `uniform_hemisphere` with respect to solid angle.
#[inline]
pub fn uniform_hemisphere_pdf() -> f32 {
    0.5 / PI
}

/// Barycentric weights `(b0, b1, b2)` distributed uniformly over a triangle.
pub fn uniform_triangle(u1: f32, u2: f32) -> (f32, f32, f32) {
    let su = u1.sqrt();
    (1.0 - su, su * (1.0 - u2), su * u2)
}

/// Rotate a local direction (Z up) into the frame around `normal`.
pub fn to_world(local: Vec3, normal: Vec3) -> Vec3 {
    let (tangent, bitangent) = normal.any_orthonormal_pair();
    local.x * tangent + local.y * bitangent + local.z * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f32_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_uniform_sphere_is_unit() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let d = uniform_sphere(gen_f32(&mut rng), gen_f32(&mut rng));
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_hemisphere_to_world_stays_above_surface() {
        let mut rng = StdRng::seed_from_u64(2);
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        for _ in 0..100 {
            let local = uniform_hemisphere(gen_f32(&mut rng), gen_f32(&mut rng));
            let world = to_world(local, normal);
            assert!(world.dot(normal) >= -1e-5);
            assert!((world.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_uniform_triangle_weights_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (b0, b1, b2) = uniform_triangle(gen_f32(&mut rng), gen_f32(&mut rng));
            assert!(b0 >= 0.0 && b1 >= 0.0 && b2 >= 0.0);
            assert!((b0 + b1 + b2 - 1.0).abs() < 1e-5);
        }
    }
}
