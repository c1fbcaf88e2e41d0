// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Sentinel used as the initial "no hit yet" ray parameter.
pub const K_INFINITY: f32 = f32::INFINITY;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
    }

    #[test]
    fn test_k_infinity_bounds_everything() {
        assert!(1.0e30 < K_INFINITY);
        assert!(Interval::new(0.0, K_INFINITY).surrounds(1.0e30));
    }
}
