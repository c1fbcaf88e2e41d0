//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree built once with a naive median split and queried read-only
//! afterwards, so a single tree can serve every render thread.

use crate::{Intersection, Object, Ray};
use lumen_math::{Aabb, Interval};
use std::sync::Arc;

/// Default maximum primitives per leaf node before splitting.
pub const DEFAULT_LEAF_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf {
        objects: Vec<Arc<dyn Object>>,
        bbox: Aabb,
    },
    /// No primitives at all; never hit.
    Empty,
}

impl BvhNode {
    /// Create a BVH with the default leaf size.
    pub fn new(objects: Vec<Arc<dyn Object>>) -> Self {
        Self::with_leaf_size(objects, DEFAULT_LEAF_SIZE)
    }

    /// Create a BVH whose leaves hold at most `leaf_size` primitives.
    pub fn with_leaf_size(objects: Vec<Arc<dyn Object>>, leaf_size: usize) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }
        Self::build(objects, leaf_size.max(1))
    }

    /// Recursive median split: sort by centroid along the longest axis of
    /// the centroid bounds, split in half, recurse.
    fn build(mut objects: Vec<Arc<dyn Object>>, leaf_size: usize) -> Self {
        let n = objects.len();

        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));

        if n <= leaf_size {
            return BvhNode::Leaf {
                objects,
                bbox: bounds,
            };
        }

        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, obj| {
            let c = obj.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_unstable_by(|a, b| {
            let a_val = a.bounding_box().centroid()[axis];
            let b_val = b.bounding_box().centroid()[axis];
            a_val.partial_cmp(&b_val).unwrap_or(std::cmp::Ordering::Equal)
        });

        let right_objects = objects.split_off(n / 2);
        let left = Self::build(objects, leaf_size);
        let right = Self::build(right_objects, leaf_size);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox: bounds,
        }
    }

    /// Find the closest hit within `ray_t`, filling `rec`.
    pub fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut Intersection<'a>) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let mut hit_anything = false;
                let mut closest = ray_t.max;

                for obj in objects {
                    if obj.hit(ray, ray_t.with_max(closest), rec) {
                        hit_anything = true;
                        closest = rec.distance;
                    }
                }
                hit_anything
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.distance } else { ray_t.max };
                let hit_right = right.hit(ray, ray_t.with_max(right_max), rec);

                hit_left || hit_right
            }
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    /// Number of primitives stored under this node.
    pub fn len(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { objects, .. } => objects.len(),
            BvhNode::Branch { left, right, .. } => left.len() + right.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BvhNode::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Sphere};
    use lumen_math::Vec3;

    fn sphere_row(count: usize) -> Vec<Arc<dyn Object>> {
        (0..count)
            .map(|i| {
                Arc::new(Sphere::new(
                    Vec3::new(i as f32, 0.0, -5.0),
                    0.5,
                    Lambertian::new(Color::new(0.5, 0.5, 0.5)),
                )) as Arc<dyn Object>
            })
            .collect()
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::new(vec![]);
        assert!(bvh.is_empty());

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut rec = Intersection::default();
        assert!(!bvh.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_bvh_single_sphere() {
        let bvh = BvhNode::new(sphere_row(1));
        assert!(matches!(bvh, BvhNode::Leaf { .. }));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = Intersection::default();
        assert!(bvh.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let bvh = BvhNode::with_leaf_size(sphere_row(10), 1);
        assert_eq!(bvh.len(), 10);

        // Ray that hits the sphere at x=5
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = Intersection::default();
        assert!(bvh.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        // Sphere at z = -5, radius 0.5
        assert!((rec.coords.z - (-4.5)).abs() < 0.01);
        assert!((rec.coords.x - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_bvh_returns_closest_of_stacked_spheres() {
        let objects: Vec<Arc<dyn Object>> = (1..=6)
            .rev()
            .map(|i| {
                Arc::new(Sphere::new(
                    Vec3::new(0.0, 0.0, -3.0 * i as f32),
                    1.0,
                    Lambertian::new(Color::ONE),
                )) as Arc<dyn Object>
            })
            .collect();
        let bvh = BvhNode::with_leaf_size(objects, 1);

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut rec = Intersection::default();
        assert!(bvh.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.distance - 2.0).abs() < 1e-4);
    }
}
