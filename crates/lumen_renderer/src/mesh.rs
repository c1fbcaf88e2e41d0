//! Triangle meshes sharing a single material.
//!
//! A mesh is one scene object: it carries its own BVH over its triangles
//! and reports the triangle index in every intersection.

use crate::bvh::BvhNode;
use crate::sampling::gen_f32;
use crate::{Intersection, Material, Object, Ray, Triangle};
use lumen_math::{Aabb, Interval, Vec3};
use rand::RngCore;
use std::sync::Arc;

pub struct Mesh<M: Material + Clone> {
    triangles: Vec<Arc<Triangle<M>>>,
    bvh: BvhNode,
    /// Running sum of triangle areas, for area-proportional sampling
    cumulative_area: Vec<f32>,
    area: f32,
    emissive: bool,
}

impl<M: Material + Clone + 'static> Mesh<M> {
    /// Build a mesh from indexed triangles. Faces referencing missing
    /// vertices are skipped.
    pub fn new(positions: &[Vec3], faces: &[[u32; 3]], material: M) -> Self {
        let emissive = material.has_emission();
        let mut triangles = Vec::with_capacity(faces.len());

        for face in faces {
            let vertex = |i: u32| positions.get(i as usize).copied();
            match (vertex(face[0]), vertex(face[1]), vertex(face[2])) {
                (Some(v0), Some(v1), Some(v2)) => {
                    let index = triangles.len() as u32;
                    triangles.push(Arc::new(
                        Triangle::new(v0, v1, v2, material.clone()).with_index(index),
                    ));
                }
                _ => log::warn!(
                    "Skipping face {:?}: mesh has only {} vertices",
                    face,
                    positions.len()
                ),
            }
        }

        let mut area = 0.0;
        let cumulative_area = triangles
            .iter()
            .map(|t| {
                area += t.area();
                area
            })
            .collect();

        let objects: Vec<Arc<dyn Object>> = triangles
            .iter()
            .map(|t| Arc::clone(t) as Arc<dyn Object>)
            .collect();

        Self {
            triangles,
            bvh: BvhNode::new(objects),
            cumulative_area,
            area,
            emissive,
        }
    }

    /// Planar quad `a, b, c, d` split along the `a-c` diagonal. The normal
    /// follows the winding order.
    pub fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3, material: M) -> Self {
        Self::new(&[a, b, c, d], &[[0, 1, 2], [0, 2, 3]], material)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl<M: Material + Clone + 'static> Object for Mesh<M> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut Intersection<'a>) -> bool {
        self.bvh.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bvh.bounding_box()
    }

    fn area(&self) -> f32 {
        self.area
    }

    fn has_emit(&self) -> bool {
        self.emissive
    }

    fn sample(&self, rng: &mut dyn RngCore) -> (Intersection<'_>, f32) {
        if self.triangles.is_empty() || self.area <= 0.0 {
            return (Intersection::default(), 0.0);
        }

        let p = gen_f32(rng) * self.area;
        let k = self
            .cumulative_area
            .partition_point(|&c| c <= p)
            .min(self.triangles.len() - 1);
        let (point, _) = self.triangles[k].sample(rng);

        (point, 1.0 / self.area)
    }
}
