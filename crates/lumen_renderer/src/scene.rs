//! Scene: object list, acceleration structure and ray queries.
//!
//! A scene is assembled with [`SceneBuilder`] and becomes immutable once
//! built. All queries take `&self`, so one scene can be shared across
//! render threads without locking.

use crate::bvh::BvhNode;
use crate::config::IntegratorConfig;
use crate::error::ConfigError;
use crate::light::LightTable;
use crate::sampling::gen_f32;
use crate::{Intersection, Object, Ray};
use lumen_math::{Interval, K_INFINITY};
use rand::RngCore;
use std::sync::Arc;

/// Collects objects before the acceleration structure is built.
#[derive(Default)]
pub struct SceneBuilder {
    objects: Vec<Arc<dyn Object>>,
    config: IntegratorConfig,
}

impl SceneBuilder {
    pub fn new(config: IntegratorConfig) -> Self {
        Self {
            objects: Vec::new(),
            config,
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: impl Object + 'static) -> &mut Self {
        self.objects.push(Arc::new(object));
        self
    }

    /// Add an object that is already shared.
    pub fn add_shared(&mut self, object: Arc<dyn Object>) -> &mut Self {
        self.objects.push(object);
        self
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Validate the configuration, build the BVH and the emitter table.
    pub fn build(self) -> Result<Scene, ConfigError> {
        self.config.validate()?;

        log::info!("Generating BVH for {} objects", self.objects.len());
        let bvh = BvhNode::with_leaf_size(self.objects.clone(), self.config.bvh_leaf_size);
        let lights = LightTable::new(&self.objects);

        if lights.is_empty() {
            log::warn!("Scene has no emissive objects; direct lighting will be black");
        } else {
            log::info!(
                "{} emitters, total emissive area {:.3}",
                lights.len(),
                lights.emit_area_sum()
            );
        }

        Ok(Scene {
            objects: self.objects,
            bvh,
            lights,
            config: self.config,
        })
    }
}

/// An immutable, fully built scene.
pub struct Scene {
    objects: Vec<Arc<dyn Object>>,
    bvh: BvhNode,
    lights: LightTable,
    pub(crate) config: IntegratorConfig,
}

/// A point on an emitter together with its sampling density.
#[derive(Debug, Clone, Copy)]
pub struct LightSample<'a> {
    pub intersection: Intersection<'a>,
    /// Density with respect to emissive surface area
    pub pdf: f32,
}

/// Result of a brute-force scan with [`trace`].
#[derive(Clone, Copy)]
pub struct TraceHit<'a> {
    pub object: &'a dyn Object,
    pub t_near: f32,
    pub index: u32,
}

impl Scene {
    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    pub fn objects(&self) -> &[Arc<dyn Object>] {
        &self.objects
    }

    pub fn lights(&self) -> &LightTable {
        &self.lights
    }

    /// Nearest intersection along the ray, through the BVH.
    pub fn intersect(&self, ray: &Ray) -> Intersection<'_> {
        let mut rec = Intersection::default();
        rec.happened = self
            .bvh
            .hit(ray, Interval::new(self.config.ray_t_min, K_INFINITY), &mut rec);
        rec
    }

    /// Pick a point on an emitter with probability proportional to area.
    ///
    /// Returns `None` when the scene has no emitters.
    pub fn sample_light(&self, rng: &mut dyn RngCore) -> Option<LightSample<'_>> {
        let (k, selection_pdf) = self.lights.select(gen_f32(rng))?;
        let (intersection, point_pdf) = self.objects[k].sample(rng);

        Some(LightSample {
            intersection,
            pdf: point_pdf * selection_pdf,
        })
    }

    /// Brute-force [`trace`] over this scene's own object list.
    pub fn trace_objects(&self, ray: &Ray) -> Option<TraceHit<'_>> {
        trace(ray, &self.objects)
    }
}

/// Linear scan of `objects` for the hit with the smallest positive ray
/// parameter. Used to validate accelerated queries.
pub fn trace<'a>(ray: &Ray, objects: &'a [Arc<dyn Object>]) -> Option<TraceHit<'a>> {
    let mut t_near = K_INFINITY;
    let mut nearest = None;

    for object in objects {
        let rec = object.intersect(ray, Interval::new(0.0, K_INFINITY));
        if rec.happened && rec.distance < t_near {
            t_near = rec.distance;
            nearest = Some(TraceHit {
                object: object.as_ref(),
                t_near,
                index: rec.index,
            });
        }
    }

    nearest
}
