//! Integrator and render configuration.
//!
//! Both structs deserialize with defaults for any missing field, so a
//! config file only needs to name the values it changes.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Parameters of the light-transport estimator.
///
/// Owned by the scene and read by `cast_ray`/`shade` on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Probability of continuing a path at each indirect bounce.
    pub russian_roulette: f32,
    /// Paths deeper than this return black.
    pub max_depth: u32,
    /// Tolerance when comparing the shadow-ray hit distance with the
    /// distance to the sampled light point.
    pub visibility_epsilon: f32,
    /// Lower bound of the ray parameter for scene queries.
    pub ray_t_min: f32,
    /// Sampling densities at or below this value contribute nothing.
    pub min_pdf: f32,
    /// Maximum primitives per BVH leaf.
    pub bvh_leaf_size: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            russian_roulette: 0.8,
            max_depth: 16,
            visibility_epsilon: 0.0005,
            ray_t_min: 0.001,
            min_pdf: 0.0,
            bvh_leaf_size: 1,
        }
    }
}

impl IntegratorConfig {
    pub fn with_russian_roulette(mut self, probability: f32) -> Self {
        self.russian_roulette = probability;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rr = self.russian_roulette;
        if !(rr > 0.0 && rr <= 1.0) {
            return Err(ConfigError::RussianRoulette(rr));
        }
        positive("visibility_epsilon", self.visibility_epsilon)?;
        if !(self.ray_t_min.is_finite() && self.ray_t_min >= 0.0) {
            return Err(ConfigError::Negative {
                name: "ray_t_min",
                value: self.ray_t_min,
            });
        }
        if !(self.min_pdf.is_finite() && self.min_pdf >= 0.0) {
            return Err(ConfigError::Negative {
                name: "min_pdf",
                value: self.min_pdf,
            });
        }
        if self.bvh_leaf_size == 0 {
            return Err(ConfigError::Zero("bvh_leaf_size"));
        }
        Ok(())
    }
}

/// Image-level sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing and noise reduction
    pub samples_per_pixel: u32,
    /// Edge length of the square buckets rendered in parallel
    pub bucket_size: u32,
    /// Base seed; each bucket derives its own stream from it
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 16,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::Zero("samples_per_pixel"));
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::Zero("bucket_size"));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
