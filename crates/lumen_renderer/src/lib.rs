//! Lumen - CPU Path Tracing
//!
//! A Monte Carlo path tracer for physically-based rendering. Scenes are
//! built once with [`SceneBuilder`], then queried concurrently: each
//! camera sample calls [`Scene::cast_ray`], which combines explicit
//! light sampling with Russian-roulette terminated indirect bounces.

mod bucket;
mod bvh;
mod camera;
mod config;
mod error;
mod integrator;
mod intersection;
mod light;
mod material;
mod mesh;
mod object;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::{BvhNode, DEFAULT_LEAF_SIZE};
pub use camera::Camera;
pub use config::{IntegratorConfig, RenderConfig};
pub use error::{ConfigError, RenderError};
pub use integrator::clamp_radiance;
pub use intersection::Intersection;
pub use light::LightTable;
pub use material::{Color, DiffuseLight, Lambertian, Material};
pub use mesh::Mesh;
pub use object::Object;
pub use renderer::{color_to_rgba, linear_to_gamma, render, render_pixel, ImageBuffer};
pub use scene::{trace, LightSample, Scene, SceneBuilder, TraceHit};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Interval, Ray, Vec3, K_INFINITY};
