//! Image-level rendering on top of the path tracing integrator.
//!
//! Implements:
//! - Bucket-parallel rendering with rayon
//! - Per-bucket seeded random streams for reproducible output
//! - Gamma correction and 8-bit export through the `image` crate

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::error::{ConfigError, RenderError};
use crate::{Camera, Color, RenderConfig, Scene};
use rand::RngCore;
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * clamp_01(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * clamp_01(linear_to_gamma(color.z))) as u8;
    [r, g, b, 255]
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: u32,
    y: u32,
    samples_per_pixel: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples_per_pixel {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += scene.cast_ray(&ray, 0, rng);
    }

    pixel_color / samples_per_pixel.max(1) as f32
}

/// Number of pixels in a `width` x `height` frame, computed in `usize`.
#[inline]
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Linear radiance for every pixel of a frame.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; pixel_count(width, height)],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a finished bucket into the frame.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(pixel_count(self.width, self.height) * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the gamma-corrected image. The format follows the file
    /// extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba())
            .ok_or(RenderError::BufferSize {
                width: self.width,
                height: self.height,
            })?;
        image.save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render the entire frame, one rayon task per bucket.
///
/// Each bucket draws from its own stream seeded by `config.seed` and the
/// bucket index, so a given seed always produces the same image.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let width = camera.image_width;
    let height = camera.image_height;
    if width == 0 {
        return Err(ConfigError::Zero("image width").into());
    }
    if height == 0 {
        return Err(ConfigError::Zero("image height").into());
    }
    let buckets = generate_buckets(width, height, config.bucket_size);
    let total = buckets.len();
    let completed = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets",
        width,
        height,
        config.samples_per_pixel,
        total
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, scene, camera, config.samples_per_pixel, config.seed);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {}/{} done", done, total);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffuseLight, IntegratorConfig, Lambertian, SceneBuilder, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> Scene {
        let mut builder = SceneBuilder::new(IntegratorConfig::default().with_max_depth(4));
        builder
            .add(Sphere::new(
                Vec3::new(0.0, 0.0, -1.0),
                0.5,
                Lambertian::new(Color::new(0.5, 0.5, 0.5)),
            ))
            .add(Sphere::new(
                Vec3::new(0.0, 1.5, 0.5),
                0.5,
                DiffuseLight::new(Color::splat(4.0)),
            ));
        builder.build().unwrap()
    }

    fn camera(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new().with_resolution(width, height);
        camera.initialize();
        camera
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_pixel_count_does_not_wrap() {
        assert_eq!(pixel_count(70_000, 70_000) as u64, 4_900_000_000);
        assert_eq!(pixel_count(u32::MAX, 2) as u64, 2 * u32::MAX as u64);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(-1.0, 0.25, 9.0)), [0, 127, 255, 255]);
    }

    #[test]
    fn test_render_pixel_sees_lit_sphere() {
        let scene = scene();
        let camera = camera(10, 10);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel hits the front of the diffuse sphere, lit from above
        let color = render_pixel(&scene, &camera, 5, 5, 16, &mut rng);
        assert!(color.length() > 0.0);
    }

    #[test]
    fn test_render_is_deterministic_per_seed() {
        let scene = scene();
        let camera = camera(24, 16);
        let config = RenderConfig {
            samples_per_pixel: 2,
            bucket_size: 8,
            seed: 5,
        };

        let a = render(&scene, &camera, &config).unwrap();
        let b = render(&scene, &camera, &config).unwrap();
        assert_eq!(a.pixels, b.pixels);

        let other = render(&scene, &camera, &RenderConfig { seed: 6, ..config }).unwrap();
        assert_ne!(a.pixels, other.pixels);
    }

    #[test]
    fn test_render_rejects_zero_samples() {
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };
        let result = render(&scene(), &camera(4, 4), &config);
        assert!(matches!(result, Err(RenderError::Config(_))));

        let empty = render(&scene(), &camera(0, 4), &RenderConfig::default());
        assert!(matches!(
            empty,
            Err(RenderError::Config(ConfigError::Zero("image width")))
        ));
    }

    #[test]
    fn test_write_bucket_places_pixels() {
        let bucket = crate::Bucket::new(2, 1, 2, 2, 0);
        let colors = vec![Color::X, Color::Y, Color::Z, Color::ONE];
        let mut image = ImageBuffer::new(4, 4);

        image.write_bucket(&BucketResult::new(bucket, colors));

        assert_eq!(image.get(2, 1), Color::X);
        assert_eq!(image.get(3, 1), Color::Y);
        assert_eq!(image.get(2, 2), Color::Z);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_save_png() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(1, 1, Color::ONE);
        let path = std::env::temp_dir().join(format!("lumen_save_{}.png", std::process::id()));

        image.save(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(loaded.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
