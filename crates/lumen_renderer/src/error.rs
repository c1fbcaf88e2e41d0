//! Error types for scene construction and rendering.
//!
//! Numerical edge cases inside the integrator never surface here; they
//! resolve to zero radiance. These errors cover configuration and output.

use thiserror::Error;

/// Invalid configuration values, reported when a scene or render is set up.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Russian roulette probability must be in (0, 1], got {0}")]
    RussianRoulette(f32),

    #[error("{name} must be a finite positive number, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Errors produced by the rendering front end.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}
