//! Command-line front end: renders the Cornell box to an image file.

mod cornell;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render, IntegratorConfig, RenderConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Render the Cornell box with the Lumen path tracer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// Image width in pixels.
    #[arg(long, value_name = "NUM", default_value_t = 784)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, value_name = "NUM", default_value_t = 784)]
    height: u32,

    /// Samples per pixel.
    #[arg(long, value_name = "NUM")]
    spp: Option<u32>,

    /// Seed for the per-bucket random streams.
    #[arg(long, value_name = "NUM")]
    seed: Option<u64>,

    /// Paths deeper than this return black.
    #[arg(long, value_name = "NUM")]
    max_depth: Option<u32>,

    /// Probability of continuing a path at each bounce, in (0, 1].
    #[arg(long, value_name = "FLOAT")]
    russian_roulette: Option<f32>,

    /// Size in pixels of square buckets rendered per task.
    #[arg(long, value_name = "NUM")]
    bucket_size: Option<u32>,

    /// JSON file with `integrator` and `render` sections.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image; the format follows the extension.
    #[arg(long, short = 'o', value_name = "FILE", default_value = "lumen.png")]
    output: PathBuf,
}

/// Settings read from `--config`. Missing sections keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    integrator: IntegratorConfig,
    render: RenderConfig,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Command-line flags win over the file.
    fn apply(&mut self, options: &Options) {
        if let Some(spp) = options.spp {
            self.render.samples_per_pixel = spp;
        }
        if let Some(seed) = options.seed {
            self.render.seed = seed;
        }
        if let Some(bucket_size) = options.bucket_size {
            self.render.bucket_size = bucket_size;
        }
        if let Some(max_depth) = options.max_depth {
            self.integrator.max_depth = max_depth;
        }
        if let Some(rr) = options.russian_roulette {
            self.integrator.russian_roulette = rr;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let options = Options::parse();

    let mut config = match &options.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    config.apply(&options);
    log::debug!("Effective configuration: {:?}", config);

    let scene = cornell::scene(config.integrator).context("Failed to build scene")?;
    let camera = cornell::camera(options.width, options.height);

    let image = render(&scene, &camera, &config.render).context("Render failed")?;
    image
        .save(&options.output)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    Ok(())
}
