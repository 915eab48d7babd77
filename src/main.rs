use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use riw::{load_parameters, validate, Camera, CameraConfig, DemoScene, OutputFormat};
use std::path::Path;
use std::time::Instant;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

/// Command-line values win over the parameters file and over scene framing.
fn apply_overrides(config: &mut CameraConfig, args: &Args) {
    if let Some(width) = args.width {
        config.image_width = width;
    }
    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
}

fn render_scene(demo: DemoScene, base: &CameraConfig, args: &Args, output_dir: &Path, format: OutputFormat) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(base.seed);
    let (scene, mut config) = demo.build(base, &mut rng);
    apply_overrides(&mut config, args);

    let camera = Camera::new(&config);
    let start = Instant::now();
    let raster = camera.render(&scene);
    info!("Rendered {} in {:.2?}", demo, start.elapsed());

    let path = output_dir.join(format!("{}.{}", demo.name(), format.extension()));
    raster
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());
    info!("Start working with raytracing");

    let mut base = load_parameters(&args.config, CameraConfig::default())
        .with_context(|| format!("Failed to load parameters from {}", args.config.display()))?;
    apply_overrides(&mut base, &args);
    validate(&base).context("Invalid command-line override")?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output directory {}", args.output_dir.display()))?;

    let scenes: Vec<DemoScene> = match args.scene {
        Some(index) => DemoScene::from_index(index as usize).into_iter().collect(),
        None => DemoScene::ALL.to_vec(),
    };
    for demo in scenes {
        info!("Chosen: {}", demo);
        render_scene(demo, &base, &args, &args.output_dir, args.format)?;
    }
    Ok(())
}
