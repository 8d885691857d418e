use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use isoterrain::export;
use isoterrain::frame::generate_frame;
use isoterrain::params::Config;
use isoterrain::seeds::TerrainSeeds;
use isoterrain::viewer;

#[derive(Parser, Debug)]
#[command(name = "isoterrain")]
#[command(about = "Generate Diamond-Square terrain and view it in isometric perspective")]
struct Args {
    /// Grid size N (must be a power of two plus one)
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Terrain roughness in (0, 1]
    #[arg(short, long)]
    roughness: Option<f64>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Viewport width in pixels
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Viewport height in pixels
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// JSON config file; command line values override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render a single frame to this PNG instead of opening a window
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Composite the exported PNG over black instead of keeping alpha
    #[arg(long)]
    flatten: bool,

    /// Keep the current terrain until R/Space is pressed
    #[arg(long)]
    hold: bool,
}

impl Args {
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(size) = self.size {
            config.terrain.size = size;
        }
        if let Some(roughness) = self.roughness {
            config.terrain.roughness = roughness;
        }
        if let Some(width) = self.width {
            config.render.width = width;
        }
        if let Some(height) = self.height {
            config.render.height = height;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    tracing::info!(
        "Terrain {}x{} roughness {}, viewport {}x{}",
        config.terrain.size,
        config.terrain.size,
        config.terrain.roughness,
        config.render.width,
        config.render.height
    );

    let Some(output) = &args.output else {
        viewer::run_viewer(&config, args.seed, args.hold)?;
        return Ok(());
    };

    let seeds = TerrainSeeds::from_master(args.seed.unwrap_or_else(rand::random));
    tracing::info!("Generating terrain with seed: {}", seeds.master);
    let frame = generate_frame(&config, seeds)?;

    if let Some((min_h, max_h)) = frame.field.height_range() {
        tracing::info!("Height range: {:.1} to {:.1}", min_h, max_h);
    }

    if args.flatten {
        export::export_frame_flattened(&frame.pixels, output)?;
    } else {
        export::export_frame(&frame.pixels, output)?;
    }
    tracing::info!("Exported frame to: {}", output.display());

    Ok(())
}
