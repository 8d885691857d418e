//! One complete terrain frame: generate a height field, then rasterize it.

use tracing::debug;

use crate::error::TerrainError;
use crate::heightmap::{generate_heightfield, HeightField};
use crate::params::Config;
use crate::raster::{PixelBuffer, Rasterizer};
use crate::seeds::TerrainSeeds;

/// A generated terrain and the pixels it rendered to.
#[derive(Clone, Debug)]
pub struct Frame {
    pub seeds: TerrainSeeds,
    pub field: HeightField,
    pub pixels: PixelBuffer,
}

/// Generate and render a frame. Both parameter sets are validated first.
pub fn generate_frame(config: &Config, seeds: TerrainSeeds) -> Result<Frame, TerrainError> {
    config.validate()?;

    let rasterizer = Rasterizer::new(config.render)?.with_shimmer_seed(seeds.shimmer);
    let field = generate_heightfield(&config.terrain, &mut seeds.heightmap_rng())?;
    let pixels = rasterizer.render(&field);

    debug!(
        seed = seeds.master,
        size = field.size(),
        painted = pixels.filled_count(),
        "frame ready"
    );

    Ok(Frame { seeds, field, pixels })
}
