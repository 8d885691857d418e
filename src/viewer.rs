use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rayon::prelude::*;
use tracing::info;

use crate::color::over_black;
use crate::error::ViewerError;
use crate::frame::{generate_frame, Frame};
use crate::params::Config;
use crate::raster::PixelBuffer;
use crate::seeds::TerrainSeeds;

/// Convert a rendered RGBA frame into minifb's `0RGB` layout, compositing over black.
pub fn to_display_buffer(pixels: &PixelBuffer, display: &mut Vec<u32>) {
    pixels
        .as_slice()
        .par_iter()
        .map(|&color| over_black(color))
        .collect_into_vec(display);
}

/// Run the interactive terrain viewer.
///
/// Without `hold` a fresh terrain is generated for every displayed frame. With `hold` the
/// current terrain stays up until R or Space is pressed. Escape or closing the window exits.
pub fn run_viewer(
    config: &Config,
    initial_seed: Option<u64>,
    hold: bool,
) -> Result<(), ViewerError> {
    config.validate()?;

    let width = config.render.width;
    let height = config.render.height;

    let mut window = Window::new(
        "Terrain Generation - R/Space: Regenerate, Esc: Exit",
        width,
        height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;

    // Limit to ~60fps
    window.set_target_fps(60);

    let seed = initial_seed.unwrap_or_else(rand::random);
    let mut frame = generate_frame(config, TerrainSeeds::from_master(seed))?;
    let mut display = Vec::with_capacity(width * height);
    to_display_buffer(&frame.pixels, &mut display);

    info!(seed, hold, "viewer started");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let regenerate = !hold
            || window.is_key_pressed(Key::R, KeyRepeat::No)
            || window.is_key_pressed(Key::Space, KeyRepeat::No);

        if regenerate {
            frame = next_frame(config, &frame, hold)?;
            to_display_buffer(&frame.pixels, &mut display);
        }

        window.update_with_buffer(&display, width, height)?;
    }

    info!(seed = frame.seeds.master, "viewer closed");
    Ok(())
}

fn next_frame(config: &Config, previous: &Frame, announce: bool) -> Result<Frame, ViewerError> {
    let seed: u64 = rand::random();
    if announce {
        info!(seed, previous = previous.seeds.master, "regenerating terrain");
    }
    Ok(generate_frame(config, TerrainSeeds::from_master(seed))?)
}
