//! Rasterization of a height field into a packed RGBA pixel buffer.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::color::{pack_rgba, slope_alpha};
use crate::error::TerrainError;
use crate::heightmap::HeightField;
use crate::params::RenderParams;
use crate::projection::{Projector, ScreenPoint};
use crate::tilemap::Tilemap;

// =============================================================================
// PIXEL BUFFER
// =============================================================================

/// W x H row-major buffer of `0xRRGGBBAA` pixels, top-left origin.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pixels: Tilemap<u32>,
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Tilemap::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.width
    }

    pub fn height(&self) -> usize {
        self.pixels.height
    }

    pub fn get(&self, x: i64, y: i64) -> Option<u32> {
        self.pixels.get(x, y).copied()
    }

    /// Write one pixel; off-screen writes are dropped.
    pub fn set(&mut self, x: i64, y: i64, color: u32) {
        self.pixels.set(x, y, color);
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn as_slice(&self) -> &[u32] {
        self.pixels.as_slice()
    }

    /// Pixels as R, G, B, A bytes in row-major order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.as_slice().iter().flat_map(|p| p.to_be_bytes()).collect()
    }

    /// Number of non-transparent pixels.
    pub fn filled_count(&self) -> usize {
        self.as_slice().iter().filter(|&&p| p != 0).count()
    }

    /// Overwrite the half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the buffer.
    ///
    /// An empty or inverted rectangle draws nothing.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: u32) {
        let width = self.width() as i64;
        let height = self.height() as i64;

        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(width);
        let y1 = y1.min(height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let row_len = self.width();
        let data = self.pixels.as_mut_slice();
        for y in y0..y1 {
            let start = y as usize * row_len;
            data[start + x0 as usize..start + x1 as usize].fill(color);
        }
    }
}

// =============================================================================
// RASTERIZER
// =============================================================================

/// Projects every cell of a height field and paints it as a water column with terrain on top.
#[derive(Clone, Debug)]
pub struct Rasterizer {
    params: RenderParams,
    shimmer_seed: u64,
}

impl Rasterizer {
    pub fn new(params: RenderParams) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self {
            params,
            shimmer_seed: 0,
        })
    }

    /// Seed for the per-cell water alpha. The same seed always gives the same shimmer.
    pub fn with_shimmer_seed(mut self, seed: u64) -> Self {
        self.shimmer_seed = seed;
        self
    }

    /// Horizontal shift that centers an N-wide grid in the configured viewport.
    pub fn screen_offset(&self, size: usize) -> i64 {
        center_offset(self.params.width, size)
    }

    /// Render `field` into a fresh buffer.
    pub fn render(&self, field: &HeightField) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(self.params.width, self.params.height);
        self.render_into(field, &mut buffer);
        buffer
    }

    /// Clear `buffer` and render `field` into it, walking cells z-major then x.
    ///
    /// Later cells overwrite earlier ones where their rectangles overlap.
    pub fn render_into(&self, field: &HeightField, buffer: &mut PixelBuffer) {
        buffer.clear();

        let size = field.size();
        let last = size as i64 - 1;
        let projector = Projector::new(size);
        let offset = center_offset(buffer.width(), size);
        let water_height = self.params.water_level * size as f64;
        let mut shimmer = ChaCha8Rng::seed_from_u64(self.shimmer_seed);

        for z in 0..size as i64 {
            for x in 0..size as i64 {
                let height = field.height_at(x, z).unwrap_or(0.0);
                let top = projector.project(x, z, height);
                let bottom = projector.project(x + 1, z, 0.0);
                let water = projector.project(x, z, water_height);

                let border = x == last || z == last;
                let terrain_color = self.terrain_color(field, x, z, height, border);
                let water_color = self.water_color(border, &mut shimmer);

                fill_between(buffer, water, bottom, offset, water_color);
                fill_between(buffer, top, bottom, offset, terrain_color);
            }
        }

        debug!(
            size,
            width = buffer.width(),
            height = buffer.height(),
            "rasterized heightfield"
        );
    }

    fn terrain_color(
        &self,
        field: &HeightField,
        x: i64,
        z: i64,
        height: f64,
        border: bool,
    ) -> u32 {
        let [r, g, b] = self.params.terrain_rgb;
        let alpha = if border {
            self.params.border_alpha
        } else {
            let next = field.height_at(x + 1, z).unwrap_or(height);
            slope_alpha(next - height)
        };
        pack_rgba(r, g, b, alpha)
    }

    fn water_color<R: Rng + ?Sized>(&self, border: bool, rng: &mut R) -> u32 {
        let [r, g, b] = self.params.water_rgb;
        let alpha = if border {
            self.params.border_alpha
        } else {
            rng.gen_range(self.params.water_alpha_min..=self.params.water_alpha_max)
        };
        pack_rgba(r, g, b, alpha)
    }
}

/// Signed `(width - size) / 2`; negative when the grid is wider than the viewport.
fn center_offset(width: usize, size: usize) -> i64 {
    (width as i64 - size as i64) / 2
}

/// Fill from `top` (inclusive) to `bottom` (exclusive), shifted right by `offset`.
fn fill_between(
    buffer: &mut PixelBuffer,
    top: ScreenPoint,
    bottom: ScreenPoint,
    offset: i64,
    color: u32,
) {
    buffer.fill_rect(top.x + offset, top.y, bottom.x + offset, bottom.y, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::generate_heightfield;
    use crate::params::TerrainParams;

    fn flat_field(size: usize, height: f64) -> HeightField {
        let mut field = HeightField::new(&TerrainParams::new(size, 0.3)).unwrap();
        for z in 0..size as i64 {
            for x in 0..size as i64 {
                field.set_height(x, z, height);
            }
        }
        field
    }

    #[test]
    fn test_fill_rect_clips_and_degenerates() {
        let mut buffer = PixelBuffer::new(4, 3);

        buffer.fill_rect(2, 1, 2, 3, 9);
        buffer.fill_rect(3, 2, 1, 1, 9);
        assert_eq!(buffer.filled_count(), 0);

        buffer.fill_rect(-5, -5, 2, 1, 7);
        assert_eq!(buffer.filled_count(), 2);
        assert_eq!(buffer.get(0, 0), Some(7));
        assert_eq!(buffer.get(1, 0), Some(7));
        assert_eq!(buffer.get(2, 0), Some(0));

        buffer.fill_rect(3, 2, 100, 100, 5);
        assert_eq!(buffer.get(3, 2), Some(5));
        assert_eq!(buffer.filled_count(), 3);
    }

    #[test]
    fn test_to_rgba_bytes_order() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set(1, 0, pack_rgba(1, 2, 3, 4));
        assert_eq!(buffer.to_rgba_bytes(), vec![0, 0, 0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_screen_offset() {
        let rasterizer = Rasterizer::new(RenderParams::default()).unwrap();
        assert_eq!(rasterizer.screen_offset(513), 443);
        assert_eq!(rasterizer.screen_offset(9), 695);

        let narrow = Rasterizer::new(RenderParams {
            width: 100,
            ..RenderParams::default()
        })
        .unwrap();
        assert_eq!(narrow.screen_offset(129), -14);
    }

    #[test]
    fn test_render_into_centers_on_buffer_width() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let field = generate_heightfield(&TerrainParams::new(33, 0.3), &mut rng).unwrap();

        let wide = Rasterizer::new(RenderParams::default()).unwrap().with_shimmer_seed(3);
        let narrow = Rasterizer::new(RenderParams {
            width: 700,
            ..RenderParams::default()
        })
        .unwrap()
        .with_shimmer_seed(3);

        // A buffer smaller than the configured viewport is centered on its own width
        let mut buffer = PixelBuffer::new(700, 800);
        wide.render_into(&field, &mut buffer);
        assert_eq!(buffer, narrow.render(&field));
        assert!(buffer.filled_count() > 0);
    }

    #[test]
    fn test_render_twice_is_identical() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let field = generate_heightfield(&TerrainParams::new(65, 0.3), &mut rng).unwrap();
        let rasterizer = Rasterizer::new(RenderParams::default())
            .unwrap()
            .with_shimmer_seed(8);

        let first = rasterizer.render(&field);
        let second = rasterizer.render(&field);
        assert_eq!(first, second);
        assert!(first.filled_count() > 0);
    }

    #[test]
    fn test_render_into_clears_previous_frame() {
        let rasterizer = Rasterizer::new(RenderParams::default()).unwrap();
        let mut buffer = PixelBuffer::new(1400, 800);
        buffer.fill_rect(0, 0, 1400, 800, 0xFFFF_FFFF);

        let field = flat_field(9, 0.0);
        rasterizer.render_into(&field, &mut buffer);

        assert_eq!(buffer, rasterizer.render(&field));
        assert_eq!(buffer.get(0, 0), Some(0));
    }

    #[test]
    fn test_flat_land_above_water_uses_mid_alpha() {
        let params = RenderParams::default();
        let rasterizer = Rasterizer::new(params).unwrap();
        let size = 129;
        let field = flat_field(size, 20.0);
        let buffer = rasterizer.render(&field);

        // Later cells overwrite earlier ones; the top pixel of this interior cell survives
        let projector = Projector::new(size);
        let offset = rasterizer.screen_offset(size);
        let top = projector.project(126, 126, 20.0);
        let pixel = buffer.get(top.x + offset, top.y).unwrap();

        let [r, g, b] = params.terrain_rgb;
        assert_eq!(pixel, pack_rgba(r, g, b, 128));
    }

    #[test]
    fn test_slope_shading_follows_height_change_along_x() {
        let params = RenderParams::default();
        let rasterizer = Rasterizer::new(params).unwrap();
        let size = 17;
        let last = size as i64 - 1;

        // Falls by one unit per column, so every interior cell has slope -1
        let mut field = HeightField::new(&TerrainParams::new(size, 0.3)).unwrap();
        for z in 0..=last {
            for x in 0..=last {
                field.set_height(x, z, (last - x) as f64);
            }
        }
        let buffer = rasterizer.render(&field);

        let [r, g, b] = params.terrain_rgb;
        let projector = Projector::new(size);
        let offset = rasterizer.screen_offset(size);
        let top_pixel = |x: i64, z: i64| {
            let top = projector.project(x, z, field.height_at(x, z).unwrap());
            buffer.get(top.x + offset, top.y).unwrap()
        };

        assert_eq!(top_pixel(8, 2), pack_rgba(r, g, b, slope_alpha(-1.0)));
        assert_eq!(top_pixel(16, 1), pack_rgba(r, g, b, params.border_alpha));

        let mut alphas: Vec<u8> = buffer
            .as_slice()
            .iter()
            .map(|&p| crate::color::unpack_rgba(p))
            .filter(|&[pr, pg, pb, _]| [pr, pg, pb] == [r, g, b])
            .map(|[_, _, _, a]| a)
            .collect();
        alphas.sort_unstable();
        alphas.dedup();
        assert_eq!(alphas, vec![params.border_alpha, 78]);
    }

    #[test]
    fn test_submerged_field_shows_water() {
        let params = RenderParams::default();
        let rasterizer = Rasterizer::new(params).unwrap();
        let field = flat_field(33, -5.0);
        let buffer = rasterizer.render(&field);

        let [wr, wg, wb] = params.water_rgb;
        let water_pixels = buffer
            .as_slice()
            .iter()
            .filter(|&&p| {
                let [r, g, b, _] = crate::color::unpack_rgba(p);
                [r, g, b] == [wr, wg, wb]
            })
            .count();

        // Terrain below ground level projects beneath its baseline and paints nothing
        assert!(water_pixels > 0);
        assert_eq!(water_pixels, buffer.filled_count());
    }

    #[test]
    fn test_water_alpha_within_band() {
        let params = RenderParams::default();
        let rasterizer = Rasterizer::new(params).unwrap().with_shimmer_seed(77);
        let field = flat_field(17, -5.0);
        let buffer = rasterizer.render(&field);

        for &p in buffer.as_slice().iter().filter(|&&p| p != 0) {
            let a = p as u8;
            let in_band = (params.water_alpha_min..=params.water_alpha_max).contains(&a);
            assert!(in_band || a == params.border_alpha, "alpha {}", a);
        }
    }

    #[test]
    fn test_different_shimmer_seeds_differ() {
        let field = flat_field(33, -5.0);
        let rasterizer = Rasterizer::new(RenderParams::default()).unwrap();
        let a = rasterizer.clone().with_shimmer_seed(1).render(&field);
        let b = rasterizer.with_shimmer_seed(2).render(&field);
        assert_ne!(a, b);
    }
}
