use rand::Rng;
use tracing::debug;

use crate::error::TerrainError;
use crate::params::TerrainParams;
use crate::tilemap::Tilemap;

// =============================================================================
// HEIGHT FIELD
// =============================================================================

/// Square N x N grid of terrain heights.
///
/// Cells start out unset (`None`) and are filled in by [`generate_heightfield`]. Once generation
/// finishes every cell holds a height, and the field is read-only outside this crate:
///
/// ```compile_fail
/// use isoterrain::heightmap::generate_heightfield;
/// use isoterrain::params::TerrainParams;
/// use isoterrain::seeds::TerrainSeeds;
///
/// let seeds = TerrainSeeds::from_master(1);
/// let mut field = generate_heightfield(&TerrainParams::new(9, 0.3), &mut seeds.heightmap_rng())
///     .unwrap();
/// field.set_height(0, 0, 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    cells: Tilemap<Option<f64>>,
    roughness: f64,
}

impl HeightField {
    /// An unset grid for validated parameters.
    pub(crate) fn new(params: &TerrainParams) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self {
            cells: Tilemap::new_with(params.size, params.size, None),
            roughness: params.roughness,
        })
    }

    /// Grid dimension N.
    pub fn size(&self) -> usize {
        self.cells.width
    }

    pub fn roughness(&self) -> f64 {
        self.roughness
    }

    /// Height at `(x, z)`, or `None` for unset or off-grid cells.
    pub fn height_at(&self, x: i64, z: i64) -> Option<f64> {
        self.cells.get(x, z).copied().flatten()
    }

    /// Set the height at `(x, z)`. Off-grid writes are ignored.
    pub(crate) fn set_height(&mut self, x: i64, z: i64, value: f64) {
        self.cells.set(x, z, Some(value));
    }

    /// True once every cell holds a height.
    pub fn is_complete(&self) -> bool {
        self.cells.as_slice().iter().all(Option::is_some)
    }

    /// Number of cells that hold a height.
    pub fn filled_count(&self) -> usize {
        self.cells.as_slice().iter().filter(|h| h.is_some()).count()
    }

    /// Lowest and highest set height, or `None` for an empty grid.
    pub fn height_range(&self) -> Option<(f64, f64)> {
        self.cells
            .as_slice()
            .iter()
            .flatten()
            .fold(None, |range, &h| match range {
                None => Some((h, h)),
                Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
            })
    }

    /// Seed the four corners with independent heights drawn uniformly from [0, N).
    pub(crate) fn seed_corners<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.size() as f64;
        let last = self.size() as i64 - 1;

        for (x, z) in [(0, 0), (last, 0), (0, last), (last, last)] {
            let h = rng.gen::<f64>() * n;
            self.set_height(x, z, h);
        }
    }

    /// Run one subdivision level at `step`: square centers first, then diamond centers.
    ///
    /// Every new height is the average of its four (valid) neighbors at distance `step / 2`
    /// plus a random offset in `[-step * roughness, step * roughness)`. A step below 2 is a no-op.
    pub(crate) fn divide<R: Rng + ?Sized>(&mut self, step: usize, rng: &mut R) {
        let half = step / 2;
        if half < 1 {
            return;
        }

        let size = self.size();
        let scale = step as f64 * self.roughness;

        for z in (half..size).step_by(step) {
            for x in (half..size).step_by(step) {
                let offset = random_offset(rng, scale);
                self.square(x as i64, z as i64, half as i64, offset);
            }
        }

        for z in (0..size).step_by(half) {
            for x in ((z + half) % step..size).step_by(step) {
                let offset = random_offset(rng, scale);
                self.diamond(x as i64, z as i64, half as i64, offset);
            }
        }
    }

    /// Center of a square: average of the four diagonal corners.
    fn square(&mut self, x: i64, z: i64, half: i64, offset: f64) {
        let corners = [
            self.height_at(x - half, z - half),
            self.height_at(x + half, z - half),
            self.height_at(x + half, z + half),
            self.height_at(x - half, z + half),
        ];
        self.set_height(x, z, average(&corners) + offset);
    }

    /// Center of a diamond: average of the four orthogonal neighbors.
    fn diamond(&mut self, x: i64, z: i64, half: i64, offset: f64) {
        let corners = [
            self.height_at(x, z - half),
            self.height_at(x + half, z),
            self.height_at(x, z + half),
            self.height_at(x - half, z),
        ];
        self.set_height(x, z, average(&corners) + offset);
    }
}

/// Mean of the valid samples; 0.0 when none are valid.
pub fn average(heights: &[Option<f64>]) -> f64 {
    let (total, count) = heights
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(total, count), &h| (total + h, count + 1));

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Uniform offset in `[-scale, scale)`.
fn random_offset<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    rng.gen::<f64>() * scale * 2.0 - scale
}

// =============================================================================
// DIAMOND-SQUARE GENERATION
// =============================================================================

/// Generate a complete height field with the Diamond-Square algorithm.
///
/// The parameters are validated before anything is drawn from `rng`, so a bad size is reported
/// up front. Subdivision runs from step N - 1 down to step 2, halving each level.
pub fn generate_heightfield<R: Rng + ?Sized>(
    params: &TerrainParams,
    rng: &mut R,
) -> Result<HeightField, TerrainError> {
    let mut field = HeightField::new(params)?;
    field.seed_corners(rng);

    let mut step = field.size() - 1;
    while step / 2 >= 1 {
        field.divide(step, rng);
        debug!(step, filled = field.filled_count(), "subdivision level done");
        step /= 2;
    }

    if let Some((min_h, max_h)) = field.height_range() {
        debug!(
            size = field.size(),
            roughness = field.roughness(),
            "heightfield range {:.1} to {:.1}",
            min_h,
            max_h
        );
    }

    Ok(field)
}
