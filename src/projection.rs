//! Isometric projection of grid cells onto the screen.
//!
//! The grid is rotated 45 degrees so its (0, 0) and (N-1, N-1) corners line up vertically, then
//! divided by a pseudo-depth so rows further back shrink toward the top of the view.

/// Integer screen coordinate produced by [`Projector::project`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i64,
    pub y: i64,
}

impl ScreenPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Horizontal scale applied after the rotation
const X_STRETCH: f64 = 6.0;
/// How strongly depth compresses far rows
const DEPTH_FALLOFF: f64 = 0.005;
/// Vertical tilt of the rotated grid
const TILT: f64 = 0.75;
/// Vertical anchor as a fraction of N
const ANCHOR_Y: f64 = 0.2;

/// Projection for a grid of dimension N.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    size: f64,
}

impl Projector {
    pub fn new(size: usize) -> Self {
        Self { size: size as f64 }
    }

    /// Project grid coordinate `(flat_x, flat_z)` at height `flat_height`.
    ///
    /// Fractional results are truncated toward zero.
    pub fn project(&self, flat_x: i64, flat_z: i64, flat_height: f64) -> ScreenPoint {
        let n = self.size;
        let fx = flat_x as f64;
        let fz = flat_z as f64;

        // Rotate: top-left and bottom-right corners move to the middle column
        let rot_x = 0.5 * (n + fx - fz);
        let rot_z = 0.5 * (fx + fz);

        let persp_y = n * 0.5 - flat_height + rot_z * TILT;
        let persp_x = (rot_x - n * 0.5) * X_STRETCH;
        let depth = (n - rot_z) * DEPTH_FALLOFF + 1.0;

        let screen_x = 0.5 * n + persp_x / depth;
        let screen_y = ANCHOR_Y * n + persp_y / depth;

        ScreenPoint::new(screen_x as i64, screen_y as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projection_for_513() {
        let projector = Projector::new(513);
        assert_eq!(projector.project(0, 0, 0.0), ScreenPoint::new(256, 174));
    }

    #[test]
    fn test_corner_projections_for_513() {
        let projector = Projector::new(513);

        // Near corner sits directly below the origin corner
        assert_eq!(projector.project(512, 512, 0.0), ScreenPoint::new(256, 739));
        // Right corner is pushed out by the horizontal stretch
        assert_eq!(projector.project(512, 0, 0.0), ScreenPoint::new(928, 298));
    }

    #[test]
    fn test_projection_is_pure() {
        let projector = Projector::new(129);
        let a = projector.project(17, 40, 12.75);
        let b = projector.project(17, 40, 12.75);
        assert_eq!(a, b);
    }

    #[test]
    fn test_higher_cells_project_upward() {
        let projector = Projector::new(65);
        let ground = projector.project(10, 10, 0.0);
        let raised = projector.project(10, 10, 30.0);

        assert_eq!(ground.x, raised.x);
        assert!(raised.y < ground.y);
    }
}
