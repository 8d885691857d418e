//! Isometric terrain generation library
//!
//! Diamond-Square height fields rendered as pseudo-3D RGBA frames. Re-exports modules for use
//! by binaries and tools.

pub mod color;
pub mod error;
pub mod export;
pub mod frame;
pub mod heightmap;
pub mod params;
pub mod projection;
pub mod raster;
pub mod seeds;
pub mod tilemap;
pub mod viewer;
