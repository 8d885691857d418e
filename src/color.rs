//! Packed RGBA colors and terrain/water shading.

/// Pack four 8-bit channels as `0xRRGGBBAA`.
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((g as u32) << 16) | ((r as u32) << 24)
}

/// Split a packed `0xRRGGBBAA` color back into `[r, g, b, a]`.
pub const fn unpack_rgba(color: u32) -> [u8; 4] {
    color.to_be_bytes()
}

/// Alpha for a terrain cell from the height difference to its +x neighbor.
///
/// Flat ground sits at mid brightness; the magnitude is clamped to a byte.
pub fn slope_alpha(slope: f64) -> u8 {
    (slope * 50.0 + 128.0).abs().clamp(0.0, 255.0) as u8
}

/// Composite a packed RGBA color over black, returning minifb's `0x00RRGGBB`.
pub fn over_black(color: u32) -> u32 {
    let [r, g, b, a] = unpack_rgba(color);
    let scale = |c: u8| (c as u32 * a as u32 + 127) / 255;
    (scale(r) << 16) | (scale(g) << 8) | scale(b)
}
