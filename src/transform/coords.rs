use crate::foundation::core::Position;

/// Map-space extent of a reference tile at scale 100.
pub const MAP_EXTENT: f64 = 40.85;
/// Pixel edge of a reference tile.
pub const PIXEL_EXTENT: f64 = 2048.0;
/// Zone scale used when a zone does not declare one.
pub const DEFAULT_SCALE: f64 = 100.0;

/// Convert a map coordinate to the nearest pixel coordinate.
///
/// Map coordinates are 1-based, so `map_to_pixel(1.0, s) == 0` for every scale.
#[inline]
pub fn map_to_pixel(map: f64, scale: f64) -> i64 {
    ((map - 1.0) * scale / 100.0 / MAP_EXTENT * PIXEL_EXTENT).round() as i64
}

/// Exact algebraic inverse of [`map_to_pixel`] before rounding.
#[inline]
pub fn pixel_to_map(pixel: f64, scale: f64) -> f64 {
    pixel * MAP_EXTENT * 100.0 / PIXEL_EXTENT / scale + 1.0
}

/// Pixels covered by one map unit at `scale`.
#[inline]
pub fn pixels_per_map_unit(scale: f64) -> f64 {
    PIXEL_EXTENT / (MAP_EXTENT * scale / 100.0)
}

/// Convert a map-space `(x, y)` spawn to a screen position.
pub fn spawn_to_screen(x: f64, y: f64, scale: f64) -> Position {
    Position::new(map_to_pixel(x, scale) as f64, map_to_pixel(y, scale) as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/coords.rs"]
mod tests;
