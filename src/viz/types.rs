//! Public types and constants for the map-rendering module.

use crate::models::GeoRect;

/// Geographic extent drawn by a map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapExtent {
    /// Whole world: 180°W–180°E, 90°S–90°N.
    World,
    /// A specific bounding box.
    Region(GeoRect),
}

impl MapExtent {
    pub fn rect(&self) -> GeoRect {
        match *self {
            MapExtent::World => GeoRect::WORLD,
            MapExtent::Region(rect) => rect,
        }
    }
}

impl Default for MapExtent {
    fn default() -> Self {
        MapExtent::World
    }
}

/// Default event-marker radius range in pixels, used when the caller does not
/// supply a size scale of its own.
pub const DEFAULT_MIN_MARKER_PX: f64 = 2.0;
pub const DEFAULT_MAX_MARKER_PX: f64 = 7.0;
