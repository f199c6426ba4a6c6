//! Visual encoding of catalog events: origin depth to a display color and
//! magnitude to a marker size.
//!
//! One [`DepthBands`] table and one [`SizeScale`] are built per map and shared
//! by the plot routines and the legend, so the same configuration value drives
//! both the markers and the legend swatches.

use plotters::style::RGBColor;
use thiserror::Error;

/// The classic seismicity-map depth palette.
/// Order: crimson, dark orange, gold, green, blue, blue violet.
const DEPTH6: [RGBColor; 6] = [
    RGBColor(220, 20, 60),  // crimson     (#DC143C)
    RGBColor(255, 140, 0),  // dark orange (#FF8C00)
    RGBColor(255, 215, 0),  // gold        (#FFD700)
    RGBColor(0, 128, 0),    // green       (#008000)
    RGBColor(0, 0, 255),    // blue        (#0000FF)
    RGBColor(138, 43, 226), // blue violet (#8A2BE2)
];

/// Invalid depth-band configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BandError {
    #[error("at least one depth bound is required")]
    Empty,
    #[error("depth bounds must be strictly increasing ({1} follows {0})")]
    Unordered(f64, f64),
    #[error("expected one more color than bounds ({bounds} bounds, {colors} colors)")]
    ColorCount { bounds: usize, colors: usize },
}

/// Degenerate magnitude-to-size configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScaleError {
    #[error("degenerate magnitude range: min and max are both {0}")]
    DegenerateRange(f64),
}

/// Ordered depth bands: strictly increasing upper bounds in kilometers, one
/// color per band, and a final overflow color for depths past the last bound
/// (`colors.len() == bounds.len() + 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBands {
    bounds_km: Vec<f64>,
    colors: Vec<RGBColor>,
}

impl DepthBands {
    pub fn new(bounds_km: Vec<f64>, colors: Vec<RGBColor>) -> Result<Self, BandError> {
        if bounds_km.is_empty() {
            return Err(BandError::Empty);
        }
        if colors.len() != bounds_km.len() + 1 {
            return Err(BandError::ColorCount {
                bounds: bounds_km.len(),
                colors: colors.len(),
            });
        }
        for pair in bounds_km.windows(2) {
            if pair[1] <= pair[0] {
                return Err(BandError::Unordered(pair[0], pair[1]));
            }
        }
        Ok(Self { bounds_km, colors })
    }

    /// Index of the band a depth falls into, overflow band last.
    ///
    /// Bounds are inclusive: a depth exactly on a bound belongs to that band,
    /// not the next. Negative depths (above sea level) land in the first band.
    pub fn band_index(&self, depth_km: f64) -> usize {
        self.bounds_km
            .iter()
            .position(|bound| depth_km <= *bound)
            .unwrap_or(self.bounds_km.len())
    }

    /// Display color for a depth in kilometers.
    pub fn color_for(&self, depth_km: f64) -> RGBColor {
        self.colors[self.band_index(depth_km)]
    }

    /// Number of bands including the overflow band.
    pub fn band_count(&self) -> usize {
        self.colors.len()
    }

    pub fn bounds_km(&self) -> &[f64] {
        &self.bounds_km
    }

    pub fn colors(&self) -> &[RGBColor] {
        &self.colors
    }

    /// Legend labels, one per band: `0 to 35`, `35 to 70`, …, `> 500`.
    pub fn labels(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.colors.len());
        let mut lower = 0.0;
        for bound in &self.bounds_km {
            out.push(format!("{} to {}", fmt_km(lower), fmt_km(*bound)));
            lower = *bound;
        }
        out.push(format!("> {}", fmt_km(lower)));
        out
    }
}

impl Default for DepthBands {
    /// The reference configuration: bounds at 35/70/150/300/500 km with the
    /// [`DEPTH6`] palette.
    fn default() -> Self {
        Self::new(vec![35.0, 70.0, 150.0, 300.0, 500.0], DEPTH6.to_vec())
            .expect("reference band table")
    }
}

fn fmt_km(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Linear magnitude-to-marker-size map over `[min_mag, max_mag]`.
///
/// Interpolation is deliberately unclamped: the catalog query's magnitude
/// filter is expected to bound the inputs, and a magnitude outside the range
/// maps outside `[min_size, max_size]` rather than being pinned to the ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeScale {
    min_mag: f64,
    max_mag: f64,
    min_size: f64,
    max_size: f64,
}

impl SizeScale {
    /// Fails when `min_mag == max_mag`: a zero-width magnitude range has no
    /// usable slope.
    pub fn new(min_mag: f64, max_mag: f64, min_size: f64, max_size: f64) -> Result<Self, ScaleError> {
        if min_mag == max_mag {
            return Err(ScaleError::DegenerateRange(min_mag));
        }
        Ok(Self {
            min_mag,
            max_mag,
            min_size,
            max_size,
        })
    }

    /// Marker size for a magnitude.
    pub fn size_for(&self, magnitude: f64) -> f64 {
        self.min_size
            + (magnitude - self.min_mag) * (self.max_size - self.min_size)
                / (self.max_mag - self.min_mag)
    }

    pub fn min_mag(&self) -> f64 {
        self.min_mag
    }

    pub fn max_mag(&self) -> f64 {
        self.max_mag
    }

    pub fn mid_mag(&self) -> f64 {
        (self.min_mag + self.max_mag) / 2.0
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn max_size(&self) -> f64 {
        self.max_size
    }
}
