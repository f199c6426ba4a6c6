use crate::encode::DepthBands;
use crate::models::Event;
use serde::{Deserialize, Serialize};

/// Summary of a fetched catalog: the numbers that end up on map legends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSummary {
    pub total: usize,
    /// Events with both depth and magnitude present.
    pub plottable: usize,
    pub missing_depth: usize,
    pub missing_magnitude: usize,
    pub min_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
    pub mean_magnitude: Option<f64>,
    pub min_depth_km: Option<f64>,
    pub max_depth_km: Option<f64>,
    /// Plottable-event count per depth band, overflow band last.
    pub band_counts: Vec<usize>,
}

/// Tally a catalog against a depth-band table.
pub fn catalog_summary(events: &[Event], bands: &DepthBands) -> CatalogSummary {
    let mut band_counts = vec![0usize; bands.band_count()];
    let mut plottable = 0;
    let mut missing_depth = 0;
    let mut missing_magnitude = 0;
    let mut mags: Vec<f64> = Vec::new();
    let mut depths: Vec<f64> = Vec::new();

    for event in events {
        if event.depth_km.is_none() {
            missing_depth += 1;
        }
        if event.magnitude.is_none() {
            missing_magnitude += 1;
        }
        if let Some(m) = event.magnitude {
            mags.push(m);
        }
        if let Some(d) = event.depth_km {
            depths.push(d);
        }
        if let (Some(d), Some(_)) = (event.depth_km, event.magnitude) {
            plottable += 1;
            band_counts[bands.band_index(d)] += 1;
        }
    }

    let min = |vals: &[f64]| vals.iter().copied().reduce(f64::min);
    let max = |vals: &[f64]| vals.iter().copied().reduce(f64::max);
    let mean_magnitude = if mags.is_empty() {
        None
    } else {
        Some(mags.iter().sum::<f64>() / mags.len() as f64)
    };

    CatalogSummary {
        total: events.len(),
        plottable,
        missing_depth,
        missing_magnitude,
        min_magnitude: min(&mags),
        max_magnitude: max(&mags),
        mean_magnitude,
        min_depth_km: min(&depths),
        max_depth_km: max(&depths),
        band_counts,
    }
}
