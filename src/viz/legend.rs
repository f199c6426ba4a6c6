//! Legend band drawn under seismicity maps: catalog info on the left,
//! magnitude size samples in the middle, depth-band swatches on the right.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::encode::{DepthBands, SizeScale};
use crate::models::Event;

const PAD: i32 = 8;
const FONT_PX: u32 = 12;
const LINE_H: i32 = FONT_PX as i32 + 6;

/// Catalog facts shown in the legend's info column.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendInfo {
    pub catalog: String,
    pub time_range: String,
    pub plotted: usize,
    pub skipped: usize,
}

impl LegendInfo {
    /// Derive the info column from the catalog itself plus the plot tallies.
    pub fn from_events(events: &[Event], plotted: usize, skipped: usize) -> Self {
        let catalog = events
            .iter()
            .find_map(|e| e.catalog.clone())
            .unwrap_or_else(|| "FDSN".to_string());
        let times: Vec<_> = events.iter().map(|e| e.time).collect();
        let time_range = match (times.iter().min(), times.iter().max()) {
            (Some(a), Some(b)) => format!("{} to {}", a.format("%Y-%m-%d"), b.format("%Y-%m-%d")),
            _ => String::new(),
        };
        Self {
            catalog,
            time_range,
            plotted,
            skipped,
        }
    }
}

/// Height of the legend band in pixels: a title row plus three content rows.
pub fn legend_height_px() -> i32 {
    2 * PAD + 4 * LINE_H
}

// Plotters has no text measuring; the usual width heuristic.
fn text_width_px(text: &str) -> i32 {
    (text.chars().count() as f32 * FONT_PX as f32 * 0.60).ceil() as i32
}

/// Draw the legend panel into its own split-off drawing area.
pub fn draw_event_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    info: &LegendInfo,
    bands: &DepthBands,
    scale: &SizeScale,
) -> Result<()> {
    area.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (w, _h) = area.dim_in_pixel();
    let w = w as i32;
    let font = TextStyle::from(("sans-serif", FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    let row_y = |row: i32| PAD + LINE_H / 2 + row * LINE_H;
    let text = |x: i32, row: i32, s: &str| Text::new(s.to_string(), (x, row_y(row)), font.clone());

    // Info column.
    let x_info = PAD + 4;
    area.draw(&text(x_info, 0, &format!("{} catalog", info.catalog)))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    area.draw(&text(x_info, 1, &info.time_range))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let counts = if info.skipped > 0 {
        format!("{} events ({} without depth/magnitude)", info.plotted, info.skipped)
    } else {
        format!("{} events", info.plotted)
    };
    area.draw(&text(x_info, 2, &counts))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Magnitude column: sample circles at the scale's end- and midpoints,
    // drawn in the shallowest band's color like the maps' own legend markers.
    let x_mag = (w / 2 - 90).max(x_info + 220);
    let sample_color = bands.colors()[0];
    area.draw(&text(x_mag, 0, "magnitude"))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let samples = [
        (scale.max_mag(), scale.max_size()),
        (scale.mid_mag(), (scale.min_size() + scale.max_size()) / 2.0),
        (scale.min_mag(), scale.min_size()),
    ];
    for (row, (mag, size)) in samples.iter().enumerate() {
        let y = row_y(row as i32 + 1);
        let r = size.round().max(1.0) as i32;
        area.draw(&Circle::new((x_mag + 6, y), r, sample_color.filled()))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        area.draw(&text(x_mag + 18, row as i32 + 1, &format!("{:.1}", mag)))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    // Depth column: one swatch per band, three rows per column.
    let labels = bands.labels();
    let col_w = labels
        .iter()
        .map(|l| text_width_px(l))
        .max()
        .unwrap_or(60)
        + 30;
    let cols = labels.len().div_ceil(3) as i32;
    let x_depth = (w - PAD - cols * col_w).max(x_mag + 120);
    area.draw(&text(x_depth, 0, "depth [km]"))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    for (i, (label, color)) in labels.iter().zip(bands.colors()).enumerate() {
        let col = (i / 3) as i32;
        let row = (i % 3) as i32 + 1;
        let x = x_depth + col * col_w;
        area.draw(&Circle::new((x + 6, row_y(row)), 4, color.filled()))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        area.draw(&text(x + 18, row, label))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    Ok(())
}
