//! Map rendering: station maps, seismicity maps, and source–receiver path
//! maps to **SVG** or **PNG**.
//!
//! - Plain lon/lat (plate-carrée) axes with a light graticule over a pale
//!   ocean fill
//! - Station markers: orange triangles with station-code labels
//! - Event markers: circles colored by depth band, sized by magnitude, with
//!   a legend band summarizing catalog, magnitudes, and depth bands
//! - Backend chosen by the output extension: `.svg` via `SVGBackend`,
//!   anything else via `BitMapBackend`

pub mod legend;
pub mod types;
pub mod util;

// Re-export types for public API
pub use types::{DEFAULT_MAX_MARKER_PX, DEFAULT_MIN_MARKER_PX, MapExtent};

use crate::encode::{DepthBands, SizeScale};
use crate::models::{Channel, ChannelCode, Event, GeoRect};
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::chart::ChartContext;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use legend::{LegendInfo, draw_event_legend, legend_height_px};
use util::{fmt_lat, fmt_lon, star_offsets, tick_count};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

const OCEAN: RGBColor = RGBColor(231, 241, 249);
const STATION_COLOR: RGBColor = RGBColor(255, 140, 0); // dark orange
const EPICENTER_COLOR: RGBColor = RGBColor(220, 20, 60); // crimson

fn draw_err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("drawing error: {:?}", e)
}

type MapChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Size scale spanning the observed magnitudes of a catalog, widened by half
/// a unit on each side when every event has the same magnitude.
pub fn magnitude_scale_for(events: &[Event], min_size: f64, max_size: f64) -> Result<SizeScale> {
    let mags: Vec<f64> = events.iter().filter_map(|e| e.magnitude).collect();
    let (Some(min_mag), Some(max_mag)) = (
        mags.iter().copied().reduce(f64::min),
        mags.iter().copied().reduce(f64::max),
    ) else {
        return Err(anyhow!("no magnitudes in catalog"));
    };
    let scale = if min_mag == max_mag {
        SizeScale::new(min_mag - 0.5, max_mag + 0.5, min_size, max_size)
    } else {
        SizeScale::new(min_mag, max_mag, min_size, max_size)
    }?;
    Ok(scale)
}

/// Convenience: world station map at 1024×640 with a default title.
pub fn plot_stations<P: AsRef<Path>>(channels: &[Channel], out_path: P) -> Result<()> {
    plot_station_map(channels, out_path, 1024, 640, MapExtent::World, "Station map")
}

/// Convenience: world seismicity map at 1024×640 with the reference depth
/// bands and a size scale fitted to the observed magnitudes.
pub fn plot_events<P: AsRef<Path>>(events: &[Event], out_path: P) -> Result<()> {
    let bands = DepthBands::default();
    let scale = magnitude_scale_for(events, DEFAULT_MIN_MARKER_PX, DEFAULT_MAX_MARKER_PX)?;
    plot_event_map(
        events,
        &bands,
        &scale,
        out_path,
        1024,
        640,
        MapExtent::World,
        "Seismicity",
    )
}

/// Render a station map: one triangle marker and label per distinct station.
pub fn plot_station_map<P: AsRef<Path>>(
    channels: &[Channel],
    out_path: P,
    width: u32,
    height: u32,
    extent: MapExtent,
    title: &str,
) -> Result<()> {
    if channels.is_empty() {
        return Err(anyhow!("no stations to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_station_map(root, channels, extent, title)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_station_map(root, channels, extent, title)?;
    }
    Ok(())
}

/// Render a seismicity map: circles colored by depth band and sized by
/// magnitude, with a legend band underneath. Events missing depth or
/// magnitude are skipped and reported in the legend.
#[allow(clippy::too_many_arguments)]
pub fn plot_event_map<P: AsRef<Path>>(
    events: &[Event],
    bands: &DepthBands,
    scale: &SizeScale,
    out_path: P,
    width: u32,
    height: u32,
    extent: MapExtent,
    title: &str,
) -> Result<()> {
    if events.is_empty() {
        return Err(anyhow!("no events to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_event_map(root, events, bands, scale, extent, title)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_event_map(root, events, bands, scale, extent, title)?;
    }
    Ok(())
}

/// Render one event with its receiving stations and dashed source–receiver
/// segments, the epicenter drawn as a star.
pub fn plot_path_map<P: AsRef<Path>>(
    event: &Event,
    channels: &[Channel],
    out_path: P,
    width: u32,
    height: u32,
    extent: MapExtent,
    title: &str,
) -> Result<()> {
    if channels.is_empty() {
        return Err(anyhow!("no stations to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_path_map(root, event, channels, extent, title)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_path_map(root, event, channels, extent, title)?;
    }
    Ok(())
}

fn build_map_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    rect: &GeoRect,
    title: &str,
) -> Result<MapChart<'a, DB>> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(12)
        .x_label_area_size(28)
        .y_label_area_size(48)
        .build_cartesian_2d(
            rect.min_longitude..rect.max_longitude,
            rect.min_latitude..rect.max_latitude,
        )
        .map_err(draw_err)?;

    chart
        .plotting_area()
        .fill(&OCEAN)
        .map_err(draw_err)?;
    chart
        .configure_mesh()
        .x_labels(tick_count(rect.max_longitude - rect.min_longitude))
        .y_labels(tick_count(rect.max_latitude - rect.min_latitude))
        .x_label_formatter(&|v| fmt_lon(*v))
        .y_label_formatter(&|v| fmt_lat(*v))
        .label_style(("sans-serif", 11))
        .bold_line_style(ShapeStyle {
            color: BLACK.mix(0.12),
            filled: false,
            stroke_width: 1,
        })
        .light_line_style(ShapeStyle {
            color: TRANSPARENT,
            filled: false,
            stroke_width: 1,
        })
        .draw()
        .map_err(draw_err)?;
    Ok(chart)
}

/// Collapse an inventory to one entry per station. Inventories list each
/// channel epoch separately, so consecutive rows repeat the same code.
fn distinct_stations(channels: &[Channel]) -> Vec<&Channel> {
    let mut prev: Option<&ChannelCode> = None;
    let mut out = Vec::new();
    for ch in channels {
        if prev == Some(&ch.code) {
            continue;
        }
        prev = Some(&ch.code);
        out.push(ch);
    }
    out
}

fn draw_stations<DB: DrawingBackend>(
    chart: &mut MapChart<'_, DB>,
    stations: &[&Channel],
) -> Result<()> {
    chart
        .draw_series(stations.iter().map(|ch| {
            TriangleMarker::new((ch.longitude, ch.latitude), 5, STATION_COLOR.filled())
        }))
        .map_err(draw_err)?;
    chart
        .draw_series(stations.iter().map(|ch| {
            EmptyElement::at((ch.longitude, ch.latitude))
                + Text::new(
                    ch.code.station().to_string(),
                    (4, -14),
                    ("sans-serif", 11),
                )
        }))
        .map_err(draw_err)?;
    Ok(())
}

fn draw_station_map<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    channels: &[Channel],
    extent: MapExtent,
    title: &str,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;
    let rect = extent.rect();
    let mut chart = build_map_chart(&root, &rect, title)?;
    let stations = distinct_stations(channels);
    draw_stations(&mut chart, &stations)?;
    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_event_map<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    events: &[Event],
    bands: &DepthBands,
    scale: &SizeScale,
    extent: MapExtent,
    title: &str,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;
    let (_w, h) = root.dim_in_pixel();
    let (map_area, legend_area) = root.split_vertically(h as i32 - legend_height_px());

    let rect = extent.rect();
    let mut chart = build_map_chart(&map_area, &rect, title)?;

    let mut plotted = 0usize;
    let mut skipped = 0usize;
    let mut encoded: Vec<(f64, f64, RGBColor, i32)> = Vec::new();
    for event in events {
        let (Some(depth_km), Some(magnitude)) = (event.depth_km, event.magnitude) else {
            skipped += 1;
            continue;
        };
        plotted += 1;
        // Rasterized radius floor of 1px; the scale itself stays unclamped.
        let radius = scale.size_for(magnitude).round().max(1.0) as i32;
        encoded.push((event.longitude, event.latitude, bands.color_for(depth_km), radius));
    }
    if skipped > 0 {
        log::debug!("skipped {} events without depth or magnitude", skipped);
    }

    chart
        .draw_series(encoded.iter().map(|&(lon, lat, color, radius)| {
            EmptyElement::at((lon, lat))
                + Circle::new((0, 0), radius, color.filled())
                + Circle::new((0, 0), radius, BLACK.stroke_width(1))
        }))
        .map_err(draw_err)?;

    let info = LegendInfo::from_events(events, plotted, skipped);
    draw_event_legend(&legend_area, &info, bands, scale)?;
    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_path_map<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    event: &Event,
    channels: &[Channel],
    extent: MapExtent,
    title: &str,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;
    let rect = extent.rect();
    let mut chart = build_map_chart(&root, &rect, title)?;
    let stations = distinct_stations(channels);

    for station in &stations {
        chart
            .draw_series(DashedLineSeries::new(
                [
                    (event.longitude, event.latitude),
                    (station.longitude, station.latitude),
                ],
                4,
                3,
                BLACK.mix(0.7).stroke_width(1),
            ))
            .map_err(draw_err)?;
    }

    draw_stations(&mut chart, &stations)?;

    chart
        .draw_series(std::iter::once(
            EmptyElement::at((event.longitude, event.latitude))
                + Polygon::new(star_offsets(10), EPICENTER_COLOR.filled()),
        ))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}
