//! Map helper functions: degree tick formatting, tick-density choice, and
//! marker geometry.

use std::f64::consts::{FRAC_PI_2, PI};

fn fmt_deg(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.1}", v)
    }
}

/// Longitude tick label: `120°W`, `0°`, `150°E`, `180°`.
pub fn fmt_lon(lon: f64) -> String {
    if lon == 0.0 {
        "0°".to_string()
    } else if lon.abs() == 180.0 {
        "180°".to_string()
    } else if lon < 0.0 {
        format!("{}°W", fmt_deg(-lon))
    } else {
        format!("{}°E", fmt_deg(lon))
    }
}

/// Latitude tick label: `30°S`, `0°`, `45°N`.
pub fn fmt_lat(lat: f64) -> String {
    if lat == 0.0 {
        "0°".to_string()
    } else if lat < 0.0 {
        format!("{}°S", fmt_deg(-lat))
    } else {
        format!("{}°N", fmt_deg(lat))
    }
}

/// Number of graticule labels for a span in degrees, aiming for round steps
/// and at most ten labels.
pub fn tick_count(span_deg: f64) -> usize {
    for step in [1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 45.0, 60.0] {
        let n = span_deg / step;
        if n <= 10.0 {
            return (n.ceil() as usize).max(2);
        }
    }
    8
}

/// Pixel-offset vertex ring for a five-pointed star marker, tip up.
pub fn star_offsets(radius: i32) -> Vec<(i32, i32)> {
    let outer = radius as f64;
    let inner = outer * 0.45;
    (0..10)
        .map(|k| {
            let r = if k % 2 == 0 { outer } else { inner };
            let a = -FRAC_PI_2 + k as f64 * PI / 5.0;
            ((r * a.cos()).round() as i32, (r * a.sin()).round() as i32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_labels() {
        assert_eq!(fmt_lon(-120.0), "120°W");
        assert_eq!(fmt_lon(150.0), "150°E");
        assert_eq!(fmt_lon(0.0), "0°");
        assert_eq!(fmt_lon(-180.0), "180°");
        assert_eq!(fmt_lat(-30.0), "30°S");
        assert_eq!(fmt_lat(42.5), "42.5°N");
    }

    #[test]
    fn star_has_ten_vertices_tip_up() {
        let pts = star_offsets(10);
        assert_eq!(pts.len(), 10);
        assert_eq!(pts[0], (0, -10));
    }
}
