use chrono::{DateTime, Utc};
use seismap::encode::{DepthBands, SizeScale};
use seismap::models::{Channel, ChannelCode, Event, GeoRect};
use seismap::viz::{self, MapExtent};
use std::fs;
use std::path::PathBuf;

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn channel(code: &str, latitude: f64, longitude: f64) -> Channel {
    Channel {
        code: ChannelCode::parse(code).unwrap(),
        latitude,
        longitude,
        elevation: None,
    }
}

fn sample_channels() -> Vec<Channel> {
    vec![
        channel("IU.ANMO.00.BHZ", 34.95, -106.46),
        channel("IU.ANTO.00.BHZ", 39.87, 32.79),
        channel("IU.COLA.00.BHZ", 64.87, -147.86),
        // Repeated epoch rows collapse to one marker.
        channel("IU.COLA.00.BHZ", 64.87, -147.86),
    ]
}

fn event(
    id: &str,
    time: &str,
    latitude: f64,
    longitude: f64,
    depth_km: Option<f64>,
    magnitude: Option<f64>,
) -> Event {
    Event {
        event_id: id.into(),
        time: at(time),
        latitude,
        longitude,
        depth_km,
        magnitude,
        mag_type: Some("MW".into()),
        catalog: Some("ISC".into()),
        region: None,
    }
}

fn sample_events() -> Vec<Event> {
    vec![
        event("1", "2011-03-11T05:46:23Z", 38.3, 142.5, Some(19.7), Some(6.8)),
        event("2", "2011-04-07T14:32:43Z", -20.3, -68.9, Some(110.0), Some(5.4)),
        event("3", "2011-05-10T08:55:12Z", -17.9, -178.6, Some(560.0), Some(6.1)),
        event("4", "2011-06-01T00:10:00Z", 36.1, 140.1, None, Some(4.3)),
        event("5", "2011-07-21T19:02:51Z", 51.0, 179.2, Some(35.0), None),
    ]
}

fn write_and_check<F: Fn(&PathBuf)>(maker: F, name: &str, ext: &str) {
    let tmp = std::env::temp_dir();
    let path: PathBuf = tmp.join(format!("seismap_viz_{}.{}", name, ext));
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "output has content");
    fs::remove_file(&path).ok();
}

#[test]
fn station_map_produces_file() {
    let channels = sample_channels();
    write_and_check(
        |p| {
            viz::plot_station_map(&channels, p, 800, 480, MapExtent::World, "Stations").unwrap();
        },
        "stations",
        "svg",
    );
}

#[test]
fn event_map_produces_svg_and_png() {
    let events = sample_events();
    let bands = DepthBands::default();
    let scale = SizeScale::new(4.0, 7.0, 2.0, 7.0).unwrap();
    for ext in ["svg", "png"] {
        write_and_check(
            |p| {
                viz::plot_event_map(
                    &events,
                    &bands,
                    &scale,
                    p,
                    800,
                    520,
                    MapExtent::World,
                    "Seismicity",
                )
                .unwrap();
            },
            &format!("events_{ext}"),
            ext,
        );
    }
}

#[test]
fn regional_event_map_produces_file() {
    let events = sample_events();
    let bands = DepthBands::default();
    let scale = SizeScale::new(4.0, 7.0, 2.0, 7.0).unwrap();
    let extent = MapExtent::Region(GeoRect {
        min_longitude: 125.0,
        max_longitude: 150.0,
        min_latitude: 23.0,
        max_latitude: 48.0,
    });
    write_and_check(
        |p| {
            viz::plot_event_map(&events, &bands, &scale, p, 800, 520, extent, "Japan").unwrap();
        },
        "events_japan",
        "svg",
    );
}

#[test]
fn path_map_produces_file() {
    let channels = sample_channels();
    let quake = event("1", "2011-03-11T05:46:23Z", 38.3, 142.5, Some(19.7), Some(9.1));
    write_and_check(
        |p| {
            viz::plot_path_map(&quake, &channels, p, 800, 480, MapExtent::World, "Paths").unwrap();
        },
        "paths",
        "svg",
    );
}

#[test]
fn empty_inputs_are_errors() {
    let tmp = std::env::temp_dir().join("seismap_viz_empty.svg");
    assert!(viz::plot_station_map(&[], &tmp, 800, 480, MapExtent::World, "x").is_err());

    let bands = DepthBands::default();
    let scale = SizeScale::new(4.0, 7.0, 2.0, 7.0).unwrap();
    assert!(
        viz::plot_event_map(&[], &bands, &scale, &tmp, 800, 480, MapExtent::World, "x").is_err()
    );
}

#[test]
fn fitted_scale_spans_observed_magnitudes() {
    let events = sample_events();
    let scale = viz::magnitude_scale_for(&events, 2.0, 7.0).unwrap();
    assert_eq!(scale.min_mag(), 4.3);
    assert_eq!(scale.max_mag(), 6.8);

    // A single-magnitude catalog still gets a usable (widened) scale.
    let single = vec![event("1", "2011-03-11T05:46:23Z", 38.3, 142.5, Some(19.7), Some(6.0))];
    let scale = viz::magnitude_scale_for(&single, 2.0, 7.0).unwrap();
    assert_eq!(scale.min_mag(), 5.5);
    assert_eq!(scale.max_mag(), 6.5);

    // No magnitudes at all: nothing to fit.
    let none = vec![event("1", "2011-03-11T05:46:23Z", 38.3, 142.5, Some(19.7), None)];
    assert!(viz::magnitude_scale_for(&none, 2.0, 7.0).is_err());
}
