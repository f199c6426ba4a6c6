use chrono::{DateTime, Utc};
use seismap::encode::DepthBands;
use seismap::models::Event;
use seismap::stats::catalog_summary;

fn event(depth_km: Option<f64>, magnitude: Option<f64>) -> Event {
    let time: DateTime<Utc> = "2011-03-11T05:46:23Z".parse().unwrap();
    Event {
        event_id: "x".into(),
        time,
        latitude: 0.0,
        longitude: 0.0,
        depth_km,
        magnitude,
        mag_type: None,
        catalog: None,
        region: None,
    }
}

#[test]
fn summary_tallies_bands_and_gaps() {
    let events = vec![
        event(Some(10.0), Some(4.5)),
        event(Some(35.0), Some(5.0)),
        event(Some(60.0), Some(5.5)),
        event(Some(650.0), Some(6.0)),
        event(None, Some(7.0)),
        event(Some(80.0), None),
    ];
    let bands = DepthBands::default();
    let summary = catalog_summary(&events, &bands);

    assert_eq!(summary.total, 6);
    assert_eq!(summary.plottable, 4);
    assert_eq!(summary.missing_depth, 1);
    assert_eq!(summary.missing_magnitude, 1);

    // Two shallow (<=35), one in 35–70, one past the last bound. The events
    // missing a field never reach a band.
    assert_eq!(summary.band_counts, vec![2, 1, 0, 0, 0, 1]);

    assert_eq!(summary.min_magnitude, Some(4.5));
    assert_eq!(summary.max_magnitude, Some(7.0));
    assert_eq!(summary.min_depth_km, Some(10.0));
    assert_eq!(summary.max_depth_km, Some(650.0));
    let mean = summary.mean_magnitude.unwrap();
    assert!((mean - 5.6).abs() < 1e-9);
}

#[test]
fn summary_of_empty_catalog() {
    let bands = DepthBands::default();
    let summary = catalog_summary(&[], &bands);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.plottable, 0);
    assert_eq!(summary.min_magnitude, None);
    assert_eq!(summary.mean_magnitude, None);
    assert_eq!(summary.band_counts, vec![0; 6]);
}
