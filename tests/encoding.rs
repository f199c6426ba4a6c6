use plotters::style::RGBColor;
use seismap::encode::{BandError, DepthBands, ScaleError, SizeScale};
use seismap::models::{FormatError, station_code};

const CRIMSON: RGBColor = RGBColor(220, 20, 60);
const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);
const BLUE_VIOLET: RGBColor = RGBColor(138, 43, 226);

#[test]
fn station_extraction_returns_second_field() {
    assert_eq!(station_code("IU.ANMO.00.BHZ").unwrap(), "ANMO");
    assert_eq!(station_code("GE.WLF..BHZ").unwrap(), "WLF");
    // Networks longer than two characters extract just as well.
    assert_eq!(station_code("XY12.STAT.10.HHZ").unwrap(), "STAT");
}

#[test]
fn station_extraction_rejects_malformed_codes() {
    assert!(matches!(
        station_code("IUANMO"),
        Err(FormatError::FieldCount(_))
    ));
    assert!(matches!(station_code("IU."), Err(FormatError::FieldCount(_))));
    assert!(matches!(
        station_code("IU..00.BHZ"),
        Err(FormatError::EmptyField { .. })
    ));
}

#[test]
fn depth_bands_reference_scenario() {
    let bands = DepthBands::default();
    assert_eq!(bands.color_for(34.9), CRIMSON);
    assert_eq!(bands.color_for(35.0), CRIMSON);
    assert_eq!(bands.color_for(35.1), DARK_ORANGE);
    assert_eq!(bands.color_for(501.0), BLUE_VIOLET);
    assert_eq!(bands.color_for(10_000.0), BLUE_VIOLET);
    // Above sea level still lands in the shallowest band.
    assert_eq!(bands.color_for(-2.5), CRIMSON);
}

#[test]
fn band_index_is_monotonic_in_depth() {
    let bands = DepthBands::default();
    let mut last = 0;
    for depth in [0.0, 10.0, 35.0, 36.0, 70.0, 150.0, 299.9, 300.0, 500.0, 500.1, 700.0] {
        let idx = bands.band_index(depth);
        assert!(idx >= last, "band index decreased at depth {depth}");
        last = idx;
    }
    assert_eq!(last, bands.band_count() - 1);
}

#[test]
fn custom_band_tables_are_validated() {
    let colors = vec![CRIMSON, DARK_ORANGE, BLUE_VIOLET];
    assert!(DepthBands::new(vec![10.0, 100.0], colors.clone()).is_ok());
    assert!(matches!(
        DepthBands::new(vec![100.0, 10.0], colors.clone()),
        Err(BandError::Unordered(..))
    ));
    assert!(matches!(
        DepthBands::new(vec![10.0], colors),
        Err(BandError::ColorCount { .. })
    ));
}

#[test]
fn size_scale_endpoints_and_linearity() {
    let scale = SizeScale::new(4.0, 7.0, 1.0, 3.0).unwrap();
    assert_eq!(scale.size_for(4.0), 1.0);
    assert_eq!(scale.size_for(7.0), 3.0);

    // Equal magnitude increments must produce equal size increments.
    let step1 = scale.size_for(5.0) - scale.size_for(4.0);
    let step2 = scale.size_for(6.0) - scale.size_for(5.0);
    let step3 = scale.size_for(7.0) - scale.size_for(6.0);
    assert!((step1 - step2).abs() < 1e-12);
    assert!((step2 - step3).abs() < 1e-12);

    // Everything inside the magnitude range stays inside the size range.
    for tenth in 40..=70 {
        let size = scale.size_for(tenth as f64 / 10.0);
        assert!((1.0..=3.0).contains(&size));
    }
}

#[test]
fn size_scale_is_unclamped_outside_the_range() {
    let scale = SizeScale::new(4.0, 7.0, 1.0, 3.0).unwrap();
    assert!(scale.size_for(8.5) > 3.0);
    assert!(scale.size_for(2.0) < 1.0);
}

#[test]
fn degenerate_size_scale_is_rejected() {
    assert_eq!(
        SizeScale::new(6.0, 6.0, 1.0, 3.0),
        Err(ScaleError::DegenerateRange(6.0))
    );
}
