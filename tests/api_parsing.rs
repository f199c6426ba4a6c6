use seismap::api::{parse_event_text, parse_station_text};

const STATION_SAMPLE: &str = "\
#Network|Station|Location|Channel|Latitude|Longitude|Elevation|Depth|Azimuth|Dip|SensorDescription|Scale|ScaleFreq|ScaleUnits|SampleRate|StartTime|EndTime
IU|ANMO|00|BHZ|34.945981|-106.457133|1671.0|145.0|0.0|-90.0|Geotech KS-54000|1.9e9|0.02|M/S|20.0|2018-07-09T20:45:00|
IU|ANTO|00|BHZ|39.868|32.7934|1090.0|195.0|0.0|-90.0|Geotech KS-54000|1.9e9|0.02|M/S|20.0|2019-05-02T00:00:00|2020-01-01T00:00:00
GE|WLF||BHZ|49.6646|6.1526|295.0|0.0|0.0|-90.0|Streckeisen STS-2|6.0e8|0.02|M/S|20.0|2010-01-01T00:00:00|
";

const EVENT_SAMPLE: &str = "\
#EventID|Time|Latitude|Longitude|Depth/km|Author|Catalog|Contributor|ContributorID|MagType|Magnitude|MagAuthor|EventLocationName
16461282|2011-03-11T05:46:23.200|38.2963|142.498|19.7|ISC|ISC|ISC|16461282|MW|9.1|GCMT|NEAR EAST COAST OF HONSHU
600002952|2010-02-27T06:34:13.330|-36.1485|-72.9327||ISC|ISC|ISC|600002952|MW|8.8|GCMT|NEAR COAST OF CENTRAL CHILE
600003242|2010-03-04T14:02:27|-22.2|-68.3|110.0|ISC|ISC|ISC|600003242|||ISC|CHILE-BOLIVIA BORDER REGION
";

#[test]
fn parse_station_sample() {
    let channels = parse_station_text(STATION_SAMPLE).unwrap();
    assert_eq!(channels.len(), 3);

    assert_eq!(channels[0].code.to_string(), "IU.ANMO.00.BHZ");
    assert_eq!(channels[0].code.station(), "ANMO");
    assert!((channels[0].latitude - 34.945981).abs() < 1e-9);
    assert!((channels[0].longitude + 106.457133).abs() < 1e-9);
    assert_eq!(channels[0].elevation, Some(1671.0));

    // Blank location codes survive the round trip.
    assert_eq!(channels[2].code.location(), "");
    assert_eq!(channels[2].code.station(), "WLF");
}

#[test]
fn parse_event_sample() {
    let events = parse_event_text(EVENT_SAMPLE).unwrap();
    assert_eq!(events.len(), 3);

    let tohoku = &events[0];
    assert_eq!(tohoku.event_id, "16461282");
    assert_eq!(tohoku.depth_km, Some(19.7));
    assert_eq!(tohoku.magnitude, Some(9.1));
    assert_eq!(tohoku.mag_type.as_deref(), Some("MW"));
    assert_eq!(tohoku.catalog.as_deref(), Some("ISC"));
    assert_eq!(tohoku.region.as_deref(), Some("NEAR EAST COAST OF HONSHU"));
    assert_eq!(tohoku.time.to_rfc3339(), "2011-03-11T05:46:23.200+00:00");
    assert!(tohoku.plottable());

    // Blank depth and magnitude columns become None, not zero.
    assert_eq!(events[1].depth_km, None);
    assert!(!events[1].plottable());
    assert_eq!(events[2].magnitude, None);
    assert_eq!(events[2].mag_type, None);
    assert!(!events[2].plottable());
}

#[test]
fn empty_payload_yields_no_rows() {
    assert!(parse_station_text("").unwrap().is_empty());
    assert!(parse_event_text("").unwrap().is_empty());
    // A header-only answer is also empty.
    assert!(parse_station_text("#Network|Station|Location\n").unwrap().is_empty());
}

#[test]
fn truncated_rows_are_errors() {
    assert!(parse_station_text("IU|ANMO\n").is_err());
    assert!(parse_event_text("123|2011-03-11T05:46:23\n").is_err());
    assert!(parse_event_text("123|not-a-time|38.0|142.0|10.0\n").is_err());
}
