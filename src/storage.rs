use crate::models::{Channel, Event};
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a station inventory as CSV with header.
pub fn save_stations_csv<P: AsRef<Path>>(channels: &[Channel], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("network", "station", "location", "channel", "latitude", "longitude", "elevation"))?;
    for c in channels {
        wtr.serialize((
            c.code.network(),
            c.code.station(),
            c.code.location(),
            c.code.channel(),
            c.latitude,
            c.longitude,
            c.elevation,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save an event catalog as CSV with header.
pub fn save_events_csv<P: AsRef<Path>>(events: &[Event], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("event_id", "time", "latitude", "longitude", "depth_km", "magnitude", "mag_type", "catalog", "region"))?;
    for e in events {
        wtr.serialize((
            &e.event_id,
            e.time.to_rfc3339(),
            e.latitude,
            e.longitude,
            e.depth_km,
            e.magnitude,
            &e.mag_type,
            &e.catalog,
            &e.region,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a station inventory as a pretty JSON array.
pub fn save_stations_json<P: AsRef<Path>>(channels: &[Channel], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(channels)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save an event catalog as a pretty JSON array.
pub fn save_events_json<P: AsRef<Path>>(events: &[Event], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(events)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
