use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Malformed station/channel identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("channel code `{0}`: expected four dot-separated fields (network.station.location.channel)")]
    FieldCount(String),
    #[error("channel code `{code}`: {field} field is empty")]
    EmptyField { code: String, field: &'static str },
}

/// Compound identifier naming one seismic data stream:
/// `network.station.location.channel`, e.g. `IU.ANMO.00.BHZ`.
///
/// Parsing splits on `.` and requires exactly four fields. Network, station,
/// and channel must be non-empty. The location code may be blank
/// (`IU.ANMO..BHZ`) since many inventories leave it unset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelCode {
    network: String,
    station: String,
    location: String,
    channel: String,
}

impl ChannelCode {
    /// Build a code from its four fields, validating each one.
    pub fn from_parts(
        network: &str,
        station: &str,
        location: &str,
        channel: &str,
    ) -> Result<Self, FormatError> {
        let code = || format!("{network}.{station}.{location}.{channel}");
        for (field, name, may_be_empty) in [
            (network, "network", false),
            (station, "station", false),
            (location, "location", true),
            (channel, "channel", false),
        ] {
            if field.contains('.') {
                return Err(FormatError::FieldCount(code()));
            }
            if field.is_empty() && !may_be_empty {
                return Err(FormatError::EmptyField {
                    code: code(),
                    field: name,
                });
            }
        }
        Ok(Self {
            network: network.to_string(),
            station: station.to_string(),
            location: location.to_string(),
            channel: channel.to_string(),
        })
    }

    /// Parse a dotted code string like `IU.ANMO.00.BHZ`.
    pub fn parse(code: &str) -> Result<Self, FormatError> {
        let fields: Vec<&str> = code.split('.').collect();
        let &[network, station, location, channel] = fields.as_slice() else {
            return Err(FormatError::FieldCount(code.to_string()));
        };
        Self::from_parts(network, station, location, channel)
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    /// The station field (second dot-separated segment), used as the map label.
    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl fmt::Display for ChannelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.network, self.station, self.location, self.channel
        )
    }
}

impl FromStr for ChannelCode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Extract the station label from a compound channel code string.
pub fn station_code(code: &str) -> Result<String, FormatError> {
    Ok(ChannelCode::parse(code)?.station().to_string())
}

/// One channel row from a station-inventory query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub code: ChannelCode,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level, when the inventory reports it.
    pub elevation: Option<f64>,
}

/// One event row from a catalog query (one row = one preferred origin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Origin depth in kilometers. Normalized to km at the parsing boundary;
    /// `None` when the catalog carries no depth.
    pub depth_km: Option<f64>,
    pub magnitude: Option<f64>,
    pub mag_type: Option<String>,
    pub catalog: Option<String>,
    pub region: Option<String>,
}

impl Event {
    /// Whether the event can be visually encoded. Events missing depth or
    /// magnitude are skipped by the plot routines rather than defaulted.
    pub fn plottable(&self) -> bool {
        self.depth_km.is_some() && self.magnitude.is_some()
    }
}

/// Inclusive UTC time window for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window of `seconds` on either side of `center`; the usual way to look
    /// up a single known event by its origin time.
    pub fn around(center: DateTime<Utc>, seconds: i64) -> Self {
        Self {
            start: center - Duration::seconds(seconds),
            end: center + Duration::seconds(seconds),
        }
    }

    /// FDSN query format, e.g. `2010-01-01T00:00:00`.
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Geographic bounding box in degrees, west/south edges first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl GeoRect {
    pub const WORLD: GeoRect = GeoRect {
        min_longitude: -180.0,
        max_longitude: 180.0,
        min_latitude: -90.0,
        max_latitude: 90.0,
    };
}

/// Parameters for a station-inventory query. `*` and `?` globs pass through
/// to the service unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationQuery {
    pub network: String,
    pub station: String,
    pub location: String,
    pub channel: String,
}

impl Default for StationQuery {
    fn default() -> Self {
        Self {
            network: "IU".into(),
            station: "*".into(),
            location: "00".into(),
            channel: "BHZ".into(),
        }
    }
}

/// Parameters for an event-catalog query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventQuery {
    pub span: TimeSpan,
    pub min_magnitude: Option<f64>,
    pub max_magnitude: Option<f64>,
    pub region: Option<GeoRect>,
    /// Catalog name understood by the data center, e.g. `ISC` or `NEIC PDE`.
    pub catalog: Option<String>,
}

impl EventQuery {
    pub fn new(span: TimeSpan) -> Self {
        Self {
            span,
            min_magnitude: None,
            max_magnitude: None,
            region: None,
            catalog: None,
        }
    }
}
