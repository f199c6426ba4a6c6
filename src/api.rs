//! Synchronous client for **FDSN web services** (`fdsnws/station/1` and
//! `fdsnws/event/1`).
//!
//! Both endpoints are queried with `format=text`, which returns one
//! pipe-delimited row per channel or event with a `#`-prefixed header line.
//! Responses are parsed into tidy [`Channel`] / [`Event`] rows.
//!
//! ### Notes
//! - An HTTP 204 (or 404 from some data centers) means "no matching data" and
//!   yields an empty result, not an error.
//! - Origin depth arrives in **kilometers** in the text format and is stored
//!   as-is; empty depth/magnitude columns become `None`.
//! - Network timeouts use a sane default (30s) and can be adjusted by editing
//!   the client builder.
//!
//! Typical usage:
//! ```no_run
//! # use seismap::{Client, StationQuery};
//! let client = Client::default();
//! let channels = client.get_stations(&StationQuery::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::{Channel, ChannelCode, Event, EventQuery, StationQuery};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("seismap/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://service.iris.edu".into(),
            http,
        }
    }
}

// Allow -, _, . and the FDSN glob characters unescaped in query values.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*')
    .remove(b'?');

fn enc(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value.trim(), SAFE).to_string()
}

impl Client {
    /// Fetch a station inventory at channel level.
    ///
    /// Globs in the query (`station: "*"`) pass through to the service. A
    /// blank location code is sent as `--`, the FDSN spelling for "empty".
    ///
    /// ### Errors
    /// - Network/HTTP error once transient retries are exhausted
    /// - Malformed response rows
    pub fn get_stations(&self, query: &StationQuery) -> Result<Vec<Channel>> {
        let location = if query.location.is_empty() {
            "--"
        } else {
            query.location.as_str()
        };
        let url = format!(
            "{}/fdsnws/station/1/query?format=text&level=channel&network={}&station={}&location={}&channel={}",
            self.base_url,
            enc(&query.network),
            enc(&query.station),
            enc(location),
            enc(&query.channel),
        );

        let body = self
            .get_text(&url)
            .with_context(|| format!("GET {}", url))?;
        let channels = match body {
            Some(text) => parse_station_text(&text)?,
            None => vec![],
        };
        log::info!("station query returned {} channels", channels.len());
        Ok(channels)
    }

    /// Fetch an event catalog ordered by origin time.
    ///
    /// ### Errors
    /// - Network/HTTP error once transient retries are exhausted
    /// - Malformed response rows
    pub fn get_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let mut url = format!(
            "{}/fdsnws/event/1/query?format=text&orderby=time&starttime={}&endtime={}",
            self.base_url,
            query.span.start_param(),
            query.span.end_param(),
        );
        if let Some(m) = query.min_magnitude {
            url.push_str(&format!("&minmagnitude={}", m));
        }
        if let Some(m) = query.max_magnitude {
            url.push_str(&format!("&maxmagnitude={}", m));
        }
        if let Some(r) = query.region {
            url.push_str(&format!(
                "&minlatitude={}&maxlatitude={}&minlongitude={}&maxlongitude={}",
                r.min_latitude, r.max_latitude, r.min_longitude, r.max_longitude
            ));
        }
        if let Some(c) = &query.catalog {
            url.push_str(&format!("&catalog={}", enc(c)));
        }

        let body = self
            .get_text(&url)
            .with_context(|| format!("GET {}", url))?;
        let events = match body {
            Some(text) => parse_event_text(&text)?,
            None => vec![],
        };
        log::info!("event query returned {} events", events.len());
        Ok(events)
    }

    // Small retry for transient failures (5xx / network errors).
    fn get_text(&self, url: &str) -> Result<Option<String>> {
        log::debug!("GET {}", url);
        let mut last_err: Option<anyhow::Error> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(url).send() {
                Ok(r) if r.status() == StatusCode::NO_CONTENT => return Ok(None),
                Ok(r) if r.status().is_success() => {
                    return r.text().map(Some).context("read body");
                }
                // Some data centers answer 404 instead of 204 for "no data".
                Ok(r) if r.status() == StatusCode::NOT_FOUND => return Ok(None),
                Ok(r) if r.status().is_server_error() => { /* retry */ }
                Ok(r) => bail!("request failed with HTTP {}", r.status()),
                Err(e) => last_err = Some(e.into()),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        bail!("network error: {:?}", last_err);
    }
}

/// Parse an `fdsnws/station` `format=text` payload (channel level).
///
/// Columns: `Network|Station|Location|Channel|Latitude|Longitude|Elevation|…`;
/// trailing instrument-response columns are ignored.
pub fn parse_station_text(text: &str) -> Result<Vec<Channel>> {
    let mut out = Vec::new();
    for (lineno, record) in delimited_records(text).enumerate() {
        let record = record.with_context(|| format!("station row {}", lineno + 1))?;
        let get = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        if record.len() < 7 {
            bail!("station row {}: expected at least 7 columns", lineno + 1);
        }
        let code = ChannelCode::from_parts(&get(0), &get(1), &get(2), &get(3))
            .with_context(|| format!("station row {}", lineno + 1))?;
        out.push(Channel {
            code,
            latitude: parse_f64(&get(4)).with_context(|| format!("station row {}: latitude", lineno + 1))?,
            longitude: parse_f64(&get(5)).with_context(|| format!("station row {}: longitude", lineno + 1))?,
            elevation: opt_f64(&get(6)).with_context(|| format!("station row {}: elevation", lineno + 1))?,
        });
    }
    Ok(out)
}

/// Parse an `fdsnws/event` `format=text` payload.
///
/// Columns: `EventID|Time|Latitude|Longitude|Depth/km|Author|Catalog|
/// Contributor|ContributorID|MagType|Magnitude|MagAuthor|EventLocationName`.
/// Depth and magnitude may be blank; such events stay in the list but are
/// excluded from visual encoding by the callers.
pub fn parse_event_text(text: &str) -> Result<Vec<Event>> {
    let mut out = Vec::new();
    for (lineno, record) in delimited_records(text).enumerate() {
        let record = record.with_context(|| format!("event row {}", lineno + 1))?;
        let get = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        if record.len() < 5 {
            bail!("event row {}: expected at least 5 columns", lineno + 1);
        }
        let opt = |s: String| if s.is_empty() { None } else { Some(s) };
        out.push(Event {
            event_id: get(0),
            time: parse_utc(&get(1)).with_context(|| format!("event row {}: time", lineno + 1))?,
            latitude: parse_f64(&get(2)).with_context(|| format!("event row {}: latitude", lineno + 1))?,
            longitude: parse_f64(&get(3)).with_context(|| format!("event row {}: longitude", lineno + 1))?,
            depth_km: opt_f64(&get(4)).with_context(|| format!("event row {}: depth", lineno + 1))?,
            magnitude: opt_f64(&get(10)).with_context(|| format!("event row {}: magnitude", lineno + 1))?,
            mag_type: opt(get(9)),
            catalog: opt(get(6)),
            region: opt(get(12)),
        });
    }
    Ok(out)
}

fn delimited_records(text: &str) -> impl Iterator<Item = csv::Result<csv::StringRecord>> + '_ {
    csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .comment(Some(b'#'))
        .quoting(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .into_records()
}

fn parse_f64(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("not a number: `{}`", s))
}

fn opt_f64(s: &str) -> Result<Option<f64>> {
    if s.is_empty() {
        Ok(None)
    } else {
        parse_f64(s).map(Some)
    }
}

/// FDSN timestamps come with or without fractional seconds and usually
/// without a zone suffix; all are UTC.
fn parse_utc(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .with_context(|| format!("not a timestamp: `{}`", s))
}
