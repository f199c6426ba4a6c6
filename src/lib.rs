//! seismap
//!
//! A lightweight Rust library for fetching seismic station inventories and
//! earthquake catalogs from FDSN web services and rendering static maps.
//! Pairs with the `seismap` CLI.
//!
//! ### Features
//! - Fetch station/channel inventories and event catalogs from any FDSN data center
//! - Save results as CSV or JSON in a tidy, analysis-friendly schema
//! - Classify events for display: depth → color band, magnitude → marker size
//! - Render station maps, seismicity maps, and source–receiver path maps as SVG/PNG
//!
//! ### Example
//! ```no_run
//! use seismap::encode::{DepthBands, SizeScale};
//! use seismap::viz::MapExtent;
//! use seismap::{Client, EventQuery, TimeSpan};
//!
//! let client = Client::default();
//! let span = TimeSpan::new(
//!     "2010-01-01T00:00:00Z".parse()?,
//!     "2012-01-01T00:00:00Z".parse()?,
//! );
//! let mut query = EventQuery::new(span);
//! query.min_magnitude = Some(4.0);
//! query.max_magnitude = Some(7.0);
//! query.catalog = Some("ISC".into());
//! let events = client.get_events(&query)?;
//! seismap::storage::save_events_csv(&events, "events.csv")?;
//!
//! let bands = DepthBands::default();
//! let scale = SizeScale::new(4.0, 7.0, 2.0, 7.0)?;
//! seismap::viz::plot_event_map(
//!     &events, &bands, &scale, "events.svg", 1024, 640, MapExtent::World, "Global seismicity",
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod encode;
pub mod models;
pub mod stats;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use models::{
    Channel, ChannelCode, Event, EventQuery, FormatError, GeoRect, StationQuery, TimeSpan,
};
