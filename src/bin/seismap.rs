use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use seismap::encode::{DepthBands, SizeScale};
use seismap::viz::{self, MapExtent};
use seismap::{Client, EventQuery, GeoRect, StationQuery, TimeSpan};
use seismap::{stats, storage};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "seismap",
    version,
    about = "Fetch seismic stations & earthquake catalogs from FDSN services, render static maps"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a station inventory (and optionally save and map it).
    Stations(StationsArgs),
    /// Fetch an event catalog (and optionally save, map, and summarize it).
    Events(EventsArgs),
    /// Map one event with its receiving stations and source–receiver paths.
    Paths(PathsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Save fetched rows to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Create a map at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the map in pixels.
    #[arg(long, default_value_t = 1024)]
    width: u32,
    /// Height of the map in pixels.
    #[arg(long, default_value_t = 640)]
    height: u32,
    /// Map extent as min_lon:max_lon:min_lat:max_lat. Defaults to the query
    /// region when one is given, otherwise the whole world.
    #[arg(long)]
    extent: Option<String>,
    /// Map title (a default is derived from the query).
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct StationsArgs {
    /// Network code (FDSN globs allowed, e.g. IU or I?)
    #[arg(short, long, default_value = "IU")]
    network: String,
    /// Station code glob
    #[arg(short, long, default_value = "*")]
    station: String,
    /// Location code (empty string for blank location)
    #[arg(short, long, default_value = "00")]
    location: String,
    /// Channel code glob
    #[arg(short, long, default_value = "BHZ")]
    channel: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct EventsArgs {
    /// Window start: YYYY-MM-DD or an ISO timestamp
    #[arg(long)]
    start: String,
    /// Window end (inclusive)
    #[arg(long)]
    end: String,
    /// Minimum magnitude filter; also anchors the marker size scale
    #[arg(long)]
    min_mag: Option<f64>,
    /// Maximum magnitude filter
    #[arg(long)]
    max_mag: Option<f64>,
    /// Search region as min_lon:max_lon:min_lat:max_lat
    #[arg(long)]
    region: Option<String>,
    /// Catalog name, e.g. ISC or "NEIC PDE"
    #[arg(long)]
    catalog: Option<String>,
    /// Marker radius at the scale minimum, in pixels
    #[arg(long, default_value_t = 2.0)]
    min_size: f64,
    /// Marker radius at the scale maximum, in pixels
    #[arg(long, default_value_t = 7.0)]
    max_size: f64,
    /// Print a catalog summary to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct PathsArgs {
    /// Origin time of the event to look up
    #[arg(long)]
    time: String,
    /// Seconds searched on either side of --time
    #[arg(long, default_value_t = 10)]
    window: i64,
    /// Minimum magnitude for the event lookup
    #[arg(long)]
    min_mag: Option<f64>,
    /// Network code for the receiving stations
    #[arg(long, default_value = "IU")]
    network: String,
    /// Station code glob
    #[arg(long, default_value = "*")]
    station: String,
    /// Location code
    #[arg(long, default_value = "00")]
    location: String,
    /// Channel code glob
    #[arg(long, default_value = "BHZ")]
    channel: String,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Stations(args) => cmd_stations(args),
        Command::Events(args) => cmd_events(args),
        Command::Paths(args) => cmd_paths(args),
    }
}

fn parse_time(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN).and_utc());
    }
    anyhow::bail!("invalid time `{}`, expected YYYY-MM-DD or an ISO timestamp", s)
}

fn parse_rect(s: &str) -> Result<GeoRect> {
    let parts: Vec<f64> = s
        .split(':')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| {
            anyhow::anyhow!("invalid extent `{}`, expected min_lon:max_lon:min_lat:max_lat", s)
        })?;
    let &[min_longitude, max_longitude, min_latitude, max_latitude] = parts.as_slice() else {
        anyhow::bail!("invalid extent `{}`, expected min_lon:max_lon:min_lat:max_lat", s);
    };
    Ok(GeoRect {
        min_longitude,
        max_longitude,
        min_latitude,
        max_latitude,
    })
}

fn resolve_extent(arg: &Option<String>, region: Option<GeoRect>) -> Result<MapExtent> {
    match arg {
        Some(s) => Ok(MapExtent::Region(parse_rect(s)?)),
        None => Ok(region.map(MapExtent::Region).unwrap_or(MapExtent::World)),
    }
}

fn resolve_format(path: &Path, format: Option<OutFormat>) -> Result<OutFormat> {
    if let Some(f) = format {
        return Ok(f);
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => Ok(OutFormat::Csv),
        "json" => Ok(OutFormat::Json),
        other => anyhow::bail!("unsupported format: {}", other),
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn cmd_stations(args: StationsArgs) -> Result<()> {
    let client = Client::default();
    let query = StationQuery {
        network: args.network,
        station: args.station,
        location: args.location,
        channel: args.channel,
    };
    let channels = client.get_stations(&query)?;

    if let Some(path) = args.output.out.as_ref() {
        match resolve_format(path, args.output.format)? {
            OutFormat::Csv => storage::save_stations_csv(&channels, path)?,
            OutFormat::Json => storage::save_stations_json(&channels, path)?,
        }
        eprintln!("Saved {} rows to {}", channels.len(), path.display());
    }

    if let Some(plot_path) = args.output.plot.as_ref() {
        let extent = resolve_extent(&args.output.extent, None)?;
        let title = args
            .output
            .title
            .clone()
            .unwrap_or_else(|| format!("{} network stations", query.network));
        viz::plot_station_map(
            &channels,
            plot_path,
            args.output.width,
            args.output.height,
            extent,
            &title,
        )?;
        eprintln!("Wrote map to {}", plot_path.display());
    }

    Ok(())
}

fn cmd_events(args: EventsArgs) -> Result<()> {
    let client = Client::default();
    let span = TimeSpan::new(parse_time(&args.start)?, parse_time(&args.end)?);
    let region = args.region.as_deref().map(parse_rect).transpose()?;
    let query = EventQuery {
        span,
        min_magnitude: args.min_mag,
        max_magnitude: args.max_mag,
        region,
        catalog: args.catalog.clone(),
    };
    let events = client.get_events(&query)?;
    let bands = DepthBands::default();

    if let Some(path) = args.output.out.as_ref() {
        match resolve_format(path, args.output.format)? {
            OutFormat::Csv => storage::save_events_csv(&events, path)?,
            OutFormat::Json => storage::save_events_json(&events, path)?,
        }
        eprintln!("Saved {} rows to {}", events.len(), path.display());
    }

    if let Some(plot_path) = args.output.plot.as_ref() {
        // Anchor the size scale to the query's magnitude window when the user
        // gave one, so symbol sizes stay comparable across runs; otherwise fit
        // it to the fetched catalog.
        let scale = match (args.min_mag, args.max_mag) {
            (Some(a), Some(b)) => SizeScale::new(a, b, args.min_size, args.max_size)?,
            _ => viz::magnitude_scale_for(&events, args.min_size, args.max_size)?,
        };
        let extent = resolve_extent(&args.output.extent, region)?;
        let title = args.output.title.clone().unwrap_or_else(|| {
            match &args.catalog {
                Some(c) => format!("{} seismicity", c),
                None => "Seismicity".to_string(),
            }
        });
        viz::plot_event_map(
            &events,
            &bands,
            &scale,
            plot_path,
            args.output.width,
            args.output.height,
            extent,
            &title,
        )?;
        eprintln!("Wrote map to {}", plot_path.display());
    }

    if args.stats {
        let s = stats::catalog_summary(&events, &bands);
        println!(
            "{} events ({} plottable, {} missing depth, {} missing magnitude)",
            s.total, s.plottable, s.missing_depth, s.missing_magnitude
        );
        println!(
            "magnitude {} to {} (mean {})",
            fmt_opt(s.min_magnitude),
            fmt_opt(s.max_magnitude),
            fmt_opt(s.mean_magnitude)
        );
        println!(
            "depth [km] {} to {}",
            fmt_opt(s.min_depth_km),
            fmt_opt(s.max_depth_km)
        );
        for (label, count) in bands.labels().iter().zip(&s.band_counts) {
            println!("  {:>10}: {}", label, count);
        }
    }

    Ok(())
}

fn cmd_paths(args: PathsArgs) -> Result<()> {
    let client = Client::default();
    let center = parse_time(&args.time)?;
    let mut query = EventQuery::new(TimeSpan::around(center, args.window));
    query.min_magnitude = args.min_mag;
    let events = client.get_events(&query)?;
    let Some(event) = events.first() else {
        anyhow::bail!("no event found within {}s of {}", args.window, args.time);
    };

    let channels = client.get_stations(&StationQuery {
        network: args.network,
        station: args.station,
        location: args.location,
        channel: args.channel,
    })?;

    if let Some(path) = args.output.out.as_ref() {
        match resolve_format(path, args.output.format)? {
            OutFormat::Csv => storage::save_stations_csv(&channels, path)?,
            OutFormat::Json => storage::save_stations_json(&channels, path)?,
        }
        eprintln!("Saved {} rows to {}", channels.len(), path.display());
    }

    if let Some(plot_path) = args.output.plot.as_ref() {
        let extent = resolve_extent(&args.output.extent, None)?;
        let title = args.output.title.clone().unwrap_or_else(|| {
            event
                .region
                .clone()
                .unwrap_or_else(|| format!("Event {}", event.event_id))
        });
        viz::plot_path_map(
            event,
            &channels,
            plot_path,
            args.output.width,
            args.output.height,
            extent,
            &title,
        )?;
        eprintln!("Wrote map to {}", plot_path.display());
    }

    Ok(())
}
