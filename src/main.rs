use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, debug, info};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use fieldarea::api::geocode_place;
use fieldarea::capture::{CaptureAction, PolygonCapture, parse_script};
use fieldarea::config::FileConfig;
use fieldarea::domain::{AreaUnit, FieldRecord, Polygon, RecordKind, SurfaceArea};
use fieldarea::geometry::Bounds;

/// Capture field and plot boundaries and compute their area in hectares
///
/// Examples:
///   # Area of a saved boundary
///   fieldarea area north_field.json
///
///   # Same, in acres
///   fieldarea area north_field.json --unit ac
///
///   # Replay a capture session and save the plot draft
///   fieldarea capture --script session.txt --kind plot --name "Trial 7" --save trial7.json
///
///   # Find a starting point for the map
///   fieldarea locate "Budrio, Italia"
#[derive(Parser, Debug)]
#[command(name = "fieldarea")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches fieldarea.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the area of a saved boundary (JSON array of [lat, lng] pairs)
    Area {
        /// Polygon file
        file: PathBuf,

        /// Output unit: m2, ha or ac (defaults to the configured unit)
        #[arg(short = 'u', long)]
        unit: Option<AreaUnit>,
    },

    /// Replay a capture session script and report every change
    Capture {
        /// Session script (add LAT LNG / clear / center LAT LNG)
        #[arg(short = 's', long)]
        script: PathBuf,

        /// Previously saved boundary to start from
        #[arg(short = 'i', long)]
        initial: Option<PathBuf>,

        /// Display the initial boundary without accepting input
        #[arg(long, conflicts_with = "save")]
        read_only: bool,

        /// Record name
        #[arg(short = 'n', long, default_value = "Unnamed")]
        name: String,

        /// Record kind: location or plot
        #[arg(short = 'k', long, default_value = "location")]
        kind: RecordKind,

        /// Write the resulting record draft as JSON
        #[arg(short = 'o', long)]
        save: Option<PathBuf>,

        /// Output unit: m2, ha or ac (defaults to the configured unit)
        #[arg(short = 'u', long)]
        unit: Option<AreaUnit>,
    },

    /// Geocode a place name to use as the map center
    Locate {
        /// Place name (e.g. "Budrio, Italia")
        place: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        FileConfig::from_path(config_path)?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    if file_config.verbose && !args.verbose {
        raise_verbosity();
    }

    match args.command {
        Command::Area { file, unit } => {
            let unit = unit.unwrap_or(file_config.unit);
            run_area(&file, unit)
        }
        Command::Capture {
            script,
            initial,
            read_only,
            name,
            kind,
            save,
            unit,
        } => {
            let unit = unit.unwrap_or(file_config.unit);
            let mut record = FieldRecord::new(kind, name);
            if let Some(ref path) = initial {
                record.polygon = Some(read_polygon(path)?);
            }
            let session = Session {
                script: &script,
                read_only,
                save: save.as_deref(),
                unit,
            };
            run_capture(record, &session, &file_config)
        }
        Command::Locate { place } => run_locate(&place, &file_config),
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .format_timestamp(None)
        .parse_env("RUST_LOG")
        .init();

    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }
}

fn raise_verbosity() {
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(LevelFilter::Debug);
    }
}

fn read_polygon(path: &Path) -> Result<Polygon> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read polygon file: {:?}", path))?;
    Polygon::from_json(&contents).with_context(|| format!("Invalid polygon in {:?}", path))
}

fn format_area(hectares: f64, unit: AreaUnit) -> String {
    SurfaceArea::hectares(hectares).convert_to(unit).to_string()
}

fn run_area(path: &Path, unit: AreaUnit) -> Result<()> {
    let polygon = read_polygon(path)?;

    if !polygon.has_boundary() {
        println!(
            "No boundary defined ({} point{})",
            polygon.len(),
            if polygon.len() == 1 { "" } else { "s" }
        );
        println!("Area: {}", format_area(0.0, unit));
        return Ok(());
    }

    println!("Vertices: {}", polygon.len());
    if let Some(bounds) = Bounds::from_points(polygon.points()) {
        let (width, height) = bounds.extent_meters();
        println!("Center: {}", bounds.center());
        println!("Extent: {:.0}m x {:.0}m", width, height);
    }
    println!("Area: {}", format_area(polygon.area_hectares(), unit));

    Ok(())
}

struct Session<'a> {
    script: &'a Path,
    read_only: bool,
    save: Option<&'a Path>,
    unit: AreaUnit,
}

fn run_capture(record: FieldRecord, session: &Session<'_>, config: &FileConfig) -> Result<()> {
    let contents = std::fs::read_to_string(session.script)
        .with_context(|| format!("Failed to read session script: {:?}", session.script))?;
    let actions = parse_script(&contents).context("Invalid session script")?;
    debug!("Parsed {} actions from {:?}", actions.len(), session.script);

    let initial = record.boundary().to_vec();
    let record = Rc::new(RefCell::new(record));

    let mut capture = if session.read_only {
        PolygonCapture::read_only(initial)
    } else {
        let sink = Rc::clone(&record);
        let unit = session.unit;
        PolygonCapture::with_points(initial).with_observer(move |points, area| {
            println!(
                "  {} point{} -> {}",
                points.len(),
                if points.len() == 1 { "" } else { "s" },
                format_area(area, unit)
            );
            sink.borrow_mut().apply_capture(points, area);
        })
    };
    if capture.is_empty()
        && let Some(center) = config.center()
    {
        capture.recenter(center);
    }

    {
        let record = record.borrow();
        println!("Editing {} {:?}", record.kind, record.name);
    }
    if capture.is_read_only() {
        println!("Read-only: input is ignored");
    }

    let start = Instant::now();
    let mut ignored = 0usize;
    for action in actions {
        let is_edit = !matches!(action, CaptureAction::Center(_));
        if !action.apply(&mut capture) && is_edit {
            ignored += 1;
        }
    }

    println!();
    println!("Vertices: {}", capture.len());
    if let Some(center) = capture.center() {
        println!("Center: {}", center);
    }
    if !capture.is_usable() {
        println!("Boundary needs at least 3 points to enclose an area");
    }
    println!("Area: {}", format_area(capture.area_hectares(), session.unit));
    if ignored > 0 {
        info!("Ignored {} actions on a read-only boundary", ignored);
    }
    debug!("Session replayed in {:.3}s", start.elapsed().as_secs_f32());

    if let Some(path) = session.save {
        let payload = record.borrow().to_payload()?;
        std::fs::write(path, payload)
            .with_context(|| format!("Failed to write record: {:?}", path))?;
        println!("Saved: {}", path.display());
    }

    Ok(())
}

fn run_locate(place: &str, config: &FileConfig) -> Result<()> {
    let geocoder = config.geocoder.clone().unwrap_or_default();

    let spinner = create_spinner("Geocoding place...");
    let start = Instant::now();
    let found = geocode_place(place, &geocoder).context("Failed to geocode place")?;
    spinner.finish_with_message(format!(
        "Geocoded: {} -> {} [{:.1}s]",
        place,
        found.center,
        start.elapsed().as_secs_f32()
    ));

    println!("{}", found.name);
    println!("lat = {}", found.center.lat);
    println!("lng = {}", found.center.lng);

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
