use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use floorplan::constants::WALL_TOLERANCE;
use floorplan::export::{export_to_csv, export_to_json, layout_file_stem};
use floorplan::visualization::render_layout;
use floorplan::{
    BuildingSpec, Config, LayoutSummary, RoomSource, place_rooms_with, read_room_file,
};

#[derive(Parser)]
#[command(author, version, about = "Place rooms into an adjacency-aware floor plan", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: PathBuf,

    /// Room specification (JSON or CSV). Quick mode counts are used when omitted
    #[arg(short, long)]
    rooms: Option<PathBuf>,

    /// Number of bedrooms (quick mode, the first is the master bedroom)
    #[arg(long, default_value_t = 2)]
    bedrooms: u32,

    /// Number of bathrooms (quick mode)
    #[arg(long, default_value_t = 1)]
    bathrooms: u32,

    #[arg(long)]
    no_kitchen: bool,

    #[arg(long)]
    no_living_room: bool,

    #[arg(long)]
    dining_room: bool,

    #[arg(long)]
    study: bool,

    /// Spacing margin in meters (overrides the config file)
    #[arg(short, long)]
    margin: Option<f64>,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Export format: csv, json or both (overrides the config file)
    #[arg(short, long)]
    format: Option<String>,

    /// Also render a PNG floor plan
    #[arg(long)]
    render: bool,
}

impl Args {
    fn building_spec(&self) -> BuildingSpec {
        BuildingSpec {
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            kitchen: !self.no_kitchen,
            living_room: !self.no_living_room,
            dining_room: self.dining_room,
            study: self.study,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config)?;
    if let Some(margin) = args.margin {
        config.layout.spacing_margin = margin;
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.display().to_string();
    }
    if let Some(format) = &args.format {
        config.output.format = format.clone();
    }
    config.output.render |= args.render;
    config.validate()?;

    let defaults = config.room_defaults()?;
    let source = match &args.rooms {
        Some(path) => read_room_file(path)
            .with_context(|| format!("Failed to read room specification {}", path.display()))?,
        None => RoomSource::Building(args.building_spec()),
    };
    let requests = source.into_requests(&defaults)?;

    info!("=== Floor Plan Layout ===");
    info!("Configuration: {}", args.config.display());
    info!("Rooms requested: {}", requests.len());
    info!("Spacing margin: {} m", config.layout.spacing_margin);

    let adjacency = config.adjacency_table()?;
    let rooms = place_rooms_with(
        &requests,
        &adjacency,
        config.layout.spacing_margin,
        &config.placement_options(),
    )?;

    for room in &rooms {
        info!(
            "{:<16} {:<14} at ({:>6.2}, {:>6.2})  {:.1} x {:.1} m  [{}]",
            room.name, room.room_type, room.x, room.y, room.width, room.height, room.method
        );
    }

    let summary = LayoutSummary::from_rooms(&rooms, config.layout.spacing_margin + WALL_TOLERANCE);
    summary.log_summary();
    if summary.overlaps > 0 {
        error!("Layout contains {} overlapping pairs", summary.overlaps);
    }

    let output_dir = PathBuf::from(&config.output.dir);
    let stem = layout_file_stem();
    let format = config.output.format.as_str();

    if matches!(format, "csv" | "both") {
        let path = export_to_csv(&rooms, Some(&output_dir), &stem)?;
        info!("Wrote layout CSV: {}", path.display());
    }
    if matches!(format, "json" | "both") {
        let path = export_to_json(&rooms, &summary, Some(&output_dir), &stem)?;
        info!("Wrote layout JSON: {}", path.display());
    }
    if config.output.render {
        let path = output_dir.join(format!("{stem}.png"));
        match render_layout(&rooms, &path, config.output.pixels_per_meter) {
            Ok(()) => info!("Wrote floor plan image: {}", path.display()),
            Err(e) => error!("Failed to render floor plan: {e}"),
        }
    }

    Ok(())
}
