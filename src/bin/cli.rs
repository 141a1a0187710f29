//! CLI application for body measurement from a silhouette mask.
//!
//! Usage:
//!   goat-measure <mask> --distance 1.5                 # Human-readable output
//!   goat-measure <mask> --distance 1.5 --json          # JSON output
//!   goat-measure <mask> -d 1.5 --overlay debug.png     # Save measurement overlay

use clap::Parser;
use goat_measure::{
    overlay, BodyMeasurements, Config, Landmarks, LandmarkMeasurer, Mask, MeasurementWarning,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "goat-measure")]
#[command(author, version, about = "Body measurements from a silhouette mask", long_about = None)]
struct Args {
    /// Mask image (foreground bright, animal facing left)
    #[arg(required = true)]
    mask: PathBuf,

    /// Capture distance in meters
    #[arg(short, long)]
    distance: f64,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera tilt in degrees (overrides config)
    #[arg(long)]
    tilt: Option<f64>,

    /// Calibration factor (overrides config)
    #[arg(long)]
    calibration: Option<f64>,

    /// Gray level above which a pixel counts as foreground
    #[arg(long, default_value = "127")]
    threshold: u8,

    /// Free-form label stored with the result
    #[arg(long)]
    tag: Option<String>,

    /// Write a measurement overlay image to this path
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output structure for JSON serialization
#[derive(Serialize)]
struct Output {
    mask: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    distance_m: f64,
    tilt_degrees: f64,
    pixels: BodyMeasurements<i64>,
    centimeters: BodyMeasurements<f64>,
    weight_kg: f64,
    valid: bool,
    warnings: Vec<MeasurementWarning>,
    landmarks: Landmarks,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> goat_measure::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading config from {:?}", path);
            Config::load(path)?
        }
        None => Config::default(),
    };
    if let Some(tilt) = args.tilt {
        config.calibration.tilt_degrees = tilt;
    }
    if let Some(factor) = args.calibration {
        config.calibration.factor = factor;
    }

    log::info!("Loading mask {:?}", args.mask);
    let mask = Mask::open(&args.mask, args.threshold)?;
    log::debug!(
        "mask {} with {} foreground pixels",
        mask.shape(),
        mask.foreground_count()
    );

    let measurement = LandmarkMeasurer::new(config.measure).measure(&mask)?;
    let centimeters = config
        .calibration
        .convert_to_cm(measurement.pixels.map(|v| v as f64), args.distance)?;
    let weight_kg = config.weight.predict(&centimeters);

    if let Some(ref path) = args.overlay {
        overlay::save(&mask, &measurement.landmarks, path)?;
        log::info!("Overlay written to {:?}", path);
    }

    let output = Output {
        mask: args.mask.display().to_string(),
        tag: args.tag.clone(),
        distance_m: args.distance,
        tilt_degrees: config.calibration.tilt_degrees,
        pixels: measurement.pixels,
        centimeters,
        weight_kg,
        valid: measurement.is_valid(),
        warnings: measurement.warnings,
        landmarks: measurement.landmarks,
    };

    let output_str = if args.json {
        serde_json::to_string_pretty(&output)?
    } else {
        format_human_readable(&output)
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        log::info!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn format_human_readable(output: &Output) -> String {
    let mut s = String::new();

    s.push_str(&format!("Mask: {}\n", output.mask));
    if let Some(ref tag) = output.tag {
        s.push_str(&format!("Tag: {}\n", tag));
    }
    s.push_str(&format!(
        "Distance: {:.2} m, tilt: {:.1}°\n",
        output.distance_m, output.tilt_degrees
    ));

    s.push_str("\nMeasurements:\n");
    let px = output.pixels.named();
    let cm = output.centimeters.named();
    for ((name, pixels), (_, centimeters)) in px.iter().zip(cm.iter()) {
        s.push_str(&format!("  {:<16} {:>6} px  {:>8.2} cm\n", name, pixels, centimeters));
    }
    s.push_str(&format!("  {:<16} {:>19.2} kg\n", "weight", output.weight_kg));

    let lm = &output.landmarks;
    s.push_str("\nLandmarks:\n");
    s.push_str(&format!(
        "  Base row {}: span {}..{}\n",
        lm.base_row, lm.span.start, lm.span.end
    ));
    for (name, column) in [
        ("Shoulder", &lm.shoulder),
        ("Middle", &lm.middle),
        ("Sacrum", &lm.sacrum),
    ] {
        s.push_str(&format!(
            "  {:<8} column {}: rows {}..{}\n",
            name, column.column, column.start_row, column.end_row
        ));
    }
    s.push_str(&format!(
        "  Center row {}: columns {}..{}\n",
        lm.center.row, lm.center.start_col, lm.center.end_col
    ));
    s.push_str(&format!(
        "  Front feet ({}, {}), back feet ({}, {})\n",
        lm.front_feed.x, lm.front_feed.y, lm.back_feed.x, lm.back_feed.y
    ));

    if !output.valid {
        s.push_str("\nWarnings:\n");
        for warning in &output.warnings {
            s.push_str(&format!("  {:?}\n", warning));
        }
    }

    s
}
