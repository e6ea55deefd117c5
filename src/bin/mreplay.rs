//! Motion Replay CLI
//!
//! Commands:
//! - play: Replay a recorded series as a simulated live feed
//! - scan: Classify a whole series offline and report jerks
//! - validate: Check a series source for shape and parse problems
//! - schema: Print input/output schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use motion_replay::classifier::{
    JerkDetector, ACCEL_THRESHOLD_G, GYRO_THRESHOLD_DPS, VERTICAL_DEVIATION_G,
};
use motion_replay::frame::FrameEncoder;
use motion_replay::loader;
use motion_replay::player::{Playback, TICK_PERIOD};
use motion_replay::types::{Sample, Series, SAMPLE_COLUMNS};
use motion_replay::{ReplayError, ENGINE_VERSION};

/// Motion Replay - replay and jerk-flagging engine for six-axis sensor streams
#[derive(Parser)]
#[command(name = "mreplay")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Replay recorded motion-sensor streams as a live feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded series as a simulated live feed
    Play {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Tick period in milliseconds (0 replays as fast as possible)
        #[arg(long, default_value_t = TICK_PERIOD.as_millis() as u64)]
        tick_ms: u64,

        /// Stop after this many ticks
        #[arg(long)]
        max_ticks: Option<usize>,

        /// Output format for per-tick records
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Print a full chart frame after the replay ends
        #[arg(long)]
        final_frame: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Classify a whole series offline and report jerks
    Scan {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Check a series source for shape and parse problems
    Validate {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema,
}

#[derive(clap::Args)]
struct ThresholdArgs {
    /// Accelerometer threshold for |ax| and |ay| (g)
    #[arg(long, default_value_t = ACCEL_THRESHOLD_G)]
    accel_g: f64,

    /// Allowed deviation of az from the 1 g rest baseline (g)
    #[arg(long, default_value_t = VERTICAL_DEVIATION_G)]
    vertical_deviation_g: f64,

    /// Gyroscope threshold for |gx|, |gy|, |gz| (deg/s)
    #[arg(long, default_value_t = GYRO_THRESHOLD_DPS)]
    gyro_dps: f64,
}

impl ThresholdArgs {
    fn detector(&self) -> JerkDetector {
        JerkDetector {
            accel_g: self.accel_g,
            vertical_deviation_g: self.vertical_deviation_g,
            gyro_dps: self.gyro_dps,
            ..Default::default()
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One JSON record per tick
    Ndjson,
    /// Pretty-printed JSON record per tick
    JsonPretty,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ReplayCliError> {
    match cli.command {
        Commands::Play {
            input,
            tick_ms,
            max_ticks,
            output_format,
            final_frame,
            thresholds,
        } => cmd_play(
            &input,
            tick_ms,
            max_ticks,
            output_format,
            final_frame,
            thresholds.detector(),
        ),

        Commands::Scan {
            input,
            json,
            thresholds,
        } => cmd_scan(&input, json, thresholds.detector()),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Schema => cmd_schema(),
    }
}

fn cmd_play(
    input: &Path,
    tick_ms: u64,
    max_ticks: Option<usize>,
    output_format: OutputFormat,
    final_frame: bool,
    detector: JerkDetector,
) -> Result<(), ReplayCliError> {
    let series = load_input(input)?;
    let mut player = Playback::new(series);
    let encoder = FrameEncoder::with_detector(detector);
    player.start();

    let period = Duration::from_millis(tick_ms);
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let mut ticks = 0usize;

    while let Some(sample) = player.tick() {
        let record = TickRecord {
            cursor: player.cursor(),
            jerk: detector.is_jerk(&sample),
            sample,
        };
        let line = match output_format {
            OutputFormat::Ndjson => serde_json::to_string(&record)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(&record)?,
        };
        writeln!(stdout, "{line}")?;
        stdout.flush()?;

        ticks += 1;
        if max_ticks.is_some_and(|max| ticks >= max) {
            player.pause();
            break;
        }
        if !period.is_zero() {
            thread::sleep(period);
        }
    }

    if final_frame {
        writeln!(stdout, "{}", encoder.encode_to_json(&player)?)?;
    }

    Ok(())
}

fn cmd_scan(input: &Path, json: bool, detector: JerkDetector) -> Result<(), ReplayCliError> {
    let series = load_input(input)?;
    let jerks = detector.scan(series.as_slice());

    let report = ScanReport {
        total_samples: series.len(),
        jerk_count: jerks.len(),
        jerk_timestamps: jerks.iter().map(|s| s.timestamp).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Scan Report");
        println!("===========");
        println!("Total samples: {}", report.total_samples);
        println!("Jerks flagged: {}", report.jerk_count);

        if !report.jerk_timestamps.is_empty() {
            println!("\nJerk timestamps:");
            for t in &report.jerk_timestamps {
                println!("  - {t}");
            }
        }
    }

    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), ReplayCliError> {
    let text = read_input(input)?;
    let series = loader::parse_csv(&text)?;

    let nan_rows: Vec<usize> = series
        .iter()
        .enumerate()
        .filter(|(_, s)| has_nan(s))
        .map(|(i, _)| i)
        .collect();

    let report = ValidationReport {
        total_samples: series.len(),
        numeric_samples: series.len() - nan_rows.len(),
        non_numeric_samples: nan_rows.len(),
        non_numeric_rows: nan_rows,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total samples:       {}", report.total_samples);
        println!("Fully numeric:       {}", report.numeric_samples);
        println!("With NaN fields:     {}", report.non_numeric_samples);

        if !report.non_numeric_rows.is_empty() {
            println!("\nRows carrying NaN (forwarded unchanged to playback):");
            for row in &report.non_numeric_rows {
                println!("  - data row {row}");
            }
        }
    }

    Ok(())
}

fn cmd_schema() -> Result<(), ReplayCliError> {
    println!("Input: UTF-8 CSV, first line = column names");
    println!();
    println!("Expected columns (any order): {}", SAMPLE_COLUMNS.join(", "));
    println!("  timestamp    seconds from session start");
    println!("  ax, ay, az   linear acceleration (g); az is gravity-offset, 1.0 at rest");
    println!("  gx, gy, gz   angular rate (deg/s)");
    println!();
    println!("Output: one tick record per line (NDJSON)");
    println!("  {{ \"cursor\": n, \"jerk\": bool, \"sample\": {{ ... }} }}");
    println!();
    println!("Chart frame (--final-frame):");
    println!("  {{ producer, computed_at_utc, phase, cursor, samples, jerk_timestamps }}");

    Ok(())
}

// Helper functions

fn read_input(input: &Path) -> Result<String, ReplayCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn load_input(input: &Path) -> Result<Series, ReplayCliError> {
    let series = loader::parse_csv(&read_input(input)?)?;
    if series.is_empty() {
        return Err(ReplayCliError::NoSamples);
    }
    Ok(series)
}

fn has_nan(sample: &Sample) -> bool {
    [
        sample.timestamp,
        sample.ax,
        sample.ay,
        sample.az,
        sample.gx,
        sample.gy,
        sample.gz,
    ]
    .iter()
    .any(|v| v.is_nan())
}

// Error types

#[derive(Debug)]
enum ReplayCliError {
    Io(io::Error),
    Replay(ReplayError),
    Json(serde_json::Error),
    NoSamples,
}

impl From<io::Error> for ReplayCliError {
    fn from(e: io::Error) -> Self {
        ReplayCliError::Io(e)
    }
}

impl From<ReplayError> for ReplayCliError {
    fn from(e: ReplayError) -> Self {
        ReplayCliError::Replay(e)
    }
}

impl From<serde_json::Error> for ReplayCliError {
    fn from(e: serde_json::Error) -> Self {
        ReplayCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<ReplayCliError> for CliError {
    fn from(e: ReplayCliError) -> Self {
        match e {
            ReplayCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            ReplayCliError::Replay(e) => CliError {
                code: "LOAD_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'mreplay schema' for the expected input shape".to_string()),
            },
            ReplayCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            ReplayCliError::NoSamples => CliError {
                code: "NO_SAMPLES".to_string(),
                message: "Series has no data rows".to_string(),
                hint: Some("Ensure the input has rows beyond the header".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct TickRecord {
    cursor: usize,
    jerk: bool,
    sample: Sample,
}

#[derive(serde::Serialize)]
struct ScanReport {
    total_samples: usize,
    jerk_count: usize,
    jerk_timestamps: Vec<f64>,
}

#[derive(serde::Serialize)]
struct ValidationReport {
    total_samples: usize,
    numeric_samples: usize,
    non_numeric_samples: usize,
    non_numeric_rows: Vec<usize>,
}
