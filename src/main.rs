//! Ladder - ladder-logic runtime
//!
//! Loads a program document, applies tag assignments and runs the scan
//! cycle with the drive simulation.
//!
//! # Usage
//!
//! ```bash
//! ladder program.json --set I0.1=true --ticks 60
//! RUST_LOG=debug ladder program.json --realtime --ticks 20 --json
//! ```

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ladder_core::{
    error::Result,
    interchange,
    monitor::{self, OutputFormat},
    physics::SimulationParameters,
    profile::DeviceKind,
    RuntimeConfig, Session, DEFAULT_MOTOR_TAG, DEFAULT_SCAN_PERIOD_MS,
};
use tracing::Level;

/// Ladder-logic scan engine with a VFD/motor simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the program document (.json)
    #[arg(value_name = "PROGRAM_FILE")]
    program_file: PathBuf,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 50)]
    ticks: u64,

    /// Scan period in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_SCAN_PERIOD_MS)]
    period: u64,

    /// Tag assignment applied before the first tick (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    assignments: Vec<String>,

    /// Create the I/O tags of a device profile
    #[arg(short, long, value_enum)]
    device: Option<DeviceKind>,

    /// Tag that runs the simulated drive
    #[arg(long, default_value = DEFAULT_MOTOR_TAG)]
    motor_tag: String,

    /// Disable the drive simulation
    #[arg(long)]
    no_simulation: bool,

    /// Drive acceleration time in seconds
    #[arg(long, default_value_t = 5.0)]
    accel: f64,

    /// Drive deceleration time in seconds
    #[arg(long, default_value_t = 5.0)]
    decel: f64,

    /// Drive maximum frequency in Hz
    #[arg(long, default_value_t = 60.0)]
    max_freq: f64,

    /// Tick on the wall clock instead of back to back
    #[arg(short, long)]
    realtime: bool,

    /// Print one JSON snapshot per tick
    #[arg(long)]
    json: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Build the session
    let params = SimulationParameters::new(args.accel, args.decel, args.max_freq)?;
    let config = RuntimeConfig::new()
        .with_scan_period(Duration::from_millis(args.period))
        .with_motor_tag(args.motor_tag)
        .with_simulation(!args.no_simulation)
        .with_simulation_params(params);
    let session = Arc::new(Session::new(config)?);

    // Install the program
    let doc = interchange::parse_file(&args.program_file)?;
    session.install_doc(doc)?;

    if let Some(device) = args.device {
        session.seed_profile(device);
    }
    for assignment in &args.assignments {
        let (name, value) = monitor::parse_assignment(assignment)?;
        session.set_tag(name, value);
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut stdout = io::stdout().lock();

    if args.realtime {
        monitor::run_realtime(session, args.ticks, format, &mut stdout)?;
    } else {
        monitor::run_batch(&session, args.ticks, format, &mut stdout)?;
    }

    Ok(())
}
