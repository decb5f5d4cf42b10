use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod demo;
pub mod frames;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Packetize channel values and print the resulting radio frames.
    Frames(FramesArgs),
    /// Run the two-lamp RGB chase against a byte-stream radio bridge.
    Demo(DemoArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Frames(args) => frames::run(args, format),
        Command::Demo(args) => demo::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct FramesArgs {
    /// Channel values, channel 1 first (comma or space separated).
    #[arg(value_delimiter = ',', conflicts_with_all = ["fill", "count"])]
    pub values: Vec<u8>,
    /// Value to fill every channel with.
    #[arg(long, requires = "count")]
    pub fill: Option<u8>,
    /// Number of channels to fill.
    #[arg(long, requires = "fill")]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Write frames to this file ("-" for stdout).
    #[arg(long, short = 'o', default_value = "-")]
    pub output: PathBuf,
    /// Connect to a radio bridge listening on this Unix socket instead.
    #[cfg(unix)]
    #[arg(long, value_name = "PATH", conflicts_with = "output")]
    pub unix: Option<PathBuf>,
    /// Controller configuration file (JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Channel count (at least 6).
    #[arg(long)]
    pub channels: Option<usize>,
    /// RF channel (0-127).
    #[arg(long)]
    pub rf_channel: Option<u8>,
    /// Refresh period of the periodic transmitter (e.g. 500ms, 1s).
    #[arg(long)]
    pub refresh: Option<String>,
    /// Time between colour steps.
    #[arg(long, default_value = "1s")]
    pub step: String,
    /// Stop after this many colour steps.
    #[arg(long)]
    pub cycles: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
