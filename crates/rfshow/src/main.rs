mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "rfshow", version, about = "RF show-control transmitter")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frames_values() {
        let cli = Cli::try_parse_from(["rfshow", "frames", "255,0,255", "0"])
            .expect("frames args should parse");

        let Command::Frames(args) = cli.command else {
            panic!("expected frames command");
        };
        assert_eq!(args.values, vec![255, 0, 255, 0]);
    }

    #[test]
    fn rejects_values_with_fill() {
        let err = Cli::try_parse_from(["rfshow", "frames", "1", "--fill", "2", "--count", "3"])
            .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_out_of_range_channel_value() {
        assert!(Cli::try_parse_from(["rfshow", "frames", "256"]).is_err());
    }

    #[test]
    fn parses_demo_subcommand() {
        let cli = Cli::try_parse_from([
            "rfshow",
            "demo",
            "--output",
            "/tmp/frames.bin",
            "--step",
            "10ms",
            "--cycles",
            "4",
        ])
        .expect("demo args should parse");
        assert!(matches!(cli.command, Command::Demo(_)));
    }
}
