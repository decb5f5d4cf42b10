use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};

use rfshow_session::{ControllerConfig, ShowController};
use rfshow_transport::StreamTransceiver;
use tracing::{info, warn};

use crate::cmd::{parse_duration, DemoArgs};
use crate::exit::{io_error, session_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};

const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const WHITE: [u8; 3] = [255, 255, 255];

/// Colour of lamp 1 (channels 1-3) at each step.
const LAMP1: [[u8; 3]; 4] = [WHITE, RED, GREEN, BLUE];
/// Colour of lamp 2 (channels 4-6) at each step.
const LAMP2: [[u8; 3]; 4] = [RED, GREEN, BLUE, WHITE];

const DEMO_CHANNELS: usize = 6;

type Sink = Box<dyn Write + Send>;

pub fn run(args: DemoArgs) -> CliResult<i32> {
    let config = resolve_config(&args)?;
    let step = parse_duration(&args.step)?;
    let sink = open_sink(&args)?;

    let controller = ShowController::from_config(StreamTransceiver::new(sink), &config)
        .map_err(|err| session_error("controller setup failed", err))?;

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))?;

    controller
        .start(&config.radio, config.refresh_period())
        .map_err(|err| session_error("start failed", err))?;

    let mut steps = 0usize;
    loop {
        let index = steps % LAMP1.len();
        controller
            .set_range(&LAMP1[index], 1)
            .and_then(|()| controller.set_range(&LAMP2[index], 4))
            .map_err(|err| session_error("update failed", err))?;
        if let Err(err) = controller.commit() {
            warn!(error = %err, "commit failed");
        }
        steps += 1;

        if args.cycles.is_some_and(|max| steps >= max) {
            break;
        }
        match stop_rx.recv_timeout(step) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    controller.stop_periodic();
    info!(steps, "demo finished");
    Ok(SUCCESS)
}

fn resolve_config(args: &DemoArgs) -> CliResult<ControllerConfig> {
    let mut config = match &args.config {
        Some(path) => ControllerConfig::from_json_file(path)
            .map_err(|err| session_error("config load failed", err))?,
        None => ControllerConfig {
            channel_count: DEMO_CHANNELS,
            ..ControllerConfig::default()
        },
    };
    if let Some(channels) = args.channels {
        config.channel_count = channels;
    }
    if let Some(rf_channel) = args.rf_channel {
        config.radio.rf_channel = rf_channel;
    }
    if let Some(refresh) = &args.refresh {
        config.refresh_period_ms = u64::try_from(parse_duration(refresh)?.as_millis())
            .map_err(|_| CliError::new(USAGE, "refresh period too large"))?;
    }

    config
        .validate()
        .map_err(|err| session_error("invalid configuration", err))?;
    if config.channel_count < DEMO_CHANNELS {
        return Err(CliError::new(
            USAGE,
            format!(
                "demo drives {DEMO_CHANNELS} channels, configured count is {}",
                config.channel_count
            ),
        ));
    }
    Ok(config)
}

fn open_sink(args: &DemoArgs) -> CliResult<Sink> {
    #[cfg(unix)]
    {
        if let Some(path) = &args.unix {
            let stream = std::os::unix::net::UnixStream::connect(path)
                .map_err(|err| io_error(&format!("connect to {} failed", path.display()), err))?;
            return Ok(Box::new(stream));
        }
    }

    if args.output == Path::new("-") {
        return Ok(Box::new(io::stdout()));
    }
    let file = File::create(&args.output).map_err(|err| {
        io_error(
            &format!("failed creating {}", args.output.display()),
            err,
        )
    })?;
    Ok(Box::new(file))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args() -> DemoArgs {
        DemoArgs {
            output: PathBuf::from("-"),
            #[cfg(unix)]
            unix: None,
            config: None,
            channels: None,
            rf_channel: None,
            refresh: None,
            step: "1s".to_string(),
            cycles: None,
        }
    }

    #[test]
    fn lamps_cycle_through_four_colours() {
        assert_eq!(LAMP1[0], WHITE);
        assert_eq!(LAMP2[0], RED);
        assert_eq!(LAMP1[3], LAMP2[2]);
    }

    #[test]
    fn default_config_drives_six_channels() {
        let config = resolve_config(&args()).unwrap();
        assert_eq!(config.channel_count, DEMO_CHANNELS);
        assert_eq!(config.radio.rf_channel, 76);
    }

    #[test]
    fn overrides_apply() {
        let mut args = args();
        args.channels = Some(12);
        args.rf_channel = Some(100);
        args.refresh = Some("250ms".to_string());

        let config = resolve_config(&args).unwrap();

        assert_eq!(config.channel_count, 12);
        assert_eq!(config.radio.rf_channel, 100);
        assert_eq!(config.refresh_period_ms, 250);
    }

    #[test]
    fn too_few_channels_is_usage_error() {
        let mut args = args();
        args.channels = Some(5);
        assert_eq!(resolve_config(&args).unwrap_err().code, USAGE);
    }

    #[test]
    fn bad_rf_channel_is_rejected() {
        let mut args = args();
        args.rf_channel = Some(200);
        assert!(resolve_config(&args).is_err());
    }
}
