use rfshow_frame::{frame_count, ChannelCount};
use tracing::debug;

use crate::cmd::FramesArgs;
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_frames, OutputFormat};

pub fn run(args: FramesArgs, format: OutputFormat) -> CliResult<i32> {
    let values = resolve_values(args)?;
    debug!(
        channels = values.len(),
        frames = frame_count(values.len()),
        "packetizing"
    );
    print_frames(&values, format);
    Ok(SUCCESS)
}

fn resolve_values(args: FramesArgs) -> CliResult<Vec<u8>> {
    let values = match (args.fill, args.count) {
        (Some(fill), Some(count)) => vec![fill; count],
        _ => args.values,
    };
    if !values.is_empty() {
        ChannelCount::new(values.len()).map_err(|err| frame_error("invalid channel values", err))?;
    }
    Ok(values)
}
