use rfshow_frame::{FRAME_SIZE, MAX_CHANNELS, PAYLOAD_SIZE};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("rfshow {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: rfshow");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("RFSHOW_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "frame: {FRAME_SIZE} bytes ({PAYLOAD_SIZE} channels), max_channels: {MAX_CHANNELS}"
    );
    println!(
        "features: async={}, cli=true, unix_socket={}",
        cfg!(feature = "async"),
        cfg!(unix)
    );

    Ok(SUCCESS)
}
