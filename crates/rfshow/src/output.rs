use std::fmt::Write as _;
use std::io::{IsTerminal, Write};

use bytes::BytesMut;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rfshow_frame::{encode_frames, frames, PAYLOAD_SIZE};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FrameOutput {
    pub sequence: u8,
    pub first_channel: usize,
    pub last_channel: usize,
    pub bytes: String,
}

/// Describe each frame of `values`; channel ranges cover real values only.
pub fn describe_frames(values: &[u8]) -> Vec<FrameOutput> {
    frames(values)
        .map(|frame| {
            let first = frame.first_channel();
            let carried = (values.len() + 1 - first).min(PAYLOAD_SIZE);
            FrameOutput {
                sequence: frame.sequence(),
                first_channel: first,
                last_channel: first + carried - 1,
                bytes: hex(frame.as_bytes()),
            }
        })
        .collect()
}

pub fn print_frames(values: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for out in describe_frames(values) {
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SEQ", "CHANNELS", "BYTES"]);
            for out in describe_frames(values) {
                table.add_row(vec![
                    out.sequence.to_string(),
                    format!("{}-{}", out.first_channel, out.last_channel),
                    out.bytes,
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for out in describe_frames(values) {
                println!(
                    "seq={} channels={}-{} bytes={}",
                    out.sequence, out.first_channel, out.last_channel, out.bytes
                );
            }
        }
        OutputFormat::Raw => {
            let mut buf = BytesMut::new();
            encode_frames(values, &mut buf);
            print_raw(&buf);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
