mod commands;
mod output;

use clap::{ArgAction, Parser, ValueEnum};
use hex_image_diff::ConfigError;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "hex-image-diff")]
#[command(about = "Unify two Intel HEX images over one address window, dump both, then diff them")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Path to file A (Intel HEX)")]
    pub file_a: String,
    #[arg(help = "Path to file B (Intel HEX)")]
    pub file_b: String,
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = 1_048_576,
        help = "Maximum unified range size in bytes"
    )]
    pub max_size: u64,
    #[arg(
        long,
        value_name = "HEX",
        default_value = "FF",
        help = "Fill byte for gaps (e.g. FF or 0xFF)"
    )]
    pub fill_byte: String,
    #[arg(
        long,
        default_value_t = 16,
        value_parser = parse_block_width,
        help = "Bytes per line (8 or 16)"
    )]
    pub block_width: u32,
    #[arg(
        long,
        help = "Suppress FF<->00 differences; if all diffs are FF<->00 only, exit 0"
    )]
    pub suppress_erased: bool,
    #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
    pub format: OutputFormat,
    #[arg(
        long,
        short = 'v',
        action = ArgAction::Count,
        help = "Increase diagnostics (-v, -vv)"
    )]
    pub verbose: u8,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_block_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("block width must be 8 or 16 (got {s:?})"))?;
    if width == 8 || width == 16 {
        Ok(width)
    } else {
        Err(format!("block width must be 8 or 16 (got {width})"))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = commands::compare::run(
        &cli.file_a,
        &cli.file_b,
        cli.format,
        cli.max_size,
        &cli.fill_byte,
        cli.block_width,
        cli.suppress_erased,
        cli.verbose,
    );

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if is_usage_error(err) {
        ExitCode::from(2)
    } else {
        ExitCode::from(3)
    }
}

fn is_usage_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<ConfigError>())
}
