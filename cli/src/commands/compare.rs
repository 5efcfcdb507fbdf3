use crate::OutputFormat;
use crate::output::{json, text};
use anyhow::{Context, Result};
use hex_image_diff::{
    CompareConfig, Comparison, DiffVerdict, MemoryImage, compare, derive_output_path, dump_layout,
    parse_fill_byte,
};
use std::io;
use std::path::Path;
use std::process::ExitCode;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file_a: &str,
    file_b: &str,
    format: OutputFormat,
    max_size: u64,
    fill_byte: &str,
    block_width: u32,
    suppress_erased: bool,
    verbose: u8,
) -> Result<ExitCode> {
    let fill_byte = parse_fill_byte(fill_byte)?;
    let config = CompareConfig::builder()
        .max_unified_size(max_size)
        .fill_byte(fill_byte)
        .block_width(block_width)
        .suppress_erased(suppress_erased)
        .build()?;

    let image_a = MemoryImage::open(file_a)
        .with_context(|| format!("failed to load image A: {}", file_a))?;
    let image_b = MemoryImage::open(file_b)
        .with_context(|| format!("failed to load image B: {}", file_b))?;

    print_image_diagnostics(&image_a, verbose);
    print_image_diagnostics(&image_b, verbose);

    let comparison = compare(&image_a, &image_b, &config)?;

    if verbose >= 1 {
        eprintln!(
            "INFO: unified range: 0x{:08X} - 0x{:08X} (size {} bytes)",
            comparison.range.lowest,
            comparison.range.highest,
            comparison.range.size()
        );
    }

    write_dumps(file_a, file_b, &comparison, config.block_width, verbose)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match format {
        OutputFormat::Text => text::write_text_report(&mut handle, &comparison.report)?,
        OutputFormat::Json => json::write_json_report(&mut handle, &comparison.report)?,
    }

    if verbose >= 1 && !comparison.report.is_identical() {
        eprintln!(
            "INFO: diff: total_diff_bytes={}, suppressed_bytes={}, reported_diff_bytes={}",
            comparison.report.total_diff_bytes,
            comparison.report.suppressed_bytes,
            comparison.report.reported_diff_bytes
        );
    }

    Ok(exit_code_from_verdict(comparison.report.verdict()))
}

fn print_image_diagnostics(image: &MemoryImage, verbose: u8) {
    if verbose >= 1 {
        for overlap in image.overlaps() {
            eprintln!(
                "WARN: overlap at 0x{:08X}: {}:{} overwritten by {}:{}",
                overlap.address,
                image.source(),
                overlap.previous.line,
                image.source(),
                overlap.current.line
            );
        }
        let range = match image.bounds() {
            Some(b) => format!("0x{:08X}-0x{:08X}", b.min, b.max),
            None => "none".to_string(),
        };
        eprintln!(
            "INFO: {}: records={}, bytes_mapped={}, data_range={}",
            image.source(),
            image.records_processed(),
            image.bytes_mapped(),
            range
        );
    }
    if verbose >= 2 {
        for ignored in image.ignored() {
            eprintln!(
                "INFO: ignoring unsupported record type 0x{:02X} at {}:{}",
                ignored.type_code,
                image.source(),
                ignored.line
            );
        }
    }
}

fn write_dumps(
    file_a: &str,
    file_b: &str,
    comparison: &Comparison,
    width: u32,
    verbose: u8,
) -> Result<()> {
    let out_a = derive_output_path(Path::new(file_a));
    let out_b = derive_output_path(Path::new(file_b));

    dump_layout(&out_a, &comparison.layout_a, file_a, comparison.range, width)
        .with_context(|| format!("failed to dump unified layout for {}", file_a))?;
    dump_layout(&out_b, &comparison.layout_b, file_b, comparison.range, width)
        .with_context(|| format!("failed to dump unified layout for {}", file_b))?;

    if verbose >= 1 {
        eprintln!("INFO: wrote unified dump for A to: {}", out_a.display());
        eprintln!("INFO: wrote unified dump for B to: {}", out_b.display());
    }

    Ok(())
}

fn exit_code_from_verdict(verdict: DiffVerdict) -> ExitCode {
    match verdict {
        DiffVerdict::Identical | DiffVerdict::SuppressedOnly => ExitCode::from(0),
        DiffVerdict::Different => ExitCode::from(1),
    }
}
