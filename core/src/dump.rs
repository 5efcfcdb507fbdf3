//! Unified-layout dump artifacts.
//!
//! Each compared input gets a deterministic text rendering of its dense
//! layout: exactly four header lines, then one line per block. Re-running a
//! comparison replaces the artifact wholesale (delete, then write).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error_codes;
use crate::render::{ascii_column, hex_bytes};
use crate::unify::UnifiedRange;

pub const DUMP_FORMAT_TAG: &str = "# UNIFIED_MEMORY_LAYOUT v1";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DumpError {
    #[error("failed to remove existing output file {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write output file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl DumpError {
    pub fn code(&self) -> &'static str {
        match self {
            DumpError::Remove { .. } => error_codes::DUMP_REMOVE,
            DumpError::Write { .. } => error_codes::DUMP_WRITE,
        }
    }
}

/// Dump destination for an input path: `.hex` (any case) becomes
/// `.unified.txt`, anything else gets `.unified.txt` appended.
pub fn derive_output_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("hex") => input.with_extension("unified.txt"),
        _ => {
            let mut name = input.as_os_str().to_os_string();
            name.push(".unified.txt");
            PathBuf::from(name)
        }
    }
}

/// The mandatory header. Exactly four lines; content starts at line 5.
pub fn header_lines(source: &str, range: UnifiedRange) -> [String; 4] {
    [
        DUMP_FORMAT_TAG.to_string(),
        format!("# SOURCE {source}"),
        format!(
            "# RANGE 0x{:08X} 0x{:08X} SIZE {}",
            range.lowest,
            range.highest,
            range.size()
        ),
        "# FORMAT: 0xAAAAAAAA: <hex bytes>  |<ASCII>|   (CONTENT_STARTS_AT_LINE 5)".to_string(),
    ]
}

/// Render one layout to a writer: header, then one block line per `width`
/// bytes. Deterministic for a given layout and width.
pub fn write_layout<W: Write>(
    w: &mut W,
    layout: &[u8],
    source: &str,
    range: UnifiedRange,
    width: u32,
) -> io::Result<()> {
    for line in header_lines(source, range) {
        writeln!(w, "{line}")?;
    }

    for (block_idx, chunk) in layout.chunks(width as usize).enumerate() {
        let address = range.lowest + (block_idx as u32) * width;
        writeln!(
            w,
            "0x{address:08X}: {}  |{}|",
            hex_bytes(chunk, width),
            ascii_column(chunk)
        )?;
    }

    Ok(())
}

/// Persist one layout to `out_path`, deleting any previous artifact first so
/// repeated runs are idempotent.
pub fn dump_layout(
    out_path: &Path,
    layout: &[u8],
    source: &str,
    range: UnifiedRange,
    width: u32,
) -> Result<(), DumpError> {
    let path_str = out_path.display().to_string();

    if out_path.exists() {
        fs::remove_file(out_path).map_err(|e| DumpError::Remove {
            path: path_str.clone(),
            source: e,
        })?;
    }

    let file = File::create(out_path).map_err(|e| DumpError::Write {
        path: path_str.clone(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    write_layout(&mut writer, layout, source, range, width).map_err(|e| DumpError::Write {
        path: path_str.clone(),
        source: e,
    })?;
    writer.flush().map_err(|e| DumpError::Write {
        path: path_str,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(layout: &[u8], range: UnifiedRange, width: u32) -> String {
        let mut out = Vec::new();
        write_layout(&mut out, layout, "a.hex", range, width).expect("render to memory");
        String::from_utf8(out).expect("dump output is ASCII")
    }

    #[test]
    fn header_is_exactly_four_lines_and_content_starts_at_line_5() {
        let range = UnifiedRange {
            lowest: 0,
            highest: 15,
        };
        let text = render(&[0u8; 16], range, 16);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], DUMP_FORMAT_TAG);
        assert_eq!(lines[1], "# SOURCE a.hex");
        assert_eq!(lines[2], "# RANGE 0x00000000 0x0000000F SIZE 16");
        assert!(lines[3].starts_with("# FORMAT:"));
        assert!(lines[4].starts_with("0x00000000:"));
    }

    #[test]
    fn body_lines_carry_address_hex_and_ascii() {
        let range = UnifiedRange {
            lowest: 0x0001_0000,
            highest: 0x0001_0007,
        };
        let text = render(b"ABCD\x00\xFFzz", range, 8);
        let body = text.lines().nth(4).expect("one body line");
        assert_eq!(body, "0x00010000: 41 42 43 44 00 FF 7A 7A  |ABCD..zz|");
    }

    #[test]
    fn final_short_block_is_padded() {
        let range = UnifiedRange {
            lowest: 0,
            highest: 9,
        };
        let text = render(&[0x11; 10], range, 8);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], "0x00000000: 11 11 11 11 11 11 11 11  |........|");
        assert_eq!(lines[5], "0x00000008: 11 11                    |..|");
    }

    #[test]
    fn derive_output_path_handles_hex_extension_case_insensitively() {
        assert_eq!(
            derive_output_path(Path::new("fw.hex")),
            PathBuf::from("fw.unified.txt")
        );
        assert_eq!(
            derive_output_path(Path::new("FW.HEX")),
            PathBuf::from("FW.unified.txt")
        );
        assert_eq!(
            derive_output_path(Path::new("dump.bin")),
            PathBuf::from("dump.bin.unified.txt")
        );
        assert_eq!(
            derive_output_path(Path::new("noext")),
            PathBuf::from("noext.unified.txt")
        );
    }

    #[test]
    fn dumping_twice_yields_identical_artifacts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("a.unified.txt");
        let range = UnifiedRange {
            lowest: 0,
            highest: 7,
        };
        let layout = [0xAA; 8];

        dump_layout(&out, &layout, "a.hex", range, 8).expect("first dump");
        let first = fs::read(&out).expect("read first dump");
        dump_layout(&out, &layout, "a.hex", range, 8).expect("second dump");
        let second = fs::read(&out).expect("read second dump");
        assert_eq!(first, second);
    }
}
