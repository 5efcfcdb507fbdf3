//! Block-based diff of two dense layouts.
//!
//! This module defines the types used to represent differences between two
//! unified layouts:
//! - [`DiffBlock`]: one differing block with per-byte markers
//! - [`DiffReport`]: every differing block plus byte counters
//! - [`DiffError`]: the internal invariant violation the differ can detect
//!
//! Blocks whose bytes match on both sides produce nothing; the differ never
//! aggregates or truncates the blocks that differ.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CompareConfig;
use crate::error_codes;
use crate::render::{ascii_column, hex_bytes};

/// Per-byte classification inside a differing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// Bytes are equal at this position.
    Equal,
    /// A reported difference.
    Reported,
    /// An FF<->00 difference hidden by suppression.
    Suppressed,
}

impl Marker {
    pub fn glyph(self) -> char {
        match self {
            Marker::Equal => '.',
            Marker::Reported => '^',
            Marker::Suppressed => '~',
        }
    }
}

/// One differing block: absolute address, both sides' bytes, and one marker
/// per byte position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffBlock {
    pub address: u32,
    pub bytes_a: Vec<u8>,
    pub bytes_b: Vec<u8>,
    pub markers: Vec<Marker>,
}

impl DiffBlock {
    pub fn has_reported(&self) -> bool {
        self.markers.contains(&Marker::Reported)
    }

    pub fn has_suppressed(&self) -> bool {
        self.markers.contains(&Marker::Suppressed)
    }

    /// Render the hex-editor style diff line for this block. A final short
    /// block pads hex columns with blank triples and markers with spaces, so
    /// "beyond the buffer" stays distinguishable from "equal".
    pub fn render(&self, width: u32) -> String {
        let mut markers: String = self.markers.iter().map(|m| m.glyph()).collect();
        for _ in self.markers.len()..width as usize {
            markers.push(' ');
        }
        format!(
            "0x{:08X}: {}  |{}|   {}  |{}|   {}",
            self.address,
            hex_bytes(&self.bytes_a, width),
            ascii_column(&self.bytes_a),
            hex_bytes(&self.bytes_b, width),
            ascii_column(&self.bytes_b),
            markers
        )
    }
}

/// Overall outcome of a diff run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffVerdict {
    /// No byte differs.
    Identical,
    /// Differences exist but every one is a suppressed FF<->00 pair.
    SuppressedOnly,
    /// At least one reported difference.
    Different,
}

/// Every differing block over the unified range, plus byte counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub blocks: Vec<DiffBlock>,
    /// Byte positions where the layouts differ.
    pub total_diff_bytes: u64,
    /// Differing positions hidden by FF<->00 suppression.
    pub suppressed_bytes: u64,
    /// Differing positions reported as meaningful.
    pub reported_diff_bytes: u64,
    pub block_width: u32,
}

impl DiffReport {
    pub fn verdict(&self) -> DiffVerdict {
        if self.total_diff_bytes == 0 {
            DiffVerdict::Identical
        } else if self.reported_diff_bytes == 0 {
            DiffVerdict::SuppressedOnly
        } else {
            DiffVerdict::Different
        }
    }

    pub fn is_identical(&self) -> bool {
        self.verdict() == DiffVerdict::Identical
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DiffError {
    #[error(
        "[HEXDIFF_DIFF_001] internal error: unified layouts differ in length ({len_a} vs {len_b} bytes). Suggestion: report a bug; the unification engine must produce equal-length layouts."
    )]
    LayoutLengthMismatch { len_a: usize, len_b: usize },
}

impl DiffError {
    pub fn code(&self) -> &'static str {
        match self {
            DiffError::LayoutLengthMismatch { .. } => error_codes::DIFF_LAYOUT_MISMATCH,
        }
    }
}

fn is_erased_pair(a: u8, b: u8) -> bool {
    (a == 0xFF && b == 0x00) || (a == 0x00 && b == 0xFF)
}

/// Compare two equal-length layouts block by block. `lowest` labels block
/// addresses; unequal lengths are an internal invariant violation, never a
/// normal diff outcome.
pub fn diff_layouts(
    layout_a: &[u8],
    layout_b: &[u8],
    lowest: u32,
    config: &CompareConfig,
) -> Result<DiffReport, DiffError> {
    if layout_a.len() != layout_b.len() {
        return Err(DiffError::LayoutLengthMismatch {
            len_a: layout_a.len(),
            len_b: layout_b.len(),
        });
    }

    let width = config.block_width as usize;
    let mut report = DiffReport {
        blocks: Vec::new(),
        total_diff_bytes: 0,
        suppressed_bytes: 0,
        reported_diff_bytes: 0,
        block_width: config.block_width,
    };

    for (block_idx, (chunk_a, chunk_b)) in layout_a
        .chunks(width)
        .zip(layout_b.chunks(width))
        .enumerate()
    {
        if chunk_a == chunk_b {
            continue;
        }

        let mut markers = Vec::with_capacity(chunk_a.len());
        for (a, b) in chunk_a.iter().zip(chunk_b.iter()) {
            if a == b {
                markers.push(Marker::Equal);
                continue;
            }
            report.total_diff_bytes += 1;
            if config.suppress_erased && is_erased_pair(*a, *b) {
                report.suppressed_bytes += 1;
                markers.push(Marker::Suppressed);
            } else {
                report.reported_diff_bytes += 1;
                markers.push(Marker::Reported);
            }
        }

        report.blocks.push(DiffBlock {
            address: lowest + (block_idx as u32) * config.block_width,
            bytes_a: chunk_a.to_vec(),
            bytes_b: chunk_b.to_vec(),
            markers,
        });
    }

    Ok(report)
}
