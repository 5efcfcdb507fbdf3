//! Hex Image Diff: a library for comparing Intel HEX firmware images.
//!
//! This crate provides functionality for:
//! - Decoding Intel HEX records with strict checksum validation
//! - Reconstructing sparse memory images with extended-address tracking
//! - Unifying two images over one address window and materializing dense
//!   layouts
//! - Dumping layouts to deterministic text artifacts
//! - Computing a block-based, byte-exact diff between layouts
//!
//! # Quick Start
//!
//! ```ignore
//! use hex_image_diff::{CompareConfig, MemoryImage, compare};
//!
//! let a = MemoryImage::open("old.hex")?;
//! let b = MemoryImage::open("new.hex")?;
//! let comparison = compare(&a, &b, &CompareConfig::default())?;
//!
//! for block in &comparison.report.blocks {
//!     println!("{}", block.render(comparison.report.block_width));
//! }
//! ```

mod compare;
mod config;
mod diff;
mod dump;
mod error_codes;
mod image;
mod output;
mod record;
pub(crate) mod render;
mod unify;

pub use compare::{CompareError, Comparison, compare};
pub use config::{CompareConfig, CompareConfigBuilder, ConfigError, parse_fill_byte};
pub use diff::{DiffBlock, DiffError, DiffReport, DiffVerdict, Marker, diff_layouts};
pub use dump::{
    DUMP_FORMAT_TAG, DumpError, derive_output_path, dump_layout, header_lines, write_layout,
};
pub use image::{Bounds, IgnoredRecord, ImageError, MemoryImage, Overlap, WriteOrigin};
pub use output::json::serialize_diff_report;
pub use record::{MIN_RECORD_HEX_CHARS, ParseError, Record, RecordType, parse_record};
pub use unify::{RangeError, UnifiedRange, build_layout, unified_range};
