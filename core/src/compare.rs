//! One-call comparison pipeline over two reconstructed images.
//!
//! `compare` is the pure part of a run: unified range, both dense layouts,
//! and the diff report. Dump artifacts are a separate, explicit side-effect
//! step (see [`crate::dump`]) so a range failure can never leave partial
//! output behind.

use thiserror::Error;

use crate::config::CompareConfig;
use crate::diff::{self, DiffError, DiffReport};
use crate::image::MemoryImage;
use crate::unify::{self, RangeError, UnifiedRange};

/// Everything a comparison produces: the shared window, both dense layouts,
/// and the block diff.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub range: UnifiedRange,
    pub layout_a: Vec<u8>,
    pub layout_b: Vec<u8>,
    pub report: DiffReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompareError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Diff(#[from] DiffError),
}

impl CompareError {
    pub fn code(&self) -> &'static str {
        match self {
            CompareError::Range(e) => e.code(),
            CompareError::Diff(e) => e.code(),
        }
    }
}

/// Unify, materialize, and diff two images under one configuration.
pub fn compare(
    a: &MemoryImage,
    b: &MemoryImage,
    config: &CompareConfig,
) -> Result<Comparison, CompareError> {
    let range = unify::unified_range(a.bounds(), b.bounds(), config.max_unified_size)?;
    let layout_a = unify::build_layout(a, range, config.fill_byte);
    let layout_b = unify::build_layout(b, range, config.fill_byte);
    let report = diff::diff_layouts(&layout_a, &layout_b, range.lowest, config)?;
    Ok(Comparison {
        range,
        layout_a,
        layout_b,
        report,
    })
}
