//! Unified-range computation and sparse-to-dense materialization.
//!
//! Both inputs are compared over one shared address window; the size limit is
//! enforced before any buffer is allocated so an oversized span never leaves
//! partial artifacts behind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error_codes;
use crate::image::{Bounds, MemoryImage};

/// Inclusive address window covering both compared images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedRange {
    pub lowest: u32,
    pub highest: u32,
}

impl UnifiedRange {
    pub fn size(&self) -> u64 {
        u64::from(self.highest - self.lowest) + 1
    }

    pub fn contains(&self, address: u32) -> bool {
        address >= self.lowest && address <= self.highest
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RangeError {
    #[error("[HEXDIFF_RANGE_001] no data bytes found in either input")]
    NoData,
    #[error(
        "[HEXDIFF_RANGE_002] unified range 0x{lowest:08X}..0x{highest:08X} spans {size} bytes, exceeding the {limit}-byte limit. Suggestion: raise `--max-size` if the span is intentional."
    )]
    SizeExceeded {
        lowest: u32,
        highest: u32,
        size: u64,
        limit: u64,
    },
}

impl RangeError {
    pub fn code(&self) -> &'static str {
        match self {
            RangeError::NoData => error_codes::RANGE_NO_DATA,
            RangeError::SizeExceeded { .. } => error_codes::RANGE_SIZE_EXCEEDED,
        }
    }
}

/// Combine the bounds of two images into one window, enforcing the size
/// limit. Either side may be absent; both absent is an error.
pub fn unified_range(
    a: Option<Bounds>,
    b: Option<Bounds>,
    max_size: u64,
) -> Result<UnifiedRange, RangeError> {
    let range = match (a, b) {
        (None, None) => return Err(RangeError::NoData),
        (Some(a), None) => UnifiedRange {
            lowest: a.min,
            highest: a.max,
        },
        (None, Some(b)) => UnifiedRange {
            lowest: b.min,
            highest: b.max,
        },
        (Some(a), Some(b)) => UnifiedRange {
            lowest: a.min.min(b.min),
            highest: a.max.max(b.max),
        },
    };

    let size = range.size();
    if size > max_size {
        return Err(RangeError::SizeExceeded {
            lowest: range.lowest,
            highest: range.highest,
            size,
            limit: max_size,
        });
    }

    Ok(range)
}

/// Materialize one image into a dense buffer over `range`: every offset
/// starts as `fill_byte`, then each mapped in-range address overwrites its
/// slot at `address - lowest`.
pub fn build_layout(image: &MemoryImage, range: UnifiedRange, fill_byte: u8) -> Vec<u8> {
    let mut layout = vec![fill_byte; range.size() as usize];
    for (address, value) in image.bytes() {
        if range.contains(address) {
            layout[(address - range.lowest) as usize] = value;
        }
    }
    layout
}
