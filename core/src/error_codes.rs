//! Stable error-code constants.
//!
//! Every error enum in this crate exposes a `code()` method returning one of
//! these identifiers. Codes are part of the public contract: they never change
//! meaning, and new failure modes get new codes.

pub const CONFIG_INVALID_BLOCK_WIDTH: &str = "HEXDIFF_CONFIG_001";
pub const CONFIG_NON_POSITIVE_LIMIT: &str = "HEXDIFF_CONFIG_002";
pub const CONFIG_INVALID_FILL_BYTE: &str = "HEXDIFF_CONFIG_003";

pub const PARSE_EMPTY_RECORD: &str = "HEXDIFF_PARSE_001";
pub const PARSE_MISSING_COLON: &str = "HEXDIFF_PARSE_002";
pub const PARSE_TOO_SHORT: &str = "HEXDIFF_PARSE_003";
pub const PARSE_ODD_LENGTH: &str = "HEXDIFF_PARSE_004";
pub const PARSE_INVALID_HEX: &str = "HEXDIFF_PARSE_005";
pub const PARSE_LENGTH_MISMATCH: &str = "HEXDIFF_PARSE_006";
pub const PARSE_CHECKSUM_MISMATCH: &str = "HEXDIFF_PARSE_007";
pub const PARSE_INVALID_EXTENDED: &str = "HEXDIFF_PARSE_008";
pub const PARSE_ADDRESS_OVERFLOW: &str = "HEXDIFF_PARSE_009";

pub const IMAGE_IO: &str = "HEXDIFF_IO_001";
pub const IMAGE_NOT_ASCII: &str = "HEXDIFF_IO_002";

pub const RANGE_NO_DATA: &str = "HEXDIFF_RANGE_001";
pub const RANGE_SIZE_EXCEEDED: &str = "HEXDIFF_RANGE_002";

pub const DUMP_REMOVE: &str = "HEXDIFF_DUMP_001";
pub const DUMP_WRITE: &str = "HEXDIFF_DUMP_002";

pub const DIFF_LAYOUT_MISMATCH: &str = "HEXDIFF_DIFF_001";
