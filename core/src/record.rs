//! Intel HEX record decoding.
//!
//! One record per line: `:BBAAAATTDD..DDCC` where BB is the byte count, AAAA
//! the 16-bit record-local address, TT the record type, DD the data bytes and
//! CC the checksum. Every validation failure is fatal for the whole run;
//! nothing here is silently corrected.

use thiserror::Error;

use crate::error_codes;

/// Minimum payload after the colon: count, address, type and checksum fields.
pub const MIN_RECORD_HEX_CHARS: usize = 10;

/// The record kinds this tool understands. The set is closed; anything else
/// is carried as `Other` and ignored by the reconstructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Data,
    EndOfFile,
    ExtendedSegmentAddress,
    ExtendedLinearAddress,
    Other(u8),
}

impl RecordType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => RecordType::Data,
            0x01 => RecordType::EndOfFile,
            0x02 => RecordType::ExtendedSegmentAddress,
            0x04 => RecordType::ExtendedLinearAddress,
            other => RecordType::Other(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            RecordType::Data => 0x00,
            RecordType::EndOfFile => 0x01,
            RecordType::ExtendedSegmentAddress => 0x02,
            RecordType::ExtendedLinearAddress => 0x04,
            RecordType::Other(code) => code,
        }
    }
}

/// One decoded record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub byte_count: u8,
    pub address16: u16,
    pub record_type: RecordType,
    pub data: Vec<u8>,
    pub checksum: u8,
}

impl Record {
    /// Low byte of the sum of all record bytes including the checksum.
    /// Zero for every record that passed validation.
    pub fn checksum_residue(&self) -> u8 {
        let mut total = u32::from(self.byte_count)
            + u32::from(self.address16 >> 8)
            + u32::from(self.address16 & 0xFF)
            + u32::from(self.record_type.code())
            + u32::from(self.checksum);
        for b in &self.data {
            total += u32::from(*b);
        }
        (total & 0xFF) as u8
    }
}

/// Errors produced while decoding records. Each carries the source file and
/// 1-based line number so diagnostics can cite the exact input location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("{file}:{line}: empty line is not a valid record")]
    EmptyRecord { file: String, line: u32 },
    #[error("{file}:{line}: record does not start with ':'")]
    MissingColon { file: String, line: u32 },
    #[error("{file}:{line}: record too short ({len} hex characters, need at least {MIN_RECORD_HEX_CHARS})")]
    TooShort { file: String, line: u32, len: usize },
    #[error("{file}:{line}: record has an odd number of hex characters ({len})")]
    OddLength { file: String, line: u32, len: usize },
    #[error("{file}:{line}: invalid hex value {value:?}")]
    InvalidHex {
        file: String,
        line: u32,
        value: String,
    },
    #[error("{file}:{line}: byte count {byte_count} does not match data length ({actual} bytes)")]
    LengthMismatch {
        file: String,
        line: u32,
        byte_count: u8,
        actual: usize,
    },
    #[error("{file}:{line}: checksum mismatch (computed sum mod 256 = {residue:02X}, expected 00)")]
    ChecksumMismatch {
        file: String,
        line: u32,
        residue: u8,
    },
    #[error("{file}:{line}: type {record_type:02X} record must have byte count 2 (got {byte_count})")]
    InvalidExtendedRecord {
        file: String,
        line: u32,
        record_type: u8,
        byte_count: u8,
    },
    #[error("{file}:{line}: data record extends past the 32-bit address space (base 0x{base:08X}, offset 0x{address16:04X})")]
    AddressOverflow {
        file: String,
        line: u32,
        base: u32,
        address16: u16,
    },
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyRecord { .. } => error_codes::PARSE_EMPTY_RECORD,
            ParseError::MissingColon { .. } => error_codes::PARSE_MISSING_COLON,
            ParseError::TooShort { .. } => error_codes::PARSE_TOO_SHORT,
            ParseError::OddLength { .. } => error_codes::PARSE_ODD_LENGTH,
            ParseError::InvalidHex { .. } => error_codes::PARSE_INVALID_HEX,
            ParseError::LengthMismatch { .. } => error_codes::PARSE_LENGTH_MISMATCH,
            ParseError::ChecksumMismatch { .. } => error_codes::PARSE_CHECKSUM_MISMATCH,
            ParseError::InvalidExtendedRecord { .. } => error_codes::PARSE_INVALID_EXTENDED,
            ParseError::AddressOverflow { .. } => error_codes::PARSE_ADDRESS_OVERFLOW,
        }
    }
}

fn hex_field(s: &str, file: &str, line: u32) -> Result<u32, ParseError> {
    u32::from_str_radix(s, 16).map_err(|_| ParseError::InvalidHex {
        file: file.to_string(),
        line,
        value: s.to_string(),
    })
}

/// Decode one record line with strict validation.
///
/// Leading and trailing whitespace is tolerated; everything else is not.
pub fn parse_record(line: &str, file: &str, line_no: u32) -> Result<Record, ParseError> {
    let s = line.trim();
    if s.is_empty() {
        return Err(ParseError::EmptyRecord {
            file: file.to_string(),
            line: line_no,
        });
    }
    let payload = match s.strip_prefix(':') {
        Some(p) => p,
        None => {
            return Err(ParseError::MissingColon {
                file: file.to_string(),
                line: line_no,
            });
        }
    };
    if !payload.is_ascii() {
        return Err(ParseError::InvalidHex {
            file: file.to_string(),
            line: line_no,
            value: payload.to_string(),
        });
    }
    if payload.len() < MIN_RECORD_HEX_CHARS {
        return Err(ParseError::TooShort {
            file: file.to_string(),
            line: line_no,
            len: payload.len(),
        });
    }
    if payload.len() % 2 != 0 {
        return Err(ParseError::OddLength {
            file: file.to_string(),
            line: line_no,
            len: payload.len(),
        });
    }

    let byte_count = hex_field(&payload[0..2], file, line_no)? as u8;
    let address16 = hex_field(&payload[2..6], file, line_no)? as u16;
    let type_code = hex_field(&payload[6..8], file, line_no)? as u8;

    let data_hex = &payload[8..payload.len() - 2];
    let checksum = hex_field(&payload[payload.len() - 2..], file, line_no)? as u8;

    if data_hex.len() != usize::from(byte_count) * 2 {
        return Err(ParseError::LengthMismatch {
            file: file.to_string(),
            line: line_no,
            byte_count,
            actual: data_hex.len() / 2,
        });
    }

    let mut data = Vec::with_capacity(usize::from(byte_count));
    for i in (0..data_hex.len()).step_by(2) {
        data.push(hex_field(&data_hex[i..i + 2], file, line_no)? as u8);
    }

    let record = Record {
        byte_count,
        address16,
        record_type: RecordType::from_code(type_code),
        data,
        checksum,
    };

    let residue = record.checksum_residue();
    if residue != 0 {
        return Err(ParseError::ChecksumMismatch {
            file: file.to_string(),
            line: line_no,
            residue,
        });
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_data_record() {
        let rec = parse_record(":01000000AA55", "a.hex", 1).expect("valid record");
        assert_eq!(rec.byte_count, 1);
        assert_eq!(rec.address16, 0x0000);
        assert_eq!(rec.record_type, RecordType::Data);
        assert_eq!(rec.data, vec![0xAA]);
        assert_eq!(rec.checksum, 0x55);
        assert_eq!(rec.checksum_residue(), 0);
    }

    #[test]
    fn decodes_eof_and_extended_records() {
        let eof = parse_record(":00000001FF", "a.hex", 2).expect("eof record");
        assert_eq!(eof.record_type, RecordType::EndOfFile);
        assert!(eof.data.is_empty());

        let ela = parse_record(":020000040001F9", "a.hex", 1).expect("type 04 record");
        assert_eq!(ela.record_type, RecordType::ExtendedLinearAddress);
        assert_eq!(ela.data, vec![0x00, 0x01]);

        let esa = parse_record(":020000021000EC", "a.hex", 1).expect("type 02 record");
        assert_eq!(esa.record_type, RecordType::ExtendedSegmentAddress);
        assert_eq!(esa.data, vec![0x10, 0x00]);
    }

    #[test]
    fn unknown_type_codes_are_preserved() {
        let rec = parse_record(":0400000300003800C1", "a.hex", 1).expect("type 03 record");
        assert_eq!(rec.record_type, RecordType::Other(0x03));
        assert_eq!(rec.record_type.code(), 0x03);
    }

    #[test]
    fn rejects_malformed_starts() {
        assert!(matches!(
            parse_record("", "a.hex", 1),
            Err(ParseError::EmptyRecord { .. })
        ));
        assert!(matches!(
            parse_record("   ", "a.hex", 1),
            Err(ParseError::EmptyRecord { .. })
        ));
        assert!(matches!(
            parse_record("01000000AA55", "a.hex", 3),
            Err(ParseError::MissingColon { line: 3, .. })
        ));
    }

    #[test]
    fn rejects_short_and_odd_payloads() {
        assert!(matches!(
            parse_record(":0000", "a.hex", 1),
            Err(ParseError::TooShort { len: 4, .. })
        ));
        assert!(matches!(
            parse_record(":01000000AA5", "a.hex", 1),
            Err(ParseError::OddLength { len: 11, .. })
        ));
    }

    #[test]
    fn rejects_non_hex_content() {
        assert!(matches!(
            parse_record(":01000000GG55", "a.hex", 1),
            Err(ParseError::InvalidHex { .. })
        ));
    }

    #[test]
    fn rejects_byte_count_mismatch() {
        // Count claims two bytes, payload carries one.
        let err = parse_record(":02000000AA54", "a.hex", 1).expect_err("count mismatch");
        assert!(matches!(
            err,
            ParseError::LengthMismatch {
                byte_count: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn rejects_altered_data_with_stale_checksum() {
        // ":01000000AA55" with the data byte changed to AB: residue must be
        // reported, never corrected.
        let err = parse_record(":01000000AB55", "a.hex", 7).expect_err("stale checksum");
        match err {
            ParseError::ChecksumMismatch {
                ref file,
                line,
                residue,
            } => {
                assert_eq!(file, "a.hex");
                assert_eq!(line, 7);
                assert_eq!(residue, 0x01);
            }
            other => panic!("expected checksum mismatch, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("a.hex:7:"), "message cites file and line: {msg}");
        assert!(msg.contains("01"), "message carries the residue: {msg}");
    }

    #[test]
    fn checksum_residue_recomputes_to_zero_for_valid_records() {
        for line in [":01000000AA55", ":00000001FF", ":020000040001F9", ":10010000214601360121470136007EFE09D2190140"] {
            let rec = parse_record(line, "a.hex", 1).expect("valid record");
            assert_eq!(rec.checksum_residue(), 0, "residue for {line}");
        }
    }
}
