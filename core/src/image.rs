//! Sparse image reconstruction from an Intel HEX record stream.
//!
//! One `MemoryImage` is built per input file. The extended-address base is a
//! local threaded through the decode loop of a single pass, so two files can
//! be reconstructed independently without interference. The map is frozen
//! once construction returns; overlaps and ignored record types are collected
//! as diagnostics and never alter the last-write-wins result.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::error_codes;
use crate::record::{self, ParseError, RecordType};

/// Inclusive min/max over all absolute addresses a file wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

/// Where a byte write came from. The owning image supplies the file half of
/// the (file, line) identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOrigin {
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MappedByte {
    value: u8,
    origin: WriteOrigin,
}

/// A non-fatal overlap diagnostic: `current` overwrote `previous` at
/// `address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub address: u32,
    pub previous: WriteOrigin,
    pub current: WriteOrigin,
}

/// A record type outside the supported set, skipped without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoredRecord {
    pub line: u32,
    pub type_code: u8,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImageError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: file is not ASCII text")]
    NotAscii { path: String },
}

impl ImageError {
    pub fn code(&self) -> &'static str {
        match self {
            ImageError::Parse(e) => e.code(),
            ImageError::Io { .. } => error_codes::IMAGE_IO,
            ImageError::NotAscii { .. } => error_codes::IMAGE_NOT_ASCII,
        }
    }
}

/// One reconstructed firmware image: a sparse absolute-address byte map plus
/// the observed bounds and per-pass diagnostics.
#[derive(Debug, Clone)]
pub struct MemoryImage {
    source: String,
    memory: BTreeMap<u32, MappedByte>,
    bounds: Option<Bounds>,
    records_processed: u32,
    bytes_mapped: u64,
    overlaps: Vec<Overlap>,
    ignored: Vec<IgnoredRecord>,
}

impl MemoryImage {
    /// Read and reconstruct one Intel HEX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let bytes = fs::read(path).map_err(|e| ImageError::Io {
            path: source.clone(),
            source: e,
        })?;
        if !bytes.is_ascii() {
            return Err(ImageError::NotAscii { path: source });
        }
        let text = String::from_utf8(bytes).map_err(|_| ImageError::NotAscii {
            path: path.display().to_string(),
        })?;
        Ok(Self::from_str(&source, &text)?)
    }

    /// Reconstruct from already-loaded text. `source` labels diagnostics.
    pub fn from_str(source: &str, text: &str) -> Result<Self, ParseError> {
        let mut image = MemoryImage {
            source: source.to_string(),
            memory: BTreeMap::new(),
            bounds: None,
            records_processed: 0,
            bytes_mapped: 0,
            overlaps: Vec::new(),
            ignored: Vec::new(),
        };

        // Addressing base set by type 02/04 records, scoped to this pass.
        let mut base: u32 = 0;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = (idx + 1) as u32;
            if raw.trim().is_empty() {
                // Blank lines tolerated; some exporters emit them.
                continue;
            }

            let rec = record::parse_record(raw, source, line_no)?;
            image.records_processed += 1;

            match rec.record_type {
                RecordType::Data => {
                    let start = base.checked_add(u32::from(rec.address16));
                    for (i, value) in rec.data.iter().enumerate() {
                        let address = start
                            .and_then(|s| s.checked_add(i as u32))
                            .ok_or_else(|| ParseError::AddressOverflow {
                                file: source.to_string(),
                                line: line_no,
                                base,
                                address16: rec.address16,
                            })?;
                        image.write(address, *value, WriteOrigin { line: line_no });
                    }
                }
                RecordType::EndOfFile => break,
                RecordType::ExtendedLinearAddress => {
                    let upper = extended_payload(&rec, source, line_no)?;
                    base = upper << 16;
                }
                RecordType::ExtendedSegmentAddress => {
                    let segment = extended_payload(&rec, source, line_no)?;
                    base = segment << 4;
                }
                RecordType::Other(code) => {
                    image.ignored.push(IgnoredRecord {
                        line: line_no,
                        type_code: code,
                    });
                }
            }
        }

        Ok(image)
    }

    fn write(&mut self, address: u32, value: u8, origin: WriteOrigin) {
        if let Some(previous) = self.memory.insert(address, MappedByte { value, origin }) {
            self.overlaps.push(Overlap {
                address,
                previous: previous.origin,
                current: origin,
            });
        }
        self.bytes_mapped += 1;
        self.bounds = Some(match self.bounds {
            None => Bounds {
                min: address,
                max: address,
            },
            Some(b) => Bounds {
                min: b.min.min(address),
                max: b.max.max(address),
            },
        });
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Count of parsed (non-blank) records up to and including end-of-file.
    pub fn records_processed(&self) -> u32 {
        self.records_processed
    }

    /// Data bytes written into the map, overwrites included.
    pub fn bytes_mapped(&self) -> u64 {
        self.bytes_mapped
    }

    /// Distinct addresses carrying a byte.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    pub fn get(&self, address: u32) -> Option<u8> {
        self.memory.get(&address).map(|m| m.value)
    }

    /// Mapped (address, value) pairs in ascending address order.
    pub fn bytes(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.memory.iter().map(|(addr, m)| (*addr, m.value))
    }

    pub fn overlaps(&self) -> &[Overlap] {
        &self.overlaps
    }

    pub fn ignored(&self) -> &[IgnoredRecord] {
        &self.ignored
    }
}

fn extended_payload(
    rec: &record::Record,
    source: &str,
    line_no: u32,
) -> Result<u32, ParseError> {
    if rec.byte_count != 2 {
        return Err(ParseError::InvalidExtendedRecord {
            file: source.to_string(),
            line: line_no,
            record_type: rec.record_type.code(),
            byte_count: rec.byte_count,
        });
    }
    Ok(u32::from(rec.data[0]) << 8 | u32::from(rec.data[1]))
}
