//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use hex_image_diff::MemoryImage;

/// Build one record line with a correct checksum from its fields.
pub fn record_line(address16: u16, record_type: u8, data: &[u8]) -> String {
    let byte_count = data.len() as u8;
    let mut sum = u32::from(byte_count)
        + u32::from(address16 >> 8)
        + u32::from(address16 & 0xFF)
        + u32::from(record_type);
    let mut line = format!(":{byte_count:02X}{address16:04X}{record_type:02X}");
    for b in data {
        sum += u32::from(*b);
        line.push_str(&format!("{b:02X}"));
    }
    let checksum = (0x100 - (sum & 0xFF)) & 0xFF;
    line.push_str(&format!("{checksum:02X}"));
    line
}

pub fn data_line(address16: u16, data: &[u8]) -> String {
    record_line(address16, 0x00, data)
}

pub fn eof_line() -> String {
    record_line(0x0000, 0x01, &[])
}

pub fn ext_linear_line(upper16: u16) -> String {
    record_line(0x0000, 0x04, &upper16.to_be_bytes())
}

pub fn ext_segment_line(segment16: u16) -> String {
    record_line(0x0000, 0x02, &segment16.to_be_bytes())
}

pub fn image_from_lines(source: &str, lines: &[String]) -> MemoryImage {
    MemoryImage::from_str(source, &lines.join("\n")).unwrap_or_else(|e| {
        panic!("failed to build image {source}: {e}");
    })
}
