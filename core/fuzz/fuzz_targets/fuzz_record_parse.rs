#![no_main]

use libfuzzer_sys::fuzz_target;

use hex_image_diff::parse_record;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        if let Ok(record) = parse_record(line, "fuzz.hex", 1) {
            // Accepted records must re-verify their checksum.
            assert_eq!(record.checksum_residue(), 0);
        }
    }
});
