#![no_main]

use libfuzzer_sys::fuzz_target;

use hex_image_diff::{CompareConfig, MemoryImage, compare};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(image) = MemoryImage::from_str("fuzz.hex", text) {
            if let Ok(cmp) = compare(&image, &image, &CompareConfig::default()) {
                assert!(cmp.report.is_identical());
            }
        }
    }
});
