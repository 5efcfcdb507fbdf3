use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hex_image_diff::{CompareConfig, MemoryImage, compare, diff_layouts};

const IMAGE_SIZES: [usize; 3] = [4 * 1024, 64 * 1024, 512 * 1024];
const RECORD_BYTES: usize = 16;

/// Render a synthetic Intel HEX file covering `size` bytes of deterministic
/// data, with an extended-linear record at every 64 KiB boundary.
fn synthetic_hex(size: usize, seed: u8) -> String {
    let mut out = String::new();
    for start in (0..size).step_by(RECORD_BYTES) {
        if start % 0x1_0000 == 0 {
            let upper = (start >> 16) as u16;
            out.push_str(&record_line(0x0000, 0x04, &upper.to_be_bytes()));
            out.push('\n');
        }
        let data: Vec<u8> = (0..RECORD_BYTES.min(size - start))
            .map(|i| (start + i) as u8 ^ seed)
            .collect();
        out.push_str(&record_line((start & 0xFFFF) as u16, 0x00, &data));
        out.push('\n');
    }
    out.push_str(&record_line(0x0000, 0x01, &[]));
    out.push('\n');
    out
}

fn record_line(address16: u16, record_type: u8, data: &[u8]) -> String {
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
    line.push_str(&format!("{:02X}", (0x100 - (sum & 0xFF)) & 0xFF));
    line
}

fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction");
    for size in IMAGE_SIZES {
        let text = synthetic_hex(size, 0x00);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| MemoryImage::from_str("bench.hex", text).expect("valid image"));
        });
    }
    group.finish();
}

fn bench_compare_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_pipeline");
    let config = CompareConfig::default();
    for size in IMAGE_SIZES {
        let a = MemoryImage::from_str("a.hex", &synthetic_hex(size, 0x00)).expect("image a");
        let b = MemoryImage::from_str("b.hex", &synthetic_hex(size, 0x01)).expect("image b");
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| compare(&a, &b, &config).expect("compare"));
        });
    }
    group.finish();
}

fn bench_diff_identical_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_identical");
    let config = CompareConfig::default();
    for size in IMAGE_SIZES {
        let layout = vec![0x5Au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &layout, |b, layout| {
            b.iter(|| diff_layouts(layout, layout, 0, &config).expect("diff"));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_reconstruction,
    bench_compare_pipeline,
    bench_diff_identical_layouts
);
criterion_main!(benches);
