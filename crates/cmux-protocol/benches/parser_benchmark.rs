//! Throughput benchmarks for the CMUX frame parser.
//!
//! ## Running the benchmarks
//!
//! ```bash
//! cargo bench -p cmux-protocol
//! ```
//!
//! ## Benchmarks included
//!
//! - `parse_frames/<mode>` - Well-formed UIH frames of varying payload size
//! - `parse_noise` - Bytes outside any frame (resync path)
//! - `assemble_frames` - Parsing plus frame reassembly

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cmux_protocol::{Direction, FrameAssembler, FrameParser, LengthMode, FLAG};

/// Build a stream of `count` UIH frames on DLC 1 carrying `payload_len` bytes each.
fn frame_stream(count: usize, payload_len: usize, mode: LengthMode) -> Vec<u8> {
    let mut stream = Vec::with_capacity(count * (payload_len + 7));
    for i in 0..count {
        stream.extend_from_slice(&[FLAG, 0x07, 0xEF]);
        match mode {
            LengthMode::Extended if payload_len > 127 => {
                stream.push(((payload_len % 128) as u8) << 1);
                stream.push((payload_len / 128) as u8);
            }
            _ => stream.push(((payload_len as u8) << 1) | 1),
        }
        stream.extend((0..payload_len).map(|j| (i + j) as u8));
        stream.extend_from_slice(&[0x5A, FLAG]);
    }
    stream
}

fn bench_parse_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_frames");

    for (mode, payload_len) in [
        (LengthMode::SingleByte, 16),
        (LengthMode::Extended, 16),
        (LengthMode::Extended, 64),
        (LengthMode::Extended, 1024),
    ] {
        let stream = frame_stream(256, payload_len, mode);
        group.throughput(Throughput::Bytes(stream.len() as u64));

        group.bench_with_input(
            BenchmarkId::new(mode.as_str(), payload_len),
            &stream,
            |b, stream| {
                b.iter(|| {
                    let mut parser = FrameParser::new(Direction::Rx, mode);
                    for &byte in stream {
                        black_box(parser.push(byte));
                    }
                    black_box(parser.phase())
                });
            },
        );
    }

    group.finish();
}

fn bench_parse_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_noise");
    let noise: Vec<u8> = (0..64 * 1024).map(|i| (i % 0xF9) as u8).collect();
    group.throughput(Throughput::Bytes(noise.len() as u64));

    group.bench_function("resync", |b| {
        b.iter(|| {
            let mut parser = FrameParser::new(Direction::Tx, LengthMode::Extended);
            for &byte in &noise {
                black_box(parser.push(byte));
            }
        });
    });

    group.finish();
}

fn bench_assemble_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_frames");
    let stream = frame_stream(256, 64, LengthMode::Extended);
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("uih_64", |b| {
        b.iter(|| {
            let mut parser = FrameParser::new(Direction::Rx, LengthMode::Extended);
            let mut assembler = FrameAssembler::new(Direction::Rx);
            let mut frames = 0usize;
            for &byte in &stream {
                if assembler.push(&parser.push(byte)).is_some() {
                    frames += 1;
                }
            }
            black_box(frames)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_frames,
    bench_parse_noise,
    bench_assemble_frames
);
criterion_main!(benches);
