//! Benchmarks for chatview decoding and rendering.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench rendering -- decode`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatview::decoder::StreamDecoder;
use chatview::record::{MessageRecord, Timestamp};
use chatview::render::HtmlRenderer;

// =============================================================================
// Test Data Generators
// =============================================================================

fn record_json(i: usize) -> String {
    let author = if i % 2 == 0 { "Alice" } else { "Bob" };
    let timestamp = 1_705_314_600_000_i64 + (i as i64 * 60_000);
    format!(
        r#"{{"author": "{}", "content": "Message {} for <@{}> see https://example.com/{}", "timestamp": {}, "mentions": [{}], "reaction_counts": {{"👍": {}}}}}"#,
        author,
        i,
        i % 7,
        i,
        timestamp,
        i % 7,
        i % 5
    )
}

/// Objects back to back, one per line.
fn generate_concatenated(count: usize) -> String {
    (0..count).map(record_json).collect::<Vec<_>>().join("\n")
}

/// One top-level array.
fn generate_array(count: usize) -> String {
    format!(
        "[{}]",
        (0..count).map(record_json).collect::<Vec<_>>().join(",\n")
    )
}

/// Objects separated by junk the decoder has to skip.
fn generate_noisy(count: usize) -> String {
    (0..count)
        .map(record_json)
        .collect::<Vec<_>>()
        .join(" ## 42 ;; ")
}

fn generate_records(count: usize) -> Vec<MessageRecord> {
    (0..count)
        .map(|i| {
            let mut record = MessageRecord::new(
                if i % 2 == 0 { "Alice" } else { "Bob" },
                format!("Message {i} for <@{}> see https://example.com/{i}", i % 7),
            )
            .with_timestamp(Timestamp::EpochMillis(
                1_705_314_600_000 + (i as i64 * 60_000),
            ))
            .with_mention((i % 7).to_string());
            if i % 3 == 0 {
                record = record.with_reaction("👍", (i % 5) as i64);
            }
            record
        })
        .collect()
}

// =============================================================================
// Decoding Benchmarks
// =============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let decoder = StreamDecoder::new();

    for size in [100_usize, 1_000, 10_000] {
        for (layout, text) in [
            ("concatenated", generate_concatenated(size)),
            ("array", generate_array(size)),
        ] {
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::new(layout, size), &text, |b, text| {
                b.iter(|| black_box(decoder.decode_str(black_box(text), "bench")));
            });
        }
    }
    group.finish();
}

fn bench_decode_resync(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_resync");
    let decoder = StreamDecoder::new();

    for size in [100_usize, 1_000] {
        let text = generate_noisy(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(decoder.decode_str(black_box(text), "bench")));
        });
    }
    group.finish();
}

// =============================================================================
// Rendering Benchmarks
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let renderer = HtmlRenderer::new();

    for size in [100_usize, 1_000, 10_000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(renderer.render_records(black_box(records), "bench")));
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let decoder = StreamDecoder::new();
    let renderer = HtmlRenderer::new();

    for size in [1_000_usize, 10_000] {
        let text = generate_array(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let outcome = decoder.decode_str(black_box(text), "bench");
                black_box(renderer.render_records(&outcome.records, "bench"))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_decode,
    bench_decode_resync,
    bench_render,
    bench_full_pipeline,
);

criterion_main!(benches);
