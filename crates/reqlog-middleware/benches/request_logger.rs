//! Request logger benchmarks
//!
//! Run with: cargo bench --package reqlog-middleware

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Request;
use reqlog_core::LogSink;
use reqlog_middleware::{truncate, RequestLogger};

#[derive(Debug)]
struct NullSink;

impl LogSink for NullSink {
    fn log_info(&self, message: &str) {
        black_box(message);
    }
}

fn bench_truncate(c: &mut Criterion) {
    let mut group = c.benchmark_group("truncate");

    for len in [50usize, 100, 1_000, 10_000] {
        let value = "abcdé".repeat(len / 5);
        group.bench_with_input(BenchmarkId::from_parameter(len), &value, |b, value| {
            b.iter(|| truncate(black_box(value), 100));
        });
    }

    group.finish();
}

fn bench_log_request(c: &mut Criterion) {
    let logger = RequestLogger::new(NullSink);

    let small = Request::builder()
        .uri("/test-path")
        .body(Bytes::new())
        .unwrap();

    let large = Request::builder()
        .method("POST")
        .uri(format!("/{}?q={}", "p".repeat(800), "v".repeat(300)))
        .header("Authorization", format!("Bearer {}", "t".repeat(400)))
        .body(Bytes::from("b".repeat(64 * 1024)))
        .unwrap();

    c.bench_function("log_request_minimal", |b| {
        b.iter(|| logger.log_request(black_box(&small)));
    });

    c.bench_function("log_request_large", |b| {
        b.iter(|| logger.log_request(black_box(&large)));
    });
}

criterion_group!(benches, bench_truncate, bench_log_request);
criterion_main!(benches);
