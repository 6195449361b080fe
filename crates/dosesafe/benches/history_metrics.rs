use criterion::{criterion_group, criterion_main, Criterion};
use dosesafe_core::chatbot::QUICK_QUESTIONS;
use dosesafe_core::{FallbackResponder, Metrics, ScanHistory, ScanRecord, ScanType};
use dosesafe_store::MemoryStore;
use serde_json::json;
use std::hint::black_box;

fn record(meds: usize) -> ScanRecord {
    let mut record = ScanRecord::new(ScanType::Manual);
    record.medications = (0..meds).map(|i| json!({"name": format!("med{i}")})).collect();
    record.interactions = vec![json!({"drugs": ["med0", "med1"], "severity": "major"})];
    record
}

fn bench_history_save_at_cap(c: &mut Criterion) {
    let history = ScanHistory::new(MemoryStore::new());
    for _ in 0..10 {
        history.save(record(4)).unwrap();
    }

    c.bench_function("history_save_at_cap", |b| {
        b.iter(|| history.save(black_box(record(4))).unwrap());
    });
}

fn bench_metrics_from_records(c: &mut Criterion) {
    let records: Vec<ScanRecord> = (0..10).map(|_| record(8)).collect();

    c.bench_function("metrics_from_10_records", |b| {
        b.iter(|| Metrics::from_records(black_box(&records)));
    });
}

fn bench_fallback_quick_questions(c: &mut Criterion) {
    let responder = FallbackResponder::new();

    c.bench_function("fallback_quick_questions", |b| {
        b.iter(|| {
            for question in QUICK_QUESTIONS {
                black_box(responder.respond(black_box(question)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_history_save_at_cap,
    bench_metrics_from_records,
    bench_fallback_quick_questions
);
criterion_main!(benches);
