use booking_intake::{
    BookingRecord, BookingStore, FieldInput, FormValidator, GuestBounds, MemoryStore,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn sample_input(index: usize) -> FieldInput {
    FieldInput {
        fullname: format!("Guest {}", index),
        email: format!("guest{}@example.com", index),
        hotel: "Grand Lodge".to_string(),
        checkin: format!("2025-06-{:02}", (index % 27) + 1),
        checkout: format!("2025-06-{:02}", (index % 27) + 2),
        room: "Double".to_string(),
        guests: "2".to_string(),
        requests: "Late arrival".to_string(),
    }
}

// Benchmark the validate-and-quote pass in isolation
pub fn validation_benchmark(c: &mut Criterion) {
    let validator = FormValidator::new(GuestBounds::new(Some(1), Some(6)).unwrap());
    let inputs = (0..64).map(sample_input).collect::<Vec<_>>();

    c.bench_function("validate_snapshot", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(validator.check(input));
            }
        });
    });
}

// Benchmark one full persist against growing history sizes, since each
// append rewrites the whole envelope
pub fn persist_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("booking_persist");

    for history_len in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(history_len),
            history_len,
            |b, &history_len| {
                b.iter(|| {
                    let store = BookingStore::new(MemoryStore::new());
                    for i in 0..history_len {
                        let record = BookingRecord::build(&sample_input(i)).unwrap();
                        store.persist(&record).unwrap();
                    }
                    black_box(store.load_history().unwrap().len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, validation_benchmark, persist_benchmark);
criterion_main!(benches);
