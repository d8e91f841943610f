//! Benchmarks for SlateKV store operations

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::json;
use slatekv::Store;
use tempfile::TempDir;

const KEYS: usize = 1_000;

fn filled_store(dir: &TempDir, rounds: usize) -> Store {
    let mut store = Store::open_path(dir.path().join("bench.db")).unwrap();
    for round in 0..rounds {
        for i in 0..KEYS {
            store
                .put(&format!("key-{}", i), Some(json!({ "n": i, "round": round })), true)
                .unwrap();
        }
    }
    store
}

fn store_benchmarks(c: &mut Criterion) {
    c.bench_function("put_append", |b| {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open_path(dir.path().join("bench.db")).unwrap();
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            store.put("hot", Some(json!(n)), true).unwrap();
        });
    });

    c.bench_function("get_live", |b| {
        let dir = TempDir::new().unwrap();
        let store = filled_store(&dir, 1);
        b.iter(|| store.get("key-500", false).is_some());
    });

    c.bench_function("reopen_replay_5k_records", |b| {
        let dir = TempDir::new().unwrap();
        filled_store(&dir, 5).close().unwrap();
        b.iter(|| Store::open_path(dir.path().join("bench.db")).unwrap());
    });

    c.bench_function("vacuum_5k_records", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().unwrap();
                let store = filled_store(&dir, 5);
                (dir, store)
            },
            |(_dir, mut store)| store.vacuum().unwrap(),
            BatchSize::PerIteration,
        );
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
