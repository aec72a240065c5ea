use chain_hashtable::HashTable;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(100_000).map(key).collect();
    c.bench_function("table::insert_fresh_100k", |b| {
        b.iter_batched(
            HashTable::<u64>::new,
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.insert(k, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_presized_100k(c: &mut Criterion) {
    let keys: Vec<_> = lcg(2).take(100_000).map(key).collect();
    c.bench_function("table::insert_presized_100k", |b| {
        b.iter_batched(
            || HashTable::<u64>::with_size(65_536),
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.insert(k, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_overwrite(c: &mut Criterion) {
    c.bench_function("table::overwrite_hit", |b| {
        let mut t = HashTable::new();
        let keys: Vec<_> = lcg(3).take(10_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        let mut n = 0u64;
        b.iter(|| {
            n = n.wrapping_add(1);
            black_box(t.insert(it.next().unwrap(), n));
        })
    });
}

fn bench_search_hit(c: &mut Criterion) {
    c.bench_function("table::search_hit", |b| {
        let mut t = HashTable::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.search(k));
        })
    });
}

fn bench_search_miss(c: &mut Criterion) {
    c.bench_function("table::search_miss", |b| {
        let mut t = HashTable::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            t.insert(&key(x), i as u64);
        }
        let misses: Vec<_> = lcg(0xdead_beef).take(10_000).map(key).collect();
        let mut it = misses.iter().cycle();
        b.iter(|| {
            black_box(t.search(it.next().unwrap()));
        })
    });
}

fn bench_delete_reinsert(c: &mut Criterion) {
    c.bench_function("table::delete_reinsert", |b| {
        let mut t = HashTable::new();
        let keys: Vec<_> = lcg(13).take(10_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = t.delete(k);
            black_box(&v);
            if let Some(v) = v {
                t.insert(k, v);
            }
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_insert_presized_100k, bench_overwrite,
        bench_search_hit, bench_search_miss, bench_delete_reinsert
}
criterion_main!(benches);
