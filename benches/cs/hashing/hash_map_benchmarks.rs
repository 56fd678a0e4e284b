use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prime_hashmap::{fnv1a, hash_function_1, ChainedHashMap, HashFn, OpenAddressingMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn random_keys(n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| format!("key{}", rng.gen_range(0..n * 4)))
        .collect()
}

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");
    for &n in &SIZES {
        let keys = random_keys(n);
        for (name, hasher) in [("sum", hash_function_1 as HashFn), ("fnv1a", fnv1a)] {
            group.bench_with_input(
                BenchmarkId::new(format!("open_addressing/{}", name), n),
                &keys,
                |b, keys| {
                    b.iter(|| {
                        let mut map = OpenAddressingMap::new(11, hasher);
                        for (i, key) in keys.iter().enumerate() {
                            map.put(key.as_str(), i);
                        }
                        black_box(map.len())
                    })
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("chained/{}", name), n),
                &keys,
                |b, keys| {
                    b.iter(|| {
                        let mut map = ChainedHashMap::new(11, hasher);
                        for (i, key) in keys.iter().enumerate() {
                            map.put(key.as_str(), i);
                        }
                        black_box(map.len())
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for &n in &SIZES {
        let keys = random_keys(n);
        let mut oa = OpenAddressingMap::new(11, fnv1a);
        let mut chained = ChainedHashMap::new(11, fnv1a);
        for (i, key) in keys.iter().enumerate() {
            oa.put(key.as_str(), i);
            chained.put(key.as_str(), i);
        }
        group.bench_with_input(BenchmarkId::new("open_addressing", n), &keys, |b, keys| {
            b.iter(|| keys.iter().filter_map(|k| oa.get(k)).sum::<usize>())
        });
        group.bench_with_input(BenchmarkId::new("chained", n), &keys, |b, keys| {
            b.iter(|| keys.iter().filter_map(|k| chained.get(k)).sum::<usize>())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_put, bench_get);
criterion_main!(benches);
