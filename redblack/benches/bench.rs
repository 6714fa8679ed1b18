use core::hint::black_box;
use std::collections::BTreeMap;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use redblack::{Keyed, RedBlackTree};

struct Entry {
    key: String,
}

impl Keyed for Entry {
    fn key(&self) -> &str {
        &self.key
    }
}

pub fn gen_shuffled_keys(count: usize, seed: u64) -> Vec<String> {
    let mut keys: Vec<String> = (0..count).map(|n| format!("{n:08}")).collect();
    keys.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    assert_eq!(keys.len(), count);
    keys
}

fn build_tree(keys: &[String]) -> RedBlackTree<Entry> {
    let mut tree = RedBlackTree::new();
    for key in keys {
        tree.add(Entry { key: key.clone() });
    }
    tree
}

fn add(c: &mut Criterion) {
    let mut g = c.benchmark_group("add");

    for count in [1000, 10_000, 100_000] {
        let keys = gen_shuffled_keys(count, 1);

        g.bench_with_input(BenchmarkId::new("redblack", count), &count, |b, _i| {
            b.iter(|| build_tree(&keys))
        });
        g.bench_with_input(BenchmarkId::new("std_btreemap", count), &count, |b, _i| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for key in &keys {
                    map.insert(key.clone(), ());
                }
                map
            })
        });
    }

    g.finish();
}

fn find(c: &mut Criterion) {
    let mut g = c.benchmark_group("find");

    for count in [1000, 10_000, 100_000] {
        let keys = gen_shuffled_keys(count, 2);
        let access = gen_shuffled_keys(count, 3);

        let tree = build_tree(&keys);
        g.bench_with_input(BenchmarkId::new("redblack", count), &count, |b, _i| {
            b.iter(|| {
                for key in &access {
                    black_box(tree.find(key));
                }
            })
        });

        let map: BTreeMap<String, ()> = keys.iter().map(|k| (k.clone(), ())).collect();
        g.bench_with_input(BenchmarkId::new("std_btreemap", count), &count, |b, _i| {
            b.iter(|| {
                for key in &access {
                    black_box(map.get(key));
                }
            })
        });
    }

    g.finish();
}

fn remove(c: &mut Criterion) {
    let mut g = c.benchmark_group("remove");

    for count in [1000, 10_000] {
        let keys = gen_shuffled_keys(count, 4);
        let mut order = keys.clone();
        order.shuffle(&mut ChaCha8Rng::seed_from_u64(5));

        g.bench_with_input(BenchmarkId::new("redblack", count), &count, |b, _i| {
            b.iter_batched(
                || build_tree(&keys),
                |mut tree| {
                    for key in &order {
                        black_box(tree.remove(key));
                    }
                    tree
                },
                BatchSize::LargeInput,
            )
        });
        g.bench_with_input(BenchmarkId::new("std_btreemap", count), &count, |b, _i| {
            b.iter_batched(
                || -> BTreeMap<String, ()> { keys.iter().map(|k| (k.clone(), ())).collect() },
                |mut map| {
                    for key in &order {
                        black_box(map.remove(key));
                    }
                    map
                },
                BatchSize::LargeInput,
            )
        });
    }

    g.finish();
}

criterion_group!(benches, add, find, remove);
criterion_main!(benches);
