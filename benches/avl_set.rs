use avl_set::AvlTreeSet;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use std::collections::BTreeSet;

const COUNT: usize = 10_000;

fn shuffled_keys() -> Vec<i64> {
    let mut keys = (0..COUNT as i64).collect::<Vec<_>>();
    keys.shuffle(&mut thread_rng());
    keys
}

fn bench_insert(c: &mut Criterion) {
    let keys = shuffled_keys();
    let mut group = c.benchmark_group("insert_random");
    group.throughput(Throughput::Elements(COUNT as u64));

    group.bench_function("btree_set", |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &key in &keys {
                set.insert(black_box(key));
            }
            set
        })
    });

    group.bench_function("avl_tree_set", |b| {
        b.iter(|| {
            let mut set = AvlTreeSet::new();
            for &key in &keys {
                set.insert(black_box(key));
            }
            set
        })
    });

    group.finish();
}

fn bench_take(c: &mut Criterion) {
    let keys = shuffled_keys();
    let mut removals = keys.clone();
    removals.shuffle(&mut thread_rng());

    let btree_set = keys.iter().cloned().collect::<BTreeSet<_>>();
    let avl_set = keys.iter().cloned().collect::<AvlTreeSet<_>>();

    let mut group = c.benchmark_group("take_random");
    group.throughput(Throughput::Elements(COUNT as u64));

    group.bench_function("btree_set", |b| {
        b.iter(|| {
            let mut set = btree_set.clone();
            for key in &removals {
                black_box(set.take(key));
            }
        })
    });

    group.bench_function("avl_tree_set", |b| {
        b.iter(|| {
            let mut set = avl_set.clone();
            for key in &removals {
                black_box(set.take(key));
            }
        })
    });

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let keys = shuffled_keys();
    let btree_set = keys.iter().cloned().collect::<BTreeSet<_>>();
    let avl_set = keys.iter().cloned().collect::<AvlTreeSet<_>>();

    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(COUNT as u64));

    group.bench_function("btree_set", |b| b.iter(|| btree_set.iter().sum::<i64>()));
    group.bench_function("avl_tree_set", |b| b.iter(|| avl_set.iter().sum::<i64>()));

    group.finish();
}

fn bench_lower_bound(c: &mut Criterion) {
    let mut rng = thread_rng();
    let keys = (0..COUNT as i64).map(|key| key * 2).collect::<Vec<_>>();
    let probes = (0..1000)
        .map(|_| rng.gen_range(0, 2 * COUNT as i64))
        .collect::<Vec<_>>();

    let btree_set = keys.iter().cloned().collect::<BTreeSet<_>>();
    let avl_set = keys.iter().cloned().collect::<AvlTreeSet<_>>();

    let mut group = c.benchmark_group("lower_bound");

    group.bench_function("btree_set", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(btree_set.range(probe..).next());
            }
        })
    });

    group.bench_function("avl_tree_set", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(avl_set.lower_bound(probe).get());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_take,
    bench_iterate,
    bench_lower_bound
);
criterion_main!(benches);
