use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use token_ioc::*;
use std::sync::Arc;

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let registry = Registry::new();
    let token = Token::new("u64");
    registry.bind::<u64>(token).unwrap().to_value_factory(|| 42).in_singleton_scope();

    // Prime the singleton
    let _ = registry.get_item::<u64>(token).unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = registry.get_item::<u64>(black_box(token)).unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let registry = Registry::new();
                let token = Token::new("expensive");
                registry
                    .bind::<ExpensiveToCreate>(token)
                    .unwrap()
                    .to_value_factory(|| ExpensiveToCreate { data: (0..1000).collect() })
                    .in_singleton_scope();
                (registry, token)
            },
            |(registry, token)| {
                let v = registry.get_item::<ExpensiveToCreate>(token).unwrap();
                black_box(v.data.len());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_transient_vs_singleton(c: &mut Criterion) {
    #[derive(Default)]
    struct Service {
        data: [u8; 64],
    }

    let mut group = c.benchmark_group("transient_vs_singleton");

    let registry = Registry::new();
    let transient = Token::new("transient");
    let singleton = Token::new("singleton");
    registry.bind::<Service>(transient).unwrap().to::<Service>();
    registry.bind::<Service>(singleton).unwrap().to::<Service>().in_singleton_scope();

    group.bench_function("transient", |b| {
        b.iter(|| black_box(registry.get_item::<Service>(transient).unwrap().data[0]))
    });
    group.bench_function("singleton", |b| {
        b.iter(|| black_box(registry.get_item::<Service>(singleton).unwrap().data[0]))
    });
    group.finish();
}

fn bench_trait_object_resolution(c: &mut Criterion) {
    trait Greeter: Send + Sync {
        fn greet(&self) -> usize;
    }

    #[derive(Default)]
    struct Impl;

    impl Greeter for Impl {
        fn greet(&self) -> usize {
            7
        }
    }

    implements!(Impl => dyn Greeter);

    let registry = Registry::new();
    let token = Token::new("greeter");
    registry.bind::<dyn Greeter>(token).unwrap().to::<Impl>().in_singleton_scope();

    c.bench_function("trait_object_singleton", |b| {
        b.iter(|| black_box(registry.get_item::<dyn Greeter>(token).unwrap().greet()))
    });
}

fn bench_registry_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_by_registry_size");

    for size in [1usize, 16, 256, 4096] {
        let registry = Registry::new();
        let tokens: Vec<Token> = (0..size).map(|_| Token::new("sized")).collect();
        for (i, token) in tokens.iter().enumerate() {
            registry.bind::<usize>(*token).unwrap().to_value_factory(move || i).in_singleton_scope();
        }
        let target = tokens[size / 2];

        group.bench_with_input(BenchmarkId::from_parameter(size), &target, |b, token| {
            b.iter(|| black_box(registry.get_item::<usize>(*token).unwrap()))
        });
    }
    group.finish();
}

fn bench_injection_site(c: &mut Criterion) {
    let registry = Arc::new(Registry::new());
    let token = Token::new("site");
    registry.bind::<u64>(token).unwrap().to_value_factory(|| 1);
    let injector = Injector::new(registry);

    let memoized = injector.site::<u64>(token, &[]).materialize();
    let uncached = injector.site::<u64>(token, &[NOCACHE]).materialize();
    let _ = memoized.get().unwrap();

    let mut group = c.benchmark_group("injection_site");
    group.bench_function("memoized", |b| b.iter(|| black_box(memoized.get().unwrap())));
    group.bench_function("nocache", |b| b.iter(|| black_box(uncached.get().unwrap())));
    group.finish();
}

fn bench_bind_remove(c: &mut Criterion) {
    let registry = Registry::new();
    c.bench_function("bind_remove_cycle", |b| {
        b.iter(|| {
            let token = Token::new("cycle");
            registry.bind::<u8>(token).unwrap().to_value_factory(|| 0);
            registry.remove_item(token).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_transient_vs_singleton,
    bench_trait_object_resolution,
    bench_registry_size,
    bench_injection_site,
    bench_bind_remove
);
criterion_main!(benches);
