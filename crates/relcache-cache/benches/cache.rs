use std::convert::Infallible;
use std::sync::Arc;
use std::thread;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use relcache_cache::{Cache, KeyedCache};

const OBJECTS: usize = 10_000;
const THREADS: usize = 4;

#[derive(Clone, Debug)]
struct Object {
    id: String,
    refers: Vec<String>,
}

impl Object {
    fn new(i: usize, with_dependency: bool) -> Self {
        Self {
            id: i.to_string(),
            refers: if with_dependency { vec!["a".to_string()] } else { Vec::new() },
        }
    }
}

fn new_cache() -> KeyedCache<Object> {
    KeyedCache::new(
        |o: &Object| Ok::<_, Infallible>(o.id.clone()),
        |o: &Object| Ok::<_, Infallible>(o.refers.clone()),
    )
}

fn filled_cache(with_dependency: bool) -> KeyedCache<Object> {
    let cache = new_cache();
    for i in 0..OBJECTS {
        cache.add(Object::new(i, with_dependency)).unwrap();
    }
    cache
}

fn add_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for (name, with_dependency) in [("plain", false), ("with_dependency", true)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                new_cache,
                |cache| {
                    for i in 0..OBJECTS {
                        cache.add(Object::new(i, with_dependency)).unwrap();
                    }
                    cache
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.bench_function("four_threads", |b| {
        b.iter_batched(
            || Arc::new(new_cache()),
            |cache| {
                let per_thread = OBJECTS / THREADS;
                let handles: Vec<_> = (0..THREADS)
                    .map(|t| {
                        let cache = Arc::clone(&cache);
                        thread::spawn(move || {
                            for i in (t * per_thread)..((t + 1) * per_thread) {
                                cache.add(Object::new(i, false)).unwrap();
                            }
                        })
                    })
                    .collect();
                for h in handles {
                    h.join().unwrap();
                }
                cache
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn delete_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");

    for (name, with_dependency) in [("plain", false), ("with_dependency", true)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || filled_cache(with_dependency),
                |cache| {
                    for i in 0..OBJECTS {
                        cache.delete(&Object::new(i, false)).unwrap();
                    }
                    cache
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, add_benches, delete_benches);
criterion_main!(benches);
