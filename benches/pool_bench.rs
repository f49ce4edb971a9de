//! Throughput of the vector pool and the integrator steps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use pond_rig::physics::{apply_drag, apply_force, clamp_speed, BodyParams};
use pond_rig::util::VectorPool;

fn pool_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_pool");

    let _ = group.bench_function("acquire_release", |b| {
        let mut pool = VectorPool::new(16, 64);
        b.iter(|| {
            let h = pool.acquire();
            pool.release(black_box(h));
        });
    });

    for count in [8, 64, 256] {
        let _ = group.bench_function(format!("burst_{count}"), |b| {
            let mut pool = VectorPool::new(16, 64);
            let mut held = Vec::with_capacity(count);
            b.iter(|| {
                held.extend((0..count).map(|_| pool.acquire()));
                for h in held.drain(..) {
                    pool.release(h);
                }
            });
        });
    }

    group.finish();
}

fn integrator_benchmark(c: &mut Criterion) {
    let params = BodyParams {
        mass: 2.0,
        drag: 0.8,
    };
    let _ = c.bench_function("integrator_step", |b| {
        let mut v = Vec3::new(0.3, 0.0, -0.2);
        b.iter(|| {
            let force = black_box(Vec3::X);
            let _ = apply_force(&mut v, force, 1.0 / 60.0, &params);
            apply_drag(&mut v, 1.0 / 60.0, &params);
            clamp_speed(&mut v, 0.05, 0.6);
        });
    });
}

criterion_group!(benches, pool_benchmark, integrator_benchmark);
criterion_main!(benches);
