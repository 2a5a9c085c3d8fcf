extern crate fwbench;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fwbench::{Graph, GraphGenerator, KernelFamily, KernelRegistry, Weight, WeightBounds};
use std::hint::black_box;
use strum::IntoEnumIterator;

const SIZES: [usize; 3] = [64, 128, 256];

fn base_graph(size: usize) -> Graph<i8> {
    GraphGenerator::new(WeightBounds::default())
        .seeded(0x5eed)
        .generate::<i8>(size, 12)
        .expect("default bounds fit 8-bit weights")
}

fn bench_width<T: Weight>(
    c: &mut Criterion,
    registry: &KernelRegistry,
    family: KernelFamily,
) {
    let kernel = registry
        .resolve::<T>(family.name())
        .expect("built-in kernel resolves");

    let mut group = c.benchmark_group(family.file_stem());
    for size in SIZES {
        let graph = base_graph(size)
            .convert::<T>()
            .expect("8-bit weights fit every width");
        group.throughput(Throughput::Elements((size * size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter_batched_ref(
                || graph.clone(),
                |g| {
                    kernel(g.weights_mut(), size);
                    black_box(g.get(0, size - 1))
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Every kernel family on the same seeded graphs, one group per family.
///
/// Throughput is reported in relaxation steps (`N³`) per second.
fn bench_kernels(c: &mut Criterion) {
    let registry = KernelRegistry::new();
    for family in KernelFamily::iter() {
        match family.width() {
            fwbench::WeightWidth::W8 => bench_width::<i8>(c, &registry, family),
            fwbench::WeightWidth::W16 => bench_width::<i16>(c, &registry, family),
            fwbench::WeightWidth::W32 => bench_width::<i32>(c, &registry, family),
        }
    }
}

criterion_group!(benches, bench_kernels);
criterion_main!(benches);
