//! Shared fixtures for unit tests.

use crate::{
    graph::{Graph, Weight, WeightBounds},
    kernels::KernelFamily,
    GraphGenerator,
};

// Four vertices, 0 -> 1 -> 2 -> 3 with weights 3, 1, 2 and nothing else
pub fn chain_graph<T: Weight>() -> Graph<T> {
    let inf = WeightBounds::default().inf_as::<T>().unwrap();
    let mut graph = Graph::unconnected(4, inf).unwrap();
    graph.set_edge(0, 1, T::narrow(3).unwrap()).unwrap();
    graph.set_edge(1, 2, T::narrow(1).unwrap()).unwrap();
    graph.set_edge(2, 3, T::narrow(2).unwrap()).unwrap();
    graph
}

// Path-safe random graph: bounds tuned so that (size - 1) * max < inf
pub fn safe_random_graph(size: usize, probability: u32, seed: u64) -> Graph<i8> {
    let base = WeightBounds::default();
    let max = base.widest_safe_max(size).unwrap();
    let bounds = WeightBounds::new(1, max, base.inf()).unwrap();
    GraphGenerator::new(bounds)
        .seeded(seed)
        .generate::<i8>(size, probability)
        .unwrap()
}

// Straightforward O(n^3) relaxation in i64, independent of any registered kernel
pub fn brute_force<T: Weight>(graph: &Graph<T>) -> Vec<i64> {
    let n = graph.size();
    let mut dist: Vec<i64> = graph.weights().iter().map(|w| w.widen()).collect();
    let inf = graph.inf().widen();
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let (ik, kj) = (dist[i * n + k], dist[k * n + j]);
                if ik < inf && kj < inf && ik + kj < dist[i * n + j] {
                    dist[i * n + j] = ik + kj;
                }
            }
        }
    }
    dist
}

pub fn all_families() -> Vec<KernelFamily> {
    use strum::IntoEnumIterator;
    KernelFamily::iter().collect()
}
