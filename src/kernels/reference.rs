//! The reference kernel.

use crate::graph::Weight;

/// Floyd-Warshall with an `i64` accumulator.
///
/// Both operands are widened before the addition, so the sum can never overflow regardless
/// of how close they are to the sentinel. A smaller sum is always below the value it
/// replaces and therefore fits back into `T`.
///
/// # Panics
///
/// Panics if `graph.len() != n * n`.
pub fn floyd_warshall_reference<T: Weight>(graph: &mut [T], n: usize) {
    assert_eq!(graph.len(), n * n, "kernel expects a {n}x{n} matrix");

    for k in 0..n {
        for j in 0..n {
            let kj = graph[k * n + j].widen();
            for i in 0..n {
                let candidate = graph[i * n + k].widen() + kj;
                let index = i * n + j;
                if graph[index].widen() > candidate {
                    if let Some(shorter) = T::narrow(candidate) {
                        graph[index] = shorter;
                    }
                }
            }
        }
    }
}
