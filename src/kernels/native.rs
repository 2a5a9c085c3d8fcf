//! Width-native kernels.

use crate::graph::Weight;

/// Floyd-Warshall that stays in the weight type and saturates on overflow.
///
/// This is the arithmetic a packed-integer implementation uses: add two lanes with
/// saturation and keep the minimum. A saturated sum equals `T::MAX`, which is never smaller
/// than a stored distance, so it is discarded exactly like a sum through an unreachable
/// vertex.
///
/// # Panics
///
/// Panics if `graph.len() != n * n`.
pub fn floyd_warshall_saturating<T: Weight>(graph: &mut [T], n: usize) {
    assert_eq!(graph.len(), n * n, "kernel expects a {n}x{n} matrix");

    for k in 0..n {
        for j in 0..n {
            let kj = graph[k * n + j];
            for i in 0..n {
                let candidate = graph[i * n + k].saturating_add(kj);
                let index = i * n + j;
                if graph[index] > candidate {
                    graph[index] = candidate;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        kernels::floyd_warshall_reference,
        test::{chain_graph, safe_random_graph},
    };

    #[test]
    fn test_chain_all_widths() {
        let mut g8 = chain_graph::<i8>();
        let mut g16 = chain_graph::<i16>();
        let mut g32 = chain_graph::<i32>();
        floyd_warshall_saturating(g8.weights_mut(), 4);
        floyd_warshall_saturating(g16.weights_mut(), 4);
        floyd_warshall_saturating(g32.weights_mut(), 4);
        assert_eq!(g8.get(0, 3), 6);
        assert_eq!(g16.get(0, 3), 6);
        assert_eq!(g32.get(0, 3), 6);
    }

    #[test]
    fn test_agrees_with_reference() {
        let base = safe_random_graph(30, 15, 21);

        let mut native = base.clone();
        floyd_warshall_saturating(native.weights_mut(), 30);

        let mut reference = base.convert::<i32>().unwrap();
        floyd_warshall_reference(reference.weights_mut(), 30);

        assert_eq!(native.convert::<i32>().unwrap(), reference);
    }

    #[test]
    fn test_saturation_does_not_wrap() {
        // 99 + 99 wraps to -58 in plain i8 arithmetic
        let mut weights = vec![0i8, 99, 99, 99, 0, 99, 99, 99, 0];
        floyd_warshall_saturating(&mut weights, 3);
        assert!(weights.iter().all(|w| *w >= 0));
        assert_eq!(weights, vec![0, 99, 99, 99, 0, 99, 99, 99, 0]);
    }
}
