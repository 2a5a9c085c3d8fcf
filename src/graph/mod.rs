//! Dense adjacency-matrix graphs with integer weights.
//!
//! A [`Graph<T>`] owns an `N x N` row-major matrix. Entry `(row, col)` holds the weight of
//! the edge `row -> col` before relaxation and the shortest distance afterwards. Missing
//! edges hold the graph's sentinel, see [`WeightBounds`].
//!
//! # Key Components
//!
//! - [`Graph`] - The matrix container, including checked width conversion
//! - [`Weight`] / [`WeightWidth`] - The supported integer domains
//! - [`WeightBounds`] - Legal edge range, sentinel and overflow checks
//! - [`GraphGenerator`] - Seedable random graph generation
//! - [`io`] - The `<from> <to> <weight>` text format
//!
//! # Examples
//!
//! ```rust
//! use fwbench::{Graph, GraphGenerator, WeightBounds};
//!
//! let mut generator = GraphGenerator::new(WeightBounds::default()).seeded(7);
//! let graph: Graph<i8> = generator.generate(8, 30)?;
//!
//! // Independent 16-bit copy for a different kernel family
//! let wide = graph.convert::<i16>()?;
//! assert_eq!(wide.get(2, 5), i16::from(graph.get(2, 5)));
//! # Ok::<(), fwbench::Error>(())
//! ```

mod bounds;
mod generator;
pub mod io;
mod weight;

use std::fmt;

pub use bounds::{WeightBounds, DEFAULT_INF, DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT};
pub use generator::{GraphGenerator, DEFAULT_PROBABILITY};
pub use weight::{Weight, WeightWidth};

use crate::{Error, Result};

/// Dense directed graph stored as a row-major distance matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<T: Weight> {
    size: usize,
    weights: Vec<T>,
    inf: T,
}

impl<T: Weight> Graph<T> {
    /// Creates a graph with no edges: `0` on the diagonal and `inf` everywhere else.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `size` is zero, `inf` is not positive, or the
    /// `size * size` matrix cannot be allocated.
    pub fn unconnected(size: usize, inf: T) -> Result<Self> {
        if size == 0 {
            return Err(invalid_argument!("graph size must be positive, got 0"));
        }
        if inf <= T::ZERO {
            return Err(invalid_argument!("sentinel must be positive, got {inf}"));
        }
        // A Vec never holds more than isize::MAX bytes
        let cells = size
            .checked_mul(size)
            .filter(|cells| {
                cells
                    .checked_mul(std::mem::size_of::<T>())
                    .is_some_and(|bytes| bytes <= isize::MAX.unsigned_abs())
            })
            .ok_or_else(|| invalid_argument!("graph size {size} does not fit in memory"))?;

        let mut weights = Vec::new();
        weights
            .try_reserve_exact(cells)
            .map_err(|e| invalid_argument!("cannot allocate a graph of size {size}: {e}"))?;
        weights.resize(cells, inf);

        let mut graph = Self {
            size,
            weights,
            inf,
        };
        graph.reset_diagonal();
        Ok(graph)
    }

    /// Creates a graph from an existing row-major matrix.
    ///
    /// The diagonal is forced to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `weights` is not `size * size` long, `size` is
    /// zero, or an entry is negative or above `inf`.
    pub fn from_weights(size: usize, weights: Vec<T>, inf: T) -> Result<Self> {
        if size == 0 {
            return Err(invalid_argument!("graph size must be positive, got 0"));
        }
        if size.checked_mul(size) != Some(weights.len()) {
            return Err(invalid_argument!(
                "expected {} weights for {size} vertices, got {}",
                size.saturating_mul(size),
                weights.len()
            ));
        }
        if let Some(bad) = weights.iter().find(|w| **w < T::ZERO || **w > inf) {
            return Err(invalid_argument!(
                "weight {bad} is outside of [0, {inf}]"
            ));
        }

        let mut graph = Self {
            size,
            weights,
            inf,
        };
        graph.reset_diagonal();
        Ok(graph)
    }

    /// Number of vertices.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The "no edge" sentinel of this graph.
    #[must_use]
    pub fn inf(&self) -> T {
        self.inf
    }

    /// Width of the stored weights.
    #[must_use]
    pub fn width(&self) -> WeightWidth {
        T::WIDTH
    }

    /// Weight or distance from `row` to `col`.
    ///
    /// # Panics
    ///
    /// Panics if either index is not below [`Graph::size`].
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.weights[self.index(row, col)]
    }

    /// Returns `true` if `(row, col)` holds a finite value.
    #[must_use]
    pub fn is_finite(&self, row: usize, col: usize) -> bool {
        self.get(row, col) < self.inf
    }

    /// Sets the edge `row -> col`. Setting a diagonal entry is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if an index is out of range or the weight is
    /// negative or above the sentinel.
    pub fn set_edge(&mut self, row: usize, col: usize, weight: T) -> Result<()> {
        if row >= self.size || col >= self.size {
            return Err(invalid_argument!(
                "edge ({row}, {col}) is outside of a graph with {} vertices",
                self.size
            ));
        }
        if weight < T::ZERO || weight > self.inf {
            return Err(invalid_argument!(
                "weight {weight} is outside of [0, {}]",
                self.inf
            ));
        }
        if row != col {
            let index = self.index(row, col);
            self.weights[index] = weight;
        }
        Ok(())
    }

    /// Removes the edge `row -> col` by setting it to the sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if an index is out of range.
    pub fn remove_edge(&mut self, row: usize, col: usize) -> Result<()> {
        self.set_edge(row, col, self.inf)
    }

    /// The row-major matrix.
    #[must_use]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Mutable access to the row-major matrix, as handed to kernels.
    pub fn weights_mut(&mut self) -> &mut [T] {
        &mut self.weights
    }

    /// Iterates over `(row, col, weight)` of every off-diagonal finite entry.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let size = self.size;
        self.weights
            .iter()
            .enumerate()
            .filter(move |(index, w)| index / size != index % size && **w < self.inf)
            .map(move |(index, w)| (index / size, index % size, *w))
    }

    /// Number of off-diagonal finite entries.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Creates an independent copy with a different weight width.
    ///
    /// Every entry and the sentinel go through the common `i64` domain with a checked
    /// narrowing step, so no value is ever truncated silently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConversionOverflow`] for the first value that does not fit into `U`.
    pub fn convert<U: Weight>(&self) -> Result<Graph<U>> {
        let narrow = |value: T| -> Result<U> {
            let wide = value.widen();
            U::narrow(wide).ok_or(Error::ConversionOverflow {
                value: wide,
                width: U::WIDTH,
            })
        };

        let inf = narrow(self.inf)?;
        let weights = self
            .weights
            .iter()
            .map(|w| narrow(*w))
            .collect::<Result<Vec<U>>>()?;

        Ok(Graph {
            size: self.size,
            weights,
            inf,
        })
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "({row}, {col}) out of bounds for {} vertices",
            self.size
        );
        row * self.size + col
    }

    fn reset_diagonal(&mut self) {
        for i in 0..self.size {
            self.weights[i * self.size + i] = T::ZERO;
        }
    }
}

/// Human-readable matrix dump: one line per row, sentinel cells left blank.
impl<T: Weight> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph of size |{}|:", self.size)?;
        for row in self.weights.chunks(self.size) {
            for weight in row {
                if *weight == self.inf {
                    write!(f, "{:>4} ", "")?;
                } else {
                    write!(f, "{weight:>4} ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::chain_graph;

    #[test]
    fn test_unconnected() {
        let graph = Graph::<i8>::unconnected(3, 99).unwrap();
        assert_eq!(graph.size(), 3);
        assert_eq!(graph.width(), WeightWidth::W8);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 0 } else { 99 };
                assert_eq!(graph.get(i, j), expected);
            }
        }
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_unconnected_rejects_bad_input() {
        assert!(matches!(
            Graph::<i8>::unconnected(0, 99),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Graph::<i8>::unconnected(4, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unconnected_rejects_oversized() {
        // size * size fits usize, the byte count does not
        assert!(matches!(
            Graph::<i32>::unconnected(4_000_000_000, 99),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Graph::<i8>::unconnected(usize::MAX, 99),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_weights_forces_diagonal() {
        let graph = Graph::<i16>::from_weights(2, vec![5, 3, 99, 7], 99).unwrap();
        assert_eq!(graph.weights(), &[0, 3, 99, 0]);
    }

    #[test]
    fn test_from_weights_validation() {
        assert!(Graph::<i16>::from_weights(2, vec![0, 1, 2], 99).is_err());
        assert!(Graph::<i16>::from_weights(2, vec![0, -1, 2, 0], 99).is_err());
        assert!(Graph::<i16>::from_weights(2, vec![0, 100, 2, 0], 99).is_err());
    }

    #[test]
    fn test_set_and_remove_edge() {
        let mut graph = Graph::<i32>::unconnected(3, 99).unwrap();
        graph.set_edge(0, 2, 4).unwrap();
        assert_eq!(graph.get(0, 2), 4);
        assert!(graph.is_finite(0, 2));
        assert!(!graph.is_finite(2, 0));

        graph.set_edge(1, 1, 5).unwrap();
        assert_eq!(graph.get(1, 1), 0);

        graph.remove_edge(0, 2).unwrap();
        assert_eq!(graph.get(0, 2), 99);

        assert!(graph.set_edge(3, 0, 1).is_err());
        assert!(graph.set_edge(0, 1, 100).is_err());
    }

    #[test]
    fn test_edges_iterator() {
        let graph = chain_graph::<i32>();
        let edges: Vec<(usize, usize, i32)> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1, 3), (1, 2, 1), (2, 3, 2)]);
    }

    #[test]
    fn test_convert_widens_and_narrows() {
        let graph = chain_graph::<i8>();
        let wide = graph.convert::<i32>().unwrap();
        assert_eq!(wide.inf(), 99);
        assert_eq!(wide.get(0, 1), 3);

        let back = wide.convert::<i8>().unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn test_convert_overflow() {
        let mut graph = Graph::<i16>::unconnected(2, 1000).unwrap();
        graph.set_edge(0, 1, 300).unwrap();
        match graph.convert::<i8>() {
            Err(Error::ConversionOverflow { value, width }) => {
                assert_eq!(value, 1000);
                assert_eq!(width, WeightWidth::W8);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_display_blanks_sentinel() {
        let mut graph = Graph::<i8>::unconnected(2, 99).unwrap();
        graph.set_edge(0, 1, 7).unwrap();
        let rendered = graph.to_string();
        assert_eq!(rendered, "Graph of size |2|:\n   0    7 \n        0 \n");
    }
}
