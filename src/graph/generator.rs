//! Random graph generation.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    graph::{Graph, Weight, WeightBounds},
    Error, Result,
};

/// Default chance, in percent, that any ordered pair gets an edge.
pub const DEFAULT_PROBABILITY: u32 = 12;

/// Produces random dense graphs.
///
/// For every ordered pair `(i, j)` with `i != j` a number in `[1, 100]` is drawn. If it is at
/// most `probability`, a weight is drawn uniformly from `[min, max]` of the configured
/// [`WeightBounds`]; otherwise the pair gets the sentinel. The diagonal is always zero.
///
/// The generator is backed by a [`StdRng`]. A seeded generator is fully reproducible; an
/// unseeded one draws its seed from the OS and still reports it through [`Self::seed`].
///
/// # Examples
///
/// ```rust
/// use fwbench::{GraphGenerator, WeightBounds};
///
/// let mut a = GraphGenerator::new(WeightBounds::default()).seeded(42);
/// let mut b = GraphGenerator::new(WeightBounds::default()).seeded(42);
///
/// let first = a.generate::<i8>(16, 12)?;
/// let second = b.generate::<i8>(16, 12)?;
/// assert_eq!(first, second);
/// # Ok::<(), fwbench::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GraphGenerator {
    bounds: WeightBounds,
    seed: u64,
    rng: StdRng,
}

impl GraphGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new(bounds: WeightBounds) -> Self {
        let seed = rand::random::<u64>();
        Self {
            bounds,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reseeds the generator for reproducible output.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The bounds used for edge weights and the sentinel.
    #[must_use]
    pub fn bounds(&self) -> WeightBounds {
        self.bounds
    }

    /// Generates a graph with `size` vertices.
    ///
    /// # Arguments
    ///
    /// * `size` - Vertex count, at least 1
    /// * `probability` - Chance in percent, `0..=100`, that an ordered pair gets an edge
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for a zero size, a probability above 100, or
    /// a sentinel that does not fit into `T`.
    pub fn generate<T: Weight>(&mut self, size: usize, probability: u32) -> Result<Graph<T>> {
        if size == 0 {
            return Err(invalid_argument!("graph size must be positive, got 0"));
        }
        if probability > 100 {
            return Err(invalid_argument!(
                "edge probability must be within [0, 100], got {probability}"
            ));
        }

        let inf = self.bounds.inf_as::<T>()?;
        let min = T::narrow(self.bounds.min())
            .ok_or_else(|| invalid_argument!("minimum weight does not fit into {}", T::WIDTH))?;
        let max = T::narrow(self.bounds.max())
            .ok_or_else(|| invalid_argument!("maximum weight does not fit into {}", T::WIDTH))?;

        let mut graph = Graph::unconnected(size, inf)?;
        let (min, max) = (min.widen(), max.widen());
        for row in 0..size {
            for col in 0..size {
                let has_edge = self.rng.gen_range(1..=100u32) <= probability;
                if has_edge && row != col {
                    let drawn = self.rng.gen_range(min..=max);
                    let weight = T::narrow(drawn).ok_or(Error::ConversionOverflow {
                        value: drawn,
                        width: T::WIDTH,
                    })?;
                    graph.set_edge(row, col, weight)?;
                }
            }
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_full_probability_at_type_limit() {
        // Weights right below the i8 sentinel still become edges
        let bounds = WeightBounds::new(120, 126, 127).unwrap();
        let graph = GraphGenerator::new(bounds)
            .seeded(3)
            .generate::<i8>(6, 100)
            .unwrap();
        assert_eq!(graph.edge_count(), 6 * 5);
        assert!(graph.edges().all(|(_, _, w)| (120..=126).contains(&w)));
    }

    #[test]
    fn test_generate_respects_bounds() {
        let bounds = WeightBounds::new(2, 5, 40).unwrap();
        let mut generator = GraphGenerator::new(bounds).seeded(1);
        let graph = generator.generate::<i16>(24, 50).unwrap();

        assert_eq!(graph.inf(), 40);
        for row in 0..24 {
            assert_eq!(graph.get(row, row), 0);
            for col in 0..24 {
                let w = graph.get(row, col);
                if row != col {
                    assert!(w == 40 || (2..=5).contains(&w), "unexpected weight {w}");
                }
            }
        }
        assert!(graph.edge_count() > 0);
    }

    #[test]
    fn test_generate_is_reproducible() {
        let bounds = WeightBounds::default();
        let a = GraphGenerator::new(bounds)
            .seeded(99)
            .generate::<i8>(20, 12)
            .unwrap();
        let b = GraphGenerator::new(bounds)
            .seeded(99)
            .generate::<i8>(20, 12)
            .unwrap();
        let c = GraphGenerator::new(bounds)
            .seeded(100)
            .generate::<i8>(20, 12)
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_probability_extremes() {
        let mut generator = GraphGenerator::new(WeightBounds::default()).seeded(3);

        let empty = generator.generate::<i8>(10, 0).unwrap();
        assert_eq!(empty.edge_count(), 0);

        let full = generator.generate::<i8>(10, 100).unwrap();
        assert_eq!(full.edge_count(), 10 * 9);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut generator = GraphGenerator::new(WeightBounds::default()).seeded(3);
        assert!(matches!(
            generator.generate::<i8>(0, 12),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            generator.generate::<i8>(4, 101),
            Err(Error::InvalidArgument(_))
        ));

        let wide = WeightBounds::new(1, 10, 500).unwrap();
        let mut generator = GraphGenerator::new(wide).seeded(3);
        assert!(matches!(
            generator.generate::<i8>(4, 12),
            Err(Error::InvalidArgument(_))
        ));
        assert!(generator.generate::<i16>(4, 12).is_ok());
    }

    #[test]
    fn test_seed_is_reported() {
        let generator = GraphGenerator::new(WeightBounds::default()).seeded(1234);
        assert_eq!(generator.seed(), 1234);
    }
}
