//! Timed execution of a single kernel.
//!
//! The [`Runner`] resolves a kernel through a [`KernelRegistry`], runs it on a caller-owned
//! graph and measures the elapsed wall-clock time with a monotonic clock. The graph is
//! relaxed in place; the runner never copies it.
//!
//! # Examples
//!
//! ```rust
//! use fwbench::{GraphGenerator, KernelRegistry, Runner, WeightBounds};
//!
//! let registry = KernelRegistry::new();
//! let runner = Runner::new(&registry);
//!
//! let mut graph = GraphGenerator::new(WeightBounds::default())
//!     .seeded(1)
//!     .generate::<i16>(10, 20)?;
//! let timing = runner.run("FloydWarshallNative16", &mut graph)?;
//! println!("took {} ms", timing.millis());
//! # Ok::<(), fwbench::Error>(())
//! ```

use std::time::{Duration, Instant};

use crate::{
    graph::{Graph, Weight, WeightWidth},
    kernels::{KernelFamily, KernelRegistry},
    Result,
};

/// Elapsed time of one kernel invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timing {
    elapsed: Duration,
}

impl Timing {
    /// Wraps a measured duration.
    #[must_use]
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed }
    }

    /// The exact measured duration.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in whole milliseconds, truncated.
    #[must_use]
    pub fn millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Runs kernels by name against graphs.
#[derive(Debug, Clone, Copy)]
pub struct Runner<'r> {
    registry: &'r KernelRegistry,
    print_graph: bool,
}

impl<'r> Runner<'r> {
    /// Creates a runner that does not render graphs.
    #[must_use]
    pub fn new(registry: &'r KernelRegistry) -> Self {
        Self {
            registry,
            print_graph: false,
        }
    }

    /// Renders the graph before and after the kernel runs.
    #[must_use]
    pub fn print_graph(mut self, print_graph: bool) -> Self {
        self.print_graph = print_graph;
        self
    }

    /// The registry kernels are resolved from.
    #[must_use]
    pub fn registry(&self) -> &'r KernelRegistry {
        self.registry
    }

    /// Resolves `procedure` and runs it on `graph`.
    ///
    /// On success the graph holds all-pairs shortest distances. On failure the graph is left
    /// untouched and the error is logged before being returned.
    ///
    /// # Errors
    ///
    /// Any resolution error of [`KernelRegistry::resolve`].
    pub fn run<T: Weight>(&self, procedure: &str, graph: &mut Graph<T>) -> Result<Timing> {
        let label = match KernelFamily::from_name(procedure) {
            Ok(family) => family.label(),
            Err(_) => procedure,
        };
        log::info!("All-pairs shortest path: |V| = {}", graph.size());
        log::info!("Computing with {label} procedure...");

        let kernel = match self.registry.resolve::<T>(procedure) {
            Ok(kernel) => kernel,
            Err(e) => {
                log::error!("{e}");
                return Err(e);
            }
        };

        if self.print_graph {
            log::info!("\n{graph}");
        }

        let size = graph.size();
        let started = Instant::now();
        kernel(graph.weights_mut(), size);
        let timing = Timing::new(started.elapsed());

        if self.print_graph {
            log::info!("SOLUTION\n{graph}");
        }
        log::info!("Execution time - {label}:\t{} ms", timing.millis());

        Ok(timing)
    }

    /// Runs `family` on an independent copy of `source`, converted to the family's width.
    ///
    /// `source` itself is never modified.
    ///
    /// # Errors
    ///
    /// [`crate::Error::ConversionOverflow`] if `source` does not fit the family's width, or
    /// any resolution error of [`Runner::run`].
    pub fn run_family<S: Weight>(
        &self,
        family: KernelFamily,
        source: &Graph<S>,
    ) -> Result<(SolvedGraph, Timing)> {
        match family.width() {
            WeightWidth::W8 => {
                let mut copy = source.convert::<i8>()?;
                let timing = self.run(family.name(), &mut copy)?;
                Ok((SolvedGraph::W8(copy), timing))
            }
            WeightWidth::W16 => {
                let mut copy = source.convert::<i16>()?;
                let timing = self.run(family.name(), &mut copy)?;
                Ok((SolvedGraph::W16(copy), timing))
            }
            WeightWidth::W32 => {
                let mut copy = source.convert::<i32>()?;
                let timing = self.run(family.name(), &mut copy)?;
                Ok((SolvedGraph::W32(copy), timing))
            }
        }
    }
}

/// A relaxed graph of any supported width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolvedGraph {
    /// 8-bit distances
    W8(Graph<i8>),
    /// 16-bit distances
    W16(Graph<i16>),
    /// 32-bit distances
    W32(Graph<i32>),
}

impl SolvedGraph {
    /// Width of the stored distances.
    #[must_use]
    pub fn width(&self) -> WeightWidth {
        match self {
            SolvedGraph::W8(_) => WeightWidth::W8,
            SolvedGraph::W16(_) => WeightWidth::W16,
            SolvedGraph::W32(_) => WeightWidth::W32,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            SolvedGraph::W8(g) => g.size(),
            SolvedGraph::W16(g) => g.size(),
            SolvedGraph::W32(g) => g.size(),
        }
    }

    /// Distance from `row` to `col` in the common `i64` domain, `None` if unreachable.
    #[must_use]
    pub fn distance(&self, row: usize, col: usize) -> Option<i64> {
        fn finite<T: Weight>(graph: &Graph<T>, row: usize, col: usize) -> Option<i64> {
            graph
                .is_finite(row, col)
                .then(|| graph.get(row, col).widen())
        }

        match self {
            SolvedGraph::W8(g) => finite(g, row, col),
            SolvedGraph::W16(g) => finite(g, row, col),
            SolvedGraph::W32(g) => finite(g, row, col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        kernels::BackendBundle,
        test::{chain_graph, safe_random_graph},
        Error,
    };

    #[test]
    fn test_run_relaxes_in_place() {
        let registry = KernelRegistry::new();
        let runner = Runner::new(&registry).print_graph(true);

        let mut graph = chain_graph::<i8>();
        runner.run("FloydWarshallNative8", &mut graph).unwrap();
        assert_eq!(graph.get(0, 3), 6);
    }

    #[test]
    fn test_failure_leaves_graph_untouched() {
        let registry = KernelRegistry::builder()
            .without(BackendBundle::Native)
            .build();
        let runner = Runner::new(&registry);

        let original = safe_random_graph(12, 30, 4);
        let mut graph = original.clone();
        let result = runner.run("FloydWarshallNative8", &mut graph);

        assert!(matches!(result, Err(Error::BackendUnavailable { .. })));
        assert_eq!(graph, original);
    }

    #[test]
    fn test_unknown_procedure() {
        let registry = KernelRegistry::new();
        let mut graph = chain_graph::<i32>();
        assert!(matches!(
            Runner::new(&registry).run("NoSuchKernel", &mut graph),
            Err(Error::UnknownKernel(_))
        ));
    }

    #[test]
    fn test_run_family_uses_copy() {
        let registry = KernelRegistry::new();
        let runner = Runner::new(&registry);
        let source = chain_graph::<i8>();

        let (solved, _) = runner.run_family(KernelFamily::Native16, &source).unwrap();
        assert_eq!(solved.width(), WeightWidth::W16);
        assert_eq!(solved.size(), 4);
        assert_eq!(solved.distance(0, 3), Some(6));
        assert_eq!(solved.distance(3, 0), None);

        // The source keeps its original edges
        assert!(!source.is_finite(0, 3));
    }

    #[test]
    fn test_timing_millis() {
        let timing = Timing::new(Duration::from_micros(2_999));
        assert_eq!(timing.millis(), 2);
        assert_eq!(timing.elapsed(), Duration::from_micros(2_999));
    }
}
