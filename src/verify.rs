//! Cross-width equivalence checking.
//!
//! Two shortest-path matrices are equal when every entry agrees after widening both to
//! `i64`. [`compare`] collects every differing cell; [`verify`] reduces that to a logged
//! yes/no. [`EquivalenceCheck`] drives the whole "generate once, run every kernel, compare
//! against the reference" workflow.
//!
//! # Examples
//!
//! ```rust
//! use fwbench::{verify::EquivalenceCheck, KernelRegistry};
//!
//! let registry = KernelRegistry::new();
//! let report = EquivalenceCheck::new(&registry).size(9).seed(7).run()?;
//! assert!(report.all_passed());
//! # Ok::<(), fwbench::Error>(())
//! ```

use crate::{
    graph::{Graph, GraphGenerator, Weight, WeightBounds, DEFAULT_PROBABILITY},
    kernels::{KernelFamily, KernelRegistry},
    runner::{Runner, SolvedGraph, Timing},
    Error, Result,
};

/// One matrix entry on which two results disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMismatch {
    /// Source vertex
    pub row: usize,
    /// Destination vertex
    pub col: usize,
    /// Distance in the reference result
    pub expected: i64,
    /// Distance in the candidate result
    pub actual: i64,
}

/// Outcome of comparing a candidate result against the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    label: String,
    size_mismatch: Option<(usize, usize)>,
    mismatches: Vec<CellMismatch>,
}

impl Comparison {
    /// Label of the compared candidate.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// `Some((reference, candidate))` if the vertex counts differ.
    #[must_use]
    pub fn size_mismatch(&self) -> Option<(usize, usize)> {
        self.size_mismatch
    }

    /// Every differing cell, in row-major order.
    #[must_use]
    pub fn mismatches(&self) -> &[CellMismatch] {
        &self.mismatches
    }

    /// Returns `true` if both results have the same size and agree everywhere.
    #[must_use]
    pub fn is_equal(&self) -> bool {
        self.size_mismatch.is_none() && self.mismatches.is_empty()
    }

    /// Number of differing entries. A size mismatch counts as one.
    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        if self.size_mismatch.is_some() {
            self.mismatches.len().max(1)
        } else {
            self.mismatches.len()
        }
    }

    /// Converts an unequal comparison into [`Error::Mismatch`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mismatch`] unless [`Comparison::is_equal`] holds.
    pub fn into_result(self) -> Result<()> {
        if self.is_equal() {
            Ok(())
        } else {
            Err(Error::Mismatch {
                mismatches: self.mismatch_count(),
                label: self.label,
            })
        }
    }
}

/// Compares all `N²` entries of `candidate` against `reference` in the `i64` domain.
///
/// Results of different sizes are reported as a size mismatch without cell detail.
#[must_use]
pub fn compare<A: Weight, B: Weight>(
    reference: &Graph<A>,
    candidate: &Graph<B>,
    label: &str,
) -> Comparison {
    if reference.size() != candidate.size() {
        return Comparison {
            label: label.to_string(),
            size_mismatch: Some((reference.size(), candidate.size())),
            mismatches: Vec::new(),
        };
    }

    let size = reference.size();
    let mismatches = reference
        .weights()
        .iter()
        .zip(candidate.weights())
        .enumerate()
        .filter_map(|(index, (expected, actual))| {
            let (expected, actual) = (expected.widen(), actual.widen());
            (expected != actual).then_some(CellMismatch {
                row: index / size,
                col: index % size,
                expected,
                actual,
            })
        })
        .collect();

    Comparison {
        label: label.to_string(),
        size_mismatch: None,
        mismatches,
    }
}

/// Compares and logs the verdict.
///
/// Returns `true` iff both results are equal.
pub fn verify<A: Weight, B: Weight>(
    reference: &Graph<A>,
    candidate: &Graph<B>,
    label: &str,
) -> bool {
    report(&compare(reference, candidate, label))
}

fn report(comparison: &Comparison) -> bool {
    if comparison.is_equal() {
        log::info!(
            "TEST SUCCESS: The reference and {} results are equal",
            comparison.label()
        );
        true
    } else {
        if let Some((expected, actual)) = comparison.size_mismatch() {
            log::info!(
                "TEST FAILED: The reference and {} results differ in size ({expected} vs {actual})",
                comparison.label()
            );
        } else {
            log::info!(
                "TEST FAILED: The reference and {} results are NOT equal ({} differing entries)",
                comparison.label(),
                comparison.mismatch_count()
            );
        }
        false
    }
}

fn compare_solved(reference: &Graph<i32>, candidate: &SolvedGraph, label: &str) -> Comparison {
    match candidate {
        SolvedGraph::W8(graph) => compare(reference, graph, label),
        SolvedGraph::W16(graph) => compare(reference, graph, label),
        SolvedGraph::W32(graph) => compare(reference, graph, label),
    }
}

/// Verdict for one kernel family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Agrees with the reference on every entry
    Passed,
    /// Disagrees with the reference
    Failed {
        /// Number of differing entries
        mismatches: usize,
    },
    /// Could not be resolved and did not run
    Skipped {
        /// The resolution error
        reason: String,
    },
}

/// Result of one family within an [`EquivalenceReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyOutcome {
    /// The checked family
    pub family: KernelFamily,
    /// What happened
    pub verdict: Verdict,
    /// Kernel run time, if the kernel ran
    pub timing: Option<Timing>,
}

/// Everything an [`EquivalenceCheck`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceReport {
    /// Vertex count of the checked graph
    pub size: usize,
    /// Seed the graph was generated from
    pub seed: u64,
    /// Run time of the reference kernel
    pub reference_timing: Timing,
    /// One entry per checked family, in request order
    pub outcomes: Vec<FamilyOutcome>,
}

impl EquivalenceReport {
    /// Returns `true` if every family ran and passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| outcome.verdict == Verdict::Passed)
    }

    /// Families that disagreed with the reference.
    pub fn failed(&self) -> impl Iterator<Item = &FamilyOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.verdict, Verdict::Failed { .. }))
    }

    /// Families that could not be resolved.
    pub fn skipped(&self) -> impl Iterator<Item = &FamilyOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.verdict, Verdict::Skipped { .. }))
    }
}

/// Runs every selected kernel on copies of one random graph and checks them against the
/// reference kernel.
#[derive(Debug, Clone)]
pub struct EquivalenceCheck<'r> {
    registry: &'r KernelRegistry,
    size: usize,
    probability: u32,
    bounds: WeightBounds,
    seed: Option<u64>,
    families: Vec<KernelFamily>,
    print_graph: bool,
}

impl<'r> EquivalenceCheck<'r> {
    /// Default vertex count.
    pub const DEFAULT_SIZE: usize = 10;

    /// Checks the three native families on a 10-vertex graph with default bounds.
    #[must_use]
    pub fn new(registry: &'r KernelRegistry) -> Self {
        Self {
            registry,
            size: Self::DEFAULT_SIZE,
            probability: DEFAULT_PROBABILITY,
            bounds: WeightBounds::default(),
            seed: None,
            families: vec![
                KernelFamily::Native8,
                KernelFamily::Native16,
                KernelFamily::Native32,
            ],
            print_graph: false,
        }
    }

    /// Sets the vertex count.
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the edge probability in percent.
    #[must_use]
    pub fn probability(mut self, probability: u32) -> Self {
        self.probability = probability;
        self
    }

    /// Sets the weight bounds.
    #[must_use]
    pub fn bounds(mut self, bounds: WeightBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Makes the generated graph reproducible.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Selects the candidate families compared against the reference.
    #[must_use]
    pub fn families(mut self, families: impl IntoIterator<Item = KernelFamily>) -> Self {
        self.families = families.into_iter().collect();
        self
    }

    /// Renders every graph before and after relaxation.
    #[must_use]
    pub fn print_graph(mut self, print_graph: bool) -> Self {
        self.print_graph = print_graph;
        self
    }

    /// Generates the graph, runs every kernel and compares.
    ///
    /// A candidate that fails to resolve is reported as [`Verdict::Skipped`]; a candidate
    /// that disagrees is reported as [`Verdict::Failed`]. Neither stops the remaining
    /// comparisons.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for an empty family list or bad generation parameters
    /// - [`Error::UnsafeBounds`] if the sentinel could collide with a real path length
    /// - any error of the reference kernel, which is required
    pub fn run(&self) -> Result<EquivalenceReport> {
        if self.families.is_empty() {
            return Err(invalid_argument!("no kernel families selected"));
        }
        self.bounds.ensure_path_safe(self.size)?;

        let mut generator = GraphGenerator::new(self.bounds);
        if let Some(seed) = self.seed {
            generator = generator.seeded(seed);
        }
        let base = generator.generate::<i8>(self.size, self.probability)?;

        let runner = Runner::new(self.registry).print_graph(self.print_graph);

        let mut reference = base.convert::<i32>()?;
        let reference_timing = runner.run(KernelFamily::Reference.name(), &mut reference)?;

        let mut outcomes = Vec::with_capacity(self.families.len());
        for &family in &self.families {
            let outcome = match runner.run_family(family, &base) {
                Ok((solved, timing)) => {
                    let comparison = compare_solved(&reference, &solved, family.label());
                    let verdict = if report(&comparison) {
                        Verdict::Passed
                    } else {
                        Verdict::Failed {
                            mismatches: comparison.mismatch_count(),
                        }
                    };
                    FamilyOutcome {
                        family,
                        verdict,
                        timing: Some(timing),
                    }
                }
                Err(e) if e.is_resolution_failure() => FamilyOutcome {
                    family,
                    verdict: Verdict::Skipped {
                        reason: e.to_string(),
                    },
                    timing: None,
                },
                Err(e) => return Err(e),
            };
            outcomes.push(outcome);
        }

        Ok(EquivalenceReport {
            size: self.size,
            seed: generator.seed(),
            reference_timing,
            outcomes,
        })
    }
}
