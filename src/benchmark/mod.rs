//! Benchmark campaigns: timing every kernel family across a sweep of graph sizes.
//!
//! A [`Campaign`] repeats, for each repetition and each size of a [`SizeSweep`], the same
//! steps: generate a fresh random graph, derive an independent copy per kernel width, run
//! every selected kernel once and record its time. Samples are aggregated per
//! `(family, size)` in [`CampaignResults`], which also writes the per-family result files.
//!
//! # Failure Policy
//!
//! Kernels that cannot be resolved produce missing samples, which count as zero in the
//! mean. Invalid configuration and generation errors abort the campaign. Unsafe weight
//! bounds are only reported, since timing does not depend on the computed distances.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fwbench::{
//!     benchmark::{Campaign, CampaignConfig},
//!     KernelFamily, KernelRegistry,
//! };
//!
//! let registry = KernelRegistry::new();
//! let results = Campaign::new(&registry, CampaignConfig::quick()).run()?;
//! for (size, mean) in results.series(KernelFamily::Native8) {
//!     println!("{size}: {mean} ms");
//! }
//! results.persist("results")?;
//! # Ok::<(), fwbench::Error>(())
//! ```

mod results;
mod sweep;

use std::collections::BTreeSet;

use strum::IntoEnumIterator;

pub use results::{Aggregate, CampaignResults, Sample};
pub use sweep::SizeSweep;

use crate::{
    graph::{GraphGenerator, WeightBounds, DEFAULT_PROBABILITY},
    kernels::{KernelFamily, KernelRegistry},
    runner::Runner,
    Result,
};

/// Parameters of a benchmark campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignConfig {
    /// Smallest graph size
    pub min_size: usize,
    /// Largest graph size, included when on the step grid
    pub max_size: usize,
    /// Distance between consecutive sizes
    pub step: usize,
    /// Number of passes over the whole sweep
    pub repetitions: usize,
    /// Edge probability in percent
    pub probability: u32,
    /// Edge weight range and sentinel
    pub bounds: WeightBounds,
    /// Seed for reproducible graphs, random if `None`
    pub seed: Option<u64>,
    /// Families to time
    pub families: Vec<KernelFamily>,
}

impl Default for CampaignConfig {
    /// Sizes 512 to 1280 in steps of 32, 100 repetitions, every family.
    fn default() -> Self {
        Self {
            min_size: 512,
            max_size: 1280,
            step: 32,
            repetitions: 100,
            probability: DEFAULT_PROBABILITY,
            bounds: WeightBounds::default(),
            seed: None,
            families: KernelFamily::iter().collect(),
        }
    }
}

impl CampaignConfig {
    /// A small campaign that finishes in well under a second.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            min_size: 16,
            max_size: 64,
            step: 16,
            repetitions: 3,
            ..Self::default()
        }
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for a zero minimum size or step, a maximum
    /// below the minimum, zero repetitions, a probability above 100, an empty family
    /// list, or bounds that do not fit 8-bit weights.
    pub fn validate(&self) -> Result<()> {
        self.sweep()?;
        if self.repetitions == 0 {
            return Err(invalid_argument!("repetitions must be at least 1"));
        }
        if self.probability > 100 {
            return Err(invalid_argument!(
                "probability {} is above 100",
                self.probability
            ));
        }
        if self.families.is_empty() {
            return Err(invalid_argument!("no kernel families selected"));
        }
        self.bounds.validate::<i8>()
    }

    /// The size sweep described by `min_size`, `max_size` and `step`.
    ///
    /// # Errors
    ///
    /// See [`SizeSweep::new`].
    pub fn sweep(&self) -> Result<SizeSweep> {
        SizeSweep::new(self.min_size, self.max_size, self.step)
    }
}

/// Runs a [`CampaignConfig`] against a registry.
#[derive(Debug)]
pub struct Campaign<'r> {
    registry: &'r KernelRegistry,
    config: CampaignConfig,
}

impl<'r> Campaign<'r> {
    /// Creates a campaign. Nothing runs until [`Campaign::run`].
    #[must_use]
    pub fn new(registry: &'r KernelRegistry, config: CampaignConfig) -> Self {
        Self { registry, config }
    }

    /// The campaign parameters.
    #[must_use]
    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    /// Runs every repetition over every size.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for a bad configuration and propagates
    /// generation and conversion errors. Kernel resolution errors are recorded as missing
    /// samples instead.
    pub fn run(&self) -> Result<CampaignResults> {
        let config = &self.config;
        config.validate()?;
        let sweep = config.sweep()?;

        let mut generator = GraphGenerator::new(config.bounds);
        if let Some(seed) = config.seed {
            generator = generator.seeded(seed);
        }
        log::debug!(
            "Campaign over {} sizes, {} repetitions, seed {}",
            sweep.len(),
            config.repetitions,
            generator.seed()
        );

        let runner = Runner::new(self.registry);
        let mut results = CampaignResults::new(config.repetitions);
        let mut warned = BTreeSet::new();

        for repetition in 0..config.repetitions {
            log::info!("Repetition: {repetition}");
            for size in sweep {
                log::info!("Test for: {size}");
                if !config.bounds.is_path_safe(size) && warned.insert(size) {
                    log::warn!(
                        "{}",
                        crate::Error::UnsafeBounds {
                            size,
                            max: config.bounds.max(),
                            inf: config.bounds.inf(),
                        }
                    );
                }

                let base = generator.generate::<i8>(size, config.probability)?;
                for &family in &config.families {
                    let elapsed_ms = match runner.run_family(family, &base) {
                        Ok((_, timing)) => Some(timing.millis()),
                        Err(e) if e.is_resolution_failure() => None,
                        Err(e) => return Err(e),
                    };
                    results.record(Sample {
                        family,
                        size,
                        repetition,
                        elapsed_ms,
                    });
                }
            }
        }

        Ok(results)
    }
}
