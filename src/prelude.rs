//! # fwbench Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the fwbench library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all fwbench operations
pub use crate::Error;

/// The result type used throughout fwbench
pub use crate::Result;

// ================================================================================================
// Graphs
// ================================================================================================

/// Dense adjacency matrix and its weight types
pub use crate::graph::{Graph, Weight, WeightWidth};

/// Edge weight range and sentinel
pub use crate::graph::{WeightBounds, DEFAULT_INF, DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT};

/// Random graph generation
pub use crate::graph::{GraphGenerator, DEFAULT_PROBABILITY};

// ================================================================================================
// Kernels and Execution
// ================================================================================================

/// Kernel catalog and lookup
pub use crate::kernels::{AnyKernel, BackendBundle, Kernel, KernelFamily, KernelRegistry};

/// Backend boundary for custom kernel bundles
pub use crate::kernels::{KernelBackend, StaticBackend};

/// Timed execution
pub use crate::runner::{Runner, SolvedGraph, Timing};

// ================================================================================================
// Verification and Benchmarking
// ================================================================================================

/// Result comparison
pub use crate::verify::{compare, verify, Comparison, EquivalenceCheck, EquivalenceReport, Verdict};

/// Benchmark campaigns
pub use crate::benchmark::{Campaign, CampaignConfig, CampaignResults, SizeSweep};
