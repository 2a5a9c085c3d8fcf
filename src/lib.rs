// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # fwbench
//!
//! All-pairs shortest paths with the Floyd-Warshall algorithm over dense directed graphs,
//! implemented for 8-, 16- and 32-bit integer weights, together with the tooling to check
//! that every width computes the same distances and to measure how long each one takes.
//!
//! ## Features
//!
//! - **Dense graphs** - Row-major adjacency matrices generic over the weight width
//! - **Checked conversion** - Independent width-converted copies, never reinterpreted memory
//! - **Kernel registry** - Name-based dispatch over lazily loaded backend bundles
//! - **Equivalence checking** - Every width compared against an overflow-free reference
//! - **Benchmark campaigns** - Size sweeps with repetitions, aggregated and persisted
//!
//! ## Quick Start
//!
//! ```rust
//! use fwbench::prelude::*;
//!
//! let registry = KernelRegistry::new();
//! let mut graph = GraphGenerator::new(WeightBounds::default())
//!     .seeded(42)
//!     .generate::<i8>(10, 30)?;
//!
//! let timing = Runner::new(&registry).run("FloydWarshallNative8", &mut graph)?;
//! println!("{} ms", timing.millis());
//! # Ok::<(), fwbench::Error>(())
//! ```
//!
//! ## Overflow Safety
//!
//! Missing edges hold a sentinel `INF`. Relaxation only works if no real path can reach
//! it, i.e. `(N - 1) * MAX < INF` for `N` vertices and edge weights up to `MAX`. The
//! [`WeightBounds`] type checks this. The kernels themselves never wrap: the reference
//! kernel accumulates in `i64` and the width-native kernels saturate.
//!
//! ## Architecture
//!
//! - [`graph`] - Graph container, weight types, bounds, generator and text format
//! - [`kernels`] - Kernel implementations, backends and the [`KernelRegistry`]
//! - [`runner`] - Timed invocation of a single kernel
//! - [`verify`] - Result comparison and the multi-kernel [`EquivalenceCheck`]
//! - [`benchmark`] - [`Campaign`]s over size sweeps and their [`CampaignResults`]

#[macro_use]
pub(crate) mod error;

#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
pub mod prelude;

/// Graph container, weight types and graph generation.
///
/// # Key Components
///
/// - [`Graph`] - Dense row-major adjacency matrix
/// - [`Weight`] / [`WeightWidth`] - Supported integer weight types
/// - [`WeightBounds`] - Edge weight range, sentinel and overflow checks
/// - [`GraphGenerator`] - Seedable random graph generation
/// - [`graph::io`] - The plain text graph format
pub mod graph;

/// Shortest-path kernels and name-based kernel lookup.
pub mod kernels;

/// Timed kernel execution.
pub mod runner;

/// Comparing shortest-path results across weight widths.
pub mod verify;

/// Benchmark campaigns over graph size sweeps.
pub mod benchmark;

/// `fwbench` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `fwbench` Error type
///
/// # Examples
///
/// ```rust
/// use fwbench::{Error, KernelRegistry};
///
/// let registry = KernelRegistry::new();
/// match registry.resolve::<i8>("FloydWarshallNative32") {
///     Err(Error::WidthMismatch { found, .. }) => println!("kernel uses {found} weights"),
///     Err(e) => println!("Error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
pub use error::Error;

pub use benchmark::{Campaign, CampaignConfig, CampaignResults};
pub use graph::{Graph, GraphGenerator, Weight, WeightBounds, WeightWidth};
pub use kernels::{BackendBundle, KernelFamily, KernelRegistry};
pub use runner::{Runner, SolvedGraph, Timing};
pub use verify::{EquivalenceCheck, EquivalenceReport};
