//! Floyd-Warshall kernels and name-based dispatch.
//!
//! A kernel is a plain function over a contiguous row-major matrix:
//!
//! ```text
//! fn(graph: &mut [T], size: usize)
//! ```
//!
//! On return the buffer holds all-pairs shortest distances. Every kernel runs the same loop
//! nest, so timings differ only by weight width and arithmetic:
//!
//! ```text
//! for k in 0..n { for j in 0..n { for i in 0..n {
//!     candidate = d[i][k] + d[k][j]
//!     if d[i][j] > candidate { d[i][j] = candidate }
//! }}}
//! ```
//!
//! # Kernel Families
//!
//! | Identifier | Width | Bundle | Arithmetic |
//! |------------|-------|--------|------------|
//! | `FloydWarshallReference` | 32-bit | `reference` | `i64` accumulator |
//! | `FloydWarshallNative8` | 8-bit | `native` | saturating `i8` |
//! | `FloydWarshallNative16` | 16-bit | `native` | saturating `i16` |
//! | `FloydWarshallNative32` | 32-bit | `native` | saturating `i32` |
//!
//! Neither strategy can wrap around. A saturated sum is `T::MAX`, which is never below a
//! stored value, so it is simply not taken.
//!
//! # Dispatch
//!
//! Kernels are grouped into backend bundles and looked up by name through the
//! [`KernelRegistry`]. Bundles are loaded lazily, once, and cached.

mod backend;
mod native;
mod reference;
mod registry;

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

pub use backend::{native_backend, reference_backend, KernelBackend, StaticBackend};
pub use native::floyd_warshall_saturating;
pub use reference::floyd_warshall_reference;
pub use registry::{BackendLoader, KernelRegistry, KernelRegistryBuilder};

use crate::graph::WeightWidth;

/// A shortest-path kernel for weights of type `T`.
pub type Kernel<T> = fn(&mut [T], usize);

/// A kernel with its weight width erased, as exported by a backend.
#[derive(Clone, Copy)]
pub enum AnyKernel {
    /// Kernel over `i8` weights
    W8(Kernel<i8>),
    /// Kernel over `i16` weights
    W16(Kernel<i16>),
    /// Kernel over `i32` weights
    W32(Kernel<i32>),
}

impl AnyKernel {
    /// Width the wrapped kernel operates on.
    #[must_use]
    pub fn width(&self) -> WeightWidth {
        match self {
            AnyKernel::W8(_) => WeightWidth::W8,
            AnyKernel::W16(_) => WeightWidth::W16,
            AnyKernel::W32(_) => WeightWidth::W32,
        }
    }
}

impl std::fmt::Debug for AnyKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AnyKernel({})", self.width())
    }
}

/// A group of kernels that is loaded as one unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum BackendBundle {
    /// The in-process reference implementation
    Reference,
    /// Width-specialised kernels with native arithmetic
    Native,
}

/// The catalog of known kernels.
///
/// The string form of each variant is its stable procedure identifier, e.g.
/// `"FloydWarshallNative8"`, and parses back with [`std::str::FromStr`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    EnumCount,
    AsRefStr,
    IntoStaticStr,
)]
pub enum KernelFamily {
    /// The reference implementation, 32-bit weights, wide accumulator
    #[strum(serialize = "FloydWarshallReference")]
    Reference,
    /// Native 8-bit kernel
    #[strum(serialize = "FloydWarshallNative8")]
    Native8,
    /// Native 16-bit kernel
    #[strum(serialize = "FloydWarshallNative16")]
    Native16,
    /// Native 32-bit kernel
    #[strum(serialize = "FloydWarshallNative32")]
    Native32,
}

impl KernelFamily {
    /// Stable procedure identifier used for lookup.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Weight width this family operates on.
    #[must_use]
    pub fn width(self) -> WeightWidth {
        match self {
            KernelFamily::Native8 => WeightWidth::W8,
            KernelFamily::Native16 => WeightWidth::W16,
            KernelFamily::Reference | KernelFamily::Native32 => WeightWidth::W32,
        }
    }

    /// Bundle that provides this family.
    #[must_use]
    pub fn bundle(self) -> BackendBundle {
        match self {
            KernelFamily::Reference => BackendBundle::Reference,
            KernelFamily::Native8 | KernelFamily::Native16 | KernelFamily::Native32 => {
                BackendBundle::Native
            }
        }
    }

    /// Human readable label, used in logs and reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            KernelFamily::Reference => "reference",
            KernelFamily::Native8 => "8-bit weights",
            KernelFamily::Native16 => "16-bit weights",
            KernelFamily::Native32 => "32-bit weights",
        }
    }

    /// File stem for persisted benchmark series.
    #[must_use]
    pub fn file_stem(self) -> &'static str {
        match self {
            KernelFamily::Reference => "reference",
            KernelFamily::Native8 => "native8",
            KernelFamily::Native16 => "native16",
            KernelFamily::Native32 => "native32",
        }
    }

    /// Looks up a family by its procedure identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownKernel`] if `name` is not in the catalog.
    pub fn from_name(name: &str) -> crate::Result<Self> {
        name.parse()
            .map_err(|_| crate::Error::UnknownKernel(name.to_string()))
    }
}
