//! Legal edge-weight range and the "no edge" sentinel.
//!
//! The sentinel only works if no legal path sum can reach it. A shortest path visits each
//! vertex at most once, so it has at most `size - 1` edges, and the longest legal distance
//! is `(size - 1) * max`. [`WeightBounds::ensure_path_safe`] checks exactly that, and
//! [`WeightBounds::validate`] checks that the sentinel itself fits the weight type.
//!
//! Kernels never wrap (see [`crate::kernels`]), so violating the path bound does not corrupt
//! memory or produce garbage. It does make long paths look unreachable, which is why the
//! equivalence check refuses to run under unsafe bounds.

use crate::{graph::Weight, Error, Result};

/// Default smallest edge weight.
pub const DEFAULT_MIN_WEIGHT: i64 = 1;
/// Default largest edge weight.
pub const DEFAULT_MAX_WEIGHT: i64 = 10;
/// Default sentinel for "no edge".
pub const DEFAULT_INF: i64 = 99;

/// Edge-weight range `[min, max]` and the sentinel `inf`.
///
/// Values are kept in the common `i64` domain, so the same bounds can drive graphs of every
/// width. The sentinel is identical across widths, which keeps converted copies comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightBounds {
    min: i64,
    max: i64,
    inf: i64,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_WEIGHT,
            max: DEFAULT_MAX_WEIGHT,
            inf: DEFAULT_INF,
        }
    }
}

impl WeightBounds {
    /// Creates bounds after checking `1 <= min <= max < inf`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the range is empty, not positive, or not below
    /// the sentinel.
    pub fn new(min: i64, max: i64, inf: i64) -> Result<Self> {
        if min < 1 {
            return Err(invalid_argument!("minimum edge weight must be positive, got {min}"));
        }
        if max < min {
            return Err(invalid_argument!(
                "maximum edge weight {max} is below the minimum {min}"
            ));
        }
        if inf <= max {
            return Err(invalid_argument!(
                "sentinel {inf} must be larger than the maximum edge weight {max}"
            ));
        }
        Ok(Self { min, max, inf })
    }

    /// Smallest legal edge weight.
    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Largest legal edge weight.
    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// The "no edge" sentinel.
    #[must_use]
    pub fn inf(&self) -> i64 {
        self.inf
    }

    /// Checks that the sentinel is representable in `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `inf` exceeds `T::MAX`.
    pub fn validate<T: Weight>(&self) -> Result<()> {
        if T::narrow(self.inf).is_none() {
            return Err(invalid_argument!(
                "sentinel {} does not fit into {} weights",
                self.inf,
                T::WIDTH
            ));
        }
        Ok(())
    }

    /// The sentinel in `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `inf` exceeds `T::MAX`.
    pub fn inf_as<T: Weight>(&self) -> Result<T> {
        self.validate::<T>()?;
        T::narrow(self.inf).ok_or_else(|| invalid_argument!("sentinel {} out of range", self.inf))
    }

    /// Returns `true` if every legal path sum on `size` vertices stays below the sentinel.
    #[must_use]
    pub fn is_path_safe(&self, size: usize) -> bool {
        let edges = i64::try_from(size.saturating_sub(1)).unwrap_or(i64::MAX);
        edges
            .checked_mul(self.max)
            .is_some_and(|longest| longest < self.inf)
    }

    /// Fails unless every legal path sum on `size` vertices stays below the sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsafeBounds`] if `(size - 1) * max >= inf`.
    pub fn ensure_path_safe(&self, size: usize) -> Result<()> {
        if self.is_path_safe(size) {
            Ok(())
        } else {
            Err(Error::UnsafeBounds {
                size,
                max: self.max,
                inf: self.inf,
            })
        }
    }

    /// Largest vertex count for which these bounds are path safe.
    #[must_use]
    pub fn max_safe_size(&self) -> usize {
        // (n - 1) * max < inf  <=>  n - 1 <= (inf - 1) / max
        usize::try_from((self.inf - 1) / self.max)
            .map_or(usize::MAX, |edges| edges.saturating_add(1))
    }

    /// Largest edge weight that keeps `size` vertices path safe under this sentinel.
    ///
    /// Returns `None` if not even `min` is small enough.
    #[must_use]
    pub fn widest_safe_max(&self, size: usize) -> Option<i64> {
        let edges = i64::try_from(size.saturating_sub(1)).ok()?;
        let widest = if edges == 0 {
            self.inf - 1
        } else {
            (self.inf - 1) / edges
        };
        (widest >= self.min).then_some(widest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let bounds = WeightBounds::default();
        assert_eq!(bounds.min(), 1);
        assert_eq!(bounds.max(), 10);
        assert_eq!(bounds.inf(), 99);
        assert!(bounds.validate::<i8>().is_ok());
        assert_eq!(bounds.inf_as::<i8>().unwrap(), 99i8);
    }

    #[test]
    fn test_new_rejects_bad_ranges() {
        assert!(matches!(
            WeightBounds::new(0, 10, 99),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            WeightBounds::new(5, 4, 99),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            WeightBounds::new(1, 99, 99),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sentinel_must_fit_width() {
        let bounds = WeightBounds::new(1, 10, 1000).unwrap();
        assert!(bounds.validate::<i8>().is_err());
        assert!(bounds.validate::<i16>().is_ok());
        assert!(bounds.validate::<i32>().is_ok());
    }

    #[test]
    fn test_path_safety() {
        let bounds = WeightBounds::default();
        // 9 edges * 10 = 90 < 99, 10 edges * 10 = 100 >= 99
        assert!(bounds.is_path_safe(10));
        assert!(!bounds.is_path_safe(11));
        assert_eq!(bounds.max_safe_size(), 10);
        assert!(bounds.ensure_path_safe(1).is_ok());
        assert!(matches!(
            bounds.ensure_path_safe(32),
            Err(Error::UnsafeBounds {
                size: 32,
                max: 10,
                inf: 99
            })
        ));
    }

    #[test]
    fn test_widest_safe_max() {
        let bounds = WeightBounds::default();
        // 31 edges: 98 / 31 = 3, and 31 * 3 = 93 < 99
        assert_eq!(bounds.widest_safe_max(32), Some(3));
        assert_eq!(bounds.widest_safe_max(1), Some(98));
        assert_eq!(bounds.widest_safe_max(200), None);

        let tuned = WeightBounds::new(1, 3, 99).unwrap();
        assert!(tuned.is_path_safe(32));
    }
}
