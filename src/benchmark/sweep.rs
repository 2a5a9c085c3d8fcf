//! Arithmetic size sweeps.

use crate::Result;

/// The sizes `min, min + step, ...` that do not exceed `max`.
///
/// The number of sizes is `(max - min) / step + 1`, rounded down. `max` itself is only
/// included when it lies on the grid.
///
/// # Examples
///
/// ```rust
/// use fwbench::benchmark::SizeSweep;
///
/// let sweep = SizeSweep::new(512, 1280, 32)?;
/// assert_eq!(sweep.len(), 25);
/// assert_eq!(sweep.iter().last(), Some(1280));
/// # Ok::<(), fwbench::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSweep {
    min: usize,
    max: usize,
    step: usize,
}

impl SizeSweep {
    /// Creates a sweep.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `min` or `step` is zero, or if
    /// `max < min`.
    pub fn new(min: usize, max: usize, step: usize) -> Result<Self> {
        if min == 0 {
            return Err(invalid_argument!("minimum size must be at least 1"));
        }
        if step == 0 {
            return Err(invalid_argument!("step must be at least 1"));
        }
        if max < min {
            return Err(invalid_argument!(
                "maximum size {} is below minimum size {}",
                max,
                min
            ));
        }
        Ok(Self { min, max, step })
    }

    /// Number of sizes in the sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.max - self.min) / self.step + 1
    }

    /// Always `false`; a valid sweep holds at least `min`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Largest size actually visited.
    #[must_use]
    pub fn last(&self) -> usize {
        self.min + (self.len() - 1) * self.step
    }

    /// Iterates the sizes in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        (self.min..=self.max).step_by(self.step)
    }
}

impl IntoIterator for SizeSweep {
    type Item = usize;
    type IntoIter = std::iter::StepBy<std::ops::RangeInclusive<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        (self.min..=self.max).step_by(self.step)
    }
}
