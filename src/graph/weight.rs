//! Integer weight domains for adjacency matrices.
//!
//! Every kernel family works on one signed integer width. The [`Weight`] trait captures what
//! the rest of the crate needs from such a type: checked conversion through a common `i64`
//! domain, overflow-free addition, and a way to pick the matching function pointer out of
//! an [`AnyKernel`].
//!
//! The trait is sealed and implemented for `i8`, `i16` and `i32` only.

use std::fmt;

use strum::{Display, EnumCount, EnumIter};

use crate::kernels::{AnyKernel, Kernel};

mod sealed {
    pub trait Sealed {}
}

/// Bit width of a weight type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount)]
pub enum WeightWidth {
    /// `i8` weights
    #[strum(to_string = "8-bit")]
    W8,
    /// `i16` weights
    #[strum(to_string = "16-bit")]
    W16,
    /// `i32` weights
    #[strum(to_string = "32-bit")]
    W32,
}

impl WeightWidth {
    /// Number of bits per weight.
    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            WeightWidth::W8 => 8,
            WeightWidth::W16 => 16,
            WeightWidth::W32 => 32,
        }
    }
}

/// A signed integer type usable as edge weight and distance.
pub trait Weight:
    sealed::Sealed
    + Copy
    + Ord
    + Default
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
    /// The width tag of this type.
    const WIDTH: WeightWidth;
    /// Additive identity, used for the diagonal.
    const ZERO: Self;
    /// Largest representable value.
    const MAX: Self;

    /// Lossless conversion into the common comparison domain.
    fn widen(self) -> i64;

    /// Checked conversion out of the common domain.
    fn narrow(value: i64) -> Option<Self>;

    /// Addition that clamps to [`Weight::MAX`] instead of wrapping.
    #[must_use]
    fn saturating_add(self, rhs: Self) -> Self;

    /// Extracts the kernel for this width, if `kernel` has it.
    fn select(kernel: AnyKernel) -> Option<Kernel<Self>>;

    /// Wraps a kernel of this width into the width-erased form.
    fn erase(kernel: Kernel<Self>) -> AnyKernel;
}

macro_rules! impl_weight {
    ($ty:ty, $width:ident) => {
        impl sealed::Sealed for $ty {}

        impl Weight for $ty {
            const WIDTH: WeightWidth = WeightWidth::$width;
            const ZERO: Self = 0;
            const MAX: Self = <$ty>::MAX;

            #[inline]
            fn widen(self) -> i64 {
                i64::from(self)
            }

            #[inline]
            fn narrow(value: i64) -> Option<Self> {
                <$ty>::try_from(value).ok()
            }

            #[inline]
            fn saturating_add(self, rhs: Self) -> Self {
                <$ty>::saturating_add(self, rhs)
            }

            fn select(kernel: AnyKernel) -> Option<Kernel<Self>> {
                match kernel {
                    AnyKernel::$width(k) => Some(k),
                    _ => None,
                }
            }

            fn erase(kernel: Kernel<Self>) -> AnyKernel {
                AnyKernel::$width(kernel)
            }
        }
    };
}

impl_weight!(i8, W8);
impl_weight!(i16, W16);
impl_weight!(i32, W32);

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_widths() {
        assert_eq!(<i8 as Weight>::WIDTH, WeightWidth::W8);
        assert_eq!(<i16 as Weight>::WIDTH, WeightWidth::W16);
        assert_eq!(<i32 as Weight>::WIDTH, WeightWidth::W32);

        let bits: Vec<u32> = WeightWidth::iter().map(WeightWidth::bits).collect();
        assert_eq!(bits, vec![8, 16, 32]);
        assert_eq!(WeightWidth::W16.to_string(), "16-bit");
    }

    #[test]
    fn test_narrow_checked() {
        assert_eq!(i8::narrow(99), Some(99));
        assert_eq!(i8::narrow(128), None);
        assert_eq!(i8::narrow(-129), None);
        assert_eq!(i16::narrow(i64::from(i16::MAX)), Some(i16::MAX));
        assert_eq!(i32::narrow(i64::from(i32::MAX) + 1), None);
    }

    #[test]
    fn test_saturating_add() {
        assert_eq!(Weight::saturating_add(99i8, 99i8), i8::MAX);
        assert_eq!(Weight::saturating_add(3i8, 4i8), 7);
        assert_eq!(Weight::saturating_add(i32::MAX, 1i32), i32::MAX);
    }
}
