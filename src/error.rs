//! Error kinds shared by the complex arithmetic, sequence, transform and
//! epicycle modules.

use core::fmt;

/// Errors reported by this crate.
///
/// Every variant signals a violated input contract. None of them are
/// transient, so callers should validate inputs (for example with
/// [`crate::fft::is_supported_size`]) instead of retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourierError {
    /// Complex division or inversion by an operand of zero magnitude.
    DivisionByZero,
    /// Real and imaginary component arrays differ in length.
    UnequalLengths { re: usize, im: usize },
    /// Sequence access outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// The fast transform was asked for a length outside its supported set.
    UnsupportedTransformSize(usize),
    /// `linspace` needs at least two points.
    DegenerateLinspace(usize),
    /// An epicycle engine cannot be built from an empty curve.
    EmptyInput,
    /// `points_per_interval · len` does not fit in a `usize`.
    PeriodOverflow { points_per_interval: usize, len: usize },
}

impl fmt::Display for FourierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FourierError::DivisionByZero => write!(f, "division by a zero-magnitude complex number"),
            FourierError::UnequalLengths { re, im } => write!(
                f,
                "real and imaginary parts differ in length ({} vs {})",
                re, im
            ),
            FourierError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for sequence of length {}", index, len)
            }
            FourierError::UnsupportedTransformSize(n) => {
                write!(f, "fast transform does not support length {}", n)
            }
            FourierError::DegenerateLinspace(n) => {
                write!(f, "linspace needs at least 2 points, got {}", n)
            }
            FourierError::EmptyInput => write!(f, "input curve is empty"),
            FourierError::PeriodOverflow {
                points_per_interval,
                len,
            } => write!(
                f,
                "period of {} ticks per point over {} points overflows",
                points_per_interval, len
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FourierError {}
