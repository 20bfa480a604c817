//! Ordered, growable sequences of [`Complex`] values.
//!
//! Position in a [`ComplexSequence`] is meaningful: it is the sample index of
//! a curve or the bin index of a spectrum.

use alloc::vec::Vec;
use core::fmt;

use crate::error::FourierError;
use crate::num::Complex;

/// Sequences at least this long render as a truncated preview.
const PREVIEW_THRESHOLD: usize = 100;
/// Leading elements shown in a truncated preview.
const PREVIEW_HEAD: usize = 5;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplexSequence {
    values: Vec<Complex>,
}

impl ComplexSequence {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            values: Vec::with_capacity(n),
        }
    }

    pub fn zeros(n: usize) -> Self {
        Self {
            values: alloc::vec![Complex::zero(); n],
        }
    }

    pub fn from_real(re: &[f64]) -> Self {
        re.iter().map(|&x| Complex::from_real(x)).collect()
    }

    /// Pair up parallel real and imaginary arrays.
    pub fn from_parts(re: &[f64], im: &[f64]) -> Result<Self, FourierError> {
        if re.len() != im.len() {
            return Err(FourierError::UnequalLengths {
                re: re.len(),
                im: im.len(),
            });
        }
        Ok(re
            .iter()
            .zip(im.iter())
            .map(|(&r, &i)| Complex::new(r, i))
            .collect())
    }

    /// `n` real values evenly spaced from `start` to `end`, both inclusive.
    ///
    /// Each point is computed from its index rather than by accumulation,
    /// and the last point is exactly `end`.
    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self, FourierError> {
        if n < 2 {
            return Err(FourierError::DegenerateLinspace(n));
        }
        let step = (end - start) / (n - 1) as f64;
        let mut out = Self::with_capacity(n);
        for i in 0..n - 1 {
            out.push(Complex::from_real(start + step * i as f64));
        }
        out.push(Complex::from_real(end));
        Ok(out)
    }

    pub fn push(&mut self, z: Complex) {
        self.values.push(z);
    }

    pub fn push_parts(&mut self, re: f64, im: f64) {
        self.values.push(Complex::new(re, im));
    }

    pub fn get(&self, index: usize) -> Result<&Complex, FourierError> {
        let len = self.values.len();
        self.values
            .get(index)
            .ok_or(FourierError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Complex, FourierError> {
        let len = self.values.len();
        self.values
            .get_mut(index)
            .ok_or(FourierError::IndexOutOfRange { index, len })
    }

    pub fn set(&mut self, index: usize, z: Complex) -> Result<(), FourierError> {
        *self.get_mut(index)? = z;
        Ok(())
    }

    pub fn first(&self) -> Option<&Complex> {
        self.values.first()
    }

    pub fn last(&self) -> Option<&Complex> {
        self.values.last()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Complex> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Complex> {
        self.values.iter_mut()
    }

    pub fn as_slice(&self) -> &[Complex] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<Complex> {
        self.values
    }

    /// Apply `f` element-wise into a new sequence.
    pub fn map<F: FnMut(Complex) -> Complex>(&self, f: F) -> Self {
        self.values.iter().copied().map(f).collect()
    }

    /// Exchange the values stored at `i` and `j` with [`Complex::swap`].
    pub fn swap_entries(&mut self, i: usize, j: usize) -> Result<(), FourierError> {
        let len = self.values.len();
        for index in [i, j] {
            if index >= len {
                return Err(FourierError::IndexOutOfRange { index, len });
            }
        }
        if i == j {
            return Ok(());
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let (head, tail) = self.values.split_at_mut(hi);
        Complex::swap(&mut head[lo], &mut tail[0]);
        Ok(())
    }
}

impl From<Vec<Complex>> for ComplexSequence {
    fn from(values: Vec<Complex>) -> Self {
        Self { values }
    }
}

impl From<&[Complex]> for ComplexSequence {
    fn from(values: &[Complex]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }
}

impl From<ComplexSequence> for Vec<Complex> {
    fn from(seq: ComplexSequence) -> Self {
        seq.values
    }
}

impl FromIterator<Complex> for ComplexSequence {
    fn from_iter<I: IntoIterator<Item = Complex>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<Complex> for ComplexSequence {
    fn extend<I: IntoIterator<Item = Complex>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl IntoIterator for ComplexSequence {
    type Item = Complex;
    type IntoIter = alloc::vec::IntoIter<Complex>;
    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComplexSequence {
    type Item = &'a Complex;
    type IntoIter = core::slice::Iter<'a, Complex>;
    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Full listing below 100 elements; longer sequences show the first five,
/// an ellipsis and the last element.
impl fmt::Display for ComplexSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.values.len();
        f.write_str("[")?;
        if n < PREVIEW_THRESHOLD {
            for (i, z) in self.values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", z)?;
            }
        } else {
            for z in &self.values[..PREVIEW_HEAD] {
                write!(f, "{}, ", z)?;
            }
            write!(f, "..., {}", self.values[n - 1])?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_small_sequences() {
        assert_eq!(ComplexSequence::new().to_string(), "[]");
        assert_eq!(
            ComplexSequence::from_real(&[1.0, 2.0, 3.0]).to_string(),
            "[1.0, 2.0, 3.0]"
        );
        let z = ComplexSequence::from_parts(&[0.0; 6], &[0.0, 0.25, 0.5, 0.75, 1.0, 1.25]).unwrap();
        assert_eq!(z.to_string(), "[0, 0.25i, 0.5i, 0.75i, 1.0i, 1.25i]");
    }

    #[test]
    fn display_truncates_long_sequences() {
        let seq: ComplexSequence = (0..100).map(|i| Complex::from_real(i as f64)).collect();
        assert_eq!(seq.to_string(), "[0, 1.0, 2.0, 3.0, 4.0, ..., 99.0]");
        let short: ComplexSequence = (0..99).map(|i| Complex::from_real(i as f64)).collect();
        assert!(short.to_string().ends_with("97.0, 98.0]"));
    }

    #[test]
    fn swap_entries_reorders_in_place() {
        let mut z = ComplexSequence::from_parts(&[1.0, 2.0, 3.0], &[-1.0, 1.0, 10.0]).unwrap();
        z.swap_entries(0, 2).unwrap();
        assert_eq!(z.to_string(), "[3.0 + 10.0i, 2.0 + 1.0i, 1.0 - 1.0i]");
        assert_eq!(
            z.swap_entries(0, 3),
            Err(FourierError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn unequal_parts_rejected() {
        assert_eq!(
            ComplexSequence::from_parts(&[0.0; 5], &[0.0; 3]),
            Err(FourierError::UnequalLengths { re: 5, im: 3 })
        );
    }

    #[test]
    fn get_out_of_range() {
        let seq = ComplexSequence::zeros(2);
        assert!(seq.get(1).is_ok());
        assert_eq!(
            seq.get(2),
            Err(FourierError::IndexOutOfRange { index: 2, len: 2 })
        );
    }
}
