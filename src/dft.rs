//! Direct (O(N²)) discrete Fourier transform and the bin-to-frequency map.
//!
//! The direct transform is normalized and uses a **positive** exponent:
//!
//! ```text
//! X[k] = (1/N) · Σ x[n] · exp(+j·2π·k·n/N)
//! ```
//!
//! The epicycle synthesizer rotates each bin with the opposite sign, so the
//! pair resynthesizes the input. The fast transform in [`crate::fft`] uses
//! the same sign but skips the `1/N` factor.

use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use core::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::OnceLock;

use crate::error::FourierError;
use crate::num::{Complex, TAU};
use crate::sequence::ComplexSequence;

/// Inputs shorter than this are transformed on the calling thread.
#[cfg(feature = "parallel")]
pub const DEFAULT_PARALLEL_DFT_THRESHOLD: usize = 512;

/// `0` means no override.
#[cfg(feature = "parallel")]
static PARALLEL_DFT_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
#[cfg(feature = "parallel")]
static PARALLEL_DFT_THRESHOLD: OnceLock<usize> = OnceLock::new();

#[cfg(feature = "parallel")]
/// Set a custom minimum length for evaluating bins in parallel.
///
/// Passing `0` reverts to `EPICYCLES_PAR_DFT_THRESHOLD` or the built-in
/// default.
pub fn set_parallel_dft_threshold(threshold: usize) {
    PARALLEL_DFT_THRESHOLD_OVERRIDE.store(threshold, Ordering::Relaxed);
}

/// Minimum input length at which bins are evaluated on the Rayon pool.
#[cfg(feature = "parallel")]
pub fn parallel_dft_threshold() -> usize {
    let override_thr = PARALLEL_DFT_THRESHOLD_OVERRIDE.load(Ordering::Relaxed);
    if override_thr != 0 {
        return override_thr;
    }
    *PARALLEL_DFT_THRESHOLD.get_or_init(|| {
        std::env::var("EPICYCLES_PAR_DFT_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&v| v != 0)
            .unwrap_or(DEFAULT_PARALLEL_DFT_THRESHOLD)
    })
}

#[inline]
fn dft_bin(input: &[Complex], k: usize) -> Complex {
    let n = input.len();
    let angle = TAU / n as f64;
    let mut acc = Complex::zero();
    // Running (k * j) mod n; the product itself would overflow a 32-bit usize.
    let mut idx = 0;
    for x in input {
        acc.add_by(x.mul(Complex::expi(idx as f64 * angle)));
        idx = (idx + k) % n;
    }
    acc.scale(1.0 / n as f64)
}

/// Normalized, positive-exponent DFT of `input`. Empty input yields an empty
/// spectrum.
pub fn direct_transform(input: &ComplexSequence) -> ComplexSequence {
    direct_transform_slice(input.as_slice()).into()
}

/// Slice form of [`direct_transform`].
pub fn direct_transform_slice(input: &[Complex]) -> Vec<Complex> {
    let n = input.len();
    #[cfg(feature = "parallel")]
    {
        if n >= parallel_dft_threshold() {
            return (0..n).into_par_iter().map(|k| dft_bin(input, k)).collect();
        }
    }
    (0..n).map(|k| dft_bin(input, k)).collect()
}

/// Signed frequency of every bin of an `n`-point transform in natural
/// (unshifted) order: `0, 1, …, ⌈n/2⌉−1, −⌊n/2⌋, …, −1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    freqs: Vec<i64>,
}

impl FrequencyTable {
    pub fn new(n: usize) -> Self {
        let freqs = (0..n)
            .map(|k| {
                if 2 * k < n {
                    k as i64
                } else {
                    k as i64 - n as i64
                }
            })
            .collect();
        Self { freqs }
    }

    pub fn get(&self, k: usize) -> Result<i64, FourierError> {
        self.freqs
            .get(k)
            .copied()
            .ok_or(FourierError::IndexOutOfRange {
                index: k,
                len: self.freqs.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.freqs
    }

    pub fn iter(&self) -> core::slice::Iter<'_, i64> {
        self.freqs.iter()
    }
}

/// Build the [`FrequencyTable`] for an `n`-point transform.
pub fn frequency_table(n: usize) -> FrequencyTable {
    FrequencyTable::new(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn frequency_tables_even_and_odd() {
        assert_eq!(frequency_table(8).as_slice(), &[0, 1, 2, 3, -4, -3, -2, -1]);
        assert_eq!(frequency_table(7).as_slice(), &[0, 1, 2, 3, -3, -2, -1]);
        assert_eq!(frequency_table(1).as_slice(), &[0]);
        assert!(frequency_table(0).is_empty());
        assert_eq!(
            frequency_table(3).get(3),
            Err(FourierError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn single_sample_is_its_own_transform() {
        let x = ComplexSequence::from_parts(&[2.5], &[-1.0]).unwrap();
        let y = direct_transform(&x);
        assert_eq!(y.len(), 1);
        assert!((y.as_slice()[0].re - 2.5).abs() < 1e-15);
        assert!((y.as_slice()[0].im + 1.0).abs() < 1e-15);
    }

    #[test]
    fn positive_exponent_convention() {
        // The kernel is exp(+j...), so a clockwise phasor lands in bin 1.
        let n = 8;
        let x: ComplexSequence = (0..n)
            .map(|j| Complex::expi(-TAU * j as f64 / n as f64))
            .collect();
        let y = direct_transform(&x);
        assert!((y.as_slice()[1].re - 1.0).abs() < 1e-12);
        for (k, z) in y.iter().enumerate() {
            if k != 1 {
                assert!(z.magnitude() < 1e-12, "bin {} = {}", k, z);
            }
        }
    }

    #[test]
    fn phase_index_wraps_for_long_inputs() {
        // k * j exceeds u32::MAX here; the phase must still be (k * j) mod n.
        let n = 70_001;
        let mut x = vec![Complex::zero(); n];
        x[n - 1] = Complex::from_real(1.0);
        let z = dft_bin(&x, n - 1).scale(n as f64);
        let expected = Complex::expi(TAU / n as f64);
        assert!(z.sub(expected).magnitude() < 1e-9, "{}", z);
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(direct_transform(&ComplexSequence::new()).is_empty());
    }
}
