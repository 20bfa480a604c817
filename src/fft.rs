//! In-place radix-2 fast Fourier transform.
//!
//! An iterative [Cooley–Tukey](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! butterfly network: a bit-reversal permutation followed by `log2(N)`
//! passes of butterflies whose twiddle factors are read from a [`CosineTable`]
//! instead of calling trigonometric functions per butterfly.
//!
//! The kernel sign matches [`crate::dft::direct_transform`] (`exp(+j…)`), but
//! the output is **not** divided by `N`: for every supported length,
//! `fast = N × direct` element-wise.
//!
//! Only the lengths in [`SUPPORTED_FFT_SIZES`] are accepted. That set has no
//! `8`; other powers of two are rejected with
//! [`FourierError::UnsupportedTransformSize`] rather than falling back to the
//! direct transform.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::FRAC_1_SQRT_2;
use hashbrown::HashMap;

use crate::error::FourierError;
use crate::num::{Complex, TAU};
use crate::sequence::ComplexSequence;

/// Lengths accepted by the fast transform.
pub const SUPPORTED_FFT_SIZES: [usize; 18] = [
    2, 4, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768, 65536, 131072,
    262144, 524288,
];

/// Whether the fast transform accepts a length of `n`.
pub fn is_supported_size(n: usize) -> bool {
    SUPPORTED_FFT_SIZES.contains(&n)
}

/// `rev[i]` is `i` with its `log2(n)` low bits reversed. `n` must be a power
/// of two.
fn bit_reverse_indices(n: usize) -> Vec<usize> {
    (0..n)
        .map(|i| {
            let mut rev = 0;
            let mut u = 1;
            let mut d = n >> 1;
            while u < n {
                if i & u != 0 {
                    rev += d;
                }
                u <<= 1;
                d >>= 1;
            }
            rev
        })
        .collect()
}

fn permute(data: &mut [Complex], rev: &[usize]) {
    for (i, &r) in rev.iter().enumerate() {
        if r > i {
            data.swap(i, r);
        }
    }
}

/// Reorder `data` into bit-reversed index order.
///
/// Entry `i` trades places with entry `rev(i)` only when `rev(i) > i`, so no
/// pair is swapped twice. Applying the permutation twice restores the
/// original order. Any power-of-two length is accepted.
pub fn bit_reverse_permute(data: &mut [Complex]) -> Result<(), FourierError> {
    let n = data.len();
    if !n.is_power_of_two() {
        return Err(FourierError::UnsupportedTransformSize(n));
    }
    permute(data, &bit_reverse_indices(n));
    Ok(())
}

/// `cos(2πk/n)` for `k` in `0..n/2`.
///
/// Only the first octant is evaluated with trigonometric calls; the rest of
/// the table is filled by symmetry, and sines are read back from the table
/// with a quarter-period offset.
#[derive(Clone, Debug, PartialEq)]
pub struct CosineTable {
    n: usize,
    values: Vec<f64>,
}

impl CosineTable {
    /// Build the table for a transform of length `n` (a power of two, at
    /// least 2).
    pub fn new(n: usize) -> Result<Self, FourierError> {
        if n < 2 || !n.is_power_of_two() {
            return Err(FourierError::UnsupportedTransformSize(n));
        }
        let half = n / 2;
        let quarter = n / 4;
        let eighth = n / 8;
        let mut values = vec![0.0; half];
        values[0] = 1.0;
        if eighth > 0 {
            values[eighth] = FRAC_1_SQRT_2;
            values[3 * eighth] = -FRAC_1_SQRT_2;
        }
        let angle = TAU / n as f64;
        for i in 1..eighth {
            let c = libm::cos(i as f64 * angle);
            let s = libm::sin(i as f64 * angle);
            values[i] = c;
            values[quarter - i] = s;
            values[quarter + i] = -s;
            values[half - i] = -c;
        }
        Ok(Self { n, values })
    }

    /// Transform length the table was built for.
    pub fn transform_len(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// `cos(2πk/n)`, `k < n/2`.
    #[inline(always)]
    pub fn cos(&self, k: usize) -> f64 {
        self.values[k]
    }

    /// `sin(2πk/n)`, `k < n/2`.
    #[inline(always)]
    pub fn sin(&self, k: usize) -> f64 {
        let quarter = self.n / 4;
        if quarter == 0 {
            // n == 2: the only entry is k == 0.
            0.0
        } else if k < quarter {
            -self.values[k + quarter]
        } else {
            self.values[k - quarter]
        }
    }

    /// Twiddle factor `exp(+j·2πk/n)`.
    #[inline(always)]
    pub fn twiddle(&self, k: usize) -> Complex {
        Complex::new(self.cos(k), self.sin(k))
    }
}

fn butterflies(data: &mut [Complex], table: &CosineTable) {
    let n = data.len();
    // Table stride for the current block size: n / block.
    let mut stride = n / 2;
    let mut block = 2;
    while block <= n {
        let half = block / 2;
        for start in (0..n).step_by(block) {
            for i in 0..half {
                let w = table.twiddle(i * stride);
                let even = data[start + i];
                let odd = w.mul(data[start + half + i]);
                data[start + i] = even.add(odd);
                data[start + half + i] = even.sub(odd);
            }
        }
        stride /= 2;
        block *= 2;
    }
}

/// Caches cosine tables and bit-reversal indices per length so repeated fast
/// transforms of the same size skip the setup work.
#[derive(Default)]
pub struct FftPlanner {
    tables: HashMap<usize, Arc<CosineTable>>,
    reversals: HashMap<usize, Arc<[usize]>>,
}

impl FftPlanner {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            reversals: HashMap::new(),
        }
    }

    /// Cosine table for a supported length `n`.
    pub fn cosine_table(&mut self, n: usize) -> Result<Arc<CosineTable>, FourierError> {
        if !is_supported_size(n) {
            return Err(FourierError::UnsupportedTransformSize(n));
        }
        if let Some(table) = self.tables.get(&n) {
            return Ok(Arc::clone(table));
        }
        log::trace!("building cosine table for n = {}", n);
        let table = Arc::new(CosineTable::new(n)?);
        self.tables.insert(n, Arc::clone(&table));
        Ok(table)
    }

    fn reversal(&mut self, n: usize) -> Arc<[usize]> {
        Arc::clone(self.reversals.entry(n).or_insert_with(|| {
            log::trace!("building bit-reversal indices for n = {}", n);
            Arc::from(bit_reverse_indices(n))
        }))
    }

    /// Number of lengths with a cached cosine table.
    pub fn cached_sizes(&self) -> usize {
        self.tables.len()
    }

    /// Unnormalized in-place fast transform of `data`.
    ///
    /// Unsupported lengths are rejected before `data` is touched.
    pub fn fast_transform(&mut self, data: &mut [Complex]) -> Result<(), FourierError> {
        let n = data.len();
        let table = self.cosine_table(n)?;
        let rev = self.reversal(n);
        permute(data, &rev);
        butterflies(data, &table);
        Ok(())
    }
}

/// Unnormalized in-place fast transform of a slice with a throwaway planner.
pub fn fast_transform_slice(data: &mut [Complex]) -> Result<(), FourierError> {
    FftPlanner::new().fast_transform(data)
}

/// Unnormalized in-place fast transform of a sequence.
pub fn fast_transform_in_place(seq: &mut ComplexSequence) -> Result<(), FourierError> {
    fast_transform_slice(seq.as_mut_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_set_skips_eight() {
        assert!(is_supported_size(2));
        assert!(is_supported_size(4));
        assert!(!is_supported_size(8));
        assert!(is_supported_size(16));
        assert!(is_supported_size(524288));
        assert!(!is_supported_size(1 << 20));
        assert!(!is_supported_size(1));
        assert!(!is_supported_size(12));
    }

    #[test]
    fn cosine_table_matches_libm() {
        for n in [2usize, 4, 8, 16, 64, 1024] {
            let table = CosineTable::new(n).unwrap();
            assert_eq!(table.len(), n / 2);
            for k in 0..n / 2 {
                let angle = TAU * k as f64 / n as f64;
                assert!((table.cos(k) - libm::cos(angle)).abs() < 1e-12, "cos n={} k={}", n, k);
                assert!((table.sin(k) - libm::sin(angle)).abs() < 1e-12, "sin n={} k={}", n, k);
            }
        }
        assert!(CosineTable::new(12).is_err());
        assert!(CosineTable::new(1).is_err());
    }

    #[test]
    fn bit_reverse_of_sixteen() {
        let rev = bit_reverse_indices(16);
        assert_eq!(rev[1], 8);
        assert_eq!(rev[3], 12);
        assert_eq!(rev[15], 15);
    }

    #[test]
    fn unsupported_length_leaves_data_alone() {
        let mut data: Vec<Complex> = (0..8).map(|i| Complex::from_real(i as f64)).collect();
        let before = data.clone();
        assert_eq!(
            fast_transform_slice(&mut data),
            Err(FourierError::UnsupportedTransformSize(8))
        );
        assert_eq!(data, before);
    }

    #[test]
    fn planner_reuses_tables() {
        let mut planner = FftPlanner::new();
        let a = planner.cosine_table(64).unwrap();
        let b = planner.cosine_table(64).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(planner.cached_sizes(), 1);
    }

    #[test]
    fn impulse_transforms_to_flat_spectrum() {
        let mut data = vec![Complex::zero(); 16];
        data[0] = Complex::from_real(1.0);
        fast_transform_slice(&mut data).unwrap();
        for c in &data {
            assert!((c.re - 1.0).abs() < 1e-12 && c.im.abs() < 1e-12);
        }
    }
}
