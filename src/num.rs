//! Complex numbers in double precision.
//!
//! [`Complex`] offers two arithmetic families: pure methods that return a new
//! value, and `*_by` methods that mutate the receiver. The epicycle engine
//! relies on the in-place family to keep its rotating phasors alive from one
//! tick to the next.

use core::f64::consts::PI;
use core::fmt;

use crate::error::FourierError;

/// Full turn in radians.
pub const TAU: f64 = 2.0 * PI;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
    pub const fn zero() -> Self {
        Self { re: 0.0, im: 0.0 }
    }
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }
    /// Unit phasor `cos(theta) + j sin(theta)`.
    #[inline(always)]
    pub fn expi(theta: f64) -> Self {
        Self {
            re: libm::cos(theta),
            im: libm::sin(theta),
        }
    }

    pub fn re(&self) -> f64 {
        self.re
    }
    pub fn im(&self) -> f64 {
        self.im
    }
    pub fn set_re(&mut self, re: f64) {
        self.re = re;
    }
    pub fn set_im(&mut self, im: f64) {
        self.im = im;
    }
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    #[inline(always)]
    pub fn magnitude_squared(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.magnitude_squared())
    }

    /// Angle in `[0, 2π)`.
    ///
    /// Picks the quadrant from the signs of the components and offsets
    /// `atan(im / re)` by 0, π or 2π. Signed zeros count as `+0`, and the
    /// origin has argument `0`.
    pub fn argument(&self) -> f64 {
        let r = self.re + 0.0;
        let i = self.im + 0.0;
        if r == 0.0 && i == 0.0 {
            return 0.0;
        }
        let base = libm::atan(i / r);
        if r >= 0.0 && i >= 0.0 {
            base
        } else if r >= 0.0 && i < 0.0 {
            let arg = TAU + base;
            // Tiny negative angles round up to a full turn.
            if arg < TAU {
                arg
            } else {
                0.0
            }
        } else {
            // r < 0 here; both remaining quadrants share the π offset.
            PI + base
        }
    }

    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    pub fn inv(self) -> Result<Self, FourierError> {
        let abs2 = self.magnitude_squared();
        if abs2 == 0.0 {
            return Err(FourierError::DivisionByZero);
        }
        Ok(Self {
            re: self.re / abs2,
            im: -self.im / abs2,
        })
    }

    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        self.add_parts(other.re, other.im)
    }
    #[inline(always)]
    pub fn add_parts(self, re: f64, im: f64) -> Self {
        Self {
            re: self.re + re,
            im: self.im + im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        self.sub_parts(other.re, other.im)
    }
    #[inline(always)]
    pub fn sub_parts(self, re: f64, im: f64) -> Self {
        Self {
            re: self.re - re,
            im: self.im - im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        self.mul_parts(other.re, other.im)
    }
    #[inline(always)]
    pub fn mul_parts(self, re: f64, im: f64) -> Self {
        Self {
            re: self.re * re - self.im * im,
            im: self.re * im + self.im * re,
        }
    }
    #[inline(always)]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }
    pub fn div(self, other: Self) -> Result<Self, FourierError> {
        self.div_parts(other.re, other.im)
    }
    pub fn div_parts(self, re: f64, im: f64) -> Result<Self, FourierError> {
        let abs2 = re * re + im * im;
        if abs2 == 0.0 {
            return Err(FourierError::DivisionByZero);
        }
        Ok(self.mul_parts(re / abs2, -im / abs2))
    }
    pub fn div_real(self, divisor: f64) -> Result<Self, FourierError> {
        if divisor == 0.0 {
            return Err(FourierError::DivisionByZero);
        }
        Ok(Self {
            re: self.re / divisor,
            im: self.im / divisor,
        })
    }

    pub fn add_by(&mut self, other: Self) {
        *self = self.add(other);
    }
    pub fn add_by_parts(&mut self, re: f64, im: f64) {
        *self = self.add_parts(re, im);
    }
    pub fn sub_by(&mut self, other: Self) {
        *self = self.sub(other);
    }
    pub fn sub_by_parts(&mut self, re: f64, im: f64) {
        *self = self.sub_parts(re, im);
    }
    pub fn mul_by(&mut self, other: Self) {
        *self = self.mul(other);
    }
    pub fn mul_by_parts(&mut self, re: f64, im: f64) {
        *self = self.mul_parts(re, im);
    }
    pub fn scale_by(&mut self, factor: f64) {
        *self = self.scale(factor);
    }
    /// In-place division. The receiver is left untouched on error.
    pub fn div_by(&mut self, other: Self) -> Result<(), FourierError> {
        *self = self.div(other)?;
        Ok(())
    }
    pub fn div_by_parts(&mut self, re: f64, im: f64) -> Result<(), FourierError> {
        *self = self.div_parts(re, im)?;
        Ok(())
    }
    pub fn conjugate(&mut self) {
        self.im = -self.im;
    }
    pub fn invert(&mut self) -> Result<(), FourierError> {
        *self = self.inv()?;
        Ok(())
    }

    pub fn exp(self) -> Self {
        Self::expi(self.im).scale(libm::exp(self.re))
    }
    pub fn sin(self) -> Self {
        Self {
            re: libm::sin(self.re) * libm::cosh(self.im),
            im: libm::cos(self.re) * libm::sinh(self.im),
        }
    }
    pub fn cos(self) -> Self {
        Self {
            re: libm::cos(self.re) * libm::cosh(self.im),
            im: -libm::sin(self.re) * libm::sinh(self.im),
        }
    }

    /// Exchange the components of `a` and `b`.
    pub fn swap(a: &mut Complex, b: &mut Complex) {
        core::mem::swap(a, b);
    }
}

impl From<(f64, f64)> for Complex {
    fn from((re, im): (f64, f64)) -> Self {
        Self { re, im }
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::from_real(re)
    }
}

impl core::ops::Neg for Complex {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl core::ops::Add for Complex {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Complex::add(self, other)
    }
}

impl core::ops::Sub for Complex {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Complex::sub(self, other)
    }
}

impl core::ops::Mul for Complex {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Complex::mul(self, other)
    }
}

impl core::ops::Mul<f64> for Complex {
    type Output = Self;
    #[inline(always)]
    fn mul(self, factor: f64) -> Self {
        self.scale(factor)
    }
}

impl core::ops::AddAssign for Complex {
    fn add_assign(&mut self, other: Self) {
        self.add_by(other);
    }
}

impl core::ops::SubAssign for Complex {
    fn sub_assign(&mut self, other: Self) {
        self.sub_by(other);
    }
}

impl core::ops::MulAssign for Complex {
    fn mul_assign(&mut self, other: Self) {
        self.mul_by(other);
    }
}

/// `0` for the origin, `0.25i` / `-1.0i` for pure imaginaries, otherwise
/// `re + imi` or `re - |im|i`.
impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.re == 0.0 {
            if self.im == 0.0 {
                return f.write_str("0");
            }
            if self.im < 0.0 {
                f.write_str("-")?;
            }
        } else {
            write!(f, "{:?}", self.re)?;
            if self.im != 0.0 {
                f.write_str(if self.im > 0.0 { " + " } else { " - " })?;
            }
        }
        if self.im != 0.0 {
            write!(f, "{:?}i", libm::fabs(self.im))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_complex_operations() {
        let a = Complex::new(1.0, -2.0);
        let b = Complex::new(3.0, 4.0);
        let c = a.mul(b);
        assert!((c.re - 11.0).abs() < 1e-12);
        assert!((c.im - -2.0).abs() < 1e-12);
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
        let q = c.div(b).unwrap();
        assert!((q.re - a.re).abs() < 1e-12 && (q.im - a.im).abs() < 1e-12);
    }

    #[test]
    fn in_place_matches_pure() {
        let a = Complex::new(0.5, 1.5);
        let b = Complex::new(-2.0, 0.25);
        let mut z = a;
        z.mul_by(b);
        assert_eq!(z, a.mul(b));
        z.sub_by_parts(1.0, 1.0);
        assert_eq!(z, a.mul(b).sub_parts(1.0, 1.0));
        z.div_by(b).unwrap();
        let expected = a.mul(b).sub_parts(1.0, 1.0).div(b).unwrap();
        assert_eq!(z, expected);
    }

    #[test]
    fn failed_division_leaves_receiver_alone() {
        let mut z = Complex::new(3.0, -4.0);
        assert_eq!(z.div_by(Complex::zero()), Err(FourierError::DivisionByZero));
        assert_eq!(z.div_by_parts(0.0, 0.0), Err(FourierError::DivisionByZero));
        assert_eq!(z.invert(), Ok(()));
        let mut origin = Complex::zero();
        assert_eq!(origin.invert(), Err(FourierError::DivisionByZero));
        assert_eq!(origin, Complex::zero());
        assert_eq!(Complex::new(1.0, 1.0).div_real(0.0), Err(FourierError::DivisionByZero));
    }

    #[test]
    fn argument_boundaries() {
        assert_eq!(Complex::zero().argument(), 0.0);
        assert_eq!(Complex::new(1.0, 0.0).argument(), 0.0);
        assert!((Complex::new(0.0, 1.0).argument() - PI / 2.0).abs() < 1e-15);
        assert!((Complex::new(-1.0, 0.0).argument() - PI).abs() < 1e-15);
        assert!((Complex::new(0.0, -1.0).argument() - 1.5 * PI).abs() < 1e-15);
        assert!((Complex::new(-0.0, -1.0).argument() - 1.5 * PI).abs() < 1e-15);
        assert!(Complex::new(1.0, -1e-300).argument() < TAU);
    }

    #[test]
    fn display_follows_sign_rules() {
        assert_eq!(Complex::zero().to_string(), "0");
        assert_eq!(Complex::new(0.0, 0.25).to_string(), "0.25i");
        assert_eq!(Complex::new(0.0, -1.0).to_string(), "-1.0i");
        assert_eq!(Complex::new(2.0, 0.0).to_string(), "2.0");
        assert_eq!(Complex::new(1.0, -1.0).to_string(), "1.0 - 1.0i");
        assert_eq!(Complex::new(3.0, 10.0).to_string(), "3.0 + 10.0i");
    }

    #[test]
    fn swap_exchanges_components() {
        let mut a = Complex::new(1.0, 2.0);
        let mut b = Complex::new(-3.0, 4.0);
        Complex::swap(&mut a, &mut b);
        assert_eq!(a, Complex::new(-3.0, 4.0));
        assert_eq!(b, Complex::new(1.0, 2.0));
    }
}
