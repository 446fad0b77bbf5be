use typenum::{Integer, Unsigned, Z0};

use super::Scaled;
use crate::digits::Number;

/// A numerator and a denominator, for constructing a [`Scaled`] from a ratio without going
/// through floating point.
///
/// ```
/// # use compnum::*;
/// # use compnum::typenum::N16;
/// let third = Scaled::<i32, N16>::from_fraction(Fraction::new(1, 3));
/// assert_eq!(third.rep(), 21845);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fraction<N, D = N> {
  pub numerator: N,
  pub denominator: D,
}

impl<N, D> Fraction<N, D> {
  #[inline]
  pub const fn new(numerator: N, denominator: D) -> Self {
    Self { numerator, denominator }
  }
}

impl<N: Number, D: Number> Fraction<N, D> {
  pub fn to_f64(self) -> f64 {
    self.numerator.to_f64() / self.denominator.to_f64()
  }
}

impl<R: Number, E: Integer, X: Unsigned> Scaled<R, E, X> {
  /// The value of `fraction`, by [`Scaled::quotient`] (so rounded once, as `R` rounds).
  pub fn from_fraction<N: Number, D: Number>(fraction: Fraction<N, D>) -> Self {
    Self::quotient(
      Scaled::<N, Z0, X>::from_rep(fraction.numerator),
      Scaled::<D, Z0, X>::from_rep(fraction.denominator),
    )
  }
}
