//! [`Scaled`]: fixed-point numbers, stored as an integer representation times a constant power
//! of a radix.
//!
//! The exponent and the radix are part of the type, so they cost nothing at run time; only the
//! representation is stored. Arithmetic follows the usual fixed-point rules:
//!
//!   - `+`, `-`, `%`, the bitwise operators and the comparisons first align both operands to the
//!     smaller of the two exponents, so that no precision is discarded;
//!   - `*` adds the exponents, `/` subtracts them (and is therefore an *integer* division of the
//!     representations; see [`Scaled::quotient`] and [`quotient`] for a division that keeps the
//!     fractional digits);
//!   - the representation type of the result is whatever the operator on the representations
//!     returns, so `Scaled<Elastic<..>>` widens, `Scaled<Overflow<..>>` checks,
//!     `Scaled<Rounding<..>>` rounds.
//!
//! Mixing with a primitive integer promotes it to a `Scaled` with exponent 0; mixing with an
//! `f64` demotes the `Scaled` to `f64`.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use typenum::{Integer, U2, Unsigned};

use crate::{I512, Int};
use crate::digits::{Number, cmp_words};
use crate::underlying::{powi, round_half_away};

mod fraction;
mod math;
mod ops;

pub use fraction::Fraction;
pub use ops::Align;
pub use math::{Quotient, quotient};

/// A fixed-point number: `rep × X^E`, where `R` is any [`Number`], `E` is a typenum
/// [`Integer`] and `X` is a typenum [`Unsigned`] (2 by default).
///
/// # Examples
///
/// ```
/// # use compnum::*;
/// # use compnum::typenum::{N4, N8, Z0};
/// let a = Scaled::<i32, N4>::from_f64(2.5);
/// assert_eq!(a.rep(), 40);
///
/// let b: Scaled<i32, N8> = a * a;
/// assert_eq!(b, 6.25);
///
/// let c: Scaled<i32, N4> = a + 1;
/// assert_eq!(c.to_f64(), 3.5);
/// ```
#[repr(transparent)]
pub struct Scaled<R, E, X = U2> {
  rep: R,
  exponent: PhantomData<(E, X)>,
}

impl<R: Number, E: Integer, X: Unsigned> Scaled<R, E, X> {
  pub const EXPONENT: i32 = E::I32;
  pub const RADIX: u32 = X::U32;

  #[inline]
  pub const fn from_rep(rep: R) -> Self {
    Self { rep, exponent: PhantomData }
  }

  #[inline]
  pub fn rep(self) -> R {
    self.rep
  }

  /// Convert from a [`Scaled`] of another representation and exponent (but the same radix).
  ///
  /// Going to a finer exponent multiplies, in `R`, so the overflow behaviour of `R` applies.
  /// Going to a coarser exponent divides, in whichever of the two representations is wider, so
  /// the rounding behaviour of that one applies.
  ///
  /// ```
  /// # use compnum::*;
  /// # use compnum::typenum::{N2, N6};
  /// let x = Scaled::<i64, N6>::from_f64(-1.75);
  /// assert_eq!(Scaled::<i8, N2>::from_scaled(x).rep(), -7);
  /// ```
  pub fn from_scaled<R2: Number, E2: Integer>(x: Scaled<R2, E2, X>) -> Self {
    let shift = E2::I32 - E::I32;
    if shift >= 0 || R::BITS >= R2::BITS {
      Self::from_rep(R::from_number(x.rep).scale(shift, X::U32))
    } else {
      Self::from_rep(R::from_number(x.rep.scale(shift, X::U32)))
    }
  }

  /// Convert to any machine integer. The fractional part is discarded as `R` discards it when
  /// scaled down (truncation, for the primitives).
  #[inline]
  pub fn to_int<I: Int>(self) -> I {
    I::from_number(self.rep.scale(E::I32, X::U32))
  }
}

impl<R: Number, E: Integer, X: Unsigned> Number for Scaled<R, E, X> {
  const DIGITS: u32 = R::DIGITS;
  const IS_SIGNED: bool = R::IS_SIGNED;
  const BITS: u32 = R::BITS;

  type Rep = R;
  type Storage = R::Storage;

  #[inline]
  fn to_rep(self) -> R { self.rep }

  #[inline]
  fn from_rep(rep: R) -> Self { Self::from_rep(rep) }

  #[inline]
  fn max_value() -> Self { Self::from_rep(R::max_value()) }

  #[inline]
  fn lowest() -> Self { Self::from_rep(R::lowest()) }

  /// One unit in the last place, `X^E`.
  #[inline]
  fn min_positive() -> Self { Self::from_rep(R::min_positive()) }

  #[inline]
  fn is_negative(self) -> bool { self.rep.is_negative() }

  #[inline]
  fn word(self, offset: u32) -> u64 { self.rep.word(offset) }

  #[inline]
  fn from_words<F: Fn(u32) -> u64>(f: F) -> Self { Self::from_rep(R::from_words(f)) }

  #[inline]
  fn to_f64(self) -> f64 { scale_f64(self.rep.to_f64(), E::I32, X::U32) }

  /// Rounds to the nearest representable value, ties away from zero. Out of range values are
  /// handled by the conversion from `f64` of `R`.
  #[inline]
  fn from_f64(x: f64) -> Self {
    Self::from_rep(R::from_f64(round_half_away(scale_f64(x, -E::I32, X::U32))))
  }

  #[inline]
  fn scale(self, exp: i32, radix: u32) -> Self { Self::from_rep(self.rep.scale(exp, radix)) }

  #[inline]
  fn round_away(negative: bool, inexact: bool, half: Ordering) -> bool {
    R::round_away(negative, inexact, half)
  }

  /// Unlike for the integer types, this preserves the *value* of `x`, not its bit pattern.
  #[inline]
  fn from_int<I: Int>(x: I) -> Self {
    Self::from_rep(R::from_int(x).scale(-E::I32, X::U32))
  }
}

/// `x × radix^exp`, dividing by `radix^-exp` for negative `exp` (as powers of 10 are exact and
/// their reciprocals are not).
fn scale_f64(x: f64, exp: i32, radix: u32) -> f64 {
  if exp >= 0 { x * powi(radix, exp) } else { x / powi(radix, -exp) }
}

/// Compare `a × radix^ea` with `b × radix^eb`.
pub(crate) fn cmp_scaled<A: Number, B: Number>(a: A, ea: i32, b: B, eb: i32, radix: u32) -> Ordering {
  if ea == eb {
    return cmp_words(a, b)
  }
  // Align in a type wide enough to hold any representation shifted by a few hundred bits.
  let e = ea.min(eb);
  let a = I512::from_number(a).scale(ea - e, radix);
  let b = I512::from_number(b).scale(eb - e, radix);
  a.cmp(&b)
}

impl<R: Number, E: Integer, X: Unsigned> Clone for Scaled<R, E, X> {
  #[inline]
  fn clone(&self) -> Self { *self }
}

impl<R: Number, E: Integer, X: Unsigned> Copy for Scaled<R, E, X> {}

impl<R: Number, E: Integer, X: Unsigned> Default for Scaled<R, E, X> {
  #[inline]
  fn default() -> Self { Self::from_rep(R::default()) }
}

impl<R: Number + Hash, E: Integer, X: Unsigned> Hash for Scaled<R, E, X> {
  fn hash<H: Hasher>(&self, state: &mut H) { self.rep.hash(state) }
}

impl<R: Number, E: Integer, X: Unsigned> fmt::Debug for Scaled<R, E, X> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Scaled<{}^{}>({:?})", X::U32, E::I32, self.rep)
  }
}

/// Formats the value as an `f64`.
impl<R: Number, E: Integer, X: Unsigned> fmt::Display for Scaled<R, E, X> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.to_f64(), f) }
}

impl<R1, E1, R2, E2, X> PartialEq<Scaled<R2, E2, X>> for Scaled<R1, E1, X>
where
  R1: Number, E1: Integer,
  R2: Number, E2: Integer,
  X: Unsigned,
{
  #[inline]
  fn eq(&self, other: &Scaled<R2, E2, X>) -> bool {
    cmp_scaled(self.rep, E1::I32, other.rep, E2::I32, X::U32) == Ordering::Equal
  }
}

impl<R: Number, E: Integer, X: Unsigned> Eq for Scaled<R, E, X> {}

impl<R1, E1, R2, E2, X> PartialOrd<Scaled<R2, E2, X>> for Scaled<R1, E1, X>
where
  R1: Number, E1: Integer,
  R2: Number, E2: Integer,
  X: Unsigned,
{
  #[inline]
  fn partial_cmp(&self, other: &Scaled<R2, E2, X>) -> Option<Ordering> {
    Some(cmp_scaled(self.rep, E1::I32, other.rep, E2::I32, X::U32))
  }
}

impl<R: Number, E: Integer, X: Unsigned> Ord for Scaled<R, E, X> {
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering { cmp_words(self.rep, other.rep) }
}

/// Comparison with `f64` is by conversion to `f64`.
impl<R: Number, E: Integer, X: Unsigned> PartialEq<f64> for Scaled<R, E, X> {
  #[inline]
  fn eq(&self, other: &f64) -> bool { self.to_f64() == *other }
}

impl<R: Number, E: Integer, X: Unsigned> PartialOrd<f64> for Scaled<R, E, X> {
  #[inline]
  fn partial_cmp(&self, other: &f64) -> Option<Ordering> { self.to_f64().partial_cmp(other) }
}

macro_rules! mk_native {
  ($($int:ty)*) => {$(
    /// Value-preserving (up to the overflow behaviour of `R`).
    impl<R: Number, E: Integer, X: Unsigned> From<$int> for Scaled<R, E, X> {
      #[inline]
      fn from(x: $int) -> Self { Number::from_int(x) }
    }

    impl<R: Number, E: Integer, X: Unsigned> PartialEq<$int> for Scaled<R, E, X> {
      #[inline]
      fn eq(&self, other: &$int) -> bool {
        cmp_scaled(self.rep, E::I32, *other, 0, X::U32) == Ordering::Equal
      }
    }

    impl<R: Number, E: Integer, X: Unsigned> PartialOrd<$int> for Scaled<R, E, X> {
      #[inline]
      fn partial_cmp(&self, other: &$int) -> Option<Ordering> {
        Some(cmp_scaled(self.rep, E::I32, *other, 0, X::U32))
      }
    }

    impl<R: Number, E: Integer, X: Unsigned> PartialEq<Scaled<R, E, X>> for $int {
      #[inline]
      fn eq(&self, other: &Scaled<R, E, X>) -> bool { other == self }
    }

    impl<R: Number, E: Integer, X: Unsigned> PartialOrd<Scaled<R, E, X>> for $int {
      #[inline]
      fn partial_cmp(&self, other: &Scaled<R, E, X>) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
      }
    }
  )*}
}

mk_native!{i8 i16 i32 i64 i128 u8 u16 u32 u64 u128}
