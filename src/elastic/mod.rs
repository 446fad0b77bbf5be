//! [`Elastic`]: an integer whose digit count is part of its type, and grows with every
//! operation just enough that no result is ever truncated.
//!
//! The digit count of each result is given by the rules in [`policy`] (for example, the sum of
//! two 8-digit numbers has 9 digits). Storage is the narrowest machine integer that holds the
//! digits, via [`SetDigits`], so it may be wider than the nominal digit count; it becomes a
//! [`Duplex`](crate::Duplex) composition past 128 digits.
//!
//! The range is symmetric: `lowest() == -max_value()`. That is what lets the digit rules for
//! `*` and `/` be exact.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::Add;

use typenum::{B0, B1, Bit, Sum, Unsigned};

use crate::Int;
use crate::digits::{Number, SetDigits, Widen, cmp_words};
use crate::error::NarrowingError;
use crate::underlying::Sealed;

mod ops;
pub mod policy;

/// An integer with `D` digits (a typenum [`Unsigned`]), signed if `S` is [`B1`] (the default)
/// and unsigned if [`B0`].
///
/// # Examples
///
/// ```
/// # use compnum::*;
/// # use compnum::typenum::{U8, U9, U16, B0};
/// let a = Elastic::<U8, B0>::from(200_u8);
/// let b: Elastic<U9, B0> = a + a;
/// let c: Elastic<U16, B0> = a * a;
/// assert_eq!(b, 400);
/// assert_eq!(c, 40000);
/// ```
#[repr(transparent)]
pub struct Elastic<D: SetDigits<S>, S: Bit = B1> {
  rep: <D as SetDigits<S>>::Rep,
  sign: PhantomData<S>,
}

/// An [`Elastic`] with just enough digits for a constant (always signed).
///
/// ```
/// # use compnum::*;
/// fn digits<T: Number>(_: T) -> u32 { T::DIGITS }
/// assert_eq!(digits(elastic!(1000)), 10);
/// assert_eq!(digits(elastic!(-1)), 1);
/// ```
#[macro_export]
macro_rules! elastic {
  ($value:expr) => {
    $crate::Elastic::<$crate::typenum::U<{ $crate::digits_for($value as i128) }>>::new($value as i128)
  };
}

impl<D: SetDigits<S>, S: Bit> Elastic<D, S> {
  /// Construct from the representation, which is assumed to be within range.
  #[inline]
  pub const fn from_rep(rep: <D as SetDigits<S>>::Rep) -> Self {
    Self { rep, sign: PhantomData }
  }

  #[inline]
  pub fn rep(self) -> <D as SetDigits<S>>::Rep {
    self.rep
  }

  /// Convert from any machine integer. Panics if `value` is out of range.
  ///
  /// ```should_panic
  /// # use compnum::*;
  /// # use compnum::typenum::U4;
  /// let _ = Elastic::<U4>::new(16);
  /// ```
  #[track_caller]
  pub fn new<I: Int>(value: I) -> Self {
    match Self::try_new(value) {
      Ok(x) => x,
      Err(err) => panic!("{err}"),
    }
  }

  /// Convert from any machine integer, or fail if `value` is out of range.
  pub fn try_new<I: Int>(value: I) -> Result<Self, NarrowingError> {
    let in_range = cmp_words(value, Self::max_value()) != Ordering::Greater
      && cmp_words(value, Self::lowest()) != Ordering::Less;
    in_range.then(|| Self::from_number(value)).ok_or(NarrowingError)
  }
}

impl<D: SetDigits<S>, S: Bit> Number for Elastic<D, S> {
  const DIGITS: u32 = D::U32;
  const IS_SIGNED: bool = S::BOOL;
  const BITS: u32 = <<D as SetDigits<S>>::Rep as Number>::BITS;

  type Rep = <D as SetDigits<S>>::Rep;
  type Storage = <D as SetDigits<S>>::Rep;

  #[inline]
  fn to_rep(self) -> Self::Rep { self.rep }

  #[inline]
  fn from_rep(rep: Self::Rep) -> Self { Self::from_rep(rep) }

  /// `2^D - 1`.
  #[inline]
  fn max_value() -> Self {
    // The shift clamps to zero when `D` fills an unsigned storage, and the subtraction wraps.
    Self::from_rep(Self::Rep::ONE.shift_left(D::U32).wrapping_sub(Self::Rep::ONE))
  }

  #[inline]
  fn lowest() -> Self {
    if S::BOOL { Self::from_rep(Self::max_value().rep.wrapping_neg()) } else { Self::default() }
  }

  #[inline]
  fn min_positive() -> Self { Self::from_rep(Self::Rep::ONE) }

  #[inline]
  fn is_negative(self) -> bool { self.rep.is_negative() }

  #[inline]
  fn word(self, offset: u32) -> u64 { self.rep.word(offset) }

  #[inline]
  fn from_words<F: Fn(u32) -> u64>(f: F) -> Self { Self::from_rep(Self::Rep::from_words(f)) }

  #[inline]
  fn to_f64(self) -> f64 { self.rep.to_f64() }

  #[inline]
  fn from_f64(x: f64) -> Self { Self::from_rep(Self::Rep::from_f64(x)) }

  #[inline]
  fn scale(self, exp: i32, radix: u32) -> Self { Self::from_rep(self.rep.scale(exp, radix)) }
}

impl<D, S, N> Widen<N> for Elastic<D, S>
where
  D: SetDigits<S> + Add<N>,
  Sum<D, N>: SetDigits<S>,
  S: Bit,
  N: Unsigned,
{
  type Output = Elastic<Sum<D, N>, S>;
}

macro_rules! mk_from_native {
  ($($int:ty => $digits:ident, $signed:ident;)*) => {$(
    impl From<$int> for Elastic<typenum::$digits, $signed> {
      #[inline]
      fn from(x: $int) -> Self { Self::from_number(x) }
    }

    impl<D: SetDigits<S>, S: Bit> PartialEq<$int> for Elastic<D, S> {
      #[inline]
      fn eq(&self, other: &$int) -> bool { cmp_words(*self, *other) == Ordering::Equal }
    }

    impl<D: SetDigits<S>, S: Bit> PartialOrd<$int> for Elastic<D, S> {
      #[inline]
      fn partial_cmp(&self, other: &$int) -> Option<Ordering> { Some(cmp_words(*self, *other)) }
    }

    impl<D: SetDigits<S>, S: Bit> PartialEq<Elastic<D, S>> for $int {
      #[inline]
      fn eq(&self, other: &Elastic<D, S>) -> bool { cmp_words(*self, *other) == Ordering::Equal }
    }

    impl<D: SetDigits<S>, S: Bit> PartialOrd<Elastic<D, S>> for $int {
      #[inline]
      fn partial_cmp(&self, other: &Elastic<D, S>) -> Option<Ordering> {
        Some(cmp_words(*self, *other))
      }
    }
  )*}
}

// Signed primitives get one digit more than their `DIGITS`, so that `MIN` is in range.
mk_from_native!{
  i8 => U8, B1;
  i16 => U16, B1;
  i32 => U32, B1;
  i64 => U64, B1;
  i128 => U128, B1;
  u8 => U8, B0;
  u16 => U16, B0;
  u32 => U32, B0;
  u64 => U64, B0;
  u128 => U128, B0;
}

/// Values compare as integers, whatever the digits and signedness of either side.
impl<D1, S1, D2, S2> PartialEq<Elastic<D2, S2>> for Elastic<D1, S1>
where
  D1: SetDigits<S1>,
  S1: Bit,
  D2: SetDigits<S2>,
  S2: Bit,
{
  #[inline]
  fn eq(&self, other: &Elastic<D2, S2>) -> bool { cmp_words(*self, *other) == Ordering::Equal }
}

impl<D: SetDigits<S>, S: Bit> Eq for Elastic<D, S> {}

impl<D1, S1, D2, S2> PartialOrd<Elastic<D2, S2>> for Elastic<D1, S1>
where
  D1: SetDigits<S1>,
  S1: Bit,
  D2: SetDigits<S2>,
  S2: Bit,
{
  #[inline]
  fn partial_cmp(&self, other: &Elastic<D2, S2>) -> Option<Ordering> {
    Some(cmp_words(*self, *other))
  }
}

impl<D: SetDigits<S>, S: Bit> Ord for Elastic<D, S> {
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering { self.rep.cmp(&other.rep) }
}

impl<D: SetDigits<S>, S: Bit> Clone for Elastic<D, S> {
  #[inline]
  fn clone(&self) -> Self { *self }
}

impl<D: SetDigits<S>, S: Bit> Copy for Elastic<D, S> {}

impl<D: SetDigits<S>, S: Bit> Default for Elastic<D, S> {
  #[inline]
  fn default() -> Self { Self::from_rep(<D as SetDigits<S>>::Rep::ZERO) }
}

impl<D: SetDigits<S>, S: Bit> Hash for Elastic<D, S> {
  fn hash<H: Hasher>(&self, state: &mut H) { self.rep.hash(state) }
}

impl<D: SetDigits<S>, S: Bit> fmt::Debug for Elastic<D, S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if S::BOOL { 'i' } else { 'u' };
    write!(f, "Elastic<{sign}{}>({})", D::U32, self.rep)
  }
}

impl<D: SetDigits<S>, S: Bit> fmt::Display for Elastic<D, S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.rep, f) }
}

/// Unsigned [`Elastic`] with `D` digits.
pub type UElastic<D> = Elastic<D, B0>;

#[cfg(test)]
mod tests {
  use super::*;
  use typenum::{U1, U4, U7, U8, U12, U16, U64, U100, U128, U200};

  #[test]
  fn limits() {
    assert_eq!(<Elastic<U7> as Number>::max_value(), 127);
    assert_eq!(<Elastic<U7> as Number>::lowest(), -127);
    assert_eq!(<Elastic<U8, B0> as Number>::max_value(), 255);
    assert_eq!(<Elastic<U8, B0> as Number>::lowest(), 0);
    assert_eq!(<Elastic<U1> as Number>::lowest(), -1);
    assert_eq!(<Elastic<U64, B0> as Number>::max_value(), u64::MAX);
    assert_eq!(<Elastic<U128> as Number>::max_value(), u128::MAX);
    assert_eq!(<Elastic<U128> as Number>::lowest(), -<Elastic<U128> as Number>::max_value());
    assert_eq!(<Elastic<U12> as Number>::BITS, 16);
  }

  #[test]
  fn storage() {
    assert_eq!(core::mem::size_of::<Elastic<U7>>(), 1);
    assert_eq!(core::mem::size_of::<Elastic<U8>>(), 2);
    assert_eq!(core::mem::size_of::<Elastic<U8, B0>>(), 1);
    assert_eq!(core::mem::size_of::<Elastic<U200>>(), 32);
  }

  #[test]
  fn construction() {
    assert_eq!(Elastic::<U4>::new(15), 15);
    assert_eq!(Elastic::<U4>::new(-15_i64), -15);
    assert_eq!(Elastic::<U4>::try_new(16), Err(NarrowingError));
    assert_eq!(Elastic::<U4>::try_new(-16), Err(NarrowingError));
    assert_eq!(Elastic::<U4, B0>::try_new(-1), Err(NarrowingError));
    assert_eq!(Elastic::<U100>::new(u64::MAX), u64::MAX);
    assert_eq!(Elastic::from(i8::MIN), -128);
    assert_eq!(Elastic::from(u128::MAX), u128::MAX);
  }

  #[test]
  fn constants() {
    fn digits<T: Number>(_: T) -> (u32, bool) { (T::DIGITS, T::IS_SIGNED) }
    assert_eq!(digits(elastic!(0)), (1, true));
    assert_eq!(digits(elastic!(1)), (1, true));
    assert_eq!(digits(elastic!(255)), (8, true));
    assert_eq!(digits(elastic!(-256)), (9, true));
    assert_eq!(digits(elastic!(1_u64 << 40)), (41, true));
    assert_eq!(elastic!(-256), -256);
  }

  #[test]
  fn comparisons_across_widths() {
    let small = Elastic::<U4, B0>::new(15);
    let big = Elastic::<U128>::new(-1);
    assert!(big < small);
    assert!(small > big);
    assert_eq!(Elastic::<U4>::new(3), Elastic::<U16, B0>::new(3));
    assert!(Elastic::<U16, B0>::new(60000) > 59999_u16);
    assert!(-1 < Elastic::<U8, B0>::new(0));
  }

  #[test]
  fn display() {
    assert_eq!(format!("{}", Elastic::<U12>::new(-1234)), "-1234");
    assert_eq!(format!("{:?}", Elastic::<U12, B0>::new(7)), "Elastic<u12>(7)");
  }
}
