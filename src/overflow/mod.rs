//! [`Overflow`]: a number whose type carries an overflow policy, and the policy tags.
//!
//! | Tag                | On overflow                                                        |
//! |--------------------|--------------------------------------------------------------------|
//! | [`NativeOverflow`] | Wraps, like the native operators (no check at all)                 |
//! | [`Undefined`]      | Declared impossible: checked and panics in debug, wraps in release |
//! | [`Saturated`]      | Clamps to the maximum or the lowest value                          |
//! | [`Throwing`]       | Unwinds with an [`OverflowError`] payload                          |
//! | [`Trapping`]       | Aborts the process                                                 |
//!
//! Combining operands with different tags gives the greater tag in the order of this table.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use typenum::{Bit, Unsigned};

use crate::{Elastic, Int};
use crate::digits::{Number, SetDigits, Widen, cmp_words};
use crate::error::{self, OverflowError};
use crate::ops::{self, Direction, OverflowTag, Tag, tag_order};

/// No checks: results wrap around, exactly like the wrapping arithmetic of the primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NativeOverflow;

/// Overflow is a bug that the programmer promises never happens.
///
/// Rust cannot let a safe operator have undefined behaviour, so instead: builds with
/// `debug_assertions` check and panic, like the native operators do, while release builds
/// skip the check and wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Undefined;

/// Results clamp to the maximum or lowest representable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Saturated;

/// Overflow unwinds, with an [`OverflowError`] as the panic payload (see
/// [`std::panic::catch_unwind`]). For a `Result` instead, use the `try_*` methods of
/// [`Overflow`] or [`ops::checked`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Throwing;

/// Overflow terminates the process, after logging and printing a diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Trapping;

impl Tag for NativeOverflow {}
impl Tag for Undefined {}
impl Tag for Saturated {}
impl Tag for Throwing {}
impl Tag for Trapping {}

tag_order!{
  NativeOverflow < Undefined,
  NativeOverflow < Saturated,
  NativeOverflow < Throwing,
  NativeOverflow < Trapping,
  Undefined < Saturated,
  Undefined < Throwing,
  Undefined < Trapping,
  Saturated < Throwing,
  Saturated < Trapping,
  Throwing < Trapping,
}

impl OverflowTag for NativeOverflow {
  const CHECKED: bool = false;

  #[inline]
  fn on_overflow<R: Number>(_: Direction, wrapped: R) -> R { wrapped }
}

impl OverflowTag for Undefined {
  const CHECKED: bool = cfg!(debug_assertions);

  #[track_caller]
  fn on_overflow<R: Number>(direction: Direction, _: R) -> R {
    panic!("{} in an operation declared never to overflow", OverflowError::from(direction))
  }
}

impl OverflowTag for Saturated {
  const CHECKED: bool = true;

  #[inline]
  fn on_overflow<R: Number>(direction: Direction, _: R) -> R {
    match direction {
      Direction::Positive => R::max_value(),
      Direction::Negative => R::lowest(),
    }
  }
}

impl OverflowTag for Throwing {
  const CHECKED: bool = true;

  #[track_caller]
  fn on_overflow<R: Number>(direction: Direction, _: R) -> R {
    error::throw(direction.into())
  }
}

impl OverflowTag for Trapping {
  const CHECKED: bool = true;

  #[track_caller]
  fn on_overflow<R: Number>(direction: Direction, _: R) -> R {
    error::trap(direction.into())
  }
}

/// A number `R` whose arithmetic applies the overflow policy `T`.
///
/// `R` is a machine integer (primitive or [`Duplex`](crate::Duplex)) or an
/// [`Elastic`]. Over a machine integer, every operator checks, before computing anything,
/// whether the exact result fits in `R`; if it does not, the policy `T` decides the outcome.
/// Operators accept a plain `R` on either side too, which is promoted to `Overflow<R, T>`.
///
/// Over an [`Elastic`], the operators widen as those of [`Elastic`] do, so they cannot
/// overflow; the policy applies where a value is narrowed instead: conversions, compound
/// assignment and `<<`.
///
/// # Examples
///
/// ```
/// # use compnum::*;
/// # use compnum::typenum::{U8, U9, B0};
/// let a = Overflow::<i8, Saturated>::from(127);
/// assert_eq!(a + 1, 127);
/// assert_eq!(-a - 10, -128);
///
/// let b = Overflow::<i8, NativeOverflow>::from(127);
/// assert_eq!(b + 1, -128);
///
/// let c = Overflow::<i8, Throwing>::from(127);
/// assert_eq!(c.try_add(1.into()), Err(OverflowError::Positive));
///
/// let mut d = Overflow::<Elastic<U8, B0>, Saturated>::new(200);
/// let sum: Overflow<Elastic<U9, B0>, Saturated> = d + d;
/// assert_eq!(sum, 400);
/// d += d;
/// assert_eq!(d, 255);
/// ```
#[repr(transparent)]
pub struct Overflow<R, T> {
  rep: R,
  tag: PhantomData<T>,
}

impl<R: Number, T: OverflowTag> Overflow<R, T> {
  /// Construct from a raw representation, without any check.
  #[inline]
  pub const fn from_rep(rep: R) -> Self {
    Self { rep, tag: PhantomData }
  }

  #[inline]
  pub const fn rep(self) -> R {
    self.rep
  }

  /// Convert from any machine integer, applying the overflow policy if `value` does not fit.
  ///
  /// ```
  /// # use compnum::*;
  /// # use compnum::typenum::U4;
  /// assert_eq!(Overflow::<u8, Saturated>::new(1000_i32), 255);
  /// assert_eq!(Overflow::<u8, Saturated>::new(-1_i8), 0);
  /// assert_eq!(Overflow::<u8, NativeOverflow>::new(1000_i32), 232);
  /// assert_eq!(Overflow::<Elastic<U4>, Saturated>::new(-100), -15);
  /// ```
  #[inline]
  pub fn new<I: Int>(value: I) -> Self {
    Number::from_int(value)
  }

  /// Convert to any machine integer, applying the overflow policy if the value does not fit.
  #[inline]
  pub fn to_int<I: Int>(self) -> I {
    Overflow::<I, T>::from_number(self.rep).rep
  }

  /// Which way `x` falls outside the range of `R`, if it does.
  fn direction<N: Number>(x: N) -> Option<Direction> {
    if cmp_words(x, R::max_value()) == Ordering::Greater {
      Some(Direction::Positive)
    } else if cmp_words(x, R::lowest()) == Ordering::Less {
      Some(Direction::Negative)
    } else {
      None
    }
  }
}

impl<R: Int, T: OverflowTag> Overflow<R, T> {
  pub fn try_add(self, rhs: Self) -> Result<Self, OverflowError> {
    ops::checked::<ops::AddOp, R>(self.rep, rhs.rep).map(Self::from_rep)
  }

  pub fn try_sub(self, rhs: Self) -> Result<Self, OverflowError> {
    ops::checked::<ops::SubOp, R>(self.rep, rhs.rep).map(Self::from_rep)
  }

  pub fn try_mul(self, rhs: Self) -> Result<Self, OverflowError> {
    ops::checked::<ops::MulOp, R>(self.rep, rhs.rep).map(Self::from_rep)
  }

  /// Panics if `rhs` is zero, like the native division.
  pub fn try_div(self, rhs: Self) -> Result<Self, OverflowError> {
    ops::checked::<ops::DivOp, R>(self.rep, rhs.rep).map(Self::from_rep)
  }
}

impl<R: Widen<N>, T: OverflowTag, N: Unsigned> Widen<N> for Overflow<R, T> {
  type Output = Overflow<R::Output, T>;
}

impl<R: Number, T: OverflowTag> Number for Overflow<R, T> {
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

  #[inline]
  fn min_positive() -> Self { Self::from_rep(R::min_positive()) }

  #[inline]
  fn is_negative(self) -> bool { self.rep.is_negative() }

  #[inline]
  fn word(self, offset: u32) -> u64 { self.rep.word(offset) }

  #[inline]
  fn from_words<F: Fn(u32) -> u64>(f: F) -> Self { Self::from_rep(R::from_words(f)) }

  #[inline]
  fn to_f64(self) -> f64 { self.rep.to_f64() }

  /// Truncates towards zero, and applies the overflow policy if out of range. NaN becomes zero.
  fn from_f64(x: f64) -> Self {
    // `max + 1` and `x - lowest` are exact or round the right way, for any width of `R`.
    let direction = if x >= R::max_value().to_f64() + 1. {
      Some(Direction::Positive)
    } else if x - R::lowest().to_f64() <= -1. {
      Some(Direction::Negative)
    } else {
      None
    };
    let wrapped = R::from_f64(x);
    match direction {
      Some(direction) if T::CHECKED => Self::from_rep(T::on_overflow(direction, wrapped)),
      _ => Self::from_rep(wrapped),
    }
  }

  /// Scaling up applies the overflow policy; scaling down truncates and cannot overflow.
  fn scale(self, exp: i32, radix: u32) -> Self {
    let scaled = self.rep.scale(exp, radix);
    if exp <= 0 || !T::CHECKED {
      return Self::from_rep(scaled)
    }
    // Scaling back down is exact unless bits were lost on the way up.
    let lost = cmp_words(scaled.scale(-exp, radix), self.rep) != Ordering::Equal;
    if lost || Self::direction(scaled).is_some() {
      let direction = if self.rep.is_negative() { Direction::Negative } else { Direction::Positive };
      Self::from_rep(T::on_overflow(direction, scaled))
    } else {
      Self::from_rep(scaled)
    }
  }

  #[inline]
  fn from_int<I: Int>(x: I) -> Self { Self::from_number(x) }

  /// Like [`Number::from_int`], from any layered number.
  fn from_number<N: Number>(x: N) -> Self {
    let wrapped = R::from_number(x);
    match Self::direction(x) {
      Some(direction) if T::CHECKED => Self::from_rep(T::on_overflow(direction, wrapped)),
      _ => Self::from_rep(wrapped),
    }
  }

  #[inline]
  fn round_away(negative: bool, inexact: bool, half: Ordering) -> bool {
    R::round_away(negative, inexact, half)
  }
}

impl<R: Number, T: OverflowTag> From<R> for Overflow<R, T> {
  #[inline]
  fn from(rep: R) -> Self { Self::from_rep(rep) }
}

impl<R: Number, T: OverflowTag> Clone for Overflow<R, T> {
  #[inline]
  fn clone(&self) -> Self { *self }
}

impl<R: Number, T: OverflowTag> Copy for Overflow<R, T> {}

impl<R: Number, T: OverflowTag> Default for Overflow<R, T> {
  #[inline]
  fn default() -> Self { Self::from_rep(R::default()) }
}

impl<R: Number + Hash, T: OverflowTag> Hash for Overflow<R, T> {
  fn hash<H: Hasher>(&self, state: &mut H) { self.rep.hash(state) }
}

impl<R: Number, T: OverflowTag> fmt::Debug for Overflow<R, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let tag = core::any::type_name::<T>().rsplit("::").next().unwrap_or_default();
    write!(f, "Overflow<{tag}>({:?})", self.rep)
  }
}

impl<R: Number + fmt::Display, T: OverflowTag> fmt::Display for Overflow<R, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.rep, f) }
}

/// Values compare as integers, regardless of tag and representation.
impl<R1, T1, R2, T2> PartialEq<Overflow<R2, T2>> for Overflow<R1, T1>
where
  R1: Number, T1: OverflowTag,
  R2: Number, T2: OverflowTag,
{
  #[inline]
  fn eq(&self, other: &Overflow<R2, T2>) -> bool { cmp_words(self.rep, other.rep) == Ordering::Equal }
}

impl<R: Number, T: OverflowTag> Eq for Overflow<R, T> {}

impl<R1, T1, R2, T2> PartialOrd<Overflow<R2, T2>> for Overflow<R1, T1>
where
  R1: Number, T1: OverflowTag,
  R2: Number, T2: OverflowTag,
{
  #[inline]
  fn partial_cmp(&self, other: &Overflow<R2, T2>) -> Option<Ordering> {
    Some(cmp_words(self.rep, other.rep))
  }
}

impl<R: Number, T: OverflowTag> Ord for Overflow<R, T> {
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering { cmp_words(self.rep, other.rep) }
}

impl<R: Number, T: OverflowTag, X: Int> PartialEq<X> for Overflow<R, T> {
  #[inline]
  fn eq(&self, other: &X) -> bool { cmp_words(self.rep, *other) == Ordering::Equal }
}

impl<R: Number, T: OverflowTag, X: Int> PartialOrd<X> for Overflow<R, T> {
  #[inline]
  fn partial_cmp(&self, other: &X) -> Option<Ordering> { Some(cmp_words(self.rep, *other)) }
}

impl<R: Number, T: OverflowTag, D: SetDigits<S>, S: Bit> PartialEq<Elastic<D, S>> for Overflow<R, T> {
  #[inline]
  fn eq(&self, other: &Elastic<D, S>) -> bool { cmp_words(self.rep, *other) == Ordering::Equal }
}

impl<R: Number, T: OverflowTag, D: SetDigits<S>, S: Bit> PartialOrd<Elastic<D, S>> for Overflow<R, T> {
  #[inline]
  fn partial_cmp(&self, other: &Elastic<D, S>) -> Option<Ordering> {
    Some(cmp_words(self.rep, *other))
  }
}

mod ops_impl;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::I256;
  use crate::underlying::Sealed;
  use proptest::prelude::*;

  #[test]
  fn scenarios() {
    assert_eq!(Overflow::<i8, Saturated>::from(127) + 1, 127);
    assert_eq!(Overflow::<i8, NativeOverflow>::from(127) + 1, -128);
  }

  #[test]
  #[cfg(feature = "std")]
  fn throwing_unwinds_with_error() {
    let thrown = std::panic::catch_unwind(|| Overflow::<i8, Throwing>::from(127) + 1).unwrap_err();
    assert_eq!(thrown.downcast_ref::<OverflowError>(), Some(&OverflowError::Positive));
  }

  #[test]
  #[cfg(debug_assertions)]
  #[should_panic(expected = "negative overflow in an operation declared never to overflow")]
  fn undefined_panics_in_debug() {
    let _ = Overflow::<u16, Undefined>::from(0) - 1;
  }

  #[test]
  fn conversions() {
    assert_eq!(Overflow::<i8, Saturated>::new(-1000_i64), i8::MIN);
    assert_eq!(Overflow::<i8, Saturated>::new(u128::MAX), i8::MAX);
    assert_eq!(Overflow::<i8, Saturated>::new(-5_i128), -5);
    assert_eq!(Overflow::<i64, Saturated>::new(I256::MAX), i64::MAX);
    assert_eq!(Overflow::<i8, Saturated>::from_number(Overflow::<i32, NativeOverflow>::from(300)), 127);
    assert_eq!(Overflow::<u8, Saturated>::from_number(-3_i16), 0);
    assert_eq!(Overflow::<u8, Saturated>::from_number(200_i16), 200);
    assert_eq!(Overflow::<u32, Saturated>::from(7).to_int::<i8>(), 7);
    assert_eq!(Overflow::<u32, Saturated>::from(700).to_int::<i8>(), 127);
  }

  #[test]
  fn floats() {
    assert_eq!(Overflow::<i16, Saturated>::from_f64(1e9), i16::MAX);
    assert_eq!(Overflow::<i16, Saturated>::from_f64(-1e9), i16::MIN);
    assert_eq!(Overflow::<i16, Saturated>::from_f64(-12.7), -12);
    assert_eq!(Overflow::<i16, Saturated>::from_f64(f64::NAN), 0);
    assert_eq!(Overflow::<u8, Throwing>::from_f64(-0.5), 0);
    assert_eq!(Overflow::<i64, Throwing>::from_f64(-9223372036854775808.), i64::MIN);
    assert_eq!(Overflow::<i64, Saturated>::from_f64(9223372036854775808.), i64::MAX);
  }

  #[test]
  fn scale() {
    assert_eq!(Overflow::<i16, Saturated>::from(3).scale(4, 2), 48);
    assert_eq!(Overflow::<i16, Saturated>::from(3).scale(14, 2), i16::MAX);
    assert_eq!(Overflow::<i16, Saturated>::from(-3).scale(5, 10), i16::MIN);
    assert_eq!(Overflow::<i16, Saturated>::from(-3000).scale(-3, 10), -3);
  }

  #[test]
  fn try_ops() {
    type S = Overflow<u8, Saturated>;
    assert_eq!(S::from(200).try_add(S::from(55)), Ok(S::from(255)));
    assert_eq!(S::from(200).try_add(S::from(56)), Err(OverflowError::Positive));
    assert_eq!(S::from(2).try_sub(S::from(3)), Err(OverflowError::Negative));
    assert_eq!(S::from(16).try_mul(S::from(16)), Err(OverflowError::Positive));
    assert_eq!(S::from(16).try_div(S::from(3)), Ok(S::from(5)));
  }

  #[test]
  fn elastic_representation() {
    use typenum::{B0, U8, U10};
    type E = Overflow<Elastic<U8>, Saturated>;
    assert_eq!(<E as Number>::max_value(), 255);
    assert_eq!(<E as Number>::lowest(), -255);
    assert_eq!(E::new(1000), 255);
    assert_eq!(E::new(-256_i64), -255);
    assert_eq!(E::from_f64(255.9), 255);
    assert_eq!(E::from_f64(256.), 255);
    assert_eq!(E::from_f64(-1e9), -255);
    assert_eq!(E::from_number(Elastic::<U10, B0>::new(1023)), 255);
    assert_eq!(E::new(100).scale(1, 2), 200);
    assert_eq!(E::new(100).scale(2, 2), 255);
    assert_eq!(E::new(-100).scale(1, 10), -255);
    assert_eq!(E::new(-100).scale(-1, 10), -10);
    assert_eq!(E::new(200).to_int::<i8>(), 127);
    assert_eq!(Overflow::<Elastic<U8>, NativeOverflow>::new(100).scale(2, 2), 400);
  }

  #[test]
  fn limits() {
    assert_eq!(<Overflow<i32, Saturated> as Number>::max_value(), i32::MAX);
    assert_eq!(<Overflow<u32, Trapping> as Number>::lowest(), 0);
    assert_eq!(<Overflow<u32, Trapping> as Number>::DIGITS, 32);
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn saturating_matches_std(a: i32, b: i32) {
      type S = Overflow<i32, Saturated>;
      prop_assert_eq!(S::from(a) + S::from(b), a.saturating_add(b));
      prop_assert_eq!(S::from(a) - S::from(b), a.saturating_sub(b));
      prop_assert_eq!(S::from(a) * S::from(b), a.saturating_mul(b));
    }

    #[test]
    fn checked_matches_std(a: i64, b: i64) {
      type S = Overflow<i64, Throwing>;
      prop_assert_eq!(S::from(a).try_add(S::from(b)).ok().map(S::rep), a.checked_add(b));
      prop_assert_eq!(S::from(a).try_sub(S::from(b)).ok().map(S::rep), a.checked_sub(b));
      prop_assert_eq!(S::from(a).try_mul(S::from(b)).ok().map(S::rep), a.checked_mul(b));
    }

    #[test]
    fn conversion_matches_std(a: i64) {
      let expected = i16::try_from(a).unwrap_or(if a < 0 { i16::MIN } else { i16::MAX });
      prop_assert_eq!(Overflow::<i16, Saturated>::new(a), expected);
    }
  }
}
