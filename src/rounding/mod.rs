//! [`Rounding`]: a number whose type carries a rounding policy, and the policy tags.
//!
//! A rounding policy only matters where a remainder is discarded: division, `>>`, conversion
//! from `f64`, and scaling down (as done by [`Scaled`](crate::Scaled) when it converts to a
//! coarser exponent). Everything else passes straight through to the representation.
//!
//! | Tag                       | `5 / 2` | `-5 / 2` | `7 / 3` | `-7 / 3` |
//! |---------------------------|---------|----------|---------|----------|
//! | [`NativeRounding`]        | 2       | -2       | 2       | -2       |
//! | [`NegativeInfinity`]      | 2       | -3       | 2       | -3       |
//! | [`TieToPositiveInfinity`] | 3       | -2       | 2       | -2       |
//! | [`TowardsInfinity`]       | 3       | -3       | 3       | -3       |
//! | [`Nearest`]               | 3       | -3       | 2       | -2       |
//!
//! Combining operands with different tags gives the greater tag in the order of this table.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Div, Rem};

use typenum::{Bit, Unsigned};

use crate::{Elastic, Int, Overflow};
use crate::digits::{Number, SetDigits, Widen, cmp_words};
use crate::ops::{OverflowTag, Tag, tag_order};
use crate::underlying::{self, Sealed};

mod ops_impl;

/// Truncate towards zero, like the native integer division.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NativeRounding;

/// Round half away from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nearest;

/// Round away from zero, whenever anything is discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TowardsInfinity;

/// Round to nearest, ties towards +∞.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TieToPositiveInfinity;

/// Round towards -∞ (floor).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NegativeInfinity;

impl Tag for NativeRounding {}
impl Tag for Nearest {}
impl Tag for TowardsInfinity {}
impl Tag for TieToPositiveInfinity {}
impl Tag for NegativeInfinity {}

tag_order!{
  NativeRounding < NegativeInfinity,
  NativeRounding < TieToPositiveInfinity,
  NativeRounding < TowardsInfinity,
  NativeRounding < Nearest,
  NegativeInfinity < TieToPositiveInfinity,
  NegativeInfinity < TowardsInfinity,
  NegativeInfinity < Nearest,
  TieToPositiveInfinity < TowardsInfinity,
  TieToPositiveInfinity < Nearest,
  TowardsInfinity < Nearest,
}

/// A tag that decides which way an inexact result is rounded.
///
/// All rounding in this crate reduces to one question: having truncated an exact result
/// towards zero, should the magnitude go up by one?
pub trait RoundingTag: Tag {
  /// `negative`: the exact result is below zero. `inexact`: something non-zero was discarded.
  /// `half`: how the magnitude of what was discarded compares to one half.
  fn away_from_zero(negative: bool, inexact: bool, half: Ordering) -> bool;
}

impl RoundingTag for NativeRounding {
  #[inline]
  fn away_from_zero(_: bool, _: bool, _: Ordering) -> bool { false }
}

impl RoundingTag for Nearest {
  #[inline]
  fn away_from_zero(_: bool, inexact: bool, half: Ordering) -> bool {
    inexact && half != Ordering::Less
  }
}

impl RoundingTag for TowardsInfinity {
  #[inline]
  fn away_from_zero(_: bool, inexact: bool, _: Ordering) -> bool { inexact }
}

impl RoundingTag for TieToPositiveInfinity {
  #[inline]
  fn away_from_zero(negative: bool, inexact: bool, half: Ordering) -> bool {
    inexact && (half == Ordering::Greater || half == Ordering::Equal && !negative)
  }
}

impl RoundingTag for NegativeInfinity {
  #[inline]
  fn away_from_zero(negative: bool, inexact: bool, _: Ordering) -> bool { negative && inexact }
}

/// `lhs / rhs`, rounded according to `T`. Panics if `rhs` is zero.
///
/// ```
/// # use compnum::rounding::{divide, Nearest, NativeRounding, NegativeInfinity};
/// assert_eq!(divide::<Nearest, i32>(5, 2), 3);
/// assert_eq!(divide::<NativeRounding, i32>(5, 2), 2);
/// assert_eq!(divide::<NegativeInfinity, i32>(-1, 3), -1);
/// ```
pub fn divide<T, R>(lhs: R, rhs: R) -> R
where
  T: RoundingTag,
  R: Number + Div<Output = R> + Rem<Output = R>,
{
  lhs.divide_rounded::<T>(rhs)
}

/// Division rounded according to a [`RoundingTag`], between any two numbers whose quotient and
/// remainder are numbers (such as [`Elastic`]s of different widths).
///
/// ```
/// # use compnum::*;
/// # use compnum::rounding::DivideRounded;
/// # use compnum::typenum::{U4, U8};
/// let q = Elastic::<U8>::new(-100).divide_rounded::<Nearest>(Elastic::<U4>::new(8));
/// assert_eq!(q, -13);
/// ```
pub trait DivideRounded<Rhs = Self>: Div<Rhs> {
  /// Panics if `rhs` is zero.
  fn divide_rounded<T: RoundingTag>(self, rhs: Rhs) -> Self::Output;
}

impl<A, B> DivideRounded<B> for A
where
  A: Number + Div<B> + Rem<B>,
  B: Number,
  <A as Div<B>>::Output: Number,
  <A as Rem<B>>::Output: Number,
{
  fn divide_rounded<T: RoundingTag>(self, rhs: B) -> Self::Output {
    let quotient = self / rhs;
    let remainder = self % rhs;
    if cmp_words(remainder, 0_u8) == Ordering::Equal {
      return quotient
    }
    let negative = self.is_negative() != rhs.is_negative();
    if T::away_from_zero(negative, true, cmp_half(remainder, rhs)) {
      away(quotient, negative)
    } else {
      quotient
    }
  }
}

/// Step `x` one unit further from zero, in the direction given by `negative`.
#[inline]
pub(crate) fn away<N: Number>(x: N, negative: bool) -> N {
  step::<N, N::Storage>(x, negative)
}

#[inline]
fn step<N: Number, S: Int>(x: N, negative: bool) -> N {
  let x = S::from_number(x);
  N::from_number(if negative { x.wrapping_sub(S::ONE) } else { x.wrapping_add(S::ONE) })
}

/// How `|remainder|` compares to `|divisor| / 2`, given that it is less than `|divisor|`.
pub(crate) fn cmp_half<A: Number, B: Number>(remainder: A, divisor: B) -> Ordering {
  // The magnitude of any `B`, even the most negative, fits in the unsigned storage of `B`.
  cmp_half_in::<<B::Storage as Sealed>::Unsigned, A, B>(remainder, divisor)
}

fn cmp_half_in<U: Int, A: Number, B: Number>(remainder: A, divisor: B) -> Ordering {
  let (remainder, divisor) = (magnitude::<U, A>(remainder), magnitude::<U, B>(divisor));
  match remainder.cmp(&divisor.shift_right(1)) {
    // An odd divisor has no exact half: `(d - 1) / 2` is below it.
    Ordering::Equal if divisor.bit_and(U::ONE) == U::ONE => Ordering::Less,
    ordering => ordering,
  }
}

/// `|x|`, as an unsigned integer wide enough to hold it.
#[inline]
fn magnitude<U: Int, N: Number>(x: N) -> U {
  let bits = U::from_number(x);
  if x.is_negative() { bits.wrapping_neg() } else { bits }
}

/// `truncated` is `x / radix^n` truncated towards zero; round it according to `T` instead.
fn round_scaled<T: RoundingTag, R: Number, S: Int>(x: R, truncated: R, n: u32, radix: u32) -> R {
  let wide = S::from_number(truncated);
  // `|truncated × radix^n| <= |x|`, so this cannot overflow.
  let back = if wide == S::ZERO { S::ZERO } else { wide.scale(n as i32, radix) };
  let discarded = S::from_number(x).wrapping_sub(back);
  if discarded == S::ZERO {
    return truncated
  }
  let negative = x.is_negative();
  if T::away_from_zero(negative, true, cmp_half_scaled(discarded, n, radix)) {
    away(truncated, negative)
  } else {
    truncated
  }
}

/// How `|x| / radix^n` compares to one half, given that it is less than one. Looks at one
/// digit at a time, from the most significant, and stops as soon as the answer is known.
fn cmp_half_scaled<S: Int>(x: S, n: u32, radix: u32) -> Ordering {
  if n == 0 {
    return if x == S::ZERO { Ordering::Less } else { Ordering::Greater }
  }
  let digit = x.scale(1 - n as i32, radix);
  let rest = if digit == S::ZERO { x } else { x.wrapping_sub(digit.scale(n as i32 - 1, radix)) };
  // `|digit| < radix`, so this is exact.
  let digit = digit.to_f64();
  let twice = 2 * (if digit < 0. { -digit } else { digit }) as u64;
  let radix = u64::from(radix);
  match twice.cmp(&radix) {
    Ordering::Greater => Ordering::Greater,
    Ordering::Equal => if rest == S::ZERO { Ordering::Equal } else { Ordering::Greater },
    // Only with an odd radix: the answer depends on whether the rest is above one half.
    Ordering::Less if twice + 1 == radix => cmp_half_scaled(rest, n - 1, radix as u32),
    Ordering::Less => Ordering::Less,
  }
}

/// `x` rounded to an integer according to `T`. NaN and infinities are returned unchanged.
pub(crate) fn round_f64<T: RoundingTag>(x: f64) -> f64 {
  let truncated = underlying::trunc(x);
  let discarded = x - truncated;
  if discarded == 0. || discarded.is_nan() {
    return truncated
  }
  let magnitude = if discarded < 0. { -discarded } else { discarded };
  let half = if magnitude < 0.5 {
    Ordering::Less
  } else if magnitude > 0.5 {
    Ordering::Greater
  } else {
    Ordering::Equal
  };
  let negative = x < 0.;
  match T::away_from_zero(negative, true, half) {
    true if negative => truncated - 1.,
    true => truncated + 1.,
    false => truncated,
  }
}

/// A number `R` whose division, right shift, and conversions from `f64` and to coarser scales
/// round according to the policy `T`.
///
/// `R` is anything that behaves as an integer: a primitive, a [`Duplex`](crate::Duplex), an
/// [`Elastic`], or an [`Overflow`](crate::Overflow) of any of these (in which case the overflow
/// policy also applies, for example to `MIN / -1`). Operators between `Rounding`s of different
/// representations return a `Rounding` of whatever the operator on the representations
/// returns, so a `Rounding` of an [`Elastic`] widens like an [`Elastic`] does.
///
/// # Examples
///
/// ```
/// # use compnum::*;
/// # use compnum::typenum::U8;
/// let five = Rounding::<i32, Nearest>::from(5);
/// assert_eq!(five / 2, 3);
/// assert_eq!(-five / 2, -3);
/// assert_eq!(Rounding::<i32, NativeRounding>::from(5) / 2, 2);
/// assert_eq!(Rounding::<i32, Nearest>::from_f64(2.5), 3);
///
/// let byte = Rounding::<Elastic<U8>, Nearest>::new(255);
/// assert_eq!(byte / Elastic::<U8>::new(2), 128);
/// ```
#[repr(transparent)]
pub struct Rounding<R, T> {
  rep: R,
  tag: PhantomData<T>,
}

impl<R: Number, T: RoundingTag> Rounding<R, T> {
  #[inline]
  pub const fn from_rep(rep: R) -> Self {
    Self { rep, tag: PhantomData }
  }

  #[inline]
  pub fn rep(self) -> R {
    self.rep
  }

  /// Convert from any machine integer, the way `R` does.
  #[inline]
  pub fn new<I: Int>(value: I) -> Self {
    Self::from_rep(R::from_int(value))
  }
}

impl<R: Widen<N>, T: RoundingTag, N: Unsigned> Widen<N> for Rounding<R, T> {
  type Output = Rounding<R::Output, T>;
}

impl<R: Number, T: RoundingTag> Number for Rounding<R, T> {
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

  #[inline]
  fn from_f64(x: f64) -> Self { Self::from_rep(R::from_f64(round_f64::<T>(x))) }

  /// Scaling down rounds, scaling up is exact (up to the overflow behaviour of `R`).
  fn scale(self, exp: i32, radix: u32) -> Self {
    let truncated = self.rep.scale(exp, radix);
    if exp >= 0 {
      return Self::from_rep(truncated)
    }
    Self::from_rep(round_scaled::<T, R, R::Storage>(self.rep, truncated, exp.unsigned_abs(), radix))
  }

  #[inline]
  fn from_int<I: Int>(x: I) -> Self { Self::from_rep(R::from_int(x)) }

  #[inline]
  fn from_number<N: Number>(x: N) -> Self { Self::from_rep(R::from_number(x)) }

  #[inline]
  fn round_away(negative: bool, inexact: bool, half: Ordering) -> bool {
    T::away_from_zero(negative, inexact, half)
  }
}

impl<R: Number, T: RoundingTag> From<R> for Rounding<R, T> {
  #[inline]
  fn from(rep: R) -> Self { Self::from_rep(rep) }
}

impl<R: Number, T: RoundingTag> Clone for Rounding<R, T> {
  #[inline]
  fn clone(&self) -> Self { *self }
}

impl<R: Number, T: RoundingTag> Copy for Rounding<R, T> {}

impl<R: Number, T: RoundingTag> Default for Rounding<R, T> {
  #[inline]
  fn default() -> Self { Self::from_rep(R::default()) }
}

impl<R: Number + Hash, T: RoundingTag> Hash for Rounding<R, T> {
  fn hash<H: Hasher>(&self, state: &mut H) { self.rep.hash(state) }
}

impl<R: Number, T: RoundingTag> fmt::Debug for Rounding<R, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let tag = core::any::type_name::<T>().rsplit("::").next().unwrap_or_default();
    write!(f, "Rounding<{tag}>({:?})", self.rep)
  }
}

impl<R: Number + fmt::Display, T: RoundingTag> fmt::Display for Rounding<R, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.rep, f) }
}

/// Values compare as integers, regardless of tag and representation.
impl<R1, T1, R2, T2> PartialEq<Rounding<R2, T2>> for Rounding<R1, T1>
where
  R1: Number, T1: RoundingTag,
  R2: Number, T2: RoundingTag,
{
  #[inline]
  fn eq(&self, other: &Rounding<R2, T2>) -> bool { cmp_words(self.rep, other.rep) == Ordering::Equal }
}

impl<R: Number, T: RoundingTag> Eq for Rounding<R, T> {}

impl<R1, T1, R2, T2> PartialOrd<Rounding<R2, T2>> for Rounding<R1, T1>
where
  R1: Number, T1: RoundingTag,
  R2: Number, T2: RoundingTag,
{
  #[inline]
  fn partial_cmp(&self, other: &Rounding<R2, T2>) -> Option<Ordering> {
    Some(cmp_words(self.rep, other.rep))
  }
}

impl<R: Number, T: RoundingTag> Ord for Rounding<R, T> {
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering { cmp_words(self.rep, other.rep) }
}

/// Comparison with the bare representations: machine integers, [`Overflow`]s and [`Elastic`]s.
macro_rules! mk_cmp {
  ($([$($params:tt)*] $rhs:ty;)*) => {$(
    impl<R: Number, T: RoundingTag, $($params)*> PartialEq<$rhs> for Rounding<R, T> {
      #[inline]
      fn eq(&self, other: &$rhs) -> bool { cmp_words(self.rep, *other) == Ordering::Equal }
    }

    impl<R: Number, T: RoundingTag, $($params)*> PartialOrd<$rhs> for Rounding<R, T> {
      #[inline]
      fn partial_cmp(&self, other: &$rhs) -> Option<Ordering> { Some(cmp_words(self.rep, *other)) }
    }
  )*}
}

mk_cmp!{
  [X: Int] X;
  [R2: Number, T2: OverflowTag] Overflow<R2, T2>;
  [D: SetDigits<S>, S: Bit] Elastic<D, S>;
}
