//! Generic operator dispatch.
//!
//! Every arithmetic operator of a policy wrapper ([`Overflow`](crate::Overflow),
//! [`Rounding`](crate::Rounding)) funnels through here: an *operator* type (such as [`AddOp`])
//! knows how to compute the wrapping result and, separately, how to tell analytically whether
//! the exact result would be out of range; a *tag* type (such as
//! [`Saturated`](crate::Saturated)) decides what to do about it. Functions [`binary`],
//! [`shift`] and [`unary`] put the two together.
//!
//! When two operands carry different tags, the result carries their [`Common`] tag, given by a
//! fixed total order over each family of tags (so it is deterministic and symmetric).

use core::fmt::Debug;
use core::hash::Hash;

use crate::{Int, Number};
use crate::error::OverflowError;

mod operators;

pub use operators::*;

/// Which end of the range an out of range result fell off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  /// Greater than the maximum.
  Positive,
  /// Less than the lowest.
  Negative,
}

/// A binary operator with two operands of the same [`Int`] type.
pub trait BinaryOperator {
  /// The result, wrapped modulo 2^BITS like the native operators do.
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R;

  /// `None` if the exact result is representable in `R`, or else which way it overflows.
  /// Decided from the operands alone, without computing an out of range result.
  fn overflow<R: Int>(lhs: R, rhs: R) -> Option<Direction>;
}

/// A shift operator, with the shift amount as right operand.
pub trait ShiftOperator {
  fn wrapping<R: Int>(lhs: R, rhs: u32) -> R;
  fn overflow<R: Int>(lhs: R, rhs: u32) -> Option<Direction>;
}

pub trait UnaryOperator {
  fn wrapping<R: Int>(x: R) -> R;
  fn overflow<R: Int>(x: R) -> Option<Direction>;
}

/// A policy tag: a zero-sized type that only exists at the type level.
pub trait Tag: Copy + Default + Debug + Eq + Hash + 'static {}

/// The tag of the result of an operation between an operand tagged `Self` and one tagged `Rhs`.
///
/// Within a family of tags this is the greater of the two in a fixed total order, so
/// `Common<A, B>` and `Common<B, A>` are the same type.
pub trait CommonTag<Rhs: Tag>: Tag {
  type Output: Tag;
}

impl<T: Tag> CommonTag<T> for T {
  type Output = T;
}

/// Shorthand for the [`CommonTag`] of `A` and `B`.
pub type Common<A, B> = <A as CommonTag<B>>::Output;

/// Declare the total order of a family of tags, by listing every pair as `lesser < greater`.
macro_rules! tag_order {
  ($($lo:ident < $hi:ident),* $(,)?) => {$(
    impl $crate::ops::CommonTag<$hi> for $lo { type Output = $hi; }
    impl $crate::ops::CommonTag<$lo> for $hi { type Output = $hi; }
  )*}
}

pub(crate) use tag_order;

/// A tag that decides what happens when an operation overflows.
pub trait OverflowTag: Tag {
  /// Whether to look for overflow at all. If `false`, results wrap, like the native operators.
  const CHECKED: bool;

  /// Produce the result of an operation that overflowed in `direction`, given what the
  /// wrapping result would have been (or diverge). `R` is a machine integer for the operators,
  /// or any [`Number`] for conversions.
  fn on_overflow<R: Number>(direction: Direction, wrapped: R) -> R;
}

/// Apply `Op` to `lhs` and `rhs` under the overflow policy `T`.
#[inline]
pub fn binary<Op: BinaryOperator, T: OverflowTag, R: Int>(lhs: R, rhs: R) -> R {
  if T::CHECKED {
    if let Some(direction) = Op::overflow(lhs, rhs) {
      return T::on_overflow(direction, Op::wrapping(lhs, rhs))
    }
  }
  Op::wrapping(lhs, rhs)
}

#[inline]
pub fn shift<Op: ShiftOperator, T: OverflowTag, R: Int>(lhs: R, rhs: u32) -> R {
  if T::CHECKED {
    if let Some(direction) = Op::overflow(lhs, rhs) {
      return T::on_overflow(direction, Op::wrapping(lhs, rhs))
    }
  }
  Op::wrapping(lhs, rhs)
}

#[inline]
pub fn unary<Op: UnaryOperator, T: OverflowTag, R: Int>(x: R) -> R {
  if T::CHECKED {
    if let Some(direction) = Op::overflow(x) {
      return T::on_overflow(direction, Op::wrapping(x))
    }
  }
  Op::wrapping(x)
}

/// Apply `Op` to `lhs` and `rhs`, or return which way it overflowed.
///
/// ```
/// # use compnum::ops::{checked, AddOp, MulOp};
/// # use compnum::OverflowError;
/// assert_eq!(checked::<AddOp, i8>(100, 27), Ok(127));
/// assert_eq!(checked::<AddOp, i8>(100, 28), Err(OverflowError::Positive));
/// assert_eq!(checked::<MulOp, i8>(-100, 2), Err(OverflowError::Negative));
/// ```
#[inline]
pub fn checked<Op: BinaryOperator, R: Int>(lhs: R, rhs: R) -> Result<R, OverflowError> {
  match Op::overflow(lhs, rhs) {
    Some(direction) => Err(direction.into()),
    None => Ok(Op::wrapping(lhs, rhs)),
  }
}

/// Pre- and post-increment/decrement, which Rust lacks as operators. Implemented in terms of
/// `+=`/`-=` by every wrapper, so the same overflow and rounding policies apply.
pub trait Increment {
  fn increment(&mut self);
  fn decrement(&mut self);
}
