//! The operator types, each with its closed-form overflow predicate.

use super::{BinaryOperator, Direction, ShiftOperator, UnaryOperator};
use crate::Int;

macro_rules! operator {
  ($($(#[$meta:meta])* $name:ident),*) => {$(
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct $name;
  )*}
}

operator!{
  /// `+`
  AddOp,
  /// `-`
  SubOp,
  /// `*`
  MulOp,
  /// `/`, truncating
  DivOp,
  /// `%`, with the sign of the dividend
  RemOp,
  /// `&`
  BitAndOp,
  /// `|`
  BitOrOp,
  /// `^`
  BitXorOp,
  /// `<<`
  ShlOp,
  /// `>>`, arithmetic for signed operands
  ShrOp,
  /// Unary `-`
  NegOp,
  /// `!`
  NotOp
}

impl BinaryOperator for AddOp {
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R { lhs.wrapping_add(rhs) }

  fn overflow<R: Int>(lhs: R, rhs: R) -> Option<Direction> {
    if rhs.is_negative() {
      (lhs < R::MIN.wrapping_sub(rhs)).then_some(Direction::Negative)
    } else {
      (lhs > R::MAX.wrapping_sub(rhs)).then_some(Direction::Positive)
    }
  }
}

impl BinaryOperator for SubOp {
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R { lhs.wrapping_sub(rhs) }

  fn overflow<R: Int>(lhs: R, rhs: R) -> Option<Direction> {
    if rhs.is_negative() {
      (lhs > R::MAX.wrapping_add(rhs)).then_some(Direction::Positive)
    } else {
      (lhs < R::MIN.wrapping_add(rhs)).then_some(Direction::Negative)
    }
  }
}

impl BinaryOperator for MulOp {
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R { lhs.wrapping_mul(rhs) }

  fn overflow<R: Int>(lhs: R, rhs: R) -> Option<Direction> {
    if lhs == R::ZERO || rhs == R::ZERO {
      return None
    }
    // The quotients below truncate towards zero; in each case that is the rounding direction
    // that keeps the comparison exact. None of them can be `MIN / -1`.
    let quotient = |a: R, b: R| a.wrapping_div_rem(b).0;
    match (lhs.is_negative(), rhs.is_negative()) {
      (false, false) => (lhs > quotient(R::MAX, rhs)).then_some(Direction::Positive),
      (true, true) => (lhs < quotient(R::MAX, rhs)).then_some(Direction::Positive),
      (false, true) => (rhs < quotient(R::MIN, lhs)).then_some(Direction::Negative),
      (true, false) => (lhs < quotient(R::MIN, rhs)).then_some(Direction::Negative),
    }
  }
}

impl BinaryOperator for DivOp {
  /// Panics if `rhs` is zero.
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R { lhs.wrapping_div_rem(rhs).0 }

  fn overflow<R: Int>(lhs: R, rhs: R) -> Option<Direction> {
    let minus_one = R::ZERO.wrapping_sub(R::ONE);
    (R::IS_SIGNED && lhs == R::MIN && rhs == minus_one).then_some(Direction::Positive)
  }
}

impl BinaryOperator for RemOp {
  /// Panics if `rhs` is zero.
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R { lhs.wrapping_div_rem(rhs).1 }

  #[inline]
  fn overflow<R: Int>(_: R, _: R) -> Option<Direction> { None }
}

impl BinaryOperator for BitAndOp {
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R { lhs.bit_and(rhs) }

  #[inline]
  fn overflow<R: Int>(_: R, _: R) -> Option<Direction> { None }
}

impl BinaryOperator for BitOrOp {
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R { lhs.bit_or(rhs) }

  #[inline]
  fn overflow<R: Int>(_: R, _: R) -> Option<Direction> { None }
}

impl BinaryOperator for BitXorOp {
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: R) -> R { lhs.bit_xor(rhs) }

  #[inline]
  fn overflow<R: Int>(_: R, _: R) -> Option<Direction> { None }
}

impl ShiftOperator for ShlOp {
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: u32) -> R { lhs.shift_left(rhs) }

  /// Overflows if any significant bit, or the sign, would be lost: that is, iff shifting back
  /// does not restore `lhs`.
  fn overflow<R: Int>(lhs: R, rhs: u32) -> Option<Direction> {
    let lost = lhs.shift_left(rhs).shift_right(rhs) != lhs || rhs >= R::BITS && lhs != R::ZERO;
    let direction = if lhs.is_negative() { Direction::Negative } else { Direction::Positive };
    lost.then_some(direction)
  }
}

impl ShiftOperator for ShrOp {
  #[inline]
  fn wrapping<R: Int>(lhs: R, rhs: u32) -> R { lhs.shift_right(rhs) }

  #[inline]
  fn overflow<R: Int>(_: R, _: u32) -> Option<Direction> { None }
}

impl UnaryOperator for NegOp {
  #[inline]
  fn wrapping<R: Int>(x: R) -> R { x.wrapping_neg() }

  fn overflow<R: Int>(x: R) -> Option<Direction> {
    if R::IS_SIGNED {
      (x == R::MIN).then_some(Direction::Positive)
    } else {
      (x != R::ZERO).then_some(Direction::Negative)
    }
  }
}

impl UnaryOperator for NotOp {
  #[inline]
  fn wrapping<R: Int>(x: R) -> R { x.bit_not() }

  #[inline]
  fn overflow<R: Int>(_: R) -> Option<Direction> { None }
}
