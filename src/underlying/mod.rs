//! This module contains the machine-integer layer that every other type in the crate is built
//! on. The sealed [`Int`] trait is implemented for the primitive integers (`i8` to `i128`, `u8`
//! to `u128`) and, recursively, for [`Duplex`] compositions of them; these are the only types
//! that can act as a *word* of a wider integer, or as the representation of an
//! [overflow-checked](crate::Overflow) integer.
//!
//! All operations here have *wrapping* two's complement semantics and never panic, except
//! division by zero. Detecting overflow is the job of [`crate::ops`], not of this layer.

use crate::digits::Number;
use crate::Duplex;

/// The trait for two's complement machine integers that can serve as a representation word
/// (only satisfied by the primitive integers and [`Duplex`] compositions of them).
///
/// This is a *sealed* type.
pub trait Int: Sealed {}

/// Actual operations implemented here.
pub trait Sealed:
  Number<Rep = Self> +
  Eq + Ord +
  core::hash::Hash +
  core::fmt::Display
{
  /// The unsigned integer of the same width (`Self` if already unsigned).
  type Unsigned: Int;

  /// The signedness of `Self` as a type-level bit (`B1` signed, `B0` unsigned).
  type Signedness: typenum::Bit;

  const ZERO: Self;
  const ONE: Self;
  const MIN: Self;
  const MAX: Self;

  /// Reinterpret the bit pattern as unsigned.
  fn to_unsigned(self) -> Self::Unsigned;

  /// Reinterpret an unsigned bit pattern as `Self`.
  fn from_unsigned(x: Self::Unsigned) -> Self;

  fn from_bool(x: bool) -> Self;

  /// Number of leading (most significant) 0 bits of the bit pattern.
  fn leading_zeros(self) -> u32;

  fn bit_not(self) -> Self;
  fn bit_and(self, other: Self) -> Self;
  fn bit_or(self, other: Self) -> Self;
  fn bit_xor(self, other: Self) -> Self;

  /// Shift left by `n`; shifting by `Self::BITS` or more yields `0`.
  fn shift_left(self, n: u32) -> Self;

  /// Shift right by `n` (arithmetic if signed, logical if unsigned); shifting by `Self::BITS` or
  /// more yields `0` or `-1`.
  fn shift_right(self, n: u32) -> Self;

  fn wrapping_add(self, other: Self) -> Self;
  fn wrapping_sub(self, other: Self) -> Self;
  fn wrapping_mul(self, other: Self) -> Self;
  fn wrapping_neg(self) -> Self;

  /// Truncating quotient and remainder, wrapping on `MIN / -1`. Panics if `other` is zero.
  fn wrapping_div_rem(self, other: Self) -> (Self, Self);

  /// Add with carry-in, returning the carry-out. The operands are treated as *unsigned* bit
  /// patterns, whatever the signedness of `Self`.
  fn add_carry(self, other: Self, carry: bool) -> (Self, bool);

  /// Subtract with borrow-in, returning the borrow-out. The operands are treated as *unsigned*
  /// bit patterns, whatever the signedness of `Self`.
  fn sub_borrow(self, other: Self, borrow: bool) -> (Self, bool);

  /// Multiply the *unsigned* bit patterns of `self` and `other` without loss, returning the
  /// `(lo, hi)` words of the double-width product.
  fn mul_wide(self, other: Self) -> (Self, Self);

  /// Divide the double-width *unsigned* value with words `(self, lo)` by `divisor`, returning
  /// `(quotient, remainder)`. The quotient must fit in one word, that is `self < divisor` as
  /// unsigned. Panics if `divisor` is zero.
  fn div_wide(self, lo: Self, divisor: Self) -> (Self, Self);

  /// Reinterpret the value of `self` in another [`Int`], sign-extending or truncating as needed
  /// (the generic version of the keyword `as` between integers).
  ///
  /// ```ignore
  /// assert_eq!((-2_i8).cast::<u16>(), 0xfffe);
  /// assert_eq!(0x1234_i32.cast::<u8>(), 0x34);
  /// ```
  #[inline]
  fn cast<T: Int>(self) -> T {
    T::from_words(|offset| self.word(offset))
  }

  /// Whether [`Sealed::cast`] to `T` preserves the value of `self`.
  #[inline]
  fn fits<T: Int>(self) -> bool where Self: Int {
    let narrowed = self.cast::<T>();
    narrowed.is_negative() == self.is_negative() && narrowed.cast::<Self>() == self
  }

  #[inline]
  fn from_u64(x: u64) -> Self {
    Self::from_words(|offset| if offset < 64 { x >> offset } else { 0 })
  }

  #[inline]
  fn from_i64(x: i64) -> Self {
    Self::from_words(|offset| if offset < 64 { (x >> offset) as u64 } else { (x >> 63) as u64 })
  }
}

/// Multiply `self` by `radix ^ exp`. A negative `exp` divides, truncating towards zero like
/// native integer division does. Overflow wraps.
pub(crate) fn scale_int<T: Int>(x: T, exp: i32, radix: u32) -> T {
  let n = exp.unsigned_abs();
  match (exp >= 0, radix) {
    (true, 2) => x.shift_left(n),
    (false, 2) => shr_truncating(x, n),
    (true, _) => {
      let radix = T::from_u64(radix.into());
      (0 .. n).fold(x, |acc, _| acc.wrapping_mul(radix))
    },
    (false, _) => {
      let radix = T::from_u64(radix.into());
      let mut acc = x;
      // Nested truncating divisions by a positive divisor compose: trunc(trunc(x/r)/r) is
      // trunc(x/r²).
      for _ in 0 .. n {
        if acc == T::ZERO { break }
        acc = acc.wrapping_div_rem(radix).0;
      }
      acc
    },
  }
}

/// `x / 2^n`, truncated towards zero (an arithmetic shift right rounds towards -∞ instead).
pub(crate) fn shr_truncating<T: Int>(x: T, n: u32) -> T {
  let floor = x.shift_right(n);
  if x.is_negative() && floor.shift_left(n) != x {
    floor.wrapping_add(T::ONE)
  } else {
    floor
  }
}

/// [`Sealed::div_wide`] for any unsigned `T`, by Knuth's long division with *half* words as
/// digits: after normalizing the divisor so that its top bit is set, each of the two quotient
/// digits is estimated from a one-word division, and corrected at most twice.
pub(crate) fn div_wide_by_halves<T: Int>(hi: T, lo: T, divisor: T) -> (T, T) {
  assert!(divisor != T::ZERO, "attempt to divide by zero");
  let h = T::BITS / 2;
  let base = T::ONE.shift_left(h);
  let mask = base.wrapping_sub(T::ONE);

  let s = divisor.leading_zeros();
  let v = divisor.shift_left(s);
  let (v1, v0) = (v.shift_right(h), v.bit_and(mask));
  // `shift_right` by the full width gives zero, which covers `s == 0`.
  let u_hi = hi.shift_left(s).bit_or(lo.shift_right(T::BITS - s));
  let u10 = lo.shift_left(s);
  let (u1, u0) = (u10.shift_right(h), u10.bit_and(mask));

  let digit = |u: T, next: T| {
    let (mut q, mut rhat) = u.wrapping_div_rem(v1);
    while q >= base || q.wrapping_mul(v0) > rhat.shift_left(h).bit_or(next) {
      q = q.wrapping_sub(T::ONE);
      rhat = rhat.wrapping_add(v1);
      if rhat >= base { break }
    }
    (q, u.shift_left(h).bit_or(next).wrapping_sub(q.wrapping_mul(v)))
  };
  let (q1, u21) = digit(u_hi, u1);
  let (q0, rest) = digit(u21, u0);
  (q1.shift_left(h).bit_or(q0), rest.shift_right(s))
}

/// Integer square root of the *unsigned* bit pattern of `x`, computed digit by digit (two bits
/// of input per bit of output), with no division and no Newton iteration.
pub(crate) fn isqrt<T: Int>(x: T) -> T {
  let mut rem = x;
  let mut root = T::ZERO;
  // The highest power of 4 representable in `T`, lowered until it is not above `x`.
  let mut bit = T::ONE.shift_left((T::BITS - 2) & !1);
  while bit.to_unsigned() > rem.to_unsigned() {
    bit = bit.to_unsigned().shift_right(2).cast();
  }
  while bit != T::ZERO {
    let trial = root.wrapping_add(bit);
    if rem.to_unsigned() >= trial.to_unsigned() {
      rem = rem.wrapping_sub(trial);
      root = root.to_unsigned().shift_right(1).cast::<T>().wrapping_add(bit);
    } else {
      root = root.to_unsigned().shift_right(1).cast();
    }
    bit = bit.to_unsigned().shift_right(2).cast();
  }
  root
}

/// `2^n` as an `f64`, for any `n` (returns `0.` or `inf` out of range).
pub(crate) fn exp2(n: i32) -> f64 {
  if (-1022 ..= 1023).contains(&n) {
    f64::from_bits(((n + 1023) as u64) << 52)
  } else if n > 0 {
    f64::INFINITY
  } else {
    // Subnormals: go as far as the exponent field allows, then keep halving.
    (0 .. -1022 - n).fold(exp2(-1022), |acc, _| acc * 0.5)
  }
}

/// `radix ^ exp` as an `f64`, by repeated squaring.
pub(crate) fn powi(radix: u32, exp: i32) -> f64 {
  if radix == 2 { return exp2(exp) }
  let mut base = f64::from(radix);
  let mut n = exp.unsigned_abs();
  let mut acc = 1.;
  while n != 0 {
    if n & 1 == 1 { acc *= base }
    base *= base;
    n >>= 1;
  }
  if exp < 0 { 1. / acc } else { acc }
}

/// Round towards zero (`f64::trunc` is not available in `core`).
pub(crate) fn trunc(x: f64) -> f64 {
  // At and above 2^52 every finite f64 is already an integer.
  const EXACT: f64 = 4503599627370496.;
  if -EXACT < x && x < EXACT { x as i64 as f64 } else { x }
}

/// Round to the nearest integer, ties away from zero (`f64::round` is not available in `core`).
pub(crate) fn round_half_away(x: f64) -> f64 {
  let trunc = trunc(x);
  let frac = x - trunc;
  if frac >= 0.5 {
    trunc + 1.
  } else if frac <= -0.5 {
    trunc - 1.
  } else {
    trunc
  }
}

impl<U: Int, L: Int> Int for Duplex<U, L> {}

mod int;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scale_int_radix_2() {
    assert_eq!(scale_int(3_i32, 4, 2), 48);
    assert_eq!(scale_int(48_i32, -4, 2), 3);
    assert_eq!(scale_int(-49_i32, -4, 2), -3);
    assert_eq!(scale_int(-1_i32, -40, 2), 0);
    assert_eq!(scale_int(1_i8, 8, 2), 0);
  }

  #[test]
  fn scale_int_radix_10() {
    assert_eq!(scale_int(7_i32, 3, 10), 7000);
    assert_eq!(scale_int(-7999_i32, -3, 10), -7);
    assert_eq!(scale_int(123_u8, -5, 10), 0);
  }

  #[test]
  fn shr_truncating_rounds_towards_zero() {
    assert_eq!(shr_truncating(-5_i8, 1), -2);
    assert_eq!(shr_truncating(5_i8, 1), 2);
    assert_eq!(shr_truncating(-4_i8, 1), -2);
    assert_eq!(shr_truncating(i8::MIN, 7), -1);
    assert_eq!(shr_truncating(i8::MIN, 8), 0);
  }

  #[test]
  fn isqrt_exhaustive_u16() {
    for x in 0 ..= u16::MAX {
      let root = isqrt(x);
      assert!(u32::from(root) * u32::from(root) <= u32::from(x), "{x}");
      assert!((u32::from(root) + 1) * (u32::from(root) + 1) > u32::from(x), "{x}");
    }
  }

  #[test]
  fn isqrt_u128() {
    assert_eq!(isqrt(u128::MAX), u128::from(u64::MAX));
    assert_eq!(isqrt(1_u128 << 100), 1 << 50);
  }

  #[test]
  fn exp2_and_powi() {
    assert_eq!(exp2(0), 1.);
    assert_eq!(exp2(10), 1024.);
    assert_eq!(exp2(-3), 0.125);
    assert_eq!(exp2(-1074), f64::from_bits(1));
    assert_eq!(powi(10, 3), 1000.);
    assert_eq!(powi(10, -2), 0.01);
    assert_eq!(powi(3, 5), 243.);
  }

  #[test]
  fn trunc_f64() {
    assert_eq!(trunc(2.9), 2.);
    assert_eq!(trunc(-2.9), -2.);
    assert_eq!(trunc(-0.5), 0.);
    assert_eq!(trunc(1e20), 1e20);
    assert!(trunc(f64::NAN).is_nan());
  }

  #[test]
  fn round_half_away_ties() {
    assert_eq!(round_half_away(2.5), 3.);
    assert_eq!(round_half_away(-2.5), -3.);
    assert_eq!(round_half_away(2.4999), 2.);
    assert_eq!(round_half_away(-0.2), 0.);
    assert_eq!(round_half_away(1e300), 1e300);
  }
}
