//! The *digits* layer: one trait, [`Number`], that every numeric type of this crate implements
//! (the primitive integers, [`Duplex`](crate::Duplex), [`Elastic`](crate::Elastic),
//! [`Overflow`](crate::Overflow), [`Rounding`](crate::Rounding) and [`Scaled`](crate::Scaled)),
//! plus the type-level mapping [`SetDigits`] from a digit count to a storage type.
//!
//! The wrappers compose: `Scaled<Overflow<Elastic<U40>, Saturated>, N8>` is a number whose
//! representation is a number whose representation is a number. Every layer reports how many
//! value bits ("digits") it has, whether it is signed, and how to read and write its bit
//! pattern one 64-bit word at a time; that is enough for any layer to convert from any other
//! without knowing what it is.

use core::cmp::Ordering;

use typenum::Unsigned;

use crate::Int;

mod set_digits;

pub use set_digits::{Contribution, SetDigits, SetDigitsOf, WideInteger};

/// A number type of this crate, or a primitive integer.
pub trait Number: Copy + Default + core::fmt::Debug {
  /// Number of value bits, excluding the sign bit.
  ///
  /// ```
  /// # use compnum::*;
  /// # use compnum::typenum::U12;
  /// assert_eq!(<i32 as Number>::DIGITS, 31);
  /// assert_eq!(<u32 as Number>::DIGITS, 32);
  /// assert_eq!(<Elastic<U12> as Number>::DIGITS, 12);
  /// ```
  const DIGITS: u32;

  const IS_SIGNED: bool;

  /// Width of the storage, in bits. At least `DIGITS + IS_SIGNED`.
  const BITS: u32;

  /// The type one layer down (`Self` for the primitives and [`Duplex`](crate::Duplex)).
  type Rep: Number;

  /// The machine integer at the bottom of the stack of layers, which holds the bit pattern.
  type Storage: Int;

  fn to_rep(self) -> Self::Rep;
  fn from_rep(rep: Self::Rep) -> Self;

  /// The greatest representable value.
  fn max_value() -> Self;

  /// The least representable value (most negative, or zero if unsigned).
  fn lowest() -> Self;

  /// The least representable value greater than zero.
  fn min_positive() -> Self;

  fn is_negative(self) -> bool;

  /// The 64 bits of the two's complement representation starting at bit `offset`,
  /// sign-extended past the top of the storage.
  fn word(self, offset: u32) -> u64;

  /// Build from a bit pattern, given as a function from bit offset to the 64 bits starting
  /// there (the inverse of [`Number::word`]). Bits past the storage are discarded.
  fn from_words<F: Fn(u32) -> u64>(f: F) -> Self;

  /// Conversion to `f64`, rounding if inexact.
  fn to_f64(self) -> f64;

  /// Conversion from `f64`. Integer types truncate, like `as`; wrappers may round according to
  /// their policy.
  fn from_f64(x: f64) -> Self;

  /// Multiply by `radix ^ exp` (divide if `exp` is negative).
  fn scale(self, exp: i32, radix: u32) -> Self;

  /// Conversion from any machine integer. The default keeps the bit pattern (like `as`);
  /// wrappers that check for overflow override this.
  #[inline]
  fn from_int<I: Int>(x: I) -> Self {
    Self::from_words(|offset| x.word(offset))
  }

  /// Bitwise conversion from any other [`Number`], sign-extending or truncating.
  #[inline]
  fn from_number<T: Number>(x: T) -> Self {
    Self::from_words(|offset| x.word(offset))
  }

  /// Whether an inexact integer result should be stepped one unit away from zero, having been
  /// truncated towards zero. The arguments are those of
  /// [`RoundingTag::away_from_zero`](crate::rounding::RoundingTag::away_from_zero). Only
  /// [`Rounding`](crate::Rounding) (and the layers above it) ever do.
  #[inline]
  fn round_away(negative: bool, inexact: bool, half: Ordering) -> bool {
    let _ = (negative, inexact, half);
    false
  }

  /// Compare the representation of `self` with that of any other [`Number`], as integers.
  #[inline]
  fn cmp_number<T: Number>(self, other: T) -> Ordering {
    cmp_words(self, other)
  }
}

/// `Self` with room for `N` more digits: an [`Elastic`](crate::Elastic) (under any number of
/// policy wrappers) grows by `N`, a machine integer stays what it is.
///
/// ```
/// # use compnum::*;
/// # use compnum::digits::Widen;
/// # use compnum::typenum::{U4, U8, U12};
/// let x: <Overflow<Elastic<U8>, Saturated> as Widen<U4>>::Output = Overflow::new(4095);
/// assert_eq!(x, Overflow::<Elastic<U12>, Saturated>::new(4095));
/// let _: <i32 as Widen<U4>>::Output = 0_i32;
/// ```
pub trait Widen<N: Unsigned>: Number {
  type Output: Number;
}

impl<I: Int, N: Unsigned> Widen<N> for I {
  type Output = I;
}

/// Number of value bits in `T`.
pub const fn digits<T: Number>() -> u32 {
  T::DIGITS
}

pub const fn is_signed<T: Number>() -> bool {
  T::IS_SIGNED
}

/// The least number of digits that can hold the magnitude of `value` (at least 1).
///
/// ```
/// # use compnum::digits_for;
/// assert_eq!(digits_for(0), 1);
/// assert_eq!(digits_for(255), 8);
/// assert_eq!(digits_for(256), 9);
/// assert_eq!(digits_for(-128), 8);
/// ```
pub const fn digits_for(value: i128) -> usize {
  let used = 128 - value.unsigned_abs().leading_zeros();
  if used == 0 { 1 } else { used as usize }
}

/// Integer comparison of two bit patterns of possibly different width and signedness.
pub(crate) fn cmp_words<A: Number, B: Number>(a: A, b: B) -> Ordering {
  match (a.is_negative(), b.is_negative()) {
    (true, false) => return Ordering::Less,
    (false, true) => return Ordering::Greater,
    _ => (),
  }
  // Same sign: the sign-extended words compare like unsigned integers, most significant first.
  let top = A::BITS.max(B::BITS).div_ceil(64) * 64;
  (0 .. top).step_by(64).rev()
    .map(|offset| a.word(offset).cmp(&b.word(offset)))
    .find(|&ordering| ordering != Ordering::Equal)
    .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn digits_for_small() {
    assert_eq!(digits_for(1), 1);
    assert_eq!(digits_for(-1), 1);
    assert_eq!(digits_for(127), 7);
    assert_eq!(digits_for(i128::MAX), 127);
    assert_eq!(digits_for(i128::MIN), 128);
  }

  #[test]
  fn cmp_mixed_signedness() {
    assert_eq!(cmp_words(-1_i8, u128::MAX), Ordering::Less);
    assert_eq!(cmp_words(u64::MAX, i32::MAX), Ordering::Greater);
    assert_eq!(cmp_words(200_u8, 200_i64), Ordering::Equal);
    assert_eq!(cmp_words(i128::MIN, -1_i8), Ordering::Less);
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn cmp_matches_i128(a: i64, b: i128) {
      prop_assert_eq!(cmp_words(a, b), i128::from(a).cmp(&b))
    }

    #[test]
    fn cmp_matches_u64(a: u64, b: i32) {
      prop_assert_eq!(cmp_words(a, b), i128::from(a).cmp(&i128::from(b)))
    }
  }
}
