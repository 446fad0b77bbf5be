//! [`Duplex`]: a two's complement integer made of two machine integers, and hence twice as wide.
//! Since a `Duplex` is itself an [`Int`], they nest: `Duplex<Duplex<i128, u128>, Duplex<u128,
//! u128>>` is a 512-bit integer.

use crate::Int;
use crate::digits::Number;
use crate::underlying::{Sealed, exp2, scale_int};

/// A double-width integer, made of an `upper` and a `lower` half, with value
/// `upper · 2^w + lower` where `w` is the width of a half.
///
/// `Upper` carries the signedness of the whole and `Lower` must be unsigned; both must be of
/// the same width (checked at compile time). Every arithmetic operator wraps on overflow, like
/// the `wrapping_*` methods of the primitives (to detect overflow, wrap a `Duplex` in an
/// [`Overflow`](crate::Overflow)).
///
/// The comparison operators compare the halves lexicographically, which matches comparing the
/// values.
///
/// # Examples
///
/// ```
/// # use compnum::*;
/// let a = I256::from(i128::MAX);
/// let b = a * a;
/// assert!(b > a);
/// assert_eq!(b / a, a);
/// assert_eq!(format!("{}", I256::from(-12345_i64)), "-12345");
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duplex<Upper, Lower> {
  // Declaration order matters: it is the order of the derived lexicographic comparison.
  upper: Upper,
  lower: Lower,
}

impl<U: Int, L: Int> Duplex<U, L> {
  /// Width of each half, in bits.
  const HALF: u32 = {
    assert!(U::BITS == L::BITS, "Both halves of a Duplex must be of the same width");
    assert!(!L::IS_SIGNED, "The lower half of a Duplex must be unsigned");
    L::BITS
  };

  /// Construct from the two halves, with value `upper · 2^w + lower`.
  #[inline]
  pub const fn from_parts(upper: U, lower: L) -> Self {
    Self { upper, lower }
  }

  #[inline]
  pub const fn upper(self) -> U { self.upper }

  #[inline]
  pub const fn lower(self) -> L { self.lower }
}

impl<U: Int, L: Int> Number for Duplex<U, L> {
  const DIGITS: u32 = U::DIGITS + L::DIGITS;
  const IS_SIGNED: bool = U::IS_SIGNED;
  const BITS: u32 = 2 * Self::HALF;

  type Rep = Self;
  type Storage = Self;

  #[inline]
  fn to_rep(self) -> Self { self }

  #[inline]
  fn from_rep(rep: Self) -> Self { rep }

  #[inline]
  fn max_value() -> Self { Self::MAX }

  #[inline]
  fn lowest() -> Self { Self::MIN }

  #[inline]
  fn min_positive() -> Self { Self::ONE }

  #[inline]
  fn is_negative(self) -> bool {
    self.upper.is_negative()
  }

  fn word(self, offset: u32) -> u64 {
    let h = Self::HALF;
    if offset >= h {
      self.upper.word(offset - h)
    } else if offset + 64 <= h {
      self.lower.word(offset)
    } else {
      // The window straddles both halves.
      self.lower.word(offset) | self.upper.word(0) << (h - offset)
    }
  }

  fn from_words<F: Fn(u32) -> u64>(f: F) -> Self {
    let h = Self::HALF;
    let upper = U::from_words(|offset| f(offset + h));
    let lower = L::from_words(&f);
    Self { upper, lower }
  }

  fn to_f64(self) -> f64 {
    self.upper.to_f64() * exp2(Self::HALF as i32) + self.lower.to_f64()
  }

  /// Truncating, like `as` for the primitives. Out of range values are not meaningful.
  fn from_f64(x: f64) -> Self {
    let scale = exp2(Self::HALF as i32);
    // `upper` is the floor of `x / 2^w`, so that the remainder for `lower` is non-negative.
    let mut upper = U::from_f64(x / scale);
    if upper.to_f64() * scale > x {
      upper = upper.wrapping_sub(U::ONE);
    }
    let lower = L::from_f64(x - upper.to_f64() * scale);
    Self { upper, lower }
  }

  fn scale(self, exp: i32, radix: u32) -> Self {
    scale_int(self, exp, radix)
  }
}

/// The [`Int`] implementation (the actual arithmetic).
mod int;

/// Long division.
mod div;

/// Operator overloads.
mod ops;

/// Conversions and formatting.
mod convert;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::I256;

  type D64 = Duplex<i32, u32>;
  type DU64 = Duplex<u32, u32>;

  #[test]
  fn parts() {
    let x = D64::from_parts(-1, 5);
    assert_eq!(x.upper(), -1);
    assert_eq!(x.lower(), 5);
    assert_eq!(x.cast::<i64>(), -(1 << 32) + 5);
  }

  #[test]
  fn limits() {
    assert_eq!(D64::MAX.cast::<i64>(), i64::MAX);
    assert_eq!(D64::MIN.cast::<i64>(), i64::MIN);
    assert_eq!(DU64::MAX.cast::<u64>(), u64::MAX);
    assert_eq!(<D64 as Number>::DIGITS, 63);
    assert_eq!(<DU64 as Number>::DIGITS, 64);
    assert_eq!(<I256 as Number>::BITS, 256);
  }

  #[test]
  fn ordering_is_lexicographic() {
    assert!(D64::from_parts(-1, u32::MAX) < D64::from_parts(0, 0));
    assert!(D64::from_parts(0, 1) < D64::from_parts(1, 0));
    assert!(D64::from_parts(-2, 7) < D64::from_parts(-1, 3));
  }

  #[test]
  fn words() {
    let x = D64::from_int(-0x1234_5678_9abc_i64);
    assert_eq!(x.word(0), (-0x1234_5678_9abc_i64) as u64);
    assert_eq!(x.word(16), (-0x1234_5678_9abc_i64 >> 16) as u64);
    assert_eq!(x.word(64), u64::MAX);
    let y = I256::from_parts(3, 1 << 127);
    assert_eq!(y.word(127), 0b111);
    assert_eq!(y.word(128), 3);
    assert_eq!(y.word(256), 0);
  }

  #[test]
  fn floats() {
    assert_eq!(D64::from_f64(-1.).cast::<i64>(), -1);
    assert_eq!(D64::from_f64(-3.5e12).cast::<i64>(), -3_500_000_000_000);
    assert_eq!(D64::from_f64(12.9).cast::<i64>(), 12);
    assert_eq!(D64::from_int(-7_000_000_000_i64).to_f64(), -7e9);
    let big = I256::from_f64(1e60);
    assert_eq!(big.to_f64(), 1e60);
    assert_eq!(I256::from_f64(-2f64.powi(200)).to_f64(), -2f64.powi(200));
  }
}
