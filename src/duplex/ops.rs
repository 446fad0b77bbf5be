use core::ops::*;

use super::Duplex;
use crate::Int;
use crate::ops::Increment;
use crate::underlying::Sealed;

/// Helper macro for implementing operators for all combinations of value and reference
macro_rules! mk_ops {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident, $impl:expr) => {
    impl<U: Int, L: Int> $trait<Duplex<U, L>> for Duplex<U, L> {
      type Output = Duplex<U, L>;

      #[inline]
      fn $name(self, rhs: Self) -> Self::Output { $impl(self, rhs) }
    }

    impl<U: Int, L: Int> $trait<&Duplex<U, L>> for Duplex<U, L> {
      type Output = Duplex<U, L>;

      #[inline]
      fn $name(self, rhs: &Self) -> Self::Output { $impl(self, *rhs) }
    }

    impl<U: Int, L: Int> $trait<Duplex<U, L>> for &Duplex<U, L> {
      type Output = Duplex<U, L>;

      #[inline]
      fn $name(self, rhs: Duplex<U, L>) -> Self::Output { $impl(*self, rhs) }
    }

    impl<U: Int, L: Int> $trait<&Duplex<U, L>> for &Duplex<U, L> {
      type Output = Duplex<U, L>;

      #[inline]
      fn $name(self, rhs: &Duplex<U, L>) -> Self::Output { $impl(*self, *rhs) }
    }

    impl<U: Int, L: Int> $trait_assign<Duplex<U, L>> for Duplex<U, L> {
      #[inline]
      fn $name_assign(&mut self, rhs: Duplex<U, L>) { *self = $impl(*self, rhs) }
    }

    impl<U: Int, L: Int> $trait_assign<&Duplex<U, L>> for Duplex<U, L> {
      #[inline]
      fn $name_assign(&mut self, rhs: &Duplex<U, L>) { *self = $impl(*self, *rhs) }
    }
  }
}

mk_ops!{Add, AddAssign, add, add_assign, Sealed::wrapping_add}
mk_ops!{Sub, SubAssign, sub, sub_assign, Sealed::wrapping_sub}
mk_ops!{Mul, MulAssign, mul, mul_assign, Sealed::wrapping_mul}
mk_ops!{Div, DivAssign, div, div_assign, |a: Duplex<U, L>, b: Duplex<U, L>| Sealed::wrapping_div_rem(a, b).0}
mk_ops!{Rem, RemAssign, rem, rem_assign, |a: Duplex<U, L>, b: Duplex<U, L>| Sealed::wrapping_div_rem(a, b).1}
mk_ops!{BitAnd, BitAndAssign, bitand, bitand_assign, Sealed::bit_and}
mk_ops!{BitOr, BitOrAssign, bitor, bitor_assign, Sealed::bit_or}
mk_ops!{BitXor, BitXorAssign, bitxor, bitxor_assign, Sealed::bit_xor}

/// Shifting by the width of the `Duplex` or more gives `0` (or `-1`, shifting a negative
/// number right), rather than panicking.
impl<U: Int, L: Int> Shl<u32> for Duplex<U, L> {
  type Output = Self;

  #[inline]
  fn shl(self, rhs: u32) -> Self { self.shift_left(rhs) }
}

impl<U: Int, L: Int> Shr<u32> for Duplex<U, L> {
  type Output = Self;

  #[inline]
  fn shr(self, rhs: u32) -> Self { self.shift_right(rhs) }
}

impl<U: Int, L: Int> ShlAssign<u32> for Duplex<U, L> {
  #[inline]
  fn shl_assign(&mut self, rhs: u32) { *self = self.shift_left(rhs) }
}

impl<U: Int, L: Int> ShrAssign<u32> for Duplex<U, L> {
  #[inline]
  fn shr_assign(&mut self, rhs: u32) { *self = self.shift_right(rhs) }
}

impl<U: Int, L: Int> Neg for Duplex<U, L> {
  type Output = Self;

  #[inline]
  fn neg(self) -> Self { self.wrapping_neg() }
}

impl<U: Int, L: Int> Not for Duplex<U, L> {
  type Output = Self;

  #[inline]
  fn not(self) -> Self { self.bit_not() }
}

/// The upper half only changes when the lower half carries (or borrows).
impl<U: Int, L: Int> Increment for Duplex<U, L> {
  fn increment(&mut self) {
    self.lower = self.lower.wrapping_add(L::ONE);
    if self.lower == L::ZERO {
      self.upper = self.upper.wrapping_add(U::ONE);
    }
  }

  fn decrement(&mut self) {
    if self.lower == L::ZERO {
      self.upper = self.upper.wrapping_sub(U::ONE);
    }
    self.lower = self.lower.wrapping_sub(L::ONE);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::I256;
  use crate::digits::Number;
  use proptest::prelude::*;

  type D64 = Duplex<i32, u32>;

  fn d64(x: i64) -> D64 { D64::from_int(x) }

  #[test]
  fn operators() {
    assert_eq!(d64(5) + d64(-7), d64(-2));
    assert_eq!(&d64(5) - d64(7), d64(-2));
    assert_eq!(d64(1 << 40) * &d64(3), d64(3 << 40));
    assert_eq!(&d64(-100) / &d64(7), d64(-14));
    assert_eq!(d64(-100) % d64(7), d64(-2));
    assert_eq!(d64(0b1100) & d64(0b1010), d64(0b1000));
    assert_eq!(d64(0b1100) | d64(0b1010), d64(0b1110));
    assert_eq!(d64(0b1100) ^ d64(0b1010), d64(0b0110));
    assert_eq!(-d64(3), d64(-3));
    assert_eq!(!d64(0), d64(-1));
    assert_eq!(d64(3) << 33, d64(3 << 33));
    assert_eq!(d64(-(3 << 33)) >> 33, d64(-3));
  }

  #[test]
  fn assign() {
    let mut x = d64(10);
    x += d64(5);
    x *= &d64(3);
    x -= d64(1);
    x /= d64(4);
    x <<= 40;
    x >>= 39;
    assert_eq!(x, d64(22));
  }

  #[test]
  fn increment_carries() {
    let mut x = D64::from_parts(0, u32::MAX);
    x.increment();
    assert_eq!(x, D64::from_parts(1, 0));
    x.decrement();
    assert_eq!(x, D64::from_parts(0, u32::MAX));

    let mut y = I256::MAX;
    y.increment();
    assert_eq!(y, I256::MIN);
    y.decrement();
    assert_eq!(y, I256::MAX);
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn increment_matches_add(a: i64) {
      let mut x = d64(a);
      x.increment();
      prop_assert_eq!(x, d64(a.wrapping_add(1)));
      x.decrement();
      x.decrement();
      prop_assert_eq!(x, d64(a.wrapping_sub(1)));
    }
  }
}
