use super::{Int, Sealed};
use crate::digits::Number;

/// Implementation of almost all functions, `mul_wide` and `div_wide` need a handwritten impl for
/// `u128`/`i128`!
macro_rules! impl_common {
  ($int:ty, $uint:ty, $signedness:ty, $signed:literal) => {
    type Unsigned = $uint;
    type Signedness = $signedness;

    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MIN: Self = <$int>::MIN;
    const MAX: Self = <$int>::MAX;

    #[inline]
    fn to_unsigned(self) -> $uint { self as $uint }

    #[inline]
    fn from_unsigned(x: $uint) -> Self { x as $int }

    #[inline]
    fn from_bool(x: bool) -> Self { Self::from(x) }

    #[inline]
    fn leading_zeros(self) -> u32 { self.leading_zeros() }

    #[inline]
    fn bit_not(self) -> Self { !self }

    #[inline]
    fn bit_and(self, other: Self) -> Self { self & other }

    #[inline]
    fn bit_or(self, other: Self) -> Self { self | other }

    #[inline]
    fn bit_xor(self, other: Self) -> Self { self ^ other }

    #[inline]
    fn shift_left(self, n: u32) -> Self {
      if n >= <$int>::BITS { 0 } else { self << n }
    }

    #[inline]
    fn shift_right(self, n: u32) -> Self {
      if n < <$int>::BITS {
        self >> n
      } else if Number::is_negative(self) {
        !0
      } else {
        0
      }
    }

    #[inline]
    fn wrapping_add(self, other: Self) -> Self { self.wrapping_add(other) }

    #[inline]
    fn wrapping_sub(self, other: Self) -> Self { self.wrapping_sub(other) }

    #[inline]
    fn wrapping_mul(self, other: Self) -> Self { self.wrapping_mul(other) }

    #[inline]
    fn wrapping_neg(self) -> Self { self.wrapping_neg() }

    #[inline]
    fn wrapping_div_rem(self, other: Self) -> (Self, Self) {
      (self.wrapping_div(other), self.wrapping_rem(other))
    }

    #[inline]
    fn add_carry(self, other: Self, carry: bool) -> (Self, bool) {
      let (sum, c0) = (self as $uint).overflowing_add(other as $uint);
      let (sum, c1) = sum.overflowing_add(<$uint>::from(carry));
      (sum as $int, c0 | c1)
    }

    #[inline]
    fn sub_borrow(self, other: Self, borrow: bool) -> (Self, bool) {
      let (diff, b0) = (self as $uint).overflowing_sub(other as $uint);
      let (diff, b1) = diff.overflowing_sub(<$uint>::from(borrow));
      (diff as $int, b0 | b1)
    }
  }
}

/// [`Number`] is implemented identically for every primitive: the representation is the value.
macro_rules! impl_number {
  ($int:ty, $signed:literal) => {
    impl Number for $int {
      const DIGITS: u32 = <$int>::BITS - $signed as u32;
      const IS_SIGNED: bool = $signed;
      const BITS: u32 = <$int>::BITS;

      type Rep = Self;
      type Storage = Self;

      #[inline]
      fn to_rep(self) -> Self { self }

      #[inline]
      fn from_rep(rep: Self) -> Self { rep }

      #[inline]
      fn max_value() -> Self { <$int>::MAX }

      #[inline]
      fn lowest() -> Self { <$int>::MIN }

      #[inline]
      fn min_positive() -> Self { 1 }

      #[inline]
      fn is_negative(self) -> bool {
        $signed && self.leading_zeros() == 0
      }

      #[inline]
      fn word(self, offset: u32) -> u64 {
        // `as u128` sign-extends signed values, so only offsets past 128 need the fill.
        if offset < 128 {
          ((self as u128) >> offset) as u64
        } else if Number::is_negative(self) {
          u64::MAX
        } else {
          0
        }
      }

      #[inline]
      fn from_words<F: Fn(u32) -> u64>(f: F) -> Self {
        if <$int>::BITS <= 64 {
          f(0) as $int
        } else {
          (u128::from(f(0)) | u128::from(f(64)) << 64) as $int
        }
      }

      #[inline]
      fn to_f64(self) -> f64 { self as f64 }

      #[inline]
      fn from_f64(x: f64) -> Self { x as $int }

      #[inline]
      fn scale(self, exp: i32, radix: u32) -> Self {
        super::scale_int(self, exp, radix)
      }
    }
  }
}

macro_rules! impl_narrow {
  ($int:ty, $uint:ty, $uwide:ty, $signedness:ty, $signed:literal) => {
    impl Int for $int {}
    impl Sealed for $int {
      impl_common!{$int, $uint, $signedness, $signed}

      #[inline]
      fn mul_wide(self, other: Self) -> (Self, Self) {
        let product = (self as $uint as $uwide) * (other as $uint as $uwide);
        (product as $int, (product >> <$int>::BITS) as $int)
      }

      #[inline]
      fn div_wide(self, lo: Self, divisor: Self) -> (Self, Self) {
        let n = (self as $uint as $uwide) << <$int>::BITS | lo as $uint as $uwide;
        let d = divisor as $uint as $uwide;
        ((n / d) as $int, (n % d) as $int)
      }
    }
    impl_number!{$int, $signed}
  }
}

use typenum::{B0, B1};

impl_narrow!{i8, u8, u16, B1, true}
impl_narrow!{i16, u16, u32, B1, true}
impl_narrow!{i32, u32, u64, B1, true}
impl_narrow!{i64, u64, u128, B1, true}
impl_narrow!{u8, u8, u16, B0, false}
impl_narrow!{u16, u16, u32, B0, false}
impl_narrow!{u32, u32, u64, B0, false}
impl_narrow!{u64, u64, u128, B0, false}

impl Int for i128 {}
impl Sealed for i128 {
  impl_common!{i128, u128, B1, true}

  #[inline]
  fn mul_wide(self, other: Self) -> (Self, Self) {
    let (lo, hi) = mul_wide_u128(self as u128, other as u128);
    (lo as i128, hi as i128)
  }

  #[inline]
  fn div_wide(self, lo: Self, divisor: Self) -> (Self, Self) {
    let (quotient, remainder) = super::div_wide_by_halves(self as u128, lo as u128, divisor as u128);
    (quotient as i128, remainder as i128)
  }
}
impl_number!{i128, true}

impl Int for u128 {}
impl Sealed for u128 {
  impl_common!{u128, u128, B0, false}

  #[inline]
  fn mul_wide(self, other: Self) -> (Self, Self) {
    mul_wide_u128(self, other)
  }

  #[inline]
  fn div_wide(self, lo: Self, divisor: Self) -> (Self, Self) {
    super::div_wide_by_halves(self, lo, divisor)
  }
}
impl_number!{u128, false}

/// Full 256-bit product of two `u128`s as `(lo, hi)`, by schoolbook multiplication on 64-bit
/// halves (there is no native type twice as wide).
fn mul_wide_u128(lhs: u128, rhs: u128) -> (u128, u128) {
  const MASK: u128 = u64::MAX as u128;
  let (l0, l1) = (lhs & MASK, lhs >> 64);
  let (r0, r1) = (rhs & MASK, rhs >> 64);
  let p00 = l0 * r0;
  let p01 = l0 * r1;
  let p10 = l1 * r0;
  let p11 = l1 * r1;
  // At most 3 * (2^64 - 1), no overflow.
  let mid = (p00 >> 64) + (p01 & MASK) + (p10 & MASK);
  let lo = (p00 & MASK) | (mid << 64);
  let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
  (lo, hi)
}

#[cfg(test)]
#[allow(overflowing_literals)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn digits() {
    assert_eq!(<i8 as Number>::DIGITS, 7);
    assert_eq!(<u8 as Number>::DIGITS, 8);
    assert_eq!(<i64 as Number>::DIGITS, 63);
    assert_eq!(<u128 as Number>::DIGITS, 128);
  }

  #[test]
  fn word_sign_extends() {
    assert_eq!((-2_i8).word(0), 0xffff_ffff_ffff_fffe);
    assert_eq!((-2_i8).word(64), u64::MAX);
    assert_eq!((-2_i8).word(200), u64::MAX);
    assert_eq!(0xfe_u8.word(0), 0xfe);
    assert_eq!(0xfe_u8.word(4), 0xf);
    assert_eq!(u128::MAX.word(64), u64::MAX);
    assert_eq!(u128::MAX.word(128), 0);
    assert_eq!(0x1234_5678_i32.word(8), 0x12_3456);
  }

  #[test]
  fn cast() {
    assert_eq!((-2_i8).cast::<u16>(), 0xfffe);
    assert_eq!(0x1234_i32.cast::<u8>(), 0x34);
    assert_eq!(u64::MAX.cast::<i128>(), u64::MAX as i128);
    assert_eq!((-1_i128).cast::<u128>(), u128::MAX);
  }

  #[test]
  fn fits() {
    assert!(127_i32.fits::<i8>());
    assert!(!128_i32.fits::<i8>());
    assert!(!(-1_i32).fits::<u64>());
    assert!(!0x80_u8.fits::<i8>());
    assert!(u64::MAX.fits::<i128>());
    assert!(!u64::MAX.fits::<i64>());
  }

  #[test]
  fn shifts_clamp() {
    assert_eq!(1_i32.shift_left(32), 0);
    assert_eq!((-8_i32).shift_right(40), -1);
    assert_eq!(8_i32.shift_right(40), 0);
    assert_eq!(0x80_u8.shift_right(8), 0);
    assert_eq!(0x80_u8.shift_right(7), 1);
  }

  #[test]
  fn carries() {
    assert_eq!(0xff_u8.add_carry(0, true), (0, true));
    assert_eq!((-1_i8).add_carry(1, false), (0, true));
    assert_eq!(0_u8.sub_borrow(0, true), (0xff, true));
    assert_eq!(5_i8.sub_borrow(3, true), (1, false));
  }

  #[test]
  fn div_wide_corrects_estimate() {
    // Normalized divisors whose low half makes the first estimate of each digit too big.
    let divisor = (1_u128 << 127) | (u64::MAX as u128);
    let (q, r) = (divisor - 1).div_wide(u128::MAX, divisor);
    assert_eq!(q, u128::MAX);
    assert_eq!(r, divisor - 1);
    assert_eq!((-2_i8).div_wide(0, -1), (-2, -2));
    assert_eq!(3_u8.div_wide(0xe8, 10), (100, 0));
  }

  #[test]
  fn mul_wide_signed_is_unsigned() {
    assert_eq!((-1_i8).mul_wide(-1), (1, -2));
    assert_eq!(0x40_i8.mul_wide(4), (0, 1));
  }

  proptest!{
    #![proptest_config(ProptestConfig { max_global_rejects: crate::PROPTEST_CASES, ..ProptestConfig::with_cases(crate::PROPTEST_CASES) })]
    #[test]
    fn mul_wide_u64(a: u64, b: u64) {
      let (lo, hi) = a.mul_wide(b);
      prop_assert_eq!(u128::from(lo) | u128::from(hi) << 64, u128::from(a) * u128::from(b))
    }

    #[test]
    fn mul_wide_u128(a: u128, b: u128) {
      use malachite::Natural;
      let (lo, hi) = a.mul_wide(b);
      prop_assert_eq!((Natural::from(hi) << 128u32) + Natural::from(lo), Natural::from(a) * Natural::from(b))
    }

    #[test]
    fn div_wide_u64(hi: u64, lo: u64, divisor: u64) {
      prop_assume!(hi < divisor);
      let n = u128::from(hi) << 64 | u128::from(lo);
      let (q, r) = hi.div_wide(lo, divisor);
      prop_assert_eq!((u128::from(q), u128::from(r)), (n / u128::from(divisor), n % u128::from(divisor)));
    }

    #[test]
    fn div_wide_u128(hi: u128, lo: u128, divisor in 1 .. u128::MAX, small in 1 .. u64::MAX) {
      use malachite::Natural;
      // Both a full-width divisor and a one-digit one (in half words), with `hi` reduced below it.
      for divisor in [divisor, u128::from(small)] {
        let hi = hi % divisor;
        let (q, r) = hi.div_wide(lo, divisor);
        let n = (Natural::from(hi) << 128u32) + Natural::from(lo);
        prop_assert_eq!(Natural::from(q), &n / Natural::from(divisor));
        prop_assert_eq!(Natural::from(r), n % Natural::from(divisor));
      }
    }

    #[test]
    fn cast_roundtrip(a: i64) {
      prop_assert_eq!(a.cast::<i128>().cast::<i64>(), a);
      prop_assert_eq!(a.cast::<i128>(), i128::from(a));
      prop_assert_eq!(a.cast::<u32>(), a as u32);
    }
  }
}
