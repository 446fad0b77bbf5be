use super::Duplex;
use crate::Int;
use crate::underlying::{Sealed, div_wide_by_halves};

impl<U: Int, L: Int> Sealed for Duplex<U, L> {
  type Unsigned = Duplex<U::Unsigned, L>;
  type Signedness = U::Signedness;

  const ZERO: Self = Self::from_parts(U::ZERO, L::ZERO);
  const ONE: Self = Self::from_parts(U::ZERO, L::ONE);
  const MIN: Self = Self::from_parts(U::MIN, L::ZERO);
  const MAX: Self = Self::from_parts(U::MAX, L::MAX);

  #[inline]
  fn to_unsigned(self) -> Self::Unsigned {
    Duplex::from_parts(self.upper.to_unsigned(), self.lower)
  }

  #[inline]
  fn from_unsigned(x: Self::Unsigned) -> Self {
    Self::from_parts(U::from_unsigned(x.upper), x.lower)
  }

  #[inline]
  fn from_bool(x: bool) -> Self {
    Self::from_parts(U::ZERO, L::from_bool(x))
  }

  fn leading_zeros(self) -> u32 {
    if self.upper == U::ZERO {
      Self::HALF + self.lower.leading_zeros()
    } else {
      self.upper.leading_zeros()
    }
  }

  #[inline]
  fn bit_not(self) -> Self {
    Self::from_parts(self.upper.bit_not(), self.lower.bit_not())
  }

  #[inline]
  fn bit_and(self, other: Self) -> Self {
    Self::from_parts(self.upper.bit_and(other.upper), self.lower.bit_and(other.lower))
  }

  #[inline]
  fn bit_or(self, other: Self) -> Self {
    Self::from_parts(self.upper.bit_or(other.upper), self.lower.bit_or(other.lower))
  }

  #[inline]
  fn bit_xor(self, other: Self) -> Self {
    Self::from_parts(self.upper.bit_xor(other.upper), self.lower.bit_xor(other.lower))
  }

  fn shift_left(self, n: u32) -> Self {
    let h = Self::HALF;
    if n == 0 {
      self
    } else if n < h {
      let carried = self.lower.shift_right(h - n).cast::<U>();
      Self::from_parts(self.upper.shift_left(n).bit_or(carried), self.lower.shift_left(n))
    } else {
      // Past the whole width, `shift_left` of the half clamps to zero too.
      Self::from_parts(self.lower.cast::<U>().shift_left(n - h), L::ZERO)
    }
  }

  fn shift_right(self, n: u32) -> Self {
    let h = Self::HALF;
    if n == 0 {
      self
    } else if n < h {
      let carried = self.upper.cast::<L>().shift_left(h - n);
      Self::from_parts(self.upper.shift_right(n), self.lower.shift_right(n).bit_or(carried))
    } else {
      // The upper half becomes all sign bits; its own shifts clamp past its width.
      Self::from_parts(self.upper.shift_right(h), self.upper.shift_right(n - h).cast::<L>())
    }
  }

  fn wrapping_add(self, other: Self) -> Self {
    let (lower, carry) = self.lower.add_carry(other.lower, false);
    let upper = self.upper.wrapping_add(other.upper).wrapping_add(U::from_bool(carry));
    Self::from_parts(upper, lower)
  }

  fn wrapping_sub(self, other: Self) -> Self {
    let (lower, borrow) = self.lower.sub_borrow(other.lower, false);
    let upper = self.upper.wrapping_sub(other.upper).wrapping_sub(U::from_bool(borrow));
    Self::from_parts(upper, lower)
  }

  fn wrapping_mul(self, other: Self) -> Self {
    // Only the low half of the cross terms and none of `upper · upper` survive the wrap.
    let (lower, high) = self.lower.mul_wide(other.lower);
    let cross = self.upper.wrapping_mul(other.lower.cast::<U>())
      .wrapping_add(self.lower.cast::<U>().wrapping_mul(other.upper));
    Self::from_parts(high.cast::<U>().wrapping_add(cross), lower)
  }

  #[inline]
  fn wrapping_neg(self) -> Self {
    Self::ZERO.wrapping_sub(self)
  }

  fn wrapping_div_rem(self, other: Self) -> (Self, Self) {
    super::div::div_rem(self, other)
  }

  fn add_carry(self, other: Self, carry: bool) -> (Self, bool) {
    let (lower, carry) = self.lower.add_carry(other.lower, carry);
    let (upper, carry) = self.upper.add_carry(other.upper, carry);
    (Self::from_parts(upper, lower), carry)
  }

  fn sub_borrow(self, other: Self, borrow: bool) -> (Self, bool) {
    let (lower, borrow) = self.lower.sub_borrow(other.lower, borrow);
    let (upper, borrow) = self.upper.sub_borrow(other.upper, borrow);
    (Self::from_parts(upper, lower), borrow)
  }

  fn mul_wide(self, other: Self) -> (Self, Self) {
    // Schoolbook multiplication on the four halves, all as unsigned.
    let (a0, a1) = (self.lower, self.upper.cast::<L>());
    let (b0, b1) = (other.lower, other.upper.cast::<L>());
    let (p00_lo, p00_hi) = a0.mul_wide(b0);
    let (p01_lo, p01_hi) = a0.mul_wide(b1);
    let (p10_lo, p10_hi) = a1.mul_wide(b0);
    let (p11_lo, p11_hi) = a1.mul_wide(b1);

    let r0 = p00_lo;
    let (r1, c0) = p00_hi.add_carry(p01_lo, false);
    let (r1, c1) = r1.add_carry(p10_lo, false);
    let (r2, c2) = p11_lo.add_carry(p01_hi, c0);
    let (r2, c3) = r2.add_carry(p10_hi, c1);
    let r3 = p11_hi
      .wrapping_add(L::from_bool(c2))
      .wrapping_add(L::from_bool(c3));

    (
      Self::from_parts(r1.cast::<U>(), r0),
      Self::from_parts(r3.cast::<U>(), r2),
    )
  }

  fn div_wide(self, lo: Self, divisor: Self) -> (Self, Self) {
    let (quotient, remainder) =
      div_wide_by_halves(self.to_unsigned(), lo.to_unsigned(), divisor.to_unsigned());
    (Self::from_unsigned(quotient), Self::from_unsigned(remainder))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{I256, U256};
  use crate::digits::Number;
  use proptest::prelude::*;

  type D64 = Duplex<i32, u32>;
  type DU64 = Duplex<u32, u32>;

  fn d64(x: i64) -> D64 { D64::from_int(x) }

  fn i256(x: I256) -> malachite::Integer {
    use malachite::Integer;
    (Integer::from(x.upper()) << 128u32) + Integer::from(x.lower())
  }

  #[test]
  fn shifts() {
    assert_eq!(d64(1).shift_left(40).cast::<i64>(), 1 << 40);
    assert_eq!(d64(-1).shift_left(63).cast::<i64>(), i64::MIN);
    assert_eq!(d64(-1).shift_left(64).cast::<i64>(), 0);
    assert_eq!(d64(i64::MIN).shift_right(40).cast::<i64>(), i64::MIN >> 40);
    assert_eq!(d64(i64::MIN).shift_right(64).cast::<i64>(), -1);
    assert_eq!(d64(i64::MAX).shift_right(100).cast::<i64>(), 0);
    assert_eq!(DU64::MAX.shift_right(63).cast::<u64>(), 1);
  }

  #[test]
  fn leading_zeros() {
    assert_eq!(d64(0).leading_zeros(), 64);
    assert_eq!(d64(1).leading_zeros(), 63);
    assert_eq!(d64(1 << 40).leading_zeros(), 23);
    assert_eq!(d64(-1).leading_zeros(), 0);
  }

  #[test]
  fn carries() {
    assert_eq!(DU64::MAX.add_carry(DU64::ZERO, true), (DU64::ZERO, true));
    assert_eq!(DU64::ZERO.sub_borrow(DU64::ONE, false), (DU64::MAX, true));
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn add_sub_mul(a: i64, b: i64) {
      prop_assert_eq!(d64(a).wrapping_add(d64(b)).cast::<i64>(), a.wrapping_add(b));
      prop_assert_eq!(d64(a).wrapping_sub(d64(b)).cast::<i64>(), a.wrapping_sub(b));
      prop_assert_eq!(d64(a).wrapping_mul(d64(b)).cast::<i64>(), a.wrapping_mul(b));
      prop_assert_eq!(d64(a).wrapping_neg().cast::<i64>(), a.wrapping_neg());
    }

    #[test]
    fn shifts_proptest(a in any::<i64>(), n in 0 .. 70_u32) {
      let expected_left = if n < 64 { a << n } else { 0 };
      let expected_right = if n < 64 { a >> n } else { a >> 63 };
      prop_assert_eq!(d64(a).shift_left(n).cast::<i64>(), expected_left);
      prop_assert_eq!(d64(a).shift_right(n).cast::<i64>(), expected_right);
    }

    #[test]
    fn mul_wide_64(a: u64, b: u64) {
      let (lo, hi) = DU64::from_int(a).mul_wide(DU64::from_int(b));
      let expected = u128::from(a) * u128::from(b);
      prop_assert_eq!(lo.cast::<u64>(), expected as u64);
      prop_assert_eq!(hi.cast::<u64>(), (expected >> 64) as u64);
    }

    #[test]
    fn mul_256(a: i128, b: i128) {
      let product = I256::from_int(a).wrapping_mul(I256::from_int(b));
      prop_assert_eq!(i256(product), malachite::Integer::from(a) * malachite::Integer::from(b));
    }

    #[test]
    fn div_wide_256(a: u128, b: u128, c: u128, d: u128, e: u128) {
      use malachite::Natural;
      let natural = |x: U256| (Natural::from(x.upper()) << 128u32) + Natural::from(x.lower());
      let divisor = U256::from_parts(a, b.max(1));
      let hi = U256::from_parts(c, d).wrapping_div_rem(divisor).1;
      let lo = U256::from_parts(e, d ^ e);
      let (q, r) = hi.div_wide(lo, divisor);
      let n = (natural(hi) << 256u32) + natural(lo);
      prop_assert_eq!(natural(q), &n / natural(divisor));
      prop_assert_eq!(natural(r), n % natural(divisor));
    }

    #[test]
    fn mul_wide_256(a: u128, b: u128, c: u128, d: u128) {
      use malachite::Natural;
      let x = U256::from_parts(a, b);
      let y = U256::from_parts(c, d);
      let (lo, hi) = x.mul_wide(y);
      let natural = |x: U256| (Natural::from(x.upper()) << 128u32) + Natural::from(x.lower());
      prop_assert_eq!(
        (natural(hi) << 256u32) + natural(lo),
        natural(x) * natural(y)
      );
    }
  }
}
