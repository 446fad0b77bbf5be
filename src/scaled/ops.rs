use core::ops::*;

use typenum::{Add1, B1, Diff, Integer, Log2, Logarithm2, Min, Minimum, NonZero, PInt, Prod, Sub1, Sum, U0, Unsigned, Z0};

use super::Scaled;
use crate::digits::{Number, Widen};
use crate::ops::Increment;

/// The digits a number gains when multiplied by `radix^exponent`, for a non-negative typenum
/// `exponent`: `exponent × ⌈log2(radix)⌉`.
pub trait Magnitude {
  type Output: Unsigned;
}

impl Magnitude for Z0 {
  type Output = U0;
}

impl<U: Unsigned + NonZero> Magnitude for PInt<U> {
  type Output = U;
}

type DigitBits<X> = Add1<Log2<Sub1<X>>>;

type ShiftBits<Shift, X> = Prod<<Shift as Magnitude>::Output, DigitBits<X>>;

/// A type that can hold `Self` multiplied by `X^Shift` (as a typenum integer, never negative).
///
/// For machine integers this is the same type (the scaling can overflow), for an
/// [`Elastic`](crate::Elastic) it has `Shift × ⌈log2(X)⌉` more digits.
pub trait Align<Shift, X>: Number {
  type Output: Number;
}

impl<R, Shift, X> Align<Shift, X> for R
where
  R: Widen<ShiftBits<Shift, X>>,
  Shift: Magnitude,
  X: Unsigned + Sub<B1>,
  Sub1<X>: Logarithm2,
  Log2<Sub1<X>>: Add<B1>,
  <Shift as Magnitude>::Output: Mul<DigitBits<X>>,
  ShiftBits<Shift, X>: Unsigned,
{
  type Output = <R as Widen<ShiftBits<Shift, X>>>::Output;
}

/// The representation of `x` at exponent `M` (at most `E`), in a type that holds it.
type Aligned<R, E, M, X> = <R as Align<Diff<E, M>, X>>::Output;

#[inline]
fn align<R, E, M, X>(x: Scaled<R, E, X>) -> Aligned<R, E, M, X>
where
  R: Number + Align<Diff<E, M>, X>,
  E: Integer + Sub<M>,
  M: Integer,
  X: Unsigned,
{
  <Aligned<R, E, M, X> as Number>::from_number(x.rep).scale(E::I32 - M::I32, X::U32)
}

/// Implement a binary operator between two `Scaled`s that aligns them to the smaller exponent
/// (widening [`Elastic`](crate::Elastic) representations so that nothing is lost) and applies
/// the operator to the representations.
macro_rules! mk_aligned_op {
  ($trait:ident, $name:ident) => {
    impl<R1, E1, R2, E2, X> $trait<Scaled<R2, E2, X>> for Scaled<R1, E1, X>
    where
      R1: Number + Align<Diff<E1, Minimum<E1, E2>>, X>,
      R2: Number + Align<Diff<E2, Minimum<E1, E2>>, X>,
      Aligned<R1, E1, Minimum<E1, E2>, X>: $trait<Aligned<R2, E2, Minimum<E1, E2>, X>>,
      <Aligned<R1, E1, Minimum<E1, E2>, X> as $trait<Aligned<R2, E2, Minimum<E1, E2>, X>>>::Output: Number,
      E1: Integer + Min<E2> + Sub<Minimum<E1, E2>>,
      E2: Integer + Sub<Minimum<E1, E2>>,
      Minimum<E1, E2>: Integer,
      X: Unsigned,
    {
      type Output = Scaled<
        <Aligned<R1, E1, Minimum<E1, E2>, X> as $trait<Aligned<R2, E2, Minimum<E1, E2>, X>>>::Output,
        Minimum<E1, E2>,
        X,
      >;

      #[inline]
      fn $name(self, rhs: Scaled<R2, E2, X>) -> Self::Output {
        let a = align::<R1, E1, Minimum<E1, E2>, X>(self);
        let b = align::<R2, E2, Minimum<E1, E2>, X>(rhs);
        Scaled::from_rep(a.$name(b))
      }
    }
  }
}

mk_aligned_op!{Add, add}
mk_aligned_op!{Sub, sub}
mk_aligned_op!{Rem, rem}
mk_aligned_op!{BitAnd, bitand}
mk_aligned_op!{BitOr, bitor}
mk_aligned_op!{BitXor, bitxor}

/// `(a × X^E1) × (b × X^E2) = (a × b) × X^(E1 + E2)`
impl<R1, E1, R2, E2, X> Mul<Scaled<R2, E2, X>> for Scaled<R1, E1, X>
where
  R1: Number + Mul<R2>,
  R2: Number,
  <R1 as Mul<R2>>::Output: Number,
  E1: Integer + Add<E2>,
  E2: Integer,
  Sum<E1, E2>: Integer,
  X: Unsigned,
{
  type Output = Scaled<<R1 as Mul<R2>>::Output, Sum<E1, E2>, X>;

  #[inline]
  fn mul(self, rhs: Scaled<R2, E2, X>) -> Self::Output {
    Scaled::from_rep(self.rep * rhs.rep)
  }
}

/// `(a × X^E1) / (b × X^E2) = (a / b) × X^(E1 - E2)`, where `a / b` is the division of the
/// representations (so typically an integer division).
impl<R1, E1, R2, E2, X> Div<Scaled<R2, E2, X>> for Scaled<R1, E1, X>
where
  R1: Number + Div<R2>,
  R2: Number,
  <R1 as Div<R2>>::Output: Number,
  E1: Integer + Sub<E2>,
  E2: Integer,
  Diff<E1, E2>: Integer,
  X: Unsigned,
{
  type Output = Scaled<<R1 as Div<R2>>::Output, Diff<E1, E2>, X>;

  #[inline]
  fn div(self, rhs: Scaled<R2, E2, X>) -> Self::Output {
    Scaled::from_rep(self.rep / rhs.rep)
  }
}

/// Mixing with primitive integers: the primitive is first converted to a `Scaled` with exponent
/// 0.
macro_rules! mk_native_ops {
  ($trait:ident, $name:ident) => {
    mk_native_ops!{@ $trait, $name: i8 i16 i32 i64 i128 u8 u16 u32 u64 u128}
  };
  (@ $trait:ident, $name:ident: $($int:ty)*) => {$(
    impl<R: Number, E: Integer, X: Unsigned> $trait<$int> for Scaled<R, E, X>
    where
      Self: $trait<Scaled<$int, Z0, X>>,
    {
      type Output = <Self as $trait<Scaled<$int, Z0, X>>>::Output;

      #[inline]
      fn $name(self, rhs: $int) -> Self::Output {
        <Self as $trait<Scaled<$int, Z0, X>>>::$name(self, Scaled::from_rep(rhs))
      }
    }

    impl<R: Number, E: Integer, X: Unsigned> $trait<Scaled<R, E, X>> for $int
    where
      Scaled<$int, Z0, X>: $trait<Scaled<R, E, X>>,
    {
      type Output = <Scaled<$int, Z0, X> as $trait<Scaled<R, E, X>>>::Output;

      #[inline]
      fn $name(self, rhs: Scaled<R, E, X>) -> Self::Output {
        <Scaled<$int, Z0, X> as $trait<Scaled<R, E, X>>>::$name(Scaled::from_rep(self), rhs)
      }
    }
  )*}
}

mk_native_ops!{Add, add}
mk_native_ops!{Sub, sub}
mk_native_ops!{Mul, mul}
mk_native_ops!{Div, div}
mk_native_ops!{Rem, rem}
mk_native_ops!{BitAnd, bitand}
mk_native_ops!{BitOr, bitor}
mk_native_ops!{BitXor, bitxor}

/// Mixing with `f64`: the `Scaled` is converted to `f64`, and so is the result.
macro_rules! mk_float_ops {
  ($($trait:ident, $name:ident;)*) => {$(
    impl<R: Number, E: Integer, X: Unsigned> $trait<f64> for Scaled<R, E, X> {
      type Output = f64;

      #[inline]
      fn $name(self, rhs: f64) -> f64 { self.to_f64().$name(rhs) }
    }

    impl<R: Number, E: Integer, X: Unsigned> $trait<Scaled<R, E, X>> for f64 {
      type Output = f64;

      #[inline]
      fn $name(self, rhs: Scaled<R, E, X>) -> f64 { self.$name(rhs.to_f64()) }
    }
  )*}
}

mk_float_ops!{
  Add, add;
  Sub, sub;
  Mul, mul;
  Div, div;
}

/// Compound assignment: the binary operator, then [`Scaled::from_scaled`] back to the type of
/// `self`.
macro_rules! mk_assign {
  ($($trait:ident, $name:ident, $trait_assign:ident, $name_assign:ident;)*) => {$(
    impl<R, E, X, Rhs, R2, E2> $trait_assign<Rhs> for Scaled<R, E, X>
    where
      R: Number, E: Integer,
      R2: Number, E2: Integer,
      X: Unsigned,
      Self: $trait<Rhs, Output = Scaled<R2, E2, X>>,
    {
      #[inline]
      fn $name_assign(&mut self, rhs: Rhs) { *self = Self::from_scaled(self.$name(rhs)) }
    }
  )*}
}

mk_assign!{
  Add, add, AddAssign, add_assign;
  Sub, sub, SubAssign, sub_assign;
  Mul, mul, MulAssign, mul_assign;
  Div, div, DivAssign, div_assign;
  Rem, rem, RemAssign, rem_assign;
  BitAnd, bitand, BitAndAssign, bitand_assign;
  BitOr, bitor, BitOrAssign, bitor_assign;
  BitXor, bitxor, BitXorAssign, bitxor_assign;
}

/// Shifts apply to the representation and keep the type, so for radix 2 they multiply or divide
/// by a power of two.
impl<R: Number + Shl<u32, Output = R>, E: Integer, X: Unsigned> Shl<u32> for Scaled<R, E, X> {
  type Output = Self;

  #[inline]
  fn shl(self, rhs: u32) -> Self { Self::from_rep(self.rep << rhs) }
}

impl<R: Number + Shr<u32, Output = R>, E: Integer, X: Unsigned> Shr<u32> for Scaled<R, E, X> {
  type Output = Self;

  #[inline]
  fn shr(self, rhs: u32) -> Self { Self::from_rep(self.rep >> rhs) }
}

impl<R: Number + Shl<u32, Output = R>, E: Integer, X: Unsigned> ShlAssign<u32> for Scaled<R, E, X> {
  #[inline]
  fn shl_assign(&mut self, rhs: u32) { *self = *self << rhs }
}

impl<R: Number + Shr<u32, Output = R>, E: Integer, X: Unsigned> ShrAssign<u32> for Scaled<R, E, X> {
  #[inline]
  fn shr_assign(&mut self, rhs: u32) { *self = *self >> rhs }
}

impl<R: Number + Neg, E: Integer, X: Unsigned> Neg for Scaled<R, E, X>
where
  R::Output: Number,
{
  type Output = Scaled<R::Output, E, X>;

  #[inline]
  fn neg(self) -> Self::Output { Scaled::from_rep(-self.rep) }
}

impl<R: Number + Not<Output = R>, E: Integer, X: Unsigned> Not for Scaled<R, E, X> {
  type Output = Self;

  #[inline]
  fn not(self) -> Self { Self::from_rep(!self.rep) }
}

/// Adds or subtracts one (not one unit in the last place).
impl<R: Number, E: Integer, X: Unsigned> Increment for Scaled<R, E, X>
where
  Self: AddAssign<Scaled<R, Z0, X>> + SubAssign<Scaled<R, Z0, X>>,
{
  #[inline]
  fn increment(&mut self) { *self += Scaled::<R, Z0, X>::from_int(1_i8) }

  #[inline]
  fn decrement(&mut self) { *self -= Scaled::<R, Z0, X>::from_int(1_i8) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Elastic, Nearest, Overflow, Rounding, Saturated};
  use proptest::prelude::*;
  use typenum::{B0, N1, N2, N3, N4, N5, N8, P1, P2, P4, P5, P8, U8, U10, U16};

  type Q4 = Scaled<i32, N4>;

  fn exponent<R, E: Integer, X>(_: Scaled<R, E, X>) -> i32 { E::I32 }

  #[test]
  fn aligned() {
    let a = Q4::from_f64(1.25);
    let b = Scaled::<i32, N1>::from_f64(0.5);
    let c = Scaled::<i32, P2>::from(8);
    assert_eq!(exponent(a + b), -4);
    assert_eq!(a + b, 1.75);
    assert_eq!(b - a, -0.75);
    assert_eq!(exponent(c - b), -1);
    assert_eq!(c - b, 7.5);
    assert_eq!(Q4::from_f64(2.75) % b, 0.25);
    assert_eq!((Q4::from_f64(2.75) & b).rep(), 8);
    assert_eq!((a | c).rep(), 20 | 128);
    assert_eq!((a ^ a).rep(), 0);
  }

  #[test]
  fn multiply_and_divide() {
    let a = Q4::from_f64(1.5);
    let b = Scaled::<i32, N2>::from_f64(-2.25);
    assert_eq!(exponent(a * b), -6);
    assert_eq!(a * b, -3.375);
    assert_eq!(exponent(a / b), -2);
    assert_eq!((a / b).rep(), 24 / -9);
    assert_eq!(exponent(b / a), 2);
    assert_eq!((b / a).rep(), 0);
  }

  #[test]
  fn natives() {
    let a = Q4::from_f64(1.5);
    assert_eq!(a + 1, 2.5);
    assert_eq!(1 - a, -0.5);
    assert_eq!(exponent(a * 3), -4);
    assert_eq!(a * 3, 4.5);
    assert_eq!(a / 2, 0.75);
    assert_eq!(exponent(3 / a), 4);
    assert_eq!(a + 0.25, 1.75);
    assert_eq!(0.5 * a, 0.75);
    assert_eq!(Scaled::<u64, N8>::from(3_u64) - 1_u64, 2);
  }

  #[test]
  fn elastic_rep() {
    type Byte = Scaled<Elastic<U8, B0>, N4>;
    let max = Byte::from_rep(Elastic::new(255));
    let square: Scaled<Elastic<U16, B0>, N8> = max * max;
    assert_eq!(square.rep(), Elastic::<U16, B0>::new(65025));
    let sum: Scaled<Elastic<typenum::U9, B0>, N4> = max + max;
    assert_eq!(sum, 31.875);
    let difference = Byte::from_rep(Elastic::new(0)) - max;
    assert_eq!(difference, -15.9375);
  }

  #[test]
  fn policies_in_rep() {
    type Sat = Scaled<Overflow<i8, Saturated>, N4>;
    let x = Sat::from_f64(7.);
    assert_eq!(x + x, 127. / 16.);
    assert_eq!(-x - x, -8);
    type Round = Scaled<Rounding<i32, Nearest>, P1>;
    assert_eq!((Round::from(14) / Round::from(4)).rep(), 4);
    assert_eq!(Round::from(7) >> 1, 4);
  }

  #[test]
  fn compound_assignment() {
    let mut x = Q4::from(1);
    x += Scaled::<i32, N8>::from_f64(0.5);
    assert_eq!(x, 1.5);
    x *= Q4::from(3);
    assert_eq!(x, 4.5);
    x -= 1;
    x /= Scaled::<i32, Z0>::from(2);
    assert_eq!(x, 1.75);
    x <<= 2;
    assert_eq!(x, 7);
    x >>= 3;
    assert_eq!(x, 0.875);
    x.increment();
    x.increment();
    x.decrement();
    assert_eq!(x, 1.875);
    x %= Scaled::<i32, N1>::from_f64(0.5);
    assert_eq!(x, 0.375);
    let mut y = Scaled::<i64, N4, U10>::from(1);
    y /= 3_i64;
    y *= 3_i64;
    assert_eq!(y.rep(), 9999);
  }

  #[test]
  fn unary() {
    let x = Q4::from_f64(-1.5);
    assert_eq!(-x, 1.5);
    assert_eq!((!x).rep(), !(-24));
    let negated: Scaled<Elastic<U10>, N4> = -Scaled::<Elastic<U10, B0>, N4>::from(3);
    assert_eq!(negated, -3);
  }

  #[test]
  fn elastic_alignment_widens() {
    use typenum::U17;
    let a = Scaled::<Elastic<U8, B0>, Z0>::from(200);
    let b = Scaled::<Elastic<U8, B0>, N8>::from_rep(Elastic::new(0));
    let sum: Scaled<Elastic<U17, B0>, N8> = a + b;
    assert_eq!(sum, 200);
    assert_eq!(sum.rep(), Elastic::<U17, B0>::new(51200));
    assert_eq!(b - a, -200);
    let c = Scaled::<Elastic<U8>, N8>::from_rep(Elastic::new(-1));
    assert_eq!(a + c, 200. - 1. / 256.);
    // One decimal digit of difference in exponent takes four bits.
    let d = Scaled::<Elastic<U8, B0>, Z0, U10>::from(255);
    let e = Scaled::<Elastic<U8, B0>, N2, U10>::from_rep(Elastic::new(99));
    let total: Scaled<Elastic<U17, B0>, N2, U10> = d + e;
    assert_eq!(total.rep(), Elastic::<U17, B0>::new(25599));
  }

  /// An 8-bit elastic integer, scaled by 2^-4, rounding to nearest and saturating on overflow.
  type Stack = Scaled<Rounding<Overflow<Elastic<U8>, Saturated>, Nearest>, N4>;

  #[test]
  fn layered_conversions() {
    assert_eq!(Stack::from_f64(1.5).rep(), 24);
    assert_eq!(Stack::from_f64(0.03).rep(), 0);
    assert_eq!(Stack::from_f64(0.04).rep(), 1);
    assert_eq!(Stack::from_f64(100.), 15.9375);
    assert_eq!(Stack::from_f64(-100.), -15.9375);
    assert_eq!(Stack::from(15).rep(), 240);
    assert_eq!(Stack::from(16).rep(), 255);
  }

  #[test]
  fn layered_arithmetic() {
    let x = Stack::from_f64(1.5);
    let sum: Scaled<Rounding<Overflow<Elastic<typenum::U9>, Saturated>, Nearest>, N4> = x + x;
    assert_eq!(sum, 3);
    let product: Scaled<Rounding<Overflow<Elastic<U16>, Saturated>, Nearest>, N8> = x * x;
    assert_eq!(product, 2.25);
    assert_eq!(x / x, 1);
    let wide = Stack::from(15) + Stack::from(15);
    assert_eq!(wide, 30);
    assert_eq!(Stack::from_scaled(wide), 15.9375);
  }

  #[test]
  fn layered_compound_assignment() {
    let mut y = Stack::from_f64(1.5);
    y += Stack::from(15);
    assert_eq!(y, 15.9375);
    y *= Stack::from(2);
    assert_eq!(y.rep(), 255);
    let mut z = Stack::from_f64(0.0625);
    z *= Stack::from_f64(0.5);
    assert_eq!(z.rep(), 1);
    z -= Stack::from(15);
    z -= Stack::from(15);
    assert_eq!(z, -15.9375);
  }

  /// The exponent laws, and the values of the results, for every pair of exponents in a list.
  fn check<E1, E2>(a: i16, b: i16) -> Result<(), TestCaseError>
  where
    E1: Integer + Add<E2> + Sub<E2> + Min<E2>,
    E2: Integer,
    Sum<E1, E2>: Integer,
    Diff<E1, E2>: Integer,
    Minimum<E1, E2>: Integer,
    Scaled<i64, E1>: Add<Scaled<i64, E2>, Output = Scaled<i64, Minimum<E1, E2>>>
      + Sub<Scaled<i64, E2>, Output = Scaled<i64, Minimum<E1, E2>>>,
  {
    let x = Scaled::<i64, E1>::from_rep(a.into());
    let y = Scaled::<i64, E2>::from_rep(b.into());
    let product = x * y;
    prop_assert_eq!(exponent(product), E1::I32 + E2::I32);
    prop_assert_eq!(product.to_f64(), x.to_f64() * y.to_f64());
    if b != 0 {
      let quotient = x / y;
      prop_assert_eq!(exponent(quotient), E1::I32 - E2::I32);
      prop_assert_eq!(quotient.rep(), i64::from(a) / i64::from(b));
    }
    let sum = x + y;
    prop_assert_eq!(exponent(sum), E1::I32.min(E2::I32));
    prop_assert_eq!(sum.to_f64(), x.to_f64() + y.to_f64());
    prop_assert_eq!((x - y).to_f64(), x.to_f64() - y.to_f64());
    prop_assert_eq!(x < y, x.to_f64() < y.to_f64());
    Ok(())
  }

  macro_rules! exponent_laws {
    ($a:ident, $b:ident: $($e1:ident)*; $others:tt) => {
      $(exponent_laws!{@ $a, $b, $e1, $others})*
    };
    (@ $a:ident, $b:ident, $e1:ident, [$($e2:ident)*]) => {
      $(check::<$e1, $e2>($a, $b)?;)*
    };
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn exponent_laws(a: i16, b: i16) {
      exponent_laws!{a, b: N8 N5 N1 Z0 P1 P4 P8; [N8 N3 Z0 P2 P5 P8]}
    }

    #[test]
    fn decimal_matches_i64(a: i32, b: i32) {
      let x = Scaled::<i64, N2, U10>::from_rep(a.into());
      let y = Scaled::<i64, N3, U10>::from_rep(b.into());
      prop_assert_eq!((x + y).rep(), i64::from(a) * 10 + i64::from(b));
      prop_assert_eq!((x * y).rep(), i64::from(a) * i64::from(b));
      prop_assert_eq!(x < y, i64::from(a) * 10 < i64::from(b));
    }
  }
}
