use core::ops::*;

use typenum::{Add1, B0, B1, Bit, Max, Maximum, Min, Minimum, Or, Sum, U1};

use super::Elastic;
use crate::digits::{Contribution, Number, SetDigits};
use crate::ops::Increment;
use crate::underlying::Sealed;

/// Implement a binary operator between two `Elastic`s. The operands are converted to the
/// storage of `Elastic<$wd, $ws>`, which must hold both of them, and the result to the output
/// type `Elastic<$digits, $signed>`, which must hold it (given the digit rules in `policy`,
/// this never truncates).
macro_rules! mk_op {
  (
    $trait:ident, $name:ident -> ($digits:ty, $signed:ty), in ($wd:ty, $ws:ty),
    where [$($bounds:tt)*], |$a:ident, $b:ident| $body:expr
  ) => {
    impl<D1, S1, D2, S2> $trait<Elastic<D2, S2>> for Elastic<D1, S1>
    where
      D1: SetDigits<S1>,
      D2: SetDigits<S2>,
      S1: Bit,
      S2: Bit,
      $digits: SetDigits<$signed>,
      $signed: Bit,
      $wd: SetDigits<$ws>,
      $ws: Bit,
      $($bounds)*
    {
      type Output = Elastic<$digits, $signed>;

      #[inline]
      fn $name(self, rhs: Elastic<D2, S2>) -> Self::Output {
        let $a = <$wd as SetDigits<$ws>>::Rep::from_number(self);
        let $b = <$wd as SetDigits<$ws>>::Rep::from_number(rhs);
        <Self::Output>::from_number($body)
      }
    }
  }
}

mk_op!{
  Add, add -> (Add1<Maximum<D1, D2>>, Or<S1, S2>), in (Add1<Maximum<D1, D2>>, Or<S1, S2>),
  where [S1: BitOr<S2>, D1: Max<D2>, Maximum<D1, D2>: Add<B1>],
  |a, b| a.wrapping_add(b)
}

mk_op!{
  Sub, sub -> (Sum<Maximum<D1, D2>, Or<S1, S2>>, B1), in (Sum<Maximum<D1, D2>, Or<S1, S2>>, B1),
  where [S1: BitOr<S2>, D1: Max<D2>, Maximum<D1, D2>: Add<Or<S1, S2>>],
  |a, b| a.wrapping_sub(b)
}

mk_op!{
  Mul, mul -> (Maximum<U1, Sum<<D1 as Contribution>::Output, <D2 as Contribution>::Output>>, Or<S1, S2>),
  in (Maximum<U1, Sum<<D1 as Contribution>::Output, <D2 as Contribution>::Output>>, Or<S1, S2>),
  where [
    S1: BitOr<S2>,
    D1: Contribution,
    D2: Contribution,
    <D1 as Contribution>::Output: Add<<D2 as Contribution>::Output>,
    U1: Max<Sum<<D1 as Contribution>::Output, <D2 as Contribution>::Output>>,
  ],
  |a, b| a.wrapping_mul(b)
}

// The rest compute in the wider of the two operands, then narrow the result.

mk_op!{
  Div, div -> (D1, Or<S1, S2>), in (Maximum<D1, D2>, Or<S1, S2>),
  where [S1: BitOr<S2>, D1: Max<D2>],
  |a, b| a.wrapping_div_rem(b).0
}

mk_op!{
  Rem, rem -> (D1, Or<S1, S2>), in (Maximum<D1, D2>, Or<S1, S2>),
  where [S1: BitOr<S2>, D1: Max<D2>],
  |a, b| a.wrapping_div_rem(b).1
}

mk_op!{
  BitAnd, bitand -> (Minimum<D1, D2>, Or<S1, S2>), in (Maximum<D1, D2>, Or<S1, S2>),
  where [S1: BitOr<S2>, D1: Max<D2> + Min<D2>],
  |a, b| a.bit_and(b)
}

mk_op!{
  BitOr, bitor -> (Maximum<D1, D2>, Or<S1, S2>), in (Maximum<D1, D2>, Or<S1, S2>),
  where [S1: BitOr<S2>, D1: Max<D2>],
  |a, b| a.bit_or(b)
}

mk_op!{
  BitXor, bitxor -> (Maximum<D1, D2>, Or<S1, S2>), in (Maximum<D1, D2>, Or<S1, S2>),
  where [S1: BitOr<S2>, D1: Max<D2>],
  |a, b| a.bit_xor(b)
}

/// Mixing with primitives: the primitive is first converted to the `Elastic` of its width.
macro_rules! mk_native_ops {
  ($trait:ident, $name:ident) => {
    mk_native_ops!{@ $trait, $name:
      i8 => U8, B1; i16 => U16, B1; i32 => U32, B1; i64 => U64, B1; i128 => U128, B1;
      u8 => U8, B0; u16 => U16, B0; u32 => U32, B0; u64 => U64, B0; u128 => U128, B0
    }
  };
  (@ $trait:ident, $name:ident: $($int:ty => $digits:ident, $signed:ty);*) => {$(
    impl<D: SetDigits<S>, S: Bit> $trait<$int> for Elastic<D, S>
    where
      Self: $trait<Elastic<typenum::$digits, $signed>>,
    {
      type Output = <Self as $trait<Elastic<typenum::$digits, $signed>>>::Output;

      #[inline]
      fn $name(self, rhs: $int) -> Self::Output {
        <Self as $trait<Elastic<typenum::$digits, $signed>>>::$name(self, rhs.into())
      }
    }

    impl<D: SetDigits<S>, S: Bit> $trait<Elastic<D, S>> for $int
    where
      Elastic<typenum::$digits, $signed>: $trait<Elastic<D, S>>,
    {
      type Output = <Elastic<typenum::$digits, $signed> as $trait<Elastic<D, S>>>::Output;

      #[inline]
      fn $name(self, rhs: Elastic<D, S>) -> Self::Output {
        <Elastic<typenum::$digits, $signed> as $trait<Elastic<D, S>>>::$name(self.into(), rhs)
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

/// Compound assignment: the binary operator, then conversion back to the type of `self`, which
/// drops any digits the result grew beyond it.
macro_rules! mk_assign {
  ($($trait:ident, $name:ident, $trait_assign:ident, $name_assign:ident;)*) => {$(
    impl<D: SetDigits<S>, S: Bit, Rhs> $trait_assign<Rhs> for Elastic<D, S>
    where
      Self: $trait<Rhs>,
      <Self as $trait<Rhs>>::Output: Number,
    {
      #[inline]
      fn $name_assign(&mut self, rhs: Rhs) { *self = Self::from_number(self.$name(rhs)) }
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

/// Shifts keep the type of the left operand.
impl<D: SetDigits<S>, S: Bit> Shl<u32> for Elastic<D, S> {
  type Output = Self;

  #[inline]
  fn shl(self, rhs: u32) -> Self { Self::from_rep(self.rep.shift_left(rhs)) }
}

impl<D: SetDigits<S>, S: Bit> Shr<u32> for Elastic<D, S> {
  type Output = Self;

  #[inline]
  fn shr(self, rhs: u32) -> Self { Self::from_rep(self.rep.shift_right(rhs)) }
}

impl<D: SetDigits<S>, S: Bit> ShlAssign<u32> for Elastic<D, S> {
  #[inline]
  fn shl_assign(&mut self, rhs: u32) { *self = *self << rhs }
}

impl<D: SetDigits<S>, S: Bit> ShrAssign<u32> for Elastic<D, S> {
  #[inline]
  fn shr_assign(&mut self, rhs: u32) { *self = *self >> rhs }
}

/// The negation of an unsigned `Elastic` is signed, with the same digits.
impl<D: SetDigits<S> + SetDigits<B1>, S: Bit> Neg for Elastic<D, S> {
  type Output = Elastic<D, B1>;

  #[inline]
  fn neg(self) -> Self::Output {
    Elastic::from_rep(<D as SetDigits<B1>>::Rep::from_number(self).wrapping_neg())
  }
}

/// Bitwise complement. For unsigned values, only the `D` nominal digits are complemented.
impl<D: SetDigits<S>, S: Bit> Not for Elastic<D, S> {
  type Output = Self;

  #[inline]
  fn not(self) -> Self {
    let not = self.rep.bit_not();
    if S::BOOL { Self::from_rep(not) } else { Self::from_rep(not.bit_and(Self::max_value().rep)) }
  }
}

impl<D: SetDigits<S>, S: Bit> Increment for Elastic<D, S>
where
  Self: AddAssign<Elastic<U1, B0>> + SubAssign<Elastic<U1, B0>>,
{
  #[inline]
  fn increment(&mut self) { *self += Elastic::<U1, B0>::from_rep(1) }

  #[inline]
  fn decrement(&mut self) { *self -= Elastic::<U1, B0>::from_rep(1) }
}
