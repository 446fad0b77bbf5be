use core::ops::*;

use typenum::{B0, Bit, U1};

use super::Overflow;
use crate::{Duplex, Elastic, Int};
use crate::digits::{Number, SetDigits};
use crate::ops::{self as dispatch, Common, CommonTag, Increment, OverflowTag};
use crate::ops::{AddOp, BitAndOp, BitOrOp, BitXorOp, DivOp, MulOp, NegOp, NotOp, RemOp, ShlOp, ShrOp, SubOp};

/// Implement a binary operator between two `Overflow`s (of any tags) of the same machine
/// integer, between such an `Overflow` and its representation, and between any representation
/// and an `Overflow` of it.
macro_rules! mk_ops {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident, $op:ty) => {
    impl<R: Int, T1, T2> $trait<Overflow<R, T2>> for Overflow<R, T1>
    where
      T1: OverflowTag + CommonTag<T2>,
      T2: OverflowTag,
      Common<T1, T2>: OverflowTag,
    {
      type Output = Overflow<R, Common<T1, T2>>;

      #[inline]
      fn $name(self, rhs: Overflow<R, T2>) -> Self::Output {
        Overflow::from_rep(dispatch::binary::<$op, Common<T1, T2>, R>(self.rep, rhs.rep))
      }
    }

    impl<R: Int, T: OverflowTag> $trait<R> for Overflow<R, T> {
      type Output = Overflow<R, T>;

      #[inline]
      fn $name(self, rhs: R) -> Self::Output {
        self.$name(Overflow::<R, T>::from_rep(rhs))
      }
    }

    impl<R: Int, T1, T2> $trait_assign<Overflow<R, T2>> for Overflow<R, T1>
    where
      T1: OverflowTag + CommonTag<T2>,
      T2: OverflowTag,
      Common<T1, T2>: OverflowTag,
    {
      #[inline]
      fn $name_assign(&mut self, rhs: Overflow<R, T2>) {
        *self = Self::from_rep(self.$name(rhs).rep)
      }
    }

    impl<R: Int, T: OverflowTag> $trait_assign<R> for Overflow<R, T> {
      #[inline]
      fn $name_assign(&mut self, rhs: R) { *self = self.$name(rhs) }
    }

    impl<U: Int, L: Int, T: OverflowTag> $trait<Overflow<Duplex<U, L>, T>> for Duplex<U, L> {
      type Output = Overflow<Duplex<U, L>, T>;

      #[inline]
      fn $name(self, rhs: Overflow<Duplex<U, L>, T>) -> Self::Output {
        Overflow::<_, T>::from_rep(self).$name(rhs)
      }
    }

    mk_native_lhs!{$trait, $name: i8 i16 i32 i64 i128 u8 u16 u32 u64 u128}
  }
}

macro_rules! mk_native_lhs {
  ($trait:ident, $name:ident: $($int:ty)*) => {$(
    impl<T: OverflowTag> $trait<Overflow<$int, T>> for $int {
      type Output = Overflow<$int, T>;

      #[inline]
      fn $name(self, rhs: Overflow<$int, T>) -> Self::Output {
        Overflow::<_, T>::from_rep(self).$name(rhs)
      }
    }
  )*}
}

mk_ops!{Add, AddAssign, add, add_assign, AddOp}
mk_ops!{Sub, SubAssign, sub, sub_assign, SubOp}
mk_ops!{Mul, MulAssign, mul, mul_assign, MulOp}
mk_ops!{Div, DivAssign, div, div_assign, DivOp}
mk_ops!{Rem, RemAssign, rem, rem_assign, RemOp}
mk_ops!{BitAnd, BitAndAssign, bitand, bitand_assign, BitAndOp}
mk_ops!{BitOr, BitOrAssign, bitor, bitor_assign, BitOrOp}
mk_ops!{BitXor, BitXorAssign, bitxor, bitxor_assign, BitXorOp}

/// Implement a binary operator between `Overflow`s of `Elastic`s, and between an `Overflow` of
/// an `Elastic` and a bare `Elastic` or machine integer. The result is that of the `Elastic`
/// operator, brought into the output type under the common policy.
macro_rules! mk_elastic_ops {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident) => {
    impl<D1, S1, D2, S2, T1, T2> $trait<Overflow<Elastic<D2, S2>, T2>> for Overflow<Elastic<D1, S1>, T1>
    where
      D1: SetDigits<S1>, S1: Bit,
      D2: SetDigits<S2>, S2: Bit,
      Elastic<D1, S1>: $trait<Elastic<D2, S2>>,
      <Elastic<D1, S1> as $trait<Elastic<D2, S2>>>::Output: Number,
      T1: OverflowTag + CommonTag<T2>,
      T2: OverflowTag,
      Common<T1, T2>: OverflowTag,
    {
      type Output = Overflow<<Elastic<D1, S1> as $trait<Elastic<D2, S2>>>::Output, Common<T1, T2>>;

      #[inline]
      fn $name(self, rhs: Overflow<Elastic<D2, S2>, T2>) -> Self::Output {
        Number::from_number(self.rep.$name(rhs.rep))
      }
    }

    impl<D1, S1, D2, S2, T> $trait<Elastic<D2, S2>> for Overflow<Elastic<D1, S1>, T>
    where
      D1: SetDigits<S1>, S1: Bit,
      D2: SetDigits<S2>, S2: Bit,
      Elastic<D1, S1>: $trait<Elastic<D2, S2>>,
      <Elastic<D1, S1> as $trait<Elastic<D2, S2>>>::Output: Number,
      T: OverflowTag,
    {
      type Output = Overflow<<Elastic<D1, S1> as $trait<Elastic<D2, S2>>>::Output, T>;

      #[inline]
      fn $name(self, rhs: Elastic<D2, S2>) -> Self::Output {
        Number::from_number(self.rep.$name(rhs))
      }
    }

    impl<D, S, T, X> $trait<X> for Overflow<Elastic<D, S>, T>
    where
      D: SetDigits<S>, S: Bit,
      X: Int,
      Elastic<D, S>: $trait<X>,
      <Elastic<D, S> as $trait<X>>::Output: Number,
      T: OverflowTag,
    {
      type Output = Overflow<<Elastic<D, S> as $trait<X>>::Output, T>;

      #[inline]
      fn $name(self, rhs: X) -> Self::Output {
        Number::from_number(self.rep.$name(rhs))
      }
    }

    /// Narrows the result back to the type of `self`, under the policy of `self`.
    impl<D, S, T, Rhs> $trait_assign<Rhs> for Overflow<Elastic<D, S>, T>
    where
      D: SetDigits<S>, S: Bit,
      T: OverflowTag,
      Self: $trait<Rhs>,
      <Self as $trait<Rhs>>::Output: Number,
    {
      #[inline]
      fn $name_assign(&mut self, rhs: Rhs) { *self = Self::from_number(self.$name(rhs)) }
    }
  }
}

mk_elastic_ops!{Add, AddAssign, add, add_assign}
mk_elastic_ops!{Sub, SubAssign, sub, sub_assign}
mk_elastic_ops!{Mul, MulAssign, mul, mul_assign}
mk_elastic_ops!{Div, DivAssign, div, div_assign}
mk_elastic_ops!{Rem, RemAssign, rem, rem_assign}
mk_elastic_ops!{BitAnd, BitAndAssign, bitand, bitand_assign}
mk_elastic_ops!{BitOr, BitOrAssign, bitor, bitor_assign}
mk_elastic_ops!{BitXor, BitXorAssign, bitxor, bitxor_assign}

impl<R: Int, T: OverflowTag> Shl<u32> for Overflow<R, T> {
  type Output = Self;

  #[inline]
  fn shl(self, rhs: u32) -> Self { Self::from_rep(dispatch::shift::<ShlOp, T, R>(self.rep, rhs)) }
}

impl<R: Int, T: OverflowTag> Shr<u32> for Overflow<R, T> {
  type Output = Self;

  #[inline]
  fn shr(self, rhs: u32) -> Self { Self::from_rep(dispatch::shift::<ShrOp, T, R>(self.rep, rhs)) }
}

/// Keeps the digits of `self`, so the policy applies to any bits shifted out of them.
impl<D: SetDigits<S>, S: Bit, T: OverflowTag> Shl<u32> for Overflow<Elastic<D, S>, T> {
  type Output = Self;

  #[inline]
  fn shl(self, rhs: u32) -> Self { self.scale(rhs.min(i32::MAX as u32) as i32, 2) }
}

impl<D: SetDigits<S>, S: Bit, T: OverflowTag> Shr<u32> for Overflow<Elastic<D, S>, T> {
  type Output = Self;

  #[inline]
  fn shr(self, rhs: u32) -> Self { Self::from_rep(self.rep >> rhs) }
}

impl<R: Number, T: OverflowTag> ShlAssign<u32> for Overflow<R, T>
where
  Self: Shl<u32, Output = Self>,
{
  #[inline]
  fn shl_assign(&mut self, rhs: u32) { *self = *self << rhs }
}

impl<R: Number, T: OverflowTag> ShrAssign<u32> for Overflow<R, T>
where
  Self: Shr<u32, Output = Self>,
{
  #[inline]
  fn shr_assign(&mut self, rhs: u32) { *self = *self >> rhs }
}

impl<R: Int, T: OverflowTag> Neg for Overflow<R, T> {
  type Output = Self;

  #[inline]
  fn neg(self) -> Self { Self::from_rep(dispatch::unary::<NegOp, T, R>(self.rep)) }
}

/// The negation of an unsigned `Elastic` is signed, so this cannot overflow.
impl<D, S, T> Neg for Overflow<Elastic<D, S>, T>
where
  D: SetDigits<S> + SetDigits<typenum::B1>,
  S: Bit,
  T: OverflowTag,
{
  type Output = Overflow<Elastic<D, typenum::B1>, T>;

  #[inline]
  fn neg(self) -> Self::Output { Overflow::from_rep(-self.rep) }
}

impl<R: Int, T: OverflowTag> Not for Overflow<R, T> {
  type Output = Self;

  #[inline]
  fn not(self) -> Self { Self::from_rep(dispatch::unary::<NotOp, T, R>(self.rep)) }
}

impl<D: SetDigits<S>, S: Bit, T: OverflowTag> Not for Overflow<Elastic<D, S>, T> {
  type Output = Self;

  #[inline]
  fn not(self) -> Self { Self::from_rep(!self.rep) }
}

impl<R: Int, T: OverflowTag> Increment for Overflow<R, T> {
  #[inline]
  fn increment(&mut self) { *self += R::ONE }

  #[inline]
  fn decrement(&mut self) { *self -= R::ONE }
}

impl<D: SetDigits<S>, S: Bit, T: OverflowTag> Increment for Overflow<Elastic<D, S>, T>
where
  Self: AddAssign<Elastic<U1, B0>> + SubAssign<Elastic<U1, B0>>,
{
  #[inline]
  fn increment(&mut self) { *self += Elastic::<U1, B0>::from_rep(1) }

  #[inline]
  fn decrement(&mut self) { *self -= Elastic::<U1, B0>::from_rep(1) }
}
