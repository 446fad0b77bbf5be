use core::ops::*;

use typenum::Bit;

use super::{DivideRounded, Rounding, RoundingTag};
use crate::{Duplex, Elastic, Int, Overflow};
use crate::digits::{Number, SetDigits};
use crate::ops::{Common, CommonTag, Increment, OverflowTag};

#[inline]
fn rep_add<T, A: Add<B>, B>(lhs: A, rhs: B) -> A::Output { lhs + rhs }

#[inline]
fn rep_sub<T, A: Sub<B>, B>(lhs: A, rhs: B) -> A::Output { lhs - rhs }

#[inline]
fn rep_mul<T, A: Mul<B>, B>(lhs: A, rhs: B) -> A::Output { lhs * rhs }

#[inline]
fn rep_div<T: RoundingTag, A: DivideRounded<B>, B>(lhs: A, rhs: B) -> A::Output {
  lhs.divide_rounded::<T>(rhs)
}

#[inline]
fn rep_rem<T, A: Rem<B>, B>(lhs: A, rhs: B) -> A::Output { lhs % rhs }

#[inline]
fn rep_bitand<T, A: BitAnd<B>, B>(lhs: A, rhs: B) -> A::Output { lhs & rhs }

#[inline]
fn rep_bitor<T, A: BitOr<B>, B>(lhs: A, rhs: B) -> A::Output { lhs | rhs }

#[inline]
fn rep_bitxor<T, A: BitXor<B>, B>(lhs: A, rhs: B) -> A::Output { lhs ^ rhs }

/// Implement a binary operator between two `Rounding`s (of any tags and representations),
/// between a `Rounding` and a bare representation (a machine integer, an `Overflow` or an
/// `Elastic`), and between a primitive or `Duplex` representation and a `Rounding` of it.
///
/// `$bound` is what the representations must implement, and `$f` applies it, given the tag.
macro_rules! mk_ops {
  (@bare $trait:ident, $name:ident, $bound:ident, $f:ident, [$($params:tt)*] $rhs:ty) => {
    impl<R1, T, $($params)*> $trait<$rhs> for Rounding<R1, T>
    where
      R1: Number + $bound<$rhs>,
      <R1 as $trait<$rhs>>::Output: Number,
      T: RoundingTag,
    {
      type Output = Rounding<<R1 as $trait<$rhs>>::Output, T>;

      #[inline]
      fn $name(self, rhs: $rhs) -> Self::Output {
        Rounding::from_rep($f::<T, R1, $rhs>(self.rep, rhs))
      }
    }
  };
  ($trait:ident, $name:ident, $bound:ident, $f:ident) => {
    impl<R1, T1, R2, T2> $trait<Rounding<R2, T2>> for Rounding<R1, T1>
    where
      R1: Number + $bound<R2>,
      R2: Number,
      <R1 as $trait<R2>>::Output: Number,
      T1: RoundingTag + CommonTag<T2>,
      T2: RoundingTag,
      Common<T1, T2>: RoundingTag,
    {
      type Output = Rounding<<R1 as $trait<R2>>::Output, Common<T1, T2>>;

      #[inline]
      fn $name(self, rhs: Rounding<R2, T2>) -> Self::Output {
        Rounding::from_rep($f::<Common<T1, T2>, R1, R2>(self.rep, rhs.rep))
      }
    }

    mk_ops!{@bare $trait, $name, $bound, $f, [X: Int] X}
    mk_ops!{@bare $trait, $name, $bound, $f, [R2: Number, T2: OverflowTag] Overflow<R2, T2>}
    mk_ops!{@bare $trait, $name, $bound, $f, [D: SetDigits<S>, S: Bit] Elastic<D, S>}

    impl<U: Int, L: Int, T: RoundingTag> $trait<Rounding<Duplex<U, L>, T>> for Duplex<U, L> {
      type Output = Rounding<Duplex<U, L>, T>;

      #[inline]
      fn $name(self, rhs: Rounding<Duplex<U, L>, T>) -> Self::Output {
        Rounding::<_, T>::from_rep(self).$name(rhs)
      }
    }

    mk_native_lhs!{$trait, $name: i8 i16 i32 i64 i128 u8 u16 u32 u64 u128}
  };
}

macro_rules! mk_native_lhs {
  ($trait:ident, $name:ident: $($int:ty)*) => {$(
    impl<T: RoundingTag> $trait<Rounding<$int, T>> for $int {
      type Output = Rounding<$int, T>;

      #[inline]
      fn $name(self, rhs: Rounding<$int, T>) -> Self::Output {
        Rounding::<_, T>::from_rep(self).$name(rhs)
      }
    }
  )*}
}

mk_ops!{Add, add, Add, rep_add}
mk_ops!{Sub, sub, Sub, rep_sub}
mk_ops!{Mul, mul, Mul, rep_mul}
mk_ops!{Div, div, DivideRounded, rep_div}
mk_ops!{Rem, rem, Rem, rep_rem}
mk_ops!{BitAnd, bitand, BitAnd, rep_bitand}
mk_ops!{BitOr, bitor, BitOr, rep_bitor}
mk_ops!{BitXor, bitxor, BitXor, rep_bitxor}

/// Compound assignment: the binary operator, then conversion back to the type of `self` (as
/// the representation converts, so an `Overflow` applies its policy).
macro_rules! mk_assign {
  ($($trait:ident, $name:ident, $trait_assign:ident, $name_assign:ident;)*) => {$(
    impl<R: Number, T: RoundingTag, Rhs> $trait_assign<Rhs> for Rounding<R, T>
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

impl<R: Number + Shl<u32, Output = R>, T: RoundingTag> Shl<u32> for Rounding<R, T> {
  type Output = Self;

  #[inline]
  fn shl(self, rhs: u32) -> Self { Self::from_rep(self.rep << rhs) }
}

/// Division by `2^rhs`, rounded according to `T` (so with [`NativeRounding`](super::NativeRounding)
/// it truncates towards zero, where the primitive `>>` rounds towards -∞).
impl<R: Number, T: RoundingTag> Shr<u32> for Rounding<R, T> {
  type Output = Self;

  #[inline]
  fn shr(self, rhs: u32) -> Self { self.scale(-(rhs.min(i32::MAX as u32) as i32), 2) }
}

impl<R: Number + Shl<u32, Output = R>, T: RoundingTag> ShlAssign<u32> for Rounding<R, T> {
  #[inline]
  fn shl_assign(&mut self, rhs: u32) { *self = *self << rhs }
}

impl<R: Number, T: RoundingTag> ShrAssign<u32> for Rounding<R, T> {
  #[inline]
  fn shr_assign(&mut self, rhs: u32) { *self = *self >> rhs }
}

impl<R: Number + Neg, T: RoundingTag> Neg for Rounding<R, T>
where
  R::Output: Number,
{
  type Output = Rounding<R::Output, T>;

  #[inline]
  fn neg(self) -> Self::Output { Rounding::from_rep(-self.rep) }
}

impl<R: Number + Not<Output = R>, T: RoundingTag> Not for Rounding<R, T> {
  type Output = Self;

  #[inline]
  fn not(self) -> Self { Self::from_rep(!self.rep) }
}

impl<R: Number, T: RoundingTag> Increment for Rounding<R, T>
where
  Self: AddAssign + SubAssign,
{
  #[inline]
  fn increment(&mut self) { *self += Self::min_positive() }

  #[inline]
  fn decrement(&mut self) { *self -= Self::min_positive() }
}
