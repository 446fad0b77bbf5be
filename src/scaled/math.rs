use core::ops::{Add, BitOr, Sub};

use typenum::{Bit, Diff, Integer, NonZero, Or, PInt, Sum, U2, Unsigned};

use super::Scaled;
use crate::{Elastic, I512, U512};
use crate::digits::{Number, SetDigits};
use crate::rounding::{away, cmp_half};
use crate::underlying::{Sealed, isqrt};

impl<R: Number, E: Integer, X: Unsigned> Scaled<R, E, X> {
  /// The quotient `n / d`, with the exponent of `Self`.
  ///
  /// Unlike the `/` operator, which divides the representations and keeps only the integer part,
  /// this rescales the dividend first (by the difference between the exponent of `Self` and
  /// that of the naive quotient). The division is exact, in a 512-bit integer, and its result is
  /// rounded once, as `R` rounds (truncated towards zero unless `R` has a rounding policy), then
  /// converted to `R` (so any overflow policy of `R` applies to it).
  ///
  /// ```
  /// # use compnum::*;
  /// # use compnum::typenum::{N16, Z0};
  /// let one = Scaled::<i32, Z0>::from(1);
  /// let three = Scaled::<i32, Z0>::from(3);
  /// let third = Scaled::<i32, N16>::quotient(one, three);
  /// assert_eq!(third.rep(), 21845);
  /// assert_eq!((one / three).rep(), 0);
  /// ```
  pub fn quotient<R1, E1, R2, E2>(n: Scaled<R1, E1, X>, d: Scaled<R2, E2, X>) -> Self
  where
    R1: Number, E1: Integer,
    R2: Number, E2: Integer,
  {
    let shift = E1::I32 - E2::I32 - E::I32;
    let (n, d) = (I512::from_number(n.rep), I512::from_number(d.rep));
    let (n, d) = if shift >= 0 {
      (n.scale(shift, X::U32), d)
    } else {
      (n, d.scale(-shift, X::U32))
    };
    let (quotient, remainder) = n.wrapping_div_rem(d);
    let negative = n.is_negative() != d.is_negative();
    let quotient = if remainder != I512::ZERO && R::round_away(negative, true, cmp_half(remainder, d)) {
      away(quotient, negative)
    } else {
      quotient
    };
    Self::from_rep(R::from_number(quotient))
  }

  /// Square root, with the same exponent as `self` (truncated to it, for the primitive
  /// representations).
  ///
  /// # Panics
  ///
  /// If `self` is negative.
  ///
  /// ```
  /// # use compnum::*;
  /// # use compnum::typenum::N16;
  /// let two = Scaled::<i32, N16>::from(2);
  /// assert_eq!(two.sqrt().rep(), 92681);
  /// ```
  #[track_caller]
  pub fn sqrt(self) -> Self {
    if self.rep.is_negative() {
      panic!("square root of a negative number")
    }
    // sqrt(rep × X^E) = sqrt(rep × X^-E) × X^E
    let radicand = U512::from_number(self.rep).scale(-E::I32, X::U32);
    Self::from_rep(R::from_number(isqrt(radicand)))
  }

  /// The greatest integer not greater than `self`. Only implemented for radix 2.
  ///
  /// ```
  /// # use compnum::*;
  /// # use compnum::typenum::N4;
  /// assert_eq!(Scaled::<i32, N4>::from_f64(2.75).floor(), 2);
  /// assert_eq!(Scaled::<i32, N4>::from_f64(-2.75).floor(), -3);
  /// ```
  pub fn floor(self) -> Self {
    if const { X::U32 != 2 } { unimplemented!("floor of a non-binary fixed-point number") }
    if E::I32 >= 0 {
      return self
    }
    // In two's complement, clearing the fractional bits rounds towards -∞ whatever the sign.
    let fraction = E::I32.unsigned_abs();
    let rep = self.rep;
    Self::from_rep(R::from_words(|offset| {
      let word = rep.word(offset);
      if offset >= fraction {
        word
      } else if fraction - offset >= 64 {
        0
      } else {
        word & (!0 << (fraction - offset))
      }
    }))
  }
}

/// The type of [`quotient`] of two binary fixed-point numbers with [`Elastic`] representations.
pub type Quotient<D1, S1, E1, D2, S2, E2> =
  Scaled<Elastic<Sum<D1, D2>, Or<S1, S2>>, Diff<Diff<E1, E2>, PInt<D2>>>;

/// The quotient `n / d` of two binary fixed-point numbers with [`Elastic`] representations, in a
/// type wide enough that no integer part is lost and that it has as many fractional digits as
/// the divisor has digits.
///
/// ```
/// # use compnum::*;
/// # use compnum::typenum::{N8, U8, U16, Z0};
/// let a = Scaled::<Elastic<U8>, Z0>::from(1);
/// let b = Scaled::<Elastic<U8>, Z0>::from(3);
/// let q: Scaled<Elastic<U16>, N8> = compnum::scaled::quotient(a, b);
/// assert_eq!(q.rep(), Elastic::<U16>::new(85));
/// ```
pub fn quotient<D1, S1, E1, D2, S2, E2>(
  n: Scaled<Elastic<D1, S1>, E1, U2>,
  d: Scaled<Elastic<D2, S2>, E2, U2>,
) -> Quotient<D1, S1, E1, D2, S2, E2>
where
  D1: SetDigits<S1> + Add<D2>,
  D2: SetDigits<S2> + NonZero,
  S1: Bit + BitOr<S2>,
  S2: Bit,
  Sum<D1, D2>: SetDigits<Or<S1, S2>>,
  Or<S1, S2>: Bit,
  E1: Integer + Sub<E2>,
  E2: Integer,
  Diff<E1, E2>: Sub<PInt<D2>>,
  Diff<Diff<E1, E2>, PInt<D2>>: Integer,
{
  Scaled::quotient(n, d)
}
