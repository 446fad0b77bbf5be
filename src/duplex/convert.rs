use core::fmt;

use super::Duplex;
use crate::Int;
use crate::digits::Number;
use crate::error::NarrowingError;
use crate::underlying::Sealed;

impl<U: Int, L: Int> Duplex<U, L> {
  /// Convert from any [`Int`], or fail if `value` is not representable.
  ///
  /// ```
  /// # use compnum::*;
  /// assert_eq!(Duplex::<i8, u8>::try_new(-300_i32), Ok(Duplex::from(-300_i16)));
  /// assert_eq!(Duplex::<u8, u8>::try_new(-1_i32), Err(NarrowingError));
  /// ```
  pub fn try_new<T: Int>(value: T) -> Result<Self, NarrowingError> {
    if value.fits::<Self>() { Ok(value.cast()) } else { Err(NarrowingError) }
  }

  /// Convert to a narrower [`Int`].
  ///
  /// # Panics
  ///
  /// If the value is not representable in `T`. Use [`TryFrom`] to get a `Result` instead.
  ///
  /// ```
  /// # use compnum::*;
  /// assert_eq!(I256::from(-5_i8).narrow::<i16>(), -5);
  /// ```
  #[track_caller]
  pub fn narrow<T: Int>(self) -> T {
    if self.fits::<T>() {
      self.cast()
    } else {
      panic!("{}", NarrowingError)
    }
  }
}

macro_rules! impl_convert {
  ($($int:ty)*) => {$(
    /// Sign- or zero-extends `value`.
    ///
    /// Panics if the value does not fit, which can only happen if this `Duplex` is narrower
    /// than the argument, or unsigned and the argument is negative. [`Duplex::try_new`] returns
    /// a `Result` instead.
    impl<U: Int, L: Int> From<$int> for Duplex<U, L> {
      #[inline]
      #[track_caller]
      fn from(value: $int) -> Self {
        let widening = Self::DIGITS >= <$int as Number>::DIGITS
          && (Self::IS_SIGNED || !<$int as Number>::IS_SIGNED);
        if !widening && !value.fits::<Self>() {
          panic!("{}", NarrowingError)
        }
        value.cast()
      }
    }

    impl<U: Int, L: Int> TryFrom<Duplex<U, L>> for $int {
      type Error = NarrowingError;

      #[inline]
      fn try_from(value: Duplex<U, L>) -> Result<Self, NarrowingError> {
        if value.fits::<$int>() { Ok(value.cast()) } else { Err(NarrowingError) }
      }
    }
  )*}
}

impl_convert!{i8 i16 i32 i64 i128 u8 u16 u32 u64 u128}

/// Decimal, like the primitives (but ignoring width and fill flags).
impl<U: Int, L: Int> fmt::Display for Duplex<U, L> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fn write_digits<T: Int>(x: T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      let (quotient, remainder) = x.wrapping_div_rem(T::from_u64(10));
      if quotient != T::ZERO {
        write_digits(quotient, f)?;
      }
      write!(f, "{}", remainder.word(0))
    }

    let magnitude = if self.is_negative() {
      f.write_str("-")?;
      self.wrapping_neg()
    } else {
      *self
    };
    // `MIN` negates to itself, but its bit pattern read as unsigned is the right magnitude.
    write_digits(magnitude.to_unsigned(), f)
  }
}
