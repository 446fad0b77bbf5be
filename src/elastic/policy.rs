//! The digit rules of [`Elastic`](super::Elastic) arithmetic, as plain functions.
//!
//! These are the same rules that the operators of [`Elastic`](super::Elastic) compute at the
//! type level, usable at run time or in `const` contexts (for instance, to size a buffer or to
//! pick the type of an accumulator).
//!
//! ```
//! # use compnum::elastic::policy::{self, Width};
//! let byte = Width::new(8, false);
//! let sum = policy::add(byte, byte);
//! assert_eq!(sum, Width::new(9, false));
//! assert_eq!(policy::mul(sum, Width::new(1, true)), Width::new(9, true));
//! ```

/// Digit count and signedness of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Width {
  pub digits: u32,
  pub signed: bool,
}

impl Width {
  pub const fn new(digits: u32, signed: bool) -> Self {
    Self { digits, signed }
  }
}

const fn max(a: u32, b: u32) -> u32 {
  if a > b { a } else { b }
}

const fn min(a: u32, b: u32) -> u32 {
  if a < b { a } else { b }
}

/// How many digits an operand adds to a product: none if it only has one (its magnitude is at
/// most 1), else all of them.
pub const fn contribution(digits: u32) -> u32 {
  if digits == 1 { 0 } else { digits }
}

pub const fn add(lhs: Width, rhs: Width) -> Width {
  Width::new(max(lhs.digits, rhs.digits) + 1, lhs.signed | rhs.signed)
}

/// Always signed. One more digit than the widest operand, unless both are unsigned (in which
/// case the difference is between `-max` and `max`).
pub const fn sub(lhs: Width, rhs: Width) -> Width {
  let extra = (lhs.signed | rhs.signed) as u32;
  Width::new(max(lhs.digits, rhs.digits) + extra, true)
}

pub const fn mul(lhs: Width, rhs: Width) -> Width {
  Width::new(max(1, contribution(lhs.digits) + contribution(rhs.digits)), lhs.signed | rhs.signed)
}

/// The quotient is no wider than the dividend.
pub const fn div(lhs: Width, rhs: Width) -> Width {
  Width::new(lhs.digits, lhs.signed | rhs.signed)
}

pub const fn rem(lhs: Width, rhs: Width) -> Width {
  Width::new(lhs.digits, lhs.signed | rhs.signed)
}

pub const fn bit_and(lhs: Width, rhs: Width) -> Width {
  Width::new(min(lhs.digits, rhs.digits), lhs.signed | rhs.signed)
}

pub const fn bit_or(lhs: Width, rhs: Width) -> Width {
  Width::new(max(lhs.digits, rhs.digits), lhs.signed | rhs.signed)
}

pub const fn bit_xor(lhs: Width, rhs: Width) -> Width {
  bit_or(lhs, rhs)
}

/// `<<` and `>>` keep the width of the left operand.
pub const fn shift(lhs: Width) -> Width {
  lhs
}

pub const fn neg(x: Width) -> Width {
  Width::new(x.digits, true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn widths() -> impl Strategy<Value = Width> {
    (1 ..= 64_u32, any::<bool>()).prop_map(|(digits, signed)| Width::new(digits, signed))
  }

  /// Largest magnitude representable with `w` (the range is symmetric).
  fn limit(w: Width) -> i128 {
    (1_i128 << w.digits) - 1
  }

  fn fits(x: i128, w: Width) -> bool {
    x.unsigned_abs() <= limit(w) as u128 && (w.signed || x >= 0)
  }

  #[test]
  fn contribution_of_one_digit() {
    assert_eq!(contribution(1), 0);
    assert_eq!(contribution(2), 2);
    assert_eq!(mul(Width::new(1, true), Width::new(1, false)), Width::new(1, true));
    assert_eq!(mul(Width::new(1, false), Width::new(30, false)), Width::new(30, false));
  }

  proptest!{
    #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
    #[test]
    fn widths_are_monotonic(a in widths(), b in widths()) {
      prop_assert_eq!(add(a, b).digits, a.digits.max(b.digits) + 1);
      prop_assert_eq!(mul(a, b).digits, 1.max(contribution(a.digits) + contribution(b.digits)));
      prop_assert!(sub(a, b).signed);
      prop_assert_eq!(add(a, b), add(b, a));
      prop_assert_eq!(mul(a, b), mul(b, a));
    }

    /// The extreme values of the operands give results that fit the computed width.
    #[test]
    fn extremes_fit(a in widths(), b in widths()) {
      prop_assume!(a.digits < 63 && b.digits < 63);
      let lows = |w: Width| if w.signed { -limit(w) } else { 0 };
      for x in [lows(a), 0, limit(a)] {
        for y in [lows(b), 0, limit(b)] {
          prop_assert!(fits(x + y, add(a, b)));
          prop_assert!(fits(x - y, sub(a, b)));
          prop_assert!(fits(x * y, mul(a, b)));
          if y != 0 {
            prop_assert!(fits(x / y, div(a, b)));
            prop_assert!(fits(x % y, rem(a, b)));
          }
        }
      }
    }
  }
}
