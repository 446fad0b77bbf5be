use super::Duplex;
use crate::Int;
use crate::digits::Number;
use crate::underlying::Sealed;

/// Truncating division and remainder, with the sign rules of the primitives (the quotient
/// rounds towards zero, the remainder takes the sign of the dividend). Wraps on `MIN / -1`.
pub(super) fn div_rem<U: Int, L: Int>(
  dividend: Duplex<U, L>,
  divisor: Duplex<U, L>,
) -> (Duplex<U, L>, Duplex<U, L>) {
  let (n_negative, d_negative) = (dividend.is_negative(), divisor.is_negative());
  let n = if n_negative { dividend.wrapping_neg() } else { dividend }.to_unsigned();
  let d = if d_negative { divisor.wrapping_neg() } else { divisor }.to_unsigned();
  let (quotient, remainder) = unsigned_div_rem(n, d);
  let (quotient, remainder) = (Duplex::from_unsigned(quotient), Duplex::from_unsigned(remainder));
  (
    if n_negative != d_negative { quotient.wrapping_neg() } else { quotient },
    if n_negative { remainder.wrapping_neg() } else { remainder },
  )
}

/// Long division of unsigned `Duplex`es, one word (half) at a time.
///
/// A one-word divisor takes two steps of two words by one, each a [`Sealed::div_wide`] one
/// level down. Otherwise the quotient is a single word: it is estimated from the leading words
/// of the dividend (halved, so that the estimate cannot overflow) and of the normalized
/// divisor, which undershoots by at most one; the remainder then tells whether to correct it.
fn unsigned_div_rem<U: Int, L: Int>(
  n: Duplex<U, L>,
  d: Duplex<U, L>,
) -> (Duplex<U, L>, Duplex<U, L>) {
  assert!(d != Duplex::ZERO, "attempt to divide by zero");
  let (d1, d0) = (d.upper.cast::<L>(), d.lower);
  if d1 == L::ZERO {
    let (q1, r) = n.upper.cast::<L>().wrapping_div_rem(d0);
    let (q0, r) = r.div_wide(n.lower, d0);
    return (Duplex::from_parts(q1.cast(), q0), Duplex::from_parts(U::ZERO, r))
  }

  let s = d1.leading_zeros();
  let v1 = d.shift_left(s).upper.cast::<L>();
  let u = n.shift_right(1);
  let (estimate, _) = u.upper.cast::<L>().div_wide(u.lower, v1);
  let mut q = estimate.shift_right(L::BITS - 1 - s);
  if q != L::ZERO {
    q = q.wrapping_sub(L::ONE);
  }
  let mut remainder = n.wrapping_sub(Duplex::from_parts(U::ZERO, q).wrapping_mul(d));
  if remainder >= d {
    q = q.wrapping_add(L::ONE);
    remainder = remainder.wrapping_sub(d);
  }
  (Duplex::from_parts(U::ZERO, q), remainder)
}
