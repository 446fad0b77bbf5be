//! Type-level mapping from a number of digits to the narrowest machine integer holding them.

use core::ops::Sub;

use typenum::{B0, B1, Bit, Diff, Eq, IsEqual, Unsigned};
#[allow(clippy::wildcard_imports)]
use typenum::consts::*;

use crate::Int;
use crate::underlying::Sealed;

/// The narrowest [`Int`] with at least `Self` digits and the signedness `S`.
///
/// Implemented for 1 to 256 digits (signed or unsigned), mapping to `i8` .. `i128`/`u8` ..
/// `u128` and then to the [`Duplex`](crate::Duplex) compositions [`I256`](crate::I256),
/// [`U256`](crate::U256) and [`I512`](crate::I512).
pub trait SetDigits<S: Bit>: Unsigned {
  type Rep: Int;
}

/// The narrowest [`Int`] with at least `D` digits and the signedness of `T`.
pub type SetDigitsOf<T, D> = <D as SetDigits<<T as Sealed>::Signedness>>::Rep;

/// The narrowest [`Int`] with at least `D` digits, signed by default.
pub type WideInteger<D, S = B1> = <D as SetDigits<S>>::Rep;

macro_rules! set_digits {
  ($signedness:ty, $rep:ty: $($digits:ty)*) => {
    $(impl SetDigits<$signedness> for $digits { type Rep = $rep; })*
  }
}

set_digits!{B1, i8:
  U1 U2 U3 U4 U5 U6 U7
}
set_digits!{B1, i16:
  U8 U9 U10 U11 U12 U13 U14 U15
}
set_digits!{B1, i32:
  U16 U17 U18 U19 U20 U21 U22 U23 U24 U25 U26 U27 U28 U29 U30 U31
}
set_digits!{B1, i64:
  U32 U33 U34 U35 U36 U37 U38 U39 U40 U41 U42 U43 U44 U45 U46 U47 U48 U49 U50 U51 U52 U53 U54 U55
  U56 U57 U58 U59 U60 U61 U62 U63
}
set_digits!{B1, i128:
  U64 U65 U66 U67 U68 U69 U70 U71 U72 U73 U74 U75 U76 U77 U78 U79 U80 U81 U82 U83 U84 U85 U86 U87
  U88 U89 U90 U91 U92 U93 U94 U95 U96 U97 U98 U99 U100 U101 U102 U103 U104 U105 U106 U107 U108 U109
  U110 U111 U112 U113 U114 U115 U116 U117 U118 U119 U120 U121 U122 U123 U124 U125 U126 U127
}
set_digits!{B1, crate::I256:
  U128 U129 U130 U131 U132 U133 U134 U135 U136 U137 U138 U139 U140 U141 U142 U143 U144 U145 U146
  U147 U148 U149 U150 U151 U152 U153 U154 U155 U156 U157 U158 U159 U160 U161 U162 U163 U164 U165
  U166 U167 U168 U169 U170 U171 U172 U173 U174 U175 U176 U177 U178 U179 U180 U181 U182 U183 U184
  U185 U186 U187 U188 U189 U190 U191 U192 U193 U194 U195 U196 U197 U198 U199 U200 U201 U202 U203
  U204 U205 U206 U207 U208 U209 U210 U211 U212 U213 U214 U215 U216 U217 U218 U219 U220 U221 U222
  U223 U224 U225 U226 U227 U228 U229 U230 U231 U232 U233 U234 U235 U236 U237 U238 U239 U240 U241
  U242 U243 U244 U245 U246 U247 U248 U249 U250 U251 U252 U253 U254 U255
}
set_digits!{B1, crate::I512:
  U256
}
set_digits!{B0, u8:
  U1 U2 U3 U4 U5 U6 U7 U8
}
set_digits!{B0, u16:
  U9 U10 U11 U12 U13 U14 U15 U16
}
set_digits!{B0, u32:
  U17 U18 U19 U20 U21 U22 U23 U24 U25 U26 U27 U28 U29 U30 U31 U32
}
set_digits!{B0, u64:
  U33 U34 U35 U36 U37 U38 U39 U40 U41 U42 U43 U44 U45 U46 U47 U48 U49 U50 U51 U52 U53 U54 U55 U56
  U57 U58 U59 U60 U61 U62 U63 U64
}
set_digits!{B0, u128:
  U65 U66 U67 U68 U69 U70 U71 U72 U73 U74 U75 U76 U77 U78 U79 U80 U81 U82 U83 U84 U85 U86 U87 U88
  U89 U90 U91 U92 U93 U94 U95 U96 U97 U98 U99 U100 U101 U102 U103 U104 U105 U106 U107 U108 U109
  U110 U111 U112 U113 U114 U115 U116 U117 U118 U119 U120 U121 U122 U123 U124 U125 U126 U127 U128
}
set_digits!{B0, crate::U256:
  U129 U130 U131 U132 U133 U134 U135 U136 U137 U138 U139 U140 U141 U142 U143 U144 U145 U146 U147
  U148 U149 U150 U151 U152 U153 U154 U155 U156 U157 U158 U159 U160 U161 U162 U163 U164 U165 U166
  U167 U168 U169 U170 U171 U172 U173 U174 U175 U176 U177 U178 U179 U180 U181 U182 U183 U184 U185
  U186 U187 U188 U189 U190 U191 U192 U193 U194 U195 U196 U197 U198 U199 U200 U201 U202 U203 U204
  U205 U206 U207 U208 U209 U210 U211 U212 U213 U214 U215 U216 U217 U218 U219 U220 U221 U222 U223
  U224 U225 U226 U227 U228 U229 U230 U231 U232 U233 U234 U235 U236 U237 U238 U239 U240 U241 U242
  U243 U244 U245 U246 U247 U248 U249 U250 U251 U252 U253 U254 U255 U256
}

/// The number of digits an operand of `Self` digits contributes to a product: a single digit
/// contributes nothing, anything wider contributes all its digits (`U1 -> U0`, `U5 -> U5`).
pub trait Contribution: Unsigned {
  type Output: Unsigned;
}

impl<D> Contribution for D
where
  D: Unsigned + IsEqual<U1> + Sub<Eq<D, U1>>,
  Diff<D, Eq<D, U1>>: Unsigned,
{
  type Output = Diff<D, Eq<D, U1>>;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Number;

  fn storage_bits<D: SetDigits<S>, S: Bit>() -> u32 {
    <D::Rep as Number>::BITS
  }

  #[test]
  fn narrowest_storage() {
    assert_eq!(storage_bits::<U1, B1>(), 8);
    assert_eq!(storage_bits::<U7, B1>(), 8);
    assert_eq!(storage_bits::<U8, B1>(), 16);
    assert_eq!(storage_bits::<U8, B0>(), 8);
    assert_eq!(storage_bits::<U9, B0>(), 16);
    assert_eq!(storage_bits::<U63, B1>(), 64);
    assert_eq!(storage_bits::<U64, B0>(), 64);
    assert_eq!(storage_bits::<U127, B1>(), 128);
    assert_eq!(storage_bits::<U128, B1>(), 256);
    assert_eq!(storage_bits::<U200, B0>(), 256);
    assert_eq!(storage_bits::<U256, B1>(), 512);
  }

  #[test]
  fn signedness_is_kept() {
    assert!(<WideInteger<U20> as Number>::IS_SIGNED);
    assert!(!<WideInteger<U20, B0> as Number>::IS_SIGNED);
    assert!(!<SetDigitsOf<u8, U100> as Number>::IS_SIGNED);
    assert_eq!(<SetDigitsOf<i8, U100> as Number>::BITS, 128);
  }

  #[test]
  fn contribution() {
    assert_eq!(<<U1 as Contribution>::Output as Unsigned>::U32, 0);
    assert_eq!(<<U2 as Contribution>::Output as Unsigned>::U32, 2);
    assert_eq!(<<U64 as Contribution>::Output as Unsigned>::U32, 64);
  }
}
