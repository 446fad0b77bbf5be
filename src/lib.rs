#![cfg_attr(not(any(test, feature = "std")), no_std)]
//! This crate provides *composable* numeric types: fixed-point numbers, double-width integers,
//! integers that widen as they compute, and wrappers that attach an overflow or a rounding
//! policy to any of them, all with zero-cost abstractions resolved at compile time.
//!
//! # Introduction
//!
//! Each type in this crate does one thing, and takes the type it builds on as a parameter:
//!
//!   - [`Duplex<Upper, Lower>`](Duplex): an integer twice as wide as its halves (so
//!     [`I256`], [`U256`], [`I512`], ... are just nested `Duplex`es).
//!   - [`Elastic<Digits, Signed>`](Elastic): an integer whose number of digits is part of its
//!     type, and grows with each operation so that results never overflow.
//!   - [`Overflow<Rep, Tag>`](Overflow): checks every operation on `Rep` for overflow, and
//!     [saturates](Saturated), [unwinds](Throwing), [aborts](Trapping), ... as `Tag` says.
//!   - [`Rounding<Rep, Tag>`](Rounding): rounds every division and down-scaling of `Rep` to
//!     [nearest](Nearest), [towards -∞](NegativeInfinity), ... as `Tag` says.
//!   - [`Scaled<Rep, Exponent, Radix>`](Scaled): a fixed-point number, `rep × radix^exponent`.
//!
//! These compose freely. A "32-bit integer, saturating on overflow, rounding to nearest,
//! scaled by 2⁻⁸" is spelled
//!
//! ```
//! # use compnum::*;
//! # use compnum::typenum::N8;
//! type Num = Scaled<Rounding<Overflow<i32, Saturated>, Nearest>, N8>;
//! # let _ = Num::default();
//! ```
//!
//! and every layer sees to its own concern: `Scaled` tracks the exponent, `Rounding` rounds,
//! `Overflow` saturates, the machine integer does the arithmetic.
//!
//! Sizes and exponents are [`typenum`] numbers, re-exported here. The common traits of all
//! number types are in [`Number`].
//!
//! # Usage
//!
//! ```
//! use compnum::*;
//! use compnum::typenum::{N4, N8, U8, U9, U16, B0};
//!
//! // Fixed point: multiplication adds the exponents, addition aligns them.
//! let a = Scaled::<i32, N4>::from_f64(1.5);
//! let b: Scaled<i32, N8> = a * a;
//! assert_eq!(b, 2.25);
//! assert_eq!(a + b, 3.75);
//!
//! // Elastic: the result type holds any result.
//! let x = Elastic::<U8, B0>::from(255_u8);
//! let y: Elastic<U9, B0> = x + x;
//! let z: Elastic<U16, B0> = x * x;
//! assert_eq!(y, 510);
//! assert_eq!(z, 65025);
//!
//! // Overflow and rounding policies.
//! assert_eq!(SaturatedInteger::<i8>::from(100) * 2, 127);
//! assert_eq!(NearestInteger::<i32>::from(7) / 2, 4);
//!
//! // Wide integers.
//! let big = U256::from(u128::MAX) * U256::from(u128::MAX);
//! assert_eq!(big.to_string(), "115792089237316195423570985008687907852589419931798687112530834793049593217025");
//! ```
//!
//! # Errors and panics
//!
//! Overflow is only ever reported by [`Overflow`], according to its tag: [`Throwing`] unwinds
//! with an [`OverflowError`] as payload (and the `try_*` methods of [`Overflow`] return it),
//! [`Trapping`] aborts the process. Everything else wraps, like the primitive integers in
//! release mode. Division by zero panics, as it does for the primitive integers.
//!
//! # Features
//!
//!   - `std` (default): [`Throwing`] unwinds with [`std::panic::panic_any`] and [`Trapping`]
//!     prints a message before aborting. Without it the crate is `no_std`, and both panic.
//!
//! Nothing is logged unless an overflow is thrown or trapped (through the [`log`](https://docs.rs/log)
//! facade, so only if the application installs a logger).

pub use typenum;

mod underlying;

pub mod digits;
pub mod duplex;
pub mod elastic;
pub mod error;
pub mod ops;
pub mod overflow;
pub mod rounding;
pub mod scaled;

pub use underlying::Int;
pub use digits::{Number, SetDigits, WideInteger, digits_for};
pub use duplex::Duplex;
pub use elastic::{Elastic, UElastic};
pub use error::{NarrowingError, OverflowError};
pub use ops::Increment;
pub use overflow::{NativeOverflow, Overflow, Saturated, Throwing, Trapping, Undefined};
pub use rounding::{DivideRounded, NativeRounding, Nearest, NegativeInfinity, Rounding, TieToPositiveInfinity, TowardsInfinity};
pub use scaled::{Fraction, Scaled};

/// 256-bit signed integer.
pub type I256 = Duplex<i128, u128>;

/// 256-bit unsigned integer.
pub type U256 = Duplex<u128, u128>;

/// 512-bit signed integer.
pub type I512 = Duplex<I256, U256>;

/// 512-bit unsigned integer.
pub type U512 = Duplex<U256, U256>;

/// An integer that saturates to its bounds on overflow.
pub type SaturatedInteger<R> = Overflow<R, Saturated>;

/// An integer that unwinds with an [`OverflowError`] on overflow.
pub type ThrowingInteger<R> = Overflow<R, Throwing>;

/// An integer that aborts the process on overflow.
pub type TrappingInteger<R> = Overflow<R, Trapping>;

/// An integer that wraps on overflow, like the primitives in release mode.
pub type NativeOverflowInteger<R> = Overflow<R, NativeOverflow>;

/// An integer whose divisions round to nearest (ties away from zero).
pub type NearestInteger<R> = Rounding<R, Nearest>;

/// A binary fixed-point number with an [`Elastic`] representation of `D` digits, scaled by
/// `2^E`.
pub type ElasticScaled<D, E, S = typenum::B1> = Scaled<Elastic<D, S>, E>;

#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x1000} else {0x4_0000};
