//! Error types, and the two ways of bailing out of an arithmetic operation that overflowed:
//! [`throw`] (unwind with the error as payload) and [`trap`] (abort the process).

use crate::ops::Direction;

/// An arithmetic result fell outside the range of its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum OverflowError {
  #[error("positive overflow")]
  Positive,
  #[error("negative overflow")]
  Negative,
}

impl From<Direction> for OverflowError {
  fn from(direction: Direction) -> Self {
    match direction {
      Direction::Positive => Self::Positive,
      Direction::Negative => Self::Negative,
    }
  }
}

impl OverflowError {
  pub fn direction(self) -> Direction {
    match self {
      Self::Positive => Direction::Positive,
      Self::Negative => Direction::Negative,
    }
  }
}

/// A value did not fit the narrower type it was converted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, thiserror::Error)]
#[error("narrowing conversion discards significant bits")]
pub struct NarrowingError;

/// Unwind with `err` as the panic payload, so it can be recovered with
/// [`std::panic::catch_unwind`] and downcast to [`OverflowError`]. Without `std`, this is an
/// ordinary panic with the error as message.
#[cold]
#[track_caller]
pub(crate) fn throw(err: OverflowError) -> ! {
  log::debug!("throwing {err}");
  #[cfg(feature = "std")]
  std::panic::panic_any(err);
  #[cfg(not(feature = "std"))]
  panic!("{err}")
}

/// Terminate the process, without unwinding. Without `std`, panic instead (which aborts anyway
/// under `panic = "abort"`).
#[cold]
#[track_caller]
pub(crate) fn trap(err: OverflowError) -> ! {
  log::error!("{err}: aborting");
  #[cfg(feature = "std")]
  {
    std::eprintln!("{}: {err}: aborting", core::panic::Location::caller());
    std::process::abort()
  }
  #[cfg(not(feature = "std"))]
  panic!("{err}")
}
