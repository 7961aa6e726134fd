use std::fmt;

/// Errors surfaced at the construction or extraction boundary.
///
/// Violations of the quad-edge invariants are not user errors in the usual
/// sense — they indicate a defect in the builder — but they are still
/// reported as `Error::InvariantViolation` rather than a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// Fewer than two sites were supplied to `Delaunay::new`.
  TooFewSites,
  /// Two input sites share the same coordinates.
  DuplicateSite,
  /// A coordinate is NaN or infinite.
  NonFinite,
  /// `circumcenter` was asked for the center of a collinear triple.
  Degenerate,
  /// A quad-edge invariant (I1-I5) was violated. Indicates a bug in the
  /// builder rather than bad input; only returned in debug builds, where
  /// invariant checks are compiled in.
  InvariantViolation,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::TooFewSites => write!(f, "at least two sites are required"),
      Error::DuplicateSite => write!(f, "duplicate site coordinates are not supported"),
      Error::NonFinite => write!(f, "site coordinates must be finite"),
      Error::Degenerate => write!(f, "circumcenter of a collinear triple is undefined"),
      Error::InvariantViolation => write!(f, "quad-edge invariant violated"),
    }
  }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
