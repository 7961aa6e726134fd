//! Geometric predicates: orientation, in-circle, circumcenter.
//!
//! All predicates operate in IEEE-754 double precision; numerical
//! robustness is not claimed beyond typical inputs.

use crate::data::Site;
use crate::error::{Error, Result};

/// The sign of a turn `(a, b, c)`.
///
/// A three-variant sum type rather than a bare `bool`, so the collinear case
/// is modeled explicitly instead of folded into `false` everywhere it's
/// inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}

impl Orientation {
  pub fn of(a: &Site, b: &Site, c: &Site) -> Orientation {
    let area2 = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
    if area2 > 0.0 {
      Orientation::CounterClockWise
    } else if area2 < 0.0 {
      Orientation::ClockWise
    } else {
      Orientation::CoLinear
    }
  }

  pub fn reverse(self) -> Orientation {
    match self {
      Orientation::CounterClockWise => Orientation::ClockWise,
      Orientation::ClockWise => Orientation::CounterClockWise,
      Orientation::CoLinear => Orientation::CoLinear,
    }
  }
}

/// True iff `(a, b, c)` is a strictly counter-clockwise triple. Collinear
/// triples return `false`.
pub fn ccw(a: &Site, b: &Site, c: &Site) -> bool {
  Orientation::of(a, b, c) == Orientation::CounterClockWise
}

/// True iff `d` lies strictly inside the circle through `a, b, c`, assuming
/// `(a, b, c)` is already counter-clockwise. Implemented as the sign of the
/// lifted-paraboloid 4x4 determinant.
pub fn in_circle(a: &Site, b: &Site, c: &Site, d: &Site) -> bool {
  let lift = |p: &Site| p.x * p.x + p.y * p.y;

  // Determinant of
  //   | ax ay ax^2+ay^2 1 |
  //   | bx by bx^2+by^2 1 |
  //   | cx cy cx^2+cy^2 1 |
  //   | dx dy dx^2+dy^2 1 |
  // via row reduction (subtract row a from b, c, d) then cofactor expansion
  // along the last column: only row a keeps a 1 there, at cofactor position
  // (1, 4), whose sign is (-1)^(1+4) = -1. So the full determinant is the
  // negation of the 3x3 minor on rows b, c, d below.
  let (ax, ay, al) = (a.x, a.y, lift(a));
  let (bx, by, bl) = (b.x, b.y, lift(b));
  let (cx, cy, cl) = (c.x, c.y, lift(c));
  let (dx, dy, dl) = (d.x, d.y, lift(d));

  let bx_ = bx - ax;
  let by_ = by - ay;
  let bl_ = bl - al;
  let cx_ = cx - ax;
  let cy_ = cy - ay;
  let cl_ = cl - al;
  let dx_ = dx - ax;
  let dy_ = dy - ay;
  let dl_ = dl - al;

  let det3 = |m00: f64, m01: f64, m02: f64, m10: f64, m11: f64, m12: f64, m20: f64, m21: f64, m22: f64| -> f64 {
    m00 * (m11 * m22 - m12 * m21) - m01 * (m10 * m22 - m12 * m20) + m02 * (m10 * m21 - m11 * m20)
  };

  let minor = det3(bx_, by_, bl_, cx_, cy_, cl_, dx_, dy_, dl_);
  minor < 0.0
}

/// Closed-form circumcenter via perpendicular-bisector intersection.
/// Fails with `Degenerate` when `(a, b, c)` is collinear, i.e. the
/// denominator's magnitude is below `EPSILON`.
pub const EPSILON: f64 = 1e-10;

pub fn circumcenter(a: &Site, b: &Site, c: &Site) -> Result<Site> {
  let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
  if d.abs() < EPSILON {
    return Err(Error::Degenerate);
  }

  let a2 = a.x * a.x + a.y * a.y;
  let b2 = b.x * b.x + b.y * b.y;
  let c2 = c.x * c.x + c.y * c.y;

  let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
  let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;

  Ok(Site::new(ux, uy))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ccw_basic() {
    let a = Site::new(0.0, 0.0);
    let b = Site::new(1.0, 0.0);
    let c = Site::new(0.0, 1.0);
    assert!(ccw(&a, &b, &c));
    assert!(!ccw(&a, &c, &b));
  }

  #[test]
  fn ccw_collinear_is_false() {
    let a = Site::new(0.0, 0.0);
    let b = Site::new(1.0, 0.0);
    let c = Site::new(2.0, 0.0);
    assert!(!ccw(&a, &b, &c));
    assert_eq!(Orientation::of(&a, &b, &c), Orientation::CoLinear);
  }

  #[test]
  fn in_circle_center_is_inside() {
    let a = Site::new(1.0, 0.0);
    let b = Site::new(0.0, 1.0);
    let c = Site::new(-1.0, 0.0);
    assert!(ccw(&a, &b, &c));
    assert!(in_circle(&a, &b, &c, &Site::new(0.0, 0.0)));
    assert!(!in_circle(&a, &b, &c, &Site::new(5.0, 5.0)));
  }

  #[test]
  fn circumcenter_right_triangle() {
    let a = Site::new(0.0, 0.0);
    let b = Site::new(0.0, 1.0);
    let c = Site::new(1.0, 0.0);
    let center = circumcenter(&a, &b, &c).unwrap();
    assert!((center.x - 0.5).abs() < 1e-9);
    assert!((center.y - 0.5).abs() < 1e-9);
  }

  #[test]
  fn circumcenter_collinear_is_degenerate() {
    let a = Site::new(0.0, 0.0);
    let b = Site::new(1.0, 0.0);
    let c = Site::new(2.0, 0.0);
    assert_eq!(circumcenter(&a, &b, &c), Err(Error::Degenerate));
  }
}
