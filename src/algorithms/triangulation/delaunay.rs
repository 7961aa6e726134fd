//! The divide-and-conquer Delaunay builder.
//!
//! Operates directly on a caller-owned [`Subdivision`] over a sorted site
//! slice. Every step that can hit an invariant violation returns `Result`
//! rather than unwrapping, so a malformed subdivision surfaces as an error
//! instead of a panic partway through the merge.

use crate::data::{QuarterEdgeId, Site, SiteId, Subdivision};
use crate::error::Result;
use crate::orientation::{ccw, in_circle};

fn left_of(sub: &Subdivision, sites: &[Site], p: SiteId, e: QuarterEdgeId) -> Result<bool> {
  let origin = sites[sub.origin(e)?.index()];
  let dest = sites[sub.dest(e)?.index()];
  Ok(ccw(&sites[p.index()], &origin, &dest))
}

fn right_of(sub: &Subdivision, sites: &[Site], p: SiteId, e: QuarterEdgeId) -> Result<bool> {
  let origin = sites[sub.origin(e)?.index()];
  let dest = sites[sub.dest(e)?.index()];
  Ok(ccw(&sites[p.index()], &dest, &origin))
}

/// Builds a Delaunay subdivision over `sites[lo..hi]`, which must already be
/// sorted lexicographically. Returns `(ldo, rdo)`: `ldo.origin` is the
/// leftmost site, `rdo.origin` the rightmost, both on the convex hull.
pub fn build(
  sub: &mut Subdivision,
  sites: &[Site],
  lo: usize,
  hi: usize,
) -> Result<(QuarterEdgeId, QuarterEdgeId)> {
  let n = hi - lo;
  debug_assert!(n >= 2);

  if n == 2 {
    let a = SiteId(lo as u32);
    let b = SiteId((lo + 1) as u32);
    let e = sub.make_edge(a, b);
    return Ok((e, sub.sym(e)));
  }

  if n == 3 {
    let p0 = SiteId(lo as u32);
    let p1 = SiteId((lo + 1) as u32);
    let p2 = SiteId((lo + 2) as u32);

    let a = sub.make_edge(p0, p1);
    let b = sub.make_edge(p1, p2);
    let a_sym = sub.sym(a);
    sub.splice(a_sym, b);

    let (s0, s1, s2) = (sites[p0.index()], sites[p1.index()], sites[p2.index()]);

    if ccw(&s0, &s1, &s2) {
      sub.connect(b, a)?;
      let b_sym = sub.sym(b);
      return Ok((a, b_sym));
    } else if ccw(&s0, &s2, &s1) {
      let c = sub.connect(b, a)?;
      let c_sym = sub.sym(c);
      return Ok((c_sym, c));
    }

    // Collinear triple: leave the open chain a -> b as-is.
    let b_sym = sub.sym(b);
    return Ok((a, b_sym));
  }

  let mid = lo + n / 2;
  let (ldo, mut ldi) = build(sub, sites, lo, mid)?;
  let (mut rdi, rdo) = build(sub, sites, mid, hi)?;

  // Lower common tangent.
  loop {
    let rdi_origin = sub.origin(rdi)?;
    if left_of(sub, sites, rdi_origin, ldi)? {
      ldi = sub.lnext(ldi);
      continue;
    }
    let ldi_origin = sub.origin(ldi)?;
    if right_of(sub, sites, ldi_origin, rdi)? {
      rdi = sub.rprev(rdi);
      continue;
    }
    break;
  }

  let rdi_sym = sub.sym(rdi);
  let mut base = sub.connect(rdi_sym, ldi)?;

  let mut ldo = ldo;
  let mut rdo = rdo;
  if sub.origin(ldi)? == sub.origin(ldo)? {
    ldo = sub.sym(base);
  }
  if sub.origin(rdi)? == sub.origin(rdo)? {
    rdo = base;
  }

  // Zipper loop: stitch the two halves together up to the upper tangent,
  // deleting edges that violate the empty-circumcircle property as we go.
  loop {
    let base_dest = sub.dest(base)?;
    let base_origin = sub.origin(base)?;

    let mut lcand = sub.onext(sub.sym(base));
    let mut l_valid = right_of(sub, sites, sub.dest(lcand)?, base)?;
    if l_valid {
      loop {
        let lcand_onext = sub.onext(lcand);
        let t_dest = sub.dest(lcand_onext)?;
        let keep_deleting = in_circle(
          &sites[base_dest.index()],
          &sites[base_origin.index()],
          &sites[sub.dest(lcand)?.index()],
          &sites[t_dest.index()],
        );
        if !keep_deleting {
          break;
        }
        let t = lcand_onext;
        sub.delete(lcand);
        lcand = t;
      }
      l_valid = right_of(sub, sites, sub.dest(lcand)?, base)?;
    }

    let mut rcand = sub.oprev(base);
    let mut r_valid = right_of(sub, sites, sub.dest(rcand)?, base)?;
    if r_valid {
      loop {
        let rcand_oprev = sub.oprev(rcand);
        let t_dest = sub.dest(rcand_oprev)?;
        let keep_deleting = in_circle(
          &sites[base_dest.index()],
          &sites[base_origin.index()],
          &sites[sub.dest(rcand)?.index()],
          &sites[t_dest.index()],
        );
        if !keep_deleting {
          break;
        }
        let t = rcand_oprev;
        sub.delete(rcand);
        rcand = t;
      }
      r_valid = right_of(sub, sites, sub.dest(rcand)?, base)?;
    }

    if !l_valid && !r_valid {
      break;
    }

    let connect_right = !l_valid
      || (r_valid
        && in_circle(
          &sites[sub.dest(lcand)?.index()],
          &sites[sub.origin(lcand)?.index()],
          &sites[sub.origin(rcand)?.index()],
          &sites[sub.dest(rcand)?.index()],
        ));

    if connect_right {
      let base_sym = sub.sym(base);
      base = sub.connect(rcand, base_sym)?;
    } else {
      let base_sym = sub.sym(base);
      let lcand_sym = sub.sym(lcand);
      base = sub.connect(base_sym, lcand_sym)?;
    }
  }

  Ok((ldo, rdo))
}
