//! The quad-edge subdivision: the topological substrate of the builder.
//!
//! Quarter-edges are allocated from a single arena keyed by stable indices
//! rather than raw pointers, so that ownership and aliasing
//! are checked by the borrow checker instead of by convention. Each
//! `make_edge` call allocates one contiguous block of four slots; `delete`
//! returns a block to a free list for reuse by a later `make_edge`.

use crate::data::site::SiteId;
use crate::error::{Error, Result};
use claims::debug_assert_ok;
use std::fmt;

/// Index of one of the four quarter-edges making up an undirected edge.
///
/// Quarter-edge `k` within a block of four is primal (even `k`) or dual
/// (odd `k`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuarterEdgeId(u32);

impl QuarterEdgeId {
  fn new(raw: u32) -> Self {
    QuarterEdgeId(raw)
  }

  fn raw(self) -> usize {
    self.0 as usize
  }

  fn block_base(self) -> u32 {
    self.0 - (self.0 % 4)
  }
}

impl fmt::Display for QuarterEdgeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "e{}", self.0)
  }
}

#[derive(Debug, Clone, Copy)]
struct QuarterEdgeRec {
  /// `Some` for primal quarter-edges (the endpoint they emanate from);
  /// `None` for dual quarter-edges, whose origin is an implicit face and is
  /// never read by Delaunay code paths.
  origin: Option<SiteId>,
  rot: QuarterEdgeId,
  onext: QuarterEdgeId,
}

/// The owner of every quarter-edge in one build.
///
/// A `Subdivision` is exclusively owned by one facade instance; aliasing a
/// `QuarterEdgeId` across two `Subdivision`s is a logic error the type
/// system does not catch — callers must not mix ids from
/// different builds.
#[derive(Debug, Clone)]
pub struct Subdivision {
  edges: Vec<QuarterEdgeRec>,
  free: Vec<u32>,
}

impl Subdivision {
  pub fn new() -> Self {
    Subdivision {
      edges: Vec::new(),
      free: Vec::new(),
    }
  }

  fn rec(&self, e: QuarterEdgeId) -> &QuarterEdgeRec {
    &self.edges[e.raw()]
  }

  fn rec_mut(&mut self, e: QuarterEdgeId) -> &mut QuarterEdgeRec {
    &mut self.edges[e.raw()]
  }

  /// Allocates four fresh quarter-edges wired as one isolated edge from
  /// site `a` to site `b`. Returns the primal `a -> b` quarter-edge.
  pub fn make_edge(&mut self, a: SiteId, b: SiteId) -> QuarterEdgeId {
    let base = match self.free.pop() {
      Some(base) => base,
      None => {
        let base = self.edges.len() as u32;
        let placeholder = QuarterEdgeRec {
          origin: None,
          rot: QuarterEdgeId::new(0),
          onext: QuarterEdgeId::new(0),
        };
        self.edges.resize(self.edges.len() + 4, placeholder);
        base
      }
    };

    let e0 = QuarterEdgeId::new(base);
    let e1 = QuarterEdgeId::new(base + 1);
    let e2 = QuarterEdgeId::new(base + 2);
    let e3 = QuarterEdgeId::new(base + 3);

    self.edges[e0.raw()] = QuarterEdgeRec {
      origin: Some(a),
      rot: e1,
      onext: e0,
    };
    self.edges[e1.raw()] = QuarterEdgeRec {
      origin: None,
      rot: e2,
      onext: e3,
    };
    self.edges[e2.raw()] = QuarterEdgeRec {
      origin: Some(b),
      rot: e3,
      onext: e2,
    };
    self.edges[e3.raw()] = QuarterEdgeRec {
      origin: None,
      rot: e0,
      onext: e1,
    };

    e0
  }

  pub fn rot(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.rec(e).rot
  }

  pub fn sym(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.rot(self.rot(e))
  }

  pub fn inv_rot(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.rot(self.rot(self.rot(e)))
  }

  pub fn onext(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.rec(e).onext
  }

  pub fn oprev(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.rot(self.onext(self.rot(e)))
  }

  pub fn lnext(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.rot(self.onext(self.inv_rot(e)))
  }

  pub fn lprev(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.sym(self.onext(e))
  }

  pub fn rnext(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.inv_rot(self.onext(self.rot(e)))
  }

  pub fn rprev(&self, e: QuarterEdgeId) -> QuarterEdgeId {
    self.onext(self.sym(e))
  }

  /// Origin of a primal quarter-edge. Reading the origin of a dual
  /// quarter-edge is a bug; it returns
  /// `Error::InvariantViolation` rather than panicking or returning a
  /// bogus default.
  pub fn origin(&self, e: QuarterEdgeId) -> Result<SiteId> {
    self.rec(e).origin.ok_or(Error::InvariantViolation)
  }

  pub fn dest(&self, e: QuarterEdgeId) -> Result<SiteId> {
    self.origin(self.sym(e))
  }

  fn set_onext(&mut self, e: QuarterEdgeId, v: QuarterEdgeId) {
    self.rec_mut(e).onext = v;
  }

  /// The Guibas-Stolfi splice: merges or separates the two quarter-edges'
  /// origin rings depending on whether they're already joined. The sole
  /// topology-mutating primitive; `connect` and `delete` are defined in
  /// terms of it.
  pub fn splice(&mut self, a: QuarterEdgeId, b: QuarterEdgeId) {
    let alpha = self.rot(self.onext(a));
    let beta = self.rot(self.onext(b));

    let t1 = self.onext(b);
    let t2 = self.onext(a);
    let t3 = self.onext(beta);
    let t4 = self.onext(alpha);

    self.set_onext(a, t1);
    self.set_onext(b, t2);
    self.set_onext(alpha, t3);
    self.set_onext(beta, t4);
  }

  /// Adds a new primal edge from `a.dest` to `b.origin`, lying in the face
  /// left of both `a` and `b`.
  pub fn connect(&mut self, a: QuarterEdgeId, b: QuarterEdgeId) -> Result<QuarterEdgeId> {
    let e = self.make_edge(self.dest(a)?, self.origin(b)?);
    let a_lnext = self.lnext(a);
    self.splice(e, a_lnext);
    let e_sym = self.sym(e);
    self.splice(e_sym, b);
    debug_assert_ok!(self.check_invariant(e));
    Ok(e)
  }

  /// Removes a primal edge from the subdivision and releases storage for
  /// all four of its quarter-edges. Callers must not
  /// retain any `QuarterEdgeId` belonging to `e`'s group afterwards.
  pub fn delete(&mut self, e: QuarterEdgeId) {
    let e_oprev = self.oprev(e);
    self.splice(e, e_oprev);
    let e_sym = self.sym(e);
    let e_sym_oprev = self.oprev(e_sym);
    self.splice(e_sym, e_sym_oprev);

    self.free.push(e.block_base());
  }

  /// Number of live quarter-edge blocks.
  pub(crate) fn live_edge_count(&self) -> usize {
    self.edges.len() / 4 - self.free.len()
  }

  /// One primal quarter-edge per live block (the `e0` of each `make_edge`
  /// allocation). Sufficient to enumerate every triangle: for any edge, the
  /// faces to its left and right are both reachable from either of its two
  /// directions via `lnext`/`rnext`, so a single representative direction
  /// per block is enough.
  pub(crate) fn live_primal_ids(&self) -> Vec<QuarterEdgeId> {
    let freed: std::collections::HashSet<u32> = self.free.iter().copied().collect();
    let mut out = Vec::with_capacity(self.live_edge_count());
    let mut base = 0u32;
    while (base as usize) < self.edges.len() {
      if !freed.contains(&base) {
        out.push(QuarterEdgeId::new(base));
      }
      base += 4;
    }
    out
  }

  /// Debug-only check that a quarter-edge's `sym`/`rot` rings are
  /// well-formed involutions of the expected order. Release builds assume
  /// this holds rather than paying for the check.
  #[cfg(debug_assertions)]
  pub(crate) fn check_invariant(&self, e: QuarterEdgeId) -> Result<()> {
    if self.sym(self.sym(e)) != e {
      return Err(Error::InvariantViolation);
    }
    let full_rot = self.rot(self.rot(self.rot(self.rot(e))));
    if full_rot != e {
      return Err(Error::InvariantViolation);
    }
    Ok(())
  }

  #[cfg(not(debug_assertions))]
  pub(crate) fn check_invariant(&self, _e: QuarterEdgeId) -> Result<()> {
    Ok(())
  }
}

impl Default for Subdivision {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn make_edge_basic_navigation() {
    let mut sub = Subdivision::new();
    let a = SiteId(0);
    let b = SiteId(1);
    let e = sub.make_edge(a, b);

    assert_eq!(sub.origin(e).unwrap(), a);
    assert_eq!(sub.dest(e).unwrap(), b);
    assert_eq!(sub.origin(sub.sym(e)).unwrap(), b);
    assert_eq!(sub.dest(sub.sym(e)).unwrap(), a);

    sub.check_invariant(e).unwrap();
  }

  #[test]
  fn sym_and_rot_are_involutions() {
    let mut sub = Subdivision::new();
    let e = sub.make_edge(SiteId(0), SiteId(1));
    assert_eq!(sub.sym(sub.sym(e)), e);
    assert_eq!(sub.rot(sub.rot(sub.rot(sub.rot(e)))), e);
    assert_eq!(sub.inv_rot(sub.rot(e)), e);
  }

  #[test]
  fn isolated_edge_onext_is_self() {
    let mut sub = Subdivision::new();
    let e = sub.make_edge(SiteId(0), SiteId(1));
    assert_eq!(sub.onext(e), e);
    assert_eq!(sub.onext(sub.sym(e)), sub.sym(e));
  }

  #[test]
  fn connect_forms_triangle() {
    let mut sub = Subdivision::new();
    let a = sub.make_edge(SiteId(0), SiteId(1));
    let b = sub.make_edge(SiteId(1), SiteId(2));
    sub.splice(sub.sym(a), b);

    let c = sub.connect(b, a).unwrap();
    // a.origin -> b.dest via the new edge c closes the triangle.
    assert_eq!(sub.origin(c).unwrap(), SiteId(2));
    assert_eq!(sub.dest(c).unwrap(), SiteId(0));
    assert_eq!(sub.lnext(a), b);
    assert_eq!(sub.lnext(b), c);
    assert_eq!(sub.lnext(c), a);
  }

  #[test]
  fn delete_frees_block_for_reuse() {
    let mut sub = Subdivision::new();
    let e = sub.make_edge(SiteId(0), SiteId(1));
    assert_eq!(sub.live_edge_count(), 1);
    sub.delete(e);
    assert_eq!(sub.live_edge_count(), 0);
    let _e2 = sub.make_edge(SiteId(2), SiteId(3));
    assert_eq!(sub.live_edge_count(), 1);
  }
}
