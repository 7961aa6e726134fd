//! The public facade: construct-from-sites, and accessors for triangles,
//! Delaunay edges, and the Voronoi diagram.

use std::collections::HashSet;

use crate::algorithms::{extraction, triangulation};
use crate::data::{QuarterEdgeId, Site, Subdivision, Triangle, VoronoiEdge};
use crate::error::{Error, Result};

/// A completed Delaunay triangulation (and, on demand, its dual Voronoi
/// diagram) over a finite set of sites.
///
/// `Delaunay` owns the quarter-edge arena exclusively; it is not `Sync`
/// across builds and there is no API for mutating it after construction
///. Build it with [`Delaunay::new`] and read it back out
/// with [`Delaunay::edges`], [`Delaunay::triangles`], and
/// [`Delaunay::voronoi`].
#[derive(Debug, Clone)]
pub struct Delaunay {
  sites: Vec<Site>,
  sub: Subdivision,
  left: QuarterEdgeId,
  right: QuarterEdgeId,
}

impl Delaunay {
  /// Builds a Delaunay triangulation over `sites`.
  ///
  /// Sites are sorted lexicographically by `(x, y)` before the recursive
  /// builder runs. Returns `TooFewSites` for fewer than
  /// two sites, `DuplicateSite` if two sites share coordinates, and
  /// `NonFinite` if any coordinate is NaN or infinite —
  /// all three are checked here, before the builder ever touches the
  /// subdivision, since the builder itself has no partial-recovery mode.
  pub fn new(mut sites: Vec<Site>) -> Result<Self> {
    if sites.len() < 2 {
      return Err(Error::TooFewSites);
    }
    if sites.iter().any(|s| !s.is_finite()) {
      return Err(Error::NonFinite);
    }

    sites.sort_by(|a, b| a.lex_key().cmp(&b.lex_key()));
    for pair in sites.windows(2) {
      if pair[0] == pair[1] {
        return Err(Error::DuplicateSite);
      }
    }

    let mut sub = Subdivision::new();
    let (left, right) = triangulation::build(&mut sub, &sites, 0, sites.len())?;

    Ok(Delaunay {
      sites,
      sub,
      left,
      right,
    })
  }

  /// Read-only access to the (sorted) site list this build was constructed
  /// from.
  pub fn sites(&self) -> &[Site] {
    &self.sites
  }

  /// The convex-hull entry edge whose origin is the leftmost site.
  pub fn left(&self) -> QuarterEdgeId {
    self.left
  }

  /// The convex-hull entry edge whose origin is the rightmost site.
  pub fn right(&self) -> QuarterEdgeId {
    self.right
  }

  /// Every Delaunay edge as an unordered pair of sites, deduplicated by
  /// endpoint pair.
  pub fn edges(&self) -> Result<Vec<(Site, Site)>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for e in self.sub.live_primal_ids() {
      let a = self.sub.origin(e)?;
      let b = self.sub.dest(e)?;
      let key = if a.0 <= b.0 { (a, b) } else { (b, a) };
      if seen.insert(key) {
        out.push((self.sites[a.index()], self.sites[b.index()]));
      }
    }
    Ok(out)
  }

  /// The set of canonical (lex-sorted) site triples forming bounded
  /// Delaunay triangles.
  pub fn triangles(&self) -> Result<Vec<[Site; 3]>> {
    let triangles: Vec<Triangle> = extraction::find_triangles(&self.sub, &self.sites)?;
    Ok(triangles.iter().map(|t| t.vertices(&self.sites)).collect())
  }

  /// The dual Voronoi diagram: every triangle's circumcenter, and the
  /// bounded Voronoi edges joining circumcenters of triangles that share a
  /// Delaunay edge.
  pub fn voronoi(&self) -> Result<(Vec<Site>, Vec<VoronoiEdge>)> {
    extraction::voronoi(&self.sub, &self.sites)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_too_few_sites() {
    let err = Delaunay::new(vec![Site::new(0.0, 0.0)]).unwrap_err();
    assert_eq!(err, Error::TooFewSites);
  }

  #[test]
  fn two_sites_single_edge_no_triangles() {
    let d = Delaunay::new(vec![Site::new(0.0, 0.0), Site::new(0.0, 1.0)]).unwrap();
    let edges = d.edges().unwrap();
    assert_eq!(edges.len(), 1);
    assert!(d.triangles().unwrap().is_empty());

    let (centers, voronoi_edges) = d.voronoi().unwrap();
    assert!(centers.is_empty());
    assert!(voronoi_edges.is_empty());
  }

  #[test]
  fn rejects_duplicate_sites() {
    let err = Delaunay::new(vec![
      Site::new(0.0, 0.0),
      Site::new(1.0, 0.0),
      Site::new(0.0, 0.0),
    ])
    .unwrap_err();
    assert_eq!(err, Error::DuplicateSite);
  }

  #[test]
  fn rejects_non_finite_coordinates() {
    let err = Delaunay::new(vec![Site::new(0.0, 0.0), Site::new(f64::NAN, 1.0)]).unwrap_err();
    assert_eq!(err, Error::NonFinite);
  }

  #[test]
  fn right_triangle_has_one_triangle_and_circumcenter() {
    let d = Delaunay::new(vec![
      Site::new(0.0, 0.0),
      Site::new(0.0, 1.0),
      Site::new(1.0, 0.0),
    ])
    .unwrap();
    assert_eq!(d.triangles().unwrap().len(), 1);
    let (centers, edges) = d.voronoi().unwrap();
    assert_eq!(centers.len(), 1);
    assert!(edges.is_empty());
  }
}
