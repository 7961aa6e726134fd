//! Extraction passes that interpret a completed subdivision: enumerating
//! triangles and building the dual Voronoi diagram.
//!
//! Both passes walk the arena's live quarter-edge blocks directly rather
//! than building a separate edge map first.

use std::collections::HashMap;

use crate::data::{Site, SiteId, Subdivision, Triangle, VoronoiEdge};
use crate::error::Result;
use crate::orientation::circumcenter;

/// Enumerates Delaunay triangles from the subdivision.
///
/// For each primal quarter-edge `e` with defined endpoints, the left face
/// closes into a triangle iff `e.lnext.lnext.dest == e.origin`; symmetrically
/// for the right face via `rnext`. Deduplication is by the triangle's
/// canonical (lex-sorted) site triple.
pub fn find_triangles(sub: &Subdivision, sites: &[Site]) -> Result<Vec<Triangle>> {
  let mut seen: HashMap<[SiteId; 3], Triangle> = HashMap::new();

  for e in sub.live_primal_ids() {
    let e_origin = sub.origin(e)?;

    let l1 = sub.lnext(e);
    let l2 = sub.lnext(l1);
    if sub.dest(l2)? == e_origin {
      let ids = [e_origin, sub.origin(l1)?, sub.origin(l2)?];
      let tri = Triangle::canonical(ids, sites);
      seen.entry(tri.vertex_ids()).or_insert(tri);
    }

    let r1 = sub.rnext(e);
    let r2 = sub.rnext(r1);
    if sub.dest(r2)? == e_origin {
      let ids = [e_origin, sub.origin(r1)?, sub.origin(r2)?];
      let tri = Triangle::canonical(ids, sites);
      seen.entry(tri.vertex_ids()).or_insert(tri);
    }
  }

  Ok(seen.into_values().collect())
}

/// Computes every triangle's circumcenter and the Voronoi edges dual to
/// interior Delaunay edges. Unbounded rays along the hull are intentionally
/// omitted.
pub fn voronoi(sub: &Subdivision, sites: &[Site]) -> Result<(Vec<Site>, Vec<VoronoiEdge>)> {
  let triangles = find_triangles(sub, sites)?;

  let mut centers = Vec::with_capacity(triangles.len());
  let mut edge_to_triangles: HashMap<(SiteId, SiteId), Vec<usize>> = HashMap::new();

  for (idx, tri) in triangles.iter().enumerate() {
    let [a, b, c] = tri.vertices(sites);
    let center = match circumcenter(&a, &b, &c) {
      Ok(center) => center,
      Err(_) => continue, // a degenerate (collinear) triangle cannot occur on a valid build
    };
    centers.push(center);

    let ids = tri.vertex_ids();
    for &(i, j) in &[(0usize, 1usize), (1, 2), (0, 2)] {
      let key = edge_key(ids[i], ids[j]);
      edge_to_triangles.entry(key).or_default().push(idx);
    }
  }

  let mut voronoi_edges = Vec::new();
  for adjacent in edge_to_triangles.values() {
    if adjacent.len() == 2 {
      voronoi_edges.push(VoronoiEdge::new(centers[adjacent[0]], centers[adjacent[1]]));
    }
  }

  Ok((centers, voronoi_edges))
}

fn edge_key(a: SiteId, b: SiteId) -> (SiteId, SiteId) {
  if a.0 <= b.0 {
    (a, b)
  } else {
    (b, a)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::algorithms::triangulation::build;

  fn built(points: &[(f64, f64)]) -> (Subdivision, Vec<Site>) {
    let sites: Vec<Site> = points.iter().map(|&(x, y)| Site::new(x, y)).collect();
    let mut sub = Subdivision::new();
    build(&mut sub, &sites, 0, sites.len()).unwrap();
    (sub, sites)
  }

  #[test]
  fn right_triangle_one_face_no_voronoi_edges() {
    let (sub, sites) = built(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
    let triangles = find_triangles(&sub, &sites).unwrap();
    assert_eq!(triangles.len(), 1);

    let (centers, edges) = voronoi(&sub, &sites).unwrap();
    assert_eq!(centers.len(), 1);
    assert!((centers[0].x - 0.5).abs() < 1e-9);
    assert!((centers[0].y - 0.5).abs() < 1e-9);
    assert!(edges.is_empty());
  }

  #[test]
  fn unit_square_two_triangles_one_voronoi_edge() {
    let (sub, sites) = built(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
    let triangles = find_triangles(&sub, &sites).unwrap();
    assert_eq!(triangles.len(), 2);

    let (centers, edges) = voronoi(&sub, &sites).unwrap();
    assert_eq!(centers.len(), 2);
    assert_eq!(edges.len(), 1);
  }

  #[test]
  fn square_with_centroid_four_triangles_four_voronoi_edges() {
    let (sub, sites) = built(&[
      (0.0, 0.0),
      (0.0, 1.0),
      (0.5, 0.5),
      (1.0, 0.0),
      (1.0, 1.0),
    ]);
    let triangles = find_triangles(&sub, &sites).unwrap();
    assert_eq!(triangles.len(), 4);

    let (centers, edges) = voronoi(&sub, &sites).unwrap();
    assert_eq!(centers.len(), 4);
    assert_eq!(edges.len(), 4);
  }

  #[test]
  fn collinear_triple_has_no_triangles_or_voronoi_edges() {
    let (sub, sites) = built(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    let triangles = find_triangles(&sub, &sites).unwrap();
    assert!(triangles.is_empty());

    let (centers, edges) = voronoi(&sub, &sites).unwrap();
    assert!(centers.is_empty());
    assert!(edges.is_empty());
  }
}
