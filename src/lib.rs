//! A two-dimensional Delaunay triangulation engine built on the quad-edge
//! topological data structure (Guibas & Stolfi), together with a direct
//! derivation of the dual Voronoi diagram.
//!
//! The engine is single-threaded and synchronous: construction is a
//! CPU-bound recursive computation with no I/O, no concurrency, and no
//! cancellation. Interactive visualization, input capture, persistence, and
//! dynamic (incremental) insertion after construction are out of scope.
//!
//! ```
//! use delaunay_quadedge::{Delaunay, Site};
//!
//! let sites = vec![
//!   Site::new(0.0, 0.0),
//!   Site::new(0.0, 1.0),
//!   Site::new(1.0, 0.0),
//! ];
//! let d = Delaunay::new(sites).unwrap();
//! assert_eq!(d.triangles().unwrap().len(), 1);
//! ```

pub mod algorithms;
pub mod data;
mod delaunay;
mod error;
pub mod orientation;

pub use data::{Site, SiteId, Triangle, VoronoiEdge};
pub use delaunay::Delaunay;
pub use error::Error;
pub use orientation::Orientation;
