pub mod delaunay;

pub use delaunay::build;
