pub mod quad_edge;
pub mod site;
pub mod triangle;

pub use quad_edge::{QuarterEdgeId, Subdivision};
pub use site::{Site, SiteId};
pub use triangle::{Triangle, VoronoiEdge};
