//! Farthest-point Voronoi diagram (FPVD) over a convex hull.
//!
//! Purpose
//! - Build the dual graph of the "all-enclosing" circumcircles of a hull: a
//!   hull triple is a finite vertex iff its circumcircle contains every hull
//!   point. Two vertices are joined iff their triples share two points; pairs
//!   of a vertex without such a neighbour become infinite rays.
//!
//! Scalability
//! - Construction enumerates all C(n,3) triples and checks each against every
//!   hull point: O(n⁴). Fine for hulls of tens of points, which is what the
//!   point groups produce; see `benches/fpvd_bench.rs`.
//!
//! Layout
//! - `types.rs` (vertices, edges, diagram), `build.rs` (construction),
//!   `locate.rs` (hit testing used by disk resizing).

mod build;
mod locate;
mod types;

pub use build::build_fpvd;
pub use locate::{project_onto_segment, FpvdTarget};
pub use types::{Fpvd, VoronoiEdge, VoronoiVertex};
