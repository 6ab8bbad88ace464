//! Exact-geometry artifacts for clusters of 2D points.
//!
//! A `PointGroup` owns a point list and derives its convex hull and the
//! farthest-point Voronoi diagram (FPVD) over that hull. Disks are fitted to
//! groups from two or three selected points, checked for coverage and
//! collisions, arranged into a spanning forest, and relocated analytically to
//! remove pairwise collisions.
//!
//! Layout
//! - `hull`: Graham scan with the legacy two-point ordering rule.
//! - `fpvd`: brute-force FPVD (all-enclosing circumcircles) plus hit testing.
//! - `disk`: fitters, coverage/collision predicates, tangent points, separator.
//! - `forest`: BFS forests over collision or proximity relations.
//! - `group`, `scene`: the data model and the explicit application state.
//! - `snapshot`: the persisted JSON model (no file I/O here).
//!
//! API Policy
//! - Geometry functions are pure over their inputs; mutation happens only
//!   through `PointGroup` and `Scene`.
//! - Points are identified by index into their group, never by coordinates.

pub mod cfg;
pub mod disk;
pub mod error;
pub mod forest;
pub mod fpvd;
pub mod group;
pub mod hull;
pub mod scene;
pub mod snapshot;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::GeomCfg;
pub use error::{GeomError, GeomResult};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::GeomCfg;
    pub use crate::disk::{
        circle_from_three_points, circle_from_two_points_and_center, circumcenter, collides,
        covers_points, edge_distance, resolve_collision, smallest_circle_from_two_points,
        tangential_point, Disk,
    };
    pub use crate::error::{GeomError, GeomResult};
    pub use crate::forest::{Forest, ForestNode, TreeMode};
    pub use crate::fpvd::{build_fpvd, Fpvd, FpvdTarget, VoronoiEdge, VoronoiVertex};
    pub use crate::group::PointGroup;
    pub use crate::hull::{convex_hull, ConvexHull};
    pub use crate::scene::{ForestEdge, ResolveDirection, Scene};
    pub use crate::snapshot::{Snapshot, SnapshotError};
    pub use nalgebra::Vector2 as Vec2;
}

/// Signed area of the parallelogram spanned by `b - a` and `c - a`.
/// Positive when `a → b → c` turns counterclockwise.
#[inline]
pub fn cross(a: Vec2<f64>, b: Vec2<f64>, c: Vec2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Unit normal `(-dy, dx)` of the segment `p → q`; `None` for coincident points.
#[inline]
pub(crate) fn unit_normal(p: Vec2<f64>, q: Vec2<f64>) -> Option<Vec2<f64>> {
    let d = q - p;
    let n = Vec2::new(-d.y, d.x);
    let norm = n.norm();
    if !norm.is_finite() || norm <= 0.0 {
        return None;
    }
    Some(n / norm)
}
