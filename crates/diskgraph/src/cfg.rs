//! Tolerances and constants shared by the geometry routines.
//!
//! Policy
//! - Callers override single fields with struct update syntax
//!   (`GeomCfg { separation: 2.0, ..Default::default() }`).
//! - Tolerances are absolute (scene units), not relative.

/// Geometry configuration (tolerances and synthetic lengths).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Slack for the FPVD all-enclosing circle test.
    pub enclosure_eps: f64,
    /// Slack for `covers_points`.
    pub cover_eps: f64,
    /// Maximum difference of the two point-to-center distances in
    /// `circle_from_two_points_and_center`.
    pub center_eps: f64,
    /// Default slack for `collides` (touching counts as colliding).
    pub collide_eps: f64,
    /// Slack used by the collision forest.
    pub forest_collide_eps: f64,
    /// Slack used by `tangential_point`.
    pub tangent_eps: f64,
    /// Distance from origin to the synthetic endpoint of an infinite FPVD edge.
    pub ray_length: f64,
    /// Extra gap left between two disks after collision resolution.
    pub separation: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            enclosure_eps: 1e-6,
            cover_eps: 1e-6,
            center_eps: 1e-6,
            collide_eps: 1e-3,
            forest_collide_eps: 3.0,
            tangent_eps: 3.0,
            ray_length: 900.0,
            separation: 1.0,
        }
    }
}
