//! Disks attached to point groups: fitting, predicates, and separation.
//!
//! - `fit`: circumcircles and the two-point fitters.
//! - `collision`: coverage/collision predicates, edge distance, tangent point.
//! - `separate`: analytic relocation of a disk off a colliding neighbour.

mod collision;
mod fit;
mod separate;

pub use collision::{collides, covers_points, edge_distance, tangential_point};
pub use fit::{
    circle_from_three_points, circle_from_two_points_and_center, circumcenter,
    smallest_circle_from_two_points,
};
pub use separate::resolve_collision;

use nalgebra::Vector2;

/// Closed disk `{ x : |x - center| <= radius }`, `radius >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl Disk {
    #[inline]
    pub fn new(center: Vector2<f64>, radius: f64) -> Self {
        debug_assert!(radius >= 0.0, "disk radius must be non-negative");
        Self { center, radius }
    }

    #[inline]
    pub fn center_distance(&self, other: &Disk) -> f64 {
        (self.center - other.center).norm()
    }

    #[inline]
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        (p - self.center).norm() <= self.radius + eps
    }
}
