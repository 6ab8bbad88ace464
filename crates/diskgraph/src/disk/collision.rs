//! Pairwise disk predicates.

use nalgebra::Vector2;

use crate::error::{GeomError, GeomResult};

use super::Disk;

/// True iff every point lies within `radius + eps` of the center.
pub fn covers_points(disk: &Disk, points: &[Vector2<f64>], eps: f64) -> bool {
    points.iter().all(|&p| disk.contains_eps(p, eps))
}

/// True iff some disk in `others` (other than `disk` itself) has
/// `center_distance <= r1 + r2 + epsilon`. Touching counts as colliding.
pub fn collides<'a, I>(disk: &Disk, others: I, epsilon: f64) -> bool
where
    I: IntoIterator<Item = &'a Disk>,
{
    others
        .into_iter()
        .filter(|other| !std::ptr::eq(disk, *other))
        .any(|other| disk.center_distance(other) <= disk.radius + other.radius + epsilon)
}

/// Gap between two disks, zero when they overlap.
#[inline]
pub fn edge_distance(a: &Disk, b: &Disk) -> f64 {
    (a.center_distance(b) - a.radius - b.radius).max(0.0)
}

/// Contact point of two (nearly) tangent disks: divides the segment between
/// the centers internally at ratio `rA : rB`.
pub fn tangential_point(a: &Disk, b: &Disk, epsilon: f64) -> GeomResult<Vector2<f64>> {
    let d = b.center - a.center;
    let gap = (d.norm() - (a.radius + b.radius)).abs();
    if gap > epsilon {
        return Err(GeomError::NotTangent { gap });
    }
    let total = a.radius + b.radius;
    if total == 0.0 {
        return Ok(a.center);
    }
    Ok(a.center + d * (a.radius / total))
}
