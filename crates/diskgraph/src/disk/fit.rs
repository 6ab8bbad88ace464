//! Disk fitters (circumcircle and two-point variants).

use nalgebra::Vector2;

use crate::error::{GeomError, GeomResult};

use super::Disk;

/// Circumcenter of a triangle via the closed-form determinant formula.
///
/// Fails with `CollinearPoints` when the signed area is zero (or the result
/// is not finite, which happens for nearly collinear input).
pub fn circumcenter(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
) -> GeomResult<Vector2<f64>> {
    let area2 = p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y);
    if area2 == 0.0 {
        return Err(GeomError::CollinearPoints);
    }
    let d = 2.0 * area2;
    let (s1, s2, s3) = (p1.norm_squared(), p2.norm_squared(), p3.norm_squared());
    let ux = (s1 * (p2.y - p3.y) + s2 * (p3.y - p1.y) + s3 * (p1.y - p2.y)) / d;
    let uy = (s1 * (p3.x - p2.x) + s2 * (p1.x - p3.x) + s3 * (p2.x - p1.x)) / d;
    if !(ux.is_finite() && uy.is_finite()) {
        return Err(GeomError::CollinearPoints);
    }
    Ok(Vector2::new(ux, uy))
}

/// Circle through three points.
pub fn circle_from_three_points(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
) -> GeomResult<Disk> {
    let center = circumcenter(p1, p2, p3)?;
    Ok(Disk::new(center, (p1 - center).norm()))
}

/// Disk through two seed points, grown to cover the hull.
///
/// Starts from the circle with the seeds as diameter. Every hull point (other
/// than the seeds) outside the current circle proposes the circle through
/// both seeds and itself; a proposal replaces the current circle if it is
/// larger. One pass only: the result is not guaranteed to be minimal, nor to
/// cover points that are collinear with the seeds.
pub fn smallest_circle_from_two_points(
    points: &[Vector2<f64>],
    hull: &[Vector2<f64>],
) -> GeomResult<Disk> {
    let [p1, p2] = two(points)?;
    let mut disk = Disk::new((p1 + p2) * 0.5, (p1 - p2).norm() * 0.5);
    for &p in hull {
        if p == p1 || p == p2 {
            continue;
        }
        if (p - disk.center).norm() <= disk.radius {
            continue;
        }
        if let Ok(candidate) = circle_from_three_points(p1, p2, p) {
            if candidate.radius > disk.radius {
                disk = candidate;
            }
        }
    }
    Ok(disk)
}

/// Disk around `center` through two points; both must be equidistant from it
/// within `eps`.
pub fn circle_from_two_points_and_center(
    points: &[Vector2<f64>],
    center: Vector2<f64>,
    eps: f64,
) -> GeomResult<Disk> {
    let [p1, p2] = two(points)?;
    let d1 = (p1 - center).norm();
    let d2 = (p2 - center).norm();
    if (d1 - d2).abs() > eps {
        return Err(GeomError::InconsistentCenter { d1, d2 });
    }
    Ok(Disk::new(center, d1))
}

fn two(points: &[Vector2<f64>]) -> GeomResult<[Vector2<f64>; 2]> {
    match points {
        [p1, p2] => Ok([*p1, *p2]),
        _ => Err(GeomError::InsufficientPoints {
            expected: 2,
            actual: points.len(),
        }),
    }
}
