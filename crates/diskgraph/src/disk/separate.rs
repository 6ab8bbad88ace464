//! Collision resolution: move a disk off its neighbour, keeping its anchors.
//!
//! Model
//! - The relocated disk still passes through the two anchor points, so its
//!   center stays on their perpendicular bisector: `c(t) = m + t·n`, with `m`
//!   the anchor midpoint and `n` the unit bisector direction pointing away
//!   from the fixed disk's center.
//! - External tangency with a gap `s` is `|c - p1| + r_B + s = |c - c_B|`.
//!   Squaring twice with `U = m - p1`, `W = m - c_B`, `r = r_B + s` gives
//!   `|c - p1| = α + β t` and the quadratic
//!   `(1 - β²) t² + (2 n·U - 2αβ) t + (|U|² - α²) = 0`,
//!   where `α = (|W|² - |U|² - r²) / 2r` and `β = (n·W - n·U) / r`.
//! - Roots with `α + β t < 0` are artifacts of squaring and are discarded;
//!   the largest remaining root (the one pushing the disk farthest) wins.

use nalgebra::Vector2;

use crate::error::{GeomError, GeomResult};
use crate::unit_normal;

use super::Disk;

/// Below this the quadratic term is treated as zero.
const LINEAR_EPS: f64 = 1e-12;

/// New disk through `anchors`, externally tangent to `fixed` plus a gap of
/// `separation`.
pub fn resolve_collision(
    anchors: [Vector2<f64>; 2],
    fixed: &Disk,
    separation: f64,
) -> GeomResult<Disk> {
    let [p1, p2] = anchors;
    let mid = (p1 + p2) * 0.5;
    let mut n = unit_normal(p1, p2).ok_or(GeomError::NoRealSolution)?;
    if n.dot(&(fixed.center - mid)) > 0.0 {
        n = -n;
    }
    let r = fixed.radius + separation;
    if r <= 0.0 {
        return Err(GeomError::NoRealSolution);
    }

    let u = mid - p1;
    let w = mid - fixed.center;
    let (u2, w2) = (u.norm_squared(), w.norm_squared());
    let (nu, nw) = (n.dot(&u), n.dot(&w));
    let alpha = (w2 - u2 - r * r) / (2.0 * r);
    let beta = (nw - nu) / r;

    let qa = 1.0 - beta * beta;
    let qb = 2.0 * nu - 2.0 * alpha * beta;
    let qc = u2 - alpha * alpha;

    let roots: Vec<f64> = if qa.abs() < LINEAR_EPS {
        if qb == 0.0 {
            return Err(GeomError::NoRealSolution);
        }
        vec![-qc / qb]
    } else {
        let disc = qb * qb - 4.0 * qa * qc;
        if disc < 0.0 {
            return Err(GeomError::NoRealSolution);
        }
        let sq = disc.sqrt();
        vec![(-qb + sq) / (2.0 * qa), (-qb - sq) / (2.0 * qa)]
    };
    let t = roots
        .into_iter()
        .filter(|t| t.is_finite() && alpha + beta * t >= 0.0)
        .reduce(f64::max)
        .ok_or(GeomError::NoRealSolution)?;

    let center = mid + n * t;
    let disk = Disk::new(center, (center - p1).norm());
    tracing::debug!(
        t,
        x = center.x,
        y = center.y,
        radius = disk.radius,
        "collision resolved"
    );
    Ok(disk)
}
