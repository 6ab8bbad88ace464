//! Convex hull of a point list (Graham scan).
//!
//! Conventions
//! - Output is CCW, starting at the pivot (smallest y, then smallest x).
//! - Every hull entry keeps the index of its source point so that hull and
//!   FPVD refer to the same input points even when coordinates repeat.
//! - Points at equal polar angle around the pivot are visited nearest first;
//!   with the `cross <= 0` pop rule this drops collinear boundary points.
//! - Of several points with identical coordinates, the lowest index is kept
//!   (exact ties are visited by descending index, so later ones get popped).
//! - Two-point inputs follow the legacy slope-sign rule: the pair is reversed
//!   iff `(p2.x - p1.x) * (p2.y - p1.y) < 0`. This is not an orientation test.

use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::cross;

/// CCW boundary of a point list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexHull {
    /// Index of each hull vertex in the source point list.
    pub ids: Vec<usize>,
    /// Hull vertex coordinates, parallel to `ids`.
    pub points: Vec<Vector2<f64>>,
}

impl ConvexHull {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Hull position of the source point `id`, if it is a hull vertex.
    pub fn position_of(&self, id: usize) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    fn from_ids(points: &[Vector2<f64>], ids: Vec<usize>) -> Self {
        let pts = ids.iter().map(|&i| points[i]).collect();
        Self { ids, points: pts }
    }
}

/// Graham scan over `points` (O(n log n)). Never panics on collinear or
/// duplicate input; the result may then have fewer than three vertices.
pub fn convex_hull(points: &[Vector2<f64>]) -> ConvexHull {
    let n = points.len();
    if n < 2 {
        return ConvexHull::from_ids(points, (0..n).collect());
    }
    if n == 2 {
        let (p1, p2) = (points[0], points[1]);
        let slope_sign = (p2.x - p1.x) * (p2.y - p1.y);
        let ids = if slope_sign < 0.0 { vec![1, 0] } else { vec![0, 1] };
        return ConvexHull::from_ids(points, ids);
    }

    let pivot = (0..n)
        .min_by(|&a, &b| {
            let (pa, pb) = (points[a], points[b]);
            pa.y.partial_cmp(&pb.y)
                .unwrap_or(Ordering::Equal)
                .then(pa.x.partial_cmp(&pb.x).unwrap_or(Ordering::Equal))
        })
        .unwrap_or(0);
    let origin = points[pivot];

    let mut order: Vec<usize> = (0..n).filter(|&i| i != pivot).collect();
    order.sort_by(|&a, &b| {
        let da = points[a] - origin;
        let db = points[b] - origin;
        let angle_a = da.y.atan2(da.x);
        let angle_b = db.y.atan2(db.x);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(Ordering::Equal)
            .then(
                da.norm_squared()
                    .partial_cmp(&db.norm_squared())
                    .unwrap_or(Ordering::Equal),
            )
            .then(b.cmp(&a))
    });

    let mut hull: Vec<usize> = Vec::with_capacity(n);
    hull.push(pivot);
    for i in order {
        while hull.len() >= 2
            && cross(
                points[hull[hull.len() - 2]],
                points[hull[hull.len() - 1]],
                points[i],
            ) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }
    ConvexHull::from_ids(points, hull)
}
