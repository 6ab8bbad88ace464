//! Hit testing on a diagram: which vertex or edge lies under a point.

use nalgebra::Vector2;

use super::types::Fpvd;

/// A diagram element picked by `Fpvd::locate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FpvdTarget {
    /// Index into `Fpvd::vertices`.
    Vertex(usize),
    /// Index into `Fpvd::edges` and the closest point on that edge.
    Edge { edge: usize, at: Vector2<f64> },
}

/// Closest point to `point` on the segment `start → end`; `None` when the
/// segment has zero length.
pub fn project_onto_segment(
    start: Vector2<f64>,
    end: Vector2<f64>,
    point: Vector2<f64>,
) -> Option<Vector2<f64>> {
    let d = end - start;
    let len2 = d.norm_squared();
    if len2 == 0.0 {
        return None;
    }
    let t = ((point - start).dot(&d) / len2).clamp(0.0, 1.0);
    Some(start + d * t)
}

impl Fpvd {
    /// First vertex within `tolerance` of `point`; otherwise the first edge
    /// whose closest point is within `tolerance`. Vertices take precedence.
    pub fn locate(&self, point: Vector2<f64>, tolerance: f64) -> Option<FpvdTarget> {
        self.locate_vertex(point, tolerance)
            .or_else(|| self.locate_edge(point, tolerance))
    }

    pub fn locate_vertex(&self, point: Vector2<f64>, tolerance: f64) -> Option<FpvdTarget> {
        self.vertices
            .iter()
            .position(|v| (v.position - point).norm() <= tolerance)
            .map(FpvdTarget::Vertex)
    }

    /// Zero-length edges are never hit.
    pub fn locate_edge(&self, point: Vector2<f64>, tolerance: f64) -> Option<FpvdTarget> {
        self.edges.iter().enumerate().find_map(|(i, e)| {
            let (s, t) = self.segment(e);
            let at = project_onto_segment(s, t, point)?;
            ((at - point).norm() <= tolerance).then_some(FpvdTarget::Edge { edge: i, at })
        })
    }
}
