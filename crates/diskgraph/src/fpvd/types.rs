//! Data types for the farthest-point Voronoi diagram.
//!
//! Vertices and edges reference hull points by hull position and each other by
//! index into `Fpvd::vertices`.

use nalgebra::Vector2;

/// FPVD vertex. Finite vertices are circumcenters of three hull points;
/// infinite ones are synthetic ray endpoints without generators.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiVertex {
    pub position: Vector2<f64>,
    /// Hull positions of the generating triple, CCW-oriented.
    pub generators: Option<[usize; 3]>,
    pub is_infinite: bool,
}

impl VoronoiVertex {
    #[inline]
    pub fn finite(position: Vector2<f64>, generators: [usize; 3]) -> Self {
        Self {
            position,
            generators: Some(generators),
            is_infinite: false,
        }
    }

    #[inline]
    pub fn infinite(position: Vector2<f64>) -> Self {
        Self {
            position,
            generators: None,
            is_infinite: true,
        }
    }

    /// Generators shared with `other`, if exactly two.
    pub fn shared_pair(&self, other: &VoronoiVertex) -> Option<(usize, usize)> {
        let (a, b) = (self.generators?, other.generators?);
        let shared: Vec<usize> = a.iter().copied().filter(|g| b.contains(g)).collect();
        match shared[..] {
            [p, q] => Some((p.min(q), p.max(q))),
            _ => None,
        }
    }
}

/// FPVD edge on the perpendicular bisector of `pair` (hull positions, ascending).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoronoiEdge {
    pub start: usize,
    pub end: usize,
    pub pair: (usize, usize),
    pub is_infinite: bool,
}

impl VoronoiEdge {
    #[inline]
    pub fn covers_pair(&self, p: usize, q: usize) -> bool {
        self.pair == (p.min(q), p.max(q))
    }

    #[inline]
    pub fn touches(&self, vertex: usize) -> bool {
        self.start == vertex || self.end == vertex
    }
}

/// Planar graph of FPVD vertices and edges (not necessarily simple for
/// cocircular hulls).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fpvd {
    pub vertices: Vec<VoronoiVertex>,
    pub edges: Vec<VoronoiEdge>,
}

impl Fpvd {
    pub fn finite_vertices(&self) -> impl Iterator<Item = &VoronoiVertex> {
        self.vertices.iter().filter(|v| !v.is_infinite)
    }

    pub fn finite_edges(&self) -> impl Iterator<Item = &VoronoiEdge> {
        self.edges.iter().filter(|e| !e.is_infinite)
    }

    pub fn infinite_edges(&self) -> impl Iterator<Item = &VoronoiEdge> {
        self.edges.iter().filter(|e| e.is_infinite)
    }

    /// Endpoint positions of an edge.
    #[inline]
    pub fn segment(&self, edge: &VoronoiEdge) -> (Vector2<f64>, Vector2<f64>) {
        (
            self.vertices[edge.start].position,
            self.vertices[edge.end].position,
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}
