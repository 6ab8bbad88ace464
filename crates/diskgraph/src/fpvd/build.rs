//! Brute-force FPVD construction.

use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::disk::circumcenter;
use crate::{cross, unit_normal};

use super::types::{Fpvd, VoronoiEdge, VoronoiVertex};

/// Build the FPVD of a CCW hull.
///
/// - Fewer than 2 hull points: empty diagram.
/// - 2 points: one infinite edge along the bisector, both endpoints synthetic.
/// - 3+ points: enumerate triples (O(n⁴) overall, see module docs).
pub fn build_fpvd(hull: &[Vector2<f64>], cfg: &GeomCfg) -> Fpvd {
    match hull.len() {
        0 | 1 => Fpvd::default(),
        2 => two_point_fpvd(hull[0], hull[1], cfg.ray_length),
        _ => enumerate_fpvd(hull, cfg),
    }
}

fn two_point_fpvd(p1: Vector2<f64>, p2: Vector2<f64>, ray_length: f64) -> Fpvd {
    let Some(n) = unit_normal(p1, p2) else {
        return Fpvd::default();
    };
    let mid = (p1 + p2) * 0.5;
    Fpvd {
        vertices: vec![
            VoronoiVertex::infinite(mid + n * ray_length),
            VoronoiVertex::infinite(mid - n * ray_length),
        ],
        edges: vec![VoronoiEdge {
            start: 0,
            end: 1,
            pair: (0, 1),
            is_infinite: true,
        }],
    }
}

fn enumerate_fpvd(hull: &[Vector2<f64>], cfg: &GeomCfg) -> Fpvd {
    let n = hull.len();
    let mut vertices: Vec<VoronoiVertex> = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let mut tri = [i, j, k];
                if cross(hull[i], hull[j], hull[k]) < 0.0 {
                    tri.swap(1, 2);
                }
                // Collinear triples have no circumcircle.
                let Ok(center) = circumcenter(hull[tri[0]], hull[tri[1]], hull[tri[2]]) else {
                    continue;
                };
                let radius = (hull[tri[0]] - center).norm();
                let encloses = hull
                    .iter()
                    .all(|p| (p - center).norm() <= radius + cfg.enclosure_eps);
                if encloses {
                    vertices.push(VoronoiVertex::finite(center, tri));
                }
            }
        }
    }
    let finite = vertices.len();

    let mut edges: Vec<VoronoiEdge> = Vec::new();
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); finite];
    for a in 0..finite {
        for b in a + 1..finite {
            if let Some(pair) = vertices[a].shared_pair(&vertices[b]) {
                incident[a].push(edges.len());
                incident[b].push(edges.len());
                edges.push(VoronoiEdge {
                    start: a,
                    end: b,
                    pair,
                    is_infinite: false,
                });
            }
        }
    }

    for v in 0..finite {
        let Some(mut gens) = vertices[v].generators else {
            continue;
        };
        gens.sort_unstable();
        for s in 0..3 {
            let (p, q) = (gens[s], gens[(s + 1) % 3]);
            if incident[v].iter().any(|&e| edges[e].covers_pair(p, q)) {
                continue;
            }
            let Some(dir) = unit_normal(hull[p], hull[q]) else {
                continue;
            };
            let end = vertices.len();
            vertices.push(VoronoiVertex::infinite(
                vertices[v].position + dir * cfg.ray_length,
            ));
            edges.push(VoronoiEdge {
                start: v,
                end,
                pair: (p.min(q), p.max(q)),
                is_infinite: true,
            });
        }
    }

    tracing::debug!(
        hull = n,
        finite_vertices = finite,
        edges = edges.len(),
        "fpvd built"
    );
    Fpvd { vertices, edges }
}
