//! Persisted JSON model of a scene.
//!
//! Format
//! - Everything is stored by coordinates: hull points, FPVD generators and
//!   edge endpoints repeat the coordinates they refer to.
//! - Restoring maps those coordinates back to indices by exact `f64`
//!   equality and never recomputes hull or FPVD. Hull points take the first
//!   matching point not already on the hull, which is the index the hull
//!   keeps for duplicate coordinates.
//! - `serde_json` is built with `float_roundtrip`, so save → load → save is
//!   bit-exact.
//!
//! File I/O is left to callers.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cfg::GeomCfg;
use crate::disk::Disk;
use crate::fpvd::{Fpvd, VoronoiEdge, VoronoiVertex};
use crate::group::PointGroup;
use crate::hull::ConvexHull;
use crate::scene::Scene;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("group '{group}': hull point ({x}, {y}) is not one of its points")]
    DanglingHullPoint { group: String, x: f64, y: f64 },

    #[error("group '{group}': FPVD generator ({x}, {y}) is not a hull point")]
    DanglingGenerator { group: String, x: f64, y: f64 },

    #[error("group '{group}': FPVD edge endpoint ({x}, {y}) is not a listed vertex")]
    DanglingEdgeVertex { group: String, x: f64, y: f64 },

    #[error("group '{group}': disk radius {radius} is not a finite non-negative number")]
    InvalidRadius { group: String, radius: f64 },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PointDto {
    pub x: f64,
    pub y: f64,
}

impl From<Vector2<f64>> for PointDto {
    fn from(p: Vector2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointDto> for Vector2<f64> {
    fn from(p: PointDto) -> Self {
        Vector2::new(p.x, p.y)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct DiskDto {
    pub center: PointDto,
    pub radius: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VertexDto {
    pub x: f64,
    pub y: f64,
    /// Generator coordinates; `null` for synthetic ray endpoints.
    pub points: Option<[PointDto; 3]>,
    pub is_infinite: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDto {
    pub start: VertexDto,
    pub end: VertexDto,
    pub points: [PointDto; 2],
    pub is_infinite: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FpvdDto {
    pub vertices: Vec<VertexDto>,
    pub edges: Vec<EdgeDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupDto {
    pub name: String,
    pub points: Vec<PointDto>,
    pub disk: Option<DiskDto>,
    pub farthest_point_voronoi_diagram: FpvdDto,
    pub convex_hull: Vec<PointDto>,
}

/// Whole-scene snapshot (`{"pointGroups": [...]}`).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub point_groups: Vec<GroupDto>,
}

impl Snapshot {
    pub fn capture(scene: &Scene) -> Self {
        Self {
            point_groups: scene.groups().iter().map(capture_group).collect(),
        }
    }

    /// Rebuild a scene from the stored fields. The tangent trace and disk
    /// anchors are not persisted.
    pub fn restore(self, cfg: GeomCfg) -> Result<Scene, SnapshotError> {
        let mut scene = Scene::new(cfg);
        for dto in self.point_groups {
            scene.insert_group(restore_group(dto, cfg)?);
        }
        tracing::info!(groups = scene.groups().len(), "snapshot restored");
        Ok(scene)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }
}

fn capture_group(group: &PointGroup) -> GroupDto {
    let hull = &group.hull().points;
    let fpvd = group.fpvd();
    let vertex = |v: &VoronoiVertex| VertexDto {
        x: v.position.x,
        y: v.position.y,
        points: v.generators.map(|g| g.map(|h| hull[h].into())),
        is_infinite: v.is_infinite,
    };
    GroupDto {
        name: group.name.clone(),
        points: group.points().iter().map(|&p| p.into()).collect(),
        disk: group.disk().map(|d| DiskDto {
            center: d.center.into(),
            radius: d.radius,
        }),
        farthest_point_voronoi_diagram: FpvdDto {
            vertices: fpvd.vertices.iter().map(vertex).collect(),
            edges: fpvd
                .edges
                .iter()
                .map(|e| EdgeDto {
                    start: vertex(&fpvd.vertices[e.start]),
                    end: vertex(&fpvd.vertices[e.end]),
                    points: [hull[e.pair.0].into(), hull[e.pair.1].into()],
                    is_infinite: e.is_infinite,
                })
                .collect(),
        },
        convex_hull: hull.iter().map(|&p| p.into()).collect(),
    }
}

fn restore_group(dto: GroupDto, cfg: GeomCfg) -> Result<PointGroup, SnapshotError> {
    let GroupDto {
        name,
        points,
        disk,
        farthest_point_voronoi_diagram: fpvd_dto,
        convex_hull,
    } = dto;
    let points: Vec<Vector2<f64>> = points.into_iter().map(Vector2::from).collect();

    if let Some(d) = &disk {
        if !(d.radius.is_finite() && d.radius >= 0.0) {
            return Err(SnapshotError::InvalidRadius {
                group: name,
                radius: d.radius,
            });
        }
    }

    let mut ids: Vec<usize> = Vec::with_capacity(convex_hull.len());
    for p in &convex_hull {
        let id = points
            .iter()
            .enumerate()
            .position(|(i, q)| same_point(q, p) && !ids.contains(&i))
            .ok_or_else(|| SnapshotError::DanglingHullPoint {
                group: name.clone(),
                x: p.x,
                y: p.y,
            })?;
        ids.push(id);
    }
    let hull = ConvexHull {
        points: ids.iter().map(|&i| points[i]).collect(),
        ids,
    };

    let hull_position = |p: &PointDto| {
        index_of(&hull.points, *p).ok_or_else(|| SnapshotError::DanglingGenerator {
            group: name.clone(),
            x: p.x,
            y: p.y,
        })
    };

    let mut vertices = Vec::with_capacity(fpvd_dto.vertices.len());
    for v in &fpvd_dto.vertices {
        let position = Vector2::new(v.x, v.y);
        let generators = match &v.points {
            Some([a, b, c]) => Some([hull_position(a)?, hull_position(b)?, hull_position(c)?]),
            None => None,
        };
        vertices.push(VoronoiVertex {
            position,
            generators,
            is_infinite: v.is_infinite,
        });
    }

    let vertex_index = |v: &VertexDto| {
        fpvd_dto
            .vertices
            .iter()
            .position(|w| w == v)
            .ok_or_else(|| SnapshotError::DanglingEdgeVertex {
                group: name.clone(),
                x: v.x,
                y: v.y,
            })
    };
    let mut edges = Vec::with_capacity(fpvd_dto.edges.len());
    for e in &fpvd_dto.edges {
        let (p, q) = (hull_position(&e.points[0])?, hull_position(&e.points[1])?);
        edges.push(VoronoiEdge {
            start: vertex_index(&e.start)?,
            end: vertex_index(&e.end)?,
            pair: (p.min(q), p.max(q)),
            is_infinite: e.is_infinite,
        });
    }

    let disk = disk.map(|d| Disk {
        center: d.center.into(),
        radius: d.radius,
    });
    Ok(PointGroup::from_parts(
        name,
        points,
        hull,
        Fpvd { vertices, edges },
        disk,
        cfg,
    ))
}

fn index_of(points: &[Vector2<f64>], p: PointDto) -> Option<usize> {
    points.iter().position(|q| same_point(q, &p))
}

#[inline]
fn same_point(q: &Vector2<f64>, p: &PointDto) -> bool {
    q.x == p.x && q.y == p.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn sample_scene() -> Scene {
        let mut scene = Scene::default();
        let a = scene.add_group(
            "pentagon",
            vec![
                vector![0.0, 0.0],
                vector![10.0, 0.0],
                vector![14.0, 7.0],
                vector![4.0, 12.0],
                vector![-3.0, 5.0],
                vector![5.0, 5.0],
            ],
        );
        scene
            .group_mut(a)
            .unwrap()
            .set_disk_from_two_points(&[0, 2])
            .unwrap();
        scene.add_group("pair", vec![vector![0.1, 0.7], vector![1.0 / 3.0, -2.9]]);
        let c = scene.add_group(
            "square",
            vec![
                vector![0.0, 0.0],
                vector![2.0, 0.0],
                vector![2.0, 2.0],
                vector![0.0, 2.0],
            ],
        );
        scene
            .group_mut(c)
            .unwrap()
            .set_disk(Some(Disk::new(vector![1.0, 1.0], 2f64.sqrt())));
        scene
    }

    #[test]
    fn json_uses_the_persisted_field_names() {
        let json = Snapshot::capture(&sample_scene()).to_json_pretty().unwrap();
        for key in [
            "\"pointGroups\"",
            "\"farthestPointVoronoiDiagram\"",
            "\"convexHull\"",
            "\"isInfinite\"",
            "\"radius\"",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["pointGroups"][1]["disk"].is_null());
        let ray = &value["pointGroups"][1]["farthestPointVoronoiDiagram"]["vertices"][0];
        assert!(ray["points"].is_null());
        assert_eq!(ray["isInfinite"], serde_json::Value::Bool(true));
    }

    #[test]
    fn round_trip_preserves_hull_disk_and_fpvd_exactly() {
        let scene = sample_scene();
        let text = Snapshot::capture(&scene).to_json_pretty().unwrap();
        let restored = Snapshot::from_json(&text)
            .unwrap()
            .restore(GeomCfg::default())
            .unwrap();

        assert_eq!(restored.groups().len(), scene.groups().len());
        for (a, b) in scene.groups().iter().zip(restored.groups()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.points(), b.points());
            assert_eq!(a.hull(), b.hull());
            assert_eq!(a.fpvd(), b.fpvd());
            assert_eq!(a.disk(), b.disk());
        }
        let again = Snapshot::capture(&restored).to_json_pretty().unwrap();
        assert_eq!(text, again);
    }

    #[test]
    fn duplicate_points_keep_their_hull_ids_across_round_trip() {
        let mut scene = Scene::default();
        scene.add_group(
            "dup",
            vec![
                vector![10.0, 0.0],
                vector![0.0, 10.0],
                vector![0.0, 0.0],
                vector![10.0, 0.0],
            ],
        );
        scene.add_group("twin", vec![vector![1.0, 1.0], vector![1.0, 1.0]]);
        assert_eq!(scene.groups()[0].hull().ids, vec![2, 0, 1]);
        assert_eq!(scene.groups()[1].hull().ids, vec![0, 1]);

        let text = Snapshot::capture(&scene).to_json_pretty().unwrap();
        let restored = Snapshot::from_json(&text)
            .unwrap()
            .restore(GeomCfg::default())
            .unwrap();
        for (a, b) in scene.groups().iter().zip(restored.groups()) {
            assert_eq!(a.hull(), b.hull());
            assert_eq!(a.fpvd(), b.fpvd());
        }
    }

    #[test]
    fn invalid_disk_radius_is_a_load_error() {
        let mut snap = Snapshot::capture(&sample_scene());
        if let Some(disk) = snap.point_groups[0].disk.as_mut() {
            disk.radius = -3.0;
        }
        assert!(matches!(
            snap.restore(GeomCfg::default()),
            Err(SnapshotError::InvalidRadius { radius, .. }) if radius == -3.0
        ));

        let mut snap = Snapshot::capture(&sample_scene());
        if let Some(disk) = snap.point_groups[2].disk.as_mut() {
            disk.radius = f64::INFINITY;
        }
        assert!(matches!(
            snap.restore(GeomCfg::default()),
            Err(SnapshotError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn restore_does_not_recompute_stored_geometry() {
        let mut snap = Snapshot::capture(&sample_scene());
        // A recompute would bring both back.
        snap.point_groups[0].convex_hull.pop();
        snap.point_groups[0].farthest_point_voronoi_diagram = FpvdDto::default();
        let mut scene = snap.restore(GeomCfg::default()).unwrap();
        assert_eq!(scene.groups()[0].hull().len(), 4);
        assert!(scene.groups()[0].fpvd().is_empty());

        scene.group_mut(0).unwrap().add_point(vector![5.0, 6.0]);
        assert_eq!(scene.groups()[0].hull().len(), 5);
        assert!(!scene.groups()[0].fpvd().is_empty());
    }

    #[test]
    fn dangling_references_are_load_errors() {
        let base = Snapshot::capture(&sample_scene());

        let mut snap = base.clone();
        snap.point_groups[0].convex_hull[0] = PointDto { x: 99.0, y: 99.0 };
        assert!(matches!(
            snap.restore(GeomCfg::default()),
            Err(SnapshotError::DanglingHullPoint { x, .. }) if x == 99.0
        ));

        let mut snap = base.clone();
        let fpvd = &mut snap.point_groups[0].farthest_point_voronoi_diagram;
        let finite = fpvd.vertices.iter().position(|v| !v.is_infinite).unwrap();
        if let Some(points) = fpvd.vertices[finite].points.as_mut() {
            points[0] = PointDto { x: 5.0, y: 5.0 };
        }
        assert!(matches!(
            snap.restore(GeomCfg::default()),
            Err(SnapshotError::DanglingGenerator { .. })
        ));

        let mut snap = base;
        snap.point_groups[0].farthest_point_voronoi_diagram.edges[0].start.x += 1.0;
        assert!(matches!(
            snap.restore(GeomCfg::default()),
            Err(SnapshotError::DanglingEdgeVertex { .. })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Snapshot::from_json("{\"pointGroups\": [{}]}"),
            Err(SnapshotError::Json(_))
        ));
        let empty = Snapshot::from_json("{\"pointGroups\": []}").unwrap();
        assert!(empty.restore(GeomCfg::default()).unwrap().groups().is_empty());
    }
}
