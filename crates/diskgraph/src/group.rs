//! A named cluster of points with its derived hull/FPVD and an assigned disk.
//!
//! Invariants
//! - `hull` and `fpvd` are always derived from `points` (recomputed on every
//!   point mutation), except for groups restored from a snapshot, whose stored
//!   hull/FPVD are authoritative until the next mutation.
//! - The disk is never recomputed from points; fitters and the separator
//!   replace it wholesale.
//! - `anchors` are the indices of the two points a two-point fitter used; the
//!   separator keeps the relocated disk passing through them.

use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::disk::{
    circle_from_three_points, circle_from_two_points_and_center, covers_points,
    resolve_collision, smallest_circle_from_two_points, Disk,
};
use crate::error::{GeomError, GeomResult};
use crate::fpvd::{build_fpvd, Fpvd, FpvdTarget};
use crate::hull::{convex_hull, ConvexHull};

#[derive(Clone, Debug, PartialEq)]
pub struct PointGroup {
    pub name: String,
    points: Vec<Vector2<f64>>,
    hull: ConvexHull,
    fpvd: Fpvd,
    disk: Option<Disk>,
    anchors: Option<[usize; 2]>,
    cfg: GeomCfg,
}

impl PointGroup {
    pub fn new(name: impl Into<String>, points: Vec<Vector2<f64>>) -> Self {
        Self::with_cfg(name, points, GeomCfg::default())
    }

    /// Create a group and derive hull and FPVD eagerly.
    pub fn with_cfg(name: impl Into<String>, points: Vec<Vector2<f64>>, cfg: GeomCfg) -> Self {
        let mut group = Self {
            name: name.into(),
            points,
            hull: ConvexHull::default(),
            fpvd: Fpvd::default(),
            disk: None,
            anchors: None,
            cfg,
        };
        group.recompute();
        group
    }

    /// Reassemble a group from stored parts without recomputing anything.
    pub fn from_parts(
        name: impl Into<String>,
        points: Vec<Vector2<f64>>,
        hull: ConvexHull,
        fpvd: Fpvd,
        disk: Option<Disk>,
        cfg: GeomCfg,
    ) -> Self {
        Self {
            name: name.into(),
            points,
            hull,
            fpvd,
            disk,
            anchors: None,
            cfg,
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }
    #[inline]
    pub fn hull(&self) -> &ConvexHull {
        &self.hull
    }
    #[inline]
    pub fn fpvd(&self) -> &Fpvd {
        &self.fpvd
    }
    #[inline]
    pub fn disk(&self) -> Option<&Disk> {
        self.disk.as_ref()
    }
    #[inline]
    pub fn anchors(&self) -> Option<[usize; 2]> {
        self.anchors
    }
    #[inline]
    pub fn cfg(&self) -> &GeomCfg {
        &self.cfg
    }

    /// Re-derive hull and FPVD from the current points.
    pub fn recompute(&mut self) {
        self.hull = convex_hull(&self.points);
        self.fpvd = build_fpvd(&self.hull.points, &self.cfg);
    }

    /// Append a point; returns its index.
    pub fn add_point(&mut self, p: Vector2<f64>) -> usize {
        self.points.push(p);
        self.recompute();
        self.points.len() - 1
    }

    /// Remove the point at `index`. Later indices shift down by one; a disk
    /// anchored on the removed point loses its anchors (the disk itself stays).
    pub fn delete_point(&mut self, index: usize) -> GeomResult<Vector2<f64>> {
        self.check_index(index)?;
        let removed = self.points.remove(index);
        self.anchors = self.anchors.and_then(|pair| {
            if pair.contains(&index) {
                None
            } else {
                Some(pair.map(|i| if i > index { i - 1 } else { i }))
            }
        });
        self.recompute();
        Ok(removed)
    }

    /// Move the point at `index` to `to`.
    pub fn move_point(&mut self, index: usize, to: Vector2<f64>) -> GeomResult<()> {
        self.check_index(index)?;
        self.points[index] = to;
        self.recompute();
        Ok(())
    }

    /// Disk through two points, grown over the hull (see
    /// `smallest_circle_from_two_points`).
    pub fn set_disk_from_two_points(&mut self, ids: &[usize]) -> GeomResult<Disk> {
        let pts = self.coords(ids)?;
        let disk = smallest_circle_from_two_points(&pts, &self.hull.points)?;
        self.assign(disk, Some([ids[0], ids[1]]), "two points");
        Ok(disk)
    }

    /// Circumcircle of three points.
    pub fn set_disk_from_three_points(&mut self, ids: &[usize]) -> GeomResult<Disk> {
        let &[a, b, c] = ids else {
            return Err(GeomError::InsufficientPoints {
                expected: 3,
                actual: ids.len(),
            });
        };
        let pts = self.coords(&[a, b, c])?;
        let disk = circle_from_three_points(pts[0], pts[1], pts[2])?;
        self.assign(disk, None, "three points");
        Ok(disk)
    }

    /// Disk around `center` through two equidistant points.
    pub fn set_disk_from_two_points_and_center(
        &mut self,
        ids: &[usize],
        center: Vector2<f64>,
    ) -> GeomResult<Disk> {
        let pts = self.coords(ids)?;
        let disk = circle_from_two_points_and_center(&pts, center, self.cfg.center_eps)?;
        self.assign(disk, Some([ids[0], ids[1]]), "two points and center");
        Ok(disk)
    }

    /// Replace the disk directly (manual resize/move); clears the anchors.
    pub fn set_disk(&mut self, disk: Option<Disk>) {
        self.disk = disk;
        self.anchors = None;
    }

    /// Fit the disk to a picked FPVD element: a finite vertex gives the
    /// circumcircle of its generators, an edge gives the disk through its pair
    /// centred at the picked point.
    pub fn fit_disk_to(&mut self, target: FpvdTarget) -> GeomResult<Disk> {
        match target {
            FpvdTarget::Vertex(v) => {
                let vertex = self.fpvd.vertices.get(v).ok_or(GeomError::UnknownPoint {
                    index: v,
                    len: self.fpvd.vertices.len(),
                })?;
                let gens = vertex.generators.ok_or(GeomError::InsufficientPoints {
                    expected: 3,
                    actual: 0,
                })?;
                let ids = self.hull_ids(&gens)?;
                self.set_disk_from_three_points(&ids)
            }
            FpvdTarget::Edge { edge, at } => {
                let e = self.fpvd.edges.get(edge).ok_or(GeomError::UnknownPoint {
                    index: edge,
                    len: self.fpvd.edges.len(),
                })?;
                let ids = self.hull_ids(&[e.pair.0, e.pair.1])?;
                self.set_disk_from_two_points_and_center(&ids, at)
            }
        }
    }

    pub fn require_disk(&self) -> GeomResult<&Disk> {
        self.disk.as_ref().ok_or_else(|| GeomError::MissingDisk {
            group: self.name.clone(),
        })
    }

    /// Does the disk cover every hull point?
    pub fn covers_points(&self) -> GeomResult<bool> {
        let disk = self.require_disk()?;
        Ok(covers_points(disk, &self.hull.points, self.cfg.cover_eps))
    }

    /// The two points the disk is pinned to: the recorded anchors, or the
    /// first two points of the group when the disk was not fitted from a pair.
    pub fn anchor_points(&self) -> GeomResult<[Vector2<f64>; 2]> {
        let [a, b] = match self.anchors {
            Some(pair) => pair,
            None if self.points.len() >= 2 => [0, 1],
            None => {
                return Err(GeomError::InsufficientPoints {
                    expected: 2,
                    actual: self.points.len(),
                })
            }
        };
        Ok([self.points[a], self.points[b]])
    }

    /// Move this group's disk off `fixed` (see `disk::resolve_collision`).
    pub fn resolve_collision(&mut self, fixed: &Disk) -> GeomResult<Disk> {
        self.require_disk()?;
        let anchors = self.anchor_points()?;
        let disk = resolve_collision(anchors, fixed, self.cfg.separation)?;
        self.disk = Some(disk);
        tracing::info!(
            group = %self.name,
            radius = disk.radius,
            "disk relocated off collision"
        );
        Ok(disk)
    }

    fn assign(&mut self, disk: Disk, anchors: Option<[usize; 2]>, via: &str) {
        tracing::info!(
            group = %self.name,
            via,
            x = disk.center.x,
            y = disk.center.y,
            radius = disk.radius,
            "disk assigned"
        );
        self.disk = Some(disk);
        self.anchors = anchors;
    }

    fn check_index(&self, index: usize) -> GeomResult<()> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(GeomError::UnknownPoint {
                index,
                len: self.points.len(),
            })
        }
    }

    fn coords(&self, ids: &[usize]) -> GeomResult<Vec<Vector2<f64>>> {
        ids.iter()
            .map(|&i| self.check_index(i).map(|_| self.points[i]))
            .collect()
    }

    fn hull_ids(&self, positions: &[usize]) -> GeomResult<Vec<usize>> {
        positions
            .iter()
            .map(|&h| {
                self.hull.ids.get(h).copied().ok_or(GeomError::UnknownPoint {
                    index: h,
                    len: self.hull.len(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn square_group() -> PointGroup {
        PointGroup::new(
            "sq",
            vec![
                vector![0.0, 0.0],
                vector![10.0, 0.0],
                vector![10.0, 10.0],
                vector![0.0, 10.0],
                vector![5.0, 5.0],
            ],
        )
    }

    #[test]
    fn creation_derives_hull_and_fpvd() {
        let g = square_group();
        assert_eq!(g.hull().ids, vec![0, 1, 2, 3]);
        assert_eq!(g.fpvd().finite_vertices().count(), 4);
        assert!(g.disk().is_none());
    }

    #[test]
    fn point_mutations_rederive_geometry() {
        let mut g = square_group();
        let i = g.add_point(vector![20.0, 5.0]);
        assert_eq!(i, 5);
        assert_eq!(g.hull().ids, vec![0, 1, 5, 2, 3]);
        g.delete_point(5).unwrap();
        assert_eq!(g.hull().ids, vec![0, 1, 2, 3]);
        g.move_point(4, vector![5.0, -5.0]).unwrap();
        assert_eq!(g.hull().ids[0], 4);
        assert_eq!(
            g.delete_point(9),
            Err(GeomError::UnknownPoint { index: 9, len: 5 })
        );
    }

    #[test]
    fn fitters_replace_the_disk() {
        let mut g = square_group();
        let d2 = g.set_disk_from_two_points(&[0, 2]).unwrap();
        assert!((d2.center - vector![5.0, 5.0]).norm() < 1e-12);
        assert_eq!(g.anchors(), Some([0, 2]));
        assert!(g.covers_points().unwrap());

        let d3 = g.set_disk_from_three_points(&[0, 1, 4]).unwrap();
        assert_eq!(g.disk(), Some(&d3));
        assert_eq!(g.anchors(), None);

        let dc = g
            .set_disk_from_two_points_and_center(&[0, 1], vector![5.0, -3.0])
            .unwrap();
        assert!((dc.radius - 34f64.sqrt()).abs() < 1e-12);
        assert!(!g.covers_points().unwrap());
    }

    #[test]
    fn fitter_failures_leave_disk_untouched() {
        let mut g = square_group();
        let d = g.set_disk_from_two_points(&[0, 2]).unwrap();
        assert!(matches!(
            g.set_disk_from_three_points(&[0, 1]),
            Err(GeomError::InsufficientPoints { expected: 3, actual: 2 })
        ));
        assert_eq!(
            g.set_disk_from_three_points(&[0, 4, 2]),
            Err(GeomError::CollinearPoints)
        );
        assert!(matches!(
            g.set_disk_from_two_points_and_center(&[0, 1], vector![0.0, 0.0]),
            Err(GeomError::InconsistentCenter { .. })
        ));
        assert!(matches!(
            g.set_disk_from_two_points(&[0, 17]),
            Err(GeomError::UnknownPoint { index: 17, .. })
        ));
        assert_eq!(g.disk(), Some(&d));
    }

    #[test]
    fn deleting_an_anchor_drops_the_anchors() {
        let mut g = square_group();
        g.set_disk_from_two_points(&[1, 3]).unwrap();
        g.delete_point(0).unwrap();
        assert_eq!(g.anchors(), Some([0, 2]));
        g.delete_point(2).unwrap();
        assert_eq!(g.anchors(), None);
        assert!(g.disk().is_some());
    }

    #[test]
    fn fit_to_fpvd_targets() {
        let mut g = PointGroup::new(
            "tri",
            vec![vector![0.0, 0.0], vector![4.0, 0.0], vector![0.0, 4.0]],
        );
        let disk = g.fit_disk_to(FpvdTarget::Vertex(0)).unwrap();
        assert!((disk.center - vector![2.0, 2.0]).norm() < 1e-12);

        let ray = g
            .fpvd()
            .edges
            .iter()
            .position(|e| e.pair == (0, 1))
            .unwrap();
        let disk = g
            .fit_disk_to(FpvdTarget::Edge {
                edge: ray,
                at: vector![2.0, 10.0],
            })
            .unwrap();
        assert!((disk.radius - 104f64.sqrt()).abs() < 1e-12);
        assert_eq!(g.anchors(), Some([0, 1]));

        // Synthetic ray endpoints have no generators.
        let infinite = g.fpvd().vertices.iter().position(|v| v.is_infinite).unwrap();
        assert!(matches!(
            g.fit_disk_to(FpvdTarget::Vertex(infinite)),
            Err(GeomError::InsufficientPoints { .. })
        ));
    }

    #[test]
    fn missing_disk_is_reported() {
        let mut g = square_group();
        assert_eq!(
            g.covers_points(),
            Err(GeomError::MissingDisk { group: "sq".into() })
        );
        let fixed = Disk::new(vector![0.0, 0.0], 1.0);
        assert!(matches!(
            g.resolve_collision(&fixed),
            Err(GeomError::MissingDisk { .. })
        ));
    }

    #[test]
    fn anchor_points_fall_back_to_first_two_points() {
        let mut g = square_group();
        g.set_disk(Some(Disk::new(vector![5.0, 5.0], 8.0)));
        assert_eq!(
            g.anchor_points().unwrap(),
            [vector![0.0, 0.0], vector![10.0, 0.0]]
        );
        let lone = PointGroup::new("lone", vec![vector![1.0, 1.0]]);
        assert!(matches!(
            lone.anchor_points(),
            Err(GeomError::InsufficientPoints { expected: 2, actual: 1 })
        ));
    }
}
