//! Explicit application state: every group, plus the tangent-point trace.
//!
//! Groups are addressed by their position in `groups()`; removing a group
//! shifts later positions down by one.

use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::disk::{collides, tangential_point, Disk};
use crate::error::{GeomError, GeomResult};
use crate::forest::{Forest, TreeMode};
use crate::fpvd::{Fpvd, FpvdTarget};
use crate::group::PointGroup;

/// Which end of a forest edge moves when resolving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolveDirection {
    MoveParent,
    MoveChild,
}

/// Forest edge annotated with whether its disks currently collide
/// (at `GeomCfg::collide_eps`, not the looser forest slack).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForestEdge {
    pub parent: usize,
    pub child: usize,
    pub colliding: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    cfg: GeomCfg,
    groups: Vec<PointGroup>,
    tangent_trace: Vec<Vector2<f64>>,
}

impl Scene {
    pub fn new(cfg: GeomCfg) -> Self {
        Self {
            cfg,
            groups: Vec::new(),
            tangent_trace: Vec::new(),
        }
    }

    #[inline]
    pub fn cfg(&self) -> &GeomCfg {
        &self.cfg
    }
    #[inline]
    pub fn groups(&self) -> &[PointGroup] {
        &self.groups
    }
    #[inline]
    pub fn tangent_trace(&self) -> &[Vector2<f64>] {
        &self.tangent_trace
    }

    pub fn group(&self, index: usize) -> GeomResult<&PointGroup> {
        let len = self.groups.len();
        self.groups
            .get(index)
            .ok_or(GeomError::UnknownGroup { index, len })
    }

    pub fn group_mut(&mut self, index: usize) -> GeomResult<&mut PointGroup> {
        let len = self.groups.len();
        self.groups
            .get_mut(index)
            .ok_or(GeomError::UnknownGroup { index, len })
    }

    /// Position of the first group called `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    /// Create a group with the scene's configuration; returns its position.
    pub fn add_group(&mut self, name: impl Into<String>, points: Vec<Vector2<f64>>) -> usize {
        self.insert_group(PointGroup::with_cfg(name, points, self.cfg))
    }

    /// Append an already built group (e.g. one restored from a snapshot).
    pub fn insert_group(&mut self, group: PointGroup) -> usize {
        tracing::debug!(group = %group.name, points = group.points().len(), "group added");
        self.groups.push(group);
        self.groups.len() - 1
    }

    pub fn remove_group(&mut self, index: usize) -> GeomResult<PointGroup> {
        self.group(index)?;
        Ok(self.groups.remove(index))
    }

    /// Drop all groups and the tangent trace.
    pub fn reset(&mut self) {
        self.groups.clear();
        self.tangent_trace.clear();
        tracing::info!("scene reset");
    }

    /// Disk per group, `None` where none is assigned.
    pub fn disks(&self) -> Vec<Option<Disk>> {
        self.groups.iter().map(|g| g.disk().copied()).collect()
    }

    pub fn forest(&self, mode: TreeMode) -> Forest {
        Forest::build(&self.disks(), mode, &self.cfg)
    }

    /// Forest edges in BFS order with their current collision status.
    pub fn forest_edges(&self, mode: TreeMode) -> Vec<ForestEdge> {
        let disks = self.disks();
        Forest::build(&disks, mode, &self.cfg)
            .edges()
            .into_iter()
            .map(|(parent, child)| {
                let colliding = match (&disks[parent], &disks[child]) {
                    (Some(a), Some(b)) => collides(a, [b], self.cfg.collide_eps),
                    _ => false,
                };
                ForestEdge {
                    parent,
                    child,
                    colliding,
                }
            })
            .collect()
    }

    /// Does group `index`'s disk collide with any other group's disk?
    pub fn collides(&self, index: usize) -> GeomResult<bool> {
        let disk = self.group(index)?.require_disk()?;
        let others = self.groups.iter().filter_map(|g| g.disk());
        Ok(collides(disk, others, self.cfg.collide_eps))
    }

    /// Relocate `moving`'s disk off `fixed`'s disk; `fixed` is untouched.
    pub fn resolve_collision(&mut self, moving: usize, fixed: usize) -> GeomResult<Disk> {
        let obstacle = *self.group(fixed)?.require_disk()?;
        self.group_mut(moving)?.resolve_collision(&obstacle)
    }

    /// Resolve the collision along a forest edge, moving the chosen end.
    pub fn resolve_edge(
        &mut self,
        edge: &ForestEdge,
        direction: ResolveDirection,
    ) -> GeomResult<Disk> {
        match direction {
            ResolveDirection::MoveParent => self.resolve_collision(edge.parent, edge.child),
            ResolveDirection::MoveChild => self.resolve_collision(edge.child, edge.parent),
        }
    }

    /// Contact point of two groups' disks; appended to the tangent trace.
    pub fn tangential_point(&mut self, a: usize, b: usize) -> GeomResult<Vector2<f64>> {
        let da = self.group(a)?.require_disk()?;
        let db = self.group(b)?.require_disk()?;
        let point = tangential_point(da, db, self.cfg.tangent_eps)?;
        self.tangent_trace.push(point);
        Ok(point)
    }

    pub fn clear_tangent_trace(&mut self) {
        self.tangent_trace.clear();
    }

    /// Largest distance between any two points across all groups; 0 for
    /// fewer than two points.
    pub fn max_distance(&self) -> f64 {
        let all: Vec<Vector2<f64>> = self
            .groups
            .iter()
            .flat_map(|g| g.points().iter().copied())
            .collect();
        let mut best = 0.0_f64;
        for (i, p) in all.iter().enumerate() {
            for q in &all[i + 1..] {
                best = best.max((p - q).norm());
            }
        }
        best
    }

    /// Hit-test every group's FPVD: vertices of all groups first, then edges.
    pub fn locate(&self, point: Vector2<f64>, tolerance: f64) -> Option<(usize, FpvdTarget)> {
        let hit = |f: fn(&Fpvd, Vector2<f64>, f64) -> Option<FpvdTarget>| {
            self.groups
                .iter()
                .enumerate()
                .find_map(|(i, g)| f(g.fpvd(), point, tolerance).map(|t| (i, t)))
        };
        hit(Fpvd::locate_vertex).or_else(|| hit(Fpvd::locate_edge))
    }
}
