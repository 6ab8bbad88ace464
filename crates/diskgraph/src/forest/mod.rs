//! Spanning forests over group disks.
//!
//! Both builders run a multi-source BFS with one global `visited` set: roots
//! are taken in input order among unvisited groups, so every group lands in
//! exactly one tree. Groups without a disk never gain children and are never
//! picked as children; they end up as singleton roots.

use std::collections::VecDeque;

use crate::cfg::GeomCfg;
use crate::disk::{collides, edge_distance, Disk};

/// Relation used to connect groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TreeMode {
    /// Children are all unvisited groups whose disks collide with the parent's.
    #[default]
    Collisions,
    /// Children are the unvisited groups at minimal edge distance.
    Proximity,
}

/// Tree node; `group` indexes the input slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForestNode {
    pub group: usize,
    pub children: Vec<ForestNode>,
}

/// Roots partitioning all groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Forest {
    pub roots: Vec<ForestNode>,
}

impl Forest {
    /// Build with the slack and relation chosen by `mode`.
    pub fn build(disks: &[Option<Disk>], mode: TreeMode, cfg: &GeomCfg) -> Forest {
        match mode {
            TreeMode::Collisions => Self::from_collisions(disks, cfg.forest_collide_eps),
            TreeMode::Proximity => Self::from_proximity(disks),
        }
    }

    /// Edge iff the two disks collide within `epsilon`; each dequeued node
    /// adopts every unvisited colliding group at once.
    pub fn from_collisions(disks: &[Option<Disk>], epsilon: f64) -> Forest {
        bfs_forest(disks.len(), |current, visited| {
            let Some(disk) = &disks[current] else {
                return Vec::new();
            };
            (0..disks.len())
                .filter(|&j| !visited[j])
                .filter(|&j| matches!(&disks[j], Some(other) if collides(disk, [other], epsilon)))
                .collect()
        })
    }

    /// Each dequeued node adopts only the unvisited group(s) at minimal
    /// `edge_distance`; exact ties are all adopted, in input order.
    pub fn from_proximity(disks: &[Option<Disk>]) -> Forest {
        bfs_forest(disks.len(), |current, visited| {
            let Some(disk) = &disks[current] else {
                return Vec::new();
            };
            let mut nearest = Vec::new();
            let mut best = f64::INFINITY;
            for (j, other) in disks.iter().enumerate() {
                let Some(other) = other else { continue };
                if visited[j] {
                    continue;
                }
                let d = edge_distance(disk, other);
                if d < best {
                    best = d;
                    nearest.clear();
                    nearest.push(j);
                } else if d == best {
                    nearest.push(j);
                }
            }
            nearest
        })
    }

    /// Number of groups in the forest.
    pub fn len(&self) -> usize {
        self.groups().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// All groups in pre-order (tree by tree).
    pub fn groups(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<&ForestNode> = self.roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node.group);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Parent/child pairs in BFS order (tree by tree).
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for root in &self.roots {
            let mut queue: VecDeque<&ForestNode> = VecDeque::from([root]);
            while let Some(node) = queue.pop_front() {
                for child in &node.children {
                    out.push((node.group, child.group));
                    queue.push_back(child);
                }
            }
        }
        out
    }
}

/// Multi-source BFS; `adopt(current, visited)` returns the new children of
/// `current` among unvisited groups.
fn bfs_forest<F>(n: usize, mut adopt: F) -> Forest
where
    F: FnMut(usize, &[bool]) -> Vec<usize>,
{
    let mut visited = vec![false; n];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots = Vec::new();
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        roots.push(root);
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            for child in adopt(current, &visited) {
                visited[child] = true;
                children[current].push(child);
                queue.push_back(child);
            }
        }
    }
    Forest {
        roots: roots.into_iter().map(|r| assemble(r, &children)).collect(),
    }
}

fn assemble(group: usize, children: &[Vec<usize>]) -> ForestNode {
    ForestNode {
        group,
        children: children[group]
            .iter()
            .map(|&c| assemble(c, children))
            .collect(),
    }
}
