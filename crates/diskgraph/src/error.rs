use thiserror::Error;

/// Failure kinds of the geometry core.
///
/// None of these are fatal: every group's geometry can be recomputed from its
/// points, so callers report and continue.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    #[error("points are collinear and do not define a circle")]
    CollinearPoints,

    #[error("insufficient points: expected {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("points do not lie on a circle around the given center: {d1} vs {d2}")]
    InconsistentCenter { d1: f64, d2: f64 },

    #[error("no real solution: disks cannot be made tangent")]
    NoRealSolution,

    #[error("group '{group}' has no disk")]
    MissingDisk { group: String },

    #[error("disks are not tangent: |distance - (rA + rB)| = {gap}")]
    NotTangent { gap: f64 },

    #[error("point index {index} out of range for {len} points")]
    UnknownPoint { index: usize, len: usize },

    #[error("group index {index} out of range for {len} groups")]
    UnknownGroup { index: usize, len: usize },
}

pub type GeomResult<T> = Result<T, GeomError>;
