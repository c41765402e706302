//! Planar sample sets.
//!
//! Callers hand coordinates over as `coords[axis][point]`: one row per axis,
//! one column per sample. [`PlanarSamples`] checks the row count once and
//! keeps the two rows as owned, equal-length `f32` vectors, so the
//! triangulators can index `x(i)` / `y(i)` without re-checking shapes.

use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};

/// Coordinate axis of a planar sample set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Row index of this axis in `coords[axis][point]`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Two parallel coordinate rows of equal length.
///
/// Deserialization applies the same truncation as [`PlanarSamples::from_rows`],
/// so a ragged payload never yields rows of different lengths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSamples")]
pub struct PlanarSamples {
    x: Vec<f32>,
    y: Vec<f32>,
}

#[derive(Deserialize)]
struct RawSamples {
    x: Vec<f32>,
    y: Vec<f32>,
}

impl From<RawSamples> for PlanarSamples {
    fn from(RawSamples { mut x, mut y }: RawSamples) -> Self {
        let n = x.len().min(y.len());
        x.truncate(n);
        y.truncate(n);
        Self { x, y }
    }
}

impl PlanarSamples {
    /// Build from `coords[axis][point]`.
    ///
    /// Fails with [`MeshError::UnsupportedDimension`] unless exactly two rows
    /// are given. When the rows differ in length the shorter one wins, so the
    /// sample count is `min(len(x), len(y))`.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, MeshError> {
        if rows.len() != 2 {
            return Err(MeshError::UnsupportedDimension { found: rows.len() });
        }
        let (xs, ys) = (rows[0].as_ref(), rows[1].as_ref());
        let n = xs.len().min(ys.len());
        Ok(Self {
            x: xs[..n].to_vec(),
            y: ys[..n].to_vec(),
        })
    }

    /// Build from `(x, y)` pairs.
    pub fn from_points(points: &[[f32; 2]]) -> Self {
        Self {
            x: points.iter().map(|p| p[0]).collect(),
            y: points.iter().map(|p| p[1]).collect(),
        }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[inline]
    pub fn x(&self, i: usize) -> f32 {
        self.x[i]
    }

    #[inline]
    pub fn y(&self, i: usize) -> f32 {
        self.y[i]
    }

    /// Coordinate of sample `i` along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis, i: usize) -> f32 {
        match axis {
            Axis::X => self.x[i],
            Axis::Y => self.y[i],
        }
    }

    #[inline]
    pub fn point(&self, i: usize) -> [f32; 2] {
        [self.x[i], self.y[i]]
    }

    /// The `x` row.
    pub fn xs(&self) -> &[f32] {
        &self.x
    }

    /// The `y` row.
    pub fn ys(&self) -> &[f32] {
        &self.y
    }

    /// Copy rotated counter-clockwise by `angle` radians about the origin.
    ///
    /// The rotation is evaluated in `f64` and rounded back to `f32`.
    pub fn rotated(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let (x, y) = self
            .x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| {
                let (x, y) = (f64::from(x), f64::from(y));
                ((x * cos - y * sin) as f32, (y * cos + x * sin) as f32)
            })
            .unzip();
        Self { x, y }
    }
}
