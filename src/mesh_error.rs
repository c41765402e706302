//! MeshError: Unified error type for fast-delaunay public APIs
//!
//! Every constructor and validator in this crate reports failures through
//! this enum. Input-shape and structural errors are detected before any
//! partial triangulation is built, so an `Err` never carries a half-built
//! topology.

use thiserror::Error;

/// Unified error type for triangulation construction and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Samples must be planar (exactly two coordinate rows).
    #[error("Unsupported dimension: samples have {found} coordinate rows, only 2 is supported")]
    UnsupportedDimension { found: usize },
    /// Fewer than three usable samples.
    #[error("Insufficient samples: triangulation is futile with {found} samples (need at least 3)")]
    InsufficientSamples { found: usize },
    /// A triangle row is shorter than `dimension + 1`.
    #[error("Dimension mismatch: triangle {triangle} has {found} vertex indices, expected at least {expected}")]
    DimensionMismatch {
        triangle: usize,
        expected: usize,
        found: usize,
    },
    /// A triangle references a vertex outside `[0, num_samples)`.
    #[error("Illegal vertex index {index} at triangle {triangle}, slot {slot} (num_samples = {num_samples})")]
    IllegalVertexIndex {
        triangle: usize,
        slot: usize,
        index: usize,
        num_samples: usize,
    },
    /// A sample is not referenced by any triangle.
    #[error("Uncovered sample: point {index} is not a vertex of any triangle")]
    UncoveredSample { index: usize },
    /// A triangle lists the same vertex more than once.
    #[error("Degenerate triangle {triangle}: vertex {index} appears more than once")]
    DegenerateTriangle { triangle: usize, index: usize },
    /// A helper array cannot be derived because samples were not supplied.
    #[error("Cannot construct {0} without samples")]
    MissingTopology(&'static str),
    /// A supplied helper array has the wrong outer length.
    #[error("Shape mismatch: `{array}` has length {found}, expected {expected}")]
    ShapeMismatch {
        array: &'static str,
        expected: usize,
        found: usize,
    },
    /// A `Walk` entry points at a triangle that does not exist.
    #[error("Illegal neighbor {neighbor} at triangle {triangle}, slot {slot}")]
    IllegalNeighbor {
        triangle: usize,
        slot: usize,
        neighbor: usize,
    },
    /// An `Edges` entry is outside `[0, num_edges)`.
    #[error("Illegal edge number {edge} at triangle {triangle}, slot {slot} (num_edges = {num_edges})")]
    IllegalEdgeNumber {
        triangle: usize,
        slot: usize,
        edge: usize,
        num_edges: usize,
    },
    /// An undirected edge is shared by more than two triangles.
    #[error("Non-manifold edge ({a}, {b}) shared by {incident_triangles} triangles")]
    NonManifoldEdge {
        a: usize,
        b: usize,
        incident_triangles: usize,
    },
    /// `Walk` is not symmetric, or neighbours do not share the slot's edge.
    #[error("Asymmetric walk: triangle {triangle}, slot {slot} points to {neighbor}, which does not point back across the same edge")]
    AsymmetricWalk {
        triangle: usize,
        slot: usize,
        neighbor: usize,
    },
    /// `Vertices` disagrees with `Tri`.
    #[error("Incidence mismatch: point {point} and triangle {triangle} disagree between Tri and Vertices")]
    IncidenceMismatch { point: usize, triangle: usize },
    /// Two slots of one shared edge carry different global numbers, or the
    /// number of distinct edges disagrees with `NumEdges`.
    #[error("Edge numbering mismatch at triangle {triangle}, slot {slot}: {reason}")]
    EdgeNumberMismatch {
        triangle: usize,
        slot: usize,
        reason: String,
    },
    /// Boundary edges do not form a single closed loop.
    #[error("Boundary is not a single closed loop: {0}")]
    BoundaryNotClosed(String),
    /// A triangle winds opposite to the first non-degenerate triangle.
    #[error("Inconsistent winding: triangle {triangle} winds opposite to the first non-degenerate triangle")]
    InconsistentWinding { triangle: usize },
    /// A closed path is not `[2][n]` with equal row lengths.
    #[error("Samples argument has bad dimensions: expected 2 rows of equal length")]
    BadPathDimensions,
    /// A closed path crosses itself.
    #[error("Path self intersects")]
    PathSelfIntersects,
}
