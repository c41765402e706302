//! # fast-delaunay
//!
//! Planar triangulation with the full mesh topology downstream code needs.
//!
//! ## Features
//! - A fast divide-and-conquer triangulator over an explicit task stack
//!   ([`Triangulation::fast`]); close to Delaunay, much cheaper than an exact one
//! - An importer for externally built triangle lists that validates them and
//!   derives any missing helper arrays ([`algs::custom::CustomTriangulation`])
//! - Derived topology: point → triangles, triangle → neighbours, global edge
//!   numbers, boundary loop
//! - Closed-path utilities: area, point-in-polygon, self-intersection
//!   (with repair of touching paths), ear-clipping fill, linking of
//!   multi-path regions and half-plane clipping
//!
//! ## Topology arrays
//!
//! | array | shape | meaning |
//! |---|---|---|
//! | `tri` | `[usize; 3]` per triangle | point indices |
//! | `vertices` | `Vec<usize>` per point | incident triangles, ascending |
//! | `walk` | `[Option<usize>; 3]` per triangle | neighbour across slot `j` |
//! | `edges` | `[usize; 3]` per triangle | global number of slot `j` |
//!
//! Slot `j` of a triangle is the edge from its `j`-th point to its
//! `(j + 1) % 3`-th point.
//!
//! ## Invariant checks
//!
//! Enable the `strict-invariants` or `check-invariants` feature to have
//! constructors validate their output and panic on violations. Without them,
//! call [`topology::validation::validate_triangulation`] explicitly.
//!
//! ## Logging
//!
//! Construction summaries are emitted at `debug` level and per-merge detail
//! at `trace` through the [`log`] facade; non-manifold edges are reported at
//! `warn` unless configured otherwise.

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use mesh_error::MeshError;
pub use topology::triangulation::Triangulation;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::custom::{CustomTriangulation, ImportOptions};
    pub use crate::algs::fast::FastOptions;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::clip::{ClippedTopology, clip_half_plane};
    pub use crate::geometry::polygon::{
        check_and_fix_self_intersection, check_self_intersection, fill, fill_region, inside, link,
        polygon_area, region_area,
    };
    pub use crate::geometry::samples::{Axis, PlanarSamples};
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::triangulation::{BoundaryEdge, Triangulation};
    pub use crate::topology::validation::{
        NonManifoldHandling, TopologyValidationOptions, validate_triangulation,
    };
}
