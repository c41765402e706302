//! The triangulation store, the derivation of its helper arrays, and
//! validation of their invariants.

pub mod derive;
pub mod triangulation;
pub mod validation;

pub use triangulation::{BoundaryEdge, Triangulation};
pub use validation::{NonManifoldHandling, TopologyValidationOptions, validate_triangulation};
