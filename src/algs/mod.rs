//! Triangulation constructors.

pub mod custom;
pub mod fast;
pub(crate) mod merge;

pub use custom::{CustomTriangulation, ImportOptions};
pub use fast::{DEFAULT_ROTATION, FastOptions};
